//! HTML projection of posts.
//!
//! All post text is escaped before it is embedded, in element content and in
//! attribute values alike.

use std::fmt::Write as _;

use crate::view::PostView;

/// Shown in place of the grid when there are no posts.
pub const EMPTY_STATE_MESSAGE: &str = "No posts yet. Be the first to share a story!";

/// Escape text for use in HTML content or a double- or single-quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Render the post grid, newest first as given.
pub fn render_post_list(posts: &[PostView]) -> String {
    if posts.is_empty() {
        return format!("<p class=\"posts-empty\">{EMPTY_STATE_MESSAGE}</p>\n");
    }

    let mut html = String::new();
    for post in posts {
        html.push_str(&render_post_card(post));
    }
    html
}

/// One card of the grid: image, title, excerpt and the action buttons.
pub fn render_post_card(post: &PostView) -> String {
    let title = escape_html(&post.title);
    let mut html = String::new();
    // Writing to a String cannot fail.
    let _ = write!(
        html,
        concat!(
            "<article class=\"post\" data-post-id=\"{id}\">\n",
            "  <div class=\"post-img-container\">\n",
            "    <img src=\"{image}\" alt=\"{title}\">\n",
            "  </div>\n",
            "  <div class=\"post-content\">\n",
            "    <h3 class=\"post-title\">{title}</h3>\n",
            "    <p class=\"post-excerpt\">{description}</p>\n",
            "    <div class=\"post-actions\">\n",
            "      <button class=\"btn btn-outline btn-sm\" data-action=\"view\" data-post-id=\"{id}\">Read More</button>\n",
            "      <button class=\"btn btn-secondary btn-sm\" data-action=\"edit\" data-post-id=\"{id}\">Edit</button>\n",
            "      <button class=\"btn btn-danger btn-sm\" data-action=\"delete\" data-post-id=\"{id}\">Delete</button>\n",
            "    </div>\n",
            "  </div>\n",
            "</article>\n",
        ),
        id = post.id,
        image = escape_html(&post.image_url),
        title = title,
        description = escape_html(&post.description),
    );
    html
}

/// Render the full view of one post.
pub fn render_post_detail(post: &PostView) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        concat!(
            "<h2 class=\"view-title\">{title}</h2>\n",
            "<img src=\"{image}\" class=\"view-img\" alt=\"{title}\">\n",
            "<p class=\"view-date\">{date}</p>\n",
            "<div class=\"view-content\">{description}</div>\n",
        ),
        title = escape_html(&post.title),
        image = escape_html(&post.image_url),
        date = escape_html(&post.date),
        description = escape_html(&post.description),
    );
    html
}
