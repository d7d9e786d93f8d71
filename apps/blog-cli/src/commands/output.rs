//! Printing posts in the selected output format.

use std::io::Write;

use blog_shared::PostView;
use blog_shared::render::{render_post_detail, render_post_list};

use super::OutputFormat;

const EXCERPT_CHARS: usize = 72;

pub fn print_list(
    out: &mut dyn Write,
    format: OutputFormat,
    posts: &[PostView],
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, posts)?;
            writeln!(out)?;
        }
        OutputFormat::Html => write!(out, "{}", render_post_list(posts))?,
        OutputFormat::Text if posts.is_empty() => writeln!(out, "No posts yet.")?,
        OutputFormat::Text => {
            for post in posts {
                writeln!(out, "{:>13}  {:<10}  {}", post.id, post.date, post.title)?;
                writeln!(out, "{:>13}  {}", "", excerpt(&post.description))?;
            }
        }
    }
    Ok(())
}

pub fn print_post(out: &mut dyn Write, format: OutputFormat, post: &PostView) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, post)?;
            writeln!(out)?;
        }
        OutputFormat::Html => write!(out, "{}", render_post_detail(post))?,
        OutputFormat::Text => {
            writeln!(out, "{}", post.title)?;
            writeln!(out, "Id:    {}", post.id)?;
            writeln!(out, "Date:  {}", post.date)?;
            if post.has_image {
                writeln!(out, "Image: {}", post.image_url)?;
            } else {
                writeln!(out, "Image: (default) {}", post.image_url)?;
            }
            writeln!(out)?;
            writeln!(out, "{}", post.description)?;
        }
    }
    Ok(())
}

/// First line of `text`, cut to a readable length.
fn excerpt(text: &str) -> String {
    let line = text.lines().next().unwrap_or("").trim();
    if line.chars().count() <= EXCERPT_CHARS {
        return line.to_string();
    }
    let cut: String = line.chars().take(EXCERPT_CHARS - 1).collect();
    format!("{}…", cut.trim_end())
}
