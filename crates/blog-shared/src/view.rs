//! View models - posts as a front end displays them.

use serde::{Deserialize, Serialize};

use blog_core::domain::{Post, PostId};

/// Image shown for posts stored without one.
pub const DEFAULT_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1499750310107-5fef28a66643?q=80&w=1000&auto=format&fit=crop";

/// A post ready to display. The fallback image is already resolved here and
/// never written back to the stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostView {
    pub id: PostId,
    pub title: String,
    pub description: String,
    pub image_url: String,
    /// `false` when `image_url` is the fallback.
    pub has_image: bool,
    pub date: String,
}

impl PostView {
    pub fn from_post(post: &Post, default_image: &str) -> Self {
        let has_image = post.has_image();
        Self {
            id: post.id,
            title: post.title.clone(),
            description: post.description.clone(),
            image_url: if has_image {
                post.image.trim().to_string()
            } else {
                default_image.to_string()
            },
            has_image,
            date: post.date.clone(),
        }
    }

    /// Views for a whole collection, keeping its order.
    pub fn from_posts(posts: &[Post], default_image: &str) -> Vec<Self> {
        posts
            .iter()
            .map(|p| Self::from_post(p, default_image))
            .collect()
    }
}

impl From<&Post> for PostView {
    fn from(post: &Post) -> Self {
        Self::from_post(post, DEFAULT_IMAGE_URL)
    }
}
