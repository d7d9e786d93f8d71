use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a post. Serialized as a plain JSON number.
pub type PostId = i64;

/// Post entity - one blog entry.
///
/// `id` and `date` are fixed at creation; everything else is replaced
/// wholesale by an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub description: String,
    /// Image URL. Empty means "no image"; the fallback is a rendering concern.
    #[serde(default)]
    pub image: String,
    /// Human-readable creation date.
    #[serde(default)]
    pub date: String,
}

impl Post {
    /// Create a new post from validated content.
    pub fn new(id: PostId, content: PostContent, date: String) -> Self {
        Self {
            id,
            title: content.title,
            description: content.description,
            image: content.image,
            date,
        }
    }

    /// Replace the mutable fields, keeping `id` and `date`.
    pub fn apply(&mut self, content: PostContent) {
        self.title = content.title;
        self.description = content.description;
        self.image = content.image;
    }

    pub fn has_image(&self) -> bool {
        !self.image.trim().is_empty()
    }
}

/// The user-editable part of a post, as submitted by a form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostContent {
    pub title: String,
    pub description: String,
    pub image: String,
}

impl PostContent {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            image: image.into(),
        }
    }

    /// Check the required fields. Whitespace-only counts as empty.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title is required");
        }
        if self.description.trim().is_empty() {
            missing.push("description is required");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(missing.join("; ")))
        }
    }
}
