//! # Blog Shared
//!
//! Presentation-side types shared by front ends: render-ready post views and
//! HTML projection of the post collection.

pub mod render;
pub mod view;

pub use view::{DEFAULT_IMAGE_URL, PostView};
