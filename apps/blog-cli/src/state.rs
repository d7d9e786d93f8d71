//! Application state - the opened post store plus presentation settings.

use anyhow::Context;

use blog_core::PostStore;

use crate::config::AppConfig;

/// Everything a command needs.
pub struct AppState {
    pub store: PostStore,
    pub default_image: String,
}

impl AppState {
    /// Open the configured storage backend and load the post store.
    pub async fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let storage = config
            .storage
            .open()
            .await
            .context("Failed to open storage")?;

        let store = PostStore::builder(storage)
            .options(config.store.clone())
            .open()
            .await
            .context("Failed to load posts")?;

        if let Some(warning) = store.load_warning() {
            eprintln!("Warning: {warning}");
        }

        tracing::debug!(posts = store.len(), "Application state initialized");

        Ok(Self {
            store,
            default_image: config.default_image.clone(),
        })
    }
}
