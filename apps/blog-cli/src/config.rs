//! Application configuration loaded from environment variables.

use std::env;

use anyhow::{Context, bail};
use chrono::format::{Item, StrftimeItems};

use blog_core::store::{CorruptDataPolicy, DEFAULT_DATE_FORMAT, DEFAULT_STORAGE_KEY, StoreOptions};
use blog_infra::StorageBackend;
use blog_shared::DEFAULT_IMAGE_URL;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage: StorageBackend,
    pub store: StoreOptions,
    /// Image shown for posts without one.
    pub default_image: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration using `lookup` for variable access.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let storage = StorageBackend::from_lookup(&lookup).context("BLOG_STORAGE")?;

        let date_format = lookup("BLOG_DATE_FORMAT")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string());
        if StrftimeItems::new(&date_format).any(|item| matches!(item, Item::Error)) {
            bail!("BLOG_DATE_FORMAT: invalid date format '{date_format}'");
        }

        let on_corrupt = match lookup("BLOG_ON_CORRUPT") {
            Some(value) => value
                .parse::<CorruptDataPolicy>()
                .map_err(anyhow::Error::msg)
                .context("BLOG_ON_CORRUPT")?,
            None => CorruptDataPolicy::default(),
        };

        Ok(Self {
            storage,
            store: StoreOptions {
                key: lookup("BLOG_STORAGE_KEY")
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string()),
                date_format,
                on_corrupt,
            },
            default_image: lookup("BLOG_DEFAULT_IMAGE")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string()),
        })
    }
}
