//! The post store - single owner of the post collection.
//!
//! Every mutation is written through to the [`Storage`] slot before the call
//! returns. Reads never touch storage.

use std::collections::BTreeSet;
use std::fmt::{self, Write as _};
use std::str::FromStr;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::{Post, PostContent, PostId};
use crate::error::DomainError;
use crate::ports::{Clock, ClockIds, IdGenerator, Storage, SystemClock};

/// Key the collection is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "myBlogPosts";

/// `chrono` format for the creation date, e.g. `3/7/2025`.
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// What to do when the stored blob exists but cannot be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CorruptDataPolicy {
    /// Set the blob aside under a backup key and start empty.
    #[default]
    FallBackToEmpty,
    /// Fail construction with [`DomainError::Deserialization`].
    Refuse,
}

impl FromStr for CorruptDataPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fallback" | "fall-back" | "empty" => Ok(Self::FallBackToEmpty),
            "refuse" | "fail" => Ok(Self::Refuse),
            other => Err(format!(
                "unknown corrupt data policy '{other}' (expected 'fallback' or 'refuse')"
            )),
        }
    }
}

/// Store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Storage key holding the serialized collection.
    pub key: String,
    /// `chrono` strftime format used to stamp `Post::date`.
    pub date_format: String,
    pub on_corrupt: CorruptDataPolicy,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            key: DEFAULT_STORAGE_KEY.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            on_corrupt: CorruptDataPolicy::default(),
        }
    }
}

impl StoreOptions {
    /// Key an undecodable blob is copied to before the store starts empty.
    pub fn backup_key(&self) -> String {
        format!("{}.corrupt", self.key)
    }
}

/// Something odd found while loading, surfaced to the caller instead of
/// failing startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// The stored blob could not be decoded; the store started empty.
    CorruptData {
        error: String,
        /// Where the raw blob was copied, if the copy succeeded.
        backup_key: Option<String>,
    },
    /// The stored collection holds the same id more than once.
    DuplicateIds { ids: Vec<PostId> },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadWarning::CorruptData {
                error,
                backup_key: Some(key),
            } => write!(
                f,
                "stored posts could not be read ({error}); the original data was kept under '{key}'"
            ),
            LoadWarning::CorruptData {
                error,
                backup_key: None,
            } => write!(
                f,
                "stored posts could not be read ({error}) and could not be backed up"
            ),
            LoadWarning::DuplicateIds { ids } => {
                write!(f, "stored posts contain duplicate ids: {ids:?}")
            }
        }
    }
}

/// Builder for [`PostStore`]. Defaults to the system clock and clock-derived ids.
pub struct PostStoreBuilder {
    storage: Arc<dyn Storage>,
    clock: Option<Arc<dyn Clock>>,
    ids: Option<Arc<dyn IdGenerator>>,
    options: StoreOptions,
}

impl PostStoreBuilder {
    pub fn options(mut self, options: StoreOptions) -> Self {
        self.options = options;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    /// Load the collection from storage and build the store.
    pub async fn open(self) -> Result<PostStore, DomainError> {
        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(SystemClock) as Arc<dyn Clock>);
        let ids = self
            .ids
            .unwrap_or_else(|| Arc::new(ClockIds::new(clock.clone())) as Arc<dyn IdGenerator>);

        PostStore::load(self.storage, clock, ids, self.options).await
    }
}

/// Authoritative in-memory post collection, newest first.
pub struct PostStore {
    posts: Vec<Post>,
    storage: Arc<dyn Storage>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    options: StoreOptions,
    /// Largest id this store has held; new ids are always above it.
    last_id: PostId,
    dirty: bool,
    load_warning: Option<LoadWarning>,
}

impl PostStore {
    pub fn builder(storage: Arc<dyn Storage>) -> PostStoreBuilder {
        PostStoreBuilder {
            storage,
            clock: None,
            ids: None,
            options: StoreOptions::default(),
        }
    }

    /// Open a store with default options, system clock and clock-derived ids.
    pub async fn open(storage: Arc<dyn Storage>) -> Result<Self, DomainError> {
        Self::builder(storage).open().await
    }

    async fn load(
        storage: Arc<dyn Storage>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        options: StoreOptions,
    ) -> Result<Self, DomainError> {
        let (posts, load_warning) = match storage.get(&options.key).await? {
            None => (Vec::new(), None),
            Some(blob) => Self::decode(storage.as_ref(), &options, &blob).await?,
        };

        let last_id = posts.iter().map(|p| p.id).max().unwrap_or(0);

        info!(
            key = %options.key,
            posts = posts.len(),
            "Post store opened"
        );

        Ok(Self {
            posts,
            storage,
            clock,
            ids,
            options,
            last_id,
            dirty: false,
            load_warning,
        })
    }

    async fn decode(
        storage: &dyn Storage,
        options: &StoreOptions,
        blob: &str,
    ) -> Result<(Vec<Post>, Option<LoadWarning>), DomainError> {
        // A stored `null` reads as an empty collection.
        let err = match serde_json::from_str::<Option<Vec<Post>>>(blob) {
            Ok(posts) => {
                let posts = posts.unwrap_or_default();
                let duplicates = duplicate_ids(&posts);
                if duplicates.is_empty() {
                    return Ok((posts, None));
                }
                warn!(ids = ?duplicates, "Stored posts contain duplicate ids");
                return Ok((posts, Some(LoadWarning::DuplicateIds { ids: duplicates })));
            }
            Err(e) => e,
        };

        match options.on_corrupt {
            CorruptDataPolicy::Refuse => {
                error!(key = %options.key, error = %err, "Stored posts are unreadable");
                Err(DomainError::Deserialization(err.to_string()))
            }
            CorruptDataPolicy::FallBackToEmpty => {
                let backup_key = options.backup_key();
                let backup_key = match storage.set(&backup_key, blob).await {
                    Ok(()) => Some(backup_key),
                    Err(e) => {
                        warn!(key = %backup_key, error = %e, "Could not back up unreadable posts");
                        None
                    }
                };
                warn!(
                    key = %options.key,
                    backup = ?backup_key,
                    error = %err,
                    "Stored posts are unreadable, starting with an empty collection"
                );
                Ok((
                    Vec::new(),
                    Some(LoadWarning::CorruptData {
                        error: err.to_string(),
                        backup_key,
                    }),
                ))
            }
        }
    }

    /// All posts, newest first.
    pub fn list(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Find a post by id.
    pub fn read(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// Create a post at the front of the collection and persist.
    ///
    /// If persisting fails the post stays in memory at index 0 and the error
    /// is returned.
    pub async fn create(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        image: impl Into<String>,
    ) -> Result<Post, DomainError> {
        let content = PostContent::new(title, description, image);
        content.validate()?;

        let id = self.allocate_id()?;
        let date = self.stamp_date()?;
        let post = Post::new(id, content, date);

        self.posts.insert(0, post.clone());
        debug!(post_id = post.id, "Post created");

        self.persist().await?;
        Ok(post)
    }

    /// Replace title, description and image of an existing post and persist.
    /// Position, `id` and `date` are kept.
    pub async fn update(
        &mut self,
        id: PostId,
        title: impl Into<String>,
        description: impl Into<String>,
        image: impl Into<String>,
    ) -> Result<Post, DomainError> {
        let content = PostContent::new(title, description, image);
        content.validate()?;

        let post = self
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(DomainError::NotFound {
                entity_type: "post",
                id,
            })?;
        post.apply(content);
        let updated = post.clone();
        debug!(post_id = id, "Post updated");

        self.persist().await?;
        Ok(updated)
    }

    /// Remove a post. Returns `false` without touching storage when no post
    /// has this id.
    pub async fn delete(&mut self, id: PostId) -> Result<bool, DomainError> {
        let Some(index) = self.posts.iter().position(|p| p.id == id) else {
            debug!(post_id = id, "Delete skipped, no such post");
            return Ok(false);
        };

        self.posts.remove(index);
        debug!(post_id = id, "Post deleted");

        self.persist().await?;
        Ok(true)
    }

    /// Write the current collection to storage. Used to retry after a failed
    /// persist.
    pub async fn flush(&mut self) -> Result<(), DomainError> {
        self.persist().await
    }

    /// `true` when the last persist failed and memory is ahead of storage.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn load_warning(&self) -> Option<&LoadWarning> {
        self.load_warning.as_ref()
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    fn allocate_id(&mut self) -> Result<PostId, DomainError> {
        let floor = self
            .last_id
            .checked_add(1)
            .ok_or_else(|| DomainError::Internal("post id space exhausted".to_string()))?;
        let id = self.ids.next_id().max(floor);
        self.last_id = id;
        Ok(id)
    }

    fn stamp_date(&self) -> Result<String, DomainError> {
        let mut date = String::new();
        write!(
            date,
            "{}",
            self.clock.now().format(&self.options.date_format)
        )
        .map_err(|_| {
            DomainError::Internal(format!(
                "invalid date format '{}'",
                self.options.date_format
            ))
        })?;
        Ok(date)
    }

    async fn persist(&mut self) -> Result<(), DomainError> {
        self.dirty = true;
        let blob = serde_json::to_string(&self.posts)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if let Err(e) = self.storage.set(&self.options.key, &blob).await {
            error!(
                key = %self.options.key,
                error = %e,
                "Failed to persist posts, in-memory state is ahead of storage"
            );
            return Err(e.into());
        }

        self.dirty = false;
        Ok(())
    }
}

fn duplicate_ids(posts: &[Post]) -> Vec<PostId> {
    let mut seen = BTreeSet::new();
    let mut duplicates = BTreeSet::new();
    for post in posts {
        if !seen.insert(post.id) {
            duplicates.insert(post.id);
        }
    }
    duplicates.into_iter().collect()
}

#[cfg(test)]
mod tests;
