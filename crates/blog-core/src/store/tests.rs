use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::DateTime;

use super::*;
use crate::ports::{FixedClock, SequentialIds, StorageError};

/// Storage double that counts writes and can be told to fail.
#[derive(Default)]
struct TestSlot {
    values: Mutex<HashMap<String, String>>,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl TestSlot {
    fn with(key: &str, blob: &str) -> Self {
        let slot = Self::default();
        slot.values
            .lock()
            .unwrap()
            .insert(key.to_string(), blob.to_string());
        slot
    }

    fn raw(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Storage for TestSlot {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Io("read refused".to_string()));
        }
        Ok(self.raw(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::QuotaExceeded {
                requested: value.len(),
                limit: 0,
            });
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.values.lock().unwrap().remove(key);
        Ok(())
    }
}

fn fixed_clock() -> Arc<FixedClock> {
    let at = DateTime::parse_from_rfc3339("2025-03-07T10:00:00+00:00").unwrap();
    Arc::new(FixedClock::new(at))
}

async fn open_store(slot: Arc<TestSlot>) -> PostStore {
    PostStore::builder(slot)
        .clock(fixed_clock())
        .id_generator(Arc::new(SequentialIds::starting_at(1001)))
        .open()
        .await
        .unwrap()
}

fn titles(store: &PostStore) -> Vec<&str> {
    store.list().iter().map(|p| p.title.as_str()).collect()
}

#[tokio::test]
async fn test_walkthrough_scenario() {
    let slot = Arc::new(TestSlot::default());
    let mut store = open_store(slot.clone()).await;
    assert!(store.is_empty());

    let a = store.create("A", "desc A", "").await.unwrap();
    assert_eq!(a.id, 1001);
    let b = store.create("B", "desc B", "img.png").await.unwrap();
    assert_eq!(b.id, 1002);
    assert_eq!(titles(&store), ["B", "A"]);

    let a2 = store.update(1001, "A2", "desc A2", "").await.unwrap();
    assert_eq!(a2.id, 1001);
    assert_eq!(titles(&store), ["B", "A2"]);

    assert!(store.delete(1002).await.unwrap());
    assert_eq!(titles(&store), ["A2"]);

    assert!(!store.delete(9999).await.unwrap());
    assert_eq!(titles(&store), ["A2"]);
    assert_eq!(store.list()[0].id, 1001);
}

#[tokio::test]
async fn test_create_prepends_stamps_and_persists() {
    let slot = Arc::new(TestSlot::default());
    let mut store = open_store(slot.clone()).await;

    let post = store.create("Hello", "World", "").await.unwrap();

    assert_eq!(store.list()[0], post);
    assert_eq!(post.date, "3/7/2025");
    assert_eq!(post.image, "");
    assert_eq!(slot.writes(), 1);

    let stored: Vec<Post> = serde_json::from_str(&slot.raw(DEFAULT_STORAGE_KEY).unwrap()).unwrap();
    assert_eq!(stored, store.list());
}

#[tokio::test]
async fn test_create_rejects_empty_fields_without_writing() {
    let slot = Arc::new(TestSlot::default());
    let mut store = open_store(slot.clone()).await;

    let err = store.create("", "body", "").await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
    let err = store.create("title", "   ", "").await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    assert!(store.is_empty());
    assert_eq!(slot.writes(), 0);
}

#[tokio::test]
async fn test_read_returns_created_fields() {
    let mut store = open_store(Arc::new(TestSlot::default())).await;
    let created = store.create("T", "<b>D</b>", "pic.jpg").await.unwrap();

    let found = store.read(created.id).unwrap();
    assert_eq!(found.title, "T");
    assert_eq!(found.description, "<b>D</b>");
    assert_eq!(found.image, "pic.jpg");
    assert!(store.read(created.id + 1).is_none());
}

#[tokio::test]
async fn test_update_keeps_id_date_and_position() {
    let slot = Arc::new(TestSlot::default());
    let mut store = open_store(slot.clone()).await;
    let first = store.create("first", "1", "").await.unwrap();
    store.create("second", "2", "").await.unwrap();

    let updated = store.update(first.id, "first!", "1!", "x.png").await.unwrap();

    assert_eq!(updated.id, first.id);
    assert_eq!(updated.date, first.date);
    assert_eq!(store.list()[1], updated);
    assert_eq!(slot.writes(), 3);
}

#[tokio::test]
async fn test_update_missing_id_is_not_found_and_untouched() {
    let slot = Arc::new(TestSlot::default());
    let mut store = open_store(slot.clone()).await;
    store.create("only", "one", "").await.unwrap();
    let before = store.list().to_vec();

    let err = store.update(4242, "x", "y", "").await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(store.list(), before.as_slice());
    assert_eq!(slot.writes(), 1);
}

#[tokio::test]
async fn test_delete_missing_id_does_not_write() {
    let slot = Arc::new(TestSlot::default());
    let mut store = open_store(slot.clone()).await;
    store.create("keep", "me", "").await.unwrap();

    assert!(!store.delete(1).await.unwrap());
    assert_eq!(store.len(), 1);
    assert_eq!(slot.writes(), 1);
}

#[tokio::test]
async fn test_reopen_yields_same_list() {
    let slot = Arc::new(TestSlot::default());
    let mut store = open_store(slot.clone()).await;
    store.create("A", "a", "").await.unwrap();
    store.create("B", "b", "b.png").await.unwrap();
    store.create("C", "c", "").await.unwrap();
    store.delete(1002).await.unwrap();
    let before = store.list().to_vec();

    let reopened = PostStore::open(slot).await.unwrap();
    assert_eq!(reopened.list(), before.as_slice());
    assert!(reopened.load_warning().is_none());
}

#[tokio::test]
async fn test_frozen_clock_ids_never_collide() {
    let slot = Arc::new(TestSlot::default());
    let mut store = PostStore::builder(slot)
        .clock(fixed_clock())
        .open()
        .await
        .unwrap();

    let a = store.create("a", "a", "").await.unwrap();
    let b = store.create("b", "b", "").await.unwrap();
    let c = store.create("c", "c", "").await.unwrap();

    assert_eq!(a.id, 1_741_341_600_000);
    assert_eq!(b.id, a.id + 1);
    assert_eq!(c.id, b.id + 1);
}

#[tokio::test]
async fn test_new_ids_stay_above_loaded_ids() {
    let blob = r#"[{"id":5000,"title":"old","description":"d","image":"","date":"1/1/2024"}]"#;
    let slot = Arc::new(TestSlot::with(DEFAULT_STORAGE_KEY, blob));
    let mut store = open_store(slot).await;

    let post = store.create("new", "d", "").await.unwrap();
    assert_eq!(post.id, 5001);
}

#[tokio::test]
async fn test_loads_legacy_records_without_image_or_date() {
    let blob = r#"[{"id":1700000000000,"title":"legacy","description":"d"}]"#;
    let slot = Arc::new(TestSlot::with(DEFAULT_STORAGE_KEY, blob));
    let store = open_store(slot).await;

    let post = store.read(1_700_000_000_000).unwrap();
    assert_eq!(post.image, "");
    assert_eq!(post.date, "");
}

#[tokio::test]
async fn test_stored_null_is_empty() {
    let slot = Arc::new(TestSlot::with(DEFAULT_STORAGE_KEY, "null"));
    let store = open_store(slot).await;
    assert!(store.is_empty());
    assert!(store.load_warning().is_none());
}

#[tokio::test]
async fn test_corrupt_blob_falls_back_and_keeps_backup() {
    let slot = Arc::new(TestSlot::with(DEFAULT_STORAGE_KEY, "{not json"));
    let store = open_store(slot.clone()).await;

    assert!(store.is_empty());
    match store.load_warning() {
        Some(LoadWarning::CorruptData { backup_key, .. }) => {
            assert_eq!(backup_key.as_deref(), Some("myBlogPosts.corrupt"));
        }
        other => panic!("unexpected warning: {other:?}"),
    }
    assert_eq!(slot.raw("myBlogPosts.corrupt").as_deref(), Some("{not json"));
}

#[tokio::test]
async fn test_corrupt_blob_refused_when_configured() {
    let slot = Arc::new(TestSlot::with(DEFAULT_STORAGE_KEY, "[{\"id\":\"x\"}]"));
    let options = StoreOptions {
        on_corrupt: CorruptDataPolicy::Refuse,
        ..StoreOptions::default()
    };

    let result = PostStore::builder(slot.clone()).options(options).open().await;

    assert!(matches!(result, Err(DomainError::Deserialization(_))));
    assert_eq!(slot.writes(), 0);
}

#[tokio::test]
async fn test_read_failure_on_open_is_persistence_error() {
    let slot = Arc::new(TestSlot::default());
    slot.fail_reads.store(true, Ordering::SeqCst);

    let result = PostStore::open(slot).await;
    assert!(matches!(result, Err(DomainError::Persistence(_))));
}

#[tokio::test]
async fn test_duplicate_ids_are_reported() {
    let blob = r#"[
        {"id":1,"title":"a","description":"a","image":"","date":""},
        {"id":1,"title":"b","description":"b","image":"","date":""}
    ]"#;
    let slot = Arc::new(TestSlot::with(DEFAULT_STORAGE_KEY, blob));
    let mut store = open_store(slot).await;

    assert_eq!(
        store.load_warning(),
        Some(&LoadWarning::DuplicateIds { ids: vec![1] })
    );
    assert_eq!(store.read(1).unwrap().title, "a");
    assert!(store.delete(1).await.unwrap());
    assert_eq!(store.read(1).unwrap().title, "b");
}

#[tokio::test]
async fn test_failed_persist_keeps_memory_and_marks_dirty() {
    let slot = Arc::new(TestSlot::default());
    let mut store = open_store(slot.clone()).await;
    store.create("saved", "s", "").await.unwrap();

    slot.fail_writes.store(true, Ordering::SeqCst);
    let err = store.create("unsaved", "u", "").await.unwrap_err();

    assert!(err.is_persistence());
    assert!(store.is_dirty());
    assert_eq!(titles(&store), ["unsaved", "saved"]);

    slot.fail_writes.store(false, Ordering::SeqCst);
    store.flush().await.unwrap();
    assert!(!store.is_dirty());

    let stored: Vec<Post> = serde_json::from_str(&slot.raw(DEFAULT_STORAGE_KEY).unwrap()).unwrap();
    assert_eq!(stored.len(), 2);
}

#[tokio::test]
async fn test_custom_key_and_date_format() {
    let slot = Arc::new(TestSlot::default());
    let options = StoreOptions {
        key: "journal".to_string(),
        date_format: "%Y-%m-%d".to_string(),
        ..StoreOptions::default()
    };
    let mut store = PostStore::builder(slot.clone())
        .options(options)
        .clock(fixed_clock())
        .open()
        .await
        .unwrap();

    let post = store.create("t", "d", "").await.unwrap();

    assert_eq!(post.date, "2025-03-07");
    assert!(slot.raw("journal").is_some());
    assert!(slot.raw(DEFAULT_STORAGE_KEY).is_none());
}

#[test]
fn test_corrupt_policy_parsing() {
    assert_eq!(
        "fallback".parse::<CorruptDataPolicy>(),
        Ok(CorruptDataPolicy::FallBackToEmpty)
    );
    assert_eq!(
        "Refuse".parse::<CorruptDataPolicy>(),
        Ok(CorruptDataPolicy::Refuse)
    );
    assert!("explode".parse::<CorruptDataPolicy>().is_err());
}
