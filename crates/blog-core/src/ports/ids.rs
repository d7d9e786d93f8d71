use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use super::Clock;
use crate::domain::PostId;

/// Proposes ids for new posts.
///
/// Proposals need not be unique: the store raises any candidate that is not
/// above the largest id it has seen.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> PostId;
}

/// Milliseconds since the Unix epoch, read from a [`Clock`].
pub struct ClockIds {
    clock: Arc<dyn Clock>,
}

impl ClockIds {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl IdGenerator for ClockIds {
    fn next_id(&self) -> PostId {
        self.clock.now().timestamp_millis()
    }
}

/// Counter starting at a fixed value.
#[derive(Debug)]
pub struct SequentialIds {
    next: AtomicI64,
}

impl SequentialIds {
    pub fn starting_at(first: PostId) -> Self {
        Self {
            next: AtomicI64::new(first),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> PostId {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}
