//! Ports - trait definitions for external dependencies.
//! Infrastructure implements [`Storage`]; clocks and id sources live here
//! because they need nothing beyond `chrono`.

mod clock;
mod ids;
mod storage;

pub use clock::{Clock, FixedClock, SystemClock};
pub use ids::{ClockIds, IdGenerator, SequentialIds};
pub use storage::{Storage, StorageError};
