//! Task module: the reminder list, its expiry timers and its storage.
//!
//! This module has no UI or platform dependencies, so everything in it can
//! be exercised without a display.

pub mod expiry;
pub mod store;
pub mod task;

pub use expiry::{ExpiryHandle, ExpiryScheduler, DEFAULT_EXPIRY_DELAY};
pub use store::{FileTaskStore, MemoryTaskStore, StoreError, TaskStore};
pub use task::{Importance, Task, TaskError, TaskId, TaskList, TaskRecord};
