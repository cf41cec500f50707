//! Services at the edge of the app
//!
//! - `storage` - key-value storage port and its file backend
//! - `delay` - cancellable one-shot timers polled on tick
//! - `api` - declared REST endpoint table (display only)

pub mod api;
pub mod delay;
pub mod storage;

pub use api::ApiEndpoints;
pub use storage::{FileStore, KeyValueStore};
#[cfg(test)]
pub use storage::MemoryStore;
