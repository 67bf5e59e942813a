//! Platform abstraction layer
//!
//! Handles browser/native differences for the persisted storage slot:
//! LocalStorage on web, an in-process cell for native runs and tests.

pub mod storage;

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorageSlot;
pub use storage::{MemorySlot, StorageSlot};
