//! Key-value slot backing the persisted todo list

use std::cell::RefCell;
use std::rc::Rc;

/// A single persistent key-value slot
///
/// One slot holds one stored string. Reads and writes complete
/// synchronously; a failed write is logged by the implementation and
/// otherwise dropped.
pub trait StorageSlot {
    /// Current stored value, if any
    fn read(&self) -> Option<String>;
    /// Overwrite the stored value
    fn write(&mut self, value: &str);
    /// Remove the stored value
    fn clear(&mut self);
}

/// Browser LocalStorage slot (WASM only)
#[cfg(target_arch = "wasm32")]
pub struct LocalStorageSlot {
    key: &'static str,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageSlot {
    pub fn new(key: &'static str) -> Self {
        Self { key }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl StorageSlot for LocalStorageSlot {
    fn read(&self) -> Option<String> {
        Self::storage()?.get_item(self.key).ok()?
    }

    fn write(&mut self, value: &str) {
        match Self::storage() {
            Some(storage) => {
                if storage.set_item(self.key, value).is_err() {
                    log::warn!("LocalStorage write failed for key {}", self.key);
                }
            }
            None => log::warn!("LocalStorage unavailable, change not persisted"),
        }
    }

    fn clear(&mut self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(self.key);
        }
    }
}

/// In-memory slot for native runs and tests
///
/// Clones share the same cell, so a store loaded from a clone sees what an
/// earlier store persisted. Tests use this to simulate a page reload.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    cell: Rc<RefCell<Option<String>>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageSlot for MemorySlot {
    fn read(&self) -> Option<String> {
        self.cell.borrow().clone()
    }

    fn write(&mut self, value: &str) {
        *self.cell.borrow_mut() = Some(value.to_string());
    }

    fn clear(&mut self) {
        *self.cell.borrow_mut() = None;
    }
}
