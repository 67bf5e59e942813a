//! Todo List - a browser-resident list manager
//!
//! Core modules:
//! - `model`: Todo item and list types (pure data, no platform dependencies)
//! - `store`: List ownership, persistence on every mutation, change notification
//! - `platform`: Storage slot abstraction (LocalStorage on web)
//! - `render`: DOM view and user-interaction wiring

pub mod model;
pub mod platform;
#[cfg(target_arch = "wasm32")]
pub mod render;
pub mod store;

pub use model::{TodoItem, TodoList};
pub use store::TodoStore;
