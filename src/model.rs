//! Todo item and list types
//!
//! All state that must survive a page reload lives here. The list owns its
//! insertion order; only the store mutates it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single todo entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    /// Unique id, assigned at creation, never reassigned
    pub id: u64,
    /// Trimmed, non-empty display text
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    /// Set on every mutation after creation (completion toggles)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Ordered todo collection (insertion order = display order)
#[derive(Debug, Clone)]
pub struct TodoList {
    items: Vec<TodoItem>,
    /// Next id to hand out; not persisted, rebuilt on load
    next_id: u64,
}

impl Default for TodoList {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }
}

impl TodoList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a list from persisted items
    ///
    /// The id counter restarts above the highest stored id, so fresh ids
    /// never collide with live ones.
    pub fn from_items(items: Vec<TodoItem>) -> Self {
        let next_id = items.iter().map(|item| item.id).max().map_or(1, |max| max + 1);
        Self { items, next_id }
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: u64) -> Option<&mut TodoItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// Allocate a new item id
    pub(crate) fn next_item_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append an item at the end
    pub(crate) fn push(&mut self, item: TodoItem) {
        self.items.push(item);
    }

    /// Remove the item with the given id, keeping the remaining order
    pub(crate) fn remove(&mut self, id: u64) -> Option<TodoItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Number of completed items
    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|item| item.completed).count()
    }

    /// Share of completed items, 0.0 for an empty list
    pub fn completion_percentage(&self) -> f64 {
        if self.items.is_empty() {
            return 0.0;
        }
        (self.completed_count() as f64 / self.items.len() as f64) * 100.0
    }
}
