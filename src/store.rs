//! Todo store: owns the list, persists it, and notifies the view
//!
//! Persisted to LocalStorage as a bare JSON array of items, under the same
//! key and wire shape the page has always used.

use chrono::Utc;

use crate::model::{TodoItem, TodoList};
use crate::platform::StorageSlot;

/// View callback fired after every persisted mutation
type ChangeListener = Box<dyn FnMut(&TodoList)>;

/// Owns the todo list and its persistence
///
/// Every mutation runs to completion in three fixed steps: update the
/// in-memory list, overwrite the storage slot, notify the listener. The
/// slot therefore always holds the current list when control returns to
/// the caller.
pub struct TodoStore {
    list: TodoList,
    slot: Box<dyn StorageSlot>,
    on_change: Option<ChangeListener>,
}

impl TodoStore {
    /// Storage key for the persisted list
    pub const STORAGE_KEY: &'static str = "todo_list_items";

    /// Hydrate a store from whatever the slot holds
    ///
    /// An absent or unreadable value starts an empty list.
    pub fn load(slot: Box<dyn StorageSlot>) -> Self {
        let list = match slot.read() {
            Some(json) => match serde_json::from_str::<Vec<TodoItem>>(&json) {
                Ok(items) => {
                    log::info!("Loaded {} todos", items.len());
                    TodoList::from_items(items)
                }
                Err(err) => {
                    log::warn!("Ignoring unreadable saved list: {err}");
                    TodoList::new()
                }
            },
            None => {
                log::info!("No saved todos found, starting fresh");
                TodoList::new()
            }
        };

        Self {
            list,
            slot,
            on_change: None,
        }
    }

    /// Current list (read-only; all mutation goes through the store)
    pub fn list(&self) -> &TodoList {
        &self.list
    }

    /// Register the view callback fired after every mutation
    pub fn set_on_change(&mut self, listener: impl FnMut(&TodoList) + 'static) {
        self.on_change = Some(Box::new(listener));
    }

    /// Append a new item; whitespace-only text is ignored
    ///
    /// Returns the new item's id, or `None` if nothing was added.
    pub fn add(&mut self, text: &str) -> Option<u64> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let id = self.list.next_item_id();
        self.list.push(TodoItem {
            id,
            text: text.to_string(),
            completed: false,
            created_at: Utc::now(),
            updated_at: None,
        });
        self.commit();
        Some(id)
    }

    /// Flip an item's completion flag; unknown ids are ignored
    pub fn toggle(&mut self, id: u64) {
        if let Some(item) = self.list.get_mut(id) {
            item.completed = !item.completed;
            item.updated_at = Some(Utc::now());
            self.commit();
        }
    }

    /// Remove an item; unknown ids are ignored, remaining order is unchanged
    pub fn remove(&mut self, id: u64) {
        if self.list.remove(id).is_some() {
            self.commit();
        }
    }

    /// Persist, then notify. Every mutator ends here.
    fn commit(&mut self) {
        self.persist();
        if let Some(listener) = self.on_change.as_mut() {
            listener(&self.list);
        }
    }

    /// Overwrite the slot with the serialized item array
    fn persist(&mut self) {
        match serde_json::to_string(self.list.items()) {
            Ok(json) => {
                self.slot.write(&json);
                log::debug!("Saved {} todos", self.list.len());
            }
            Err(err) => log::warn!("Failed to serialize todos: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemorySlot;
    use proptest::prelude::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn fresh_store() -> (MemorySlot, TodoStore) {
        let slot = MemorySlot::new();
        let store = TodoStore::load(Box::new(slot.clone()));
        (slot, store)
    }

    fn stored_items(slot: &MemorySlot) -> Vec<TodoItem> {
        let json = slot.read().expect("slot should hold a value");
        serde_json::from_str(&json).expect("slot should hold valid JSON")
    }

    #[test]
    fn test_load_from_empty_slot() {
        let (_slot, store) = fresh_store();
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_load_ignores_corrupt_value() {
        let mut slot = MemorySlot::new();
        slot.write("{not json");
        let store = TodoStore::load(Box::new(slot.clone()));
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_add_trims_and_persists() {
        let (slot, mut store) = fresh_store();
        let id = store.add("  Buy milk  ").expect("trimmed text should be added");

        let items = store.list().items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text, "Buy milk");
        assert!(!items[0].completed);
        assert_eq!(stored_items(&slot)[0].id, id);
    }

    #[test]
    fn test_add_rejects_empty_input() {
        let (slot, mut store) = fresh_store();
        assert!(store.add("").is_none());
        assert!(store.add("   ").is_none());
        assert!(store.list().is_empty());
        // Rejected input never reaches storage either
        assert!(slot.read().is_none());
    }

    #[test]
    fn test_ids_stay_unique_across_reloads() {
        let (slot, mut store) = fresh_store();
        let first = store.add("a").unwrap();

        let mut reloaded = TodoStore::load(Box::new(slot.clone()));
        let second = reloaded.add("b").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_toggle_pair_restores_state() {
        let (_slot, mut store) = fresh_store();
        let id = store.add("a").unwrap();

        store.toggle(id);
        assert!(store.list().get(id).unwrap().completed);
        assert!(store.list().get(id).unwrap().updated_at.is_some());

        store.toggle(id);
        assert!(!store.list().get(id).unwrap().completed);
        assert!(store.list().get(id).unwrap().updated_at.is_some());
    }

    #[test]
    fn test_unknown_id_is_a_noop() {
        let (slot, mut store) = fresh_store();
        store.add("a");
        let items_before = store.list().items().to_vec();
        let bytes_before = slot.read();

        store.toggle(999);
        store.remove(999);

        assert_eq!(store.list().items(), &items_before[..]);
        assert_eq!(slot.read(), bytes_before);
    }

    #[test]
    fn test_remove_keeps_remaining_order() {
        let (_slot, mut store) = fresh_store();
        let a = store.add("a").unwrap();
        let b = store.add("b").unwrap();
        let c = store.add("c").unwrap();

        store.remove(b);
        let ids: Vec<u64> = store.list().items().iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![a, c]);
    }

    #[test]
    fn test_completed_item_survives_reload() {
        // Completed todos must not revert or disappear after a refresh
        let (slot, mut store) = fresh_store();
        let id = store.add("Buy milk").unwrap();
        store.toggle(id);

        let reloaded = TodoStore::load(Box::new(slot));
        let item = reloaded.list().get(id).expect("item should survive reload");
        assert!(item.completed);
        assert_eq!(item.text, "Buy milk");
    }

    #[test]
    fn test_slot_mirrors_list_after_every_mutation() {
        let (slot, mut store) = fresh_store();

        let id = store.add("a").unwrap();
        assert_eq!(stored_items(&slot), store.list().items());
        store.add("b");
        assert_eq!(stored_items(&slot), store.list().items());
        store.toggle(id);
        assert_eq!(stored_items(&slot), store.list().items());
        store.remove(id);
        assert_eq!(stored_items(&slot), store.list().items());
    }

    #[test]
    fn test_change_listener_fires_only_on_mutations() {
        let (_slot, mut store) = fresh_store();
        let fired = Rc::new(Cell::new(0));
        let counter = fired.clone();
        store.set_on_change(move |_list| counter.set(counter.get() + 1));

        let id = store.add("a").unwrap();
        store.toggle(id);
        store.remove(id);
        assert_eq!(fired.get(), 3);

        // No-ops stay silent
        store.add("   ");
        store.toggle(999);
        store.remove(999);
        assert_eq!(fired.get(), 3);
    }

    #[test]
    fn test_listener_sees_persisted_state() {
        // By the time the view is notified the slot already holds the change
        let (slot, mut store) = fresh_store();
        let matched = Rc::new(Cell::new(false));
        let flag = matched.clone();
        let probe = slot.clone();
        store.set_on_change(move |list| {
            let stored: Vec<TodoItem> =
                serde_json::from_str(&probe.read().unwrap()).unwrap();
            flag.set(stored == list.items());
        });

        store.add("a");
        assert!(matched.get());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(String),
        Toggle(usize),
        Remove(usize),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            "[a-z ]{0,12}".prop_map(Op::Add),
            (0usize..8).prop_map(Op::Toggle),
            (0usize..8).prop_map(Op::Remove),
        ]
    }

    proptest! {
        #[test]
        fn test_any_history_round_trips(ops in prop::collection::vec(op_strategy(), 0..40)) {
            let slot = MemorySlot::new();
            let mut store = TodoStore::load(Box::new(slot.clone()));

            for op in ops {
                match op {
                    Op::Add(text) => {
                        store.add(&text);
                    }
                    Op::Toggle(i) => {
                        if let Some(id) = store.list().items().get(i).map(|item| item.id) {
                            store.toggle(id);
                        }
                    }
                    Op::Remove(i) => {
                        if let Some(id) = store.list().items().get(i).map(|item| item.id) {
                            store.remove(id);
                        }
                    }
                }
            }

            let reloaded = TodoStore::load(Box::new(slot.clone()));
            prop_assert_eq!(reloaded.list().items(), store.list().items());
        }
    }
}
