//! # Item Store
//!
//! [`ItemStore`] owns the ordered collection and the active [`Filter`]. It is
//! the only thing that mutates items.
//!
//! Every mutation that actually changes the collection writes the whole
//! collection back through [`Persistence`]. Writes are best effort: a failure
//! is logged and the in-memory collection stays authoritative.
//!
//! Invalid input is not an error here. Empty text, unknown ids and edits that
//! change nothing are valid calls that simply have no effect; the return value
//! tells the caller whether anything happened.

use crate::model::{Filter, Item, ItemId};
use crate::store::{Persistence, StorageBackend};

pub struct ItemStore<B: StorageBackend> {
    items: Vec<Item>,
    filter: Filter,
    persistence: Persistence<B>,
}

impl<B: StorageBackend> ItemStore<B> {
    /// Builds a store from whatever the persistence layer holds.
    pub fn load(persistence: Persistence<B>) -> Self {
        let items = persistence.load_items();
        Self {
            items,
            filter: Filter::default(),
            persistence,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn persistence(&self) -> &Persistence<B> {
        &self.persistence
    }

    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn position(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items not yet completed.
    pub fn remaining(&self) -> usize {
        self.items.iter().filter(|item| !item.completed).count()
    }

    /// Appends a new active item. Returns `None` if `text` is blank.
    pub fn add(&mut self, text: &str) -> Option<ItemId> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let item = Item::new(text.to_string());
        let id = item.id.clone();
        self.items.push(item);
        self.persist();
        Some(id)
    }

    pub fn toggle(&mut self, id: &ItemId) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| &item.id == id) else {
            return false;
        };
        item.completed = !item.completed;
        self.persist();
        true
    }

    pub fn delete(&mut self, id: &ItemId) -> Option<Item> {
        let index = self.position(id)?;
        let removed = self.items.remove(index);
        self.persist();
        Some(removed)
    }

    /// Replaces the item's text if the trimmed `new_text` is non-empty and
    /// differs from what is stored.
    pub fn edit(&mut self, id: &ItemId, new_text: &str) -> bool {
        let new_text = new_text.trim();
        if new_text.is_empty() {
            return false;
        }
        let Some(item) = self.items.iter_mut().find(|item| &item.id == id) else {
            return false;
        };
        if item.text == new_text {
            return false;
        }
        item.text = new_text.to_string();
        self.persist();
        true
    }

    /// Removes every completed item with a single write. Returns how many
    /// were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !item.completed);
        let removed = before - self.items.len();
        if removed > 0 {
            self.persist();
        }
        removed
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    fn persist(&self) {
        if let Err(e) = self.persistence.save_items(&self.items) {
            tracing::warn!(error = %e, "failed to save items; keeping in-memory state");
        }
    }
}
