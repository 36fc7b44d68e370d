use super::backend::StorageBackend;
use crate::error::{Result, TodozError};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory storage backend for testing.
/// Does NOT persist data.
///
/// Uses `RefCell` so the `StorageBackend` trait can use `&self` throughout.
#[derive(Default)]
pub struct MemBackend {
    entries: RefCell<HashMap<String, Vec<u8>>>,
    writes: RefCell<usize>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a raw value, bypassing write accounting.
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.with_raw_entry(key, value.as_bytes())
    }

    /// Seeds arbitrary bytes, which need not be UTF-8.
    pub fn with_raw_entry(self, key: &str, value: &[u8]) -> Self {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_vec());
        self
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        *self.writes.borrow()
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.raw_bytes(key)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    pub fn raw_bytes(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.borrow().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl StorageBackend for MemBackend {
    fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write_bytes(&self, key: &str, value: &[u8]) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(TodozError::Store("Simulated write error".to_string()));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_vec());
        *self.writes.borrow_mut() += 1;
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::items::ItemStore;
    use crate::model::{Item, ItemId};
    use crate::store::{Persistence, ITEMS_KEY};

    /// Builds a store whose backend already holds the given items.
    pub struct StoreFixture {
        items: Vec<Item>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self { items: Vec::new() }
        }

        pub fn with_items(mut self, count: usize) -> Self {
            for i in 0..count {
                self.items.push(Item::new(format!("Task {}", i + 1)));
            }
            self
        }

        pub fn with_item(mut self, id: &str, text: &str, completed: bool) -> Self {
            self.items.push(Item {
                id: ItemId::from(id),
                text: text.to_string(),
                completed,
            });
            self
        }

        pub fn build(self) -> ItemStore<MemBackend> {
            let json = serde_json::to_string(&self.items).unwrap();
            let backend = MemBackend::new().with_entry(ITEMS_KEY, &json);
            ItemStore::load(Persistence::with_backend(backend))
        }
    }
}
