//! # Storage Layer
//!
//! Persistence for todoz is split in two:
//!
//! - [`backend::StorageBackend`]: raw key-value I/O (the "how")
//!   - [`fs::FsBackend`]: one file per key in the data directory (production)
//!   - [`memory::MemBackend`]: a map in memory (testing)
//! - [`Persistence`]: the adapter the rest of the crate talks to (the "what").
//!   It knows the two keys, the JSON encoding, and how to recover from bad data.
//!
//! ## Storage Format
//!
//! Two independent entries:
//!
//! - `todoz.items`: JSON array of `{"id", "text", "completed"}` objects, in
//!   insertion order.
//! - `todoz.theme`: the plain string `light` or `dark`.
//!
//! ## Failure Policy
//!
//! Loading never fails. A missing entry means "nothing stored yet"; an entry
//! that isn't UTF-8 JSON is logged and treated as empty. Before that happens
//! its bytes are copied to `todoz.items.corrupt-<digest>`, named after the
//! content, so the next save doesn't destroy the only copy and reloading the
//! same bad data never adds a second backup. Entries with blank text or a
//! repeated id are dropped with a warning.
//!
//! Saving returns a `Result`, but callers treat it as best effort: the
//! in-memory state stays authoritative for the rest of the session.

use crate::error::{Result, TodozError};
use crate::model::{Item, Theme};
use std::collections::HashSet;
use uuid::Uuid;

pub mod backend;
pub mod fs;
pub mod memory;

pub use backend::StorageBackend;

pub const ITEMS_KEY: &str = "todoz.items";
pub const THEME_KEY: &str = "todoz.theme";

pub struct Persistence<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> Persistence<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Loads the stored collection, or an empty one if there is none or it
    /// can't be decoded.
    pub fn load_items(&self) -> Vec<Item> {
        let raw = match self.backend.read_bytes(ITEMS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::error!(key = ITEMS_KEY, error = %e, "failed to read stored items");
                return Vec::new();
            }
        };

        match decode_items(&raw) {
            Ok(items) => {
                let items = sanitize(items);
                tracing::debug!(count = items.len(), "loaded items");
                items
            }
            Err(e) => {
                tracing::error!(key = ITEMS_KEY, error = %e, "failed to parse stored items");
                self.backup_corrupt(&raw);
                Vec::new()
            }
        }
    }

    /// Overwrites the stored collection with `items`.
    pub fn save_items(&self, items: &[Item]) -> Result<()> {
        let json = serde_json::to_string_pretty(items).map_err(TodozError::Serialization)?;
        self.backend.write(ITEMS_KEY, &json)?;
        tracing::debug!(count = items.len(), "saved items");
        Ok(())
    }

    pub fn load_theme(&self) -> Theme {
        match self.backend.read(THEME_KEY) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(key = THEME_KEY, value = %raw.trim(), "unrecognized theme, using light");
                Theme::Light
            }),
            Ok(None) => Theme::Light,
            Err(e) => {
                tracing::error!(key = THEME_KEY, error = %e, "failed to read stored theme");
                Theme::Light
            }
        }
    }

    pub fn save_theme(&self, theme: Theme) -> Result<()> {
        self.backend.write(THEME_KEY, theme.as_str())
    }

    fn backup_corrupt(&self, raw: &[u8]) {
        let key = corrupt_key(raw);
        if let Ok(Some(_)) = self.backend.read_bytes(&key) {
            tracing::debug!(backup = %key, "unreadable items already backed up");
            return;
        }
        match self.backend.write_bytes(&key, raw) {
            Ok(()) => tracing::warn!(backup = %key, "kept a copy of the unreadable items"),
            Err(e) => tracing::warn!(error = %e, "could not back up unreadable items"),
        }
    }
}

/// Backup key derived from the content, so equal bytes share one backup.
fn corrupt_key(raw: &[u8]) -> String {
    let digest = Uuid::new_v5(&Uuid::NAMESPACE_OID, raw);
    format!("{}.corrupt-{}", ITEMS_KEY, digest.simple())
}

fn decode_items(raw: &[u8]) -> Result<Vec<Item>> {
    let text = std::str::from_utf8(raw)
        .map_err(|_| TodozError::Store(format!("{} is not valid UTF-8", ITEMS_KEY)))?;
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    let items: Vec<Item> = serde_json::from_str(text).map_err(TodozError::Serialization)?;
    Ok(items)
}

/// Drops entries the store could never produce: blank text, or an id seen
/// earlier in the list (the first one wins).
fn sanitize(items: Vec<Item>) -> Vec<Item> {
    let total = items.len();
    let mut seen = HashSet::new();
    let kept: Vec<Item> = items
        .into_iter()
        .filter(|item| !item.text.trim().is_empty() && seen.insert(item.id.clone()))
        .collect();
    if kept.len() < total {
        tracing::warn!(
            key = ITEMS_KEY,
            dropped = total - kept.len(),
            "dropped stored items with blank text or duplicate ids"
        );
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::memory::MemBackend;
    use super::*;
    use crate::model::ItemId;

    fn item(id: &str, text: &str, completed: bool) -> Item {
        Item {
            id: ItemId::from(id),
            text: text.into(),
            completed,
        }
    }

    #[test]
    fn empty_store_loads_nothing_and_light_theme() {
        let persistence = Persistence::with_backend(MemBackend::new());
        assert!(persistence.load_items().is_empty());
        assert_eq!(persistence.load_theme(), Theme::Light);
    }

    #[test]
    fn items_round_trip_in_order() {
        let persistence = Persistence::with_backend(MemBackend::new());
        let items = vec![item("1", "A", false), item("2", "B", true)];
        persistence.save_items(&items).unwrap();
        assert_eq!(persistence.load_items(), items);
    }

    #[test]
    fn stored_format_is_array_of_flat_objects() {
        let persistence = Persistence::with_backend(MemBackend::new());
        persistence.save_items(&[item("1", "A", false)]).unwrap();

        let raw = persistence.backend().raw(ITEMS_KEY).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{"id": "1", "text": "A", "completed": false}])
        );
    }

    #[test]
    fn malformed_items_load_as_empty_and_are_backed_up() {
        let backend = MemBackend::new().with_entry(ITEMS_KEY, "{not json");
        let persistence = Persistence::with_backend(backend);

        assert!(persistence.load_items().is_empty());

        let keys = persistence.backend().keys();
        let backup = keys
            .iter()
            .find(|k| k.starts_with("todoz.items.corrupt-"))
            .expect("backup entry");
        assert_eq!(persistence.backend().raw(backup).unwrap(), "{not json");
    }

    #[test]
    fn repeated_corrupt_loads_keep_one_backup() {
        let backend = MemBackend::new().with_entry(ITEMS_KEY, "{not json");
        let persistence = Persistence::with_backend(backend);

        for _ in 0..3 {
            assert!(persistence.load_items().is_empty());
        }

        let backups: Vec<String> = persistence
            .backend()
            .keys()
            .into_iter()
            .filter(|k| k.starts_with("todoz.items.corrupt-"))
            .collect();
        assert_eq!(backups.len(), 1);
        assert_eq!(persistence.backend().write_count(), 1);
    }

    #[test]
    fn different_corrupt_contents_get_separate_backups() {
        let persistence =
            Persistence::with_backend(MemBackend::new().with_entry(ITEMS_KEY, "{not json"));
        persistence.load_items();
        persistence.backend().write(ITEMS_KEY, "[oops").unwrap();
        persistence.load_items();

        let backups = persistence
            .backend()
            .keys()
            .into_iter()
            .filter(|k| k.starts_with("todoz.items.corrupt-"))
            .count();
        assert_eq!(backups, 2);
    }

    #[test]
    fn non_utf8_items_are_backed_up_byte_for_byte() {
        let bytes = [0xff, 0xfe, b'x'];
        let backend = MemBackend::new().with_raw_entry(ITEMS_KEY, &bytes);
        let persistence = Persistence::with_backend(backend);

        assert!(persistence.load_items().is_empty());

        let keys = persistence.backend().keys();
        let backup = keys
            .iter()
            .find(|k| k.starts_with("todoz.items.corrupt-"))
            .expect("backup entry");
        assert_eq!(persistence.backend().raw_bytes(backup).unwrap(), bytes);
    }

    #[test]
    fn non_utf8_items_file_is_backed_up_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = [0xff, 0xfe, b'x'];
        std::fs::write(dir.path().join(ITEMS_KEY), bytes).unwrap();
        let persistence = Persistence::with_backend(fs::FsBackend::new(dir.path().to_path_buf()));

        assert!(persistence.load_items().is_empty());
        persistence.save_items(&[item("1", "A", false)]).unwrap();

        let backups: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| {
                p.file_name()
                    .map(|n| n.to_string_lossy().starts_with("todoz.items.corrupt-"))
                    .unwrap_or(false)
            })
            .collect();
        assert_eq!(backups.len(), 1);
        assert_eq!(std::fs::read(&backups[0]).unwrap(), bytes);
    }

    #[test]
    fn blank_and_duplicate_entries_are_dropped() {
        let backend = MemBackend::new().with_entry(
            ITEMS_KEY,
            r#"[{"id":"1","text":"  ","completed":false},
                {"id":"2","text":"B","completed":false},
                {"id":"2","text":"B again","completed":true},
                {"id":"3","text":"C","completed":true}]"#,
        );
        let persistence = Persistence::with_backend(backend);

        assert_eq!(
            persistence.load_items(),
            vec![item("2", "B", false), item("3", "C", true)]
        );
    }

    #[test]
    fn wrong_shape_is_treated_as_corrupt() {
        let backend = MemBackend::new().with_entry(ITEMS_KEY, r#"{"id":"1"}"#);
        let persistence = Persistence::with_backend(backend);
        assert!(persistence.load_items().is_empty());
    }

    #[test]
    fn corrupt_load_survives_failing_backup() {
        let backend = MemBackend::new().with_entry(ITEMS_KEY, "garbage");
        backend.set_simulate_write_error(true);
        let persistence = Persistence::with_backend(backend);
        assert!(persistence.load_items().is_empty());
    }

    #[test]
    fn blank_items_entry_is_empty_not_corrupt() {
        let backend = MemBackend::new().with_entry(ITEMS_KEY, "  \n");
        let persistence = Persistence::with_backend(backend);
        assert!(persistence.load_items().is_empty());
        assert_eq!(persistence.backend().keys(), vec![ITEMS_KEY.to_string()]);
    }

    #[test]
    fn theme_is_stored_as_plain_string() {
        let persistence = Persistence::with_backend(MemBackend::new());
        persistence.save_theme(Theme::Dark).unwrap();
        assert_eq!(persistence.backend().raw(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(persistence.load_theme(), Theme::Dark);
    }

    #[test]
    fn unknown_theme_falls_back_to_light() {
        let backend = MemBackend::new().with_entry(THEME_KEY, "solarized");
        let persistence = Persistence::with_backend(backend);
        assert_eq!(persistence.load_theme(), Theme::Light);
    }

    #[test]
    fn save_reports_backend_failure() {
        let backend = MemBackend::new();
        backend.set_simulate_write_error(true);
        let persistence = Persistence::with_backend(backend);
        assert!(persistence.save_items(&[]).is_err());
        assert!(persistence.save_theme(Theme::Dark).is_err());
    }
}
