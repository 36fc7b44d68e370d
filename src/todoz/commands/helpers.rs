use crate::error::Result;
use crate::index::{resolve_all, ItemSelector};
use crate::items::ItemStore;
use crate::model::ItemId;
use crate::store::StorageBackend;

/// Resolves selectors to `(1-based position, id)` pairs against the current
/// collection, before any mutation shifts positions.
pub fn resolve_selectors<B: StorageBackend>(
    store: &ItemStore<B>,
    selectors: &[ItemSelector],
) -> Result<Vec<(usize, ItemId)>> {
    let ids = resolve_all(store.items(), selectors)?;
    Ok(ids
        .into_iter()
        .filter_map(|id| store.position(&id).map(|pos| (pos + 1, id)))
        .collect())
}
