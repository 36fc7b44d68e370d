use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::ItemSelector;
use crate::items::ItemStore;
use crate::store::StorageBackend;

use super::helpers::resolve_selectors;

pub fn run<B: StorageBackend>(
    store: &mut ItemStore<B>,
    selectors: &[ItemSelector],
) -> Result<CmdResult> {
    // Positions are resolved up front so "delete 1 2" means the items the
    // user saw as 1 and 2, not whatever shifts into place after the first removal.
    let resolved = resolve_selectors(store, selectors)?;
    let mut result = CmdResult::default();

    for (position, id) in resolved {
        if let Some(item) = store.delete(&id) {
            result.add_message(CmdMessage::success(format!(
                "Deleted ({}): {}",
                position, item.text
            )));
            result.affected_items.push(item);
        }
    }

    Ok(result)
}
