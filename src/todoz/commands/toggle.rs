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
    let resolved = resolve_selectors(store, selectors)?;
    let mut result = CmdResult::default();

    for (position, id) in resolved {
        if !store.toggle(&id) {
            continue;
        }
        if let Some(item) = store.get(&id) {
            let state = if item.completed { "Completed" } else { "Reopened" };
            result.add_message(CmdMessage::success(format!(
                "{} ({}): {}",
                state, position, item.text
            )));
            result.affected_items.push(item.clone());
        }
    }

    Ok(result)
}
