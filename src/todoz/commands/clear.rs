use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::items::ItemStore;
use crate::store::StorageBackend;

pub fn run<B: StorageBackend>(store: &mut ItemStore<B>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let removed = store.clear_completed();

    if removed == 0 {
        result.add_message(CmdMessage::info("No completed items to clear"));
    } else {
        let noun = if removed == 1 { "item" } else { "items" };
        result.add_message(CmdMessage::success(format!(
            "Cleared {} completed {}",
            removed, noun
        )));
    }

    Ok(result)
}
