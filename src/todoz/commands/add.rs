use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::items::ItemStore;
use crate::store::StorageBackend;

pub fn run<B: StorageBackend>(store: &mut ItemStore<B>, text: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    match store.add(text) {
        Some(id) => {
            let position = store.len();
            if let Some(item) = store.get(&id) {
                result.add_message(CmdMessage::success(format!(
                    "Added ({}): {}",
                    position, item.text
                )));
                result.affected_items.push(item.clone());
            }
        }
        None => result.add_message(CmdMessage::info("Nothing to add: text is empty")),
    }

    Ok(result)
}
