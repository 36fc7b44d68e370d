use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::ItemSelector;
use crate::items::ItemStore;
use crate::store::StorageBackend;

use super::helpers::resolve_selectors;

pub fn run<B: StorageBackend>(
    store: &mut ItemStore<B>,
    selector: &ItemSelector,
    text: &str,
) -> Result<CmdResult> {
    let resolved = resolve_selectors(store, std::slice::from_ref(selector))?;
    let mut result = CmdResult::default();

    for (position, id) in resolved {
        if store.edit(&id, text) {
            if let Some(item) = store.get(&id) {
                result.add_message(CmdMessage::success(format!(
                    "Updated ({}): {}",
                    position, item.text
                )));
                result.affected_items.push(item.clone());
            }
        } else if text.trim().is_empty() {
            result.add_message(CmdMessage::warning(format!(
                "Text cannot be empty; item {} left unchanged",
                position
            )));
        } else {
            result.add_message(CmdMessage::info(format!(
                "Item {} already reads that way",
                position
            )));
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::model::ItemId;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn updates_text() {
        let mut store = StoreFixture::new().with_item("1", "A", false).build();
        let result = run(&mut store, &ItemSelector::Index(1), "A better A").unwrap();

        assert_eq!(store.get(&ItemId::from("1")).unwrap().text, "A better A");
        assert_eq!(result.affected_items.len(), 1);
    }

    #[test]
    fn empty_text_warns_and_keeps_item() {
        let mut store = StoreFixture::new().with_item("1", "A", false).build();
        let result = run(&mut store, &ItemSelector::Index(1), "").unwrap();

        assert_eq!(store.get(&ItemId::from("1")).unwrap().text, "A");
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert!(result.affected_items.is_empty());
    }

    #[test]
    fn same_text_is_informational() {
        let mut store = StoreFixture::new().with_item("1", "A", false).build();
        let result = run(&mut store, &ItemSelector::Index(1), " A").unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Info);
    }
}
