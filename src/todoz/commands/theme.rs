use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::items::ItemStore;
use crate::model::Theme;
use crate::store::StorageBackend;

/// Sets the theme, or flips it when `theme` is `None`.
pub fn run<B: StorageBackend>(store: &ItemStore<B>, theme: Option<Theme>) -> Result<CmdResult> {
    let persistence = store.persistence();
    let current = persistence.load_theme();
    let next = theme.unwrap_or_else(|| current.toggled());
    let mut result = CmdResult::default().with_theme(next);

    if next == current && theme.is_some() {
        result.add_message(CmdMessage::info(format!("Theme is already {}", next)));
        return Ok(result);
    }

    match persistence.save_theme(next) {
        Ok(()) => result.add_message(CmdMessage::success(format!("Theme set to {}", next))),
        Err(e) => {
            tracing::warn!(error = %e, "failed to save theme");
            result.add_message(CmdMessage::warning(format!(
                "Theme set to {} for this run only (could not save: {})",
                next, e
            )));
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn toggles_when_no_theme_given() {
        let store = StoreFixture::new().build();
        let result = run(&store, None).unwrap();
        assert_eq!(result.theme, Some(Theme::Dark));
        assert_eq!(store.persistence().load_theme(), Theme::Dark);

        run(&store, None).unwrap();
        assert_eq!(store.persistence().load_theme(), Theme::Light);
    }

    #[test]
    fn explicit_theme_is_stored() {
        let store = StoreFixture::new().build();
        run(&store, Some(Theme::Dark)).unwrap();
        let result = run(&store, Some(Theme::Dark)).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Info);
        assert_eq!(store.persistence().load_theme(), Theme::Dark);
    }

    #[test]
    fn write_failure_is_a_warning() {
        let store = StoreFixture::new().build();
        store.persistence().backend().set_simulate_write_error(true);
        let result = run(&store, None).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
    }
}
