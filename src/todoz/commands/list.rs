use crate::commands::CmdResult;
use crate::error::Result;
use crate::items::ItemStore;
use crate::model::Filter;
use crate::store::StorageBackend;
use crate::view::View;

pub fn run<B: StorageBackend>(store: &mut ItemStore<B>, filter: Filter) -> Result<CmdResult> {
    store.set_filter(filter);
    let theme = store.persistence().load_theme();
    let view = View::build(store.items(), store.filter(), theme);
    Ok(CmdResult::default().with_view(view).with_theme(theme))
}
