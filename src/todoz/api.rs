//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the
//! entry point for one-shot operations, whatever the UI.
//!
//! The facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (display indexes and ranges to selectors)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no I/O of its own and formats nothing; `CmdResult` carries data
//! and messages, the client decides how to show them.
//!
//! Interactive clients that deal in focus, keys and clicks use
//! [`crate::controller::Controller`] instead.
//!
//! `TodozApi<B: StorageBackend>` is generic over the storage backend:
//! - Production: `TodozApi<FsBackend>`
//! - Testing: `TodozApi<MemBackend>`

use crate::commands;
use crate::error::Result;
use crate::index::{parse_selectors, ItemSelector};
use crate::items::ItemStore;
use crate::model::{Filter, Theme};
use crate::store::{Persistence, StorageBackend};
use std::str::FromStr;

pub struct TodozApi<B: StorageBackend> {
    store: ItemStore<B>,
    paths: commands::TodozPaths,
}

impl<B: StorageBackend> TodozApi<B> {
    pub fn new(backend: B, paths: commands::TodozPaths) -> Self {
        Self {
            store: ItemStore::load(Persistence::with_backend(backend)),
            paths,
        }
    }

    /// Hands the loaded store over, e.g. to build an interactive controller.
    pub fn into_store(self) -> ItemStore<B> {
        self.store
    }

    pub fn add_item(&mut self, text: &str) -> Result<commands::CmdResult> {
        commands::add::run(&mut self.store, text)
    }

    pub fn list_items(&mut self, filter: Filter) -> Result<commands::CmdResult> {
        commands::list::run(&mut self.store, filter)
    }

    pub fn toggle_items<I: AsRef<str>>(&mut self, indexes: &[I]) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(indexes)?;
        commands::toggle::run(&mut self.store, &selectors)
    }

    pub fn edit_item(&mut self, index: &str, text: &str) -> Result<commands::CmdResult> {
        let selector = ItemSelector::from_str(index)?;
        commands::edit::run(&mut self.store, &selector, text)
    }

    pub fn delete_items<I: AsRef<str>>(&mut self, indexes: &[I]) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(indexes)?;
        commands::delete::run(&mut self.store, &selectors)
    }

    pub fn clear_completed(&mut self) -> Result<commands::CmdResult> {
        commands::clear::run(&mut self.store)
    }

    pub fn set_theme(&self, theme: Option<Theme>) -> Result<commands::CmdResult> {
        commands::theme::run(&self.store, theme)
    }

    pub fn theme(&self) -> Theme {
        self.store.persistence().load_theme()
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn paths(&self) -> &commands::TodozPaths {
        &self.paths
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel, TodozPaths};
