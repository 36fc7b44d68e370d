//! # View Projection
//!
//! The view is a pure function of (items, filter, theme). It is rebuilt in
//! full on every state change; nothing here remembers the previous view.
//!
//! A [`View`] is what any presentation layer consumes: the visible rows in
//! collection order, which filter is selected, and the theme to apply at the
//! root. Rows carry their position in the full collection as `index` so that
//! clients can address items without exposing ids (see `index.rs`).

use crate::model::{Filter, Item, ItemId, Theme};
use serde::Serialize;

/// The ordered subsequence of `items` that `filter` selects.
pub fn project(items: &[Item], filter: Filter) -> Vec<&Item> {
    items.iter().filter(|item| filter.matches(item)).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    /// 1-based position in the full collection.
    pub index: usize,
    pub id: ItemId,
    pub text: String,
    pub completed: bool,
    /// Text to restore when an edit is cancelled.
    pub original_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterView {
    pub filter: Filter,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    pub theme: Theme,
    pub active_filter: Filter,
    pub rows: Vec<RowView>,
    pub filters: Vec<FilterView>,
    pub total: usize,
    pub remaining: usize,
}

impl View {
    pub fn build(items: &[Item], filter: Filter, theme: Theme) -> Self {
        let rows = items
            .iter()
            .enumerate()
            .filter(|(_, item)| filter.matches(item))
            .map(|(pos, item)| RowView {
                index: pos + 1,
                id: item.id.clone(),
                text: item.text.clone(),
                completed: item.completed,
                original_text: item.text.clone(),
            })
            .collect();

        let filters = Filter::ALL
            .iter()
            .map(|f| FilterView {
                filter: *f,
                selected: *f == filter,
            })
            .collect();

        Self {
            theme,
            active_filter: filter,
            rows,
            filters,
            total: items.len(),
            remaining: items.iter().filter(|item| !item.completed).count(),
        }
    }

    pub fn row(&self, id: &ItemId) -> Option<&RowView> {
        self.rows.iter().find(|row| &row.id == id)
    }
}
