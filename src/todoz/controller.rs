//! # Interaction Controller
//!
//! The controller sits between a presentation layer and the [`ItemStore`]. The
//! presentation layer feeds it low-level [`Event`]s (focus moved, text typed,
//! key pressed, control clicked, removal finished) and gets back [`Effect`]s
//! to carry out (re-render, move focus, clear the input, restore text, run a
//! removal transition, apply a theme).
//!
//! It runs to completion on every event: `handle` takes `&mut self`, mutates
//! the store synchronously and returns. Nothing here blocks or spawns.
//!
//! ## Editing
//!
//! Each row's text region goes through
//!
//! ```text
//! viewing ──focus──▶ editing ──enter / blur──▶ committing ──▶ viewing
//!                       │
//!                       └──────escape───────▶ cancelling ──▶ viewing
//! ```
//!
//! Focusing a row caches its text. Committing asks the store to apply the
//! buffer; if the store refuses (blank or unchanged text) the displayed text
//! is reverted instead. Cancelling restores the cached text and never touches
//! the store. Clicking any control while a row is being edited commits that
//! row first, the same way activating a button moves focus in a UI runtime.
//! A newly added item is focused for editing only if the active filter shows
//! it; otherwise focus stays on the new-item input.
//!
//! ## Two-phase delete
//!
//! With [`ControllerOptions::animate_removal`] set, a delete click only marks
//! the row as pending and asks the presentation layer to run its removal
//! transition. The item is removed (and the collection persisted) when
//! [`Event::RemovalFinished`] arrives. Both phases are idempotent per id: a
//! second click on a pending row and a second completion signal do nothing.

use crate::items::ItemStore;
use crate::model::{Filter, ItemId, Theme};
use crate::store::{Persistence, StorageBackend};
use crate::view::View;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyPress {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            meta: false,
        }
    }

    pub fn ctrl(key: Key) -> Self {
        Self {
            key,
            ctrl: true,
            meta: false,
        }
    }
}

/// Where keyboard focus can land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusTarget {
    NewItemInput,
    Row(ItemId),
}

/// Clickable controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Toggle(ItemId),
    Delete(ItemId),
    Filter(Filter),
    ClearCompleted,
    ThemeToggle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Focus(FocusTarget),
    /// The focused text region now holds this text.
    Input(String),
    Key(KeyPress),
    Blur,
    Click(Target),
    RemovalFinished(ItemId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caret {
    Start,
    End,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Replace the whole visible list with this snapshot.
    Render(View),
    Focus { id: ItemId, caret: Caret },
    ClearInput,
    /// Put this text back into the row's text region.
    RevertText { id: ItemId, text: String },
    /// Start the removal transition for this row, then send `RemovalFinished`.
    AnimateRemoval(ItemId),
    ApplyTheme(Theme),
}

/// User-level intents, for clients that don't model focus and keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Add(String),
    Toggle(ItemId),
    Delete(ItemId),
    Edit(ItemId, String),
    SetFilter(Filter),
    ClearCompleted,
    ToggleTheme,
}

impl Intent {
    /// The event sequence a user would produce to express this intent.
    pub fn into_events(self) -> Vec<Event> {
        match self {
            Intent::Add(text) => vec![
                Event::Focus(FocusTarget::NewItemInput),
                Event::Input(text),
                Event::Key(KeyPress::plain(Key::Enter)),
            ],
            Intent::Edit(id, text) => vec![
                Event::Focus(FocusTarget::Row(id)),
                Event::Input(text),
                Event::Key(KeyPress::plain(Key::Enter)),
            ],
            Intent::Toggle(id) => vec![Event::Click(Target::Toggle(id))],
            Intent::Delete(id) => vec![Event::Click(Target::Delete(id))],
            Intent::SetFilter(filter) => vec![Event::Click(Target::Filter(filter))],
            Intent::ClearCompleted => vec![Event::Click(Target::ClearCompleted)],
            Intent::ToggleTheme => vec![Event::Click(Target::ThemeToggle)],
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerOptions {
    pub animate_removal: bool,
}

/// An edit in progress on one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub id: ItemId,
    pub original: String,
    pub buffer: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Focused {
    Nothing,
    NewItemInput,
    Editing(EditSession),
}

pub struct Controller<B: StorageBackend> {
    store: ItemStore<B>,
    theme: Theme,
    focused: Focused,
    new_item_text: String,
    pending_removals: HashSet<ItemId>,
    options: ControllerOptions,
}

impl<B: StorageBackend> Controller<B> {
    pub fn new(store: ItemStore<B>, theme: Theme, options: ControllerOptions) -> Self {
        Self {
            store,
            theme,
            focused: Focused::Nothing,
            new_item_text: String::new(),
            pending_removals: HashSet::new(),
            options,
        }
    }

    /// Loads items and theme from `persistence`.
    pub fn load(persistence: Persistence<B>, options: ControllerOptions) -> Self {
        let theme = persistence.load_theme();
        Self::new(ItemStore::load(persistence), theme, options)
    }

    pub fn store(&self) -> &ItemStore<B> {
        &self.store
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn editing(&self) -> Option<&EditSession> {
        match &self.focused {
            Focused::Editing(session) => Some(session),
            _ => None,
        }
    }

    pub fn new_item_text(&self) -> &str {
        &self.new_item_text
    }

    pub fn is_removing(&self, id: &ItemId) -> bool {
        self.pending_removals.contains(id)
    }

    pub fn view(&self) -> View {
        View::build(self.store.items(), self.store.filter(), self.theme)
    }

    pub fn dispatch(&mut self, intent: Intent) -> Vec<Effect> {
        intent
            .into_events()
            .into_iter()
            .flat_map(|event| self.handle(event))
            .collect()
    }

    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        tracing::trace!(?event, "handling event");
        let mut effects = Vec::new();
        match event {
            Event::Focus(target) => self.on_focus(target, &mut effects),
            Event::Input(text) => self.on_input(text),
            Event::Key(press) => self.on_key(press, &mut effects),
            Event::Blur => self.blur(&mut effects),
            Event::Click(target) => {
                self.blur(&mut effects);
                self.on_click(target, &mut effects);
            }
            Event::RemovalFinished(id) => self.finish_removal(&id, &mut effects),
        }
        effects
    }

    fn on_focus(&mut self, target: FocusTarget, effects: &mut Vec<Effect>) {
        match target {
            FocusTarget::NewItemInput => {
                if self.focused != Focused::NewItemInput {
                    self.blur(effects);
                    self.focused = Focused::NewItemInput;
                }
            }
            FocusTarget::Row(id) => {
                if self.editing().is_some_and(|s| s.id == id) {
                    return;
                }
                self.blur(effects);
                self.begin_edit(id);
            }
        }
    }

    fn begin_edit(&mut self, id: ItemId) {
        if self.pending_removals.contains(&id) {
            return;
        }
        let Some(item) = self.store.get(&id) else {
            return;
        };
        let original = item.text.clone();
        self.focused = Focused::Editing(EditSession {
            id,
            buffer: original.clone(),
            original,
        });
    }

    fn on_input(&mut self, text: String) {
        match &mut self.focused {
            Focused::NewItemInput => self.new_item_text = text,
            Focused::Editing(session) => session.buffer = text,
            Focused::Nothing => {}
        }
    }

    fn on_key(&mut self, press: KeyPress, effects: &mut Vec<Effect>) {
        match (&self.focused, press.key) {
            // Plain, Ctrl+Enter and Cmd+Enter all add.
            (Focused::NewItemInput, Key::Enter) => self.submit_new_item(effects),
            (Focused::Editing(_), Key::Enter) => self.blur(effects),
            (Focused::Editing(_), Key::Escape) => self.cancel_edit(effects),
            _ => {}
        }
    }

    fn submit_new_item(&mut self, effects: &mut Vec<Effect>) {
        let Some(id) = self.store.add(&self.new_item_text) else {
            return;
        };
        tracing::debug!(%id, "added item");
        self.new_item_text.clear();
        effects.push(Effect::Render(self.view()));
        // A row the filter hides can't take focus; the input keeps it.
        let filter = self.store.filter();
        if self.store.get(&id).is_some_and(|item| filter.matches(item)) {
            self.begin_edit(id.clone());
            effects.push(Effect::Focus {
                id,
                caret: Caret::End,
            });
        }
        effects.push(Effect::ClearInput);
    }

    /// Moves focus away from whatever holds it, committing an edit in progress.
    fn blur(&mut self, effects: &mut Vec<Effect>) {
        match std::mem::replace(&mut self.focused, Focused::Nothing) {
            Focused::Editing(session) => self.commit_edit(session, effects),
            Focused::NewItemInput | Focused::Nothing => {}
        }
    }

    fn commit_edit(&mut self, session: EditSession, effects: &mut Vec<Effect>) {
        if self.store.edit(&session.id, &session.buffer) {
            tracing::debug!(id = %session.id, "edited item");
            effects.push(Effect::Render(self.view()));
            return;
        }
        if session.buffer == session.original {
            return;
        }
        if let Some(item) = self.store.get(&session.id) {
            effects.push(Effect::RevertText {
                id: session.id.clone(),
                text: item.text.clone(),
            });
        }
    }

    fn cancel_edit(&mut self, effects: &mut Vec<Effect>) {
        if let Focused::Editing(session) = std::mem::replace(&mut self.focused, Focused::Nothing) {
            effects.push(Effect::RevertText {
                id: session.id,
                text: session.original,
            });
        }
    }

    fn on_click(&mut self, target: Target, effects: &mut Vec<Effect>) {
        match target {
            Target::Toggle(id) => {
                if self.store.toggle(&id) {
                    effects.push(Effect::Render(self.view()));
                }
            }
            Target::Delete(id) => self.request_removal(id, effects),
            Target::Filter(filter) => {
                self.store.set_filter(filter);
                effects.push(Effect::Render(self.view()));
            }
            Target::ClearCompleted => {
                let removed = self.store.clear_completed();
                tracing::debug!(removed, "cleared completed items");
                effects.push(Effect::Render(self.view()));
            }
            Target::ThemeToggle => self.toggle_theme(effects),
        }
    }

    fn request_removal(&mut self, id: ItemId, effects: &mut Vec<Effect>) {
        if self.store.get(&id).is_none() || self.pending_removals.contains(&id) {
            return;
        }
        if self.options.animate_removal {
            self.pending_removals.insert(id.clone());
            effects.push(Effect::AnimateRemoval(id));
        } else if self.store.delete(&id).is_some() {
            effects.push(Effect::Render(self.view()));
        }
    }

    fn finish_removal(&mut self, id: &ItemId, effects: &mut Vec<Effect>) {
        if !self.pending_removals.remove(id) {
            return;
        }
        if self.store.delete(id).is_some() {
            tracing::debug!(%id, "removed item");
            effects.push(Effect::Render(self.view()));
        }
    }

    fn toggle_theme(&mut self, effects: &mut Vec<Effect>) {
        self.theme = self.theme.toggled();
        effects.push(Effect::ApplyTheme(self.theme));
        if let Err(e) = self.store.persistence().save_theme(self.theme) {
            tracing::warn!(error = %e, "failed to save theme");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::MemBackend;

    fn controller(animate: bool) -> Controller<MemBackend> {
        let store = StoreFixture::new()
            .with_item("1", "A", false)
            .with_item("2", "B", true)
            .build();
        Controller::new(
            store,
            Theme::Light,
            ControllerOptions {
                animate_removal: animate,
            },
        )
    }

    fn id(s: &str) -> ItemId {
        ItemId::from(s)
    }

    fn renders(effects: &[Effect]) -> usize {
        effects
            .iter()
            .filter(|e| matches!(e, Effect::Render(_)))
            .count()
    }

    fn writes(c: &Controller<MemBackend>) -> usize {
        c.store().persistence().backend().write_count()
    }

    #[test]
    fn enter_in_new_item_input_adds_and_focuses_new_row() {
        let mut c = controller(false);
        c.handle(Event::Focus(FocusTarget::NewItemInput));
        c.handle(Event::Input("  Buy milk ".into()));
        let effects = c.handle(Event::Key(KeyPress::plain(Key::Enter)));

        assert_eq!(c.store().len(), 3);
        let new_id = c.store().items()[2].id.clone();
        assert_eq!(c.store().items()[2].text, "Buy milk");
        assert_eq!(renders(&effects), 1);
        assert!(effects.contains(&Effect::Focus {
            id: new_id.clone(),
            caret: Caret::End
        }));
        assert!(effects.contains(&Effect::ClearInput));
        assert_eq!(c.new_item_text(), "");
        assert_eq!(c.editing().map(|s| &s.id), Some(&new_id));
    }

    #[test]
    fn add_under_hiding_filter_does_not_focus_the_new_row() {
        let mut c = controller(false);
        c.handle(Event::Click(Target::Filter(Filter::Completed)));
        c.handle(Event::Focus(FocusTarget::NewItemInput));
        c.handle(Event::Input("Hidden".into()));
        let effects = c.handle(Event::Key(KeyPress::plain(Key::Enter)));

        assert_eq!(c.store().len(), 3);
        assert_eq!(renders(&effects), 1);
        assert!(!effects.iter().any(|e| matches!(e, Effect::Focus { .. })));
        assert!(effects.contains(&Effect::ClearInput));
        assert!(c.editing().is_none());
    }

    #[test]
    fn ctrl_enter_also_adds() {
        let mut c = controller(false);
        c.handle(Event::Focus(FocusTarget::NewItemInput));
        c.handle(Event::Input("C".into()));
        c.handle(Event::Key(KeyPress::ctrl(Key::Enter)));
        assert_eq!(c.store().len(), 3);
    }

    #[test]
    fn blank_new_item_does_nothing() {
        let mut c = controller(false);
        c.handle(Event::Focus(FocusTarget::NewItemInput));
        c.handle(Event::Input("   ".into()));
        let effects = c.handle(Event::Key(KeyPress::plain(Key::Enter)));
        assert!(effects.is_empty());
        assert_eq!(c.store().len(), 2);
        assert_eq!(c.new_item_text(), "   ");
    }

    #[test]
    fn enter_commits_edit() {
        let mut c = controller(false);
        c.handle(Event::Focus(FocusTarget::Row(id("1"))));
        c.handle(Event::Input("A2".into()));
        let effects = c.handle(Event::Key(KeyPress::plain(Key::Enter)));

        assert_eq!(renders(&effects), 1);
        assert_eq!(c.store().get(&id("1")).unwrap().text, "A2");
        assert!(c.editing().is_none());
    }

    #[test]
    fn blur_commits_edit() {
        let mut c = controller(false);
        c.handle(Event::Focus(FocusTarget::Row(id("2"))));
        c.handle(Event::Input("B2".into()));
        c.handle(Event::Blur);
        assert_eq!(c.store().get(&id("2")).unwrap().text, "B2");
    }

    #[test]
    fn empty_commit_reverts_without_touching_store() {
        let mut c = controller(false);
        c.handle(Event::Focus(FocusTarget::Row(id("1"))));
        c.handle(Event::Input("".into()));
        let effects = c.handle(Event::Blur);

        assert_eq!(
            effects,
            vec![Effect::RevertText {
                id: id("1"),
                text: "A".into()
            }]
        );
        assert_eq!(c.store().get(&id("1")).unwrap().text, "A");
        assert_eq!(writes(&c), 0);
    }

    #[test]
    fn unchanged_commit_is_silent() {
        let mut c = controller(false);
        c.handle(Event::Focus(FocusTarget::Row(id("1"))));
        let effects = c.handle(Event::Key(KeyPress::plain(Key::Enter)));
        assert!(effects.is_empty());
        assert_eq!(writes(&c), 0);
    }

    #[test]
    fn escape_restores_original_without_edit() {
        let mut c = controller(false);
        c.handle(Event::Focus(FocusTarget::Row(id("1"))));
        c.handle(Event::Input("changed".into()));
        let effects = c.handle(Event::Key(KeyPress::plain(Key::Escape)));

        assert_eq!(
            effects,
            vec![Effect::RevertText {
                id: id("1"),
                text: "A".into()
            }]
        );
        assert!(c.editing().is_none());
        assert_eq!(c.store().get(&id("1")).unwrap().text, "A");
        assert_eq!(writes(&c), 0);

        // The blur that follows a cancel has nothing left to commit
        assert!(c.handle(Event::Blur).is_empty());
    }

    #[test]
    fn focusing_unknown_row_is_ignored() {
        let mut c = controller(false);
        c.handle(Event::Focus(FocusTarget::Row(id("missing"))));
        assert!(c.editing().is_none());
    }

    #[test]
    fn clicking_a_control_commits_pending_edit_first() {
        let mut c = controller(false);
        c.handle(Event::Focus(FocusTarget::Row(id("1"))));
        c.handle(Event::Input("A2".into()));
        let effects = c.handle(Event::Click(Target::Toggle(id("1"))));

        assert_eq!(renders(&effects), 2);
        let item = c.store().get(&id("1")).unwrap();
        assert_eq!(item.text, "A2");
        assert!(item.completed);
    }

    #[test]
    fn toggle_then_clear_completed() {
        let mut c = controller(false);
        c.handle(Event::Click(Target::Toggle(id("1"))));
        c.handle(Event::Click(Target::ClearCompleted));
        assert!(c.store().is_empty());
    }

    #[test]
    fn filter_click_rerenders_with_projection() {
        let mut c = controller(false);
        let effects = c.handle(Event::Click(Target::Filter(Filter::Active)));
        let Some(Effect::Render(view)) = effects.last() else {
            panic!("expected render, got {:?}", effects);
        };
        assert_eq!(view.active_filter, Filter::Active);
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].text, "A");
        assert_eq!(writes(&c), 0);
    }

    #[test]
    fn immediate_delete_without_animation() {
        let mut c = controller(false);
        let effects = c.handle(Event::Click(Target::Delete(id("1"))));
        assert_eq!(renders(&effects), 1);
        assert!(c.store().get(&id("1")).is_none());
    }

    #[test]
    fn animated_delete_waits_for_completion() {
        let mut c = controller(true);
        let effects = c.handle(Event::Click(Target::Delete(id("1"))));
        assert_eq!(effects, vec![Effect::AnimateRemoval(id("1"))]);
        assert!(c.store().get(&id("1")).is_some());
        assert!(c.is_removing(&id("1")));

        let effects = c.handle(Event::RemovalFinished(id("1")));
        assert_eq!(renders(&effects), 1);
        assert!(c.store().get(&id("1")).is_none());
        assert!(!c.is_removing(&id("1")));
    }

    #[test]
    fn duplicate_delete_signals_remove_and_persist_once() {
        let mut c = controller(true);
        c.handle(Event::Click(Target::Delete(id("1"))));
        assert!(c.handle(Event::Click(Target::Delete(id("1")))).is_empty());

        c.handle(Event::RemovalFinished(id("1")));
        assert!(c.handle(Event::RemovalFinished(id("1"))).is_empty());

        assert_eq!(c.store().len(), 1);
        assert_eq!(writes(&c), 1);
    }

    #[test]
    fn stray_completion_signal_is_ignored() {
        let mut c = controller(true);
        assert!(c.handle(Event::RemovalFinished(id("2"))).is_empty());
        assert_eq!(c.store().len(), 2);
    }

    #[test]
    fn pending_row_cannot_be_edited() {
        let mut c = controller(true);
        c.handle(Event::Click(Target::Delete(id("1"))));
        c.handle(Event::Focus(FocusTarget::Row(id("1"))));
        assert!(c.editing().is_none());
    }

    #[test]
    fn theme_toggle_applies_and_persists() {
        let mut c = controller(false);
        let effects = c.handle(Event::Click(Target::ThemeToggle));
        assert_eq!(effects, vec![Effect::ApplyTheme(Theme::Dark)]);
        assert_eq!(c.theme(), Theme::Dark);
        assert_eq!(c.store().persistence().load_theme(), Theme::Dark);
        assert_eq!(c.view().theme, Theme::Dark);
    }

    #[test]
    fn theme_toggle_survives_write_failure() {
        let mut c = controller(false);
        c.store().persistence().backend().set_simulate_write_error(true);
        c.handle(Event::Click(Target::ThemeToggle));
        assert_eq!(c.theme(), Theme::Dark);
    }

    #[test]
    fn load_reads_theme_and_items() {
        let backend = MemBackend::new()
            .with_entry(crate::store::THEME_KEY, "dark")
            .with_entry(crate::store::ITEMS_KEY, "not json");
        let c = Controller::load(Persistence::with_backend(backend), ControllerOptions::default());
        assert_eq!(c.theme(), Theme::Dark);
        assert!(c.store().is_empty());
    }

    #[test]
    fn intents_map_onto_events() {
        let mut c = controller(false);
        c.dispatch(Intent::Add("C".into()));
        c.dispatch(Intent::Edit(id("2"), "B2".into()));
        c.dispatch(Intent::Toggle(id("1")));
        c.dispatch(Intent::SetFilter(Filter::Completed));

        let view = c.view();
        let texts: Vec<&str> = view.rows.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["A", "B2"]);

        c.dispatch(Intent::ClearCompleted);
        c.dispatch(Intent::Delete(c.store().items()[0].id.clone()));
        assert!(c.store().is_empty());
    }
}
