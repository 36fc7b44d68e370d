//! # Interactive Session
//!
//! `todoz session` drives the [`Controller`] one line at a time, the way a
//! graphical client would drive it with focus changes, keystrokes and clicks.
//! Each line becomes one or more controller events; the returned effects are
//! carried out on the terminal:
//!
//! - `Render` prints the list (once per line, the latest snapshot wins)
//! - `Focus` / `RevertText` become short status messages
//! - `AnimateRemoval` prints the row as `(removing)`, waits for the
//!   configured `removal-delay`, then confirms with `RemovalFinished`
//! - `ApplyTheme` repaints the list with the new palette
//!
//! Rows are addressed by display index (or id), as everywhere in the CLI.

use super::render::{render_help, render_messages, render_view, Layout};
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::str::FromStr;
use std::time::Duration;
use todoz::api::CmdMessage;
use todoz::controller::{
    Controller, Effect, Event, FocusTarget, Intent, Key, KeyPress, Target,
};
use todoz::error::{Result, TodozError};
use todoz::index::{self, ItemSelector};
use todoz::model::{Filter, ItemId};
use todoz::store::StorageBackend;
use todoz::view::View;

pub const PROMPT: &str = "> ";

const HELP: &[(&str, &str)] = &[
    ("add <text>", "Add an item and start editing it"),
    ("focus <n|new>", "Focus a row (start editing) or the new-item input"),
    ("type <text>", "Replace the text of whatever has focus"),
    ("enter", "Commit the edit, or add the typed new item"),
    ("esc", "Cancel the edit and restore the original text"),
    ("blur", "Move focus away (commits an edit)"),
    ("edit <n> <text>", "Replace the text of a row"),
    ("toggle <n>", "Complete or reopen a row"),
    ("delete <n>", "Delete a row"),
    ("filter <all|active|completed>", "Choose which rows are shown"),
    ("clear", "Remove completed rows"),
    ("theme", "Switch between light and dark"),
    ("list", "Show the list again"),
    ("help", "Show this help"),
    ("quit", "Leave the session"),
];

/// One parsed session line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Blank,
    Add(String),
    FocusNew,
    Focus(ItemSelector),
    Type(String),
    Enter,
    Escape,
    Blur,
    Edit(ItemSelector, String),
    Toggle(ItemSelector),
    Delete(ItemSelector),
    Filter(Filter),
    Clear,
    Theme,
    List,
    Help,
    Quit,
}

impl FromStr for Line {
    type Err = TodozError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (command, rest) = match s.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (s, ""),
        };

        let line = match command {
            "" => Line::Blank,
            "add" | "a" => Line::Add(rest.to_string()),
            "focus" | "f" if rest == "new" => Line::FocusNew,
            "focus" | "f" => Line::Focus(selector(command, rest)?),
            "type" => Line::Type(rest.to_string()),
            "enter" => Line::Enter,
            "esc" | "escape" => Line::Escape,
            "blur" => Line::Blur,
            "edit" | "e" => {
                let (target, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                Line::Edit(selector(command, target)?, text.trim().to_string())
            }
            "toggle" | "t" | "done" => Line::Toggle(selector(command, rest)?),
            "delete" | "rm" => Line::Delete(selector(command, rest)?),
            "filter" => Line::Filter(rest.parse()?),
            "clear" => Line::Clear,
            "theme" => Line::Theme,
            "list" | "ls" => Line::List,
            "help" | "?" => Line::Help,
            "quit" | "exit" | "q" => Line::Quit,
            other => {
                return Err(TodozError::Api(format!(
                    "Unknown command: {} (type 'help' for a list)",
                    other
                )))
            }
        };
        Ok(line)
    }
}

fn selector(command: &str, arg: &str) -> Result<ItemSelector> {
    if arg.is_empty() {
        return Err(TodozError::Api(format!("{} needs an item index", command)));
    }
    arg.parse()
}

pub struct Session<B: StorageBackend> {
    controller: Controller<B>,
    layout: Layout,
    removal_delay: Duration,
}

impl<B: StorageBackend> Session<B> {
    pub fn new(controller: Controller<B>, layout: Layout, removal_delay: Duration) -> Self {
        Self {
            controller,
            layout,
            removal_delay,
        }
    }

    #[cfg(test)]
    pub fn controller(&self) -> &Controller<B> {
        &self.controller
    }

    /// Reads lines until `quit` or end of input. With `prompt`, writes a prompt before each line.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W, prompt: bool) -> Result<()> {
        self.write_view(&self.controller.view(), out)?;
        if prompt {
            writeln!(out, "Type 'help' for commands.")?;
        }

        let mut buf = String::new();
        loop {
            if prompt {
                write!(out, "{}", PROMPT)?;
                out.flush()?;
            }
            buf.clear();
            if input.read_line(&mut buf)? == 0 {
                break;
            }
            let line = buf.trim_end_matches(['\n', '\r']);
            let keep_going = match line.parse::<Line>() {
                Ok(parsed) => self.execute(parsed, out)?,
                Err(e) => {
                    write!(out, "{}", render_messages(&[CmdMessage::error(e.to_string())]))?;
                    true
                }
            };
            if !keep_going {
                break;
            }
        }
        Ok(())
    }

    /// Runs one line. Returns `false` when the session should end.
    pub fn execute<W: Write>(&mut self, line: Line, out: &mut W) -> Result<bool> {
        tracing::debug!(?line, "session line");
        let effects = match line {
            Line::Blank => Vec::new(),
            Line::Add(text) => {
                if text.trim().is_empty() {
                    let message = CmdMessage::info("Nothing to add: text is empty");
                    write!(out, "{}", render_messages(&[message]))?;
                }
                self.controller.dispatch(Intent::Add(text))
            }
            Line::FocusNew => self.controller.handle(Event::Focus(FocusTarget::NewItemInput)),
            Line::Focus(selector) => match self.resolve(&selector, out)? {
                Some(id) => self.controller.handle(Event::Focus(FocusTarget::Row(id))),
                None => Vec::new(),
            },
            Line::Type(text) => self.controller.handle(Event::Input(text)),
            Line::Enter => self.controller.handle(Event::Key(KeyPress::plain(Key::Enter))),
            Line::Escape => self.controller.handle(Event::Key(KeyPress::plain(Key::Escape))),
            Line::Blur => self.controller.handle(Event::Blur),
            Line::Edit(selector, text) => match self.resolve(&selector, out)? {
                Some(id) => self.controller.dispatch(Intent::Edit(id, text)),
                None => Vec::new(),
            },
            Line::Toggle(selector) => match self.resolve(&selector, out)? {
                Some(id) => self.controller.handle(Event::Click(Target::Toggle(id))),
                None => Vec::new(),
            },
            Line::Delete(selector) => match self.resolve(&selector, out)? {
                Some(id) => self.controller.handle(Event::Click(Target::Delete(id))),
                None => Vec::new(),
            },
            Line::Filter(filter) => self.controller.handle(Event::Click(Target::Filter(filter))),
            Line::Clear => self.controller.handle(Event::Click(Target::ClearCompleted)),
            Line::Theme => self.controller.handle(Event::Click(Target::ThemeToggle)),
            Line::List => {
                self.write_view(&self.controller.view(), out)?;
                Vec::new()
            }
            Line::Help => {
                let help = render_help(HELP, self.controller.theme(), self.layout)?;
                write!(out, "{}", help)?;
                Vec::new()
            }
            Line::Quit => return Ok(false),
        };

        self.apply(effects, out)?;
        Ok(true)
    }

    fn resolve<W: Write>(&self, selector: &ItemSelector, out: &mut W) -> Result<Option<ItemId>> {
        match index::resolve(self.controller.store().items(), selector) {
            Ok(id) => Ok(Some(id)),
            Err(e) => {
                write!(out, "{}", render_messages(&[CmdMessage::error(e.to_string())]))?;
                Ok(None)
            }
        }
    }

    fn apply<W: Write>(&mut self, effects: Vec<Effect>, out: &mut W) -> Result<()> {
        let mut queue: VecDeque<Effect> = effects.into();
        let mut latest: Option<View> = None;
        let mut messages = Vec::new();

        while let Some(effect) = queue.pop_front() {
            match effect {
                Effect::Render(view) => latest = Some(view),
                Effect::Focus { id, caret } => {
                    tracing::debug!(%id, ?caret, "focus row");
                    if let Some(label) = self.label(&id) {
                        messages.push(CmdMessage::info(format!("Editing {}", label)));
                    }
                }
                Effect::ClearInput => tracing::trace!("new item input cleared"),
                Effect::RevertText { id, text } => {
                    let position = self.position(&id);
                    messages.push(CmdMessage::warning(format!(
                        "Kept ({}): {}",
                        position, text
                    )));
                }
                Effect::AnimateRemoval(id) => {
                    latest = None;
                    self.write_view(&self.controller.view(), out)?;
                    out.flush()?;
                    std::thread::sleep(self.removal_delay);
                    queue.extend(self.controller.handle(Event::RemovalFinished(id)));
                }
                Effect::ApplyTheme(theme) => {
                    messages.push(CmdMessage::success(format!("Theme set to {}", theme)));
                    latest = Some(self.controller.view());
                }
            }
        }

        if let Some(view) = latest {
            self.write_view(&view, out)?;
        }
        write!(out, "{}", render_messages(&messages))?;
        Ok(())
    }

    fn write_view<W: Write>(&self, view: &View, out: &mut W) -> Result<()> {
        let removing: Vec<ItemId> = view
            .rows
            .iter()
            .filter(|row| self.controller.is_removing(&row.id))
            .map(|row| row.id.clone())
            .collect();
        let output = render_view(view, &removing, self.layout)?;
        write!(out, "{}", output)?;
        Ok(())
    }

    fn position(&self, id: &ItemId) -> usize {
        self.controller.store().position(id).map_or(0, |pos| pos + 1)
    }

    fn label(&self, id: &ItemId) -> Option<String> {
        let item = self.controller.store().get(id)?;
        Some(format!("({}): {}", self.position(id), item.text))
    }
}
