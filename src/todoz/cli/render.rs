//! # Rendering Module
//!
//! Turns [`View`] snapshots and command output into terminal text.
//!
//! Layout calculations (width, truncation, padding) stay in Rust because they
//! require Unicode-aware processing. Templates handle presentation: which
//! semantic style each piece gets, and where lines break. The view's theme
//! picks the palette, so a dark view renders with dark styles no matter what
//! the terminal background is.

use super::styles::{names, palette, Palette};
use super::templates::{CONFIG_TEMPLATE, HELP_TEMPLATE, LIST_TEMPLATE};
use colored::Colorize;
use console::Term;
use minijinja::{Environment, Value};
use serde::Serialize;
use todoz::api::{CmdMessage, MessageLevel};
use todoz::config::TodozConfig;
use todoz::error::Result;
use todoz::model::{ItemId, Theme};
use todoz::view::View;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const DONE_MARK: &str = "[x]";
pub const OPEN_MARK: &str = "[ ]";
pub const REMOVING_MARKER: &str = "(removing)";
pub const EMPTY_MESSAGE: &str = "Nothing to do.";

/// How output should be laid out for the current terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub line_width: usize,
    pub use_color: bool,
}

impl Layout {
    pub fn new(line_width: usize, no_color: bool) -> Self {
        Self {
            line_width,
            use_color: use_color(no_color),
        }
    }
}

/// Color is on when stdout supports it, unless `--no-color` or `NO_COLOR` say otherwise.
pub fn use_color(no_color: bool) -> bool {
    if no_color || std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        return false;
    }
    Term::stdout().features().colors_supported()
}

#[derive(Serialize)]
struct FilterLabel {
    label: String,
    style: &'static str,
}

#[derive(Serialize)]
struct RowLine {
    index: String,
    mark: &'static str,
    mark_style: &'static str,
    text: String,
    text_style: &'static str,
    removing: bool,
}

#[derive(Serialize)]
struct ListData {
    filters: Vec<FilterLabel>,
    theme_label: String,
    rows: Vec<RowLine>,
    empty: bool,
    empty_message: &'static str,
    removing_marker: &'static str,
    footer: String,
}

#[derive(Serialize)]
struct ConfigEntry {
    key: &'static str,
    value: String,
}

#[derive(Serialize)]
struct ConfigData {
    entries: Vec<ConfigEntry>,
}

#[derive(Serialize)]
struct HelpEntry {
    usage: String,
    padding: String,
    about: String,
}

#[derive(Serialize)]
struct HelpData {
    commands: Vec<HelpEntry>,
}

/// Renders the list for `view`. Rows whose id is in `removing` carry the removal marker.
pub fn render_view(view: &View, removing: &[ItemId], layout: Layout) -> Result<String> {
    let index_width = view
        .rows
        .iter()
        .map(|row| format!("{}.", row.index).width())
        .max()
        .unwrap_or(0);

    let rows = view
        .rows
        .iter()
        .map(|row| {
            let is_removing = removing.contains(&row.id);
            let index = format!("{:>width$}", format!("{}.", row.index), width = index_width);
            // "<index> <mark> <text>[ <marker>]"
            let mut fixed = index.width() + 1 + OPEN_MARK.width() + 1;
            if is_removing {
                fixed += 1 + REMOVING_MARKER.width();
            }
            let available = layout.line_width.saturating_sub(fixed);

            RowLine {
                index,
                mark: if row.completed { DONE_MARK } else { OPEN_MARK },
                mark_style: if row.completed {
                    names::DONE_MARK
                } else {
                    names::OPEN_MARK
                },
                text: truncate_to_width(&row.text, available),
                text_style: if row.completed {
                    names::DONE_TEXT
                } else {
                    names::TEXT
                },
                removing: is_removing,
            }
        })
        .collect::<Vec<_>>();

    let filters = view
        .filters
        .iter()
        .map(|f| {
            if f.selected {
                FilterLabel {
                    label: format!("[{}]", f.filter),
                    style: names::FILTER_SELECTED,
                }
            } else {
                FilterLabel {
                    label: format!(" {} ", f.filter),
                    style: names::FILTER,
                }
            }
        })
        .collect();

    let data = ListData {
        filters,
        theme_label: format!("theme: {}", view.theme),
        empty: rows.is_empty(),
        rows,
        empty_message: EMPTY_MESSAGE,
        removing_marker: REMOVING_MARKER,
        footer: footer(view),
    };

    render_template(LIST_TEMPLATE, &data, view.theme, layout.use_color)
}

fn footer(view: &View) -> String {
    let left = match view.remaining {
        1 => "1 item left".to_string(),
        n => format!("{} items left", n),
    };
    let completed = view.total - view.remaining;
    if completed > 0 {
        format!("{}, {} completed", left, completed)
    } else {
        left
    }
}

pub fn render_config(config: &TodozConfig, theme: Theme, layout: Layout) -> Result<String> {
    let entries = config
        .entries()
        .into_iter()
        .map(|(key, value)| ConfigEntry { key, value })
        .collect();
    render_template(CONFIG_TEMPLATE, &ConfigData { entries }, theme, layout.use_color)
}

/// Renders `(usage, description)` pairs as an aligned command list.
pub fn render_help(commands: &[(&str, &str)], theme: Theme, layout: Layout) -> Result<String> {
    let usage_width = commands.iter().map(|(u, _)| u.width()).max().unwrap_or(0);
    let commands = commands
        .iter()
        .map(|(usage, about)| HelpEntry {
            usage: usage.to_string(),
            padding: " ".repeat(usage_width - usage.width() + 2),
            about: about.to_string(),
        })
        .collect();
    render_template(HELP_TEMPLATE, &HelpData { commands }, theme, layout.use_color)
}

fn render_template<T: Serialize>(
    template: &str,
    data: &T,
    theme: Theme,
    use_color: bool,
) -> Result<String> {
    let mut env = Environment::new();
    register_style_filter(&mut env, palette(theme), use_color);
    env.add_template("_inline", template)?;
    let tmpl = env.get_template("_inline")?;
    Ok(tmpl.render(data)?)
}

/// Registers the `style` filter: `{{ text | style("name") }}`.
fn register_style_filter(env: &mut Environment<'_>, palette: &'static Palette, use_color: bool) {
    env.add_filter("style", move |value: Value, name: String| -> String {
        palette.apply(&name, &value.to_string(), use_color)
    });
}

/// Renders command messages, one per line, colored by level.
pub fn render_messages(messages: &[CmdMessage]) -> String {
    messages
        .iter()
        .map(|message| {
            let line = match message.level {
                MessageLevel::Info => message.content.dimmed(),
                MessageLevel::Success => message.content.green(),
                MessageLevel::Warning => message.content.yellow(),
                MessageLevel::Error => message.content.red(),
            };
            format!("{}\n", line)
        })
        .collect()
}

pub fn print_messages(messages: &[CmdMessage]) {
    let output = render_messages(messages);
    if !output.is_empty() {
        print!("{}", output);
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
