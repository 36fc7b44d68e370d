//! Styles for the todoz CLI.
//!
//! Templates only ever name a semantic style (`index`, `done-text`, ...). What
//! that style looks like is decided here, once per theme: the stored theme
//! picks the [`Palette`] and the palette turns names into `console::Style`s.
//!
//! Both palettes define every name in [`names`]. A name a palette doesn't know
//! renders with a `(!?)` prefix so typos in templates show up immediately.
use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use todoz::model::Theme;

pub const MISSING_STYLE_INDICATOR: &str = "(!?)";

/// Style identifiers shared between templates and renderers.
pub mod names {
    pub const TITLE: &str = "title";
    pub const MUTED: &str = "muted";
    pub const INDEX: &str = "index";
    pub const TEXT: &str = "text";
    pub const DONE_MARK: &str = "done-mark";
    pub const OPEN_MARK: &str = "open-mark";
    pub const DONE_TEXT: &str = "done-text";
    pub const REMOVING: &str = "removing";
    pub const FILTER: &str = "filter";
    pub const FILTER_SELECTED: &str = "filter-selected";
    pub const CONFIG_KEY: &str = "config-key";
}

/// Named styles for one theme.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    styles: HashMap<&'static str, Style>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, name: &'static str, style: Style) -> Self {
        self.styles.insert(name, style);
        self
    }

    #[cfg(test)]
    pub fn has(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    /// Applies a named style. Without color the text passes through untouched.
    pub fn apply(&self, name: &str, text: &str, use_color: bool) -> String {
        match self.styles.get(name) {
            Some(style) if use_color => style.clone().force_styling(true).apply_to(text).to_string(),
            Some(_) => text.to_string(),
            None => format!("{} {}", MISSING_STYLE_INDICATOR, text),
        }
    }
}

pub static LIGHT: Lazy<Palette> = Lazy::new(build_light_palette);
pub static DARK: Lazy<Palette> = Lazy::new(build_dark_palette);

pub fn palette(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Light => &LIGHT,
        Theme::Dark => &DARK,
    }
}

fn build_light_palette() -> Palette {
    let regular = Style::new().black();
    let muted = Style::new().color256(rgb_to_ansi256((115, 115, 115)));
    let accent = Style::new().color256(rgb_to_ansi256((196, 140, 0)));

    Palette::new()
        .add(names::TITLE, regular.clone().bold())
        .add(names::MUTED, muted.clone())
        .add(names::INDEX, accent.clone())
        .add(names::TEXT, regular)
        .add(names::DONE_MARK, Style::new().green())
        .add(names::OPEN_MARK, muted.clone())
        .add(names::DONE_TEXT, muted.clone().strikethrough())
        .add(
            names::REMOVING,
            Style::new().color256(rgb_to_ansi256((186, 33, 45))).italic(),
        )
        .add(names::FILTER, muted)
        .add(names::FILTER_SELECTED, accent.clone().bold().underlined())
        .add(names::CONFIG_KEY, accent)
}

fn build_dark_palette() -> Palette {
    let regular = Style::new().white();
    let muted = Style::new().color256(rgb_to_ansi256((180, 180, 180)));
    let accent = Style::new().color256(rgb_to_ansi256((255, 214, 10)));

    Palette::new()
        .add(names::TITLE, regular.clone().bold())
        .add(names::MUTED, muted.clone())
        .add(names::INDEX, accent.clone())
        .add(names::TEXT, regular)
        .add(
            names::DONE_MARK,
            Style::new().color256(rgb_to_ansi256((144, 238, 144))),
        )
        .add(names::OPEN_MARK, muted.clone())
        .add(names::DONE_TEXT, muted.clone().strikethrough())
        .add(
            names::REMOVING,
            Style::new().color256(rgb_to_ansi256((255, 138, 128))).italic(),
        )
        .add(names::FILTER, muted)
        .add(names::FILTER_SELECTED, accent.clone().bold().underlined())
        .add(names::CONFIG_KEY, accent)
}

/// Converts an RGB triplet to the nearest ANSI 256-color palette index.
pub fn rgb_to_ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    if r == g && g == b {
        if r < 8 {
            16
        } else if r > 248 {
            231
        } else {
            232 + ((r as u16 - 8) * 24 / 247) as u8
        }
    } else {
        let red = (r as u16 * 5 / 255) as u8;
        let green = (g as u16 * 5 / 255) as u8;
        let blue = (b as u16 * 5 / 255) as u8;
        16 + 36 * red + 6 * green + blue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_NAMES: &[&str] = &[
        names::TITLE,
        names::MUTED,
        names::INDEX,
        names::TEXT,
        names::DONE_MARK,
        names::OPEN_MARK,
        names::DONE_TEXT,
        names::REMOVING,
        names::FILTER,
        names::FILTER_SELECTED,
        names::CONFIG_KEY,
    ];

    #[test]
    fn both_palettes_define_every_name() {
        for name in ALL_NAMES {
            assert!(LIGHT.has(name), "light palette is missing {}", name);
            assert!(DARK.has(name), "dark palette is missing {}", name);
        }
    }

    #[test]
    fn plain_mode_passes_text_through() {
        assert_eq!(LIGHT.apply(names::INDEX, "1.", false), "1.");
    }

    #[test]
    fn color_mode_emits_ansi() {
        let styled = DARK.apply(names::DONE_MARK, "[x]", true);
        assert!(styled.contains("\u{1b}["));
        assert!(styled.contains("[x]"));
    }

    #[test]
    fn unknown_name_is_flagged() {
        assert_eq!(LIGHT.apply("nope", "text", false), "(!?) text");
    }

    #[test]
    fn theme_selects_palette() {
        let light = palette(Theme::Light).apply(names::TEXT, "a", true);
        let dark = palette(Theme::Dark).apply(names::TEXT, "a", true);
        assert_ne!(light, dark);
    }

    #[test]
    fn grays_map_to_grayscale_ramp() {
        assert_eq!(rgb_to_ansi256((0, 0, 0)), 16);
        assert_eq!(rgb_to_ansi256((255, 255, 255)), 231);
        assert!(rgb_to_ansi256((128, 128, 128)) >= 232);
    }
}
