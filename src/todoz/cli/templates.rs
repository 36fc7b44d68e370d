//! # CLI Templates
//!
//! Terminal output goes through minijinja templates kept in `templates/` and
//! included here as string constants, so they can be edited and diffed apart
//! from the code that fills them.
//!
//! Conventions:
//!
//! 1. Line breaks are explicit (`{{ "\n" }}`), every tag trims its
//!    surrounding whitespace. Templates stay readable without the output
//!    depending on how they are indented.
//! 2. Templates pick semantic style names through the `style` filter and
//!    never branch on the theme; the palette decides what a name looks like.
//! 3. Layout math (widths, truncation, padding) is done in Rust before the
//!    data reaches the template.
pub const LIST_TEMPLATE: &str = include_str!("templates/list.tmp");
pub const CONFIG_TEMPLATE: &str = include_str!("templates/config.tmp");
pub const HELP_TEMPLATE: &str = include_str!("templates/help.tmp");
