//! # CLI
//!
//! This is **one possible UI client** for todoz, not the application itself.
//! It is the only place that knows about terminal I/O, exit codes and output
//! formatting.
//!
//! - `setup`: clap definitions
//! - `commands`: context setup and one handler per subcommand
//! - `render`, `styles`, `templates`: themed, templated terminal output
//! - `session`: the interactive line-driven client of the controller
//!
//! Running `todoz` with no arguments lists the items.

mod commands;
mod render;
mod session;
mod setup;
mod styles;
mod templates;

pub use commands::run;
