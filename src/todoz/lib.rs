//! # Todoz Architecture
//!
//! Todoz is a **UI-agnostic task list library** with a terminal client. The
//! core never touches stdout, never exits the process and never assumes a
//! terminal, so the same core could sit behind a browser page or a TUI.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders views, handles terminal I/O    │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                │                               │
//!                ▼                               ▼
//! ┌───────────────────────────────┐ ┌───────────────────────────┐
//! │  API Layer (api.rs)           │ │  Controller (controller.rs)│
//! │  - One-shot operations        │ │  - Focus/key/click events  │
//! │  - Display indexes → ids      │ │  - Edit state machine      │
//! │  - Commands (commands/*.rs)   │ │  - Two-phase delete        │
//! └───────────────────────────────┘ └───────────────────────────┘
//!                │                               │
//!                ▼                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Item Store (items.rs) + View projection (view.rs)          │
//! │  - Ordered collection, transient filter                     │
//! │  - Every real change is written through persistence        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Persistence adapter over a StorageBackend trait          │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Model
//!
//! Nothing in the core is allowed to take the process down. Corrupt stored
//! data loads as an empty list (and is logged), invalid input to a mutation
//! is a no-op, and a failed write is logged while the in-memory state carries
//! on. Errors only reach the user for things they can fix: an index that
//! doesn't exist, an unknown filter or theme name, an unusable data directory.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade for one-shot operations
//! - [`commands`]: Per-command logic and messages
//! - [`controller`]: Event-driven interaction controller
//! - [`items`]: The item store
//! - [`view`]: Pure projection into view snapshots
//! - [`store`]: Persistence adapter and storage backends
//! - [`model`]: Core data types (`Item`, `Filter`, `Theme`)
//! - [`index`]: Display indexes (1, 2-4, or a full id)
//! - [`config`]: Configuration management
//! - [`logging`]: Subscriber setup for clients
//! - [`error`]: Error types
//! - `cli`: Argument parsing, rendering and the interactive session for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod index;
pub mod items;
pub mod logging;
pub mod model;
pub mod store;
pub mod view;
