//! # neonv Architecture
//!
//! neonv browses a directory of plain-text notes: type in a search bar, the
//! sidebar narrows to matching notes, and the selected note is shown in an
//! embedded Neovim. The interesting parts are the search and the state
//! machine that keeps list, selection and editor buffer in sync. Everything
//! else is glue.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (cli/, wired by main.rs)                               │
//! │  - one-shot subcommands, terminal browse adapter            │
//! │  - the ONLY place that prints or exits                      │
//! └─────────────────────────────────────────────────────────────┘
//!               │                               │
//!               ▼                               ▼
//! ┌───────────────────────────┐   ┌─────────────────────────────┐
//! │  API (api.rs)             │   │  Controller (controller.rs) │
//! │  one call per subcommand  │   │  list ⇄ selection ⇄ buffer  │
//! └───────────────────────────┘   └─────────────────────────────┘
//!               │                               │
//!               ▼                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs): filter, list, search, create ... │
//! └─────────────────────────────────────────────────────────────┘
//!               │                               │
//!               ▼                               ▼
//! ┌───────────────────────────┐   ┌─────────────────────────────┐
//! │  Storage (store/)         │   │  Remote editor (editor/)    │
//! │  NoteStore trait          │   │  RemoteEditor trait,        │
//! │  FileStore, InMemoryStore │   │  nvim over msgpack-RPC      │
//! └───────────────────────────┘   └─────────────────────────────┘
//! ```
//!
//! ## Single thread
//!
//! Everything runs on the event thread. Each keystroke re-walks the notes
//! directory and blocks until done; editor calls are issued one at a time
//! over a single long-lived pipe. There is no index, debounce or
//! cancellation, which is fine for a personal notes folder.
//!
//! ## Module Overview
//!
//! - [`api`]: facade for the one-shot subcommands
//! - [`controller`]: selection / buffer state machine and widget contracts
//! - [`commands`]: filter and the other operations
//! - [`matcher`]: case- and diacritic-insensitive substring search
//! - [`store`]: notes directory access
//! - [`editor`]: remote editor contract and the Neovim client
//! - [`model`]: `NoteFile`, `MatchResult`
//! - [`config`]: `config.json`
//! - [`logging`]: logger bootstrap
//! - [`error`]: error types

pub mod api;
pub mod commands;
pub mod config;
pub mod controller;
pub mod editor;
pub mod error;
pub mod logging;
pub mod matcher;
pub mod model;
pub mod store;
