//! # Rolodex Architecture
//!
//! Rolodex is a personal contact and notes book: named records with phones,
//! email, address, birthday and tagged notes, kept in memory and saved to a
//! single file.
//!
//! Like any UI-agnostic library, the core never touches the terminal; the
//! bundled CLI is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (cli/, wired by main.rs)                               │
//! │  - clap parsing, shell loop, colored output, exit codes     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs)                                               │
//! │  - Owns the AddressBook and its BookStore                   │
//! │  - One method per user-facing operation                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs)                                   │
//! │  - Business logic over the book, returns CmdResult          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Book + model (book.rs, model/)                             │
//! │  - Validated fields, records, notes, search, batches        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Storage (store/)                                           │
//! │  - BookStore trait: FileStore, MemStore                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Validation at assignment
//!
//! Every field checks its value when it is set (see [`model::field`]), so a
//! record read back from the book never needs checking again.
//!
//! ## Module Overview
//!
//! - [`api`]: the facade every client talks to
//! - [`commands`]: business logic per operation
//! - [`book`]: the keyed, ordered record store with search and batches
//! - [`model`]: fields, notes, records
//! - [`store`]: persistence backends
//! - [`config`]: `config.json` settings
//! - [`error`]: error types

pub mod api;
pub mod book;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod store;
