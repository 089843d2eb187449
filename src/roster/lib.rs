//! # Roster Architecture
//!
//! Roster keeps a list of student records (identity, birth year, course and
//! three subjects with grades), persists it as a pipe-delimited text file or
//! a length-prefixed binary file, and renders it as a console table that
//! stays aligned for non-Latin text.
//!
//! It is a library with a CLI client, not a CLI with some library code.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prompts, prints, sets exit codes       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (student numbers → store indexes)      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One operation per module, returns Result<CmdResult>      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Domain + Storage (model, validation, store/, codec/, table)│
//! │  - RecordStore, StorageBackend (FsBackend / MemBackend)     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward nothing writes to stdout or stderr, reads stdin, or
//! exits the process. Confirmation for edits is a callback the caller
//! supplies. Diagnostics go through `tracing`; the binary decides where they
//! end up.
//!
//! ## Text Width
//!
//! Every width in the table is a count of Unicode scalar values, never bytes.
//! Strings are `&str`, so malformed UTF-8 cannot reach the renderer or the
//! validators; bytes read from the text file are decoded lossily and any
//! replacement character fails validation for that line.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per operation
//! - [`store`]: The in-memory record store and storage backends
//! - [`codec`]: Text and binary file formats
//! - [`table`]: Console table renderer
//! - [`model`]: `StudentRecord`, sort keys and edit requests
//! - [`validation`]: Field rules
//! - [`text`]: Character-counted width, chunking and case folding
//! - [`config`]: `config.json` settings
//! - [`init`]: Data directory resolution and session start
//! - [`error`]: Error types

pub mod api;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod store;
pub mod table;
pub mod text;
pub mod validation;
