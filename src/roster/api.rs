//! # API Facade
//!
//! The single entry point for roster operations, whatever UI drives them.
//! `RosterApi` owns the record store, the storage backend and the active
//! configuration, and dispatches each call to its command module.
//!
//! It normalizes inputs (1-based student numbers become store indexes,
//! configured course bounds and console width are filled in) and returns
//! `Result<CmdResult>`. It does no terminal I/O and holds no business logic.
//!
//! Generic over [`StorageBackend`]: `RosterApi<FsBackend>` in production,
//! `RosterApi<MemBackend>` in tests.

use crate::commands::{self, resolve_number};
use crate::config::RosterConfig;
use crate::error::Result;
use crate::model::{EditRequest, SortField, SortOrder, StudentRecord};
use crate::store::backend::StorageBackend;
use crate::store::RecordStore;
use crate::table::terminal_width;
use std::path::{Path, PathBuf};

/// Settings read only when a session is set up.
pub const NEXT_SESSION_KEYS: [&str; 3] = ["text-file", "binary-file", "initial-capacity"];

pub struct RosterApi<B: StorageBackend> {
    store: RecordStore,
    backend: B,
    config: RosterConfig,
    data_dir: PathBuf,
}

impl<B: StorageBackend> RosterApi<B> {
    pub fn new(backend: B, config: RosterConfig, data_dir: PathBuf) -> Self {
        Self {
            store: RecordStore::with_capacity(config.initial_capacity),
            backend,
            config,
            data_dir,
        }
    }

    pub fn add_record(&mut self, record: StudentRecord) -> Result<CmdResult> {
        let bounds = self.config.course_bounds();
        commands::add::run(&mut self.store, &self.backend, record, bounds)
    }

    /// Deletes by the 1-based number shown in the table.
    pub fn delete_record(&mut self, number: usize) -> Result<CmdResult> {
        let index = resolve_number(&self.store, number)?;
        commands::delete::run(&mut self.store, &self.backend, index)
    }

    pub fn edit_record(
        &mut self,
        number: usize,
        request: &EditRequest,
        confirm: &mut Confirm<'_>,
    ) -> Result<CmdResult> {
        let bounds = self.config.course_bounds();
        commands::edit::run(
            &mut self.store,
            &self.backend,
            number,
            request,
            bounds,
            confirm,
        )
    }

    pub fn list_records(&self) -> Result<CmdResult> {
        commands::list::run(&self.store, self.console_width())
    }

    pub fn sort_records(&mut self, field: SortField, order: SortOrder) -> Result<CmdResult> {
        commands::sort::run(&mut self.store, field, order)
    }

    pub fn save_text(&self) -> Result<CmdResult> {
        commands::save::text(&self.store, &self.backend)
    }

    pub fn save_binary(&self) -> Result<CmdResult> {
        commands::save::binary(&self.store, &self.backend)
    }

    pub fn load_text(&mut self) -> Result<CmdResult> {
        commands::load::text(&mut self.store, &self.backend)
    }

    pub fn load_binary(&mut self) -> Result<CmdResult> {
        commands::load::binary(&mut self.store, &self.backend)
    }

    /// Session-start load; an empty data directory is not an error.
    pub fn autoload(&mut self) -> Result<CmdResult> {
        commands::load::startup(&mut self.store, &self.backend)
    }

    /// Shows or changes `config.json`. A successful change also applies to
    /// this session, except for [`NEXT_SESSION_KEYS`]: the backend and the
    /// store are built once per session, so those wait for the next run.
    pub fn config(&mut self, action: ConfigAction) -> Result<CmdResult> {
        let set_key = match &action {
            ConfigAction::Set(key, _) => Some(key.clone()),
            _ => None,
        };
        let mut result = commands::config::run(&self.data_dir, action)?;
        if let (Some(key), Some(config)) = (set_key, result.config.clone()) {
            self.config = config;
            if NEXT_SESSION_KEYS.contains(&key.as_str()) {
                result.add_message(CmdMessage::info(format!(
                    "{} takes effect from the next session",
                    key
                )));
            }
        }
        Ok(result)
    }

    /// The record behind a 1-based student number.
    pub fn student(&self, number: usize) -> Result<&StudentRecord> {
        let index = resolve_number(&self.store, number)?;
        Ok(&self.store.records()[index])
    }

    pub fn records(&self) -> &[StudentRecord] {
        self.store.records()
    }

    pub fn settings(&self) -> &RosterConfig {
        &self.config
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Configured console width, else the terminal's.
    pub fn console_width(&self) -> usize {
        self.config.console_width.unwrap_or_else(terminal_width)
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::edit::Confirm;
pub use crate::commands::{CmdMessage, CmdResult, EditOutcome, LoadReport, MessageLevel};
