//! # Command Layer
//!
//! One module per roster operation. Each exposes a plain function that takes
//! the record store, the storage backend and whatever the operation needs,
//! and returns `Result<CmdResult>`.
//!
//! Commands never print. Everything the caller might want to show comes
//! back in the [`CmdResult`]: leveled messages plus optional payloads
//! (affected records, a rendered table, an edit outcome, a load report).
//! Failures that leave the store untouched are `Err`; partial successes,
//! such as skipped lines during a text load, are `Ok` with warnings.

use crate::config::RosterConfig;
use crate::error::{Result, RosterError};
use crate::model::StudentRecord;
use crate::store::backend::FileKind;
use crate::store::RecordStore;

pub mod add;
pub mod config;
pub mod delete;
pub mod edit;
pub mod list;
pub mod load;
pub mod save;
pub mod sort;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Whether a confirmed edit was committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    Cancelled,
}

/// What a load actually did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// File the records finally came from.
    pub source: FileKind,
    pub loaded: usize,
    /// Text lines rejected while decoding.
    pub skipped: usize,
    /// True when a missing text file sent the load to the binary file.
    pub fell_back: bool,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected: Vec<StudentRecord>,
    pub rendered: Option<String>,
    pub outcome: Option<EditOutcome>,
    pub load_report: Option<LoadReport>,
    pub config: Option<RosterConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    /// Appends another result's messages after this one's.
    pub fn absorb(&mut self, other: CmdResult) {
        self.messages.extend(other.messages);
    }

    pub fn with_affected(mut self, records: Vec<StudentRecord>) -> Self {
        self.affected = records;
        self
    }

    pub fn with_rendered(mut self, rendered: String) -> Self {
        self.rendered = Some(rendered);
        self
    }

    pub fn with_outcome(mut self, outcome: EditOutcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    pub fn with_load_report(mut self, report: LoadReport) -> Self {
        self.load_report = Some(report);
        self
    }

    pub fn with_config(mut self, config: RosterConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_warnings(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning)
    }
}

/// Converts a 1-based student number, as shown in the table, into a
/// checked 0-based store index.
pub fn resolve_number(store: &RecordStore, number: usize) -> Result<usize> {
    if number == 0 || number > store.len() {
        return Err(RosterError::IndexOutOfRange {
            index: number,
            count: store.len(),
        });
    }
    Ok(number - 1)
}

/// Short human label for a record in status messages.
pub(crate) fn describe(record: &StudentRecord) -> String {
    format!("{} {} {}", record.surname, record.name, record.middle_name)
        .trim_end()
        .to_string()
}
