//! # Persistence Codecs
//!
//! Two independent full-snapshot formats for the roster. Saving always
//! overwrites the whole file; loading always replaces the whole store.
//!
//! - [`text::TextCodec`]: one pipe-delimited line per record, 11 fields.
//!   Malformed lines are rejected one by one and the rest still load.
//! - [`binary::BinaryCodec`]: a length-prefixed record stream with 32-bit
//!   little-endian integers. Any damage aborts the whole decode.
//!
//! Neither format carries a header, version or checksum. In the text format
//! a literal `|` or newline inside a field corrupts that line; there is no
//! escaping.

use crate::error::Result;
use crate::model::StudentRecord;
use crate::store::backend::FileKind;

pub mod binary;
pub mod text;

/// A line the text decoder refused, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLine {
    /// 1-based line number in the file
    pub line: usize,
    pub reason: String,
}

/// Output of a decode: the records that survived plus any rejections.
#[derive(Debug, Default)]
pub struct Decoded {
    pub records: Vec<StudentRecord>,
    pub rejected: Vec<RejectedLine>,
}

/// A persisted roster format.
pub trait RecordCodec {
    /// Which roster file this codec reads and writes.
    fn kind(&self) -> FileKind;

    fn encode(&self, records: &[StudentRecord]) -> Result<Vec<u8>>;

    fn decode(&self, bytes: &[u8]) -> Result<Decoded>;
}
