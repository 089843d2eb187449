use crate::error::Result;
use std::path::PathBuf;

/// The two persisted roster files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Text,
    Binary,
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileKind::Text => write!(f, "text"),
            FileKind::Binary => write!(f, "binary"),
        }
    }
}

/// Abstract interface for raw roster file I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while the codecs handle the "what" (record layout on the wire).
pub trait StorageBackend {
    /// Read the whole file.
    /// Returns Ok(None) if the file does not exist.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn read(&self, kind: FileKind) -> Result<Option<Vec<u8>>>;

    /// Replace the whole file with `bytes`.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write(&self, kind: FileKind, bytes: &[u8]) -> Result<()>;

    /// Where the file lives. For MemBackend, a virtual path.
    fn location(&self, kind: FileKind) -> PathBuf;
}
