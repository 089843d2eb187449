use super::backend::{FileKind, StorageBackend};
use crate::error::{Result, RosterError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// File-based storage: one text file and one binary file.
pub struct FsBackend {
    text_path: PathBuf,
    binary_path: PathBuf,
}

impl FsBackend {
    pub fn new(text_path: PathBuf, binary_path: PathBuf) -> Self {
        Self {
            text_path,
            binary_path,
        }
    }

    fn path(&self, kind: FileKind) -> &Path {
        match kind {
            FileKind::Text => &self.text_path,
            FileKind::Binary => &self.binary_path,
        }
    }
}

impl StorageBackend for FsBackend {
    fn read(&self, kind: FileKind) -> Result<Option<Vec<u8>>> {
        match fs::read(self.path(kind)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(RosterError::Io(e)),
        }
    }

    fn write(&self, kind: FileKind, bytes: &[u8]) -> Result<()> {
        let target = self.path(kind);
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(RosterError::Io)?;
        }

        let tmp_path = dir.join(format!(".roster-{}.tmp", Uuid::new_v4()));
        // A failed write or rename must not leave the temp file behind.
        let written = fs::write(&tmp_path, bytes).and_then(|()| fs::rename(&tmp_path, target));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(RosterError::Io(e));
        }
        Ok(())
    }

    fn location(&self, kind: FileKind) -> PathBuf {
        self.path(kind).to_path_buf()
    }
}
