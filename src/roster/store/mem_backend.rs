use super::backend::{FileKind, StorageBackend};
use crate::error::{Result, RosterError};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since roster is single-threaded,
/// which lets `StorageBackend` keep `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    files: RefCell<HashMap<FileKind, Vec<u8>>>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Test helper to seed a file directly.
    pub fn put(&self, kind: FileKind, bytes: impl Into<Vec<u8>>) {
        self.files.borrow_mut().insert(kind, bytes.into());
    }

    /// Test helper to inspect a file without going through the trait.
    pub fn get(&self, kind: FileKind) -> Option<Vec<u8>> {
        self.files.borrow().get(&kind).cloned()
    }
}

impl StorageBackend for MemBackend {
    fn read(&self, kind: FileKind) -> Result<Option<Vec<u8>>> {
        Ok(self.get(kind))
    }

    fn write(&self, kind: FileKind, bytes: &[u8]) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(RosterError::Store("Simulated write error".to_string()));
        }
        self.put(kind, bytes.to_vec());
        Ok(())
    }

    fn location(&self, kind: FileKind) -> PathBuf {
        match kind {
            FileKind::Text => PathBuf::from("memory://students.txt"),
            FileKind::Binary => PathBuf::from("memory://students.bin"),
        }
    }
}
