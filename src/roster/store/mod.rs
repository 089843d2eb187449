//! # Storage Layer
//!
//! Two pieces live here:
//!
//! - [`RecordStore`]: the in-memory, ordered roster. Insertion order is the
//!   initial order; sorting reorders in place. It is the single source of
//!   truth the commands mutate.
//! - [`backend::StorageBackend`]: raw byte persistence for the two roster
//!   files (text and binary). What the bytes mean is the codec's business
//!   (see `codec/`); the backend only knows how to read and write them.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: production file storage, atomic writes
//! - [`mem_backend::MemBackend`]: in-memory storage for tests
//!
//! ## Capacity
//!
//! The store grows its backing vector by doubling whenever an append finds
//! it full, so appends are amortized O(1). Growth is logged at debug level.

use crate::error::{Result, RosterError};
use crate::model::{SortField, SortOrder, StudentRecord};
use crate::text::fold_case;
use std::cmp::Ordering;
use tracing::debug;

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;

pub const DEFAULT_CAPACITY: usize = 10;
/// Upper bound on the capacity reserved up front; growth past it still doubles.
pub const MAX_INITIAL_CAPACITY: usize = 4096;

#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Vec<StudentRecord>,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity.clamp(1, MAX_INITIAL_CAPACITY)),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.records.capacity()
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    /// Record at a 0-based position.
    pub fn get(&self, index: usize) -> Option<&StudentRecord> {
        self.records.get(index)
    }

    /// Appends at the end, doubling capacity first when full.
    pub fn push(&mut self, record: StudentRecord) {
        self.reserve_for(self.records.len() + 1);
        self.records.push(record);
    }

    /// Removes the record at a 0-based position, shifting later records left.
    pub fn remove(&mut self, index: usize) -> Result<StudentRecord> {
        self.check_index(index)?;
        Ok(self.records.remove(index))
    }

    /// Swaps in a new record at a 0-based position, returning the old one.
    pub fn replace_at(&mut self, index: usize, record: StudentRecord) -> Result<StudentRecord> {
        self.check_index(index)?;
        Ok(std::mem::replace(&mut self.records[index], record))
    }

    /// Drops the current contents and takes `records` in their given order.
    pub fn replace_all(&mut self, records: Vec<StudentRecord>) {
        self.records.clear();
        self.reserve_for(records.len());
        self.records.extend(records);
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Stable in-place sort. Descending reverses the comparator, so ties keep
    /// their relative order in both directions.
    pub fn sort_by(&mut self, field: SortField, order: SortOrder) {
        self.records.sort_by(|a, b| {
            let ordering = compare_by(field, a, b);
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
        debug!("Sorted {} record(s) by {} ({:?})", self.len(), field, order);
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.records.len() {
            // Reported as the 1-based number shown in the table.
            return Err(RosterError::IndexOutOfRange {
                index: index + 1,
                count: self.records.len(),
            });
        }
        Ok(())
    }

    fn reserve_for(&mut self, needed: usize) {
        let mut capacity = self.records.capacity().max(1);
        if needed <= capacity {
            return;
        }
        while capacity < needed {
            capacity *= 2;
        }
        self.records.reserve_exact(capacity - self.records.len());
        debug!("Roster capacity increased to {}", self.records.capacity());
    }
}

/// Ordering of two records by one sort key. Names compare case-insensitively.
pub fn compare_by(field: SortField, a: &StudentRecord, b: &StudentRecord) -> Ordering {
    match field {
        SortField::BirthYear => a.birth_year.cmp(&b.birth_year),
        SortField::Course => a.course.cmp(&b.course),
        SortField::Name => fold_case(&a.name).cmp(&fold_case(&b.name)),
        SortField::Surname => fold_case(&a.surname).cmp(&fold_case(&b.surname)),
        SortField::MiddleName => fold_case(&a.middle_name).cmp(&fold_case(&b.middle_name)),
        SortField::AverageGrade => a.average_grade().total_cmp(&b.average_grade()),
    }
}
