//! In-memory record collection.
//!
//! [`RecordStore`] owns the committed records. Every mutation that adds
//! or replaces a record goes through the validator, so no reader ever
//! observes a partially-committed or conflicting state; imported legacy
//! rows enter through [`RecordStore::insert_unchecked`].

use tracing::debug;

use crate::record::{ClassRecord, Semester};
use crate::validate::{Candidate, Reject, validate};

/// The caller-owned collection of committed class records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: Vec<ClassRecord>,
}

impl RecordStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// All committed records.
    pub fn records(&self) -> &[ClassRecord] {
        &self.records
    }

    /// Number of committed records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Validates a candidate and commits it.
    ///
    /// On rejection the store is left unchanged.
    pub fn submit(&mut self, candidate: &Candidate) -> Result<&ClassRecord, Reject> {
        let record = validate(candidate, &self.records, None)?;
        debug!(semester = %record.semester, code = record.course_code, "record added");
        let index = self.records.len();
        self.records.push(record);
        Ok(&self.records[index])
    }

    /// Validates a candidate and atomically replaces the record at `index`.
    ///
    /// The record being edited is excluded from its own conflict checks.
    /// On rejection the store is left unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn update(&mut self, index: usize, candidate: &Candidate) -> Result<&ClassRecord, Reject> {
        assert!(index < self.records.len(), "record index out of bounds");
        let record = validate(candidate, &self.records, Some(index))?;
        debug!(semester = %record.semester, code = record.course_code, "record replaced");
        self.records[index] = record;
        Ok(&self.records[index])
    }

    /// Removes and returns the record at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> ClassRecord {
        let record = self.records.remove(index);
        debug!(code = record.course_code, "record removed");
        record
    }

    /// Removes every record, returning how many were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.records.len();
        self.records.clear();
        debug!(dropped, "store cleared");
        dropped
    }

    /// Inserts a record without validation.
    ///
    /// Import path for legacy data: such records may collide in the grid
    /// (where they stack) and may lack structured time fields.
    pub fn insert_unchecked(&mut self, record: ClassRecord) {
        self.records.push(record);
    }

    /// Substring search across title, code, instructor, and semester
    /// label. A blank query returns everything.
    pub fn search(&self, query: &str) -> Vec<&ClassRecord> {
        self.records
            .iter()
            .filter(|record| record.matches_query(query))
            .collect()
    }

    /// Snapshot of one semester's records, for export or grid building.
    pub fn in_semester(&self, semester: Semester) -> Vec<&ClassRecord> {
        self.records
            .iter()
            .filter(|record| record.semester == semester)
            .collect()
    }
}
