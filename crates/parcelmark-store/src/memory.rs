//! In-memory record storage for a single session.

use parcelmark_core::error::{ParcelError, Result};
use parcelmark_core::models::{PolygonRecord, RecordId};

use crate::ports::RecordStore;

/// Insertion-ordered in-memory implementation of RecordStore.
///
/// Lookups are linear; a session holds a handful of hand-drawn polygons.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    records: Vec<PolygonRecord>,
}

impl MemoryRecordStore {
    /// Create a new in-memory record store
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }
}

impl RecordStore for MemoryRecordStore {
    fn insert(&mut self, record: PolygonRecord) -> Result<()> {
        if self.position(record.id()).is_some() {
            return Err(ParcelError::DuplicateId { id: record.id().to_string() });
        }
        self.records.push(record);
        Ok(())
    }

    fn remove(&mut self, id: RecordId) -> Option<PolygonRecord> {
        // Vec::remove keeps the remaining records in order
        self.position(id).map(|index| self.records.remove(index))
    }

    fn get(&self, id: RecordId) -> Option<&PolygonRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    fn records(&self) -> &[PolygonRecord] {
        &self.records
    }
}
