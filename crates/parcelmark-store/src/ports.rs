use parcelmark_core::error::Result;
use parcelmark_core::models::{PolygonRecord, RecordId};

/// Port for committed polygon records
pub trait RecordStore: Send + Sync {
    /// Append a record. Fails with `DuplicateId` if the id is already stored.
    fn insert(&mut self, record: PolygonRecord) -> Result<()>;

    /// Remove a record by id, returning it if it was present
    fn remove(&mut self, id: RecordId) -> Option<PolygonRecord>;

    /// Get a record by id
    fn get(&self, id: RecordId) -> Option<&PolygonRecord>;

    /// All records in insertion order
    fn records(&self) -> &[PolygonRecord];

    fn len(&self) -> usize {
        self.records().len()
    }

    fn is_empty(&self) -> bool {
        self.records().is_empty()
    }
}
