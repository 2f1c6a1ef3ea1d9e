//! The session's polygon store: draft factory plus committed records.
//!
//! Record lifecycle:
//!
//! ```text
//! create_draft --> Draft --commit--> Stored --remove--> Deleted
//!                    |
//!                    +--(dropped)--> Discarded
//! ```
//!
//! A draft is an ordinary owned [`PolygonRecord`] that the store does not
//! hold yet. Dropping it is the discard path.

use chrono::Utc;
use geojson::FeatureCollection;
use parcelmark_core::error::Result;
use parcelmark_core::measure::Surveyor;
use parcelmark_core::models::{GeoRing, PolygonRecord, RecordId};

use crate::memory::MemoryRecordStore;
use crate::ports::RecordStore;

pub const DEFAULT_NAME_PREFIX: &str = "Polygon";

/// Ordered collection of committed polygons for one session
#[derive(Debug, Clone)]
pub struct PolygonStore<S = MemoryRecordStore> {
    records: S,
    surveyor: Surveyor,
    name_prefix: String,
    /// Drafts ever created; never decremented, so default names never repeat
    drafts_created: u64,
}

impl PolygonStore<MemoryRecordStore> {
    /// Create an in-memory store with the default name prefix
    pub fn new(surveyor: Surveyor) -> Self {
        Self::with_store(MemoryRecordStore::new(), surveyor, DEFAULT_NAME_PREFIX)
    }
}

impl<S: RecordStore> PolygonStore<S> {
    pub fn with_store(records: S, surveyor: Surveyor, name_prefix: impl Into<String>) -> Self {
        Self { records, surveyor, name_prefix: name_prefix.into(), drafts_created: 0 }
    }

    pub fn surveyor(&self) -> &Surveyor {
        &self.surveyor
    }

    /// Turn a completed ring into an unsaved, named draft.
    ///
    /// The draft is not inserted; pass it to [`commit`](Self::commit) once
    /// the user confirms. The sequence counter only advances when the
    /// survey succeeds.
    pub fn create_draft(&mut self, ring: GeoRing) -> Result<PolygonRecord> {
        let survey = self.surveyor.survey(ring)?;

        self.drafts_created += 1;
        let name = format!("{} {}", self.name_prefix, self.drafts_created);
        let draft = PolygonRecord::new(RecordId::generate(), survey, Utc::now(), name);

        tracing::info!(
            id = %draft.id(),
            name = %draft.name(),
            area_m2 = draft.area_m2(),
            estimated_price = draft.estimated_price(),
            "Created polygon draft"
        );

        Ok(draft)
    }

    /// Store a confirmed draft
    pub fn commit(&mut self, record: PolygonRecord) -> Result<()> {
        let id = record.id();
        self.records.insert(record).inspect_err(|e| {
            tracing::error!(id = %id, error = %e, "Rejected polygon commit");
        })?;

        tracing::info!(id = %id, count = self.records.len(), "Committed polygon");
        Ok(())
    }

    /// Remove a stored record. Unknown ids are a no-op; returns whether
    /// anything was removed.
    pub fn remove(&mut self, id: RecordId) -> bool {
        match self.records.remove(id) {
            Some(record) => {
                tracing::info!(id = %id, name = %record.name(), "Removed polygon");
                true
            }
            None => {
                tracing::debug!(id = %id, "Remove ignored, polygon not stored");
                false
            }
        }
    }

    /// Stored records in insertion order
    pub fn list(&self) -> &[PolygonRecord] {
        self.records.records()
    }

    pub fn get(&self, id: RecordId) -> Option<&PolygonRecord> {
        self.records.get(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of drafts ever created in this session
    pub fn drafts_created(&self) -> u64 {
        self.drafts_created
    }

    /// Export stored records as a GeoJSON FeatureCollection
    pub fn to_feature_collection(&self) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: self.list().iter().map(PolygonRecord::to_feature).collect(),
            foreign_members: None,
        }
    }
}
