//! One user's map session: the polygon store, the draft awaiting a
//! decision, the current map view, and the search sequencer.
//!
//! Every event runs to completion against `&mut Session`; the server keeps
//! a single instance behind a mutex.

use parcelmark_core::error::{ParcelError, Result};
use parcelmark_core::models::{GeoRing, MapView, PolygonRecord, RecordId};
use parcelmark_geocode::{LookupOutcome, SearchSequencer, SearchTicket};
use parcelmark_store::PolygonStore;

#[derive(Debug)]
pub struct Session {
    store: PolygonStore,
    /// At most one draft is open; a new drawing replaces it
    draft: Option<PolygonRecord>,
    view: MapView,
    search: SearchSequencer,
}

impl Session {
    pub fn new(store: PolygonStore, view: MapView) -> Self {
        Self { store, draft: None, view, search: SearchSequencer::new() }
    }

    pub fn store(&self) -> &PolygonStore {
        &self.store
    }

    pub fn view(&self) -> MapView {
        self.view
    }

    /// A drawing finished: survey the ring and open it as the draft.
    ///
    /// An open draft that was never saved is discarded.
    pub fn ring_completed(&mut self, ring: GeoRing) -> Result<&PolygonRecord> {
        let draft = self.store.create_draft(ring)?;

        if let Some(previous) = self.draft.take() {
            tracing::info!(
                id = %previous.id(),
                name = %previous.name(),
                "Discarded unsaved draft, replaced by new drawing"
            );
        }

        Ok(self.draft.insert(draft))
    }

    pub fn draft(&self, id: RecordId) -> Result<&PolygonRecord> {
        self.draft
            .as_ref()
            .filter(|draft| draft.id() == id)
            .ok_or_else(|| ParcelError::DraftNotFound { id: id.to_string() })
    }

    pub fn pending_drafts(&self) -> usize {
        usize::from(self.draft.is_some())
    }

    pub fn rename_draft(&mut self, id: RecordId, name: &str) -> Result<&PolygonRecord> {
        let name = validate_name(name)?;
        let draft = self
            .draft
            .as_mut()
            .filter(|draft| draft.id() == id)
            .ok_or_else(|| ParcelError::DraftNotFound { id: id.to_string() })?;
        draft.rename(name);
        Ok(draft)
    }

    /// Confirm the draft, optionally renaming it first, and move it into the store
    pub fn save_draft(&mut self, id: RecordId, name: Option<&str>) -> Result<&PolygonRecord> {
        let name = name.map(validate_name).transpose()?;
        let mut draft = self.take_draft(id)?;

        if let Some(name) = name {
            draft.rename(name);
        }

        self.store.commit(draft)?;
        self.store
            .get(id)
            .ok_or_else(|| ParcelError::DraftNotFound { id: id.to_string() })
    }

    /// Drop the draft without storing it
    pub fn discard_draft(&mut self, id: RecordId) -> Result<PolygonRecord> {
        let draft = self.take_draft(id)?;
        tracing::info!(id = %id, name = %draft.name(), "Discarded polygon draft");
        Ok(draft)
    }

    fn take_draft(&mut self, id: RecordId) -> Result<PolygonRecord> {
        match self.draft.take() {
            Some(draft) if draft.id() == id => Ok(draft),
            other => {
                self.draft = other;
                Err(ParcelError::DraftNotFound { id: id.to_string() })
            }
        }
    }

    /// Delete a stored polygon; unknown ids are ignored
    pub fn remove(&mut self, id: RecordId) -> bool {
        self.store.remove(id)
    }

    pub fn list(&self) -> &[PolygonRecord] {
        self.store.list()
    }

    /// Reserve a sequence number for an outgoing search
    pub fn begin_search(&mut self) -> SearchTicket {
        self.search.issue()
    }

    /// Apply a search result if it belongs to the newest search.
    ///
    /// Returns false when a newer search was issued after `ticket`; the
    /// view is left alone in that case.
    pub fn finish_search(
        &mut self,
        ticket: SearchTicket,
        outcome: &LookupOutcome,
        zoom: u8,
    ) -> bool {
        if !self.search.is_latest(ticket) {
            tracing::debug!(ticket = ?ticket, "Dropping stale search response");
            return false;
        }

        if let Some(place) = outcome.place() {
            self.view.recenter(place.coordinate(), zoom);
            tracing::info!(lat = place.lat, lon = place.lon, zoom = zoom, "Map recentered");
        }
        true
    }
}

fn validate_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ParcelError::InvalidArgument { reason: "Name must not be blank".to_string() });
    }
    Ok(trimmed)
}
