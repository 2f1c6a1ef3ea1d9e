use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use parcelmark_core::config::{ConfigSource, LayeredConfig};
use parcelmark_core::models::{Coordinate, MapView, PolygonRecord};
use parcelmark_geocode::{LookupOutcome, Notice};
use serde::Serialize;

/// Lifecycle stage of a record as seen by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    Draft,
    Stored,
}

/// Polygon record response
#[derive(Debug, Serialize)]
pub struct RecordResponse {
    pub id: String,
    pub status: RecordStatus,
    pub name: String,
    /// `[lat, lon]` pairs, open ring
    pub vertices: Vec<[f64; 2]>,
    pub area_m2: f64,
    pub area_hectares: f64,
    pub area_dunams: f64,
    pub estimated_price: f64,
    pub created_at: DateTime<Utc>,
}

impl RecordResponse {
    pub fn new(record: &PolygonRecord, status: RecordStatus) -> Self {
        Self {
            id: record.id().to_string(),
            status,
            name: record.name().to_string(),
            vertices: record.vertices().vertices().iter().map(|c| [c.lat, c.lon]).collect(),
            area_m2: record.area_m2(),
            area_hectares: record.area_hectares(),
            area_dunams: record.area_dunams(),
            estimated_price: record.estimated_price(),
            created_at: record.created_at(),
        }
    }

    pub fn draft(record: &PolygonRecord) -> Self {
        Self::new(record, RecordStatus::Draft)
    }

    pub fn stored(record: &PolygonRecord) -> Self {
        Self::new(record, RecordStatus::Stored)
    }
}

/// Delete operation response
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    /// False when the id was not stored; deleting is idempotent
    pub removed: bool,
    pub message: String,
}

impl DeleteResponse {
    pub fn new(entity: &str, id: &str, removed: bool) -> Self {
        let message = if removed {
            format!("Successfully deleted {} {}", entity, id)
        } else {
            format!("No {} {} to delete", entity, id)
        };
        Self { success: true, removed, message }
    }
}

/// Drone dispatch acknowledgement
#[derive(Debug, Serialize)]
pub struct DispatchResponse {
    pub success: bool,
    pub message: String,
}

impl DispatchResponse {
    pub fn sent(name: &str) -> Self {
        Self { success: true, message: format!("{} was sent to the drone operator", name) }
    }
}

/// Location search response
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub outcome: &'static str,
    /// True when a newer search superseded this one; nothing was applied
    pub stale: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<Coordinate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

impl SearchResponse {
    pub fn new(outcome: &LookupOutcome, applied: bool, zoom: u8) -> Self {
        if !applied {
            return Self {
                outcome: outcome.as_str(),
                stale: true,
                center: None,
                zoom: None,
                display_name: None,
                notice: None,
            };
        }

        let place = outcome.place();
        Self {
            outcome: outcome.as_str(),
            stale: false,
            center: place.map(|p| p.coordinate()),
            zoom: place.map(|_| zoom),
            display_name: place.and_then(|p| p.display_name.clone()),
            notice: outcome.notice(),
        }
    }
}

/// Map view response
#[derive(Debug, Serialize)]
pub struct ViewResponse {
    pub center: Coordinate,
    pub zoom: u8,
    pub max_zoom: u8,
    pub search_zoom: u8,
    pub tile_url: String,
}

impl ViewResponse {
    pub fn new(view: MapView, search_zoom: u8, tile_url: &str) -> Self {
        Self {
            center: view.center,
            zoom: view.zoom,
            max_zoom: MapView::MAX_ZOOM,
            search_zoom,
            tile_url: tile_url.to_string(),
        }
    }
}

/// One effective configuration value
#[derive(Debug, Serialize)]
pub struct ConfigEntry {
    pub value: String,
    pub source: ConfigSource,
}

/// Effective configuration, keyed by setting name
#[derive(Debug, Serialize)]
pub struct ConfigResponse(pub BTreeMap<String, ConfigEntry>);

impl From<&LayeredConfig> for ConfigResponse {
    fn from(config: &LayeredConfig) -> Self {
        Self(
            config
                .to_inspection_map()
                .into_iter()
                .map(|(key, (value, source))| (key, ConfigEntry { value, source }))
                .collect(),
        )
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self { status: "ok", service: "parcelmark-api" }
    }
}
