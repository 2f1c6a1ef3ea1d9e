use std::sync::Arc;

use parcelmark_core::config::LayeredConfig;
use parcelmark_core::error::Result;
use parcelmark_geocode::{GeocodeLookup, Geocoder};
use parcelmark_store::{MemoryRecordStore, PolygonStore};
use tokio::sync::Mutex;

use crate::session::Session;

/// Fixed map presentation settings
#[derive(Debug, Clone)]
pub struct ViewSettings {
    pub search_zoom: u8,
    pub tile_url: String,
}

pub struct AppState {
    pub session: Mutex<Session>,
    pub lookup: GeocodeLookup,
    pub view_settings: ViewSettings,
    pub config: LayeredConfig,
}

impl AppState {
    pub fn new(session: Session, lookup: GeocodeLookup, config: LayeredConfig) -> Self {
        let view_settings = ViewSettings {
            search_zoom: config.search_zoom.value,
            tile_url: config.tile_url.value.clone(),
        };
        Self { session: Mutex::new(session), lookup, view_settings, config }
    }

    /// Build the session and lookup described by a validated configuration
    pub fn from_config(config: LayeredConfig, geocoder: Arc<dyn Geocoder>) -> Result<Self> {
        config.validate()?;

        let store = PolygonStore::with_store(
            MemoryRecordStore::new(),
            config.surveyor()?,
            config.name_prefix.value.clone(),
        );
        let session = Session::new(store, config.initial_view());

        Ok(Self::new(session, GeocodeLookup::new(geocoder), config))
    }
}
