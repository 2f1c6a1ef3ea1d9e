//! Geocoding port definitions

use async_trait::async_trait;
use parcelmark_core::error::Result;
use parcelmark_core::models::Coordinate;
use serde::{Deserialize, Serialize};

/// One geocoding match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub lat: f64,
    pub lon: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Place {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }
}

/// Port for free-text location search
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Search for a place by free text
    ///
    /// # Returns
    /// Matches ordered best first; an empty vector when nothing matched.
    /// Transport and decoding problems are `LookupFailed`.
    async fn search(&self, query: &str) -> Result<Vec<Place>>;

    /// Get the name/identifier of the geocoding backend
    fn provider_name(&self) -> &str;
}
