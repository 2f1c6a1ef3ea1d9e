use async_trait::async_trait;
use parcelmark_core::config::DEFAULT_GEOCODER_URL;
use parcelmark_core::error::{ParcelError, Result};
use serde::Deserialize;

use crate::ports::{Geocoder, Place};

/// Nominatim's usage policy requires an identifying User-Agent
const USER_AGENT: &str = concat!("parcelmark/", env!("CARGO_PKG_VERSION"));

/// OpenStreetMap Nominatim geocoder
pub struct NominatimGeocoder {
    /// Search endpoint (e.g., "https://nominatim.openstreetmap.org/search")
    base_url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl NominatimGeocoder {
    /// Create a new Nominatim geocoder
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build().map_err(|e| {
            ParcelError::ConfigInvalid {
                key: "geocoder_url".to_string(),
                reason: format!("Failed to build HTTP client: {}", e),
            }
        })?;

        Ok(Self { base_url: base_url.into(), client })
    }

    /// Create against the public OpenStreetMap instance
    pub fn public() -> Result<Self> {
        Self::new(DEFAULT_GEOCODER_URL)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn search_url(&self, query: &str) -> Result<reqwest::Url> {
        reqwest::Url::parse_with_params(&self.base_url, &[("format", "json"), ("q", query)])
            .map_err(|e| ParcelError::LookupFailed {
                reason: format!("Invalid geocoder URL '{}': {}", self.base_url, e),
            })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn search(&self, query: &str) -> Result<Vec<Place>> {
        let url = self.search_url(query)?;

        let response = self.client.get(url).send().await.map_err(|e| {
            ParcelError::LookupFailed { reason: format!("Failed to reach Nominatim: {}", e) }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ParcelError::LookupFailed {
                reason: format!("Nominatim API error ({}): {}", status, error_text),
            });
        }

        let body = response.text().await.map_err(|e| ParcelError::LookupFailed {
            reason: format!("Failed to read Nominatim response: {}", e),
        })?;

        parse_places(&body)
    }

    fn provider_name(&self) -> &str {
        "nominatim"
    }
}

/// One entry of a Nominatim `format=json` response.
/// Coordinates arrive as decimal strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

/// Decode a Nominatim JSON array into places, preserving rank order
pub fn parse_places(body: &str) -> Result<Vec<Place>> {
    let raw: Vec<NominatimPlace> = serde_json::from_str(body).map_err(|e| {
        ParcelError::LookupFailed { reason: format!("Failed to parse Nominatim response: {}", e) }
    })?;

    raw.into_iter()
        .map(|p| {
            let lat = parse_degrees(&p.lat, "lat")?;
            let lon = parse_degrees(&p.lon, "lon")?;
            let place = Place { lat, lon, display_name: p.display_name };
            place.coordinate().validate().map_err(|e| ParcelError::LookupFailed {
                reason: format!("Nominatim returned an out-of-range position: {}", e),
            })?;
            Ok(place)
        })
        .collect()
}

fn parse_degrees(value: &str, field: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParcelError::LookupFailed {
            reason: format!("Nominatim returned non-numeric {} '{}'", field, value),
        })
}
