use crate::error::{ParcelError, Result};
use crate::measure::area::parse_area_model;
use crate::measure::{AreaCalculator, AreaModel, PriceEstimator, Surveyor};
use crate::models::{Coordinate, MapView};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_TILE_URL: &str = "https://{s}.google.com/vt/lyrs=s&x={x}&y={y}&z={z}";

/// Layered configuration for a map session
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub unit_price: ConfigValue<f64>,
    pub area_model: ConfigValue<AreaModel>,
    pub name_prefix: ConfigValue<String>,
    pub geocoder_url: ConfigValue<String>,
    pub search_zoom: ConfigValue<u8>,
    pub initial_center: ConfigValue<Coordinate>,
    pub initial_zoom: ConfigValue<u8>,
    pub tile_url: ConfigValue<String>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            unit_price: ConfigValue::new(PriceEstimator::DEFAULT_UNIT_PRICE, ConfigSource::Default),
            area_model: ConfigValue::new(AreaModel::Spherical, ConfigSource::Default),
            name_prefix: ConfigValue::new("Polygon".to_string(), ConfigSource::Default),
            geocoder_url: ConfigValue::new(DEFAULT_GEOCODER_URL.to_string(), ConfigSource::Default),
            search_zoom: ConfigValue::new(16, ConfigSource::Default),
            initial_center: ConfigValue::new(
                Coordinate::new(31.7683, 35.2137),
                ConfigSource::Default,
            ),
            initial_zoom: ConfigValue::new(8, ConfigSource::Default),
            tile_url: ConfigValue::new(DEFAULT_TILE_URL.to_string(), ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ParcelError::ConfigFileNotFound { path: path.to_path_buf() });
        }

        let content = fs::read_to_string(path).map_err(|e| ParcelError::ConfigInvalid {
            key: "file".to_string(),
            reason: format!("Failed to read config file: {}", e),
        })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| ParcelError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(unit_price) = file_config.unit_price {
            self.unit_price.update(unit_price, ConfigSource::File);
        }

        if let Some(area_model) = file_config.area_model {
            self.area_model.update(parse_area_model(&area_model)?, ConfigSource::File);
        }

        if let Some(name_prefix) = file_config.name_prefix {
            self.name_prefix.update(name_prefix, ConfigSource::File);
        }

        if let Some(geocoder_url) = file_config.geocoder_url {
            self.geocoder_url.update(geocoder_url, ConfigSource::File);
        }

        if let Some(search_zoom) = file_config.search_zoom {
            self.search_zoom.update(search_zoom, ConfigSource::File);
        }

        if let Some([lat, lon]) = file_config.initial_center {
            self.initial_center.update(Coordinate::new(lat, lon), ConfigSource::File);
        }

        if let Some(initial_zoom) = file_config.initial_zoom {
            self.initial_zoom.update(initial_zoom, ConfigSource::File);
        }

        if let Some(tile_url) = file_config.tile_url {
            self.tile_url.update(tile_url, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // PARCELMARK_UNIT_PRICE
        if let Ok(price_str) = env::var("PARCELMARK_UNIT_PRICE") {
            match price_str.parse::<f64>() {
                Ok(price) => self.unit_price.update(price, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid PARCELMARK_UNIT_PRICE value '{}': expected a number",
                    price_str
                ),
            }
        }

        // PARCELMARK_AREA_MODEL
        if let Ok(model_str) = env::var("PARCELMARK_AREA_MODEL") {
            match parse_area_model(&model_str) {
                Ok(model) => self.area_model.update(model, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid PARCELMARK_AREA_MODEL value '{}': expected spherical or ellipsoidal",
                    model_str
                ),
            }
        }

        // PARCELMARK_NAME_PREFIX
        if let Ok(prefix) = env::var("PARCELMARK_NAME_PREFIX") {
            self.name_prefix.update(prefix, ConfigSource::Environment);
        }

        // PARCELMARK_GEOCODER_URL
        if let Ok(url) = env::var("PARCELMARK_GEOCODER_URL") {
            self.geocoder_url.update(url, ConfigSource::Environment);
        }

        // PARCELMARK_SEARCH_ZOOM
        if let Ok(zoom_str) = env::var("PARCELMARK_SEARCH_ZOOM") {
            match zoom_str.parse::<u8>() {
                Ok(zoom) => self.search_zoom.update(zoom, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid PARCELMARK_SEARCH_ZOOM value '{}': expected zoom level 0-20",
                    zoom_str
                ),
            }
        }

        // PARCELMARK_INITIAL_CENTER
        if let Ok(center_str) = env::var("PARCELMARK_INITIAL_CENTER") {
            match parse_center(&center_str) {
                Ok(center) => self.initial_center.update(center, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid PARCELMARK_INITIAL_CENTER value '{}': expected 'lat,lon'",
                    center_str
                ),
            }
        }

        // PARCELMARK_INITIAL_ZOOM
        if let Ok(zoom_str) = env::var("PARCELMARK_INITIAL_ZOOM") {
            match zoom_str.parse::<u8>() {
                Ok(zoom) => self.initial_zoom.update(zoom, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid PARCELMARK_INITIAL_ZOOM value '{}': expected zoom level 0-20",
                    zoom_str
                ),
            }
        }

        // PARCELMARK_TILE_URL
        if let Ok(url) = env::var("PARCELMARK_TILE_URL") {
            self.tile_url.update(url, ConfigSource::Environment);
        }

        self
    }

    /// Check cross-field constraints after all layers are applied
    pub fn validate(&self) -> Result<()> {
        PriceEstimator::new(self.unit_price.value).map_err(|e| ParcelError::ConfigInvalid {
            key: "unit_price".to_string(),
            reason: e.to_string(),
        })?;

        for (key, zoom) in [
            ("search_zoom", self.search_zoom.value),
            ("initial_zoom", self.initial_zoom.value),
        ] {
            if zoom > MapView::MAX_ZOOM {
                return Err(ParcelError::ConfigInvalid {
                    key: key.to_string(),
                    reason: format!("Zoom {} exceeds maximum {}", zoom, MapView::MAX_ZOOM),
                });
            }
        }

        self.initial_center.value.validate().map_err(|e| ParcelError::ConfigInvalid {
            key: "initial_center".to_string(),
            reason: e.to_string(),
        })?;

        if self.geocoder_url.value.trim().is_empty() {
            return Err(ParcelError::ConfigMissing { key: "geocoder_url".to_string() });
        }

        Ok(())
    }

    /// Area and price pipeline for the configured model and unit price
    pub fn surveyor(&self) -> Result<Surveyor> {
        Ok(Surveyor::new(
            AreaCalculator::new(self.area_model.value),
            PriceEstimator::new(self.unit_price.value)?,
        ))
    }

    pub fn initial_view(&self) -> MapView {
        MapView::new(self.initial_center.value, self.initial_zoom.value)
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "unit_price".to_string(),
            (self.unit_price.value.to_string(), self.unit_price.source),
        );
        map.insert(
            "area_model".to_string(),
            (format!("{:?}", self.area_model.value), self.area_model.source),
        );
        map.insert(
            "name_prefix".to_string(),
            (self.name_prefix.value.clone(), self.name_prefix.source),
        );
        map.insert(
            "geocoder_url".to_string(),
            (self.geocoder_url.value.clone(), self.geocoder_url.source),
        );
        map.insert(
            "search_zoom".to_string(),
            (self.search_zoom.value.to_string(), self.search_zoom.source),
        );
        let center = self.initial_center.value;
        map.insert(
            "initial_center".to_string(),
            (format!("{},{}", center.lat, center.lon), self.initial_center.source),
        );
        map.insert(
            "initial_zoom".to_string(),
            (self.initial_zoom.value.to_string(), self.initial_zoom.source),
        );
        map.insert("tile_url".to_string(), (self.tile_url.value.clone(), self.tile_url.source));

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    unit_price: Option<f64>,
    area_model: Option<String>,
    name_prefix: Option<String>,
    geocoder_url: Option<String>,
    search_zoom: Option<u8>,
    initial_center: Option<[f64; 2]>,
    initial_zoom: Option<u8>,
    tile_url: Option<String>,
}

/// Parse a "lat,lon" pair
pub fn parse_center(s: &str) -> Result<Coordinate> {
    let invalid = || ParcelError::ConfigInvalid {
        key: "initial_center".to_string(),
        reason: format!("Invalid center: {}. Use 'lat,lon'", s),
    };

    let (lat, lon) = s.split_once(',').ok_or_else(invalid)?;
    let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
    let lon: f64 = lon.trim().parse().map_err(|_| invalid())?;

    let center = Coordinate::new(lat, lon);
    center.validate().map_err(|_| invalid())?;
    Ok(center)
}
