use geo::{ChamberlainDuquetteArea, GeodesicArea};
use serde::{Deserialize, Serialize};

use crate::error::{ParcelError, Result};
use crate::models::{Coordinate, GeoRing};

/// Earth model used for area computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AreaModel {
    /// Chamberlain-Duquette spherical excess on a 6 378 137 m sphere.
    /// Matches the area the map's drawing tool displays.
    #[default]
    Spherical,
    /// Karney's geodesic area on the WGS 84 ellipsoid
    Ellipsoidal,
}

/// Geodesic area of a drawn ring, in square meters
#[derive(Debug, Clone, Copy, Default)]
pub struct AreaCalculator {
    model: AreaModel,
}

impl AreaCalculator {
    pub fn new(model: AreaModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> AreaModel {
        self.model
    }

    /// Unsigned area enclosed by the ring. Winding order does not matter.
    pub fn compute_area(&self, ring: &GeoRing) -> f64 {
        let polygon = ring.to_geo_polygon();
        match self.model {
            AreaModel::Spherical => polygon.chamberlain_duquette_unsigned_area(),
            AreaModel::Ellipsoidal => polygon.geodesic_area_unsigned(),
        }
    }

    /// Validate raw vertices as a ring and compute its area
    pub fn compute_area_of(&self, vertices: &[Coordinate]) -> Result<f64> {
        let ring = GeoRing::new(vertices.to_vec())?;
        Ok(self.compute_area(&ring))
    }
}

/// Parse area model from string
pub fn parse_area_model(s: &str) -> Result<AreaModel> {
    match s.to_lowercase().as_str() {
        "spherical" | "sphere" => Ok(AreaModel::Spherical),
        "ellipsoidal" | "ellipsoid" | "wgs84" => Ok(AreaModel::Ellipsoidal),
        _ => Err(ParcelError::ConfigInvalid {
            key: "area_model".to_string(),
            reason: format!("Invalid area model: {}. Use spherical or ellipsoidal", s),
        }),
    }
}
