//! Geographic coordinates and the drawn polygon ring.
//!
//! Coordinates are kept in the order the map widget reports them,
//! latitude first. Conversion to the `geo` crate flips them into
//! x = longitude, y = latitude.

use serde::{Deserialize, Serialize};

use crate::error::{ParcelError, Result};

/// A WGS 84 position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Check that both components are finite and inside the WGS 84 ranges
    pub fn validate(&self) -> Result<()> {
        if !self.lat.is_finite() || !self.lon.is_finite() {
            return Err(ParcelError::invalid_geometry(format!(
                "Coordinate ({}, {}) must be finite",
                self.lat, self.lon
            )));
        }
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(ParcelError::invalid_geometry(format!(
                "Latitude {} is outside [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lon) {
            return Err(ParcelError::invalid_geometry(format!(
                "Longitude {} is outside [-180, 180]",
                self.lon
            )));
        }
        Ok(())
    }
}

impl From<[f64; 2]> for Coordinate {
    /// `[lat, lon]`, the pair order the drawing event carries
    fn from(pair: [f64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self::new(lat, lon)
    }
}

/// Closed boundary of one drawn polygon.
///
/// The ring is stored open: the last vertex implicitly connects back to the
/// first. A ring always holds at least [`GeoRing::MIN_VERTICES`] valid
/// coordinates; there is no way to build or mutate one that doesn't.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GeoRing {
    vertices: Vec<Coordinate>,
}

impl GeoRing {
    pub const MIN_VERTICES: usize = 3;

    /// Build a ring from drawn vertices.
    ///
    /// A repeated closing vertex (first == last) is dropped.
    pub fn new(vertices: Vec<Coordinate>) -> Result<Self> {
        let mut vertices = vertices;
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }

        if vertices.len() < Self::MIN_VERTICES {
            return Err(ParcelError::invalid_geometry(format!(
                "Polygon ring must have at least {} vertices, found {}",
                Self::MIN_VERTICES,
                vertices.len()
            )));
        }

        for vertex in &vertices {
            vertex.validate()?;
        }

        Ok(Self { vertices })
    }

    /// Build a ring from `[lat, lon]` pairs
    pub fn from_pairs(pairs: &[[f64; 2]]) -> Result<Self> {
        Self::new(pairs.iter().copied().map(Coordinate::from).collect())
    }

    pub fn vertices(&self) -> &[Coordinate] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always false; kept alongside `len` for clippy
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Convert to a `geo` polygon (x = lon, y = lat). `geo` closes the ring.
    pub fn to_geo_polygon(&self) -> geo::Polygon<f64> {
        let exterior: Vec<(f64, f64)> = self.vertices.iter().map(|c| (c.lon, c.lat)).collect();
        geo::Polygon::new(geo::LineString::from(exterior), vec![])
    }

    /// GeoJSON ring positions (`[lon, lat]`), explicitly closed
    pub fn to_geojson_ring(&self) -> Vec<Vec<f64>> {
        let mut ring: Vec<Vec<f64>> = self.vertices.iter().map(|c| vec![c.lon, c.lat]).collect();
        if let Some(first) = ring.first().cloned() {
            ring.push(first);
        }
        ring
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<[f64; 2]> {
        vec![[31.70, 35.20], [31.70, 35.21], [31.71, 35.21], [31.71, 35.20]]
    }

    #[test]
    fn test_ring_from_pairs() {
        let ring = GeoRing::from_pairs(&square()).unwrap();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring.vertices()[1], Coordinate::new(31.70, 35.21));
    }

    #[test]
    fn test_ring_drops_closing_vertex() {
        let mut pairs = square();
        pairs.push(pairs[0]);
        let ring = GeoRing::from_pairs(&pairs).unwrap();
        assert_eq!(ring.len(), 4);
    }

    #[test]
    fn test_ring_rejects_too_few_vertices() {
        let err = GeoRing::from_pairs(&[[0.0, 0.0], [0.0, 1.0]]).unwrap_err();
        assert!(matches!(err, ParcelError::InvalidGeometry { .. }));

        // Three points where the last closes the ring is only two distinct vertices
        let err = GeoRing::from_pairs(&[[0.0, 0.0], [0.0, 1.0], [0.0, 0.0]]).unwrap_err();
        assert!(matches!(err, ParcelError::InvalidGeometry { .. }));
    }

    #[test]
    fn test_ring_rejects_out_of_range() {
        let err = GeoRing::from_pairs(&[[95.0, 0.0], [0.0, 1.0], [1.0, 1.0]]).unwrap_err();
        assert!(err.to_string().contains("Latitude"));

        let err = GeoRing::from_pairs(&[[0.0, 0.0], [0.0, 181.0], [1.0, 1.0]]).unwrap_err();
        assert!(err.to_string().contains("Longitude"));

        let err = GeoRing::from_pairs(&[[f64::NAN, 0.0], [0.0, 1.0], [1.0, 1.0]]).unwrap_err();
        assert!(err.to_string().contains("finite"));
    }

    #[test]
    fn test_geo_polygon_axis_order() {
        let ring = GeoRing::from_pairs(&square()).unwrap();
        let polygon = ring.to_geo_polygon();
        let first = polygon.exterior().0[0];
        assert_eq!(first.x, 35.20);
        assert_eq!(first.y, 31.70);
        // geo closes the exterior
        assert_eq!(polygon.exterior().0.len(), 5);
    }

    #[test]
    fn test_geojson_ring_is_closed() {
        let ring = GeoRing::from_pairs(&square()).unwrap();
        let positions = ring.to_geojson_ring();
        assert_eq!(positions.len(), 5);
        assert_eq!(positions.first(), positions.last());
        assert_eq!(positions[0], vec![35.20, 31.70]);
    }
}
