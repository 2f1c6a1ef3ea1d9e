use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Where the map is looking
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: u8,
}

impl MapView {
    /// Highest zoom level the satellite tile source serves
    pub const MAX_ZOOM: u8 = 20;

    pub fn new(center: Coordinate, zoom: u8) -> Self {
        Self { center, zoom: zoom.min(Self::MAX_ZOOM) }
    }

    /// Center on a point at a fixed zoom level
    pub fn recenter(&mut self, center: Coordinate, zoom: u8) {
        self.center = center;
        self.zoom = zoom.min(Self::MAX_ZOOM);
    }
}
