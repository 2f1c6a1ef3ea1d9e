//! Area and price derivation for drawn rings.
//!
//! A [`Survey`] bundles a ring with the area and price computed from it.
//! Its fields are private and only a [`Surveyor`] can produce one, so a
//! survey never carries values that disagree with its own geometry.

pub mod area;
pub mod pricing;

pub use area::{AreaCalculator, AreaModel};
pub use pricing::PriceEstimator;

use serde::Serialize;

use crate::error::Result;
use crate::models::GeoRing;

/// Square meters per hectare
pub const SQUARE_METERS_PER_HECTARE: f64 = 10_000.0;

/// Square meters per dunam (metric dunam)
pub const SQUARE_METERS_PER_DUNAM: f64 = 1_000.0;

/// Measurement pipeline: ring -> area -> price
#[derive(Debug, Clone, Copy, Default)]
pub struct Surveyor {
    area: AreaCalculator,
    pricing: PriceEstimator,
}

impl Surveyor {
    pub fn new(area: AreaCalculator, pricing: PriceEstimator) -> Self {
        Self { area, pricing }
    }

    pub fn area_calculator(&self) -> &AreaCalculator {
        &self.area
    }

    pub fn price_estimator(&self) -> &PriceEstimator {
        &self.pricing
    }

    /// Measure a ring. Takes ownership so the survey holds its own copy.
    pub fn survey(&self, ring: GeoRing) -> Result<Survey> {
        let area_m2 = self.area.compute_area(&ring);
        let estimated_price = self.pricing.estimate_price(area_m2)?;

        tracing::debug!(
            vertices = ring.len(),
            area_m2 = area_m2,
            estimated_price = estimated_price,
            "Surveyed ring"
        );

        Ok(Survey { ring, area_m2, estimated_price })
    }
}

/// A ring together with its derived area and price
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Survey {
    ring: GeoRing,
    area_m2: f64,
    estimated_price: f64,
}

impl Survey {
    pub fn ring(&self) -> &GeoRing {
        &self.ring
    }

    pub fn area_m2(&self) -> f64 {
        self.area_m2
    }

    pub fn estimated_price(&self) -> f64 {
        self.estimated_price
    }

    pub fn area_hectares(&self) -> f64 {
        self.area_m2 / SQUARE_METERS_PER_HECTARE
    }

    pub fn area_dunams(&self) -> f64 {
        self.area_m2 / SQUARE_METERS_PER_DUNAM
    }
}
