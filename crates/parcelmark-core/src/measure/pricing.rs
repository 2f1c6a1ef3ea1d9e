use crate::error::{ParcelError, Result};

/// Placeholder business rule: `price = area * unit_price`.
///
/// The factor is injected so a real pricing model can replace it without
/// touching call sites.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceEstimator {
    unit_price: f64,
}

impl PriceEstimator {
    /// Currency units per square meter used when nothing is configured
    pub const DEFAULT_UNIT_PRICE: f64 = 0.5;

    pub fn new(unit_price: f64) -> Result<Self> {
        if !unit_price.is_finite() || unit_price <= 0.0 {
            return Err(ParcelError::invalid_argument(format!(
                "Unit price must be a finite positive number, got {}",
                unit_price
            )));
        }
        Ok(Self { unit_price })
    }

    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    pub fn estimate_price(&self, area_m2: f64) -> Result<f64> {
        if area_m2.is_nan() || area_m2 < 0.0 {
            return Err(ParcelError::invalid_argument(format!(
                "Area must be non-negative, got {}",
                area_m2
            )));
        }
        Ok(area_m2 * self.unit_price)
    }
}

impl Default for PriceEstimator {
    fn default() -> Self {
        Self { unit_price: Self::DEFAULT_UNIT_PRICE }
    }
}
