//! Parcelmark Core - Domain models, measurement, and configuration
//!
//! This crate holds the pure parts of a map annotation session: the ring a
//! user draws, how its area and price are derived, and the record that ends
//! up in the saved list.

pub mod config;
pub mod error;
pub mod measure;
pub mod models;

pub use error::{ParcelError, Result};
