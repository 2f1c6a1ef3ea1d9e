//! Error types for Parcelmark

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParcelError {
    // Geometry errors
    #[error("Invalid geometry: {reason}")]
    InvalidGeometry { reason: String },

    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    // Record errors
    #[error("Record {id} is already stored")]
    DuplicateId { id: String },

    #[error("Draft not found: {id}")]
    DraftNotFound { id: String },

    // Geocoding errors
    #[error("Location lookup failed: {reason}")]
    LookupFailed { reason: String },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    #[error("Config file not found at {path}")]
    ConfigFileNotFound { path: PathBuf },
}

impl ParcelError {
    pub(crate) fn invalid_geometry(reason: impl Into<String>) -> Self {
        ParcelError::InvalidGeometry { reason: reason.into() }
    }

    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        ParcelError::InvalidArgument { reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, ParcelError>;
