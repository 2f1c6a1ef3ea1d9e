//! Parcelmark Geocode - Location search port and adapters
//!
//! This crate defines the geocoding port, a Nominatim adapter, and the
//! lookup rules the search box relies on: blank queries never hit the
//! network, only the best match is used, and every failure becomes a
//! user notice instead of an error.

pub mod lookup;
pub mod nominatim;
pub mod ports;
pub mod sequencer;

// Re-export main types
pub use lookup::{GeocodeLookup, LookupOutcome, Notice};
pub use nominatim::NominatimGeocoder;
pub use ports::{Geocoder, Place};
pub use sequencer::{SearchSequencer, SearchTicket};
