use std::sync::Arc;

use serde::Serialize;

use crate::ports::{Geocoder, Place};

/// A transient, dismissible message for the search box
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn no_results() -> Self {
        Self {
            title: "No results found".to_string(),
            description: "Try searching for a different location".to_string(),
        }
    }

    pub fn search_failed() -> Self {
        Self {
            title: "Search failed".to_string(),
            description: "An error occurred while searching, please try again".to_string(),
        }
    }
}

/// Result of one location search. None of these are fatal.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// Blank query; nothing was sent
    Skipped,
    /// Best match
    Found(Place),
    /// The geocoder answered with zero matches
    NoMatch,
    /// Transport, status, or decoding failure
    Failed { reason: String },
}

impl LookupOutcome {
    /// Wire label for the outcome
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupOutcome::Skipped => "skipped",
            LookupOutcome::Found(_) => "found",
            LookupOutcome::NoMatch => "no_match",
            LookupOutcome::Failed { .. } => "failed",
        }
    }

    pub fn place(&self) -> Option<&Place> {
        match self {
            LookupOutcome::Found(place) => Some(place),
            _ => None,
        }
    }

    /// The notice to show the user, if any
    pub fn notice(&self) -> Option<Notice> {
        match self {
            LookupOutcome::NoMatch => Some(Notice::no_results()),
            LookupOutcome::Failed { .. } => Some(Notice::search_failed()),
            LookupOutcome::Skipped | LookupOutcome::Found(_) => None,
        }
    }
}

/// Search-box semantics on top of a geocoder
#[derive(Clone)]
pub struct GeocodeLookup {
    geocoder: Arc<dyn Geocoder>,
}

impl GeocodeLookup {
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self { geocoder }
    }

    pub fn provider_name(&self) -> &str {
        self.geocoder.provider_name()
    }

    /// Resolve free text to the best matching place.
    ///
    /// Never returns an error: failures are folded into the outcome.
    pub async fn lookup(&self, query: &str) -> LookupOutcome {
        let query = query.trim();
        if query.is_empty() {
            return LookupOutcome::Skipped;
        }

        match self.geocoder.search(query).await {
            Ok(places) => match places.into_iter().next() {
                Some(place) => {
                    tracing::info!(
                        query = %query,
                        lat = place.lat,
                        lon = place.lon,
                        provider = self.provider_name(),
                        "Location found"
                    );
                    LookupOutcome::Found(place)
                }
                None => {
                    tracing::info!(query = %query, "No location matched");
                    LookupOutcome::NoMatch
                }
            },
            Err(e) => {
                tracing::warn!(query = %query, error = %e, "Location lookup failed");
                LookupOutcome::Failed { reason: e.to_string() }
            }
        }
    }
}
