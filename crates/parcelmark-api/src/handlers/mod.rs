mod drafts;
mod health;
mod map;
mod polygons;

pub use drafts::{
    commit_draft, create_draft, discard_draft, dispatch_draft, get_draft, rename_draft,
};
pub use health::health_check;
pub use map::{get_config, get_view, search_location};
pub use polygons::{delete_polygon, export_geojson, list_polygons};

use parcelmark_core::models::RecordId;

use crate::error::ApiError;

fn parse_record_id(raw: &str) -> Result<RecordId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request("Invalid polygon ID format").with_details(raw.to_string()))
}
