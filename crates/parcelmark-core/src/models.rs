pub mod coordinate;
pub mod record;
pub mod view;

pub use coordinate::{Coordinate, GeoRing};
pub use record::{PolygonRecord, RecordId};
pub use view::MapView;
