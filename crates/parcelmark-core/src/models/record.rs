use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use geojson::{Feature, Geometry, JsonObject, Value};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::GeoRing;
use crate::error::ParcelError;
use crate::measure::Survey;

/// Unique identifier for a polygon record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Fresh random id. v4 ids are not reused within a session.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for RecordId {
    type Err = ParcelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self).map_err(|e| ParcelError::InvalidArgument {
            reason: format!("Invalid record id '{}': {}", s, e),
        })
    }
}

/// A named, priced polygon.
///
/// Born as a draft when a drawing completes; only the name can change
/// after that. Geometry and derived values come from a single [`Survey`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolygonRecord {
    id: RecordId,
    #[serde(flatten)]
    survey: Survey,
    created_at: DateTime<Utc>,
    name: String,
}

impl PolygonRecord {
    pub fn new(
        id: RecordId,
        survey: Survey,
        created_at: DateTime<Utc>,
        name: impl Into<String>,
    ) -> Self {
        Self { id, survey, created_at, name: name.into() }
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn vertices(&self) -> &GeoRing {
        self.survey.ring()
    }

    pub fn area_m2(&self) -> f64 {
        self.survey.area_m2()
    }

    pub fn area_hectares(&self) -> f64 {
        self.survey.area_hectares()
    }

    pub fn area_dunams(&self) -> f64 {
        self.survey.area_dunams()
    }

    pub fn estimated_price(&self) -> f64 {
        self.survey.estimated_price()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename. Stored records are only reachable through shared
    /// references, so this is a draft-only operation in practice.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// GeoJSON feature with the boundary in lon/lat order
    pub fn to_feature(&self) -> Feature {
        let geometry = Geometry::new(Value::Polygon(vec![self.vertices().to_geojson_ring()]));

        let mut properties = JsonObject::new();
        properties.insert("id".to_string(), self.id.to_string().into());
        properties.insert("name".to_string(), self.name.clone().into());
        properties.insert("area_m2".to_string(), self.area_m2().into());
        properties.insert("estimated_price".to_string(), self.estimated_price().into());
        properties.insert("created_at".to_string(), self.created_at.to_rfc3339().into());

        Feature {
            bbox: None,
            geometry: Some(geometry),
            id: Some(geojson::feature::Id::String(self.id.to_string())),
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::Surveyor;

    fn record(name: &str) -> PolygonRecord {
        let ring = GeoRing::from_pairs(&[[0.0, 0.0], [0.0, 0.001], [0.001, 0.001]]).unwrap();
        let survey = Surveyor::default().survey(ring).unwrap();
        PolygonRecord::new(RecordId::generate(), survey, Utc::now(), name)
    }

    #[test]
    fn test_record_id_round_trip() {
        let id = RecordId::generate();
        let parsed: RecordId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
        assert!("not-a-uuid".parse::<RecordId>().is_err());
    }

    #[test]
    fn test_rename_keeps_derived_values() {
        let mut rec = record("Polygon 1");
        let area = rec.area_m2();
        rec.rename("North field");
        assert_eq!(rec.name(), "North field");
        assert_eq!(rec.area_m2(), area);
        assert_eq!(rec.estimated_price(), area * 0.5);
    }

    #[test]
    fn test_to_feature() {
        let rec = record("Orchard");
        let feature = rec.to_feature();

        let props = feature.properties.as_ref().unwrap();
        assert_eq!(props["name"], "Orchard");
        assert_eq!(props["id"], rec.id().to_string());

        match feature.geometry.unwrap().value {
            Value::Polygon(rings) => {
                assert_eq!(rings.len(), 1);
                assert_eq!(rings[0].len(), 4);
                assert_eq!(rings[0][1], vec![0.001, 0.0]);
            }
            other => panic!("expected polygon, got {:?}", other),
        }
    }

    #[test]
    fn test_serialized_shape() {
        let rec = record("Vineyard");
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["name"], "Vineyard");
        assert!(json["area_m2"].as_f64().unwrap() > 0.0);
        assert_eq!(json["ring"].as_array().unwrap().len(), 3);
    }
}
