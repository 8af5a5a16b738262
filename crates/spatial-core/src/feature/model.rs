//! Feature domain models.

use crate::error::SpatialError;
use crate::geometry::{self, Geometry, GeometryKind};
use serde::{Deserialize, Serialize};
use spatial_db::{DbError, FeatureRow, Record};

/// A named, stored geometry. Geometry crosses the API boundary as WKT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub id: i64,
    pub name: String,
    #[serde(rename = "wkt")]
    pub geometry: Geometry,
}

impl Feature {
    pub fn kind(&self) -> GeometryKind {
        self.geometry.kind()
    }
}

impl TryFrom<FeatureRow> for Feature {
    type Error = SpatialError;

    fn try_from(row: FeatureRow) -> Result<Self, Self::Error> {
        let id = row.id.ok_or(DbError::MissingId(FeatureRow::ENTITY))?;
        let geometry = geometry::parse(&row.wkt)
            .map_err(|source| SpatialError::CorruptGeometry { id, source })?;

        Ok(Self {
            id,
            name: row.name,
            geometry,
        })
    }
}

/// Storage row for a validated name and geometry.
pub(crate) fn to_row(name: &str, geometry: &Geometry) -> FeatureRow {
    FeatureRow::new(name, geometry.kind().as_str(), geometry.to_string())
}

/// A feature as submitted by a client, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureInput {
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Wkt", alias = "WKT")]
    pub wkt: String,
}

impl FeatureInput {
    pub fn new(name: impl Into<String>, wkt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            wkt: wkt.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Coord;

    #[test]
    fn test_json_shape() {
        let feature = Feature {
            id: 3,
            name: "A".into(),
            geometry: Geometry::Point(Coord::new(30.0, 10.0)),
        };
        let json = serde_json::to_value(&feature).unwrap();
        assert_eq!(json, serde_json::json!({"id": 3, "name": "A", "wkt": "POINT(30 10)"}));

        let back: Feature = serde_json::from_value(json).unwrap();
        assert_eq!(back, feature);
    }

    #[test]
    fn test_input_accepts_pascal_case() {
        let input: FeatureInput =
            serde_json::from_str(r#"{"Name": "A", "WKT": "POINT(1 2)"}"#).unwrap();
        assert_eq!(input, FeatureInput::new("A", "POINT(1 2)"));
    }

    #[test]
    fn test_corrupt_row() {
        let row = FeatureRow::new("A", "point", "POINT(").with_id(5);
        assert!(matches!(
            Feature::try_from(row),
            Err(SpatialError::CorruptGeometry { id: 5, .. })
        ));
    }
}
