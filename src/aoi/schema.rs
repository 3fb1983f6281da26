use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::OffsetDateTime;

/// A (longitude, latitude) pair in decimal degrees, longitude first.
/// Ranges are not validated here, callers supply WGS84-like values.
pub type Point = [f64; 2];

/// A simple ring of points. The first point doesn't have to be repeated at
/// the end, closure is implicit wherever it matters.
pub type Polygon = Vec<Point>;

/// A named polygon region with metadata. Owned exclusively by the store,
/// serialized as-is into the durable key-value layer.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Aoi {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub geometry: Polygon,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,
}

/// Fields a caller supplies when creating an AOI. The store fills in `id`
/// and `created_at`.
#[derive(Debug, Clone)]
pub struct NewAoi {
    pub name: String,
    pub description: Option<String>,
    pub geometry: Polygon,
    pub properties: Option<Map<String, Value>>,
}

impl NewAoi {
    pub fn new(name: impl Into<String>, geometry: Polygon) -> Self {
        NewAoi {
            name: name.into(),
            description: None,
            geometry,
            properties: None,
        }
    }
}

/// A partial update. `None` fields are left untouched; `id` and `created_at`
/// can't be changed.
#[derive(Debug, Clone, Default)]
pub struct AoiPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub geometry: Option<Polygon>,
    pub properties: Option<Map<String, Value>>,
}

#[cfg(test)]
mod test {
    use super::Aoi;
    use crate::Result;
    use time::macros::datetime;

    #[test]
    fn serializes_timestamps_as_rfc3339() -> Result<()> {
        let aoi = Aoi {
            id: "test".into(),
            name: "Test".into(),
            description: None,
            geometry: vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]],
            created_at: datetime!(2024-05-01 12:00 UTC),
            updated_at: None,
            properties: None,
        };
        let json = serde_json::to_string(&aoi)?;
        assert!(json.contains(r#""createdAt":"2024-05-01T12:00:00Z""#));
        assert!(!json.contains("updatedAt"));
        assert!(!json.contains("description"));
        Ok(())
    }

    #[test]
    fn deserializes_persisted_record() -> Result<()> {
        let json = r#"
            {
                "id": "a1",
                "name": "Park",
                "description": "A park",
                "geometry": [[13.0, 52.0], [13.1, 52.0], [13.1, 52.1]],
                "createdAt": "2024-05-01T12:00:00Z",
                "updatedAt": "2024-05-02T08:30:00Z",
                "properties": {"source": "osm"}
            }
        "#;
        let aoi: Aoi = serde_json::from_str(json)?;
        assert_eq!("a1", aoi.id);
        assert_eq!(datetime!(2024-05-01 12:00 UTC), aoi.created_at);
        assert_eq!(Some(datetime!(2024-05-02 08:30 UTC)), aoi.updated_at);
        assert_eq!(3, aoi.geometry.len());
        assert_eq!(
            "osm",
            aoi.properties.unwrap().get("source").unwrap().as_str().unwrap()
        );
        Ok(())
    }
}
