use super::schema::{NewAoi, Polygon};
use super::store::AoiStore;
use crate::Result;
use geojson::{Feature, GeoJson, Value};
use tracing::{info, warn};

/// Outcome of one import run. Skipped features are reported, not raised.
#[derive(PartialEq, Debug, Default)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
}

/// Imports a GeoJSON document into the store, one `add` per valid feature.
///
/// Single-ring polygon features with at least 3 coordinate pairs become
/// AOIs; anything else is skipped with a warning. Only a document that fails
/// to parse at all aborts the import. Shapefile-like inputs are translated
/// to GeoJSON upstream by an external parser, this module never sees them.
pub fn import_geojson(
    text: &str,
    file_name: &str,
    store: &mut AoiStore,
) -> Result<ImportReport> {
    let geojson: GeoJson = text.parse()?;

    let features: Vec<Feature> = match geojson {
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(geometry) => vec![Feature {
            bbox: None,
            geometry: Some(geometry),
            id: None,
            properties: None,
            foreign_members: None,
        }],
    };

    let mut report = ImportReport::default();

    for (index, feature) in features.into_iter().enumerate() {
        let number = index + 1;
        let Some(ring) = polygon_exterior_ring(&feature) else {
            warn!(number, file_name, "Skipping feature: not a polygon");
            report.skipped += 1;
            continue;
        };
        if ring.len() < 3 {
            warn!(number, file_name, "Skipping polygon: fewer than 3 points");
            report.skipped += 1;
            continue;
        }
        let name = feature
            .properties
            .as_ref()
            .and_then(|it| it.get("name"))
            .and_then(|it| it.as_str())
            .map(|it| it.to_string())
            .unwrap_or_else(|| format!("Imported AOI {number}"));
        let description = feature
            .properties
            .as_ref()
            .and_then(|it| it.get("description"))
            .and_then(|it| it.as_str())
            .map(|it| it.to_string())
            .unwrap_or_else(|| format!("Imported from {file_name}"));
        store.add(NewAoi {
            name,
            description: Some(description),
            geometry: ring,
            properties: feature.properties,
        });
        report.imported += 1;
    }

    info!(
        file_name,
        imported = report.imported,
        skipped = report.skipped,
        "Finished import"
    );

    Ok(report)
}

fn polygon_exterior_ring(feature: &Feature) -> Option<Polygon> {
    let geometry = feature.geometry.as_ref()?;
    let Value::Polygon(rings) = &geometry.value else {
        return None;
    };
    let exterior = rings.first()?;
    // GeoJSON positions are [lng, lat, ...], coordinate order is preserved
    exterior
        .iter()
        .map(|position| match position[..] {
            [lng, lat, ..] => Some([lng, lat]),
            _ => None,
        })
        .collect()
}
