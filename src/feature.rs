//! Feature-collection building.
//!
//! Projects every result row into one GeoJSON feature for a given geometry
//! column. The feature's geometry is the normalized column value; its
//! properties carry the entire row, every column's typed value unmodified
//! (the geometry column included). Feature order follows row order.
//!
//! Collections are rebuilt from scratch on every draw; there is no
//! incremental diffing or identity tracking across redraws.

use crate::datatype::GeometryDatatypeRegistry;
use crate::detect::GeometryColumn;
use crate::geometry::{empty_point, normalize};
use crate::results::{Row, SparqlResults};
use geojson::{Feature, FeatureCollection, JsonObject, JsonValue};

/// Build the feature collection for one geometry column.
pub fn build_feature_collection(
    results: &SparqlResults,
    column: &GeometryColumn,
    registry: &GeometryDatatypeRegistry,
) -> FeatureCollection {
    let features = results
        .rows()
        .map(|row| build_feature(results, column, row, registry))
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn build_feature(
    results: &SparqlResults,
    column: &GeometryColumn,
    row: &Row,
    registry: &GeometryDatatypeRegistry,
) -> Feature {
    // Unbound geometry cell in this row: render as the degenerate point.
    let geometry = match row.get(&column.name) {
        Some(term) => normalize(registry, term),
        None => empty_point(),
    };

    let mut properties = JsonObject::new();
    for name in results.vars() {
        if let Some(term) = row.get(name) {
            properties.insert(
                name.clone(),
                serde_json::to_value(term).unwrap_or(JsonValue::Null),
            );
        }
    }

    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}
