//! Geometry literal normalization.
//!
//! Converts one typed result value into a GeoJSON geometry:
//! - WKT-family literals go through the `wkt` crate into `geo-types`, then
//!   into GeoJSON
//! - GeoJSON literals are parsed from text; a bare geometry is taken as-is
//!   and a Feature contributes its geometry
//! - anything else degrades to a degenerate empty point
//!
//! # Design
//!
//! Normalization never fails upward: a malformed literal degrades to an
//! empty point for that single feature so the rest of the batch still
//! renders. The parse functions themselves return `Result` and are the
//! registered converters in [`crate::datatype`]; containment happens here
//! in [`normalize`].

use crate::datatype::GeometryDatatypeRegistry;
use crate::error::{MapViewError, Result};
use crate::results::Term;
use geojson::{GeoJson, Geometry, Value};

/// Degenerate empty point used when a value cannot be rendered.
pub fn empty_point() -> Geometry {
    Geometry::new(Value::Point(Vec::new()))
}

/// Parse a WKT literal to a GeoJSON geometry.
///
/// An optional leading CRS IRI (`<http://…/CRS84> POINT(…)`) as allowed by
/// geo:wktLiteral is stripped before parsing.
pub fn parse_wkt(text: &str) -> Result<Geometry> {
    use std::str::FromStr;

    let text = strip_crs_prefix(text);
    let geom: geo_types::Geometry<f64> = wkt::Wkt::from_str(text)
        .map_err(|e| MapViewError::WktParse(format!("{:?}", e)))
        .and_then(|w| {
            w.try_into()
                .map_err(|e: wkt::conversion::Error| MapViewError::WktParse(format!("{:?}", e)))
        })?;
    Ok(Geometry::new(Value::from(&geom)))
}

/// Parse a GeoJSON literal to a geometry.
pub fn parse_geojson(text: &str) -> Result<Geometry> {
    let parsed: GeoJson = text
        .parse()
        .map_err(|e: geojson::Error| MapViewError::GeoJsonParse(e.to_string()))?;

    match parsed {
        GeoJson::Geometry(geometry) => Ok(geometry),
        GeoJson::Feature(feature) => feature.geometry.ok_or_else(|| {
            MapViewError::GeoJsonParse("feature without a geometry".to_string())
        }),
        GeoJson::FeatureCollection(_) => Err(MapViewError::GeoJsonParse(
            "expected a geometry, found a feature collection".to_string(),
        )),
    }
}

/// Normalize one typed value into a geometry, containing all failures.
///
/// Dispatches on the datatype IRI through the registry. Unknown datatypes
/// should not occur after column detection but are handled defensively;
/// they and malformed literals yield [`empty_point`].
pub fn normalize(registry: &GeometryDatatypeRegistry, term: &Term) -> Geometry {
    let Some(datatype) = term.datatype.as_deref() else {
        tracing::warn!("value without datatype reached geometry normalization");
        return empty_point();
    };

    match registry.convert(datatype, &term.value) {
        Some(Ok(geometry)) => geometry,
        Some(Err(err)) => {
            tracing::warn!(datatype, error = %err, "malformed geometry literal, rendering empty point");
            empty_point()
        }
        None => {
            tracing::warn!(datatype, "unrecognized geometry datatype, rendering empty point");
            empty_point()
        }
    }
}

/// Strip a leading `<crs-iri>` prefix from a WKT literal value.
fn strip_crs_prefix(text: &str) -> &str {
    let trimmed = text.trim_start();
    if let Some(rest) = trimmed.strip_prefix('<') {
        if let Some(end) = rest.find('>') {
            return rest[end + 1..].trim_start();
        }
    }
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatype::{GEOJSON_LITERAL, WKT_LITERAL};

    #[test]
    fn test_parse_wkt_point() {
        let geom = parse_wkt("POINT(4.35 50.85)").unwrap();
        assert_eq!(geom.value, Value::Point(vec![4.35, 50.85]));
    }

    #[test]
    fn test_parse_wkt_polygon() {
        let geom = parse_wkt("POLYGON((0 0, 1 0, 1 1, 0 1, 0 0))").unwrap();
        assert!(matches!(geom.value, Value::Polygon(_)));
    }

    #[test]
    fn test_parse_wkt_with_crs_prefix() {
        let geom = parse_wkt(
            "<http://www.opengis.net/def/crs/OGC/1.3/CRS84> POINT(4.35 50.85)",
        )
        .unwrap();
        assert_eq!(geom.value, Value::Point(vec![4.35, 50.85]));
    }

    #[test]
    fn test_parse_wkt_malformed() {
        assert!(parse_wkt("POINT(oops)").is_err());
        assert!(parse_wkt("").is_err());
    }

    #[test]
    fn test_parse_geojson_geometry() {
        let geom = parse_geojson(r#"{"type":"Point","coordinates":[1,2]}"#).unwrap();
        assert_eq!(geom.value, Value::Point(vec![1.0, 2.0]));
    }

    #[test]
    fn test_parse_geojson_feature_contributes_geometry() {
        let geom = parse_geojson(
            r#"{"type":"Feature","geometry":{"type":"Point","coordinates":[3,4]},"properties":null}"#,
        )
        .unwrap();
        assert_eq!(geom.value, Value::Point(vec![3.0, 4.0]));
    }

    #[test]
    fn test_parse_geojson_rejects_collection() {
        let err = parse_geojson(r#"{"type":"FeatureCollection","features":[]}"#).unwrap_err();
        assert!(matches!(err, MapViewError::GeoJsonParse(_)));
    }

    #[test]
    fn test_normalize_contains_malformed_wkt() {
        let registry = GeometryDatatypeRegistry::default();
        let term = Term::typed_literal("POINT(not a point)", WKT_LITERAL);
        assert_eq!(normalize(&registry, &term), empty_point());
    }

    #[test]
    fn test_normalize_unknown_datatype_degrades() {
        let registry = GeometryDatatypeRegistry::default();
        let term = Term::typed_literal("whatever", "http://example.org/notGeo");
        assert_eq!(normalize(&registry, &term), empty_point());
    }

    #[test]
    fn test_normalize_missing_datatype_degrades() {
        let registry = GeometryDatatypeRegistry::default();
        let term = Term::literal("POINT(1 2)");
        assert_eq!(normalize(&registry, &term), empty_point());
    }

    #[test]
    fn test_normalize_dispatches_on_datatype() {
        let registry = GeometryDatatypeRegistry::default();

        let wkt = Term::typed_literal("POINT(4.35 50.85)", WKT_LITERAL);
        assert_eq!(
            normalize(&registry, &wkt).value,
            Value::Point(vec![4.35, 50.85])
        );

        let geojson = Term::typed_literal(r#"{"type":"Point","coordinates":[1,2]}"#, GEOJSON_LITERAL);
        assert_eq!(
            normalize(&registry, &geojson).value,
            Value::Point(vec![1.0, 2.0])
        );
    }
}
