//! Geometry column detection.
//!
//! Examines the first row of the current result set and reports every
//! column whose typed value carries a datatype the registry can convert.
//! Typing is assumed homogeneous down a column and is not verified per row.

use crate::datatype::GeometryDatatypeRegistry;
use crate::results::SparqlResults;

/// A column eligible for geometry rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeometryColumn {
    /// Column (variable) name.
    pub name: String,

    /// Datatype IRI carried by the column's first-row value.
    pub datatype: String,
}

/// Detect geometry columns from the first row.
///
/// Returns descriptors in column order, possibly empty. A result set with
/// zero rows yields no descriptors.
pub fn detect_geometry_columns(
    results: &SparqlResults,
    registry: &GeometryDatatypeRegistry,
) -> Vec<GeometryColumn> {
    let Some(first) = results.first_row() else {
        return Vec::new();
    };

    let columns: Vec<GeometryColumn> = results
        .vars()
        .iter()
        .filter_map(|name| {
            let datatype = first.get(name)?.datatype.as_deref()?;
            registry.contains(datatype).then(|| GeometryColumn {
                name: name.clone(),
                datatype: datatype.to_string(),
            })
        })
        .collect();

    tracing::debug!(count = columns.len(), "geometry column detection");
    columns
}

/// Whether the result set has at least one renderable geometry column.
pub fn can_render(results: &SparqlResults, registry: &GeometryDatatypeRegistry) -> bool {
    !detect_geometry_columns(results, registry).is_empty()
}

/// Earlier, superseded detection policy: the first column whose *name*
/// contains the case-sensitive substring `WKT`.
///
/// Brittle (matches on naming convention, not typing) and kept only as a
/// documented alternative; never combined with datatype detection.
pub fn detect_by_column_name(results: &SparqlResults) -> Option<&str> {
    results
        .vars()
        .iter()
        .find(|name| name.contains("WKT"))
        .map(String::as_str)
}
