//! Error types for the map view plugin.

use thiserror::Error;

/// Map view errors.
#[derive(Error, Debug)]
pub enum MapViewError {
    /// WKT parsing error.
    #[error("WKT parse error: {0}")]
    WktParse(String),

    /// GeoJSON parsing error.
    #[error("GeoJSON parse error: {0}")]
    GeoJsonParse(String),

    /// Datatype not present in the geometry datatype registry.
    #[error("Unsupported geometry datatype: {0}")]
    UnsupportedDatatype(String),

    /// Malformed SPARQL results document.
    #[error("Results format error: {0}")]
    Results(String),

    /// Failure reported by the map surface (e.g. a missing container).
    #[error("Map surface error: {0}")]
    Surface(String),
}

/// Result type for map view operations.
pub type Result<T> = std::result::Result<T, MapViewError>;
