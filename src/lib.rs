//! Geo visualization plugin for SPARQL query results.
//!
//! Detects result columns holding geometry literals (WKT or GeoJSON),
//! projects every row into a GeoJSON feature carrying the full row as
//! properties, and keeps a map surface's results layer synchronized with
//! the current result set.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       GeoResultsPlugin                       │
//! │  (label / priority / icon / can_handle_results / draw)       │
//! ├──────────────────────────────────────────────────────────────┤
//! │ detect          │ feature + geometry       │ render          │
//! │ first-row       │ row → Feature via the    │ lifecycle +     │
//! │ datatype scan   │ datatype registry        │ draw cycle      │
//! └───────┬─────────┴──────────┬───────────────┴────────┬────────┘
//!         │                    │                        │
//!     SparqlResults     GeometryDatatypeRegistry    MapSurface
//!     (host input)      (wkt / geojson parsers)     (map library)
//! ```
//!
//! The host owns the result set and the draw triggers; the mapping library
//! sits behind [`surface::MapSurface`]. Everything in between is a pure,
//! per-draw recomputation: no stale features survive a draw.
//!
//! # Modules
//!
//! - [`results`]: SPARQL 1.1 Query Results JSON data model
//! - [`datatype`]: geometry datatype registry (IRI → converter)
//! - [`geometry`]: WKT/GeoJSON normalization with per-feature containment
//! - [`detect`]: geometry column detection
//! - [`feature`]: feature-collection building
//! - [`popup`]: popup content formatting and truncation
//! - [`surface`]: map surface boundary and value types
//! - [`render`]: map lifecycle and draw cycle
//! - [`config`]: plugin configuration
//! - [`plugin`]: host-facing visualizer adapter
//! - [`error`]: error types

pub mod config;
pub mod datatype;
pub mod detect;
pub mod error;
pub mod feature;
pub mod geometry;
pub mod plugin;
pub mod popup;
pub mod render;
pub mod results;
pub mod surface;

pub use config::MapViewConfig;
pub use datatype::{GeometryDatatypeRegistry, GEOJSON_LITERAL, VIRTRDF_GEOMETRY, WKT_LITERAL};
pub use detect::{can_render, detect_geometry_columns, GeometryColumn};
pub use error::{MapViewError, Result};
pub use plugin::{GeoResultsPlugin, ResultsVisualizer};
pub use render::MapController;
pub use results::{SparqlResults, Term, TermKind};
pub use surface::{
    Basemap, FitBoundsOptions, LatLng, LatLngBounds, LayerId, MapSurface, PointStyle,
};
