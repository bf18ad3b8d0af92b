//! Geometry datatype registry.
//!
//! Maps datatype IRIs to conversion functions. Column detection asks the
//! registry whether a datatype is renderable; normalization dispatches
//! through it. New datatypes can be registered without touching either
//! dispatch site.

use crate::error::Result;
use geojson::Geometry;
use rustc_hash::FxHashMap;

/// OGC GeoSPARQL WKT literal.
pub const WKT_LITERAL: &str = "http://www.opengis.net/ont/geosparql#wktLiteral";

/// Virtuoso geometry literal (WKT lexical form).
pub const VIRTRDF_GEOMETRY: &str = "http://www.openlinksw.com/schemas/virtrdf#Geometry";

/// OGC GeoSPARQL GeoJSON literal.
pub const GEOJSON_LITERAL: &str = "http://www.opengis.net/ont/geosparql#geoJSONLiteral";

/// Conversion function from a literal's lexical value to a geometry.
pub type GeometryConverter = fn(&str) -> Result<Geometry>;

/// Registry of renderable geometry datatypes.
///
/// The default registry recognizes [`WKT_LITERAL`], [`VIRTRDF_GEOMETRY`]
/// (both WKT lexical forms) and [`GEOJSON_LITERAL`].
pub struct GeometryDatatypeRegistry {
    converters: FxHashMap<String, GeometryConverter>,
}

impl GeometryDatatypeRegistry {
    /// Empty registry with no recognized datatypes.
    pub fn empty() -> Self {
        Self {
            converters: FxHashMap::default(),
        }
    }

    /// Register a converter for a datatype IRI, replacing any existing one.
    pub fn register(&mut self, datatype: impl Into<String>, converter: GeometryConverter) {
        self.converters.insert(datatype.into(), converter);
    }

    /// Whether the datatype is renderable.
    pub fn contains(&self, datatype: &str) -> bool {
        self.converters.contains_key(datatype)
    }

    /// Convert a lexical value under the given datatype.
    ///
    /// `None` when the datatype is not registered; `Some(Err)` when the
    /// value is malformed for its datatype.
    pub fn convert(&self, datatype: &str, value: &str) -> Option<Result<Geometry>> {
        self.converters.get(datatype).map(|convert| convert(value))
    }
}

impl Default for GeometryDatatypeRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(WKT_LITERAL, crate::geometry::parse_wkt);
        registry.register(VIRTRDF_GEOMETRY, crate::geometry::parse_wkt);
        registry.register(GEOJSON_LITERAL, crate::geometry::parse_geojson);
        registry
    }
}
