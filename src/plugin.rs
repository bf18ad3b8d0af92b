//! Plugin lifecycle adapter.
//!
//! The host-facing boundary: a results-UI host holds a set of
//! [`ResultsVisualizer`]s, ranks them by priority, probes each with
//! `can_handle_results` and invokes `draw` on its own triggers (tab
//! activation, new results, plugin switch).

use crate::config::MapViewConfig;
use crate::datatype::GeometryDatatypeRegistry;
use crate::detect::can_render;
use crate::error::Result;
use crate::render::MapController;
use crate::results::SparqlResults;
use crate::surface::MapSurface;

/// A visualizer competing for the host's results area.
pub trait ResultsVisualizer {
    /// Display label.
    fn label(&self) -> &str;

    /// Ordering hint among competing visualizers; higher ranks first.
    fn priority(&self) -> i32;

    /// Small icon glyph shown next to the label.
    fn icon(&self) -> &str;

    /// Whether this visualizer can render the result set.
    fn can_handle_results(&self, results: &SparqlResults) -> bool;

    /// Render the result set into the host's container.
    fn draw(&mut self, results: &SparqlResults, container: &str) -> Result<()>;
}

/// The geo results plugin: renders geometry-literal columns on a basemap.
pub struct GeoResultsPlugin<S: MapSurface> {
    controller: MapController<S>,
    registry: GeometryDatatypeRegistry,
}

impl<S: MapSurface> GeoResultsPlugin<S> {
    /// Plugin over a surface with the default configuration and registry.
    pub fn new(surface: S) -> Self {
        Self::with_config(MapViewConfig::default(), surface)
    }

    /// Plugin with an explicit configuration.
    pub fn with_config(config: MapViewConfig, surface: S) -> Self {
        Self {
            controller: MapController::new(config, surface),
            registry: GeometryDatatypeRegistry::default(),
        }
    }

    /// The datatype registry, e.g. to register vendor geometry datatypes.
    pub fn registry_mut(&mut self) -> &mut GeometryDatatypeRegistry {
        &mut self.registry
    }

    /// The render controller (read access, mainly for tests and hosts
    /// inspecting surface state).
    pub fn controller(&self) -> &MapController<S> {
        &self.controller
    }

    /// Host callback for the deferred settle correction scheduled during
    /// a draw. Stale generations are ignored.
    pub fn on_settle_timer(&mut self, generation: u64) {
        self.controller.on_settle_timer(generation);
    }
}

impl<S: MapSurface> ResultsVisualizer for GeoResultsPlugin<S> {
    fn label(&self) -> &str {
        "Geo"
    }

    fn priority(&self) -> i32 {
        5
    }

    fn icon(&self) -> &str {
        "🌍"
    }

    fn can_handle_results(&self, results: &SparqlResults) -> bool {
        can_render(results, &self.registry)
    }

    fn draw(&mut self, results: &SparqlResults, container: &str) -> Result<()> {
        self.controller.draw(results, &self.registry, container)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatype::WKT_LITERAL;
    use crate::results::{Bindings, Head, Row, Term};
    use crate::surface::recording::RecordingSurface;
    use geojson::Value;

    fn wkt_results(rows: usize) -> SparqlResults {
        SparqlResults {
            head: Head {
                vars: vec!["wktGeom".to_string()],
            },
            results: Bindings {
                bindings: (0..rows)
                    .map(|i| {
                        Row::from([(
                            "wktGeom".to_string(),
                            Term::typed_literal(format!("POINT({i} {i})"), WKT_LITERAL),
                        )])
                    })
                    .collect(),
            },
        }
    }

    #[test]
    fn test_probe_follows_detection() {
        let plugin = GeoResultsPlugin::new(RecordingSurface::new());

        assert!(plugin.can_handle_results(&wkt_results(1)));
        assert!(!plugin.can_handle_results(&wkt_results(0)));

        let no_geo = SparqlResults {
            head: Head {
                vars: vec!["name".to_string()],
            },
            results: Bindings {
                bindings: vec![Row::from([("name".to_string(), Term::literal("x"))])],
            },
        };
        assert!(!plugin.can_handle_results(&no_geo));
    }

    #[test]
    fn test_draw_renders_into_results_group() {
        let mut plugin = GeoResultsPlugin::new(RecordingSurface::new());
        plugin.draw(&wkt_results(2), "results-area").unwrap();

        let surface = plugin.controller().surface();
        let group = surface.groups[0].1;
        assert_eq!(surface.feature_count(group), 2);
        assert_eq!(surface.mounts, vec!["results-area".to_string()]);
    }

    #[test]
    fn test_registered_vendor_datatype_becomes_renderable() {
        fn null_island(_: &str) -> crate::error::Result<geojson::Geometry> {
            Ok(geojson::Geometry::new(Value::Point(vec![0.0, 0.0])))
        }

        let mut plugin = GeoResultsPlugin::new(RecordingSurface::new());
        let results = SparqlResults {
            head: Head {
                vars: vec!["geo".to_string()],
            },
            results: Bindings {
                bindings: vec![Row::from([(
                    "geo".to_string(),
                    Term::typed_literal("anything", "http://example.org/vendorGeo"),
                )])],
            },
        };

        assert!(!plugin.can_handle_results(&results));
        plugin
            .registry_mut()
            .register("http://example.org/vendorGeo", null_island);
        assert!(plugin.can_handle_results(&results));
    }

    #[test]
    fn test_host_facing_metadata() {
        let plugin = GeoResultsPlugin::new(RecordingSurface::new());
        assert_eq!(plugin.label(), "Geo");
        assert_eq!(plugin.priority(), 5);
        assert!(!plugin.icon().is_empty());
    }
}
