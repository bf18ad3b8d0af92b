//! Map/render controller.
//!
//! Owns the surface lifecycle and the draw cycle that keeps the "Results"
//! feature group synchronized with the current result set.
//!
//! # Design
//!
//! The lifecycle is an explicit two-state machine: `Uninitialized` until
//! the first draw creates the basemaps, layer control and results group,
//! then `Ready` for the rest of the instance's lifetime. Every draw is a
//! full recomputation: detect columns, clear the group, rebuild and render
//! every feature collection, fit the view.
//!
//! The post-draw size correction (the container's true size may only be
//! knowable once the host's layout settles) is a scheduled callback with a
//! generation token. A new draw supersedes any pending correction; a stale
//! token firing is a no-op, so overlapping draws never compound bounds-fit
//! calls.

use crate::config::MapViewConfig;
use crate::datatype::GeometryDatatypeRegistry;
use crate::detect::detect_geometry_columns;
use crate::error::Result;
use crate::feature::build_feature_collection;
use crate::popup::popup_content;
use crate::results::SparqlResults;
use crate::surface::{LatLngBounds, LayerId, MapSurface};
use geojson::{FeatureCollection, Value};

/// Name of the persistent results layer group.
pub const RESULTS_GROUP: &str = "Results";

#[derive(Debug, Clone, Copy)]
enum MapLifecycle {
    Uninitialized,
    Ready { results_group: LayerId },
}

/// Render controller over one map surface.
pub struct MapController<S: MapSurface> {
    config: MapViewConfig,
    surface: S,
    lifecycle: MapLifecycle,

    /// Generation of the most recent draw; stale settle timers are ignored.
    generation: u64,

    /// Bounds of the last non-empty draw, re-applied by the settle timer.
    last_bounds: Option<LatLngBounds>,
}

impl<S: MapSurface> MapController<S> {
    pub fn new(config: MapViewConfig, surface: S) -> Self {
        Self {
            config,
            surface,
            lifecycle: MapLifecycle::Uninitialized,
            generation: 0,
            last_bounds: None,
        }
    }

    /// The underlying surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The active configuration.
    pub fn config(&self) -> &MapViewConfig {
        &self.config
    }

    /// Run one draw cycle against the current result set.
    pub fn draw(
        &mut self,
        results: &SparqlResults,
        registry: &GeometryDatatypeRegistry,
        container: &str,
    ) -> Result<()> {
        // Columns may change between draws as the underlying query changes.
        let columns = detect_geometry_columns(results, registry);

        let group = self.ensure_initialized();

        // Re-attach every draw: the host may have replaced the results DOM.
        self.surface.mount(container)?;
        self.surface.clear_group(group);

        let mut bounds: Option<LatLngBounds> = None;
        let mut feature_total = 0;
        for column in &columns {
            let collection = build_feature_collection(results, column, registry);
            if collection.features.is_empty() {
                continue;
            }

            let popups: Vec<String> = results
                .rows()
                .map(|row| popup_content(results.vars(), row, self.config.popup_truncate))
                .collect();

            extend_with_collection(&mut bounds, &collection);
            feature_total += collection.features.len();
            self.surface
                .add_features(group, &collection, &self.config.point_style, &popups);
        }

        tracing::debug!(
            columns = columns.len(),
            features = feature_total,
            "draw cycle complete"
        );

        if let Some(bounds) = bounds {
            self.surface.fit_bounds(bounds, &self.config.fit);
        }
        self.last_bounds = bounds;

        // Supersede any pending settle correction.
        self.generation += 1;
        self.surface.schedule(self.config.settle_delay, self.generation);

        Ok(())
    }

    /// Deferred settle correction, fired by the host after the scheduled
    /// delay. Recomputes the surface size and re-applies the last fit.
    /// Tokens from superseded draws are ignored.
    pub fn on_settle_timer(&mut self, generation: u64) {
        if generation != self.generation {
            tracing::trace!(generation, current = self.generation, "stale settle timer");
            return;
        }
        if matches!(self.lifecycle, MapLifecycle::Uninitialized) {
            return;
        }

        self.surface.invalidate_size();
        if let Some(bounds) = self.last_bounds {
            self.surface.fit_bounds(bounds, &self.config.fit);
        }
    }

    /// First-draw initialization: basemaps, layer control, results group,
    /// initial view. Idempotent via the lifecycle state.
    fn ensure_initialized(&mut self) -> LayerId {
        if let MapLifecycle::Ready { results_group } = self.lifecycle {
            return results_group;
        }

        for (idx, basemap) in self.config.basemaps.iter().enumerate() {
            self.surface.add_basemap(basemap, idx == 0);
        }
        let results_group = self.surface.add_feature_group(RESULTS_GROUP);
        self.surface
            .set_view(self.config.initial_center, self.config.initial_zoom);

        self.lifecycle = MapLifecycle::Ready { results_group };
        results_group
    }
}

/// Grow `bounds` to enclose every coordinate of the collection.
///
/// Degenerate empty-point features contribute nothing.
fn extend_with_collection(bounds: &mut Option<LatLngBounds>, collection: &FeatureCollection) {
    for feature in &collection.features {
        if let Some(geometry) = &feature.geometry {
            extend_with_value(bounds, &geometry.value);
        }
    }
}

fn extend_with_value(bounds: &mut Option<LatLngBounds>, value: &Value) {
    match value {
        Value::Point(position) => extend_with_position(bounds, position),
        Value::MultiPoint(positions) | Value::LineString(positions) => {
            for position in positions {
                extend_with_position(bounds, position);
            }
        }
        Value::MultiLineString(lines) | Value::Polygon(lines) => {
            for line in lines {
                for position in line {
                    extend_with_position(bounds, position);
                }
            }
        }
        Value::MultiPolygon(polygons) => {
            for polygon in polygons {
                for ring in polygon {
                    for position in ring {
                        extend_with_position(bounds, position);
                    }
                }
            }
        }
        Value::GeometryCollection(geometries) => {
            for geometry in geometries {
                extend_with_value(bounds, &geometry.value);
            }
        }
    }
}

fn extend_with_position(bounds: &mut Option<LatLngBounds>, position: &[f64]) {
    // GeoJSON positions are [lng, lat, ...].
    let (Some(&lng), Some(&lat)) = (position.first(), position.get(1)) else {
        return;
    };
    match bounds {
        Some(bounds) => bounds.extend(lat, lng),
        None => *bounds = Some(LatLngBounds::of(lat, lng)),
    }
}
