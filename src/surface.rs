//! Map surface abstraction.
//!
//! [`MapSurface`] is the boundary to the mapping/rendering library: tile
//! layers, the layer-switcher control, feature groups, GeoJSON rendering
//! with popups, bounds-fitting and size invalidation. The plugin drives the
//! surface; the surface owns all visual state.
//!
//! [`recording::RecordingSurface`] is an in-memory implementation that
//! records every call, used by this crate's tests and usable by hosts
//! testing their own plugin wiring.

use crate::error::Result;
use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A basemap described as plain configuration.
///
/// Constructed fresh per surface; basemaps are never shared across plugin
/// instances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Basemap {
    /// Display name in the layer switcher.
    pub name: String,

    /// Templated tile URL (`https://{s}.tile…/{z}/{x}/{y}.png`).
    pub url_template: String,

    /// Attribution text shown on the map.
    pub attribution: String,
}

impl Basemap {
    pub fn new(
        name: impl Into<String>,
        url_template: impl Into<String>,
        attribution: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url_template: url_template.into(),
            attribution: attribution.into(),
        }
    }
}

/// A WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Axis-aligned bounds enclosing a set of coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    /// Degenerate bounds around a single coordinate.
    pub fn of(lat: f64, lng: f64) -> Self {
        Self {
            south_west: LatLng::new(lat, lng),
            north_east: LatLng::new(lat, lng),
        }
    }

    /// Grow the bounds to include a coordinate.
    pub fn extend(&mut self, lat: f64, lng: f64) {
        self.south_west.lat = self.south_west.lat.min(lat);
        self.south_west.lng = self.south_west.lng.min(lng);
        self.north_east.lat = self.north_east.lat.max(lat);
        self.north_east.lng = self.north_east.lng.max(lng);
    }
}

/// Circle-marker styling for point features.
///
/// Points render as small circle markers rather than default marker icons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointStyle {
    pub radius: f64,
    pub weight: f64,
    pub opacity: f64,
    pub fill_opacity: f64,
    pub color: String,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            radius: 6.0,
            weight: 2.0,
            opacity: 0.8,
            fill_opacity: 0.5,
            color: "#3388ff".to_string(),
        }
    }
}

/// Options for fitting the view to a set of bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitBoundsOptions {
    /// Pixel padding around the fitted bounds.
    pub padding_px: u32,

    /// Zoom ceiling; prevents over-zooming into a single point.
    pub max_zoom: u8,
}

impl Default for FitBoundsOptions {
    fn default() -> Self {
        Self {
            padding_px: 20,
            max_zoom: 14,
        }
    }
}

/// Opaque handle to a layer owned by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(pub u32);

/// The mapping-library boundary.
///
/// One surface per plugin instance; it persists for the instance's
/// lifetime. All methods are synchronous; the one deferred operation
/// ([`MapSurface::schedule`]) is fired back by the host.
pub trait MapSurface {
    /// Register a basemap tile layer with the layer-switcher control.
    /// The layer marked `default` is shown initially.
    fn add_basemap(&mut self, basemap: &Basemap, default: bool) -> LayerId;

    /// Create a named feature group registered as a switchable overlay.
    fn add_feature_group(&mut self, name: &str) -> LayerId;

    /// Set the visible center and zoom.
    fn set_view(&mut self, center: LatLng, zoom: u8);

    /// Attach the surface's container into the host's results area.
    /// Idempotent; called on every draw because the host may have replaced
    /// the results DOM in between.
    fn mount(&mut self, container: &str) -> Result<()>;

    /// Remove every layer previously rendered into the group.
    fn clear_group(&mut self, group: LayerId);

    /// Render a feature collection into a group.
    ///
    /// `popups[i]` is bound to `collection.features[i]`; point features
    /// take the given circle-marker style.
    fn add_features(
        &mut self,
        group: LayerId,
        collection: &FeatureCollection,
        style: &PointStyle,
        popups: &[String],
    ) -> LayerId;

    /// Fit the view to the given bounds.
    fn fit_bounds(&mut self, bounds: LatLngBounds, options: &FitBoundsOptions);

    /// Recompute the surface's size from its container.
    fn invalidate_size(&mut self);

    /// Ask the host to call back after `delay` with this generation token.
    fn schedule(&mut self, delay: Duration, generation: u64);
}

pub mod recording {
    //! Recording surface for tests.

    use super::*;
    use rustc_hash::FxHashMap;

    /// One rendered sub-layer inside a group.
    #[derive(Debug, Clone)]
    pub struct RenderedLayer {
        pub collection: FeatureCollection,
        pub style: PointStyle,
        pub popups: Vec<String>,
    }

    /// In-memory [`MapSurface`] that records every call.
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        next_layer: u32,

        /// Basemaps registered at initialization, with their default flag.
        pub basemaps: Vec<(Basemap, bool)>,

        /// Feature groups by name.
        pub groups: Vec<(String, LayerId)>,

        /// Rendered sub-layers per group.
        pub rendered: FxHashMap<LayerId, Vec<RenderedLayer>>,

        /// Every `set_view` call.
        pub views: Vec<(LatLng, u8)>,

        /// Every container passed to `mount`.
        pub mounts: Vec<String>,

        /// Number of `clear_group` calls.
        pub clears: u32,

        /// Every `fit_bounds` call.
        pub fits: Vec<(LatLngBounds, FitBoundsOptions)>,

        /// Number of `invalidate_size` calls.
        pub invalidations: u32,

        /// Every scheduled callback.
        pub scheduled: Vec<(Duration, u64)>,
    }

    impl RecordingSurface {
        pub fn new() -> Self {
            Self::default()
        }

        fn next_id(&mut self) -> LayerId {
            let id = LayerId(self.next_layer);
            self.next_layer += 1;
            id
        }

        /// Total feature count currently rendered in a group.
        pub fn feature_count(&self, group: LayerId) -> usize {
            self.rendered
                .get(&group)
                .map(|layers| layers.iter().map(|l| l.collection.features.len()).sum())
                .unwrap_or(0)
        }

        /// Rendered sub-layers of a group.
        pub fn layers(&self, group: LayerId) -> &[RenderedLayer] {
            self.rendered
                .get(&group)
                .map(Vec::as_slice)
                .unwrap_or(&[])
        }
    }

    impl MapSurface for RecordingSurface {
        fn add_basemap(&mut self, basemap: &Basemap, default: bool) -> LayerId {
            self.basemaps.push((basemap.clone(), default));
            self.next_id()
        }

        fn add_feature_group(&mut self, name: &str) -> LayerId {
            let id = self.next_id();
            self.groups.push((name.to_string(), id));
            self.rendered.insert(id, Vec::new());
            id
        }

        fn set_view(&mut self, center: LatLng, zoom: u8) {
            self.views.push((center, zoom));
        }

        fn mount(&mut self, container: &str) -> Result<()> {
            self.mounts.push(container.to_string());
            Ok(())
        }

        fn clear_group(&mut self, group: LayerId) {
            self.clears += 1;
            if let Some(layers) = self.rendered.get_mut(&group) {
                layers.clear();
            }
        }

        fn add_features(
            &mut self,
            group: LayerId,
            collection: &FeatureCollection,
            style: &PointStyle,
            popups: &[String],
        ) -> LayerId {
            let id = self.next_id();
            self.rendered.entry(group).or_default().push(RenderedLayer {
                collection: collection.clone(),
                style: style.clone(),
                popups: popups.to_vec(),
            });
            id
        }

        fn fit_bounds(&mut self, bounds: LatLngBounds, options: &FitBoundsOptions) {
            self.fits.push((bounds, *options));
        }

        fn invalidate_size(&mut self) {
            self.invalidations += 1;
        }

        fn schedule(&mut self, delay: Duration, generation: u64) {
            self.scheduled.push((delay, generation));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_extend() {
        let mut bounds = LatLngBounds::of(50.85, 4.35);
        bounds.extend(52.37, 4.89);
        bounds.extend(48.86, 2.35);

        assert_eq!(bounds.south_west, LatLng::new(48.86, 2.35));
        assert_eq!(bounds.north_east, LatLng::new(52.37, 4.89));
    }

    #[test]
    fn test_recording_surface_group_lifecycle() {
        use recording::RecordingSurface;

        let mut surface = RecordingSurface::new();
        let group = surface.add_feature_group("Results");
        assert_eq!(surface.feature_count(group), 0);

        let collection = FeatureCollection {
            bbox: None,
            features: vec![geojson::Feature {
                bbox: None,
                geometry: Some(geojson::Geometry::new(geojson::Value::Point(vec![1.0, 2.0]))),
                id: None,
                properties: None,
                foreign_members: None,
            }],
            foreign_members: None,
        };
        surface.add_features(group, &collection, &PointStyle::default(), &["p".to_string()]);
        assert_eq!(surface.feature_count(group), 1);

        surface.clear_group(group);
        assert_eq!(surface.feature_count(group), 0);
        assert_eq!(surface.clears, 1);
    }
}
