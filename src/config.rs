//! Map view configuration.

use crate::surface::{Basemap, FitBoundsOptions, LatLng, PointStyle};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a map view plugin instance.
///
/// Basemaps are plain records instantiated per surface, so no tile-layer
/// state is ever shared between plugin instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapViewConfig {
    /// Available basemaps; the first entry is the default layer, all of
    /// them appear in the layer switcher.
    pub basemaps: Vec<Basemap>,

    /// Initial view center before any results are drawn.
    pub initial_center: LatLng,

    /// Initial zoom level.
    pub initial_zoom: u8,

    /// Styling for point features.
    pub point_style: PointStyle,

    /// Bounds-fit padding and zoom ceiling.
    pub fit: FitBoundsOptions,

    /// Character limit for popup property values.
    pub popup_truncate: usize,

    /// Delay before the post-draw size/bounds correction fires.
    pub settle_delay: Duration,
}

impl Default for MapViewConfig {
    fn default() -> Self {
        Self {
            basemaps: default_basemaps(),
            // Brussels region.
            initial_center: LatLng::new(50.85, 4.35),
            initial_zoom: 8,
            point_style: PointStyle::default(),
            fit: FitBoundsOptions::default(),
            popup_truncate: 120,
            settle_delay: Duration::from_millis(100),
        }
    }
}

impl MapViewConfig {
    /// Replace the basemap list. The list must stay non-empty.
    pub fn with_basemaps(mut self, basemaps: Vec<Basemap>) -> Self {
        self.basemaps = basemaps;
        self
    }

    /// Set the initial view.
    pub fn with_initial_view(mut self, center: LatLng, zoom: u8) -> Self {
        self.initial_center = center;
        self.initial_zoom = zoom;
        self
    }

    /// Set the point style.
    pub fn with_point_style(mut self, style: PointStyle) -> Self {
        self.point_style = style;
        self
    }

    /// Set the bounds-fit options.
    pub fn with_fit(mut self, fit: FitBoundsOptions) -> Self {
        self.fit = fit;
        self
    }
}

fn default_basemaps() -> Vec<Basemap> {
    vec![
        Basemap::new(
            "OpenStreetMap",
            "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
            "© OpenStreetMap contributors",
        ),
        Basemap::new(
            "OSM Humanitarian",
            "https://{s}.tile.openstreetmap.fr/hot/{z}/{x}/{y}.png",
            "© OpenStreetMap contributors, tiles by HOT",
        ),
        Basemap::new(
            "OpenTopoMap",
            "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png",
            "© OpenStreetMap contributors, © OpenTopoMap (CC-BY-SA)",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MapViewConfig::default();
        assert!(!config.basemaps.is_empty());
        assert_eq!(config.popup_truncate, 120);
        assert_eq!(config.settle_delay, Duration::from_millis(100));
        assert_eq!(config.initial_center, LatLng::new(50.85, 4.35));
    }

    #[test]
    fn test_builder_style() {
        let config = MapViewConfig::default()
            .with_initial_view(LatLng::new(52.37, 4.89), 10)
            .with_fit(FitBoundsOptions {
                padding_px: 40,
                max_zoom: 12,
            });
        assert_eq!(config.initial_zoom, 10);
        assert_eq!(config.fit.max_zoom, 12);
    }

    #[test]
    fn test_config_roundtrips_through_serde() {
        let config = MapViewConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: MapViewConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
