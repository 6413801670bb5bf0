use serde::Serialize;

use crate::errors::{GeoError, Result};

/// Parameters for [`crate::map::BBoxMap::new`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MapOptions {
    /// Initial Leaflet zoom level, `0..=18`.
    pub zoom_start: u8,
    /// Map width in pixels.
    pub width: u32,
    /// Map height in pixels.
    pub height: u32,
    /// Stroke and fill color of every rectangle, any CSS color.
    pub color: String,
    /// Rectangle fill opacity, `0.0..=1.0`.
    pub fill_opacity: f64,
    /// Base layer URL template.
    pub tiles: String,
    /// Attribution shown for the base layer.
    pub attribution: String,
}

const MAX_ZOOM: u8 = 18;
const DEFAULT_TILES: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
const DEFAULT_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

impl Default for MapOptions {
    /// A 700x600 OpenStreetMap view at zoom 7 with translucent blue boxes.
    fn default() -> Self {
        MapOptions {
            zoom_start: 7,
            width: 700,
            height: 600,
            color: "blue".to_string(),
            fill_opacity: 0.3,
            tiles: DEFAULT_TILES.to_string(),
            attribution: DEFAULT_ATTRIBUTION.to_string(),
        }
    }
}

impl MapOptions {
    pub fn validate(&self) -> Result<()> {
        if self.zoom_start > MAX_ZOOM {
            return Err(GeoError::BadArgument(format!(
                "zoom_start must be at most {MAX_ZOOM}, got {}",
                self.zoom_start
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(GeoError::BadArgument(format!(
                "map size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if !(0.0..=1.0).contains(&self.fill_opacity) {
            return Err(GeoError::BadArgument(format!(
                "fill_opacity must be within [0, 1], got {}",
                self.fill_opacity
            )));
        }
        if self.color.trim().is_empty() {
            return Err(GeoError::BadArgument("color must not be empty".to_string()));
        }
        Ok(())
    }
}
