use std::fs;
use std::path::Path;

use geo_types::Coord;
use serde::Serialize;
use tracing::debug;

use crate::bbox::{find_centroid, BoundingBoxes};
use crate::errors::Result;
use crate::map::MapOptions;

const LEAFLET_VERSION: &str = "1.9.4";

/// A named overlay holding one rectangle.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BBoxLayer {
    /// Layer name and rectangle tooltip: the box identifier.
    pub name: String,
    /// `[[y_min, x_min], [y_max, x_max]]`, Leaflet's `[lat, lng]` order.
    pub bounds: [[f64; 2]; 2],
}

/// Bounding boxes laid out on a web map.
#[derive(Clone, Debug)]
pub struct BBoxMap {
    center: Coord<f64>,
    layers: Vec<BBoxLayer>,
    options: MapOptions,
}

#[derive(Serialize)]
struct RectangleStyle<'a> {
    color: &'a str,
    fill: bool,
    #[serde(rename = "fillColor")]
    fill_color: &'a str,
    #[serde(rename = "fillOpacity")]
    fill_opacity: f64,
}

#[derive(Serialize)]
struct PageConfig<'a> {
    center: [f64; 2],
    zoom: u8,
    tiles: &'a str,
    attribution: &'a str,
    style: RectangleStyle<'a>,
    layers: &'a [BBoxLayer],
}

impl BBoxMap {
    /// Lay out `boxes` in insertion order, centered on their centroid.
    ///
    /// Fails with [`crate::errors::GeoError::EmptyInput`] when `boxes` is
    /// empty and with [`crate::errors::GeoError::BadArgument`] when
    /// `options` are invalid.
    pub fn new(boxes: &BoundingBoxes, options: MapOptions) -> Result<Self> {
        options.validate()?;
        let center = find_centroid(boxes.values())?;

        let layers = boxes
            .iter()
            .map(|(name, bbox)| BBoxLayer {
                name: name.clone(),
                bounds: [[bbox.y_min, bbox.x_min], [bbox.y_max, bbox.x_max]],
            })
            .collect();

        Ok(BBoxMap {
            center,
            layers,
            options,
        })
    }

    /// Centroid of the boxes, `x` is longitude.
    pub fn center(&self) -> Coord<f64> {
        self.center
    }

    pub fn layers(&self) -> &[BBoxLayer] {
        &self.layers
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    /// Render a self-contained HTML page.
    pub fn to_html(&self) -> Result<String> {
        let config = PageConfig {
            center: [self.center.y, self.center.x],
            zoom: self.options.zoom_start,
            tiles: &self.options.tiles,
            attribution: &self.options.attribution,
            style: RectangleStyle {
                color: &self.options.color,
                fill: true,
                fill_color: &self.options.color,
                fill_opacity: self.options.fill_opacity,
            },
            layers: &self.layers,
        };
        // `</` must not close the surrounding script element
        let config = serde_json::to_string(&config)?.replace("</", "<\\/");

        Ok(format!(
            "<!doctype html>
<html>
<head>
<meta charset='utf-8'>
<title>Bounding boxes</title>
<link rel='stylesheet' href='https://unpkg.com/leaflet@{version}/dist/leaflet.css'>
<script src='https://unpkg.com/leaflet@{version}/dist/leaflet.js'></script>
<style>
#map {{ width: {width}px; height: {height}px; }}
</style>
</head>
<body>
<div id='map'></div>
<script>
var config = {config};
var map = L.map('map').setView(config.center, config.zoom);
L.tileLayer(config.tiles, {{ attribution: config.attribution }}).addTo(map);
var overlays = {{}};
config.layers.forEach(function (layer) {{
  var group = L.featureGroup().addTo(map);
  L.rectangle(layer.bounds, config.style).bindTooltip(layer.name).addTo(group);
  overlays[layer.name] = group;
}});
L.control.layers(null, overlays).addTo(map);
</script>
</body>
</html>
",
            version = LEAFLET_VERSION,
            width = self.options.width,
            height = self.options.height,
        ))
    }

    /// Write [`BBoxMap::to_html`] to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_html()?)?;
        debug!(path = %path.display(), layers = self.layers.len(), "saved bounding box map");
        Ok(())
    }
}
