use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use geo_types::{coord, Coord};
use geojson::{Feature, Value};
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::errors::{GeoError, Result};
use crate::vector::ReadOptions;

/// Point coordinates and their class labels, index-aligned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointLayer {
    /// `(longitude, latitude)`; any elevation is dropped.
    pub points: Vec<Coord<f64>>,
    /// `labels[i]` is the class of `points[i]`.
    pub labels: Vec<String>,
}

impl PointLayer {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over `(point, label)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&Coord<f64>, &str)> {
        self.points
            .iter()
            .zip(self.labels.iter().map(String::as_str))
    }

    /// Parse a GeoJSON FeatureCollection held in memory.
    pub fn from_geojson_str(geojson: &str, options: &ReadOptions) -> Result<PointLayer> {
        let document: JsonValue = serde_json::from_str(geojson)?;
        PointLayer::from_json(document, options)
    }

    /// Parse a GeoJSON FeatureCollection from `reader`.
    pub fn from_reader<R: Read>(reader: R, options: &ReadOptions) -> Result<PointLayer> {
        let document: JsonValue = serde_json::from_reader(reader)?;
        PointLayer::from_json(document, options)
    }

    /// Features are decoded one at a time, so a broken non-Point feature
    /// does not fail the whole document.
    fn from_json(document: JsonValue, options: &ReadOptions) -> Result<PointLayer> {
        let features = match document {
            JsonValue::Object(mut collection)
                if collection.get("type").and_then(JsonValue::as_str)
                    == Some("FeatureCollection") =>
            {
                match collection.remove("features") {
                    Some(JsonValue::Array(features)) => features,
                    _ => {
                        return Err(GeoError::MalformedGeometry {
                            feature: 0,
                            msg: "FeatureCollection has no features array".to_string(),
                        })
                    }
                }
            }
            _ => {
                return Err(GeoError::MalformedGeometry {
                    feature: 0,
                    msg: "expected a FeatureCollection".to_string(),
                })
            }
        };

        let mut layer = PointLayer::default();
        let mut skipped = 0usize;
        for (index, value) in features.into_iter().enumerate() {
            let is_point = geometry_type(&value) == Some("Point");
            let feature = match Feature::try_from(value) {
                Ok(feature) => feature,
                Err(e) if is_point => {
                    return Err(GeoError::MalformedGeometry {
                        feature: index,
                        msg: e.to_string(),
                    })
                }
                Err(e) => {
                    debug!(feature = index, error = %e, "skipping undecodable feature");
                    skipped += 1;
                    continue;
                }
            };

            match point_of(index, &feature)? {
                Some(point) => {
                    layer.points.push(point);
                    layer.labels.push(label_of(index, &feature, options.label_field)?);
                }
                None => skipped += 1,
            }
        }

        debug!(
            points = layer.len(),
            skipped,
            label_field = options.label_field,
            "read point features"
        );
        Ok(layer)
    }
}

/// `geometry.type` of a raw feature, if present.
fn geometry_type(feature: &JsonValue) -> Option<&str> {
    feature.get("geometry")?.get("type")?.as_str()
}

/// `Ok(None)` for features that are not Points.
fn point_of(index: usize, feature: &Feature) -> Result<Option<Coord<f64>>> {
    let Some(geometry) = &feature.geometry else {
        debug!(feature = index, "skipping feature without geometry");
        return Ok(None);
    };
    let Value::Point(position) = &geometry.value else {
        debug!(feature = index, "skipping non-Point feature");
        return Ok(None);
    };

    match position.as_slice() {
        [lon, lat, ..] if lon.is_finite() && lat.is_finite() => Ok(Some(coord! { x: *lon, y: *lat })),
        _ => Err(GeoError::MalformedGeometry {
            feature: index,
            msg: format!("Point coordinates {position:?} are not [lon, lat, (elevation)]"),
        }),
    }
}

fn label_of(index: usize, feature: &Feature, label_field: &str) -> Result<String> {
    match feature.property(label_field) {
        Some(JsonValue::String(label)) => Ok(label.clone()),
        Some(value @ (JsonValue::Number(_) | JsonValue::Bool(_))) => Ok(value.to_string()),
        _ => Err(GeoError::MissingProperty {
            feature: index,
            property: label_field.to_string(),
        }),
    }
}

/// Read Point features and their `class` labels from a GeoJSON file.
///
/// Non-Point features are skipped.
///
/// ```no_run
/// # fn main() -> geohelpers::errors::Result<()> {
/// let layer = geohelpers::vector::read_points("fixtures/points.geojson")?;
/// for (point, label) in layer.iter() {
///     println!("{label}: {} {}", point.x, point.y);
/// }
/// # Ok(())
/// # }
/// ```
pub fn read_points<P: AsRef<Path>>(path: P) -> Result<PointLayer> {
    read_points_with_options(path, &ReadOptions::default())
}

/// [`read_points`] with a configurable label property.
pub fn read_points_with_options<P: AsRef<Path>>(path: P, options: &ReadOptions) -> Result<PointLayer> {
    let file = File::open(path.as_ref())?;
    PointLayer::from_reader(BufReader::new(file), options)
}
