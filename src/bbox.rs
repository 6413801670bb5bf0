//! Axis-aligned bounding boxes and their centroid.
//!
//! ```
//! use geohelpers::bbox::{find_centroid, BoundingBox, BoundingBoxes};
//!
//! let mut boxes = BoundingBoxes::new();
//! boxes.insert("tile-a".to_string(), BoundingBox::from([0.0, 0.0, 2.0, 2.0]));
//! boxes.insert("tile-b".to_string(), BoundingBox::from([2.0, 2.0, 4.0, 4.0]));
//!
//! let centroid = find_centroid(boxes.values()).unwrap();
//! assert_eq!((centroid.x, centroid.y), (2.0, 2.0));
//! ```

use geo_types::{coord, Coord, Rect};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::{GeoError, Result};

/// Identifier to box mapping. Iterates in insertion order, which is also
/// the layer order of [`crate::map::BBoxMap`].
pub type BoundingBoxes = IndexMap<String, BoundingBox>;

/// `(x_min, y_min, x_max, y_max)` in the caller's coordinate reference system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl BoundingBox {
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        BoundingBox {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Midpoint of the box.
    pub fn center(&self) -> Coord<f64> {
        coord! {
            x: (self.x_min + self.x_max) / 2.0,
            y: (self.y_min + self.y_max) / 2.0,
        }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Convert into a [`geo_types::Rect`]. Note that `Rect` normalizes its corners.
    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.x_min, y: self.y_min },
            coord! { x: self.x_max, y: self.y_max },
        )
    }

    /// The box as the `[x_min, y_min, x_max, y_max]` array used by STAC items.
    pub fn to_array(&self) -> [f64; 4] {
        [self.x_min, self.y_min, self.x_max, self.y_max]
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from(bbox: [f64; 4]) -> Self {
        BoundingBox::new(bbox[0], bbox[1], bbox[2], bbox[3])
    }
}

impl From<Rect<f64>> for BoundingBox {
    fn from(rect: Rect<f64>) -> Self {
        BoundingBox::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y)
    }
}

/// Unweighted mean of the box centers.
///
/// Every box contributes its center `((x_min + x_max) / 2, (y_min + y_max) / 2)`
/// once, regardless of its area.
///
/// Fails with [`GeoError::EmptyInput`] when `boxes` is empty.
pub fn find_centroid<'a, I>(boxes: I) -> Result<Coord<f64>>
where
    I: IntoIterator<Item = &'a BoundingBox>,
{
    let (count, total_x, total_y) =
        boxes
            .into_iter()
            .fold((0usize, 0.0, 0.0), |(count, total_x, total_y), bbox| {
                let center = bbox.center();
                (count + 1, total_x + center.x, total_y + center.y)
            });

    if count == 0 {
        return Err(GeoError::EmptyInput {
            method_name: "find_centroid",
        });
    }

    Ok(coord! {
        x: total_x / count as f64,
        y: total_y / count as f64,
    })
}
