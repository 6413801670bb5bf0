//! Interactive bounding box maps
//!
//! Renders a [`BoundingBoxes`](crate::bbox::BoundingBoxes) mapping as a
//! standalone [Leaflet](https://leafletjs.com/) page: one toggleable layer per
//! box, centered on the centroid of the boxes.
//!
//! ```
//! use geohelpers::bbox::{BoundingBox, BoundingBoxes};
//! use geohelpers::map::{BBoxMap, MapOptions};
//!
//! let mut boxes = BoundingBoxes::new();
//! boxes.insert("scene-1".to_string(), BoundingBox::from([-122.5, 37.0, -121.5, 38.0]));
//! boxes.insert("scene-2".to_string(), BoundingBox::from([-121.0, 36.5, -120.0, 37.5]));
//!
//! let map = BBoxMap::new(&boxes, MapOptions::default()).unwrap();
//! assert_eq!(map.layers().len(), 2);
//! let html = map.to_html().unwrap();
//! assert!(html.contains("scene-2"));
//! ```

mod leaflet;
mod options;

pub use leaflet::{BBoxLayer, BBoxMap};
pub use options::MapOptions;

#[cfg(test)]
mod tests;
