//! Vector Data
//!
//! ## Reading
//!
//! ```
//! use geohelpers::vector::{PointLayer, ReadOptions};
//!
//! let geojson = r#"{
//!     "type": "FeatureCollection",
//!     "features": [{
//!         "type": "Feature",
//!         "geometry": {"type": "Point", "coordinates": [10.0, 20.0, 0]},
//!         "properties": {"class": "forest"}
//!     }]
//! }"#;
//! let layer = PointLayer::from_geojson_str(geojson, &ReadOptions::default()).unwrap();
//! assert_eq!(layer.labels, vec!["forest"]);
//! ```

mod options;
mod points;

pub use options::ReadOptions;
pub use points::{read_points, read_points_with_options, PointLayer};
