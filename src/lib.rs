//! Geospatial helpers for exploratory analysis.
//!
//! A small set of independent, stateless utilities:
//!
//! * [`bbox`]: the centroid of a set of bounding boxes,
//! * [`map`]: those boxes rendered on an interactive web map,
//! * [`vector`]: point coordinates and class labels from GeoJSON,
//! * [`spatial_ref`]: coordinate reprojection between EPSG codes,
//! * [`raster`]: GeoTIFF rasters and pixel sampling at coordinates.
//!
//! ## Use
//!
//! ```
//! use geo_types::coord;
//! use geohelpers::raster::{sample_points, Buffer, Raster};
//! use geohelpers::spatial_ref::reproject;
//!
//! # fn main() -> geohelpers::errors::Result<()> {
//! // a 10x10 Web Mercator grid with 1 km cells, its origin at (0, 0)
//! let cells = Buffer::new((10, 10), (0..100).map(|v| v as f32).collect());
//! let raster = Raster::from_buffer(cells, [0.0, 1000.0, 0.0, 0.0, 0.0, -1000.0])?;
//!
//! let lon_lat = [coord! { x: 0.02, y: -0.03 }];
//! let projected = reproject(&lon_lat, 4326, 3857)?;
//! let values = sample_points(&raster, 1, &projected)?;
//! assert_eq!(values, vec![32.0]);
//! # Ok(())
//! # }
//! ```

#![crate_name = "geohelpers"]
#![crate_type = "lib"]

pub mod bbox;
pub mod errors;
mod geo_transform;
pub mod map;
pub mod raster;
pub mod spatial_ref;
pub mod vector;

pub use geo_transform::{GeoTransform, GeoTransformEx};

#[cfg(test)]
mod test_utils;
