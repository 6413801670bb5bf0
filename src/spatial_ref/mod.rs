//! Coordinate reference systems and transforms between them.
//!
//! ```
//! use geo_types::coord;
//! use geohelpers::spatial_ref::{CoordTransform, SpatialRef};
//!
//! let wgs84 = SpatialRef::from_epsg(4326).unwrap();
//! let web_mercator = SpatialRef::from_epsg(3857).unwrap();
//! let transform = CoordTransform::new(&wgs84, &web_mercator).unwrap();
//!
//! let projected = transform
//!     .transform_truncated(&[coord! { x: 0.0, y: 0.0 }])
//!     .unwrap();
//! assert_eq!(projected, vec![coord! { x: 0, y: 0 }]);
//! ```

mod srs;
mod transform;

pub use srs::SpatialRef;
pub use transform::{reproject, CoordTransform};

#[cfg(test)]
mod tests;
