//! Raster Data
//!
//! In-memory georeferenced grids, GeoTIFF I/O and nearest-cell sampling.

mod buffer;
mod dataset;
mod geotiff;
mod rasterband;
mod types;

pub use buffer::{Buffer, ByteBuffer};
pub use dataset::Raster;
pub use rasterband::{sample_points, RasterBand};
pub use types::{DataType, RasterType};
