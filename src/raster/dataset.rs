use std::path::Path;

use tracing::debug;

use crate::errors::{GeoError, Result};
use crate::geo_transform::{GeoTransform, GeoTransformEx};
use crate::raster::{geotiff, Buffer, RasterBand, RasterType};
use crate::spatial_ref::SpatialRef;

/// A georeferenced grid with one or more bands of `T` cells.
///
/// Every band has the raster's size. The raster is read-only for sampling;
/// bands are borrowed through [`Raster::rasterband`].
#[derive(Debug, Clone, PartialEq)]
pub struct Raster<T: RasterType> {
    size: (usize, usize),
    bands: Vec<Buffer<T>>,
    geo_transform: GeoTransform,
    epsg: Option<u32>,
    no_data: Option<f64>,
}

impl<T: RasterType> Raster<T> {
    /// Open a GeoTIFF file, converting every cell to `T`.
    ///
    /// Chunky multi-sample images (e.g. RGB) yield one band per sample.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Raster<T>> {
        let raster = geotiff::read(path.as_ref())?;
        debug!(
            path = %path.as_ref().display(),
            size = ?raster.size,
            bands = raster.bands.len(),
            epsg = ?raster.epsg,
            "opened raster"
        );
        Ok(raster)
    }

    /// Single-band raster.
    pub fn from_buffer(buffer: Buffer<T>, geo_transform: GeoTransform) -> Result<Raster<T>> {
        Raster::from_bands(vec![buffer], geo_transform)
    }

    /// Multi-band raster. All bands must share the same size and hold
    /// exactly `cols * rows` cells.
    pub fn from_bands(bands: Vec<Buffer<T>>, geo_transform: GeoTransform) -> Result<Raster<T>> {
        let size = match bands.first() {
            Some(band) => band.size,
            None => {
                return Err(GeoError::EmptyInput {
                    method_name: "Raster::from_bands",
                })
            }
        };
        if let Some(band) = bands.iter().find(|band| band.size != size) {
            return Err(GeoError::BadArgument(format!(
                "band size {:?} differs from raster size {:?}",
                band.size, size
            )));
        }
        if let Some(band) = bands.iter().find(|band| band.data.len() != size.0 * size.1) {
            return Err(GeoError::BadArgument(format!(
                "band holds {} cells, size {:?} needs {}",
                band.data.len(),
                size,
                size.0 * size.1
            )));
        }
        if size.0 == 0 || size.1 == 0 {
            return Err(GeoError::BadArgument(format!(
                "raster size {size:?} has no cells"
            )));
        }
        Ok(Raster {
            size,
            bands,
            geo_transform,
            epsg: None,
            no_data: None,
        })
    }

    /// Write band 1 to `path` as a 32-bit float GeoTIFF.
    pub fn write_geotiff<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        geotiff::write(self, path.as_ref())
    }

    /// Raster size `(cols, rows)`.
    pub fn raster_size(&self) -> (usize, usize) {
        self.size
    }

    pub fn raster_count(&self) -> usize {
        self.bands.len()
    }

    /// Get affine transformation coefficients.
    ///
    /// x-coordinate of the top-left corner pixel (x-offset)
    /// width of a pixel (x-resolution)
    /// row rotation (typically zero)
    /// y-coordinate of the top-left corner pixel
    /// column rotation (typically zero)
    /// height of a pixel (y-resolution, typically negative)
    pub fn geo_transform(&self) -> GeoTransform {
        self.geo_transform
    }

    pub fn set_geo_transform(&mut self, transformation: GeoTransform) {
        self.geo_transform = transformation;
    }

    /// EPSG code of the raster's reference system, when known.
    pub fn epsg(&self) -> Option<u32> {
        self.epsg
    }

    pub fn set_epsg(&mut self, epsg: Option<u32>) {
        self.epsg = epsg;
    }

    /// Resolve the raster's reference system, `None` when the raster carries no EPSG code.
    pub fn spatial_ref(&self) -> Result<Option<SpatialRef>> {
        self.epsg.map(SpatialRef::from_epsg).transpose()
    }

    pub fn no_data_value(&self) -> Option<f64> {
        self.no_data
    }

    pub fn set_no_data_value(&mut self, no_data: Option<f64>) {
        self.no_data = no_data;
    }

    /// Extent `[x_min, y_min, x_max, y_max]` in the raster's reference system.
    pub fn extent(&self) -> [f64; 4] {
        self.geo_transform.extent(self.size)
    }

    /// Borrow band `band_index`. Bands are numbered from 1.
    pub fn rasterband(&self, band_index: usize) -> Result<RasterBand<'_, T>> {
        band_index
            .checked_sub(1)
            .and_then(|i| self.bands.get(i))
            .map(|buffer| RasterBand::new(self, band_index, buffer))
            .ok_or(GeoError::InvalidBandIndex(band_index))
    }

    pub(crate) fn with_metadata(mut self, epsg: Option<u32>, no_data: Option<f64>) -> Self {
        self.epsg = epsg;
        self.no_data = no_data;
        self
    }
}
