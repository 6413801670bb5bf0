use geo_types::{Coord, CoordNum};
use num_traits::ToPrimitive;
use tracing::debug;

use crate::errors::{GeoError, Result};
use crate::geo_transform::GeoTransformEx;
use crate::raster::{Buffer, DataType, Raster, RasterType};

#[cfg(feature = "ndarray")]
use ndarray::Array2;

/// Represents a single band of a raster.
///
/// This object carries the lifetime of the raster that
/// contains it. This is necessary to prevent the raster
/// from being dropped or modified before the band.
#[derive(Debug, Clone, Copy)]
pub struct RasterBand<'a, T: RasterType> {
    raster: &'a Raster<T>,
    band_index: usize,
    buffer: &'a Buffer<T>,
}

impl<'a, T: RasterType> RasterBand<'a, T> {
    pub(crate) fn new(raster: &'a Raster<T>, band_index: usize, buffer: &'a Buffer<T>) -> Self {
        RasterBand {
            raster,
            band_index,
            buffer,
        }
    }

    /// 1-based index of this band in its raster.
    pub fn band_index(&self) -> usize {
        self.band_index
    }

    /// Get x-size of the band
    pub fn x_size(&self) -> usize {
        self.buffer.size.0
    }

    /// Get y-size of the band
    pub fn y_size(&self) -> usize {
        self.buffer.size.1
    }

    /// Get dimensions of the band `(cols, rows)`.
    pub fn size(&self) -> (usize, usize) {
        self.buffer.size
    }

    pub fn band_type(&self) -> DataType {
        T::data_type()
    }

    pub fn no_data_value(&self) -> Option<f64> {
        self.raster.no_data_value()
    }

    /// Read exactly one cell at column `x`, row `y`.
    ///
    /// Fails with [`GeoError::OutOfBounds`] outside the band.
    pub fn read_pixel(&self, x: usize, y: usize) -> Result<T> {
        self.buffer.get(x, y).ok_or(GeoError::OutOfBounds {
            x: x as f64,
            y: y as f64,
            pixel: x as i64,
            line: y as i64,
            size: self.size(),
        })
    }

    /// Read a `Buffer<T>` window from this band.
    ///
    /// # Arguments
    /// * window - the window position from top left
    /// * window_size - the window size, which must fit inside the band
    pub fn read_as(&self, window: (usize, usize), window_size: (usize, usize)) -> Result<Buffer<T>> {
        let (cols, rows) = self.size();
        let fits = window.0.checked_add(window_size.0).is_some_and(|end| end <= cols)
            && window.1.checked_add(window_size.1).is_some_and(|end| end <= rows);
        if !fits {
            return Err(GeoError::BadArgument(format!(
                "window {window:?} of size {window_size:?} exceeds band size {:?}",
                self.size()
            )));
        }

        let mut data = Vec::with_capacity(window_size.0 * window_size.1);
        for row in window.1..window.1 + window_size.1 {
            let start = row * cols + window.0;
            data.extend_from_slice(&self.buffer.data[start..start + window_size.0]);
        }
        Ok(Buffer::new(window_size, data))
    }

    /// Read the full band as a `Buffer<T>`.
    pub fn read_band_as(&self) -> Buffer<T> {
        self.buffer.clone()
    }

    #[cfg(feature = "ndarray")]
    /// Read a `Array2<T>` window from this band.
    ///
    /// # Docs
    /// The Matrix shape is (rows, cols) and raster shape is (cols in x-axis, rows in y-axis).
    pub fn read_as_array(
        &self,
        window: (usize, usize),
        window_size: (usize, usize),
    ) -> Result<Array2<T>> {
        self.read_as(window, window_size)?.to_array()
    }

    /// Cell `(pixel, line)` containing the georeferenced coordinate.
    ///
    /// `pixel = floor((x - origin_x) / pixel_width)` and
    /// `line = floor((y - origin_y) / pixel_height)` for north-up rasters.
    pub fn pixel_of<C: CoordNum>(&self, coord: Coord<C>) -> Result<(usize, usize)> {
        let x = coord.x.to_f64().unwrap_or(f64::NAN);
        let y = coord.y.to_f64().unwrap_or(f64::NAN);
        let (cols, rows) = self.size();

        let out_of_bounds = |pixel: f64, line: f64| GeoError::OutOfBounds {
            x,
            y,
            pixel: pixel as i64,
            line: line as i64,
            size: (cols, rows),
        };

        let (pixel, line) = self
            .raster
            .geo_transform()
            .to_pixel(x, y)
            .ok_or_else(|| {
                GeoError::BadArgument("Geo transform is uninvertible".to_string())
            })?;
        let (pixel, line) = (pixel.floor(), line.floor());

        if !(pixel >= 0.0 && line >= 0.0 && pixel < cols as f64 && line < rows as f64) {
            return Err(out_of_bounds(pixel, line));
        }
        Ok((pixel as usize, line as usize))
    }

    /// Nearest-cell value under every coordinate, in input order.
    ///
    /// No interpolation. If any coordinate falls outside the raster the
    /// whole call fails with [`GeoError::OutOfBounds`].
    pub fn sample<C: CoordNum>(&self, coords: &[Coord<C>]) -> Result<Vec<T>> {
        if coords.is_empty() {
            return Err(GeoError::EmptyInput {
                method_name: "RasterBand::sample",
            });
        }
        coords
            .iter()
            .map(|coord| {
                let (pixel, line) = self.pixel_of(*coord)?;
                self.read_pixel(pixel, line)
            })
            .collect()
    }
}

/// Sample band `band_index` (1-based) of `raster` under every coordinate.
///
/// The band is only borrowed for the duration of the call.
///
/// ```
/// use geo_types::coord;
/// use geohelpers::raster::{sample_points, Buffer, Raster};
///
/// let grid = Buffer::new((10, 10), (0..100).map(|v| v as f32).collect());
/// let raster = Raster::from_buffer(grid, [0.0, 1.0, 0.0, 0.0, 0.0, -1.0]).unwrap();
///
/// let values = sample_points(&raster, 1, &[coord! { x: 0.0, y: 0.0 }, coord! { x: 3.5, y: -2.5 }]).unwrap();
/// assert_eq!(values, vec![0.0, 23.0]);
/// ```
pub fn sample_points<T: RasterType, C: CoordNum>(
    raster: &Raster<T>,
    band_index: usize,
    coords: &[Coord<C>],
) -> Result<Vec<T>> {
    let values = {
        let band = raster.rasterband(band_index)?;
        band.sample(coords)?
    };
    debug!(band_index, samples = values.len(), "sampled raster");
    Ok(values)
}
