use crate::errors::{GeoError, Result};
use crate::raster::RasterType;

#[cfg(feature = "ndarray")]
use ndarray::Array2;

/// A 2-D array backed by it's `size` (cols, rows) and a row-major `Vec<T>` and it's dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct Buffer<T> {
    pub size: (usize, usize),
    pub data: Vec<T>,
}

impl<T: RasterType> Buffer<T> {
    /// Construct a new buffer from `size` (`(cols, rows)`) and `Vec<T>`.
    ///
    /// # Panic
    /// Will panic if `size.0 * size.1 != data.len()`.
    pub fn new(size: (usize, usize), data: Vec<T>) -> Self {
        assert_eq!(
            size.0 * size.1,
            data.len(),
            "size {:?} does not match length {}",
            size,
            data.len()
        );
        Buffer { size, data }
    }

    /// Fallible version of [`Buffer::new`].
    pub fn try_new(size: (usize, usize), data: Vec<T>) -> Result<Self> {
        if size.0 * size.1 != data.len() {
            return Err(GeoError::BadArgument(format!(
                "size {:?} does not match length {}",
                size,
                data.len()
            )));
        }
        Ok(Buffer { size, data })
    }

    /// Buffer of `size` filled with `value`.
    pub fn filled(size: (usize, usize), value: T) -> Self {
        Buffer {
            size,
            data: vec![value; size.0 * size.1],
        }
    }

    /// Value at column `x`, row `y`, or `None` outside the buffer.
    pub fn get(&self, x: usize, y: usize) -> Option<T> {
        if x >= self.size.0 || y >= self.size.1 {
            return None;
        }
        self.data.get(y * self.size.0 + x).copied()
    }

    #[cfg(feature = "ndarray")]
    /// Convert `self` into an [`ndarray::Array2`].
    pub fn to_array(self) -> Result<Array2<T>> {
        // Array2 shape is (rows, cols) and Buffer shape is (cols in x-axis, rows in y-axis)
        Ok(Array2::from_shape_vec(
            (self.size.1, self.size.0),
            self.data,
        )?)
    }
}

pub type ByteBuffer = Buffer<u8>;

#[cfg(feature = "ndarray")]
impl<T: RasterType> TryFrom<Buffer<T>> for Array2<T> {
    type Error = GeoError;

    fn try_from(value: Buffer<T>) -> std::result::Result<Self, Self::Error> {
        value.to_array()
    }
}

#[cfg(feature = "ndarray")]
impl<T: RasterType> From<Array2<T>> for Buffer<T> {
    fn from(value: Array2<T>) -> Self {
        // Array2 shape is (rows, cols) and Buffer shape is (cols in x-axis, rows in y-axis)
        let shape = value.shape();
        let (rows, cols) = (shape[0], shape[1]);
        let data = value
            .as_standard_layout()
            .iter()
            .copied()
            .collect::<Vec<T>>();
        Buffer::new((cols, rows), data)
    }
}
