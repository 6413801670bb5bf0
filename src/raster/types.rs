use std::fmt::{Debug, Display, Formatter};

use num_traits::NumCast;

/// Cell data types understood by [`crate::raster::Raster`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum DataType {
    UInt8,
    UInt16,
    UInt32,
    Int8,
    Int16,
    Int32,
    Float32,
    Float64,
}

impl DataType {
    pub fn name(&self) -> &'static str {
        match self {
            DataType::UInt8 => "Byte",
            DataType::UInt16 => "UInt16",
            DataType::UInt32 => "UInt32",
            DataType::Int8 => "Int8",
            DataType::Int16 => "Int16",
            DataType::Int32 => "Int32",
            DataType::Float32 => "Float32",
            DataType::Float64 => "Float64",
        }
    }

    /// Get the type size in **bits**.
    pub fn bits(&self) -> u8 {
        match self {
            DataType::UInt8 | DataType::Int8 => 8,
            DataType::UInt16 | DataType::Int16 => 16,
            DataType::UInt32 | DataType::Int32 | DataType::Float32 => 32,
            DataType::Float64 => 64,
        }
    }

    /// Get the type size in **bytes**.
    pub fn bytes(&self) -> u8 {
        self.bits() / 8
    }

    /// Returns `true` if data type is integral (non-floating point)
    pub fn is_integer(&self) -> bool {
        !self.is_floating()
    }

    /// Returns `true` if data type is floating point (non-integral)
    pub fn is_floating(&self) -> bool {
        matches!(self, DataType::Float32 | DataType::Float64)
    }

    /// Returns `true` if data type supports negative values.
    pub fn is_signed(&self) -> bool {
        !matches!(
            self,
            DataType::UInt8 | DataType::UInt16 | DataType::UInt32
        )
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Type-level constraint for limiting which primitive numeric values can be
/// stored in a raster band.
pub trait RasterType: Copy + Debug + PartialEq + NumCast + 'static {
    fn data_type() -> DataType;
}

macro_rules! impl_raster_type {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl RasterType for $ty {
                fn data_type() -> DataType {
                    DataType::$variant
                }
            }
        )*
    };
}

impl_raster_type! {
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    f32 => Float32,
    f64 => Float64,
}
