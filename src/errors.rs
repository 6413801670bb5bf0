use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeoError>;

#[derive(Debug, Error)]
pub enum GeoError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(#[from] geojson::Error),
    #[error("TIFF error: {0}")]
    TiffError(#[from] tiff::TiffError),
    #[cfg(feature = "ndarray")]
    #[error("Ndarray error: {0}")]
    NdarrayError(#[from] ndarray::ShapeError),

    #[error("Method '{method_name}' was called with no input")]
    EmptyInput { method_name: &'static str },
    #[error("Invalid coordinate reference system '{definition}': {msg}")]
    InvalidCrs { definition: String, msg: String },
    #[error("Unable to transform coordinates from {from} to {to}: {}", .msg.as_deref().unwrap_or("out of range"))]
    InvalidCoordinateRange {
        from: String,
        to: String,
        msg: Option<String>,
    },
    #[error("Coordinate ({x}, {y}) maps to pixel ({pixel}, {line}) outside raster of size {size:?}")]
    OutOfBounds {
        x: f64,
        y: f64,
        pixel: i64,
        line: i64,
        size: (usize, usize),
    },
    #[error("Malformed geometry in feature {feature}: {msg}")]
    MalformedGeometry { feature: usize, msg: String },
    #[error("Feature {feature} has no property '{property}'")]
    MissingProperty { feature: usize, property: String },
    #[error("Invalid band index: {0}")]
    InvalidBandIndex(usize),
    #[error("Unsupported data type: {0}")]
    UnsupportedDataType(String),
    #[error("Bad argument: {0}")]
    BadArgument(String),
}
