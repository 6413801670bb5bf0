use crate::errors;
use crate::errors::GeoError;

/// An affine transform.
///
/// A six-element array storing the coefficients of an [affine transform]
/// used in mapping coordinates between pixel/line `(P, L)` (raster) space,
/// and `(Xp,Yp)` (projection/[`crate::spatial_ref::SpatialRef`]) space.
///
/// # Interpretation
///
/// A `GeoTransform`'s components have the following meanings:
///
///   * `GeoTransform[0]`: x-coordinate of the upper-left corner of the upper-left pixel.
///   * `GeoTransform[1]`: W-E pixel resolution (pixel width).
///   * `GeoTransform[2]`: row rotation (typically zero).
///   * `GeoTransform[3]`: y-coordinate of the upper-left corner of the upper-left pixel.
///   * `GeoTransform[4]`: column rotation (typically zero).
///   * `GeoTransform[5]`: N-S pixel resolution (pixel height), negative value for a North-up image.
///
/// # Usage
///  *  [`apply`](GeoTransformEx::apply): perform a `(P,L) -> (Xp,Yp)` transformation
///  *  [`invert`](GeoTransformEx::invert): construct the inverse transformation coefficients
///     for computing `(Xp,Yp) -> (P,L)` transformations
///  *  [`to_pixel`](GeoTransformEx::to_pixel): fractional `(P,L)` of a georeferenced point
///
/// # Example
///
/// ```rust
/// # fn main() -> geohelpers::errors::Result<()> {
/// use geohelpers::{GeoTransform, GeoTransformEx};
/// let transform: GeoTransform = [768269.0, 1.0, 0.0, 4057292.0, 0.0, -1.0];
/// let (x, y) = transform.apply(0.0, 0.0);
/// assert_eq!((x, y), (768269.0, 4057292.0));
/// let inverse = transform.invert()?;
/// let (p, l) = inverse.apply(x, y);
/// assert_eq!((p, l), (0.0, 0.0));
/// # Ok(())
/// # }
/// ```
///
/// [affine transform]: https://en.wikipedia.org/wiki/Affine_transformation
pub type GeoTransform = [f64; 6];

/// Extension methods on [`GeoTransform`]
pub trait GeoTransformEx {
    /// Apply GeoTransform to x/y coordinate.
    fn apply(&self, pixel: f64, line: f64) -> (f64, f64);

    /// Invert a [`GeoTransform`].
    ///
    /// Fails with [`GeoError::BadArgument`] when the transform is degenerate.
    fn invert(&self) -> errors::Result<GeoTransform>;

    /// Fractional `(pixel, line)` position of the georeferenced point `(x, y)`.
    ///
    /// Returns `None` for a degenerate transform.
    fn to_pixel(&self, x: f64, y: f64) -> Option<(f64, f64)>;

    /// `true` when both rotation terms are zero.
    fn is_north_up(&self) -> bool;

    /// Extent `[x_min, y_min, x_max, y_max]` covered by a raster of `size` `(cols, rows)`.
    fn extent(&self, size: (usize, usize)) -> [f64; 4];
}

impl GeoTransformEx for GeoTransform {
    fn apply(&self, pixel: f64, line: f64) -> (f64, f64) {
        let geo_x = self[0] + pixel * self[1] + line * self[2];
        let geo_y = self[3] + pixel * self[4] + line * self[5];
        (geo_x, geo_y)
    }

    fn invert(&self) -> errors::Result<GeoTransform> {
        if self.is_north_up() {
            if self[1] == 0.0 || self[5] == 0.0 {
                return Err(GeoError::BadArgument(
                    "Geo transform is uninvertible".to_string(),
                ));
            }
            return Ok([
                -self[0] / self[1],
                1.0 / self[1],
                0.0,
                -self[3] / self[5],
                0.0,
                1.0 / self[5],
            ]);
        }

        let det = self[1] * self[5] - self[2] * self[4];
        let magnitude = self[1]
            .abs()
            .max(self[2].abs())
            .max(self[4].abs().max(self[5].abs()));
        if det.abs() <= 1e-10 * magnitude * magnitude {
            return Err(GeoError::BadArgument(
                "Geo transform is uninvertible".to_string(),
            ));
        }

        let inv_det = 1.0 / det;
        let out_1 = self[5] * inv_det;
        let out_4 = -self[4] * inv_det;
        let out_2 = -self[2] * inv_det;
        let out_5 = self[1] * inv_det;
        Ok([
            (self[2] * self[3] - self[0] * self[5]) * inv_det,
            out_1,
            out_2,
            (-self[1] * self[3] + self[0] * self[4]) * inv_det,
            out_4,
            out_5,
        ])
    }

    fn to_pixel(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        if self.is_north_up() {
            if self[1] == 0.0 || self[5] == 0.0 {
                return None;
            }
            // single division: a point on a cell edge floors onto that cell
            return Some(((x - self[0]) / self[1], (y - self[3]) / self[5]));
        }
        self.invert().ok().map(|inverse| inverse.apply(x, y))
    }

    fn is_north_up(&self) -> bool {
        self[2] == 0.0 && self[4] == 0.0
    }

    fn extent(&self, size: (usize, usize)) -> [f64; 4] {
        let (cols, rows) = (size.0 as f64, size.1 as f64);
        let corners = [
            self.apply(0.0, 0.0),
            self.apply(cols, 0.0),
            self.apply(0.0, rows),
            self.apply(cols, rows),
        ];
        corners.iter().fold(
            [f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY],
            |acc, &(x, y)| [acc[0].min(x), acc[1].min(y), acc[2].max(x), acc[3].max(y)],
        )
    }
}
