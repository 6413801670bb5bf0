use std::fmt::{self, Debug, Formatter};

use geo_types::{coord, Coord};
use proj4rs::proj::Proj;
use tracing::debug;

use crate::errors::{self, GeoError};
use crate::spatial_ref::SpatialRef;

/// Defines a coordinate transformation from one [`SpatialRef`] to another.
///
/// Build it once and reuse it for every point of a batch.
pub struct CoordTransform {
    projections: Option<(Proj, Proj)>,
    source_geographic: bool,
    target_geographic: bool,
    from: String,
    to: String,
}

impl Debug for CoordTransform {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoordTransform")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("identity", &self.is_identity())
            .finish()
    }
}

impl CoordTransform {
    /// Constructs a new transformation from `source` to `target`.
    pub fn new(source: &SpatialRef, target: &SpatialRef) -> errors::Result<CoordTransform> {
        let projections = if source == target {
            None
        } else {
            Some((source.to_proj()?, target.to_proj()?))
        };
        debug!(
            from = %source,
            to = %target,
            identity = projections.is_none(),
            "created coordinate transform"
        );

        Ok(Self {
            projections,
            source_geographic: source.is_geographic(),
            target_geographic: target.is_geographic(),
            from: source.authority(),
            to: target.authority(),
        })
    }

    /// `true` when source and target are the same reference system.
    pub fn is_identity(&self) -> bool {
        self.projections.is_none()
    }

    /// Transform coordinates in place.
    ///
    /// # Arguments
    /// * `x` - slice of x coordinates (longitudes for geographic references)
    /// * `y` - slice of y coordinates (must match x in length)
    /// * `z` - slice of z coordinates, or an empty slice to ignore
    ///
    /// On error the slices are left untouched.
    pub fn transform_coords(
        &self,
        x: &mut [f64],
        y: &mut [f64],
        z: &mut [f64],
    ) -> errors::Result<()> {
        let nb_coords = x.len();
        if nb_coords != y.len() || (!z.is_empty() && nb_coords != z.len()) {
            return Err(GeoError::BadArgument(format!(
                "transform coordinate slices have different lengths: {} != {} != {}",
                nb_coords,
                y.len(),
                z.len()
            )));
        }

        let transformed = (0..nb_coords)
            .map(|i| self.transform_xyz(x[i], y[i], z.get(i).copied().unwrap_or(0.0)))
            .collect::<errors::Result<Vec<_>>>()?;

        for (i, (tx, ty, tz)) in transformed.into_iter().enumerate() {
            x[i] = tx;
            y[i] = ty;
            if let Some(zi) = z.get_mut(i) {
                *zi = tz;
            }
        }
        Ok(())
    }

    /// Transform a single coordinate.
    pub fn transform_point(&self, point: Coord<f64>) -> errors::Result<Coord<f64>> {
        let (x, y, _) = self.transform_xyz(point.x, point.y, 0.0)?;
        Ok(coord! { x: x, y: y })
    }

    /// Transform every point and truncate the result toward zero.
    ///
    /// The output has the same length and order as `points`. Either every
    /// point is transformed or the call fails as a whole.
    pub fn transform_truncated(&self, points: &[Coord<f64>]) -> errors::Result<Vec<Coord<i64>>> {
        if points.is_empty() {
            return Err(GeoError::EmptyInput {
                method_name: "transform_truncated",
            });
        }
        points
            .iter()
            .map(|point| {
                let transformed = self.transform_point(*point)?;
                Ok(coord! {
                    x: truncate(transformed.x),
                    y: truncate(transformed.y),
                })
            })
            .collect()
    }

    fn transform_xyz(&self, x: f64, y: f64, z: f64) -> errors::Result<(f64, f64, f64)> {
        if !x.is_finite() || !y.is_finite() {
            return Err(self.range_error(format!("non-finite input ({x}, {y})")));
        }
        if self.source_geographic && !(-90.0..=90.0).contains(&y) {
            return Err(self.range_error(format!("latitude {y} exceeds limits")));
        }

        let Some((source, target)) = &self.projections else {
            return Ok((x, y, z));
        };

        // proj4rs works in radians for geographic references
        let mut point = if self.source_geographic {
            (x.to_radians(), y.to_radians(), z)
        } else {
            (x, y, z)
        };
        proj4rs::transform::transform(source, target, &mut point)
            .map_err(|e| self.range_error(format!("{e:?}")))?;

        let (out_x, out_y) = if self.target_geographic {
            (point.0.to_degrees(), point.1.to_degrees())
        } else {
            (point.0, point.1)
        };
        if !out_x.is_finite() || !out_y.is_finite() {
            return Err(self.range_error(format!("({x}, {y}) has no finite image")));
        }
        Ok((out_x, out_y, point.2))
    }

    fn range_error(&self, msg: String) -> GeoError {
        GeoError::InvalidCoordinateRange {
            from: self.from.clone(),
            to: self.to.clone(),
            msg: Some(msg),
        }
    }
}

/// Truncation toward zero, not rounding.
fn truncate(value: f64) -> i64 {
    value.trunc() as i64
}

/// Reproject `points` given as `(longitude, latitude)` (or x/y) from
/// `source_epsg` to `target_epsg`, truncating every result toward zero.
///
/// Both references are resolved and the transform is built once per call.
/// Fails with [`GeoError::InvalidCrs`] if either code is unknown.
///
/// ```
/// use geo_types::coord;
/// use geohelpers::spatial_ref::reproject;
///
/// let points = [coord! { x: 10.7, y: -20.2 }];
/// let same = reproject(&points, 4326, 4326).unwrap();
/// assert_eq!(same, vec![coord! { x: 10, y: -20 }]);
/// ```
pub fn reproject(
    points: &[Coord<f64>],
    source_epsg: u32,
    target_epsg: u32,
) -> errors::Result<Vec<Coord<i64>>> {
    let source = SpatialRef::from_epsg(source_epsg)?;
    let target = SpatialRef::from_epsg(target_epsg)?;
    let transform = CoordTransform::new(&source, &target)?;
    transform.transform_truncated(points)
}
