use geo_types::{coord, Coord};

use super::{reproject, CoordTransform, SpatialRef};
use crate::assert_near;
use crate::errors::GeoError;

#[test]
fn from_epsg_to_proj4() {
    let spatial_ref = SpatialRef::from_epsg(4326).unwrap();
    assert_eq!(spatial_ref.epsg(), Some(4326));
    assert!(spatial_ref.to_proj4().contains("+proj=longlat"));
    assert!(spatial_ref.is_geographic());
    assert_eq!(spatial_ref.authority(), "EPSG:4326");

    let spatial_ref = SpatialRef::from_epsg(3857).unwrap();
    assert!(spatial_ref.to_proj4().contains("+proj=merc"));
    assert!(!spatial_ref.is_geographic());
}

#[test]
fn unknown_epsg() {
    for code in [0, 999_999, 70_000] {
        match SpatialRef::from_epsg(code) {
            Err(GeoError::InvalidCrs { definition, .. }) => {
                assert_eq!(definition, format!("EPSG:{code}"))
            }
            other => panic!("expected InvalidCrs for {code}, got {other:?}"),
        }
    }
}

#[test]
fn from_definition() {
    let by_name = SpatialRef::from_definition("EPSG:3857").unwrap();
    let lower_case: SpatialRef = "epsg:3857".parse().unwrap();
    let bare = SpatialRef::from_definition("3857").unwrap();
    assert_eq!(by_name, lower_case);
    assert_eq!(by_name, bare);

    let proj4 = SpatialRef::from_definition("+proj=longlat +datum=WGS84 +no_defs").unwrap();
    assert_eq!(proj4.epsg(), None);
    assert!(proj4.is_geographic());

    assert!(matches!(
        SpatialRef::from_definition("not a crs"),
        Err(GeoError::InvalidCrs { .. })
    ));
}

#[test]
fn invalid_proj4() {
    assert!(matches!(
        SpatialRef::from_proj4("   "),
        Err(GeoError::InvalidCrs { .. })
    ));
    assert!(matches!(
        SpatialRef::from_proj4("+proj=definitely_not_a_projection"),
        Err(GeoError::InvalidCrs { .. })
    ));
}

#[test]
fn comparison() {
    let a = SpatialRef::from_proj4("+proj=longlat +datum=WGS84 +no_defs").unwrap();
    let b = SpatialRef::from_proj4("+datum=WGS84 +proj=longlat   +no_defs").unwrap();
    let c = SpatialRef::from_epsg(3857).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(c.to_string(), "EPSG:3857");
}

#[test]
fn transform_origin_to_web_mercator() {
    let wgs84 = SpatialRef::from_epsg(4326).unwrap();
    let webmercator = SpatialRef::from_epsg(3857).unwrap();
    let transform = CoordTransform::new(&wgs84, &webmercator).unwrap();
    assert!(!transform.is_identity());

    let point = transform.transform_point(coord! { x: 0.0, y: 0.0 }).unwrap();
    assert_near!(point.x, 0.0, epsilon = 1e-6);
    assert_near!(point.y, 0.0, epsilon = 1e-6);
}

#[test]
fn transform_coordinates() {
    let wgs84 = SpatialRef::from_epsg(4326).unwrap();
    let webmercator = SpatialRef::from_epsg(3857).unwrap();
    let transform = CoordTransform::new(&wgs84, &webmercator).unwrap();

    let mut xs = [180.0, -90.0];
    let mut ys = [0.0, 0.0];
    transform.transform_coords(&mut xs, &mut ys, &mut []).unwrap();
    assert_near!(xs[0], 20037508.342789244, epsilon = 1e-3);
    assert_near!(xs[1], -10018754.171394622, epsilon = 1e-3);
    assert_near!(ys[0], 0.0, epsilon = 1e-6);

    let mut xs = [1.0];
    let mut ys = [2.0, 3.0];
    assert!(matches!(
        transform.transform_coords(&mut xs, &mut ys, &mut []),
        Err(GeoError::BadArgument(_))
    ));
}

#[test]
fn identity_truncates() {
    let wgs84 = SpatialRef::from_epsg(4326).unwrap();
    let transform = CoordTransform::new(&wgs84, &wgs84).unwrap();
    assert!(transform.is_identity());

    let points = [
        coord! { x: 10.9, y: 20.1 },
        coord! { x: -10.9, y: -20.1 },
        coord! { x: 0.4, y: -0.4 },
    ];
    let out = transform.transform_truncated(&points).unwrap();
    assert_eq!(
        out,
        vec![
            coord! { x: 10, y: 20 },
            coord! { x: -10, y: -20 },
            coord! { x: 0, y: 0 },
        ]
    );
}

#[test]
fn preserves_order_and_length() {
    let points: Vec<Coord<f64>> = (0..25)
        .map(|i| coord! { x: -120.0 + i as f64 * 7.3, y: -60.0 + i as f64 * 4.9 })
        .collect();
    let projected = reproject(&points, 4326, 3857).unwrap();
    assert_eq!(projected.len(), points.len());

    // x grows monotonically with longitude in web mercator
    assert!(projected.windows(2).all(|w| w[0].x < w[1].x));
    assert!(projected.windows(2).all(|w| w[0].y < w[1].y));
}

#[test]
fn round_trip_within_truncation_error() {
    let points = [
        coord! { x: 10.5, y: 51.7 },
        coord! { x: -122.4, y: 37.8 },
        coord! { x: 139.7, y: -35.7 },
        coord! { x: 10.0, y: 20.0 },
    ];
    let projected = reproject(&points, 4326, 3857).unwrap();
    let projected: Vec<Coord<f64>> = projected
        .iter()
        .map(|c| coord! { x: c.x as f64, y: c.y as f64 })
        .collect();
    let back = reproject(&projected, 3857, 4326).unwrap();

    for (original, result) in points.iter().zip(&back) {
        assert!((original.x.trunc() as i64 - result.x).abs() <= 1);
        assert!((original.y.trunc() as i64 - result.y).abs() <= 1);
    }
}

#[test]
fn invalid_crs_in_reproject() {
    let points = [coord! { x: 1.0, y: 1.0 }];
    assert!(matches!(
        reproject(&points, 4326, 999_999),
        Err(GeoError::InvalidCrs { .. })
    ));
    assert!(matches!(
        reproject(&points, 999_999, 4326),
        Err(GeoError::InvalidCrs { .. })
    ));
}

#[test]
fn empty_input() {
    assert!(matches!(
        reproject(&[], 4326, 3857),
        Err(GeoError::EmptyInput { .. })
    ));
}

#[test]
fn failing_transformation() {
    let wgs84 = SpatialRef::from_epsg(4326).unwrap();
    let webmercator = SpatialRef::from_epsg(3857).unwrap();

    let mut x = [1000000.0];
    let mut y = [1000000.0];

    let trafo = CoordTransform::new(&wgs84, &webmercator).unwrap();
    let r = trafo.transform_coords(&mut x, &mut y, &mut []);

    if let Err(GeoError::InvalidCoordinateRange { from, to, msg }) = r {
        assert_eq!(from, "EPSG:4326");
        assert_eq!(to, "EPSG:3857");
        assert!(msg.is_some());
    } else {
        panic!("Wrong error type");
    }

    // a failure anywhere fails the whole batch
    let points = [coord! { x: 1.0, y: 1.0 }, coord! { x: 0.0, y: 95.0 }];
    assert!(trafo.transform_truncated(&points).is_err());

    let mut xs = [10.0, 20.0, 30.0];
    let mut ys = [45.0, 95.0, -45.0];
    let mut zs = [1.0, 2.0, 3.0];
    assert!(matches!(
        trafo.transform_coords(&mut xs, &mut ys, &mut zs),
        Err(GeoError::InvalidCoordinateRange { .. })
    ));
    assert_eq!(xs, [10.0, 20.0, 30.0]);
    assert_eq!(ys, [45.0, 95.0, -45.0]);
    assert_eq!(zs, [1.0, 2.0, 3.0]);
}
