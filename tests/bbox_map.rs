use geohelpers::bbox::{find_centroid, BoundingBox, BoundingBoxes};
use geohelpers::errors::GeoError;
use geohelpers::map::{BBoxMap, MapOptions};

fn stac_items() -> Vec<(&'static str, [f64; 4])> {
    vec![
        ("S2A_MSIL2A_20230612_T10SEG", [-122.4, 37.0, -121.1, 38.0]),
        ("S2A_MSIL2A_20230612_T10SFG", [-121.2, 37.0, -119.9, 38.0]),
        ("S2B_MSIL2A_20230615_T10SEF", [-122.4, 36.1, -121.1, 37.1]),
    ]
}

#[test]
fn centroid_then_map() {
    let boxes: BoundingBoxes = stac_items()
        .into_iter()
        .map(|(id, bbox)| (id.to_string(), BoundingBox::from(bbox)))
        .collect();

    let centroid = find_centroid(boxes.values()).unwrap();
    let map = BBoxMap::new(&boxes, MapOptions::default()).unwrap();
    assert_eq!(map.center(), centroid);

    let html = map.to_html().unwrap();
    let positions: Vec<usize> = stac_items()
        .iter()
        .map(|(id, _)| html.find(id).unwrap())
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));

    let output = tempfile::tempdir().unwrap();
    let path = output.path().join("scenes.html");
    map.save(&path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), html);
}

#[test]
fn no_items() {
    assert!(matches!(
        BBoxMap::new(&BoundingBoxes::new(), MapOptions::default()),
        Err(GeoError::EmptyInput { .. })
    ));
}
