use serde_json::Value;

use crate::assert_near;
use crate::bbox::{BoundingBox, BoundingBoxes};
use crate::errors::GeoError;
use crate::map::{BBoxMap, MapOptions};
use crate::test_utils::TempFixture;

fn scenes() -> BoundingBoxes {
    let mut boxes = BoundingBoxes::new();
    boxes.insert("S2B_10SEG".to_string(), BoundingBox::from([-122.0, 37.0, -121.0, 38.0]));
    boxes.insert("S2A_10SFG".to_string(), BoundingBox::from([-120.0, 35.0, -119.0, 36.0]));
    boxes.insert("LC09_043034".to_string(), BoundingBox::from([-124.0, 39.0, -123.0, 40.0]));
    boxes
}

/// The JSON object embedded in the page script.
fn embedded_config(html: &str) -> Value {
    let line = html
        .lines()
        .find_map(|line| line.strip_prefix("var config = "))
        .expect("page has a config line");
    serde_json::from_str(line.trim_end_matches(';')).unwrap()
}

#[test]
fn test_layers_follow_insertion_order() {
    let map = BBoxMap::new(&scenes(), MapOptions::default()).unwrap();
    let names: Vec<_> = map.layers().iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["S2B_10SEG", "S2A_10SFG", "LC09_043034"]);
    assert_eq!(map.layers()[0].bounds, [[37.0, -122.0], [38.0, -121.0]]);
}

#[test]
fn test_center_is_centroid() {
    let map = BBoxMap::new(&scenes(), MapOptions::default()).unwrap();
    assert_eq!(map.center().x, (-121.5 + -119.5 + -123.5) / 3.0);
    assert_eq!(map.center().y, (37.5 + 35.5 + 39.5) / 3.0);
}

#[test]
fn test_html_page() {
    let map = BBoxMap::new(&scenes(), MapOptions::default()).unwrap();
    let html = map.to_html().unwrap();

    assert!(html.contains("#map { width: 700px; height: 600px; }"));
    assert!(html.contains("L.control.layers(null, overlays)"));
    assert!(html.contains("bindTooltip(layer.name)"));

    let config = embedded_config(&html);
    assert_eq!(config["zoom"], 7);
    assert_near!(config["center"][0].as_f64().unwrap(), map.center().y, epsilon = 1e-9);
    assert_near!(config["center"][1].as_f64().unwrap(), map.center().x, epsilon = 1e-9);
    assert_eq!(config["style"]["color"], "blue");
    assert_eq!(config["style"]["fillColor"], "blue");
    assert_eq!(config["style"]["fillOpacity"], 0.3);

    let layers = config["layers"].as_array().unwrap();
    assert_eq!(layers.len(), 3);
    assert_eq!(layers[1]["name"], "S2A_10SFG");
    assert_eq!(layers[1]["bounds"][0][0], 35.0);
    assert_eq!(layers[1]["bounds"][1][1], -119.0);
}

#[test]
fn test_identifiers_are_escaped() {
    let mut boxes = BoundingBoxes::new();
    boxes.insert(
        "</script><b>\"quoted\"</b>".to_string(),
        BoundingBox::from([0.0, 0.0, 1.0, 1.0]),
    );
    let html = BBoxMap::new(&boxes, MapOptions::default())
        .unwrap()
        .to_html()
        .unwrap();

    assert_eq!(html.matches("</script>").count(), 2);
    let config = embedded_config(&html);
    assert_eq!(config["layers"][0]["name"], "</script><b>\"quoted\"</b>");
}

#[test]
fn test_custom_options() {
    let options = MapOptions {
        zoom_start: 3,
        width: 1024,
        height: 512,
        color: "#ff7800".to_string(),
        fill_opacity: 0.0,
        ..Default::default()
    };
    let html = BBoxMap::new(&scenes(), options).unwrap().to_html().unwrap();
    assert!(html.contains("width: 1024px; height: 512px;"));

    let config = embedded_config(&html);
    assert_eq!(config["zoom"], 3);
    assert_eq!(config["style"]["color"], "#ff7800");
}

#[test]
fn test_invalid_options() {
    for options in [
        MapOptions {
            zoom_start: 19,
            ..Default::default()
        },
        MapOptions {
            width: 0,
            ..Default::default()
        },
        MapOptions {
            fill_opacity: 1.5,
            ..Default::default()
        },
        MapOptions {
            fill_opacity: f64::NAN,
            ..Default::default()
        },
        MapOptions {
            color: " ".to_string(),
            ..Default::default()
        },
    ] {
        assert!(matches!(
            BBoxMap::new(&scenes(), options),
            Err(GeoError::BadArgument(_))
        ));
    }
}

#[test]
fn test_empty_boxes() {
    assert!(matches!(
        BBoxMap::new(&BoundingBoxes::new(), MapOptions::default()),
        Err(GeoError::EmptyInput { .. })
    ));
}

#[test]
fn test_save() {
    let map = BBoxMap::new(&scenes(), MapOptions::default()).unwrap();
    let output = TempFixture::empty("bboxes.html");
    map.save(&output).unwrap();

    let written = std::fs::read_to_string(output.path()).unwrap();
    assert_eq!(written, map.to_html().unwrap());
}
