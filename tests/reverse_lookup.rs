use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use serde_json::{json, Value};

use regeo::config::Config;
use regeo::{GeoDataProvider, Geocoder, LoadError, NameField};

fn write_gz(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    let file = std::fs::File::create(&path).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(value.to_string().as_bytes()).unwrap();
    encoder.finish().unwrap();
    path
}

fn polygon(id: i64, ring: &[[f64; 2]], properties: Value) -> Value {
    let mut properties = properties;
    properties["id"] = json!(id);
    json!({
        "type": "Feature",
        "geometry": { "type": "Polygon", "coordinates": [ring] },
        "properties": properties
    })
}

fn rect(min: [f64; 2], max: [f64; 2]) -> Vec<[f64; 2]> {
    vec![
        [min[0], min[1]],
        [max[0], min[1]],
        [max[0], max[1]],
        [min[0], max[1]],
        [min[0], min[1]],
    ]
}

/// Country with two provinces, one of which is a multi-polygon with a hole
fn write_dataset(dir: &Path) -> String {
    let level2 = write_gz(
        dir,
        "earth_l2.geojson.gz",
        &json!({
            "type": "FeatureCollection",
            "features": [
                polygon(100, &rect([0.0, 0.0], [40.0, 20.0]), json!({ "local_name": "中国", "name_en": "China" }))
            ]
        }),
    );

    let level4 = write_gz(
        dir,
        "cn_l4.geojson.gz",
        &json!({
            "type": "FeatureCollection",
            "features": [
                polygon(
                    110,
                    &rect([0.0, 0.0], [20.0, 20.0]),
                    json!({ "parents": "100", "local_name": "浙江省", "name_en": "Zhejiang" })
                ),
                {
                    "type": "Feature",
                    "geometry": {
                        "type": "MultiPolygon",
                        "coordinates": [
                            [rect([20.0, 0.0], [30.0, 20.0]), rect([24.0, 8.0], [26.0, 12.0])],
                            [rect([32.0, 0.0], [40.0, 20.0])]
                        ]
                    },
                    "properties": { "id": 120, "parents": "100", "local_name": "江苏省", "name_en": "Jiangsu" }
                }
            ]
        }),
    );

    let level5 = write_gz(
        dir,
        "cn_l5.geojson.gz",
        &json!({
            "type": "FeatureCollection",
            "features": [
                polygon(
                    111,
                    &rect([0.0, 0.0], [5.0, 5.0]),
                    json!({ "parents": "110,100,bogus", "local_name": "杭州市", "name_en": "Hangzhou" })
                )
            ]
        }),
    );

    format!(
        r#"
        listen = "127.0.0.1:0"

        [geojsons]
        level2 = ["{}"]
        CN = ["{}"]
        CN-city = ["{}"]
        "#,
        level2.display(),
        level4.display(),
        level5.display()
    )
}

fn geocoder(dir: &Path) -> Geocoder {
    let config_path = dir.join("config.toml");
    std::fs::write(&config_path, write_dataset(dir)).unwrap();
    let config = Config::load_from_file(&config_path).unwrap();
    Geocoder::build(config.provider_entries()).unwrap()
}

#[test]
fn test_province_lookup() {
    let dir = tempfile::tempdir().unwrap();
    let geocoder = geocoder(dir.path());

    let result = geocoder.reverse("CN", 10.0, 10.0, NameField::Local).unwrap();
    assert!(result.hit);
    assert_eq!(result.id, Some(110));
    assert_eq!(result.name, "中国 浙江省");
}

#[test]
fn test_multipolygon_member_and_hole() {
    let dir = tempfile::tempdir().unwrap();
    let geocoder = geocoder(dir.path());

    assert_eq!(geocoder.contains("CN", 35.0, 10.0).unwrap(), Some(120));
    assert_eq!(geocoder.contains("CN", 22.0, 10.0).unwrap(), Some(120));
    // inside the hole of the first member polygon
    assert_eq!(geocoder.contains("CN", 25.0, 10.0).unwrap(), None);
    // on the hole's ring
    assert_eq!(geocoder.contains("CN", 24.0, 10.0).unwrap(), None);
    // on the outer ring of the second member polygon
    assert_eq!(geocoder.contains("CN", 40.0, 10.0).unwrap(), Some(120));
    // gap between the two member polygons
    assert_eq!(geocoder.contains("CN", 31.0, 10.0).unwrap(), None);
}

#[test]
fn test_city_name_walks_parents_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let geocoder = geocoder(dir.path());

    let result = geocoder.reverse("CN-city", 1.0, 1.0, NameField::English).unwrap();
    assert_eq!(result.id, Some(111));
    assert_eq!(result.name, "China Zhejiang Hangzhou");
    assert_eq!(geocoder.get_info(111).unwrap().parent_ids, vec![110, 100]);
}

#[test]
fn test_outside_every_feature() {
    let dir = tempfile::tempdir().unwrap();
    let geocoder = geocoder(dir.path());

    let result = geocoder.reverse("level2", 120.0, 30.0, NameField::Local).unwrap();
    assert!(!result.hit);
    assert!(result.id.is_none());
    assert!(geocoder.reverse("JP", 1.0, 1.0, NameField::Local).is_err());
}

#[test]
fn test_root_merges_every_key() {
    let dir = tempfile::tempdir().unwrap();
    let geocoder = geocoder(dir.path());
    let root = geocoder.root();

    assert_eq!(root.child_keys(), vec!["CN", "CN-city", "level2"]);
    assert_eq!(root.id_map().len(), 4);
    assert!(root.get_provider("CN").unwrap().get_info(100).is_none());
    assert!(geocoder.get_info(100).is_some());
}

#[test]
fn test_bad_file_fails_build() {
    let dir = tempfile::tempdir().unwrap();
    let broken = dir.path().join("broken.geojson.gz");
    std::fs::write(&broken, b"not gzip at all").unwrap();

    let result = Geocoder::build(vec![("XX".to_string(), vec![broken])]);
    assert!(matches!(result, Err(LoadError::Decompress { .. })));
}
