use anyhow::{anyhow, Context};
use std::{fs, path::Path};

use crate::asset::record::Asset;

/// Parse GeoJSON text into a feature collection. A lone feature becomes a one-element collection.
pub fn parse_feature_collection(contents: &str) -> anyhow::Result<geojson::FeatureCollection> {
    let geojson: geojson::GeoJson = contents.parse()?;
    match geojson {
        geojson::GeoJson::FeatureCollection(collection) => Ok(collection),
        geojson::GeoJson::Feature(feature) => Ok(geojson::FeatureCollection {
            bbox: None,
            features: vec![feature],
            foreign_members: None,
        }),
        geojson::GeoJson::Geometry(_) => Err(anyhow!(
            "Expected a FeatureCollection, found a bare Geometry"
        )),
    }
}

pub fn read_feature_collection(filepath: &Path) -> anyhow::Result<geojson::FeatureCollection> {
    let contents = fs::read_to_string(filepath)
        .with_context(|| format!("Reading dataset {:?}", filepath))?;
    parse_feature_collection(&contents).with_context(|| format!("Parsing dataset {:?}", filepath))
}

pub fn write_feature_collection(
    collection: geojson::FeatureCollection,
    output_filepath: &Path,
) -> anyhow::Result<()> {
    if let Some(parent) = output_filepath.parent() {
        fs::create_dir_all(parent)?;
    }
    let geojson_contents = geojson::GeoJson::from(collection);
    fs::write(output_filepath, geojson_contents.to_string())
        .with_context(|| format!("Writing {:?}", output_filepath))
}

pub fn write_assets_to_geojson(assets: &[Asset], output_filepath: &Path) -> anyhow::Result<()> {
    let feature_collection: geojson::FeatureCollection =
        assets.iter().map(geojson::Feature::from).collect();
    log::info!(
        "Writing {} assets to {:?}",
        assets.len(),
        output_filepath
    );
    write_feature_collection(feature_collection, output_filepath)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testdir::testdir;

    use crate::asset::normalize::normalize_features;

    use super::{parse_feature_collection, read_feature_collection, write_assets_to_geojson};

    const DATASET: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [-73.83, 40.72] },
                "properties": { "asset_id": "RG-1", "asset_type": "Rain Garden", "city_counc": 20, "asset_area": 400 }
            },
            {
                "type": "Feature",
                "geometry": { "type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]] },
                "properties": { "asset_id": "RG-2" }
            }
        ]
    }"#;

    #[test]
    fn test_parse_feature_collection() {
        let collection = parse_feature_collection(DATASET).unwrap();
        assert_eq!(collection.features.len(), 2);
        let assets = normalize_features(collection);
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].asset_id, "RG-1");
        assert_eq!(assets[0].council_dist, Some(20.0));
    }

    #[test]
    fn test_parse_single_feature_and_geometry() {
        let feature = r#"{"type": "Feature", "geometry": null, "properties": {}}"#;
        assert_eq!(parse_feature_collection(feature).unwrap().features.len(), 1);
        let geometry = r#"{"type": "Point", "coordinates": [1, 2]}"#;
        assert!(parse_feature_collection(geometry).is_err());
        assert!(parse_feature_collection("not json").is_err());
    }

    #[test]
    fn test_write_read_round_trip() {
        let assets = normalize_features(parse_feature_collection(DATASET).unwrap());
        let test_dir = testdir!();
        let filepath = test_dir.join("out").join("assets.geojson");
        write_assets_to_geojson(&assets, &filepath).unwrap();

        let collection = read_feature_collection(&filepath).unwrap();
        assert_eq!(collection.features.len(), 1);
        let feature = &collection.features[0];
        assert_eq!(feature.property("asset_id"), Some(&json!("RG-1")));
        assert_eq!(feature.property("council_dist"), Some(&json!(20.0)));
        assert!(feature.property("base_capacity_gal").is_some());

        let reread = normalize_features(collection);
        assert_eq!(reread, assets);
    }

    #[test]
    fn test_read_missing_file() {
        let test_dir = testdir!();
        assert!(read_feature_collection(&test_dir.join("missing.geojson")).is_err());
    }
}
