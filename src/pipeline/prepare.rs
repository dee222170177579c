use geojson::JsonObject;
use indicatif::ProgressBar;
use serde_json::Value;

use crate::asset::normalize::{DEFAULT_BASE_CAPACITY_GAL, DEFAULT_MAINTENANCE_HOURS_PER_MONTH};

/// Asset types kept in the core dataset, including in-street rain gardens.
pub const ALLOWED_TYPES: [&str; 2] = ["Rain Garden", "ROWRG"];
pub const CORE_COLLECTION_NAME: &str = "rain_gardens_core";

fn property_or_null(properties: &JsonObject, key: &str) -> Value {
    properties.get(key).cloned().unwrap_or(Value::Null)
}

fn core_properties(properties: &JsonObject) -> JsonObject {
    let mut core = JsonObject::new();
    core.insert(
        "asset_id".to_string(),
        property_or_null(properties, "asset_id"),
    );
    core.insert(
        "council_dist".to_string(),
        property_or_null(properties, "city_counc"),
    );
    core.insert(
        "community_dist".to_string(),
        property_or_null(properties, "community_"),
    );
    core.insert(
        "base_capacity_gal".to_string(),
        properties
            .get("base_capacity_gal")
            .cloned()
            .unwrap_or_else(|| Value::from(DEFAULT_BASE_CAPACITY_GAL)),
    );
    core.insert(
        "maintenance_hours_per_month".to_string(),
        properties
            .get("maintenance_hours_per_month")
            .cloned()
            .unwrap_or_else(|| Value::from(DEFAULT_MAINTENANCE_HOURS_PER_MONTH)),
    );
    core
}

fn is_allowed_type(properties: &JsonObject) -> bool {
    let asset_type = match properties.get("asset_type") {
        Some(Value::String(text)) => text.trim().to_string(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };
    ALLOWED_TYPES.contains(&asset_type.as_str())
}

/// Reduce a raw surface inventory to the rain garden core dataset.
///
/// Only rain garden types survive; each keeps its geometry and the scenario fields, with
/// district codes taken from the inventory's abbreviated column names.
pub fn prepare_core_dataset(source: geojson::FeatureCollection) -> geojson::FeatureCollection {
    let bar = ProgressBar::new(source.features.len() as u64);
    let mut features = Vec::new();
    for feature in source.features {
        bar.inc(1);
        let properties = feature.properties.unwrap_or_default();
        if !is_allowed_type(&properties) {
            continue;
        }
        features.push(geojson::Feature {
            bbox: None,
            geometry: feature.geometry,
            id: None,
            properties: Some(core_properties(&properties)),
            foreign_members: None,
        });
    }
    bar.finish_and_clear();

    let mut foreign_members = JsonObject::new();
    foreign_members.insert("name".to_string(), Value::from(CORE_COLLECTION_NAME));
    geojson::FeatureCollection {
        bbox: None,
        features,
        foreign_members: Some(foreign_members),
    }
}
