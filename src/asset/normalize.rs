use std::collections::HashSet;

use geojson::JsonObject;
use rayon::prelude::*;
use serde_json::Value;

use super::record::Asset;

/// Gallons per cubic foot.
pub const GALLONS_PER_CUBIC_FOOT: f64 = 7.48052;
/// Assumed ponding depth (6 inches) when no infiltration rate is known.
pub const PONDING_DEPTH_FT: f64 = 0.5;
pub const DEFAULT_BASE_CAPACITY_GAL: f64 = 2500.0;
pub const DEFAULT_MAINTENANCE_HOURS_PER_MONTH: f64 = 3.5;
/// Footprints at or below this area get the smaller maintenance step.
pub const SMALL_FOOTPRINT_SQFT: f64 = 1000.0;
pub const SMALL_FOOTPRINT_HOURS: f64 = 3.0;
pub const LARGE_FOOTPRINT_HOURS: f64 = 4.0;

/// Source key of the measured prior-year figure. Exports write it as `gallons_saved_2025`.
const GALLONS_SAVED_KEY: &str = "2025_gallons_saved";
/// Keys consumed by normalization. Everything else passes through into `Asset::extra`.
const CONSUMED_KEYS: [&str; 12] = [
    "asset_id",
    "asset_type",
    "asset_area",
    "base_capacity_gal",
    "effective_infiltration_inhr",
    "maintenance_hours_per_month",
    "council_dist",
    "city_counc",
    "community_dist",
    "community_",
    GALLONS_SAVED_KEY,
    "gallons_saved_2025",
];

/// Scenario fields resolved from an arbitrary property bag.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedProperties {
    pub asset_id: String,
    pub asset_type: Option<String>,
    pub asset_area: Option<f64>,
    pub base_capacity_gal: f64,
    pub effective_infiltration_inhr: Option<f64>,
    pub maintenance_hours_per_month: f64,
    pub council_dist: Option<f64>,
    pub community_dist: Option<f64>,
    pub gallons_saved_2025: Option<f64>,
}

/// Loose numeric coercion of a JSON value. Numeric strings are parsed, an empty string is 0
/// and booleans map to 1/0. Anything that does not yield a finite number is `None`.
pub fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => {
            let text = text.trim();
            if text.is_empty() {
                Some(0.0)
            } else {
                text.parse::<f64>().ok()
            }
        }
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    };
    number.filter(|n| n.is_finite())
}

fn number_property(properties: &JsonObject, key: &str) -> Option<f64> {
    properties.get(key).and_then(coerce_number)
}

fn is_present(properties: &JsonObject, key: &str) -> bool {
    properties.get(key).map_or(false, |value| !value.is_null())
}

/// Read a number from its canonical key, falling back to the legacy key only when the
/// canonical one is absent.
fn property_with_fallback(properties: &JsonObject, canonical: &str, legacy: &str) -> Option<f64> {
    if is_present(properties, canonical) {
        number_property(properties, canonical)
    } else {
        number_property(properties, legacy)
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

/// Resolve the nominal capacity. The first satisfied source wins.
pub fn resolve_base_capacity(
    gallons_saved: Option<f64>,
    infiltration_inhr: Option<f64>,
    area_sqft: Option<f64>,
    provided_capacity: Option<f64>,
) -> f64 {
    if let Some(gallons) = positive(gallons_saved) {
        return gallons;
    }
    if let (Some(rate), Some(area)) = (positive(infiltration_inhr), positive(area_sqft)) {
        let cubic_feet_per_hour = area * (rate / 12.0);
        return cubic_feet_per_hour * GALLONS_PER_CUBIC_FOOT;
    }
    if let Some(area) = positive(area_sqft) {
        return area * PONDING_DEPTH_FT * GALLONS_PER_CUBIC_FOOT;
    }
    provided_capacity.unwrap_or(DEFAULT_BASE_CAPACITY_GAL)
}

pub fn resolve_maintenance_hours(provided_hours: Option<f64>, area_sqft: Option<f64>) -> f64 {
    if let Some(hours) = provided_hours {
        return hours;
    }
    match positive(area_sqft) {
        Some(area) if area <= SMALL_FOOTPRINT_SQFT => SMALL_FOOTPRINT_HOURS,
        Some(_) => LARGE_FOOTPRINT_HOURS,
        None => DEFAULT_MAINTENANCE_HOURS_PER_MONTH,
    }
}

fn asset_id_property(properties: &JsonObject) -> Option<String> {
    match properties.get("asset_id")? {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

pub fn new_asset_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub fn normalize_properties(properties: &JsonObject) -> NormalizedProperties {
    let gallons_saved_2025 =
        property_with_fallback(properties, GALLONS_SAVED_KEY, "gallons_saved_2025");
    let effective_infiltration_inhr = number_property(properties, "effective_infiltration_inhr");
    let asset_area = number_property(properties, "asset_area");
    let base_capacity_gal = resolve_base_capacity(
        gallons_saved_2025,
        effective_infiltration_inhr,
        asset_area,
        number_property(properties, "base_capacity_gal"),
    );
    let maintenance_hours_per_month = resolve_maintenance_hours(
        number_property(properties, "maintenance_hours_per_month"),
        asset_area,
    );
    let asset_type = properties
        .get("asset_type")
        .and_then(|value| value.as_str())
        .filter(|value| !value.is_empty())
        .map(str::to_string);

    NormalizedProperties {
        asset_id: asset_id_property(properties).unwrap_or_else(new_asset_id),
        asset_type,
        asset_area,
        base_capacity_gal,
        effective_infiltration_inhr,
        maintenance_hours_per_month,
        council_dist: property_with_fallback(properties, "council_dist", "city_counc"),
        community_dist: property_with_fallback(properties, "community_dist", "community_"),
        gallons_saved_2025,
    }
}

/// Normalize one GeoJSON feature. Returns `None` when the feature has no point geometry.
pub fn normalize_feature(feature: geojson::Feature) -> Option<Asset> {
    let point = match feature.geometry?.value {
        geojson::Value::Point(position) if position.len() >= 2 => {
            geo::Point::new(position[0], position[1])
        }
        _ => return None,
    };
    let properties = feature.properties.unwrap_or_default();
    let normalized = normalize_properties(&properties);
    let extra: JsonObject = properties
        .into_iter()
        .filter(|(key, _)| !CONSUMED_KEYS.contains(&key.as_str()))
        .collect();

    Some(Asset {
        asset_id: normalized.asset_id,
        geometry: point,
        asset_type: normalized.asset_type,
        asset_area: normalized.asset_area,
        base_capacity_gal: normalized.base_capacity_gal,
        effective_infiltration_inhr: normalized.effective_infiltration_inhr,
        maintenance_hours_per_month: normalized.maintenance_hours_per_month,
        council_dist: normalized.council_dist,
        community_dist: normalized.community_dist,
        gallons_saved_2025: normalized.gallons_saved_2025,
        extra,
    })
}

/// Normalize a whole collection into the working asset list.
///
/// Non-point features are dropped. Ids that repeat an earlier asset are replaced with a fresh
/// identifier so every id in the returned list is unique.
pub fn normalize_features(collection: geojson::FeatureCollection) -> Vec<Asset> {
    let num_features = collection.features.len();
    let mut assets: Vec<Asset> = collection
        .features
        .into_par_iter()
        .filter_map(normalize_feature)
        .collect();
    if assets.len() != num_features {
        log::warn!(
            "Out of {} features read, only {} were Points.",
            num_features,
            assets.len()
        )
    }

    let mut seen: HashSet<String> = HashSet::with_capacity(assets.len());
    for asset in assets.iter_mut() {
        if !seen.insert(asset.asset_id.clone()) {
            let replacement = new_asset_id();
            log::warn!(
                "Duplicate asset id {}, re-keyed as {}",
                asset.asset_id,
                replacement
            );
            asset.asset_id = replacement;
            seen.insert(asset.asset_id.clone());
        }
    }
    assets
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use approx::assert_abs_diff_eq;
    use rstest::rstest;
    use serde_json::{json, Value};

    use super::{
        coerce_number, normalize_feature, normalize_features, normalize_properties,
        resolve_maintenance_hours, GALLONS_PER_CUBIC_FOOT,
    };

    fn props(value: Value) -> geojson::JsonObject {
        value.as_object().unwrap().clone()
    }

    fn point_feature(properties: Value) -> geojson::Feature {
        geojson::Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(geojson::Value::Point(vec![
                -73.83, 40.72,
            ]))),
            id: None,
            properties: Some(props(properties)),
            foreign_members: None,
        }
    }

    #[rstest]
    #[case(json!(12), Some(12.0))]
    #[case(json!("19.0"), Some(19.0))]
    #[case(json!(" 7 "), Some(7.0))]
    #[case(json!(""), Some(0.0))]
    #[case(json!(true), Some(1.0))]
    #[case(json!("abc"), None)]
    #[case(json!(null), None)]
    #[case(json!([1]), None)]
    fn test_coerce_number(#[case] value: Value, #[case] expected: Option<f64>) {
        assert_eq!(coerce_number(&value), expected);
    }

    #[test]
    fn test_prior_year_gallons_take_priority() {
        let normalized = normalize_properties(&props(json!({
            "2025_gallons_saved": 1200,
            "effective_infiltration_inhr": 0.4,
            "asset_area": 800,
            "base_capacity_gal": 99
        })));
        assert_abs_diff_eq!(normalized.base_capacity_gal, 1200.0);
        assert_eq!(normalized.gallons_saved_2025, Some(1200.0));
    }

    #[test]
    fn test_infiltration_estimate() {
        let normalized = normalize_properties(&props(json!({
            "2025_gallons_saved": 0,
            "effective_infiltration_inhr": 0.6,
            "asset_area": 1200
        })));
        let expected = 1200.0 * (0.6 / 12.0) * GALLONS_PER_CUBIC_FOOT;
        assert_abs_diff_eq!(normalized.base_capacity_gal, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_ponding_estimate_without_infiltration() {
        let normalized = normalize_properties(&props(json!({
            "effective_infiltration_inhr": 0,
            "asset_area": 400,
            "base_capacity_gal": 99
        })));
        assert_abs_diff_eq!(
            normalized.base_capacity_gal,
            400.0 * 0.5 * GALLONS_PER_CUBIC_FOOT,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_provided_capacity_used_without_area() {
        let normalized = normalize_properties(&props(json!({ "base_capacity_gal": "3100" })));
        assert_abs_diff_eq!(normalized.base_capacity_gal, 3100.0);
    }

    #[test]
    fn test_fallback_capacity() {
        let normalized = normalize_properties(&props(json!({ "asset_type": "Rain Garden" })));
        assert_abs_diff_eq!(normalized.base_capacity_gal, 2500.0);
        assert_abs_diff_eq!(normalized.maintenance_hours_per_month, 3.5);
    }

    #[rstest]
    #[case(Some(6.0), Some(5000.0), 6.0)]
    #[case(None, Some(1000.0), 3.0)]
    #[case(None, Some(1000.5), 4.0)]
    #[case(None, Some(0.0), 3.5)]
    #[case(None, None, 3.5)]
    fn test_resolve_maintenance_hours(
        #[case] provided: Option<f64>,
        #[case] area: Option<f64>,
        #[case] expected: f64,
    ) {
        assert_abs_diff_eq!(resolve_maintenance_hours(provided, area), expected);
    }

    #[test]
    fn test_legacy_district_fields() {
        let normalized = normalize_properties(&props(json!({
            "city_counc": "20",
            "community_": 407
        })));
        assert_eq!(normalized.council_dist, Some(20.0));
        assert_eq!(normalized.community_dist, Some(407.0));

        let canonical_wins = normalize_properties(&props(json!({
            "council_dist": 21,
            "city_counc": 20
        })));
        assert_eq!(canonical_wins.council_dist, Some(21.0));
    }

    #[test]
    fn test_asset_id_kept_or_generated() {
        let kept = normalize_properties(&props(json!({ "asset_id": 4711 })));
        assert_eq!(kept.asset_id, "4711");

        let generated = normalize_properties(&props(json!({})));
        assert!(uuid::Uuid::parse_str(&generated.asset_id).is_ok());
    }

    #[test]
    fn test_non_point_geometry_discarded() {
        let mut feature = point_feature(json!({ "asset_id": "a" }));
        feature.geometry = Some(geojson::Geometry::new(geojson::Value::LineString(vec![
            vec![0.0, 0.0],
            vec![1.0, 1.0],
        ])));
        assert!(normalize_feature(feature).is_none());

        let mut feature = point_feature(json!({ "asset_id": "b" }));
        feature.geometry = None;
        assert!(normalize_feature(feature).is_none());
    }

    #[test]
    fn test_unconsumed_properties_pass_through() {
        let asset = normalize_feature(point_feature(json!({
            "asset_id": "a",
            "borough": "Queens",
            "city_counc": 20
        })))
        .unwrap();
        assert_eq!(asset.extra.get("borough"), Some(&json!("Queens")));
        assert!(!asset.extra.contains_key("city_counc"));
        assert_eq!(asset.geometry, geo::Point::new(-73.83, 40.72));
    }

    #[test]
    fn test_normalize_features_unique_ids() {
        let collection = geojson::FeatureCollection {
            bbox: None,
            features: vec![
                point_feature(json!({ "asset_id": "dup" })),
                point_feature(json!({ "asset_id": "dup" })),
                point_feature(json!({})),
            ],
            foreign_members: None,
        };
        let assets = normalize_features(collection);
        assert_eq!(assets.len(), 3);
        assert_eq!(assets[0].asset_id, "dup");
        let ids: HashSet<&str> = assets.iter().map(|a| a.asset_id.as_str()).collect();
        assert_eq!(ids.len(), 3);
    }
}
