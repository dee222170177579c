use geojson::JsonObject;
use serde_json::Value;

/// A normalized green-infrastructure point asset.
///
/// All fields the scenario engine reads are resolved up front by
/// `normalize::normalize_feature`, so consumers never deal with raw property bags.
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    pub asset_id: String,
    pub geometry: geo::Point,
    pub asset_type: Option<String>,
    /// Footprint in square feet.
    pub asset_area: Option<f64>,
    /// Nominal capacity in gallons when fully maintained.
    pub base_capacity_gal: f64,
    /// Soil infiltration rate in inches per hour.
    pub effective_infiltration_inhr: Option<f64>,
    pub maintenance_hours_per_month: f64,
    pub council_dist: Option<f64>,
    pub community_dist: Option<f64>,
    pub gallons_saved_2025: Option<f64>,
    /// Source properties that are not interpreted, written back unchanged on export.
    pub extra: JsonObject,
}

/// Round a loosely typed district value to its integer code.
pub fn district_code(value: Option<f64>) -> Option<i64> {
    value.filter(|v| v.is_finite()).map(|v| v.round() as i64)
}

impl Asset {
    pub fn council_code(&self) -> Option<i64> {
        district_code(self.council_dist)
    }

    pub fn community_code(&self) -> Option<i64> {
        district_code(self.community_dist)
    }

    /// Rate used for drainage statistics, only when it is positive and finite.
    pub fn positive_infiltration(&self) -> Option<f64> {
        self.effective_infiltration_inhr
            .filter(|rate| rate.is_finite() && *rate > 0.0)
    }

    fn properties(&self) -> JsonObject {
        let mut properties = self.extra.clone();
        let number = |value: Option<f64>| match value {
            Some(v) => serde_json::Number::from_f64(v).map_or(Value::Null, Value::Number),
            None => Value::Null,
        };
        properties.insert("asset_id".to_string(), Value::from(self.asset_id.clone()));
        properties.insert(
            "asset_type".to_string(),
            self.asset_type.clone().map_or(Value::Null, Value::from),
        );
        properties.insert("asset_area".to_string(), number(self.asset_area));
        properties.insert(
            "base_capacity_gal".to_string(),
            number(Some(self.base_capacity_gal)),
        );
        properties.insert(
            "effective_infiltration_inhr".to_string(),
            number(self.effective_infiltration_inhr),
        );
        properties.insert(
            "maintenance_hours_per_month".to_string(),
            number(Some(self.maintenance_hours_per_month)),
        );
        properties.insert("council_dist".to_string(), number(self.council_dist));
        properties.insert("community_dist".to_string(), number(self.community_dist));
        properties.insert(
            "gallons_saved_2025".to_string(),
            number(self.gallons_saved_2025),
        );
        properties
    }
}

impl From<&Asset> for geojson::Feature {
    fn from(asset: &Asset) -> Self {
        geojson::Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::from(&asset.geometry)),
            id: None,
            properties: Some(asset.properties()),
            foreign_members: None,
        }
    }
}
