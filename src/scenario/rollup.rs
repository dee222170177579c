use std::collections::HashMap;

use serde::Serialize;

use crate::asset::record::Asset;

/// Label used in the type histogram for assets without a type.
pub const UNKNOWN_ASSET_TYPE: &str = "Unknown";

/// Totals over every asset in a council and/or community district, regardless of selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictRollup {
    pub title: String,
    pub council_dist: Option<i64>,
    pub community_dist: Option<i64>,
    pub asset_count: usize,
    pub total_area_sqft: f64,
    pub total_capacity_gal: f64,
    pub total_maintenance_hours: f64,
    /// Asset counts per type, most common first.
    pub asset_types: Vec<(String, usize)>,
}

fn rollup_title(council_dist: Option<i64>, community_dist: Option<i64>) -> Option<String> {
    match (council_dist, community_dist) {
        (Some(council), Some(community)) => Some(format!(
            "Council District {} / Community District {}",
            council, community
        )),
        (Some(council), None) => Some(format!("City Council District {}", council)),
        (None, Some(community)) => Some(format!("Community District {}", community)),
        (None, None) => None,
    }
}

impl DistrictRollup {
    /// Returns `None` when no district is chosen.
    pub fn compute(
        assets: &[Asset],
        council_dist: Option<i64>,
        community_dist: Option<i64>,
    ) -> Option<Self> {
        let title = rollup_title(council_dist, community_dist)?;
        let mut rollup = Self {
            title,
            council_dist,
            community_dist,
            asset_count: 0,
            total_area_sqft: 0.0,
            total_capacity_gal: 0.0,
            total_maintenance_hours: 0.0,
            asset_types: Vec::new(),
        };

        let mut type_counts: HashMap<&str, usize> = HashMap::new();
        let in_district = |asset: &&Asset| {
            council_dist.map_or(true, |code| asset.council_code() == Some(code))
                && community_dist.map_or(true, |code| asset.community_code() == Some(code))
        };
        for asset in assets.iter().filter(in_district) {
            rollup.asset_count += 1;
            rollup.total_area_sqft += asset.asset_area.unwrap_or(0.0);
            rollup.total_capacity_gal += asset.base_capacity_gal;
            rollup.total_maintenance_hours += asset.maintenance_hours_per_month;
            let asset_type = asset.asset_type.as_deref().unwrap_or(UNKNOWN_ASSET_TYPE);
            *type_counts.entry(asset_type).or_insert(0) += 1;
        }

        let mut asset_types: Vec<(String, usize)> = type_counts
            .into_iter()
            .map(|(asset_type, count)| (asset_type.to_string(), count))
            .collect();
        asset_types.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        rollup.asset_types = asset_types;
        Some(rollup)
    }

    /// The headline district number and its kind, council taking precedence.
    pub fn headline_district(&self) -> (&'static str, Option<i64>) {
        match self.council_dist {
            Some(council) => ("District", Some(council)),
            None => ("Community District", self.community_dist),
        }
    }
}
