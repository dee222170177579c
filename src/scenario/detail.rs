use std::collections::HashSet;

use serde::Serialize;

use crate::asset::record::Asset;

use super::quality::InfiltrationQuality;

const DEFAULT_TYPE_LABEL: &str = "Rain Garden";

/// Per-asset record shown in the selection list and in the click popup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetDetail {
    pub asset_id: String,
    pub asset_type: String,
    pub asset_area: Option<f64>,
    pub base_capacity_gal: f64,
    pub gallons_saved_2025: Option<f64>,
    pub effective_infiltration_inhr: Option<f64>,
    pub drainage: Option<InfiltrationQuality>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drainage_note: Option<&'static str>,
    pub maintenance_hours_per_month: f64,
    pub council_dist: Option<i64>,
    pub community_dist: Option<i64>,
    pub selected: bool,
}

impl AssetDetail {
    pub fn new(asset: &Asset, selected: bool) -> Self {
        let drainage = InfiltrationQuality::classify(asset.effective_infiltration_inhr);
        Self {
            asset_id: asset.asset_id.clone(),
            asset_type: asset
                .asset_type
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_TYPE_LABEL.to_string()),
            asset_area: asset.asset_area,
            base_capacity_gal: asset.base_capacity_gal,
            gallons_saved_2025: asset.gallons_saved_2025,
            effective_infiltration_inhr: asset.effective_infiltration_inhr,
            drainage,
            drainage_note: drainage.map(|quality| quality.description()),
            maintenance_hours_per_month: asset.maintenance_hours_per_month,
            council_dist: asset.council_code(),
            community_dist: asset.community_code(),
            selected,
        }
    }
}

/// Details of the selected assets, in asset list order.
pub fn selected_details(assets: &[Asset], selected: &HashSet<String>) -> Vec<AssetDetail> {
    assets
        .iter()
        .filter(|asset| selected.contains(&asset.asset_id))
        .map(|asset| AssetDetail::new(asset, true))
        .collect()
}
