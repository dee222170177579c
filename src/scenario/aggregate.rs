use std::collections::HashSet;

use serde::Serialize;

use crate::asset::record::Asset;

use super::{decay::effective_capacity, quality::InfiltrationQuality};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScenarioSummary {
    pub weeks: u32,
    pub count: usize,
    /// Capacity after `weeks` of delayed maintenance.
    pub effective_gallons: f64,
    pub base_gallons: f64,
    pub lost_gallons: f64,
    /// Share of `base_gallons` lost to the delay, zero when there is no capacity.
    pub loss_percent: f64,
    pub maintenance_hours: f64,
    pub average_gallons: f64,
    /// Mean over selected assets with a positive infiltration rate.
    pub average_infiltration_inhr: Option<f64>,
    pub infiltration_count: usize,
    pub drainage: Option<InfiltrationQuality>,
}

impl ScenarioSummary {
    pub fn compute(assets: &[Asset], selected: &HashSet<String>, weeks: u32) -> Self {
        let mut summary = Self {
            weeks,
            ..Self::default()
        };
        let mut infiltration_sum = 0.0;
        for asset in assets
            .iter()
            .filter(|asset| selected.contains(&asset.asset_id))
        {
            summary.count += 1;
            summary.effective_gallons += effective_capacity(asset.base_capacity_gal, weeks);
            summary.base_gallons += asset.base_capacity_gal;
            summary.maintenance_hours += asset.maintenance_hours_per_month;
            if let Some(rate) = asset.positive_infiltration() {
                infiltration_sum += rate;
                summary.infiltration_count += 1;
            }
        }

        summary.lost_gallons = summary.base_gallons - summary.effective_gallons;
        if summary.base_gallons > 0.0 {
            summary.loss_percent = summary.lost_gallons / summary.base_gallons * 100.0;
        }
        if summary.count > 0 {
            summary.average_gallons = summary.effective_gallons / summary.count as f64;
        }
        if summary.infiltration_count > 0 {
            let average = infiltration_sum / summary.infiltration_count as f64;
            summary.average_infiltration_inhr = Some(average);
            summary.drainage = InfiltrationQuality::classify(Some(average));
        }
        summary
    }
}
