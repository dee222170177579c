pub mod district;
pub mod normalize;
pub mod record;

#[cfg(test)]
pub mod test_support {
    use super::record::Asset;

    /// A bare asset at a fixed point with the given capacity and 3 maintenance hours.
    pub fn asset(asset_id: &str, base_capacity_gal: f64) -> Asset {
        Asset {
            asset_id: asset_id.to_string(),
            geometry: geo::Point::new(-73.83, 40.72),
            asset_type: None,
            asset_area: None,
            base_capacity_gal,
            effective_infiltration_inhr: None,
            maintenance_hours_per_month: 3.0,
            council_dist: None,
            community_dist: None,
            gallons_saved_2025: None,
            extra: geojson::JsonObject::new(),
        }
    }
}
