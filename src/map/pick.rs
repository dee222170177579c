use geo::BoundingRect;

use crate::asset::record::Asset;

type PickPoint = rstar::primitives::GeomWithData<[f64; 2], usize>;

/// Resolves map clicks to the asset drawn under the cursor.
pub struct AssetPicker {
    rtree: rstar::RTree<PickPoint>,
    asset_ids: Vec<String>,
}

impl AssetPicker {
    pub fn new(assets: &[Asset]) -> Self {
        let points = assets
            .iter()
            .enumerate()
            .map(|(index, asset)| PickPoint::new([asset.geometry.x(), asset.geometry.y()], index))
            .collect();
        Self {
            rtree: rstar::RTree::bulk_load(points),
            asset_ids: assets.iter().map(|asset| asset.asset_id.clone()).collect(),
        }
    }

    /// The asset nearest to `(lon, lat)` if it lies within `tolerance` degrees.
    pub fn pick(&self, lon: f64, lat: f64, tolerance: f64) -> Option<&str> {
        let nearest = self.rtree.nearest_neighbor(&[lon, lat])?;
        let [x, y] = *nearest.geom();
        let distance = ((x - lon).powi(2) + (y - lat).powi(2)).sqrt();
        if distance > tolerance {
            return None;
        }
        self.asset_ids.get(nearest.data).map(String::as_str)
    }
}

pub fn dataset_bounds(assets: &[Asset]) -> Option<geo::Rect> {
    let points: geo::MultiPoint = assets.iter().map(|asset| asset.geometry).collect();
    points.bounding_rect()
}
