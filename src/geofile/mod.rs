pub mod download;
pub mod geojson;
pub mod shp;

use std::path::Path;

/// Read a point dataset from a Shapefile or a GeoJSON file, picked by extension.
pub fn read_dataset(filepath: &Path) -> anyhow::Result<::geojson::FeatureCollection> {
    let is_shapefile = filepath
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("shp"));
    if is_shapefile {
        shp::read_shapefile(filepath)
    } else {
        self::geojson::read_feature_collection(filepath)
    }
}
