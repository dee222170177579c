use anyhow::Context;
use geojson::JsonObject;
use serde_json::Value;
use shapefile::dbase::FieldValue;
use std::path::Path;

fn field_value_to_json(value: FieldValue) -> Value {
    let number = |v: f64| serde_json::Number::from_f64(v).map_or(Value::Null, Value::Number);
    match value {
        FieldValue::Character(text) => text.map_or(Value::Null, |t| Value::from(t.trim())),
        FieldValue::Numeric(v) => v.map_or(Value::Null, number),
        FieldValue::Float(v) => v.map_or(Value::Null, |v| number(v as f64)),
        FieldValue::Double(v) | FieldValue::Currency(v) => number(v),
        FieldValue::Integer(v) => Value::from(v),
        FieldValue::Logical(v) => v.map_or(Value::Null, Value::from),
        FieldValue::Memo(text) => Value::from(text),
        // Dates carry no meaning for the scenario fields.
        _ => Value::Null,
    }
}

fn shape_to_geometry(shape: &shapefile::Shape) -> Option<geojson::Geometry> {
    let (x, y) = match shape {
        shapefile::Shape::Point(p) => (p.x, p.y),
        shapefile::Shape::PointM(p) => (p.x, p.y),
        shapefile::Shape::PointZ(p) => (p.x, p.y),
        _ => return None,
    };
    Some(geojson::Geometry::new(geojson::Value::Point(vec![x, y])))
}

/// Build a GeoJSON feature from a shape and its attribute row. Shapes other than points get
/// no geometry and are dropped later by normalization.
pub fn feature_from_shape<I>(shape: &shapefile::Shape, fields: I) -> geojson::Feature
where
    I: IntoIterator<Item = (String, FieldValue)>,
{
    let properties: JsonObject = fields
        .into_iter()
        .map(|(name, value)| (name, field_value_to_json(value)))
        .collect();
    geojson::Feature {
        bbox: None,
        geometry: shape_to_geometry(shape),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Read a Shapefile (with its `.dbf` attribute table alongside) as a feature collection.
pub fn read_shapefile(filepath: &Path) -> anyhow::Result<geojson::FeatureCollection> {
    let mut reader = shapefile::Reader::from_path(filepath)
        .with_context(|| format!("Opening shapefile {:?}", filepath))?;
    let mut features = Vec::new();
    for shape_record in reader.iter_shapes_and_records() {
        let (shape, record) = shape_record?;
        features.push(feature_from_shape(&shape, record));
    }
    log::info!("Read {} shapes from {:?}", features.len(), filepath);
    Ok(geojson::FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use shapefile::dbase::FieldValue;
    use testdir::testdir;

    use crate::asset::normalize::normalize_features;

    use super::{feature_from_shape, read_shapefile};

    fn fields() -> Vec<(String, FieldValue)> {
        vec![
            (
                "asset_id".to_string(),
                FieldValue::Character(Some("RG-7  ".to_string())),
            ),
            ("asset_area".to_string(), FieldValue::Numeric(Some(400.0))),
            ("city_counc".to_string(), FieldValue::Numeric(Some(20.0))),
            ("community_".to_string(), FieldValue::Numeric(None)),
        ]
    }

    #[test]
    fn test_point_shape_to_feature() {
        let shape = shapefile::Shape::Point(shapefile::Point::new(-73.83, 40.72));
        let feature = feature_from_shape(&shape, fields());
        assert_eq!(feature.property("asset_id"), Some(&json!("RG-7")));
        assert_eq!(feature.property("asset_area"), Some(&json!(400.0)));
        assert_eq!(feature.property("community_"), Some(&json!(null)));

        let collection = geojson::FeatureCollection {
            bbox: None,
            features: vec![feature],
            foreign_members: None,
        };
        let assets = normalize_features(collection);
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].asset_id, "RG-7");
        assert_eq!(assets[0].council_code(), Some(20));
        assert_eq!(assets[0].geometry, geo::Point::new(-73.83, 40.72));
    }

    #[test]
    fn test_non_point_shape_has_no_geometry() {
        let feature = feature_from_shape(&shapefile::Shape::NullShape, fields());
        assert!(feature.geometry.is_none());
    }

    #[test]
    fn test_read_missing_shapefile() {
        let test_dir = testdir!();
        assert!(read_shapefile(&test_dir.join("missing.shp")).is_err());
    }
}
