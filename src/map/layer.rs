use serde::Serialize;
use serde_json::{json, Value};

pub const GARDENS_SOURCE_ID: &str = "gardens";
pub const BASE_LAYER_ID: &str = "gardens-base";
pub const SELECTED_LAYER_ID: &str = "gardens-selected";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CirclePaint {
    #[serde(rename = "circle-radius")]
    pub radius: f64,
    #[serde(rename = "circle-color")]
    pub color: &'static str,
    #[serde(rename = "circle-stroke-color")]
    pub stroke_color: &'static str,
    #[serde(rename = "circle-stroke-width")]
    pub stroke_width: f64,
    #[serde(rename = "circle-opacity")]
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircleLayer {
    pub id: &'static str,
    #[serde(rename = "type")]
    pub layer_type: &'static str,
    pub source: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
    pub paint: CirclePaint,
}

pub fn base_layer() -> CircleLayer {
    CircleLayer {
        id: BASE_LAYER_ID,
        layer_type: "circle",
        source: GARDENS_SOURCE_ID,
        filter: None,
        paint: CirclePaint {
            radius: 6.0,
            color: "#0ea5e9",
            stroke_color: "#0b759e",
            stroke_width: 1.0,
            opacity: 0.7,
        },
    }
}

/// Selected assets drawn on top of the base layer. Starts with an empty selection.
pub fn selected_layer() -> CircleLayer {
    CircleLayer {
        id: SELECTED_LAYER_ID,
        layer_type: "circle",
        source: GARDENS_SOURCE_ID,
        filter: Some(selected_filter(std::iter::empty::<&str>())),
        paint: CirclePaint {
            radius: 8.0,
            color: "#22c55e",
            stroke_color: "#15803d",
            stroke_width: 2.0,
            opacity: 0.95,
        },
    }
}

/// Membership filter matching features whose `asset_id` is in the literal id list.
pub fn selected_filter<I, S>(ids: I) -> Value
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let ids: Vec<Value> = ids
        .into_iter()
        .map(|id| Value::from(id.as_ref()))
        .collect();
    json!(["in", ["get", "asset_id"], ["literal", ids]])
}

pub trait SelectedLayer {
    fn set_filter(&mut self, layer_id: &str, filter: Value);
}
