use serde_json::{json, Value};

pub const PRIMARY_STYLE_URL: &str = "mapbox://styles/mapbox/light-v11";

/// Wording in a map error message that points at an unusable style or credentials.
const STYLE_ERROR_MARKERS: [&str; 4] = ["unauthorized", "forbidden", "token", "style"];

pub fn is_style_error(message: &str) -> bool {
    let message = message.to_lowercase();
    STYLE_ERROR_MARKERS
        .iter()
        .any(|marker| message.contains(marker))
}

pub fn osm_raster_style() -> Value {
    json!({
        "version": 8,
        "sources": {
            "osm": {
                "type": "raster",
                "tiles": ["https://tile.openstreetmap.org/{z}/{x}/{y}.png"],
                "tileSize": 256,
                "attribution": "© OpenStreetMap contributors"
            }
        },
        "layers": [{ "id": "osm", "type": "raster", "source": "osm" }]
    })
}

/// Switches to the raster basemap on the first style error and never again.
#[derive(Debug, Default)]
pub struct StyleFallback {
    fell_back: bool,
}

impl StyleFallback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fell_back(&self) -> bool {
        self.fell_back
    }

    /// Feed a map error message. Returns the style to switch to, if any.
    pub fn on_map_error(&mut self, message: &str) -> Option<Value> {
        if self.fell_back || !is_style_error(message) {
            return None;
        }
        self.fell_back = true;
        log::warn!(
            "Map style error detected; falling back to OSM raster. {}",
            message
        );
        Some(osm_raster_style())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{is_style_error, StyleFallback};

    #[rstest]
    #[case("Unauthorized", true)]
    #[case("403 Forbidden", true)]
    #[case("An API access TOKEN is required", true)]
    #[case("Failed to load style", true)]
    #[case("Tile request timed out", false)]
    #[case("", false)]
    fn test_is_style_error(#[case] message: &str, #[case] expected: bool) {
        assert_eq!(is_style_error(message), expected);
    }

    #[test]
    fn test_fallback_happens_once() {
        let mut fallback = StyleFallback::new();
        assert!(fallback.on_map_error("tile timeout").is_none());
        assert!(!fallback.fell_back());

        let style = fallback.on_map_error("401 Unauthorized").unwrap();
        assert_eq!(style["layers"][0]["type"], "raster");
        assert!(fallback.fell_back());

        assert!(fallback.on_map_error("401 Unauthorized").is_none());
    }
}
