use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StormPreview {
    pub depth_in: f64,
    /// Share of runoff captured, between 40 and 95 percent.
    pub capture_percent: f64,
    pub soak_hours: f64,
    pub live_capture: f64,
}

impl StormPreview {
    pub fn for_depth(depth_in: f64) -> Self {
        let capture_percent = (110.0 - depth_in * 10.0).clamp(40.0, 95.0);
        Self {
            depth_in,
            capture_percent,
            soak_hours: depth_in * 3.0,
            live_capture: capture_percent / 40.0,
        }
    }
}
