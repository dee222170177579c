//! Replays a recorded page session against the scenario controller.

use std::{cell::RefCell, rc::Rc};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    asset::record::Asset,
    map::{
        layer::{base_layer, selected_layer, SelectedLayer, GARDENS_SOURCE_ID},
        pick::{dataset_bounds, AssetPicker},
        style::{StyleFallback, PRIMARY_STYLE_URL},
    },
    scenario::{
        controller::{ScenarioController, ScenarioView, UiEvent},
        filters::AssetFilter,
        selection::SelectionMode,
    },
};

/// Click tolerance in degrees, roughly the radius of a drawn circle at city zoom.
pub const DEFAULT_CLICK_TOLERANCE_DEG: f64 = 0.0005;

/// One entry of a recorded session, as written in the run config.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub enum SessionEvent {
    Weeks(u32),
    Mode(SelectionMode),
    Filters(AssetFilter),
    /// Click on the map at a coordinate.
    Click { lon: f64, lat: f64 },
    /// Click on an asset by id, e.g. from a popup's select button.
    Select(String),
    Clear,
    /// An error message reported by the map renderer.
    MapError(String),
}

/// The renderer side of the selected layer. Keeps the latest filter it was given.
#[derive(Clone, Default)]
pub struct MapState {
    selected_filter: Rc<RefCell<Option<Value>>>,
}

impl MapState {
    pub fn selected_filter(&self) -> Option<Value> {
        self.selected_filter.borrow().clone()
    }
}

impl SelectedLayer for MapState {
    fn set_filter(&mut self, layer_id: &str, filter: Value) {
        log::debug!("Layer {} filter: {}", layer_id, filter);
        *self.selected_filter.borrow_mut() = Some(filter);
    }
}

/// Map description handed to the renderer: style, layers and initial bounds.
#[derive(Serialize, Debug)]
pub struct MapDocument {
    pub style: Value,
    pub source: &'static str,
    pub layers: Vec<Value>,
    /// `[[min_lon, min_lat], [max_lon, max_lat]]`.
    pub bounds: Option<[[f64; 2]; 2]>,
}

pub struct Session {
    controller: ScenarioController,
    picker: AssetPicker,
    style_fallback: StyleFallback,
    map_state: MapState,
    style: Value,
    click_tolerance: f64,
}

impl Session {
    pub fn new(assets: Vec<Asset>) -> Self {
        let map_state = MapState::default();
        let picker = AssetPicker::new(&assets);
        Self {
            controller: ScenarioController::with_layer(assets, Box::new(map_state.clone())),
            picker,
            style_fallback: StyleFallback::new(),
            map_state,
            style: Value::from(PRIMARY_STYLE_URL),
            click_tolerance: DEFAULT_CLICK_TOLERANCE_DEG,
        }
    }

    pub fn with_click_tolerance(mut self, tolerance: f64) -> Self {
        self.click_tolerance = tolerance;
        self
    }

    pub fn controller(&self) -> &ScenarioController {
        &self.controller
    }

    fn to_ui_event(&mut self, event: SessionEvent) -> Option<UiEvent> {
        match event {
            SessionEvent::Weeks(weeks) => Some(UiEvent::WeeksChanged(weeks)),
            SessionEvent::Mode(mode) => Some(UiEvent::ModeChanged(mode)),
            SessionEvent::Filters(filter) => Some(UiEvent::FiltersChanged(filter)),
            SessionEvent::Click { lon, lat } => {
                match self.picker.pick(lon, lat, self.click_tolerance) {
                    Some(asset_id) => Some(UiEvent::AssetClicked(asset_id.to_string())),
                    None => {
                        log::debug!("Click at ({}, {}) hit no asset", lon, lat);
                        None
                    }
                }
            }
            SessionEvent::Select(asset_id) => Some(UiEvent::AssetClicked(asset_id)),
            SessionEvent::Clear => Some(UiEvent::Cleared),
            SessionEvent::MapError(message) => {
                if let Some(style) = self.style_fallback.on_map_error(&message) {
                    self.style = style;
                }
                None
            }
        }
    }

    /// Apply one event and return the resulting view.
    pub fn dispatch(&mut self, event: SessionEvent) -> ScenarioView {
        match self.to_ui_event(event) {
            Some(ui_event) => self.controller.handle(ui_event),
            None => self.controller.view(),
        }
    }

    pub fn replay(&mut self, events: Vec<SessionEvent>) -> ScenarioView {
        log::info!("Replaying {} session events", events.len());
        let mut view = self.controller.view();
        for event in events {
            view = self.dispatch(event);
        }
        view
    }

    pub fn map_document(&self) -> anyhow::Result<MapDocument> {
        let mut selected = serde_json::to_value(selected_layer())?;
        if let Some(filter) = self.map_state.selected_filter() {
            selected["filter"] = filter;
        }
        Ok(MapDocument {
            style: self.style.clone(),
            source: GARDENS_SOURCE_ID,
            layers: vec![serde_json::to_value(base_layer())?, selected],
            bounds: dataset_bounds(self.controller.assets()).map(|rect| {
                [
                    [rect.min().x, rect.min().y],
                    [rect.max().x, rect.max().y],
                ]
            }),
        })
    }
}
