use serde::Serialize;

use crate::{
    asset::{district::FilterOptions, record::Asset},
    map::layer::SelectedLayer,
};

use super::{
    aggregate::ScenarioSummary,
    detail::{selected_details, AssetDetail},
    filters::{apply_filters, AssetFilter},
    insights::{impact_message, insights, ImpactMessage},
    rollup::DistrictRollup,
    selection::{Selection, SelectionMode},
};

/// Upper bound of the maintenance delay control, in weeks.
pub const MAX_DELAY_WEEKS: u32 = 10;

/// Input events delivered by the page. Each is handled to completion before the next.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    WeeksChanged(u32),
    ModeChanged(SelectionMode),
    FiltersChanged(AssetFilter),
    AssetClicked(String),
    Cleared,
}

/// Everything the summary panels display after an event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioView {
    pub summary: ScenarioSummary,
    pub rollup: Option<DistrictRollup>,
    pub impact: Option<ImpactMessage>,
    pub insights: Vec<String>,
    pub details: Vec<AssetDetail>,
}

pub struct ScenarioController {
    assets: Vec<Asset>,
    selection: Selection,
    mode: SelectionMode,
    weeks: u32,
    filter: AssetFilter,
}

impl ScenarioController {
    pub fn new(assets: Vec<Asset>) -> Self {
        Self {
            assets,
            selection: Selection::new(),
            mode: SelectionMode::default(),
            weeks: 0,
            filter: AssetFilter::default(),
        }
    }

    pub fn with_layer(assets: Vec<Asset>, layer: Box<dyn SelectedLayer>) -> Self {
        let mut controller = Self::new(assets);
        controller.selection.attach_layer(layer);
        controller
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn weeks(&self) -> u32 {
        self.weeks
    }

    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions::from_assets(&self.assets)
    }

    /// Popup record for one asset, with its current selection state.
    pub fn detail(&self, asset_id: &str) -> Option<AssetDetail> {
        self.assets
            .iter()
            .find(|asset| asset.asset_id == asset_id)
            .map(|asset| AssetDetail::new(asset, self.selection.contains(asset_id)))
    }

    pub fn handle(&mut self, event: UiEvent) -> ScenarioView {
        log::debug!("Handling {:?}", event);
        match event {
            UiEvent::WeeksChanged(weeks) => {
                self.weeks = weeks.min(MAX_DELAY_WEEKS);
            }
            UiEvent::ModeChanged(mode) => {
                self.mode = mode;
            }
            UiEvent::FiltersChanged(filter) => {
                if let Some(ids) = apply_filters(&self.assets, &filter) {
                    self.selection.set(ids, self.mode);
                }
                self.filter = filter;
            }
            UiEvent::AssetClicked(asset_id) => {
                if self.assets.iter().any(|asset| asset.asset_id == asset_id) {
                    self.selection.toggle(&asset_id, self.mode);
                } else {
                    log::warn!("Ignoring click on unknown asset {}", asset_id);
                }
            }
            UiEvent::Cleared => {
                self.selection.clear();
                self.filter = AssetFilter::default();
            }
        }
        self.view()
    }

    pub fn view(&self) -> ScenarioView {
        let summary = ScenarioSummary::compute(&self.assets, self.selection.ids(), self.weeks);
        ScenarioView {
            rollup: DistrictRollup::compute(
                &self.assets,
                self.filter.council_dist,
                self.filter.community_dist,
            ),
            impact: impact_message(&summary),
            insights: insights(&summary),
            details: selected_details(&self.assets, self.selection.ids()),
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use serde_json::json;

    use crate::{
        asset::{record::Asset, test_support::asset},
        map::layer::test_support::RecordingLayer,
        scenario::{filters::AssetFilter, selection::SelectionMode},
    };

    use super::{ScenarioController, UiEvent};

    fn assets() -> Vec<Asset> {
        let mut a = asset("a", 1000.0);
        a.council_dist = Some(20.0);
        let mut b = asset("b", 2000.0);
        b.council_dist = Some(20.0);
        let mut c = asset("c", 4000.0);
        c.council_dist = Some(24.0);
        vec![a, b, c]
    }

    fn council(code: i64) -> UiEvent {
        UiEvent::FiltersChanged(AssetFilter {
            council_dist: Some(code),
            ..AssetFilter::default()
        })
    }

    #[test]
    fn test_initial_view_is_empty() {
        let controller = ScenarioController::new(assets());
        let view = controller.view();
        assert_eq!(view.summary.count, 0);
        assert!(view.rollup.is_none());
        assert!(view.impact.is_none());
        assert!(view.insights.is_empty());
        assert!(view.details.is_empty());
    }

    #[test]
    fn test_filter_then_delay() {
        let layer = RecordingLayer::default();
        let mut controller = ScenarioController::with_layer(assets(), Box::new(layer.clone()));

        let view = controller.handle(council(20));
        assert_eq!(view.summary.count, 2);
        assert_eq!(view.rollup.as_ref().unwrap().asset_count, 2);

        let view = controller.handle(UiEvent::WeeksChanged(3));
        assert_abs_diff_eq!(view.summary.effective_gallons, 2100.0, epsilon = 1e-9);
        assert_eq!(view.insights.len(), 2);

        let filters = layer.filters.borrow();
        assert_eq!(
            filters.last().unwrap().1,
            json!(["in", ["get", "asset_id"], ["literal", ["a", "b"]]])
        );
    }

    #[test]
    fn test_add_mode_accumulates_filters_and_clicks() {
        let mut controller = ScenarioController::new(assets());
        controller.handle(UiEvent::ModeChanged(SelectionMode::Add));
        controller.handle(council(20));
        controller.handle(council(24));
        assert_eq!(controller.selection().len(), 3);

        let view = controller.handle(UiEvent::AssetClicked("a".to_string()));
        assert_eq!(view.summary.count, 2);
        assert!(!controller.selection().contains("a"));
    }

    #[test]
    fn test_replace_click_and_unknown_click() {
        let mut controller = ScenarioController::new(assets());
        controller.handle(council(20));
        controller.handle(UiEvent::AssetClicked("c".to_string()));
        assert_eq!(controller.selection().sorted_ids(), vec!["c"]);

        controller.handle(UiEvent::AssetClicked("nope".to_string()));
        assert_eq!(controller.selection().sorted_ids(), vec!["c"]);
    }

    #[test]
    fn test_wildcard_filter_keeps_selection() {
        let mut controller = ScenarioController::new(assets());
        controller.handle(council(20));
        let view = controller.handle(UiEvent::FiltersChanged(AssetFilter::default()));
        assert_eq!(view.summary.count, 2);
        assert!(view.rollup.is_none());
    }

    #[test]
    fn test_view_lists_selected_details() {
        let mut controller = ScenarioController::new(assets());
        controller.handle(UiEvent::ModeChanged(SelectionMode::Add));
        controller.handle(UiEvent::AssetClicked("c".to_string()));
        let view = controller.handle(UiEvent::AssetClicked("a".to_string()));
        let ids: Vec<&str> = view.details.iter().map(|d| d.asset_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(view.details[1].council_dist, Some(24));

        assert!(controller.detail("a").unwrap().selected);
        assert!(!controller.detail("b").unwrap().selected);
        assert!(controller.detail("nope").is_none());
    }

    #[test]
    fn test_weeks_are_clamped() {
        let mut controller = ScenarioController::new(assets());
        controller.handle(UiEvent::WeeksChanged(25));
        assert_eq!(controller.weeks(), 10);
    }

    #[test]
    fn test_clear_resets_selection_and_rollup() {
        let layer = RecordingLayer::default();
        let mut controller = ScenarioController::with_layer(assets(), Box::new(layer.clone()));
        controller.handle(council(20));
        let view = controller.handle(UiEvent::Cleared);
        assert_eq!(view.summary.count, 0);
        assert!(view.rollup.is_none());
        assert_eq!(
            layer.filters.borrow().last().unwrap().1,
            json!(["in", ["get", "asset_id"], ["literal", []]])
        );
    }
}
