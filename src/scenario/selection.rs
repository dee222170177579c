use std::collections::HashSet;

use serde::Deserialize;

use crate::map::layer::{selected_filter, SelectedLayer, SELECTED_LAYER_ID};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum SelectionMode {
    #[default]
    Replace,
    Add,
}

/// The set of selected asset ids, kept in lockstep with the map's selected layer.
///
/// Every mutation pushes the full id list to the layer sink, if one is attached.
#[derive(Default)]
pub struct Selection {
    ids: HashSet<String>,
    layer: Option<Box<dyn SelectedLayer>>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layer(layer: Box<dyn SelectedLayer>) -> Self {
        Self {
            ids: HashSet::new(),
            layer: Some(layer),
        }
    }

    pub fn attach_layer(&mut self, layer: Box<dyn SelectedLayer>) {
        self.layer = Some(layer);
        self.refresh_layer();
    }

    pub fn ids(&self) -> &HashSet<String> {
        &self.ids
    }

    pub fn contains(&self, asset_id: &str) -> bool {
        self.ids.contains(asset_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn sorted_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.ids.iter().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn toggle(&mut self, asset_id: &str, mode: SelectionMode) {
        match mode {
            SelectionMode::Replace => {
                self.ids.clear();
                self.ids.insert(asset_id.to_string());
            }
            SelectionMode::Add => {
                if !self.ids.remove(asset_id) {
                    self.ids.insert(asset_id.to_string());
                }
            }
        }
        log::debug!("Toggled {} ({:?}), {} selected", asset_id, mode, self.len());
        self.refresh_layer();
    }

    pub fn set<I>(&mut self, asset_ids: I, mode: SelectionMode)
    where
        I: IntoIterator<Item = String>,
    {
        if mode == SelectionMode::Replace {
            self.ids.clear();
        }
        self.ids.extend(asset_ids);
        log::debug!("Selection set ({:?}), {} selected", mode, self.len());
        self.refresh_layer();
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.refresh_layer();
    }

    fn refresh_layer(&mut self) {
        let filter = selected_filter(self.sorted_ids());
        if let Some(layer) = self.layer.as_mut() {
            layer.set_filter(SELECTED_LAYER_ID, filter);
        }
    }
}
