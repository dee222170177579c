use serde::Deserialize;

use crate::asset::record::Asset;

/// Conjunctive asset filter. A `None` field matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetFilter {
    #[serde(default)]
    pub council_dist: Option<i64>,
    #[serde(default)]
    pub community_dist: Option<i64>,
    #[serde(default)]
    pub asset_type: Option<String>,
}

impl AssetFilter {
    pub fn is_wildcard(&self) -> bool {
        self.council_dist.is_none() && self.community_dist.is_none() && self.asset_type.is_none()
    }

    pub fn matches(&self, asset: &Asset) -> bool {
        let council_match = self
            .council_dist
            .map_or(true, |code| asset.council_code() == Some(code));
        let community_match = self
            .community_dist
            .map_or(true, |code| asset.community_code() == Some(code));
        let type_match = self
            .asset_type
            .as_deref()
            .map_or(true, |asset_type| asset.asset_type.as_deref() == Some(asset_type));
        council_match && community_match && type_match
    }
}

/// Ids of every asset matching the filter, in list order.
///
/// Returns `None` when the filter has no active predicate, in which case the current
/// selection is left alone.
pub fn apply_filters(assets: &[Asset], filter: &AssetFilter) -> Option<Vec<String>> {
    if filter.is_wildcard() {
        return None;
    }
    Some(
        assets
            .iter()
            .filter(|asset| filter.matches(asset))
            .map(|asset| asset.asset_id.clone())
            .collect(),
    )
}
