use std::collections::BTreeSet;

use super::record::Asset;

/// Community codes that are not real neighborhoods and never offered as filters.
pub const EXCLUDED_COMMUNITY_CODES: [i64; 2] = [481, 482];

const COUNCIL_DISTRICT_NAMES: [(i64, &str); 14] = [
    (19, "District 19 - Bayside / Whitestone"),
    (20, "District 20 - Flushing"),
    (21, "District 21 - Corona / Elmhurst"),
    (22, "District 22 - Astoria"),
    (23, "District 23 - Bayside / Little Neck"),
    (24, "District 24 - Jamaica"),
    (25, "District 25 - Jackson Heights"),
    (26, "District 26 - Long Island City"),
    (27, "District 27 - Cambria Heights / Rosedale"),
    (28, "District 28 - South Jamaica"),
    (29, "District 29 - Forest Hills / Rego Park"),
    (30, "District 30 - Middle Village / Ridgewood"),
    (31, "District 31 - Far Rockaway"),
    (32, "District 32 - Rockaways / Breezy Point"),
];

const COMMUNITY_DISTRICT_NAMES: [(i64, &str); 14] = [
    (401, "Community 401 - Astoria"),
    (402, "Community 402 - Long Island City"),
    (403, "Community 403 - Jackson Heights"),
    (404, "Community 404 - Elmhurst / Corona"),
    (405, "Community 405 - Ridgewood / Maspeth"),
    (406, "Community 406 - Rego Park / Forest Hills"),
    (407, "Community 407 - Flushing"),
    (408, "Community 408 - Hillcrest / Fresh Meadows"),
    (409, "Community 409 - Kew Gardens / Woodhaven"),
    (410, "Community 410 - South Ozone Park / Howard Beach"),
    (411, "Community 411 - Bayside / Little Neck"),
    (412, "Community 412 - Jamaica / Hollis"),
    (413, "Community 413 - Queens Village"),
    (414, "Community 414 - Rockaway / Broad Channel"),
];

fn lookup(table: &[(i64, &'static str)], code: i64) -> Option<&'static str> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, name)| *name)
}

pub fn council_district_name(code: i64) -> String {
    lookup(&COUNCIL_DISTRICT_NAMES, code)
        .map(str::to_string)
        .unwrap_or_else(|| format!("District {}", code))
}

pub fn community_district_name(code: i64) -> String {
    lookup(&COMMUNITY_DISTRICT_NAMES, code)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Community {}", code))
}

pub fn is_selectable_community(code: i64) -> bool {
    !EXCLUDED_COMMUNITY_CODES.contains(&code)
}

/// Rain gardens proper and the curbside ("ROW...") subtypes.
pub fn is_rain_garden_type(asset_type: &str) -> bool {
    asset_type == "Rain Garden" || asset_type.starts_with("ROW")
}

pub fn asset_type_label(asset_type: &str) -> String {
    if asset_type != "Rain Garden" && asset_type.starts_with("ROW") {
        format!("Street/ROW (curbside) — {}", asset_type)
    } else {
        asset_type.to_string()
    }
}

/// A filter choice: the raw value and the label shown for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption<T> {
    pub value: T,
    pub label: String,
}

/// The choices offered by the council, community and asset type filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub councils: Vec<FilterOption<i64>>,
    pub communities: Vec<FilterOption<i64>>,
    pub asset_types: Vec<FilterOption<String>>,
}

impl FilterOptions {
    pub fn from_assets(assets: &[Asset]) -> Self {
        let mut councils = BTreeSet::new();
        let mut communities = BTreeSet::new();
        let mut asset_types = BTreeSet::new();
        for asset in assets {
            if let Some(code) = asset.council_code() {
                councils.insert(code);
            }
            if let Some(code) = asset.community_code().filter(|c| is_selectable_community(*c)) {
                communities.insert(code);
            }
            if let Some(asset_type) = asset.asset_type.as_deref() {
                if is_rain_garden_type(asset_type) {
                    asset_types.insert(asset_type.to_string());
                }
            }
        }

        Self {
            councils: councils
                .into_iter()
                .map(|code| FilterOption {
                    value: code,
                    label: council_district_name(code),
                })
                .collect(),
            communities: communities
                .into_iter()
                .map(|code| FilterOption {
                    value: code,
                    label: community_district_name(code),
                })
                .collect(),
            asset_types: asset_types
                .into_iter()
                .map(|asset_type| FilterOption {
                    label: asset_type_label(&asset_type),
                    value: asset_type,
                })
                .collect(),
        }
    }
}
