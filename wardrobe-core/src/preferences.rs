//! User preference rules

use crate::{color_label, normalize_hex, ColorGroup, GarmentCategory, SlotType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A user-requested color for one slot.
///
/// Hard-constrains suggestion generation: if nothing in the slot matches,
/// no outfit is suggested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ColorWish {
    pub slot_type: SlotType,
    /// Normalized `#RRGGBB`
    pub color_hex: String,
    pub label: String,
}

impl ColorWish {
    /// Build a wish, normalizing the hex and deriving the label from the
    /// color group.
    pub fn new(slot_type: SlotType, hex: &str, group: ColorGroup) -> Self {
        Self {
            slot_type,
            color_hex: normalize_hex(hex),
            label: color_label(group, hex),
        }
    }
}

/// Preference rules read by the suggestion engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserPreferenceRules {
    /// Allow pairing a navy/blue garment with a monotone one
    pub allow_black_navy: bool,
    /// Forbid outfits where both top and bottom are vivid
    pub disallow_vivid_pair: bool,
    /// Last wear budget the user picked per category
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub default_wears_by_category: BTreeMap<GarmentCategory, u32>,
    #[serde(default)]
    pub color_wish: Option<ColorWish>,
}

impl Default for UserPreferenceRules {
    fn default() -> Self {
        Self {
            allow_black_navy: false,
            disallow_vivid_pair: true,
            default_wears_by_category: BTreeMap::new(),
            color_wish: None,
        }
    }
}

impl UserPreferenceRules {
    /// Wear budget to prefill for a new garment of `category`.
    pub fn default_wears_for(&self, category: GarmentCategory) -> u32 {
        self.default_wears_by_category
            .get(&category)
            .copied()
            .filter(|wears| *wears > 0)
            .unwrap_or_else(|| category.builtin_max_wears())
    }

    /// Remember the budget the user just chose for `category`.
    pub fn learn_default_wears(mut self, category: GarmentCategory, max_wears: u32) -> Self {
        if max_wears > 0 && !category.is_unknown() {
            self.default_wears_by_category.insert(category, max_wears);
        }
        self
    }

    pub fn with_color_wish(mut self, wish: Option<ColorWish>) -> Self {
        self.color_wish = wish;
        self
    }

    pub fn with_color_rules(mut self, allow_black_navy: bool, disallow_vivid_pair: bool) -> Self {
        self.allow_black_navy = allow_black_navy;
        self.disallow_vivid_pair = disallow_vivid_pair;
        self
    }
}
