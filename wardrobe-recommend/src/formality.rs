//! Formality scoring
//!
//! Maps a garment to a 0..=10 score. Outfit scores are the sum of top and
//! bottom, compared against the per-mode range in the configuration.

use wardrobe_core::{ColorGroup, Garment, GarmentCategory, Pattern};

pub const MIN_FORMALITY: i32 = 0;
pub const MAX_FORMALITY: i32 = 10;

fn category_base(category: GarmentCategory) -> i32 {
    match category {
        GarmentCategory::Sweatshirt | GarmentCategory::TShirt | GarmentCategory::Denim => 3,
        GarmentCategory::Knit | GarmentCategory::Polo | GarmentCategory::Chino => 5,
        GarmentCategory::DressShirt | GarmentCategory::Slacks | GarmentCategory::Jacket => 8,
        _ => 4,
    }
}

fn pattern_adjustment(pattern: Pattern) -> i32 {
    match pattern {
        Pattern::Solid => 1,
        Pattern::Graphic => -2,
        _ => 0,
    }
}

fn color_adjustment(group: ColorGroup) -> i32 {
    match group {
        ColorGroup::Monotone | ColorGroup::NavyBlue => 1,
        ColorGroup::Vivid => -1,
        _ => 0,
    }
}

/// Formality score of a garment, clamped to [0, 10].
pub fn formality_score(garment: &Garment) -> i32 {
    let raw = category_base(garment.category)
        + pattern_adjustment(garment.pattern)
        + color_adjustment(garment.color_group);
    raw.clamp(MIN_FORMALITY, MAX_FORMALITY)
}
