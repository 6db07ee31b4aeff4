//! Suggestion and wear outcome value objects

use crate::Garment;
use serde::{Deserialize, Serialize};

/// One ranked outfit. Recomputed every cycle, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct OutfitSuggestion {
    pub top: Garment,
    pub bottom: Garment,
    pub outer: Option<Garment>,
    /// Sum of top and bottom formality scores
    pub score: i32,
}

impl OutfitSuggestion {
    /// Every garment in the outfit, top first.
    pub fn garments(&self) -> impl Iterator<Item = &Garment> {
        [Some(&self.top), Some(&self.bottom), self.outer.as_ref()]
            .into_iter()
            .flatten()
    }

    /// Outer name used in ordering; the empty string when there is none.
    pub fn outer_name(&self) -> &str {
        self.outer.as_ref().map(|g| g.name.as_str()).unwrap_or("")
    }
}

/// Why a wear counted for more than a single use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DamageReason {
    /// The garment is set to always be washed after wearing
    ForceSetting,
    /// Hot or humid day on a garment that absorbs sweat
    HeatSweat,
}

/// Result of applying one wear to a garment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct WearOutcome {
    /// Garment to persist, replacing the stored one by id
    pub garment: Garment,
    pub moved_to_dirty: bool,
    pub remaining_uses: u32,
    /// Only set when the garment actually became dirty
    pub reason: Option<DamageReason>,
}
