//! Color-wish resolution
//!
//! Reconciles the saved color wish and the user's current picker selection
//! against what is actually in the closet. Only OUTER, TOP and BOTTOM take
//! part; inners are never wished for.

use crate::diagnostics::{Diagnostic, DiagnosticTag};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use wardrobe_core::{color_label, normalize_hex, ColorWish, Garment, SlotType};

/// One pickable color in a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ColorOption {
    pub color_hex: String,
    pub label: String,
}

/// Distinct colors per wishable slot, in inventory order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WishInventory {
    by_slot: BTreeMap<SlotType, Vec<ColorOption>>,
}

impl WishInventory {
    pub fn from_garments(garments: &[Garment]) -> Self {
        let mut by_slot: BTreeMap<SlotType, Vec<ColorOption>> = BTreeMap::new();
        for garment in garments.iter().filter(|g| g.slot_type.is_wishable()) {
            let hex = normalize_hex(&garment.color_hex);
            let options = by_slot.entry(garment.slot_type).or_default();
            if !options.iter().any(|o| o.color_hex == hex) {
                options.push(ColorOption {
                    label: color_label(garment.color_group, &hex),
                    color_hex: hex,
                });
            }
        }
        Self { by_slot }
    }

    pub fn options(&self, slot: SlotType) -> &[ColorOption] {
        self.by_slot.get(&slot).map(Vec::as_slice).unwrap_or(&[])
    }

    fn find(&self, slot: SlotType, hex: &str) -> Option<&ColorOption> {
        let hex = normalize_hex(hex);
        self.options(slot).iter().find(|o| o.color_hex == hex)
    }

    /// Whether the wish feature can be offered at all.
    pub fn is_available(&self) -> bool {
        SlotType::WISHABLE.iter().any(|slot| !self.options(*slot).is_empty())
    }

    fn first_available_slot(&self) -> Option<SlotType> {
        SlotType::WISHABLE
            .iter()
            .copied()
            .find(|slot| !self.options(*slot).is_empty())
    }
}

/// What the picker currently shows, if the user touched it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct WishSelection {
    pub slot_type: Option<SlotType>,
    pub color_hex: Option<String>,
}

/// How the saved wish must change to stay consistent with the closet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SavedWishUpdate {
    /// Nothing saved, or saved wish is already current
    Unchanged,
    /// Saved wish no longer matches any garment and must be cleared
    Removed,
    /// Saved wish still matches but its label changed
    Refreshed(ColorWish),
}

/// Resolved picker state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorWishState {
    pub available: bool,
    pub saved: SavedWishUpdate,
    pub effective_slot: Option<SlotType>,
    pub effective_color: Option<String>,
    /// Color choices for the effective slot
    pub options: Vec<ColorOption>,
    /// Set when the effective slot offers no colors
    pub empty_state: Option<Diagnostic>,
}

impl ColorWishState {
    /// The wish the current picker state describes, ready to save.
    pub fn to_wish(&self) -> Option<ColorWish> {
        let slot = self.effective_slot?;
        let hex = self.effective_color.as_deref()?;
        let option = self.options.iter().find(|o| o.color_hex == hex)?;
        Some(ColorWish {
            slot_type: slot,
            color_hex: option.color_hex.clone(),
            label: option.label.clone(),
        })
    }
}

/// Resolve the effective slot and color for the wish picker.
///
/// Slot priority: explicit selection, saved wish, first non-empty slot.
/// Color priority: explicit selection (if the slot offers it), saved color
/// when the saved slot matches, first color in the slot.
pub fn resolve_color_wish(
    inventory: &WishInventory,
    saved: Option<&ColorWish>,
    selection: &WishSelection,
) -> ColorWishState {
    let (saved_update, current_saved) = match saved {
        None => (SavedWishUpdate::Unchanged, None),
        Some(wish) => match inventory.find(wish.slot_type, &wish.color_hex) {
            None => (SavedWishUpdate::Removed, None),
            Some(option) => {
                let current = ColorWish {
                    slot_type: wish.slot_type,
                    color_hex: option.color_hex.clone(),
                    label: option.label.clone(),
                };
                if current == *wish {
                    (SavedWishUpdate::Unchanged, Some(current))
                } else {
                    (SavedWishUpdate::Refreshed(current.clone()), Some(current))
                }
            }
        },
    };

    let effective_slot = selection
        .slot_type
        .filter(SlotType::is_wishable)
        .or_else(|| current_saved.as_ref().map(|w| w.slot_type))
        .or_else(|| inventory.first_available_slot());

    let options = effective_slot
        .map(|slot| inventory.options(slot).to_vec())
        .unwrap_or_default();

    let explicit_color = selection
        .color_hex
        .as_deref()
        .map(normalize_hex)
        .filter(|hex| options.iter().any(|o| &o.color_hex == hex));
    let saved_color = current_saved
        .as_ref()
        .filter(|w| Some(w.slot_type) == effective_slot)
        .map(|w| w.color_hex.clone());
    let effective_color = explicit_color
        .or(saved_color)
        .or_else(|| options.first().map(|o| o.color_hex.clone()));

    let empty_state = match effective_slot {
        Some(slot) if options.is_empty() => Some(Diagnostic::new(
            DiagnosticTag::NoColorsForSlot,
            vec![slot.as_db_str().to_string()],
        )),
        _ => None,
    };

    ColorWishState {
        available: inventory.is_available(),
        saved: saved_update,
        effective_slot,
        effective_color,
        options,
        empty_state,
    }
}
