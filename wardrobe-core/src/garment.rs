//! Garment entity and its save-time draft

use crate::{
    normalize_hex, CleaningMethod, ColorGroup, GarmentCategory, GarmentId, LaundryStatus, Pattern,
    SleeveLength, SlotType, Thickness, Timestamp, UserPreferenceRules, ValidationError,
    WardrobeResult,
};
use serde::{Deserialize, Serialize};

/// Closed temperature interval in °C.
///
/// Used both for a garment's comfort band and for a day's forecast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TemperatureRange {
    pub min_c: f64,
    pub max_c: f64,
}

impl TemperatureRange {
    pub const fn new(min_c: f64, max_c: f64) -> Self {
        Self { min_c, max_c }
    }
}

/// A garment in the inventory.
///
/// Invariant: `current_wears <= max_wears` and `max_wears >= 1`. Decoding
/// restores it for stored records that break it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Garment {
    pub garment_id: GarmentId,
    pub name: String,
    pub category: GarmentCategory,
    pub slot_type: SlotType,
    pub sleeve_length: SleeveLength,
    pub thickness: Thickness,
    /// Normalized `#RRGGBB` string
    pub color_hex: String,
    pub color_group: ColorGroup,
    pub pattern: Pattern,
    pub max_wears: u32,
    pub current_wears: u32,
    /// Every wear sends the garment straight to the laundry
    pub always_wash: bool,
    pub cleaning_method: CleaningMethod,
    pub laundry_status: LaundryStatus,
    /// User-set comfort band overriding the derived one
    pub comfort_override: Option<TemperatureRange>,
    pub last_worn_at: Option<Timestamp>,
}

/// Wire shape of a stored garment, before the wear invariant is restored.
#[derive(Deserialize)]
struct StoredGarment {
    garment_id: GarmentId,
    name: String,
    category: GarmentCategory,
    slot_type: SlotType,
    sleeve_length: SleeveLength,
    thickness: Thickness,
    color_hex: String,
    color_group: ColorGroup,
    pattern: Pattern,
    max_wears: u32,
    current_wears: u32,
    always_wash: bool,
    cleaning_method: CleaningMethod,
    laundry_status: LaundryStatus,
    comfort_override: Option<TemperatureRange>,
    last_worn_at: Option<Timestamp>,
}

impl From<StoredGarment> for Garment {
    fn from(stored: StoredGarment) -> Self {
        let max_wears = stored.max_wears.max(1);
        Self {
            garment_id: stored.garment_id,
            name: stored.name,
            category: stored.category,
            slot_type: stored.slot_type,
            sleeve_length: stored.sleeve_length,
            thickness: stored.thickness,
            color_hex: normalize_hex(&stored.color_hex),
            color_group: stored.color_group,
            pattern: stored.pattern,
            max_wears,
            current_wears: stored.current_wears.min(max_wears),
            always_wash: stored.always_wash,
            cleaning_method: stored.cleaning_method,
            laundry_status: stored.laundry_status,
            comfort_override: stored.comfort_override,
            last_worn_at: stored.last_worn_at,
        }
    }
}

impl<'de> Deserialize<'de> for Garment {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        StoredGarment::deserialize(deserializer).map(Garment::from)
    }
}

impl Garment {
    /// Create a garment with neutral attributes for the given category.
    ///
    /// The slot is derived from the category and the wear budget from the
    /// built-in per-category table.
    pub fn new(garment_id: GarmentId, name: impl Into<String>, category: GarmentCategory) -> Self {
        Self {
            garment_id,
            name: name.into(),
            category,
            slot_type: category.default_slot(),
            sleeve_length: SleeveLength::Unknown,
            thickness: Thickness::Unknown,
            color_hex: "#000000".to_string(),
            color_group: ColorGroup::Unknown,
            pattern: Pattern::Unknown,
            max_wears: category.builtin_max_wears(),
            current_wears: 0,
            always_wash: false,
            cleaning_method: CleaningMethod::Home,
            laundry_status: LaundryStatus::Closet,
            comfort_override: None,
            last_worn_at: None,
        }
    }

    pub fn with_color(mut self, hex: &str, group: ColorGroup) -> Self {
        self.color_hex = normalize_hex(hex);
        self.color_group = group;
        self
    }

    pub fn with_pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn with_fabric(mut self, thickness: Thickness, sleeve_length: SleeveLength) -> Self {
        self.thickness = thickness;
        self.sleeve_length = sleeve_length;
        self
    }

    /// Set the wear budget, keeping `current_wears` within it.
    pub fn with_wears(mut self, current_wears: u32, max_wears: u32) -> Self {
        self.max_wears = max_wears.max(1);
        self.current_wears = current_wears.min(self.max_wears);
        self
    }

    pub fn with_always_wash(mut self, always_wash: bool) -> Self {
        self.always_wash = always_wash;
        self
    }

    pub fn with_laundry_status(mut self, status: LaundryStatus) -> Self {
        self.laundry_status = status;
        self
    }

    pub fn with_comfort_override(mut self, range: TemperatureRange) -> Self {
        self.comfort_override = Some(range);
        self
    }

    /// Wears left before the garment must be laundered.
    pub fn remaining_uses(&self) -> u32 {
        self.max_wears.saturating_sub(self.current_wears)
    }

    /// Whether the garment can currently be suggested.
    pub fn is_available(&self) -> bool {
        self.laundry_status.is_wearable()
    }
}

// ============================================================================
// DRAFT (save path)
// ============================================================================

/// Unsaved garment as edited by the user.
///
/// Category and color are mandatory; everything else has a fallback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GarmentDraft {
    pub name: String,
    pub category: Option<GarmentCategory>,
    pub color_hex: Option<String>,
    pub color_group: Option<ColorGroup>,
    pub sleeve_length: SleeveLength,
    pub thickness: Thickness,
    pub pattern: Pattern,
    /// `None` means "use the learned default for the category"
    pub max_wears: Option<u32>,
    pub current_wears: u32,
    pub always_wash: bool,
    pub cleaning_method: CleaningMethod,
    pub comfort_override: Option<TemperatureRange>,
}

impl GarmentDraft {
    /// Validate the draft and turn it into a garment.
    ///
    /// Fails without producing anything when category or color is missing;
    /// the caller must block the save.
    pub fn into_garment(
        self,
        garment_id: GarmentId,
        rules: &UserPreferenceRules,
    ) -> WardrobeResult<Garment> {
        let category = self
            .category
            .ok_or_else(|| ValidationError::required("category"))?;
        let color_hex = self
            .color_hex
            .as_deref()
            .map(str::trim)
            .filter(|hex| !hex.is_empty())
            .ok_or_else(|| ValidationError::required("color"))?;

        let max_wears = self
            .max_wears
            .unwrap_or_else(|| rules.default_wears_for(category));
        if max_wears == 0 {
            return Err(ValidationError::OutOfRange {
                field: "max_wears".to_string(),
                value: 0,
                min: 1,
                max: i64::from(u32::MAX),
            }
            .into());
        }

        if let Some(range) = self.comfort_override {
            if range.min_c > range.max_c {
                return Err(ValidationError::InvalidValue {
                    field: "comfort_override".to_string(),
                    reason: format!("min {} is above max {}", range.min_c, range.max_c),
                }
                .into());
            }
        }

        Ok(Garment {
            garment_id,
            name: self.name.trim().to_string(),
            category,
            slot_type: category.default_slot(),
            sleeve_length: self.sleeve_length,
            thickness: self.thickness,
            color_hex: normalize_hex(color_hex),
            color_group: self.color_group.unwrap_or_default(),
            pattern: self.pattern,
            max_wears,
            current_wears: self.current_wears.min(max_wears),
            always_wash: self.always_wash,
            cleaning_method: self.cleaning_method,
            laundry_status: LaundryStatus::Closet,
            comfort_override: self.comfort_override,
            last_worn_at: None,
        })
    }
}
