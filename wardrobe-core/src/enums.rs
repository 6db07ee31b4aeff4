//! Enum types for wardrobe entities
//!
//! Every enum here is a closed set with an explicit `Unknown` case. Values
//! coming from storage are decoded with [`decode`](GarmentCategory::decode),
//! which is total: unrecognized strings map to `Unknown` instead of failing.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Declares a storage-backed enum with a total string decoder.
///
/// The generated type serializes as its SCREAMING_SNAKE_CASE storage string
/// and deserializes through `decode`, so unknown values never fail.
macro_rules! storage_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $db:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// Unrecognized or missing value from storage.
            Unknown,
        }

        impl $name {
            /// Every known variant, excluding `Unknown`.
            pub const KNOWN: &'static [$name] = &[ $( $name::$variant ),+ ];

            /// Convert to storage string representation.
            pub fn as_db_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $db, )+
                    $name::Unknown => "UNKNOWN",
                }
            }

            /// Decode a storage string. Never fails.
            pub fn decode(s: &str) -> Self {
                let normalized = s.trim().to_ascii_uppercase();
                match normalized.as_str() {
                    $( $db => $name::$variant, )+
                    _ => $name::Unknown,
                }
            }

            pub fn is_unknown(&self) -> bool {
                matches!(self, $name::Unknown)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::Unknown
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_db_str())
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self::decode(s))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_db_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                Ok(Self::decode(&raw))
            }
        }
    };
}

// ============================================================================
// GARMENT ATTRIBUTES
// ============================================================================

storage_enum! {
    /// Garment category as chosen by the user.
    pub enum GarmentCategory {
        TShirt => "T_SHIRT",
        Polo => "POLO",
        DressShirt => "DRESS_SHIRT",
        Knit => "KNIT",
        Sweatshirt => "SWEATSHIRT",
        Denim => "DENIM",
        Slacks => "SLACKS",
        Chino => "CHINO",
        OuterLight => "OUTER_LIGHT",
        Coat => "COAT",
        Jacket => "JACKET",
        Inner => "INNER",
    }
}

impl GarmentCategory {
    /// The wardrobe slot a garment of this category fills.
    pub fn default_slot(&self) -> SlotType {
        match self {
            GarmentCategory::TShirt
            | GarmentCategory::Polo
            | GarmentCategory::DressShirt
            | GarmentCategory::Knit
            | GarmentCategory::Sweatshirt => SlotType::Top,
            GarmentCategory::Denim | GarmentCategory::Slacks | GarmentCategory::Chino => {
                SlotType::Bottom
            }
            GarmentCategory::OuterLight | GarmentCategory::Coat | GarmentCategory::Jacket => {
                SlotType::Outer
            }
            GarmentCategory::Inner => SlotType::Inner,
            GarmentCategory::Unknown => SlotType::Unknown,
        }
    }

    /// Built-in number of wears before laundering, used until the user
    /// teaches a different value for the category.
    pub fn builtin_max_wears(&self) -> u32 {
        match self {
            GarmentCategory::Inner | GarmentCategory::TShirt | GarmentCategory::DressShirt => 1,
            GarmentCategory::Polo => 2,
            GarmentCategory::Knit
            | GarmentCategory::Sweatshirt
            | GarmentCategory::Chino
            | GarmentCategory::Slacks
            | GarmentCategory::Unknown => 3,
            GarmentCategory::Denim | GarmentCategory::OuterLight => 5,
            GarmentCategory::Jacket => 8,
            GarmentCategory::Coat => 10,
        }
    }
}

storage_enum! {
    /// Wardrobe role of a garment.
    pub enum SlotType {
        Top => "TOP",
        Bottom => "BOTTOM",
        Outer => "OUTER",
        Inner => "INNER",
    }
}

impl SlotType {
    /// Slots that take part in the color-wish feature, in display order.
    pub const WISHABLE: &'static [SlotType] = &[SlotType::Outer, SlotType::Top, SlotType::Bottom];

    pub fn is_wishable(&self) -> bool {
        Self::WISHABLE.contains(self)
    }
}

storage_enum! {
    /// Sleeve length of a top or outer garment.
    pub enum SleeveLength {
        Short => "SHORT",
        Long => "LONG",
        /// Sleeveless
        None => "NONE",
    }
}

storage_enum! {
    /// Fabric thickness.
    pub enum Thickness {
        Thin => "THIN",
        Normal => "NORMAL",
        Thick => "THICK",
    }
}

storage_enum! {
    /// Coarse color family used by the color rules.
    pub enum ColorGroup {
        Monotone => "MONOTONE",
        NavyBlue => "NAVY_BLUE",
        Vivid => "VIVID",
        EarthTone => "EARTH_TONE",
        Pastel => "PASTEL",
        Other => "OTHER",
    }
}

impl ColorGroup {
    /// Human label used when rendering a color wish, `None` for `Unknown`.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            ColorGroup::Monotone => Some("Monotone"),
            ColorGroup::NavyBlue => Some("Navy/Blue"),
            ColorGroup::Vivid => Some("Vivid"),
            ColorGroup::EarthTone => Some("Earth tone"),
            ColorGroup::Pastel => Some("Pastel"),
            ColorGroup::Other => Some("Other"),
            ColorGroup::Unknown => None,
        }
    }
}

storage_enum! {
    /// Fabric pattern.
    pub enum Pattern {
        Solid => "SOLID",
        Stripe => "STRIPE",
        Graphic => "GRAPHIC",
    }
}

storage_enum! {
    /// How the garment gets cleaned.
    pub enum CleaningMethod {
        Home => "HOME",
        Dry => "DRY",
    }
}

storage_enum! {
    /// Where the garment currently is in the laundry cycle.
    pub enum LaundryStatus {
        Closet => "CLOSET",
        Dirty => "DIRTY",
        Cleaning => "CLEANING",
    }
}

impl LaundryStatus {
    /// Whether a garment in this state can be suggested.
    pub fn is_wearable(&self) -> bool {
        matches!(self, LaundryStatus::Closet | LaundryStatus::Unknown)
    }
}

// ============================================================================
// RECOMMENDATION MODE
// ============================================================================

storage_enum! {
    /// Formality target for a suggestion run.
    pub enum StyleMode {
        Casual => "CASUAL",
        Office => "OFFICE",
    }
}

impl StyleMode {
    /// Categories recommended for the top slot, used in missing-inventory
    /// diagnostics.
    pub fn recommended_top_categories(&self) -> &'static [GarmentCategory] {
        match self {
            StyleMode::Casual => &[
                GarmentCategory::TShirt,
                GarmentCategory::Polo,
                GarmentCategory::Sweatshirt,
            ],
            StyleMode::Office => &[
                GarmentCategory::DressShirt,
                GarmentCategory::Knit,
                GarmentCategory::Polo,
            ],
            StyleMode::Unknown => &[GarmentCategory::TShirt, GarmentCategory::DressShirt],
        }
    }

    /// Categories recommended for the bottom slot.
    pub fn recommended_bottom_categories(&self) -> &'static [GarmentCategory] {
        match self {
            StyleMode::Casual => &[GarmentCategory::Denim, GarmentCategory::Chino],
            StyleMode::Office => &[GarmentCategory::Slacks, GarmentCategory::Chino],
            StyleMode::Unknown => &[GarmentCategory::Denim, GarmentCategory::Slacks],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_is_case_insensitive() {
        assert_eq!(GarmentCategory::decode("t_shirt"), GarmentCategory::TShirt);
        assert_eq!(GarmentCategory::decode(" DRESS_SHIRT "), GarmentCategory::DressShirt);
    }

    #[test]
    fn test_decode_unrecognized_falls_back_to_unknown() {
        assert_eq!(GarmentCategory::decode("TUXEDO"), GarmentCategory::Unknown);
        assert_eq!(SlotType::decode(""), SlotType::Unknown);
        assert_eq!(LaundryStatus::decode("LOST"), LaundryStatus::Unknown);
    }

    #[test]
    fn test_every_known_variant_roundtrips_through_db_str() {
        for category in GarmentCategory::KNOWN {
            assert_eq!(GarmentCategory::decode(category.as_db_str()), *category);
        }
        for group in ColorGroup::KNOWN {
            assert_eq!(ColorGroup::decode(group.as_db_str()), *group);
        }
    }

    #[test]
    fn test_serde_unknown_value_does_not_fail() {
        let parsed: Thickness = serde_json::from_str("\"QUILTED\"").unwrap();
        assert_eq!(parsed, Thickness::Unknown);
        let json = serde_json::to_string(&Thickness::Thick).unwrap();
        assert_eq!(json, "\"THICK\"");
    }

    #[test]
    fn test_default_slot_by_category() {
        assert_eq!(GarmentCategory::Knit.default_slot(), SlotType::Top);
        assert_eq!(GarmentCategory::Chino.default_slot(), SlotType::Bottom);
        assert_eq!(GarmentCategory::Coat.default_slot(), SlotType::Outer);
        assert_eq!(GarmentCategory::Inner.default_slot(), SlotType::Inner);
        assert_eq!(GarmentCategory::Unknown.default_slot(), SlotType::Unknown);
    }

    #[test]
    fn test_inner_is_not_wishable() {
        assert!(!SlotType::Inner.is_wishable());
        assert!(SlotType::Outer.is_wishable());
    }

    #[test]
    fn test_wearable_statuses() {
        assert!(LaundryStatus::Closet.is_wearable());
        assert!(LaundryStatus::Unknown.is_wearable());
        assert!(!LaundryStatus::Dirty.is_wearable());
        assert!(!LaundryStatus::Cleaning.is_wearable());
    }
}
