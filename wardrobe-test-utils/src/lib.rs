//! Wardrobe Test Utilities
//!
//! Shared test infrastructure for the wardrobe workspace:
//! - Proptest generators for garments, weather and preferences
//! - Fixtures for the recommendation and wear scenarios
//! - Custom assertions for wardrobe errors
//! - A tracing initializer for tests

// Re-export core types for convenience
pub use wardrobe_core::{
    ColorGroup, ColorWish, FeedbackId, Garment, GarmentCategory, GarmentId, LaundryStatus,
    Pattern, SleeveLength, SlotType, StyleMode, TemperatureRange, Thickness, Timestamp,
    UserPreferenceRules, WardrobeError, WardrobeResult, WeatherSnapshot,
};

use chrono::{TimeZone, Utc};
use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber writing through the test harness.
///
/// Safe to call from every test; only the first call installs anything.
/// Honors `RUST_LOG`, defaulting to `warn`.
pub fn init_test_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Fixed reference instant used by fixtures (2024-06-01 08:00 UTC).
pub fn reference_time() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for generating wardrobe types.

    use super::*;
    use proptest::prelude::*;
    use proptest::sample::select;
    use uuid::Uuid;

    /// Small palette so that generated garments share colors.
    pub const PALETTE: &[&str] = &["#000000", "#FFFFFF", "#1F2A44", "#C0392B", "#8B6F47", "#F4C2C2"];

    // === Identity Generators ===

    /// Generate a random GarmentId.
    pub fn arb_garment_id() -> impl Strategy<Value = GarmentId> {
        any::<[u8; 16]>().prop_map(|bytes| GarmentId::from(Uuid::from_bytes(bytes)))
    }

    /// Generate a Timestamp within 2020..2030.
    pub fn arb_timestamp() -> impl Strategy<Value = Timestamp> {
        (1577836800i64..1893456000i64).prop_map(|secs| {
            chrono::DateTime::from_timestamp(secs, 0).unwrap_or_else(Utc::now)
        })
    }

    // === Enum Generators ===
    // Known variants dominate; `Unknown` still shows up.

    pub fn arb_category() -> impl Strategy<Value = GarmentCategory> {
        prop_oneof![
            9 => select(GarmentCategory::KNOWN),
            1 => Just(GarmentCategory::Unknown),
        ]
    }

    pub fn arb_slot_type() -> impl Strategy<Value = SlotType> {
        prop_oneof![
            9 => select(SlotType::KNOWN),
            1 => Just(SlotType::Unknown),
        ]
    }

    pub fn arb_thickness() -> impl Strategy<Value = Thickness> {
        prop_oneof![
            9 => select(Thickness::KNOWN),
            1 => Just(Thickness::Unknown),
        ]
    }

    pub fn arb_sleeve_length() -> impl Strategy<Value = SleeveLength> {
        prop_oneof![
            9 => select(SleeveLength::KNOWN),
            1 => Just(SleeveLength::Unknown),
        ]
    }

    pub fn arb_color_group() -> impl Strategy<Value = ColorGroup> {
        prop_oneof![
            9 => select(ColorGroup::KNOWN),
            1 => Just(ColorGroup::Unknown),
        ]
    }

    pub fn arb_pattern() -> impl Strategy<Value = Pattern> {
        prop_oneof![
            9 => select(Pattern::KNOWN),
            1 => Just(Pattern::Unknown),
        ]
    }

    pub fn arb_laundry_status() -> impl Strategy<Value = LaundryStatus> {
        prop_oneof![
            9 => select(LaundryStatus::KNOWN),
            1 => Just(LaundryStatus::Unknown),
        ]
    }

    pub fn arb_style_mode() -> impl Strategy<Value = StyleMode> {
        prop_oneof![
            Just(StyleMode::Casual),
            Just(StyleMode::Office),
            Just(StyleMode::Unknown),
        ]
    }

    // === Entity Generators ===

    /// Generate a `(current, max)` wear pair with `current <= max`.
    pub fn arb_wears() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=12).prop_flat_map(|max| (0..=max, Just(max)))
    }

    /// Generate a Garment satisfying the wear invariant.
    ///
    /// The slot follows the category, as it does for saved garments.
    pub fn arb_garment() -> impl Strategy<Value = Garment> {
        (
            arb_garment_id(),
            "[A-Z][a-z]{2,8}",
            arb_category(),
            arb_thickness(),
            arb_sleeve_length(),
            (select(PALETTE), arb_color_group()),
            arb_pattern(),
            arb_wears(),
            any::<bool>(),
            arb_laundry_status(),
        )
            .prop_map(
                |(id, name, category, thickness, sleeve, (hex, group), pattern, (current, max), always_wash, status)| {
                    Garment::new(id, name, category)
                        .with_fabric(thickness, sleeve)
                        .with_color(hex, group)
                        .with_pattern(pattern)
                        .with_wears(current, max)
                        .with_always_wash(always_wash)
                        .with_laundry_status(status)
                },
            )
    }

    /// Generate an inventory of up to `max_len` garments.
    pub fn arb_inventory(max_len: usize) -> impl Strategy<Value = Vec<Garment>> {
        prop::collection::vec(arb_garment(), 0..=max_len)
    }

    /// Generate a forecast range with `min <= max`.
    pub fn arb_forecast() -> impl Strategy<Value = TemperatureRange> {
        (-10.0f64..35.0, 0.0f64..15.0).prop_map(|(low, span)| TemperatureRange::new(low, low + span))
    }

    /// Generate a weather snapshot.
    pub fn arb_weather() -> impl Strategy<Value = WeatherSnapshot> {
        (arb_forecast(), 0.0f64..=100.0, arb_timestamp()).prop_map(|(range, humidity, at)| {
            WeatherSnapshot::new(range.min_c, range.max_c, humidity, at)
        })
    }

    /// Generate preference rules, occasionally with a color wish.
    pub fn arb_preferences() -> impl Strategy<Value = UserPreferenceRules> {
        (
            any::<bool>(),
            any::<bool>(),
            proptest::option::of((select(SlotType::WISHABLE), select(PALETTE), arb_color_group())),
        )
            .prop_map(|(allow_black_navy, disallow_vivid_pair, wish)| {
                UserPreferenceRules::default()
                    .with_color_rules(allow_black_navy, disallow_vivid_pair)
                    .with_color_wish(wish.map(|(slot, hex, group)| ColorWish::new(slot, hex, group)))
            })
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built garments and snapshots for common scenarios.

    use super::*;

    /// Closet-ready garment with solid pattern and explicit color.
    pub fn garment(name: &str, category: GarmentCategory, hex: &str, group: ColorGroup) -> Garment {
        Garment::new(GarmentId::now_v7(), name, category)
            .with_color(hex, group)
            .with_pattern(Pattern::Solid)
            .with_fabric(Thickness::Normal, SleeveLength::Short)
    }

    /// Vivid always-wash t-shirt, the only item of a closet with no bottoms.
    pub fn vivid_always_wash_tee() -> Garment {
        garment("Red tee", GarmentCategory::TShirt, "#C0392B", ColorGroup::Vivid)
            .with_always_wash(true)
    }

    /// Monotone t-shirt scoring 5.
    pub fn white_tee() -> Garment {
        garment("White tee", GarmentCategory::TShirt, "#FFFFFF", ColorGroup::Monotone)
    }

    /// Earth-tone chino scoring 6.
    pub fn khaki_chino() -> Garment {
        garment("Khaki chino", GarmentCategory::Chino, "#8B6F47", ColorGroup::EarthTone)
    }

    /// Vivid denim, clashing with any vivid top.
    pub fn yellow_denim() -> Garment {
        garment("Yellow denim", GarmentCategory::Denim, "#F1C40F", ColorGroup::Vivid)
    }

    /// Navy jacket with an eight-wear budget.
    pub fn navy_jacket() -> Garment {
        garment("Navy jacket", GarmentCategory::Jacket, "#1F2A44", ColorGroup::NavyBlue)
            .with_fabric(Thickness::Normal, SleeveLength::Long)
    }

    /// A closet with enough variety to produce suggestions in every mode.
    pub fn mixed_closet() -> Vec<Garment> {
        vec![
            white_tee(),
            garment("Black polo", GarmentCategory::Polo, "#000000", ColorGroup::Monotone),
            garment("Oxford shirt", GarmentCategory::DressShirt, "#DCE6F0", ColorGroup::Pastel),
            garment("Grey knit", GarmentCategory::Knit, "#7F8C8D", ColorGroup::Other)
                .with_fabric(Thickness::Thick, SleeveLength::Long),
            garment("Band tee", GarmentCategory::TShirt, "#C0392B", ColorGroup::Vivid)
                .with_pattern(Pattern::Graphic),
            garment("Hoodie", GarmentCategory::Sweatshirt, "#2C3E50", ColorGroup::NavyBlue),
            khaki_chino(),
            garment("Raw denim", GarmentCategory::Denim, "#1F2A44", ColorGroup::NavyBlue),
            garment("Charcoal slacks", GarmentCategory::Slacks, "#36454F", ColorGroup::Monotone),
            yellow_denim(),
            navy_jacket(),
            garment("Trench", GarmentCategory::Coat, "#C2B280", ColorGroup::EarthTone)
                .with_fabric(Thickness::Thick, SleeveLength::Long),
            garment("Windbreaker", GarmentCategory::OuterLight, "#27AE60", ColorGroup::Vivid)
                .with_fabric(Thickness::Thin, SleeveLength::Long),
            garment("Undershirt", GarmentCategory::Inner, "#FFFFFF", ColorGroup::Monotone),
        ]
    }

    /// Mild spring day.
    pub fn mild_weather() -> WeatherSnapshot {
        WeatherSnapshot::new(14.0, 22.0, 50.0, reference_time())
    }

    /// Hot but dry day: heat rule triggers on temperature alone.
    pub fn hot_dry_weather() -> WeatherSnapshot {
        WeatherSnapshot::new(22.0, 30.0, 40.0, reference_time())
    }

    /// Cool but muggy day: heat rule triggers on humidity alone.
    pub fn humid_weather() -> WeatherSnapshot {
        WeatherSnapshot::new(15.0, 20.0, 85.0, reference_time())
    }
}

// ============================================================================
// CUSTOM ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Assertion helpers for wardrobe results.

    use super::*;
    use wardrobe_core::{StorageError, ValidationError};

    /// Assert that a result is a RequiredFieldMissing validation error for `field`.
    #[track_caller]
    pub fn assert_required_field<T: std::fmt::Debug>(result: &WardrobeResult<T>, field: &str) {
        match result {
            Err(WardrobeError::Validation(ValidationError::RequiredFieldMissing { field: f })) => {
                assert_eq!(f, field, "Wrong missing field");
            }
            other => panic!("Expected RequiredFieldMissing({}), got: {:?}", field, other),
        }
    }

    /// Assert that a result is a Config error.
    #[track_caller]
    pub fn assert_config_error<T: std::fmt::Debug>(result: &WardrobeResult<T>) {
        match result {
            Err(WardrobeError::Config(_)) => {}
            other => panic!("Expected Config error, got: {:?}", other),
        }
    }

    /// Assert that a result is a GarmentNotFound storage error for `id`.
    #[track_caller]
    pub fn assert_garment_not_found<T: std::fmt::Debug>(result: &WardrobeResult<T>, id: GarmentId) {
        match result {
            Err(WardrobeError::Storage(StorageError::GarmentNotFound(got))) => {
                assert_eq!(*got, id, "Wrong garment id in NotFound error");
            }
            other => panic!("Expected GarmentNotFound({}), got: {:?}", id, other),
        }
    }
}
