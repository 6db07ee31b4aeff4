//! Comfort range resolution
//!
//! Derives the temperature band a garment is comfortable in from its slot,
//! fabric thickness and sleeve length.

use wardrobe_core::{Garment, SleeveLength, SlotType, TemperatureRange, Thickness};

/// Lowest temperature any band may start at.
pub const ENVELOPE_MIN_C: f64 = -5.0;
/// Highest temperature any band may reach.
pub const ENVELOPE_MAX_C: f64 = 40.0;

/// Band used when slot or thickness is unknown.
pub const DEFAULT_BAND: TemperatureRange = TemperatureRange::new(10.0, 30.0);

fn base_band(slot: SlotType, thickness: Thickness) -> TemperatureRange {
    match (slot, thickness) {
        (SlotType::Top | SlotType::Outer, Thickness::Thin) => TemperatureRange::new(18.0, 33.0),
        (SlotType::Top | SlotType::Outer, Thickness::Normal) => TemperatureRange::new(12.0, 28.0),
        (SlotType::Top | SlotType::Outer, Thickness::Thick) => TemperatureRange::new(5.0, 20.0),
        (SlotType::Bottom, Thickness::Thin) => TemperatureRange::new(20.0, 34.0),
        (SlotType::Bottom, Thickness::Normal) => TemperatureRange::new(12.0, 30.0),
        (SlotType::Bottom, Thickness::Thick) => TemperatureRange::new(5.0, 20.0),
        (SlotType::Inner, Thickness::Thin) => TemperatureRange::new(15.0, 28.0),
        (SlotType::Inner, Thickness::Normal) => TemperatureRange::new(8.0, 20.0),
        (SlotType::Inner, Thickness::Thick) => TemperatureRange::new(0.0, 15.0),
        _ => DEFAULT_BAND,
    }
}

/// (min, max) shift applied to tops and outers by sleeve length.
fn sleeve_adjustment(sleeve: SleeveLength) -> (f64, f64) {
    match sleeve {
        SleeveLength::Short => (2.0, 2.0),
        SleeveLength::None => (0.0, 3.0),
        SleeveLength::Long => (-2.0, -1.0),
        SleeveLength::Unknown => (0.0, 0.0),
    }
}

/// Resolve the comfort band for a slot/thickness/sleeve combination.
///
/// The result always lies within [`ENVELOPE_MIN_C`, `ENVELOPE_MAX_C`] with
/// `min <= max`.
pub fn resolve_comfort_range(
    slot: SlotType,
    thickness: Thickness,
    sleeve: SleeveLength,
) -> TemperatureRange {
    let base = base_band(slot, thickness);
    let (dmin, dmax) = match slot {
        SlotType::Top | SlotType::Outer => sleeve_adjustment(sleeve),
        _ => (0.0, 0.0),
    };

    let max_c = (base.max_c + dmax).clamp(ENVELOPE_MIN_C, ENVELOPE_MAX_C);
    let min_c = (base.min_c + dmin).clamp(ENVELOPE_MIN_C, ENVELOPE_MAX_C).min(max_c);
    TemperatureRange::new(min_c, max_c)
}

/// The garment's stored override, or its derived band.
pub fn garment_comfort_range(garment: &Garment) -> TemperatureRange {
    garment.comfort_override.unwrap_or_else(|| {
        resolve_comfort_range(garment.slot_type, garment.thickness, garment.sleeve_length)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_normal_long_sleeve() {
        let band = resolve_comfort_range(SlotType::Top, Thickness::Normal, SleeveLength::Long);
        assert_eq!(band, TemperatureRange::new(10.0, 27.0));
    }

    #[test]
    fn test_top_thin_sleeveless_extends_upper_bound() {
        let band = resolve_comfort_range(SlotType::Top, Thickness::Thin, SleeveLength::None);
        assert_eq!(band, TemperatureRange::new(18.0, 36.0));
    }

    #[test]
    fn test_sleeve_ignored_for_bottoms_and_inners() {
        let bottom = resolve_comfort_range(SlotType::Bottom, Thickness::Thin, SleeveLength::Short);
        assert_eq!(bottom, TemperatureRange::new(20.0, 34.0));
        let inner = resolve_comfort_range(SlotType::Inner, Thickness::Thick, SleeveLength::Long);
        assert_eq!(inner, TemperatureRange::new(0.0, 15.0));
    }

    #[test]
    fn test_unknowns_use_default_band() {
        assert_eq!(
            resolve_comfort_range(SlotType::Unknown, Thickness::Thin, SleeveLength::Unknown),
            DEFAULT_BAND
        );
        assert_eq!(
            resolve_comfort_range(SlotType::Bottom, Thickness::Unknown, SleeveLength::Unknown),
            DEFAULT_BAND
        );
    }

    #[test]
    fn test_unknown_thickness_on_top_still_gets_sleeve_shift() {
        let band = resolve_comfort_range(SlotType::Top, Thickness::Unknown, SleeveLength::Short);
        assert_eq!(band, TemperatureRange::new(12.0, 32.0));
    }

    #[test]
    fn test_outer_thick_long_sleeve() {
        let band = resolve_comfort_range(SlotType::Outer, Thickness::Thick, SleeveLength::Long);
        assert_eq!(band, TemperatureRange::new(3.0, 19.0));
    }

    #[test]
    fn test_override_wins() {
        use wardrobe_core::{GarmentCategory, GarmentId};
        let garment = Garment::new(GarmentId::nil(), "Parka", GarmentCategory::Coat)
            .with_fabric(Thickness::Thick, SleeveLength::Long)
            .with_comfort_override(TemperatureRange::new(-5.0, 8.0));
        assert_eq!(garment_comfort_range(&garment), TemperatureRange::new(-5.0, 8.0));
    }
}

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;
    use wardrobe_test_utils::generators::{arb_sleeve_length, arb_slot_type, arb_thickness};

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Every resolved band is ordered and inside the global envelope.
        #[test]
        fn prop_comfort_band_within_envelope(
            slot in arb_slot_type(),
            thickness in arb_thickness(),
            sleeve in arb_sleeve_length(),
        ) {
            let band = resolve_comfort_range(slot, thickness, sleeve);
            prop_assert!(band.min_c <= band.max_c);
            prop_assert!(band.min_c >= ENVELOPE_MIN_C);
            prop_assert!(band.max_c <= ENVELOPE_MAX_C);
        }
    }
}
