//! Wear application
//!
//! Computes how much a single wear depletes a garment and whether that
//! sends it to the laundry. The result is a new garment value which the
//! caller persists with a single replace-by-id.

use std::sync::Arc;
use wardrobe_core::{
    Clock, DamageReason, Garment, GarmentCategory, HeatRule, LaundryStatus, SystemClock,
    WardrobeConfig, WardrobeResult, WearOutcome, WeatherSnapshot,
};

/// Wear-count increment for one wear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Damage {
    Units(u32),
    /// Exhausts the wear budget regardless of how much is left
    Force,
}

impl Damage {
    pub fn is_force(&self) -> bool {
        matches!(self, Damage::Force)
    }
}

/// Categories that never pick up sweat damage.
fn sweat_exempt(category: GarmentCategory) -> bool {
    matches!(category, GarmentCategory::Inner | GarmentCategory::TShirt)
}

/// Whether the weather counts as a hot or humid day.
pub fn is_heat_day(weather: &WeatherSnapshot, rule: &HeatRule) -> bool {
    weather.max_temp_c >= rule.max_temp_c || weather.humidity_pct >= rule.humidity_pct
}

/// Damage of one wear and the reason it exceeds a single use, if any.
pub fn wear_damage(
    garment: &Garment,
    weather: &WeatherSnapshot,
    rule: &HeatRule,
) -> (Damage, Option<DamageReason>) {
    if garment.always_wash {
        (Damage::Force, Some(DamageReason::ForceSetting))
    } else if is_heat_day(weather, rule) && !sweat_exempt(garment.category) {
        (Damage::Units(2), Some(DamageReason::HeatSweat))
    } else {
        (Damage::Units(1), None)
    }
}

/// Apply one wear to `garment`.
///
/// The wear count never exceeds `max_wears`. The garment becomes DIRTY when
/// forced or when its budget is used up; otherwise its status is kept.
pub fn apply_wear(
    garment: &Garment,
    weather: &WeatherSnapshot,
    rule: &HeatRule,
    clock: &dyn Clock,
) -> WearOutcome {
    let (damage, reason) = wear_damage(garment, weather, rule);
    let forced_dirty = damage.is_force() || garment.always_wash;

    let mut updated = garment.clone();
    updated.current_wears = match damage {
        Damage::Units(units) if !forced_dirty => garment
            .current_wears
            .saturating_add(units)
            .min(garment.max_wears),
        _ => garment.max_wears,
    };

    let moved_to_dirty = forced_dirty || updated.current_wears >= updated.max_wears;
    if moved_to_dirty {
        updated.laundry_status = LaundryStatus::Dirty;
    }
    updated.last_worn_at = Some(clock.now());

    tracing::debug!(
        garment_id = %garment.garment_id,
        ?damage,
        wears = updated.current_wears,
        max_wears = updated.max_wears,
        moved_to_dirty,
        "wear applied"
    );

    WearOutcome {
        remaining_uses: updated.remaining_uses(),
        reason: reason.filter(|_| moved_to_dirty),
        moved_to_dirty,
        garment: updated,
    }
}

/// [`apply_wear`] bound to a heat rule and a clock.
#[derive(Clone)]
pub struct WearEngine {
    heat_rule: HeatRule,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for WearEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WearEngine")
            .field("heat_rule", &self.heat_rule)
            .field("clock", &"<Clock>")
            .finish()
    }
}

impl WearEngine {
    /// Engine using the system clock.
    pub fn new(config: &WardrobeConfig) -> WardrobeResult<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &WardrobeConfig, clock: Arc<dyn Clock>) -> WardrobeResult<Self> {
        config.validate()?;
        Ok(Self {
            heat_rule: config.heat_rule,
            clock,
        })
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn apply(&self, garment: &Garment, weather: &WeatherSnapshot) -> WearOutcome {
        apply_wear(garment, weather, &self.heat_rule, self.clock.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wardrobe_core::{FixedClock, GarmentId};

    fn clock() -> FixedClock {
        FixedClock::from_epoch_secs(1_717_228_800)
    }

    fn weather(max_temp_c: f64, humidity_pct: f64) -> WeatherSnapshot {
        WeatherSnapshot::new(max_temp_c - 8.0, max_temp_c, humidity_pct, clock().0)
    }

    fn garment(category: GarmentCategory) -> Garment {
        Garment::new(GarmentId::now_v7(), "item", category)
    }

    #[test]
    fn test_always_wash_forces_dirty() {
        let item = garment(GarmentCategory::Coat).with_wears(0, 10).with_always_wash(true);
        let outcome = apply_wear(&item, &weather(15.0, 30.0), &HeatRule::default(), &clock());
        assert!(outcome.moved_to_dirty);
        assert_eq!(outcome.garment.current_wears, 10);
        assert_eq!(outcome.remaining_uses, 0);
        assert_eq!(outcome.reason, Some(DamageReason::ForceSetting));
        assert_eq!(outcome.garment.laundry_status, LaundryStatus::Dirty);
    }

    #[test]
    fn test_heat_rule_on_temperature_alone() {
        let item = garment(GarmentCategory::Jacket);
        let (damage, reason) = wear_damage(&item, &weather(30.0, 40.0), &HeatRule::default());
        assert_eq!(damage, Damage::Units(2));
        assert_eq!(reason, Some(DamageReason::HeatSweat));
    }

    #[test]
    fn test_heat_rule_on_humidity_alone() {
        let item = garment(GarmentCategory::Polo);
        let (damage, _) = wear_damage(&item, &weather(18.0, 70.0), &HeatRule::default());
        assert_eq!(damage, Damage::Units(2));
    }

    #[test]
    fn test_tshirt_and_inner_exempt_from_heat() {
        for category in [GarmentCategory::TShirt, GarmentCategory::Inner] {
            let (damage, reason) =
                wear_damage(&garment(category), &weather(35.0, 90.0), &HeatRule::default());
            assert_eq!(damage, Damage::Units(1));
            assert_eq!(reason, None);
        }
    }

    #[test]
    fn test_heat_reason_hidden_until_dirty() {
        let item = garment(GarmentCategory::Jacket).with_wears(2, 8);
        let outcome = apply_wear(&item, &weather(30.0, 40.0), &HeatRule::default(), &clock());
        assert_eq!(outcome.garment.current_wears, 4);
        assert!(!outcome.moved_to_dirty);
        assert_eq!(outcome.reason, None);
        assert_eq!(outcome.garment.laundry_status, LaundryStatus::Closet);
    }

    #[test]
    fn test_heat_damage_clamps_and_dirties() {
        let item = garment(GarmentCategory::Jacket).with_wears(7, 8);
        let outcome = apply_wear(&item, &weather(30.0, 40.0), &HeatRule::default(), &clock());
        assert_eq!(outcome.garment.current_wears, 8);
        assert!(outcome.moved_to_dirty);
        assert_eq!(outcome.reason, Some(DamageReason::HeatSweat));
    }

    #[test]
    fn test_plain_wear_on_last_use() {
        let item = garment(GarmentCategory::DressShirt);
        let outcome = apply_wear(&item, &weather(20.0, 40.0), &HeatRule::default(), &clock());
        assert!(outcome.moved_to_dirty);
        assert_eq!(outcome.reason, None);
    }

    #[test]
    fn test_last_worn_from_clock() {
        let item = garment(GarmentCategory::Denim);
        let outcome = apply_wear(&item, &weather(20.0, 40.0), &HeatRule::default(), &clock());
        assert_eq!(outcome.garment.last_worn_at, Some(clock().0));
    }

    #[test]
    fn test_engine_uses_configured_heat_rule() {
        let config = WardrobeConfig {
            heat_rule: HeatRule {
                max_temp_c: 35.0,
                humidity_pct: 95.0,
            },
            ..WardrobeConfig::default()
        };
        let engine = WearEngine::with_clock(&config, Arc::new(clock())).unwrap();
        let item = garment(GarmentCategory::Jacket);
        let outcome = engine.apply(&item, &weather(30.0, 40.0));
        assert_eq!(outcome.garment.current_wears, 1);
    }
}

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;
    use wardrobe_core::FixedClock;
    use wardrobe_test_utils::generators::{arb_garment, arb_weather};

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_wear_count_stays_within_budget(
            garment in arb_garment(),
            weather in arb_weather(),
        ) {
            let clock = FixedClock::from_epoch_secs(0);
            let outcome = apply_wear(&garment, &weather, &HeatRule::default(), &clock);
            prop_assert!(outcome.garment.current_wears <= outcome.garment.max_wears);
            prop_assert_eq!(
                outcome.remaining_uses,
                outcome.garment.max_wears - outcome.garment.current_wears
            );
            prop_assert!(outcome.garment.current_wears >= garment.current_wears);
        }

        #[test]
        fn prop_dirty_iff_exhausted_or_forced(
            garment in arb_garment(),
            weather in arb_weather(),
        ) {
            let clock = FixedClock::from_epoch_secs(0);
            let outcome = apply_wear(&garment, &weather, &HeatRule::default(), &clock);
            let exhausted = outcome.garment.current_wears == outcome.garment.max_wears;
            prop_assert_eq!(outcome.moved_to_dirty, exhausted || garment.always_wash);
        }
    }
}
