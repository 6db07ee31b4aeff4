use std::sync::Arc;
use wardrobe_core::{DamageReason, FixedClock, LaundryStatus, WardrobeConfig};
use wardrobe_test_utils::fixtures::{
    hot_dry_weather, humid_weather, mild_weather, navy_jacket, vivid_always_wash_tee,
};
use wardrobe_test_utils::{init_test_tracing, reference_time};
use wardrobe_wear::{mark_clean, send_to_cleaning, wear_damage, Damage, WearEngine};

fn engine() -> WearEngine {
    WearEngine::with_clock(&WardrobeConfig::default(), Arc::new(FixedClock(reference_time())))
        .expect("default config is valid")
}

#[test]
fn always_wash_goes_straight_to_laundry() {
    init_test_tracing();
    let engine = engine();
    for weather in [mild_weather(), hot_dry_weather(), humid_weather()] {
        let outcome = engine.apply(&vivid_always_wash_tee(), &weather);
        assert!(outcome.moved_to_dirty);
        assert_eq!(outcome.garment.current_wears, outcome.garment.max_wears);
        assert_eq!(outcome.reason, Some(DamageReason::ForceSetting));
    }
}

#[test]
fn jacket_on_hot_dry_day_takes_double_damage() {
    init_test_tracing();
    let jacket = navy_jacket();
    let (damage, reason) = wear_damage(
        &jacket,
        &hot_dry_weather(),
        &WardrobeConfig::default().heat_rule,
    );
    assert_eq!(damage, Damage::Units(2));
    assert_eq!(reason, Some(DamageReason::HeatSweat));

    let outcome = engine().apply(&jacket, &hot_dry_weather());
    assert_eq!(outcome.garment.current_wears, 2);
    assert_eq!(outcome.remaining_uses, 6);
    assert_eq!(outcome.garment.last_worn_at, Some(reference_time()));
}

#[test]
fn jacket_round_trip_through_laundry() {
    let engine = engine();
    let mut jacket = navy_jacket();
    let mut wears = 0;
    while jacket.laundry_status != LaundryStatus::Dirty {
        jacket = engine.apply(&jacket, &mild_weather()).garment;
        wears += 1;
    }
    assert_eq!(wears, 8);

    let at_cleaner = send_to_cleaning(&jacket);
    assert_eq!(at_cleaner.laundry_status, LaundryStatus::Cleaning);
    assert!(!at_cleaner.is_available());

    let back = mark_clean(&at_cleaner);
    assert!(back.is_available());
    assert_eq!(back.remaining_uses(), 8);
}
