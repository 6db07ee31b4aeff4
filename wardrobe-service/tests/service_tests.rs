use std::sync::Arc;
use wardrobe_core::{
    ColorGroup, FixedClock, GarmentCategory, GarmentDraft, LaundryStatus, Rating, SlotType,
    StyleMode, WardrobeConfig,
};
use wardrobe_recommend::{DiagnosticTag, SavedWishUpdate, WishSelection};
use wardrobe_service::{WardrobeService, WardrobeStores};
use wardrobe_storage::{
    FeedbackStore, InMemoryFeedback, InMemoryInventory, InMemoryPreferences, InMemoryWeather,
    InventoryStore, PreferenceStore,
};
use wardrobe_test_utils::assertions::{assert_garment_not_found, assert_required_field};
use wardrobe_test_utils::fixtures::{hot_dry_weather, khaki_chino, navy_jacket, white_tee};
use wardrobe_test_utils::{init_test_tracing, reference_time, ColorWish, Garment, GarmentId};
use wardrobe_wear::FeedbackSubmission;

struct Harness {
    service: WardrobeService,
    inventory: Arc<InMemoryInventory>,
    preferences: Arc<InMemoryPreferences>,
    weather: Arc<InMemoryWeather>,
    feedback: Arc<InMemoryFeedback>,
}

fn harness(garments: Vec<Garment>) -> Harness {
    init_test_tracing();
    let inventory = Arc::new(InMemoryInventory::with_garments(garments));
    let preferences = Arc::new(InMemoryPreferences::default());
    let weather = Arc::new(InMemoryWeather::new());
    let feedback = Arc::new(InMemoryFeedback::new());
    let stores = WardrobeStores {
        inventory: inventory.clone(),
        preferences: preferences.clone(),
        weather: weather.clone(),
        feedback: feedback.clone(),
    };
    let service = WardrobeService::with_clock(
        stores,
        WardrobeConfig::default(),
        Arc::new(FixedClock(reference_time())),
    )
    .expect("default config is valid");
    Harness {
        service,
        inventory,
        preferences,
        weather,
        feedback,
    }
}

fn draft(category: GarmentCategory, hex: &str) -> GarmentDraft {
    GarmentDraft {
        name: "New item".to_string(),
        category: Some(category),
        color_hex: Some(hex.to_string()),
        color_group: Some(ColorGroup::Monotone),
        ..GarmentDraft::default()
    }
}

#[test]
fn recommend_uses_stored_inputs() {
    let h = harness(vec![white_tee(), khaki_chino()]);
    let recommendation = h.service.recommend(StyleMode::Casual).expect("stores readable");
    assert_eq!(recommendation.suggestions.len(), 1);
    assert_eq!(recommendation.suggestions[0].score, 11);
}

#[test]
fn invalid_config_is_rejected() {
    let config = WardrobeConfig {
        max_suggestions: 0,
        ..WardrobeConfig::default()
    };
    assert!(WardrobeService::new(WardrobeStores::in_memory(), config).is_err());
}

#[test]
fn confirm_wears_each_garment_and_opens_feedback() {
    let h = harness(vec![white_tee(), khaki_chino()]);
    let suggestion = h.service.recommend(StyleMode::Casual).unwrap().suggestions[0].clone();

    let confirmed = h.service.confirm_outfit(&suggestion).expect("garments exist");
    assert_eq!(confirmed.outcomes.len(), 2);

    let tee = h.inventory.get(suggestion.top.garment_id).unwrap().unwrap();
    assert_eq!(tee.laundry_status, LaundryStatus::Dirty);
    assert_eq!(tee.last_worn_at, Some(reference_time()));

    let chino = h.inventory.get(suggestion.bottom.garment_id).unwrap().unwrap();
    assert_eq!(chino.current_wears, 1);
    assert_eq!(chino.laundry_status, LaundryStatus::Closet);

    let entries = h.feedback.entries().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].feedback_id, confirmed.feedback_id);
    assert_eq!(entries[0].top_item_id, Some(suggestion.top.garment_id));
    assert!(entries[0].is_pending());
}

#[test]
fn dirty_garments_leave_the_next_recommendation() {
    let h = harness(vec![white_tee(), khaki_chino()]);
    let suggestion = h.service.recommend(StyleMode::Casual).unwrap().suggestions[0].clone();
    h.service.confirm_outfit(&suggestion).unwrap();

    let next = h.service.recommend(StyleMode::Casual).unwrap();
    assert!(next.is_empty());
    assert!(next.has_diagnostic(DiagnosticTag::MissingTop));
}

#[test]
fn confirm_applies_current_weather() {
    let h = harness(vec![white_tee(), khaki_chino(), navy_jacket()]);
    h.weather.publish(hot_dry_weather());

    let mut suggestion = h.service.recommend(StyleMode::Casual).unwrap().suggestions[0].clone();
    suggestion.outer = Some(navy_jacket_in(&h));
    let confirmed = h.service.confirm_outfit(&suggestion).unwrap();

    assert_eq!(confirmed.outcomes.len(), 3);
    let jacket = &confirmed.outcomes[2].garment;
    assert_eq!(jacket.current_wears, 2);
}

fn navy_jacket_in(h: &Harness) -> Garment {
    h.inventory
        .all()
        .unwrap()
        .into_iter()
        .find(|g| g.category == GarmentCategory::Jacket)
        .expect("jacket stocked")
}

#[test]
fn confirm_fails_for_deleted_garment() {
    let h = harness(vec![white_tee(), khaki_chino()]);
    let suggestion = h.service.recommend(StyleMode::Casual).unwrap().suggestions[0].clone();
    h.service.delete_garment(suggestion.bottom.garment_id).unwrap();

    let result = h.service.confirm_outfit(&suggestion);
    assert_garment_not_found(&result, suggestion.bottom.garment_id);
}

#[test]
fn failed_confirm_leaves_other_garments_unworn() {
    let h = harness(vec![white_tee(), khaki_chino()]);
    let suggestion = h.service.recommend(StyleMode::Casual).unwrap().suggestions[0].clone();
    h.service.delete_garment(suggestion.bottom.garment_id).unwrap();

    assert!(h.service.confirm_outfit(&suggestion).is_err());

    let tee = h.inventory.get(suggestion.top.garment_id).unwrap().unwrap();
    assert_eq!(tee.current_wears, 0);
    assert_eq!(tee.laundry_status, LaundryStatus::Closet);
    assert_eq!(tee.last_worn_at, None);
    assert!(h.feedback.entries().unwrap().is_empty());
}

#[test]
fn save_requires_category_and_color() {
    let h = harness(Vec::new());
    let result = h.service.save_garment(None, GarmentDraft::default());
    assert_required_field(&result, "category");

    let no_color = GarmentDraft {
        category: Some(GarmentCategory::Polo),
        ..GarmentDraft::default()
    };
    assert_required_field(&h.service.save_garment(None, no_color), "color");
    assert_eq!(h.inventory.garment_count(), 0);
}

#[test]
fn save_learns_default_wears() {
    let h = harness(Vec::new());
    let mut first = draft(GarmentCategory::Denim, "#1f2a44");
    first.max_wears = Some(7);
    h.service.save_garment(None, first).unwrap();

    let learned = h.preferences.current().unwrap();
    assert_eq!(learned.default_wears_for(GarmentCategory::Denim), 7);

    let second = h
        .service
        .save_garment(None, draft(GarmentCategory::Denim, "#000000"))
        .unwrap();
    assert_eq!(second.max_wears, 7);
    assert_eq!(h.inventory.garment_count(), 2);
}

#[test]
fn editing_keeps_laundry_state() {
    let worn = white_tee().with_laundry_status(LaundryStatus::Dirty);
    let id = worn.garment_id;
    let h = harness(vec![worn]);

    let mut edit = draft(GarmentCategory::TShirt, "#eeeeee");
    edit.name = "Renamed tee".to_string();
    let saved = h.service.save_garment(Some(id), edit).unwrap();

    assert_eq!(saved.garment_id, id);
    assert_eq!(saved.laundry_status, LaundryStatus::Dirty);
    assert_eq!(saved.color_hex, "#EEEEEE");
    assert_eq!(h.inventory.garment_count(), 1);
}

#[test]
fn editing_unknown_garment_fails() {
    let h = harness(Vec::new());
    let id = GarmentId::now_v7();
    let result = h.service.save_garment(Some(id), draft(GarmentCategory::Polo, "#ffffff"));
    assert_garment_not_found(&result, id);
}

#[test]
fn laundry_round_trip_through_service() {
    let dirty = white_tee().with_wears(1, 1).with_laundry_status(LaundryStatus::Dirty);
    let id = dirty.garment_id;
    let h = harness(vec![dirty]);

    let at_cleaner = h.service.send_to_cleaning(id).unwrap();
    assert_eq!(at_cleaner.laundry_status, LaundryStatus::Cleaning);

    let clean = h.service.mark_clean(id).unwrap();
    assert_eq!(clean.laundry_status, LaundryStatus::Closet);
    assert_eq!(h.inventory.get(id).unwrap().unwrap().current_wears, 0);
}

#[test]
fn feedback_submission_and_pruning() {
    let h = harness(vec![white_tee(), khaki_chino()]);
    let suggestion = h.service.recommend(StyleMode::Casual).unwrap().suggestions[0].clone();
    let confirmed = h.service.confirm_outfit(&suggestion).unwrap();

    let pending = h.service.latest_pending_feedback().unwrap().expect("pending entry");
    assert_eq!(pending.feedback_id, confirmed.feedback_id);

    let submission = FeedbackSubmission::rated(Rating::new(4).unwrap(), Rating::new(5).unwrap())
        .with_notes("  comfy  ");
    h.service.submit_feedback(confirmed.feedback_id, submission).unwrap();
    assert!(h.service.latest_pending_feedback().unwrap().is_none());

    let entry = h.feedback.entries().unwrap().remove(0);
    assert_eq!(entry.notes.as_deref(), Some("comfy"));
    assert_eq!(entry.submitted_at, Some(reference_time()));

    // Worn "now" on the fixed clock, so well inside retention.
    h.service.prune_feedback().unwrap();
    assert_eq!(h.feedback.entries().unwrap().len(), 1);
}

#[test]
fn stale_color_wish_is_cleared_from_preferences() {
    let h = harness(vec![white_tee(), khaki_chino()]);
    h.service
        .save_color_wish(Some(ColorWish::new(SlotType::Top, "#00ff00", ColorGroup::Vivid)))
        .unwrap();

    let state = h.service.color_wish_state(&WishSelection::default()).unwrap();
    assert_eq!(state.saved, SavedWishUpdate::Removed);
    assert_eq!(h.preferences.current().unwrap().color_wish, None);
}

#[test]
fn saved_color_wish_filters_recommendation() {
    let h = harness(vec![
        white_tee(),
        khaki_chino(),
        wardrobe_test_utils::fixtures::garment(
            "Black polo",
            GarmentCategory::Polo,
            "#000000",
            ColorGroup::Monotone,
        ),
    ]);
    let wish = ColorWish::new(SlotType::Top, "#ffffff", ColorGroup::Monotone);
    h.service.save_color_wish(Some(wish)).unwrap();

    let recommendation = h.service.recommend(StyleMode::Casual).unwrap();
    assert!(!recommendation.is_empty());
    assert!(recommendation
        .suggestions
        .iter()
        .all(|s| s.top.color_hex == "#FFFFFF"));
}
