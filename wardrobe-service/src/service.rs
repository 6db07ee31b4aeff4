//! Caller-side operations over the stores.

use std::sync::Arc;
use wardrobe_core::{
    Clock, ColorWish, FeedbackId, Garment, GarmentDraft, GarmentId, OutfitSuggestion,
    StorageError, StyleMode, SystemClock, UserPreferenceRules, WardrobeConfig, WardrobeResult,
    WearFeedbackEntry, WearOutcome, WeatherSnapshot,
};
use wardrobe_recommend::{
    resolve_color_wish, ColorWishState, Recommendation, SavedWishUpdate, SuggestionEngine,
    SuggestionRequest, WishInventory, WishSelection,
};
use wardrobe_storage::{
    FeedbackStore, InMemoryFeedback, InMemoryInventory, InMemoryPreferences, InMemoryWeather,
    InventoryStore, PreferenceStore, WeatherSource,
};
use wardrobe_wear::{mark_clean, send_to_cleaning, FeedbackLog, FeedbackSubmission, WearEngine};

/// Temperature and humidity assumed when confirming before any weather arrived.
const NEUTRAL_TEMP_C: f64 = 20.0;
const NEUTRAL_HUMIDITY_PCT: f64 = 50.0;

/// The four collaborators the service reads from and writes to.
#[derive(Clone)]
pub struct WardrobeStores {
    pub inventory: Arc<dyn InventoryStore>,
    pub preferences: Arc<dyn PreferenceStore>,
    pub weather: Arc<dyn WeatherSource>,
    pub feedback: Arc<dyn FeedbackStore>,
}

impl WardrobeStores {
    /// Fresh in-memory stores with default preferences and no weather.
    pub fn in_memory() -> Self {
        Self {
            inventory: Arc::new(InMemoryInventory::new()),
            preferences: Arc::new(InMemoryPreferences::default()),
            weather: Arc::new(InMemoryWeather::new()),
            feedback: Arc::new(InMemoryFeedback::new()),
        }
    }
}

impl std::fmt::Debug for WardrobeStores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WardrobeStores").finish_non_exhaustive()
    }
}

/// What confirming an outfit did.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmedOutfit {
    /// One outcome per worn garment: top, bottom, then outer
    pub outcomes: Vec<WearOutcome>,
    /// Pending feedback entry for the outfit
    pub feedback_id: FeedbackId,
}

/// Run the engine over one snapshot of the inputs.
///
/// With `exclude_unavailable` set, garments that are dirty or at the
/// cleaner never reach the engine.
pub fn build_recommendation(
    engine: &SuggestionEngine,
    inventory: &[Garment],
    preferences: &UserPreferenceRules,
    weather: Option<&WeatherSnapshot>,
    mode: StyleMode,
) -> Recommendation {
    let candidates: Vec<Garment> = if engine.config().exclude_unavailable {
        inventory.iter().filter(|g| g.is_available()).cloned().collect()
    } else {
        inventory.to_vec()
    };
    let request = SuggestionRequest::from_preferences(&candidates, mode, preferences, weather);
    engine.suggest(&request)
}

/// Stores plus the engines that operate on them.
pub struct WardrobeService {
    stores: WardrobeStores,
    engine: SuggestionEngine,
    wear: WearEngine,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for WardrobeService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WardrobeService")
            .field("engine", &self.engine)
            .field("wear", &self.wear)
            .field("clock", &"<Clock>")
            .finish()
    }
}

impl WardrobeService {
    pub fn new(stores: WardrobeStores, config: WardrobeConfig) -> WardrobeResult<Self> {
        Self::with_clock(stores, config, Arc::new(SystemClock))
    }

    pub fn with_clock(
        stores: WardrobeStores,
        config: WardrobeConfig,
        clock: Arc<dyn Clock>,
    ) -> WardrobeResult<Self> {
        let wear = WearEngine::with_clock(&config, Arc::clone(&clock))?;
        let engine = SuggestionEngine::new(config)?;
        Ok(Self {
            stores,
            engine,
            wear,
            clock,
        })
    }

    pub fn stores(&self) -> &WardrobeStores {
        &self.stores
    }

    pub fn engine(&self) -> &SuggestionEngine {
        &self.engine
    }

    pub fn config(&self) -> &WardrobeConfig {
        self.engine.config()
    }

    // ========================================================================
    // RECOMMENDATION
    // ========================================================================

    /// Snapshot inventory, preferences and weather, then run the engine.
    pub fn recommend(&self, mode: StyleMode) -> WardrobeResult<Recommendation> {
        let inventory = self.stores.inventory.all()?;
        let preferences = self.stores.preferences.current()?;
        let weather = self.stores.weather.current_weather();
        let recommendation =
            build_recommendation(&self.engine, &inventory, &preferences, weather.as_ref(), mode);
        tracing::debug!(
            mode = %mode,
            suggestions = recommendation.suggestions.len(),
            diagnostics = recommendation.diagnostics.len(),
            "recommendation computed"
        );
        Ok(recommendation)
    }

    /// Resolve the color-wish picker, clearing or relabeling the saved wish
    /// when the closet no longer matches it.
    pub fn color_wish_state(&self, selection: &WishSelection) -> WardrobeResult<ColorWishState> {
        let inventory = WishInventory::from_garments(&self.stores.inventory.all()?);
        let preferences = self.stores.preferences.current()?;
        let state = resolve_color_wish(&inventory, preferences.color_wish.as_ref(), selection);
        match &state.saved {
            SavedWishUpdate::Unchanged => {}
            SavedWishUpdate::Removed => {
                tracing::debug!("saved color wish no longer matches, clearing");
                self.save_color_wish(None)?;
            }
            SavedWishUpdate::Refreshed(wish) => {
                self.save_color_wish(Some(wish.clone()))?;
            }
        }
        Ok(state)
    }

    pub fn save_color_wish(&self, wish: Option<ColorWish>) -> WardrobeResult<()> {
        self.stores
            .preferences
            .update(&mut |rules| rules.with_color_wish(wish.clone()))?;
        Ok(())
    }

    // ========================================================================
    // WEAR
    // ========================================================================

    /// Wear every garment of `suggestion` and open a feedback entry.
    ///
    /// Each garment is re-read from the inventory so the wear applies to
    /// its latest state, then written back with a single replace-by-id.
    pub fn confirm_outfit(
        &self,
        suggestion: &OutfitSuggestion,
    ) -> WardrobeResult<ConfirmedOutfit> {
        let weather = self.stores.weather.current_weather().unwrap_or_else(|| {
            WeatherSnapshot::new(
                NEUTRAL_TEMP_C,
                NEUTRAL_TEMP_C,
                NEUTRAL_HUMIDITY_PCT,
                self.clock.now(),
            )
        });

        // Every garment must still exist before any of them is worn.
        let outcomes = suggestion
            .garments()
            .map(|worn| -> WardrobeResult<_> {
                let current = self
                    .stores
                    .inventory
                    .get(worn.garment_id)?
                    .ok_or(StorageError::GarmentNotFound(worn.garment_id))?;
                Ok(self.wear.apply(&current, &weather))
            })
            .collect::<WardrobeResult<Vec<_>>>()?;
        for outcome in &outcomes {
            self.stores.inventory.replace(outcome.garment.clone())?;
        }

        let feedback_id = self.record_wear(
            Some(suggestion.top.garment_id),
            Some(suggestion.bottom.garment_id),
        )?;

        tracing::info!(
            top = %suggestion.top.garment_id,
            bottom = %suggestion.bottom.garment_id,
            dirty = outcomes.iter().filter(|o| o.moved_to_dirty).count(),
            feedback_id = %feedback_id,
            "outfit confirmed"
        );
        Ok(ConfirmedOutfit {
            outcomes,
            feedback_id,
        })
    }

    pub fn send_to_cleaning(&self, id: GarmentId) -> WardrobeResult<Garment> {
        self.transform_garment(id, send_to_cleaning)
    }

    pub fn mark_clean(&self, id: GarmentId) -> WardrobeResult<Garment> {
        self.transform_garment(id, mark_clean)
    }

    fn transform_garment(
        &self,
        id: GarmentId,
        transform: fn(&Garment) -> Garment,
    ) -> WardrobeResult<Garment> {
        let current = self
            .stores
            .inventory
            .get(id)?
            .ok_or(StorageError::GarmentNotFound(id))?;
        let updated = transform(&current);
        self.stores.inventory.replace(updated.clone())?;
        Ok(updated)
    }

    // ========================================================================
    // GARMENT EDITING
    // ========================================================================

    /// Validate and store a draft, then remember its wear budget as the
    /// default for its category.
    ///
    /// `id` of an existing garment edits it in place, keeping its laundry
    /// status and last-worn time.
    pub fn save_garment(
        &self,
        id: Option<GarmentId>,
        draft: GarmentDraft,
    ) -> WardrobeResult<Garment> {
        let preferences = self.stores.preferences.current()?;
        let existing = match id {
            Some(id) => Some(
                self.stores
                    .inventory
                    .get(id)?
                    .ok_or(StorageError::GarmentNotFound(id))?,
            ),
            None => None,
        };

        let mut garment = draft.into_garment(id.unwrap_or_else(GarmentId::now_v7), &preferences)?;
        if let Some(existing) = existing {
            garment.laundry_status = existing.laundry_status;
            garment.last_worn_at = existing.last_worn_at;
        }
        self.stores.inventory.upsert(garment.clone())?;

        let (category, max_wears) = (garment.category, garment.max_wears);
        self.stores
            .preferences
            .update(&mut |rules| rules.learn_default_wears(category, max_wears))?;

        tracing::debug!(garment_id = %garment.garment_id, category = %category, "garment saved");
        Ok(garment)
    }

    pub fn delete_garment(&self, id: GarmentId) -> WardrobeResult<()> {
        self.stores.inventory.delete(id)
    }

    // ========================================================================
    // FEEDBACK
    // ========================================================================

    fn record_wear(
        &self,
        top: Option<GarmentId>,
        bottom: Option<GarmentId>,
    ) -> WardrobeResult<FeedbackId> {
        let clock = Arc::clone(&self.clock);
        let mut recorded = None;
        self.stores.feedback.update(&mut |entries| {
            let (log, id) = FeedbackLog::from_entries(entries).record_wear(top, bottom, clock.as_ref());
            recorded = Some(id);
            log.into_entries()
        })?;
        // A store that skipped the closure recorded nothing.
        Ok(recorded.ok_or(StorageError::ChannelClosed)?)
    }

    pub fn submit_feedback(
        &self,
        id: FeedbackId,
        submission: FeedbackSubmission,
    ) -> WardrobeResult<()> {
        let clock = Arc::clone(&self.clock);
        let mut submission = Some(submission);
        self.stores.feedback.update(&mut |entries| {
            let log = FeedbackLog::from_entries(entries);
            let log = match submission.take() {
                Some(submission) => log.submit_feedback(id, submission, clock.as_ref()),
                None => log,
            };
            log.into_entries()
        })
    }

    pub fn latest_pending_feedback(&self) -> WardrobeResult<Option<WearFeedbackEntry>> {
        let log = FeedbackLog::from_entries(self.stores.feedback.entries()?);
        Ok(log.latest_pending().cloned())
    }

    /// Drop rated feedback older than the configured retention.
    pub fn prune_feedback(&self) -> WardrobeResult<()> {
        let retention_days = self.config().feedback_retention_days;
        let clock = Arc::clone(&self.clock);
        self.stores.feedback.update(&mut |entries| {
            FeedbackLog::from_entries(entries)
                .prune_retained(retention_days, clock.as_ref())
                .into_entries()
        })
    }
}
