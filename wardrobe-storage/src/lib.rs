//! Wardrobe Storage - Store Traits and In-Memory Implementation
//!
//! The recommender only ever reads snapshots. These traits describe the
//! collaborators it reads from: an inventory, the user's preferences, a
//! weather feed and the feedback log. Each one can be observed through a
//! `tokio::sync::watch` channel that always holds the latest value.

pub mod memory;

pub use memory::{InMemoryFeedback, InMemoryInventory, InMemoryPreferences, InMemoryWeather};

use tokio::sync::watch;
use wardrobe_core::{
    Garment, GarmentId, UserPreferenceRules, WardrobeResult, WearFeedbackEntry, WeatherSnapshot,
};

// ============================================================================
// STORE TRAITS
// ============================================================================

/// Garment inventory.
///
/// Writes replace whole garments by id, never individual fields, so a
/// concurrent reader sees either the old or the new garment.
pub trait InventoryStore: Send + Sync {
    /// Every garment, in insertion order.
    fn all(&self) -> WardrobeResult<Vec<Garment>>;

    fn get(&self, id: GarmentId) -> WardrobeResult<Option<Garment>>;

    /// Insert, or replace the garment with the same id.
    fn upsert(&self, garment: Garment) -> WardrobeResult<()>;

    /// [`upsert`](Self::upsert) many garments in one step.
    fn upsert_all(&self, garments: Vec<Garment>) -> WardrobeResult<()>;

    /// Replace an existing garment. Fails if it has been deleted.
    fn replace(&self, garment: Garment) -> WardrobeResult<()>;

    fn delete(&self, id: GarmentId) -> WardrobeResult<()>;

    /// Receiver that is updated after every write.
    fn observe_all(&self) -> watch::Receiver<Vec<Garment>>;
}

/// The user's preference rules.
pub trait PreferenceStore: Send + Sync {
    fn current(&self) -> WardrobeResult<UserPreferenceRules>;

    /// Atomically replace the rules with `transform(current)` and return
    /// the stored value.
    fn update(
        &self,
        transform: &mut dyn FnMut(UserPreferenceRules) -> UserPreferenceRules,
    ) -> WardrobeResult<UserPreferenceRules>;

    fn observe(&self) -> watch::Receiver<UserPreferenceRules>;
}

/// Latest weather snapshot, if one has arrived.
pub trait WeatherSource: Send + Sync {
    fn current_weather(&self) -> Option<WeatherSnapshot>;

    fn observe_current_weather(&self) -> watch::Receiver<Option<WeatherSnapshot>>;
}

/// Post-wear feedback entries.
pub trait FeedbackStore: Send + Sync {
    fn entries(&self) -> WardrobeResult<Vec<WearFeedbackEntry>>;

    /// Atomically replace all entries with `transform(current)`.
    fn update(
        &self,
        transform: &mut dyn FnMut(Vec<WearFeedbackEntry>) -> Vec<WearFeedbackEntry>,
    ) -> WardrobeResult<()>;

    fn observe(&self) -> watch::Receiver<Vec<WearFeedbackEntry>>;
}
