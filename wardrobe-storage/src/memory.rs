//! In-memory stores backed by a lock plus a watch channel.

use crate::{FeedbackStore, InventoryStore, PreferenceStore, WeatherSource};
use std::sync::RwLock;
use tokio::sync::watch;
use wardrobe_core::{
    Garment, GarmentId, StorageError, UserPreferenceRules, WardrobeResult, WearFeedbackEntry,
    WeatherSnapshot,
};

/// A value guarded by a lock whose every committed write is published.
///
/// The write lock is held while publishing, so observers see writes in the
/// order they were committed.
#[derive(Debug)]
struct ObservableCell<T> {
    state: RwLock<T>,
    tx: watch::Sender<T>,
}

impl<T: Clone> ObservableCell<T> {
    fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial.clone());
        Self {
            state: RwLock::new(initial),
            tx,
        }
    }

    fn read(&self) -> WardrobeResult<T> {
        let guard = self.state.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(guard.clone())
    }

    /// Run `f` on the value and publish the result. `f` must leave the
    /// value untouched when it returns an error.
    fn modify<R>(&self, f: impl FnOnce(&mut T) -> WardrobeResult<R>) -> WardrobeResult<R> {
        let mut guard = self.state.write().map_err(|_| StorageError::LockPoisoned)?;
        let out = f(&mut *guard)?;
        self.tx.send_replace(guard.clone());
        Ok(out)
    }

    fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

// ============================================================================
// INVENTORY
// ============================================================================

/// In-memory garment inventory.
#[derive(Debug)]
pub struct InMemoryInventory {
    garments: ObservableCell<Vec<Garment>>,
}

impl Default for InMemoryInventory {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryInventory {
    pub fn new() -> Self {
        Self::with_garments(Vec::new())
    }

    pub fn with_garments(garments: Vec<Garment>) -> Self {
        Self {
            garments: ObservableCell::new(garments),
        }
    }

    /// Get count of stored garments.
    pub fn garment_count(&self) -> usize {
        self.garments.read().map(|g| g.len()).unwrap_or(0)
    }
}

fn upsert_into(garments: &mut Vec<Garment>, garment: Garment) {
    match garments
        .iter_mut()
        .find(|g| g.garment_id == garment.garment_id)
    {
        Some(slot) => *slot = garment,
        None => garments.push(garment),
    }
}

impl InventoryStore for InMemoryInventory {
    fn all(&self) -> WardrobeResult<Vec<Garment>> {
        self.garments.read()
    }

    fn get(&self, id: GarmentId) -> WardrobeResult<Option<Garment>> {
        let garments = self.garments.read()?;
        Ok(garments.into_iter().find(|g| g.garment_id == id))
    }

    fn upsert(&self, garment: Garment) -> WardrobeResult<()> {
        tracing::trace!(garment_id = %garment.garment_id, "upsert garment");
        self.garments.modify(|garments| {
            upsert_into(garments, garment);
            Ok(())
        })
    }

    fn upsert_all(&self, batch: Vec<Garment>) -> WardrobeResult<()> {
        self.garments.modify(|garments| {
            for garment in batch {
                upsert_into(garments, garment);
            }
            Ok(())
        })
    }

    fn replace(&self, garment: Garment) -> WardrobeResult<()> {
        self.garments.modify(|garments| {
            match garments
                .iter_mut()
                .find(|g| g.garment_id == garment.garment_id)
            {
                Some(slot) => {
                    *slot = garment;
                    Ok(())
                }
                None => Err(StorageError::GarmentNotFound(garment.garment_id).into()),
            }
        })
    }

    fn delete(&self, id: GarmentId) -> WardrobeResult<()> {
        self.garments.modify(|garments| {
            let index = garments
                .iter()
                .position(|g| g.garment_id == id)
                .ok_or(StorageError::GarmentNotFound(id))?;
            garments.remove(index);
            Ok(())
        })
    }

    fn observe_all(&self) -> watch::Receiver<Vec<Garment>> {
        self.garments.subscribe()
    }
}

// ============================================================================
// PREFERENCES
// ============================================================================

/// In-memory preference rules, starting from the defaults.
#[derive(Debug)]
pub struct InMemoryPreferences {
    rules: ObservableCell<UserPreferenceRules>,
}

impl Default for InMemoryPreferences {
    fn default() -> Self {
        Self::new(UserPreferenceRules::default())
    }
}

impl InMemoryPreferences {
    pub fn new(rules: UserPreferenceRules) -> Self {
        Self {
            rules: ObservableCell::new(rules),
        }
    }
}

impl PreferenceStore for InMemoryPreferences {
    fn current(&self) -> WardrobeResult<UserPreferenceRules> {
        self.rules.read()
    }

    fn update(
        &self,
        transform: &mut dyn FnMut(UserPreferenceRules) -> UserPreferenceRules,
    ) -> WardrobeResult<UserPreferenceRules> {
        self.rules.modify(|rules| {
            *rules = transform(rules.clone());
            Ok(rules.clone())
        })
    }

    fn observe(&self) -> watch::Receiver<UserPreferenceRules> {
        self.rules.subscribe()
    }
}

// ============================================================================
// WEATHER
// ============================================================================

/// Weather source fed by hand; empty until the first [`publish`](Self::publish).
#[derive(Debug)]
pub struct InMemoryWeather {
    tx: watch::Sender<Option<WeatherSnapshot>>,
}

impl Default for InMemoryWeather {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryWeather {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    pub fn with_snapshot(snapshot: WeatherSnapshot) -> Self {
        let source = Self::new();
        source.publish(snapshot);
        source
    }

    pub fn publish(&self, snapshot: WeatherSnapshot) {
        self.tx.send_replace(Some(snapshot));
    }

    pub fn clear(&self) {
        self.tx.send_replace(None);
    }
}

impl WeatherSource for InMemoryWeather {
    fn current_weather(&self) -> Option<WeatherSnapshot> {
        *self.tx.borrow()
    }

    fn observe_current_weather(&self) -> watch::Receiver<Option<WeatherSnapshot>> {
        self.tx.subscribe()
    }
}

// ============================================================================
// FEEDBACK
// ============================================================================

/// In-memory feedback entries.
#[derive(Debug)]
pub struct InMemoryFeedback {
    entries: ObservableCell<Vec<WearFeedbackEntry>>,
}

impl Default for InMemoryFeedback {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryFeedback {
    pub fn new() -> Self {
        Self {
            entries: ObservableCell::new(Vec::new()),
        }
    }
}

impl FeedbackStore for InMemoryFeedback {
    fn entries(&self) -> WardrobeResult<Vec<WearFeedbackEntry>> {
        self.entries.read()
    }

    fn update(
        &self,
        transform: &mut dyn FnMut(Vec<WearFeedbackEntry>) -> Vec<WearFeedbackEntry>,
    ) -> WardrobeResult<()> {
        self.entries.modify(|entries| {
            *entries = transform(std::mem::take(entries));
            Ok(())
        })
    }

    fn observe(&self) -> watch::Receiver<Vec<WearFeedbackEntry>> {
        self.entries.subscribe()
    }
}
