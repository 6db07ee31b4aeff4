//! Live Recommendation Feed
//!
//! A background task that watches the inventory, preference and weather
//! stores plus the selected style mode, and republishes a fresh
//! [`Recommendation`] whenever any of them changes. Only the newest result
//! is kept: a slow consumer skips intermediate recomputations.
//!
//! ```ignore
//! let mut feed = RecommendationFeed::spawn(Arc::clone(&service), StyleMode::Casual);
//! let first = feed.next().await?;
//! feed.set_mode(StyleMode::Office);
//! let metrics = feed.shutdown().await;
//! ```

use crate::service::{build_recommendation, WardrobeService};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use wardrobe_core::{
    Garment, StorageError, StyleMode, UserPreferenceRules, WardrobeResult, WeatherSnapshot,
};
use wardrobe_recommend::Recommendation;

// ============================================================================
// METRICS
// ============================================================================

/// Counters for feed activity.
#[derive(Debug, Default)]
pub struct FeedMetrics {
    /// Recommendations published since startup
    pub recomputations: AtomicU64,

    /// Published recommendations that carried no suggestion
    pub empty_results: AtomicU64,

    /// Style mode switches observed
    pub mode_changes: AtomicU64,
}

impl FeedMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        FeedSnapshot {
            recomputations: self.recomputations.load(Ordering::Relaxed),
            empty_results: self.empty_results.load(Ordering::Relaxed),
            mode_changes: self.mode_changes.load(Ordering::Relaxed),
        }
    }
}

/// Feed metrics at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedSnapshot {
    pub recomputations: u64,
    pub empty_results: u64,
    pub mode_changes: u64,
}

// ============================================================================
// BACKGROUND TASK
// ============================================================================

/// Receivers for everything a recommendation depends on.
struct FeedInputs {
    inventory: watch::Receiver<Vec<Garment>>,
    preferences: watch::Receiver<UserPreferenceRules>,
    weather: watch::Receiver<Option<WeatherSnapshot>>,
    mode: watch::Receiver<StyleMode>,
}

impl FeedInputs {
    fn subscribe(service: &WardrobeService, mode: watch::Receiver<StyleMode>) -> Self {
        let stores = service.stores();
        Self {
            inventory: stores.inventory.observe_all(),
            preferences: stores.preferences.observe(),
            weather: stores.weather.observe_current_weather(),
            mode,
        }
    }

    /// Latest value of every input, marking each as seen.
    fn latest(
        &mut self,
    ) -> (
        Vec<Garment>,
        UserPreferenceRules,
        Option<WeatherSnapshot>,
        StyleMode,
    ) {
        (
            self.inventory.borrow_and_update().clone(),
            self.preferences.borrow_and_update().clone(),
            self.weather.borrow_and_update().clone(),
            *self.mode.borrow_and_update(),
        )
    }
}

fn publish(
    service: &WardrobeService,
    inputs: &mut FeedInputs,
    output_tx: &watch::Sender<Recommendation>,
    metrics: &FeedMetrics,
) {
    let (inventory, preferences, weather, mode) = inputs.latest();
    let recommendation = build_recommendation(
        service.engine(),
        &inventory,
        &preferences,
        weather.as_ref(),
        mode,
    );

    metrics.recomputations.fetch_add(1, Ordering::Relaxed);
    if recommendation.is_empty() {
        metrics.empty_results.fetch_add(1, Ordering::Relaxed);
    }
    tracing::trace!(
        mode = %mode,
        garments = inventory.len(),
        suggestions = recommendation.suggestions.len(),
        "feed recomputed"
    );
    output_tx.send_replace(recommendation);
}

/// Recompute and publish a recommendation on every input change.
///
/// Publishes once on startup, then runs until `shutdown_rx` flips to
/// `true` or any input channel closes.
///
/// # Returns
///
/// Metrics collected during the task's lifetime
pub async fn recommendation_feed_task(
    service: Arc<WardrobeService>,
    mode_rx: watch::Receiver<StyleMode>,
    output_tx: watch::Sender<Recommendation>,
    mut shutdown_rx: watch::Receiver<bool>,
) -> Arc<FeedMetrics> {
    let metrics = Arc::new(FeedMetrics::new());
    let mut inputs = FeedInputs::subscribe(&service, mode_rx);

    let mode = *inputs.mode.borrow();
    tracing::info!(mode = %mode, "recommendation feed started");
    publish(&service, &mut inputs, &output_tx, &metrics);

    loop {
        tokio::select! {
            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() {
                    tracing::info!("recommendation feed shutting down");
                    break;
                }
            }

            changed = inputs.inventory.changed() => {
                if changed.is_err() {
                    tracing::warn!("inventory store closed, stopping feed");
                    break;
                }
                publish(&service, &mut inputs, &output_tx, &metrics);
            }

            changed = inputs.preferences.changed() => {
                if changed.is_err() {
                    tracing::warn!("preference store closed, stopping feed");
                    break;
                }
                publish(&service, &mut inputs, &output_tx, &metrics);
            }

            changed = inputs.weather.changed() => {
                if changed.is_err() {
                    tracing::warn!("weather source closed, stopping feed");
                    break;
                }
                publish(&service, &mut inputs, &output_tx, &metrics);
            }

            changed = inputs.mode.changed() => {
                if changed.is_err() {
                    break;
                }
                metrics.mode_changes.fetch_add(1, Ordering::Relaxed);
                publish(&service, &mut inputs, &output_tx, &metrics);
            }
        }
    }

    let snapshot = metrics.snapshot();
    tracing::info!(
        recomputations = snapshot.recomputations,
        empty_results = snapshot.empty_results,
        mode_changes = snapshot.mode_changes,
        "recommendation feed completed"
    );

    metrics
}

// ============================================================================
// HANDLE
// ============================================================================

/// Owner of a running feed task.
#[derive(Debug)]
pub struct RecommendationFeed {
    mode_tx: watch::Sender<StyleMode>,
    output_rx: watch::Receiver<Recommendation>,
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<Arc<FeedMetrics>>,
}

impl RecommendationFeed {
    /// Start the feed on the current tokio runtime.
    pub fn spawn(service: Arc<WardrobeService>, mode: StyleMode) -> Self {
        let (mode_tx, mode_rx) = watch::channel(mode);
        let (output_tx, output_rx) = watch::channel(Recommendation::default());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(recommendation_feed_task(
            service,
            mode_rx,
            output_tx,
            shutdown_rx,
        ));

        Self {
            mode_tx,
            output_rx,
            shutdown_tx,
            handle,
        }
    }

    /// Independent receiver of published recommendations.
    pub fn subscribe(&self) -> watch::Receiver<Recommendation> {
        self.output_rx.clone()
    }

    /// Most recently published recommendation.
    pub fn current(&self) -> Recommendation {
        self.output_rx.borrow().clone()
    }

    pub fn mode(&self) -> StyleMode {
        *self.mode_tx.borrow()
    }

    /// Switch style mode. Selecting the current mode is a no-op.
    pub fn set_mode(&self, mode: StyleMode) {
        self.mode_tx.send_if_modified(|current| {
            if *current == mode {
                return false;
            }
            *current = mode;
            true
        });
    }

    /// Wait for the next recommendation this handle has not seen yet.
    pub async fn next(&mut self) -> WardrobeResult<Recommendation> {
        self.output_rx
            .changed()
            .await
            .map_err(|_| StorageError::ChannelClosed)?;
        Ok(self.output_rx.borrow_and_update().clone())
    }

    /// Stop the task and collect its metrics. `None` if the task panicked.
    pub async fn shutdown(self) -> Option<FeedSnapshot> {
        self.shutdown_tx.send_replace(true);
        match self.handle.await {
            Ok(metrics) => Some(metrics.snapshot()),
            Err(e) => {
                tracing::error!(error = %e, "recommendation feed task failed");
                None
            }
        }
    }
}
