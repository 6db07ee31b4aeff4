//! Wear feedback lifecycle
//!
//! A [`FeedbackLog`] holds one entry per confirmed outfit. Entries start
//! pending, become submitted once rated, and only fully rated entries are
//! ever pruned. The log is a value: every operation consumes it and hands
//! back the next version.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use wardrobe_core::{Clock, FeedbackId, GarmentId, Rating, Timestamp, WearFeedbackEntry};

/// What the user filled in on the feedback form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FeedbackSubmission {
    pub top_rating: Option<Rating>,
    pub bottom_rating: Option<Rating>,
    pub notes: Option<String>,
}

impl FeedbackSubmission {
    pub fn rated(top: Rating, bottom: Rating) -> Self {
        Self {
            top_rating: Some(top),
            bottom_rating: Some(bottom),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Trimmed notes, or `None` when blank.
fn clean_notes(notes: Option<String>) -> Option<String> {
    notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
}

/// Ordered collection of feedback entries, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedbackLog {
    entries: Vec<WearFeedbackEntry>,
}

impl FeedbackLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<WearFeedbackEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[WearFeedbackEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<WearFeedbackEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: FeedbackId) -> Option<&WearFeedbackEntry> {
        self.entries.iter().find(|e| e.feedback_id == id)
    }

    /// Append a pending entry for an outfit worn now.
    pub fn record_wear(
        mut self,
        top_item_id: Option<GarmentId>,
        bottom_item_id: Option<GarmentId>,
        clock: &dyn Clock,
    ) -> (Self, FeedbackId) {
        let id = FeedbackId::now_v7();
        self.entries.push(WearFeedbackEntry::pending(
            id,
            clock.now(),
            top_item_id,
            bottom_item_id,
        ));
        tracing::debug!(feedback_id = %id, "pending feedback recorded");
        (self, id)
    }

    /// Store the user's ratings on entry `id`. Unknown ids are ignored.
    pub fn submit_feedback(
        mut self,
        id: FeedbackId,
        submission: FeedbackSubmission,
        clock: &dyn Clock,
    ) -> Self {
        match self.entries.iter_mut().find(|e| e.feedback_id == id) {
            Some(entry) => {
                entry.top_rating = submission.top_rating;
                entry.bottom_rating = submission.bottom_rating;
                entry.overall_rating = None;
                entry.notes = clean_notes(submission.notes);
                entry.submitted_at = Some(clock.now());
            }
            None => tracing::debug!(feedback_id = %id, "feedback entry not found, ignoring"),
        }
        self
    }

    /// Drop fully rated entries worn before `before`. Pending and partially
    /// rated entries are kept whatever their age.
    pub fn prune_history(mut self, before: Timestamp) -> Self {
        let len_before = self.entries.len();
        self.entries
            .retain(|e| !(e.is_fully_rated() && e.worn_at < before));
        let pruned = len_before - self.entries.len();
        if pruned > 0 {
            tracing::debug!(pruned, "feedback history pruned");
        }
        self
    }

    /// [`prune_history`](Self::prune_history) with a cutoff `retention_days`
    /// before now.
    pub fn prune_retained(self, retention_days: i64, clock: &dyn Clock) -> Self {
        let cutoff = clock.now() - Duration::days(retention_days);
        self.prune_history(cutoff)
    }

    /// Most recently worn entry that has no rating yet.
    pub fn latest_pending(&self) -> Option<&WearFeedbackEntry> {
        self.entries
            .iter()
            .filter(|e| e.is_pending())
            .max_by_key(|e| e.worn_at)
    }
}
