//! Post-wear feedback entries

use crate::{FeedbackId, GarmentId, Timestamp, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Satisfaction rating on a 1..=5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::OutOfRange {
                field: "rating".to_string(),
                value: i64::from(value),
                min: i64::from(Self::MIN),
                max: i64::from(Self::MAX),
            })
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

/// Feedback about one day's outfit.
///
/// Created pending (no ratings) when the outfit is worn, submitted once
/// ratings or notes are set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct WearFeedbackEntry {
    pub feedback_id: FeedbackId,
    pub worn_at: Timestamp,
    pub top_item_id: Option<GarmentId>,
    pub bottom_item_id: Option<GarmentId>,
    pub top_rating: Option<Rating>,
    pub bottom_rating: Option<Rating>,
    /// Deprecated single rating, superseded by the per-slot ratings. Only
    /// read for entries written before those existed.
    #[serde(default)]
    pub overall_rating: Option<Rating>,
    pub notes: Option<String>,
    pub submitted_at: Option<Timestamp>,
}

impl WearFeedbackEntry {
    /// New pending entry.
    pub fn pending(
        feedback_id: FeedbackId,
        worn_at: Timestamp,
        top_item_id: Option<GarmentId>,
        bottom_item_id: Option<GarmentId>,
    ) -> Self {
        Self {
            feedback_id,
            worn_at,
            top_item_id,
            bottom_item_id,
            top_rating: None,
            bottom_rating: None,
            overall_rating: None,
            notes: None,
            submitted_at: None,
        }
    }

    /// No rating of any kind has been given yet.
    pub fn is_pending(&self) -> bool {
        self.top_rating.is_none() && self.bottom_rating.is_none() && self.overall_rating.is_none()
    }

    /// Every referenced slot carries a rating, or the legacy overall rating
    /// is set.
    pub fn is_fully_rated(&self) -> bool {
        if self.overall_rating.is_some() {
            return true;
        }
        let top_ok = self.top_item_id.is_none() || self.top_rating.is_some();
        let bottom_ok = self.bottom_item_id.is_none() || self.bottom_rating.is_some();
        top_ok && bottom_ok && !self.is_pending()
    }
}
