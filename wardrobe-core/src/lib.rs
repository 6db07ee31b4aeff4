//! Wardrobe Core - Entity Types
//!
//! Pure data structures shared by every wardrobe crate: garments, weather,
//! preferences, suggestions, wear outcomes and feedback entries, plus the
//! enums, ids, errors and configuration they are built from.
//! Recommendation and wear logic live in their own crates.

pub mod color;
pub mod config;
pub mod enums;
pub mod error;
pub mod feedback;
pub mod garment;
pub mod identity;
pub mod outfit;
pub mod preferences;
pub mod weather;

pub use color::{color_label, normalize_hex, same_hex, Rgb};
pub use config::{HeatRule, ScoreRange, ScoreRanges, SuitabilityConfig, WardrobeConfig};
pub use enums::{
    CleaningMethod, ColorGroup, GarmentCategory, LaundryStatus, Pattern, SleeveLength, SlotType,
    StyleMode, Thickness,
};
pub use error::{ConfigError, StorageError, ValidationError, WardrobeError, WardrobeResult};
pub use feedback::{Rating, WearFeedbackEntry};
pub use garment::{Garment, GarmentDraft, TemperatureRange};
pub use identity::{
    Clock, EntityIdType, FeedbackId, FixedClock, GarmentId, SystemClock, Timestamp,
};
pub use outfit::{DamageReason, OutfitSuggestion, WearOutcome};
pub use preferences::{ColorWish, UserPreferenceRules};
pub use weather::WeatherSnapshot;
