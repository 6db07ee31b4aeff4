//! Wardrobe Recommend - Outfit Suggestion
//!
//! Comfort bands, weather suitability, formality scoring, color rules and
//! the suggestion engine that combines them. Everything here is a pure
//! function of its inputs; persistence and observation live elsewhere.

pub mod comfort;
pub mod diagnostics;
pub mod engine;
pub mod formality;
pub mod palette;
pub mod suitability;
pub mod wish;

pub use comfort::{garment_comfort_range, resolve_comfort_range};
pub use diagnostics::{
    Diagnostic, DiagnosticResolver, DiagnosticTag, Diagnostics, EnglishResolver,
};
pub use engine::{compare_suggestions, Recommendation, SuggestionEngine, SuggestionRequest};
pub use formality::formality_score;
pub use palette::{color_conflict, colors_compatible, ColorConflict, ColorRules};
pub use suitability::{garment_suits, is_suitable};
pub use wish::{
    resolve_color_wish, ColorOption, ColorWishState, SavedWishUpdate, WishInventory, WishSelection,
};
