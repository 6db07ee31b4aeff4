//! Wardrobe Wear - Wear Tracking
//!
//! What happens after an outfit is confirmed: wear damage and the move to
//! the laundry, laundry round trips, and the post-wear feedback log.

pub mod apply;
pub mod feedback;
pub mod laundry;

pub use apply::{apply_wear, is_heat_day, wear_damage, Damage, WearEngine};
pub use feedback::{FeedbackLog, FeedbackSubmission};
pub use laundry::{mark_clean, send_to_cleaning};
