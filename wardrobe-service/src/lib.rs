//! Wardrobe Service - Orchestration
//!
//! Wires the stores to the suggestion engine and the wear engine:
//! snapshot the inputs and recommend, confirm an outfit, save a garment,
//! and keep a live recommendation up to date as the inputs change.

pub mod feed;
pub mod service;

pub use feed::{recommendation_feed_task, FeedMetrics, FeedSnapshot, RecommendationFeed};
pub use service::{build_recommendation, ConfirmedOutfit, WardrobeService, WardrobeStores};
