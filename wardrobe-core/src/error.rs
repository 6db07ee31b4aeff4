//! Error types for wardrobe operations
//!
//! Recommendation problems are never errors: they surface as diagnostics.
//! The types here cover caller-side precondition violations, store failures
//! and bad configuration.

use crate::GarmentId;
use thiserror::Error;

/// Validation errors for values entering the system.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Value for {field} out of range: {value} not in [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: i64,
        min: i64,
        max: i64,
    },
}

impl ValidationError {
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::RequiredFieldMissing {
            field: field.into(),
        }
    }
}

/// Storage layer errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Garment not found: {0}")]
    GarmentNotFound(GarmentId),

    #[error("Storage lock poisoned")]
    LockPoisoned,

    #[error("Store channel closed")]
    ChannelClosed,
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to parse configuration: {reason}")]
    Parse { reason: String },
}

/// Master error type for all wardrobe errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WardrobeError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for wardrobe operations.
pub type WardrobeResult<T> = Result<T, WardrobeError>;
