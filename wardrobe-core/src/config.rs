//! Configuration types
//!
//! Every tunable of the recommender and wear engine lives here. `Default`
//! reproduces the stock behavior; a TOML file may override any subset.

use crate::{ConfigError, StyleMode, WardrobeResult};
use serde::{Deserialize, Serialize};

/// Inclusive range of acceptable total formality scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ScoreRange {
    pub min: i32,
    pub max: i32,
}

impl ScoreRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, score: i32) -> bool {
        (self.min..=self.max).contains(&score)
    }
}

/// Score ranges per style mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct ScoreRanges {
    pub casual: ScoreRange,
    pub office: ScoreRange,
    /// Used for any mode that is neither casual nor office
    pub fallback: ScoreRange,
}

impl Default for ScoreRanges {
    fn default() -> Self {
        Self {
            casual: ScoreRange::new(5, 12),
            office: ScoreRange::new(13, 18),
            fallback: ScoreRange::new(5, 15),
        }
    }
}

impl ScoreRanges {
    pub fn for_mode(&self, mode: StyleMode) -> ScoreRange {
        match mode {
            StyleMode::Casual => self.casual,
            StyleMode::Office => self.office,
            StyleMode::Unknown => self.fallback,
        }
    }
}

/// Weather tolerance around a garment's comfort band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct SuitabilityConfig {
    /// Degrees the forecast may exceed the comfort band on either side
    pub tolerance_c: f64,
}

impl Default for SuitabilityConfig {
    fn default() -> Self {
        Self { tolerance_c: 3.0 }
    }
}

/// Thresholds above which a wear counts double.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct HeatRule {
    pub max_temp_c: f64,
    pub humidity_pct: f64,
}

impl Default for HeatRule {
    fn default() -> Self {
        Self {
            max_temp_c: 26.0,
            humidity_pct: 70.0,
        }
    }
}

/// Master configuration struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct WardrobeConfig {
    pub suitability: SuitabilityConfig,
    pub score_ranges: ScoreRanges,
    /// Upper bound on returned suggestions
    pub max_suggestions: usize,
    pub heat_rule: HeatRule,
    /// Submitted feedback older than this is pruned
    pub feedback_retention_days: i64,
    /// Only feed garments that are in the closet to the engine
    pub exclude_unavailable: bool,
}

impl Default for WardrobeConfig {
    fn default() -> Self {
        Self {
            suitability: SuitabilityConfig::default(),
            score_ranges: ScoreRanges::default(),
            max_suggestions: 20,
            heat_rule: HeatRule::default(),
            feedback_retention_days: 30,
            exclude_unavailable: true,
        }
    }
}

impl WardrobeConfig {
    /// Parse a (possibly partial) TOML document and validate the result.
    pub fn from_toml_str(raw: &str) -> WardrobeResult<Self> {
        let config: WardrobeConfig = toml::from_str(raw).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// Validates:
    /// - every score range has `min <= max`
    /// - `max_suggestions > 0`
    /// - tolerance is finite and not negative
    /// - heat rule humidity lies in [0, 100]
    /// - retention is not negative
    pub fn validate(&self) -> WardrobeResult<()> {
        for (field, range) in [
            ("score_ranges.casual", self.score_ranges.casual),
            ("score_ranges.office", self.score_ranges.office),
            ("score_ranges.fallback", self.score_ranges.fallback),
        ] {
            if range.min > range.max {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: format!("{}..={}", range.min, range.max),
                    reason: "min must not exceed max".to_string(),
                }
                .into());
            }
        }

        if self.max_suggestions == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_suggestions".to_string(),
                value: "0".to_string(),
                reason: "at least one suggestion must be allowed".to_string(),
            }
            .into());
        }

        let tolerance = self.suitability.tolerance_c;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "suitability.tolerance_c".to_string(),
                value: tolerance.to_string(),
                reason: "tolerance must be a non-negative number".to_string(),
            }
            .into());
        }

        let humidity = self.heat_rule.humidity_pct;
        if !(0.0..=100.0).contains(&humidity) {
            return Err(ConfigError::InvalidValue {
                field: "heat_rule.humidity_pct".to_string(),
                value: humidity.to_string(),
                reason: "humidity is a percentage".to_string(),
            }
            .into());
        }

        if self.feedback_retention_days < 0 {
            return Err(ConfigError::InvalidValue {
                field: "feedback_retention_days".to_string(),
                value: self.feedback_retention_days.to_string(),
                reason: "retention must not be negative".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
