//! Weather snapshot consumed by suggestion and wear application

use crate::{TemperatureRange, Timestamp};
use serde::{Deserialize, Serialize};

/// Today's forecast as reported by the weather source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct WeatherSnapshot {
    pub min_temp_c: f64,
    pub max_temp_c: f64,
    pub humidity_pct: f64,
    pub observed_at: Timestamp,
}

impl WeatherSnapshot {
    pub fn new(min_temp_c: f64, max_temp_c: f64, humidity_pct: f64, observed_at: Timestamp) -> Self {
        Self {
            min_temp_c,
            max_temp_c,
            humidity_pct,
            observed_at,
        }
    }

    /// The day's temperature span, as fed to suitability checks.
    pub fn forecast(&self) -> TemperatureRange {
        TemperatureRange::new(self.min_temp_c, self.max_temp_c)
    }
}
