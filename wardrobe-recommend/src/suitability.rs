//! Weather suitability

use crate::comfort::garment_comfort_range;
use wardrobe_core::{Garment, SuitabilityConfig, TemperatureRange};

/// Whether a comfort band tolerates the forecast.
///
/// Suitable iff the forecast low is no more than `tolerance_c` below the
/// band and the forecast high no more than `tolerance_c` above it.
pub fn is_suitable(comfort: TemperatureRange, forecast: TemperatureRange, tolerance_c: f64) -> bool {
    forecast.min_c >= comfort.min_c - tolerance_c && forecast.max_c <= comfort.max_c + tolerance_c
}

/// [`is_suitable`] applied to a garment's effective comfort band.
pub fn garment_suits(garment: &Garment, forecast: TemperatureRange, config: &SuitabilityConfig) -> bool {
    is_suitable(garment_comfort_range(garment), forecast, config.tolerance_c)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 3.0;

    #[test]
    fn test_forecast_inside_band() {
        let band = TemperatureRange::new(12.0, 28.0);
        assert!(is_suitable(band, TemperatureRange::new(15.0, 25.0), TOLERANCE));
    }

    #[test]
    fn test_tolerance_edges_are_inclusive() {
        let band = TemperatureRange::new(12.0, 28.0);
        assert!(is_suitable(band, TemperatureRange::new(9.0, 31.0), TOLERANCE));
        assert!(!is_suitable(band, TemperatureRange::new(8.9, 25.0), TOLERANCE));
        assert!(!is_suitable(band, TemperatureRange::new(15.0, 31.1), TOLERANCE));
    }

    #[test]
    fn test_hot_day_rules_out_thick_band() {
        let band = TemperatureRange::new(5.0, 20.0);
        assert!(!is_suitable(band, TemperatureRange::new(22.0, 30.0), TOLERANCE));
    }
}
