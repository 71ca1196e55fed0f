//! Presentation-side distance formatting
//!
//! The kernels never round; display rounding and unit selection happen
//! here, at the edge.

use serde::{Deserialize, Serialize};

/// Display unit for a formatted distance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DistanceUnit {
    Meters,
    Kilometers,
}

/// A distance prepared for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedDistance {
    /// Rounded value in the chosen unit
    pub value: f64,
    pub unit: DistanceUnit,
    /// Ready-to-display text, e.g. "1021.5 m" or "1.02 km"
    pub text: String,
}

/// Format a raw distance for display. Meters below 1 km (one decimal),
/// kilometers above (two decimals).
pub fn format_distance(distance_m: f64) -> FormattedDistance {
    if distance_m < 1000.0 {
        let value = (distance_m * 10.0).round() / 10.0;
        FormattedDistance {
            value,
            unit: DistanceUnit::Meters,
            text: format!("{:.1} m", value),
        }
    } else {
        let value = (distance_m / 1000.0 * 100.0).round() / 100.0;
        FormattedDistance {
            value,
            unit: DistanceUnit::Kilometers,
            text: format!("{:.2} km", value),
        }
    }
}

impl FormattedDistance {
    /// JSON rendering for consumers that want structure over text
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meters_below_one_kilometer() {
        let formatted = format_distance(340.54);
        assert_eq!(formatted.unit, DistanceUnit::Meters);
        assert_eq!(formatted.value, 340.5);
        assert_eq!(formatted.text, "340.5 m");
    }

    #[test]
    fn test_kilometers_from_one_kilometer() {
        let formatted = format_distance(1021.5);
        assert_eq!(formatted.unit, DistanceUnit::Kilometers);
        assert_eq!(formatted.value, 1.02);
        assert_eq!(formatted.text, "1.02 km");
    }

    #[test]
    fn test_json_rendering() {
        let json = format_distance(500.0).to_json().unwrap();
        assert!(json.contains("\"unit\""));
        assert!(json.contains("500"));
    }
}
