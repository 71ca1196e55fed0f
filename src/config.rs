//! Ranging configuration
//!
//! All tunable parameters of the core in one serde struct, with JSON
//! file round-trip and validation at construction time.

use crate::core::{
    Coordinate, COARSE_ACCURACY_M, METERS_PER_DEGREE_LAT, MIN_VIEWPORT_SPAN_DEG, PICKER_SPAN_DEG,
    SEARCH_RESULT_SPAN_DEG, SOUND_SPEED_BASE_MS, SOUND_SPEED_TEMP_COEFF, VIEWPORT_MARGIN_FACTOR,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Core configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangingConfig {
    /// Speed of sound at 0 °C (m/s)
    pub sound_speed_base_ms: f64,
    /// Sound speed gain per degree Celsius (m/s per °C)
    pub sound_speed_temp_coeff: f64,
    /// Viewport span while picking a point (degrees per axis)
    pub picker_span_deg: f64,
    /// Narrowed span when centering on a chosen result (degrees)
    pub search_result_span_deg: f64,
    /// Margin factor applied to the distance-derived span
    pub viewport_margin_factor: f64,
    /// Smallest allowed viewport span (degrees)
    pub min_viewport_span_deg: f64,
    /// Meters per degree of latitude
    pub meters_per_degree_lat: f64,
    /// Accuracy tolerance requested from the location subsystem (meters)
    pub coarse_accuracy_m: f64,
    /// Map center before any coordinate is chosen
    pub default_center: Coordinate,
}

impl Default for RangingConfig {
    fn default() -> Self {
        Self {
            sound_speed_base_ms: SOUND_SPEED_BASE_MS,
            sound_speed_temp_coeff: SOUND_SPEED_TEMP_COEFF,
            picker_span_deg: PICKER_SPAN_DEG,
            search_result_span_deg: SEARCH_RESULT_SPAN_DEG,
            viewport_margin_factor: VIEWPORT_MARGIN_FACTOR,
            min_viewport_span_deg: MIN_VIEWPORT_SPAN_DEG,
            meters_per_degree_lat: METERS_PER_DEGREE_LAT,
            coarse_accuracy_m: COARSE_ACCURACY_M,
            default_center: Coordinate { lat: 0.0, lon: 0.0 },
        }
    }
}

/// Configuration validation and I/O errors
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Invalid parameter value
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },
    /// Configuration file I/O error
    IoError { message: String },
    /// JSON serialization/deserialization error
    SerializationError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidParameter {
                parameter,
                value,
                reason,
            } => write!(f, "Invalid {} = {}: {}", parameter, value, reason),
            ConfigError::IoError { message } => write!(f, "Config file I/O error: {}", message),
            ConfigError::SerializationError { message } => {
                write!(f, "Config serialization error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl RangingConfig {
    /// Validate parameter ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("sound_speed_base_ms", self.sound_speed_base_ms),
            ("picker_span_deg", self.picker_span_deg),
            ("search_result_span_deg", self.search_result_span_deg),
            ("viewport_margin_factor", self.viewport_margin_factor),
            ("min_viewport_span_deg", self.min_viewport_span_deg),
            ("meters_per_degree_lat", self.meters_per_degree_lat),
            ("coarse_accuracy_m", self.coarse_accuracy_m),
        ];
        for (parameter, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidParameter {
                    parameter: parameter.to_string(),
                    value: value.to_string(),
                    reason: "must be a positive finite number".to_string(),
                });
            }
        }

        if !self.sound_speed_temp_coeff.is_finite() {
            return Err(ConfigError::InvalidParameter {
                parameter: "sound_speed_temp_coeff".to_string(),
                value: self.sound_speed_temp_coeff.to_string(),
                reason: "must be finite".to_string(),
            });
        }

        if !self.default_center.is_valid() {
            return Err(ConfigError::InvalidParameter {
                parameter: "default_center".to_string(),
                value: format!("({}, {})", self.default_center.lat, self.default_center.lon),
                reason: "latitude/longitude out of range".to_string(),
            });
        }

        Ok(())
    }

    /// Load and validate configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            message: e.to_string(),
        })?;
        let config: Self =
            serde_json::from_str(&contents).map_err(|e| ConfigError::SerializationError {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializationError {
                message: e.to_string(),
            })?;
        fs::write(path, contents).map_err(|e| ConfigError::IoError {
            message: e.to_string(),
        })
    }
}
