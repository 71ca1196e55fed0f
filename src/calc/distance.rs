//! Flash-to-bang distance calculation
//!
//! The observer sees the flash effectively instantly and hears the bang
//! after the acoustic delay; distance is the temperature-adjusted sound
//! speed times that delay.

use crate::core::{SOUND_SPEED_BASE_MS, SOUND_SPEED_TEMP_COEFF};
use std::fmt;

/// Input rejection reasons for the distance calculation
#[derive(Debug, Clone, PartialEq)]
pub enum CalcError {
    /// Time lag must be a finite number strictly greater than zero
    InvalidTimeLag { value: f64 },
    /// Temperature must be a finite number
    InvalidTemperature { value: f64 },
    /// Temperature so low the linear model yields a non-positive speed
    NonPositiveSoundSpeed {
        temperature_c: f64,
        sound_speed_ms: f64,
    },
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcError::InvalidTimeLag { value } => {
                write!(f, "Invalid time lag: {} (must be > 0 seconds)", value)
            }
            CalcError::InvalidTemperature { value } => {
                write!(f, "Invalid temperature: {} (must be finite)", value)
            }
            CalcError::NonPositiveSoundSpeed {
                temperature_c,
                sound_speed_ms,
            } => {
                write!(
                    f,
                    "Temperature {} °C yields non-positive sound speed {} m/s",
                    temperature_c, sound_speed_ms
                )
            }
        }
    }
}

impl std::error::Error for CalcError {}

/// Temperature-adjusted speed of sound in air (m/s)
pub fn sound_speed_ms(temperature_c: f64) -> f64 {
    SOUND_SPEED_BASE_MS + SOUND_SPEED_TEMP_COEFF * temperature_c
}

/// Compute the flash-to-bang distance in meters.
///
/// No rounding is applied; display rounding belongs to the presentation
/// layer. Pure and deterministic.
pub fn compute_distance(time_lag_s: f64, temperature_c: f64) -> Result<f64, CalcError> {
    compute_distance_with(
        time_lag_s,
        temperature_c,
        SOUND_SPEED_BASE_MS,
        SOUND_SPEED_TEMP_COEFF,
    )
}

/// Distance computation with explicit sound-speed model parameters.
/// Used when the coefficients come from configuration.
pub fn compute_distance_with(
    time_lag_s: f64,
    temperature_c: f64,
    base_speed_ms: f64,
    temp_coeff: f64,
) -> Result<f64, CalcError> {
    if !time_lag_s.is_finite() || time_lag_s <= 0.0 {
        return Err(CalcError::InvalidTimeLag { value: time_lag_s });
    }
    if !temperature_c.is_finite() {
        return Err(CalcError::InvalidTemperature {
            value: temperature_c,
        });
    }

    let sound_speed = base_speed_ms + temp_coeff * temperature_c;
    if sound_speed <= 0.0 {
        return Err(CalcError::NonPositiveSoundSpeed {
            temperature_c,
            sound_speed_ms: sound_speed,
        });
    }

    Ok(sound_speed * time_lag_s)
}
