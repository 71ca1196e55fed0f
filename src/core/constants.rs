//! Physical constants and framing parameters

/// Speed of sound in dry air at 0 °C (m/s)
pub const SOUND_SPEED_BASE_MS: f64 = 331.5;

/// Sound speed gain per degree Celsius (m/s per °C)
pub const SOUND_SPEED_TEMP_COEFF: f64 = 0.6;

/// Temperature at which the linear sound-speed model reaches zero (°C).
/// Inputs at or below this are physically meaningless and rejected.
pub const MIN_SOUND_SPEED_TEMPERATURE_C: f64 = -552.5;

/// Meters per degree of latitude (spherical approximation)
pub const METERS_PER_DEGREE_LAT: f64 = 111_000.0;

/// Viewport span while picking a point on the map (degrees per axis)
pub const PICKER_SPAN_DEG: f64 = 0.05;

/// Narrowed span when centering on a chosen search result or fix (degrees)
pub const SEARCH_RESULT_SPAN_DEG: f64 = 0.01;

/// Margin factor keeping both the event and the observer radius in frame
pub const VIEWPORT_MARGIN_FACTOR: f64 = 2.5;

/// Smallest allowed viewport span; keeps a zero distance viewable (degrees)
pub const MIN_VIEWPORT_SPAN_DEG: f64 = 0.005;

/// Coarse location accuracy requested from the platform (meters).
/// Favors speed and battery over precision.
pub const COARSE_ACCURACY_M: f64 = 100.0;
