//! Core data types for the ranging system

use serde::{Deserialize, Serialize};

/// Geodetic coordinate in signed decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting values outside the geodetic range.
    /// Latitude must be in [-90, 90] and longitude in [-180, 180].
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        let coordinate = Self { lat, lon };
        if coordinate.is_valid() {
            Some(coordinate)
        } else {
            None
        }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Visible map region: center plus angular spans, both spans positive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapViewport {
    pub center: Coordinate,
    pub lat_span_deg: f64,
    pub lon_span_deg: f64,
}

impl MapViewport {
    pub fn new(center: Coordinate, lat_span_deg: f64, lon_span_deg: f64) -> Self {
        Self {
            center,
            lat_span_deg,
            lon_span_deg,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.lat_span_deg > 0.0 && self.lon_span_deg > 0.0)
    }
}

/// A single reported device location with its accuracy tolerance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationFix {
    pub coordinate: Coordinate,
    /// Accuracy tolerance (meters)
    pub accuracy_m: f64,
    /// Delivery timestamp (milliseconds since epoch)
    pub timestamp_ms: u64,
}

/// A resolved place candidate from free-text search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub name: String,
    pub address: Option<String>,
    pub coordinate: Coordinate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_range_validation() {
        assert!(Coordinate::new(35.0, 139.7).is_some());
        assert!(Coordinate::new(-90.0, 180.0).is_some());
        assert!(Coordinate::new(90.1, 0.0).is_none());
        assert!(Coordinate::new(-90.1, 0.0).is_none());
        assert!(Coordinate::new(0.0, 180.1).is_none());
        assert!(Coordinate::new(0.0, -180.1).is_none());
        assert!(Coordinate::new(f64::NAN, 0.0).is_none());
    }

    #[test]
    fn test_viewport_degeneracy() {
        let center = Coordinate { lat: 0.0, lon: 0.0 };
        assert!(!MapViewport::new(center, 0.05, 0.05).is_degenerate());
        assert!(MapViewport::new(center, 0.0, 0.05).is_degenerate());
        assert!(MapViewport::new(center, 0.05, 0.0).is_degenerate());
    }
}
