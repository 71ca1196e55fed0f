//! Core data types and physical constants

pub mod constants;
pub mod types;

pub use constants::*;
pub use types::{Coordinate, LocationFix, MapViewport, SearchResult};
