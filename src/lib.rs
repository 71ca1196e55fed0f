//! Flash-to-bang ranging core
//!
//! Estimates the straight-line distance to a visible event (a fireworks
//! launch) from the delay between seeing the flash and hearing the bang,
//! and derives the map framing needed to present the result.

pub mod calc;
pub mod config;
pub mod core;
pub mod flow;
pub mod format;
pub mod location;
pub mod search;

// Re-export commonly used types
pub use crate::core::{Coordinate, LocationFix, MapViewport, SearchResult};
pub use calc::{compute_distance, sound_speed_ms, CalcError};
pub use calc::{result_viewport, search_result_viewport, selection_viewport};
pub use config::{ConfigError, RangingConfig};
pub use flow::{CallbackHandle, FlowCallback, FlowEvent, FlowState, SelectionFlow};
pub use format::{format_distance, DistanceUnit, FormattedDistance};
pub use location::{
    AuthorizationStatus, GeolocationProvider, LocationController, LocationError, LocationEvent,
    MockGeolocationProvider, PermissionState,
};
pub use search::{
    MockPlaceSearchProvider, PlaceSearchProvider, SearchError, SearchResponse, SearchService,
};
