//! Map viewport sizing
//!
//! Two framing policies: a fixed span while the user is picking a point,
//! and a distance-proportional span once a result exists. Pure functions,
//! kept free of rendering concerns so they are trivially testable.

use crate::core::{
    Coordinate, MapViewport, METERS_PER_DEGREE_LAT, MIN_VIEWPORT_SPAN_DEG, PICKER_SPAN_DEG,
    SEARCH_RESULT_SPAN_DEG, VIEWPORT_MARGIN_FACTOR,
};

/// Viewport with a fixed span on both axes
pub fn fixed_viewport(center: Coordinate, span_deg: f64) -> MapViewport {
    MapViewport::new(center, span_deg, span_deg)
}

/// Framing used while the user is picking a point on the map
pub fn selection_viewport(center: Coordinate) -> MapViewport {
    fixed_viewport(center, PICKER_SPAN_DEG)
}

/// Narrowed framing when centering on a freshly chosen search result
pub fn search_result_viewport(center: Coordinate) -> MapViewport {
    fixed_viewport(center, SEARCH_RESULT_SPAN_DEG)
}

/// Angular span for a known distance, clamped to the minimum floor so a
/// zero distance never produces a degenerate viewport.
pub fn span_for_distance(
    distance_m: f64,
    meters_per_degree: f64,
    margin_factor: f64,
    min_span_deg: f64,
) -> f64 {
    let span = (distance_m / meters_per_degree) * margin_factor;
    span.max(min_span_deg)
}

/// Framing used once a distance is known: both the event and the
/// observer's inferred radius sit comfortably inside the frame.
pub fn result_viewport(center: Coordinate, distance_m: f64) -> MapViewport {
    let span = span_for_distance(
        distance_m,
        METERS_PER_DEGREE_LAT,
        VIEWPORT_MARGIN_FACTOR,
        MIN_VIEWPORT_SPAN_DEG,
    );
    MapViewport::new(center, span, span)
}
