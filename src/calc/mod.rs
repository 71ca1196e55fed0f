//! Pure computational kernels: flash-to-bang distance and viewport sizing

pub mod distance;
pub mod viewport;

pub use distance::{compute_distance, compute_distance_with, sound_speed_ms, CalcError};
pub use viewport::{
    fixed_viewport, result_viewport, search_result_viewport, selection_viewport, span_for_distance,
};
