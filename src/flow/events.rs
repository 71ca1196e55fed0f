//! Flow event publication
//!
//! Consumers (the presentation layer) subscribe to state-changed events
//! and re-render deterministically; the flow never reaches into rendering
//! internals.

use crate::core::{Coordinate, MapViewport};
use crate::flow::selection::FlowState;
use crate::location::PermissionState;

/// Events published on every externally visible change
#[derive(Debug, Clone, PartialEq)]
pub enum FlowEvent {
    /// Workflow state transition
    StateChanged { from: FlowState, to: FlowState },
    /// The framed map region changed
    ViewportChanged(MapViewport),
    /// A launch coordinate was committed
    CoordinateSelected(Coordinate),
    /// A distance was computed
    DistanceCalculated { distance_m: f64 },
    /// The visible search result list was replaced
    ResultsUpdated { count: usize },
    /// The location permission state changed
    PermissionStateChanged(PermissionState),
    /// A location error is pending acknowledgment
    ErrorReported { message: String },
}

/// Callback function type for flow events
pub type FlowCallback = Box<dyn Fn(&FlowEvent)>;

/// Callback registration handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackHandle(u32);

impl CallbackHandle {
    pub(crate) fn new(id: u32) -> Self {
        CallbackHandle(id)
    }

    pub fn id(&self) -> u32 {
        self.0
    }
}
