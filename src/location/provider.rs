//! Geolocation provider interface

use crate::core::LocationFix;
use serde::{Deserialize, Serialize};

/// Platform-side authorization status as reported by the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthorizationStatus {
    NotDetermined,
    Authorized,
    Denied,
    Restricted,
}

/// Events delivered by the geolocation subsystem.
///
/// The platform raises these on its own threads; implementations queue
/// them and hand them over through `poll_event` so only one context ever
/// mutates controller state.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationEvent {
    /// Authorization status changed (prompt answered, settings toggled)
    AuthorizationChanged(AuthorizationStatus),
    /// A location fix was delivered
    FixDelivered(LocationFix),
    /// Fix delivery failed (hardware or signal problem)
    FixFailed { message: String },
}

/// Abstraction over the platform geolocation service
pub trait GeolocationProvider {
    /// Trigger the system permission prompt
    fn request_permission(&mut self);

    /// Begin continuous fix delivery at the given accuracy tolerance
    fn start_updates(&mut self, accuracy_hint_m: f64);

    /// Halt continuous fix delivery
    fn stop_updates(&mut self);

    /// Request exactly one fix; the provider stops itself after delivery.
    /// Independent channel from continuous updates.
    fn request_one_shot_fix(&mut self);

    /// Take the next queued event, if any (non-blocking)
    fn poll_event(&mut self) -> Option<LocationEvent>;
}
