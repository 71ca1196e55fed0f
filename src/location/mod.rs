//! Device location subsystem
//!
//! A narrow abstraction over the platform geolocation service plus the
//! permission/lifecycle state machine that owns the cached fix. Provider
//! callbacks never touch shared state directly; they are queued and
//! drained from the single owning context via `poll_event`.

pub mod controller;
pub mod error;
pub mod mock;
pub mod provider;

pub use controller::{LocationController, PermissionState};
pub use error::LocationError;
pub use mock::{MockGeolocationProvider, SharedMockGeolocationProvider};
pub use provider::{AuthorizationStatus, GeolocationProvider, LocationEvent};
