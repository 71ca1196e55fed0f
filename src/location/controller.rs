//! Location permission and fix lifecycle controller

use crate::core::{LocationFix, COARSE_ACCURACY_M};
use crate::location::error::LocationError;
use crate::location::provider::{AuthorizationStatus, GeolocationProvider, LocationEvent};

/// Controller-side permission state. Exactly one is current at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    NotDetermined,
    Requesting,
    Authorized,
    Denied,
}

/// State machine wrapping the device location subsystem.
///
/// Owns the only mutable shared data in the core: the permission state,
/// the single cached fix (last-write-wins, no history), and the retained
/// latest error. All mutation happens through `process` and the explicit
/// lifecycle calls below, on the single owning context.
pub struct LocationController {
    provider: Box<dyn GeolocationProvider>,
    state: PermissionState,
    cached_fix: Option<LocationFix>,
    error: Option<LocationError>,
    accuracy_hint_m: f64,
    updates_active: bool,
}

impl LocationController {
    pub fn new(provider: Box<dyn GeolocationProvider>) -> Self {
        Self::with_accuracy_hint(provider, COARSE_ACCURACY_M)
    }

    pub fn with_accuracy_hint(provider: Box<dyn GeolocationProvider>, accuracy_hint_m: f64) -> Self {
        Self {
            provider,
            state: PermissionState::NotDetermined,
            cached_fix: None,
            error: None,
            accuracy_hint_m,
            updates_active: false,
        }
    }

    /// Trigger the system permission prompt.
    /// Only meaningful from `NotDetermined`; a no-op otherwise.
    pub fn request_authorization(&mut self) {
        if self.state != PermissionState::NotDetermined {
            return;
        }
        self.state = PermissionState::Requesting;
        self.provider.request_permission();
    }

    /// Begin continuous fix delivery, unless a fix is already cached.
    ///
    /// The cached-fix guard is a latency/battery optimization: repeated
    /// calls are safe and never force a fresh fix once one exists.
    pub fn start_continuous_updates(&mut self) {
        if self.cached_fix.is_some() || self.updates_active {
            return;
        }
        self.updates_active = true;
        self.provider.start_updates(self.accuracy_hint_m);
    }

    /// Halt continuous delivery. Idempotent; keeps the cached fix.
    pub fn stop_continuous_updates(&mut self) {
        if !self.updates_active {
            return;
        }
        self.updates_active = false;
        self.provider.stop_updates();
    }

    /// Request exactly one fix on the independent one-shot channel.
    /// The provider stops itself after delivering.
    pub fn request_single_fix(&mut self) {
        self.provider.request_one_shot_fix();
    }

    /// Drain queued provider events, applying them in delivery order.
    /// Returns the number of events applied.
    pub fn process(&mut self) -> u32 {
        let mut applied = 0;
        while let Some(event) = self.provider.poll_event() {
            self.apply_event(event);
            applied += 1;
        }
        applied
    }

    fn apply_event(&mut self, event: LocationEvent) {
        match event {
            LocationEvent::AuthorizationChanged(status) => match status {
                AuthorizationStatus::NotDetermined => {
                    self.state = PermissionState::NotDetermined;
                    self.request_authorization();
                }
                AuthorizationStatus::Authorized => {
                    self.state = PermissionState::Authorized;
                    self.start_continuous_updates();
                }
                AuthorizationStatus::Denied | AuthorizationStatus::Restricted => {
                    self.state = PermissionState::Denied;
                    self.error = Some(LocationError::PermissionDenied { status });
                }
            },
            LocationEvent::FixDelivered(fix) => {
                // Last fix wins; no queuing, no history
                self.cached_fix = Some(fix);
            }
            LocationEvent::FixFailed { message } => {
                self.error = Some(LocationError::FixFailed { message });
            }
        }
    }

    pub fn state(&self) -> PermissionState {
        self.state
    }

    /// The single retained fix, if one has been delivered
    pub fn cached_fix(&self) -> Option<LocationFix> {
        self.cached_fix
    }

    /// Latest retained error; never cleared automatically
    pub fn error(&self) -> Option<&LocationError> {
        self.error.as_ref()
    }

    /// Human-readable text of the retained error, for presentation
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }

    /// Explicit acknowledgment from the consumer clears the error
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn updates_active(&self) -> bool {
        self.updates_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Coordinate;
    use crate::location::mock::MockGeolocationProvider;

    fn fix(lat: f64, lon: f64) -> LocationFix {
        LocationFix {
            coordinate: Coordinate { lat, lon },
            accuracy_m: COARSE_ACCURACY_M,
            timestamp_ms: 0,
        }
    }

    fn controller_with_mock() -> (LocationController, std::rc::Rc<std::cell::RefCell<MockGeolocationProvider>>) {
        let mock = MockGeolocationProvider::shared();
        let controller = LocationController::new(Box::new(mock.clone()));
        (controller, mock.inner())
    }

    #[test]
    fn test_request_authorization_only_from_not_determined() {
        let (mut controller, mock) = controller_with_mock();

        controller.request_authorization();
        assert_eq!(controller.state(), PermissionState::Requesting);
        assert_eq!(mock.borrow().request_permission_calls(), 1);

        // Repeated calls are no-ops outside NotDetermined
        controller.request_authorization();
        assert_eq!(mock.borrow().request_permission_calls(), 1);
    }

    #[test]
    fn test_authorized_transition_starts_updates_exactly_once() {
        let (mut controller, mock) = controller_with_mock();

        mock.borrow_mut()
            .push_authorization(AuthorizationStatus::Authorized);
        mock.borrow_mut()
            .push_authorization(AuthorizationStatus::Authorized);
        controller.process();

        assert_eq!(controller.state(), PermissionState::Authorized);
        // Second identical transition is idempotently ignored
        assert_eq!(mock.borrow().start_updates_calls(), 1);
    }

    #[test]
    fn test_no_restart_once_fix_is_cached() {
        let (mut controller, mock) = controller_with_mock();

        mock.borrow_mut().push_fix(fix(35.0, 139.0));
        controller.process();

        controller.start_continuous_updates();
        assert_eq!(mock.borrow().start_updates_calls(), 0);
    }

    #[test]
    fn test_last_fix_wins() {
        let (mut controller, mock) = controller_with_mock();

        mock.borrow_mut().push_fix(fix(35.0, 139.0));
        mock.borrow_mut().push_fix(fix(36.0, 140.0));
        controller.process();

        let cached = controller.cached_fix().unwrap();
        assert_eq!(cached.coordinate, Coordinate { lat: 36.0, lon: 140.0 });
    }

    #[test]
    fn test_denied_populates_retained_error() {
        let (mut controller, mock) = controller_with_mock();

        mock.borrow_mut()
            .push_authorization(AuthorizationStatus::Denied);
        controller.process();

        assert_eq!(controller.state(), PermissionState::Denied);
        assert!(matches!(
            controller.error(),
            Some(LocationError::PermissionDenied { .. })
        ));

        // Retained until explicitly cleared
        controller.process();
        assert!(controller.error().is_some());
        controller.clear_error();
        assert!(controller.error().is_none());
    }

    #[test]
    fn test_fix_failure_sets_error_but_keeps_fix() {
        let (mut controller, mock) = controller_with_mock();

        mock.borrow_mut().push_fix(fix(35.0, 139.0));
        mock.borrow_mut().push_failure("signal lost");
        controller.process();

        assert!(controller.cached_fix().is_some());
        assert!(matches!(
            controller.error(),
            Some(LocationError::FixFailed { .. })
        ));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let (mut controller, mock) = controller_with_mock();

        controller.start_continuous_updates();
        controller.stop_continuous_updates();
        controller.stop_continuous_updates();

        assert_eq!(mock.borrow().stop_updates_calls(), 1);
        assert!(!controller.updates_active());
    }

    #[test]
    fn test_platform_not_determined_reprompts() {
        let (mut controller, mock) = controller_with_mock();

        mock.borrow_mut()
            .push_authorization(AuthorizationStatus::NotDetermined);
        controller.process();

        assert_eq!(controller.state(), PermissionState::Requesting);
        assert_eq!(mock.borrow().request_permission_calls(), 1);
    }

    #[test]
    fn test_single_fix_uses_one_shot_channel() {
        let (mut controller, mock) = controller_with_mock();

        controller.request_single_fix();
        assert_eq!(mock.borrow().one_shot_calls(), 1);
        assert_eq!(mock.borrow().start_updates_calls(), 0);
    }
}
