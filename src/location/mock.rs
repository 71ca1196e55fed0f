//! Mock geolocation provider for testing and development

use crate::core::LocationFix;
use crate::location::provider::{AuthorizationStatus, GeolocationProvider, LocationEvent};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Mock geolocation provider with a scripted event queue and recorded
/// lifecycle calls.
pub struct MockGeolocationProvider {
    event_queue: VecDeque<LocationEvent>,
    request_permission_calls: u32,
    start_updates_calls: u32,
    stop_updates_calls: u32,
    one_shot_calls: u32,
    last_accuracy_hint_m: Option<f64>,
    simulate_errors: bool,
    error_probability: f32,
}

impl MockGeolocationProvider {
    pub fn new() -> Self {
        Self {
            event_queue: VecDeque::new(),
            request_permission_calls: 0,
            start_updates_calls: 0,
            stop_updates_calls: 0,
            one_shot_calls: 0,
            last_accuracy_hint_m: None,
            simulate_errors: false,
            error_probability: 0.0,
        }
    }

    /// Create a shared handle so tests can keep inspecting the mock after
    /// handing it to a controller.
    pub fn shared() -> SharedMockGeolocationProvider {
        SharedMockGeolocationProvider {
            inner: Rc::new(RefCell::new(Self::new())),
        }
    }

    /// Queue an authorization transition
    pub fn push_authorization(&mut self, status: AuthorizationStatus) {
        self.event_queue
            .push_back(LocationEvent::AuthorizationChanged(status));
    }

    /// Queue a fix delivery; may degrade to a failure when error
    /// simulation is enabled.
    pub fn push_fix(&mut self, fix: LocationFix) {
        if self.should_simulate_error() {
            self.push_failure("simulated fix failure");
            return;
        }
        self.event_queue.push_back(LocationEvent::FixDelivered(fix));
    }

    /// Queue a delivery failure
    pub fn push_failure(&mut self, message: &str) {
        self.event_queue.push_back(LocationEvent::FixFailed {
            message: message.to_string(),
        });
    }

    /// Enable error simulation with given probability (0.0 to 1.0)
    pub fn simulate_errors(&mut self, enable: bool, probability: f32) {
        self.simulate_errors = enable;
        self.error_probability = probability.clamp(0.0, 1.0);
    }

    pub fn request_permission_calls(&self) -> u32 {
        self.request_permission_calls
    }

    pub fn start_updates_calls(&self) -> u32 {
        self.start_updates_calls
    }

    pub fn stop_updates_calls(&self) -> u32 {
        self.stop_updates_calls
    }

    pub fn one_shot_calls(&self) -> u32 {
        self.one_shot_calls
    }

    pub fn last_accuracy_hint_m(&self) -> Option<f64> {
        self.last_accuracy_hint_m
    }

    pub fn queued_event_count(&self) -> usize {
        self.event_queue.len()
    }

    fn should_simulate_error(&self) -> bool {
        if !self.simulate_errors {
            return false;
        }

        use rand::Rng;
        let mut rng = rand::thread_rng();
        rng.gen::<f32>() < self.error_probability
    }
}

impl Default for MockGeolocationProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl GeolocationProvider for MockGeolocationProvider {
    fn request_permission(&mut self) {
        self.request_permission_calls += 1;
    }

    fn start_updates(&mut self, accuracy_hint_m: f64) {
        self.start_updates_calls += 1;
        self.last_accuracy_hint_m = Some(accuracy_hint_m);
    }

    fn stop_updates(&mut self) {
        self.stop_updates_calls += 1;
    }

    fn request_one_shot_fix(&mut self) {
        self.one_shot_calls += 1;
    }

    fn poll_event(&mut self) -> Option<LocationEvent> {
        self.event_queue.pop_front()
    }
}

/// Cloneable handle over a [`MockGeolocationProvider`], usable both as the
/// boxed provider and as an inspection window from tests.
#[derive(Clone)]
pub struct SharedMockGeolocationProvider {
    inner: Rc<RefCell<MockGeolocationProvider>>,
}

impl SharedMockGeolocationProvider {
    pub fn inner(&self) -> Rc<RefCell<MockGeolocationProvider>> {
        self.inner.clone()
    }
}

impl GeolocationProvider for SharedMockGeolocationProvider {
    fn request_permission(&mut self) {
        self.inner.borrow_mut().request_permission();
    }

    fn start_updates(&mut self, accuracy_hint_m: f64) {
        self.inner.borrow_mut().start_updates(accuracy_hint_m);
    }

    fn stop_updates(&mut self) {
        self.inner.borrow_mut().stop_updates();
    }

    fn request_one_shot_fix(&mut self) {
        self.inner.borrow_mut().request_one_shot_fix();
    }

    fn poll_event(&mut self) -> Option<LocationEvent> {
        self.inner.borrow_mut().poll_event()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Coordinate;

    #[test]
    fn test_event_queue_order() {
        let mut mock = MockGeolocationProvider::new();
        mock.push_authorization(AuthorizationStatus::Authorized);
        mock.push_failure("no signal");
        assert_eq!(mock.queued_event_count(), 2);

        assert!(matches!(
            mock.poll_event(),
            Some(LocationEvent::AuthorizationChanged(
                AuthorizationStatus::Authorized
            ))
        ));
        assert!(matches!(
            mock.poll_event(),
            Some(LocationEvent::FixFailed { .. })
        ));
        assert!(mock.poll_event().is_none());
    }

    #[test]
    fn test_call_recording() {
        let mut mock = MockGeolocationProvider::new();
        mock.start_updates(100.0);
        mock.stop_updates();
        mock.request_one_shot_fix();

        assert_eq!(mock.start_updates_calls(), 1);
        assert_eq!(mock.stop_updates_calls(), 1);
        assert_eq!(mock.one_shot_calls(), 1);
        assert_eq!(mock.last_accuracy_hint_m(), Some(100.0));
    }

    #[test]
    fn test_error_simulation_degrades_fix_delivery() {
        let mut mock = MockGeolocationProvider::new();
        mock.simulate_errors(true, 1.0); // 100% error rate
        mock.push_fix(LocationFix {
            coordinate: Coordinate { lat: 0.0, lon: 0.0 },
            accuracy_m: 100.0,
            timestamp_ms: 0,
        });

        assert!(matches!(
            mock.poll_event(),
            Some(LocationEvent::FixFailed { .. })
        ));
    }
}
