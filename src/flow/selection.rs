//! Selection workflow state machine
//!
//! Orchestrates coordinate selection (map pick, search result, current
//! location), input entry, calculation, and result framing. All state
//! lives on the single owning context; the asynchronous collaborators
//! deliver their results through `process`.

use crate::calc::{compute_distance_with, fixed_viewport, span_for_distance};
use crate::config::RangingConfig;
use crate::core::{Coordinate, MapViewport};
use crate::flow::events::{CallbackHandle, FlowCallback, FlowEvent};
use crate::location::{GeolocationProvider, LocationController, PermissionState};
use crate::search::{PlaceSearchProvider, SearchService};
use std::collections::HashMap;

/// User-visible workflow states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    PickingOnMap,
    CoordinateSelected,
    InputsPending,
    ResultShown,
    CircleShown,
}

/// Orchestration of the flash-to-bang workflow
pub struct SelectionFlow {
    config: RangingConfig,
    location: LocationController,
    search: SearchService,
    state: FlowState,
    /// State to return to when map picking is cancelled
    picker_return_state: FlowState,
    coordinate: Option<Coordinate>,
    distance_m: Option<f64>,
    time_lag_text: String,
    temperature_text: String,
    viewport: MapViewport,
    callbacks: HashMap<CallbackHandle, FlowCallback>,
    callback_counter: u32,
    last_permission_state: PermissionState,
    reported_error: Option<String>,
}

impl SelectionFlow {
    pub fn new(
        location_provider: Box<dyn GeolocationProvider>,
        search_provider: Box<dyn PlaceSearchProvider>,
    ) -> Self {
        Self::with_config(RangingConfig::default(), location_provider, search_provider)
    }

    /// Build the flow from a validated configuration.
    /// Callers validate the config first; see [`RangingConfig::validate`].
    pub fn with_config(
        config: RangingConfig,
        location_provider: Box<dyn GeolocationProvider>,
        search_provider: Box<dyn PlaceSearchProvider>,
    ) -> Self {
        let location =
            LocationController::with_accuracy_hint(location_provider, config.coarse_accuracy_m);
        let viewport = fixed_viewport(config.default_center, config.picker_span_deg);
        Self {
            config,
            location,
            search: SearchService::new(search_provider),
            state: FlowState::Idle,
            picker_return_state: FlowState::Idle,
            coordinate: None,
            distance_m: None,
            time_lag_text: String::new(),
            temperature_text: String::new(),
            viewport,
            callbacks: HashMap::new(),
            callback_counter: 0,
            last_permission_state: PermissionState::NotDetermined,
            reported_error: None,
        }
    }

    // --- event subscription -------------------------------------------------

    /// Register a flow event callback
    pub fn register_callback(&mut self, callback: FlowCallback) -> CallbackHandle {
        self.callback_counter += 1;
        let handle = CallbackHandle::new(self.callback_counter);
        self.callbacks.insert(handle, callback);
        handle
    }

    /// Unregister a previously registered callback
    pub fn unregister_callback(&mut self, handle: CallbackHandle) -> bool {
        self.callbacks.remove(&handle).is_some()
    }

    fn trigger(&self, event: FlowEvent) {
        for callback in self.callbacks.values() {
            callback(&event);
        }
    }

    fn set_state(&mut self, to: FlowState) {
        if to == self.state {
            return;
        }
        let from = self.state;
        self.state = to;
        self.trigger(FlowEvent::StateChanged { from, to });
    }

    fn set_viewport(&mut self, viewport: MapViewport) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.trigger(FlowEvent::ViewportChanged(viewport));
    }

    // --- coordinate selection -----------------------------------------------

    /// Open the map-selection surface, framed on the committed coordinate
    /// or the default center.
    pub fn open_map_picker(&mut self) {
        if self.state == FlowState::PickingOnMap {
            return;
        }
        self.picker_return_state = self.state;
        let center = self.coordinate.unwrap_or(self.config.default_center);
        self.set_viewport(fixed_viewport(center, self.config.picker_span_deg));
        self.set_state(FlowState::PickingOnMap);
    }

    /// Recenter the picker viewport (map drag equivalent)
    pub fn pan_to(&mut self, center: Coordinate) {
        if self.state != FlowState::PickingOnMap || !center.is_valid() {
            return;
        }
        let span = self.viewport.lat_span_deg;
        self.set_viewport(fixed_viewport(center, span));
    }

    /// Commit the current viewport center as the launch coordinate
    pub fn confirm_center(&mut self) {
        if self.state != FlowState::PickingOnMap {
            return;
        }
        let center = self.viewport.center;
        self.commit_coordinate(center, self.config.picker_span_deg);
    }

    /// Leave the picker without mutating any existing coordinate
    pub fn cancel_picking(&mut self) {
        if self.state != FlowState::PickingOnMap {
            return;
        }
        let return_state = self.picker_return_state;
        self.restore_committed_viewport();
        self.set_state(return_state);
    }

    /// Copy the cached location fix as the launch coordinate.
    /// A no-op when no fix is cached: no coordinate is set, no error raised.
    pub fn use_current_location(&mut self) {
        let Some(fix) = self.location.cached_fix() else {
            return;
        };
        // Zoom-in framing, same as a freshly chosen search result
        self.commit_coordinate(fix.coordinate, self.config.search_result_span_deg);
    }

    /// Commit a search result by its index in the visible list
    pub fn select_search_result(&mut self, index: usize) {
        let Some(result) = self.search.results().get(index) else {
            return;
        };
        let coordinate = result.coordinate;
        self.commit_coordinate(coordinate, self.config.search_result_span_deg);
    }

    fn commit_coordinate(&mut self, coordinate: Coordinate, span_deg: f64) {
        self.coordinate = Some(coordinate);
        self.trigger(FlowEvent::CoordinateSelected(coordinate));
        self.set_viewport(fixed_viewport(coordinate, span_deg));
        self.set_state(FlowState::CoordinateSelected);
    }

    fn restore_committed_viewport(&mut self) {
        let viewport = match (self.coordinate, self.distance_m) {
            (Some(center), Some(distance)) => self.result_viewport(center, distance),
            (Some(center), None) => fixed_viewport(center, self.config.picker_span_deg),
            _ => fixed_viewport(self.config.default_center, self.config.picker_span_deg),
        };
        self.set_viewport(viewport);
    }

    fn result_viewport(&self, center: Coordinate, distance_m: f64) -> MapViewport {
        let span = span_for_distance(
            distance_m,
            self.config.meters_per_degree_lat,
            self.config.viewport_margin_factor,
            self.config.min_viewport_span_deg,
        );
        MapViewport::new(center, span, span)
    }

    // --- input entry and calculation ----------------------------------------

    pub fn set_time_lag_text(&mut self, text: &str) {
        self.time_lag_text = text.to_string();
        if self.state == FlowState::CoordinateSelected {
            self.set_state(FlowState::InputsPending);
        }
    }

    pub fn set_temperature_text(&mut self, text: &str) {
        self.temperature_text = text.to_string();
        if self.state == FlowState::CoordinateSelected {
            self.set_state(FlowState::InputsPending);
        }
    }

    fn parsed_time_lag(&self) -> Option<f64> {
        self.time_lag_text.trim().parse::<f64>().ok()
    }

    fn parsed_temperature(&self) -> Option<f64> {
        self.temperature_text.trim().parse::<f64>().ok()
    }

    /// Combined gating predicate for the Calculate action. Input problems
    /// only ever disable the action; no error object crosses into the
    /// presentation layer.
    pub fn can_calculate(&self) -> bool {
        let Some(time_lag) = self.parsed_time_lag() else {
            return false;
        };
        let Some(temperature) = self.parsed_temperature() else {
            return false;
        };
        let sound_speed =
            self.config.sound_speed_base_ms + self.config.sound_speed_temp_coeff * temperature;
        self.coordinate.is_some()
            && time_lag.is_finite()
            && time_lag > 0.0
            && temperature.is_finite()
            && sound_speed > 0.0
    }

    /// Run the calculation and move straight to showing the result.
    /// Returns false when the gating predicate does not hold.
    pub fn calculate(&mut self) -> bool {
        if !self.can_calculate() {
            return false;
        }
        let time_lag = self.parsed_time_lag().unwrap_or_default();
        let temperature = self.parsed_temperature().unwrap_or_default();
        let Ok(distance) = compute_distance_with(
            time_lag,
            temperature,
            self.config.sound_speed_base_ms,
            self.config.sound_speed_temp_coeff,
        ) else {
            return false;
        };

        self.distance_m = Some(distance);
        self.trigger(FlowEvent::DistanceCalculated {
            distance_m: distance,
        });
        if let Some(center) = self.coordinate {
            let viewport = self.result_viewport(center, distance);
            self.set_viewport(viewport);
        }
        self.set_state(FlowState::ResultShown);
        true
    }

    // --- result presentation ------------------------------------------------

    /// Show the distance as a circle around the coordinate
    pub fn show_circle(&mut self) {
        if self.state == FlowState::ResultShown && self.distance_m.is_some() {
            self.set_state(FlowState::CircleShown);
        }
    }

    /// Return from the circle view to the result
    pub fn dismiss_circle(&mut self) {
        if self.state == FlowState::CircleShown {
            self.set_state(FlowState::ResultShown);
        }
    }

    /// Dismiss the current screen. Transient per-screen state is dropped
    /// but the committed coordinate and distance survive.
    pub fn dismiss(&mut self) {
        if self.state == FlowState::PickingOnMap {
            self.cancel_picking();
            return;
        }
        self.set_state(FlowState::Idle);
    }

    /// Explicit restart: clears the inputs and any computed distance
    pub fn restart_input(&mut self) {
        self.time_lag_text.clear();
        self.temperature_text.clear();
        self.distance_m = None;
        self.restore_committed_viewport();
        let state = if self.coordinate.is_some() {
            FlowState::CoordinateSelected
        } else {
            FlowState::Idle
        };
        self.set_state(state);
    }

    // --- asynchronous collaborators -----------------------------------------

    /// Submit a place search biased toward the current viewport
    pub fn search(&mut self, query: &str) -> bool {
        self.search.search(query, self.viewport)
    }

    /// Trigger the location permission prompt
    pub fn request_authorization(&mut self) {
        self.location.request_authorization();
    }

    /// Request a one-shot location fix
    pub fn request_single_fix(&mut self) {
        self.location.request_single_fix();
    }

    /// Stop continuous location updates
    pub fn stop_location_updates(&mut self) {
        self.location.stop_continuous_updates();
    }

    /// Pump both asynchronous collaborators on the owning context and
    /// publish the resulting changes. Call this regularly.
    pub fn process(&mut self) -> u32 {
        let location_events = self.location.process();

        let permission_state = self.location.state();
        if permission_state != self.last_permission_state {
            self.last_permission_state = permission_state;
            self.trigger(FlowEvent::PermissionStateChanged(permission_state));
        }

        let error_message = self.location.error_message();
        if error_message != self.reported_error {
            if let Some(message) = &error_message {
                self.trigger(FlowEvent::ErrorReported {
                    message: message.clone(),
                });
            }
            self.reported_error = error_message;
        }

        let search_updates = self.search.process();
        if search_updates > 0 {
            self.trigger(FlowEvent::ResultsUpdated {
                count: self.search.results().len(),
            });
        }

        location_events + search_updates
    }

    /// Consumer acknowledgment of the pending location error
    pub fn acknowledge_error(&mut self) {
        self.location.clear_error();
        self.reported_error = None;
    }

    // --- presentation-facing state ------------------------------------------

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }

    pub fn distance_m(&self) -> Option<f64> {
        self.distance_m
    }

    pub fn viewport(&self) -> MapViewport {
        self.viewport
    }

    pub fn results(&self) -> &[crate::core::SearchResult] {
        self.search.results()
    }

    pub fn permission_state(&self) -> PermissionState {
        self.location.state()
    }

    /// Pending location error text, if any
    pub fn error_message(&self) -> Option<String> {
        self.location.error_message()
    }

    pub fn config(&self) -> &RangingConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LocationFix, SearchResult, COARSE_ACCURACY_M, MIN_VIEWPORT_SPAN_DEG};
    use crate::location::{AuthorizationStatus, MockGeolocationProvider};
    use crate::search::MockPlaceSearchProvider;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Harness {
        flow: SelectionFlow,
        location: Rc<RefCell<MockGeolocationProvider>>,
        search: Rc<RefCell<MockPlaceSearchProvider>>,
    }

    fn harness() -> Harness {
        let location = MockGeolocationProvider::shared();
        let search = MockPlaceSearchProvider::shared();
        let flow = SelectionFlow::new(Box::new(location.clone()), Box::new(search.clone()));
        Harness {
            flow,
            location: location.inner(),
            search: search.inner(),
        }
    }

    fn coordinate(lat: f64, lon: f64) -> Coordinate {
        Coordinate { lat, lon }
    }

    fn fix(lat: f64, lon: f64) -> LocationFix {
        LocationFix {
            coordinate: coordinate(lat, lon),
            accuracy_m: COARSE_ACCURACY_M,
            timestamp_ms: 0,
        }
    }

    fn pick_coordinate(flow: &mut SelectionFlow, center: Coordinate) {
        flow.open_map_picker();
        flow.pan_to(center);
        flow.confirm_center();
    }

    #[test]
    fn test_pick_on_map_commits_viewport_center() {
        let mut h = harness();
        let target = coordinate(35.71, 139.81);

        h.flow.open_map_picker();
        assert_eq!(h.flow.state(), FlowState::PickingOnMap);
        assert_eq!(h.flow.viewport().lat_span_deg, 0.05);

        h.flow.pan_to(target);
        h.flow.confirm_center();
        assert_eq!(h.flow.state(), FlowState::CoordinateSelected);
        assert_eq!(h.flow.coordinate(), Some(target));
    }

    #[test]
    fn test_cancel_picking_keeps_existing_coordinate() {
        let mut h = harness();
        let first = coordinate(35.0, 139.0);
        pick_coordinate(&mut h.flow, first);

        h.flow.open_map_picker();
        h.flow.pan_to(coordinate(36.0, 140.0));
        h.flow.cancel_picking();

        assert_eq!(h.flow.coordinate(), Some(first));
        assert_eq!(h.flow.state(), FlowState::CoordinateSelected);
    }

    #[test]
    fn test_use_current_location_without_fix_is_a_no_op() {
        let mut h = harness();

        h.flow.use_current_location();

        assert_eq!(h.flow.coordinate(), None);
        assert_eq!(h.flow.state(), FlowState::Idle);
        assert!(h.flow.error_message().is_none());
    }

    #[test]
    fn test_use_current_location_zooms_in_on_cached_fix() {
        let mut h = harness();
        h.location.borrow_mut().push_fix(fix(35.66, 139.75));
        h.flow.process();

        h.flow.use_current_location();

        assert_eq!(h.flow.coordinate(), Some(coordinate(35.66, 139.75)));
        assert_eq!(h.flow.viewport().lat_span_deg, 0.01);
        assert_eq!(h.flow.state(), FlowState::CoordinateSelected);
    }

    #[test]
    fn test_gating_predicate() {
        let mut h = harness();

        // No coordinate yet
        h.flow.set_time_lag_text("3");
        h.flow.set_temperature_text("15");
        assert!(!h.flow.can_calculate());

        pick_coordinate(&mut h.flow, coordinate(35.0, 139.0));
        assert!(h.flow.can_calculate());

        h.flow.set_time_lag_text("0");
        assert!(!h.flow.can_calculate());
        h.flow.set_time_lag_text("-1");
        assert!(!h.flow.can_calculate());
        h.flow.set_time_lag_text("abc");
        assert!(!h.flow.can_calculate());
        h.flow.set_time_lag_text("3");

        h.flow.set_temperature_text("");
        assert!(!h.flow.can_calculate());
        h.flow.set_temperature_text("not a number");
        assert!(!h.flow.can_calculate());
        // Non-positive sound speed is rejected, not silently computed
        h.flow.set_temperature_text("-600");
        assert!(!h.flow.can_calculate());
        h.flow.set_temperature_text("15");
        assert!(h.flow.can_calculate());
    }

    #[test]
    fn test_calculate_happy_path() {
        let mut h = harness();
        pick_coordinate(&mut h.flow, coordinate(35.0, 139.0));

        h.flow.set_time_lag_text("3");
        assert_eq!(h.flow.state(), FlowState::InputsPending);
        h.flow.set_temperature_text("15");

        assert!(h.flow.calculate());
        assert_eq!(h.flow.state(), FlowState::ResultShown);
        let distance = h.flow.distance_m().unwrap();
        assert!((distance - 1021.5).abs() < 1e-9);

        // Result framing: 1021.5 / 111000 * 2.5
        let span = h.flow.viewport().lat_span_deg;
        assert!((span - 1021.5 / 111_000.0 * 2.5).abs() < 1e-12);

        h.flow.show_circle();
        assert_eq!(h.flow.state(), FlowState::CircleShown);
        h.flow.dismiss_circle();
        assert_eq!(h.flow.state(), FlowState::ResultShown);
    }

    #[test]
    fn test_calculate_unavailable_without_inputs() {
        let mut h = harness();
        pick_coordinate(&mut h.flow, coordinate(35.0, 139.0));
        assert!(!h.flow.calculate());
        assert_eq!(h.flow.distance_m(), None);
    }

    #[test]
    fn test_dismiss_keeps_committed_values_restart_clears_distance() {
        let mut h = harness();
        pick_coordinate(&mut h.flow, coordinate(35.0, 139.0));
        h.flow.set_time_lag_text("3");
        h.flow.set_temperature_text("15");
        h.flow.calculate();

        h.flow.dismiss();
        assert_eq!(h.flow.state(), FlowState::Idle);
        assert!(h.flow.coordinate().is_some());
        assert!(h.flow.distance_m().is_some());

        h.flow.restart_input();
        assert_eq!(h.flow.distance_m(), None);
        assert!(h.flow.coordinate().is_some());
        assert_eq!(h.flow.state(), FlowState::CoordinateSelected);
        assert!(!h.flow.can_calculate());
    }

    #[test]
    fn test_search_results_flow_through_process() {
        let mut h = harness();

        assert!(h.flow.search("park"));
        let result = SearchResult {
            name: "Sumida Park".to_string(),
            address: Some("Tokyo".to_string()),
            coordinate: coordinate(35.71, 139.80),
        };
        h.search.borrow_mut().push_success(1, vec![result]);
        h.flow.process();

        assert_eq!(h.flow.results().len(), 1);
        h.flow.select_search_result(0);
        assert_eq!(h.flow.coordinate(), Some(coordinate(35.71, 139.80)));
        assert_eq!(h.flow.viewport().lat_span_deg, 0.01);
    }

    #[test]
    fn test_permission_flow_reports_error_until_acknowledged() {
        let mut h = harness();
        let events: Rc<RefCell<Vec<FlowEvent>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        h.flow
            .register_callback(Box::new(move |e| sink.borrow_mut().push(e.clone())));

        h.location
            .borrow_mut()
            .push_authorization(AuthorizationStatus::Denied);
        h.flow.process();

        assert!(h.flow.error_message().is_some());
        assert!(events
            .borrow()
            .iter()
            .any(|e| matches!(e, FlowEvent::ErrorReported { .. })));
        assert!(events
            .borrow()
            .iter()
            .any(|e| matches!(e, FlowEvent::PermissionStateChanged(PermissionState::Denied))));

        // The error is retained across pumps until acknowledged
        h.flow.process();
        assert!(h.flow.error_message().is_some());
        h.flow.acknowledge_error();
        assert!(h.flow.error_message().is_none());
    }

    #[test]
    fn test_authorized_transition_starts_updates_via_flow() {
        let mut h = harness();
        h.location
            .borrow_mut()
            .push_authorization(AuthorizationStatus::Authorized);
        h.flow.process();

        assert_eq!(h.flow.permission_state(), PermissionState::Authorized);
        assert_eq!(h.location.borrow().start_updates_calls(), 1);
        assert_eq!(
            h.location.borrow().last_accuracy_hint_m(),
            Some(COARSE_ACCURACY_M)
        );
    }

    #[test]
    fn test_zero_distance_viewport_is_clamped() {
        let mut h = harness();
        pick_coordinate(&mut h.flow, coordinate(35.0, 139.0));
        // Distance can never be 0 through calculate(); exercise the
        // framing helper directly.
        let viewport = h.flow.result_viewport(coordinate(35.0, 139.0), 0.0);
        assert_eq!(viewport.lat_span_deg, MIN_VIEWPORT_SPAN_DEG);
        assert!(!viewport.is_degenerate());
    }

    #[test]
    fn test_callback_unregistration() {
        let mut h = harness();
        let events: Rc<RefCell<Vec<FlowEvent>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        let handle = h
            .flow
            .register_callback(Box::new(move |e| sink.borrow_mut().push(e.clone())));

        h.flow.open_map_picker();
        let seen = events.borrow().len();
        assert!(seen > 0);

        assert!(h.flow.unregister_callback(handle));
        assert!(!h.flow.unregister_callback(handle));
        h.flow.cancel_picking();
        assert_eq!(events.borrow().len(), seen);
    }
}
