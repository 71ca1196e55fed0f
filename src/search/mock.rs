//! Mock place search provider for testing

use crate::core::{MapViewport, SearchResult};
use crate::search::provider::{PlaceSearchProvider, SearchError, SearchResponse};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Mock resolver recording submitted requests and replaying scripted
/// responses in whatever order the test enqueues them.
pub struct MockPlaceSearchProvider {
    submitted: Vec<(u64, String, MapViewport)>,
    response_queue: VecDeque<SearchResponse>,
}

impl MockPlaceSearchProvider {
    pub fn new() -> Self {
        Self {
            submitted: Vec::new(),
            response_queue: VecDeque::new(),
        }
    }

    /// Create a shared handle so tests can keep inspecting the mock after
    /// handing it to a service.
    pub fn shared() -> SharedMockPlaceSearchProvider {
        SharedMockPlaceSearchProvider {
            inner: Rc::new(RefCell::new(Self::new())),
        }
    }

    /// Queue a successful response for the given sequence number
    pub fn push_success(&mut self, seq: u64, results: Vec<SearchResult>) {
        self.response_queue.push_back(SearchResponse {
            seq,
            outcome: Ok(results),
        });
    }

    /// Queue a failed response for the given sequence number
    pub fn push_failure(&mut self, seq: u64, error: SearchError) {
        self.response_queue.push_back(SearchResponse {
            seq,
            outcome: Err(error),
        });
    }

    /// All requests submitted so far, in order
    pub fn submitted(&self) -> &[(u64, String, MapViewport)] {
        &self.submitted
    }

    pub fn queued_response_count(&self) -> usize {
        self.response_queue.len()
    }
}

impl Default for MockPlaceSearchProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaceSearchProvider for MockPlaceSearchProvider {
    fn submit(&mut self, seq: u64, query: &str, bias: MapViewport) {
        self.submitted.push((seq, query.to_string(), bias));
    }

    fn poll_response(&mut self) -> Option<SearchResponse> {
        self.response_queue.pop_front()
    }
}

/// Cloneable handle over a [`MockPlaceSearchProvider`], usable both as
/// the boxed provider and as an inspection window from tests.
#[derive(Clone)]
pub struct SharedMockPlaceSearchProvider {
    inner: Rc<RefCell<MockPlaceSearchProvider>>,
}

impl SharedMockPlaceSearchProvider {
    pub fn inner(&self) -> Rc<RefCell<MockPlaceSearchProvider>> {
        self.inner.clone()
    }
}

impl PlaceSearchProvider for SharedMockPlaceSearchProvider {
    fn submit(&mut self, seq: u64, query: &str, bias: MapViewport) {
        self.inner.borrow_mut().submit(seq, query, bias);
    }

    fn poll_response(&mut self) -> Option<SearchResponse> {
        self.inner.borrow_mut().poll_response()
    }
}
