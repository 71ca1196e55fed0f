//! Sequence-tagged place search service

use crate::core::{MapViewport, SearchResult};
use crate::search::provider::{PlaceSearchProvider, SearchResponse};

/// Stateless-per-call wrapper over the place resolver, holding only the
/// last valid result list and the latest issued sequence number.
pub struct SearchService {
    provider: Box<dyn PlaceSearchProvider>,
    latest_seq: u64,
    results: Vec<SearchResult>,
}

impl SearchService {
    pub fn new(provider: Box<dyn PlaceSearchProvider>) -> Self {
        Self {
            provider,
            latest_seq: 0,
            results: Vec::new(),
        }
    }

    /// Submit a free-text query biased toward `bias`.
    ///
    /// An empty or whitespace-only query is a no-op: no call is made and
    /// no error is raised. Returns whether a request was submitted.
    pub fn search(&mut self, query: &str, bias: MapViewport) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return false;
        }

        self.latest_seq += 1;
        self.provider.submit(self.latest_seq, query, bias);
        true
    }

    /// Drain completed responses. Responses that are not the latest
    /// issued request are stale and discarded; failures are swallowed,
    /// keeping the previous valid list. Returns the number of responses
    /// that updated the visible list.
    pub fn process(&mut self) -> u32 {
        let mut applied = 0;
        while let Some(SearchResponse { seq, outcome }) = self.provider.poll_response() {
            if seq != self.latest_seq {
                continue;
            }
            match outcome {
                Ok(results) => {
                    // Zero matches is a valid (empty) result, not an error
                    self.results = results;
                    applied += 1;
                }
                Err(_) => {
                    // Degrade to "no new results"
                }
            }
        }
        applied
    }

    /// Last valid result list, in provider order
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    /// Sequence number of the most recently issued request
    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }
}
