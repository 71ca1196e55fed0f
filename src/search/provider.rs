//! Place search provider interface

use crate::core::{MapViewport, SearchResult};
use std::fmt;

/// Transport or service failure during place search.
///
/// Never propagates past the service boundary; the previous valid result
/// list is retained instead.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// Network-level failure reaching the resolver
    Transport { message: String },
    /// The resolver answered with an error
    Service { message: String },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::Transport { message } => write!(f, "Search transport error: {}", message),
            SearchError::Service { message } => write!(f, "Search service error: {}", message),
        }
    }
}

impl std::error::Error for SearchError {}

/// A completed search call, tagged with the sequence number it was
/// submitted under.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResponse {
    pub seq: u64,
    pub outcome: Result<Vec<SearchResult>, SearchError>,
}

/// Abstraction over the external place resolver.
///
/// The resolver offers no cancellation; calls complete (or hang) on
/// their own schedule and are handed back through `poll_response` on the
/// single owning context.
pub trait PlaceSearchProvider {
    /// Start resolving `query`, biased toward the given viewport
    fn submit(&mut self, seq: u64, query: &str, bias: MapViewport);

    /// Take the next completed response, if any (non-blocking)
    fn poll_response(&mut self) -> Option<SearchResponse>;
}
