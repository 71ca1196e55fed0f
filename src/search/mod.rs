//! Place search subsystem
//!
//! Wraps the external free-text place resolver. Requests are tagged with
//! a monotonically increasing sequence number and any response that is
//! not the latest issued request is discarded, so a slow stale response
//! can never overwrite fresher results.

pub mod mock;
pub mod provider;
pub mod service;

pub use mock::{MockPlaceSearchProvider, SharedMockPlaceSearchProvider};
pub use provider::{PlaceSearchProvider, SearchError, SearchResponse};
pub use service::SearchService;
