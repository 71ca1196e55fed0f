//! Location error types

use crate::location::provider::AuthorizationStatus;
use std::fmt;

/// Errors surfaced by the location subsystem.
///
/// The controller retains at most the latest one; it is never cleared
/// automatically, only by explicit consumer acknowledgment.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationError {
    /// Authorization denied or restricted at the system level
    PermissionDenied { status: AuthorizationStatus },
    /// Transient hardware or signal failure
    FixFailed { message: String },
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationError::PermissionDenied { status } => {
                write!(f, "Location permission unavailable ({:?})", status)
            }
            LocationError::FixFailed { message } => {
                write!(f, "Location fix failed: {}", message)
            }
        }
    }
}

impl std::error::Error for LocationError {}
