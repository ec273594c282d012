//! Unified error handling for the succession policy.
//!
//! Malformed room state is never an error here: the policy simply does
//! nothing. What remains is the follow-up update failing to reach the room.

use thiserror::Error;

// ============================================================================
// Submitter Errors (state update delivery)
// ============================================================================

/// Errors a [`StateUpdateSubmitter`](crate::succession::StateUpdateSubmitter)
/// can report.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("update rejected: {0}")]
    Rejected(String),

    #[error("failed to encode update: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write update: {0}")]
    Io(#[from] std::io::Error),
}

impl SubmitError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Rejected(_) => "rejected",
            Self::Serialize(_) => "serialize",
            Self::Io(_) => "io",
        }
    }
}

// ============================================================================
// Succession Errors (entry point)
// ============================================================================

/// Errors surfaced by
/// [`ManageLastAdmin::check_event_allowed`](crate::succession::ManageLastAdmin::check_event_allowed).
///
/// The triggering event stays allowed whatever happens; these only report that
/// the follow-up power levels update did not land.
#[derive(Debug, Error)]
pub enum SuccessionError {
    #[error("failed to send power levels update into {room_id}: {source}")]
    Dispatch {
        room_id: String,
        #[source]
        source: SubmitError,
    },
}

impl SuccessionError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Dispatch { source, .. } => source.error_code(),
        }
    }
}
