//! Error types for parsing room state values.

use thiserror::Error;

/// Failures when turning raw state values into typed ones.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// A `membership` string outside the known set.
    #[error("unknown membership: {0}")]
    UnknownMembership(String),

    /// A `rule` string outside the known access rules.
    #[error("unknown access rule: {0}")]
    UnknownAccessRule(String),
}
