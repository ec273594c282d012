//! User identifiers.
//!
//! A user id has the shape `@localpart:server`. The server part may itself
//! carry a port (`@alice:example.com:8448`), so everything after the first
//! `:` belongs to the domain.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque user identifier.
///
/// Construction through [`From`] is lenient: state handed to the policy is
/// already authoritative, so ids are compared as plain strings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// The full id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part between the sigil and the first `:`.
    pub fn localpart(&self) -> &str {
        let rest = self.0.strip_prefix('@').unwrap_or(&self.0);
        rest.split_once(':').map_or(rest, |(local, _)| local)
    }

    /// The server the user belongs to, if the id has one.
    pub fn domain(&self) -> Option<&str> {
        self.0.split_once(':').map(|(_, domain)| domain)
    }
}

impl From<&str> for UserId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for UserId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
