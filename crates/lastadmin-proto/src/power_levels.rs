//! `m.room.power_levels` content.
//!
//! Only `users` and `users_default` are typed. Every other field (ban, kick,
//! redact, per-event thresholds, ...) is carried in [`PowerLevelsContent::other`]
//! and written back unchanged.

use crate::user_id::UserId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Level at which a user is a room administrator.
pub const ADMIN_LEVEL: i64 = 100;

/// Power levels content of a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerLevelsContent {
    /// Explicit per-user levels. Users not listed get the default.
    pub users: BTreeMap<UserId, i64>,
    /// Default level for unlisted users. Left out on the wire when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users_default: Option<i64>,
    /// Fields the policy never edits.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl PowerLevelsContent {
    /// Read power levels from raw event content.
    ///
    /// Returns `None` unless the content is an object whose `users` field is
    /// an object of integer levels.
    pub fn from_content(content: &Value) -> Option<Self> {
        let object = content.as_object()?;
        if !object.get("users").is_some_and(Value::is_object) {
            return None;
        }
        serde_json::from_value(content.clone()).ok()
    }

    /// Effective default level.
    pub fn users_default(&self) -> i64 {
        self.users_default.unwrap_or(0)
    }

    /// Effective level of a user.
    pub fn level_of(&self, user: &UserId) -> i64 {
        self.users
            .get(user)
            .copied()
            .unwrap_or_else(|| self.users_default())
    }

    /// Whether a user is listed at or above [`ADMIN_LEVEL`].
    pub fn is_admin(&self, user: &UserId) -> bool {
        self.users.get(user).is_some_and(|level| *level >= ADMIN_LEVEL)
    }
}
