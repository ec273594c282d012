//! Room versions and the event formats they imply.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Room version used when none is given.
pub const DEFAULT_ROOM_VERSION: &str = "10";

/// Event format generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFormat {
    /// Rooms v1 and v2: the sending server assigns the event id.
    RoomV1V2,
    /// Room v3: event ids are reference hashes.
    RoomV3,
    /// Room v4 and later: url-safe reference hashes.
    RoomV4Plus,
}

/// A room version identifier such as `"1"` or `"9"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomVersion(String);

impl RoomVersion {
    /// Wrap a room version id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The version id.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Event format used by this version. Unknown versions are assumed to
    /// use the newest format.
    pub fn event_format(&self) -> EventFormat {
        match self.0.as_str() {
            "1" | "2" => EventFormat::RoomV1V2,
            "3" => EventFormat::RoomV3,
            _ => EventFormat::RoomV4Plus,
        }
    }

    /// Whether events sent into this room must carry a pre-assigned id.
    pub fn identifier_required(&self) -> bool {
        self.event_format() == EventFormat::RoomV1V2
    }
}

impl Default for RoomVersion {
    fn default() -> Self {
        Self(DEFAULT_ROOM_VERSION.to_string())
    }
}

impl fmt::Display for RoomVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
