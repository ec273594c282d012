//! State events and membership values.

use crate::error::ProtocolError;
use crate::room_version::RoomVersion;
use crate::user_id::UserId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Event type names the policy reads or writes.
pub struct EventTypes;

impl EventTypes {
    /// Per-user membership, keyed by the user id.
    pub const MEMBER: &'static str = "m.room.member";
    /// Singleton power levels entry.
    pub const POWER_LEVELS: &'static str = "m.room.power_levels";
    /// Singleton join rules entry.
    pub const JOIN_RULES: &'static str = "m.room.join_rules";
    /// Singleton encryption entry.
    pub const ENCRYPTION: &'static str = "m.room.encryption";
    /// Singleton access rules entry (`restricted` / `unrestricted` / `direct`).
    pub const ACCESS_RULES: &'static str = "im.vector.room.access_rules";
}

/// Membership of a user in a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Membership {
    /// In the room.
    Join,
    /// Invited and not yet answered.
    Invite,
    /// Left, or was kicked.
    Leave,
    /// Banned.
    Ban,
    /// Asked to join.
    Knock,
}

impl Membership {
    /// Whether the user counts as present: joined, or holding a pending invite.
    pub fn is_present(self) -> bool {
        matches!(self, Self::Join | Self::Invite)
    }

    /// Wire name of the membership.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Join => "join",
            Self::Invite => "invite",
            Self::Leave => "leave",
            Self::Ban => "ban",
            Self::Knock => "knock",
        }
    }
}

impl FromStr for Membership {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "join" => Ok(Self::Join),
            "invite" => Ok(Self::Invite),
            "leave" => Ok(Self::Leave),
            "ban" => Ok(Self::Ban),
            "knock" => Ok(Self::Knock),
            other => Err(ProtocolError::UnknownMembership(other.to_string())),
        }
    }
}

impl fmt::Display for Membership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A room event as seen by the policy.
///
/// Content is kept as raw JSON: the policy validates only the parts it reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateEvent {
    /// Event type, e.g. `m.room.member`.
    #[serde(rename = "type")]
    pub event_type: String,
    /// State key; `None` for non-state events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_key: Option<String>,
    /// User who sent the event.
    pub sender: UserId,
    /// Room the event belongs to.
    pub room_id: String,
    /// Raw event content.
    #[serde(default)]
    pub content: Value,
    /// Event id, present for events already in a room.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    /// Version of the room the event was sent in.
    #[serde(default)]
    pub room_version: RoomVersion,
}

impl StateEvent {
    /// Build an event in a room of the default version.
    pub fn new(
        event_type: impl Into<String>,
        state_key: Option<&str>,
        sender: impl Into<UserId>,
        room_id: impl Into<String>,
        content: Value,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            state_key: state_key.map(str::to_string),
            sender: sender.into(),
            room_id: room_id.into(),
            content,
            event_id: None,
            room_version: RoomVersion::default(),
        }
    }

    /// Set the room version.
    pub fn with_room_version(mut self, room_version: RoomVersion) -> Self {
        self.room_version = room_version;
        self
    }

    /// Set the event id.
    pub fn with_event_id(mut self, event_id: impl Into<String>) -> Self {
        self.event_id = Some(event_id.into());
        self
    }

    /// Whether this is a state event (it carries a state key).
    pub fn is_state(&self) -> bool {
        self.state_key.is_some()
    }

    /// The `membership` field of the content, if it holds a known value.
    pub fn membership(&self) -> Option<Membership> {
        self.content
            .get("membership")
            .and_then(Value::as_str)
            .and_then(|m| m.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_membership_presence() {
        assert!(Membership::Join.is_present());
        assert!(Membership::Invite.is_present());
        assert!(!Membership::Leave.is_present());
        assert!(!Membership::Ban.is_present());
        assert!(!Membership::Knock.is_present());
    }

    #[test]
    fn test_membership_parse() {
        assert_eq!("invite".parse::<Membership>(), Ok(Membership::Invite));
        assert_eq!(
            "joined".parse::<Membership>(),
            Err(ProtocolError::UnknownMembership("joined".to_string()))
        );
    }

    #[test]
    fn test_event_membership_from_content() {
        let event = StateEvent::new(
            EventTypes::MEMBER,
            Some("@a:example.com"),
            "@a:example.com",
            "!r:example.com",
            json!({"membership": "leave"}),
        );
        assert!(event.is_state());
        assert_eq!(event.membership(), Some(Membership::Leave));
    }

    #[test]
    fn test_event_unknown_membership_is_none() {
        let event = StateEvent::new(
            EventTypes::MEMBER,
            Some("@a:example.com"),
            "@a:example.com",
            "!r:example.com",
            json!({"membership": 3}),
        );
        assert_eq!(event.membership(), None);
    }

    #[test]
    fn test_event_deserialize() {
        let event: StateEvent = serde_json::from_value(json!({
            "type": "m.room.member",
            "state_key": "@a:example.com",
            "sender": "@a:example.com",
            "room_id": "!r:example.com",
            "content": {"membership": "join"},
            "room_version": "1"
        }))
        .unwrap();
        assert_eq!(event.event_type, EventTypes::MEMBER);
        assert!(event.room_version.identifier_required());
        assert_eq!(event.membership(), Some(Membership::Join));
    }

    #[test]
    fn test_non_state_event() {
        let event: StateEvent = serde_json::from_value(json!({
            "type": "m.room.message",
            "sender": "@a:example.com",
            "room_id": "!r:example.com",
            "content": {"body": "hi"}
        }))
        .unwrap();
        assert!(!event.is_state());
        assert_eq!(event.room_version, RoomVersion::default());
    }
}
