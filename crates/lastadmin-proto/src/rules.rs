//! Join rules, access rules and the room visibility they add up to.

use crate::error::ProtocolError;
use crate::event::EventTypes;
use crate::state::RoomState;
use serde_json::Value;
use std::str::FromStr;

/// `join_rule` of `m.room.join_rules`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinRule {
    /// Anyone can join.
    Public,
    /// Invitation required.
    Invite,
    /// Users may knock.
    Knock,
    /// Any other value, kept verbatim.
    Other(String),
}

impl From<&str> for JoinRule {
    fn from(raw: &str) -> Self {
        match raw {
            "public" => Self::Public,
            "invite" => Self::Invite,
            "knock" => Self::Knock,
            other => Self::Other(other.to_string()),
        }
    }
}

/// `rule` of the access rules state entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessRule {
    /// Users from foreign domains are kept out.
    Restricted,
    /// Anyone may take part.
    Unrestricted,
    /// Direct chat.
    Direct,
}

impl FromStr for AccessRule {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "restricted" => Ok(Self::Restricted),
            "unrestricted" => Ok(Self::Unrestricted),
            "direct" => Ok(Self::Direct),
            other => Err(ProtocolError::UnknownAccessRule(other.to_string())),
        }
    }
}

/// Visibility class of a room, from its join rule and access rule.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoomVisibility {
    /// Join rule, if the room has one.
    pub join_rule: Option<JoinRule>,
    /// Access rule, if the room has a valid one.
    pub access_rule: Option<AccessRule>,
}

impl RoomVisibility {
    /// Derive visibility from a state snapshot.
    pub fn from_state(state: &RoomState) -> Self {
        let field = |event_type: &str, key: &str| {
            state
                .get(event_type, "")
                .and_then(|event| event.content.get(key))
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        Self {
            join_rule: field(EventTypes::JOIN_RULES, "join_rule")
                .map(|rule| JoinRule::from(rule.as_str())),
            access_rule: field(EventTypes::ACCESS_RULES, "rule").and_then(|rule| rule.parse().ok()),
        }
    }

    /// Whether users from forbidden domains must be kept out of this room.
    pub fn restricts_foreign_domains(&self) -> bool {
        self.access_rule == Some(AccessRule::Restricted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::StateEvent;
    use serde_json::json;

    fn room(join_rule: &str, access_rule: Option<&str>) -> RoomState {
        let mut events = vec![StateEvent::new(
            EventTypes::JOIN_RULES,
            Some(""),
            "@admin:example.com",
            "!r:example.com",
            json!({"join_rule": join_rule}),
        )];
        if let Some(rule) = access_rule {
            events.push(StateEvent::new(
                EventTypes::ACCESS_RULES,
                Some(""),
                "@admin:example.com",
                "!r:example.com",
                json!({"rule": rule}),
            ));
        }
        events.into_iter().collect()
    }

    #[test]
    fn test_private_restricted_room() {
        let visibility = RoomVisibility::from_state(&room("invite", Some("restricted")));
        assert_eq!(visibility.join_rule, Some(JoinRule::Invite));
        assert!(visibility.restricts_foreign_domains());
    }

    #[test]
    fn test_unrestricted_room() {
        let visibility = RoomVisibility::from_state(&room("invite", Some("unrestricted")));
        assert_eq!(visibility.access_rule, Some(AccessRule::Unrestricted));
        assert!(!visibility.restricts_foreign_domains());
    }

    #[test]
    fn test_public_room_without_access_rules() {
        let visibility = RoomVisibility::from_state(&room("public", None));
        assert_eq!(visibility.join_rule, Some(JoinRule::Public));
        assert_eq!(visibility.access_rule, None);
        assert!(!visibility.restricts_foreign_domains());
    }

    #[test]
    fn test_unknown_access_rule_is_ignored() {
        let visibility = RoomVisibility::from_state(&room("invite", Some("sealed")));
        assert_eq!(visibility.access_rule, None);
    }
}
