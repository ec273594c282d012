//! Integration test common infrastructure.
//!
//! Builds room state snapshots the way a homeserver would hand them to the
//! policy, and wires the policy to a recording submitter.

#![allow(dead_code)]

use lastadmin_proto::{EventTypes, Membership, RoomState, RoomVersion, StateEvent, UserId};
use manage_last_admin::PolicyConfig;
use manage_last_admin::succession::{ManageLastAdmin, RecordingSubmitter};
use serde_json::{Value, json};
use std::sync::Arc;

pub const SERVER_NAME: &str = "example.com";
pub const ROOM_ID: &str = "!someroom:example.com";

pub const ADMIN: &str = "@admin:example.com";
pub const ADMIN2: &str = "@admin2:example.com";
pub const LEFT_USER: &str = "@nothere:example.com";
pub const MOD: &str = "@mod:example.com";
pub const MOD2: &str = "@mod2:example.com";
pub const REGULAR: &str = "@someuser:example.com";
pub const REGULAR2: &str = "@someuser2:example.com";
pub const EXTERNAL: &str = "@ext:externe.com";
pub const EXTERNAL2: &str = "@ext2:externe.com";

pub const FORBIDDEN_DOMAIN: &str = "externe.com";

/// Legacy (sender-assigned event ids) and modern room versions.
pub const ROOM_VERSIONS: [&str; 2] = ["1", "9"];

/// Room state under construction.
pub struct RoomFixture {
    pub room_version: RoomVersion,
    pub state: RoomState,
}

impl RoomFixture {
    pub fn new(room_version: &str) -> Self {
        Self {
            room_version: RoomVersion::new(room_version),
            state: RoomState::new(),
        }
    }

    /// An event in this room. Legacy rooms get a pre-assigned event id.
    pub fn event(&self, event_type: &str, state_key: &str, sender: &str, content: Value) -> StateEvent {
        let event = StateEvent::new(event_type, Some(state_key), sender, ROOM_ID, content)
            .with_room_version(self.room_version.clone());
        if self.room_version.identifier_required() {
            event.with_event_id(format!("$fixture-{}-{}:{}", event_type, state_key, SERVER_NAME))
        } else {
            event
        }
    }

    pub fn set(&mut self, event: StateEvent) -> &mut Self {
        self.state.insert(event);
        self
    }

    pub fn add_member(&mut self, user: &str, membership: Membership) -> &mut Self {
        let event = self.event(
            EventTypes::MEMBER,
            user,
            user,
            json!({"membership": membership.as_str()}),
        );
        self.set(event)
    }

    pub fn join(&mut self, user: &str) -> &mut Self {
        self.add_member(user, Membership::Join)
    }

    /// Power levels with the usual thresholds, the given users, and a join
    /// for each of them.
    pub fn with_users(&mut self, users: &[(&str, i64)]) -> &mut Self {
        let event = self.event(
            EventTypes::POWER_LEVELS,
            "",
            ADMIN,
            power_levels_content(users),
        );
        self.set(event);
        for (user, _) in users {
            self.join(user);
        }
        self
    }

    /// Invite-only, `restricted` access rule, encrypted.
    pub fn make_private(&mut self) -> &mut Self {
        self.room_rules("invite", "restricted")
    }

    /// Invite-only, `unrestricted` access rule, encrypted.
    pub fn make_unrestricted(&mut self) -> &mut Self {
        self.room_rules("invite", "unrestricted")
    }

    pub fn make_public(&mut self) -> &mut Self {
        let event = self.event(EventTypes::JOIN_RULES, "", ADMIN, json!({"join_rule": "public"}));
        self.set(event)
    }

    fn room_rules(&mut self, join_rule: &str, access_rule: &str) -> &mut Self {
        let join_rules = self.event(EventTypes::JOIN_RULES, "", ADMIN, json!({"join_rule": join_rule}));
        let access_rules = self.event(EventTypes::ACCESS_RULES, "", ADMIN, json!({"rule": access_rule}));
        let encryption = self.event(
            EventTypes::ENCRYPTION,
            "",
            ADMIN,
            json!({"algorithm": "m.megolm.v1.aes-sha2"}),
        );
        self.set(join_rules).set(access_rules).set(encryption)
    }

    /// `user` leaving the room.
    pub fn leave_event(&self, user: &str) -> StateEvent {
        self.kick_event(user, user)
    }

    /// `sender` removing `user` from the room.
    pub fn kick_event(&self, user: &str, sender: &str) -> StateEvent {
        self.event(EventTypes::MEMBER, user, sender, json!({"membership": "leave"}))
    }
}

pub fn power_levels_content(users: &[(&str, i64)]) -> Value {
    let users: serde_json::Map<String, Value> = users
        .iter()
        .map(|(user, level)| (user.to_string(), json!(level)))
        .collect();

    json!({
        "ban": 50,
        "events": {
            "m.room.avatar": 50,
            "m.room.canonical_alias": 50,
            "m.room.encryption": 100,
            "m.room.history_visibility": 100,
            "m.room.name": 50,
            "m.room.power_levels": 100,
            "m.room.server_acl": 100,
            "m.room.tombstone": 100
        },
        "events_default": 0,
        "invite": 0,
        "kick": 50,
        "redact": 50,
        "state_default": 50,
        "users": users,
        "users_default": 0
    })
}

pub fn policy(promote_moderators: bool) -> PolicyConfig {
    PolicyConfig {
        promote_moderators,
        domains_forbidden_when_restricted: vec![FORBIDDEN_DOMAIN.to_string()],
    }
}

/// The policy wired to a fresh recording submitter.
pub fn create_module(promote_moderators: bool) -> (ManageLastAdmin, Arc<RecordingSubmitter>) {
    let submitter = Arc::new(RecordingSubmitter::new());
    let module = ManageLastAdmin::new(policy(promote_moderators), SERVER_NAME, submitter.clone());
    (module, submitter)
}

pub fn uid(raw: &str) -> UserId {
    UserId::from(raw)
}

/// `users` of an update as plain `(user, level)` pairs, sorted.
pub fn users_of(update: &manage_last_admin::StateUpdate) -> Vec<(String, i64)> {
    update
        .content
        .users
        .iter()
        .map(|(user, level)| (user.to_string(), *level))
        .collect()
}

pub fn expected(users: &[(&str, i64)]) -> Vec<(String, i64)> {
    let mut users: Vec<(String, i64)> = users.iter().map(|(u, l)| (u.to_string(), *l)).collect();
    users.sort();
    users
}
