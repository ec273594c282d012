//! Construction of the follow-up power levels update.

use lastadmin_proto::{ADMIN_LEVEL, EventTypes, PowerLevelsContent, RoomVersion, UserId};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Length of the random part of a locally assigned event id.
pub const EVENT_ID_TOKEN_LEN: usize = 43;

const TOKEN_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// A state update to send into a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateUpdate {
    pub room_id: String,
    pub sender: UserId,
    #[serde(rename = "type")]
    pub event_type: String,
    pub content: PowerLevelsContent,
    pub state_key: String,
    /// Only set for room versions whose events carry a sender-assigned id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
}

impl StateUpdate {
    /// Power levels update from `sender` into `room_id`.
    ///
    /// Rooms on the v1/v2 event format get an event id minted on
    /// `server_name`; newer formats leave it to the submitter.
    pub fn power_levels(
        room_id: impl Into<String>,
        sender: UserId,
        content: PowerLevelsContent,
        room_version: &RoomVersion,
        server_name: &str,
    ) -> Self {
        Self {
            room_id: room_id.into(),
            sender,
            event_type: EventTypes::POWER_LEVELS.to_string(),
            content,
            state_key: String::new(),
            event_id: room_version
                .identifier_required()
                .then(|| synthesize_event_id(server_name)),
        }
    }
}

/// Event id of the form `!<43 random letters>:<server_name>`.
pub fn synthesize_event_id(server_name: &str) -> String {
    let mut rng = rand::thread_rng();
    let token: String = (0..EVENT_ID_TOKEN_LEN)
        .map(|_| TOKEN_ALPHABET[rng.gen_range(0..TOKEN_ALPHABET.len())] as char)
        .collect();
    format!("!{token}:{server_name}")
}

/// Copy of `content` with every candidate raised to the level `admin`
/// holds. Other entries are untouched.
pub fn build_promotion_update(
    content: &PowerLevelsContent,
    candidates: &[UserId],
    admin: &UserId,
) -> PowerLevelsContent {
    let level = content.level_of(admin);
    let mut updated = content.clone();
    for candidate in candidates {
        updated.users.insert(candidate.clone(), level);
    }
    updated
}

/// Copy of `content` where everyone is an admin: `users_default` becomes
/// [`ADMIN_LEVEL`] and only entries already exactly at that level are kept.
pub fn build_flatten_update(content: &PowerLevelsContent) -> PowerLevelsContent {
    let mut updated = content.clone();
    updated.users_default = Some(ADMIN_LEVEL);
    updated.users.retain(|_, level| *level == ADMIN_LEVEL);
    updated
}
