//! Read-only extraction of power levels and membership from a state snapshot.

use lastadmin_proto::{Membership, PowerLevelsContent, RoomState, UserId};
use tracing::debug;

/// Power levels content of the room, if present and usable.
///
/// Absent power levels, content that is not an object, and content without a
/// `users` object all yield `None`, which leaves the policy inert for the room.
pub fn power_levels_content(state: &RoomState) -> Option<PowerLevelsContent> {
    let Some(event) = state.power_levels() else {
        debug!("No power levels in room state");
        return None;
    };

    let content = PowerLevelsContent::from_content(&event.content);
    if content.is_none() {
        debug!(room_id = %event.room_id, "Power levels content unusable, ignoring");
    }
    content
}

/// Membership of `user`, `None` if the room never recorded one.
pub fn membership_of(user: &UserId, state: &RoomState) -> Option<Membership> {
    state.membership_of(user)
}

/// Whether `user` is joined or invited.
pub fn is_present(user: &UserId, state: &RoomState) -> bool {
    membership_of(user, state).is_some_and(Membership::is_present)
}
