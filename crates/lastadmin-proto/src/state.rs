//! Room state snapshots.

use crate::event::{EventTypes, Membership, StateEvent};
use crate::user_id::UserId;
use serde::Deserialize;
use std::collections::HashMap;

/// Point-in-time view of a room's state, keyed by event type and then state
/// key.
///
/// Non-state events are never stored. Deserializes from a JSON array of
/// state events; a later entry for the same key replaces an earlier one.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Vec<StateEvent>")]
pub struct RoomState {
    events: HashMap<String, HashMap<String, StateEvent>>,
}

impl RoomState {
    /// Empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a state event, replacing any entry under the same key.
    /// Events without a state key are ignored.
    pub fn insert(&mut self, event: StateEvent) {
        if let Some(state_key) = event.state_key.clone() {
            self.events
                .entry(event.event_type.clone())
                .or_default()
                .insert(state_key, event);
        }
    }

    /// Look up an entry.
    pub fn get(&self, event_type: &str, state_key: &str) -> Option<&StateEvent> {
        self.events.get(event_type)?.get(state_key)
    }

    /// The power levels entry, if the room has one.
    pub fn power_levels(&self) -> Option<&StateEvent> {
        self.get(EventTypes::POWER_LEVELS, "")
    }

    /// Current membership of a user, `None` if never recorded or unreadable.
    pub fn membership_of(&self, user: &UserId) -> Option<Membership> {
        self.get(EventTypes::MEMBER, user.as_str())
            .and_then(StateEvent::membership)
    }

    /// Every membership entry as `(user, membership)`. Entries with an
    /// unreadable membership are skipped.
    pub fn members(&self) -> impl Iterator<Item = (UserId, Membership)> + '_ {
        self.events
            .get(EventTypes::MEMBER)
            .into_iter()
            .flatten()
            .filter_map(|(state_key, event)| {
                event
                    .membership()
                    .map(|membership| (UserId::from(state_key.as_str()), membership))
            })
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.events.values().map(HashMap::len).sum()
    }

    /// Whether the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.events.values().all(HashMap::is_empty)
    }
}

impl FromIterator<StateEvent> for RoomState {
    fn from_iter<I: IntoIterator<Item = StateEvent>>(iter: I) -> Self {
        let mut state = Self::new();
        for event in iter {
            state.insert(event);
        }
        state
    }
}

impl From<Vec<StateEvent>> for RoomState {
    fn from(events: Vec<StateEvent>) -> Self {
        events.into_iter().collect()
    }
}
