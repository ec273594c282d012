//! # lastadmin-proto
//!
//! Typed views over the pieces of room state the last-admin succession
//! policy reads and writes.
//!
//! - [`RoomState`]: an immutable snapshot keyed by `(event type, state key)`
//! - [`StateEvent`] and [`Membership`]: state entries and membership values
//! - [`PowerLevelsContent`]: the `m.room.power_levels` content, with unknown
//!   fields carried through untouched
//! - [`RoomVisibility`]: join rule plus access rule of a room
//! - [`RoomVersion`]: the room version and the event format it implies
//!
//! ## Quick Start
//!
//! ```rust
//! use lastadmin_proto::{Membership, RoomState, StateEvent, UserId};
//! use serde_json::json;
//!
//! let state: RoomState = vec![StateEvent::new(
//!     "m.room.member",
//!     Some("@alice:example.com"),
//!     "@alice:example.com",
//!     "!room:example.com",
//!     json!({"membership": "join"}),
//! )]
//! .into_iter()
//! .collect();
//!
//! let alice = UserId::from("@alice:example.com");
//! assert_eq!(state.membership_of(&alice), Some(Membership::Join));
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod error;
pub mod event;
pub mod power_levels;
pub mod room_version;
pub mod rules;
pub mod state;
pub mod user_id;

pub use self::error::ProtocolError;
pub use self::event::{EventTypes, Membership, StateEvent};
pub use self::power_levels::{PowerLevelsContent, ADMIN_LEVEL};
pub use self::room_version::{EventFormat, RoomVersion};
pub use self::rules::{AccessRule, JoinRule, RoomVisibility};
pub use self::state::RoomState;
pub use self::user_id::UserId;
