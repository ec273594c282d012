//! manage-last-admin - admin succession for rooms.
//!
//! When the last user holding the admin level leaves a room, the policy
//! decides from the room's current state who inherits control and sends the
//! power levels update that applies the decision. See [`succession`].

pub mod config;
pub mod error;
pub mod metrics;
pub mod succession;
pub mod telemetry;

pub use crate::config::{Config, PolicyConfig};
pub use crate::error::{SubmitError, SuccessionError};
pub use crate::succession::{ManageLastAdmin, StateUpdate, StateUpdateSubmitter, Verdict};
