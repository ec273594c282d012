//! Last-admin succession policy.
//!
//! Watches membership departures and, when the last admin of a room leaves,
//! sends a power levels update that hands the room to someone else:
//! - the present users with the highest raised level, if the policy allows
//!   promotion and such users exist, or
//! - everyone, by raising the default level to admin.
//!
//! The triggering event itself is always allowed and never rewritten.

pub mod accessors;
pub mod emitter;
pub mod engine;
pub mod filter;
pub mod submitter;

pub use emitter::{StateUpdate, build_flatten_update, build_promotion_update};
pub use engine::{SuccessionOutcome, evaluate, is_last_admin_leaving, select_promotion_candidates};
pub use filter::filter_forbidden_domains;
pub use submitter::{RecordingSubmitter, StateUpdateSubmitter};

use crate::config::PolicyConfig;
use crate::error::SuccessionError;
use crate::{metrics, telemetry};
use lastadmin_proto::{EventTypes, Membership, PowerLevelsContent, RoomState, StateEvent};
use serde_json::Value;
use std::sync::Arc;
use tracing::{Instrument, debug, info, warn};

/// Answer to the host for a checked event.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    /// Whether the event may proceed.
    pub allowed: bool,
    /// Replacement content for the event, if any.
    pub replacement: Option<Value>,
}

impl Verdict {
    /// Allow the event unchanged.
    pub fn allow() -> Self {
        Self {
            allowed: true,
            replacement: None,
        }
    }
}

/// The policy, bound to a host's submitter and identity.
pub struct ManageLastAdmin {
    policy: PolicyConfig,
    server_name: String,
    submitter: Arc<dyn StateUpdateSubmitter>,
}

impl ManageLastAdmin {
    pub fn new(
        policy: PolicyConfig,
        server_name: impl Into<String>,
        submitter: Arc<dyn StateUpdateSubmitter>,
    ) -> Self {
        Self {
            policy,
            server_name: server_name.into(),
            submitter,
        }
    }

    /// Check an event about to enter a room whose current state is `state`.
    ///
    /// The verdict is always [`Verdict::allow`]. When the event is the last
    /// admin leaving, a power levels update is submitted first; an `Err`
    /// means that update failed and the room's levels are unchanged. The
    /// event should still be let through.
    pub async fn check_event_allowed(
        &self,
        event: &StateEvent,
        state: &RoomState,
    ) -> Result<Verdict, SuccessionError> {
        metrics::record_event_checked();

        if is_departure(event) {
            self.on_room_leave(event, state)
                .instrument(telemetry::spans::check_event(
                    &event.room_id,
                    &event.event_type,
                ))
                .await?;
        }

        Ok(Verdict::allow())
    }

    /// React to a `leave` membership event.
    async fn on_room_leave(
        &self,
        event: &StateEvent,
        state: &RoomState,
    ) -> Result<SuccessionOutcome, SuccessionError> {
        let Some(content) = accessors::power_levels_content(state) else {
            metrics::record_outcome(&SuccessionOutcome::NoAction);
            return Ok(SuccessionOutcome::NoAction);
        };

        let outcome = evaluate(event, &content, state, &self.policy);
        metrics::record_outcome(&outcome);

        let updated = match &outcome {
            SuccessionOutcome::NoAction => {
                debug!(sender = %event.sender, "Not the last admin leaving");
                return Ok(SuccessionOutcome::NoAction);
            }
            SuccessionOutcome::PromoteCandidates(users) => {
                let names: Vec<&str> = users.iter().map(|u| u.as_str()).collect();
                info!(room_id = %event.room_id, users = ?names, "Promoting users to admins");
                build_promotion_update(&content, users, &event.sender)
            }
            SuccessionOutcome::FlattenToDefault => {
                info!(room_id = %event.room_id, "Making admin the default level");
                build_flatten_update(&content)
            }
        };

        self.dispatch(event, updated)
            .instrument(telemetry::spans::succession(&event.room_id, event.sender.as_str()))
            .await?;

        if let SuccessionOutcome::PromoteCandidates(users) = &outcome {
            metrics::record_promoted(users.len());
        }
        Ok(outcome)
    }

    async fn dispatch(
        &self,
        event: &StateEvent,
        content: PowerLevelsContent,
    ) -> Result<(), SuccessionError> {
        let update = StateUpdate::power_levels(
            event.room_id.clone(),
            event.sender.clone(),
            content,
            &event.room_version,
            &self.server_name,
        );

        self.submitter.submit(update).await.map_err(|source| {
            warn!(room_id = %event.room_id, error = %source, "Failed to send power levels update");
            metrics::record_dispatch_failure(source.error_code());
            SuccessionError::Dispatch {
                room_id: event.room_id.clone(),
                source,
            }
        })
    }
}

/// A state event recording a `leave` membership.
fn is_departure(event: &StateEvent) -> bool {
    event.event_type == EventTypes::MEMBER
        && event.membership() == Some(Membership::Leave)
        && event.is_state()
}
