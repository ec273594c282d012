//! Succession decisions.
//!
//! Everything here is pure: a decision depends only on the departure event,
//! the power levels content and the state snapshot it is handed.

use super::accessors::is_present;
use super::filter::filter_forbidden_domains;
use crate::config::PolicyConfig;
use lastadmin_proto::{PowerLevelsContent, RoomState, RoomVisibility, StateEvent, UserId};
use std::collections::BTreeMap;

/// What to do about a departure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuccessionOutcome {
    /// Not the last admin leaving.
    NoAction,
    /// Raise these present users to the departing admin's level.
    PromoteCandidates(Vec<UserId>),
    /// Nobody to promote: make every user an admin.
    FlattenToDefault,
}

impl SuccessionOutcome {
    /// Static label for metrics and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NoAction => "no_action",
            Self::PromoteCandidates(_) => "promote",
            Self::FlattenToDefault => "flatten",
        }
    }
}

/// The user a membership event is about: its state key, or the sender for an
/// event without one. Never considered for promotion.
pub fn leaving_member(event: &StateEvent) -> UserId {
    event
        .state_key
        .as_deref()
        .map_or_else(|| event.sender.clone(), UserId::from)
}

/// Whether `event` takes the last present admin out of the room.
///
/// The sender must be an admin, and no admin other than the sender may still
/// be joined or invited. Visibility of the room plays no part.
pub fn is_last_admin_leaving(
    event: &StateEvent,
    content: &PowerLevelsContent,
    state: &RoomState,
) -> bool {
    if !content.is_admin(&event.sender) {
        return false;
    }

    !state.members().any(|(user, membership)| {
        user != event.sender && membership.is_present() && content.is_admin(&user)
    })
}

/// Users to promote when the last admin leaves.
///
/// Works down the levels held in `users`, highest first, skipping
/// `ignore_user`. The first level above `users_default` with at least one
/// present user (outside `forbidden_domains`, when given) wins, and every
/// eligible user at that level is returned. Empty when no level qualifies.
pub fn select_promotion_candidates<S: AsRef<str>>(
    users: &BTreeMap<UserId, i64>,
    users_default: i64,
    state: &RoomState,
    ignore_user: &UserId,
    forbidden_domains: Option<&[S]>,
) -> Vec<UserId> {
    let mut pool = users.clone();
    pool.remove(ignore_user);

    loop {
        let Some(max_level) = pool.values().copied().max() else {
            return Vec::new();
        };

        if max_level <= users_default {
            return Vec::new();
        }

        let mut eligible: Vec<UserId> = pool
            .iter()
            .filter(|(user, level)| **level == max_level && is_present(user, state))
            .map(|(user, _)| user.clone())
            .collect();

        if let Some(domains) = forbidden_domains {
            eligible = filter_forbidden_domains(eligible, domains);
        }

        if !eligible.is_empty() {
            return eligible;
        }

        // Nobody usable at this level: drop the whole tier and look lower.
        pool.retain(|_, level| *level != max_level);
    }
}

/// Decide what a departure means for the room's admin set.
pub fn evaluate(
    event: &StateEvent,
    content: &PowerLevelsContent,
    state: &RoomState,
    policy: &PolicyConfig,
) -> SuccessionOutcome {
    if !is_last_admin_leaving(event, content, state) {
        return SuccessionOutcome::NoAction;
    }

    if policy.promote_moderators {
        let forbidden = RoomVisibility::from_state(state)
            .restricts_foreign_domains()
            .then_some(policy.domains_forbidden_when_restricted.as_slice());

        let candidates = select_promotion_candidates(
            &content.users,
            content.users_default(),
            state,
            &leaving_member(event),
            forbidden,
        );

        if !candidates.is_empty() {
            return SuccessionOutcome::PromoteCandidates(candidates);
        }
    }

    SuccessionOutcome::FlattenToDefault
}
