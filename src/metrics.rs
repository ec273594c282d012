//! Prometheus metrics for the succession policy.
//!
//! - `lastadmin_events_checked_total` - Events handed to the policy
//! - `lastadmin_succession_outcomes_total{outcome}` - Decisions on departures
//! - `lastadmin_promoted_users_total` - Users raised to admin
//! - `lastadmin_dispatch_failures_total{error}` - Updates that did not land
//!
//! Recording before [`init`] is a no-op.

use crate::succession::SuccessionOutcome;
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::OnceLock;

/// Global Prometheus registry for all metrics.
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

/// Total events passed to the policy entry point.
pub static EVENTS_CHECKED: OnceLock<IntCounter> = OnceLock::new();

/// Succession decisions by outcome.
pub static SUCCESSION_OUTCOMES: OnceLock<IntCounterVec> = OnceLock::new();

/// Total users promoted to admin.
pub static PROMOTED_USERS: OnceLock<IntCounter> = OnceLock::new();

/// Failed update dispatches by error kind.
pub static DISPATCH_FAILURES: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize the Prometheus metrics registry.
///
/// Safe to call more than once; only the first call registers.
pub fn init() {
    let r = registry();

    macro_rules! register {
        ($metric:ident, $init:expr) => {
            if $metric.get().is_none() {
                match $init {
                    Ok(m) => {
                        if let Err(e) = r.register(Box::new(m.clone())) {
                            tracing::warn!(error = %e, concat!("Failed to register metric ", stringify!($metric)));
                        }
                        let _ = $metric.set(m);
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, concat!("Failed to create metric ", stringify!($metric)));
                    }
                }
            }
        };
    }

    register!(EVENTS_CHECKED, IntCounter::new("lastadmin_events_checked_total", "Events checked by the succession policy"));
    register!(SUCCESSION_OUTCOMES, IntCounterVec::new(Opts::new("lastadmin_succession_outcomes_total", "Succession decisions by outcome"), &["outcome"]));
    register!(PROMOTED_USERS, IntCounter::new("lastadmin_promoted_users_total", "Users promoted to admin"));
    register!(DISPATCH_FAILURES, IntCounterVec::new(Opts::new("lastadmin_dispatch_failures_total", "Power levels updates that failed to dispatch"), &["error"]));
}

/// Gather all metrics and encode them in Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry().gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode Prometheus metrics");
        return String::new();
    }
    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Prometheus metrics were not valid UTF-8");
            String::new()
        }
    }
}

/// Record an event reaching the entry point.
#[inline]
pub fn record_event_checked() {
    if let Some(c) = EVENTS_CHECKED.get() {
        c.inc();
    }
}

/// Record a succession decision.
#[inline]
pub fn record_outcome(outcome: &SuccessionOutcome) {
    if let Some(c) = SUCCESSION_OUTCOMES.get() {
        c.with_label_values(&[outcome.label()]).inc();
    }
}

/// Record users raised to admin by a delivered update.
#[inline]
pub fn record_promoted(count: usize) {
    if let Some(c) = PROMOTED_USERS.get() {
        c.inc_by(count as u64);
    }
}

/// Record a failed dispatch.
#[inline]
pub fn record_dispatch_failure(error: &str) {
    if let Some(c) = DISPATCH_FAILURES.get() {
        c.with_label_values(&[error]).inc();
    }
}
