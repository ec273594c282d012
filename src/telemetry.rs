//! Standardized span constructors for policy observability.

pub mod spans {
    use tracing::{Span, info_span};

    /// Create a span for one event passing through the policy.
    pub fn check_event(room_id: &str, event_type: &str) -> Span {
        info_span!("check_event", room_id = %room_id, event_type = %event_type)
    }

    /// Create a span for a succession triggered by a departure.
    pub fn succession(room_id: &str, sender: &str) -> Span {
        info_span!("succession", room_id = %room_id, sender = %sender)
    }
}
