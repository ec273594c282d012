//! Delivery of state updates into rooms.

use super::emitter::StateUpdate;
use crate::error::SubmitError;
use async_trait::async_trait;
use parking_lot::Mutex;

/// Sends a fully formed state update into its room.
///
/// Implemented by the host. The policy awaits the result but never retries.
#[async_trait]
pub trait StateUpdateSubmitter: Send + Sync {
    /// Submit one update. It is either accepted as a whole or not at all.
    async fn submit(&self, update: StateUpdate) -> Result<(), SubmitError>;
}

/// Submitter that keeps every update it is given.
///
/// Can be armed to reject submissions, for exercising failure paths.
#[derive(Debug, Default)]
pub struct RecordingSubmitter {
    updates: Mutex<Vec<StateUpdate>>,
    fail_with: Mutex<Option<String>>,
}

impl RecordingSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every following submission with `reason`.
    pub fn fail_with(&self, reason: impl Into<String>) {
        *self.fail_with.lock() = Some(reason.into());
    }

    /// Accept submissions again.
    pub fn recover(&self) {
        *self.fail_with.lock() = None;
    }

    /// The most recently accepted update.
    pub fn last(&self) -> Option<StateUpdate> {
        self.updates.lock().last().cloned()
    }

    /// Number of accepted updates.
    pub fn count(&self) -> usize {
        self.updates.lock().len()
    }
}

#[async_trait]
impl StateUpdateSubmitter for RecordingSubmitter {
    async fn submit(&self, update: StateUpdate) -> Result<(), SubmitError> {
        if let Some(reason) = self.fail_with.lock().clone() {
            return Err(SubmitError::Rejected(reason));
        }
        self.updates.lock().push(update);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lastadmin_proto::{PowerLevelsContent, RoomVersion, UserId};
    use serde_json::json;

    fn update() -> StateUpdate {
        StateUpdate::power_levels(
            "!r:example.com",
            UserId::from("@admin:example.com"),
            PowerLevelsContent::from_content(&json!({"users": {}})).unwrap(),
            &RoomVersion::default(),
            "example.com",
        )
    }

    #[tokio::test]
    async fn test_records_updates() {
        let submitter = RecordingSubmitter::new();
        submitter.submit(update()).await.unwrap();
        submitter.submit(update()).await.unwrap();
        assert_eq!(submitter.count(), 2);
        assert_eq!(submitter.last(), Some(update()));
    }

    #[tokio::test]
    async fn test_armed_failure() {
        let submitter = RecordingSubmitter::new();
        submitter.fail_with("room is gone");

        let err = submitter.submit(update()).await.unwrap_err();
        assert!(matches!(err, SubmitError::Rejected(ref r) if r == "room is gone"));
        assert_eq!(submitter.count(), 0);

        submitter.recover();
        submitter.submit(update()).await.unwrap();
        assert_eq!(submitter.count(), 1);
    }
}
