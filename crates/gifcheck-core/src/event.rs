//! Pull-request event payload handling

use std::path::Path;

use serde::Deserialize;

use crate::error::{
    NotifierError,
    NotifierResult,
};

/// Event actions that start a notification run. Everything else is a skip.
const NOTIFIABLE_ACTIONS: &[&str] = &["opened", "synchronize"];

/// The slice of the pull-request webhook payload the notifier reads.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestEvent {
    pub action: String,
    pub number: u64,
}

impl PullRequestEvent {
    /// Loads the event payload from the path GitHub hands the action.
    ///
    /// Returns `Ok(None)` when no payload file exists: runs outside an
    /// event context skip rather than fail. A payload that exists but
    /// cannot be read or parsed is an error.
    pub fn from_path(path: &Path) -> NotifierResult<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path).map_err(|e| {
            NotifierError::InvalidEvent(format!("Failed to read event payload: {e}"))
        })?;

        let event: PullRequestEvent = serde_json::from_str(&raw)
            .map_err(|e| NotifierError::InvalidEvent(format!("Malformed event payload: {e}")))?;

        Ok(Some(event))
    }

    /// Whether this event should start a notification run.
    pub fn is_notifiable(&self) -> bool {
        NOTIFIABLE_ACTIONS.contains(&self.action.as_str())
    }
}
