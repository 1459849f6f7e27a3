//! Following up on runs the server handed off to a container task.
//!
//! A launched run only returns a task ARN. The server exposes a status and a
//! stop endpoint for that ARN, and [`wait_for_completion`] polls the first
//! until the task settles.

use std::thread;
use std::time::{Duration, Instant};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// How often [`wait_for_completion`] asks for the status by default
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
/// How long [`wait_for_completion`] waits by default
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(300);

/// Status reported when waiting gave up
pub const TIMEOUT_STATUS: &str = "TIMEOUT";

const FINISHED_STATUSES: [&str; 3] = ["STOPPED", "NOT_FOUND", "ERROR"];

/// Body of the task status endpoint.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct TaskStatus {
    pub status: String,
    pub desired_status: Option<String>,
    pub started_at: Option<String>,
    pub stopped_at: Option<String>,
    pub stop_reason: Option<String>,
    pub exit_code: Option<i32>,
    pub error: Option<String>,
}

impl TaskStatus {
    /// Whether the task will not change any more. A body with only an error
    /// counts as finished.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        FINISHED_STATUSES.contains(&self.status.as_str())
            || (self.status.is_empty() && self.error.is_some())
    }

    fn timed_out() -> Self {
        Self {
            status: TIMEOUT_STATUS.to_string(),
            error: Some("Task did not complete within timeout".to_string()),
            ..Self::default()
        }
    }
}

/// Body of the stop endpoint.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct StopOutcome {
    pub success: Option<bool>,
    pub error: Option<String>,
}

impl StopOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.success == Some(true) && self.error.is_none()
    }
}

/// Polls `poll` every `interval` until the task finishes or `timeout` has
/// passed, in which case a `TIMEOUT` status is returned.
///
/// # Errors
///
/// Returns the first error `poll` returns.
pub fn wait_for_completion<F>(mut poll: F, interval: Duration, timeout: Duration) -> Result<TaskStatus>
where
    F: FnMut() -> Result<TaskStatus>,
{
    let started = Instant::now();

    while started.elapsed() < timeout {
        let status = poll()?;
        if status.is_finished() {
            return Ok(status);
        }

        debug!("Task is `{}`, checking again in {interval:?}", status.status);
        thread::sleep(interval);
    }

    Ok(TaskStatus::timed_out())
}
