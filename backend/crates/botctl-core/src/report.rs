use crate::{ProcessId, SupervisorError};

use serde::Serialize;

/// The closed set of things a caller can ask the supervisor to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlAction {
    Start,
    Stop,
    Restart,
    Status,
}

/// What an operation observed or changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Started,
    AlreadyRunning,
    Stopped,
    /// An unreadable PID record was removed without signalling anything.
    StaleRecordCleared,
    NotRunning,
    Running,
    /// The record names a PID that no longer exists.
    Dead,
    Failed,
}

impl Outcome {
    pub fn code(self) -> &'static str {
        match self {
            Self::Started => "STARTED",
            Self::AlreadyRunning => "ALREADY_RUNNING",
            Self::Stopped => "STOPPED",
            Self::StaleRecordCleared => "STALE_RECORD_CLEARED",
            Self::NotRunning => "NOT_RUNNING",
            Self::Running => "RUNNING",
            Self::Dead => "DEAD",
            Self::Failed => "FAILED",
        }
    }

    /// Whether a stop that ended here leaves the slot free for a start.
    pub fn allows_start(self) -> bool {
        matches!(
            self,
            Self::Stopped | Self::NotRunning | Self::StaleRecordCleared
        )
    }
}

/// Result of one supervisor operation: always carries a user-facing message.
#[derive(Debug, Clone, Serialize)]
pub struct ControlReport {
    pub action: ControlAction,
    pub outcome: Outcome,
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<ProcessId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
}

impl ControlReport {
    pub fn success(
        action: ControlAction,
        outcome: Outcome,
        pid: Option<ProcessId>,
        bot_name: &str,
    ) -> Self {
        Self {
            action,
            outcome,
            code: outcome.code(),
            message: Self::success_message(action, outcome, pid, bot_name),
            pid,
            hint: None,
        }
    }

    pub fn failure(action: ControlAction, error: &SupervisorError, bot_name: &str) -> Self {
        Self {
            action,
            outcome: Outcome::Failed,
            code: error.code(),
            message: error.user_message(bot_name),
            pid: match error {
                SupervisorError::SignalFailure { pid, .. } => Some(*pid),
                _ => None,
            },
            hint: Some(error.recovery_hint()),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.outcome == Outcome::Failed
    }

    pub(crate) fn with_action(mut self, action: ControlAction) -> Self {
        self.action = action;
        self
    }

    fn success_message(
        action: ControlAction,
        outcome: Outcome,
        pid: Option<ProcessId>,
        bot_name: &str,
    ) -> String {
        let pid = pid.map(|p| p.to_string()).unwrap_or_else(|| "?".into());

        match outcome {
            Outcome::Started => format!("{bot_name} started (PID={pid})"),
            Outcome::AlreadyRunning => format!("{bot_name} is already running (PID={pid})"),
            Outcome::Stopped => format!("{bot_name} stopped"),
            Outcome::StaleRecordCleared => {
                format!("{bot_name} had an unreadable PID file; it was cleared without signalling")
            }
            Outcome::NotRunning if action == ControlAction::Status => "Not running".to_string(),
            Outcome::NotRunning => format!("{bot_name} is not running"),
            Outcome::Running => format!("Running (PID={pid})"),
            Outcome::Dead => format!("Process not found (PID {pid} is dead)"),
            Outcome::Failed => format!("{bot_name}: operation failed"),
        }
    }
}
