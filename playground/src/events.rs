use crate::types::OutputLine;
use crate::wire::ExecuteResponse;
use std::fmt;

pub(crate) const UNKNOWN_ERROR: &str = "Unknown error occurred";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HealthStatus {
    Checking,
    Online,
    Offline,
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HealthStatus::Checking => "Checking...",
            HealthStatus::Online => "Online",
            HealthStatus::Offline => "Offline",
        };
        f.write_str(label)
    }
}

/// Outcome of a job the remote service was asked to run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExecutionResult {
    /// `None` means the service sent no output at all, which is not the same as `Some("")`.
    Success { output: Option<String> },
    ApplicationError { message: String },
    TransportError { message: String },
}

impl ExecutionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionResult::Success { .. })
    }
}

impl From<ExecuteResponse> for ExecutionResult {
    fn from(response: ExecuteResponse) -> Self {
        if response.success {
            ExecutionResult::Success {
                output: response.output,
            }
        } else {
            ExecutionResult::ApplicationError {
                message: response
                    .error
                    .filter(|message| !message.trim().is_empty())
                    .unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
            }
        }
    }
}

/// Trigger state of a session. `Running` means the run trigger is disabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SinkEvent {
    Line(OutputLine),
    Cleared,
}
