use crate::actors::{monitor::HealthMonitorHandle, sink::OutputSinkHandle};
use crate::catalog;
use crate::client::ExecutionClient;
use crate::config::Config;
use crate::error::{self, SubmitError};
use crate::events::{ExecutionResult, RunState};
use crate::remote::{HttpService, RemoteService};
use crate::types::{Example, OutputLine, Severity};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;
use tracing::debug;

pub const EXECUTING: &str = "Executing code...";
pub const RESULT_HEADER: &str = "=== Execution Result ===";
pub const NO_OUTPUT: &str = "Program executed successfully (no output)";
pub const ERROR_HEADER: &str = "=== Execution Error ===";
pub const CONNECTION_HEADER: &str = "=== Connection Error ===";
pub const CONNECTION_HINT: &str = "Make sure the execution server is running and reachable";

const RUN_STATE_CAPACITY: usize = 64;

/// Drives user actions (run, clear, load example) and owns the run trigger state.
#[derive(Clone)]
pub struct SessionController {
    client: ExecutionClient,
    sink: OutputSinkHandle,
    health: HealthMonitorHandle,
    editor: Arc<Mutex<String>>,
    /// Runs in progress. Trigger transitions are sent while this is locked so they match the count.
    runs: Arc<Mutex<usize>>,
    run_state: broadcast::Sender<RunState>,
}

impl SessionController {
    pub fn new(client: ExecutionClient, sink: OutputSinkHandle, health: HealthMonitorHandle) -> Self {
        let (run_state, _) = broadcast::channel(RUN_STATE_CAPACITY);
        Self {
            client,
            sink,
            health,
            editor: Arc::new(Mutex::new(String::new())),
            runs: Arc::new(Mutex::new(0)),
            run_state,
        }
    }

    /// Wire a session to the HTTP service described by `config`. Periodic health checks are not started.
    pub fn spawn(config: &Config) -> error::Result<Self> {
        let service: Arc<dyn RemoteService> = Arc::new(HttpService::from_config(config)?);
        Ok(Self::with_service(service, config))
    }

    pub fn with_service(service: Arc<dyn RemoteService>, config: &Config) -> Self {
        let health = HealthMonitorHandle::spawn(Arc::clone(&service));
        let client = ExecutionClient::new(service, health.clone(), config.execute_timeout());
        Self::new(client, OutputSinkHandle::spawn(), health)
    }

    pub fn sink(&self) -> &OutputSinkHandle {
        &self.sink
    }

    pub fn health(&self) -> &HealthMonitorHandle {
        &self.health
    }

    pub fn editor_text(&self) -> String {
        self.editor().clone()
    }

    pub fn set_editor_text(&self, text: impl Into<String>) {
        *self.editor() = text.into();
    }

    pub fn append_editor_line(&self, line: &str) {
        let mut editor = self.editor();
        if !editor.is_empty() {
            editor.push('\n');
        }
        editor.push_str(line);
    }

    pub fn clear_editor(&self) {
        self.editor().clear();
    }

    /// Load a catalog entry into the editor. Unknown keys are ignored.
    pub fn load_example(&self, key: &str) -> Option<&'static Example> {
        let Some(example) = catalog::find(key) else {
            debug!(key, "ignoring unknown example");
            return None;
        };
        self.set_editor_text(example.code);
        self.sink.clear();
        self.sink
            .append(OutputLine::info(format!("Loaded example: {}", example.display_name)));
        Some(example)
    }

    pub fn run_state(&self) -> RunState {
        if *self.runs() == 0 {
            RunState::Idle
        } else {
            RunState::Running
        }
    }

    /// Every trigger transition, in order.
    pub fn subscribe(&self) -> broadcast::Receiver<RunState> {
        self.run_state.subscribe()
    }

    /// Run the editor contents and write the outcome to the sink.
    ///
    /// The trigger is disabled for the whole call and re-enabled exactly once when it returns, unwinds,
    /// or is cancelled. Refused submissions write a single error line and leave earlier output alone.
    pub async fn run(&self) -> Result<ExecutionResult, SubmitError> {
        let _trigger = TriggerGuard::disable(self);
        let source = self.editor_text();

        let pending = match self.client.begin(&source) {
            Ok(pending) => pending,
            Err(e) => {
                self.sink.append(OutputLine::error(format!("Error: {}", e)));
                return Err(e);
            }
        };

        debug!(job_id = %pending.job().id, "job accepted");
        self.sink.clear();
        self.sink.append(OutputLine::info(EXECUTING));
        let result = pending.send().await;
        self.write_result(&result);
        drop(pending);
        Ok(result)
    }

    fn write_result(&self, result: &ExecutionResult) {
        match result {
            ExecutionResult::Success { output } => {
                self.sink.append(OutputLine::success(RESULT_HEADER));
                match output {
                    Some(text) => self.sink.append_text(text, Severity::Normal),
                    None => self.sink.append(OutputLine::success(NO_OUTPUT)),
                }
            }
            ExecutionResult::ApplicationError { message } => {
                self.sink.append(OutputLine::error(ERROR_HEADER));
                self.sink.append(OutputLine::error(message.clone()));
            }
            ExecutionResult::TransportError { message } => {
                self.sink.append(OutputLine::error(CONNECTION_HEADER));
                self.sink.append(OutputLine::error(format!(
                    "Failed to connect to server: {}",
                    message
                )));
                self.sink.append(OutputLine::error(CONNECTION_HINT));
            }
        }
    }

    fn editor(&self) -> MutexGuard<'_, String> {
        self.editor.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn runs(&self) -> MutexGuard<'_, usize> {
        self.runs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn transition(&self, state: RunState) {
        debug!(?state, "run trigger");
        // no receivers is fine
        let _ = self.run_state.send(state);
    }
}

/// Holds the trigger disabled; the last guard dropped re-enables it.
struct TriggerGuard<'a> {
    session: &'a SessionController,
}

impl<'a> TriggerGuard<'a> {
    fn disable(session: &'a SessionController) -> Self {
        let mut runs = session.runs();
        *runs += 1;
        session.transition(RunState::Running);
        drop(runs);
        Self { session }
    }
}

impl Drop for TriggerGuard<'_> {
    fn drop(&mut self) {
        let mut runs = self.session.runs();
        *runs -= 1;
        if *runs == 0 {
            self.session.transition(RunState::Idle);
        }
    }
}
