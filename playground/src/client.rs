use crate::actors::monitor::HealthMonitorHandle;
use crate::error::{SubmitError, TransportError};
use crate::events::ExecutionResult;
use crate::remote::RemoteService;
use crate::types::Job;
use crate::wire::ExecuteRequest;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Submits code to the remote service, one job at a time.
///
/// Cloning is cheap and every clone shares the same in-flight slot, so a second submission from any clone
/// is refused with `SubmitError::Busy` until the first job has been processed.
#[derive(Clone)]
pub struct ExecutionClient {
    service: Arc<dyn RemoteService>,
    health: HealthMonitorHandle,
    in_flight: Arc<AtomicBool>,
    timeout: Option<Duration>,
}

impl ExecutionClient {
    pub fn new(
        service: Arc<dyn RemoteService>,
        health: HealthMonitorHandle,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            service,
            health,
            in_flight: Arc::new(AtomicBool::new(false)),
            timeout,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Validate `source` and claim the in-flight slot without sending anything yet.
    pub fn begin(&self, source: &str) -> Result<PendingJob, SubmitError> {
        if source.trim().is_empty() {
            return Err(SubmitError::EmptySource);
        }
        let slot = InFlightSlot::acquire(&self.in_flight).ok_or(SubmitError::Busy)?;
        Ok(PendingJob {
            job: Job::new(source.to_string()),
            client: self.clone(),
            _slot: slot,
        })
    }

    pub async fn submit(&self, source: &str) -> Result<ExecutionResult, SubmitError> {
        Ok(self.begin(source)?.execute().await)
    }

    async fn round_trip(&self, request: &ExecuteRequest) -> Result<ExecutionResult, TransportError> {
        let response = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.service.execute(request))
                .await
                .map_err(|_| TransportError::TimedOut(limit))??,
            None => self.service.execute(request).await?,
        };
        Ok(response.into())
    }
}

/// A validated job holding the client's in-flight slot. Dropping it, executed or not, frees the slot.
pub struct PendingJob {
    job: Job,
    client: ExecutionClient,
    _slot: InFlightSlot,
}

impl PendingJob {
    pub fn job(&self) -> &Job {
        &self.job
    }

    pub async fn execute(self) -> ExecutionResult {
        self.send().await
    }

    /// Round trip without giving up the slot, for callers that must finish handling the result first.
    pub(crate) async fn send(&self) -> ExecutionResult {
        let job_id = self.job.id;
        info!(%job_id, len = self.job.source.len(), "submitting job");
        let request = ExecuteRequest {
            code: self.job.source.clone(),
        };
        match self.client.round_trip(&request).await {
            Ok(result) => {
                let elapsed = self.job.submitted_at.elapsed().unwrap_or_default();
                info!(%job_id, success = result.is_success(), ?elapsed, "job finished");
                result
            }
            Err(e) => {
                warn!(%job_id, error = %e, "could not reach execution service");
                self.client.health.force_offline();
                ExecutionResult::TransportError {
                    message: e.to_string(),
                }
            }
        }
    }
}

struct InFlightSlot(Arc<AtomicBool>);

impl InFlightSlot {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(Arc::clone(flag)))
    }
}

impl Drop for InFlightSlot {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
