mod actor;
mod messages;

use self::{actor::Actor, messages::MonitorMessage};
use crate::error::{self, Error};
use crate::events::HealthStatus;
use crate::remote::RemoteService;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};

/// Tracks whether the remote service is reachable.
///
/// This struct is an actor handle. Probes run as separate tasks and report back to the actor, which
/// tags every probe with a sequence number when it is issued and only applies a completion that is
/// newer than the last one applied. A probe that was overtaken by a later one is discarded, whichever
/// order the round trips finish in.
#[derive(Clone)]
pub struct HealthMonitorHandle {
    sender: mpsc::UnboundedSender<MonitorMessage>,
    status: watch::Receiver<HealthStatus>,
}

impl HealthMonitorHandle {
    pub fn spawn(service: Arc<dyn RemoteService>) -> Self {
        let (sender, inbox) = mpsc::unbounded_channel();
        let (status_tx, status) = watch::channel(HealthStatus::Checking);
        Actor::spawn(inbox, service, status_tx);
        Self { sender, status }
    }

    /// Probe now and wait for this probe's own outcome. Never fails: an unreachable service is `Offline`.
    pub async fn probe_once(&self) -> HealthStatus {
        let (tx, rx) = oneshot::channel();
        if self
            .sender
            .send(MonitorMessage::ProbeNow { response: tx })
            .is_err()
        {
            return HealthStatus::Offline;
        }
        rx.await.unwrap_or(HealthStatus::Offline)
    }

    /// Probe immediately, then every `interval`. Re-arming replaces the previous cadence.
    pub fn start_periodic(&self, interval: Duration) -> error::Result<()> {
        if interval.is_zero() {
            return Err(Error::ZeroInterval);
        }
        let _ = self.sender.send(MonitorMessage::StartPeriodic { interval });
        Ok(())
    }

    /// Cancel the timer. Probes still in flight finish but are ignored.
    pub fn stop(&self) {
        let _ = self.sender.send(MonitorMessage::Stop);
    }

    /// Mark the service offline right away, overriding any probe issued before this call.
    pub fn force_offline(&self) {
        let _ = self.sender.send(MonitorMessage::ForceOffline);
    }

    pub fn status(&self) -> HealthStatus {
        *self.status.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<HealthStatus> {
        self.status.clone()
    }
}
