use super::messages::{MonitorMessage, ProbeCompleted};
use crate::events::HealthStatus;
use crate::remote::RemoteService;

use futures::future::FutureExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::{
    select,
    sync::{mpsc, oneshot, watch},
    time::{self, Interval, MissedTickBehavior},
};
use tracing::{debug, trace};

pub struct Actor {
    inbox: mpsc::UnboundedReceiver<MonitorMessage>,
    completions_tx: mpsc::UnboundedSender<ProbeCompleted>,
    completions_rx: mpsc::UnboundedReceiver<ProbeCompleted>,
    service: Arc<dyn RemoteService>,
    status_tx: watch::Sender<HealthStatus>,
    ticker: Option<Interval>,
    /// Sequence number of the most recently issued probe or forced write.
    issued: u64,
    /// Completions at or below this sequence number are stale.
    applied: u64,
    /// Last status taken from a completed probe or a forced write.
    settled: Option<HealthStatus>,
    stopped: bool,
}

impl Actor {
    pub fn spawn(
        inbox: mpsc::UnboundedReceiver<MonitorMessage>,
        service: Arc<dyn RemoteService>,
        status_tx: watch::Sender<HealthStatus>,
    ) {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let actor = Self {
            inbox,
            completions_tx,
            completions_rx,
            service,
            status_tx,
            ticker: None,
            issued: 0,
            applied: 0,
            settled: None,
            stopped: false,
        };
        tokio::spawn(async move { actor.run().await });
    }

    async fn run(mut self) {
        use MonitorMessage::*;
        loop {
            select! {
                // handle messages first so a stop or forced write sent before a completion wins
                biased;
                maybe_msg = self.inbox.recv() => {
                    match maybe_msg {
                        Some(ProbeNow { response }) => self.issue_probe(Some(response)),
                        Some(StartPeriodic { interval }) => self.start_periodic(interval),
                        Some(Stop) => self.stop(),
                        Some(ForceOffline) => self.force_offline(),
                        None => {
                            trace!("health monitor handles dropped, exiting");
                            return;
                        }
                    }
                }
                Some(completed) = self.completions_rx.recv() => {
                    self.complete(completed);
                }
                _ = next_tick(&mut self.ticker) => {
                    self.issue_probe(None);
                }
            }
        }
    }

    fn issue_probe(&mut self, response: Option<oneshot::Sender<HealthStatus>>) {
        self.issued += 1;
        let seq = self.issued;
        if !self.stopped {
            self.publish(HealthStatus::Checking);
        }
        debug!(seq, "issuing health probe");

        let service = Arc::clone(&self.service);
        let completions_tx = self.completions_tx.clone();
        tokio::spawn(async move {
            let status = service
                .health()
                .map(|outcome| match outcome {
                    Ok(()) => HealthStatus::Online,
                    Err(e) => {
                        debug!(seq, error = %e, "health probe failed");
                        HealthStatus::Offline
                    }
                })
                .await;
            let _ = completions_tx.send(ProbeCompleted {
                seq,
                status,
                response,
            });
        });
    }

    fn complete(&mut self, completed: ProbeCompleted) {
        let ProbeCompleted {
            seq,
            status,
            response,
        } = completed;
        if !self.stopped && seq > self.applied {
            self.applied = seq;
            debug!(seq, %status, "applying health probe result");
            self.settle(status);
        } else {
            debug!(seq, applied = self.applied, "discarding stale health probe result");
        }
        if let Some(response) = response {
            let _ = response.send(status);
        }
    }

    fn start_periodic(&mut self, period: Duration) {
        let mut ticker = time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.ticker = Some(ticker);
        self.stopped = false;
        debug!(?period, "periodic health checks armed");
    }

    fn stop(&mut self) {
        self.ticker = None;
        self.stopped = true;
        // anything still in flight is now stale
        self.applied = self.issued;
        // do not leave a discarded probe showing as checking
        if let Some(status) = self.settled {
            self.publish(status);
        }
        debug!("periodic health checks stopped");
    }

    fn force_offline(&mut self) {
        if self.stopped {
            return;
        }
        self.issued += 1;
        self.applied = self.issued;
        debug!(seq = self.applied, "forcing health status offline");
        self.settle(HealthStatus::Offline);
    }

    fn settle(&mut self, status: HealthStatus) {
        self.settled = Some(status);
        self.publish(status);
    }

    fn publish(&self, status: HealthStatus) {
        self.status_tx.send_if_modified(|current| {
            let changed = *current != status;
            *current = status;
            changed
        });
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}
