use crate::events::HealthStatus;
use std::time::Duration;
use tokio::sync::oneshot;

#[derive(Debug)]
pub enum MonitorMessage {
    ProbeNow {
        response: oneshot::Sender<HealthStatus>,
    },
    StartPeriodic {
        interval: Duration,
    },
    Stop,
    ForceOffline,
}

/// Sent back to the actor by a probe task when its round trip ends.
#[derive(Debug)]
pub struct ProbeCompleted {
    pub seq: u64,
    pub status: HealthStatus,
    pub response: Option<oneshot::Sender<HealthStatus>>,
}
