//! A scripted `RemoteService` whose replies can be held back and released in any order.

use crate::error::TransportError;
use crate::remote::RemoteService;
use crate::wire::{ExecuteRequest, ExecuteResponse};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::{oneshot, Notify};

type Reply<T> = Result<T, String>;

pub struct Gate<T>(oneshot::Sender<Reply<T>>);

impl<T> Gate<T> {
    pub fn open(self, reply: Reply<T>) {
        let _ = self.0.send(reply);
    }
}

#[derive(Default)]
pub struct ScriptedService {
    health_replies: Mutex<VecDeque<oneshot::Receiver<Reply<()>>>>,
    execute_replies: Mutex<VecDeque<oneshot::Receiver<Reply<ExecuteResponse>>>>,
    requests: Mutex<Vec<String>>,
    health_calls: AtomicUsize,
    execute_calls: AtomicUsize,
    calls_changed: Notify,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next unscripted health call waits until the returned gate is opened.
    pub fn gate_health(&self) -> Gate<()> {
        let (tx, rx) = oneshot::channel();
        self.health_replies.lock().unwrap().push_back(rx);
        Gate(tx)
    }

    pub fn gate_execute(&self) -> Gate<ExecuteResponse> {
        let (tx, rx) = oneshot::channel();
        self.execute_replies.lock().unwrap().push_back(rx);
        Gate(tx)
    }

    pub fn reply_execute(&self, reply: Reply<ExecuteResponse>) {
        self.gate_execute().open(reply);
    }

    pub fn health_calls(&self) -> usize {
        self.health_calls.load(Ordering::SeqCst)
    }

    pub fn execute_calls(&self) -> usize {
        self.execute_calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub async fn wait_for_health_calls(&self, n: usize) {
        self.wait_until(|| self.health_calls() >= n).await
    }

    pub async fn wait_for_execute_calls(&self, n: usize) {
        self.wait_until(|| self.execute_calls() >= n).await
    }

    async fn wait_until(&self, done: impl Fn() -> bool) {
        loop {
            let changed = self.calls_changed.notified();
            if done() {
                return;
            }
            changed.await;
        }
    }

    fn bump(&self, counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::SeqCst);
        self.calls_changed.notify_waiters();
    }
}

async fn settle<T>(pending: Option<oneshot::Receiver<Reply<T>>>, default: T) -> Result<T, TransportError> {
    match pending {
        Some(rx) => rx
            .await
            .unwrap_or_else(|_| Err("gate dropped".to_string()))
            .map_err(TransportError::Unreachable),
        None => Ok(default),
    }
}

#[async_trait]
impl RemoteService for ScriptedService {
    async fn execute(&self, request: &ExecuteRequest) -> Result<ExecuteResponse, TransportError> {
        let pending = self.execute_replies.lock().unwrap().pop_front();
        self.requests.lock().unwrap().push(request.code.clone());
        self.bump(&self.execute_calls);
        let default = ExecuteResponse {
            success: true,
            ..Default::default()
        };
        settle(pending, default).await
    }

    async fn health(&self) -> Result<(), TransportError> {
        let pending = self.health_replies.lock().unwrap().pop_front();
        self.bump(&self.health_calls);
        settle(pending, ()).await
    }
}
