use std::{io, result, time::Duration};
use thiserror::Error;

/// Reasons a job is refused before anything is sent.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitError {
    #[error("No code to execute")]
    EmptySource,
    #[error("A program is already running")]
    Busy,
}

/// Failure to reach or talk to the remote service.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("no response within {0:?}")]
    TimedOut(Duration),
    #[error("{0}")]
    Unreachable(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid server url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("failed to build http client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("health check interval must be greater than zero")]
    ZeroInterval,
}

pub type Result<T> = result::Result<T, Error>;
