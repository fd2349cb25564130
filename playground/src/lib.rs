mod actors;
pub mod catalog;
mod client;
pub mod config;
pub mod error;
mod events;
pub mod remote;
mod session;
pub mod types;
pub mod wire;

#[cfg(test)]
mod testing;

// re-export the actor handles under the names of the components they drive.
pub use actors::monitor::HealthMonitorHandle as HealthMonitor;
pub use actors::sink::{OutputSinkHandle as OutputSink, PLACEHOLDER};
pub use client::{ExecutionClient, PendingJob};
pub use config::Config;
pub use events::{ExecutionResult, HealthStatus, RunState, SinkEvent};
pub use session::SessionController;
pub use types::{Example, Job, JobId, OutputLine, Severity};

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use std::time::Duration;

    fn config(server_url: String) -> Config {
        Config {
            server_url,
            health_timeout_ms: 2_000,
            execute_timeout_ms: Some(10_000),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn successful_run_ends_with_header_and_output() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/execute")
            .match_body(Matcher::Json(serde_json::json!({ "code": "H [] [0]" })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success":true,"output":"qubit 0 measured\n"}"#)
            .create_async()
            .await;
        let session = SessionController::spawn(&config(server.url())).unwrap();
        session.set_editor_text("H [] [0]");

        let result = session.run().await.unwrap();
        assert!(result.is_success());
        let lines = session.sink().snapshot().await;
        assert_eq!(
            lines[lines.len() - 2..],
            [
                OutputLine::success("=== Execution Result ==="),
                OutputLine::normal("qubit 0 measured"),
            ]
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn unreachable_service_reports_connection_error() {
        let session = SessionController::spawn(&config("http://127.0.0.1:1".into())).unwrap();
        let mut status = session.health().subscribe();
        session.set_editor_text("H [] [0]");

        let result = session.run().await.unwrap();
        assert!(matches!(result, ExecutionResult::TransportError { .. }));
        let lines = session.sink().snapshot().await;
        let tail = &lines[lines.len() - 3..];
        assert_eq!(tail[0], OutputLine::error("=== Connection Error ==="));
        assert_eq!(tail[1].severity, Severity::Error);
        assert!(tail[1].text.starts_with("Failed to connect to server: "));
        assert_eq!(
            tail[2],
            OutputLine::error("Make sure the execution server is running and reachable")
        );

        while *status.borrow_and_update() != HealthStatus::Offline {
            status.changed().await.unwrap();
        }
    }

    #[tokio::test]
    async fn application_error_is_shown_verbatim() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/execute")
            .with_status(200)
            .with_body(r#"{"success":false,"error":"syntax error at line 2"}"#)
            .create_async()
            .await;
        let session = SessionController::spawn(&config(server.url())).unwrap();
        session.set_editor_text("H [] [0]\n??");

        session.run().await.unwrap();
        let lines = session.sink().snapshot().await;
        assert_eq!(
            lines[lines.len() - 2..],
            [
                OutputLine::error("=== Execution Error ==="),
                OutputLine::error("syntax error at line 2"),
            ]
        );
        assert_eq!(session.health().status(), HealthStatus::Checking);
    }

    #[tokio::test]
    async fn periodic_health_reaches_online() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/health")
            .with_status(200)
            .create_async()
            .await;
        let session = SessionController::spawn(&config(server.url())).unwrap();
        let mut status = session.health().subscribe();

        session
            .health()
            .start_periodic(Duration::from_secs(30))
            .unwrap();
        while *status.borrow_and_update() != HealthStatus::Online {
            status.changed().await.unwrap();
        }
        session.health().stop();
    }
}
