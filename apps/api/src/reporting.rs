//! Error reporting. Every failed label request is reported exactly once.
//!
//! `AppState` holds an `Arc<dyn ErrorReporter>`, chosen at startup: the
//! `LogReporter` by default, or the `WebhookReporter` when `ERROR_REPORT_URL`
//! is set. Reporting never changes the HTTP response.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};
use uuid::Uuid;

const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Generation,
}

/// One failed request, as handed to a reporter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub id: Uuid,
    pub kind: ErrorKind,
    /// Full internal message; never sent back to the client.
    pub message: String,
    pub occurred_at: DateTime<Utc>,
}

impl ErrorReport {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            occurred_at: Utc::now(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Sink for failed-request reports. Implementations must not fail: delivery
/// problems are logged and swallowed.
#[async_trait]
pub trait ErrorReporter: Send + Sync {
    async fn report(&self, report: ErrorReport);
}

// ────────────────────────────────────────────────────────────────────────────
// LogReporter (default)
// ────────────────────────────────────────────────────────────────────────────

pub struct LogReporter;

#[async_trait]
impl ErrorReporter for LogReporter {
    async fn report(&self, report: ErrorReport) {
        error!(
            report_id = %report.id,
            kind = ?report.kind,
            occurred_at = %report.occurred_at,
            "Label request failed: {}",
            report.message
        );
    }
}

// ────────────────────────────────────────────────────────────────────────────
// WebhookReporter
// ────────────────────────────────────────────────────────────────────────────

/// POSTs each report as JSON to a fixed URL.
#[derive(Clone)]
pub struct WebhookReporter {
    client: Client,
    url: String,
}

impl WebhookReporter {
    pub fn new(url: impl Into<String>) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(WEBHOOK_TIMEOUT).build()?,
            url: url.into(),
        })
    }
}

#[async_trait]
impl ErrorReporter for WebhookReporter {
    async fn report(&self, report: ErrorReport) {
        let response = self.client.post(&self.url).json(&report).send().await;

        match response {
            Ok(r) if r.status().is_success() => {
                debug!(report_id = %report.id, "Error report delivered");
            }
            Ok(r) => {
                warn!(
                    report_id = %report.id,
                    status = r.status().as_u16(),
                    "Error report webhook rejected the report"
                );
            }
            Err(e) => {
                warn!(report_id = %report.id, "Error report delivery failed: {e}");
            }
        }
    }
}

/// Keeps every report in memory so tests can count them.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordingReporter {
    reports: std::sync::Mutex<Vec<ErrorReport>>,
}

#[cfg(test)]
impl RecordingReporter {
    pub(crate) fn reports(&self) -> Vec<ErrorReport> {
        self.reports.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl ErrorReporter for RecordingReporter {
    async fn report(&self, report: ErrorReport) {
        self.reports.lock().unwrap().push(report);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode, routing::post, Json, Router};

    use super::*;

    type Inbox = Arc<Mutex<Vec<ErrorReport>>>;

    async fn receive(State(inbox): State<Inbox>, Json(report): Json<ErrorReport>) -> StatusCode {
        inbox.lock().unwrap().push(report);
        StatusCode::NO_CONTENT
    }

    async fn spawn_webhook(status: StatusCode) -> (String, Inbox) {
        let inbox: Inbox = Arc::default();
        let app = if status.is_success() {
            Router::new()
                .route("/reports", post(receive))
                .with_state(inbox.clone())
        } else {
            Router::new().route("/reports", post(move || async move { status }))
        };

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}/reports"), inbox)
    }

    #[test]
    fn test_report_serializes_snake_case_kind() {
        let report = ErrorReport::new(ErrorKind::Generation, "boom");
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["kind"], "generation");
        assert_eq!(value["message"], "boom");
        assert!(value["id"].is_string());
        assert!(value["occurred_at"].is_string());
    }

    #[test]
    fn test_reports_get_unique_ids() {
        let a = ErrorReport::new(ErrorKind::Validation, "a");
        let b = ErrorReport::new(ErrorKind::Validation, "a");
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_log_reporter_does_not_panic() {
        LogReporter
            .report(ErrorReport::new(ErrorKind::Validation, "bad payload"))
            .await;
    }

    #[tokio::test]
    async fn test_recording_reporter_keeps_reports() {
        let reporter = RecordingReporter::default();
        reporter
            .report(ErrorReport::new(ErrorKind::Generation, "x"))
            .await;
        assert_eq!(reporter.reports().len(), 1);
    }

    #[tokio::test]
    async fn test_webhook_reporter_posts_json() {
        let (url, inbox) = spawn_webhook(StatusCode::NO_CONTENT).await;
        let reporter = WebhookReporter::new(url).unwrap();
        let report = ErrorReport::new(ErrorKind::Generation, "font missing");

        reporter.report(report.clone()).await;

        let received = inbox.lock().unwrap().clone();
        assert_eq!(received, vec![report]);
    }

    #[tokio::test]
    async fn test_webhook_reporter_tolerates_rejection() {
        let (url, _) = spawn_webhook(StatusCode::INTERNAL_SERVER_ERROR).await;
        let reporter = WebhookReporter::new(url).unwrap();
        reporter
            .report(ErrorReport::new(ErrorKind::Validation, "x"))
            .await;
    }

    #[tokio::test]
    async fn test_webhook_reporter_tolerates_unreachable_host() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let reporter = WebhookReporter::new(format!("http://{addr}/reports")).unwrap();
        reporter
            .report(ErrorReport::new(ErrorKind::Validation, "x"))
            .await;
    }
}
