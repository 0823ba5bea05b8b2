//! Reporting collected samples to the backend.

use serde::Serialize;

use crate::config::AgentConfig;

/// Error type for report delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    /// The request could not be sent or timed out.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend rejected the report.
    #[error("Backend rejected report with status {0}")]
    Rejected(reqwest::StatusCode),
}

/// Request body for `POST /api/v1/metrics`.
#[derive(Debug, Serialize)]
struct MetricsReport<'a> {
    cpu_usage: f64,
    memory_usage: f64,
    disk_usage: f64,
    version: &'static str,
    sitename: &'a str,
}

/// HTTP client that submits metric samples with bearer auth.
pub struct MetricsClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
    sitename: String,
}

impl MetricsClient {
    pub fn new(config: &AgentConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: format!("{}/api/v1/metrics", config.api_url.trim_end_matches('/')),
            token: config.token.clone(),
            sitename: config.sitename.clone(),
        }
    }

    /// Submit one sample. Usage values are percentages in [0, 100].
    pub async fn report(&self, cpu: f64, memory: f64, disk: f64) -> Result<(), SendError> {
        let body = MetricsReport {
            cpu_usage: cpu,
            memory_usage: memory,
            disk_usage: disk,
            version: env!("CARGO_PKG_VERSION"),
            sitename: &self.sitename,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SendError::Rejected(response.status()));
        }
        Ok(())
    }
}
