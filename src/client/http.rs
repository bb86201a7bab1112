use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, info, warn};

use super::Classifier;
use super::wire::{AnalyzeRequest, AnalyzeResponse};
use crate::errors::AnalysisError;
use crate::models::AnalysisResult;

/// Backend used when none is configured
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

const ANALYZE_PATH: &str = "/api/analyze";
const HEALTH_PATH: &str = "/health";
const REQUEST_TIMEOUT_SECS: u64 = 30;
const HEALTH_TIMEOUT_SECS: u64 = 5;

/// Result of the connectivity probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Unhealthy(u16),
    Unreachable(String),
}

/// Classification backend reached over HTTP with a blocking client.
#[derive(Debug, Clone)]
pub struct HttpClassifier {
    client: Client,
    base_url: String,
}

impl HttpClassifier {
    /// `base_url` is used as given, minus trailing slashes.
    pub fn new(base_url: &str) -> Result<Self, AnalysisError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(concat!("email-classifier/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_string() })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /health`. Never fails; problems are folded into the returned status.
    pub fn check_health(&self) -> HealthStatus {
        let response = self
            .client
            .get(self.endpoint(HEALTH_PATH))
            .timeout(Duration::from_secs(HEALTH_TIMEOUT_SECS))
            .send();

        match response {
            Ok(response) if response.status().is_success() => HealthStatus::Healthy,
            Ok(response) => HealthStatus::Unhealthy(response.status().as_u16()),
            Err(e) => HealthStatus::Unreachable(e.to_string()),
        }
    }
}

impl Classifier for HttpClassifier {
    fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisError> {
        let url = self.endpoint(ANALYZE_PATH);
        debug!(%url, chars = text.chars().count(), "sending analysis request");

        let response = self.client.post(&url).json(&AnalyzeRequest { text }).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let payload: AnalyzeResponse = response.json()?;
        payload.into_result()
    }
}

/// Probe the backend on a background thread. The outcome is only logged.
pub fn spawn_health_probe(classifier: HttpClassifier) -> thread::JoinHandle<HealthStatus> {
    thread::spawn(move || {
        let status = classifier.check_health();
        match &status {
            HealthStatus::Healthy => {
                info!(backend = classifier.base_url(), "backend connection established");
            }
            HealthStatus::Unhealthy(code) => {
                warn!(backend = classifier.base_url(), status = code, "backend may be offline");
            }
            HealthStatus::Unreachable(e) => {
                warn!(backend = classifier.base_url(), "could not reach backend: {e}");
            }
        }
        status
    })
}
