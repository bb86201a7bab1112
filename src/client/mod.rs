//! Client for the classification backend.
//!
//! [`Classifier`] is the seam the controller depends on; [`HttpClassifier`] is the real
//! implementation speaking JSON over HTTP.

pub mod http;
pub mod wire;

pub use http::{DEFAULT_BACKEND_URL, HealthStatus, HttpClassifier, spawn_health_probe};
pub use wire::{AnalyzeRequest, AnalyzeResponse};

use crate::errors::AnalysisError;
use crate::models::AnalysisResult;

/// Classifies one email text. Implementations perform exactly one request per call.
pub trait Classifier: Send + Sync {
    fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisError>;
}
