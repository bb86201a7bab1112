use serde::{Deserialize, Serialize};

use crate::errors::AnalysisError;
use crate::models::{AnalysisResult, AnalysisStatus};

/// Fallback when a failed payload carries no `error` field
pub const UNKNOWN_ERROR: &str = "Erro desconhecido";

/// Body of `POST /api/analyze`
#[derive(Debug, Serialize)]
pub struct AnalyzeRequest<'a> {
    pub text: &'a str,
}

/// Body returned by `POST /api/analyze`, successful or not
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub categoria: Option<String>,
    #[serde(default)]
    pub resposta_sugerida: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub texto_processado: Option<String>,
    #[serde(default)]
    pub tamanho_original: Option<u64>,
}

impl AnalyzeResponse {
    pub fn status(&self) -> AnalysisStatus {
        if self.status == "success" { AnalysisStatus::Success } else { AnalysisStatus::Failure }
    }

    /// Convert into a result, mapping a non-success payload to
    /// [`AnalysisError::Application`].
    pub fn into_result(self) -> Result<AnalysisResult, AnalysisError> {
        if self.status() == AnalysisStatus::Failure {
            let message =
                self.error.filter(|e| !e.is_empty()).unwrap_or_else(|| UNKNOWN_ERROR.to_string());
            return Err(AnalysisError::Application(message));
        }

        let category_label = self.categoria.ok_or(AnalysisError::MissingField("categoria"))?;
        let suggested_reply =
            self.resposta_sugerida.ok_or(AnalysisError::MissingField("resposta_sugerida"))?;

        let mut result = AnalysisResult::success(category_label, suggested_reply);
        result.processed_text = self.texto_processado;
        result.original_length = self.tamanho_original;
        Ok(result)
    }
}
