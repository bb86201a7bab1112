//! Error taxonomy for the analysis flow.
//!
//! Every message that reaches the screen is rendered from these `Display` impls, so the
//! user-facing strings live here and nowhere else.

use std::path::PathBuf;

use thiserror::Error;

/// Problems detected locally, before any request is made.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Por favor, insira algum texto para análise")]
    EmptyText,

    #[error("Por favor, selecione apenas arquivos .txt ou .pdf")]
    UnsupportedFileType { name: String, media_type: String },

    #[error("Erro ao ler o arquivo")]
    UnreadableFile {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Uma análise já está em andamento")]
    AnalysisInFlight,
}

/// Failures of the classification round trip.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Non-2xx HTTP status. `status_text` is empty for codes without a reason phrase.
    #[error("Erro {status}{}", reason_suffix(.status_text))]
    Status { status: u16, status_text: String },

    /// Connection, timeout or body decoding failure
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Payload `status` was not `"success"`
    #[error("{0}")]
    Application(String),

    #[error("Resposta inválida do servidor: campo '{0}' ausente")]
    MissingField(&'static str),

    /// The worker carrying the request went away without reporting back
    #[error("A requisição foi interrompida")]
    Interrupted,
}

fn reason_suffix(status_text: &str) -> String {
    if status_text.is_empty() { String::new() } else { format!(": {}", status_text) }
}

/// History persistence failures. Never shown to the user.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("stored history is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
