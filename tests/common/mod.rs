//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{TimeZone, Utc};
use email_classifier::{AnalysisError, AnalysisResult, Classifier, HistoryEntry};
use serde_json::json;
use tempfile::TempDir;

/// Classifier returning a canned outcome, recording what it was sent
pub struct FakeClassifier {
    reply: fn() -> Result<AnalysisResult, AnalysisError>,
    calls: AtomicUsize,
    last_text: Mutex<Option<String>>,
}

impl FakeClassifier {
    pub fn new(reply: fn() -> Result<AnalysisResult, AnalysisError>) -> Self {
        Self { reply, calls: AtomicUsize::new(0), last_text: Mutex::new(None) }
    }

    pub fn productive() -> Self {
        Self::new(|| Ok(AnalysisResult::success("Produtivo", "We will address this shortly.")))
    }

    pub fn unproductive() -> Self {
        Self::new(|| Ok(AnalysisResult::success("Improdutivo", "Obrigado pela mensagem!")))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_text(&self) -> Option<String> {
        self.last_text.lock().unwrap().clone()
    }
}

impl Classifier for FakeClassifier {
    fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_text.lock().unwrap() = Some(text.to_string());
        (self.reply)()
    }
}

/// Temp directory holding a storage file and input files
pub struct Workspace {
    temp_dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self { temp_dir: TempDir::new().expect("Failed to create temp dir") }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn storage_path(&self) -> PathBuf {
        self.temp_dir.path().join("storage.json")
    }

    /// Write a file into the workspace and return its path
    pub fn write_file(&self, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Seed the storage file with history entries under the history key
    pub fn with_history(self, entries: &[HistoryEntry]) -> Self {
        let object = json!({ "emailClassifierHistory": entries });
        fs::write(self.storage_path(), serde_json::to_string(&object).unwrap())
            .expect("Failed to write storage file");
        self
    }

    pub fn read_storage(&self) -> serde_json::Value {
        let raw = fs::read_to_string(self.storage_path()).expect("Failed to read storage file");
        serde_json::from_str(&raw).expect("Storage file is not valid JSON")
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

/// History entry with a fixed timestamp `secs` after the epoch
pub fn history_entry(text: &str, category: &str, secs: i64) -> HistoryEntry {
    HistoryEntry {
        text: text.to_string(),
        category: category.to_string(),
        response: format!("Resposta para {}", text),
        timestamp: Utc.timestamp_opt(secs, 0).unwrap(),
    }
}

/// Successful `/api/analyze` body
pub fn success_body(categoria: &str, resposta: &str) -> String {
    json!({
        "status": "success",
        "categoria": categoria,
        "resposta_sugerida": resposta,
    })
    .to_string()
}
