//! Key-value persistence for the history list

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::errors::StorageError;
use crate::models::HistoryEntry;

/// Key the history array is stored under
pub const HISTORY_KEY: &str = "emailClassifierHistory";

/// Backing store for the history list.
pub trait HistoryStore {
    /// Stored entries, or `None` when nothing has been saved yet
    fn load(&self) -> Result<Option<Vec<HistoryEntry>>, StorageError>;

    /// Replace the stored entries
    fn save(&mut self, entries: &[HistoryEntry]) -> Result<(), StorageError>;
}

/// JSON object file holding one key per persisted value.
///
/// Other keys in the file are preserved on save. Writes are atomic (temp file + rename).
pub struct FileHistoryStore {
    path: PathBuf,
}

impl FileHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_object(&self) -> Result<Option<Map<String, Value>>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&self.path)
            .map_err(|source| StorageError::Read { path: self.path.clone(), source })?;
        if raw.trim().is_empty() {
            return Ok(None);
        }

        match serde_json::from_str::<Value>(&raw)? {
            Value::Object(map) => Ok(Some(map)),
            _ => Err(StorageError::Unavailable(format!(
                "{} does not contain a JSON object",
                self.path.display()
            ))),
        }
    }
}

impl HistoryStore for FileHistoryStore {
    fn load(&self) -> Result<Option<Vec<HistoryEntry>>, StorageError> {
        let Some(mut object) = self.read_object()? else {
            return Ok(None);
        };

        match object.remove(HISTORY_KEY) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
        }
    }

    fn save(&mut self, entries: &[HistoryEntry]) -> Result<(), StorageError> {
        // A corrupt file is replaced rather than blocking every future save
        let mut object = self.read_object().ok().flatten().unwrap_or_default();
        object.insert(HISTORY_KEY.to_string(), serde_json::to_value(entries)?);

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .map_err(|source| StorageError::Write { path: parent.to_path_buf(), source })?;
        }

        let json = serde_json::to_string_pretty(&Value::Object(object))?;
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, json)
            .map_err(|source| StorageError::Write { path: temp_path.clone(), source })?;
        fs::rename(&temp_path, &self.path)
            .map_err(|source| StorageError::Write { path: self.path.clone(), source })?;

        Ok(())
    }
}

/// In-memory store holding the raw serialized value, for tests and headless use.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    raw: Option<String>,
    fail_writes: bool,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an arbitrary serialized value (possibly invalid JSON)
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self { raw: Some(raw.into()), fail_writes: false }
    }

    /// Every save fails with [`StorageError::Unavailable`]
    pub fn failing_writes() -> Self {
        Self { raw: None, fail_writes: true }
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn load(&self) -> Result<Option<Vec<HistoryEntry>>, StorageError> {
        match &self.raw {
            None => Ok(None),
            Some(raw) => Ok(serde_json::from_str(raw)?),
        }
    }

    fn save(&mut self, entries: &[HistoryEntry]) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Unavailable("writes disabled".to_string()));
        }
        self.raw = Some(serde_json::to_string(entries)?);
        Ok(())
    }
}
