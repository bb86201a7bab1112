use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::store::HistoryStore;
use crate::models::{AnalysisResult, HistoryEntry};

/// Maximum number of entries kept
pub const HISTORY_CAPACITY: usize = 10;
/// Characters of submitted text kept per entry
pub const PREVIEW_CHARS: usize = 100;

/// Keep the first [`PREVIEW_CHARS`] characters, marking the cut with `...`
pub fn truncate_preview(text: &str) -> String {
    let mut chars = text.chars();
    let preview: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() { format!("{}...", preview) } else { preview }
}

/// Newest-first, capped history backed by a [`HistoryStore`].
///
/// Storage failures never propagate: an unreadable store reads as empty and a failed
/// write leaves the in-memory list updated. Both are logged.
pub struct HistoryCache {
    store: Box<dyn HistoryStore>,
    entries: Vec<HistoryEntry>,
}

impl HistoryCache {
    pub fn new(store: Box<dyn HistoryStore>) -> Self {
        let entries = read_entries(store.as_ref());
        debug!(count = entries.len(), "history loaded");
        Self { store, entries }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Prepend an entry for a successful analysis and persist.
    pub fn record(&mut self, text: &str, result: &AnalysisResult, now: DateTime<Utc>) {
        let entry = HistoryEntry {
            text: truncate_preview(text),
            category: result.category_label.clone(),
            response: result.suggested_reply.clone(),
            timestamp: now,
        };

        // Re-read so entries written by another session are not clobbered. An empty or
        // unreadable store falls back to what this session already holds.
        let mut entries = match self.store.load() {
            Ok(Some(mut stored)) => {
                stored.truncate(HISTORY_CAPACITY);
                stored
            }
            Ok(None) => self.entries.clone(),
            Err(e) => {
                warn!("failed to reload history, keeping session copy: {e}");
                self.entries.clone()
            }
        };
        entries.insert(0, entry);
        entries.truncate(HISTORY_CAPACITY);

        if let Err(e) = self.store.save(&entries) {
            warn!("failed to save history: {e}");
        }
        self.entries = entries;
    }
}

fn read_entries(store: &dyn HistoryStore) -> Vec<HistoryEntry> {
    match store.load() {
        Ok(Some(mut entries)) => {
            entries.truncate(HISTORY_CAPACITY);
            entries
        }
        Ok(None) => Vec::new(),
        Err(e) => {
            warn!("failed to load history, starting empty: {e}");
            Vec::new()
        }
    }
}
