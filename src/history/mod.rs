//! Local history of past analyses.
//!
//! Entries live under the [`HISTORY_KEY`] entry of a small JSON key-value file, newest
//! first and never more than [`HISTORY_CAPACITY`] long. Reads and writes go through the
//! [`HistoryStore`] trait so tests can substitute [`MemoryHistoryStore`].
//!
//! Storage location (default): platform data directory
//! - macOS: `~/Library/Application Support/email-classifier/storage.json`
//! - Linux: `~/.local/share/email-classifier/storage.json`
//! - Windows: `%APPDATA%\email-classifier\storage.json`

pub mod cache;
pub mod store;

pub use cache::{HISTORY_CAPACITY, HistoryCache, PREVIEW_CHARS, truncate_preview};
pub use store::{FileHistoryStore, HISTORY_KEY, HistoryStore, MemoryHistoryStore};
