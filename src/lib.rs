//! Email Classifier - terminal client for an email classification service
//!
//! Text typed or pasted into the editor, or read from a dropped `.txt`/`.pdf` file, is
//! sent to a backend that labels it productive or unproductive and drafts a reply. The
//! last ten analyses are kept in a local history.
//!
//! - [`controller`]: the screen state machine, independent of any terminal
//! - [`client`]: the HTTP backend behind the [`Classifier`] trait
//! - [`history`]: capped, newest-first persistence of past analyses
//! - [`input`]: file validation and loading
//! - [`tui`]: the `ratatui` front end
//!
//! # Example
//!
//! ```no_run
//! use email_classifier::{AnalysisController, HistoryCache, HttpClassifier, MemoryClipboard};
//! use email_classifier::{MemoryHistoryStore, TextEdit};
//!
//! let classifier = HttpClassifier::new("http://localhost:5000")?;
//! let history = HistoryCache::new(Box::new(MemoryHistoryStore::new()));
//! let mut controller = AnalysisController::new(history, Box::new(MemoryClipboard::new()));
//!
//! controller.edit_text(TextEdit::Replace("Could you check invoice 42?".to_string()));
//! controller.analyze_with(&classifier)?;
//! if let Some(view) = controller.result_view() {
//!     println!("{}: {}", view.label, view.reply);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod client;
pub mod clipboard;
pub mod controller;
pub mod errors;
pub mod history;
pub mod input;
pub mod models;
pub mod tui;
pub mod utils;

// Re-export commonly used types
pub use client::{Classifier, HttpClassifier};
pub use clipboard::{ClipboardWriter, MemoryClipboard, SystemClipboard};
pub use controller::{AnalysisController, Screen, TextEdit};
pub use errors::{AnalysisError, StorageError, ValidationError};
pub use history::{FileHistoryStore, HistoryCache, HistoryStore, MemoryHistoryStore};
pub use input::load_file;
pub use models::{AnalysisResult, Category, HistoryEntry, InputSource, UploadedFile};
