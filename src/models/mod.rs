//! Data models for the analysis screen.
//!
//! - [`InputSource`] - the one active input (typed text or an uploaded file)
//! - [`AnalysisResult`] - category and suggested reply returned by the backend
//! - [`HistoryEntry`] - a persisted summary of a past analysis

pub mod analysis;
pub mod history;
pub mod input;

pub use analysis::{AnalysisResult, AnalysisStatus, Category, PRODUCTIVE_LABEL};
pub use history::HistoryEntry;
pub use input::{InputSource, MediaType, UploadedFile};
