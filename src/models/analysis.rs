use serde::{Deserialize, Serialize};

/// Category label the backend uses for emails that need action.
pub const PRODUCTIVE_LABEL: &str = "Produtivo";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Productive,
    Unproductive,
}

impl Category {
    /// Anything other than the productive label counts as unproductive
    pub fn from_label(label: &str) -> Self {
        if label == PRODUCTIVE_LABEL { Self::Productive } else { Self::Unproductive }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisStatus {
    Success,
    Failure,
}

/// Outcome of one classification round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    pub status: AnalysisStatus,
    pub category: Category,
    /// Category exactly as the server spelled it
    pub category_label: String,
    pub suggested_reply: String,
    pub error_message: Option<String>,
    /// Normalised text the server classified, when reported
    pub processed_text: Option<String>,
    /// Length of the submitted text as counted by the server
    pub original_length: Option<u64>,
}

impl AnalysisResult {
    pub fn success(category_label: impl Into<String>, suggested_reply: impl Into<String>) -> Self {
        let category_label = category_label.into();
        Self {
            status: AnalysisStatus::Success,
            category: Category::from_label(&category_label),
            category_label,
            suggested_reply: suggested_reply.into(),
            error_message: None,
            processed_text: None,
            original_length: None,
        }
    }

    pub fn failure(error_message: Option<String>) -> Self {
        Self {
            status: AnalysisStatus::Failure,
            category: Category::Unproductive,
            category_label: String::new(),
            suggested_reply: String::new(),
            error_message,
            processed_text: None,
            original_length: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == AnalysisStatus::Success
    }
}
