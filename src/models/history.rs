use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One past analysis as persisted in the local store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// First 100 characters of the submitted text, `...` appended when cut
    pub text: String,
    /// Category label as returned by the server
    pub category: String,
    /// Suggested reply
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_history_entry_field_names() {
        let entry = HistoryEntry {
            text: "Hello".to_string(),
            category: "Produtivo".to_string(),
            response: "Thanks".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["text"], "Hello");
        assert_eq!(json["category"], "Produtivo");
        assert_eq!(json["response"], "Thanks");
        assert_eq!(json["timestamp"], "2024-01-15T10:30:00Z");
    }

    #[test]
    fn test_history_entry_parses_browser_timestamps() {
        let json = r#"{"text":"a","category":"Improdutivo","response":"b","timestamp":"2024-01-15T10:30:00.123Z"}"#;
        let entry: HistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.timestamp.timestamp(), 1705314600);
    }
}
