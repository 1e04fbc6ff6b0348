//! Journal entries

use serde::{Deserialize, Serialize};

/// A dated journal entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    /// Calendar day the entry belongs to, `YYYY-MM-DD`
    pub date: String,
    pub content: String,
    pub timestamp: i64,
    #[serde(rename = "isAIGenerated", default)]
    pub is_ai_generated: bool,
}

impl JournalEntry {
    /// Entry for an explicit calendar day
    pub fn new(date: impl Into<String>, content: impl Into<String>, is_ai_generated: bool) -> Self {
        Self {
            id: super::new_id(),
            date: date.into(),
            content: content.into(),
            timestamp: super::now_millis(),
            is_ai_generated,
        }
    }

    /// Entry dated today (UTC)
    pub fn today(content: impl Into<String>, is_ai_generated: bool) -> Self {
        let date = chrono::Utc::now().format("%Y-%m-%d").to_string();
        Self::new(date, content, is_ai_generated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_today_date_format() {
        let entry = JournalEntry::today("Quiet evening", false);
        assert_eq!(entry.date.len(), 10);
        assert!(chrono::NaiveDate::parse_from_str(&entry.date, "%Y-%m-%d").is_ok());
    }
}
