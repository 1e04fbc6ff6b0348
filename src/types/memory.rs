//! Memory entries
//!
//! Facts about the user, typed by hand or derived from conversations.

use serde::{Deserialize, Serialize};

/// A fact the companion should remember about the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryEntry {
    pub id: String,
    pub content: String,
    pub timestamp: i64,
    pub tags: Vec<String>,
    /// Derived from a conversation rather than typed by the user
    #[serde(rename = "isAIGenerated", default)]
    pub is_ai_generated: bool,
}

impl MemoryEntry {
    pub fn new(content: impl Into<String>, is_ai_generated: bool) -> Self {
        Self {
            id: super::new_id(),
            content: content.into(),
            timestamp: super::now_millis(),
            tags: Vec::new(),
            is_ai_generated,
        }
    }
}
