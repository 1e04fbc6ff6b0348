//! Backup document
//!
//! The single JSON object produced by export. On import every member is
//! optional and handled untyped, see [`SectionalStore::import_all`].
//!
//! [`SectionalStore::import_all`]: super::SectionalStore::import_all

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{
    AIProfile, AppSettings, GalleryImage, JournalEntry, MemoryEntry, Message, UserProfile,
};

/// Snapshot of every backup section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    pub messages: Vec<Message>,
    pub ai_profile: AIProfile,
    pub user_profile: UserProfile,
    pub memory: Vec<MemoryEntry>,
    pub gallery: Vec<GalleryImage>,
    pub journal: Vec<JournalEntry>,
    pub settings: AppSettings,
    /// ISO-8601 time the snapshot was taken
    pub export_date: String,
}

/// ISO-8601 UTC timestamp with millisecond precision, `Z` suffixed
pub fn format_export_date(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Suggested file name for a backup taken at `at`
pub fn backup_file_name(at: DateTime<Utc>) -> String {
    format!("ai-companion-backup-{}.json", at.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_export_date_format() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(format_export_date(at), "2024-03-09T14:05:07.000Z");
    }

    #[test]
    fn test_backup_file_name() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(backup_file_name(at), "ai-companion-backup-1700000000123.json");
    }
}
