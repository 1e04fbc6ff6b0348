//! Shared type definitions
//!
//! This module contains the record types persisted in each store section.

pub mod config;
pub mod gallery;
pub mod journal;
pub mod memory;
pub mod message;
pub mod profile;

pub use config::{AppSettings, Theme, VoiceGender, VoiceSettings};
pub use gallery::{GalleryImage, ImageKind};
pub use journal::JournalEntry;
pub use memory::MemoryEntry;
pub use message::{Message, Role};
pub use profile::{AIProfile, UserProfile};

/// Which entries to keep when listing memory or journal records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OriginFilter {
    /// Every entry
    #[default]
    All,
    /// Entries written by the user
    User,
    /// Entries derived by the companion
    Ai,
}

impl OriginFilter {
    /// Whether an entry with the given origin flag passes the filter
    pub fn matches(self, is_ai_generated: bool) -> bool {
        match self {
            OriginFilter::All => true,
            OriginFilter::User => !is_ai_generated,
            OriginFilter::Ai => is_ai_generated,
        }
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Fresh opaque record id
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
