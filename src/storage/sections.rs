//! Section definitions
//!
//! Each section names one storage key, the record type stored under it and
//! the value a read yields when the key is absent.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::types::{
    AIProfile, AppSettings, GalleryImage, JournalEntry, MemoryEntry, Message, UserProfile,
    VoiceSettings,
};

/// A named, independently stored slice of application state
pub trait Section {
    /// Storage key, stable across releases
    const KEY: &'static str;

    type Value: Serialize + DeserializeOwned;

    /// Value returned when the key is absent
    fn default_value() -> Self::Value;
}

macro_rules! section {
    ($(#[$meta:meta])* $name:ident, $key:literal, $value:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name;

        impl Section for $name {
            const KEY: &'static str = $key;
            type Value = $value;

            fn default_value() -> Self::Value {
                <$value>::default()
            }
        }
    };
}

section!(
    /// Chat history, oldest first
    MessagesSection,
    "ai_companion_messages",
    Vec<Message>
);
section!(AiProfileSection, "ai_companion_profile", AIProfile);
section!(UserProfileSection, "ai_companion_user", UserProfile);
section!(MemorySection, "ai_companion_memory", Vec<MemoryEntry>);
section!(GallerySection, "ai_companion_gallery", Vec<GalleryImage>);
section!(
    /// Journal entries, newest first
    JournalSection,
    "ai_companion_journal",
    Vec<JournalEntry>
);
section!(SettingsSection, "ai_companion_settings", AppSettings);
section!(
    /// Speech preferences. Not part of the backup document.
    VoiceSettingsSection,
    "voice_settings",
    VoiceSettings
);

/// The sections carried by a backup document, in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackupSection {
    Messages,
    AiProfile,
    UserProfile,
    Memory,
    Gallery,
    Journal,
    Settings,
}

impl BackupSection {
    pub const ALL: [BackupSection; 7] = [
        BackupSection::Messages,
        BackupSection::AiProfile,
        BackupSection::UserProfile,
        BackupSection::Memory,
        BackupSection::Gallery,
        BackupSection::Journal,
        BackupSection::Settings,
    ];

    /// Storage key of the section
    pub fn key(self) -> &'static str {
        match self {
            BackupSection::Messages => MessagesSection::KEY,
            BackupSection::AiProfile => AiProfileSection::KEY,
            BackupSection::UserProfile => UserProfileSection::KEY,
            BackupSection::Memory => MemorySection::KEY,
            BackupSection::Gallery => GallerySection::KEY,
            BackupSection::Journal => JournalSection::KEY,
            BackupSection::Settings => SettingsSection::KEY,
        }
    }

    /// Member name in the backup document
    pub fn field(self) -> &'static str {
        match self {
            BackupSection::Messages => "messages",
            BackupSection::AiProfile => "aiProfile",
            BackupSection::UserProfile => "userProfile",
            BackupSection::Memory => "memory",
            BackupSection::Gallery => "gallery",
            BackupSection::Journal => "journal",
            BackupSection::Settings => "settings",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_distinct() {
        let mut keys: HashSet<&str> = BackupSection::ALL.iter().map(|s| s.key()).collect();
        assert_eq!(keys.len(), 7);
        assert!(keys.insert(VoiceSettingsSection::KEY));
    }

    #[test]
    fn test_collection_defaults_are_empty() {
        assert!(MessagesSection::default_value().is_empty());
        assert!(MemorySection::default_value().is_empty());
        assert!(GallerySection::default_value().is_empty());
        assert!(JournalSection::default_value().is_empty());
    }

    #[test]
    fn test_backup_field_names() {
        let fields: Vec<&str> = BackupSection::ALL.iter().map(|s| s.field()).collect();
        assert_eq!(
            fields,
            vec!["messages", "aiProfile", "userProfile", "memory", "gallery", "journal", "settings"]
        );
    }
}
