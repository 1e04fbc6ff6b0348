//! Sectional store
//!
//! Typed per-section access over a [`KeyValueBackend`], plus whole-state
//! export, import and reset.

use chrono::Utc;
use serde_json::Value;

use super::backend::{FileBackend, KeyValueBackend, MemoryBackend};
use super::backup::{format_export_date, BackupDocument};
use super::sections::{
    AiProfileSection, BackupSection, GallerySection, JournalSection, MemorySection,
    MessagesSection, Section, SettingsSection, UserProfileSection, VoiceSettingsSection,
};
use super::{StorageError, StoreConfig};
use crate::types::{
    AIProfile, AppSettings, GalleryImage, JournalEntry, MemoryEntry, Message, UserProfile,
    VoiceSettings,
};

/// Members a backup treats as missing: `null`, `false`, zero and `""`
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Substitute the section default for an absent value
pub fn with_default<S: Section>(value: Option<S::Value>) -> S::Value {
    value.unwrap_or_else(S::default_value)
}

/// Application state store, one JSON document per section
#[derive(Debug, Clone)]
pub struct SectionalStore<B: KeyValueBackend> {
    backend: B,
}

impl SectionalStore<MemoryBackend> {
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }
}

impl SectionalStore<FileBackend> {
    /// Open the file-backed store in the configured data directory
    pub fn open(config: &StoreConfig) -> Result<Self, StorageError> {
        Ok(Self::new(FileBackend::open(&config.data_dir)?))
    }
}

impl<B: KeyValueBackend> SectionalStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Read a section without substituting defaults
    ///
    /// `Ok(None)` means the key is absent or holds empty text. Text that is
    /// present but does not parse as the section's shape is reported as
    /// [`StorageError::Corrupt`].
    pub fn read<S: Section>(&self) -> Result<Option<S::Value>, StorageError> {
        let raw = match self.backend.get_item(S::KEY)? {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(None),
        };

        match serde_json::from_str(&raw) {
            Ok(value) => {
                tracing::debug!("Loaded section {}", S::KEY);
                Ok(Some(value))
            }
            Err(source) => {
                tracing::warn!("Section {} holds unreadable data: {}", S::KEY, source);
                Err(StorageError::Corrupt {
                    key: S::KEY.to_string(),
                    source,
                })
            }
        }
    }

    /// Read a section, falling back to its default when absent
    pub fn get<S: Section>(&self) -> Result<S::Value, StorageError> {
        Ok(with_default::<S>(self.read::<S>()?))
    }

    /// Replace a section's value
    pub fn set<S: Section>(&mut self, value: &S::Value) -> Result<(), StorageError> {
        let json = serde_json::to_string(value)?;
        self.backend.set_item(S::KEY, &json)?;
        tracing::debug!("Saved section {}", S::KEY);
        Ok(())
    }

    /// Serialize every backup section into one pretty-printed document
    ///
    /// Sections are read one after another; the result is not a
    /// transactional snapshot.
    pub fn export_all(&self) -> Result<String, StorageError> {
        let document = BackupDocument {
            messages: self.get_messages()?,
            ai_profile: self.get_ai_profile()?,
            user_profile: self.get_user_profile()?,
            memory: self.get_memory()?,
            gallery: self.get_gallery()?,
            journal: self.get_journal()?,
            settings: self.get_settings()?,
            export_date: format_export_date(Utc::now()),
        };

        let json = serde_json::to_string_pretty(&document)?;
        tracing::info!(
            "Exported backup ({} messages, {} memories, {} images, {} journal entries)",
            document.messages.len(),
            document.memory.len(),
            document.gallery.len(),
            document.journal.len()
        );
        Ok(json)
    }

    /// Restore sections from a backup document
    ///
    /// Returns `false` without writing anything when `json` does not parse.
    /// Otherwise each known member that is present is written verbatim.
    /// Members that are missing, `null`, `false`, zero or `""` leave their
    /// section untouched; empty arrays and objects are written.
    /// Member shapes are NOT validated here: a malformed member is stored
    /// as-is and later reads of that section fail with
    /// [`StorageError::Corrupt`]. A backend failure part-way through returns
    /// `false` and keeps the sections already written.
    pub fn import_all(&mut self, json: &str) -> bool {
        let data: Value = match serde_json::from_str(json) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!("Error importing data: {}", e);
                return false;
            }
        };

        if data.is_null() {
            tracing::warn!("Error importing data: backup document is null");
            return false;
        }

        let mut imported = 0;
        for section in BackupSection::ALL {
            let Some(value) = data.get(section.field()) else {
                continue;
            };
            if is_falsy(value) {
                continue;
            }

            if let Err(e) = self.backend.set_item(section.key(), &value.to_string()) {
                tracing::warn!("Error importing data into {}: {}", section.key(), e);
                return false;
            }
            imported += 1;
        }

        tracing::info!("Imported {} sections from backup", imported);
        true
    }

    /// Remove every backup section's key
    pub fn clear_all(&mut self) -> Result<(), StorageError> {
        for section in BackupSection::ALL {
            self.backend.remove_item(section.key())?;
        }
        tracing::info!("Cleared all stored data");
        Ok(())
    }

    pub fn get_messages(&self) -> Result<Vec<Message>, StorageError> {
        self.get::<MessagesSection>()
    }

    pub fn save_messages(&mut self, messages: &[Message]) -> Result<(), StorageError> {
        self.set::<MessagesSection>(&messages.to_vec())
    }

    pub fn get_ai_profile(&self) -> Result<AIProfile, StorageError> {
        self.get::<AiProfileSection>()
    }

    pub fn save_ai_profile(&mut self, profile: &AIProfile) -> Result<(), StorageError> {
        self.set::<AiProfileSection>(profile)
    }

    pub fn get_user_profile(&self) -> Result<UserProfile, StorageError> {
        self.get::<UserProfileSection>()
    }

    pub fn save_user_profile(&mut self, profile: &UserProfile) -> Result<(), StorageError> {
        self.set::<UserProfileSection>(profile)
    }

    pub fn get_memory(&self) -> Result<Vec<MemoryEntry>, StorageError> {
        self.get::<MemorySection>()
    }

    pub fn save_memory(&mut self, memories: &[MemoryEntry]) -> Result<(), StorageError> {
        self.set::<MemorySection>(&memories.to_vec())
    }

    pub fn get_gallery(&self) -> Result<Vec<GalleryImage>, StorageError> {
        self.get::<GallerySection>()
    }

    pub fn save_gallery(&mut self, images: &[GalleryImage]) -> Result<(), StorageError> {
        self.set::<GallerySection>(&images.to_vec())
    }

    pub fn get_journal(&self) -> Result<Vec<JournalEntry>, StorageError> {
        self.get::<JournalSection>()
    }

    pub fn save_journal(&mut self, entries: &[JournalEntry]) -> Result<(), StorageError> {
        self.set::<JournalSection>(&entries.to_vec())
    }

    pub fn get_settings(&self) -> Result<AppSettings, StorageError> {
        self.get::<SettingsSection>()
    }

    pub fn save_settings(&mut self, settings: &AppSettings) -> Result<(), StorageError> {
        self.set::<SettingsSection>(settings)
    }

    pub fn get_voice_settings(&self) -> Result<VoiceSettings, StorageError> {
        self.get::<VoiceSettingsSection>()
    }

    pub fn save_voice_settings(&mut self, settings: &VoiceSettings) -> Result<(), StorageError> {
        self.set::<VoiceSettingsSection>(settings)
    }
}

impl Default for SectionalStore<MemoryBackend> {
    fn default() -> Self {
        Self::in_memory()
    }
}
