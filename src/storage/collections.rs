//! Collection helpers
//!
//! Edits the app screens make to collection sections. Every helper reads the
//! whole section, changes it in memory and writes the whole section back.

use std::collections::BTreeMap;

use super::backend::KeyValueBackend;
use super::store::SectionalStore;
use super::StorageError;
use crate::types::{GalleryImage, ImageKind, JournalEntry, MemoryEntry, Message, OriginFilter, Role};

impl<B: KeyValueBackend> SectionalStore<B> {
    pub fn append_message(&mut self, message: Message) -> Result<(), StorageError> {
        let mut messages = self.get_messages()?;
        messages.push(message);
        self.save_messages(&messages)
    }

    /// Replace a message's content and drop everything after it
    ///
    /// Returns `false` if no message has `id`.
    pub fn edit_message(&mut self, id: &str, content: &str) -> Result<bool, StorageError> {
        let mut messages = self.get_messages()?;
        let Some(index) = messages.iter().position(|m| m.id == id) else {
            return Ok(false);
        };

        messages[index].content = content.to_string();
        messages.truncate(index + 1);
        self.save_messages(&messages)?;
        Ok(true)
    }

    /// Delete a message together with every later message
    pub fn delete_message(&mut self, id: &str) -> Result<bool, StorageError> {
        let mut messages = self.get_messages()?;
        let Some(index) = messages.iter().position(|m| m.id == id) else {
            return Ok(false);
        };

        messages.truncate(index);
        self.save_messages(&messages)?;
        Ok(true)
    }

    /// Rewind the conversation so a reply can be regenerated
    ///
    /// Drops the message `id` and everything after it, and returns the user
    /// message that prompted it. Nothing changes when `id` is unknown, is
    /// the first message, or does not follow a user message.
    pub fn rewind_for_reroll(&mut self, id: &str) -> Result<Option<Message>, StorageError> {
        let mut messages = self.get_messages()?;
        let index = match messages.iter().position(|m| m.id == id) {
            Some(index) if index > 0 => index,
            _ => return Ok(None),
        };

        let prompt = messages[index - 1].clone();
        if prompt.role != Role::User {
            return Ok(None);
        }

        messages.truncate(index);
        self.save_messages(&messages)?;
        Ok(Some(prompt))
    }

    pub fn clear_messages(&mut self) -> Result<(), StorageError> {
        self.save_messages(&[])
    }

    pub fn add_memory(&mut self, entry: MemoryEntry) -> Result<(), StorageError> {
        let mut memories = self.get_memory()?;
        memories.push(entry);
        self.save_memory(&memories)
    }

    pub fn update_memory(&mut self, id: &str, content: &str) -> Result<bool, StorageError> {
        let mut memories = self.get_memory()?;
        let Some(entry) = memories.iter_mut().find(|m| m.id == id) else {
            return Ok(false);
        };

        entry.content = content.to_string();
        self.save_memory(&memories)?;
        Ok(true)
    }

    pub fn remove_memory(&mut self, id: &str) -> Result<bool, StorageError> {
        let mut memories = self.get_memory()?;
        let before = memories.len();
        memories.retain(|m| m.id != id);
        if memories.len() == before {
            return Ok(false);
        }
        self.save_memory(&memories)?;
        Ok(true)
    }

    pub fn memories_by_origin(&self, filter: OriginFilter) -> Result<Vec<MemoryEntry>, StorageError> {
        Ok(self
            .get_memory()?
            .into_iter()
            .filter(|m| filter.matches(m.is_ai_generated))
            .collect())
    }

    /// Add a journal entry, keeping the section newest first
    pub fn add_journal_entry(&mut self, entry: JournalEntry) -> Result<(), StorageError> {
        let mut entries = self.get_journal()?;
        entries.push(entry);
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        self.save_journal(&entries)
    }

    pub fn remove_journal_entry(&mut self, id: &str) -> Result<bool, StorageError> {
        let mut entries = self.get_journal()?;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Ok(false);
        }
        self.save_journal(&entries)?;
        Ok(true)
    }

    pub fn journal_by_origin(&self, filter: OriginFilter) -> Result<Vec<JournalEntry>, StorageError> {
        Ok(self
            .get_journal()?
            .into_iter()
            .filter(|e| filter.matches(e.is_ai_generated))
            .collect())
    }

    /// Journal entries grouped by calendar day, newest day first
    ///
    /// Entries within a day keep their stored order.
    pub fn journal_grouped_by_date(
        &self,
        filter: OriginFilter,
    ) -> Result<Vec<(String, Vec<JournalEntry>)>, StorageError> {
        let mut grouped: BTreeMap<String, Vec<JournalEntry>> = BTreeMap::new();
        for entry in self.journal_by_origin(filter)? {
            grouped.entry(entry.date.clone()).or_default().push(entry);
        }
        // `YYYY-MM-DD` sorts lexically in date order
        Ok(grouped.into_iter().rev().collect())
    }

    pub fn add_gallery_image(&mut self, image: GalleryImage) -> Result<(), StorageError> {
        let mut images = self.get_gallery()?;
        images.push(image);
        self.save_gallery(&images)
    }

    pub fn remove_gallery_image(&mut self, id: &str) -> Result<bool, StorageError> {
        let mut images = self.get_gallery()?;
        let before = images.len();
        images.retain(|img| img.id != id);
        if images.len() == before {
            return Ok(false);
        }
        self.save_gallery(&images)?;
        Ok(true)
    }

    pub fn gallery_by_kind(&self, kind: ImageKind) -> Result<Vec<GalleryImage>, StorageError> {
        Ok(self
            .get_gallery()?
            .into_iter()
            .filter(|img| img.kind == kind)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBackend;

    fn conversation() -> SectionalStore<MemoryBackend> {
        let mut store = SectionalStore::in_memory();
        for (id, role, content) in [
            ("1", Role::User, "Hi"),
            ("2", Role::Ai, "Hello!"),
            ("3", Role::User, "How are you?"),
            ("4", Role::Ai, "Great, thanks."),
        ] {
            let mut message = Message::new(role, content);
            message.id = id.to_string();
            store.append_message(message).unwrap();
        }
        store
    }

    fn ids(messages: &[Message]) -> Vec<&str> {
        messages.iter().map(|m| m.id.as_str()).collect()
    }

    fn journal_entry(id: &str, date: &str, timestamp: i64, ai: bool) -> JournalEntry {
        JournalEntry {
            id: id.to_string(),
            date: date.to_string(),
            content: format!("entry {}", id),
            timestamp,
            is_ai_generated: ai,
        }
    }

    #[test]
    fn test_append_preserves_order() {
        let store = conversation();
        assert_eq!(ids(&store.get_messages().unwrap()), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_edit_message_truncates_after() {
        let mut store = conversation();
        assert!(store.edit_message("3", "How's it going?").unwrap());

        let messages = store.get_messages().unwrap();
        assert_eq!(ids(&messages), vec!["1", "2", "3"]);
        assert_eq!(messages[2].content, "How's it going?");

        assert!(!store.edit_message("missing", "x").unwrap());
        assert_eq!(store.get_messages().unwrap().len(), 3);
    }

    #[test]
    fn test_delete_message_drops_tail() {
        let mut store = conversation();
        assert!(store.delete_message("2").unwrap());
        assert_eq!(ids(&store.get_messages().unwrap()), vec!["1"]);
        assert!(!store.delete_message("2").unwrap());
    }

    #[test]
    fn test_rewind_for_reroll() {
        let mut store = conversation();

        // First message and user messages cannot be rerolled
        assert!(store.rewind_for_reroll("1").unwrap().is_none());
        assert!(store.rewind_for_reroll("3").unwrap().is_none());
        assert_eq!(store.get_messages().unwrap().len(), 4);

        let prompt = store.rewind_for_reroll("4").unwrap().unwrap();
        assert_eq!(prompt.id, "3");
        assert_eq!(ids(&store.get_messages().unwrap()), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_clear_messages_writes_empty_section() {
        let mut store = conversation();
        store.clear_messages().unwrap();
        assert!(store.get_messages().unwrap().is_empty());
        assert!(store.backend().contains_key("ai_companion_messages"));
    }

    #[test]
    fn test_memory_edits() {
        let mut store = SectionalStore::in_memory();
        let typed = MemoryEntry::new("Likes hiking", false);
        let derived = MemoryEntry::new("Works night shifts", true);
        let typed_id = typed.id.clone();
        store.add_memory(typed).unwrap();
        store.add_memory(derived).unwrap();

        assert_eq!(store.memories_by_origin(OriginFilter::All).unwrap().len(), 2);
        let ai = store.memories_by_origin(OriginFilter::Ai).unwrap();
        assert_eq!(ai.len(), 1);
        assert_eq!(ai[0].content, "Works night shifts");

        assert!(store.update_memory(&typed_id, "Likes mountain hiking").unwrap());
        let user = store.memories_by_origin(OriginFilter::User).unwrap();
        assert_eq!(user[0].content, "Likes mountain hiking");

        assert!(store.remove_memory(&typed_id).unwrap());
        assert!(!store.remove_memory(&typed_id).unwrap());
        assert!(!store.update_memory(&typed_id, "gone").unwrap());
        assert_eq!(store.get_memory().unwrap().len(), 1);
    }

    #[test]
    fn test_journal_newest_first_and_grouping() {
        let mut store = SectionalStore::in_memory();
        store.add_journal_entry(journal_entry("a", "2024-05-01", 100, false)).unwrap();
        store.add_journal_entry(journal_entry("b", "2024-05-02", 300, true)).unwrap();
        store.add_journal_entry(journal_entry("c", "2024-05-01", 200, true)).unwrap();

        let entries = store.get_journal().unwrap();
        let order: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(order, vec!["b", "c", "a"]);

        let grouped = store.journal_grouped_by_date(OriginFilter::All).unwrap();
        let days: Vec<&str> = grouped.iter().map(|(day, _)| day.as_str()).collect();
        assert_eq!(days, vec!["2024-05-02", "2024-05-01"]);
        let older_day: Vec<&str> = grouped[1].1.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(older_day, vec!["c", "a"]);

        let ai_only = store.journal_grouped_by_date(OriginFilter::Ai).unwrap();
        assert_eq!(ai_only.len(), 2);
        assert_eq!(ai_only[1].1.len(), 1);

        assert!(store.remove_journal_entry("b").unwrap());
        assert!(store.journal_by_origin(OriginFilter::Ai).unwrap().iter().all(|e| e.id == "c"));
    }

    #[test]
    fn test_gallery_edits() {
        let mut store = SectionalStore::in_memory();
        let generated = GalleryImage::new("https://cdn/1.png", ImageKind::Generated);
        let uploaded = GalleryImage::new("https://cdn/2.png", ImageKind::Uploaded);
        let generated_id = generated.id.clone();
        store.add_gallery_image(generated).unwrap();
        store.add_gallery_image(uploaded).unwrap();

        assert_eq!(store.gallery_by_kind(ImageKind::Uploaded).unwrap().len(), 1);
        assert!(store.remove_gallery_image(&generated_id).unwrap());
        assert!(store.gallery_by_kind(ImageKind::Generated).unwrap().is_empty());
        assert!(!store.remove_gallery_image(&generated_id).unwrap());
    }
}
