//! Message types
//!
//! Defines chat message structures and roles.

use serde::{Deserialize, Serialize};

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message from the user
    User,
    /// Message from the companion
    Ai,
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    /// The role of the message sender
    pub role: Role,
    /// The content of the message
    pub content: String,
    /// Creation time in milliseconds since the Unix epoch
    pub timestamp: i64,
    /// Image attached to the message, if one was generated or uploaded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Prompt the attached image was generated from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_prompt: Option<String>,
}

impl Message {
    /// Create a new message
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: super::new_id(),
            role,
            content: content.into(),
            timestamp: super::now_millis(),
            image_url: None,
            image_prompt: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn ai(content: impl Into<String>) -> Self {
        Self::new(Role::Ai, content)
    }

    /// Attach an image to the message
    pub fn with_image(mut self, url: impl Into<String>, prompt: Option<String>) -> Self {
        self.image_url = Some(url.into());
        self.image_prompt = prompt;
        self
    }
}
