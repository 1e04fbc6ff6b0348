//! Configuration types
//!
//! Application and voice preference structures.

use serde::{Deserialize, Serialize};

/// UI colour scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub theme: Theme,
    /// Show notifications
    pub notifications: bool,
    /// Persist chat state after every exchange
    pub auto_save: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            notifications: true,
            auto_save: true,
        }
    }
}

/// Synthesized voice gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceGender {
    Male,
    #[default]
    Female,
}

/// Speech synthesis preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    pub gender: VoiceGender,
    /// Pitch multiplier (1.0 = platform default)
    pub pitch: f32,
    /// Rate multiplier (1.0 = platform default)
    pub speed: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            gender: VoiceGender::Female,
            pitch: 1.0,
            speed: 1.0,
        }
    }
}
