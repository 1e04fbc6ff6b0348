//! Profile types
//!
//! The companion's persona and the user's own profile. Both are singleton
//! sections: one current value, replaced whole on save.

use serde::{Deserialize, Serialize};

/// Persona of the companion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AIProfile {
    /// Display name
    pub name: String,
    /// Personality traits, in the order the user listed them
    pub personality: Vec<String>,
    /// Free-text description of looks, used when generating images
    pub appearance: String,
    pub backstory: String,
    /// Reference picture used to keep generated images consistent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_image_url: Option<String>,
    /// Relationship to the user: "friend", "partner", ...
    pub relationship: String,
}

impl Default for AIProfile {
    fn default() -> Self {
        Self {
            name: "Companion".to_string(),
            personality: vec![
                "friendly".to_string(),
                "empathetic".to_string(),
                "witty".to_string(),
            ],
            appearance: String::new(),
            backstory: String::new(),
            reference_image_url: None,
            relationship: "friend".to_string(),
        }
    }
}

/// Profile of the person using the app
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub bio: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "User".to_string(),
            bio: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_ai_profile_shape() {
        let value = serde_json::to_value(AIProfile::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Companion",
                "personality": ["friendly", "empathetic", "witty"],
                "appearance": "",
                "backstory": "",
                "relationship": "friend"
            })
        );
    }

    #[test]
    fn test_reference_image_wire_name() {
        let profile = AIProfile {
            reference_image_url: Some("https://cdn/ref.png".to_string()),
            ..AIProfile::default()
        };
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["referenceImageUrl"], "https://cdn/ref.png");
    }

    #[test]
    fn test_default_user_profile() {
        let profile = UserProfile::default();
        assert_eq!(profile.name, "User");
        assert!(profile.bio.is_empty());
    }
}
