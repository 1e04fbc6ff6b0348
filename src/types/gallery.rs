//! Gallery image records

use serde::{Deserialize, Serialize};

/// How an image entered the gallery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Generated,
    Uploaded,
}

/// A single gallery image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: ImageKind,
    pub timestamp: i64,
    /// Generation prompt, for generated images
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// Conversation context the image was produced in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub tags: Vec<String>,
}

impl GalleryImage {
    pub fn new(url: impl Into<String>, kind: ImageKind) -> Self {
        Self {
            id: super::new_id(),
            url: url.into(),
            kind,
            timestamp: super::now_millis(),
            prompt: None,
            context: None,
            tags: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_as_type() {
        let image = GalleryImage::new("https://cdn/a.png", ImageKind::Uploaded);
        let value = serde_json::to_value(&image).unwrap();
        assert_eq!(value["type"], "uploaded");
        assert!(value.get("kind").is_none());
        assert!(value.get("prompt").is_none());
    }
}
