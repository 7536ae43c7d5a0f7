use serde::{Deserialize, Serialize};

/// Semantic kind of a remotely fetchable asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Image,
    Media,
}

/// One remote resource referenced by a card. Equality is structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    pub url: String,
    pub kind: ResourceKind,
    #[serde(default)]
    pub mime_type: String,
}

impl ResourceDescriptor {
    pub fn new(url: impl Into<String>, kind: ResourceKind, mime_type: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind,
            mime_type: mime_type.into(),
        }
    }

    pub fn image(url: impl Into<String>) -> Self {
        Self::new(url, ResourceKind::Image, "")
    }

    pub fn media(url: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self::new(url, ResourceKind::Media, mime_type)
    }
}
