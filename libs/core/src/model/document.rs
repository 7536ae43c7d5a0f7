use crate::model::action::Action;
use crate::model::element::Element;
use crate::version::SchemaVersion;

pub const ADAPTIVE_CARD_TYPE: &str = "AdaptiveCard";

/// Root of a parsed card. Owns its whole subtree, including the documents
/// nested inside show-card actions.
#[derive(Debug, Default)]
pub struct Document {
    pub version: SchemaVersion,
    pub schema: Option<String>,
    pub fallback_text: Option<String>,
    pub background_image: Option<String>,
    pub body: Vec<Element>,
    pub actions: Vec<Action>,
}

impl Document {
    pub fn new(version: SchemaVersion) -> Self {
        Self {
            version,
            ..Default::default()
        }
    }

    pub fn type_tag(&self) -> &'static str {
        ADAPTIVE_CARD_TYPE
    }
}
