use std::env;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::version::SchemaVersion;

pub const DEFAULT_MAX_DEPTH: usize = 64;

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

/// Knobs applied to every deserialization call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseOptions {
    /// Highest card version the caller can render; newer root cards are rejected.
    #[serde(default)]
    pub renderer_version: SchemaVersion,
    /// Nesting limit for elements, actions and show-card documents.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            renderer_version: SchemaVersion::LATEST,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    /// Reads `ACSM_RENDERER_VERSION` and `ACSM_MAX_DEPTH`, keeping defaults for
    /// unset or unreadable values.
    pub fn from_env() -> Self {
        let mut options = Self::default();
        if let Ok(raw) = env::var("ACSM_RENDERER_VERSION") {
            match raw.parse::<SchemaVersion>() {
                Ok(version) => options.renderer_version = version,
                Err(err) => warn!(value = %raw, error = %err, "ignoring ACSM_RENDERER_VERSION"),
            }
        }
        if let Ok(raw) = env::var("ACSM_MAX_DEPTH") {
            match raw.trim().parse::<usize>() {
                Ok(depth) if depth > 0 => options.max_depth = depth,
                _ => warn!(value = %raw, "ignoring ACSM_MAX_DEPTH"),
            }
        }
        options
    }

    pub fn with_renderer_version(mut self, version: SchemaVersion) -> Self {
        self.renderer_version = version;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_defaults() {
        let options: ParseOptions = serde_json::from_str(r#"{"rendererVersion":"1.2"}"#).unwrap();
        assert_eq!(options.renderer_version, SchemaVersion::new(1, 2));
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn rejects_bad_version_in_config() {
        let result = serde_json::from_str::<ParseOptions>(r#"{"rendererVersion":"latest"}"#);
        assert!(result.is_err());
    }
}
