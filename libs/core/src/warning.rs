use serde::{Deserialize, Serialize};

use crate::error::{ErrorStatusCode, ParseError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WarningStatusCode {
    UnknownElementType,
    UnknownActionType,
    RequiredPropertyMissing,
    InvalidPropertyValue,
    MaxDepthExceeded,
    FallbackUsed,
    ElementDropped,
}

impl WarningStatusCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningStatusCode::UnknownElementType => "unknown_element_type",
            WarningStatusCode::UnknownActionType => "unknown_action_type",
            WarningStatusCode::RequiredPropertyMissing => "required_property_missing",
            WarningStatusCode::InvalidPropertyValue => "invalid_property_value",
            WarningStatusCode::MaxDepthExceeded => "max_depth_exceeded",
            WarningStatusCode::FallbackUsed => "fallback_used",
            WarningStatusCode::ElementDropped => "element_dropped",
        }
    }
}

impl From<ErrorStatusCode> for WarningStatusCode {
    fn from(code: ErrorStatusCode) -> Self {
        match code {
            ErrorStatusCode::RequiredPropertyMissing => WarningStatusCode::RequiredPropertyMissing,
            ErrorStatusCode::MaxDepthExceeded => WarningStatusCode::MaxDepthExceeded,
            ErrorStatusCode::InvalidJson
            | ErrorStatusCode::InvalidPropertyValue
            | ErrorStatusCode::UnsupportedSchemaVersion => WarningStatusCode::InvalidPropertyValue,
        }
    }
}

/// Non-fatal diagnostic recorded while building a card tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseWarning {
    pub status_code: WarningStatusCode,
    pub message: String,
}

impl ParseWarning {
    pub fn new(status_code: WarningStatusCode, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
        }
    }

    /// Downgrades a node-level [`ParseError`] to a warning.
    pub fn from_error(err: &ParseError, context: &str) -> Self {
        Self::new(err.status_code().into(), format!("{context}: {err}"))
    }
}
