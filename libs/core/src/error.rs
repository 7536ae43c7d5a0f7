use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status code carried by every fatal [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorStatusCode {
    InvalidJson,
    RequiredPropertyMissing,
    InvalidPropertyValue,
    UnsupportedSchemaVersion,
    MaxDepthExceeded,
}

impl ErrorStatusCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorStatusCode::InvalidJson => "invalid_json",
            ErrorStatusCode::RequiredPropertyMissing => "required_property_missing",
            ErrorStatusCode::InvalidPropertyValue => "invalid_property_value",
            ErrorStatusCode::UnsupportedSchemaVersion => "unsupported_schema_version",
            ErrorStatusCode::MaxDepthExceeded => "max_depth_exceeded",
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("card json could not be read: {0}")]
    InvalidJson(String),
    #[error("adaptive card payload must be an object")]
    NotObject,
    #[error("missing required property '{0}'")]
    RequiredPropertyMissing(String),
    #[error("invalid value for property '{property}': {reason}")]
    InvalidPropertyValue { property: String, reason: String },
    #[error("card version {card} is not supported (renderer supports up to {supported})")]
    UnsupportedSchemaVersion { card: String, supported: String },
    #[error("maximum nesting depth of {0} exceeded")]
    MaxDepthExceeded(usize),
}

impl ParseError {
    pub fn missing(property: impl Into<String>) -> Self {
        ParseError::RequiredPropertyMissing(property.into())
    }

    pub fn invalid(property: impl Into<String>, reason: impl Into<String>) -> Self {
        ParseError::InvalidPropertyValue {
            property: property.into(),
            reason: reason.into(),
        }
    }

    pub fn status_code(&self) -> ErrorStatusCode {
        match self {
            ParseError::InvalidJson(_) | ParseError::NotObject => ErrorStatusCode::InvalidJson,
            ParseError::RequiredPropertyMissing(_) => ErrorStatusCode::RequiredPropertyMissing,
            ParseError::InvalidPropertyValue { .. } => ErrorStatusCode::InvalidPropertyValue,
            ParseError::UnsupportedSchemaVersion { .. } => {
                ErrorStatusCode::UnsupportedSchemaVersion
            }
            ParseError::MaxDepthExceeded(_) => ErrorStatusCode::MaxDepthExceeded,
        }
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        ParseError::InvalidJson(err.to_string())
    }
}
