use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// `major.minor` card schema version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SchemaVersion {
    pub major: u32,
    pub minor: u32,
}

impl SchemaVersion {
    /// Newest schema version understood by the built-in vocabulary.
    pub const LATEST: SchemaVersion = SchemaVersion::new(1, 6);

    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::LATEST
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for SchemaVersion {
    type Err = ParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ParseError::missing("version"));
        }
        let mut parts = trimmed.splitn(2, '.');
        let major = parse_component(parts.next(), raw)?;
        let minor = match parts.next() {
            Some(part) => parse_component(Some(part), raw)?,
            None => 0,
        };
        Ok(Self { major, minor })
    }
}

fn parse_component(part: Option<&str>, raw: &str) -> Result<u32, ParseError> {
    part.and_then(|p| p.parse::<u32>().ok()).ok_or_else(|| {
        ParseError::invalid("version", format!("'{raw}' is not a major.minor version"))
    })
}

impl TryFrom<String> for SchemaVersion {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SchemaVersion> for String {
    fn from(version: SchemaVersion) -> Self {
        version.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_major_minor() {
        assert_eq!("1.2".parse::<SchemaVersion>().unwrap(), SchemaVersion::new(1, 2));
        assert_eq!(" 2 ".parse::<SchemaVersion>().unwrap(), SchemaVersion::new(2, 0));
    }

    #[test]
    fn orders_numerically() {
        let older: SchemaVersion = "1.9".parse().unwrap();
        let newer: SchemaVersion = "1.10".parse().unwrap();
        assert!(older < newer);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            "one.two".parse::<SchemaVersion>(),
            Err(ParseError::InvalidPropertyValue { .. })
        ));
        assert!(matches!(
            "".parse::<SchemaVersion>(),
            Err(ParseError::RequiredPropertyMissing(_))
        ));
        assert!("1.2.3".parse::<SchemaVersion>().is_err());
    }
}
