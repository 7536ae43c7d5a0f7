//! Adaptive Card shared object model.
//!
//! Turns card JSON into a typed [`Document`] tree through caller-supplied
//! parser registries, and enumerates the remote resources that tree
//! references. Hosts extend the vocabulary by registering parsers that
//! return [`Element::Custom`] or [`Action::Custom`] nodes.
//!
//! ```
//! use acsm_core::{CardParser, ResourceDescriptor, gather};
//!
//! let parsed = CardParser::default()
//!     .parse_str(r#"{
//!         "type": "AdaptiveCard",
//!         "version": "1.0",
//!         "backgroundImage": "bg.png",
//!         "body": [{ "type": "Image", "url": "a.png" }]
//!     }"#)
//!     .unwrap();
//! assert!(parsed.warnings.is_empty());
//! assert_eq!(
//!     gather(&parsed.document),
//!     vec![ResourceDescriptor::image("bg.png"), ResourceDescriptor::image("a.png")]
//! );
//! ```
pub mod engine;
pub mod error;
pub mod gather;
pub mod model;
pub mod options;
pub mod parser;
pub mod registry;
pub mod resource;
pub mod serialize;
pub mod version;
pub mod warning;

pub use engine::CardParser;
pub use error::{ErrorStatusCode, ParseError};
pub use gather::{GatherResources, dedup_resources, gather};
pub use model::*;
pub use options::{DEFAULT_MAX_DEPTH, ParseOptions};
pub use parser::{ParseContext, ParseResult, deserialize, deserialize_from_str};
pub use registry::{
    ActionParser, ActionParserRegistry, ElementParser, ElementParserRegistry, ParserRegistry,
};
pub use resource::{ResourceDescriptor, ResourceKind};
pub use version::SchemaVersion;
pub use warning::{ParseWarning, WarningStatusCode};

/// Returns the semantic version advertised by this crate.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
