//! Recursive-descent card builder.
//!
//! Every node goes through the caller's registries. Problems below the root
//! become [`ParseWarning`]s and the offending node is left out of its
//! parent; only a structurally unusable root fails the call.

use metrics::counter;
use serde_json::Value;
use tracing::{instrument, warn};

use crate::error::ParseError;
use crate::model::{
    ADAPTIVE_CARD_TYPE, Action, Document, Element, UnknownAction, UnknownElement,
};
use crate::options::ParseOptions;
use crate::registry::{ActionParserRegistry, ElementParserRegistry};
use crate::version::SchemaVersion;
use crate::warning::{ParseWarning, WarningStatusCode};

pub mod actions;
mod context;
pub mod elements;
pub mod fields;

pub use context::ParseContext;

use fields::Object;

const FALLBACK_DROP: &str = "drop";

/// Best-effort tree plus every warning recorded while building it.
#[derive(Debug)]
pub struct ParseResult {
    pub document: Document,
    pub warnings: Vec<ParseWarning>,
}

/// Parses card JSON text with explicit registries.
pub fn deserialize_from_str(
    json: &str,
    elements: &ElementParserRegistry,
    actions: &ActionParserRegistry,
    options: &ParseOptions,
) -> Result<ParseResult, ParseError> {
    let value: Value = serde_json::from_str(json).inspect_err(|_| {
        counter!("adaptive_card_parse_total", "outcome" => "error").increment(1);
    })?;
    deserialize(&value, elements, actions, options)
}

/// Builds a [`Document`] from an already-decoded JSON value.
#[instrument(
    name = "adaptive_card.deserialize",
    skip_all,
    fields(renderer_version = %options.renderer_version)
)]
pub fn deserialize(
    value: &Value,
    elements: &ElementParserRegistry,
    actions: &ActionParserRegistry,
    options: &ParseOptions,
) -> Result<ParseResult, ParseError> {
    let result = deserialize_root(value, elements, actions, options);
    let outcome = if result.is_ok() { "ok" } else { "error" };
    counter!("adaptive_card_parse_total", "outcome" => outcome).increment(1);
    if let Err(err) = &result {
        warn!(code = err.status_code().as_str(), error = %err, "rejected adaptive card");
    }
    result
}

fn deserialize_root(
    value: &Value,
    elements: &ElementParserRegistry,
    actions: &ActionParserRegistry,
    options: &ParseOptions,
) -> Result<ParseResult, ParseError> {
    let obj = value.as_object().ok_or(ParseError::NotObject)?;
    match fields::type_tag(obj) {
        Some(ADAPTIVE_CARD_TYPE) => {}
        Some(other) => {
            return Err(ParseError::invalid(
                "type",
                format!("expected '{ADAPTIVE_CARD_TYPE}', found '{other}'"),
            ));
        }
        None => return Err(ParseError::missing("type")),
    }

    let version = match obj.get("version") {
        None | Some(Value::Null) => return Err(ParseError::missing("version")),
        Some(Value::String(raw)) => raw.parse::<SchemaVersion>()?,
        Some(_) => return Err(ParseError::invalid("version", "expected a string")),
    };
    ensure_supported(version, options.renderer_version)?;

    let mut ctx = ParseContext::new(elements, actions, *options);
    let document = ctx.build_document(obj, version);
    Ok(ParseResult {
        document,
        warnings: ctx.into_warnings(),
    })
}

fn ensure_supported(card: SchemaVersion, renderer: SchemaVersion) -> Result<(), ParseError> {
    if card > renderer {
        return Err(ParseError::UnsupportedSchemaVersion {
            card: card.to_string(),
            supported: renderer.to_string(),
        });
    }
    Ok(())
}

impl ParseContext<'_> {
    /// Parses one body element, applying fallback rules. `None` means the
    /// node was dropped and a warning explains why.
    pub fn parse_element(&mut self, value: &Value) -> Option<Element> {
        let Some(obj) = value.as_object() else {
            self.drop_with(
                WarningStatusCode::InvalidPropertyValue,
                None,
                "element must be a json object",
            );
            return None;
        };
        let Some(tag) = fields::type_tag(obj) else {
            self.drop_with(
                WarningStatusCode::RequiredPropertyMissing,
                None,
                "element is missing its 'type' property",
            );
            return None;
        };
        if let Err(err) = self.enter() {
            self.drop_node(&err, tag);
            return None;
        }

        let parsed = match self.element_registry().resolve(tag) {
            Some(parser) => match parser.deserialize(self, value) {
                Ok(element) if element.type_tag().is_empty() => {
                    let err = ParseError::invalid("type", "parser produced an empty type tag");
                    self.element_fallback(obj, value, tag, Some(err))
                }
                Ok(element) => Some(element),
                Err(err) => self.element_fallback(obj, value, tag, Some(err)),
            },
            None => self.element_fallback(obj, value, tag, None),
        };
        self.leave();
        parsed
    }

    /// Parses an optional array property into elements, keeping order.
    pub fn parse_elements(&mut self, value: Option<&Value>, property: &str) -> Vec<Element> {
        match value {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| self.parse_element(item))
                .collect(),
            Some(_) => {
                self.warn(
                    WarningStatusCode::InvalidPropertyValue,
                    format!("'{property}' must be an array"),
                );
                Vec::new()
            }
        }
    }

    pub fn parse_action(&mut self, value: &Value) -> Option<Action> {
        let Some(obj) = value.as_object() else {
            self.drop_with(
                WarningStatusCode::InvalidPropertyValue,
                None,
                "action must be a json object",
            );
            return None;
        };
        let Some(tag) = fields::type_tag(obj) else {
            self.drop_with(
                WarningStatusCode::RequiredPropertyMissing,
                None,
                "action is missing its 'type' property",
            );
            return None;
        };
        if let Err(err) = self.enter() {
            self.drop_node(&err, tag);
            return None;
        }

        let parsed = match self.action_registry().resolve(tag) {
            Some(parser) => match parser.deserialize(self, value) {
                Ok(action) if action.type_tag().is_empty() => {
                    let err = ParseError::invalid("type", "parser produced an empty type tag");
                    self.action_fallback(obj, value, tag, Some(err))
                }
                Ok(action) => Some(action),
                Err(err) => self.action_fallback(obj, value, tag, Some(err)),
            },
            None => self.action_fallback(obj, value, tag, None),
        };
        self.leave();
        parsed
    }

    pub fn parse_actions(&mut self, value: Option<&Value>, property: &str) -> Vec<Action> {
        match value {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| self.parse_action(item))
                .collect(),
            Some(_) => {
                self.warn(
                    WarningStatusCode::InvalidPropertyValue,
                    format!("'{property}' must be an array"),
                );
                Vec::new()
            }
        }
    }

    /// Parses a card nested inside another node (e.g. `Action.ShowCard`).
    ///
    /// `type` and `version` are optional here; a missing version inherits
    /// the enclosing card's. Errors are returned so the owning node can be
    /// dropped.
    pub fn parse_nested_document(&mut self, value: &Value) -> Result<Document, ParseError> {
        let obj = fields::as_object(value, "card")?;
        if let Some(tag) = fields::type_tag(obj)
            && tag != ADAPTIVE_CARD_TYPE
        {
            return Err(ParseError::invalid(
                "type",
                format!("expected '{ADAPTIVE_CARD_TYPE}', found '{tag}'"),
            ));
        }
        let version = match obj.get("version") {
            None | Some(Value::Null) => self.version(),
            Some(Value::String(raw)) if raw.trim().is_empty() => self.version(),
            Some(Value::String(raw)) => raw.parse::<SchemaVersion>()?,
            Some(_) => return Err(ParseError::invalid("version", "expected a string")),
        };
        ensure_supported(version, self.options().renderer_version)?;

        self.enter()?;
        let document = self.build_document(obj, version);
        self.leave();
        Ok(document)
    }

    pub(crate) fn build_document(&mut self, obj: &Object, version: SchemaVersion) -> Document {
        let previous = self.set_version(version);
        let document = Document {
            version,
            schema: fields::optional_string(obj, "$schema"),
            fallback_text: fields::optional_string(obj, "fallbackText"),
            background_image: fields::url_property(obj, "backgroundImage"),
            body: self.parse_elements(obj.get("body"), "body"),
            actions: self.parse_actions(obj.get("actions"), "actions"),
        };
        self.set_version(previous);
        document
    }

    fn element_fallback(
        &mut self,
        obj: &Object,
        value: &Value,
        tag: &str,
        failure: Option<ParseError>,
    ) -> Option<Element> {
        match obj.get("fallback") {
            Some(Value::String(mode)) if mode == FALLBACK_DROP => {
                self.drop_with(
                    WarningStatusCode::ElementDropped,
                    Some(tag),
                    format!("element '{tag}' dropped by its fallback"),
                );
                None
            }
            Some(fallback @ Value::Object(_)) => {
                if let Some(err) = &failure {
                    self.push_failure(err, tag);
                }
                self.warn(
                    WarningStatusCode::FallbackUsed,
                    format!("element '{tag}' replaced by its fallback"),
                );
                self.parse_element(fallback)
            }
            _ => match failure {
                Some(err) => {
                    self.drop_node(&err, tag);
                    None
                }
                None => {
                    self.warn(
                        WarningStatusCode::UnknownElementType,
                        format!("unknown element type '{tag}'"),
                    );
                    Some(Element::Unknown(UnknownElement {
                        type_tag: tag.to_string(),
                        raw: value.clone(),
                    }))
                }
            },
        }
    }

    fn action_fallback(
        &mut self,
        obj: &Object,
        value: &Value,
        tag: &str,
        failure: Option<ParseError>,
    ) -> Option<Action> {
        match obj.get("fallback") {
            Some(Value::String(mode)) if mode == FALLBACK_DROP => {
                self.drop_with(
                    WarningStatusCode::ElementDropped,
                    Some(tag),
                    format!("action '{tag}' dropped by its fallback"),
                );
                None
            }
            Some(fallback @ Value::Object(_)) => {
                if let Some(err) = &failure {
                    self.push_failure(err, tag);
                }
                self.warn(
                    WarningStatusCode::FallbackUsed,
                    format!("action '{tag}' replaced by its fallback"),
                );
                self.parse_action(fallback)
            }
            _ => match failure {
                Some(err) => {
                    self.drop_node(&err, tag);
                    None
                }
                None => {
                    self.warn(
                        WarningStatusCode::UnknownActionType,
                        format!("unknown action type '{tag}'"),
                    );
                    Some(Action::Unknown(UnknownAction {
                        type_tag: tag.to_string(),
                        raw: value.clone(),
                    }))
                }
            },
        }
    }

    fn push_failure(&mut self, err: &ParseError, tag: &str) {
        let warning = ParseWarning::from_error(err, tag);
        self.warn(warning.status_code, warning.message);
    }

    fn drop_node(&mut self, err: &ParseError, tag: &str) {
        let warning = ParseWarning::from_error(err, tag);
        self.drop_with(warning.status_code, Some(tag), warning.message);
    }
}
