use serde_json::Value;

use crate::error::ParseError;
use crate::gather::gather;
use crate::options::ParseOptions;
use crate::parser::{ParseResult, deserialize, deserialize_from_str};
use crate::registry::{
    ActionParser, ActionParserRegistry, ElementParser, ElementParserRegistry,
};
use crate::resource::ResourceDescriptor;

/// Owns a pair of registries plus options and parses cards with them.
///
/// Each `CardParser` is independent: overrides registered on one never leak
/// into another, and a shared reference can parse from several threads.
#[derive(Debug, Clone, Default)]
pub struct CardParser {
    elements: ElementParserRegistry,
    actions: ActionParserRegistry,
    options: ParseOptions,
}

impl CardParser {
    pub fn new(elements: ElementParserRegistry, actions: ActionParserRegistry) -> Self {
        Self {
            elements,
            actions,
            options: ParseOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub fn element_registry(&self) -> &ElementParserRegistry {
        &self.elements
    }

    pub fn action_registry(&self) -> &ActionParserRegistry {
        &self.actions
    }

    pub fn register_element_parser<P>(&mut self, type_tag: impl Into<String>, parser: P)
    where
        P: ElementParser + 'static,
    {
        self.elements.register(type_tag, parser);
    }

    pub fn register_action_parser<P>(&mut self, type_tag: impl Into<String>, parser: P)
    where
        P: ActionParser + 'static,
    {
        self.actions.register(type_tag, parser);
    }

    pub fn unregister_element_parser(&mut self, type_tag: &str) -> bool {
        self.elements.unregister(type_tag).is_some()
    }

    pub fn unregister_action_parser(&mut self, type_tag: &str) -> bool {
        self.actions.unregister(type_tag).is_some()
    }

    pub fn parse_str(&self, json: &str) -> Result<ParseResult, ParseError> {
        deserialize_from_str(json, &self.elements, &self.actions, &self.options)
    }

    pub fn parse_value(&self, value: &Value) -> Result<ParseResult, ParseError> {
        deserialize(value, &self.elements, &self.actions, &self.options)
    }

    /// Parses `json` and returns its resources alongside the parse result.
    pub fn resources_from_str(
        &self,
        json: &str,
    ) -> Result<(ParseResult, Vec<ResourceDescriptor>), ParseError> {
        let parsed = self.parse_str(json)?;
        let resources = gather(&parsed.document);
        Ok((parsed, resources))
    }
}
