use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::ParseError;
use crate::model::{Action, Element};
use crate::parser::{ParseContext, actions, elements};

/// Builds an [`Element`] from the JSON node carrying its type tag.
///
/// Parsers receive the active [`ParseContext`] so they can recurse into
/// children with the same registries and record warnings.
pub trait ElementParser: Send + Sync {
    fn deserialize(&self, ctx: &mut ParseContext<'_>, value: &Value)
    -> Result<Element, ParseError>;
}

impl<F> ElementParser for F
where
    F: Fn(&mut ParseContext<'_>, &Value) -> Result<Element, ParseError> + Send + Sync,
{
    fn deserialize(
        &self,
        ctx: &mut ParseContext<'_>,
        value: &Value,
    ) -> Result<Element, ParseError> {
        self(ctx, value)
    }
}

pub trait ActionParser: Send + Sync {
    fn deserialize(&self, ctx: &mut ParseContext<'_>, value: &Value) -> Result<Action, ParseError>;
}

impl<F> ActionParser for F
where
    F: Fn(&mut ParseContext<'_>, &Value) -> Result<Action, ParseError> + Send + Sync,
{
    fn deserialize(&self, ctx: &mut ParseContext<'_>, value: &Value) -> Result<Action, ParseError> {
        self(ctx, value)
    }
}

/// Type-tag keyed parser table. Lookups are exact and case-sensitive; the
/// last registration for a tag wins.
///
/// Registries are plain values: build one, register overrides, then hand it
/// to any number of parse calls. They are not meant to be mutated while a
/// parse borrows them.
///
/// # Examples
///
/// ```
/// use acsm_core::{Element, ElementParserRegistry, ParseContext, ParseError, TextBlock};
/// use serde_json::Value;
///
/// fn banner(_ctx: &mut ParseContext<'_>, value: &Value) -> Result<Element, ParseError> {
///     let text = value.get("text").and_then(Value::as_str).unwrap_or_default();
///     Ok(Element::TextBlock(TextBlock { text: text.to_uppercase(), ..Default::default() }))
/// }
///
/// let mut registry = ElementParserRegistry::with_builtins();
/// registry.register("Banner", banner);
/// assert!(registry.contains("Banner"));
/// assert!(registry.contains("Image"));
/// assert!(!registry.contains("banner"));
/// ```
pub struct ParserRegistry<P: ?Sized> {
    parsers: BTreeMap<String, Arc<P>>,
}

pub type ElementParserRegistry = ParserRegistry<dyn ElementParser>;
pub type ActionParserRegistry = ParserRegistry<dyn ActionParser>;

impl<P: ?Sized> ParserRegistry<P> {
    /// Empty registry: every tag, built-in or not, resolves to nothing.
    pub fn new() -> Self {
        Self {
            parsers: BTreeMap::new(),
        }
    }

    /// Stores `parser` under `type_tag`, returning the entry it replaced.
    pub fn register_shared(
        &mut self,
        type_tag: impl Into<String>,
        parser: Arc<P>,
    ) -> Option<Arc<P>> {
        self.parsers.insert(type_tag.into(), parser)
    }

    pub fn unregister(&mut self, type_tag: &str) -> Option<Arc<P>> {
        self.parsers.remove(type_tag)
    }

    pub fn resolve(&self, type_tag: &str) -> Option<Arc<P>> {
        self.parsers.get(type_tag).cloned()
    }

    pub fn contains(&self, type_tag: &str) -> bool {
        self.parsers.contains_key(type_tag)
    }

    pub fn type_tags(&self) -> Vec<String> {
        self.parsers.keys().cloned().collect()
    }

    /// Copies every entry of `other` into `self`; `other` wins on collisions.
    pub fn merge(&mut self, other: &Self) {
        for (tag, parser) in &other.parsers {
            self.parsers.insert(tag.clone(), Arc::clone(parser));
        }
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}

impl<P: ?Sized> Clone for ParserRegistry<P> {
    fn clone(&self) -> Self {
        Self {
            parsers: self.parsers.clone(),
        }
    }
}

impl<P: ?Sized> fmt::Debug for ParserRegistry<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("type_tags", &self.parsers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ParserRegistry<dyn ElementParser> {
    /// Registry pre-populated with every built-in element parser.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        elements::register_builtins(&mut registry);
        registry
    }

    pub fn register<T>(&mut self, type_tag: impl Into<String>, parser: T)
    where
        T: ElementParser + 'static,
    {
        self.register_shared(type_tag, Arc::new(parser));
    }
}

impl Default for ParserRegistry<dyn ElementParser> {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl ParserRegistry<dyn ActionParser> {
    /// Registry pre-populated with every built-in action parser.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        actions::register_builtins(&mut registry);
        registry
    }

    pub fn register<T>(&mut self, type_tag: impl Into<String>, parser: T)
    where
        T: ActionParser + 'static,
    {
        self.register_shared(type_tag, Arc::new(parser));
    }
}

impl Default for ParserRegistry<dyn ActionParser> {
    fn default() -> Self {
        Self::with_builtins()
    }
}
