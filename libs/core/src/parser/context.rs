use metrics::counter;
use tracing::{debug, warn};

use crate::error::ParseError;
use crate::options::ParseOptions;
use crate::registry::{ActionParserRegistry, ElementParserRegistry};
use crate::version::SchemaVersion;
use crate::warning::{ParseWarning, WarningStatusCode};

/// State threaded through one deserialization call: the two registries, the
/// options, the version of the card being built and the warnings sink.
pub struct ParseContext<'a> {
    elements: &'a ElementParserRegistry,
    actions: &'a ActionParserRegistry,
    options: ParseOptions,
    version: SchemaVersion,
    warnings: Vec<ParseWarning>,
    depth: usize,
}

impl<'a> ParseContext<'a> {
    pub fn new(
        elements: &'a ElementParserRegistry,
        actions: &'a ActionParserRegistry,
        options: ParseOptions,
    ) -> Self {
        Self {
            elements,
            actions,
            options,
            version: options.renderer_version,
            warnings: Vec::new(),
            depth: 0,
        }
    }

    pub fn element_registry(&self) -> &'a ElementParserRegistry {
        self.elements
    }

    pub fn action_registry(&self) -> &'a ActionParserRegistry {
        self.actions
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Version of the card currently being built.
    pub fn version(&self) -> SchemaVersion {
        self.version
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn warn(&mut self, status_code: WarningStatusCode, message: impl Into<String>) {
        let warning = ParseWarning::new(status_code, message);
        debug!(code = status_code.as_str(), detail = %warning.message, "card parse warning");
        counter!("adaptive_card_parse_warnings_total", "code" => status_code.as_str()).increment(1);
        self.warnings.push(warning);
    }

    /// Records a warning for a node left out of its parent and logs the drop.
    pub(crate) fn drop_with(
        &mut self,
        status_code: WarningStatusCode,
        type_tag: Option<&str>,
        message: impl Into<String>,
    ) {
        let message = message.into();
        warn!(
            type_tag,
            code = status_code.as_str(),
            detail = %message,
            "dropping card node"
        );
        self.warn(status_code, message);
    }

    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<ParseWarning> {
        self.warnings
    }

    pub(crate) fn set_version(&mut self, version: SchemaVersion) -> SchemaVersion {
        std::mem::replace(&mut self.version, version)
    }

    pub(crate) fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= self.options.max_depth {
            return Err(ParseError::MaxDepthExceeded(self.options.max_depth));
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
