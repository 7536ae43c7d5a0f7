use acsm_core::{
    ParseResult, ParseWarning, ResourceDescriptor, ResourceKind, SchemaVersion, dedup_resources,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub version: SchemaVersion,
    pub body_elements: usize,
    pub actions: usize,
    pub resources: Vec<ResourceDescriptor>,
    pub warnings: Vec<ParseWarning>,
}

impl Report {
    pub fn new(parsed: &ParseResult, resources: Vec<ResourceDescriptor>, unique: bool) -> Self {
        let resources = if unique {
            dedup_resources(resources)
        } else {
            resources
        };
        Self {
            version: parsed.document.version,
            body_elements: parsed.document.body.len(),
            actions: parsed.document.actions.len(),
            resources,
            warnings: parsed.warnings.clone(),
        }
    }

    pub fn print_table(&self) {
        println!(
            "version: {}  body: {}  actions: {}",
            self.version, self.body_elements, self.actions
        );
        if self.resources.is_empty() {
            println!("No remote resources");
        } else {
            println!("{:<6} {:<12} URL", "KIND", "MIME");
            for resource in &self.resources {
                let mime = if resource.mime_type.is_empty() {
                    "-"
                } else {
                    resource.mime_type.as_str()
                };
                println!("{:<6} {:<12} {}", kind_label(resource.kind), mime, resource.url);
            }
        }
        for warning in &self.warnings {
            println!(
                "warning[{}]: {}",
                warning.status_code.as_str(),
                warning.message
            );
        }
    }
}

fn kind_label(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Image => "image",
        ResourceKind::Media => "media",
    }
}
