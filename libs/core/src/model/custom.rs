//! Extension points for host-defined elements and actions.
//!
//! A host registers a parser for its type tag and returns
//! [`Element::Custom`](crate::Element::Custom) or
//! [`Action::Custom`](crate::Action::Custom) wrapping its own type. One type
//! may implement both traits.

use std::any::Any;
use std::fmt::Debug;

use serde_json::{Value, json};

use crate::resource::ResourceDescriptor;

pub trait CustomElement: Debug + Send + Sync {
    fn type_tag(&self) -> &str;

    /// Appends every remote resource this element references.
    fn resource_information(&self, _resources: &mut Vec<ResourceDescriptor>) {}

    fn to_json(&self) -> Value {
        json!({ "type": self.type_tag() })
    }

    fn as_any(&self) -> &dyn Any;
}

pub trait CustomAction: Debug + Send + Sync {
    fn type_tag(&self) -> &str;

    fn resource_information(&self, _resources: &mut Vec<ResourceDescriptor>) {}

    fn to_json(&self) -> Value {
        json!({ "type": self.type_tag() })
    }

    fn as_any(&self) -> &dyn Any;
}
