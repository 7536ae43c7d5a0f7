//! Read-only traversal that lists every remote resource a card references.
//!
//! Order: the card background, then body elements depth-first and
//! left-to-right, then actions in order (an action's icon comes before the
//! contents of its show-card). Repeated references are reported once per
//! occurrence; use [`dedup_resources`] when a unique list is wanted.

use std::collections::HashSet;

use crate::model::{Action, Column, Container, Document, Element, Image, Media};
use crate::resource::ResourceDescriptor;

pub trait GatherResources {
    fn gather_resources(&self, resources: &mut Vec<ResourceDescriptor>);
}

/// Collects the resources of `document`, nested show-cards included.
pub fn gather(document: &Document) -> Vec<ResourceDescriptor> {
    let mut resources = Vec::new();
    document.gather_resources(&mut resources);
    resources
}

/// Removes repeated descriptors, keeping the first occurrence of each.
pub fn dedup_resources<I>(resources: I) -> Vec<ResourceDescriptor>
where
    I: IntoIterator<Item = ResourceDescriptor>,
{
    let mut seen = HashSet::new();
    resources
        .into_iter()
        .filter(|resource| seen.insert(resource.clone()))
        .collect()
}

impl Document {
    pub fn resource_information(&self) -> Vec<ResourceDescriptor> {
        gather(self)
    }
}

impl GatherResources for Document {
    fn gather_resources(&self, resources: &mut Vec<ResourceDescriptor>) {
        if let Some(url) = &self.background_image {
            resources.push(ResourceDescriptor::image(url.clone()));
        }
        for element in &self.body {
            element.gather_resources(resources);
        }
        for action in &self.actions {
            action.gather_resources(resources);
        }
    }
}

impl GatherResources for Element {
    fn gather_resources(&self, resources: &mut Vec<ResourceDescriptor>) {
        match self {
            Element::Image(image) => image.gather_resources(resources),
            Element::Media(media) => media.gather_resources(resources),
            Element::Container(container) => container.gather_resources(resources),
            Element::Column(column) => column.gather_resources(resources),
            Element::ColumnSet(set) => {
                for column in &set.columns {
                    column.gather_resources(resources);
                }
                gather_select_action(set.select_action.as_deref(), resources);
            }
            Element::ImageSet(set) => {
                for image in &set.images {
                    image.gather_resources(resources);
                }
            }
            Element::ActionSet(set) => {
                for action in &set.actions {
                    action.gather_resources(resources);
                }
            }
            Element::Custom(custom) => custom.resource_information(resources),
            Element::TextBlock(_)
            | Element::FactSet(_)
            | Element::Input(_)
            | Element::Unknown(_) => {}
        }
    }
}

impl GatherResources for Action {
    fn gather_resources(&self, resources: &mut Vec<ResourceDescriptor>) {
        if let Some(icon) = self.icon_url() {
            resources.push(ResourceDescriptor::image(icon));
        }
        match self {
            Action::ShowCard(show) => show.card.gather_resources(resources),
            Action::Custom(custom) => custom.resource_information(resources),
            Action::Submit(_) | Action::OpenUrl(_) | Action::Execute(_) | Action::Unknown(_) => {}
        }
    }
}

impl GatherResources for Image {
    fn gather_resources(&self, resources: &mut Vec<ResourceDescriptor>) {
        resources.push(ResourceDescriptor::image(self.url.clone()));
        gather_select_action(self.select_action.as_deref(), resources);
    }
}

impl GatherResources for Media {
    fn gather_resources(&self, resources: &mut Vec<ResourceDescriptor>) {
        if let Some(poster) = &self.poster {
            resources.push(ResourceDescriptor::image(poster.clone()));
        }
        for source in &self.sources {
            resources.push(ResourceDescriptor::media(
                source.url.clone(),
                source.mime_type.clone(),
            ));
        }
    }
}

impl GatherResources for Container {
    fn gather_resources(&self, resources: &mut Vec<ResourceDescriptor>) {
        if let Some(url) = &self.background_image {
            resources.push(ResourceDescriptor::image(url.clone()));
        }
        for item in &self.items {
            item.gather_resources(resources);
        }
        gather_select_action(self.select_action.as_deref(), resources);
    }
}

impl GatherResources for Column {
    fn gather_resources(&self, resources: &mut Vec<ResourceDescriptor>) {
        for item in &self.items {
            item.gather_resources(resources);
        }
        gather_select_action(self.select_action.as_deref(), resources);
    }
}

fn gather_select_action(action: Option<&Action>, resources: &mut Vec<ResourceDescriptor>) {
    if let Some(action) = action {
        action.gather_resources(resources);
    }
}
