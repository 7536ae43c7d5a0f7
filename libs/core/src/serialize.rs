//! Rebuilds card-schema JSON from a parsed tree.

use serde_json::{Map, Value, json};

use crate::model::{
    ADAPTIVE_CARD_TYPE, Action, Column, Document, Element, Image, InputKind, Media,
};

fn put_str(map: &mut Map<String, Value>, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        map.insert(key.to_string(), Value::String(value.to_string()));
    }
}

fn put_action(map: &mut Map<String, Value>, key: &str, action: Option<&Action>) {
    if let Some(action) = action {
        map.insert(key.to_string(), action.to_json());
    }
}

fn tagged(type_tag: &str, id: Option<&str>) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("type".into(), Value::String(type_tag.to_string()));
    put_str(&mut map, "id", id);
    map
}

impl Document {
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("type".into(), json!(ADAPTIVE_CARD_TYPE));
        map.insert("version".into(), json!(self.version.to_string()));
        put_str(&mut map, "$schema", self.schema.as_deref());
        put_str(&mut map, "fallbackText", self.fallback_text.as_deref());
        put_str(&mut map, "backgroundImage", self.background_image.as_deref());
        map.insert(
            "body".into(),
            Value::Array(self.body.iter().map(Element::to_json).collect()),
        );
        if !self.actions.is_empty() {
            map.insert(
                "actions".into(),
                Value::Array(self.actions.iter().map(Action::to_json).collect()),
            );
        }
        Value::Object(map)
    }
}

impl Element {
    pub fn to_json(&self) -> Value {
        let tag = self.type_tag();
        match self {
            Element::TextBlock(block) => {
                let mut map = tagged(tag, block.id.as_deref());
                map.insert("text".into(), json!(block.text));
                map.insert("wrap".into(), json!(block.wrap));
                Value::Object(map)
            }
            Element::Image(image) => image_json(image),
            Element::Media(media) => media_json(media),
            Element::Container(container) => {
                let mut map = tagged(tag, container.id.as_deref());
                put_str(
                    &mut map,
                    "backgroundImage",
                    container.background_image.as_deref(),
                );
                map.insert(
                    "items".into(),
                    Value::Array(container.items.iter().map(Element::to_json).collect()),
                );
                put_action(&mut map, "selectAction", container.select_action.as_deref());
                Value::Object(map)
            }
            Element::ColumnSet(set) => {
                let mut map = tagged(tag, set.id.as_deref());
                map.insert(
                    "columns".into(),
                    Value::Array(set.columns.iter().map(column_json).collect()),
                );
                put_action(&mut map, "selectAction", set.select_action.as_deref());
                Value::Object(map)
            }
            Element::Column(column) => column_json(column),
            Element::ImageSet(set) => {
                let mut map = tagged(tag, set.id.as_deref());
                map.insert(
                    "images".into(),
                    Value::Array(set.images.iter().map(image_json).collect()),
                );
                Value::Object(map)
            }
            Element::FactSet(set) => {
                let mut map = tagged(tag, set.id.as_deref());
                let facts = set
                    .facts
                    .iter()
                    .map(|fact| json!({ "title": fact.title, "value": fact.value }))
                    .collect();
                map.insert("facts".into(), Value::Array(facts));
                Value::Object(map)
            }
            Element::ActionSet(set) => {
                let mut map = tagged(tag, set.id.as_deref());
                map.insert(
                    "actions".into(),
                    Value::Array(set.actions.iter().map(Action::to_json).collect()),
                );
                Value::Object(map)
            }
            Element::Input(input) => {
                let mut map = tagged(tag, Some(input.id.as_str()));
                put_str(&mut map, "label", input.label.as_deref());
                map.insert("isRequired".into(), json!(input.is_required));
                if let Some(value) = &input.value {
                    map.insert("value".into(), value.clone());
                }
                if input.kind == InputKind::ChoiceSet {
                    let choices = input
                        .choices
                        .iter()
                        .map(|choice| json!({ "title": choice.title, "value": choice.value }))
                        .collect();
                    map.insert("choices".into(), Value::Array(choices));
                }
                Value::Object(map)
            }
            Element::Unknown(unknown) => unknown.raw.clone(),
            Element::Custom(custom) => custom.to_json(),
        }
    }
}

fn image_json(image: &Image) -> Value {
    let mut map = tagged("Image", image.id.as_deref());
    map.insert("url".into(), json!(image.url));
    put_str(&mut map, "altText", image.alt_text.as_deref());
    put_action(&mut map, "selectAction", image.select_action.as_deref());
    Value::Object(map)
}

fn media_json(media: &Media) -> Value {
    let mut map = tagged("Media", media.id.as_deref());
    put_str(&mut map, "poster", media.poster.as_deref());
    put_str(&mut map, "altText", media.alt_text.as_deref());
    let sources = media
        .sources
        .iter()
        .map(|source| json!({ "mimeType": source.mime_type, "url": source.url }))
        .collect();
    map.insert("sources".into(), Value::Array(sources));
    Value::Object(map)
}

fn column_json(column: &Column) -> Value {
    let mut map = tagged("Column", column.id.as_deref());
    put_str(&mut map, "width", column.width.as_deref());
    map.insert(
        "items".into(),
        Value::Array(column.items.iter().map(Element::to_json).collect()),
    );
    put_action(&mut map, "selectAction", column.select_action.as_deref());
    Value::Object(map)
}

impl Action {
    pub fn to_json(&self) -> Value {
        let mut map = match self {
            Action::Unknown(unknown) => return unknown.raw.clone(),
            Action::Custom(custom) => return custom.to_json(),
            Action::Submit(a) => tagged(self.type_tag(), a.id.as_deref()),
            Action::OpenUrl(a) => tagged(self.type_tag(), a.id.as_deref()),
            Action::ShowCard(a) => tagged(self.type_tag(), a.id.as_deref()),
            Action::Execute(a) => tagged(self.type_tag(), a.id.as_deref()),
        };
        put_str(&mut map, "title", self.title());
        put_str(&mut map, "iconUrl", self.icon_url());
        match self {
            Action::Submit(submit) => {
                if let Some(data) = &submit.data {
                    map.insert("data".into(), data.clone());
                }
            }
            Action::OpenUrl(open) => {
                map.insert("url".into(), json!(open.url));
            }
            Action::ShowCard(show) => {
                map.insert("card".into(), show.card.to_json());
            }
            Action::Execute(execute) => {
                put_str(&mut map, "verb", execute.verb.as_deref());
                if let Some(data) = &execute.data {
                    map.insert("data".into(), data.clone());
                }
            }
            Action::Unknown(_) | Action::Custom(_) => {}
        }
        Value::Object(map)
    }
}
