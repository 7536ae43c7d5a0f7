//! Built-in element parsers.

use serde_json::Value;

use crate::error::ParseError;
use crate::model::{
    Action, ActionSet, Column, ColumnSet, Container, Element, ElementKind, Fact, FactSet, Image,
    ImageSet, Input, InputChoice, InputKind, Media, MediaSource, TextBlock,
};
use crate::parser::ParseContext;
use crate::parser::fields::{self, Object};
use crate::registry::ElementParserRegistry;
use crate::warning::{ParseWarning, WarningStatusCode};

pub(crate) fn register_builtins(registry: &mut ElementParserRegistry) {
    registry.register(tag(ElementKind::TextBlock), parse_text_block);
    registry.register(tag(ElementKind::Image), parse_image);
    registry.register(tag(ElementKind::Media), parse_media);
    registry.register(tag(ElementKind::Container), parse_container);
    registry.register(tag(ElementKind::ColumnSet), parse_column_set);
    registry.register(tag(ElementKind::Column), parse_column);
    registry.register(tag(ElementKind::ImageSet), parse_image_set);
    registry.register(tag(ElementKind::FactSet), parse_fact_set);
    registry.register(tag(ElementKind::ActionSet), parse_action_set);
    for kind in [
        ElementKind::TextInput,
        ElementKind::NumberInput,
        ElementKind::DateInput,
        ElementKind::TimeInput,
        ElementKind::ToggleInput,
        ElementKind::ChoiceSetInput,
    ] {
        registry.register(tag(kind), parse_input);
    }
}

fn tag(kind: ElementKind) -> &'static str {
    kind.type_tag().unwrap_or_default()
}

fn select_action(ctx: &mut ParseContext<'_>, obj: &Object) -> Option<Box<Action>> {
    let value = obj.get("selectAction")?;
    ctx.parse_action(value).map(Box::new)
}

pub fn parse_text_block(_ctx: &mut ParseContext<'_>, value: &Value) -> Result<Element, ParseError> {
    let obj = fields::as_object(value, "TextBlock")?;
    Ok(Element::TextBlock(TextBlock {
        id: fields::optional_string(obj, "id"),
        text: obj
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        wrap: fields::bool_or(obj, "wrap", false),
    }))
}

pub fn parse_image(ctx: &mut ParseContext<'_>, value: &Value) -> Result<Element, ParseError> {
    image_from_json(ctx, value).map(Element::Image)
}

pub(crate) fn image_from_json(
    ctx: &mut ParseContext<'_>,
    value: &Value,
) -> Result<Image, ParseError> {
    let obj = fields::as_object(value, "Image")?;
    Ok(Image {
        id: fields::optional_string(obj, "id"),
        url: fields::required_string(obj, "url")?,
        alt_text: fields::optional_string(obj, "altText"),
        select_action: select_action(ctx, obj),
    })
}

pub fn parse_media(_ctx: &mut ParseContext<'_>, value: &Value) -> Result<Element, ParseError> {
    let obj = fields::as_object(value, "Media")?;
    let sources = match obj.get("sources") {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                let source = fields::as_object(item, "sources")?;
                Ok(MediaSource {
                    mime_type: fields::optional_string(source, "mimeType").unwrap_or_default(),
                    url: fields::required_string(source, "url")?,
                })
            })
            .collect::<Result<Vec<_>, ParseError>>()?,
        Some(_) => return Err(ParseError::invalid("sources", "expected an array")),
        None => return Err(ParseError::missing("sources")),
    };
    Ok(Element::Media(Media {
        id: fields::optional_string(obj, "id"),
        poster: fields::optional_string(obj, "poster"),
        alt_text: fields::optional_string(obj, "altText"),
        sources,
    }))
}

pub fn parse_container(ctx: &mut ParseContext<'_>, value: &Value) -> Result<Element, ParseError> {
    let obj = fields::as_object(value, "Container")?;
    Ok(Element::Container(Container {
        id: fields::optional_string(obj, "id"),
        background_image: fields::url_property(obj, "backgroundImage"),
        items: ctx.parse_elements(obj.get("items"), "items"),
        select_action: select_action(ctx, obj),
    }))
}

pub fn parse_column(ctx: &mut ParseContext<'_>, value: &Value) -> Result<Element, ParseError> {
    column_from_json(ctx, value).map(Element::Column)
}

pub(crate) fn column_from_json(
    ctx: &mut ParseContext<'_>,
    value: &Value,
) -> Result<Column, ParseError> {
    let obj = fields::as_object(value, "Column")?;
    let width = match obj.get("width") {
        Some(Value::String(width)) => Some(width.clone()),
        Some(Value::Number(width)) => Some(width.to_string()),
        _ => None,
    };
    Ok(Column {
        id: fields::optional_string(obj, "id"),
        width,
        items: ctx.parse_elements(obj.get("items"), "items"),
        select_action: select_action(ctx, obj),
    })
}

pub fn parse_column_set(ctx: &mut ParseContext<'_>, value: &Value) -> Result<Element, ParseError> {
    let obj = fields::as_object(value, "ColumnSet")?;
    let columns = typed_children(
        ctx,
        obj.get("columns"),
        "columns",
        tag(ElementKind::Column),
        column_from_json,
    );
    Ok(Element::ColumnSet(ColumnSet {
        id: fields::optional_string(obj, "id"),
        columns,
        select_action: select_action(ctx, obj),
    }))
}

pub fn parse_image_set(ctx: &mut ParseContext<'_>, value: &Value) -> Result<Element, ParseError> {
    let obj = fields::as_object(value, "ImageSet")?;
    let images = typed_children(
        ctx,
        obj.get("images"),
        "images",
        tag(ElementKind::Image),
        image_from_json,
    );
    Ok(Element::ImageSet(ImageSet {
        id: fields::optional_string(obj, "id"),
        images,
    }))
}

/// Parses children that must have one fixed built-in shape (columns of a
/// column set, images of an image set). A missing `type` defaults to
/// `expected`; anything else is reported and skipped.
fn typed_children<T>(
    ctx: &mut ParseContext<'_>,
    value: Option<&Value>,
    property: &str,
    expected: &str,
    build: fn(&mut ParseContext<'_>, &Value) -> Result<T, ParseError>,
) -> Vec<T> {
    let items = match value {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(items)) => items,
        Some(_) => {
            ctx.warn(
                WarningStatusCode::InvalidPropertyValue,
                format!("'{property}' must be an array"),
            );
            return Vec::new();
        }
    };

    let mut children = Vec::with_capacity(items.len());
    for item in items {
        let declared = item.get("type").and_then(Value::as_str);
        if let Some(declared) = declared
            && declared != expected
        {
            ctx.drop_with(
                WarningStatusCode::UnknownElementType,
                Some(declared),
                format!("'{property}' only accepts '{expected}', found '{declared}'"),
            );
            continue;
        }
        if let Err(err) = ctx.enter() {
            let warning = ParseWarning::from_error(&err, expected);
            ctx.drop_with(warning.status_code, Some(expected), warning.message);
            continue;
        }
        let built = build(ctx, item);
        ctx.leave();
        match built {
            Ok(child) => children.push(child),
            Err(err) => {
                let warning = ParseWarning::from_error(&err, expected);
                ctx.drop_with(warning.status_code, Some(expected), warning.message);
            }
        }
    }
    children
}

pub fn parse_fact_set(ctx: &mut ParseContext<'_>, value: &Value) -> Result<Element, ParseError> {
    let obj = fields::as_object(value, "FactSet")?;
    let mut facts = Vec::new();
    for fact in obj.get("facts").and_then(Value::as_array).into_iter().flatten() {
        let parsed = fact.as_object().and_then(|fact| {
            Some(Fact {
                title: fact.get("title")?.as_str()?.to_string(),
                value: fact.get("value")?.as_str()?.to_string(),
            })
        });
        match parsed {
            Some(fact) => facts.push(fact),
            None => ctx.warn(
                WarningStatusCode::InvalidPropertyValue,
                "fact entries need string 'title' and 'value'",
            ),
        }
    }
    Ok(Element::FactSet(FactSet {
        id: fields::optional_string(obj, "id"),
        facts,
    }))
}

pub fn parse_action_set(ctx: &mut ParseContext<'_>, value: &Value) -> Result<Element, ParseError> {
    let obj = fields::as_object(value, "ActionSet")?;
    Ok(Element::ActionSet(ActionSet {
        id: fields::optional_string(obj, "id"),
        actions: ctx.parse_actions(obj.get("actions"), "actions"),
    }))
}

/// Shared parser for every `Input.*` tag.
pub fn parse_input(ctx: &mut ParseContext<'_>, value: &Value) -> Result<Element, ParseError> {
    let obj = fields::as_object(value, "Input")?;
    let declared = fields::type_tag(obj).unwrap_or_default();
    let kind = InputKind::from_type_tag(declared)
        .ok_or_else(|| ParseError::invalid("type", format!("'{declared}' is not an input type")))?;

    let mut choices = Vec::new();
    if kind == InputKind::ChoiceSet {
        for choice in obj.get("choices").and_then(Value::as_array).into_iter().flatten() {
            let parsed = choice.as_object().and_then(|choice| {
                Some(InputChoice {
                    title: choice.get("title")?.as_str()?.to_string(),
                    value: choice.get("value")?.as_str()?.to_string(),
                })
            });
            match parsed {
                Some(choice) => choices.push(choice),
                None => ctx.warn(
                    WarningStatusCode::InvalidPropertyValue,
                    "choices need string 'title' and 'value'",
                ),
            }
        }
    }

    Ok(Element::Input(Input {
        id: fields::required_string(obj, "id")?,
        kind,
        label: fields::optional_string(obj, "label"),
        is_required: fields::bool_or(obj, "isRequired", false),
        value: obj.get("value").filter(|v| !v.is_null()).cloned(),
        choices,
    }))
}
