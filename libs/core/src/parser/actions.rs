//! Built-in action parsers.

use serde_json::Value;

use crate::error::ParseError;
use crate::model::{
    Action, ActionKind, ExecuteAction, OpenUrlAction, ShowCardAction, SubmitAction,
};
use crate::parser::ParseContext;
use crate::parser::fields::{self, Object};
use crate::registry::ActionParserRegistry;

pub(crate) fn register_builtins(registry: &mut ActionParserRegistry) {
    registry.register(tag(ActionKind::Submit), parse_submit);
    registry.register(tag(ActionKind::OpenUrl), parse_open_url);
    registry.register(tag(ActionKind::ShowCard), parse_show_card);
    registry.register(tag(ActionKind::Execute), parse_execute);
}

fn tag(kind: ActionKind) -> &'static str {
    kind.type_tag().unwrap_or_default()
}

struct Header {
    id: Option<String>,
    title: Option<String>,
    icon_url: Option<String>,
}

fn header(obj: &Object) -> Header {
    Header {
        id: fields::optional_string(obj, "id"),
        title: fields::optional_string(obj, "title"),
        icon_url: fields::optional_string(obj, "iconUrl"),
    }
}

fn data(obj: &Object) -> Option<Value> {
    obj.get("data").filter(|v| !v.is_null()).cloned()
}

pub fn parse_submit(_ctx: &mut ParseContext<'_>, value: &Value) -> Result<Action, ParseError> {
    let obj = fields::as_object(value, "Action.Submit")?;
    let Header { id, title, icon_url } = header(obj);
    Ok(Action::Submit(SubmitAction {
        id,
        title,
        icon_url,
        data: data(obj),
    }))
}

pub fn parse_open_url(_ctx: &mut ParseContext<'_>, value: &Value) -> Result<Action, ParseError> {
    let obj = fields::as_object(value, "Action.OpenUrl")?;
    let url = fields::required_string(obj, "url")?;
    let Header { id, title, icon_url } = header(obj);
    Ok(Action::OpenUrl(OpenUrlAction {
        id,
        title,
        icon_url,
        url,
    }))
}

/// Recurses into the nested card with the caller's registries, so custom
/// types stay available at every depth.
pub fn parse_show_card(ctx: &mut ParseContext<'_>, value: &Value) -> Result<Action, ParseError> {
    let obj = fields::as_object(value, "Action.ShowCard")?;
    let card = obj.get("card").ok_or_else(|| ParseError::missing("card"))?;
    let card = ctx.parse_nested_document(card)?;
    let Header { id, title, icon_url } = header(obj);
    Ok(Action::ShowCard(ShowCardAction {
        id,
        title,
        icon_url,
        card: Box::new(card),
    }))
}

pub fn parse_execute(_ctx: &mut ParseContext<'_>, value: &Value) -> Result<Action, ParseError> {
    let obj = fields::as_object(value, "Action.Execute")?;
    let Header { id, title, icon_url } = header(obj);
    Ok(Action::Execute(ExecuteAction {
        id,
        title,
        icon_url,
        verb: fields::optional_string(obj, "verb"),
        data: data(obj),
    }))
}
