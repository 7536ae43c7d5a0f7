use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::custom::CustomAction;
use crate::model::document::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Submit,
    OpenUrl,
    ShowCard,
    Execute,
    Unknown,
    Custom,
}

impl ActionKind {
    pub const BUILT_INS: [ActionKind; 4] = [
        ActionKind::Submit,
        ActionKind::OpenUrl,
        ActionKind::ShowCard,
        ActionKind::Execute,
    ];

    pub fn type_tag(&self) -> Option<&'static str> {
        match self {
            ActionKind::Submit => Some("Action.Submit"),
            ActionKind::OpenUrl => Some("Action.OpenUrl"),
            ActionKind::ShowCard => Some("Action.ShowCard"),
            ActionKind::Execute => Some("Action.Execute"),
            ActionKind::Unknown | ActionKind::Custom => None,
        }
    }
}

#[derive(Debug)]
pub enum Action {
    Submit(SubmitAction),
    OpenUrl(OpenUrlAction),
    ShowCard(ShowCardAction),
    Execute(ExecuteAction),
    Unknown(UnknownAction),
    Custom(Box<dyn CustomAction>),
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Submit(_) => ActionKind::Submit,
            Action::OpenUrl(_) => ActionKind::OpenUrl,
            Action::ShowCard(_) => ActionKind::ShowCard,
            Action::Execute(_) => ActionKind::Execute,
            Action::Unknown(_) => ActionKind::Unknown,
            Action::Custom(_) => ActionKind::Custom,
        }
    }

    pub fn type_tag(&self) -> &str {
        match self {
            Action::Unknown(unknown) => &unknown.type_tag,
            Action::Custom(custom) => custom.type_tag(),
            other => other.kind().type_tag().unwrap_or_default(),
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Action::Submit(a) => a.title.as_deref(),
            Action::OpenUrl(a) => a.title.as_deref(),
            Action::ShowCard(a) => a.title.as_deref(),
            Action::Execute(a) => a.title.as_deref(),
            Action::Unknown(a) => a.raw.get("title").and_then(Value::as_str),
            Action::Custom(_) => None,
        }
    }

    pub fn icon_url(&self) -> Option<&str> {
        match self {
            Action::Submit(a) => a.icon_url.as_deref(),
            Action::OpenUrl(a) => a.icon_url.as_deref(),
            Action::ShowCard(a) => a.icon_url.as_deref(),
            Action::Execute(a) => a.icon_url.as_deref(),
            Action::Unknown(_) | Action::Custom(_) => None,
        }
    }

    pub fn as_custom(&self) -> Option<&dyn CustomAction> {
        match self {
            Action::Custom(custom) => Some(custom.as_ref()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubmitAction {
    pub id: Option<String>,
    pub title: Option<String>,
    pub icon_url: Option<String>,
    pub data: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OpenUrlAction {
    pub id: Option<String>,
    pub title: Option<String>,
    pub icon_url: Option<String>,
    pub url: String,
}

/// Owns the nested card revealed when the action is invoked.
#[derive(Debug)]
pub struct ShowCardAction {
    pub id: Option<String>,
    pub title: Option<String>,
    pub icon_url: Option<String>,
    pub card: Box<Document>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExecuteAction {
    pub id: Option<String>,
    pub title: Option<String>,
    pub icon_url: Option<String>,
    pub verb: Option<String>,
    pub data: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnknownAction {
    pub type_tag: String,
    pub raw: Value,
}
