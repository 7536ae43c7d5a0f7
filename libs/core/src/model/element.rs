use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::action::Action;
use crate::model::custom::CustomElement;

/// Discriminator for body elements. Built-in kinds map to a fixed type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    TextBlock,
    Image,
    Media,
    Container,
    ColumnSet,
    Column,
    ImageSet,
    FactSet,
    ActionSet,
    TextInput,
    NumberInput,
    DateInput,
    TimeInput,
    ToggleInput,
    ChoiceSetInput,
    Unknown,
    Custom,
}

impl ElementKind {
    pub const BUILT_INS: [ElementKind; 15] = [
        ElementKind::TextBlock,
        ElementKind::Image,
        ElementKind::Media,
        ElementKind::Container,
        ElementKind::ColumnSet,
        ElementKind::Column,
        ElementKind::ImageSet,
        ElementKind::FactSet,
        ElementKind::ActionSet,
        ElementKind::TextInput,
        ElementKind::NumberInput,
        ElementKind::DateInput,
        ElementKind::TimeInput,
        ElementKind::ToggleInput,
        ElementKind::ChoiceSetInput,
    ];

    /// Type tag for built-in kinds; `None` for `Unknown` and `Custom`.
    pub fn type_tag(&self) -> Option<&'static str> {
        let tag = match self {
            ElementKind::TextBlock => "TextBlock",
            ElementKind::Image => "Image",
            ElementKind::Media => "Media",
            ElementKind::Container => "Container",
            ElementKind::ColumnSet => "ColumnSet",
            ElementKind::Column => "Column",
            ElementKind::ImageSet => "ImageSet",
            ElementKind::FactSet => "FactSet",
            ElementKind::ActionSet => "ActionSet",
            ElementKind::TextInput => "Input.Text",
            ElementKind::NumberInput => "Input.Number",
            ElementKind::DateInput => "Input.Date",
            ElementKind::TimeInput => "Input.Time",
            ElementKind::ToggleInput => "Input.Toggle",
            ElementKind::ChoiceSetInput => "Input.ChoiceSet",
            ElementKind::Unknown | ElementKind::Custom => return None,
        };
        Some(tag)
    }
}

#[derive(Debug)]
pub enum Element {
    TextBlock(TextBlock),
    Image(Image),
    Media(Media),
    Container(Container),
    ColumnSet(ColumnSet),
    Column(Column),
    ImageSet(ImageSet),
    FactSet(FactSet),
    ActionSet(ActionSet),
    Input(Input),
    Unknown(UnknownElement),
    Custom(Box<dyn CustomElement>),
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::TextBlock(_) => ElementKind::TextBlock,
            Element::Image(_) => ElementKind::Image,
            Element::Media(_) => ElementKind::Media,
            Element::Container(_) => ElementKind::Container,
            Element::ColumnSet(_) => ElementKind::ColumnSet,
            Element::Column(_) => ElementKind::Column,
            Element::ImageSet(_) => ElementKind::ImageSet,
            Element::FactSet(_) => ElementKind::FactSet,
            Element::ActionSet(_) => ElementKind::ActionSet,
            Element::Input(input) => input.kind.element_kind(),
            Element::Unknown(_) => ElementKind::Unknown,
            Element::Custom(_) => ElementKind::Custom,
        }
    }

    pub fn type_tag(&self) -> &str {
        match self {
            Element::Unknown(unknown) => &unknown.type_tag,
            Element::Custom(custom) => custom.type_tag(),
            other => other.kind().type_tag().unwrap_or_default(),
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Element::TextBlock(e) => e.id.as_deref(),
            Element::Image(e) => e.id.as_deref(),
            Element::Media(e) => e.id.as_deref(),
            Element::Container(e) => e.id.as_deref(),
            Element::ColumnSet(e) => e.id.as_deref(),
            Element::Column(e) => e.id.as_deref(),
            Element::ImageSet(e) => e.id.as_deref(),
            Element::FactSet(e) => e.id.as_deref(),
            Element::ActionSet(e) => e.id.as_deref(),
            Element::Input(e) => Some(e.id.as_str()),
            Element::Unknown(e) => e.raw.get("id").and_then(Value::as_str),
            Element::Custom(_) => None,
        }
    }

    pub fn as_custom(&self) -> Option<&dyn CustomElement> {
        match self {
            Element::Custom(custom) => Some(custom.as_ref()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextBlock {
    pub id: Option<String>,
    pub text: String,
    pub wrap: bool,
}

#[derive(Debug, Default)]
pub struct Image {
    pub id: Option<String>,
    pub url: String,
    pub alt_text: Option<String>,
    pub select_action: Option<Box<Action>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Media {
    pub id: Option<String>,
    pub poster: Option<String>,
    pub alt_text: Option<String>,
    pub sources: Vec<MediaSource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MediaSource {
    pub mime_type: String,
    pub url: String,
}

#[derive(Debug, Default)]
pub struct Container {
    pub id: Option<String>,
    pub background_image: Option<String>,
    pub items: Vec<Element>,
    pub select_action: Option<Box<Action>>,
}

#[derive(Debug, Default)]
pub struct ColumnSet {
    pub id: Option<String>,
    pub columns: Vec<Column>,
    pub select_action: Option<Box<Action>>,
}

#[derive(Debug, Default)]
pub struct Column {
    pub id: Option<String>,
    pub width: Option<String>,
    pub items: Vec<Element>,
    pub select_action: Option<Box<Action>>,
}

#[derive(Debug, Default)]
pub struct ImageSet {
    pub id: Option<String>,
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FactSet {
    pub id: Option<String>,
    pub facts: Vec<Fact>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fact {
    pub title: String,
    pub value: String,
}

#[derive(Debug, Default)]
pub struct ActionSet {
    pub id: Option<String>,
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputKind {
    Text,
    Number,
    Date,
    Time,
    Toggle,
    ChoiceSet,
}

impl InputKind {
    pub fn element_kind(&self) -> ElementKind {
        match self {
            InputKind::Text => ElementKind::TextInput,
            InputKind::Number => ElementKind::NumberInput,
            InputKind::Date => ElementKind::DateInput,
            InputKind::Time => ElementKind::TimeInput,
            InputKind::Toggle => ElementKind::ToggleInput,
            InputKind::ChoiceSet => ElementKind::ChoiceSetInput,
        }
    }

    pub fn from_type_tag(tag: &str) -> Option<Self> {
        match tag {
            "Input.Text" => Some(InputKind::Text),
            "Input.Number" => Some(InputKind::Number),
            "Input.Date" => Some(InputKind::Date),
            "Input.Time" => Some(InputKind::Time),
            "Input.Toggle" => Some(InputKind::Toggle),
            "Input.ChoiceSet" => Some(InputKind::ChoiceSet),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Input {
    pub id: String,
    pub kind: InputKind,
    pub label: Option<String>,
    pub is_required: bool,
    pub value: Option<Value>,
    pub choices: Vec<InputChoice>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputChoice {
    pub title: String,
    pub value: String,
}

/// Inert placeholder for a type tag nothing knows how to parse.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownElement {
    pub type_tag: String,
    pub raw: Value,
}
