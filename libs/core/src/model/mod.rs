pub mod action;
pub mod custom;
pub mod document;
pub mod element;

pub use action::{
    Action, ActionKind, ExecuteAction, OpenUrlAction, ShowCardAction, SubmitAction, UnknownAction,
};
pub use custom::{CustomAction, CustomElement};
pub use document::{ADAPTIVE_CARD_TYPE, Document};
pub use element::{
    ActionSet, Column, ColumnSet, Container, Element, ElementKind, Fact, FactSet, Image, ImageSet,
    Input, InputChoice, InputKind, Media, MediaSource, TextBlock, UnknownElement,
};
