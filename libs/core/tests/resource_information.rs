use acsm_core::{
    Action, CardParser, CustomAction, CustomElement, Element, ParseContext, ParseError,
    ResourceDescriptor, gather,
};
use acsm_testutil::{card_sample_path, load_card, load_card_text};
use serde_json::Value;
use std::any::Any;

#[derive(Debug)]
struct ImageHolder {
    type_tag: String,
    image: String,
}

impl ImageHolder {
    fn from_json(value: &Value) -> Result<Self, ParseError> {
        let type_tag = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| ParseError::missing("type"))?;
        Ok(Self {
            type_tag: type_tag.to_string(),
            image: value
                .get("customImageProperty")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        })
    }
}

// one type backing both a custom element and a custom action
impl CustomElement for ImageHolder {
    fn type_tag(&self) -> &str {
        &self.type_tag
    }

    fn resource_information(&self, resources: &mut Vec<ResourceDescriptor>) {
        resources.push(ResourceDescriptor::image(self.image.clone()));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl CustomAction for ImageHolder {
    fn type_tag(&self) -> &str {
        &self.type_tag
    }

    fn resource_information(&self, resources: &mut Vec<ResourceDescriptor>) {
        resources.push(ResourceDescriptor::image(self.image.clone()));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn custom_element(_ctx: &mut ParseContext<'_>, value: &Value) -> Result<Element, ParseError> {
    Ok(Element::Custom(Box::new(ImageHolder::from_json(value)?)))
}

fn custom_action(_ctx: &mut ParseContext<'_>, value: &Value) -> Result<Action, ParseError> {
    Ok(Action::Custom(Box::new(ImageHolder::from_json(value)?)))
}

fn custom_parser() -> CardParser {
    let mut parser = CardParser::default();
    parser.register_element_parser("CustomTypeWithImage", custom_element);
    parser.register_action_parser("CustomActionWithImage", custom_action);
    parser
}

#[test]
fn gathers_every_built_in_resource_location_in_order() {
    let text = load_card_text!(&card_sample_path("all_resources"));
    let (parsed, resources) = CardParser::default()
        .resources_from_str(&text)
        .expect("card parses");
    assert!(parsed.warnings.is_empty(), "{:?}", parsed.warnings);

    assert_eq!(
        resources,
        vec![
            ResourceDescriptor::image("BackgroundImage.png"),
            ResourceDescriptor::image("Image.png"),
            ResourceDescriptor::image("Media.Poster.png"),
            ResourceDescriptor::media("Media1.mp4", "video/mp4"),
            ResourceDescriptor::media("Media2.ogg", "video/ogg"),
            ResourceDescriptor::image("ImageSet.Image1.png"),
            ResourceDescriptor::image("ImageSet.Image2.png"),
            ResourceDescriptor::image("Container.Image1.png"),
            ResourceDescriptor::image("Container.Image2.png"),
            ResourceDescriptor::image("ColumnSet.Column1.Image.png"),
            ResourceDescriptor::image("ColumnSet.Column2.Image.png"),
            ResourceDescriptor::image("ShowCard.Image.png"),
        ]
    );
}

#[test]
fn gathers_custom_element_and_action_resources() {
    let card = load_card!(&card_sample_path("custom_resources"));
    let parsed = custom_parser().parse_value(&card).expect("card parses");
    assert!(parsed.warnings.is_empty(), "{:?}", parsed.warnings);

    let custom = parsed.document.body[1].as_custom().expect("custom element");
    assert_eq!(custom.type_tag(), "CustomTypeWithImage");
    assert!(custom.as_any().downcast_ref::<ImageHolder>().is_some());
    assert_eq!(
        parsed.document.actions[0].type_tag(),
        "CustomActionWithImage"
    );

    assert_eq!(
        gather(&parsed.document),
        vec![
            ResourceDescriptor::image("BackgroundImage.png"),
            ResourceDescriptor::image("Image.png"),
            ResourceDescriptor::image("Custom.png"),
            ResourceDescriptor::image("Action.Custom.png"),
        ]
    );
}

#[test]
fn custom_types_are_unknown_without_registration() {
    let card = load_card!(&card_sample_path("custom_resources"));
    let parsed = CardParser::default().parse_value(&card).expect("card parses");
    assert_eq!(parsed.warnings.len(), 2);
    assert!(matches!(parsed.document.body[1], Element::Unknown(_)));
    assert!(matches!(parsed.document.actions[0], Action::Unknown(_)));
    assert_eq!(
        gather(&parsed.document),
        vec![
            ResourceDescriptor::image("BackgroundImage.png"),
            ResourceDescriptor::image("Image.png"),
        ]
    );
}

#[test]
fn custom_parsers_apply_inside_show_cards() {
    let card = serde_json::json!({
        "type": "AdaptiveCard",
        "version": "1.0",
        "actions": [{
            "type": "Action.ShowCard",
            "card": {
                "type": "AdaptiveCard",
                "body": [{ "type": "CustomTypeWithImage", "customImageProperty": "Deep.png" }],
                "actions": [{ "type": "CustomActionWithImage", "customImageProperty": "Deeper.png" }]
            }
        }]
    });
    let parsed = custom_parser().parse_value(&card).expect("card parses");
    assert!(parsed.warnings.is_empty(), "{:?}", parsed.warnings);
    assert_eq!(
        gather(&parsed.document),
        vec![
            ResourceDescriptor::image("Deep.png"),
            ResourceDescriptor::image("Deeper.png"),
        ]
    );
}

#[test]
fn action_icons_and_select_actions_are_gathered() {
    let card = load_card!(&card_sample_path("action_icons"));
    let parsed = CardParser::default().parse_value(&card).expect("card parses");
    assert!(parsed.warnings.is_empty(), "{:?}", parsed.warnings);
    assert_eq!(
        gather(&parsed.document),
        vec![
            ResourceDescriptor::image("Container.Background.png"),
            ResourceDescriptor::image("Select.Icon.png"),
            ResourceDescriptor::image("Submit.Icon.png"),
            ResourceDescriptor::image("ShowCard.Icon.png"),
            ResourceDescriptor::image("Nested.Image.png"),
            ResourceDescriptor::image("Nested.Execute.Icon.png"),
            ResourceDescriptor::image("OpenUrl.Icon.png"),
        ]
    );
}

#[test]
fn gathering_is_repeatable() {
    let card = load_card!(&card_sample_path("all_resources"));
    let parsed = CardParser::default().parse_value(&card).expect("card parses");
    let first = parsed.document.resource_information();
    let second = parsed.document.resource_information();
    assert_eq!(first, second);
    assert_eq!(first.len(), 12);
}

#[test]
fn serialized_tree_reparses_to_the_same_resources() {
    let card = load_card!(&card_sample_path("all_resources"));
    let parser = CardParser::default();
    let parsed = parser.parse_value(&card).expect("card parses");
    let reparsed = parser
        .parse_value(&parsed.document.to_json())
        .expect("serialized card parses");
    assert_eq!(gather(&parsed.document), gather(&reparsed.document));
}
