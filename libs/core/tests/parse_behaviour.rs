use acsm_core::{
    Action, CardParser, Element, ElementParserRegistry, ErrorStatusCode, ParseContext,
    ParseError, ParseOptions, ResourceDescriptor, SchemaVersion, WarningStatusCode, gather,
};
use acsm_testutil::load_card;
use serde_json::{Value, json};

fn codes(warnings: &[acsm_core::ParseWarning]) -> Vec<WarningStatusCode> {
    warnings.iter().map(|w| w.status_code).collect()
}

#[test]
fn element_without_type_is_dropped_and_siblings_survive() {
    let card = json!({
        "type": "AdaptiveCard",
        "version": "1.0",
        "body": [
            { "type": "Image", "url": "first.png" },
            { "url": "orphan.png" },
            { "type": "Image", "url": "last.png" }
        ]
    });
    let parsed = CardParser::default().parse_value(&card).expect("card parses");
    assert_eq!(parsed.document.body.len(), 2);
    assert_eq!(
        codes(&parsed.warnings),
        vec![WarningStatusCode::RequiredPropertyMissing]
    );
    assert_eq!(
        gather(&parsed.document),
        vec![
            ResourceDescriptor::image("first.png"),
            ResourceDescriptor::image("last.png"),
        ]
    );
}

#[test]
fn invalid_built_in_is_dropped_with_a_warning() {
    let card = json!({
        "type": "AdaptiveCard",
        "version": "1.0",
        "body": [{ "type": "Image" }, { "type": "TextBlock", "text": "kept" }]
    });
    let parsed = CardParser::default().parse_value(&card).expect("card parses");
    assert_eq!(parsed.document.body.len(), 1);
    assert_eq!(parsed.document.body[0].type_tag(), "TextBlock");
    assert_eq!(parsed.warnings.len(), 1);
    assert!(parsed.warnings[0].message.contains("url"));
}

#[test]
fn duplicate_references_are_reported_each_time() {
    let card = json!({
        "type": "AdaptiveCard",
        "version": "1.0",
        "backgroundImage": "same.png",
        "body": [
            { "type": "Image", "url": "same.png" },
            { "type": "Container", "items": [{ "type": "Image", "url": "same.png" }] }
        ]
    });
    let parsed = CardParser::default().parse_value(&card).expect("card parses");
    assert_eq!(
        gather(&parsed.document),
        vec![ResourceDescriptor::image("same.png"); 3]
    );
}

#[test]
fn show_card_resources_follow_top_level_ones() {
    let card = json!({
        "type": "AdaptiveCard",
        "version": "1.0",
        "body": [{ "type": "Image", "url": "body.png" }],
        "actions": [{
            "type": "Action.ShowCard",
            "card": { "type": "AdaptiveCard", "body": [{ "type": "Image", "url": "nested.png" }] }
        }]
    });
    let parsed = CardParser::default().parse_value(&card).expect("card parses");
    let Action::ShowCard(show) = &parsed.document.actions[0] else {
        panic!("expected a show card action");
    };
    assert_eq!(show.card.version, SchemaVersion::new(1, 0));
    assert_eq!(
        gather(&parsed.document),
        vec![
            ResourceDescriptor::image("body.png"),
            ResourceDescriptor::image("nested.png"),
        ]
    );
}

#[test]
fn fallback_rules_replace_drop_or_keep_unknown_elements() {
    let card = load_card!("tests/fixtures/cards/fallback.yaml");
    let parsed = CardParser::default().parse_value(&card).expect("card parses");

    let tags: Vec<&str> = parsed.document.body.iter().map(Element::type_tag).collect();
    assert_eq!(tags, vec!["Image", "Sparkline", "TextBlock"]);
    assert!(matches!(parsed.document.body[1], Element::Unknown(_)));
    assert_eq!(
        codes(&parsed.warnings),
        vec![
            WarningStatusCode::FallbackUsed,
            WarningStatusCode::ElementDropped,
            WarningStatusCode::UnknownElementType,
        ]
    );
    assert_eq!(
        gather(&parsed.document),
        vec![ResourceDescriptor::image("Graph.Fallback.png")]
    );
}

#[test]
fn nesting_beyond_max_depth_is_cut_off() {
    let card = json!({
        "type": "AdaptiveCard",
        "version": "1.0",
        "body": [{
            "type": "Container",
            "items": [{
                "type": "Container",
                "items": [{ "type": "Image", "url": "too-deep.png" }]
            }]
        }]
    });
    let parser = CardParser::default().with_options(ParseOptions::default().with_max_depth(2));
    let parsed = parser.parse_value(&card).expect("card parses");
    assert_eq!(
        codes(&parsed.warnings),
        vec![WarningStatusCode::MaxDepthExceeded]
    );
    assert!(gather(&parsed.document).is_empty());
    let Element::Container(outer) = &parsed.document.body[0] else {
        panic!("expected container");
    };
    assert_eq!(outer.items.len(), 1);
}

#[test]
fn root_failures_are_fatal() {
    let parser = CardParser::default();
    let cases = [
        ("[]", ErrorStatusCode::InvalidJson),
        ("{not json", ErrorStatusCode::InvalidJson),
        (r#"{"type":"AdaptiveCard"}"#, ErrorStatusCode::RequiredPropertyMissing),
        (r#"{"version":"1.0"}"#, ErrorStatusCode::RequiredPropertyMissing),
        (
            r#"{"type":"Container","version":"1.0"}"#,
            ErrorStatusCode::InvalidPropertyValue,
        ),
        (
            r#"{"type":"AdaptiveCard","version":"one"}"#,
            ErrorStatusCode::InvalidPropertyValue,
        ),
        (
            r#"{"type":"AdaptiveCard","version":"9.0"}"#,
            ErrorStatusCode::UnsupportedSchemaVersion,
        ),
    ];
    for (card, expected) in cases {
        let err = parser.parse_str(card).expect_err(card);
        assert_eq!(err.status_code(), expected, "{card}");
    }
}

#[test]
fn renderer_version_bounds_accepted_cards() {
    let options = ParseOptions::default().with_renderer_version(SchemaVersion::new(1, 2));
    let parser = CardParser::default().with_options(options);
    assert!(parser
        .parse_str(r#"{"type":"AdaptiveCard","version":"1.2"}"#)
        .is_ok());
    let err = parser
        .parse_str(r#"{"type":"AdaptiveCard","version":"1.3"}"#)
        .unwrap_err();
    assert!(matches!(err, ParseError::UnsupportedSchemaVersion { .. }));
}

#[test]
fn nested_card_with_newer_version_drops_the_show_card() {
    let options = ParseOptions::default().with_renderer_version(SchemaVersion::new(1, 2));
    let card = json!({
        "type": "AdaptiveCard",
        "version": "1.0",
        "actions": [
            { "type": "Action.ShowCard", "card": { "type": "AdaptiveCard", "version": "1.5" } },
            { "type": "Action.Submit", "title": "ok" }
        ]
    });
    let parsed = CardParser::default()
        .with_options(options)
        .parse_value(&card)
        .expect("card parses");
    assert_eq!(parsed.document.actions.len(), 1);
    assert_eq!(parsed.document.actions[0].title(), Some("ok"));
    assert_eq!(parsed.warnings.len(), 1);
}

#[test]
fn nested_card_with_non_string_version_drops_the_show_card() {
    let card = json!({
        "type": "AdaptiveCard",
        "version": "1.0",
        "actions": [
            { "type": "Action.ShowCard", "card": { "type": "AdaptiveCard", "version": 9 } },
            { "type": "Action.ShowCard", "card": { "type": "AdaptiveCard", "version": true } },
            { "type": "Action.Submit", "title": "ok" }
        ]
    });
    let parsed = CardParser::default().parse_value(&card).expect("card parses");
    assert_eq!(parsed.document.actions.len(), 1);
    assert_eq!(parsed.document.actions[0].title(), Some("ok"));
    assert_eq!(
        codes(&parsed.warnings),
        vec![
            WarningStatusCode::InvalidPropertyValue,
            WarningStatusCode::InvalidPropertyValue,
        ]
    );
    assert!(parsed.warnings[0].message.contains("version"));
}

#[test]
fn nested_card_with_blank_or_null_version_inherits_the_parent() {
    let card = json!({
        "type": "AdaptiveCard",
        "version": "1.3",
        "actions": [
            { "type": "Action.ShowCard", "card": { "version": "  " } },
            { "type": "Action.ShowCard", "card": { "version": null } }
        ]
    });
    let parsed = CardParser::default().parse_value(&card).expect("card parses");
    assert!(parsed.warnings.is_empty(), "{:?}", parsed.warnings);
    for action in &parsed.document.actions {
        let Action::ShowCard(show) = action else {
            panic!("expected a show card action");
        };
        assert_eq!(show.card.version, SchemaVersion::new(1, 3));
    }
}

#[test]
fn action_without_type_is_dropped_wherever_it_appears() {
    let card = json!({
        "type": "AdaptiveCard",
        "version": "1.0",
        "body": [
            {
                "type": "Container",
                "items": [],
                "selectAction": { "url": "https://example.com" }
            },
            {
                "type": "ActionSet",
                "actions": [
                    { "title": "orphan" },
                    { "type": "Action.Submit", "title": "in set" }
                ]
            }
        ],
        "actions": [
            { "type": "Action.Submit", "title": "first" },
            { "title": "no type", "iconUrl": "lost.png" },
            { "type": "Action.OpenUrl", "url": "https://example.com", "iconUrl": "kept.png" }
        ]
    });
    let parsed = CardParser::default().parse_value(&card).expect("card parses");

    let Element::Container(container) = &parsed.document.body[0] else {
        panic!("expected container");
    };
    assert!(container.select_action.is_none());
    let Element::ActionSet(set) = &parsed.document.body[1] else {
        panic!("expected action set");
    };
    assert_eq!(set.actions.len(), 1);
    assert_eq!(set.actions[0].title(), Some("in set"));

    let titles: Vec<_> = parsed.document.actions.iter().map(Action::type_tag).collect();
    assert_eq!(titles, vec!["Action.Submit", "Action.OpenUrl"]);
    assert_eq!(
        codes(&parsed.warnings),
        vec![WarningStatusCode::RequiredPropertyMissing; 3]
    );
    assert_eq!(
        gather(&parsed.document),
        vec![ResourceDescriptor::image("kept.png")]
    );
}

#[test]
fn action_fallback_replaces_or_drops() {
    let card = json!({
        "type": "AdaptiveCard",
        "version": "1.0",
        "actions": [
            {
                "type": "Action.Future",
                "fallback": {
                    "type": "Action.OpenUrl",
                    "url": "https://example.com",
                    "iconUrl": "fallback.png"
                }
            },
            { "type": "Action.Other", "fallback": "drop" },
            {
                "type": "Action.OpenUrl",
                "fallback": { "type": "Action.Submit", "title": "instead" }
            },
            { "type": "Action.Mystery" }
        ]
    });
    let parsed = CardParser::default().parse_value(&card).expect("card parses");

    let tags: Vec<_> = parsed.document.actions.iter().map(Action::type_tag).collect();
    assert_eq!(tags, vec!["Action.OpenUrl", "Action.Submit", "Action.Mystery"]);
    assert!(matches!(parsed.document.actions[2], Action::Unknown(_)));
    assert_eq!(parsed.document.actions[1].title(), Some("instead"));
    assert_eq!(
        codes(&parsed.warnings),
        vec![
            WarningStatusCode::FallbackUsed,
            WarningStatusCode::ElementDropped,
            WarningStatusCode::RequiredPropertyMissing,
            WarningStatusCode::FallbackUsed,
            WarningStatusCode::UnknownActionType,
        ]
    );
    assert_eq!(
        gather(&parsed.document),
        vec![ResourceDescriptor::image("fallback.png")]
    );
}

#[test]
fn unregistered_built_in_becomes_unknown() {
    let mut parser = CardParser::default();
    assert!(parser.unregister_element_parser("Image"));
    let parsed = parser
        .parse_str(r#"{"type":"AdaptiveCard","version":"1.0","body":[{"type":"Image","url":"a.png"}]}"#)
        .expect("card parses");
    assert!(matches!(parsed.document.body[0], Element::Unknown(_)));
    assert!(gather(&parsed.document).is_empty());
}

fn shouting_text(ctx: &mut ParseContext<'_>, value: &Value) -> Result<Element, ParseError> {
    let Element::TextBlock(mut block) = acsm_core::parser::elements::parse_text_block(ctx, value)?
    else {
        return Err(ParseError::invalid("type", "expected TextBlock"));
    };
    block.text = block.text.to_uppercase();
    Ok(Element::TextBlock(block))
}

#[test]
fn overriding_a_built_in_only_affects_that_registry() {
    let mut elements = ElementParserRegistry::with_builtins();
    elements.register("TextBlock", shouting_text);
    let card = r#"{"type":"AdaptiveCard","version":"1.0","body":[{"type":"TextBlock","text":"hi"}]}"#;

    let custom = CardParser::new(elements, Default::default())
        .parse_str(card)
        .expect("card parses");
    let stock = CardParser::default().parse_str(card).expect("card parses");

    let text = |element: &Element| match element {
        Element::TextBlock(block) => block.text.clone(),
        other => panic!("unexpected {other:?}"),
    };
    assert_eq!(text(&custom.document.body[0]), "HI");
    assert_eq!(text(&stock.document.body[0]), "hi");
}

#[tracing_test::traced_test]
#[test]
fn warnings_are_logged() {
    let parsed = CardParser::default()
        .parse_str(r#"{"type":"AdaptiveCard","version":"1.0","body":[{"type":"Chart"}]}"#)
        .expect("card parses");
    assert_eq!(parsed.warnings.len(), 1);
    assert!(logs_contain("card parse warning"));
    assert!(logs_contain("unknown_element_type"));
}

#[tracing_test::traced_test]
#[test]
fn every_dropped_node_is_logged_as_a_warning() {
    let parsed = CardParser::default()
        .parse_str(
            r#"{"type":"AdaptiveCard","version":"1.0",
                "body":[{"text":"no type"},{"type":"Rating","fallback":"drop"}],
                "actions":[{"title":"no type"}]}"#,
        )
        .expect("card parses");
    assert!(parsed.document.body.is_empty());
    assert!(parsed.document.actions.is_empty());
    assert_eq!(parsed.warnings.len(), 3);
    assert!(logs_contain("dropping card node"));
    assert!(logs_contain("element is missing its 'type' property"));
    assert!(logs_contain("action is missing its 'type' property"));
    assert!(logs_contain("element 'Rating' dropped by its fallback"));
}
