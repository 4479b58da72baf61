//! The JSON wire format, in both directions.

use cmdspec_grammar::{GrammarSpec, MatchOutcome, ParseNode, Verdict, flatten, parse};
use serde_json::json;

const GAME: &str = r#"{
    "OneOf": [
        {"Chain": [{"Token": "move"}, {"Space": {}}, {"Int": {"min": 1, "max": 8}}]},
        {"Chain": [
            {"Enum": {"values": ["take", "get"], "exact": true}},
            {"Space": {}},
            {"Opt": {"Token": "the "}},
            {"Doc": {"name": "item", "desc": "what to pick up", "spec": {"Enum": {"values": ["lamp", "key"]}}}}
        ]},
        {"Chain": [
            {"Token": "drop"},
            {"Space": {}},
            {"Many": {"min": 1, "delim": " and ", "spec": {"Enum": {"values": ["lamp", "key"]}}}}
        ]}
    ]
}"#;

#[test]
fn game_grammar_loads_and_validates() {
    let spec = GrammarSpec::from_json(GAME).unwrap();
    spec.validate().unwrap();
    assert_eq!(spec.depth(), 4);
}

#[test]
fn game_grammar_accepts_commands() {
    let spec = GrammarSpec::from_json(GAME).unwrap();
    for input in ["move 8", "take lamp", "GET the key", "drop lamp and key"] {
        assert_eq!(
            Verdict::of(&parse(input, 0, &spec), input),
            Verdict::Ready,
            "{input:?}"
        );
    }
}

#[test]
fn grammar_survives_a_round_trip() {
    let spec = GrammarSpec::from_json(GAME).unwrap();
    let again = GrammarSpec::from_json(&spec.to_json().unwrap()).unwrap();
    assert_eq!(again, spec);
}

#[test]
fn optional_fields_are_omitted() {
    let spec = GrammarSpec::chain([
        GrammarSpec::int(None, Some(3)),
        GrammarSpec::space(),
        GrammarSpec::player(),
    ]);
    let value: serde_json::Value = serde_json::from_str(&spec.to_json().unwrap()).unwrap();
    assert_eq!(
        value,
        json!({"Chain": [{"Int": {"max": 3}}, {"Space": {}}, {"Player": {}}]})
    );
}

#[test]
fn unknown_node_matches_as_error() {
    let spec = GrammarSpec::from_json(r#"{"Chain": [{"Token": "cast"}, {"Spell": "fireball"}]}"#)
        .unwrap();
    assert!(spec.validate().is_err());

    let combined = flatten(&parse("cast", 0, &spec)).combined;
    assert_eq!(combined.outcome, MatchOutcome::Error);
    assert_eq!(combined.message.as_deref(), Some("invalid command spec"));
}

#[test]
fn malformed_variant_payload_is_unrecognized() {
    let spec = GrammarSpec::from_json(r#"{"Token": 5}"#).unwrap();
    assert!(matches!(spec, GrammarSpec::Unrecognized(_)));
}

#[test]
fn parse_tree_serializes_compactly() {
    let spec = GrammarSpec::chain([GrammarSpec::token("move"), GrammarSpec::int(None, None)]);
    let tree = parse("move5", 0, &spec);
    assert_eq!(
        serde_json::to_value(&tree).unwrap(),
        json!({
            "outcome": "Full",
            "offset": 0,
            "length": 4,
            "value": "move",
            "children": [{"outcome": "Full", "offset": 4, "length": 1, "value": "5"}]
        })
    );
}

#[test]
fn parse_tree_reads_back() {
    let json = r#"{"outcome": "Error", "offset": 2, "message": "expected 'move'"}"#;
    let node: ParseNode = serde_json::from_str(json).unwrap();
    assert_eq!(node, ParseNode::error(2, "expected 'move'"));
}
