//! End-to-end tests: a small game grammar driven the way a prompt drives it.

use cmdspec_grammar::{
    CommandParser, DocHint, GrammarSpec, MatchOutcome, ParseNode, ParserConfig, PlayerEntry,
    PlayerRoster, Verdict, apply_suggestion, complete, describe, flatten, parse, suggestions,
};

fn move_spec() -> GrammarSpec {
    GrammarSpec::chain([
        GrammarSpec::token("move"),
        GrammarSpec::space(),
        GrammarSpec::int(Some(1), Some(8)),
    ])
}

fn game() -> GrammarSpec {
    GrammarSpec::one_of([
        move_spec(),
        GrammarSpec::token("look"),
        GrammarSpec::chain([
            GrammarSpec::token("give"),
            GrammarSpec::space(),
            GrammarSpec::doc("target", Some("who receives it"), GrammarSpec::player()),
            GrammarSpec::space(),
            GrammarSpec::many(Some(1), Some(3), ",", GrammarSpec::int(Some(1), None)),
        ]),
        GrammarSpec::chain([
            GrammarSpec::token("take"),
            GrammarSpec::space(),
            GrammarSpec::opt(GrammarSpec::chain([
                GrammarSpec::token("the"),
                GrammarSpec::space(),
            ])),
            GrammarSpec::enumeration(["lamp", "key"], false),
        ]),
    ])
}

fn roster() -> PlayerRoster {
    PlayerRoster::from_entries([
        PlayerEntry::new("Alice").with_alias("al"),
        PlayerEntry::new("Bob"),
    ])
}

fn check(input: &str) -> (ParseNode, Verdict) {
    let roster = roster();
    let parser = CommandParser::new().with_player_matcher(&roster);
    let tree = parser.parse(input, 0, &game());
    let verdict = Verdict::of(&tree, input);
    (tree, verdict)
}

#[test]
fn move_command_matches_fully() {
    let combined = flatten(&parse("move 5", 0, &move_spec())).combined;
    assert_eq!(combined.outcome, MatchOutcome::Full);
    assert_eq!(combined.length, Some(6));
}

#[test]
fn typing_a_verb_suggests_it() {
    let found = suggestions(&parse("mo", 0, &move_spec()), 2);
    assert!(found.contains(&"move".to_string()));
}

#[test]
fn empty_line_offers_every_verb() {
    let (tree, verdict) = check("");
    assert_eq!(suggestions(&tree, 0), vec!["move", "look", "give", "take"]);
    assert_eq!(verdict, Verdict::Incomplete { message: None });
}

#[test]
fn verbs_are_case_insensitive() {
    assert_eq!(check("MOVE 3").1, Verdict::Ready);
    assert_eq!(check("Look").1, Verdict::Ready);
}

#[test]
fn give_resolves_player_alias() {
    let (tree, verdict) = check("give al 1,2");
    assert_eq!(verdict, Verdict::Ready);
    assert_eq!(
        flatten(&tree).combined.value.as_deref(),
        Some("give Alice 1 , 2")
    );
}

#[test]
fn out_of_range_argument_is_invalid() {
    let (_, verdict) = check("move 0");
    assert_eq!(
        verdict,
        Verdict::Invalid {
            message: "0 is less than the minimum 1".to_string(),
            offset: 5,
        }
    );
}

#[test]
fn trailing_text_is_invalid() {
    let (_, verdict) = check("look around");
    assert_eq!(
        verdict,
        Verdict::Invalid {
            message: "unexpected input: ' around'".to_string(),
            offset: 4,
        }
    );
}

#[test]
fn optional_article_then_object() {
    let (tree, verdict) = check("take the ");
    assert_eq!(verdict, Verdict::Incomplete { message: None });

    let completion = complete(&tree, "take the ", 9);
    assert_eq!(completion.start, 9);
    assert_eq!(completion.candidates, vec!["lamp", "key"]);
}

#[test]
fn typing_an_optional_article_never_turns_invalid() {
    let line = "take the lamp";
    for end in 0..line.len() {
        let (_, verdict) = check(&line[..end]);
        assert!(
            !matches!(verdict, Verdict::Invalid { .. }),
            "{:?} gave {verdict}",
            &line[..end]
        );
    }
    assert_eq!(check(line).1, Verdict::Ready);
}

#[test]
fn accepting_a_suggestion_finishes_the_word() {
    let input = "take the la";
    let (tree, _) = check(input);
    let completion = complete(&tree, input, input.len());
    assert_eq!(completion.candidates, vec!["lamp"]);
    assert_eq!(completion.start, 9);

    let (line, cursor) =
        apply_suggestion(input, completion.start, input.len(), &completion.candidates[0])
            .unwrap();
    assert_eq!(line, "take the lamp");
    assert_eq!(cursor, 13);
    assert_eq!(check(&line).1, Verdict::Ready);
}

#[test]
fn player_slot_is_documented() {
    let (tree, _) = check("give ");
    assert_eq!(complete(&tree, "give ", 5).candidates, vec!["Alice", "Bob"]);
    assert_eq!(
        describe(&tree, 5),
        vec![DocHint {
            name: "target".to_string(),
            desc: Some("who receives it".to_string()),
        }]
    );
}

#[test]
fn deeply_nested_grammar_is_rejected_not_overflowed() {
    let mut spec = GrammarSpec::token("x");
    for level in 0..40 {
        spec = GrammarSpec::doc(format!("level{level}"), None, spec);
    }
    let parser = CommandParser::new().with_config(ParserConfig::strict());
    let tree = parser.parse("x", 0, &spec);
    assert_eq!(
        Verdict::of(&tree, "x"),
        Verdict::Invalid {
            message: "grammar nesting too deep".to_string(),
            offset: 0,
        }
    );
}
