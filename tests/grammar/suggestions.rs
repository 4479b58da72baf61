//! Suggestion, replacement and completion tests.

use cmdspec_grammar::{
    CommandParser, ErrorKind, GrammarSpec, PlayerEntry, PlayerRoster, Verdict, apply_suggestion,
    complete, parse, start_of_match, suggestions,
};

fn move_spec() -> GrammarSpec {
    GrammarSpec::chain([
        GrammarSpec::token("move"),
        GrammarSpec::space(),
        GrammarSpec::int(Some(1), Some(8)),
    ])
}

fn give_spec() -> GrammarSpec {
    GrammarSpec::chain([
        GrammarSpec::token("give"),
        GrammarSpec::space(),
        GrammarSpec::player(),
        GrammarSpec::space(),
        GrammarSpec::enumeration(["lamp", "key"], false),
    ])
}

fn roster() -> PlayerRoster {
    PlayerRoster::from_entries([
        PlayerEntry::new("Alice").with_alias("al"),
        PlayerEntry::new("Bob"),
    ])
}

// =============================================================================
// Suggestions
// =============================================================================

#[test]
fn cursor_inside_a_word_suggests_that_word() {
    let tree = parse("move 5", 0, &move_spec());
    assert_eq!(suggestions(&tree, 2), vec!["move"]);
    assert_eq!(start_of_match(&tree, 2), Some(0));
}

#[test]
fn cursor_after_a_word_suggests_the_argument() {
    let tree = parse("move 5", 0, &move_spec());
    assert_eq!(suggestions(&tree, 6), vec!["5"]);
    assert_eq!(start_of_match(&tree, 6), Some(5));
}

#[test]
fn int_slots_offer_nothing() {
    let tree = parse("move ", 0, &move_spec());
    assert!(suggestions(&tree, 5).is_empty());
}

#[test]
fn mismatched_input_suggests_nothing() {
    let tree = parse("zz", 0, &move_spec());
    assert!(tree.is_error());
    assert!(suggestions(&tree, 0).is_empty());
}

#[test]
fn ambiguous_prefix_lists_every_candidate() {
    let spec = GrammarSpec::enumeration(["fart", "fartb"], true);
    let tree = parse("far", 0, &spec);
    assert_eq!(suggestions(&tree, 3), vec!["fart", "fartb"]);
}

#[test]
fn start_of_match_at_zero_is_zero() {
    for input in ["", "move", "zzz"] {
        assert_eq!(start_of_match(&parse(input, 0, &move_spec()), 0), Some(0));
    }
}

// =============================================================================
// Completion
// =============================================================================

#[test]
fn completion_removes_duplicates() {
    let spec = GrammarSpec::one_of([GrammarSpec::token("look"), GrammarSpec::token("look")]);
    let tree = parse("lo", 0, &spec);
    assert_eq!(suggestions(&tree, 2).len(), 2);
    assert_eq!(complete(&tree, "lo", 2).candidates, vec!["look"]);
}

#[test]
fn completion_after_a_space_starts_at_the_cursor() {
    let spec = GrammarSpec::chain([
        GrammarSpec::token("go"),
        GrammarSpec::space(),
        GrammarSpec::enumeration(["north", "south"], false),
    ]);
    let completion = complete(&parse("go ", 0, &spec), "go ", 3);
    assert_eq!(completion.start, 3);
    assert_eq!(completion.candidates, vec!["north", "south"]);
}

#[test]
fn tab_completion_builds_a_full_command() {
    let roster = roster();
    let parser = CommandParser::new().with_player_matcher(&roster);
    let spec = give_spec();

    let mut line = String::new();
    for _ in 0..10 {
        let tree = parser.parse(&line, 0, &spec);
        if Verdict::of(&tree, &line).is_ready() {
            break;
        }
        let completion = complete(&tree, &line, line.len());
        assert!(!completion.is_empty(), "stuck at {line:?}");
        let (next, cursor) =
            apply_suggestion(&line, completion.start, line.len(), &completion.candidates[0])
                .unwrap();
        assert_eq!(cursor, next.len());
        line = next;
        if !Verdict::of(&parser.parse(&line, 0, &spec), &line).is_ready() {
            line.push(' ');
        }
    }
    assert_eq!(line, "give Alice lamp");
}

#[test]
fn typing_a_command_never_turns_invalid() {
    let roster = roster();
    let parser = CommandParser::new().with_player_matcher(&roster);
    let spec = give_spec();
    let command = "give alice key";

    for end in 0..command.len() {
        let prefix = &command[..end];
        let verdict = Verdict::of(&parser.parse(prefix, 0, &spec), prefix);
        assert!(
            matches!(verdict, Verdict::Incomplete { .. } | Verdict::Ready),
            "{prefix:?} gave {verdict}"
        );
    }
    let verdict = Verdict::of(&parser.parse(command, 0, &spec), command);
    assert_eq!(verdict, Verdict::Ready);
}

// =============================================================================
// Applying suggestions
// =============================================================================

#[test]
fn apply_replaces_the_typed_prefix() {
    let (line, cursor) = apply_suggestion("mo 5", 0, 2, "move").unwrap();
    assert_eq!(line, "move 5");
    assert_eq!(cursor, 4);
}

#[test]
fn apply_rejects_offsets_inside_a_character() {
    let err = apply_suggestion("é", 1, 2, "e").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidOffset { offset: 1, .. }));
}

#[test]
fn apply_rejects_start_after_cursor() {
    let err = apply_suggestion("move", 3, 1, "x").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidOffset { offset: 3, .. }));
}
