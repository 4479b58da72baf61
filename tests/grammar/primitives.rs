//! Integration tests for the primitive matchers.

use cmdspec_grammar::primitive::{enumeration, int, space, token};
use cmdspec_grammar::{MatchOutcome, ParseNode};

fn values(node: &ParseNode) -> Vec<&str> {
    node.children
        .iter()
        .filter_map(|child| child.value.as_deref())
        .collect()
}

// =============================================================================
// Token
// =============================================================================

#[test]
fn empty_literal_is_always_full() {
    for (input, offset) in [("", 0), ("abc", 0), ("abc", 2), ("abc", 3), ("abc", 10)] {
        let node = token(input, offset, "");
        assert_eq!(node.outcome, MatchOutcome::Full, "{input:?} at {offset}");
        assert_eq!(node.length, Some(0));
    }
}

#[test]
fn token_ignores_case() {
    let node = token("FaRt", 0, "fart");
    assert_eq!(node.outcome, MatchOutcome::Full);
    assert_eq!(node.length, Some(4));
}

#[test]
fn token_prefix_is_partial() {
    let node = token("Fa", 0, "fart");
    assert_eq!(node.outcome, MatchOutcome::Partial);
    assert_eq!(node.length, Some(2));
}

#[test]
fn token_counts_input_bytes() {
    let node = token("ÜBER alles", 0, "über");
    assert_eq!(node.outcome, MatchOutcome::Full);
    assert_eq!(node.length, Some("ÜBER".len()));
}

// =============================================================================
// Int
// =============================================================================

#[test]
fn int_bounds() {
    let node = int("-264", 0, Some(-300), None);
    assert_eq!(node.outcome, MatchOutcome::Full);
    assert_eq!(node.value.as_deref(), Some("-264"));

    assert!(int("-264", 0, Some(-20), None).is_error());
    assert!(int("-264", 0, None, Some(-300)).is_error());
}

#[test]
fn int_messages_name_the_bound() {
    let low = int("3", 0, Some(5), None);
    assert_eq!(low.message.as_deref(), Some("3 is less than the minimum 5"));
    let high = int("30", 0, None, Some(5));
    assert_eq!(high.message.as_deref(), Some("30 is greater than the maximum 5"));
}

#[test]
fn lone_minus_is_not_a_number() {
    let node = int("-", 0, None, None);
    assert_eq!(node.message.as_deref(), Some("expected a number"));
}

// =============================================================================
// Enum
// =============================================================================

#[test]
fn enum_ambiguity_keeps_tied_candidates() {
    let candidates = ["fart", "Fartb", "fae"].map(String::from);
    let node = enumeration("Fargoo", 0, &candidates, true);
    assert_eq!(node.outcome, MatchOutcome::Full);
    assert_eq!(node.length, Some(3));
    assert_eq!(values(&node), vec!["fart", "Fartb"]);
}

#[test]
fn enum_unique_abbreviation_is_full() {
    let candidates = ["fart", "Fam", "fae"].map(String::from);
    let node = enumeration("Fargoo", 0, &candidates, false);
    assert_eq!(node.outcome, MatchOutcome::Full);
    assert_eq!(node.length, Some(3));
    assert_eq!(node.value.as_deref(), Some("fart"));
}

#[test]
fn enum_exact_literal_beats_longer_prefix() {
    let candidates = ["north", "no"].map(String::from);
    let node = enumeration("no", 0, &candidates, true);
    assert_eq!(node.outcome, MatchOutcome::Full);
    assert_eq!(node.value.as_deref(), Some("no"));
}

#[test]
fn enum_failure_lists_values() {
    let candidates = ["north", "south"].map(String::from);
    let node = enumeration("up", 0, &candidates, false);
    assert!(node.is_error());
    assert!(node.children.is_empty());
    assert_eq!(
        node.message.as_deref(),
        Some("input doesn't match any value in: north, south")
    );
}

// =============================================================================
// Space
// =============================================================================

#[test]
fn space_matches_runs_of_whitespace() {
    assert_eq!(space("a \t b", 1).length, Some(3));
    assert_eq!(space("ab", 1).length, Some(0));
    assert_eq!(space("ab", 2).outcome, MatchOutcome::Partial);
}
