//! Primitive matchers: Token, Int, Enum and Space.
//!
//! Each matcher looks at `input[offset..]` and returns a single node (Enum
//! may return a node whose children are the tied candidates).

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::node::{MatchOutcome, ParseNode};

static INT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]+").expect("valid int regex"));
static SPACE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*").expect("valid space regex"));

/// Length in bytes of the case-insensitive common prefix of `input` and
/// `literal`, measured in `input`, and whether all of `literal` was matched.
#[must_use]
pub fn common_prefix(input: &str, literal: &str) -> (usize, bool) {
    let mut literal_chars = literal.chars();
    let mut consumed = 0;
    for ic in input.chars() {
        let Some(lc) = literal_chars.next() else {
            return (consumed, true);
        };
        if !ic.to_lowercase().eq(lc.to_lowercase()) {
            return (consumed, false);
        }
        consumed += ic.len_utf8();
    }
    (consumed, literal_chars.next().is_none())
}

/// Matches a case-insensitive literal.
#[must_use]
pub fn token(input: &str, offset: usize, literal: &str) -> ParseNode {
    if literal.is_empty() {
        return ParseNode::full(offset, 0).with_value("");
    }
    if offset >= input.len() {
        return ParseNode::pending(offset).with_value(literal);
    }
    match common_prefix(&input[offset..], literal) {
        (0, _) => ParseNode::error(offset, format!("expected '{literal}'")),
        (consumed, true) => ParseNode::full(offset, consumed).with_value(literal),
        (consumed, false) => ParseNode::partial(offset, consumed).with_value(literal),
    }
}

/// Matches an optionally bounded integer.
#[must_use]
pub fn int(input: &str, offset: usize, min: Option<i64>, max: Option<i64>) -> ParseNode {
    if offset >= input.len() {
        return ParseNode::pending(offset);
    }
    let Some(found) = INT_PATTERN.find(&input[offset..]) else {
        return ParseNode::error(offset, "expected a number");
    };
    let text = found.as_str();
    let Ok(value) = text.parse::<i64>() else {
        return ParseNode::error(offset, format!("{text} is out of range"));
    };
    if let Some(min) = min {
        if value < min {
            return ParseNode::error(offset, format!("{value} is less than the minimum {min}"));
        }
    }
    if let Some(max) = max {
        if value > max {
            return ParseNode::error(offset, format!("{value} is greater than the maximum {max}"));
        }
    }
    ParseNode::full(offset, text.len()).with_value(text)
}

/// Matches one of a fixed set of literals.
///
/// Only the candidates that consumed the most input survive. A single
/// survivor is returned as-is, except that a non-exact Enum promotes a
/// `Partial` abbreviation that consumed something to `Full`. Several
/// survivors either resolve to the first `Full` among them or become
/// children of a `Full` ambiguity node.
#[must_use]
pub fn enumeration(input: &str, offset: usize, values: &[String], exact: bool) -> ParseNode {
    let mut best: Vec<ParseNode> = Vec::new();
    for value in values {
        let candidate = token(input, offset, value);
        if candidate.is_error() {
            continue;
        }
        match best.first().map(ParseNode::len) {
            Some(len) if candidate.len() < len => {}
            Some(len) if candidate.len() == len => best.push(candidate),
            _ => best = vec![candidate],
        }
    }

    match best.len() {
        0 => ParseNode::error(
            offset,
            format!("input doesn't match any value in: {}", values.join(", ")),
        ),
        1 => {
            let only = best.remove(0);
            if !exact && !only.is_empty() {
                only.with_outcome(MatchOutcome::Full)
            } else {
                only
            }
        }
        _ => {
            if let Some(index) = best.iter().position(ParseNode::is_full) {
                return best.swap_remove(index);
            }
            trace!(offset, candidates = best.len(), "ambiguous enum");
            let consumed = best[0].len();
            ParseNode::full(offset, consumed).with_children(best)
        }
    }
}

/// Matches a run of whitespace, which may be empty.
#[must_use]
pub fn space(input: &str, offset: usize) -> ParseNode {
    if offset >= input.len() {
        return ParseNode::pending(offset);
    }
    let consumed = SPACE_PATTERN
        .find(&input[offset..])
        .map_or(0, |found| found.end());
    ParseNode::full(offset, consumed)
}
