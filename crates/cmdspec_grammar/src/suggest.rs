//! Suggestions and cursor positions.
//!
//! These run after parsing, on every keystroke: [`suggestions`] lists what
//! could be typed at the cursor and [`start_of_match`] tells the editor where
//! a chosen suggestion should be spliced in. [`complete`] bundles the two the
//! way a line editor wants them.

use crate::error::{Error, Result};
use crate::node::ParseNode;

/// Candidate completions at `cursor`.
///
/// Depth-first. A node contributes its value only when the cursor lies in
/// `[offset, offset + length]` and none of its descendants contributed, so
/// the deepest live match wins. `Error` nodes never contribute.
#[must_use]
pub fn suggestions(tree: &ParseNode, cursor: usize) -> Vec<String> {
    let mut found = Vec::new();
    collect(tree, cursor, &mut found);
    found
}

fn collect(node: &ParseNode, cursor: usize, found: &mut Vec<String>) -> bool {
    if node.is_error() {
        return false;
    }
    let before = found.len();
    for child in &node.children {
        collect(child, cursor, found);
    }
    if found.len() > before {
        return true;
    }
    match node.value.as_deref() {
        Some(value) if !value.is_empty() && node.covers(cursor) => {
            found.push(value.to_string());
            true
        }
        _ => false,
    }
}

/// Start of the matched segment under `cursor`.
///
/// Cursor `0` is always `Some(0)`. Otherwise the deepest node that consumed
/// input and whose interval covers the cursor gives the answer, whitespace
/// included; `None` if no node does.
#[must_use]
pub fn start_of_match(tree: &ParseNode, cursor: usize) -> Option<usize> {
    if cursor == 0 {
        return Some(0);
    }
    find_start(tree, cursor, false)
}

fn find_start(node: &ParseNode, cursor: usize, valued: bool) -> Option<usize> {
    if node.is_error() {
        return None;
    }
    node.children
        .iter()
        .find_map(|child| find_start(child, cursor, valued))
        .or_else(|| {
            ((!valued || node.value.is_some()) && !node.is_empty() && node.covers(cursor))
                .then_some(node.offset)
        })
}

/// Where a suggestion chosen at `cursor` should start replacing `input`.
///
/// Only valued nodes anchor the replacement, so a suggestion typed after
/// whitespace never swallows the separator. Falls back to the start of the
/// word under the cursor, but never reaches back into input that a `Full`
/// node already consumed.
#[must_use]
pub fn replacement_start(tree: &ParseNode, input: &str, cursor: usize) -> usize {
    let cursor = floor_boundary(input, cursor);
    let anchored = if cursor == 0 {
        Some(0)
    } else {
        find_start(tree, cursor, true)
    };
    if let Some(start) = anchored {
        return start.min(cursor);
    }
    let word_start = input[..cursor]
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map_or(0, |(i, c)| i + c.len_utf8());
    let settled = tree
        .iter()
        .filter(|node| node.is_full() && !node.is_empty() && node.end() <= cursor)
        .map(ParseNode::end)
        .max()
        .unwrap_or(0);
    word_start.max(settled)
}

fn floor_boundary(input: &str, offset: usize) -> usize {
    let mut offset = offset.min(input.len());
    while !input.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Replaces `input[start..cursor]` with `suggestion`.
///
/// Returns the new text and the cursor position just after the suggestion.
///
/// # Errors
///
/// Returns an error if `start > cursor` or either offset is not a character
/// boundary of `input`.
pub fn apply_suggestion(
    input: &str,
    start: usize,
    cursor: usize,
    suggestion: &str,
) -> Result<(String, usize)> {
    for offset in [start, cursor] {
        if !input.is_char_boundary(offset) {
            return Err(Error::invalid_offset(offset, input.len()));
        }
    }
    if start > cursor {
        return Err(Error::invalid_offset(start, input.len())
            .with_context(format!("replacement starts after the cursor at {cursor}")));
    }
    let mut text = String::with_capacity(input.len() + suggestion.len());
    text.push_str(&input[..start]);
    text.push_str(suggestion);
    text.push_str(&input[cursor..]);
    Ok((text, start + suggestion.len()))
}

/// Suggestions at a cursor, ready for a line editor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Completion {
    /// Offset where the replacement starts.
    pub start: usize,
    /// Distinct candidates, in suggestion order.
    pub candidates: Vec<String>,
}

impl Completion {
    /// Returns true if there is nothing to offer.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Collects the suggestions at `cursor` and where they should be spliced.
#[must_use]
pub fn complete(tree: &ParseNode, input: &str, cursor: usize) -> Completion {
    let mut candidates: Vec<String> = Vec::new();
    for suggestion in suggestions(tree, cursor) {
        if !candidates.contains(&suggestion) {
            candidates.push(suggestion);
        }
    }
    Completion {
        start: replacement_start(tree, input, cursor),
        candidates,
    }
}

/// Help text attached to a grammar through `Doc`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocHint {
    /// Short name.
    pub name: String,
    /// Longer description, if any.
    pub desc: Option<String>,
}

/// Documentation for the grammar elements around `cursor`, innermost first.
#[must_use]
pub fn describe(tree: &ParseNode, cursor: usize) -> Vec<DocHint> {
    let mut hints: Vec<DocHint> = Vec::new();
    for node in tree.iter() {
        let Some(name) = &node.name else { continue };
        if node.offset > cursor || cursor > node.extent() {
            continue;
        }
        let hint = DocHint {
            name: name.clone(),
            desc: node.desc.clone(),
        };
        if !hints.contains(&hint) {
            hints.push(hint);
        }
    }
    hints.reverse();
    hints
}
