//! Tree algorithms over match results.
//!
//! [`flatten`] picks the best-ranked path through an ambiguous tree and
//! [`push`] grafts a continuation onto every open leaf. Chain uses both: it
//! flattens its head to learn how far the head advanced, then pushes the tail
//! onto every live head alternative so none of them is lost for suggestions.

use crate::node::ParseNode;

/// Result of [`flatten`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Flattened {
    /// The node with only the winning child kept at each level.
    pub flat: ParseNode,
    /// A childless summary of the winning path.
    ///
    /// `offset` is the root's offset, `length` spans to the furthest position
    /// the path reached, `outcome` is the weakest outcome on the path and
    /// `value` joins the path's values with single spaces.
    pub combined: ParseNode,
}

/// Selects the single best branch through `node`.
///
/// Children are compared by the `(outcome, length)` of their own combined
/// summary; the first child wins ties.
#[must_use]
pub fn flatten(node: &ParseNode) -> Flattened {
    let mut candidates = node.children.iter().map(flatten);
    let first = if node.is_error() { None } else { candidates.next() };
    let Some(first) = first else {
        let mut combined = node.clone();
        combined.children.clear();
        return Flattened {
            flat: node.clone(),
            combined,
        };
    };
    let best = candidates.fold(first, |best, candidate| {
        if candidate.combined.rank() > best.combined.rank() {
            candidate
        } else {
            best
        }
    });

    let end = node.end().max(best.combined.end());
    let combined = ParseNode {
        outcome: node.outcome.min(best.combined.outcome),
        offset: node.offset,
        length: Some(end.saturating_sub(node.offset)),
        value: join_values(node.value.as_deref(), best.combined.value.as_deref()),
        name: node.name.clone().or_else(|| best.combined.name.clone()),
        desc: node.desc.clone().or_else(|| best.combined.desc.clone()),
        message: best.combined.message.clone().or_else(|| node.message.clone()),
        children: Vec::new(),
    };
    let mut flat = node.clone();
    flat.children = vec![best.flat];

    Flattened { flat, combined }
}

fn join_values(own: Option<&str>, rest: Option<&str>) -> Option<String> {
    match (own, rest) {
        (Some(own), Some(rest)) if !own.is_empty() && !rest.is_empty() => {
            Some(format!("{own} {rest}"))
        }
        (Some(own), Some(rest)) if own.is_empty() => Some(rest.to_string()),
        (Some(own), _) => Some(own.to_string()),
        (None, rest) => rest.map(str::to_string),
    }
}

/// Appends `result` as an extra child of every non-`Error` leaf of `into`.
#[must_use]
pub fn push(result: &ParseNode, mut into: ParseNode) -> ParseNode {
    graft(result, &mut into);
    into
}

fn graft(result: &ParseNode, node: &mut ParseNode) {
    if node.is_error() {
        return;
    }
    if node.is_leaf() {
        node.children.push(result.clone());
        return;
    }
    for child in &mut node.children {
        graft(result, child);
    }
}
