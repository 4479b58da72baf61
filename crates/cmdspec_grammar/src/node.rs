//! Match results.
//!
//! Every matcher and combinator produces a [`ParseNode`]. Nodes are built
//! bottom-up during a single parse call and are not modified afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Three-valued match outcome.
///
/// Variants are declared in ascending rank so the derived `Ord` gives
/// `Full > Partial > Error`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// The input cannot match at this position.
    Error,
    /// The input matches so far and could still complete.
    Partial,
    /// The input matches completely.
    Full,
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Partial => write!(f, "partial"),
            Self::Full => write!(f, "full"),
        }
    }
}

/// One node of a match-result tree.
///
/// `offset` and `length` are byte positions into the parsed input. A `Full`
/// or `Partial` node may carry children: alternative continuations (OneOf
/// branches, Enum ambiguity candidates) or the tail of a Chain grafted onto
/// it. `Error` nodes never have children.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseNode {
    /// How well this node matched.
    pub outcome: MatchOutcome,
    /// Absolute position in the input where this node starts.
    pub offset: usize,
    /// Bytes of input consumed, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
    /// Canonical text of the match, used as a suggestion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Name from an enclosing `Doc` spec.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description from an enclosing `Doc` spec.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    /// Human-readable reason for an `Error` outcome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Alternatives or continuations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ParseNode>,
}

impl ParseNode {
    fn bare(outcome: MatchOutcome, offset: usize, length: Option<usize>) -> Self {
        Self {
            outcome,
            offset,
            length,
            value: None,
            name: None,
            desc: None,
            message: None,
            children: Vec::new(),
        }
    }

    /// A `Full` node consuming `length` bytes.
    #[must_use]
    pub fn full(offset: usize, length: usize) -> Self {
        Self::bare(MatchOutcome::Full, offset, Some(length))
    }

    /// A `Partial` node consuming `length` bytes.
    #[must_use]
    pub fn partial(offset: usize, length: usize) -> Self {
        Self::bare(MatchOutcome::Partial, offset, Some(length))
    }

    /// A `Partial` node at the end of input, where nothing has been typed yet.
    #[must_use]
    pub fn pending(offset: usize) -> Self {
        Self::bare(MatchOutcome::Partial, offset, None)
    }

    /// A `Full` node with no length of its own, used to hold alternatives.
    #[must_use]
    pub fn container(offset: usize, children: Vec<ParseNode>) -> Self {
        Self::bare(MatchOutcome::Full, offset, None).with_children(children)
    }

    /// An `Error` node.
    #[must_use]
    pub fn error(offset: usize, message: impl Into<String>) -> Self {
        let mut node = Self::bare(MatchOutcome::Error, offset, None);
        node.message = Some(message.into());
        node
    }

    /// Sets the value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets the children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<ParseNode>) -> Self {
        self.children = children;
        self
    }

    /// Sets the outcome.
    #[must_use]
    pub fn with_outcome(mut self, outcome: MatchOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    /// Returns true for `Full` nodes.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.outcome == MatchOutcome::Full
    }

    /// Returns true for `Error` nodes.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.outcome == MatchOutcome::Error
    }

    /// Consumed length, treating an unknown length as zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.length.unwrap_or(0)
    }

    /// Returns true if this node consumed no input.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Position just past the consumed input.
    #[must_use]
    pub fn end(&self) -> usize {
        self.offset + self.len()
    }

    /// Returns true if `cursor` lies within `[offset, offset + length]`.
    #[must_use]
    pub fn covers(&self, cursor: usize) -> bool {
        self.offset <= cursor && cursor <= self.end()
    }

    /// Ranking key: outcome first, then consumed length.
    #[must_use]
    pub fn rank(&self) -> (MatchOutcome, usize) {
        (self.outcome, self.len())
    }

    /// Returns true if this node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Furthest input position reached by this node or any descendant.
    #[must_use]
    pub fn extent(&self) -> usize {
        self.children
            .iter()
            .map(ParseNode::extent)
            .fold(self.end(), usize::max)
    }

    /// Depth-first, pre-order iterator over this node and its descendants.
    pub fn iter(&self) -> impl Iterator<Item = &ParseNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }
}
