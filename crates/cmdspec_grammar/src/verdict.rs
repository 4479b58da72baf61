//! Submit readiness.

use std::fmt;

use crate::node::{MatchOutcome, ParseNode};
use crate::tree::flatten;

/// Whether a line can be submitted, and what to tell the user if not.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The whole input is a complete command.
    Ready,
    /// The input is valid so far and could still complete.
    Incomplete {
        /// Extra detail, when the best path carries one.
        message: Option<String>,
    },
    /// The input cannot become a valid command.
    Invalid {
        /// What went wrong.
        message: String,
        /// Where it went wrong.
        offset: usize,
    },
}

impl Verdict {
    /// Judges `input` from the tree it parsed into.
    #[must_use]
    pub fn of(tree: &ParseNode, input: &str) -> Self {
        let flattened = flatten(tree);
        let combined = &flattened.combined;

        // Some branch may still be typing up to the end of the line.
        let typing = tree.iter().any(|node| {
            node.outcome == MatchOutcome::Partial && node.end() >= input.len()
        });

        if combined.is_error() {
            if typing {
                return Self::Incomplete { message: None };
            }
            let failure = flattened
                .flat
                .iter()
                .find(|node| node.is_error())
                .or_else(|| tree.iter().find(|node| node.is_error()));
            return match failure {
                Some(node) => Self::Invalid {
                    message: node
                        .message
                        .clone()
                        .unwrap_or_else(|| "invalid command".to_string()),
                    offset: node.offset,
                },
                None => Self::Invalid {
                    message: "invalid command".to_string(),
                    offset: combined.offset,
                },
            };
        }

        let end = combined.end();
        if end >= input.len() {
            return match combined.outcome {
                MatchOutcome::Full => Self::Ready,
                _ => Self::Incomplete {
                    message: combined.message.clone(),
                },
            };
        }

        if typing {
            return Self::Incomplete { message: None };
        }
        Self::Invalid {
            message: format!("unexpected input: '{}'", &input[end..]),
            offset: end,
        }
    }

    /// Returns true if the line may be submitted.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// The message to show the user, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Ready => None,
            Self::Incomplete { message } => message.as_deref(),
            Self::Invalid { message, .. } => Some(message),
        }
    }

    /// Offset of the first error, for `Invalid`.
    #[must_use]
    pub fn error_offset(&self) -> Option<usize> {
        match self {
            Self::Invalid { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => write!(f, "ready"),
            Self::Incomplete { message: None } => write!(f, "incomplete"),
            Self::Incomplete {
                message: Some(message),
            } => write!(f, "incomplete: {message}"),
            Self::Invalid { message, offset } => write!(f, "{message} (at {offset})"),
        }
    }
}
