//! Combinators: OneOf, Chain, Doc, Many and Opt.
//!
//! Combinators never settle ambiguity themselves. They keep every live
//! alternative in the tree and leave the choice to [`flatten`] and the
//! suggestion functions.

use tracing::debug;

use crate::node::{MatchOutcome, ParseNode};
use crate::parser::CommandParser;
use crate::primitive;
use crate::spec::GrammarSpec;
use crate::tree::{flatten, push};

/// Why a `Many` stopped repeating.
enum Stop {
    /// A repetition could not match at the given position.
    Failed(usize, Option<String>),
    /// A repetition or delimiter is still being typed.
    Open,
    /// Input ran out, the repetition cap was hit or a repetition was empty.
    Done,
}

impl CommandParser<'_> {
    pub(crate) fn one_of(
        &self,
        input: &str,
        offset: usize,
        alternatives: &[GrammarSpec],
        depth: usize,
    ) -> ParseNode {
        let children = alternatives
            .iter()
            .map(|spec| self.dispatch(input, offset, spec, depth))
            .collect();
        ParseNode::container(offset, children)
    }

    pub(crate) fn chain(
        &self,
        input: &str,
        offset: usize,
        sequence: &[GrammarSpec],
        depth: usize,
    ) -> ParseNode {
        let Some((first, rest)) = sequence.split_first() else {
            return ParseNode::full(offset, 0);
        };
        let head = self.dispatch(input, offset, first, depth);
        if rest.is_empty() {
            return head;
        }
        let combined = flatten(&head).combined;
        if combined.outcome != MatchOutcome::Full {
            debug!(offset, outcome = %combined.outcome, "chain head not full");
            return head;
        }
        let tail = self.chain(input, offset + combined.len(), rest, depth);
        push(&tail, head)
    }

    pub(crate) fn doc(
        &self,
        input: &str,
        offset: usize,
        name: &str,
        desc: Option<&str>,
        inner: &GrammarSpec,
        depth: usize,
    ) -> ParseNode {
        let mut node =
            ParseNode::container(offset, vec![self.dispatch(input, offset, inner, depth)]);
        node.name = Some(name.to_string());
        node.desc = desc.map(str::to_string);
        node
    }

    pub(crate) fn opt(
        &self,
        input: &str,
        offset: usize,
        inner: &GrammarSpec,
        depth: usize,
    ) -> ParseNode {
        let present = self.dispatch(input, offset, inner, depth);
        if flatten(&present).combined.is_error() {
            return ParseNode::full(offset, 0);
        }
        // absence stays a live alternative after the attempt
        ParseNode::full(offset, 0).with_children(vec![present, ParseNode::full(offset, 0)])
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn many(
        &self,
        input: &str,
        offset: usize,
        min: Option<usize>,
        max: Option<usize>,
        delim: &str,
        inner: &GrammarSpec,
        depth: usize,
    ) -> ParseNode {
        let cap = max.map_or(self.config().max_repetitions, |max| {
            max.min(self.config().max_repetitions)
        });
        let mut segments: Vec<ParseNode> = Vec::new();
        let mut count = 0;
        let mut position = offset;
        let min = min.unwrap_or(0);

        let stop = loop {
            let repetition = self.dispatch(input, position, inner, depth);
            let combined = flatten(&repetition).combined;
            match combined.outcome {
                MatchOutcome::Error => {
                    let failed_at = position;
                    // a dangling delimiter is not part of the match
                    if count > 0 {
                        if let Some(delimiter) = segments.pop() {
                            position = delimiter.offset;
                        }
                    }
                    break Stop::Failed(failed_at, combined.message);
                }
                MatchOutcome::Partial => {
                    if count == 0 && min == 0 && combined.is_empty() {
                        // nothing typed yet, so stopping here is also a match
                        segments.push(
                            ParseNode::full(position, 0)
                                .with_children(vec![repetition, ParseNode::full(position, 0)]),
                        );
                    } else {
                        segments.push(repetition);
                    }
                    break Stop::Open;
                }
                MatchOutcome::Full => {
                    count += 1;
                    position += combined.len();
                    segments.push(repetition);
                    if count >= cap || position >= input.len() || combined.is_empty() {
                        if count >= cap {
                            debug!(count, cap, "many reached repetition cap");
                        }
                        break Stop::Done;
                    }
                }
            }

            let delimiter = primitive::token(input, position, delim);
            match delimiter.outcome {
                MatchOutcome::Error => break Stop::Done,
                MatchOutcome::Partial => {
                    segments.push(delimiter);
                    break Stop::Open;
                }
                MatchOutcome::Full => {
                    position += delimiter.len();
                    segments.push(delimiter);
                }
            }
        };

        let outcome = match stop {
            _ if count >= min => MatchOutcome::Full,
            Stop::Failed(failed_at, message) => {
                let message = message.unwrap_or_else(|| {
                    format!("expected at least {min} repetitions, found {count}")
                });
                return ParseNode::error(failed_at, message);
            }
            Stop::Open => MatchOutcome::Partial,
            Stop::Done if position >= input.len() => MatchOutcome::Partial,
            Stop::Done => {
                return ParseNode::error(
                    position,
                    format!("expected at least {min} repetitions, found {count}"),
                );
            }
        };

        let chained = segments
            .into_iter()
            .rev()
            .reduce(|tail, segment| push(&tail, segment));
        match chained {
            Some(chained) => ParseNode::container(offset, vec![chained]).with_outcome(outcome),
            None => ParseNode::full(offset, 0).with_outcome(outcome),
        }
    }
}
