//! Parser entry point.
//!
//! [`CommandParser::parse`] dispatches on the grammar variant and recurses
//! through the combinators into the primitive matchers, building the whole
//! [`ParseNode`] tree in one pass. Parsing is pure: the same arguments always
//! produce the same tree.

use std::fmt;

use tracing::{debug, trace};

use crate::config::ParserConfig;
use crate::node::ParseNode;
use crate::player::PlayerMatcher;
use crate::primitive;
use crate::spec::GrammarSpec;

/// Matches input against a grammar.
#[derive(Clone, Default)]
pub struct CommandParser<'p> {
    config: ParserConfig,
    player_matcher: Option<&'p dyn PlayerMatcher>,
}

impl fmt::Debug for CommandParser<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandParser")
            .field("config", &self.config)
            .field("player_matcher", &self.player_matcher.is_some())
            .finish()
    }
}

impl<'p> CommandParser<'p> {
    /// Creates a parser with default limits and no player resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the limits.
    #[must_use]
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the resolver used for `Player` grammar leaves.
    #[must_use]
    pub fn with_player_matcher(mut self, matcher: &'p dyn PlayerMatcher) -> Self {
        self.player_matcher = Some(matcher);
        self
    }

    /// Returns the limits in use.
    #[must_use]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Matches `input[offset..]` against `spec`.
    ///
    /// An `offset` past the end of `input` is treated as the end of input,
    /// and one inside a multi-byte character as that character's start.
    #[must_use]
    pub fn parse(&self, input: &str, offset: usize, spec: &GrammarSpec) -> ParseNode {
        trace!(input, offset, "parse");
        let mut offset = offset.min(input.len());
        while !input.is_char_boundary(offset) {
            offset -= 1;
        }
        self.dispatch(input, offset, spec, 0)
    }

    pub(crate) fn dispatch(
        &self,
        input: &str,
        offset: usize,
        spec: &GrammarSpec,
        depth: usize,
    ) -> ParseNode {
        if depth >= self.config.max_depth {
            debug!(depth, "grammar nesting limit reached");
            return ParseNode::error(offset, "grammar nesting too deep");
        }
        let depth = depth + 1;
        match spec {
            GrammarSpec::Int { min, max } => primitive::int(input, offset, *min, *max),
            GrammarSpec::Token(literal) => primitive::token(input, offset, literal),
            GrammarSpec::Enum { values, exact } => {
                primitive::enumeration(input, offset, values, *exact)
            }
            GrammarSpec::Space {} => primitive::space(input, offset),
            GrammarSpec::OneOf(alternatives) => self.one_of(input, offset, alternatives, depth),
            GrammarSpec::Chain(sequence) => self.chain(input, offset, sequence, depth),
            GrammarSpec::Many {
                min,
                max,
                delim,
                spec,
            } => self.many(input, offset, *min, *max, delim, spec, depth),
            GrammarSpec::Opt(inner) => self.opt(input, offset, inner, depth),
            GrammarSpec::Doc { name, desc, spec } => {
                self.doc(input, offset, name, desc.as_deref(), spec, depth)
            }
            GrammarSpec::Player {} => self.player(input, offset),
            GrammarSpec::Unrecognized(value) => {
                debug!(%value, "unrecognized grammar node");
                ParseNode::error(offset, "invalid command spec")
            }
        }
    }

    fn player(&self, input: &str, offset: usize) -> ParseNode {
        match self.player_matcher {
            Some(matcher) => matcher.match_player(input, offset),
            None => {
                debug!(offset, "player spec without a player matcher");
                ParseNode::error(offset, "no player names available")
            }
        }
    }
}

/// Matches `input[offset..]` against `spec` with default limits and no
/// player resolver.
#[must_use]
pub fn parse(input: &str, offset: usize, spec: &GrammarSpec) -> ParseNode {
    CommandParser::new().parse(input, offset, spec)
}
