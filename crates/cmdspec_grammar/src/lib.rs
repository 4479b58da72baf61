//! Autocomplete-aware matching of command input against a declarative grammar.
//!
//! The engine takes a raw command line, an offset and a [`GrammarSpec`] and
//! builds a [`ParseNode`] tree recording every live way the input could
//! match, including prefixes that are valid but not finished yet. Hosts then
//! query the tree for completions at the cursor and for submit readiness.
//!
//! # Architecture
//!
//! ```text
//! "move 5"  +  {"Chain": [{"Token": "move"}, {"Space": {}}, {"Int": ...}]}
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ PRIMITIVES      │  Token, Int, Enum, Space, Player
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ COMBINATORS     │  OneOf, Chain, Doc, Many, Opt
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ PARSE TREE      │  → Full(move) → Full(space) → Full(5)
//! └─────────────────┘
//!          │
//!          ├──────────────────────┐
//!          ▼                      ▼
//! ┌─────────────────┐    ┌─────────────────┐
//! │ FLATTEN         │    │ SUGGESTIONS     │
//! │ → Verdict       │    │ StartOfMatch    │
//! └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`spec`] - The grammar tree and its JSON wire form
//! - [`node`] - Match results
//! - [`primitive`] - Leaf matchers
//! - [`parser`] - Entry point and combinators
//! - [`tree`] - Flatten and Push
//! - [`suggest`] - Suggestions, replacement positions, doc hints
//! - [`verdict`] - Submit readiness
//! - [`player`] - Player name resolution
//! - [`config`] - Parser limits
//!
//! # Example
//!
//! ```
//! use cmdspec_grammar::{GrammarSpec, Verdict, flatten, parse, suggestions};
//!
//! let spec = GrammarSpec::chain([
//!     GrammarSpec::token("move"),
//!     GrammarSpec::space(),
//!     GrammarSpec::int(Some(1), Some(8)),
//! ]);
//!
//! let tree = parse("move 5", 0, &spec);
//! assert_eq!(flatten(&tree).combined.length, Some(6));
//! assert_eq!(Verdict::of(&tree, "move 5"), Verdict::Ready);
//!
//! let tree = parse("mo", 0, &spec);
//! assert_eq!(suggestions(&tree, 2), vec!["move"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod combinator;
pub mod config;
pub mod error;
pub mod node;
pub mod parser;
pub mod player;
pub mod primitive;
pub mod spec;
pub mod suggest;
pub mod tree;
pub mod verdict;

pub use config::ParserConfig;
pub use error::{Error, ErrorKind, Result};
pub use node::{MatchOutcome, ParseNode};
pub use parser::{CommandParser, parse};
pub use player::{PlayerEntry, PlayerMatcher, PlayerRoster};
pub use spec::GrammarSpec;
pub use suggest::{
    Completion, DocHint, apply_suggestion, complete, describe, replacement_start,
    start_of_match, suggestions,
};
pub use tree::{Flattened, flatten, push};
pub use verdict::Verdict;
