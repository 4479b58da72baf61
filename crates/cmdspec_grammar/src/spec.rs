//! Command grammar description.
//!
//! A [`GrammarSpec`] is a finite tree delivered as data by the game server.
//! On the wire it is externally tagged JSON:
//!
//! ```text
//! {"Chain": [{"Token": "move"}, {"Space": {}}, {"Int": {"min": 1, "max": 8}}]}
//! ```
//!
//! Values that match no known variant deserialize into
//! [`GrammarSpec::Unrecognized`] rather than failing the whole document, so a
//! single bad node only poisons its own subtree.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Tagged-union tree describing an accepted command syntax.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GrammarSpec {
    /// An integer, optionally bounded.
    Int {
        /// Smallest accepted value.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<i64>,
        /// Largest accepted value.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<i64>,
    },
    /// A case-insensitive literal.
    Token(String),
    /// One literal out of a fixed set.
    Enum {
        /// Candidate literals.
        values: Vec<String>,
        /// When false, an unambiguous abbreviation counts as a full match.
        #[serde(default)]
        exact: bool,
    },
    /// Any one of several alternatives.
    OneOf(Vec<GrammarSpec>),
    /// A sequence, matched left to right.
    Chain(Vec<GrammarSpec>),
    /// Repetitions of `spec` separated by `delim`.
    Many {
        /// Fewest repetitions accepted.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<usize>,
        /// Most repetitions consumed.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<usize>,
        /// Literal separating repetitions.
        #[serde(default)]
        delim: String,
        /// The repeated grammar.
        spec: Box<GrammarSpec>,
    },
    /// An optional element.
    Opt(Box<GrammarSpec>),
    /// Help metadata around a grammar; has no effect on matching.
    Doc {
        /// Short name shown in help.
        name: String,
        /// Longer description.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        desc: Option<String>,
        /// The documented grammar.
        spec: Box<GrammarSpec>,
    },
    /// A player name or alias, resolved by the host.
    Player {},
    /// A run of whitespace, possibly empty.
    Space {},
    /// Anything the grammar producer sent that is not one of the above.
    #[serde(untagged)]
    Unrecognized(serde_json::Value),
}

impl GrammarSpec {
    /// Parses a grammar from its JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not well-formed JSON. Unknown variants are
    /// not an error here; use [`GrammarSpec::validate`] to reject them.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes this grammar to its JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// A case-insensitive literal.
    #[must_use]
    pub fn token(literal: impl Into<String>) -> Self {
        Self::Token(literal.into())
    }

    /// An integer with optional bounds.
    #[must_use]
    pub fn int(min: Option<i64>, max: Option<i64>) -> Self {
        Self::Int { min, max }
    }

    /// One of a fixed set of literals.
    #[must_use]
    pub fn enumeration<I, S>(values: I, exact: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Enum {
            values: values.into_iter().map(Into::into).collect(),
            exact,
        }
    }

    /// Any of the given alternatives.
    #[must_use]
    pub fn one_of(alternatives: impl IntoIterator<Item = GrammarSpec>) -> Self {
        Self::OneOf(alternatives.into_iter().collect())
    }

    /// The given elements in sequence.
    #[must_use]
    pub fn chain(sequence: impl IntoIterator<Item = GrammarSpec>) -> Self {
        Self::Chain(sequence.into_iter().collect())
    }

    /// Repetitions of `inner` separated by `delim`.
    #[must_use]
    pub fn many(
        min: Option<usize>,
        max: Option<usize>,
        delim: impl Into<String>,
        inner: GrammarSpec,
    ) -> Self {
        Self::Many {
            min,
            max,
            delim: delim.into(),
            spec: Box::new(inner),
        }
    }

    /// An optional `inner`.
    #[must_use]
    pub fn opt(inner: GrammarSpec) -> Self {
        Self::Opt(Box::new(inner))
    }

    /// Help metadata around `inner`.
    #[must_use]
    pub fn doc(name: impl Into<String>, desc: Option<&str>, inner: GrammarSpec) -> Self {
        Self::Doc {
            name: name.into(),
            desc: desc.map(str::to_string),
            spec: Box::new(inner),
        }
    }

    /// A player reference.
    #[must_use]
    pub fn player() -> Self {
        Self::Player {}
    }

    /// Optional whitespace.
    #[must_use]
    pub fn space() -> Self {
        Self::Space {}
    }

    /// The wire tag of this variant.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Int { .. } => "Int",
            Self::Token(_) => "Token",
            Self::Enum { .. } => "Enum",
            Self::OneOf(_) => "OneOf",
            Self::Chain(_) => "Chain",
            Self::Many { .. } => "Many",
            Self::Opt(_) => "Opt",
            Self::Doc { .. } => "Doc",
            Self::Player {} => "Player",
            Self::Space {} => "Space",
            Self::Unrecognized(_) => "?",
        }
    }

    /// Nesting depth; a leaf has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        let inner = match self {
            Self::OneOf(specs) | Self::Chain(specs) => {
                specs.iter().map(GrammarSpec::depth).max().unwrap_or(0)
            }
            Self::Many { spec, .. } | Self::Opt(spec) | Self::Doc { spec, .. } => spec.depth(),
            _ => 0,
        };
        inner + 1
    }

    /// Checks that the grammar can be matched meaningfully.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidSpec`](crate::ErrorKind::InvalidSpec) naming
    /// the first offending node.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Unrecognized(_) => self.validate_at("root"),
            _ => self.validate_at(self.tag()),
        }
    }

    fn validate_at(&self, path: &str) -> Result<()> {
        match self {
            Self::Unrecognized(value) => Err(Error::invalid_spec(
                path,
                format!("unrecognized spec {value}"),
            )),
            Self::Int {
                min: Some(min),
                max: Some(max),
            } if min > max => Err(Error::invalid_spec(
                path,
                format!("min {min} is greater than max {max}"),
            )),
            Self::Enum { values, .. } if values.is_empty() => {
                Err(Error::invalid_spec(path, "enum has no values"))
            }
            Self::OneOf(specs) | Self::Chain(specs) => {
                if specs.is_empty() {
                    return Err(Error::invalid_spec(path, "no elements"));
                }
                for (i, spec) in specs.iter().enumerate() {
                    spec.validate_at(&child_path(path, &format!("[{i}]"), spec))?;
                }
                Ok(())
            }
            Self::Many { min, max, spec, .. } => {
                if *max == Some(0) {
                    return Err(Error::invalid_spec(path, "max is zero"));
                }
                if let (Some(min), Some(max)) = (min, max) {
                    if min > max {
                        return Err(Error::invalid_spec(
                            path,
                            format!("min {min} is greater than max {max}"),
                        ));
                    }
                }
                spec.validate_at(&child_path(path, ".spec", spec))
            }
            Self::Opt(spec) | Self::Doc { spec, .. } => {
                spec.validate_at(&child_path(path, "", spec))
            }
            _ => Ok(()),
        }
    }
}

/// Path to `child`, reached from `path` through `step`, e.g. `Chain[1].Opt`.
fn child_path(path: &str, step: &str, child: &GrammarSpec) -> String {
    match child {
        GrammarSpec::Unrecognized(_) => format!("{path}{step}"),
        _ => format!("{path}{step}.{}", child.tag()),
    }
}

/// Renders a compact usage line, e.g. `move <int 1..8>`.
impl fmt::Display for GrammarSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int { min, max } => match (min, max) {
                (None, None) => write!(f, "<int>"),
                (min, max) => {
                    write!(f, "<int ")?;
                    if let Some(min) = min {
                        write!(f, "{min}")?;
                    }
                    write!(f, "..")?;
                    if let Some(max) = max {
                        write!(f, "{max}")?;
                    }
                    write!(f, ">")
                }
            },
            Self::Token(literal) => write!(f, "{literal}"),
            Self::Enum { values, .. } => write!(f, "({})", values.join("|")),
            Self::OneOf(specs) => {
                write!(f, "{{")?;
                for (i, spec) in specs.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{spec}")?;
                }
                write!(f, "}}")
            }
            Self::Chain(specs) => specs.iter().try_for_each(|spec| write!(f, "{spec}")),
            Self::Many { delim, spec, .. } => write!(f, "{spec}[{delim}{spec}...]"),
            Self::Opt(spec) => write!(f, "[{spec}]"),
            Self::Doc { name, .. } => write!(f, "<{name}>"),
            Self::Player {} => write!(f, "<player>"),
            Self::Space {} => write!(f, " "),
            Self::Unrecognized(_) => write!(f, "<invalid>"),
        }
    }
}
