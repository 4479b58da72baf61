//! Player name resolution.
//!
//! The `Player` grammar leaf is opaque to the engine: the host supplies a
//! [`PlayerMatcher`] built from the active game's roster. [`PlayerRoster`] is
//! the stock implementation, matching names and aliases the way an Enum
//! matches its values.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::node::{MatchOutcome, ParseNode};
use crate::primitive;

/// Resolves a player reference at `offset`.
///
/// Implementations must obey the same contract as the primitive matchers:
/// `Partial` at end of input or for a valid prefix, `Error` (without
/// children) when nothing can match, `Full` otherwise.
pub trait PlayerMatcher {
    /// Matches a player name or alias against `input[offset..]`.
    fn match_player(&self, input: &str, offset: usize) -> ParseNode;
}

/// A player in the current game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerEntry {
    /// Canonical display name.
    pub name: String,
    /// Other accepted spellings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl PlayerEntry {
    /// Creates an entry with no aliases.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
        }
    }

    /// Adds an alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RosterItem {
    Name(String),
    Entry(PlayerEntry),
}

/// The players of the current game.
#[derive(Clone, Debug, Default)]
pub struct PlayerRoster {
    players: Vec<PlayerEntry>,
    /// Every accepted spelling, in roster order.
    spellings: Vec<String>,
    /// Lowercased spelling -> canonical name.
    canonical: HashMap<String, String>,
}

impl PlayerRoster {
    /// Creates an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a roster from entries.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = PlayerEntry>) -> Self {
        let mut roster = Self::new();
        for entry in entries {
            roster.add(entry);
        }
        roster
    }

    /// Reads a roster from JSON: an array of names or of `{name, aliases}`.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not such an array.
    pub fn from_json(json: &str) -> Result<Self> {
        let items: Vec<RosterItem> = serde_json::from_str(json)?;
        Ok(Self::from_entries(items.into_iter().map(|item| match item {
            RosterItem::Name(name) => PlayerEntry::new(name),
            RosterItem::Entry(entry) => entry,
        })))
    }

    /// Adds a player.
    pub fn add(&mut self, entry: PlayerEntry) {
        for spelling in std::iter::once(&entry.name).chain(&entry.aliases) {
            let key = spelling.to_lowercase();
            if self.canonical.contains_key(&key) {
                continue;
            }
            self.canonical.insert(key, entry.name.clone());
            self.spellings.push(spelling.clone());
        }
        self.players.push(entry);
    }

    /// The players, in the order they were added.
    #[must_use]
    pub fn players(&self) -> &[PlayerEntry] {
        &self.players
    }

    /// Returns true if there are no players.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Canonical name for an accepted spelling.
    #[must_use]
    pub fn canonical_name(&self, spelling: &str) -> Option<&str> {
        self.canonical
            .get(&spelling.to_lowercase())
            .map(String::as_str)
    }

    fn canonicalize(&self, mut node: ParseNode) -> ParseNode {
        if let Some(name) = node.value.as_deref().and_then(|v| self.canonical_name(v)) {
            node.value = Some(name.to_string());
        }
        node
    }
}

impl PlayerMatcher for PlayerRoster {
    fn match_player(&self, input: &str, offset: usize) -> ParseNode {
        if self.spellings.is_empty() {
            return ParseNode::error(offset, "there are no players in this game");
        }
        let node = primitive::enumeration(input, offset, &self.spellings, false);
        if node.is_leaf() {
            return self.canonicalize(node);
        }

        // An ambiguity node: aliases of the same player are not ambiguous.
        let mut candidates: Vec<ParseNode> = Vec::new();
        for child in node.children.iter().cloned().map(|c| self.canonicalize(c)) {
            if !candidates.iter().any(|c| c.value == child.value) {
                candidates.push(child);
            }
        }
        if candidates.len() == 1 {
            let only = candidates.remove(0);
            return if only.is_empty() {
                only
            } else {
                only.with_outcome(MatchOutcome::Full)
            };
        }
        node.with_children(candidates)
    }
}
