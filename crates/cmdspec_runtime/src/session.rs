//! Session state for the command prompt.
//!
//! The session holds the loaded grammar, the player roster and the parser
//! limits. [`Engine`] is the cloneable part of it that the line editor keeps
//! so it can parse on every keystroke.

use std::fs;
use std::path::{Path, PathBuf};

use cmdspec_grammar::{
    CommandParser, Completion, Error, ErrorKind, GrammarSpec, ParseNode, ParserConfig,
    PlayerRoster, Result, Verdict, complete, flatten, primitive,
};
use tracing::{debug, info};

/// Result of evaluating one command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Evaluation {
    /// Whether the line may be submitted.
    pub verdict: Verdict,
    /// Summary of the best path through the parse tree.
    pub combined: ParseNode,
    /// The full parse tree.
    pub tree: ParseNode,
}

/// A grammar with everything needed to match input against it.
#[derive(Clone, Debug, Default)]
pub struct Engine {
    grammar: Option<GrammarSpec>,
    roster: PlayerRoster,
    config: ParserConfig,
}

impl Engine {
    /// Creates an engine for `grammar` with an empty roster.
    #[must_use]
    pub fn new(grammar: GrammarSpec) -> Self {
        Self {
            grammar: Some(grammar),
            ..Self::default()
        }
    }

    /// Sets the player roster.
    #[must_use]
    pub fn with_roster(mut self, roster: PlayerRoster) -> Self {
        self.roster = roster;
        self
    }

    /// Sets the parser limits.
    #[must_use]
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// The loaded grammar, if any.
    #[must_use]
    pub fn grammar(&self) -> Option<&GrammarSpec> {
        self.grammar.as_ref()
    }

    /// The player roster.
    #[must_use]
    pub fn roster(&self) -> &PlayerRoster {
        &self.roster
    }

    /// The parser limits.
    #[must_use]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses `line` from the start.
    ///
    /// # Errors
    ///
    /// Returns an error if no grammar is loaded.
    pub fn parse(&self, line: &str) -> Result<ParseNode> {
        let grammar = self
            .grammar
            .as_ref()
            .ok_or_else(|| Error::new(ErrorKind::NoGrammar))?;
        let parser = CommandParser::new()
            .with_config(self.config.clone())
            .with_player_matcher(&self.roster);
        Ok(parser.parse(line, 0, grammar))
    }

    /// Parses `line` and judges it.
    ///
    /// # Errors
    ///
    /// Returns an error if no grammar is loaded.
    pub fn evaluate(&self, line: &str) -> Result<Evaluation> {
        let tree = self.parse(line)?;
        let verdict = Verdict::of(&tree, line);
        let combined = flatten(&tree).combined;
        Ok(Evaluation {
            verdict,
            combined,
            tree,
        })
    }

    /// Completions for `line` at `cursor`.
    ///
    /// # Errors
    ///
    /// Returns an error if no grammar is loaded.
    pub fn complete(&self, line: &str, cursor: usize) -> Result<Completion> {
        let tree = self.parse(line)?;
        Ok(complete(&tree, line, cursor))
    }

    /// The rest of the first suggestion, for inline display after the cursor.
    ///
    /// Only offered with the cursor at the end of the line, and only when
    /// the text being replaced is a prefix of the suggestion.
    #[must_use]
    pub fn hint(&self, line: &str, cursor: usize) -> Option<String> {
        if cursor != line.len() {
            return None;
        }
        let completion = self.complete(line, cursor).ok()?;
        let typed = &line[completion.start..cursor];
        completion.candidates.iter().find_map(|candidate| {
            let (consumed, _) = primitive::common_prefix(typed, candidate);
            if consumed != typed.len() {
                return None;
            }
            let (split, _) = candidate.char_indices().nth(typed.chars().count())?;
            Some(candidate[split..].to_string())
        })
    }
}

/// Session state for an interactive command prompt.
#[derive(Debug)]
pub struct Session {
    /// The grammar, roster and limits in use.
    engine: Engine,

    /// Where the grammar was loaded from, if it came from a file.
    grammar_path: Option<PathBuf>,

    /// Current load path for relative file resolution.
    load_path: PathBuf,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates a session with no grammar loaded.
    #[must_use]
    pub fn new() -> Self {
        Self {
            engine: Engine::default(),
            grammar_path: None,
            load_path: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Creates a session for an in-memory grammar.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar fails validation.
    pub fn with_grammar(grammar: GrammarSpec) -> Result<Self> {
        let mut session = Self::new();
        session.set_grammar(grammar)?;
        Ok(session)
    }

    /// Returns the engine.
    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// The loaded grammar, if any.
    #[must_use]
    pub fn grammar(&self) -> Option<&GrammarSpec> {
        self.engine.grammar()
    }

    /// Where the grammar was loaded from.
    #[must_use]
    pub fn grammar_path(&self) -> Option<&Path> {
        self.grammar_path.as_deref()
    }

    /// The player roster.
    #[must_use]
    pub fn roster(&self) -> &PlayerRoster {
        self.engine.roster()
    }

    /// Replaces the grammar after validating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar fails validation; the previous grammar
    /// is kept in that case.
    pub fn set_grammar(&mut self, grammar: GrammarSpec) -> Result<()> {
        grammar.validate()?;
        debug!(depth = grammar.depth(), "grammar set");
        self.engine.grammar = Some(grammar);
        self.grammar_path = None;
        Ok(())
    }

    /// Replaces the player roster.
    pub fn set_roster(&mut self, roster: PlayerRoster) {
        self.engine.roster = roster;
    }

    /// Replaces the parser limits.
    pub fn set_config(&mut self, config: ParserConfig) {
        self.engine.config = config;
    }

    /// Returns the current load path.
    #[must_use]
    pub const fn load_path(&self) -> &PathBuf {
        &self.load_path
    }

    /// Sets the load path for relative file resolution.
    pub fn set_load_path(&mut self, path: PathBuf) {
        self.load_path = path;
    }

    /// Resolves a path relative to the current load path.
    #[must_use]
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.load_path.join(path)
        }
    }

    /// Loads a grammar from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON or
    /// fails validation.
    pub fn load_grammar(&mut self, path: &str) -> Result<()> {
        let resolved = self.resolve_path(path);
        let source = read(&resolved)?;
        let grammar = GrammarSpec::from_json(&source)
            .and_then(|grammar| grammar.validate().map(|()| grammar))
            .map_err(|e| e.with_context(resolved.display().to_string()))?;
        info!(path = %resolved.display(), "grammar loaded");
        self.engine.grammar = Some(grammar);
        self.grammar_path = Some(resolved);
        Ok(())
    }

    /// Loads a player roster from a JSON file.
    ///
    /// The file holds an array of names or of `{"name", "aliases"}` objects.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not such an array.
    pub fn load_roster(&mut self, path: &str) -> Result<()> {
        let resolved = self.resolve_path(path);
        let source = read(&resolved)?;
        let roster = PlayerRoster::from_json(&source)
            .map_err(|e| e.with_context(resolved.display().to_string()))?;
        info!(path = %resolved.display(), players = roster.players().len(), "roster loaded");
        self.engine.roster = roster;
        Ok(())
    }

    /// Parses and judges a command line.
    ///
    /// # Errors
    ///
    /// Returns an error if no grammar is loaded.
    pub fn evaluate(&self, line: &str) -> Result<Evaluation> {
        self.engine.evaluate(line)
    }

    /// Completions for `line` at `cursor`.
    ///
    /// # Errors
    ///
    /// Returns an error if no grammar is loaded.
    pub fn complete(&self, line: &str, cursor: usize) -> Result<Completion> {
        self.engine.complete(line, cursor)
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::from(e).with_context(path.display().to_string()))
}
