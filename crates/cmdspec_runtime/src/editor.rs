//! Line editing for the command prompt.
//!
//! The REPL talks to a [`LineEditor`]; [`RustylineEditor`] is the terminal
//! implementation. Its helper re-parses the line on every keystroke to drive
//! completion, inline hints, highlighting and submit validation.

use std::borrow::Cow;

use cmdspec_grammar::{Error, Result, Verdict};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Config, Context, Editor, Helper};

use crate::highlight::VerdictHighlighter;
use crate::session::Engine;

/// What one read from the editor produced.
#[derive(Debug)]
pub enum ReadResult {
    /// A submitted line.
    Line(String),
    /// Ctrl+C; the current line is discarded.
    Interrupted,
    /// Ctrl+D or end of input.
    Eof,
}

/// The REPL's view of a line editor.
///
/// Tests drive the REPL through scripted implementations.
pub trait LineEditor {
    /// Shows `prompt` and waits for a line.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult>;

    /// Records a submitted line in the history.
    fn add_history(&mut self, line: &str);

    /// Replaces the grammar and roster behind completion, hints and highlighting.
    fn set_engine(&mut self, engine: Engine);
}

/// Rustyline helper backed by an [`Engine`].
#[derive(Helper)]
struct CommandHelper {
    engine: Engine,
    highlighter: VerdictHighlighter,
}

impl CommandHelper {
    /// Meta commands are not grammar input.
    fn is_meta(line: &str) -> bool {
        line.trim_start().starts_with(':')
    }

    fn verdict(&self, line: &str) -> Option<Verdict> {
        if Self::is_meta(line) {
            return None;
        }
        self.engine
            .evaluate(line)
            .ok()
            .map(|evaluation| evaluation.verdict)
    }
}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        if Self::is_meta(line) {
            return Ok((pos, Vec::new()));
        }
        let Ok(completion) = self.engine.complete(line, pos) else {
            return Ok((pos, Vec::new()));
        };
        let candidates = completion
            .candidates
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate,
            })
            .collect();
        Ok((completion.start, candidates))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if Self::is_meta(line) {
            return None;
        }
        self.engine.hint(line, pos)
    }
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        match self.verdict(line) {
            Some(verdict) => self.highlighter.highlight(line, &verdict),
            None => Cow::Borrowed(line),
        }
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Cow::Owned(format!("\x1b[1;32m{prompt}\x1b[0m"))
        } else {
            Cow::Borrowed(prompt)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("\x1b[2m{hint}\x1b[0m"))
    }
}

impl Validator for CommandHelper {
    fn validate(&self, ctx: &mut ValidationContext<'_>) -> rustyline::Result<ValidationResult> {
        let input = ctx.input();
        if input.trim().is_empty() {
            return Ok(ValidationResult::Valid(None));
        }
        // Invalid lines go through so the REPL can print why.
        match self.verdict(input) {
            Some(Verdict::Incomplete { message }) => {
                let detail = message.unwrap_or_else(|| "press Tab for suggestions".to_string());
                Ok(ValidationResult::Invalid(Some(format!(
                    "\n\x1b[33mincomplete: {detail}\x1b[0m"
                ))))
            }
            _ => Ok(ValidationResult::Valid(None)),
        }
    }
}

/// Terminal line editor with grammar-aware completion.
pub struct RustylineEditor {
    editor: Editor<CommandHelper, DefaultHistory>,
}

impl RustylineEditor {
    /// Creates an editor with no grammar; call [`LineEditor::set_engine`] to add one.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be set up.
    ///
    /// # Panics
    ///
    /// Panics if the history size configuration is invalid (should not happen
    /// with hardcoded valid values).
    pub fn new() -> Result<Self> {
        let config = Config::builder()
            .auto_add_history(false)
            .max_history_size(1000)
            .expect("valid history size")
            .completion_type(rustyline::CompletionType::List)
            .build();

        let helper = CommandHelper {
            engine: Engine::default(),
            highlighter: VerdictHighlighter::new(),
        };

        let mut editor = Editor::with_config(config).map_err(|e| Error::internal(e.to_string()))?;
        editor.set_helper(Some(helper));

        Ok(Self { editor })
    }
}

impl LineEditor for RustylineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadResult::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadResult::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadResult::Eof),
            Err(e) => Err(Error::internal(e.to_string())),
        }
    }

    fn add_history(&mut self, line: &str) {
        let _ = self.editor.add_history_entry(line);
    }

    fn set_engine(&mut self, engine: Engine) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.engine = engine;
        }
    }
}
