//! The command prompt loop.
//!
//! Lines starting with `:` are meta commands; everything else is checked
//! against the session's grammar.

use std::io::{self, BufRead, Write};

use cmdspec_grammar::{Error, Result, Verdict};

use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::session::Session;

/// What a line of input produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Response {
    /// The command matched the grammar; holds its canonical text.
    Accepted(String),
    /// The command did not match; holds the reason.
    Rejected(String),
    /// Output of a meta command.
    Info(String),
    /// Nothing to print.
    Nothing,
    /// The user asked to leave.
    Quit,
}

const HELP: &str = "\
Type a command to check it against the grammar. Tab completes.

  :help             Show this help
  :grammar          Show the grammar as a usage line
  :players          List the players and their aliases
  :suggest <text>   List completions at the end of <text>
  :tree <text>      Print the parse tree of <text> as JSON
  :load <file>      Load a grammar from a JSON file
  :roster <file>    Load players from a JSON file
  :quit             Exit";

/// Interactive prompt over a [`LineEditor`].
pub struct Repl<E: LineEditor = RustylineEditor> {
    editor: E,

    /// Session state (grammar, roster).
    session: Session,

    show_banner: bool,

    prompt: String,
}

impl Repl<RustylineEditor> {
    /// Creates a prompt on the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be set up.
    pub fn new() -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a prompt with no grammar loaded, reading from `editor`.
    pub fn with_editor(editor: E) -> Self {
        Self {
            editor,
            session: Session::new(),
            show_banner: true,
            prompt: "> ".to_string(),
        }
    }

    /// Replaces the session and hands its engine to the editor.
    #[must_use]
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self.editor.set_engine(self.session.engine().clone());
        self
    }

    /// Skips the banner on [`Repl::run`].
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Sets the prompt string (default `"> "`).
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// The session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// The session, for changes made outside the prompt.
    ///
    /// Changes made through it reach the editor on the next grammar or
    /// roster load; call [`Repl::sync_editor`] to push them sooner.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Hands the session's current grammar and roster to the editor.
    pub fn sync_editor(&mut self) {
        self.editor.set_engine(self.session.engine().clone());
    }

    /// Reads lines until `:quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails fatally.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        loop {
            match self.read_eval_print() {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    self.print_error(&e);
                }
            }
        }

        println!("\nGoodbye!");
        Ok(())
    }

    /// Reads and handles one line.
    ///
    /// Returns `Ok(true)` to continue, `Ok(false)` to exit.
    fn read_eval_print(&mut self) -> Result<bool> {
        let input = match self.editor.read_line(&self.prompt)? {
            ReadResult::Line(line) => line,
            ReadResult::Interrupted => return Ok(true),
            ReadResult::Eof => return Ok(false),
        };

        if input.trim().is_empty() {
            return Ok(true);
        }

        self.editor.add_history(&input);

        match self.eval(&input)? {
            Response::Accepted(text) => println!("\x1b[1mok:\x1b[0m {text}"),
            Response::Rejected(reason) => eprintln!("\x1b[31m{reason}\x1b[0m"),
            Response::Info(text) => println!("{text}"),
            Response::Nothing => {}
            Response::Quit => return Ok(false),
        }

        Ok(true)
    }

    /// Evaluates one line: a meta command or a command for the grammar.
    ///
    /// # Errors
    ///
    /// Returns an error if a meta command fails or no grammar is loaded.
    pub fn eval(&mut self, input: &str) -> Result<Response> {
        let line = input.trim_start();
        if line.trim_end().is_empty() {
            return Ok(Response::Nothing);
        }
        if let Some(meta) = line.strip_prefix(':') {
            return self.eval_meta(meta);
        }

        let evaluation = self.session.evaluate(input)?;
        Ok(match evaluation.verdict {
            Verdict::Ready => {
                Response::Accepted(evaluation.combined.value.unwrap_or_else(|| input.to_string()))
            }
            Verdict::Incomplete { message } => Response::Rejected(format!(
                "incomplete: {}",
                message.as_deref().unwrap_or("command is not finished")
            )),
            Verdict::Invalid { message, offset } => {
                Response::Rejected(format!("{message} (at column {})", offset + 1))
            }
        })
    }

    /// Handles a `:command`. The argument keeps trailing whitespace, which
    /// matters to `:suggest` and `:tree`.
    fn eval_meta(&mut self, meta: &str) -> Result<Response> {
        let (command, argument) = meta
            .split_once(char::is_whitespace)
            .map_or((meta.trim_end(), ""), |(command, rest)| {
                (command, rest.trim_start())
            });

        match command {
            "q" | "quit" | "exit" => Ok(Response::Quit),
            "h" | "help" => Ok(Response::Info(HELP.to_string())),
            "grammar" => Ok(match self.session.grammar() {
                Some(grammar) => Response::Info(grammar.to_string()),
                None => Response::Info("no grammar loaded".to_string()),
            }),
            "players" => Ok(Response::Info(self.format_players())),
            "suggest" => {
                let completion = self.session.complete(argument, argument.len())?;
                if completion.is_empty() {
                    return Ok(Response::Info("no suggestions".to_string()));
                }
                Ok(Response::Info(format!(
                    "at {}: {}",
                    completion.start,
                    completion.candidates.join(", ")
                )))
            }
            "tree" => {
                let evaluation = self.session.evaluate(argument)?;
                Ok(Response::Info(serde_json::to_string_pretty(&evaluation.tree)?))
            }
            "load" => {
                let argument = argument.trim_end();
                require_argument(command, argument)?;
                self.session.load_grammar(argument)?;
                self.sync_editor();
                Ok(Response::Info(format!("loaded grammar from {argument}")))
            }
            "roster" => {
                let argument = argument.trim_end();
                require_argument(command, argument)?;
                self.session.load_roster(argument)?;
                self.sync_editor();
                Ok(Response::Info(format!(
                    "loaded {} players from {argument}",
                    self.session.roster().players().len()
                )))
            }
            other => Err(Error::internal(format!(
                "unknown command ':{other}' (try :help)"
            ))),
        }
    }

    fn format_players(&self) -> String {
        let players = self.session.roster().players();
        if players.is_empty() {
            return "no players".to_string();
        }
        players
            .iter()
            .map(|player| {
                if player.aliases.is_empty() {
                    player.name.clone()
                } else {
                    format!("{} ({})", player.name, player.aliases.join(", "))
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[allow(clippy::unused_self)]
    fn print_error(&self, error: &Error) {
        match &error.context {
            Some(context) => eprintln!("\x1b[31mError: {error} ({context})\x1b[0m"),
            None => eprintln!("\x1b[31mError: {error}\x1b[0m"),
        }
    }

    fn print_banner(&self) {
        println!("\x1b[1;36mcmdspec\x1b[0m v{}", env!("CARGO_PKG_VERSION"));
        match self.session.grammar_path() {
            Some(path) => println!("Grammar: {}", path.display()),
            None if self.session.grammar().is_some() => println!("Grammar: (in memory)"),
            None => println!("No grammar loaded. Use :load <file>."),
        }
        println!("Type :help for commands. Use Ctrl+D to exit.\n");

        let _ = io::stdout().flush();
    }
}

fn require_argument(command: &str, argument: &str) -> Result<()> {
    if argument.is_empty() {
        return Err(Error::internal(format!(":{command} requires a file path")));
    }
    Ok(())
}

/// Checks every line of `input` against the session's grammar.
///
/// Writes one verdict per non-empty line and returns how many lines were not
/// ready.
///
/// # Errors
///
/// Returns an error if reading or writing fails or no grammar is loaded.
pub fn run_batch<R: BufRead, W: Write>(session: &Session, input: R, mut output: W) -> Result<usize> {
    let mut rejected = 0;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let evaluation = session.evaluate(&line)?;
        match &evaluation.verdict {
            Verdict::Ready => writeln!(
                output,
                "ok: {}",
                evaluation.combined.value.as_deref().unwrap_or(&line)
            )?,
            verdict => {
                rejected += 1;
                writeln!(output, "error: {verdict}")?;
            }
        }
    }
    Ok(rejected)
}
