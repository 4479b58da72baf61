//! Interactive command prompt for cmdspec grammars.
//!
//! This crate provides:
//! - [`Session`] - Grammar, player roster and parser limits for one prompt
//! - [`Repl`] - Interactive loop with live completion and highlighting
//! - [`run_batch`] - Non-interactive checking of command lines
//! - The `cmdspec` CLI entry point

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod editor;
pub mod highlight;
pub mod repl;
pub mod session;

pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use highlight::VerdictHighlighter;
pub use repl::{Repl, Response, run_batch};
pub use session::{Engine, Evaluation, Session};
