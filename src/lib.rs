//! cmdspec - Autocomplete-aware command grammars
//!
//! This crate re-exports both layers of the cmdspec system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: cmdspec_runtime  — Sessions, line editor, REPL, CLI
//! Layer 0: cmdspec_grammar  — Grammar specs, matching, flatten, suggestions
//! ```

pub use cmdspec_grammar as grammar;
pub use cmdspec_runtime as runtime;
