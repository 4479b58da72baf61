//! Integration tests for the cmdspec_runtime crate.
//!
//! Tests for the command prompt:
//! - Keystroke queries (completion, hints, highlighting)
//! - The REPL loop driven by a scripted editor
