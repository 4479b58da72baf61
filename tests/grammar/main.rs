//! Integration tests for the cmdspec_grammar crate.
//!
//! Tests for matching command input against grammars:
//! - Primitive matchers
//! - Combinators
//! - Flatten and Push
//! - Suggestions and cursor positions
//! - Grammar wire format
//! - End-to-end command checking
//! - Properties over generated input

mod end_to_end;
mod primitives;
mod suggestions;
mod wire_format;
