//! Error types for grammar loading and host-side operations.
//!
//! Match failures are never reported through this type: they are `Error`
//! outcomes inside the [`ParseNode`](crate::ParseNode) tree. This type covers
//! the things a host does around the engine (loading a grammar, validating
//! it, splicing a suggestion into its input buffer).

use thiserror::Error;

/// The main error type for cmdspec operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<String>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Creates an invalid spec error for the node at `path`.
    #[must_use]
    pub fn invalid_spec(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidSpec {
            path: path.into(),
            reason: reason.into(),
        })
    }

    /// Creates an invalid offset error.
    #[must_use]
    pub fn invalid_offset(offset: usize, length: usize) -> Self {
        Self::new(ErrorKind::InvalidOffset { offset, length })
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// The grammar document was not valid JSON.
    #[error("invalid grammar json: {0}")]
    InvalidJson(String),

    /// The grammar parsed but fails validation.
    #[error("invalid command spec at {path}: {reason}")]
    InvalidSpec {
        /// Location of the offending node, e.g. `Chain[2].Many.spec`.
        path: String,
        /// What is wrong with it.
        reason: String,
    },

    /// An offset does not address a character boundary of the input.
    #[error("offset {offset} is not a valid position in input of length {length}")]
    InvalidOffset {
        /// The offending offset.
        offset: usize,
        /// Length of the input in bytes.
        length: usize,
    },

    /// A command was evaluated before any grammar was loaded.
    #[error("no grammar loaded")]
    NoGrammar,

    /// Reading a grammar or roster file failed.
    #[error("io error: {0}")]
    Io(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::new(ErrorKind::InvalidJson(err.to_string()))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::new(ErrorKind::Io(err.to_string()))
    }
}

/// Result type alias using cmdspec's Error.
pub type Result<T> = std::result::Result<T, Error>;
