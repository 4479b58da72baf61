//! Parser configuration.

/// Limits applied while matching a grammar.
///
/// Grammars come from outside the process, so the parser bounds the work a
/// single keystroke can trigger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParserConfig {
    /// Hard cap on `Many` repetitions, applied on top of the spec's own `max`.
    pub max_repetitions: usize,

    /// Grammar nesting depth at which matching gives up.
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_repetitions: 64,
            max_depth: 256,
        }
    }
}

impl ParserConfig {
    /// Creates a configuration with tight limits, for untrusted grammars.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            max_repetitions: 16,
            max_depth: 32,
        }
    }

    /// Builder method to set the repetition cap.
    #[must_use]
    pub fn with_max_repetitions(mut self, max: usize) -> Self {
        self.max_repetitions = max;
        self
    }

    /// Builder method to set the depth limit.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}
