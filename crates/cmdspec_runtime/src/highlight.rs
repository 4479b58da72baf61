//! Input highlighting for the command prompt.

use std::borrow::Cow;

use cmdspec_grammar::Verdict;

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Colors a command line by its verdict.
///
/// Ready lines are green and incomplete lines yellow. An invalid line keeps
/// its valid prefix uncolored and turns red from the first error onwards.
#[derive(Clone, Copy, Debug, Default)]
pub struct VerdictHighlighter;

impl VerdictHighlighter {
    /// Creates a new highlighter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Highlight a line of input.
    #[allow(clippy::unused_self)]
    pub fn highlight<'l>(&self, line: &'l str, verdict: &Verdict) -> Cow<'l, str> {
        if line.is_empty() {
            return Cow::Borrowed(line);
        }
        match verdict {
            Verdict::Ready => Cow::Owned(format!("{GREEN}{line}{RESET}")),
            Verdict::Incomplete { .. } => Cow::Owned(format!("{YELLOW}{line}{RESET}")),
            Verdict::Invalid { offset, .. } => {
                let mut split = (*offset).min(line.len());
                while !line.is_char_boundary(split) {
                    split -= 1;
                }
                let (valid, rest) = line.split_at(split);
                if rest.is_empty() {
                    return Cow::Borrowed(line);
                }
                Cow::Owned(format!("{valid}{RED}{rest}{RESET}"))
            }
        }
    }
}
