use std::fmt;
use thiserror::Error as ThisError;

/// A lexical or syntactic error produced while lexing or parsing a source
/// unit.
///
/// Errors get returned alongside the resulting tree if either the lexer or
/// the parser encounter lexical or syntactical errors respectively.
///
/// We encourage you to check a tree's errors before proceeding to walk its
/// nodes:
///
/// ## Example
/// ```rust
/// use ceeparser::Parser;
///
/// let input = "int x = 1;";
/// let parser = Parser::new(input);
/// let tree = parser.parse();
///
/// assert!(tree.errors().is_empty());
/// ```
///
/// There is no error recovery: a failed translation-unit match rejects the
/// whole unit, it does not resume after the offending token. `SyntaxError`
/// implements [`std::error::Error`] via `thiserror` but its `Display` is
/// just the message; for a terminal-like rendering with source context see
/// `demos/miette.rs` in this crate.
#[derive(ThisError, PartialEq, Eq, Clone)]
#[error("{message}")]
pub struct SyntaxError {
    pub(crate) message: String,
    pub(crate) data: String,
    pub(crate) index: usize,
}

impl SyntaxError {
    /// Create a new instance of `SyntaxError`.
    pub fn new<S: Into<String>>(message: S, data: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: data.into(),
            index: 0,
        }
    }

    /// Create a new instance of `SyntaxError` with a byte-offset location.
    pub fn with_loc<S: Into<String>>(message: S, data: impl Into<String>, index: usize) -> Self {
        Self {
            message: message.into(),
            data: data.into(),
            index,
        }
    }

    /// The text the lexer or parser found to be lexically or syntactically
    /// incorrect.
    pub fn data(&self) -> &str {
        self.data.as_ref()
    }

    /// Byte offset into the source unit where the error begins. Resolve it
    /// to a 1-based line/column with `Location::new(err.index())
    /// .line_column(source)`.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_ref()
    }
}

impl fmt::Debug for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = self.index;
        let end = self.index + self.data.len();

        if self.data == "EOF" {
            write!(f, "ERROR@{start}:{start} {:?} {}", self.message, self.data)
        } else {
            write!(f, "ERROR@{start}:{end} {:?} {}", self.message, self.data)
        }
    }
}
