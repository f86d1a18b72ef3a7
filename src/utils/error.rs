//! Error handling for the frontend

use crate::utils::Span;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Frontend error
///
/// Malformed input is always reportable, never fatal: the first error wins
/// and parsing halts. Callers iterating over several inputs are expected to
/// format the error (with [`Error::span`]) and move on to the next one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The input cannot be tokenized at this position.
    #[error("{message}")]
    Lex { message: String, span: Span },

    /// The token stream does not match the grammar at this position.
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },
}

impl Error {
    /// Get the span associated with this error
    pub fn span(&self) -> Span {
        match self {
            Self::Lex { span, .. } => *span,
            Self::UnexpectedToken { span, .. } => *span,
        }
    }
}
