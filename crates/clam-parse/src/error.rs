use std::borrow::Cow;

use clam_ast::span::Span;
use thiserror::Error;

use crate::token::Tok;

/// The first malformed construct found in the source. Parsing stops there;
/// the parser that produced it must not be resumed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// A `\` inside a string literal followed by an unsupported character.
    #[error("invalid escape sequence '\\{escape}'")]
    InvalidEscapeSequence {
        /// The whole string literal, quotes included.
        string_span: Span,
        /// Exactly the backslash and the character after it.
        escape_span: Span,
        escape: char,
    },

    #[error("expected {expected}, got '{}'", .got.kind)]
    UnexpectedToken {
        expected: Cow<'static, str>,
        got: Tok,
        span: Span,
    },
}

impl SyntaxError {
    pub(crate) fn unexpected(expected: impl Into<Cow<'static, str>>, got: Tok) -> Self {
        SyntaxError::UnexpectedToken {
            expected: expected.into(),
            got,
            span: got.span,
        }
    }

    /// The span a diagnostic should underline.
    pub fn span(&self) -> Span {
        match self {
            SyntaxError::InvalidEscapeSequence { escape_span, .. } => *escape_span,
            SyntaxError::UnexpectedToken { span, .. } => *span,
        }
    }

    /// Short headline naming the kind of error.
    pub fn title(&self) -> &'static str {
        match self {
            SyntaxError::InvalidEscapeSequence { .. } => "invalid escape sequence",
            SyntaxError::UnexpectedToken { .. } => "unexpected token",
        }
    }
}
