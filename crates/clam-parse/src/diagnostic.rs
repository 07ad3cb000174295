//! Plain-text rendering of syntax errors.
//!
//! Output is deterministic and colour-free:
//!
//! ```text
//! error: unexpected token
//!  --> main.clam:1:8
//! let x = in x
//!         ^^
//! expected expression, got 'in'
//! ```
//!
//! Line numbers are 1-based; the column is the 0-based byte offset from the
//! start of the line.

use crate::error::SyntaxError;

/// Location of the line containing a byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineInfo {
    /// 1-based line number.
    pub number: usize,
    /// Byte offset of the first byte of the line.
    pub start: usize,
    /// Byte offset of the terminating `\n`, or the source length.
    pub end: usize,
}

/// Finds the line containing `offset`, clamping past-the-end offsets to the
/// end of the source.
pub fn locate(source: &str, offset: usize) -> LineInfo {
    let bytes = source.as_bytes();
    let offset = offset.min(bytes.len());
    let before = &bytes[..offset];

    let number = before.iter().filter(|&&b| b == b'\n').count() + 1;
    let start = before
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |nl| nl + 1);
    let end = bytes[offset..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |nl| offset + nl);

    LineInfo { number, start, end }
}

/// The one-line message for `error`, quoting source text where needed.
pub fn message(source: &str, error: &SyntaxError) -> String {
    match error {
        SyntaxError::InvalidEscapeSequence { escape_span, .. } => {
            let escape = source.get(escape_span.range()).unwrap_or_default();
            format!("invalid escape sequence '{escape}'")
        }
        SyntaxError::UnexpectedToken { .. } => error.to_string(),
    }
}

/// Renders `error` against the `source` it was produced from.
pub fn render(source: &str, file_name: &str, error: &SyntaxError) -> String {
    let span = error.span();
    let line = locate(source, span.start as usize);
    let start = (span.start as usize).clamp(line.start, line.end);
    let column = start - line.start;

    let text = source.get(line.start..line.end).unwrap_or_default();
    let text = text.strip_suffix('\r').unwrap_or(text);

    // Underline up to the end of the visible line, but always at least once
    // so an empty span (end of input) is still marked.
    let underline_end = (span.end as usize).min(line.start + text.len());
    let carets = underline_end.saturating_sub(start).max(1);

    format!(
        "error: {title}\n --> {file_name}:{number}:{column}\n{text}\n{pad}{carets}\n{message}\n",
        title = error.title(),
        number = line.number,
        pad = " ".repeat(column),
        carets = "^".repeat(carets),
        message = message(source, error),
    )
}
