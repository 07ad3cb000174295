use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clam_ast::ast::{Ast, AstIndex};
use clam_parse::{diagnostic, parse_str, Lexer};
use clap::ValueEnum;
use serde::Serialize;
use tracing::{debug, info};

use crate::MAX_SOURCE_SIZE;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    /// One-line s-expression
    #[default]
    Sexpr,
    /// Debug dump of the node arena
    Pretty,
    /// JSON object with `root` and `nodes`
    Json,
}

#[derive(Debug, Serialize)]
struct Dump<'a, 'src> {
    root: AstIndex,
    #[serde(flatten)]
    ast: &'a Ast<'src>,
}

/// Reads a source file, rejecting anything over [`MAX_SOURCE_SIZE`].
pub fn read_source(path: &Path) -> Result<String> {
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;

    if src.len() > MAX_SOURCE_SIZE {
        bail!(
            "source file exceeds {}MB limit ({} bytes)",
            MAX_SOURCE_SIZE / 1_000_000,
            src.len()
        );
    }
    debug!(path = %path.display(), bytes = src.len(), "read source");
    Ok(src)
}

/// Renders the tree at `root` in the requested format, without a trailing
/// newline.
pub fn format_ast(ast: &Ast<'_>, root: AstIndex, format: Format) -> Result<String> {
    Ok(match format {
        Format::Sexpr => ast.sexpr(root).to_string(),
        Format::Pretty => format!("{:#?}", Dump { root, ast }),
        Format::Json => serde_json::to_string_pretty(&Dump { root, ast })?,
    })
}

/// Parses `src` and writes the tree to `out`, or the rendered diagnostic to
/// `err`. Returns whether parsing succeeded.
pub fn parse(
    src: &str,
    file_name: &str,
    format: Format,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<bool> {
    match parse_str(src) {
        Ok((ast, root)) => {
            info!(file = file_name, nodes = ast.len(), "parse ok");
            writeln!(out, "{}", format_ast(&ast, root, format)?)?;
            Ok(true)
        }
        Err(e) => {
            info!(file = file_name, error = %e, "parse failed");
            write!(err, "{}", diagnostic::render(src, file_name, &e))?;
            Ok(false)
        }
    }
}

/// Writes one line per token, `Eof` included.
pub fn lex(src: &str, out: &mut impl Write) -> Result<()> {
    for tok in Lexer::new(src) {
        let kind = tok.kind.to_string();
        writeln!(
            out,
            "{:<16} @ {}..{} {:?}",
            kind,
            tok.span.start,
            tok.span.end,
            tok.text(src)
        )?;
    }
    Ok(())
}
