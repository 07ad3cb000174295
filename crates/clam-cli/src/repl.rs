//! Line-oriented read-parse-print loop.

use std::io::{self, BufRead, Write};

use clam_parse::{diagnostic, parse_str};
use tracing::debug;

pub const HELP: &str = "\
Commands:
  :exit - Exit the REPL
  :help - Display this help message
  :quit - Quit the REPL";

/// Source name used in diagnostics for REPL input.
const FILE_NAME: &str = "stdin";

enum Command {
    Help,
    Exit,
}

impl Command {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "help" => Some(Command::Help),
            "exit" | "quit" => Some(Command::Exit),
            _ => None,
        }
    }
}

/// Runs until `:exit`, `:quit` or end of input. Each non-command line is
/// parsed on its own; parse output goes to `out`, diagnostics to `err`.
pub fn run<R: BufRead>(mut input: R, out: &mut impl Write, err: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Clam REPL v{}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "Type ':help' for more information")?;

    let mut line = String::new();
    loop {
        write!(out, "\n$ ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(());
        }
        let line = line.trim_end_matches(['\n', '\r']);

        if let Some(name) = line.strip_prefix(':') {
            match Command::parse(name) {
                Some(Command::Help) => writeln!(out, "{HELP}")?,
                Some(Command::Exit) => {
                    writeln!(out, "Bye bye...")?;
                    return Ok(());
                }
                None => {
                    writeln!(err, "Error: Unknown command ':{name}'")?;
                    writeln!(out, "{HELP}")?;
                }
            }
        } else if !line.trim().is_empty() {
            eval(line, out, err)?;
        }
    }
}

fn eval(line: &str, out: &mut impl Write, err: &mut impl Write) -> io::Result<()> {
    match parse_str(line) {
        Ok((ast, root)) => {
            debug!(nodes = ast.len(), "repl parse");
            writeln!(out, "Parser Output:")?;
            writeln!(out, "{}", ast.sexpr(root))
        }
        Err(e) => write!(err, "{}", diagnostic::render(line, FILE_NAME, &e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn session(input: &str) -> (String, String) {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        run(input.as_bytes(), &mut out, &mut err).unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn parses_each_line() {
        let (out, err) = session("1 + 2\nf x\n:exit\n");
        assert!(out.contains("Parser Output:\n(+ 1 2)\n"), "{out}");
        assert!(out.contains("Parser Output:\n(app f x)\n"), "{out}");
        assert!(out.ends_with("$ Bye bye...\n"), "{out}");
        assert_eq!(err, "");
    }

    #[test]
    fn stops_at_end_of_input() {
        let (out, _) = session("x");
        assert!(out.contains("Parser Output:\nx\n"), "{out}");
        assert!(out.ends_with("$ \n"), "{out}");
    }

    #[test]
    fn lines_after_exit_are_ignored() {
        let (out, _) = session(":quit\n1 + 2\n");
        assert!(!out.contains("Parser Output"), "{out}");
    }

    #[test]
    fn help_and_unknown_commands() {
        let (out, err) = session(":help\n:frob\n");
        assert_eq!(out.matches(HELP).count(), 2);
        assert_eq!(err, "Error: Unknown command ':frob'\n");
    }

    #[test]
    fn syntax_errors_go_to_err_with_stdin_name() {
        let (out, err) = session("let x = in x\r\n");
        assert!(!out.contains("Parser Output"));
        assert_eq!(
            err,
            "\
error: unexpected token
 --> stdin:1:8
let x = in x
        ^^
expected expression, got 'in'
"
        );
    }

    #[test]
    fn blank_lines_are_skipped() {
        let (out, err) = session("\n   \n");
        assert!(!out.contains("Parser Output"));
        assert_eq!(err, "");
    }
}
