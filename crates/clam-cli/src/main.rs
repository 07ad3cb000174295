use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clam_cli::commands::{self, Format};
use clam_cli::repl;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "clam", version)]
#[command(about = "Clam: parse and inspect Clam expressions")]
struct Cli {
    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a source file and print its syntax tree
    Parse {
        /// Path to .clam source file
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Sexpr)]
        format: Format,
    },

    /// Print the token stream of a source file
    Lex {
        /// Path to .clam source file
        file: PathBuf,
    },

    /// Parse expressions read line by line from stdin
    Repl,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(cli.verbose))),
        )
        .with_ansi(false)
        .with_writer(io::stderr)
        .init();

    match run(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` when the input had a syntax error that was already
/// reported.
fn run(command: Commands) -> Result<bool> {
    match command {
        Commands::Parse { file, format } => {
            let src = commands::read_source(&file)?;
            let name = file.display().to_string();
            commands::parse(
                &src,
                &name,
                format,
                &mut io::stdout().lock(),
                &mut io::stderr().lock(),
            )
        }
        Commands::Lex { file } => {
            let src = commands::read_source(&file)?;
            commands::lex(&src, &mut io::stdout().lock())?;
            Ok(true)
        }
        Commands::Repl => {
            repl::run(
                io::stdin().lock(),
                &mut io::stdout().lock(),
                &mut io::stderr().lock(),
            )?;
            Ok(true)
        }
    }
}

fn directive_for_verbosity(v: u8) -> &'static str {
    match v {
        0 => "clam_cli=warn,clam_parse=warn",
        1 => "clam_cli=debug,clam_parse=debug",
        _ => "clam_cli=trace,clam_parse=trace",
    }
}
