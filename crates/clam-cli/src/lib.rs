//! Command implementations behind the `clam` binary. Everything here writes
//! to caller-supplied sinks so tests can capture the output.

pub mod commands;
pub mod repl;

/// Maximum source file size in bytes (1MB)
pub const MAX_SOURCE_SIZE: usize = 1_000_000;
