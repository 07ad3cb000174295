//! Contract between the parser and the (external) compiler and VM.
//!
//! Only the data shapes live here: opcodes, runtime constants, the chunk
//! with its bounded constant pool, and local slot resolution.

#![forbid(unsafe_code)]
#![deny(unused_must_use)]

mod chunk;
mod opcode;

pub use chunk::{Chunk, LocalSlots, Value, MAX_CONSTANTS, MAX_LOCALS};
pub use opcode::Opcode;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("too many constants in one chunk (limit is {MAX_CONSTANTS})")]
    TooManyConstants,
    #[error("too many local variables in scope (limit is {MAX_LOCALS})")]
    TooManyLocals,
}
