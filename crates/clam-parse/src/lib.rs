#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]

pub mod diagnostic;
mod error;
mod lexer;
mod parser;
mod token;

pub use error::SyntaxError;
pub use lexer::Lexer;
pub use parser::{parse_str, Parser};
pub use token::{Tok, TokKind};
