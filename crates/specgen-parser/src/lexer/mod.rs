//! Lossless lexical analysis for template source.

mod cursor;
mod lexer;
mod token;

pub use lexer::Lexer;
pub use token::{Channel, Token, TokenKind, lookup_keyword};
