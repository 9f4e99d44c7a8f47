//! Template parser crate.
//!
//! This crate provides the lexer and parser for template source files.
//! It includes:
//! - Lossless lexical analysis (whitespace and comments are kept as tokens)
//! - Abstract Syntax Tree (AST) definitions with token-range positions
//! - Parser for transforming tokens into AST
//! - Visitor pattern for AST traversal
//!
//! # Example
//!
//! ```
//! use specgen_parser::Parser;
//! use bumpalo::Bump;
//!
//! let arena = Bump::new();
//! let source = r#"
//!     public class KTypeArrayList<KType> {
//!         public KType get(int index) {
//!             return buffer[index];
//!         }
//!     }
//! "#;
//!
//! match Parser::parse(source, &arena) {
//!     Ok(unit) => assert_eq!(unit.source(), source),
//!     Err(errors) => eprintln!("Parse errors: {}", errors),
//! }
//! ```

// Lexer module
pub mod lexer;

// AST module
pub mod ast;

// Re-export commonly used types at crate root
pub use ast::{CompilationUnit, Parser};
pub use lexer::{Channel, Lexer, Token, TokenKind};
pub use specgen_core::{Span, TokenRange};
