//! Lossless AST for template sources.
//!
//! This module provides:
//! - AST node definitions for declarations, types and body token trees
//! - Parser for transforming tokens into AST
//! - Visitor pattern for AST traversal
//!
//! Every node records a [`TokenRange`] into the full token stream, so the
//! source can be reproduced token for token and rewritten by range.
//!
//! # Example
//!
//! ```
//! use specgen_parser::Parser;
//! use bumpalo::Bump;
//!
//! let arena = Bump::new();
//! let source = r#"
//!     public class KTypeStack<KType> {
//!         KType[] buffer;
//!     }
//! "#;
//!
//! match Parser::parse(source, &arena) {
//!     Ok(unit) => println!("Parsed successfully: {} types", unit.types.len()),
//!     Err(errors) => eprintln!("Parse errors: {}", errors),
//! }
//! ```

pub mod node;

mod parser;
mod type_parser;
pub mod types;

pub mod body;
mod body_parser;

pub mod decl;
mod decl_parser;

pub mod visitor;

// Re-export error types from core
pub use specgen_core::{ParseError, ParseErrorKind, ParseErrors};

pub use body::*;
pub use decl::*;
pub use node::*;
pub use parser::Parser;
pub use types::*;

use specgen_core::TokenRange;

use crate::lexer::Token;

/// A parsed template file.
///
/// Borrows from the arena that holds its tokens and nodes. The token stream
/// is kept alongside the tree so that rewrites can reproduce everything the
/// tree does not touch.
#[derive(Debug, Clone, Copy)]
pub struct CompilationUnit<'ast> {
    pub package: Option<PackageDecl<'ast>>,
    pub imports: &'ast [ImportDecl<'ast>],
    pub types: &'ast [TypeDecl<'ast>],
    /// The full token stream, trivia included, ending with EOF.
    pub tokens: &'ast [Token<'ast>],
}

impl<'ast> CompilationUnit<'ast> {
    /// The range of every token in the file.
    pub fn range(&self) -> TokenRange {
        TokenRange::new(0, self.tokens.len() as u32)
    }

    /// The source text of a token range.
    pub fn text(&self, range: TokenRange) -> String {
        let end = (range.end as usize).min(self.tokens.len());
        let start = (range.start as usize).min(end);
        self.tokens[start..end].iter().map(|t| t.lexeme).collect()
    }

    /// Reassemble the full source. Lexing is lossless, so this returns the
    /// original input.
    pub fn source(&self) -> String {
        self.text(self.range())
    }
}
