//! Core types shared across the specgen crates.
//!
//! - [`span`]: source spans and token ranges
//! - [`types`]: the closed catalog of concrete types
//! - [`syntax`]: placeholder and intrinsic names templates are written against
//! - [`instantiation`]: one concrete binding of a template
//! - [`error`]: lexer, parser and specialization errors

pub mod error;
pub mod instantiation;
pub mod span;
pub mod syntax;
pub mod types;

pub use error::{LexError, ParseError, ParseErrorKind, ParseErrors, SpecializeError};
pub use instantiation::Instantiation;
pub use span::{Span, TokenRange};
pub use syntax::{Placeholder, TemplateSyntax};
pub use types::ConcreteType;
