//! Template specializer
//!
//! Turns one parsed template into the source text of one instantiation.
//!
//! ## Pipeline
//!
//! - **Parse**: [`Template::parse`] builds the syntax tree once and works out
//!   which placeholders the template declares.
//! - **Collect edits**: [`Specializer`] walks the tree and records
//!   replacements over token ranges. The tree is never mutated.
//! - **Reconstruct**: [`reconstruct`] splices the edits into the original
//!   token stream, rewriting comments on the way.
//!
//! ## Modules
//!
//! - [`template`]: parsed templates and placeholder detection
//! - [`specializer`]: the tree walk and [`specialize`] entry point
//! - [`signature`]: type, type-parameter and identifier rewriting
//! - [`intrinsics`]: resolution of intrinsic calls
//! - [`edit`]: token-range replacements
//! - [`reconstruct`]: applying edits to the token stream
//! - [`comments`]: placeholder substitution in comment text

pub mod comments;
pub mod edit;
pub mod intrinsics;
pub mod reconstruct;
pub mod signature;
pub mod specializer;
pub mod template;

pub use comments::CommentRewriter;
pub use edit::Edit;
pub use reconstruct::reconstruct;
pub use specializer::{Specializer, specialize};
pub use template::{Arity, Template, TemplateError};

pub use specgen_core::SpecializeError;
