//! specgen: type-specialized source generation from placeholder templates.
//!
//! A template is a source file written once against the placeholder types
//! `KType` and optionally `VType`. Every template is expanded over the type
//! catalog (eight bindings per placeholder) and each expansion is written as
//! a separate, fully concrete source file.
//!
//! # Example
//!
//! ```no_run
//! use specgen::{GeneratorConfig, generate};
//!
//! let config = GeneratorConfig::new("src/main/templates", "target/generated-sources");
//! let summary = generate(config)?;
//! println!("{summary}");
//! # Ok::<(), specgen::GenerateError>(())
//! ```
//!
//! # Crates
//!
//! - `specgen-core`: spans, the type catalog, instantiations and errors
//! - `specgen-parser`: lossless lexer and declaration parser
//! - `specgen-compiler`: rewriting one template for one instantiation

pub mod config;
pub mod error;
pub mod expansion;
pub mod generator;
pub mod output;
pub mod summary;

pub use config::GeneratorConfig;
pub use error::GenerateError;
pub use expansion::expand;
pub use generator::{Generator, generate};
pub use summary::RunSummary;

pub use specgen_compiler::{Arity, Template, TemplateError, specialize};
pub use specgen_core::{ConcreteType, Instantiation, Placeholder, SpecializeError, TemplateSyntax};
