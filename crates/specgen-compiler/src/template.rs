//! Parsed templates and their declared placeholders.

use bumpalo::Bump;
use specgen_core::{ParseErrors, Placeholder, TemplateSyntax};
use specgen_parser::ast::visitor::{Visitor, walk_compilation_unit, walk_type_decl};
use specgen_parser::ast::{TypeDecl, TypeParam};
use specgen_parser::{CompilationUnit, Parser};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// How many placeholders a template declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// Only the primary placeholder.
    One,
    /// Primary and secondary.
    Two,
}

impl Arity {
    /// Infer the arity from a template's file name alone.
    ///
    /// Used to claim the outputs of templates that could not be read or
    /// parsed. Returns `None` when the name carries no primary placeholder.
    pub fn from_file_name(name: &str, syntax: &TemplateSyntax) -> Option<Arity> {
        if !syntax.mentions(name, Placeholder::Primary) {
            return None;
        }
        if syntax.mentions(name, Placeholder::Secondary) {
            Some(Arity::Two)
        } else {
            Some(Arity::One)
        }
    }

    /// Whether a template of this arity declares the given placeholder.
    pub fn declares(self, placeholder: Placeholder) -> bool {
        match placeholder {
            Placeholder::Primary => true,
            Placeholder::Secondary => self == Arity::Two,
        }
    }
}

/// Errors that make a template unusable as a whole.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("{}: {} parse error(s)\n{report}", path.display(), errors.len())]
    Parse {
        path: PathBuf,
        errors: ParseErrors,
        /// The errors rendered against the template source.
        report: String,
    },

    #[error("{}: declares placeholder {secondary} without {primary}", path.display())]
    SecondaryWithoutPrimary {
        path: PathBuf,
        primary: String,
        secondary: String,
    },

    #[error("{}: declares no placeholder", path.display())]
    NoPlaceholder { path: PathBuf },
}

/// A template parsed once and specialized many times.
///
/// The syntax tree lives in the caller's arena and is never mutated, so one
/// template can be shared by concurrent specializations.
#[derive(Debug)]
pub struct Template<'ast> {
    path: PathBuf,
    unit: CompilationUnit<'ast>,
    arity: Arity,
    syntax: TemplateSyntax,
}

impl<'ast> Template<'ast> {
    /// Parse `source` and determine which placeholders it declares.
    ///
    /// `path` is the template's path relative to the template root; its file
    /// name takes part in placeholder detection.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn parse(
        path: impl Into<PathBuf>,
        source: &str,
        arena: &'ast Bump,
        syntax: &TemplateSyntax,
    ) -> Result<Self, TemplateError> {
        let path = path.into();
        let unit = Parser::parse_with(source, arena, syntax).map_err(|errors| TemplateError::Parse {
            report: errors.display_with_source(source),
            path: path.clone(),
            errors,
        })?;

        let mut scan = PlaceholderScan {
            syntax,
            primary: false,
            secondary: false,
        };
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            scan.note(name);
        }
        walk_compilation_unit(&mut scan, &unit);

        let arity = match (scan.primary, scan.secondary) {
            (true, true) => Arity::Two,
            (true, false) => Arity::One,
            (false, true) => {
                return Err(TemplateError::SecondaryWithoutPrimary {
                    path,
                    primary: syntax.primary.clone(),
                    secondary: syntax.secondary.clone(),
                });
            }
            (false, false) => return Err(TemplateError::NoPlaceholder { path }),
        };

        Ok(Self {
            path,
            unit,
            arity,
            syntax: syntax.clone(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn unit(&self) -> &CompilationUnit<'ast> {
        &self.unit
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn syntax(&self) -> &TemplateSyntax {
        &self.syntax
    }
}

/// Finds placeholder names in type parameters and type declaration names.
struct PlaceholderScan<'s> {
    syntax: &'s TemplateSyntax,
    primary: bool,
    secondary: bool,
}

impl PlaceholderScan<'_> {
    fn note(&mut self, text: &str) {
        self.primary |= self.syntax.mentions(text, Placeholder::Primary);
        self.secondary |= self.syntax.mentions(text, Placeholder::Secondary);
    }
}

impl<'ast> Visitor<'ast> for PlaceholderScan<'_> {
    fn visit_type_decl(&mut self, decl: &TypeDecl<'ast>) {
        self.note(decl.name.name);
        walk_type_decl(self, decl);
    }

    fn visit_type_param(&mut self, param: &TypeParam<'ast>) {
        match self.syntax.placeholder(param.name.name) {
            Some(Placeholder::Primary) => self.primary = true,
            Some(Placeholder::Secondary) => self.secondary = true,
            None => {}
        }
    }
}
