//! Common AST node types used throughout the parser.
//!
//! Every node records the token interval it was parsed from. Intervals index
//! into the full token stream (trivia included), start at the node's first
//! significant token and end after its last one.

use bitflags::bitflags;
use specgen_core::{Span, TokenRange};
use std::fmt;

use super::body::Group;

/// An identifier with source location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ident<'ast> {
    /// The identifier name (allocated in arena).
    pub name: &'ast str,
    /// Index of the identifier's token.
    pub token: u32,
    /// Source location.
    pub span: Span,
}

impl<'ast> Ident<'ast> {
    pub fn new(name: &'ast str, token: u32, span: Span) -> Self {
        Self { name, token, span }
    }

    /// The single-token range this identifier occupies.
    #[inline]
    pub fn range(&self) -> TokenRange {
        TokenRange::single(self.token)
    }
}

impl fmt::Display for Ident<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A dotted name such as `com.carrotsearch.hppc.cursors`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualifiedName<'ast> {
    pub segments: &'ast [Ident<'ast>],
    pub range: TokenRange,
}

impl fmt::Display for QualifiedName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", segment.name)?;
        }
        Ok(())
    }
}

/// An annotation: `@Name` or `@Name(args)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Annotation<'ast> {
    pub name: QualifiedName<'ast>,
    /// The parenthesized element values, kept as a token tree.
    pub args: Option<Group<'ast>>,
    pub range: TokenRange,
}

bitflags! {
    /// Declaration modifier keywords.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u16 {
        const PUBLIC = 1 << 0;
        const PROTECTED = 1 << 1;
        const PRIVATE = 1 << 2;
        const STATIC = 1 << 3;
        const ABSTRACT = 1 << 4;
        const FINAL = 1 << 5;
        const NATIVE = 1 << 6;
        const SYNCHRONIZED = 1 << 7;
        const TRANSIENT = 1 << 8;
        const VOLATILE = 1 << 9;
        const STRICTFP = 1 << 10;
        const DEFAULT = 1 << 11;
    }
}

/// Modifiers and annotations preceding a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ModifierList<'ast> {
    pub flags: Modifiers,
    pub annotations: &'ast [Annotation<'ast>],
}

impl ModifierList<'_> {
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty() && self.annotations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualified_name_display() {
        let segments = [
            Ident::new("java", 0, Span::new(1, 1, 4)),
            Ident::new("util", 2, Span::new(1, 6, 4)),
        ];
        let name = QualifiedName {
            segments: &segments,
            range: TokenRange::new(0, 3),
        };
        assert_eq!(name.to_string(), "java.util");
    }

    #[test]
    fn modifiers_combine() {
        let flags = Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL;
        assert!(flags.contains(Modifiers::STATIC));
        assert!(!flags.contains(Modifiers::PRIVATE));
        assert!(ModifierList::default().is_empty());
    }
}
