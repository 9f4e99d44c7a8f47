//! Type expression AST nodes.
//!
//! ```text
//! Type        ::= Annotation* (Primitive | ClassType) Dims
//! ClassType   ::= Segment ('.' Segment)*
//! Segment     ::= Ident TypeArgs?
//! TypeArgs    ::= '<' (TypeArg (',' TypeArg)*)? '>'
//! TypeArg     ::= Type | '?' (('extends' | 'super') Type)?
//! TypeParams  ::= '<' TypeParam (',' TypeParam)* '>'
//! TypeParam   ::= Annotation* Ident ('extends' Type ('&' Type)*)?
//! ```

use specgen_core::TokenRange;
use std::fmt;

use super::node::{Annotation, Ident};

/// Primitive type keywords, plus `void` in return position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Char => "char",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
            PrimitiveType::Void => "void",
        };
        write!(f, "{name}")
    }
}

/// A type reference with its array dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeRef<'ast> {
    pub annotations: &'ast [Annotation<'ast>],
    pub kind: TypeKind<'ast>,
    /// Number of `[]` pairs following the base type.
    pub dims: u32,
    pub range: TokenRange,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypeKind<'ast> {
    Primitive(PrimitiveType),
    /// A possibly qualified class or interface type.
    Class(&'ast [ClassSegment<'ast>]),
}

/// One dotted segment of a class type: `Entry<K, V>` in `Map.Entry<K, V>`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassSegment<'ast> {
    pub name: Ident<'ast>,
    pub args: Option<TypeArgs<'ast>>,
}

impl<'ast> TypeRef<'ast> {
    /// The identifier of a type written as one bare name, without type
    /// arguments or array dimensions.
    pub fn as_simple_name(&self) -> Option<&Ident<'ast>> {
        match self.kind {
            TypeKind::Class([segment]) if segment.args.is_none() && self.dims == 0 => {
                Some(&segment.name)
            }
            _ => None,
        }
    }

    /// The class segments, empty for primitive types.
    pub fn segments(&self) -> &'ast [ClassSegment<'ast>] {
        match self.kind {
            TypeKind::Class(segments) => segments,
            TypeKind::Primitive(_) => &[],
        }
    }

    /// Whether any segment carries a type-argument list.
    pub fn has_type_args(&self) -> bool {
        self.segments().iter().any(|s| s.args.is_some())
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self.kind, TypeKind::Primitive(_))
    }
}

/// A type-argument list, angle brackets included in `range`.
///
/// An empty `args` slice is a diamond `<>`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeArgs<'ast> {
    pub args: &'ast [TypeArg<'ast>],
    pub range: TokenRange,
}

impl TypeArgs<'_> {
    #[inline]
    pub fn is_diamond(&self) -> bool {
        self.args.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypeArg<'ast> {
    Type(TypeRef<'ast>),
    Wildcard(Wildcard<'ast>),
}

impl TypeArg<'_> {
    pub fn range(&self) -> TokenRange {
        match self {
            TypeArg::Type(ty) => ty.range,
            TypeArg::Wildcard(wildcard) => wildcard.range,
        }
    }
}

/// `?`, `? extends T` or `? super T`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wildcard<'ast> {
    pub bound: Option<WildcardBound<'ast>>,
    pub range: TokenRange,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WildcardBound<'ast> {
    pub kind: BoundKind,
    pub ty: TypeRef<'ast>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundKind {
    Extends,
    Super,
}

/// A generic parameter list on a type or method declaration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeParams<'ast> {
    pub params: &'ast [TypeParam<'ast>],
    pub range: TokenRange,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeParam<'ast> {
    pub annotations: &'ast [Annotation<'ast>],
    pub name: Ident<'ast>,
    pub bounds: &'ast [TypeRef<'ast>],
    pub range: TokenRange,
}
