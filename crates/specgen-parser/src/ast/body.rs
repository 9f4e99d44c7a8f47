//! Token trees for method bodies, initializers and annotation values.
//!
//! Statements and expressions are not parsed into a full grammar. A body is
//! a delimiter-balanced tree of [`BodyElem`]s in which the constructs a
//! template rewrite cares about are recognized: generic types, explicit
//! method type arguments, intrinsic calls, anonymous class bodies and local
//! class declarations. Everything else stays a plain token.

use specgen_core::TokenRange;

use super::decl::{ClassBody, TypeDecl};
use super::node::Ident;
use super::types::{TypeArgs, TypeRef};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyElem<'ast> {
    /// Any significant token not otherwise classified.
    Token(u32),
    /// An identifier in expression position.
    Ident(Ident<'ast>),
    /// A class type carrying type arguments, or the type of a `new` creator.
    Type(TypeRef<'ast>),
    /// Explicit type arguments of a method call: the `<T>` in `this.<T>m()`.
    TypeArgs(TypeArgs<'ast>),
    /// A balanced `(...)`, `[...]` or `{...}` group.
    Group(Group<'ast>),
    /// A call through the intrinsics class.
    Intrinsic(IntrinsicCall<'ast>),
    /// The body of an anonymous class: `new Foo() { ... }`.
    AnonymousClass(ClassBody<'ast>),
    /// A class, interface or enum declared inside a body.
    LocalType(&'ast TypeDecl<'ast>),
}

impl BodyElem<'_> {
    pub fn range(&self) -> TokenRange {
        match self {
            BodyElem::Token(index) => TokenRange::single(*index),
            BodyElem::Ident(ident) => ident.range(),
            BodyElem::Type(ty) => ty.range,
            BodyElem::TypeArgs(args) => args.range,
            BodyElem::Group(group) => group.range,
            BodyElem::Intrinsic(call) => call.range,
            BodyElem::AnonymousClass(body) => body.range,
            BodyElem::LocalType(decl) => decl.range,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    Paren,
    Bracket,
    Brace,
}

/// A delimited group; `range` includes both delimiters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Group<'ast> {
    pub delimiter: Delimiter,
    pub elems: &'ast [BodyElem<'ast>],
    pub range: TokenRange,
}

/// A run of body elements, such as a field initializer or a call argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Expr<'ast> {
    pub elems: &'ast [BodyElem<'ast>],
    pub range: TokenRange,
}

/// `Intrinsics.name(args)` or `Intrinsics.<Hint>name(args)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntrinsicCall<'ast> {
    pub receiver: Ident<'ast>,
    pub hint: Option<TypeArgs<'ast>>,
    pub name: Ident<'ast>,
    /// Arguments split at top-level commas.
    pub args: &'ast [Expr<'ast>],
    /// From the receiver through the closing parenthesis.
    pub range: TokenRange,
}
