//! Declaration AST nodes: compilation unit, types and members.

use specgen_core::TokenRange;

use super::body::{Expr, Group};
use super::node::{Annotation, Ident, ModifierList, QualifiedName};
use super::types::{TypeParams, TypeRef};

/// `package a.b.c;`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackageDecl<'ast> {
    pub annotations: &'ast [Annotation<'ast>],
    pub name: QualifiedName<'ast>,
    pub range: TokenRange,
}

/// `import [static] a.b.C[.*];`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImportDecl<'ast> {
    pub is_static: bool,
    pub name: QualifiedName<'ast>,
    /// Whether the import ends in `.*`.
    pub on_demand: bool,
    pub range: TokenRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeDeclKind {
    Class,
    Interface,
    Enum,
    /// `@interface`
    Annotation,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeDecl<'ast> {
    pub modifiers: ModifierList<'ast>,
    pub kind: TypeDeclKind,
    pub name: Ident<'ast>,
    pub type_params: Option<TypeParams<'ast>>,
    pub extends: &'ast [TypeRef<'ast>],
    pub implements: &'ast [TypeRef<'ast>],
    pub body: ClassBody<'ast>,
    pub range: TokenRange,
}

/// The braces of a class, interface, enum or anonymous class body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassBody<'ast> {
    /// Constants of an enum body; empty otherwise.
    pub enum_constants: &'ast [EnumConstant<'ast>],
    pub members: &'ast [Member<'ast>],
    pub range: TokenRange,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnumConstant<'ast> {
    pub annotations: &'ast [Annotation<'ast>],
    pub name: Ident<'ast>,
    pub args: Option<Group<'ast>>,
    pub body: Option<ClassBody<'ast>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Member<'ast> {
    Field(FieldDecl<'ast>),
    Method(MethodDecl<'ast>),
    Initializer(Initializer<'ast>),
    Type(&'ast TypeDecl<'ast>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDecl<'ast> {
    pub modifiers: ModifierList<'ast>,
    pub ty: TypeRef<'ast>,
    pub declarators: &'ast [VarDeclarator<'ast>],
    pub range: TokenRange,
}

/// `name[] = init` inside a field declaration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarDeclarator<'ast> {
    pub name: Ident<'ast>,
    pub dims: u32,
    pub init: Option<Expr<'ast>>,
}

/// A method or constructor. Constructors have no return type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MethodDecl<'ast> {
    pub modifiers: ModifierList<'ast>,
    pub type_params: Option<TypeParams<'ast>>,
    pub return_type: Option<TypeRef<'ast>>,
    pub name: Ident<'ast>,
    pub params: &'ast [Param<'ast>],
    /// Legacy array dimensions after the parameter list.
    pub dims: u32,
    pub throws: &'ast [TypeRef<'ast>],
    /// Annotation element default: `String value() default "";`
    pub default_value: Option<Expr<'ast>>,
    pub body: Option<Group<'ast>>,
    pub range: TokenRange,
}

impl MethodDecl<'_> {
    pub fn is_constructor(&self) -> bool {
        self.return_type.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Param<'ast> {
    pub modifiers: ModifierList<'ast>,
    pub ty: TypeRef<'ast>,
    pub varargs: bool,
    pub name: Ident<'ast>,
    pub dims: u32,
    pub range: TokenRange,
}

/// `{ ... }` or `static { ... }` in a class body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Initializer<'ast> {
    pub is_static: bool,
    pub body: Group<'ast>,
}
