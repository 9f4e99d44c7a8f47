//! Visitor pattern for AST traversal.
//!
//! Implement [`Visitor`] and override the `visit_*` methods for the nodes of
//! interest. Each default implementation calls the matching `walk_*`
//! function, which visits the node's children; call it from an override to
//! keep descending.
//!
//! # Example
//!
//! ```
//! use specgen_parser::ast::visitor::{Visitor, walk_compilation_unit};
//! use specgen_parser::ast::TypeParam;
//! use specgen_parser::Parser;
//! use bumpalo::Bump;
//!
//! struct TypeParamNames(Vec<String>);
//!
//! impl<'ast> Visitor<'ast> for TypeParamNames {
//!     fn visit_type_param(&mut self, param: &TypeParam<'ast>) {
//!         self.0.push(param.name.name.to_string());
//!     }
//! }
//!
//! let arena = Bump::new();
//! let unit = Parser::parse("class A<KType> { <T> void m() {} }", &arena).unwrap();
//! let mut names = TypeParamNames(Vec::new());
//! walk_compilation_unit(&mut names, &unit);
//! assert_eq!(names.0, vec!["KType", "T"]);
//! ```

use super::CompilationUnit;
use super::body::{BodyElem, Expr, Group, IntrinsicCall};
use super::decl::*;
use super::node::{Annotation, Ident, ModifierList};
use super::types::{TypeArg, TypeArgs, TypeParam, TypeParams, TypeRef};

pub trait Visitor<'ast>: Sized {
    fn visit_type_decl(&mut self, decl: &TypeDecl<'ast>) {
        walk_type_decl(self, decl);
    }

    fn visit_class_body(&mut self, body: &ClassBody<'ast>) {
        walk_class_body(self, body);
    }

    fn visit_member(&mut self, member: &Member<'ast>) {
        walk_member(self, member);
    }

    fn visit_method(&mut self, method: &MethodDecl<'ast>) {
        walk_method(self, method);
    }

    fn visit_field(&mut self, field: &FieldDecl<'ast>) {
        walk_field(self, field);
    }

    fn visit_modifiers(&mut self, modifiers: &ModifierList<'ast>) {
        for annotation in modifiers.annotations {
            self.visit_annotation(annotation);
        }
    }

    fn visit_annotation(&mut self, annotation: &Annotation<'ast>) {
        if let Some(args) = &annotation.args {
            self.visit_group(args);
        }
    }

    fn visit_type_params(&mut self, params: &TypeParams<'ast>) {
        for param in params.params {
            self.visit_type_param(param);
        }
    }

    fn visit_type_param(&mut self, param: &TypeParam<'ast>) {
        for bound in param.bounds {
            self.visit_type(bound);
        }
    }

    fn visit_type(&mut self, ty: &TypeRef<'ast>) {
        walk_type(self, ty);
    }

    fn visit_type_args(&mut self, args: &TypeArgs<'ast>) {
        for arg in args.args {
            match arg {
                TypeArg::Type(ty) => self.visit_type(ty),
                TypeArg::Wildcard(wildcard) => {
                    if let Some(bound) = &wildcard.bound {
                        self.visit_type(&bound.ty);
                    }
                }
            }
        }
    }

    fn visit_group(&mut self, group: &Group<'ast>) {
        walk_elems(self, group.elems);
    }

    fn visit_expr(&mut self, expr: &Expr<'ast>) {
        walk_elems(self, expr.elems);
    }

    fn visit_body_elem(&mut self, elem: &BodyElem<'ast>) {
        walk_body_elem(self, elem);
    }

    fn visit_intrinsic(&mut self, call: &IntrinsicCall<'ast>) {
        if let Some(hint) = &call.hint {
            self.visit_type_args(hint);
        }
        for arg in call.args {
            self.visit_expr(arg);
        }
    }

    fn visit_ident(&mut self, _ident: &Ident<'ast>) {}
}

pub fn walk_compilation_unit<'ast, V: Visitor<'ast>>(visitor: &mut V, unit: &CompilationUnit<'ast>) {
    for decl in unit.types {
        visitor.visit_type_decl(decl);
    }
}

pub fn walk_type_decl<'ast, V: Visitor<'ast>>(visitor: &mut V, decl: &TypeDecl<'ast>) {
    visitor.visit_modifiers(&decl.modifiers);
    if let Some(params) = &decl.type_params {
        visitor.visit_type_params(params);
    }
    for ty in decl.extends.iter().chain(decl.implements) {
        visitor.visit_type(ty);
    }
    visitor.visit_class_body(&decl.body);
}

pub fn walk_class_body<'ast, V: Visitor<'ast>>(visitor: &mut V, body: &ClassBody<'ast>) {
    for constant in body.enum_constants {
        if let Some(args) = &constant.args {
            visitor.visit_group(args);
        }
        if let Some(body) = &constant.body {
            visitor.visit_class_body(body);
        }
    }
    for member in body.members {
        visitor.visit_member(member);
    }
}

pub fn walk_member<'ast, V: Visitor<'ast>>(visitor: &mut V, member: &Member<'ast>) {
    match member {
        Member::Field(field) => visitor.visit_field(field),
        Member::Method(method) => visitor.visit_method(method),
        Member::Initializer(init) => visitor.visit_group(&init.body),
        Member::Type(decl) => visitor.visit_type_decl(decl),
    }
}

pub fn walk_method<'ast, V: Visitor<'ast>>(visitor: &mut V, method: &MethodDecl<'ast>) {
    visitor.visit_modifiers(&method.modifiers);
    if let Some(params) = &method.type_params {
        visitor.visit_type_params(params);
    }
    if let Some(ty) = &method.return_type {
        visitor.visit_type(ty);
    }
    for param in method.params {
        visitor.visit_modifiers(&param.modifiers);
        visitor.visit_type(&param.ty);
    }
    for ty in method.throws {
        visitor.visit_type(ty);
    }
    if let Some(value) = &method.default_value {
        visitor.visit_expr(value);
    }
    if let Some(body) = &method.body {
        visitor.visit_group(body);
    }
}

pub fn walk_field<'ast, V: Visitor<'ast>>(visitor: &mut V, field: &FieldDecl<'ast>) {
    visitor.visit_modifiers(&field.modifiers);
    visitor.visit_type(&field.ty);
    for declarator in field.declarators {
        if let Some(init) = &declarator.init {
            visitor.visit_expr(init);
        }
    }
}

pub fn walk_type<'ast, V: Visitor<'ast>>(visitor: &mut V, ty: &TypeRef<'ast>) {
    for annotation in ty.annotations {
        visitor.visit_annotation(annotation);
    }
    for segment in ty.segments() {
        if let Some(args) = &segment.args {
            visitor.visit_type_args(args);
        }
    }
}

pub fn walk_elems<'ast, V: Visitor<'ast>>(visitor: &mut V, elems: &[BodyElem<'ast>]) {
    for elem in elems {
        visitor.visit_body_elem(elem);
    }
}

pub fn walk_body_elem<'ast, V: Visitor<'ast>>(visitor: &mut V, elem: &BodyElem<'ast>) {
    match elem {
        BodyElem::Token(_) => {}
        BodyElem::Ident(ident) => visitor.visit_ident(ident),
        BodyElem::Type(ty) => visitor.visit_type(ty),
        BodyElem::TypeArgs(args) => visitor.visit_type_args(args),
        BodyElem::Group(group) => visitor.visit_group(group),
        BodyElem::Intrinsic(call) => visitor.visit_intrinsic(call),
        BodyElem::AnonymousClass(body) => visitor.visit_class_body(body),
        BodyElem::LocalType(decl) => visitor.visit_type_decl(decl),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Parser;
    use bumpalo::Bump;

    #[derive(Default)]
    struct Counter {
        types: usize,
        intrinsics: usize,
        idents: Vec<String>,
    }

    impl<'ast> Visitor<'ast> for Counter {
        fn visit_type(&mut self, ty: &TypeRef<'ast>) {
            self.types += 1;
            walk_type(self, ty);
        }

        fn visit_intrinsic(&mut self, call: &IntrinsicCall<'ast>) {
            self.intrinsics += 1;
            for arg in call.args {
                self.visit_expr(arg);
            }
        }

        fn visit_ident(&mut self, ident: &Ident<'ast>) {
            self.idents.push(ident.name.to_string());
        }
    }

    #[test]
    fn visits_nested_bodies() {
        let arena = Bump::new();
        let source = "class A<KType> {
            KType value;
            void m() {
                Runnable r = new Runnable() {
                    public void run() { Intrinsics.equals(value, other); }
                };
            }
        }";
        let unit = Parser::parse(source, &arena).unwrap();
        let mut counter = Counter::default();
        walk_compilation_unit(&mut counter, &unit);

        // KType, void, the creator's Runnable, void. A plain local type
        // without type arguments stays an identifier.
        assert_eq!(counter.types, 4);
        assert!(counter.idents.contains(&"Runnable".to_string()));
        assert_eq!(counter.intrinsics, 1);
        assert!(counter.idents.contains(&"value".to_string()));
        assert!(counter.idents.contains(&"other".to_string()));
    }
}
