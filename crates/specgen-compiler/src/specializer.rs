//! The specialization pass.
//!
//! A [`Specializer`] walks a template's syntax tree for one instantiation and
//! collects [`Edit`]s: placeholder names in declarations and types
//! ([`crate::signature`]), intrinsic calls ([`crate::intrinsics`]) and plain
//! identifiers. The edits are then spliced into the token stream by
//! [`reconstruct`]. The tree itself is never modified.
//!
//! Where a node is replaced as a whole (a type-argument list that loses an
//! argument, an intrinsic call) its children are rendered by a nested
//! specializer over the child's own range, so the edit sets never overlap.

use specgen_core::{Instantiation, SpecializeError, TemplateSyntax, TokenRange};
use specgen_parser::CompilationUnit;
use specgen_parser::ast::*;

use crate::comments::CommentRewriter;
use crate::edit::Edit;
use crate::reconstruct::reconstruct;
use crate::template::{Arity, Template};

pub(crate) type Result<T> = std::result::Result<T, SpecializeError>;

/// Produce the source text of one instantiation of a template.
///
/// This is a pure function of its inputs; any number of instantiations of
/// the same template may run concurrently.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn specialize(template: &Template<'_>, instantiation: &Instantiation) -> Result<String> {
    let unit = template.unit();
    let mut specializer = Specializer::new(unit, template.syntax(), template.arity(), instantiation);
    specializer.compilation_unit(unit)?;
    specializer.finish(unit.range())
}

/// Collects the edits that turn a template into one instantiation.
pub struct Specializer<'a, 'ast> {
    pub(crate) unit: &'a CompilationUnit<'ast>,
    pub(crate) syntax: &'a TemplateSyntax,
    pub(crate) arity: Arity,
    pub(crate) instantiation: &'a Instantiation,
    edits: Vec<Edit>,
}

impl<'a, 'ast> Specializer<'a, 'ast> {
    pub fn new(
        unit: &'a CompilationUnit<'ast>,
        syntax: &'a TemplateSyntax,
        arity: Arity,
        instantiation: &'a Instantiation,
    ) -> Self {
        Self {
            unit,
            syntax,
            arity,
            instantiation,
            edits: Vec::new(),
        }
    }

    /// The edits collected so far.
    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    /// Reconstruct `range` with the collected edits applied.
    pub fn finish(self, range: TokenRange) -> Result<String> {
        let comments = CommentRewriter::new(self.syntax, self.instantiation);
        reconstruct(self.unit.tokens, range, self.edits, &comments)
    }

    /// Specialize a sub-tree in isolation and return the text of `range`.
    pub(crate) fn render(
        &self,
        range: TokenRange,
        f: impl FnOnce(&mut Self) -> Result<()>,
    ) -> Result<String> {
        let mut nested = Specializer::new(self.unit, self.syntax, self.arity, self.instantiation);
        f(&mut nested)?;
        nested.finish(range)
    }

    pub(crate) fn push(&mut self, range: TokenRange, text: impl Into<String>) {
        self.edits.push(Edit::replace(range, text));
    }

    /// Original source text of a range.
    pub(crate) fn text(&self, range: TokenRange) -> String {
        self.unit.text(range)
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    pub fn compilation_unit(&mut self, unit: &CompilationUnit<'ast>) -> Result<()> {
        if let Some(package) = &unit.package {
            self.annotations(package.annotations)?;
            self.qualified_name(&package.name);
        }
        for import in unit.imports {
            self.qualified_name(&import.name);
        }
        for decl in unit.types {
            self.type_decl(decl)?;
        }
        Ok(())
    }

    pub(crate) fn type_decl(&mut self, decl: &TypeDecl<'ast>) -> Result<()> {
        self.modifiers(&decl.modifiers)?;
        self.ident(&decl.name);
        if let Some(params) = &decl.type_params {
            self.type_params(params)?;
        }
        for ty in decl.extends.iter().chain(decl.implements) {
            self.ty(ty)?;
        }
        self.class_body(&decl.body)
    }

    fn class_body(&mut self, body: &ClassBody<'ast>) -> Result<()> {
        for constant in body.enum_constants {
            self.annotations(constant.annotations)?;
            self.ident(&constant.name);
            if let Some(args) = &constant.args {
                self.group(args)?;
            }
            if let Some(body) = &constant.body {
                self.class_body(body)?;
            }
        }
        for member in body.members {
            self.member(member)?;
        }
        Ok(())
    }

    fn member(&mut self, member: &Member<'ast>) -> Result<()> {
        match member {
            Member::Field(field) => self.field(field),
            Member::Method(method) => self.method(method),
            Member::Initializer(init) => self.group(&init.body),
            Member::Type(decl) => self.type_decl(decl),
        }
    }

    fn field(&mut self, field: &FieldDecl<'ast>) -> Result<()> {
        self.modifiers(&field.modifiers)?;
        self.ty(&field.ty)?;
        for declarator in field.declarators {
            self.ident(&declarator.name);
            if let Some(init) = &declarator.init {
                self.elems(init.elems)?;
            }
        }
        Ok(())
    }

    fn method(&mut self, method: &MethodDecl<'ast>) -> Result<()> {
        self.modifiers(&method.modifiers)?;
        if let Some(params) = &method.type_params {
            self.type_params(params)?;
        }
        if let Some(ty) = &method.return_type {
            self.ty(ty)?;
        }
        self.ident(&method.name);
        for param in method.params {
            self.modifiers(&param.modifiers)?;
            self.ty(&param.ty)?;
            self.ident(&param.name);
        }
        for ty in method.throws {
            self.ty(ty)?;
        }
        if let Some(value) = &method.default_value {
            self.elems(value.elems)?;
        }
        if let Some(body) = &method.body {
            self.group(body)?;
        }
        Ok(())
    }

    fn modifiers(&mut self, modifiers: &ModifierList<'ast>) -> Result<()> {
        self.annotations(modifiers.annotations)
    }

    pub(crate) fn annotations(&mut self, annotations: &[Annotation<'ast>]) -> Result<()> {
        for annotation in annotations {
            self.qualified_name(&annotation.name);
            if let Some(args) = &annotation.args {
                self.group(args)?;
            }
        }
        Ok(())
    }

    // ========================================================================
    // Bodies
    // ========================================================================

    fn group(&mut self, group: &Group<'ast>) -> Result<()> {
        self.elems(group.elems)
    }

    pub(crate) fn elems(&mut self, elems: &[BodyElem<'ast>]) -> Result<()> {
        for elem in elems {
            match elem {
                BodyElem::Token(_) => {}
                BodyElem::Ident(ident) => self.ident(ident),
                BodyElem::Type(ty) => self.ty(ty)?,
                BodyElem::TypeArgs(args) => self.type_args(args, None)?,
                BodyElem::Group(group) => self.group(group)?,
                BodyElem::Intrinsic(call) => self.intrinsic(call)?,
                BodyElem::AnonymousClass(body) => self.class_body(body)?,
                BodyElem::LocalType(decl) => self.type_decl(decl)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;
    use specgen_core::ConcreteType::{self, *};

    fn spec(path: &str, source: &str, primary: ConcreteType, secondary: Option<ConcreteType>) -> String {
        let arena = Bump::new();
        let template = Template::parse(path, source, &arena, &TemplateSyntax::default()).unwrap();
        let inst = match secondary {
            Some(secondary) => Instantiation::with_secondary(path, primary, secondary),
            None => Instantiation::new(path, primary),
        };
        specialize(&template, &inst).unwrap()
    }

    #[test]
    fn class_header_and_fields() {
        let source = "package com.example;\n\npublic class KTypeStack<KType> extends KTypeArrayList<KType> {\n    KType top;\n    public KTypeStack() {}\n}\n";
        assert_eq!(
            spec("KTypeStack.java", source, Int, None),
            "package com.example;\n\npublic class IntStack extends IntArrayList {\n    int top;\n    public IntStack() {}\n}\n"
        );
        assert_eq!(
            spec("KTypeStack.java", source, Generic, None),
            "package com.example;\n\npublic class ObjectStack<KType> extends ObjectArrayList<KType> {\n    KType top;\n    public ObjectStack() {}\n}\n"
        );
    }

    #[test]
    fn map_signature() {
        let source = "public class KTypeVTypeHashMap<KType, VType> implements KTypeVTypeMap<KType, VType> {}";
        assert_eq!(
            spec("KTypeVTypeHashMap.java", source, Int, Some(Long)),
            "public class IntLongHashMap implements IntLongMap {}"
        );
        assert_eq!(
            spec("KTypeVTypeHashMap.java", source, Int, Some(Generic)),
            "public class IntObjectHashMap<VType> implements IntObjectMap<VType> {}"
        );
        assert_eq!(
            spec("KTypeVTypeHashMap.java", source, Generic, Some(Generic)),
            "public class ObjectObjectHashMap<KType, VType> implements ObjectObjectMap<KType, VType> {}"
        );
    }

    #[test]
    fn method_bodies() {
        let source = "class KTypeBag<KType> {
    KType[] buffer;
    void add(KType e) {
        KTypeCursor<KType> c = new KTypeCursor<>();
        for (KType k : buffer) { if (Intrinsics.equals(k, e)) return; }
    }
}";
        assert_eq!(
            spec("KTypeBag.java", source, Float, None),
            "class FloatBag {
    float[] buffer;
    void add(float e) {
        FloatCursor c = new FloatCursor();
        for (float k : buffer) { if ((Float.floatToIntBits(k) == Float.floatToIntBits(e))) return; }
    }
}"
        );
    }

    #[test]
    fn comments_follow_the_binding() {
        let source = "/** A KType stack. */\nclass KTypeStack<KType> { /* of KTypeCursor */ }";
        assert_eq!(
            spec("KTypeStack.java", source, Char, None),
            "/** A char stack. */\nclass CharStack { /* of CharCursor */ }"
        );
    }

    #[test]
    fn render_is_isolated() {
        let arena = Bump::new();
        let syntax = TemplateSyntax::default();
        let template = Template::parse("KTypeA.java", "class KTypeA<KType> { KType x; }", &arena, &syntax).unwrap();
        let inst = Instantiation::new("KTypeA.java", Int);
        let spec = Specializer::new(template.unit(), &syntax, Arity::One, &inst);
        let Member::Field(field) = template.unit().types[0].body.members[0] else {
            panic!("expected field");
        };
        let text = spec.render(field.ty.range, |s| s.ty(&field.ty)).unwrap();
        assert_eq!(text, "int");
        assert!(spec.edits().is_empty());
    }
}
