//! Declaration parsing: package, imports, types and their members.

use specgen_core::{ParseError, ParseErrorKind};

use super::CompilationUnit;
use super::decl::*;
use super::node::{Annotation, Ident, ModifierList, Modifiers, QualifiedName};
use super::parser::Parser;
use super::types::{TypeParams, TypeRef};
use crate::lexer::TokenKind;

impl<'ast> Parser<'ast> {
    /// Parse a whole file.
    ///
    /// Grammar: `PackageDecl? ImportDecl* (TypeDecl | ';')*`
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn parse_compilation_unit(&mut self) -> Result<CompilationUnit<'ast>, ParseError> {
        let package = self.parse_package()?;

        let mut imports = Vec::new();
        while self.check(TokenKind::Import) {
            imports.push(self.parse_import()?);
        }

        let mut types = Vec::new();
        loop {
            while self.eat(TokenKind::Semicolon).is_some() {}
            if self.is_eof() {
                break;
            }
            types.push(self.parse_type_decl()?);
        }

        Ok(CompilationUnit {
            package,
            imports: self.alloc_slice(imports),
            types: self.alloc_slice(types),
            tokens: self.tokens,
        })
    }

    /// Parse an optional package declaration. Annotations in front of the
    /// first type are left alone when no `package` follows them.
    fn parse_package(&mut self) -> Result<Option<PackageDecl<'ast>>, ParseError> {
        let start = self.mark();
        let annotations = self.parse_annotations()?;
        if self.eat(TokenKind::Package).is_none() {
            self.reset(start);
            return Ok(None);
        }

        let name = self.parse_qualified_name()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Some(PackageDecl {
            annotations,
            name,
            range: self.range_from(start),
        }))
    }

    /// Grammar: `'import' 'static'? QualifiedName ('.' '*')? ';'`
    fn parse_import(&mut self) -> Result<ImportDecl<'ast>, ParseError> {
        let start = self.mark();
        self.expect(TokenKind::Import)?;
        let is_static = self.eat(TokenKind::Static).is_some();
        let name = self.parse_qualified_name()?;

        let on_demand = if self.eat(TokenKind::Dot).is_some() {
            self.expect(TokenKind::Star)?;
            true
        } else {
            false
        };

        self.expect(TokenKind::Semicolon)?;
        Ok(ImportDecl {
            is_static,
            name,
            on_demand,
            range: self.range_from(start),
        })
    }

    /// Parse modifiers and annotations, then a type declaration.
    pub fn parse_type_decl(&mut self) -> Result<TypeDecl<'ast>, ParseError> {
        let start = self.mark();
        let modifiers = self.parse_modifiers()?;
        self.parse_type_decl_rest(modifiers, start)
    }

    /// Parse a type declaration whose modifiers are already consumed.
    ///
    /// Grammar: `('class' | 'interface' | 'enum' | '@' 'interface') Ident
    /// TypeParams? ('extends' TypeList)? ('implements' TypeList)? ClassBody`
    pub(super) fn parse_type_decl_rest(
        &mut self,
        modifiers: ModifierList<'ast>,
        start: usize,
    ) -> Result<TypeDecl<'ast>, ParseError> {
        let kind = match self.peek().kind {
            TokenKind::Class => TypeDeclKind::Class,
            TokenKind::Interface => TypeDeclKind::Interface,
            TokenKind::Enum => TypeDeclKind::Enum,
            TokenKind::At if self.check_nth(1, TokenKind::Interface) => {
                self.advance();
                TypeDeclKind::Annotation
            }
            _ => {
                let found = self.peek().kind;
                return Err(self.error_here(
                    ParseErrorKind::ExpectedDeclaration,
                    format!("expected class, interface or enum, found {found}"),
                ));
            }
        };
        self.advance();

        let name = self.expect_ident()?;
        let type_params = self.parse_optional_type_params()?;

        let extends = if self.eat(TokenKind::Extends).is_some() {
            self.parse_type_list()?
        } else {
            &[]
        };
        let implements = if self.eat(TokenKind::Implements).is_some() {
            self.parse_type_list()?
        } else {
            &[]
        };

        let body = self.parse_class_body(kind == TypeDeclKind::Enum)?;
        Ok(TypeDecl {
            modifiers,
            kind,
            name,
            type_params,
            extends,
            implements,
            body,
            range: self.range_from(start),
        })
    }

    /// Grammar: `'{' (EnumConstant (',' EnumConstant)* ','? ';')? Member* '}'`
    pub(super) fn parse_class_body(&mut self, is_enum: bool) -> Result<ClassBody<'ast>, ParseError> {
        let start = self.mark();
        self.expect(TokenKind::LeftBrace)?;

        let enum_constants = if is_enum {
            self.parse_enum_constants()?
        } else {
            &[]
        };

        let mut members = Vec::new();
        while !self.check(TokenKind::RightBrace) {
            if self.is_eof() {
                return Err(ParseError::unexpected_eof(self.peek().span));
            }
            if let Some(member) = self.parse_member()? {
                members.push(member);
            }
        }
        self.expect(TokenKind::RightBrace)?;

        Ok(ClassBody {
            enum_constants,
            members: self.alloc_slice(members),
            range: self.range_from(start),
        })
    }

    fn parse_enum_constants(&mut self) -> Result<&'ast [EnumConstant<'ast>], ParseError> {
        let mut constants = Vec::new();
        while !self.check(TokenKind::Semicolon) && !self.check(TokenKind::RightBrace) {
            let annotations = self.parse_annotations()?;
            let name = self.expect_ident()?;
            let args = if self.check(TokenKind::LeftParen) {
                Some(self.parse_group()?)
            } else {
                None
            };
            let body = if self.check(TokenKind::LeftBrace) {
                Some(self.parse_class_body(false)?)
            } else {
                None
            };
            constants.push(EnumConstant {
                annotations,
                name,
                args,
                body,
            });

            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.eat(TokenKind::Semicolon);
        Ok(self.alloc_slice(constants))
    }

    /// Parse one class body member. Returns `None` for a stray `;`.
    fn parse_member(&mut self) -> Result<Option<Member<'ast>>, ParseError> {
        if self.eat(TokenKind::Semicolon).is_some() {
            return Ok(None);
        }
        if self.check(TokenKind::LeftBrace) {
            let body = self.parse_group()?;
            return Ok(Some(Member::Initializer(Initializer {
                is_static: false,
                body,
            })));
        }
        if self.check(TokenKind::Static) && self.check_nth(1, TokenKind::LeftBrace) {
            self.advance();
            let body = self.parse_group()?;
            return Ok(Some(Member::Initializer(Initializer {
                is_static: true,
                body,
            })));
        }

        let start = self.mark();
        let modifiers = self.parse_modifiers()?;

        if self.starts_type_decl() {
            let decl = self.parse_type_decl_rest(modifiers, start)?;
            return Ok(Some(Member::Type(self.arena.alloc(decl))));
        }

        let type_params = self.parse_optional_type_params()?;

        // Constructor: the name directly followed by its parameter list.
        if self.check(TokenKind::Identifier) && self.check_nth(1, TokenKind::LeftParen) {
            let name = self.expect_ident()?;
            let method = self.parse_method_rest(start, modifiers, type_params, None, name)?;
            return Ok(Some(Member::Method(method)));
        }

        let ty = self.parse_type()?;
        let name = self.expect_ident()?;
        if self.check(TokenKind::LeftParen) {
            let method = self.parse_method_rest(start, modifiers, type_params, Some(ty), name)?;
            return Ok(Some(Member::Method(method)));
        }

        if type_params.is_some() {
            return Err(self.error_here(
                ParseErrorKind::UnexpectedToken,
                "type parameters are only allowed on methods and constructors",
            ));
        }
        let field = self.parse_field_rest(start, modifiers, ty, name)?;
        Ok(Some(Member::Field(field)))
    }

    /// Grammar: `Params Dims ('throws' TypeList)? ('default' Expr)? (Block | ';')`
    fn parse_method_rest(
        &mut self,
        start: usize,
        modifiers: ModifierList<'ast>,
        type_params: Option<TypeParams<'ast>>,
        return_type: Option<TypeRef<'ast>>,
        name: Ident<'ast>,
    ) -> Result<MethodDecl<'ast>, ParseError> {
        let params = self.parse_params()?;
        let dims = self.parse_dims();

        let throws = if self.eat(TokenKind::Throws).is_some() {
            self.parse_type_list()?
        } else {
            &[]
        };
        let default_value = if self.eat(TokenKind::Default).is_some() {
            Some(self.parse_expr_until_separator()?)
        } else {
            None
        };

        let body = if self.check(TokenKind::LeftBrace) {
            Some(self.parse_group()?)
        } else {
            self.expect(TokenKind::Semicolon)?;
            None
        };

        Ok(MethodDecl {
            modifiers,
            type_params,
            return_type,
            name,
            params,
            dims,
            throws,
            default_value,
            body,
            range: self.range_from(start),
        })
    }

    /// Grammar: `Declarator (',' Ident Declarator)* ';'` where
    /// `Declarator ::= Dims ('=' Expr)?`
    fn parse_field_rest(
        &mut self,
        start: usize,
        modifiers: ModifierList<'ast>,
        ty: TypeRef<'ast>,
        first: Ident<'ast>,
    ) -> Result<FieldDecl<'ast>, ParseError> {
        let mut declarators = Vec::new();
        let mut name = first;
        loop {
            let dims = self.parse_dims();
            let init = if self.eat(TokenKind::Equal).is_some() {
                let expr = self.parse_expr_until_separator()?;
                if expr.elems.is_empty() {
                    return Err(self.error_here(
                        ParseErrorKind::UnexpectedToken,
                        format!("expected initializer, found {}", self.peek().kind),
                    ));
                }
                Some(expr)
            } else {
                None
            };
            declarators.push(VarDeclarator { name, dims, init });

            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
            name = self.expect_ident()?;
        }
        self.expect(TokenKind::Semicolon)?;

        Ok(FieldDecl {
            modifiers,
            ty,
            declarators: self.alloc_slice(declarators),
            range: self.range_from(start),
        })
    }

    /// Grammar: `'(' (Param (',' Param)*)? ')'`
    fn parse_params(&mut self) -> Result<&'ast [Param<'ast>], ParseError> {
        self.expect(TokenKind::LeftParen)?;

        let mut params = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                let start = self.mark();
                let modifiers = self.parse_modifiers()?;
                let ty = self.parse_type()?;
                let varargs = self.eat(TokenKind::Ellipsis).is_some();
                let name = self.expect_ident()?;
                let dims = self.parse_dims();
                params.push(Param {
                    modifiers,
                    ty,
                    varargs,
                    name,
                    dims,
                    range: self.range_from(start),
                });

                if self.eat(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }

        self.expect(TokenKind::RightParen)?;
        Ok(self.alloc_slice(params))
    }

    /// Parse modifier keywords and annotations in any order.
    pub(super) fn parse_modifiers(&mut self) -> Result<ModifierList<'ast>, ParseError> {
        let mut flags = Modifiers::empty();
        let mut annotations = Vec::new();

        loop {
            let kind = self.peek().kind;
            if kind == TokenKind::At && !self.check_nth(1, TokenKind::Interface) {
                annotations.push(self.parse_annotation()?);
                continue;
            }
            match modifier_flag(kind) {
                Some(flag) => {
                    self.advance();
                    flags |= flag;
                }
                None => break,
            }
        }

        Ok(ModifierList {
            flags,
            annotations: self.alloc_slice(annotations),
        })
    }

    fn parse_annotations(&mut self) -> Result<&'ast [Annotation<'ast>], ParseError> {
        let mut annotations = Vec::new();
        while self.check(TokenKind::At) && !self.check_nth(1, TokenKind::Interface) {
            annotations.push(self.parse_annotation()?);
        }
        Ok(self.alloc_slice(annotations))
    }

    /// Grammar: `'@' QualifiedName ('(' ... ')')?`
    pub(super) fn parse_annotation(&mut self) -> Result<Annotation<'ast>, ParseError> {
        let start = self.mark();
        self.expect(TokenKind::At)?;
        let name = self.parse_qualified_name()?;
        let args = if self.check(TokenKind::LeftParen) {
            Some(self.parse_group()?)
        } else {
            None
        };
        Ok(Annotation {
            name,
            args,
            range: self.range_from(start),
        })
    }

    /// Grammar: `Ident ('.' Ident)*`
    pub(super) fn parse_qualified_name(&mut self) -> Result<QualifiedName<'ast>, ParseError> {
        let start = self.mark();
        let mut segments = vec![self.expect_ident()?];
        while self.check(TokenKind::Dot) && self.check_nth(1, TokenKind::Identifier) {
            self.advance();
            segments.push(self.expect_ident()?);
        }
        Ok(QualifiedName {
            segments: self.alloc_slice(segments),
            range: self.range_from(start),
        })
    }

    fn parse_optional_type_params(&mut self) -> Result<Option<TypeParams<'ast>>, ParseError> {
        if self.check(TokenKind::Less) {
            Ok(Some(self.parse_type_params()?))
        } else {
            Ok(None)
        }
    }

    /// Whether the current token begins the keyword part of a type declaration.
    pub(super) fn starts_type_decl(&self) -> bool {
        match self.peek().kind {
            TokenKind::Class | TokenKind::Interface | TokenKind::Enum => true,
            TokenKind::At => self.check_nth(1, TokenKind::Interface),
            _ => false,
        }
    }
}

fn modifier_flag(kind: TokenKind) -> Option<Modifiers> {
    let flag = match kind {
        TokenKind::Public => Modifiers::PUBLIC,
        TokenKind::Protected => Modifiers::PROTECTED,
        TokenKind::Private => Modifiers::PRIVATE,
        TokenKind::Static => Modifiers::STATIC,
        TokenKind::Abstract => Modifiers::ABSTRACT,
        TokenKind::Final => Modifiers::FINAL,
        TokenKind::Native => Modifiers::NATIVE,
        TokenKind::Synchronized => Modifiers::SYNCHRONIZED,
        TokenKind::Transient => Modifiers::TRANSIENT,
        TokenKind::Volatile => Modifiers::VOLATILE,
        TokenKind::Strictfp => Modifiers::STRICTFP,
        TokenKind::Default => Modifiers::DEFAULT,
        _ => return None,
    };
    Some(flag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::body::BodyElem;
    use bumpalo::Bump;

    fn parse<'ast>(source: &str, arena: &'ast Bump) -> CompilationUnit<'ast> {
        let mut parser = Parser::new(source, arena);
        parser.parse_compilation_unit().unwrap()
    }

    #[test]
    fn interface_with_default_method() {
        let arena = Bump::new();
        let unit = parse(
            "public interface KTypeLookupContainer<KType> extends KTypeContainer<KType> {
                boolean contains(KType e);
                default boolean isEmpty() { return size() == 0; }
            }",
            &arena,
        );
        let decl = &unit.types[0];
        assert_eq!(decl.kind, TypeDeclKind::Interface);
        assert_eq!(decl.extends.len(), 1);

        let Member::Method(contains) = decl.body.members[0] else {
            panic!("expected abstract method");
        };
        assert!(contains.body.is_none());

        let Member::Method(is_empty) = decl.body.members[1] else {
            panic!("expected default method");
        };
        assert!(is_empty.modifiers.flags.contains(Modifiers::DEFAULT));
        assert!(is_empty.body.is_some());
    }

    #[test]
    fn enum_with_constants_and_members() {
        let arena = Bump::new();
        let unit = parse(
            "enum Mode { FAST(1), SLOW(2) { int x; }, ; final int speed; Mode(int s) { speed = s; } }",
            &arena,
        );
        let decl = &unit.types[0];
        assert_eq!(decl.kind, TypeDeclKind::Enum);
        assert_eq!(decl.body.enum_constants.len(), 2);
        assert!(decl.body.enum_constants[1].body.is_some());
        assert_eq!(decl.body.members.len(), 2);
    }

    #[test]
    fn nested_types_and_initializers() {
        let arena = Bump::new();
        let unit = parse(
            "class Outer { static { init(); } { count = 0; } static final class Inner<KType> {} @interface Tag { String value() default \"\"; } }",
            &arena,
        );
        let members = unit.types[0].body.members;
        assert_eq!(members.len(), 4);
        assert!(matches!(members[0], Member::Initializer(Initializer { is_static: true, .. })));
        assert!(matches!(members[1], Member::Initializer(Initializer { is_static: false, .. })));

        let Member::Type(inner) = members[2] else {
            panic!("expected nested class");
        };
        assert_eq!(inner.name.name, "Inner");
        assert!(inner.modifiers.flags.contains(Modifiers::STATIC | Modifiers::FINAL));

        let Member::Type(tag) = members[3] else {
            panic!("expected annotation type");
        };
        assert_eq!(tag.kind, TypeDeclKind::Annotation);
        let Member::Method(value) = tag.body.members[0] else {
            panic!("expected annotation element");
        };
        assert!(value.default_value.is_some());
    }

    #[test]
    fn field_declarators() {
        let arena = Bump::new();
        let unit = parse("class A { int a = 1, b[], c = f(x, y); }", &arena);
        let Member::Field(field) = unit.types[0].body.members[0] else {
            panic!("expected field");
        };
        assert_eq!(field.declarators.len(), 3);
        assert_eq!(field.declarators[1].dims, 1);
        let init = field.declarators[2].init.unwrap();
        assert!(matches!(init.elems[1], BodyElem::Group(_)));
    }

    #[test]
    fn varargs_and_throws() {
        let arena = Bump::new();
        let unit = parse("class A { void m(final KType... values) throws IOException, X {} }", &arena);
        let Member::Method(method) = unit.types[0].body.members[0] else {
            panic!("expected method");
        };
        assert!(method.params[0].varargs);
        assert!(method.params[0].modifiers.flags.contains(Modifiers::FINAL));
        assert_eq!(method.throws.len(), 2);
    }

    #[test]
    fn annotated_package_and_class() {
        let arena = Bump::new();
        let unit = parse("@Deprecated package a.b; @SuppressWarnings(\"all\") class A {}", &arena);
        let package = unit.package.unwrap();
        assert_eq!(package.annotations.len(), 1);
        assert_eq!(unit.types[0].modifiers.annotations.len(), 1);

        let unit = parse("@SuppressWarnings(\"all\") class B {}", &arena);
        assert!(unit.package.is_none());
        assert_eq!(unit.types[0].modifiers.annotations.len(), 1);
    }

    #[test]
    fn missing_declaration_keyword() {
        let arena = Bump::new();
        let mut parser = Parser::new("public int x;", &arena);
        let err = parser.parse_compilation_unit().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::ExpectedDeclaration);
    }

    #[test]
    fn type_params_on_field_rejected() {
        let arena = Bump::new();
        let mut parser = Parser::new("class A { <T> T x; }", &arena);
        let err = parser.parse_compilation_unit().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    }

    #[test]
    fn unterminated_class_body() {
        let arena = Bump::new();
        let mut parser = Parser::new("class A { int x;", &arena);
        let err = parser.parse_compilation_unit().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);
    }
}
