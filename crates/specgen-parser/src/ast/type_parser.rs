//! Type expression parsing.
//!
//! Grammar is documented on [`super::types`].

use specgen_core::ParseError;

use super::node::Annotation;
use super::parser::Parser;
use super::types::*;
use crate::lexer::TokenKind;

impl<'ast> Parser<'ast> {
    /// Parse a complete type, including leading type annotations and array
    /// dimensions.
    ///
    /// Grammar: `Annotation* (Primitive | ClassType) ('[' ']')*`
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn parse_type(&mut self) -> Result<TypeRef<'ast>, ParseError> {
        let start = self.mark();
        let annotations = self.parse_type_annotations()?;

        let token = self.peek();
        let kind = if let Some(primitive) = primitive_of(token.kind) {
            self.advance();
            TypeKind::Primitive(primitive)
        } else if token.kind == TokenKind::Identifier {
            TypeKind::Class(self.parse_class_segments()?)
        } else {
            return Err(ParseError::expected_type(
                token.span,
                token.kind.description(),
            ));
        };

        let dims = self.parse_dims();
        Ok(TypeRef {
            annotations,
            kind,
            dims,
            range: self.range_from(start),
        })
    }

    /// Parse a class type without array dimensions, as in `new KType[n]`.
    pub fn parse_class_type(&mut self) -> Result<TypeRef<'ast>, ParseError> {
        let start = self.mark();
        let segments = self.parse_class_segments()?;
        Ok(TypeRef {
            annotations: &[],
            kind: TypeKind::Class(segments),
            dims: 0,
            range: self.range_from(start),
        })
    }

    /// Grammar: `Ident TypeArgs? ('.' Ident TypeArgs?)*`
    fn parse_class_segments(&mut self) -> Result<&'ast [ClassSegment<'ast>], ParseError> {
        let mut segments = Vec::new();
        loop {
            let name = self.expect_ident()?;
            let args = if self.check(TokenKind::Less) {
                Some(self.parse_type_args()?)
            } else {
                None
            };
            segments.push(ClassSegment { name, args });

            if self.check(TokenKind::Dot) && self.check_nth(1, TokenKind::Identifier) {
                self.advance();
            } else {
                break;
            }
        }
        Ok(self.alloc_slice(segments))
    }

    /// Parse a type-argument list; `<>` yields an empty (diamond) list.
    ///
    /// Grammar: `'<' (TypeArg (',' TypeArg)*)? '>'`
    pub fn parse_type_args(&mut self) -> Result<TypeArgs<'ast>, ParseError> {
        let start = self.mark();
        self.expect(TokenKind::Less)?;

        let mut args = Vec::new();
        if !self.check(TokenKind::Greater) {
            loop {
                args.push(self.parse_type_arg()?);
                if self.eat(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }

        self.expect(TokenKind::Greater)?;
        Ok(TypeArgs {
            args: self.alloc_slice(args),
            range: self.range_from(start),
        })
    }

    /// Grammar: `Type | '?' (('extends' | 'super') Type)?`
    fn parse_type_arg(&mut self) -> Result<TypeArg<'ast>, ParseError> {
        let start = self.mark();
        if self.eat(TokenKind::Question).is_none() {
            return Ok(TypeArg::Type(self.parse_type()?));
        }

        let kind = if self.eat(TokenKind::Extends).is_some() {
            Some(BoundKind::Extends)
        } else if self.eat(TokenKind::Super).is_some() {
            Some(BoundKind::Super)
        } else {
            None
        };
        let bound = match kind {
            Some(kind) => Some(WildcardBound {
                kind,
                ty: self.parse_type()?,
            }),
            None => None,
        };

        Ok(TypeArg::Wildcard(Wildcard {
            bound,
            range: self.range_from(start),
        }))
    }

    /// Parse a generic parameter list.
    ///
    /// Grammar: `'<' TypeParam (',' TypeParam)* '>'`
    pub fn parse_type_params(&mut self) -> Result<TypeParams<'ast>, ParseError> {
        let start = self.mark();
        self.expect(TokenKind::Less)?;

        let mut params = Vec::new();
        loop {
            params.push(self.parse_type_param()?);
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }

        self.expect(TokenKind::Greater)?;
        Ok(TypeParams {
            params: self.alloc_slice(params),
            range: self.range_from(start),
        })
    }

    /// Grammar: `Annotation* Ident ('extends' Type ('&' Type)*)?`
    fn parse_type_param(&mut self) -> Result<TypeParam<'ast>, ParseError> {
        let start = self.mark();
        let annotations = self.parse_type_annotations()?;
        let name = self.expect_ident()?;

        let mut bounds = Vec::new();
        if self.eat(TokenKind::Extends).is_some() {
            loop {
                bounds.push(self.parse_type()?);
                if self.eat(TokenKind::Amp).is_none() {
                    break;
                }
            }
        }

        Ok(TypeParam {
            annotations,
            name,
            bounds: self.alloc_slice(bounds),
            range: self.range_from(start),
        })
    }

    /// Parse a comma-separated list of types, as after `implements`.
    pub fn parse_type_list(&mut self) -> Result<&'ast [TypeRef<'ast>], ParseError> {
        let mut types = Vec::new();
        loop {
            types.push(self.parse_type()?);
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        Ok(self.alloc_slice(types))
    }

    /// Consume `[]` pairs and return how many there were.
    pub fn parse_dims(&mut self) -> u32 {
        let mut dims = 0;
        while self.check(TokenKind::LeftBracket) && self.check_nth(1, TokenKind::RightBracket) {
            self.advance();
            self.advance();
            dims += 1;
        }
        dims
    }

    /// Annotations in type position, such as `@Nullable KType`.
    pub(super) fn parse_type_annotations(&mut self) -> Result<&'ast [Annotation<'ast>], ParseError> {
        let mut annotations = Vec::new();
        while self.check(TokenKind::At) && !self.check_nth(1, TokenKind::Interface) {
            annotations.push(self.parse_annotation()?);
        }
        Ok(self.alloc_slice(annotations))
    }

}

/// Map a primitive keyword token to its type.
pub(super) fn primitive_of(kind: TokenKind) -> Option<PrimitiveType> {
    let primitive = match kind {
        TokenKind::Boolean => PrimitiveType::Boolean,
        TokenKind::Byte => PrimitiveType::Byte,
        TokenKind::Char => PrimitiveType::Char,
        TokenKind::Short => PrimitiveType::Short,
        TokenKind::Int => PrimitiveType::Int,
        TokenKind::Long => PrimitiveType::Long,
        TokenKind::Float => PrimitiveType::Float,
        TokenKind::Double => PrimitiveType::Double,
        TokenKind::Void => PrimitiveType::Void,
        _ => return None,
    };
    Some(primitive)
}
