//! Token-tree parsing for bodies and initializers.
//!
//! See [`super::body`] for what gets recognized. Generic types in expression
//! position are found speculatively: an identifier followed by `<` is parsed
//! as a type only if the whole type-argument list parses and the token after
//! it can legally follow a type.

use specgen_core::{ParseError, ParseErrorKind};

use super::body::*;
use super::node::ModifierList;
use super::parser::Parser;
use super::type_parser::primitive_of;
use super::types::TypeRef;
use crate::lexer::TokenKind;

impl<'ast> Parser<'ast> {
    /// Parse a balanced group starting at an opening delimiter.
    pub fn parse_group(&mut self) -> Result<Group<'ast>, ParseError> {
        let start = self.mark();
        let open = self.peek();
        let (delimiter, close) = match open.kind {
            TokenKind::LeftParen => (Delimiter::Paren, TokenKind::RightParen),
            TokenKind::LeftBracket => (Delimiter::Bracket, TokenKind::RightBracket),
            TokenKind::LeftBrace => (Delimiter::Brace, TokenKind::RightBrace),
            _ => {
                return Err(ParseError::unexpected_token(
                    open.span,
                    open.kind.description(),
                ));
            }
        };
        self.advance();

        let elems = self.parse_elems(false)?;

        if self.eat(close).is_none() {
            let found = self.peek();
            if found.kind == TokenKind::Eof {
                return Err(ParseError::unexpected_eof(found.span));
            }
            return Err(ParseError::new(
                ParseErrorKind::MismatchedDelimiter,
                found.span,
                format!(
                    "expected {} to close {} at {}, found {}",
                    close.description(),
                    open.kind.description(),
                    open.span,
                    found.kind.description()
                ),
            ));
        }

        Ok(Group {
            delimiter,
            elems: self.alloc_slice(elems),
            range: self.range_from(start),
        })
    }

    /// Parse elements up to a top-level `,` or `;`, or the end of the
    /// enclosing group.
    pub fn parse_expr_until_separator(&mut self) -> Result<Expr<'ast>, ParseError> {
        let start = self.mark();
        let elems = self.parse_elems(true)?;
        Ok(Expr {
            elems: self.alloc_slice(elems),
            range: self.range_from(start),
        })
    }

    fn parse_elems(&mut self, stop_at_separator: bool) -> Result<Vec<BodyElem<'ast>>, ParseError> {
        let mut elems = Vec::new();
        loop {
            let kind = self.peek().kind;
            if kind == TokenKind::Eof || kind.is_close_delimiter() {
                break;
            }
            if stop_at_separator && matches!(kind, TokenKind::Comma | TokenKind::Semicolon) {
                break;
            }
            self.parse_elem(&mut elems)?;
        }
        Ok(elems)
    }

    /// Parse one element, or a short run of them for `new` creators.
    fn parse_elem(&mut self, out: &mut Vec<BodyElem<'ast>>) -> Result<(), ParseError> {
        let index = self.current_index();
        let kind = self.peek().kind;

        match kind {
            k if k.is_open_delimiter() => out.push(BodyElem::Group(self.parse_group()?)),
            TokenKind::New => {
                self.advance();
                out.push(BodyElem::Token(index));
                self.parse_creator(out)?;
            }
            TokenKind::Class | TokenKind::Interface | TokenKind::Enum
                if self.previous_kind() != Some(TokenKind::Dot) =>
            {
                let start = self.mark();
                let decl = self.parse_type_decl_rest(ModifierList::default(), start)?;
                out.push(BodyElem::LocalType(self.arena.alloc(decl)));
            }
            TokenKind::Dot if self.check_nth(1, TokenKind::Less) => {
                self.advance();
                out.push(BodyElem::Token(index));
                out.push(BodyElem::TypeArgs(self.parse_type_args()?));
            }
            TokenKind::Identifier => {
                if let Some(call) = self.try_intrinsic()? {
                    out.push(BodyElem::Intrinsic(call));
                } else if let Some(ty) = self.try_body_type() {
                    out.push(BodyElem::Type(ty));
                } else {
                    out.push(BodyElem::Ident(self.expect_ident()?));
                }
            }
            _ => {
                self.advance();
                out.push(BodyElem::Token(index));
            }
        }
        Ok(())
    }

    /// Grammar after `new`: `TypeArgs? (Primitive | ClassType) (Args ClassBody?)?`
    ///
    /// Array dimensions and initializers are left to the caller's loop.
    fn parse_creator(&mut self, out: &mut Vec<BodyElem<'ast>>) -> Result<(), ParseError> {
        if self.check(TokenKind::Less) {
            out.push(BodyElem::TypeArgs(self.parse_type_args()?));
        }

        if primitive_of(self.peek().kind).is_some() {
            return Ok(());
        }
        if !self.check(TokenKind::Identifier) {
            let token = self.peek();
            return Err(ParseError::expected_type(token.span, token.kind.description()));
        }

        out.push(BodyElem::Type(self.parse_class_type()?));
        if self.check(TokenKind::LeftParen) {
            out.push(BodyElem::Group(self.parse_group()?));
            if self.check(TokenKind::LeftBrace) {
                out.push(BodyElem::AnonymousClass(self.parse_class_body(false)?));
            }
        }
        Ok(())
    }

    /// Recognize `Receiver.name(args)` or `Receiver.<Hint>name(args)` where
    /// the receiver is the intrinsics class.
    fn try_intrinsic(&mut self) -> Result<Option<IntrinsicCall<'ast>>, ParseError> {
        let token = self.peek();
        if token.lexeme != self.intrinsics_class
            || !self.check_nth(1, TokenKind::Dot)
            || self.previous_kind() == Some(TokenKind::Dot)
        {
            return Ok(None);
        }
        let is_call = match self.peek_nth(2).kind {
            TokenKind::Identifier => self.check_nth(3, TokenKind::LeftParen),
            TokenKind::Less => true,
            _ => false,
        };
        if !is_call {
            return Ok(None);
        }

        let start = self.mark();
        let receiver = self.expect_ident()?;
        self.expect(TokenKind::Dot)?;
        let hint = if self.check(TokenKind::Less) {
            Some(self.parse_type_args()?)
        } else {
            None
        };
        let name = self.expect_ident()?;
        let args = self.parse_call_args()?;

        Ok(Some(IntrinsicCall {
            receiver,
            hint,
            name,
            args,
            range: self.range_from(start),
        }))
    }

    /// Grammar: `'(' (Expr (',' Expr)*)? ')'`
    fn parse_call_args(&mut self) -> Result<&'ast [Expr<'ast>], ParseError> {
        self.expect(TokenKind::LeftParen)?;
        let mut args = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                args.push(self.parse_expr_until_separator()?);
                if self.eat(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }
        self.expect(TokenKind::RightParen)?;
        Ok(self.alloc_slice(args))
    }

    /// Speculatively parse a generic class type in expression position.
    ///
    /// After `instanceof` or `new` the type is taken as is; elsewhere the
    /// next token must be one that can follow a type.
    fn try_body_type(&mut self) -> Option<TypeRef<'ast>> {
        let previous = self.previous_kind();
        if previous == Some(TokenKind::Dot) {
            return None;
        }
        if !self.check_nth(1, TokenKind::Less) && !self.check_nth(1, TokenKind::Dot) {
            return None;
        }

        let start = self.mark();
        let base = self.try_parse(|p| p.parse_class_type())?;
        if !base.has_type_args() {
            self.reset(start);
            return None;
        }

        let dims = self.parse_dims();
        let unchecked = matches!(previous, Some(TokenKind::Instanceof | TokenKind::New));
        if !unchecked && !can_follow_type(self.peek().kind) {
            self.reset(start);
            return None;
        }

        Some(TypeRef {
            dims,
            range: self.range_from(start),
            ..base
        })
    }
}

/// Tokens that may follow a generic type in expression position.
fn can_follow_type(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::RightParen
            | TokenKind::LeftBracket
            | TokenKind::RightBracket
            | TokenKind::Dot
            | TokenKind::ColonColon
            | TokenKind::Comma
            | TokenKind::Semicolon
            | TokenKind::LeftBrace
            | TokenKind::RightBrace
            | TokenKind::Identifier
            | TokenKind::Ellipsis
            | TokenKind::Amp
            | TokenKind::Colon
            | TokenKind::Equal
            | TokenKind::LeftParen
    )
}
