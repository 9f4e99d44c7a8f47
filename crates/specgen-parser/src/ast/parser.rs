//! Parser infrastructure.
//!
//! Provides the main [`Parser`] struct with token navigation over the
//! significant tokens of a lossless stream, backtracking for speculative
//! parses, and the entry points that produce a [`CompilationUnit`].

use bumpalo::Bump;
use specgen_core::{ParseError, ParseErrorKind, ParseErrors, Span, TemplateSyntax, TokenRange};

use super::CompilationUnit;
use super::node::Ident;
use crate::lexer::{Lexer, Token, TokenKind};

/// Recursive-descent parser for template source.
///
/// The lexer output keeps whitespace and comments; the parser navigates only
/// the code-channel tokens through an index table, while every node it builds
/// records ranges in the full stream.
///
/// The `'ast` lifetime refers to the arena where tokens and AST nodes are
/// allocated.
pub struct Parser<'ast> {
    /// The full token stream (trivia included), ending with EOF.
    pub(super) tokens: &'ast [Token<'ast>],
    /// Indices of code-channel tokens in `tokens`; the last one is EOF.
    pub(super) code: Vec<u32>,
    /// Current position in `code`.
    pub(super) position: usize,
    /// Lexer errors collected during construction.
    pub(super) errors: ParseErrors,
    /// Arena allocator for AST nodes.
    pub(super) arena: &'ast Bump,
    /// Receiver name that marks intrinsic calls.
    pub(super) intrinsics_class: &'ast str,
}

impl<'ast> Parser<'ast> {
    /// Create a parser recognizing intrinsic calls on the default receiver.
    pub fn new(source: &str, arena: &'ast Bump) -> Self {
        Self::with_intrinsics_class(source, arena, &TemplateSyntax::default().intrinsics_class)
    }

    /// Create a parser recognizing intrinsic calls on `intrinsics_class`.
    ///
    /// Tokenization happens eagerly; lexer errors are recorded and reported
    /// by [`Parser::parse_with`].
    pub fn with_intrinsics_class(source: &str, arena: &'ast Bump, intrinsics_class: &str) -> Self {
        let (tokens, lex_errors) = Lexer::new(source, arena).tokenize();
        let code = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_code())
            .map(|(i, _)| i as u32)
            .collect();

        Self {
            tokens,
            code,
            position: 0,
            errors: lex_errors.into_iter().map(ParseError::from).collect(),
            arena,
            intrinsics_class: arena.alloc_str(intrinsics_class),
        }
    }

    /// Parse a template with the default syntax.
    pub fn parse(source: &str, arena: &'ast Bump) -> Result<CompilationUnit<'ast>, ParseErrors> {
        Self::parse_with(source, arena, &TemplateSyntax::default())
    }

    /// Parse a template. Parsing stops at the first syntax error.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn parse_with(
        source: &str,
        arena: &'ast Bump,
        syntax: &TemplateSyntax,
    ) -> Result<CompilationUnit<'ast>, ParseErrors> {
        let mut parser = Self::with_intrinsics_class(source, arena, &syntax.intrinsics_class);
        if parser.has_errors() {
            return Err(parser.take_errors());
        }
        parser.parse_compilation_unit().map_err(ParseErrors::from)
    }

    /// The full token stream.
    pub fn tokens(&self) -> &'ast [Token<'ast>] {
        self.tokens
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Take the errors, leaving an empty error collection.
    pub fn take_errors(&mut self) -> ParseErrors {
        std::mem::take(&mut self.errors)
    }

    // ========================================================================
    // Token Navigation
    // ========================================================================

    /// Peek at the current token without consuming it.
    pub fn peek(&self) -> Token<'ast> {
        self.peek_nth(0)
    }

    /// Peek ahead n significant tokens without consuming.
    pub fn peek_nth(&self, n: usize) -> Token<'ast> {
        let last = self.code.len() - 1;
        let index = self.code[(self.position + n).min(last)];
        self.tokens[index as usize]
    }

    /// Stream index of the current token.
    pub fn current_index(&self) -> u32 {
        self.code[self.position.min(self.code.len() - 1)]
    }

    /// Kind of the most recently consumed token, if any.
    pub fn previous_kind(&self) -> Option<TokenKind> {
        let index = *self.code.get(self.position.checked_sub(1)?)?;
        Some(self.tokens[index as usize].kind)
    }

    /// Get the current token and advance to the next.
    pub fn advance(&mut self) -> Token<'ast> {
        let token = self.peek();
        if token.kind != TokenKind::Eof {
            self.position += 1;
        }
        token
    }

    /// Check if the current token matches the given kind.
    pub fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Check if the token n positions ahead matches the given kind.
    pub fn check_nth(&self, n: usize, kind: TokenKind) -> bool {
        self.peek_nth(n).kind == kind
    }

    /// Check if the current token is EOF.
    pub fn is_eof(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// If the current token matches the given kind, consume it and return Some.
    pub fn eat(&mut self, kind: TokenKind) -> Option<Token<'ast>> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Expect the current token to be of the given kind.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token<'ast>, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            let token = self.peek();
            if token.kind == TokenKind::Eof {
                return Err(ParseError::unexpected_eof(token.span));
            }
            Err(ParseError::expected_token(
                token.span,
                kind.description(),
                token.kind.description(),
            ))
        }
    }

    /// Check if the current token is an identifier with the given name.
    pub fn check_contextual(&self, name: &str) -> bool {
        let token = self.peek();
        token.kind == TokenKind::Identifier && token.lexeme == name
    }

    /// Consume an identifier.
    pub fn expect_ident(&mut self) -> Result<Ident<'ast>, ParseError> {
        let token = self.peek();
        if token.kind != TokenKind::Identifier {
            if token.kind == TokenKind::Eof {
                return Err(ParseError::unexpected_eof(token.span));
            }
            return Err(ParseError::expected_identifier(
                token.span,
                token.kind.description(),
            ));
        }
        let index = self.current_index();
        self.advance();
        Ok(Ident::new(token.lexeme, index, token.span))
    }

    // ========================================================================
    // Ranges and Backtracking
    // ========================================================================

    /// Save the current position.
    #[inline]
    pub fn mark(&self) -> usize {
        self.position
    }

    /// Return to a saved position.
    #[inline]
    pub fn reset(&mut self, mark: usize) {
        self.position = mark;
    }

    /// Token range from a saved position up to the last consumed token.
    pub fn range_from(&self, mark: usize) -> TokenRange {
        let start = self.code[mark.min(self.code.len() - 1)];
        if self.position > mark {
            TokenRange::new(start, self.code[self.position - 1] + 1)
        } else {
            TokenRange::new(start, start)
        }
    }

    /// Run a speculative parse, restoring the position if it fails.
    pub fn try_parse<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Option<T> {
        let mark = self.mark();
        match f(self) {
            Ok(value) => Some(value),
            Err(_) => {
                self.reset(mark);
                None
            }
        }
    }

    /// Move a vector of nodes into the arena.
    pub(super) fn alloc_slice<T: Copy>(&self, items: Vec<T>) -> &'ast [T] {
        self.arena.alloc_slice_copy(&items)
    }

    /// Build an error at the current token.
    pub(super) fn error_here(&self, kind: ParseErrorKind, message: impl Into<String>) -> ParseError {
        let token = self.peek();
        if token.kind == TokenKind::Eof {
            return ParseError::unexpected_eof(token.span);
        }
        ParseError::new(kind, token.span, message)
    }

    /// Span of the token at a stream index.
    pub fn span_of(&self, index: u32) -> Span {
        self.tokens
            .get(index as usize)
            .map(|t| t.span)
            .unwrap_or_default()
    }
}
