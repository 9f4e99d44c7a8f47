//! Main lexer implementation.
//!
//! The [`Lexer`] converts template text into a lossless stream of [`Token`]s.
//! It dispatches on the first character of each token. Whitespace and
//! comments are emitted as tokens rather than skipped, so the rewriter can
//! reproduce every byte it does not edit.
//!
//! Lexemes are copied into the arena, so the token stream outlives the
//! source string.

use bumpalo::Bump;
use bumpalo::collections::Vec as BumpVec;

use super::cursor::{Cursor, Mark, is_ident_continue, is_ident_start};
use super::token::{Token, TokenKind, lookup_keyword};
use specgen_core::{LexError, Span};

/// Lexer for template source.
///
/// The `'src` lifetime is the source string being lexed (temporary).
/// The `'ast` lifetime is the arena where token lexemes are allocated (persists).
pub struct Lexer<'src, 'ast> {
    /// Low-level character cursor.
    cursor: Cursor<'src>,
    /// Arena for allocating token lexemes.
    arena: &'ast Bump,
    /// Accumulated errors.
    errors: Vec<LexError>,
    /// Set once the EOF token has been produced.
    finished: bool,
}

impl<'src, 'ast> Lexer<'src, 'ast> {
    /// Create a new lexer for the given source text.
    pub fn new(source: &'src str, arena: &'ast Bump) -> Self {
        Self {
            cursor: Cursor::new(source),
            arena,
            errors: Vec::new(),
            finished: false,
        }
    }

    /// Lex the whole source into an arena slice ending with an EOF token.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn tokenize(mut self) -> (&'ast [Token<'ast>], Vec<LexError>) {
        let mut tokens = BumpVec::new_in(self.arena);
        loop {
            let token = self.next_token();
            tokens.push(token);
            if token.kind == TokenKind::Eof {
                break;
            }
        }
        (tokens.into_bump_slice(), self.errors)
    }

    /// Take accumulated errors, leaving an empty vec.
    pub fn take_errors(&mut self) -> Vec<LexError> {
        std::mem::take(&mut self.errors)
    }

    /// Check if any errors occurred.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Consume and return the next token.
    pub fn next_token(&mut self) -> Token<'ast> {
        if self.cursor.is_eof() {
            self.finished = true;
            return self.make_eof();
        }

        let start = self.cursor.mark();

        let Some(c) = self.cursor.peek() else {
            return self.make_eof();
        };

        match c {
            c if c.is_whitespace() || c == '\u{FEFF}' => {
                self.cursor
                    .eat_while(|c| c.is_whitespace() || c == '\u{FEFF}');
                self.make_token(TokenKind::Whitespace, start)
            }

            '/' => self.scan_slash(start),

            '"' => self.scan_string(start),
            '\'' => self.scan_char(start),

            c if c.is_ascii_digit() => self.scan_number(start),
            '.' if self.cursor.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.scan_number(start)
            }

            c if is_ident_start(c) => self.scan_identifier(start),

            _ => self.scan_operator(start),
        }
    }

    // =========================================
    // Internal: token construction
    // =========================================

    fn make_eof(&self) -> Token<'ast> {
        Token::new(
            TokenKind::Eof,
            "",
            Span::point(self.cursor.line(), self.cursor.column()),
        )
    }

    /// Create a token from a mark to the current position.
    /// Copies the lexeme into the arena.
    fn make_token(&self, kind: TokenKind, start: Mark) -> Token<'ast> {
        let lexeme = self.arena.alloc_str(self.cursor.slice_from(start));
        Token::new(kind, lexeme, self.cursor.span_from(start))
    }

    /// Record an error and return an error token covering the consumed text.
    fn make_error(&mut self, error: LexError, start: Mark) -> Token<'ast> {
        self.errors.push(error);
        self.make_token(TokenKind::Error, start)
    }

    // =========================================
    // Scanning: Comments and slash
    // =========================================

    /// Scan a slash, which could be `/`, `/=`, `//`, `/*` or `/**`.
    fn scan_slash(&mut self, start: Mark) -> Token<'ast> {
        self.cursor.advance();

        match self.cursor.peek() {
            Some('/') => {
                self.cursor.eat_while(|c| c != '\n' && c != '\r');
                self.make_token(TokenKind::LineComment, start)
            }
            Some('*') => {
                self.cursor.advance();
                // `/**/` is an empty block comment, not a doc comment.
                let kind = if self.cursor.check_str("*") && !self.cursor.check_str("*/") {
                    TokenKind::DocComment
                } else {
                    TokenKind::BlockComment
                };
                self.scan_block_comment(kind, start)
            }
            Some('=') => {
                self.cursor.advance();
                self.make_token(TokenKind::SlashEqual, start)
            }
            _ => self.make_token(TokenKind::Slash, start),
        }
    }

    /// Scan the remainder of a block comment after `/*`.
    fn scan_block_comment(&mut self, kind: TokenKind, start: Mark) -> Token<'ast> {
        loop {
            if self.cursor.eat_str("*/") {
                return self.make_token(kind, start);
            }
            if self.cursor.advance().is_none() {
                let error = LexError::UnterminatedComment {
                    span: self.cursor.span_from(start),
                };
                return self.make_error(error, start);
            }
        }
    }

    // =========================================
    // Scanning: Strings and characters
    // =========================================

    /// Scan a string literal or a text block.
    fn scan_string(&mut self, start: Mark) -> Token<'ast> {
        if self.cursor.eat_str("\"\"\"") {
            return self.scan_text_block(start);
        }
        self.cursor.advance();
        self.scan_quoted('"', TokenKind::StringLiteral, "string", start)
    }

    fn scan_char(&mut self, start: Mark) -> Token<'ast> {
        self.cursor.advance();
        self.scan_quoted('\'', TokenKind::CharLiteral, "character", start)
    }

    /// Scan a single-line quoted literal up to its closing quote.
    fn scan_quoted(
        &mut self,
        quote: char,
        kind: TokenKind,
        what: &'static str,
        start: Mark,
    ) -> Token<'ast> {
        loop {
            match self.cursor.peek() {
                None | Some('\n') | Some('\r') => {
                    let error = LexError::UnterminatedLiteral {
                        what,
                        span: self.cursor.span_from(start),
                    };
                    return self.make_error(error, start);
                }
                Some('\\') => {
                    self.cursor.advance();
                    self.cursor.advance();
                }
                Some(c) if c == quote => {
                    self.cursor.advance();
                    return self.make_token(kind, start);
                }
                Some(_) => {
                    self.cursor.advance();
                }
            }
        }
    }

    /// Scan a text block `"""..."""` after its opening delimiter.
    fn scan_text_block(&mut self, start: Mark) -> Token<'ast> {
        loop {
            if self.cursor.eat_str("\"\"\"") {
                return self.make_token(TokenKind::TextBlock, start);
            }
            match self.cursor.advance() {
                Some('\\') => {
                    self.cursor.advance();
                }
                Some(_) => {}
                None => {
                    let error = LexError::UnterminatedLiteral {
                        what: "text block",
                        span: self.cursor.span_from(start),
                    };
                    return self.make_error(error, start);
                }
            }
        }
    }

    // =========================================
    // Scanning: Numbers
    // =========================================

    /// Scan a number literal.
    fn scan_number(&mut self, start: Mark) -> Token<'ast> {
        if self.cursor.peek() == Some('0') {
            match self.cursor.peek_nth(1) {
                Some('x' | 'X') => return self.scan_hex_number(start),
                Some('b' | 'B') => return self.scan_binary_number(start),
                _ => {}
            }
        }
        self.scan_decimal_number(start)
    }

    /// Scan `0x...`, including hexadecimal floating-point literals.
    fn scan_hex_number(&mut self, start: Mark) -> Token<'ast> {
        self.cursor.advance();
        self.cursor.advance();

        let digits = self.cursor.eat_while(|c| c.is_ascii_hexdigit() || c == '_');
        let mut is_float = false;
        if self.cursor.eat('.') {
            self.cursor.eat_while(|c| c.is_ascii_hexdigit() || c == '_');
            is_float = true;
        }
        if self.cursor.check(|c| c == 'p' || c == 'P') {
            self.cursor.advance();
            self.consume_exponent_digits();
            is_float = true;
        }

        if digits.is_empty() && !is_float {
            let error = LexError::InvalidNumber {
                span: self.cursor.span_from(start),
                detail: "expected hexadecimal digits after '0x'".to_string(),
            };
            return self.make_error(error, start);
        }

        self.finish_number(is_float, start)
    }

    /// Scan `0b...`.
    fn scan_binary_number(&mut self, start: Mark) -> Token<'ast> {
        self.cursor.advance();
        self.cursor.advance();

        let digits = self.cursor.eat_while(|c| c == '0' || c == '1' || c == '_');
        if digits.is_empty() {
            let error = LexError::InvalidNumber {
                span: self.cursor.span_from(start),
                detail: "expected binary digits after '0b'".to_string(),
            };
            return self.make_error(error, start);
        }

        self.finish_number(false, start)
    }

    /// Scan a decimal number (integer or floating-point).
    fn scan_decimal_number(&mut self, start: Mark) -> Token<'ast> {
        self.consume_decimal_digits();

        let mut is_float = false;

        if self.cursor.peek() == Some('.') {
            let after = self.cursor.peek_nth(1);
            // `1.5` and a trailing `1.` are floats; `1..` and `1.foo` are not.
            if after.is_some_and(|c| c.is_ascii_digit())
                || after.is_none_or(|c| !is_ident_start(c) && c != '.')
            {
                self.cursor.advance();
                self.consume_decimal_digits();
                is_float = true;
            }
        }

        if self.cursor.check(|c| c == 'e' || c == 'E') {
            self.cursor.advance();
            self.consume_exponent_digits();
            is_float = true;
        }

        self.finish_number(is_float, start)
    }

    /// Consume the optional type suffix and build the literal token.
    fn finish_number(&mut self, is_float: bool, start: Mark) -> Token<'ast> {
        match self.cursor.peek() {
            Some('f' | 'F' | 'd' | 'D') => {
                self.cursor.advance();
                self.make_token(TokenKind::FloatLiteral, start)
            }
            Some('l' | 'L') if !is_float => {
                self.cursor.advance();
                self.make_token(TokenKind::IntLiteral, start)
            }
            _ if is_float => self.make_token(TokenKind::FloatLiteral, start),
            _ => self.make_token(TokenKind::IntLiteral, start),
        }
    }

    /// Consume decimal digits (including underscores as separators).
    fn consume_decimal_digits(&mut self) {
        self.cursor.eat_while(|c| c.is_ascii_digit() || c == '_');
    }

    /// Consume an optional sign and the digits of an exponent.
    fn consume_exponent_digits(&mut self) {
        if self.cursor.check(|c| c == '+' || c == '-') {
            self.cursor.advance();
        }
        self.consume_decimal_digits();
    }

    // =========================================
    // Scanning: Identifiers and keywords
    // =========================================

    /// Scan an identifier or keyword.
    fn scan_identifier(&mut self, start: Mark) -> Token<'ast> {
        let lexeme = self.cursor.eat_while(is_ident_continue);
        let kind = lookup_keyword(lexeme).unwrap_or(TokenKind::Identifier);
        self.make_token(kind, start)
    }

    // =========================================
    // Scanning: Operators
    // =========================================

    /// Scan an operator or punctuation token.
    ///
    /// `>` is never merged with what follows: shifts and `>=` come out as
    /// several tokens, which lets nested type-argument lists close one token
    /// at a time.
    fn scan_operator(&mut self, start: Mark) -> Token<'ast> {
        let Some(c) = self.cursor.advance() else {
            return self.make_eof();
        };
        let next = self.cursor.peek();

        let kind = match (c, next) {
            ('(', _) => TokenKind::LeftParen,
            (')', _) => TokenKind::RightParen,
            ('[', _) => TokenKind::LeftBracket,
            (']', _) => TokenKind::RightBracket,
            ('{', _) => TokenKind::LeftBrace,
            ('}', _) => TokenKind::RightBrace,
            (';', _) => TokenKind::Semicolon,
            (',', _) => TokenKind::Comma,
            ('~', _) => TokenKind::Tilde,
            ('?', _) => TokenKind::Question,
            ('@', _) => TokenKind::At,
            ('>', _) => TokenKind::Greater,

            ('.', Some('.')) if self.cursor.check_str("..") => {
                self.cursor.eat_str("..");
                TokenKind::Ellipsis
            }
            ('.', _) => TokenKind::Dot,

            (':', Some(':')) => { self.cursor.advance(); TokenKind::ColonColon }
            (':', _) => TokenKind::Colon,

            ('+', Some('+')) => { self.cursor.advance(); TokenKind::PlusPlus }
            ('+', Some('=')) => { self.cursor.advance(); TokenKind::PlusEqual }
            ('+', _) => TokenKind::Plus,

            ('-', Some('-')) => { self.cursor.advance(); TokenKind::MinusMinus }
            ('-', Some('=')) => { self.cursor.advance(); TokenKind::MinusEqual }
            ('-', Some('>')) => { self.cursor.advance(); TokenKind::Arrow }
            ('-', _) => TokenKind::Minus,

            ('*', Some('=')) => { self.cursor.advance(); TokenKind::StarEqual }
            ('*', _) => TokenKind::Star,

            ('%', Some('=')) => { self.cursor.advance(); TokenKind::PercentEqual }
            ('%', _) => TokenKind::Percent,

            ('=', Some('=')) => { self.cursor.advance(); TokenKind::EqualEqual }
            ('=', _) => TokenKind::Equal,

            ('!', Some('=')) => { self.cursor.advance(); TokenKind::BangEqual }
            ('!', _) => TokenKind::Bang,

            ('<', Some('=')) => { self.cursor.advance(); TokenKind::LessEqual }
            ('<', Some('<')) => {
                self.cursor.advance();
                if self.cursor.eat('=') {
                    TokenKind::LessLessEqual
                } else {
                    TokenKind::LessLess
                }
            }
            ('<', _) => TokenKind::Less,

            ('&', Some('&')) => { self.cursor.advance(); TokenKind::AmpAmp }
            ('&', Some('=')) => { self.cursor.advance(); TokenKind::AmpEqual }
            ('&', _) => TokenKind::Amp,

            ('|', Some('|')) => { self.cursor.advance(); TokenKind::PipePipe }
            ('|', Some('=')) => { self.cursor.advance(); TokenKind::PipeEqual }
            ('|', _) => TokenKind::Pipe,

            ('^', Some('=')) => { self.cursor.advance(); TokenKind::CaretEqual }
            ('^', _) => TokenKind::Caret,

            (ch, _) => {
                let error = LexError::UnexpectedChar {
                    ch,
                    span: self.cursor.span_from(start),
                };
                return self.make_error(error, start);
            }
        };

        self.make_token(kind, start)
    }
}

impl<'ast> Iterator for Lexer<'_, 'ast> {
    type Item = Token<'ast>;

    /// Yields every token including trivia; stops before EOF.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        (token.kind != TokenKind::Eof).then_some(token)
    }
}
