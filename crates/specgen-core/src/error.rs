//! Error types shared by the lexer, parser and specializer.
//!
//! ## Error Hierarchy
//!
//! ```text
//! LexError         - tokenization failures
//! ParseError       - syntax errors (with ParseErrorKind), collected in ParseErrors
//! SpecializeError  - intrinsic resolution failures and internal rewrite errors
//! ```
//!
//! All of them are fatal for the template they occur in. The driver attaches
//! the template path and instantiation when it reports them.

use thiserror::Error;

use crate::span::{Span, TokenRange};
use crate::types::ConcreteType;

// ============================================================================
// Lexer Errors
// ============================================================================

/// Errors that occur during tokenization.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    /// An unexpected character was encountered.
    #[error("unexpected character '{ch}' at {span}")]
    UnexpectedChar { ch: char, span: Span },

    /// A string or character literal was not properly terminated.
    #[error("unterminated {what} literal at {span}")]
    UnterminatedLiteral { what: &'static str, span: Span },

    /// A block comment was not properly terminated.
    #[error("unterminated comment at {span}")]
    UnterminatedComment { span: Span },

    /// A numeric literal could not be scanned.
    #[error("invalid number at {span}: {detail}")]
    InvalidNumber { span: Span, detail: String },
}

impl LexError {
    /// Get the span where this error occurred.
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedChar { span, .. } => *span,
            LexError::UnterminatedLiteral { span, .. } => *span,
            LexError::UnterminatedComment { span } => *span,
            LexError::InvalidNumber { span, .. } => *span,
        }
    }
}

// ============================================================================
// Parse Errors
// ============================================================================

/// Categories of parse errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// The lexer rejected the input.
    InvalidToken,
    /// Expected a specific token but found something else.
    ExpectedToken,
    /// Unexpected token in this context.
    UnexpectedToken,
    /// Unexpected end of file.
    UnexpectedEof,
    /// Expected a type.
    ExpectedType,
    /// Expected an identifier.
    ExpectedIdentifier,
    /// Expected a type or member declaration.
    ExpectedDeclaration,
    /// Mismatched or unbalanced delimiters.
    MismatchedDelimiter,
    /// Syntax this parser deliberately does not accept.
    Unsupported,
}

impl ParseErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseErrorKind::InvalidToken => "invalid token",
            ParseErrorKind::ExpectedToken => "expected token",
            ParseErrorKind::UnexpectedToken => "unexpected token",
            ParseErrorKind::UnexpectedEof => "unexpected end of file",
            ParseErrorKind::ExpectedType => "expected type",
            ParseErrorKind::ExpectedIdentifier => "expected identifier",
            ParseErrorKind::ExpectedDeclaration => "expected declaration",
            ParseErrorKind::MismatchedDelimiter => "mismatched delimiter",
            ParseErrorKind::Unsupported => "unsupported syntax",
        }
    }
}

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A parse error with location and context.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} at {span}: {message}")]
pub struct ParseError {
    /// The category of this error.
    pub kind: ParseErrorKind,
    /// The source location where the error occurred.
    pub span: Span,
    /// A detailed error message.
    pub message: String,
}

impl ParseError {
    /// Create a new parse error.
    pub fn new(kind: ParseErrorKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            message: message.into(),
        }
    }

    /// Create an "expected token" error.
    pub fn expected_token(span: Span, expected: &str, found: &str) -> Self {
        Self::new(
            ParseErrorKind::ExpectedToken,
            span,
            format!("expected {expected}, found {found}"),
        )
    }

    /// Create an "unexpected token" error.
    pub fn unexpected_token(span: Span, token: &str) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedToken,
            span,
            format!("unexpected token: {token}"),
        )
    }

    /// Create an "unexpected EOF" error.
    pub fn unexpected_eof(span: Span) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedEof,
            span,
            "unexpected end of file".to_string(),
        )
    }

    /// Create an "expected identifier" error.
    pub fn expected_identifier(span: Span, found: &str) -> Self {
        Self::new(
            ParseErrorKind::ExpectedIdentifier,
            span,
            format!("expected identifier, found {found}"),
        )
    }

    /// Create an "expected type" error.
    pub fn expected_type(span: Span, found: &str) -> Self {
        Self::new(
            ParseErrorKind::ExpectedType,
            span,
            format!("expected type, found {found}"),
        )
    }

    /// Format the error with source context for display.
    ///
    /// Renders the offending line with a caret under the error location.
    pub fn display_with_source(&self, source: &str) -> String {
        let mut output = String::new();

        let line = self.span.line;
        let column = self.span.col.max(1);

        output.push_str(&format!("error at {}:{}: {}\n", line, column, self.kind));

        if !self.message.is_empty() {
            output.push_str(&format!("  {}\n", self.message));
        }

        if let Some(line_text) = Self::get_line(source, line) {
            output.push_str("  |\n");
            output.push_str(&format!("{:>3} | {}\n", line, line_text));

            let indent = " ".repeat(column as usize - 1);
            let pointer = if self.span.len <= 1 {
                "^".to_string()
            } else {
                "^".to_string() + &"~".repeat((self.span.len - 1) as usize)
            };
            output.push_str(&format!("  | {}{}\n", indent, pointer));
        }

        output
    }

    /// Get the text of a specific line (1-indexed).
    fn get_line(source: &str, line_num: u32) -> Option<&str> {
        source.lines().nth((line_num as usize).checked_sub(1)?)
    }
}

impl From<LexError> for ParseError {
    fn from(error: LexError) -> Self {
        ParseError::new(ParseErrorKind::InvalidToken, error.span(), error.to_string())
    }
}

/// A collection of parse errors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseErrors {
    errors: Vec<ParseError>,
}

impl ParseErrors {
    /// Create a new empty error collection.
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Add an error to the collection.
    pub fn push(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    /// Check if there are any errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterate over the errors.
    pub fn iter(&self) -> impl Iterator<Item = &ParseError> {
        self.errors.iter()
    }

    /// The first error, if any.
    pub fn first(&self) -> Option<&ParseError> {
        self.errors.first()
    }

    /// Convert to a Vec of errors.
    pub fn into_vec(self) -> Vec<ParseError> {
        self.errors
    }

    /// Render every error with its source excerpt.
    pub fn display_with_source(&self, source: &str) -> String {
        self.errors
            .iter()
            .map(|e| e.display_with_source(source))
            .collect()
    }
}

impl IntoIterator for ParseErrors {
    type Item = ParseError;
    type IntoIter = std::vec::IntoIter<ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParseErrors {
    type Item = &'a ParseError;
    type IntoIter = std::slice::Iter<'a, ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl From<ParseError> for ParseErrors {
    fn from(error: ParseError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl FromIterator<ParseError> for ParseErrors {
    fn from_iter<T: IntoIterator<Item = ParseError>>(iter: T) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl std::fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseErrors {}

// ============================================================================
// Specialization Errors
// ============================================================================

/// Errors raised while rewriting a parsed template for one instantiation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpecializeError {
    /// An intrinsic call has no type hint and the template declares two
    /// placeholders.
    #[error("at {span}: intrinsic call `{call}` is ambiguous; add a placeholder type hint")]
    AmbiguousIntrinsic { call: String, span: Span },

    /// The type hint of an intrinsic call is not a placeholder this template
    /// declares.
    #[error("at {span}: intrinsic call `{call}` targets `{hint}`, which is not a declared placeholder")]
    UnresolvedHint {
        call: String,
        hint: String,
        span: Span,
    },

    /// The intrinsic name is not part of the vocabulary.
    #[error("at {span}: unknown intrinsic '{name}' in `{call}`")]
    UnknownIntrinsic {
        name: String,
        call: String,
        span: Span,
    },

    /// The call passes the wrong number of arguments.
    #[error("at {span}: intrinsic `{call}` expects {expected} argument(s), got {got}")]
    ArgumentCount {
        call: String,
        expected: &'static str,
        got: usize,
        span: Span,
    },

    /// The intrinsic has no meaning for the bound type.
    #[error("at {span}: intrinsic `{call}` is not defined for {ty} bindings")]
    UnsupportedForType {
        call: String,
        ty: ConcreteType,
        span: Span,
    },

    /// Two edits claimed overlapping tokens. This is a defect in the rewriter,
    /// never in the template.
    #[error("internal error: overlapping edits at {first:?} and {second:?}")]
    OverlappingEdits {
        first: TokenRange,
        second: TokenRange,
    },

    /// An edit fell outside the range being reconstructed.
    #[error("internal error: edit at {edit:?} lies outside {range:?}")]
    EditOutOfRange { edit: TokenRange, range: TokenRange },
}

impl SpecializeError {
    /// Whether this error reports a rewriter defect rather than a template
    /// authoring mistake.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            SpecializeError::OverlappingEdits { .. } | SpecializeError::EditOutOfRange { .. }
        )
    }

    /// The template location, when the error has one.
    pub fn span(&self) -> Option<Span> {
        match self {
            SpecializeError::AmbiguousIntrinsic { span, .. }
            | SpecializeError::UnresolvedHint { span, .. }
            | SpecializeError::UnknownIntrinsic { span, .. }
            | SpecializeError::ArgumentCount { span, .. }
            | SpecializeError::UnsupportedForType { span, .. } => Some(*span),
            SpecializeError::OverlappingEdits { .. } | SpecializeError::EditOutOfRange { .. } => {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_display() {
        let error = ParseError::expected_token(Span::new(1, 6, 1), "';'", "'}'");
        let display = error.to_string();
        assert!(display.contains("expected token"));
        assert!(display.contains("1:6"));
        assert!(display.contains("expected ';', found '}'"));
    }

    #[test]
    fn parse_error_with_source() {
        let source = "class A {\n    int x = 5\n}";
        let error = ParseError::new(
            ParseErrorKind::ExpectedToken,
            Span::new(2, 14, 1),
            "expected ';'",
        );
        let display = error.display_with_source(source);
        assert!(display.contains("2:14"));
        assert!(display.contains("int x = 5"));
        assert!(display.contains('^'));
    }

    #[test]
    fn lex_error_converts_to_parse_error() {
        let lex = LexError::UnexpectedChar {
            ch: '#',
            span: Span::new(3, 1, 1),
        };
        let parse: ParseError = lex.into();
        assert_eq!(parse.kind, ParseErrorKind::InvalidToken);
        assert_eq!(parse.span, Span::new(3, 1, 1));
    }

    #[test]
    fn multiple_parse_errors_display_one_per_line() {
        let errors: ParseErrors = [
            ParseError::unexpected_eof(Span::point(4, 1)),
            ParseError::expected_identifier(Span::new(2, 3, 1), "'('"),
        ]
        .into_iter()
        .collect();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.to_string().lines().count(), 2);
    }

    #[test]
    fn internal_errors_are_flagged() {
        let overlap = SpecializeError::OverlappingEdits {
            first: TokenRange::new(0, 4),
            second: TokenRange::new(2, 3),
        };
        assert!(overlap.is_internal());
        assert!(overlap.span().is_none());

        let arity = SpecializeError::ArgumentCount {
            call: "Intrinsics.equals(a)".into(),
            expected: "2 or 3",
            got: 1,
            span: Span::new(10, 5, 20),
        };
        assert!(!arity.is_internal());
        assert!(arity.to_string().contains("expects 2 or 3 argument(s), got 1"));
    }
}
