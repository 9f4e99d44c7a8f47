//! Token types for the template lexer.
//!
//! The token stream is lossless: whitespace and comments are tokens too, on
//! their own [`Channel`]s, so concatenating every lexeme reproduces the
//! template byte-for-byte.

use specgen_core::Span;
use std::fmt;

/// A token from template source.
///
/// The `'ast` lifetime refers to the arena where the lexeme string is allocated.
#[derive(Clone, Copy, PartialEq)]
pub struct Token<'ast> {
    /// The type of token.
    pub kind: TokenKind,
    /// The source text of this token (allocated in arena).
    pub lexeme: &'ast str,
    /// Location in source.
    pub span: Span,
}

impl<'ast> Token<'ast> {
    /// Create a new token.
    #[inline]
    pub fn new(kind: TokenKind, lexeme: &'ast str, span: Span) -> Self {
        Self { kind, lexeme, span }
    }

    /// The channel this token travels on.
    #[inline]
    pub fn channel(&self) -> Channel {
        self.kind.channel()
    }

    /// Whether the parser sees this token.
    #[inline]
    pub fn is_code(&self) -> bool {
        self.kind.channel() == Channel::Code
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?} @ {:?})", self.kind, self.lexeme, self.span)
    }
}

/// Which stream a token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Significant tokens seen by the parser.
    Code,
    /// Spaces, tabs and line breaks.
    Whitespace,
    /// Line, block and doc comments.
    Comment,
}

/// All token types of the template language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // =========================================
    // Trivia
    // =========================================
    /// Run of whitespace characters.
    Whitespace,
    /// `// ...` up to (not including) the line break.
    LineComment,
    /// `/* ... */`
    BlockComment,
    /// `/** ... */`
    DocComment,

    // =========================================
    // Literals
    // =========================================
    /// Integer literal: `42`, `0xFF`, `10L`
    IntLiteral,
    /// Floating literal: `3.14`, `1e10`, `2f`, `0x1p3`
    FloatLiteral,
    /// Character literal: `'a'`, `'\n'`
    CharLiteral,
    /// String literal: `"hello"`
    StringLiteral,
    /// Text block: `"""..."""`
    TextBlock,

    // =========================================
    // Identifiers
    // =========================================
    /// User-defined identifier
    Identifier,

    // =========================================
    // Keywords - Types
    // =========================================
    /// `boolean`
    Boolean,
    /// `byte`
    Byte,
    /// `char`
    Char,
    /// `short`
    Short,
    /// `int`
    Int,
    /// `long`
    Long,
    /// `float`
    Float,
    /// `double`
    Double,
    /// `void`
    Void,

    // =========================================
    // Keywords - Values
    // =========================================
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
    /// `this`
    This,
    /// `super`
    Super,

    // =========================================
    // Keywords - Declarations
    // =========================================
    /// `package`
    Package,
    /// `import`
    Import,
    /// `class`
    Class,
    /// `interface`
    Interface,
    /// `enum`
    Enum,
    /// `extends`
    Extends,
    /// `implements`
    Implements,
    /// `throws`
    Throws,

    // =========================================
    // Keywords - Modifiers
    // =========================================
    /// `public`
    Public,
    /// `protected`
    Protected,
    /// `private`
    Private,
    /// `static`
    Static,
    /// `abstract`
    Abstract,
    /// `final`
    Final,
    /// `native`
    Native,
    /// `synchronized`
    Synchronized,
    /// `transient`
    Transient,
    /// `volatile`
    Volatile,
    /// `strictfp`
    Strictfp,
    /// `default`
    Default,

    // =========================================
    // Keywords - Statements and expressions
    // =========================================
    /// `if`
    If,
    /// `else`
    Else,
    /// `for`
    For,
    /// `while`
    While,
    /// `do`
    Do,
    /// `switch`
    Switch,
    /// `case`
    Case,
    /// `break`
    Break,
    /// `continue`
    Continue,
    /// `return`
    Return,
    /// `throw`
    Throw,
    /// `try`
    Try,
    /// `catch`
    Catch,
    /// `finally`
    Finally,
    /// `new`
    New,
    /// `instanceof`
    Instanceof,
    /// `assert`
    Assert,
    /// `const` and `goto` (reserved, never valid)
    Reserved,

    // =========================================
    // Operators
    // =========================================
    /// `=`
    Equal,
    /// `==`
    EqualEqual,
    /// `!`
    Bang,
    /// `!=`
    BangEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `<<`
    LessLess,
    /// `<<=`
    LessLessEqual,
    /// `>` (never merged with a following `>` or `=`)
    Greater,
    /// `+`
    Plus,
    /// `+=`
    PlusEqual,
    /// `++`
    PlusPlus,
    /// `-`
    Minus,
    /// `-=`
    MinusEqual,
    /// `--`
    MinusMinus,
    /// `->`
    Arrow,
    /// `*`
    Star,
    /// `*=`
    StarEqual,
    /// `/`
    Slash,
    /// `/=`
    SlashEqual,
    /// `%`
    Percent,
    /// `%=`
    PercentEqual,
    /// `&`
    Amp,
    /// `&=`
    AmpEqual,
    /// `&&`
    AmpAmp,
    /// `|`
    Pipe,
    /// `|=`
    PipeEqual,
    /// `||`
    PipePipe,
    /// `^`
    Caret,
    /// `^=`
    CaretEqual,
    /// `~`
    Tilde,
    /// `?`
    Question,
    /// `:`
    Colon,
    /// `::`
    ColonColon,

    // =========================================
    // Punctuation
    // =========================================
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `...`
    Ellipsis,
    /// `@`
    At,

    // =========================================
    // Special
    // =========================================
    /// End of file
    Eof,
    /// Lexer error
    Error,
}

impl TokenKind {
    /// The channel tokens of this kind travel on.
    pub fn channel(self) -> Channel {
        match self {
            TokenKind::Whitespace => Channel::Whitespace,
            TokenKind::LineComment | TokenKind::BlockComment | TokenKind::DocComment => {
                Channel::Comment
            }
            _ => Channel::Code,
        }
    }

    /// Check if this token is a primitive type keyword (including `void`).
    pub fn is_primitive_type(self) -> bool {
        matches!(
            self,
            TokenKind::Boolean
                | TokenKind::Byte
                | TokenKind::Char
                | TokenKind::Short
                | TokenKind::Int
                | TokenKind::Long
                | TokenKind::Float
                | TokenKind::Double
                | TokenKind::Void
        )
    }

    /// Check if this token is a declaration modifier keyword.
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            TokenKind::Public
                | TokenKind::Protected
                | TokenKind::Private
                | TokenKind::Static
                | TokenKind::Abstract
                | TokenKind::Final
                | TokenKind::Native
                | TokenKind::Synchronized
                | TokenKind::Transient
                | TokenKind::Volatile
                | TokenKind::Strictfp
                | TokenKind::Default
        )
    }

    /// Check if this token is a literal.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::IntLiteral
                | TokenKind::FloatLiteral
                | TokenKind::CharLiteral
                | TokenKind::StringLiteral
                | TokenKind::TextBlock
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
        )
    }

    /// Check if this token opens a delimited group.
    pub fn is_open_delimiter(self) -> bool {
        matches!(
            self,
            TokenKind::LeftParen | TokenKind::LeftBracket | TokenKind::LeftBrace
        )
    }

    /// Check if this token closes a delimited group.
    pub fn is_close_delimiter(self) -> bool {
        matches!(
            self,
            TokenKind::RightParen | TokenKind::RightBracket | TokenKind::RightBrace
        )
    }

    /// Get a human-readable description of this token kind.
    pub fn description(self) -> &'static str {
        match self {
            TokenKind::Whitespace => "whitespace",
            TokenKind::LineComment | TokenKind::BlockComment => "comment",
            TokenKind::DocComment => "doc comment",
            TokenKind::IntLiteral => "integer literal",
            TokenKind::FloatLiteral => "floating-point literal",
            TokenKind::CharLiteral => "character literal",
            TokenKind::StringLiteral => "string literal",
            TokenKind::TextBlock => "text block",
            TokenKind::Identifier => "identifier",
            TokenKind::Boolean => "'boolean'",
            TokenKind::Byte => "'byte'",
            TokenKind::Char => "'char'",
            TokenKind::Short => "'short'",
            TokenKind::Int => "'int'",
            TokenKind::Long => "'long'",
            TokenKind::Float => "'float'",
            TokenKind::Double => "'double'",
            TokenKind::Void => "'void'",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::Null => "'null'",
            TokenKind::This => "'this'",
            TokenKind::Super => "'super'",
            TokenKind::Package => "'package'",
            TokenKind::Import => "'import'",
            TokenKind::Class => "'class'",
            TokenKind::Interface => "'interface'",
            TokenKind::Enum => "'enum'",
            TokenKind::Extends => "'extends'",
            TokenKind::Implements => "'implements'",
            TokenKind::Throws => "'throws'",
            TokenKind::Public => "'public'",
            TokenKind::Protected => "'protected'",
            TokenKind::Private => "'private'",
            TokenKind::Static => "'static'",
            TokenKind::Abstract => "'abstract'",
            TokenKind::Final => "'final'",
            TokenKind::Native => "'native'",
            TokenKind::Synchronized => "'synchronized'",
            TokenKind::Transient => "'transient'",
            TokenKind::Volatile => "'volatile'",
            TokenKind::Strictfp => "'strictfp'",
            TokenKind::Default => "'default'",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::For => "'for'",
            TokenKind::While => "'while'",
            TokenKind::Do => "'do'",
            TokenKind::Switch => "'switch'",
            TokenKind::Case => "'case'",
            TokenKind::Break => "'break'",
            TokenKind::Continue => "'continue'",
            TokenKind::Return => "'return'",
            TokenKind::Throw => "'throw'",
            TokenKind::Try => "'try'",
            TokenKind::Catch => "'catch'",
            TokenKind::Finally => "'finally'",
            TokenKind::New => "'new'",
            TokenKind::Instanceof => "'instanceof'",
            TokenKind::Assert => "'assert'",
            TokenKind::Reserved => "reserved keyword",
            TokenKind::Equal => "'='",
            TokenKind::EqualEqual => "'=='",
            TokenKind::Bang => "'!'",
            TokenKind::BangEqual => "'!='",
            TokenKind::Less => "'<'",
            TokenKind::LessEqual => "'<='",
            TokenKind::LessLess => "'<<'",
            TokenKind::LessLessEqual => "'<<='",
            TokenKind::Greater => "'>'",
            TokenKind::Plus => "'+'",
            TokenKind::PlusEqual => "'+='",
            TokenKind::PlusPlus => "'++'",
            TokenKind::Minus => "'-'",
            TokenKind::MinusEqual => "'-='",
            TokenKind::MinusMinus => "'--'",
            TokenKind::Arrow => "'->'",
            TokenKind::Star => "'*'",
            TokenKind::StarEqual => "'*='",
            TokenKind::Slash => "'/'",
            TokenKind::SlashEqual => "'/='",
            TokenKind::Percent => "'%'",
            TokenKind::PercentEqual => "'%='",
            TokenKind::Amp => "'&'",
            TokenKind::AmpEqual => "'&='",
            TokenKind::AmpAmp => "'&&'",
            TokenKind::Pipe => "'|'",
            TokenKind::PipeEqual => "'|='",
            TokenKind::PipePipe => "'||'",
            TokenKind::Caret => "'^'",
            TokenKind::CaretEqual => "'^='",
            TokenKind::Tilde => "'~'",
            TokenKind::Question => "'?'",
            TokenKind::Colon => "':'",
            TokenKind::ColonColon => "'::'",
            TokenKind::LeftParen => "'('",
            TokenKind::RightParen => "')'",
            TokenKind::LeftBracket => "'['",
            TokenKind::RightBracket => "']'",
            TokenKind::LeftBrace => "'{'",
            TokenKind::RightBrace => "'}'",
            TokenKind::Semicolon => "';'",
            TokenKind::Comma => "','",
            TokenKind::Dot => "'.'",
            TokenKind::Ellipsis => "'...'",
            TokenKind::At => "'@'",
            TokenKind::Eof => "end of file",
            TokenKind::Error => "invalid token",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Look up a keyword by its string representation.
pub fn lookup_keyword(ident: &str) -> Option<TokenKind> {
    let kind = match ident {
        "boolean" => TokenKind::Boolean,
        "byte" => TokenKind::Byte,
        "char" => TokenKind::Char,
        "short" => TokenKind::Short,
        "int" => TokenKind::Int,
        "long" => TokenKind::Long,
        "float" => TokenKind::Float,
        "double" => TokenKind::Double,
        "void" => TokenKind::Void,
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "null" => TokenKind::Null,
        "this" => TokenKind::This,
        "super" => TokenKind::Super,
        "package" => TokenKind::Package,
        "import" => TokenKind::Import,
        "class" => TokenKind::Class,
        "interface" => TokenKind::Interface,
        "enum" => TokenKind::Enum,
        "extends" => TokenKind::Extends,
        "implements" => TokenKind::Implements,
        "throws" => TokenKind::Throws,
        "public" => TokenKind::Public,
        "protected" => TokenKind::Protected,
        "private" => TokenKind::Private,
        "static" => TokenKind::Static,
        "abstract" => TokenKind::Abstract,
        "final" => TokenKind::Final,
        "native" => TokenKind::Native,
        "synchronized" => TokenKind::Synchronized,
        "transient" => TokenKind::Transient,
        "volatile" => TokenKind::Volatile,
        "strictfp" => TokenKind::Strictfp,
        "default" => TokenKind::Default,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "for" => TokenKind::For,
        "while" => TokenKind::While,
        "do" => TokenKind::Do,
        "switch" => TokenKind::Switch,
        "case" => TokenKind::Case,
        "break" => TokenKind::Break,
        "continue" => TokenKind::Continue,
        "return" => TokenKind::Return,
        "throw" => TokenKind::Throw,
        "try" => TokenKind::Try,
        "catch" => TokenKind::Catch,
        "finally" => TokenKind::Finally,
        "new" => TokenKind::New,
        "instanceof" => TokenKind::Instanceof,
        "assert" => TokenKind::Assert,
        "const" | "goto" => TokenKind::Reserved,
        _ => return None,
    };
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_lookup() {
        assert_eq!(lookup_keyword("class"), Some(TokenKind::Class));
        assert_eq!(lookup_keyword("instanceof"), Some(TokenKind::Instanceof));
        assert_eq!(lookup_keyword("goto"), Some(TokenKind::Reserved));
        assert_eq!(lookup_keyword("KType"), None);
        assert_eq!(lookup_keyword("var"), None);
    }

    #[test]
    fn channels() {
        assert_eq!(TokenKind::Whitespace.channel(), Channel::Whitespace);
        assert_eq!(TokenKind::DocComment.channel(), Channel::Comment);
        assert_eq!(TokenKind::LineComment.channel(), Channel::Comment);
        assert_eq!(TokenKind::Identifier.channel(), Channel::Code);
        assert_eq!(TokenKind::Greater.channel(), Channel::Code);
    }

    #[test]
    fn token_categories() {
        assert!(TokenKind::Int.is_primitive_type());
        assert!(TokenKind::Void.is_primitive_type());
        assert!(!TokenKind::Identifier.is_primitive_type());
        assert!(TokenKind::Default.is_modifier());
        assert!(TokenKind::Null.is_literal());
        assert!(TokenKind::LeftBrace.is_open_delimiter());
        assert!(TokenKind::RightBracket.is_close_delimiter());
    }

    #[test]
    fn token_debug_format() {
        let token = Token::new(TokenKind::Identifier, "KType", Span::new(1, 5, 5));
        assert_eq!(format!("{:?}", token), "Identifier(\"KType\" @ 1:5)");
        assert!(token.is_code());
    }

    #[test]
    fn description_display() {
        assert_eq!(TokenKind::Greater.to_string(), "'>'");
        assert_eq!(TokenKind::Identifier.to_string(), "identifier");
    }
}
