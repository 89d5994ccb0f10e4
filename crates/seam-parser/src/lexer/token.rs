//! Lexemes produced by the [`Lexer`](super::Lexer).

use seam_core::Span;
use std::fmt;

/// A classified, positioned fragment of source text.
///
/// `text` holds the payload of identifiers, literals and attributes, copied
/// into the arena so the source buffer need not outlive the tree. String
/// literals keep their escapes raw and exclude the quotes; attributes exclude
/// the `@`.
#[derive(Clone, Copy, PartialEq)]
pub struct Token<'ast> {
    pub kind: TokenKind,
    pub text: Option<&'ast str>,
    pub span: Span,
}

impl<'ast> Token<'ast> {
    #[inline]
    pub fn new(kind: TokenKind, text: Option<&'ast str>, span: Span) -> Self {
        Self { kind, text, span }
    }

    /// Payload text, or `""` for lexemes that carry none.
    #[inline]
    pub fn text(&self) -> &'ast str {
        self.text.unwrap_or("")
    }

    #[inline]
    pub fn line(&self) -> u32 {
        self.span.start.line
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.text {
            Some(text) => write!(f, "{:?}({:?} @ {})", self.kind, text, self.span),
            None => write!(f, "{:?}(@ {})", self.kind, self.span),
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.text) {
            (TokenKind::Identifier, Some(text)) => write!(f, "identifier '{text}'"),
            (TokenKind::Attribute, Some(text)) => write!(f, "attribute '@{text}'"),
            (TokenKind::NumberLiteral, Some(text)) => write!(f, "number '{text}'"),
            (TokenKind::StringLiteral, Some(text)) => write!(f, "string \"{text}\""),
            (kind, _) => write!(f, "{kind}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of input. Once produced, every further request yields it again.
    Eof,

    // =========================================
    // Payload-carrying lexemes
    // =========================================
    Identifier,
    /// `"..."`
    StringLiteral,
    /// `42`, `3.5`, `0xff`, `1_000`
    NumberLiteral,
    /// `@export`
    Attribute,

    // =========================================
    // Keywords
    // =========================================
    Fn,
    Return,
    Type,
    Try,
    Catch,
    Switch,
    Throw,
    True,
    False,
    Extern,
    As,

    // =========================================
    // Operators
    // =========================================
    Plus,
    PlusEqual,
    Minus,
    MinusEqual,
    Star,
    StarEqual,
    Slash,
    SlashEqual,
    /// `->`
    Arrow,
    Equal,
    Question,
    Colon,
    Comma,

    // =========================================
    // Brackets
    // =========================================
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
}

impl TokenKind {
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Fn
                | TokenKind::Return
                | TokenKind::Type
                | TokenKind::Try
                | TokenKind::Catch
                | TokenKind::Switch
                | TokenKind::Throw
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Extern
                | TokenKind::As
        )
    }

    /// Human-readable description used in diagnostics.
    pub fn description(&self) -> &'static str {
        match self {
            TokenKind::Eof => "<eof>",
            TokenKind::Identifier => "<identifier>",
            TokenKind::StringLiteral => "<string>",
            TokenKind::NumberLiteral => "<number>",
            TokenKind::Attribute => "<attribute>",
            TokenKind::Fn => "'fn'",
            TokenKind::Return => "'return'",
            TokenKind::Type => "'type'",
            TokenKind::Try => "'try'",
            TokenKind::Catch => "'catch'",
            TokenKind::Switch => "'switch'",
            TokenKind::Throw => "'throw'",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::Extern => "'extern'",
            TokenKind::As => "'as'",
            TokenKind::Plus => "'+'",
            TokenKind::PlusEqual => "'+='",
            TokenKind::Minus => "'-'",
            TokenKind::MinusEqual => "'-='",
            TokenKind::Star => "'*'",
            TokenKind::StarEqual => "'*='",
            TokenKind::Slash => "'/'",
            TokenKind::SlashEqual => "'/='",
            TokenKind::Arrow => "'->'",
            TokenKind::Equal => "'='",
            TokenKind::Question => "'?'",
            TokenKind::Colon => "':'",
            TokenKind::Comma => "','",
            TokenKind::LeftParen => "'('",
            TokenKind::RightParen => "')'",
            TokenKind::LeftBracket => "'['",
            TokenKind::RightBracket => "']'",
            TokenKind::LeftBrace => "'{'",
            TokenKind::RightBrace => "'}'",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Look up a reserved word. Keywords are matched case-sensitively.
pub fn lookup_keyword(text: &str) -> Option<TokenKind> {
    let kind = match text {
        "fn" => TokenKind::Fn,
        "return" => TokenKind::Return,
        "type" => TokenKind::Type,
        "try" => TokenKind::Try,
        "catch" => TokenKind::Catch,
        "switch" => TokenKind::Switch,
        "throw" => TokenKind::Throw,
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "extern" => TokenKind::Extern,
        "as" => TokenKind::As,
        _ => return None,
    };
    Some(kind)
}
