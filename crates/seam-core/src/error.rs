//! Unified error types for the Seam front end.
//!
//! ## Error Hierarchy
//!
//! ```text
//! SeamError (top-level wrapper)
//! ├── ParseErrors       - one or more syntax errors (lexical errors surface here too)
//! ├── CompilationError  - semantic errors raised by the pass pipeline
//! └── Io                - the source file could not be read
//! ```
//!
//! Every diagnostic is positioned. [`ParseError::display_with_source`] and
//! [`CompilationError::display_with_source`] render the offending source line
//! with a caret under the reported position.

use std::fmt::Write as _;

use thiserror::Error;

use crate::Span;

// ============================================================================
// Lexer Errors
// ============================================================================

/// Errors that occur during lexical analysis (tokenization).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    /// A character that starts no lexeme.
    #[error("unexpected symbol '{ch}'")]
    UnexpectedChar { ch: char, span: Span },

    /// A string literal reached a newline or end of input before its closing quote.
    #[error("unterminated string")]
    UnterminatedString { span: Span },

    /// A `///` long comment without its closing `///`.
    #[error("unterminated comment")]
    UnterminatedComment { span: Span },

    /// A numeric literal that breaks the number grammar.
    #[error("invalid number: {detail}")]
    InvalidNumber { span: Span, detail: String },

    /// `@` not followed by an identifier.
    #[error("expected attribute name after '@'")]
    InvalidAttribute { span: Span },
}

impl LexError {
    /// Get the span where this error occurred.
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedChar { span, .. } => *span,
            LexError::UnterminatedString { span } => *span,
            LexError::UnterminatedComment { span } => *span,
            LexError::InvalidNumber { span, .. } => *span,
            LexError::InvalidAttribute { span } => *span,
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
    Lexical,
    /// A specific token was expected but not found.
    ExpectedToken,
    /// A token that cannot start a construct in the current scope.
    UnexpectedToken,
    /// An expression was expected.
    ExpectedExpression,
}

impl ParseErrorKind {
    /// Returns a human-readable name for this error kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseErrorKind::Lexical => "lexical error",
            ParseErrorKind::ExpectedToken => "expected token",
            ParseErrorKind::UnexpectedToken => "unexpected token",
            ParseErrorKind::ExpectedExpression => "expected expression",
        }
    }
}

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A positioned syntax error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} at {span}: {message}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    pub message: String,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            message: message.into(),
        }
    }

    /// "expected X, got Y" at the offending token.
    pub fn expected_token(
        expected: impl std::fmt::Display,
        found: impl std::fmt::Display,
        span: Span,
    ) -> Self {
        Self::new(
            ParseErrorKind::ExpectedToken,
            span,
            format!("expected {expected}, got {found}"),
        )
    }

    /// Render this error with the source line and a caret pointer.
    pub fn display_with_source(&self, source: &str) -> String {
        render_with_source(self.span, self.kind.as_str(), &self.message, source)
    }
}

impl From<LexError> for ParseError {
    fn from(error: LexError) -> Self {
        Self::new(ParseErrorKind::Lexical, error.span(), error.to_string())
    }
}

/// An ordered collection of syntax errors from one parse.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParseErrors {
    errors: Vec<ParseError>,
}

impl ParseErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn push(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParseError> {
        self.errors.iter()
    }

    /// The first error, if any.
    pub fn first(&self) -> Option<&ParseError> {
        self.errors.first()
    }

    /// Render every error with its source context.
    pub fn display_with_source(&self, source: &str) -> String {
        self.errors
            .iter()
            .map(|error| error.display_with_source(source))
            .collect()
    }
}

impl std::error::Error for ParseErrors {}

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

// ============================================================================
// Compilation Errors
// ============================================================================

/// Semantic errors raised by the analysis passes.
///
/// Each is fatal for the compilation unit; no partially resolved tree is
/// handed on once one of these is reported.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompilationError {
    #[error("at {span}: attempt to redefine type '{name}'")]
    RedefinedType { name: String, span: Span },

    #[error("at {span}: invalid target type '{target}' for alias '{alias}'")]
    InvalidAliasTarget {
        alias: String,
        target: String,
        span: Span,
    },

    #[error("at {span}: invalid type '{ty}' for field '{field}'")]
    InvalidFieldType {
        field: String,
        ty: String,
        span: Span,
    },

    #[error("at {span}: attempt to use invalid type '{name}'")]
    InvalidType { name: String, span: Span },

    #[error("at {span}: attempt to redefine symbol '{symbol}'")]
    RedefinedSymbol { symbol: String, span: Span },

    #[error("at {span}: module can have at most one constructor")]
    DuplicateConstructor { span: Span },

    #[error("at {span}: unexpected module constructor inside type")]
    ConstructorInsideType { span: Span },

    #[error("at {span}: unexpected extern definition inside type")]
    ExternInsideType { span: Span },

    #[error("at {span}: extern function '{name}' cannot be exported")]
    ExportedExtern { name: String, span: Span },

    #[error("at {span}: extern function '{name}' cannot be a module constructor")]
    ExternConstructor { name: String, span: Span },

    #[error(
        "at {span}: invalid constructor signature for '{name}', a constructor takes no parameters"
    )]
    InvalidConstructorSignature { name: String, span: Span },

    #[error("at {span}: could not find variable '{name}', did you forget to declare it?")]
    UnresolvedVariable { name: String, span: Span },

    /// A type slot was read before the type resolver filled it.
    #[error("at {span}: type of {what} read before type resolution")]
    UnresolvedSlot { what: String, span: Span },

    #[error("at {span}: number literal '{literal}' is out of range for '{ty}'")]
    LiteralOutOfRange {
        literal: String,
        ty: String,
        span: Span,
    },

    #[error("at {span}: number literal '{literal}' cannot be used as '{ty}'")]
    InvalidLiteral {
        literal: String,
        ty: String,
        span: Span,
    },

    #[error("at {span}: passes did not settle after {rounds} rounds")]
    NoFixedPoint { rounds: usize, span: Span },
}

impl CompilationError {
    /// Get the span where this error occurred.
    pub fn span(&self) -> Span {
        match self {
            CompilationError::RedefinedType { span, .. }
            | CompilationError::InvalidAliasTarget { span, .. }
            | CompilationError::InvalidFieldType { span, .. }
            | CompilationError::InvalidType { span, .. }
            | CompilationError::RedefinedSymbol { span, .. }
            | CompilationError::DuplicateConstructor { span }
            | CompilationError::ConstructorInsideType { span }
            | CompilationError::ExternInsideType { span }
            | CompilationError::ExportedExtern { span, .. }
            | CompilationError::ExternConstructor { span, .. }
            | CompilationError::InvalidConstructorSignature { span, .. }
            | CompilationError::UnresolvedVariable { span, .. }
            | CompilationError::UnresolvedSlot { span, .. }
            | CompilationError::LiteralOutOfRange { span, .. }
            | CompilationError::InvalidLiteral { span, .. }
            | CompilationError::NoFixedPoint { span, .. } => *span,
        }
    }

    /// Render this error with the source line and a caret pointer.
    pub fn display_with_source(&self, source: &str) -> String {
        let message = self.to_string();
        let message = message
            .split_once(": ")
            .map_or(message.as_str(), |(_, rest)| rest);
        render_with_source(self.span(), "semantic error", message, source)
    }
}

// ============================================================================
// Top-level Error
// ============================================================================

/// Any failure of a compilation attempt.
#[derive(Debug, Error)]
pub enum SeamError {
    #[error(transparent)]
    Parse(#[from] ParseErrors),

    #[error(transparent)]
    Compilation(#[from] CompilationError),

    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

impl SeamError {
    pub fn is_parse(&self) -> bool {
        matches!(self, SeamError::Parse(_))
    }

    pub fn is_compilation(&self) -> bool {
        matches!(self, SeamError::Compilation(_))
    }

    /// Render the diagnostics with source context.
    pub fn display_with_source(&self, source: &str) -> String {
        match self {
            SeamError::Parse(errors) => errors.display_with_source(source),
            SeamError::Compilation(error) => error.display_with_source(source),
            SeamError::Io { .. } => format!("{self}\n"),
        }
    }
}

impl From<ParseError> for SeamError {
    fn from(error: ParseError) -> Self {
        SeamError::Parse(error.into())
    }
}

fn render_with_source(span: Span, header: &str, message: &str, source: &str) -> String {
    let line = span.start.line;
    let column = span.start.column;
    let mut output = String::new();

    let _ = writeln!(output, "error at {}:{}: {}", line, column, header);
    if !message.is_empty() {
        let _ = writeln!(output, "  {}", message);
    }

    if let Some(line_text) = source.lines().nth(line.saturating_sub(1) as usize) {
        output.push_str("  |\n");
        let _ = writeln!(output, "{:>3} | {}", line, line_text);

        let indent = " ".repeat(column.saturating_sub(1) as usize);
        let width = if span.start.line == span.end.line {
            span.len().max(1)
        } else {
            1
        };
        let pointer = "^".to_string() + &"~".repeat(width as usize - 1);
        let _ = writeln!(output, "  | {}{}", indent, pointer);
    }

    output
}
