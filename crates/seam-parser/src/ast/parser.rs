//! Parser infrastructure: token navigation, error recording and recovery.
//!
//! The grammar productions live in `decl_parser`, `stmt_parser`,
//! `expr_parser` and `type_parser`, each adding methods to [`Parser`].

use bumpalo::Bump;
use seam_core::{ParseError, ParseErrorKind, ParseErrors, Position, Span};
use tracing::debug;

use super::decl::RestrictedBlock;
use crate::lexer::{Lexer, Token, TokenKind};

/// How the parser reacts to a syntax error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Stop at the first error.
    FailFast,
    /// Record the error, skip the rest of the offending source line and
    /// continue with the next statement.
    #[default]
    Recover,
}

/// Recursive-descent parser with a single token of lookahead.
///
/// Tokens are pulled from the [`Lexer`] on demand. Lexical errors are
/// recorded as [`ParseErrorKind::Lexical`] errors and the offending input is
/// skipped.
pub struct Parser<'src, 'ast> {
    pub(super) lexer: Lexer<'src, 'ast>,
    /// The lookahead token.
    pub(super) current: Token<'ast>,
    /// End of the last consumed token.
    pub(super) prev_end: Position,
    pub(super) errors: ParseErrors,
    pub(super) mode: ParseMode,
}

impl<'src, 'ast> Parser<'src, 'ast> {
    pub fn new(source: &'src str, arena: &'ast Bump, mode: ParseMode) -> Self {
        let start = Position::default();
        let mut parser = Self {
            lexer: Lexer::new(source, arena),
            current: Token::new(TokenKind::Eof, None, Span::point(start)),
            prev_end: start,
            errors: ParseErrors::new(),
            mode,
        };
        parser.advance();
        parser.prev_end = start;
        parser
    }

    /// Parse a whole compilation unit into its root restricted block.
    ///
    /// Fails with every syntax error found (or only the first, in
    /// [`ParseMode::FailFast`]).
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn parse(
        source: &'src str,
        arena: &'ast Bump,
        mode: ParseMode,
    ) -> Result<RestrictedBlock<'ast>, ParseErrors> {
        let mut parser = Parser::new(source, arena, mode);
        let root = parser.parse_module();
        parser.finish(root)
    }

    /// Parse restricted statements up to the end of input.
    ///
    /// A stray `}` at module scope is reported; in recovery mode it is then
    /// skipped and parsing continues.
    pub fn parse_module(&mut self) -> RestrictedBlock<'ast> {
        let mut root = self.parse_restricted_block();

        while !self.check(TokenKind::Eof) && !self.should_stop() {
            let error = ParseError::expected_token(TokenKind::Eof, self.current, self.current.span);
            self.errors.push(error);
            if self.mode == ParseMode::FailFast {
                break;
            }
            self.advance();
            let rest = self.parse_restricted_block();
            root.stmts.extend(rest.stmts);
            root.span = root.span.to(rest.span);
        }

        root
    }

    /// Turn the parse result into `Ok` only when no error was recorded.
    pub fn finish<T>(self, value: T) -> Result<T, ParseErrors> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(self.errors)
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn take_errors(&mut self) -> ParseErrors {
        std::mem::take(&mut self.errors)
    }

    // ========================================================================
    // Token Navigation
    // ========================================================================

    /// The lookahead token.
    #[inline]
    pub fn current_lexeme(&self) -> Token<'ast> {
        self.current
    }

    /// Consume the lookahead token and return it.
    pub fn advance(&mut self) -> Token<'ast> {
        let consumed = self.current;
        self.prev_end = consumed.span.end;
        loop {
            match self.lexer.next_token() {
                Ok(token) => {
                    self.current = token;
                    break;
                }
                Err(error) => self.errors.push(error.into()),
            }
        }
        consumed
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Consume the lookahead token if it has the given kind.
    pub fn eat(&mut self, kind: TokenKind) -> Option<Token<'ast>> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Consume a token of the given kind, or fail with "expected X, got Y".
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token<'ast>, ParseError> {
        self.require(kind)?;
        Ok(self.advance())
    }

    /// Like [`expect`](Self::expect) but leaves the token in place.
    pub fn require(&self, kind: TokenKind) -> Result<Token<'ast>, ParseError> {
        if self.check(kind) {
            Ok(self.current)
        } else {
            Err(ParseError::expected_token(kind, self.current, self.current.span))
        }
    }

    /// Span from `start` to the end of the last consumed token.
    pub(super) fn span_from(&self, start: Position) -> Span {
        Span::new(start, self.prev_end.max(start))
    }

    // ========================================================================
    // Error Handling
    // ========================================================================

    /// "unexpected X" at the lookahead token.
    pub(super) fn unexpected(&self) -> ParseError {
        ParseError::new(
            ParseErrorKind::UnexpectedToken,
            self.current.span,
            format!("unexpected {}", self.current),
        )
    }

    /// Whether a recorded error should end parsing.
    #[inline]
    pub(super) fn should_stop(&self) -> bool {
        self.mode == ParseMode::FailFast && !self.errors.is_empty()
    }

    /// Record a failed production and, in recovery mode, skip to the next line.
    pub(super) fn recover(&mut self, error: ParseError) {
        let line = error.span.start.line;
        self.errors.push(error);
        if self.mode == ParseMode::Recover {
            self.synchronize(line);
        }
    }

    /// Skip the remaining tokens on `line`.
    ///
    /// A brace opened on the line is skipped through its match, even across
    /// lines; an unmatched `}` is left in place for the enclosing block.
    pub(super) fn synchronize(&mut self, line: u32) {
        let mut depth = 0usize;
        let mut skipped = 0usize;

        while !self.check(TokenKind::Eof) {
            match self.current.kind {
                TokenKind::RightBrace if depth == 0 => break,
                _ if depth == 0 && self.current.line() != line => break,
                TokenKind::RightBrace => depth -= 1,
                TokenKind::LeftBrace => depth += 1,
                _ => {}
            }
            self.advance();
            skipped += 1;
        }

        debug!(line, skipped, next = %self.current, "parser resynchronized");
    }
}
