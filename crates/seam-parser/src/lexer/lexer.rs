//! The [`Lexer`] turns source text into a lazy stream of [`Token`]s.
//!
//! Scanning dispatches on the first character of each lexeme. Payload text is
//! copied into the arena, so the tokens (and the tree built from them) only
//! borrow the arena, never the source buffer.

use bumpalo::Bump;
use seam_core::{LexError, Position, Span};

use super::cursor::{Cursor, is_ident_continue, is_ident_start};
use super::token::{Token, TokenKind, lookup_keyword};

/// Pull-based lexer.
///
/// [`next_token`](Self::next_token) scans and returns the next lexeme;
/// [`current`](Self::current) returns the last one produced. After the end of
/// input every call yields an [`TokenKind::Eof`] lexeme.
///
/// A failed scan still consumes the offending characters, so callers may
/// report the error and keep pulling tokens.
pub struct Lexer<'src, 'ast> {
    cursor: Cursor<'src>,
    arena: &'ast Bump,
    current: Option<Token<'ast>>,
}

impl<'src, 'ast> Lexer<'src, 'ast> {
    pub fn new(source: &'src str, arena: &'ast Bump) -> Self {
        Self {
            cursor: Cursor::new(source),
            arena,
            current: None,
        }
    }

    /// The lexeme most recently returned by [`next_token`](Self::next_token).
    pub fn current(&self) -> Option<Token<'ast>> {
        self.current
    }

    /// Scan and return the next lexeme.
    pub fn next_token(&mut self) -> Result<Token<'ast>, LexError> {
        let token = self.scan_token()?;
        self.current = Some(token);
        Ok(token)
    }

    // =========================================
    // Internal: Token scanning
    // =========================================

    fn scan_token(&mut self) -> Result<Token<'ast>, LexError> {
        self.skip_trivia()?;

        let start = self.cursor.position();
        let Some(c) = self.cursor.peek() else {
            return Ok(Token::new(TokenKind::Eof, None, Span::point(start)));
        };

        match c {
            '"' => self.scan_string(start),
            '@' => self.scan_attribute(start),
            c if c.is_ascii_digit() => self.scan_number(start),
            c if is_ident_start(c) => Ok(self.scan_identifier(start)),
            _ => self.scan_operator(start),
        }
    }

    /// Skip whitespace, `//` line comments and `///`...`///` long comments.
    fn skip_trivia(&mut self) -> Result<(), LexError> {
        loop {
            self.cursor.eat_while(|c| matches!(c, ' ' | '\t' | '\r' | '\n'));

            if self.cursor.check_str("///") {
                let start = self.cursor.position();
                self.cursor.eat_str("///");
                loop {
                    if self.cursor.eat_str("///") {
                        break;
                    }
                    if self.cursor.advance().is_none() {
                        return Err(LexError::UnterminatedComment {
                            span: Span::new(start, self.cursor.position()),
                        });
                    }
                }
            } else if self.cursor.check_str("//") {
                self.cursor.eat_while(|c| c != '\n');
            } else {
                return Ok(());
            }
        }
    }

    fn make_token(&self, kind: TokenKind, start: Position, text: Option<&str>) -> Token<'ast> {
        let text = text.map(|text| &*self.arena.alloc_str(text));
        Token::new(kind, text, Span::new(start, self.cursor.position()))
    }

    fn span_from(&self, start: Position) -> Span {
        Span::new(start, self.cursor.position())
    }

    // =========================================
    // Scanning: Strings and attributes
    // =========================================

    /// Scan a string literal. `\"` is kept verbatim; unescaping happens later.
    fn scan_string(&mut self, start: Position) -> Result<Token<'ast>, LexError> {
        self.cursor.advance();
        let content_start = self.cursor.offset();

        loop {
            match self.cursor.peek() {
                None | Some('\n') => {
                    return Err(LexError::UnterminatedString {
                        span: self.span_from(start),
                    });
                }
                Some('\\') => {
                    self.cursor.advance();
                    if self.cursor.check(|c| c != '\n') {
                        self.cursor.advance();
                    }
                }
                Some('"') => {
                    let content = self.cursor.slice_from(content_start);
                    self.cursor.advance();
                    return Ok(self.make_token(TokenKind::StringLiteral, start, Some(content)));
                }
                Some(_) => {
                    self.cursor.advance();
                }
            }
        }
    }

    fn scan_attribute(&mut self, start: Position) -> Result<Token<'ast>, LexError> {
        self.cursor.advance();
        if !self.cursor.check(is_ident_start) {
            return Err(LexError::InvalidAttribute {
                span: self.span_from(start),
            });
        }

        let name_start = self.cursor.offset();
        self.cursor.eat_while(is_ident_continue);
        let name = self.cursor.slice_from(name_start);
        Ok(self.make_token(TokenKind::Attribute, start, Some(name)))
    }

    // =========================================
    // Scanning: Numbers
    // =========================================

    /// Scan a number literal, keeping its source text unparsed.
    fn scan_number(&mut self, start: Position) -> Result<Token<'ast>, LexError> {
        let start_offset = self.cursor.offset();

        if self.cursor.check_str("0x") || self.cursor.check_str("0X") {
            self.cursor.advance();
            self.cursor.advance();

            let mut has_digits = false;
            while let Some(c) = self.cursor.peek() {
                if c.is_ascii_hexdigit() {
                    has_digits = true;
                } else if c != '_' {
                    break;
                }
                self.cursor.advance();
            }

            if self.cursor.eat('.') {
                self.cursor.eat_while(|c| is_ident_continue(c) || c == '.');
                return Err(self.invalid_number(start, "'.' in hexadecimal literal"));
            }
            if !has_digits {
                return Err(self.invalid_number(start, "expected digits after '0x'"));
            }
        } else {
            let mut seen_dot = false;
            while let Some(c) = self.cursor.peek() {
                match c {
                    '0'..='9' | '_' => {}
                    '.' if !seen_dot => seen_dot = true,
                    '.' => {
                        self.cursor.eat_while(|c| is_ident_continue(c) || c == '.');
                        return Err(self.invalid_number(start, "more than one '.' in number"));
                    }
                    _ => break,
                }
                self.cursor.advance();
            }
        }

        if self.cursor.check(is_ident_start) {
            self.cursor.eat_while(is_ident_continue);
            return Err(self.invalid_number(start, "unexpected character in number"));
        }

        let text = self.cursor.slice_from(start_offset);
        Ok(self.make_token(TokenKind::NumberLiteral, start, Some(text)))
    }

    fn invalid_number(&self, start: Position, detail: &str) -> LexError {
        LexError::InvalidNumber {
            span: self.span_from(start),
            detail: detail.to_string(),
        }
    }

    // =========================================
    // Scanning: Identifiers and keywords
    // =========================================

    fn scan_identifier(&mut self, start: Position) -> Token<'ast> {
        let start_offset = self.cursor.offset();
        // Keywords are all lowercase; anything else rules the table out early.
        let mut maybe_keyword = true;
        while let Some(c) = self.cursor.peek() {
            if !is_ident_continue(c) {
                break;
            }
            maybe_keyword &= c.is_ascii_lowercase();
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(start_offset);
        let keyword = if maybe_keyword { lookup_keyword(text) } else { None };
        match keyword {
            Some(keyword) => self.make_token(keyword, start, None),
            None => self.make_token(TokenKind::Identifier, start, Some(text)),
        }
    }

    // =========================================
    // Scanning: Operators
    // =========================================

    /// Scan an operator or bracket, preferring the two-character form.
    fn scan_operator(&mut self, start: Position) -> Result<Token<'ast>, LexError> {
        let Some(c) = self.cursor.advance() else {
            return Ok(self.make_token(TokenKind::Eof, start, None));
        };
        let next = self.cursor.peek();

        let kind = match (c, next) {
            ('(', _) => TokenKind::LeftParen,
            (')', _) => TokenKind::RightParen,
            ('[', _) => TokenKind::LeftBracket,
            (']', _) => TokenKind::RightBracket,
            ('{', _) => TokenKind::LeftBrace,
            ('}', _) => TokenKind::RightBrace,
            (',', _) => TokenKind::Comma,
            ('?', _) => TokenKind::Question,
            (':', _) => TokenKind::Colon,
            ('=', _) => TokenKind::Equal,

            ('+', Some('=')) => self.second_char(TokenKind::PlusEqual),
            ('+', _) => TokenKind::Plus,

            ('-', Some('=')) => self.second_char(TokenKind::MinusEqual),
            ('-', Some('>')) => self.second_char(TokenKind::Arrow),
            ('-', _) => TokenKind::Minus,

            ('*', Some('=')) => self.second_char(TokenKind::StarEqual),
            ('*', _) => TokenKind::Star,

            ('/', Some('=')) => self.second_char(TokenKind::SlashEqual),
            ('/', _) => TokenKind::Slash,

            _ => {
                return Err(LexError::UnexpectedChar {
                    ch: c,
                    span: self.span_from(start),
                });
            }
        };

        Ok(self.make_token(kind, start, None))
    }

    /// Consume the second character of a two-character operator.
    fn second_char(&mut self, kind: TokenKind) -> TokenKind {
        self.cursor.advance();
        kind
    }
}

/// Yields tokens up to, but not including, the end of input.
impl<'src, 'ast> Iterator for Lexer<'src, 'ast> {
    type Item = Result<Token<'ast>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(token) if token.kind == TokenKind::Eof => None,
            other => Some(other),
        }
    }
}
