use seam_core::Position;

/// Character-level reader over source text.
///
/// Tracks the absolute byte offset, the current line, and the offset at which
/// that line began; the column is derived from the last two.
pub struct Cursor<'src> {
    source: &'src str,
    /// Unread remainder of `source`.
    rest: &'src str,
    offset: u32,
    line: u32,
    line_start: u32,
}

impl<'src> Cursor<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            rest: source,
            offset: 0,
            line: 1,
            line_start: 0,
        }
    }

    #[inline]
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// The current position (1-indexed line and column).
    #[inline]
    pub fn position(&self) -> Position {
        Position::new(self.line, self.offset - self.line_start + 1, self.offset)
    }

    /// Peek at the current character without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        let first = *self.rest.as_bytes().first()?;
        if first.is_ascii() {
            Some(first as char)
        } else {
            self.rest.chars().next()
        }
    }

    #[inline]
    pub fn check(&self, f: impl Fn(char) -> bool) -> bool {
        self.peek().is_some_and(f)
    }

    /// Check if the upcoming text starts with `s`.
    #[inline]
    pub fn check_str(&self, s: &str) -> bool {
        self.rest.starts_with(s)
    }

    /// Consume one character, keeping line bookkeeping current.
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        let len = ch.len_utf8();
        self.rest = &self.rest[len..];
        self.offset += len as u32;

        if ch == '\n' {
            self.line += 1;
            self.line_start = self.offset;
        }

        Some(ch)
    }

    /// Consume `s` if the remaining text starts with it.
    pub fn eat_str(&mut self, s: &str) -> bool {
        if !self.check_str(s) {
            return false;
        }
        for _ in s.chars() {
            self.advance();
        }
        true
    }

    /// Consume the current character if it equals `expected`.
    #[inline]
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume characters while the predicate holds.
    pub fn eat_while(&mut self, f: impl Fn(char) -> bool) {
        while self.check(&f) {
            self.advance();
        }
    }

    /// Source text from `start` to the current offset.
    #[inline]
    pub fn slice_from(&self, start: u32) -> &'src str {
        &self.source[start as usize..self.offset as usize]
    }
}

/// Letters and `_` start identifiers.
#[inline]
pub fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

#[inline]
pub fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
