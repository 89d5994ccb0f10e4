//! Lexical analysis.

mod cursor;
mod lexer;
mod token;

pub use cursor::{Cursor, is_ident_continue, is_ident_start};
pub use lexer::Lexer;
pub use token::{Token, TokenKind, lookup_keyword};
