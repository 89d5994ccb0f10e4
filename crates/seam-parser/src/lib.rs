//! Lexer, AST and parser for the Seam language.
//!
//! - [`lexer`]: turns source text into positioned tokens
//! - [`ast`]: node definitions, the [`Visitor`](ast::Visitor) trait and the
//!   recursive-descent [`Parser`]
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use seam_parser::{ParseMode, Parser};
//!
//! let arena = Bump::new();
//! match Parser::parse("fn main() @constructor {}", &arena, ParseMode::Recover) {
//!     Ok(root) => println!("parsed {} declarations", root.stmts.len()),
//!     Err(errors) => eprintln!("parse errors: {}", errors),
//! }
//! ```

pub mod ast;
pub mod lexer;

pub use ast::{ParseMode, Parser, RestrictedBlock};
pub use lexer::{Lexer, Token, TokenKind};
