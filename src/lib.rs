//! Front end of the Seam compiler.
//!
//! Ties the lexer and parser from `seam-parser` to the semantic passes from
//! `seam-compiler`. [`parse`] turns one unit of source text into a
//! [`CompilationUnit`]: the fully resolved tree plus the type and symbol
//! tables a backend needs.
//!
//! ```
//! use bumpalo::Bump;
//! use seam::{CompileOptions, parse};
//!
//! let arena = Bump::new();
//! let source = concat!(
//!     "fn test() -> bool { return true }\n",
//!     "fn main() -> bool @constructor { return test() }",
//! );
//! let unit = parse(source, &arena, &CompileOptions::default()).unwrap();
//! assert_eq!(unit.root.functions().count(), 2);
//! assert!(unit.symbols.constructor().is_some());
//! ```

mod options;
mod unit;

pub use options::CompileOptions;
pub use unit::{CompilationUnit, compile_file, parse};

pub use seam_compiler::{
    CONSTRUCTOR_SYMBOL, FunctionSymbol, Pass, PassContext, PassManager, SymbolTable,
    TypeDescriptor, TypeTable,
};
pub use seam_core::{
    CompilationError, LexError, ParseError, ParseErrorKind, ParseErrors, Position, PrimitiveKind,
    SeamError, Span, SymbolId, TypeId,
};
pub use seam_parser::{Lexer, ParseMode, Parser, RestrictedBlock, Token, TokenKind, ast};

pub mod prelude {
    pub use crate::options::CompileOptions;
    pub use crate::unit::{CompilationUnit, compile_file, parse};
    pub use seam_compiler::{PassContext, PassManager, SymbolTable, TypeTable};
    pub use seam_core::{CompilationError, ParseErrors, SeamError, Span};
    pub use seam_parser::ParseMode;
}
