//! Semantic analysis for seam.
//!
//! Takes the tree produced by `seam-parser` and resolves it in place:
//!
//! - [`types`]: the type table, seeded with the built-in primitives
//! - [`symbols`]: the function symbol table and name mangling
//! - [`passes`]: the individual passes and the [`PassManager`] that runs them
//!
//! ```
//! use bumpalo::Bump;
//! use seam_compiler::{PassContext, PassManager};
//! use seam_parser::{ParseMode, Parser};
//!
//! let arena = Bump::new();
//! let source = "fn test() -> bool { return true }\nfn main() @constructor { test() }";
//! let mut root = Parser::parse(source, &arena, ParseMode::Recover).unwrap();
//!
//! let mut ctx = PassContext::new();
//! PassManager::default_pipeline().run(&mut root, &mut ctx).unwrap();
//! assert!(ctx.symbols.constructor().is_some());
//! ```

pub mod context;
pub mod passes;
pub mod symbols;
pub mod types;

pub use context::PassContext;
pub use passes::{Pass, PassManager};
pub use symbols::{CONSTRUCTOR_SYMBOL, FunctionSymbol, SymbolTable};
pub use types::{TypeDescriptor, TypeTable};
