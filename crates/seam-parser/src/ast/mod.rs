//! Abstract Syntax Tree for Seam.
//!
//! Nodes own their children; identifier and literal text is borrowed from
//! the arena the lexer copied it into. Later passes rewrite type slots,
//! variable references and literals in place, so nodes are handed to
//! visitors by `&mut`.
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use seam_parser::{ParseMode, Parser};
//!
//! let arena = Bump::new();
//! let source = r#"
//!     type Meters = f64
//!     fn test() -> bool { return true }
//!     fn main() -> bool @constructor { return test() }
//! "#;
//!
//! let root = Parser::parse(source, &arena, ParseMode::Recover).unwrap();
//! assert_eq!(root.stmts.len(), 3);
//! assert!(root.function("main").unwrap().is_constructor());
//! ```

pub mod decl;
pub mod expr;
pub mod stmt;
pub mod types;
pub mod visitor;

mod decl_parser;
mod expr_parser;
mod parser;
mod stmt_parser;
mod type_parser;

pub use decl::*;
pub use expr::*;
pub use parser::{ParseMode, Parser};
pub use stmt::*;
pub use types::*;
pub use visitor::{VisitResult, Visitor, Walk};

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;

    #[test]
    fn parse_empty_module() {
        let arena = Bump::new();
        let root = Parser::parse("", &arena, ParseMode::Recover).unwrap();
        assert!(root.stmts.is_empty());
    }

    #[test]
    fn parse_comment_only_module() {
        let arena = Bump::new();
        let root = Parser::parse("// nothing\n/// here ///", &arena, ParseMode::Recover).unwrap();
        assert!(root.stmts.is_empty());
    }

    #[test]
    fn parse_end_to_end_program() {
        let arena = Bump::new();
        let source = concat!(
            "fn test() -> bool { return true }\n",
            "fn main() -> bool @constructor { return test() }",
        );
        let root = Parser::parse(source, &arena, ParseMode::Recover).unwrap();
        assert_eq!(root.stmts.len(), 2);

        let main = root.function("main").unwrap();
        assert!(main.is_constructor());
        let Some(Stmt::Return(ret)) = main.body.as_ref().and_then(|b| b.stmts.first()) else {
            panic!("expected return statement");
        };
        let Some(Expr::Call(call)) = &ret.value else {
            panic!("expected call");
        };
        assert!(matches!(&call.callee, Expr::Variable(v) if v.var == VarRef::Unresolved("test")));
        assert_eq!(main.span.start.line, 2);
    }

    #[test]
    fn source_buffer_can_be_dropped_after_parsing() {
        let arena = Bump::new();
        let root = {
            let source = String::from("fn keep() {}");
            Parser::parse(&source, &arena, ParseMode::Recover).unwrap()
        };
        assert_eq!(root.function("keep").map(|f| f.name), Some("keep"));
    }

    #[test]
    fn lexical_errors_surface_as_parse_errors() {
        let arena = Bump::new();
        let errors = Parser::parse("fn f() { \"open\n }", &arena, ParseMode::Recover).unwrap_err();
        assert_eq!(
            errors.first().map(|e| e.kind),
            Some(seam_core::ParseErrorKind::Lexical)
        );
    }
}
