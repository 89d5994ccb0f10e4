//! Statements inside function bodies.

use seam_core::ParseError;

use super::parser::Parser;
use super::stmt::{Block, ReturnStmt, Stmt};
use crate::lexer::TokenKind;

impl<'src, 'ast> Parser<'src, 'ast> {
    /// `{ stmt* }`
    pub fn parse_block(&mut self) -> Result<Block<'ast>, ParseError> {
        let start = self.expect(TokenKind::LeftBrace)?.span.start;
        let mut stmts = Vec::new();

        while !self.check(TokenKind::RightBrace)
            && !self.check(TokenKind::Eof)
            && !self.should_stop()
        {
            match self.parse_stmt() {
                Ok(stmt) => stmts.push(stmt),
                Err(error) => self.recover(error),
            }
        }

        // In fail-fast mode the partial block is discarded with the error
        // already recorded.
        if !self.should_stop() {
            self.expect(TokenKind::RightBrace)?;
        }
        Ok(Block {
            span: self.span_from(start),
            stmts,
        })
    }

    pub fn parse_stmt(&mut self) -> Result<Stmt<'ast>, ParseError> {
        match self.current.kind {
            TokenKind::Return => Ok(Stmt::Return(self.parse_return()?)),
            TokenKind::LeftBrace => Ok(Stmt::Block(self.parse_block()?)),
            _ => Ok(Stmt::Expr(self.parse_expr()?)),
        }
    }

    /// `return [expr]`
    ///
    /// The value is only taken from the same line as `return`, and never
    /// when the next token closes the block.
    pub fn parse_return(&mut self) -> Result<ReturnStmt<'ast>, ParseError> {
        let keyword = self.expect(TokenKind::Return)?;

        let has_value = self.current.line() == keyword.line()
            && !self.check(TokenKind::RightBrace)
            && !self.check(TokenKind::Eof);
        let value = if has_value { Some(self.parse_expr()?) } else { None };

        Ok(ReturnStmt {
            span: self.span_from(keyword.span.start),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expr, Literal, ParseMode, VarRef};
    use bumpalo::Bump;

    fn body<'ast>(source: &str, arena: &'ast Bump) -> Block<'ast> {
        let root = Parser::parse(source, arena, ParseMode::Recover).unwrap();
        let func = root.functions().next().unwrap().clone();
        func.body.unwrap()
    }

    #[test]
    fn empty_block() {
        let arena = Bump::new();
        assert!(body("fn f() {}", &arena).stmts.is_empty());
    }

    #[test]
    fn return_with_value_on_same_line() {
        let arena = Bump::new();
        let block = body("fn f() -> bool { return true }", &arena);
        let Stmt::Return(ret) = &block.stmts[0] else {
            panic!("expected return");
        };
        assert!(matches!(&ret.value, Some(Expr::Literal(lit)) if lit.value == Literal::Bool(true)));
    }

    #[test]
    fn return_before_closing_brace_has_no_value() {
        let arena = Bump::new();
        let block = body("fn f() { return }", &arena);
        assert!(matches!(&block.stmts[0], Stmt::Return(ret) if ret.value.is_none()));
    }

    #[test]
    fn value_on_next_line_is_a_separate_statement() {
        let arena = Bump::new();
        let block = body("fn f() {\n  return\n  g()\n}", &arena);
        assert_eq!(block.stmts.len(), 2);
        assert!(matches!(&block.stmts[0], Stmt::Return(ret) if ret.value.is_none()));
        assert!(matches!(&block.stmts[1], Stmt::Expr(Expr::Call(_))));
    }

    #[test]
    fn expression_statements_and_nested_blocks() {
        let arena = Bump::new();
        let block = body("fn f() {\n  a\n  { b() }\n  \"text\"\n}", &arena);
        assert_eq!(block.stmts.len(), 3);
        assert!(matches!(
            &block.stmts[0],
            Stmt::Expr(Expr::Variable(v)) if v.var == VarRef::Unresolved("a")
        ));
        assert!(matches!(&block.stmts[1], Stmt::Block(inner) if inner.stmts.len() == 1));
        assert!(matches!(&block.stmts[2], Stmt::Expr(Expr::Literal(_))));
    }

    #[test]
    fn bad_statement_is_skipped_and_block_continues() {
        let arena = Bump::new();
        let source = "fn f() {\n  -> oops\n  g()\n}";
        let mut parser = Parser::new(source, &arena, ParseMode::Recover);
        let root = parser.parse_module();
        let errors = parser.take_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().unwrap().span.start.line, 2);

        let block = root.function("f").unwrap().body.as_ref().unwrap();
        assert_eq!(block.stmts.len(), 1);
    }

    #[test]
    fn unclosed_block_is_an_error() {
        let arena = Bump::new();
        let errors = Parser::parse("fn f() { g()", &arena, ParseMode::Recover).unwrap_err();
        assert_eq!(errors.first().unwrap().message, "expected '}', got <eof>");
    }
}
