//! Statements allowed inside function bodies.

use seam_core::Span;

use super::expr::Expr;

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt<'ast> {
    Expr(Expr<'ast>),
    Block(Block<'ast>),
    Return(ReturnStmt<'ast>),
}

impl<'ast> Stmt<'ast> {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Expr(expr) => expr.span(),
            Stmt::Block(block) => block.span,
            Stmt::Return(ret) => ret.span,
        }
    }
}

/// `{ stmt* }`
#[derive(Debug, Clone, PartialEq)]
pub struct Block<'ast> {
    pub span: Span,
    pub stmts: Vec<Stmt<'ast>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt<'ast> {
    pub span: Span,
    pub value: Option<Expr<'ast>>,
}
