//! Visitor pattern for traversing and rewriting the AST.
//!
//! Each node kind has a `visit_*` method. A visitor that does not override a
//! kind falls back to the method for that kind's category, and every category
//! falls back to [`Visitor::visit_node`], which continues into children:
//!
//! ```text
//! visit_literal / visit_call / visit_variable       -> visit_expr
//! visit_expr_stmt / visit_block / visit_return      -> visit_stmt
//! visit_alias / visit_class                         -> visit_type_definition
//! visit_type_definition / visit_function /
//!   visit_extern / visit_restricted_block           -> visit_restricted_stmt
//! visit_expr / visit_stmt / visit_restricted_stmt   -> visit_node
//! ```
//!
//! The `accept_*` functions dispatch a node to the matching `visit_*` method
//! and descend into its children when that returns [`Walk::Children`]. The
//! `walk_*` functions visit the children of a composite node directly, so a
//! visitor can recurse on its own terms (e.g. to bracket the children with
//! scope bookkeeping) and then return [`Walk::Skip`].
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use seam_parser::ast::visitor::{accept_restricted_block, VisitResult, Visitor, Walk};
//! use seam_parser::ast::CallExpr;
//! use seam_parser::{ParseMode, Parser};
//!
//! #[derive(Default)]
//! struct CallCounter(usize);
//!
//! impl<'ast> Visitor<'ast> for CallCounter {
//!     fn visit_call(&mut self, _call: &mut CallExpr<'ast>) -> VisitResult {
//!         self.0 += 1;
//!         Ok(Walk::Children)
//!     }
//! }
//!
//! let arena = Bump::new();
//! let mut root = Parser::parse("fn main() { f(g(1)) }", &arena, ParseMode::Recover).unwrap();
//! let mut counter = CallCounter::default();
//! accept_restricted_block(&mut counter, &mut root).unwrap();
//! assert_eq!(counter.0, 2);
//! ```

use seam_core::{CompilationError, Span};

use super::decl::{AliasDef, ClassDef, FunctionDecl, RestrictedBlock, RestrictedStmt, TypeDef};
use super::expr::{CallExpr, Expr, LiteralExpr, VariableExpr};
use super::stmt::{Block, ReturnStmt, Stmt};

/// Whether traversal continues into a node's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    Children,
    Skip,
}

pub type VisitResult = Result<Walk, CompilationError>;

pub trait Visitor<'ast> {
    // === Categories ===

    fn visit_node(&mut self, _span: Span) -> VisitResult {
        Ok(Walk::Children)
    }

    fn visit_expr(&mut self, span: Span) -> VisitResult {
        self.visit_node(span)
    }

    fn visit_stmt(&mut self, span: Span) -> VisitResult {
        self.visit_node(span)
    }

    fn visit_restricted_stmt(&mut self, span: Span) -> VisitResult {
        self.visit_node(span)
    }

    fn visit_type_definition(&mut self, span: Span) -> VisitResult {
        self.visit_restricted_stmt(span)
    }

    // === Expressions ===

    fn visit_literal(&mut self, lit: &mut LiteralExpr<'ast>) -> VisitResult {
        self.visit_expr(lit.span)
    }

    fn visit_call(&mut self, call: &mut CallExpr<'ast>) -> VisitResult {
        self.visit_expr(call.span)
    }

    fn visit_variable(&mut self, var: &mut VariableExpr<'ast>) -> VisitResult {
        self.visit_expr(var.span)
    }

    // === Statements ===

    fn visit_expr_stmt(&mut self, expr: &mut Expr<'ast>) -> VisitResult {
        self.visit_stmt(expr.span())
    }

    fn visit_block(&mut self, block: &mut Block<'ast>) -> VisitResult {
        self.visit_stmt(block.span)
    }

    fn visit_return(&mut self, ret: &mut ReturnStmt<'ast>) -> VisitResult {
        self.visit_stmt(ret.span)
    }

    // === Restricted statements ===

    fn visit_restricted_block(&mut self, block: &mut RestrictedBlock<'ast>) -> VisitResult {
        self.visit_restricted_stmt(block.span)
    }

    fn visit_function(&mut self, func: &mut FunctionDecl<'ast>) -> VisitResult {
        self.visit_restricted_stmt(func.span)
    }

    fn visit_extern(&mut self, func: &mut FunctionDecl<'ast>) -> VisitResult {
        self.visit_restricted_stmt(func.span)
    }

    fn visit_alias(&mut self, alias: &mut AliasDef<'ast>) -> VisitResult {
        self.visit_type_definition(alias.span)
    }

    fn visit_class(&mut self, class: &mut ClassDef<'ast>) -> VisitResult {
        self.visit_type_definition(class.span)
    }
}

// ============================================================================
// Dispatch
// ============================================================================

pub fn accept_expr<'ast, V>(v: &mut V, expr: &mut Expr<'ast>) -> Result<(), CompilationError>
where
    V: Visitor<'ast> + ?Sized,
{
    let walk = match expr {
        Expr::Literal(lit) => v.visit_literal(lit)?,
        Expr::Call(call) => v.visit_call(call)?,
        Expr::Variable(var) => v.visit_variable(var)?,
    };
    if walk == Walk::Children {
        walk_expr(v, expr)?;
    }
    Ok(())
}

pub fn accept_stmt<'ast, V>(v: &mut V, stmt: &mut Stmt<'ast>) -> Result<(), CompilationError>
where
    V: Visitor<'ast> + ?Sized,
{
    match stmt {
        Stmt::Expr(expr) => {
            if v.visit_expr_stmt(expr)? == Walk::Children {
                accept_expr(v, expr)?;
            }
            Ok(())
        }
        Stmt::Block(block) => accept_block(v, block),
        Stmt::Return(ret) => {
            if v.visit_return(ret)? == Walk::Children {
                walk_return(v, ret)?;
            }
            Ok(())
        }
    }
}

pub fn accept_block<'ast, V>(v: &mut V, block: &mut Block<'ast>) -> Result<(), CompilationError>
where
    V: Visitor<'ast> + ?Sized,
{
    if v.visit_block(block)? == Walk::Children {
        walk_block(v, block)?;
    }
    Ok(())
}

pub fn accept_restricted_block<'ast, V>(
    v: &mut V,
    block: &mut RestrictedBlock<'ast>,
) -> Result<(), CompilationError>
where
    V: Visitor<'ast> + ?Sized,
{
    if v.visit_restricted_block(block)? == Walk::Children {
        walk_restricted_block(v, block)?;
    }
    Ok(())
}

pub fn accept_restricted_stmt<'ast, V>(
    v: &mut V,
    stmt: &mut RestrictedStmt<'ast>,
) -> Result<(), CompilationError>
where
    V: Visitor<'ast> + ?Sized,
{
    match stmt {
        RestrictedStmt::Function(func) => {
            let walk = if func.is_extern() {
                v.visit_extern(func)?
            } else {
                v.visit_function(func)?
            };
            if walk == Walk::Children {
                walk_function(v, func)?;
            }
        }
        RestrictedStmt::TypeDef(TypeDef::Alias(alias)) => {
            v.visit_alias(alias)?;
        }
        RestrictedStmt::TypeDef(TypeDef::Class(class)) => {
            if v.visit_class(class)? == Walk::Children {
                walk_class(v, class)?;
            }
        }
    }
    Ok(())
}

// ============================================================================
// Children
// ============================================================================

/// Visit the callee and arguments of a call. Literals and variables have no children.
pub fn walk_expr<'ast, V>(v: &mut V, expr: &mut Expr<'ast>) -> Result<(), CompilationError>
where
    V: Visitor<'ast> + ?Sized,
{
    if let Expr::Call(call) = expr {
        walk_call(v, call)?;
    }
    Ok(())
}

pub fn walk_call<'ast, V>(v: &mut V, call: &mut CallExpr<'ast>) -> Result<(), CompilationError>
where
    V: Visitor<'ast> + ?Sized,
{
    accept_expr(v, &mut call.callee)?;
    for arg in &mut call.args {
        accept_expr(v, arg)?;
    }
    Ok(())
}

pub fn walk_block<'ast, V>(v: &mut V, block: &mut Block<'ast>) -> Result<(), CompilationError>
where
    V: Visitor<'ast> + ?Sized,
{
    for stmt in &mut block.stmts {
        accept_stmt(v, stmt)?;
    }
    Ok(())
}

pub fn walk_return<'ast, V>(v: &mut V, ret: &mut ReturnStmt<'ast>) -> Result<(), CompilationError>
where
    V: Visitor<'ast> + ?Sized,
{
    if let Some(value) = &mut ret.value {
        accept_expr(v, value)?;
    }
    Ok(())
}

pub fn walk_restricted_block<'ast, V>(
    v: &mut V,
    block: &mut RestrictedBlock<'ast>,
) -> Result<(), CompilationError>
where
    V: Visitor<'ast> + ?Sized,
{
    for stmt in &mut block.stmts {
        accept_restricted_stmt(v, stmt)?;
    }
    Ok(())
}

/// Visit a function's body, if it has one.
pub fn walk_function<'ast, V>(
    v: &mut V,
    func: &mut FunctionDecl<'ast>,
) -> Result<(), CompilationError>
where
    V: Visitor<'ast> + ?Sized,
{
    if let Some(body) = &mut func.body {
        accept_block(v, body)?;
    }
    Ok(())
}

/// Visit the nested declarations of a class body.
pub fn walk_class<'ast, V>(v: &mut V, class: &mut ClassDef<'ast>) -> Result<(), CompilationError>
where
    V: Visitor<'ast> + ?Sized,
{
    walk_restricted_block(v, &mut class.body)
}
