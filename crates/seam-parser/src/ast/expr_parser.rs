//! Expressions: literals, names, parentheses and call suffixes.

use seam_core::{ParseError, ParseErrorKind};

use super::expr::{CallExpr, Expr, Literal, LiteralExpr, VarRef, VariableExpr};
use super::parser::Parser;
use crate::lexer::TokenKind;

impl<'src, 'ast> Parser<'src, 'ast> {
    /// A primary expression followed by any number of call suffixes.
    ///
    /// A `(` only continues the expression when it is on the line the
    /// expression started on; otherwise it begins the next statement.
    pub fn parse_expr(&mut self) -> Result<Expr<'ast>, ParseError> {
        let start = self.current.span.start;
        let mut expr = self.parse_primary()?;

        while self.check(TokenKind::LeftParen) && self.current.line() == start.line {
            self.advance();
            let args = self.parse_expr_list()?;
            self.expect(TokenKind::RightParen)?;
            expr = Expr::Call(Box::new(CallExpr {
                span: self.span_from(start),
                callee: expr,
                args,
            }));
        }

        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expr<'ast>, ParseError> {
        let token = self.current;
        let literal = match token.kind {
            TokenKind::True => Literal::Bool(true),
            TokenKind::False => Literal::Bool(false),
            TokenKind::StringLiteral => Literal::String(token.text()),
            TokenKind::NumberLiteral => Literal::Number(token.text()),
            TokenKind::Identifier => {
                self.advance();
                return Ok(Expr::Variable(VariableExpr {
                    span: token.span,
                    var: VarRef::Unresolved(token.text()),
                }));
            }
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RightParen)?;
                return Ok(inner);
            }
            _ => {
                return Err(ParseError::new(
                    ParseErrorKind::ExpectedExpression,
                    token.span,
                    format!("expected expression, got {token}"),
                ));
            }
        };

        self.advance();
        Ok(Expr::Literal(LiteralExpr {
            span: token.span,
            value: literal,
        }))
    }

    /// Comma-separated expressions, possibly empty, up to a `)`.
    fn parse_expr_list(&mut self) -> Result<Vec<Expr<'ast>>, ParseError> {
        let mut exprs = Vec::new();
        if self.check(TokenKind::RightParen) {
            return Ok(exprs);
        }

        loop {
            exprs.push(self.parse_expr()?);
            if self.eat(TokenKind::Comma).is_none() {
                return Ok(exprs);
            }
        }
    }
}
