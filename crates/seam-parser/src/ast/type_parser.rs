//! Type annotations and typed variables.

use seam_core::ParseError;

use super::parser::Parser;
use super::types::{TypeName, TypeSlot, Var};
use crate::lexer::TokenKind;

impl<'src, 'ast> Parser<'src, 'ast> {
    /// `identifier ['?']`
    pub fn parse_type(&mut self) -> Result<TypeName<'ast>, ParseError> {
        let name = self.expect(TokenKind::Identifier)?;
        let optional = self.eat(TokenKind::Question).is_some();
        Ok(TypeName::new(name.text(), optional, self.span_from(name.span.start)))
    }

    /// `identifier ':' type`
    pub fn parse_var(&mut self) -> Result<Var<'ast>, ParseError> {
        let name = self.expect(TokenKind::Identifier)?;
        self.expect(TokenKind::Colon)?;
        let ty = self.parse_type()?;
        Ok(Var {
            span: self.span_from(name.span.start),
            name: name.text(),
            ty: TypeSlot::Unresolved(ty),
        })
    }

    /// Comma-separated variables, possibly empty, up to a `)`.
    pub fn parse_var_list(&mut self) -> Result<Vec<Var<'ast>>, ParseError> {
        let mut vars = Vec::new();
        if self.check(TokenKind::RightParen) {
            return Ok(vars);
        }

        loop {
            vars.push(self.parse_var()?);
            if self.eat(TokenKind::Comma).is_none() {
                return Ok(vars);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ParseMode;
    use bumpalo::Bump;

    #[test]
    fn optional_type() {
        let arena = Bump::new();
        let mut parser = Parser::new("string?", &arena, ParseMode::Recover);
        let ty = parser.parse_type().unwrap();
        assert_eq!(ty.name, "string");
        assert!(ty.optional);
        assert_eq!(ty.span.len(), 7);
    }

    #[test]
    fn var_list() {
        let arena = Bump::new();
        let mut parser = Parser::new("a: i8, b: Point?)", &arena, ParseMode::Recover);
        let vars = parser.parse_var_list().unwrap();
        let names: Vec<_> = vars.iter().map(|v| v.name).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(parser.check(TokenKind::RightParen));
    }

    #[test]
    fn empty_var_list() {
        let arena = Bump::new();
        let mut parser = Parser::new(")", &arena, ParseMode::Recover);
        assert!(parser.parse_var_list().unwrap().is_empty());
    }

    #[test]
    fn var_without_colon() {
        let arena = Bump::new();
        let mut parser = Parser::new("a i32", &arena, ParseMode::Recover);
        let error = parser.parse_var().unwrap_err();
        assert_eq!(error.message, "expected ':', got identifier 'i32'");
    }

    #[test]
    fn keyword_is_not_a_type() {
        let arena = Bump::new();
        let mut parser = Parser::new("fn", &arena, ParseMode::Recover);
        let error = parser.parse_type().unwrap_err();
        assert_eq!(error.message, "expected <identifier>, got 'fn'");
    }
}
