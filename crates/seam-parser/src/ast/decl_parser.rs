//! Restricted statements: functions, externs and type definitions.

use seam_core::{ParseError, Position, Span};

use super::decl::{AliasDef, ClassDef, FunctionDecl, RestrictedBlock, RestrictedStmt, TypeDef};
use super::parser::Parser;
use super::stmt::Block;
use super::types::{TypeName, TypeSlot, Var};
use crate::lexer::TokenKind;

/// Everything between `fn` and the body.
struct Signature<'ast> {
    name: &'ast str,
    params: Vec<Var<'ast>>,
    return_type: TypeSlot<'ast>,
    attributes: Vec<&'ast str>,
}

impl<'src, 'ast> Parser<'src, 'ast> {
    /// Parse restricted statements until end of input or a closing brace.
    pub fn parse_restricted_block(&mut self) -> RestrictedBlock<'ast> {
        let start = self.current.span.start;
        let mut stmts = Vec::new();

        while !self.check(TokenKind::Eof)
            && !self.check(TokenKind::RightBrace)
            && !self.should_stop()
        {
            match self.parse_restricted_stmt() {
                Ok(stmt) => stmts.push(stmt),
                Err(error) => self.recover(error),
            }
        }

        RestrictedBlock {
            span: self.span_from(start),
            stmts,
        }
    }

    pub fn parse_restricted_stmt(&mut self) -> Result<RestrictedStmt<'ast>, ParseError> {
        match self.current.kind {
            TokenKind::Fn => Ok(RestrictedStmt::Function(self.parse_function()?)),
            TokenKind::Extern => Ok(RestrictedStmt::Function(self.parse_extern()?)),
            TokenKind::Type => Ok(RestrictedStmt::TypeDef(self.parse_type_definition()?)),
            _ => Err(self.unexpected()),
        }
    }

    /// `fn name(params) [-> type] @attr* { body }`
    pub fn parse_function(&mut self) -> Result<FunctionDecl<'ast>, ParseError> {
        let start = self.expect(TokenKind::Fn)?.span.start;
        let signature = self.parse_signature()?;
        let body = self.parse_block()?;
        Ok(self.function_decl(start, signature, Some(body)))
    }

    /// `extern fn name(params) [-> type] @attr*`
    pub fn parse_extern(&mut self) -> Result<FunctionDecl<'ast>, ParseError> {
        let start = self.expect(TokenKind::Extern)?.span.start;
        self.expect(TokenKind::Fn)?;
        let signature = self.parse_signature()?;
        Ok(self.function_decl(start, signature, None))
    }

    fn function_decl(
        &self,
        start: Position,
        signature: Signature<'ast>,
        body: Option<Block<'ast>>,
    ) -> FunctionDecl<'ast> {
        FunctionDecl {
            span: self.span_from(start),
            name: signature.name,
            params: signature.params,
            return_type: signature.return_type,
            attributes: signature.attributes,
            body,
            symbol: None,
        }
    }

    fn parse_signature(&mut self) -> Result<Signature<'ast>, ParseError> {
        let name = self.expect(TokenKind::Identifier)?.text();

        self.expect(TokenKind::LeftParen)?;
        let params = self.parse_var_list()?;
        self.expect(TokenKind::RightParen)?;

        let return_type = if self.eat(TokenKind::Arrow).is_some() {
            self.parse_type()?
        } else {
            TypeName::new("void", false, Span::point(self.prev_end))
        };

        let mut attributes = Vec::new();
        while let Some(attr) = self.eat(TokenKind::Attribute) {
            let attr = attr.text();
            if !attributes.contains(&attr) {
                attributes.push(attr);
            }
        }

        Ok(Signature {
            name,
            params,
            return_type: TypeSlot::Unresolved(return_type),
            attributes,
        })
    }

    /// `type name = target` or `type name { ... }`
    pub fn parse_type_definition(&mut self) -> Result<TypeDef<'ast>, ParseError> {
        let start = self.expect(TokenKind::Type)?.span.start;
        let name = self.expect(TokenKind::Identifier)?.text();

        if self.eat(TokenKind::Equal).is_some() {
            let target = self.parse_type()?;
            return Ok(TypeDef::Alias(AliasDef {
                span: self.span_from(start),
                name,
                target: TypeSlot::Unresolved(target),
            }));
        }

        if !self.check(TokenKind::LeftBrace) {
            return Err(ParseError::expected_token("'=' or '{'", self.current, self.current.span));
        }

        let (fields, body) = self.parse_class_body()?;
        Ok(TypeDef::Class(ClassDef {
            span: self.span_from(start),
            name,
            fields,
            body,
        }))
    }

    /// `{ (field | restricted_stmt)* }`: an identifier starts a field, a
    /// keyword starts a nested declaration.
    fn parse_class_body(&mut self) -> Result<(Vec<Var<'ast>>, RestrictedBlock<'ast>), ParseError> {
        self.expect(TokenKind::LeftBrace)?;
        let body_start = self.current.span.start;
        let mut fields = Vec::new();
        let mut stmts = Vec::new();

        while !self.check(TokenKind::RightBrace)
            && !self.check(TokenKind::Eof)
            && !self.should_stop()
        {
            let member = if self.check(TokenKind::Identifier) {
                self.parse_var().map(|field| fields.push(field))
            } else {
                self.parse_restricted_stmt().map(|stmt| stmts.push(stmt))
            };
            if let Err(error) = member {
                self.recover(error);
            }
        }

        let body = RestrictedBlock {
            span: self.span_from(body_start),
            stmts,
        };
        if !self.should_stop() {
            self.expect(TokenKind::RightBrace)?;
        }
        Ok((fields, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ParseMode;
    use bumpalo::Bump;
    use seam_core::ParseErrorKind;

    fn parse_ok<'ast>(source: &str, arena: &'ast Bump) -> RestrictedBlock<'ast> {
        Parser::parse(source, arena, ParseMode::Recover).unwrap()
    }

    #[test]
    fn function_with_params_and_return_type() {
        let arena = Bump::new();
        let root = parse_ok("fn add(a: i32, b: i32?) -> i64 {}", &arena);
        let func = root.function("add").unwrap();

        let params: Vec<_> = func
            .params
            .iter()
            .map(|p| (p.name, p.ty.unresolved().map(|t| (t.name, t.optional))))
            .collect();
        assert_eq!(
            params,
            vec![("a", Some(("i32", false))), ("b", Some(("i32", true)))]
        );
        assert_eq!(func.return_type.unresolved().map(|t| t.name), Some("i64"));
        assert!(!func.is_extern());
        assert_eq!(func.symbol, None);
    }

    #[test]
    fn missing_return_type_defaults_to_void() {
        let arena = Bump::new();
        let root = parse_ok("fn main() {}", &arena);
        let ret = root.function("main").unwrap().return_type;
        assert_eq!(ret.unresolved().map(|t| t.name), Some("void"));
    }

    #[test]
    fn attributes_are_collected_once() {
        let arena = Bump::new();
        let root = parse_ok("fn main() @export @constructor @export {}", &arena);
        let func = root.function("main").unwrap();
        assert_eq!(func.attributes, vec!["export", "constructor"]);
        assert!(func.is_constructor());
        assert!(func.is_exported());
    }

    #[test]
    fn extern_has_no_body() {
        let arena = Bump::new();
        let root = parse_ok("extern fn print(text: string) -> void\nfn main() {}", &arena);
        assert_eq!(root.stmts.len(), 2);
        let print = root.function("print").unwrap();
        assert!(print.is_extern());
        assert_eq!(print.params.len(), 1);
    }

    #[test]
    fn alias_definition() {
        let arena = Bump::new();
        let root = parse_ok("type Id = u64?", &arena);
        let RestrictedStmt::TypeDef(TypeDef::Alias(alias)) = &root.stmts[0] else {
            panic!("expected alias");
        };
        assert_eq!(alias.name, "Id");
        let target = alias.target.unresolved().unwrap();
        assert_eq!((target.name, target.optional), ("u64", true));
    }

    #[test]
    fn class_with_fields_and_nested_declarations() {
        let arena = Bump::new();
        let source = concat!(
            "type Point {\n",
            "  x: f64\n",
            "  y: f64\n",
            "  fn len() -> f64 { return x }\n",
            "  type Inner = i32\n",
            "}",
        );
        let root = parse_ok(source, &arena);
        let RestrictedStmt::TypeDef(TypeDef::Class(class)) = &root.stmts[0] else {
            panic!("expected class");
        };
        assert_eq!(class.name, "Point");
        let fields: Vec<_> = class.fields.iter().map(|f| f.name).collect();
        assert_eq!(fields, vec!["x", "y"]);
        assert_eq!(class.body.stmts.len(), 2);
        assert!(class.body.function("len").is_some());
        assert_eq!(class.span.start.line, 1);
        assert_eq!(class.span.end.line, 6);
    }

    #[test]
    fn identifier_at_module_scope_is_unexpected() {
        let arena = Bump::new();
        let errors = Parser::parse("foo()", &arena, ParseMode::Recover).unwrap_err();
        let error = errors.first().unwrap();
        assert_eq!(error.kind, ParseErrorKind::UnexpectedToken);
        assert_eq!(error.message, "unexpected identifier 'foo'");
    }

    #[test]
    fn type_needs_equals_or_brace() {
        let arena = Bump::new();
        let errors = Parser::parse("type A i32", &arena, ParseMode::Recover).unwrap_err();
        assert_eq!(
            errors.first().unwrap().message,
            "expected '=' or '{', got identifier 'i32'"
        );
    }

    #[test]
    fn recovery_reports_one_error_per_bad_line() {
        let arena = Bump::new();
        let source = "fn a( {}\nfn b() {}\nfn c(x i32) {}\nfn d() {}";
        let mut parser = Parser::new(source, &arena, ParseMode::Recover);
        let root = parser.parse_module();
        let errors = parser.take_errors();

        assert_eq!(errors.len(), 2);
        let lines: Vec<_> = errors.iter().map(|e| e.span.start.line).collect();
        assert_eq!(lines, vec![1, 3]);
        let names: Vec<_> = root.functions().map(|f| f.name).collect();
        assert_eq!(names, vec!["b", "d"]);
    }

    #[test]
    fn fail_fast_stops_at_first_error() {
        let arena = Bump::new();
        let source = "fn a( {}\nfn b() {}\nfn c(x i32) {}";
        let errors = Parser::parse(source, &arena, ParseMode::FailFast).unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn fail_fast_body_error_reports_once() {
        let arena = Bump::new();
        let source = "fn f() {\n  -> x\n  g()\n}";
        let errors = Parser::parse(source, &arena, ParseMode::FailFast).unwrap_err();
        assert_eq!(errors.len(), 1);
        let error = errors.first().unwrap();
        assert_eq!(error.kind, ParseErrorKind::ExpectedExpression);
        assert_eq!((error.span.start.line, error.span.start.column), (2, 3));

        let nested = "fn f() {\n  {\n    -> x\n  }\n}";
        let errors = Parser::parse(nested, &arena, ParseMode::FailFast).unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn fail_fast_class_body_error_reports_once() {
        let arena = Bump::new();
        let source = "type T {\n  x:\n  fn g() {}\n}";
        let errors = Parser::parse(source, &arena, ParseMode::FailFast).unwrap_err();
        assert_eq!(errors.len(), 1);

        let source = "type T {\n  fn g() { -> }\n}";
        let errors = Parser::parse(source, &arena, ParseMode::FailFast).unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn recovery_inside_class_body_keeps_braces_balanced() {
        let arena = Bump::new();
        let source = "type T {\n  x: \n  y: i32\n}\nfn after() {}";
        let mut parser = Parser::new(source, &arena, ParseMode::Recover);
        let root = parser.parse_module();
        assert_eq!(parser.take_errors().len(), 1);
        assert!(root.function("after").is_some());
    }
}
