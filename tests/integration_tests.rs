//! End-to-end tests: source text through parsing and every semantic pass.


use bumpalo::Bump;
use seam::ast::{Expr, Literal, RestrictedStmt, Stmt, TypeDef, VarRef};
use seam::prelude::*;
use seam::{CONSTRUCTOR_SYMBOL, Lexer, Position, PrimitiveKind, TypeDescriptor};
use test_harness::{TestHarness, UnresolvedCounter};

fn call_args<'a, 'ast>(stmt: &'a Stmt<'ast>) -> &'a [Expr<'ast>] {
    match stmt {
        Stmt::Expr(Expr::Call(call)) => &call.args,
        other => panic!("expected call statement, got {other:?}"),
    }
}

fn literal<'ast>(expr: &Expr<'ast>) -> Literal<'ast> {
    match expr {
        Expr::Literal(lit) => lit.value,
        other => panic!("expected literal, got {other:?}"),
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_end_to_end() {
    let harness = TestHarness::new();
    let arena = Bump::new();
    let unit = harness.compile_ok("end_to_end.sm", &arena);

    assert_eq!(unit.root.stmts.len(), 2);
    let test = unit.root.function("test").unwrap();
    let main = unit.root.function("main").unwrap();

    let bool_id = unit.types.primitive(PrimitiveKind::Bool).unwrap();
    let test_return = test.return_type.resolved().unwrap();
    assert_eq!(test_return.id, bool_id);
    assert_eq!(
        unit.types.get(test_return.id),
        Some(&TypeDescriptor::Primitive(PrimitiveKind::Bool))
    );

    let body = main.body.as_ref().unwrap();
    let Stmt::Return(ret) = &body.stmts[0] else {
        panic!("expected return in main");
    };
    let Some(Expr::Call(call)) = &ret.value else {
        panic!("expected call in return");
    };
    let Expr::Variable(callee) = &call.callee else {
        panic!("expected variable callee");
    };
    let VarRef::Function(bound) = callee.var else {
        panic!("callee should be bound to a function");
    };
    assert_eq!(bound.name, "test");
    assert_eq!(Some(bound.symbol), test.symbol);

    let constructors: Vec<_> = unit.symbols.iter().filter(|s| s.is_constructor).collect();
    assert_eq!(constructors.len(), 1);
    assert_eq!(constructors[0].mangled, CONSTRUCTOR_SYMBOL);
    assert_eq!(Some(constructors[0].id), main.symbol);
}

#[test]
fn test_unknown_type() {
    let harness = TestHarness::new();
    let error = harness.compile_err("unknown_type.sm");

    let SeamError::Compilation(CompilationError::InvalidType { name, span }) = &error else {
        panic!("expected invalid type, got {error:?}");
    };
    assert_eq!(name, "unknown_type");
    assert_eq!(span.start, Position::new(1, 1, 0));

    let rendered = error.display_with_source(&harness.source("unknown_type.sm"));
    assert!(rendered.starts_with("error at 1:1:"));
    assert!(rendered.contains("'unknown_type'"));
    assert!(rendered.contains("fn main() -> unknown_type {}"));
}

#[test]
fn test_nested_symbol_mangling() {
    let harness = TestHarness::new();
    let arena = Bump::new();
    let unit = harness.compile_ok("nested_symbols.sm", &arena);

    let top = unit.symbols.lookup("foo").unwrap();
    let nested = unit.symbols.lookup("T.foo").unwrap();
    assert_ne!(top, nested);

    let RestrictedStmt::TypeDef(TypeDef::Class(class)) = &unit.root.stmts[1] else {
        panic!("expected class T");
    };
    assert_eq!(class.body.function("foo").unwrap().symbol, Some(nested));
    assert_eq!(unit.root.function("foo").unwrap().symbol, Some(top));
}

#[test]
fn test_duplicate_constructor() {
    let harness = TestHarness::new();
    let error = harness.compile_err("duplicate_constructor.sm");
    assert!(
        matches!(
            error,
            SeamError::Compilation(CompilationError::DuplicateConstructor { span })
                if span.start.line == 2
        ),
        "got {error:?}"
    );
}

#[test]
fn test_redefine_type_points_at_second_definition() {
    let harness = TestHarness::new();
    let error = harness.compile_err("redefine_type.sm");

    let SeamError::Compilation(CompilationError::RedefinedType { name, span }) = error else {
        panic!("expected redefined type, got {error:?}");
    };
    assert_eq!(name, "A");
    assert_eq!((span.start.line, span.start.column), (2, 1));
}

#[test]
fn test_alias_resolution_is_idempotent() {
    let harness = TestHarness::new();
    let arena = Bump::new();
    let unit = harness.compile_ok("aliases.sm", &arena);

    let param_type = |name: &str| {
        let func = unit.root.function(name).unwrap();
        func.params[0].ty.resolved().unwrap().id
    };
    let through_a = param_type("take_a");
    let through_b = param_type("take_b");

    assert_ne!(through_a, through_b);
    assert_eq!(unit.types.underlying(through_a), unit.types.underlying(through_b));
    assert_eq!(unit.types.underlying_primitive(through_b), Some(PrimitiveKind::I32));
}

// ============================================================================
// Whole programs
// ============================================================================

#[test]
fn test_program_resolves_completely() {
    let harness = TestHarness::new();
    let arena = Bump::new();
    let mut unit = harness.compile_ok("program.sm", &arena);

    let counts = UnresolvedCounter::count(&mut unit.root);
    assert!(counts.is_clean(), "unresolved nodes left: {counts:?}");
    assert_eq!(counts.variables_seen, 6);

    for name in ["Byte", "Count", "Vec2", "Particle", "Id"] {
        assert!(unit.types.lookup(name).is_some(), "type {name} missing");
    }
    for symbol in [
        "Vec2.length",
        "Particle.spawn",
        "puts",
        "put_byte",
        "put_wide",
        "greet",
        "answer",
    ] {
        assert!(unit.symbols.lookup(symbol).is_some(), "symbol {symbol} missing");
    }

    let main = unit.symbols.constructor().unwrap();
    assert_eq!(main.name, "main");
    assert!(main.is_exported);
}

#[test]
fn test_program_literals_are_narrowed() {
    let harness = TestHarness::new();
    let arena = Bump::new();
    let unit = harness.compile_ok("program.sm", &arena);

    let greet = unit.root.function("greet").unwrap().body.as_ref().unwrap();
    assert_eq!(literal(&call_args(&greet.stmts[0])[0]), Literal::String("hello, \\\"seam\\\""));
    assert_eq!(literal(&call_args(&greet.stmts[1])[0]), Literal::U8(0x41));

    let wide: Vec<_> = call_args(&greet.stmts[2]).iter().map(literal).collect();
    assert_eq!(wide, vec![Literal::U64(1_000_000), Literal::U16(255)]);

    let main = unit.root.function("main").unwrap().body.as_ref().unwrap();
    let Some(Stmt::Return(ret)) = main.stmts.last() else {
        panic!("main should end with a return");
    };
    assert_eq!(ret.value.as_ref().map(literal), Some(Literal::I32(0)));
}

#[test]
fn test_inline_source() {
    let arena = Bump::new();
    let source = concat!(
        "extern fn log(level: u8)\n",
        "type Level = u8\n",
        "fn warn() -> Level { return 2 }\n",
        "fn main() @constructor { log(3) warn() }",
    );
    let unit = parse(source, &arena, &CompileOptions::default()).unwrap();
    assert_eq!(unit.symbols.len(), 3);
}

// ============================================================================
// Diagnostics
// ============================================================================

#[test]
fn test_recovery_reports_every_bad_line() {
    let harness = TestHarness::new();
    let arena = Bump::new();

    let Err(SeamError::Parse(errors)) = harness.compile("syntax_errors.sm", &arena) else {
        panic!("expected parse errors");
    };
    let lines: Vec<_> = errors.iter().map(|e| e.span.start.line).collect();
    assert_eq!(lines, vec![2, 4]);

    let rendered = errors.display_with_source(&harness.source("syntax_errors.sm"));
    assert!(rendered.contains("fn broken( {}"));
    assert!(rendered.contains("type = i32"));

    let Err(SeamError::Parse(errors)) =
        harness.compile_with("syntax_errors.sm", &arena, &CompileOptions::fail_fast())
    else {
        panic!("expected parse errors");
    };
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_missing_file() {
    let harness = TestHarness::new();
    let error = harness.compile_err("no_such_file.sm");
    assert!(matches!(error, SeamError::Io { .. }));
}

// ============================================================================
// Lexing
// ============================================================================

fn residue(source: &str) -> String {
    let arena = Bump::new();
    Lexer::new(source, &arena)
        .map(|token| {
            let token = token.unwrap_or_else(|e| panic!("lex error: {e}"));
            token.span.text(source).unwrap().to_string()
        })
        .collect()
}

#[test]
fn test_lexeme_ranges_reconstruct_residue() {
    let harness = TestHarness::new();
    assert_eq!(
        residue(&harness.source("end_to_end.sm")),
        "fntest()->bool{returntrue}fnmain()->bool@constructor{returntest()}"
    );
    assert_eq!(
        residue("// note\nfn f(x: i32?) { puts(\"a b\") } /// long\ncomment ///\n"),
        "fnf(x:i32?){puts(\"a b\")}"
    );
}
