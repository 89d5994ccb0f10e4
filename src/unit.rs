//! Compilation unit API.
//!
//! A unit is one source file taken through parsing and every semantic
//! pass. Either the whole pipeline succeeds and the resolved tree is handed
//! out, or the diagnostics are returned and nothing else.

use std::fs;
use std::path::Path;

use bumpalo::Bump;
use seam_compiler::{PassContext, PassManager, SymbolTable, TypeTable};
use seam_core::SeamError;
use seam_parser::{Parser, RestrictedBlock};
use tracing::debug;

use crate::options::CompileOptions;

/// A fully resolved unit, ready for a backend.
///
/// Every type slot in `root` is resolved against `types` and every
/// variable reference is bound to a symbol in `symbols`.
#[derive(Debug)]
pub struct CompilationUnit<'ast> {
    pub root: RestrictedBlock<'ast>,
    pub types: TypeTable,
    pub symbols: SymbolTable,
}

impl<'ast> CompilationUnit<'ast> {
    /// Split into the tree and the pass tables.
    pub fn into_parts(self) -> (RestrictedBlock<'ast>, PassContext) {
        let ctx = PassContext {
            types: self.types,
            symbols: self.symbols,
        };
        (self.root, ctx)
    }
}

fn pipeline(options: &CompileOptions) -> PassManager {
    let manager = if options.narrow_literals {
        PassManager::default_pipeline()
    } else {
        PassManager::resolution_pipeline()
    };
    manager.with_max_rounds(options.max_fixed_point_rounds)
}

/// Parse `source` and run every semantic pass over it.
///
/// Node strings are copied into `arena`, so the returned unit does not
/// borrow `source`.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn parse<'ast>(
    source: &str,
    arena: &'ast Bump,
    options: &CompileOptions,
) -> Result<CompilationUnit<'ast>, SeamError> {
    let mut root = Parser::parse(source, arena, options.parse_mode)?;
    debug!(declarations = root.stmts.len(), "parsed unit");

    let mut ctx = PassContext::new();
    let mut manager = pipeline(options);
    manager.run(&mut root, &mut ctx)?;

    Ok(CompilationUnit {
        root,
        types: ctx.types,
        symbols: ctx.symbols,
    })
}

/// Read the file at `path` and [`parse`] it.
pub fn compile_file<'ast>(
    path: impl AsRef<Path>,
    arena: &'ast Bump,
    options: &CompileOptions,
) -> Result<CompilationUnit<'ast>, SeamError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| SeamError::Io {
        path: path.display().to_string(),
        source,
    })?;
    debug!(path = %path.display(), bytes = source.len(), "read source file");
    parse(&source, arena, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use seam_parser::ParseMode;
    use seam_parser::ast::{Expr, Literal, Stmt};

    #[test]
    fn syntax_errors_stop_before_the_passes() {
        let arena = Bump::new();
        let error = parse("fn main( {}", &arena, &CompileOptions::default()).unwrap_err();
        assert!(error.is_parse());
    }

    #[test]
    fn semantic_errors_are_wrapped() {
        let arena = Bump::new();
        let error = parse("fn f() -> nope {}", &arena, &CompileOptions::default()).unwrap_err();
        assert!(error.is_compilation());
    }

    fn returned<'ast>(unit: &CompilationUnit<'ast>) -> Literal<'ast> {
        let body = unit.root.function("f").and_then(|f| f.body.as_ref()).unwrap();
        match &body.stmts[0] {
            Stmt::Return(ret) => match &ret.value {
                Some(Expr::Literal(lit)) => lit.value,
                other => panic!("expected literal, got {other:?}"),
            },
            other => panic!("expected return, got {other:?}"),
        }
    }

    #[test]
    fn narrowing_can_be_disabled() {
        let source = "fn f() -> u8 { return 1 }";
        let arena = Bump::new();
        let narrowed = parse(source, &arena, &CompileOptions::default()).unwrap();
        assert_eq!(returned(&narrowed), Literal::U8(1));

        let options = CompileOptions {
            narrow_literals: false,
            ..CompileOptions::default()
        };
        let raw = parse(source, &arena, &options).unwrap();
        assert_eq!(returned(&raw), Literal::Number("1"));
    }

    #[test]
    fn fail_fast_reports_one_error() {
        let source = "fn a( {}\nfn b( {}";
        let arena = Bump::new();
        let result = parse(source, &arena, &CompileOptions::fail_fast());
        let Err(SeamError::Parse(errors)) = result else {
            panic!("expected parse errors");
        };
        assert_eq!(errors.len(), 1);

        let options = CompileOptions {
            parse_mode: ParseMode::Recover,
            ..CompileOptions::default()
        };
        let Err(SeamError::Parse(errors)) = parse(source, &arena, &options) else {
            panic!("expected parse errors");
        };
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let arena = Bump::new();
        let error =
            compile_file("does/not/exist.sm", &arena, &CompileOptions::default()).unwrap_err();
        assert!(matches!(error, SeamError::Io { ref path, .. } if path.contains("exist.sm")));
    }
}
