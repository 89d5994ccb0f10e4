//! Registers every function and extern declaration in the symbol table.
//!
//! Functions nested in class bodies are mangled with the enclosing class
//! names (`T.foo`). The module constructor is registered under
//! [`CONSTRUCTOR_SYMBOL`] so a unit can hold at most one.

use seam_core::{CompilationError, SymbolId};
use seam_parser::ast::visitor::{accept_restricted_block, walk_class};
use seam_parser::ast::{ClassDef, FunctionDecl, RestrictedBlock, VisitResult, Visitor, Walk};
use tracing::trace;

use super::Pass;
use crate::context::PassContext;
use crate::symbols::{CONSTRUCTOR_SYMBOL, FunctionSymbol, SymbolTable, mangle};

#[derive(Debug, Default)]
pub struct SymbolCollectorPass;

impl SymbolCollectorPass {
    pub fn new() -> Self {
        Self
    }
}

impl Pass for SymbolCollectorPass {
    fn name(&self) -> &'static str {
        "symbol-collector"
    }

    #[cfg_attr(feature = "profiling", profiling::function)]
    fn invoke_single(
        &mut self,
        root: &mut RestrictedBlock<'_>,
        ctx: &mut PassContext,
    ) -> Result<(), CompilationError> {
        let mut collector = SymbolCollector {
            symbols: &mut ctx.symbols,
            namespace: Vec::new(),
        };
        accept_restricted_block(&mut collector, root)
    }
}

struct SymbolCollector<'c, 'ast> {
    symbols: &'c mut SymbolTable,
    /// Names of the classes enclosing the current declaration.
    namespace: Vec<&'ast str>,
}

impl<'ast> SymbolCollector<'_, 'ast> {
    fn check_extern(&self, func: &FunctionDecl<'ast>) -> Result<(), CompilationError> {
        if !self.namespace.is_empty() {
            return Err(CompilationError::ExternInsideType { span: func.span });
        }
        if func.is_exported() {
            return Err(CompilationError::ExportedExtern {
                name: func.name.to_string(),
                span: func.span,
            });
        }
        if func.is_constructor() {
            return Err(CompilationError::ExternConstructor {
                name: func.name.to_string(),
                span: func.span,
            });
        }
        Ok(())
    }

    fn check_constructor(&self, func: &FunctionDecl<'ast>) -> Result<(), CompilationError> {
        if !self.namespace.is_empty() {
            return Err(CompilationError::ConstructorInsideType { span: func.span });
        }
        if !func.params.is_empty() {
            return Err(CompilationError::InvalidConstructorSignature {
                name: func.name.to_string(),
                span: func.span,
            });
        }
        Ok(())
    }

    fn register(&mut self, func: &mut FunctionDecl<'ast>) -> Result<(), CompilationError> {
        let is_constructor = func.is_constructor();
        let mangled = if is_constructor {
            CONSTRUCTOR_SYMBOL.to_string()
        } else {
            mangle(&self.namespace, func.name)
        };

        let params = func
            .params
            .iter()
            .map(|param| {
                let what = format!("parameter '{}' of '{}'", param.name, func.name);
                param.ty.require(&what, param.span)
            })
            .collect::<Result<Vec<_>, _>>()?;
        let return_type = func
            .return_type
            .require(&format!("return type of '{}'", func.name), func.span)?;

        let symbol = FunctionSymbol {
            // Assigned by the table.
            id: SymbolId::new(0),
            mangled,
            name: func.name.to_string(),
            span: func.span,
            params,
            return_type,
            is_extern: func.is_extern(),
            is_constructor,
            is_exported: func.is_exported(),
        };
        let mangled = symbol.mangled.clone();

        match self.symbols.insert(symbol) {
            Ok(id) => {
                trace!(symbol = %mangled, %id, "collected function");
                func.symbol = Some(id);
                Ok(())
            }
            Err(_) if is_constructor => {
                Err(CompilationError::DuplicateConstructor { span: func.span })
            }
            Err(_) => Err(CompilationError::RedefinedSymbol {
                symbol: mangled,
                span: func.span,
            }),
        }
    }
}

impl<'ast> Visitor<'ast> for SymbolCollector<'_, 'ast> {
    fn visit_function(&mut self, func: &mut FunctionDecl<'ast>) -> VisitResult {
        if func.is_constructor() {
            self.check_constructor(func)?;
        }
        self.register(func)?;
        Ok(Walk::Skip)
    }

    fn visit_extern(&mut self, func: &mut FunctionDecl<'ast>) -> VisitResult {
        self.check_extern(func)?;
        self.register(func)?;
        Ok(Walk::Skip)
    }

    fn visit_class(&mut self, class: &mut ClassDef<'ast>) -> VisitResult {
        self.namespace.push(class.name);
        let result = walk_class(self, class);
        self.namespace.pop();
        result?;
        Ok(Walk::Skip)
    }
}
