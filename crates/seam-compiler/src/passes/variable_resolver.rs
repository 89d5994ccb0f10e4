//! Binds variable references to function declarations.
//!
//! Only function symbols are searched. Parameters and locals are not
//! declarations the resolver knows about, so referencing one is reported
//! as an unresolved variable.

use seam_core::{CompilationError, SymbolId};
use seam_parser::ast::visitor::{accept_restricted_block, walk_class};
use seam_parser::ast::{
    ClassDef, FunctionVariable, RestrictedBlock, VarRef, VariableExpr, VisitResult, Visitor, Walk,
};
use tracing::trace;

use super::Pass;
use crate::context::PassContext;
use crate::symbols::{SymbolTable, mangle};

#[derive(Debug, Default)]
pub struct VariableResolverPass;

impl VariableResolverPass {
    pub fn new() -> Self {
        Self
    }
}

impl Pass for VariableResolverPass {
    fn name(&self) -> &'static str {
        "variable-resolver"
    }

    #[cfg_attr(feature = "profiling", profiling::function)]
    fn invoke_single(
        &mut self,
        root: &mut RestrictedBlock<'_>,
        ctx: &mut PassContext,
    ) -> Result<(), CompilationError> {
        let mut resolver = VariableResolver {
            symbols: &ctx.symbols,
            namespace: Vec::new(),
        };
        accept_restricted_block(&mut resolver, root)
    }
}

struct VariableResolver<'c, 'ast> {
    symbols: &'c SymbolTable,
    namespace: Vec<&'ast str>,
}

impl VariableResolver<'_, '_> {
    /// Search from the innermost enclosing class outwards to module scope.
    fn lookup(&self, name: &str) -> Option<SymbolId> {
        (0..=self.namespace.len())
            .rev()
            .find_map(|depth| self.symbols.lookup(&mangle(&self.namespace[..depth], name)))
    }
}

impl<'ast> Visitor<'ast> for VariableResolver<'_, 'ast> {
    fn visit_class(&mut self, class: &mut ClassDef<'ast>) -> VisitResult {
        self.namespace.push(class.name);
        let result = walk_class(self, class);
        self.namespace.pop();
        result?;
        Ok(Walk::Skip)
    }

    fn visit_variable(&mut self, var: &mut VariableExpr<'ast>) -> VisitResult {
        let VarRef::Unresolved(name) = var.var else {
            return Ok(Walk::Skip);
        };
        let symbol = self.lookup(name).ok_or_else(|| CompilationError::UnresolvedVariable {
            name: name.to_string(),
            span: var.span,
        })?;
        trace!(name, %symbol, "resolved variable");
        var.var = VarRef::Function(FunctionVariable { name, symbol });
        Ok(Walk::Skip)
    }
}
