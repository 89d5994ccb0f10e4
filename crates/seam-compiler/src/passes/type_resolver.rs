//! Replaces every written type name in the tree with a table handle.
//!
//! Runs once the type collector has filled the table, so unlike collection
//! it sees every definition in the unit regardless of order.

use seam_core::{CompilationError, Span};
use seam_parser::ast::visitor::accept_restricted_block;
use seam_parser::ast::{
    AliasDef, ClassDef, FunctionDecl, RestrictedBlock, TypeSlot, VisitResult, Visitor, Walk,
};

use super::Pass;
use crate::context::PassContext;
use crate::types::TypeTable;

#[derive(Debug, Default)]
pub struct TypeResolverPass;

impl TypeResolverPass {
    pub fn new() -> Self {
        Self
    }
}

impl Pass for TypeResolverPass {
    fn name(&self) -> &'static str {
        "type-resolver"
    }

    #[cfg_attr(feature = "profiling", profiling::function)]
    fn invoke_single(
        &mut self,
        root: &mut RestrictedBlock<'_>,
        ctx: &mut PassContext,
    ) -> Result<(), CompilationError> {
        accept_restricted_block(&mut TypeResolver { types: &ctx.types }, root)
    }
}

struct TypeResolver<'c> {
    types: &'c TypeTable,
}

impl TypeResolver<'_> {
    /// Resolve `slot` in place, reporting failures at `span`.
    fn resolve(&self, slot: &mut TypeSlot<'_>, span: Span) -> Result<(), CompilationError> {
        if let TypeSlot::Unresolved(name) = slot {
            let ty = self.types.resolve(name).ok_or_else(|| CompilationError::InvalidType {
                name: name.name.to_string(),
                span,
            })?;
            *slot = TypeSlot::Resolved(ty);
        }
        Ok(())
    }

    fn resolve_signature(&self, func: &mut FunctionDecl<'_>) -> Result<(), CompilationError> {
        for param in &mut func.params {
            self.resolve(&mut param.ty, func.span)?;
        }
        self.resolve(&mut func.return_type, func.span)
    }
}

impl<'ast> Visitor<'ast> for TypeResolver<'_> {
    fn visit_function(&mut self, func: &mut FunctionDecl<'ast>) -> VisitResult {
        self.resolve_signature(func)?;
        Ok(Walk::Skip)
    }

    fn visit_extern(&mut self, func: &mut FunctionDecl<'ast>) -> VisitResult {
        self.resolve_signature(func)?;
        Ok(Walk::Skip)
    }

    fn visit_alias(&mut self, alias: &mut AliasDef<'ast>) -> VisitResult {
        self.resolve(&mut alias.target, alias.span)?;
        Ok(Walk::Skip)
    }

    fn visit_class(&mut self, class: &mut ClassDef<'ast>) -> VisitResult {
        for field in &mut class.fields {
            self.resolve(&mut field.ty, field.span)?;
        }
        Ok(Walk::Children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passes::TypeCollectorPass;
    use crate::testing::{parse, run_passes};
    use bumpalo::Bump;
    use seam_core::{Position, PrimitiveKind};
    use seam_parser::ast::{RestrictedStmt, TypeDef};

    #[test]
    fn signatures_are_resolved() {
        let arena = Bump::new();
        let mut root = parse("type Id = u64\nfn find(id: Id, hint: string?) -> bool {}", &arena);
        let mut ctx = PassContext::new();
        run_passes!(
            &mut root,
            &mut ctx,
            TypeCollectorPass::new(),
            TypeResolverPass::new()
        )
        .unwrap();

        let find = root.function("find").unwrap();
        let id = find.params[0].ty.resolved().unwrap();
        assert_eq!(ctx.types.name(id.id), "Id");
        assert_eq!(ctx.types.underlying_primitive(id.id), Some(PrimitiveKind::U64));
        assert!(find.params[1].ty.resolved().unwrap().optional);
        assert_eq!(
            find.return_type.resolved().map(|ty| ty.id),
            ctx.types.primitive(PrimitiveKind::Bool)
        );
    }

    #[test]
    fn implicit_void_return_is_resolved() {
        let arena = Bump::new();
        let mut root = parse("extern fn exit(code: i32)", &arena);
        let mut ctx = PassContext::new();
        run_passes!(
            &mut root,
            &mut ctx,
            TypeCollectorPass::new(),
            TypeResolverPass::new()
        )
        .unwrap();

        let exit = root.function("exit").unwrap();
        assert_eq!(
            exit.return_type.resolved().map(|ty| ty.id),
            ctx.types.primitive(PrimitiveKind::Void)
        );
    }

    #[test]
    fn unknown_return_type_names_the_declaration() {
        let arena = Bump::new();
        let mut root = parse("fn main() -> unknown_type {}", &arena);
        let mut ctx = PassContext::new();
        let error = run_passes!(
            &mut root,
            &mut ctx,
            TypeCollectorPass::new(),
            TypeResolverPass::new()
        )
        .unwrap_err();

        let CompilationError::InvalidType { name, span } = error else {
            panic!("expected invalid type, got {error:?}");
        };
        assert_eq!(name, "unknown_type");
        assert_eq!(span.start, Position::new(1, 1, 0));
    }

    #[test]
    fn nested_declarations_are_resolved() {
        let arena = Bump::new();
        let mut root = parse("type T { count: u8 fn get() -> u8 {} }", &arena);
        let mut ctx = PassContext::new();
        run_passes!(
            &mut root,
            &mut ctx,
            TypeCollectorPass::new(),
            TypeResolverPass::new()
        )
        .unwrap();

        let RestrictedStmt::TypeDef(TypeDef::Class(class)) = &root.stmts[0] else {
            panic!("expected class");
        };
        assert!(class.fields[0].ty.is_resolved());
        assert!(class.body.function("get").unwrap().return_type.is_resolved());
    }

    #[test]
    fn resolution_uses_the_whole_table() {
        // Functions may mention types declared after them.
        let arena = Bump::new();
        let mut root = parse("fn make() -> P {}\ntype P { x: i32 }", &arena);
        let mut ctx = PassContext::new();
        run_passes!(
            &mut root,
            &mut ctx,
            TypeCollectorPass::new(),
            TypeResolverPass::new()
        )
        .unwrap();
        assert!(root.function("make").unwrap().return_type.is_resolved());
    }
}
