//! Registers every alias and class definition in the type table.
//!
//! Definitions are processed in source order and resolved against the table
//! as it stands at that point: a field or alias target naming a type
//! declared further down is an error.

use seam_core::CompilationError;
use seam_parser::ast::visitor::{accept_restricted_block, walk_class};
use seam_parser::ast::{
    AliasDef, ClassDef, FunctionDecl, RestrictedBlock, TypeSlot, VisitResult, Visitor, Walk,
};

use super::Pass;
use crate::context::PassContext;
use crate::types::{AliasType, ClassType, FieldDescriptor, TypeDescriptor, TypeTable};

#[derive(Debug, Default)]
pub struct TypeCollectorPass;

impl TypeCollectorPass {
    pub fn new() -> Self {
        Self
    }
}

impl Pass for TypeCollectorPass {
    fn name(&self) -> &'static str {
        "type-collector"
    }

    #[cfg_attr(feature = "profiling", profiling::function)]
    fn invoke_single(
        &mut self,
        root: &mut RestrictedBlock<'_>,
        ctx: &mut PassContext,
    ) -> Result<(), CompilationError> {
        accept_restricted_block(&mut TypeCollector { types: &mut ctx.types }, root)
    }
}

struct TypeCollector<'c> {
    types: &'c mut TypeTable,
}

fn written_name(slot: &TypeSlot<'_>) -> String {
    match slot {
        TypeSlot::Unresolved(name) => name.name.to_string(),
        TypeSlot::Resolved(ty) => ty.id.to_string(),
    }
}

impl<'ast> Visitor<'ast> for TypeCollector<'_> {
    fn visit_function(&mut self, _func: &mut FunctionDecl<'ast>) -> VisitResult {
        Ok(Walk::Skip)
    }

    fn visit_extern(&mut self, _func: &mut FunctionDecl<'ast>) -> VisitResult {
        Ok(Walk::Skip)
    }

    fn visit_alias(&mut self, alias: &mut AliasDef<'ast>) -> VisitResult {
        let target = self.types.resolve_slot(&alias.target).ok_or_else(|| {
            CompilationError::InvalidAliasTarget {
                alias: alias.name.to_string(),
                target: written_name(&alias.target),
                span: alias.span,
            }
        })?;
        let descriptor = TypeDescriptor::Alias(AliasType {
            name: alias.name.to_string(),
            target,
        });
        self.types.insert(descriptor, alias.span)?;
        Ok(Walk::Skip)
    }

    fn visit_class(&mut self, class: &mut ClassDef<'ast>) -> VisitResult {
        let mut fields = Vec::with_capacity(class.fields.len());
        for field in &class.fields {
            let ty = self.types.resolve_slot(&field.ty).ok_or_else(|| {
                CompilationError::InvalidFieldType {
                    field: field.name.to_string(),
                    ty: written_name(&field.ty),
                    span: field.span,
                }
            })?;
            fields.push(FieldDescriptor {
                name: field.name.to_string(),
                ty,
            });
        }
        let descriptor = TypeDescriptor::Class(ClassType {
            name: class.name.to_string(),
            fields,
        });
        self.types.insert(descriptor, class.span)?;

        // Nested type definitions share the unit-wide table.
        walk_class(self, class)?;
        Ok(Walk::Skip)
    }
}
