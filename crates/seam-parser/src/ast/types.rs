//! Type annotations and typed variables.

use seam_core::{CompilationError, Span, TypeId};

/// A type as written in source: `name` or `name?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeName<'ast> {
    pub name: &'ast str,
    /// `?` suffix: the value may be absent.
    pub optional: bool,
    pub span: Span,
}

impl<'ast> TypeName<'ast> {
    pub fn new(name: &'ast str, optional: bool, span: Span) -> Self {
        Self {
            name,
            optional,
            span,
        }
    }
}

/// A resolved type: a handle into the type table plus the optional flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeRef {
    pub id: TypeId,
    pub optional: bool,
}

impl TypeRef {
    pub fn new(id: TypeId, optional: bool) -> Self {
        Self { id, optional }
    }
}

/// A tree slot holding a type that is resolved after parsing.
///
/// The parser fills every slot with [`TypeSlot::Unresolved`]; the type
/// resolver replaces each one with [`TypeSlot::Resolved`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeSlot<'ast> {
    Unresolved(TypeName<'ast>),
    Resolved(TypeRef),
}

impl<'ast> TypeSlot<'ast> {
    pub fn is_resolved(&self) -> bool {
        matches!(self, TypeSlot::Resolved(_))
    }

    pub fn resolved(&self) -> Option<TypeRef> {
        match self {
            TypeSlot::Resolved(ty) => Some(*ty),
            TypeSlot::Unresolved(_) => None,
        }
    }

    pub fn unresolved(&self) -> Option<&TypeName<'ast>> {
        match self {
            TypeSlot::Unresolved(name) => Some(name),
            TypeSlot::Resolved(_) => None,
        }
    }

    /// The resolved type, or [`CompilationError::UnresolvedSlot`] naming
    /// `what` if the type resolver has not filled this slot yet.
    pub fn require(&self, what: &str, span: Span) -> Result<TypeRef, CompilationError> {
        self.resolved().ok_or_else(|| CompilationError::UnresolvedSlot {
            what: what.to_string(),
            span,
        })
    }
}

/// `name: type`, used for parameters and class fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Var<'ast> {
    pub span: Span,
    pub name: &'ast str,
    pub ty: TypeSlot<'ast>,
}
