//! The per-unit type table.
//!
//! Descriptors live in an arena addressed by [`TypeId`]; aliases refer to
//! their target by handle, so alias chains never form ownership cycles.

use rustc_hash::FxHashMap;
use seam_core::{CompilationError, PrimitiveKind, Span, TypeId};
use seam_parser::ast::{TypeName, TypeRef, TypeSlot};
use tracing::trace;

/// The resolved, table-owned representation of a type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescriptor {
    Primitive(PrimitiveKind),
    Class(ClassType),
    Alias(AliasType),
}

impl TypeDescriptor {
    pub fn name(&self) -> &str {
        match self {
            TypeDescriptor::Primitive(kind) => kind.name(),
            TypeDescriptor::Class(class) => &class.name,
            TypeDescriptor::Alias(alias) => &alias.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassType {
    pub name: String,
    /// Fields in declaration order.
    pub fields: Vec<FieldDescriptor>,
}

impl ClassType {
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub ty: TypeRef,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AliasType {
    pub name: String,
    pub target: TypeRef,
}

/// Mapping from type name to descriptor for one compilation unit.
#[derive(Debug, Clone)]
pub struct TypeTable {
    descriptors: Vec<TypeDescriptor>,
    by_name: FxHashMap<String, TypeId>,
}

impl TypeTable {
    /// An empty table, without even the built-in primitives.
    pub fn empty() -> Self {
        Self {
            descriptors: Vec::new(),
            by_name: FxHashMap::default(),
        }
    }

    /// A table seeded with every built-in primitive.
    pub fn new() -> Self {
        let mut table = Self::empty();
        for kind in PrimitiveKind::ALL {
            table.push(TypeDescriptor::Primitive(kind));
        }
        table
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, id: TypeId) -> Option<&TypeDescriptor> {
        self.descriptors.get(id.index() as usize)
    }

    /// Name of the type behind `id`, or `"<unknown>"` for a foreign handle.
    pub fn name(&self, id: TypeId) -> &str {
        self.get(id).map_or("<unknown>", TypeDescriptor::name)
    }

    /// Handle of a built-in primitive.
    pub fn primitive(&self, kind: PrimitiveKind) -> Option<TypeId> {
        self.lookup(kind.name())
    }

    /// Resolve a written type name against the current contents.
    pub fn resolve(&self, name: &TypeName<'_>) -> Option<TypeRef> {
        self.lookup(name.name)
            .map(|id| TypeRef::new(id, name.optional))
    }

    /// The type a tree slot denotes: its handle if already resolved,
    /// otherwise a lookup of the written name.
    pub fn resolve_slot(&self, slot: &TypeSlot<'_>) -> Option<TypeRef> {
        match slot {
            TypeSlot::Resolved(ty) => Some(*ty),
            TypeSlot::Unresolved(name) => self.resolve(name),
        }
    }

    /// Register a new descriptor under its name.
    ///
    /// Existing entries are never replaced; a second definition fails with
    /// [`CompilationError::RedefinedType`] at `span`.
    pub fn insert(
        &mut self,
        descriptor: TypeDescriptor,
        span: Span,
    ) -> Result<TypeId, CompilationError> {
        if self.by_name.contains_key(descriptor.name()) {
            return Err(CompilationError::RedefinedType {
                name: descriptor.name().to_string(),
                span,
            });
        }
        let id = self.push(descriptor);
        trace!(%id, name = self.name(id), "registered type");
        Ok(id)
    }

    fn push(&mut self, descriptor: TypeDescriptor) -> TypeId {
        let id = TypeId::new(self.descriptors.len() as u32);
        self.by_name.insert(descriptor.name().to_string(), id);
        self.descriptors.push(descriptor);
        id
    }

    /// Follow alias links to the first non-alias descriptor.
    ///
    /// An alias can only target a type registered before it, so chains
    /// always end; the step bound guards tables built by hand.
    pub fn underlying(&self, id: TypeId) -> TypeId {
        let mut current = id;
        for _ in 0..=self.descriptors.len() {
            match self.get(current) {
                Some(TypeDescriptor::Alias(alias)) => current = alias.target.id,
                _ => return current,
            }
        }
        current
    }

    /// The primitive kind an id ultimately denotes, looking through aliases.
    pub fn underlying_primitive(&self, id: TypeId) -> Option<PrimitiveKind> {
        match self.get(self.underlying(id)) {
            Some(TypeDescriptor::Primitive(kind)) => Some(*kind),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &TypeDescriptor)> {
        self.descriptors
            .iter()
            .enumerate()
            .map(|(index, descriptor)| (TypeId::new(index as u32), descriptor))
    }
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::new()
    }
}
