//! Restricted statements: the declarations legal at module or class scope.

use seam_core::{Span, SymbolId};

use super::stmt::Block;
use super::types::{TypeSlot, Var};

/// Attribute marking a module's initialization entry point.
pub const ATTR_CONSTRUCTOR: &str = "constructor";
/// Attribute marking a function visible outside the module.
pub const ATTR_EXPORT: &str = "export";

/// An ordered sequence of restricted statements: a module, or a class body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RestrictedBlock<'ast> {
    pub span: Span,
    pub stmts: Vec<RestrictedStmt<'ast>>,
}

impl<'ast> RestrictedBlock<'ast> {
    /// Iterate over the function declarations directly in this block.
    pub fn functions(&self) -> impl Iterator<Item = &FunctionDecl<'ast>> {
        self.stmts.iter().filter_map(|stmt| match stmt {
            RestrictedStmt::Function(func) => Some(func),
            RestrictedStmt::TypeDef(_) => None,
        })
    }

    /// Find a function declared directly in this block.
    pub fn function(&self, name: &str) -> Option<&FunctionDecl<'ast>> {
        self.functions().find(|func| func.name == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RestrictedStmt<'ast> {
    /// A function definition, or an extern declaration when it has no body.
    Function(FunctionDecl<'ast>),
    TypeDef(TypeDef<'ast>),
}

impl<'ast> RestrictedStmt<'ast> {
    pub fn span(&self) -> Span {
        match self {
            RestrictedStmt::Function(func) => func.span,
            RestrictedStmt::TypeDef(def) => def.span(),
        }
    }
}

/// `fn name(params) -> type @attrs { body }` or
/// `extern fn name(params) -> type @attrs`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl<'ast> {
    pub span: Span,
    pub name: &'ast str,
    pub params: Vec<Var<'ast>>,
    /// `void` when no `->` clause is written.
    pub return_type: TypeSlot<'ast>,
    /// Attribute names without the `@`, each listed once.
    pub attributes: Vec<&'ast str>,
    pub body: Option<Block<'ast>>,
    /// Filled in by symbol collection.
    pub symbol: Option<SymbolId>,
}

impl<'ast> FunctionDecl<'ast> {
    #[inline]
    pub fn is_extern(&self) -> bool {
        self.body.is_none()
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|attr| *attr == name)
    }

    pub fn is_constructor(&self) -> bool {
        self.has_attribute(ATTR_CONSTRUCTOR)
    }

    pub fn is_exported(&self) -> bool {
        self.has_attribute(ATTR_EXPORT)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeDef<'ast> {
    Alias(AliasDef<'ast>),
    Class(ClassDef<'ast>),
}

impl<'ast> TypeDef<'ast> {
    pub fn span(&self) -> Span {
        match self {
            TypeDef::Alias(alias) => alias.span,
            TypeDef::Class(class) => class.span,
        }
    }

    pub fn name(&self) -> &'ast str {
        match self {
            TypeDef::Alias(alias) => alias.name,
            TypeDef::Class(class) => class.name,
        }
    }
}

/// `type name = target`
#[derive(Debug, Clone, PartialEq)]
pub struct AliasDef<'ast> {
    pub span: Span,
    pub name: &'ast str,
    pub target: TypeSlot<'ast>,
}

/// `type name { fields and nested declarations }`
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDef<'ast> {
    pub span: Span,
    pub name: &'ast str,
    pub fields: Vec<Var<'ast>>,
    pub body: RestrictedBlock<'ast>,
}
