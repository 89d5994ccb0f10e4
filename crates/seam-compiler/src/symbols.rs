//! The per-unit function symbol table.

use rustc_hash::FxHashMap;
use seam_core::{Span, SymbolId};
use seam_parser::ast::TypeRef;
use tracing::trace;

/// Reserved symbol every module constructor is registered under.
pub const CONSTRUCTOR_SYMBOL: &str = "@constructor";

/// Dot-join the enclosing class names and a function name.
///
/// ```
/// use seam_compiler::symbols::mangle;
///
/// assert_eq!(mangle(&[], "foo"), "foo");
/// assert_eq!(mangle(&["Outer", "Inner"], "foo"), "Outer.Inner.foo");
/// ```
pub fn mangle(path: &[&str], name: &str) -> String {
    let capacity = path.iter().map(|p| p.len() + 1).sum::<usize>() + name.len();
    let mut mangled = String::with_capacity(capacity);
    for segment in path {
        mangled.push_str(segment);
        mangled.push('.');
    }
    mangled.push_str(name);
    mangled
}

/// A registered function or extern declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSymbol {
    pub id: SymbolId,
    pub mangled: String,
    /// Name as declared.
    pub name: String,
    /// Span of the declaration.
    pub span: Span,
    pub params: Vec<TypeRef>,
    pub return_type: TypeRef,
    pub is_extern: bool,
    pub is_constructor: bool,
    pub is_exported: bool,
}

/// Mapping from mangled symbol to the declaration that defines it.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: Vec<FunctionSymbol>,
    by_mangled: FxHashMap<String, SymbolId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Register a symbol, assigning its id.
    ///
    /// Entries are never overwritten: returns the id of the existing entry as
    /// the error when the mangled name is taken.
    pub fn insert(&mut self, mut symbol: FunctionSymbol) -> Result<SymbolId, SymbolId> {
        if let Some(&existing) = self.by_mangled.get(&symbol.mangled) {
            return Err(existing);
        }
        let id = SymbolId::new(self.symbols.len() as u32);
        symbol.id = id;
        trace!(%id, symbol = %symbol.mangled, "registered symbol");
        self.by_mangled.insert(symbol.mangled.clone(), id);
        self.symbols.push(symbol);
        Ok(id)
    }

    pub fn lookup(&self, mangled: &str) -> Option<SymbolId> {
        self.by_mangled.get(mangled).copied()
    }

    pub fn get(&self, id: SymbolId) -> Option<&FunctionSymbol> {
        self.symbols.get(id.index() as usize)
    }

    /// The module constructor, if one was declared.
    pub fn constructor(&self) -> Option<&FunctionSymbol> {
        self.lookup(CONSTRUCTOR_SYMBOL).and_then(|id| self.get(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &FunctionSymbol> {
        self.symbols.iter()
    }
}
