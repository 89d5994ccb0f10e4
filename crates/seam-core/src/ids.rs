//! Stable handles into the per-unit tables.
//!
//! Resolved type references and function variables stored in the AST hold
//! these handles instead of pointers, so the tables can own their entries
//! outright.

use std::fmt;

/// Identifies a type descriptor in a type table.
///
/// # Example
///
/// ```
/// use seam_core::TypeId;
///
/// let id = TypeId::new(3);
/// assert_eq!(id.index(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the underlying index.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type_{}", self.0)
    }
}

/// Identifies a function symbol in a symbol table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(u32);

impl SymbolId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the underlying index.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "symbol_{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_id_display() {
        assert_eq!(format!("{}", TypeId::new(5)), "type_5");
    }

    #[test]
    fn symbol_id_display() {
        assert_eq!(format!("{}", SymbolId::new(2)), "symbol_2");
    }

    #[test]
    fn ids_compare_by_index() {
        assert_eq!(TypeId::new(1), TypeId::new(1));
        assert_ne!(SymbolId::new(1), SymbolId::new(2));
        assert!(TypeId::new(1) < TypeId::new(2));
    }
}
