//! PassContext - the tables shared by the semantic passes.

use crate::symbols::SymbolTable;
use crate::types::TypeTable;

/// Tables for one compilation unit, threaded through every pass.
///
/// Created fresh per unit and handed to the backend together with the
/// resolved tree once the pipeline finishes.
#[derive(Debug, Clone, Default)]
pub struct PassContext {
    pub types: TypeTable,
    pub symbols: SymbolTable,
}

impl PassContext {
    /// A context whose type table holds the built-in primitives.
    pub fn new() -> Self {
        Self::default()
    }
}
