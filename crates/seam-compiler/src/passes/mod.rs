//! Semantic passes over the parsed tree.
//!
//! Passes come in two tiers. One-shot passes ([`Pass::invoke_single`]) run
//! exactly once, in registration order; they collect and resolve types and
//! symbols. Fixed-point passes ([`Pass::invoke`]) are then re-run as a round
//! until no pass in the round reports a change. See [`PassManager`].

use seam_core::CompilationError;
use seam_parser::ast::RestrictedBlock;

use crate::context::PassContext;

pub mod literal_narrowing;
pub mod manager;
pub mod symbol_collector;
pub mod type_collector;
pub mod type_resolver;
pub mod variable_resolver;

pub use literal_narrowing::LiteralNarrowingPass;
pub use manager::{DEFAULT_MAX_ROUNDS, PassManager};
pub use symbol_collector::SymbolCollectorPass;
pub use type_collector::TypeCollectorPass;
pub use type_resolver::TypeResolverPass;
pub use variable_resolver::VariableResolverPass;

/// A pass over one compilation unit.
///
/// A pass implements whichever tier it belongs to and leaves the other at
/// its default, which does nothing.
pub trait Pass {
    /// Name used in log output.
    fn name(&self) -> &'static str;

    /// One-shot tier. Called once per unit before any fixed-point round.
    fn invoke_single(
        &mut self,
        _root: &mut RestrictedBlock<'_>,
        _ctx: &mut PassContext,
    ) -> Result<(), CompilationError> {
        Ok(())
    }

    /// Fixed-point tier. Returns whether the tree was changed.
    fn invoke(
        &mut self,
        _root: &mut RestrictedBlock<'_>,
        _ctx: &mut PassContext,
    ) -> Result<bool, CompilationError> {
        Ok(false)
    }
}
