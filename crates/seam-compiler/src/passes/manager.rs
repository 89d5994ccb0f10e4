//! Pass orchestration.

use seam_core::CompilationError;
use seam_parser::ast::RestrictedBlock;
use tracing::{debug, trace};

use super::{
    LiteralNarrowingPass, Pass, SymbolCollectorPass, TypeCollectorPass, TypeResolverPass,
    VariableResolverPass,
};
use crate::context::PassContext;

/// Fixed-point rounds allowed before [`PassManager::run`] gives up.
pub const DEFAULT_MAX_ROUNDS: usize = 64;

/// Runs an ordered list of passes over a unit.
pub struct PassManager {
    passes: Vec<Box<dyn Pass>>,
    max_rounds: usize,
}

impl PassManager {
    pub fn new() -> Self {
        Self {
            passes: Vec::new(),
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }

    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Append a pass. Passes run in the order they are added.
    pub fn add_pass<P: Pass + 'static>(&mut self, pass: P) {
        self.passes.push(Box::new(pass));
    }

    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|pass| pass.name()).collect()
    }

    /// Type collection, type resolution, symbol collection and variable
    /// resolution, in that order.
    pub fn resolution_pipeline() -> Self {
        let mut manager = Self::new();
        manager.add_pass(TypeCollectorPass::new());
        manager.add_pass(TypeResolverPass::new());
        manager.add_pass(SymbolCollectorPass::new());
        manager.add_pass(VariableResolverPass::new());
        manager
    }

    /// The resolution pipeline followed by literal narrowing.
    pub fn default_pipeline() -> Self {
        let mut manager = Self::resolution_pipeline();
        manager.add_pass(LiteralNarrowingPass::new());
        manager
    }

    /// Run every one-shot pass once, then fixed-point rounds until a round
    /// changes nothing. Returns the number of rounds run, counting the
    /// final unchanged one.
    ///
    /// The first error aborts the run. Rounds beyond the limit set by
    /// [`with_max_rounds`](Self::with_max_rounds) are reported as
    /// [`CompilationError::NoFixedPoint`].
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn run(
        &mut self,
        root: &mut RestrictedBlock<'_>,
        ctx: &mut PassContext,
    ) -> Result<usize, CompilationError> {
        for pass in &mut self.passes {
            debug!(pass = pass.name(), "running pass");
            pass.invoke_single(root, ctx)?;
        }

        let mut rounds = 0;
        loop {
            if rounds == self.max_rounds {
                return Err(CompilationError::NoFixedPoint {
                    rounds,
                    span: root.span,
                });
            }
            rounds += 1;

            let mut changed = false;
            for pass in &mut self.passes {
                let pass_changed = pass.invoke(root, ctx)?;
                trace!(
                    pass = pass.name(),
                    round = rounds,
                    changed = pass_changed,
                    "fixed-point pass"
                );
                changed |= pass_changed;
            }
            if !changed {
                break;
            }
        }

        debug!(rounds, "passes reached a fixed point");
        Ok(rounds)
    }
}

impl Default for PassManager {
    fn default() -> Self {
        Self::new()
    }
}
