//! Compilation options.

use seam_compiler::passes::DEFAULT_MAX_ROUNDS;
use seam_parser::ParseMode;

/// Settings for one call to [`parse`](crate::parse).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// How the parser reacts to syntax errors.
    pub parse_mode: ParseMode,
    /// Run the literal narrowing pass after resolution.
    pub narrow_literals: bool,
    /// Fixed-point rounds allowed before the pipeline reports
    /// [`NoFixedPoint`](crate::CompilationError::NoFixedPoint).
    pub max_fixed_point_rounds: usize,
}

impl CompileOptions {
    pub fn fail_fast() -> Self {
        Self {
            parse_mode: ParseMode::FailFast,
            ..Self::default()
        }
    }
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            parse_mode: ParseMode::default(),
            narrow_literals: true,
            max_fixed_point_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}
