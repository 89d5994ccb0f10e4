//! Gives unclassified number literals a concrete primitive type.
//!
//! A literal is narrowed when its context fixes the type: the declared
//! return type for `return <number>`, or the parameter type for an argument
//! of a call whose callee is a resolved function. Literals without such a
//! context keep their source text for the backend to decide.

use std::num::IntErrorKind;

use seam_core::{CompilationError, PrimitiveKind};
use seam_parser::ast::visitor::accept_restricted_block;
use seam_parser::ast::{
    CallExpr, Expr, FunctionDecl, Literal, RestrictedBlock, ReturnStmt, TypeRef, VarRef,
    VisitResult, Visitor, Walk,
};
use tracing::trace;

use super::Pass;
use crate::context::PassContext;
use crate::symbols::SymbolTable;
use crate::types::TypeTable;

#[derive(Debug, Default)]
pub struct LiteralNarrowingPass;

impl LiteralNarrowingPass {
    pub fn new() -> Self {
        Self
    }
}

impl Pass for LiteralNarrowingPass {
    fn name(&self) -> &'static str {
        "literal-narrowing"
    }

    #[cfg_attr(feature = "profiling", profiling::function)]
    fn invoke(
        &mut self,
        root: &mut RestrictedBlock<'_>,
        ctx: &mut PassContext,
    ) -> Result<bool, CompilationError> {
        let mut narrowing = LiteralNarrowing {
            types: &ctx.types,
            symbols: &ctx.symbols,
            return_type: None,
            changed: false,
        };
        accept_restricted_block(&mut narrowing, root)?;
        Ok(narrowing.changed)
    }
}

struct LiteralNarrowing<'c> {
    types: &'c TypeTable,
    symbols: &'c SymbolTable,
    /// Declared return type of the function being walked.
    return_type: Option<TypeRef>,
    changed: bool,
}

impl LiteralNarrowing<'_> {
    fn narrow(&mut self, expr: &mut Expr<'_>, ty: TypeRef) -> Result<(), CompilationError> {
        let Expr::Literal(lit) = expr else {
            return Ok(());
        };
        let Literal::Number(text) = lit.value else {
            return Ok(());
        };

        let value = self
            .types
            .underlying_primitive(ty.id)
            .ok_or(Narrowing::Invalid)
            .and_then(|kind| narrow_number(text, kind))
            .map_err(|failure| {
                let ty = self.types.name(ty.id).to_string();
                let literal = text.to_string();
                match failure {
                    Narrowing::OutOfRange => CompilationError::LiteralOutOfRange {
                        literal,
                        ty,
                        span: lit.span,
                    },
                    Narrowing::Invalid => CompilationError::InvalidLiteral {
                        literal,
                        ty,
                        span: lit.span,
                    },
                }
            })?;

        trace!(literal = text, ty = self.types.name(ty.id), "narrowed literal");
        lit.value = value;
        self.changed = true;
        Ok(())
    }
}

impl<'ast> Visitor<'ast> for LiteralNarrowing<'_> {
    fn visit_function(&mut self, func: &mut FunctionDecl<'ast>) -> VisitResult {
        self.return_type = func.return_type.resolved();
        Ok(Walk::Children)
    }

    fn visit_extern(&mut self, _func: &mut FunctionDecl<'ast>) -> VisitResult {
        Ok(Walk::Skip)
    }

    fn visit_return(&mut self, ret: &mut ReturnStmt<'ast>) -> VisitResult {
        if let (Some(value), Some(ty)) = (&mut ret.value, self.return_type) {
            self.narrow(value, ty)?;
        }
        Ok(Walk::Children)
    }

    fn visit_call(&mut self, call: &mut CallExpr<'ast>) -> VisitResult {
        let Expr::Variable(callee) = &call.callee else {
            return Ok(Walk::Children);
        };
        let VarRef::Function(func) = callee.var else {
            return Ok(Walk::Children);
        };
        let symbols = self.symbols;
        if let Some(symbol) = symbols.get(func.symbol) {
            // Arity is not checked here; extra arguments have no context.
            for (arg, param) in call.args.iter_mut().zip(&symbol.params) {
                self.narrow(arg, *param)?;
            }
        }
        Ok(Walk::Children)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Narrowing {
    OutOfRange,
    Invalid,
}

/// Parse number literal text as a value of `kind`.
fn narrow_number<'ast>(text: &str, kind: PrimitiveKind) -> Result<Literal<'ast>, Narrowing> {
    let digits: String = text.chars().filter(|c| *c != '_').collect();
    let hex = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"));

    if kind.is_float() {
        let value = match hex {
            Some(hex) => u64::from_str_radix(hex, 16).map_err(int_failure)? as f64,
            None => digits.parse::<f64>().map_err(|_| Narrowing::Invalid)?,
        };
        return match kind {
            PrimitiveKind::F32 => {
                let narrowed = value as f32;
                if narrowed.is_infinite() {
                    Err(Narrowing::OutOfRange)
                } else {
                    Ok(Literal::F32(narrowed))
                }
            }
            _ => Ok(Literal::F64(value)),
        };
    }

    if !kind.is_integer() || (hex.is_none() && digits.contains('.')) {
        return Err(Narrowing::Invalid);
    }

    let value = match hex {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => digits.parse::<u64>(),
    }
    .map_err(int_failure)?;

    let literal = match kind {
        PrimitiveKind::I8 => i8::try_from(value).map(Literal::I8),
        PrimitiveKind::I16 => i16::try_from(value).map(Literal::I16),
        PrimitiveKind::I32 => i32::try_from(value).map(Literal::I32),
        PrimitiveKind::I64 => i64::try_from(value).map(Literal::I64),
        PrimitiveKind::U8 => u8::try_from(value).map(Literal::U8),
        PrimitiveKind::U16 => u16::try_from(value).map(Literal::U16),
        PrimitiveKind::U32 => u32::try_from(value).map(Literal::U32),
        _ => Ok(Literal::U64(value)),
    };
    literal.map_err(|_| Narrowing::OutOfRange)
}

fn int_failure(error: std::num::ParseIntError) -> Narrowing {
    match error.kind() {
        IntErrorKind::PosOverflow => Narrowing::OutOfRange,
        _ => Narrowing::Invalid,
    }
}
