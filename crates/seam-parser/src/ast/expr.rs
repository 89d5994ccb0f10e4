//! Expression nodes.

use seam_core::{PrimitiveKind, Span, SymbolId};

#[derive(Debug, Clone, PartialEq)]
pub enum Expr<'ast> {
    Literal(LiteralExpr<'ast>),
    Call(Box<CallExpr<'ast>>),
    Variable(VariableExpr<'ast>),
}

impl<'ast> Expr<'ast> {
    pub fn span(&self) -> Span {
        match self {
            Expr::Literal(lit) => lit.span,
            Expr::Call(call) => call.span,
            Expr::Variable(var) => var.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpr<'ast> {
    pub span: Span,
    pub value: Literal<'ast>,
}

/// A literal value.
///
/// Number literals start out as [`Literal::Number`] holding their source
/// text and are narrowed to a sized variant once their type is known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal<'ast> {
    Bool(bool),
    /// String contents with escapes still raw.
    String(&'ast str),
    /// A number whose width and signedness are not decided yet.
    Number(&'ast str),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
}

impl<'ast> Literal<'ast> {
    /// The primitive this literal has, or `None` while it is still a bare number.
    pub fn kind(&self) -> Option<PrimitiveKind> {
        let kind = match self {
            Literal::Bool(_) => PrimitiveKind::Bool,
            Literal::String(_) => PrimitiveKind::String,
            Literal::Number(_) => return None,
            Literal::I8(_) => PrimitiveKind::I8,
            Literal::I16(_) => PrimitiveKind::I16,
            Literal::I32(_) => PrimitiveKind::I32,
            Literal::I64(_) => PrimitiveKind::I64,
            Literal::U8(_) => PrimitiveKind::U8,
            Literal::U16(_) => PrimitiveKind::U16,
            Literal::U32(_) => PrimitiveKind::U32,
            Literal::U64(_) => PrimitiveKind::U64,
            Literal::F32(_) => PrimitiveKind::F32,
            Literal::F64(_) => PrimitiveKind::F64,
        };
        Some(kind)
    }

    pub fn is_unclassified_number(&self) -> bool {
        matches!(self, Literal::Number(_))
    }
}

/// `callee(args...)`
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr<'ast> {
    pub span: Span,
    pub callee: Expr<'ast>,
    pub args: Vec<Expr<'ast>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableExpr<'ast> {
    pub span: Span,
    pub var: VarRef<'ast>,
}

/// What a variable name refers to.
///
/// Only function symbols are resolved; names of locals and parameters are
/// not bound to declarations yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarRef<'ast> {
    /// A bare name as written.
    Unresolved(&'ast str),
    /// Bound to a function declaration through its symbol.
    Function(FunctionVariable<'ast>),
}

impl<'ast> VarRef<'ast> {
    /// The name as written in source.
    pub fn name(&self) -> &'ast str {
        match self {
            VarRef::Unresolved(name) => name,
            VarRef::Function(func) => func.name,
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, VarRef::Unresolved(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionVariable<'ast> {
    pub name: &'ast str,
    pub symbol: SymbolId,
}
