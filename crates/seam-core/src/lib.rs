//! Core types shared by every stage of the Seam front end.
//!
//! - [`span`]: source positions and ranges
//! - [`error`]: lexical, syntactic and semantic error types
//! - [`ids`]: stable handles into the type and symbol tables
//! - [`primitive`]: the built-in primitive kinds

pub mod error;
pub mod ids;
pub mod primitive;
pub mod span;

pub use error::{CompilationError, LexError, ParseError, ParseErrorKind, ParseErrors, SeamError};
pub use ids::{SymbolId, TypeId};
pub use primitive::PrimitiveKind;
pub use span::{Position, Span};
