//! Typed AST representation
//!
//! The validator produces this tree in parallel to the parsed AST. It keeps
//! the same shape, every expression carries its resolved `result_type`, and
//! node ids and spans are copied over so later stages can still key side
//! tables and report positions.

mod expressions;
mod statements;
mod module;

// Re-export main types
pub use expressions::{TypedExpression, TypedExpressionKind};
pub use statements::{TypedConditionalArm, TypedStatement, TypedStatementKind};
pub use module::{TypedFunc, TypedFunctionDefinition, TypedModule};
