//! Code generation error types
//!
//! The generator only sees validated modules, so each of these is a broken
//! contract between the stages and surfaces as an internal compiler error.

use thiserror::Error;
use wcc_common::{CompilerError, Type};
use wcc_frontend::NodeId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodegenError {
    #[error("no conversion from {from} to {to}")]
    UnmappedConversion { from: Type, to: Type },

    #[error("void has no value type ({context})")]
    VoidValue { context: String },

    #[error("operator '{operator}' has no instruction for type {ty}")]
    UnsupportedOperator { operator: String, ty: Type },

    #[error("no slot allocated for declaration node {node_id}")]
    MissingSlot { node_id: NodeId },

    #[error("name '{name}' is not bound to a slot")]
    UnboundName { name: String },

    #[error("invalid assignment target")]
    InvalidAssignmentTarget,
}

impl From<CodegenError> for CompilerError {
    fn from(err: CodegenError) -> Self {
        CompilerError::internal_error(err.to_string())
    }
}
