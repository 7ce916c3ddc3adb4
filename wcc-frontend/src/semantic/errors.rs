//! Validation error definitions
//!
//! Every variant records the start of the node that failed; conversion into
//! `CompilerError` keeps that position and the rendered message.

use crate::semantic::symbols::SymbolKind;
use thiserror::Error;
use wcc_common::{CompilerError, SourceLocation, Type};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Function '{name}' is already defined")]
    DuplicateFunction { name: String, location: SourceLocation },

    #[error("Only one memory declaration is allowed")]
    MultipleMemories { location: SourceLocation },

    #[error("Exported memory '{name}' collides with an exported function of the same name")]
    ExportNameCollision { name: String, location: SourceLocation },

    #[error("Duplicate parameter '{name}'")]
    DuplicateParameter { name: String, location: SourceLocation },

    #[error("Parameter '{name}' cannot have type void")]
    VoidParameter { name: String, location: SourceLocation },

    #[error("Undefined variable: {name}")]
    UndefinedVariable { name: String, location: SourceLocation },

    #[error("Undefined function: {name}")]
    UndefinedFunction { name: String, location: SourceLocation },

    #[error("Type mismatch in {context}: expected {expected}, found {found}")]
    TypeMismatch {
        context: String,
        expected: Type,
        found: Type,
        location: SourceLocation,
    },

    #[error("Function '{name}' expects {expected} arguments, found {found}")]
    ArgumentCountMismatch {
        name: String,
        expected: usize,
        found: usize,
        location: SourceLocation,
    },

    #[error("Left side of assignment must be a variable or a dereferenced pointer")]
    InvalidAssignmentTarget { location: SourceLocation },

    #[error("Cannot assign to {kind} '{name}'")]
    AssignToImmutable {
        name: String,
        kind: SymbolKind,
        location: SourceLocation,
    },

    #[error("Operator '{operator}' cannot be applied to type {operand_type}")]
    InvalidOperand {
        operator: String,
        operand_type: Type,
        location: SourceLocation,
    },

    #[error("Operands of '{operator}' have different types: {left} and {right}")]
    OperandMismatch {
        operator: String,
        left: Type,
        right: Type,
        location: SourceLocation,
    },

    #[error("Missing return value in function returning {expected}")]
    MissingReturnValue { expected: Type, location: SourceLocation },

    #[error("Function returning void cannot return a value")]
    UnexpectedReturnValue { location: SourceLocation },

    #[error("Function '{name}' must end with a return statement")]
    MissingReturn { name: String, location: SourceLocation },

    #[error("Unreachable statement after return")]
    UnreachableStatement { location: SourceLocation },
}

impl ValidationError {
    pub fn location(&self) -> SourceLocation {
        match self {
            ValidationError::DuplicateFunction { location, .. }
            | ValidationError::MultipleMemories { location }
            | ValidationError::ExportNameCollision { location, .. }
            | ValidationError::DuplicateParameter { location, .. }
            | ValidationError::VoidParameter { location, .. }
            | ValidationError::UndefinedVariable { location, .. }
            | ValidationError::UndefinedFunction { location, .. }
            | ValidationError::TypeMismatch { location, .. }
            | ValidationError::ArgumentCountMismatch { location, .. }
            | ValidationError::InvalidAssignmentTarget { location }
            | ValidationError::AssignToImmutable { location, .. }
            | ValidationError::InvalidOperand { location, .. }
            | ValidationError::OperandMismatch { location, .. }
            | ValidationError::MissingReturnValue { location, .. }
            | ValidationError::UnexpectedReturnValue { location }
            | ValidationError::MissingReturn { location, .. }
            | ValidationError::UnreachableStatement { location } => *location,
        }
    }
}

impl From<ValidationError> for CompilerError {
    fn from(err: ValidationError) -> Self {
        CompilerError::validation_error(err.to_string(), err.location())
    }
}
