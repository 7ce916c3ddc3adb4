//! Typed expressions

use crate::ast::{BinaryOp, NodeId, UnaryOp};
use serde::{Deserialize, Serialize};
use wcc_common::{BasicType, SourceSpan, Type};

/// Typed expression - produced by validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedExpression {
    pub node_id: NodeId,
    pub kind: TypedExpressionKind,
    pub result_type: Type,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypedExpressionKind {
    Identifier(String),

    Numeric {
        value: String,
        ty: BasicType,
    },

    FunctionCall {
        name: String,
        arguments: Vec<TypedExpression>,
    },

    Unary {
        op: UnaryOp,
        operand: Box<TypedExpression>,
    },

    /// Includes assignment; its left side is an identifier or a dereference
    Binary {
        op: BinaryOp,
        left: Box<TypedExpression>,
        right: Box<TypedExpression>,
    },

    Composite(Box<TypedExpression>),

    TypeConversion {
        operand: Box<TypedExpression>,
        target: Type,
    },
}

impl TypedExpression {
    /// Whether evaluating this expression leaves a value on the stack
    pub fn produces_value(&self) -> bool {
        !self.result_type.is_void()
    }
}
