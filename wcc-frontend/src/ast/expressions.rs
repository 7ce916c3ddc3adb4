//! Expression AST nodes

use super::ops::{BinaryOp, UnaryOp};
use crate::ast::NodeId;
use serde::{Deserialize, Serialize};
use wcc_common::{BasicType, SourceSpan, Type};

/// AST Expression nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    pub node_id: NodeId,
    pub kind: ExpressionKind,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExpressionKind {
    Identifier(String),

    /// Numeric literal; the type was fixed by the lexer
    Numeric {
        value: String,
        ty: BasicType,
    },

    FunctionCall {
        name: String,
        arguments: Vec<Expression>,
    },

    Unary {
        op: UnaryOp,
        operand: Box<Expression>,
    },

    Binary {
        op: BinaryOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },

    /// Parenthesized sub-expression
    Composite(Box<Expression>),

    /// `operand as target`
    TypeConversion {
        operand: Box<Expression>,
        target: Type,
    },
}
