//! Typed statements

use super::expressions::TypedExpression;
use crate::ast::{DeclarationKind, NodeId};
use serde::{Deserialize, Serialize};
use wcc_common::{SourceSpan, Type};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedStatement {
    pub node_id: NodeId,
    pub kind: TypedStatementKind,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypedStatementKind {
    Conditional {
        arms: Vec<TypedConditionalArm>,
        else_body: Option<Vec<TypedStatement>>,
    },

    Loop {
        condition: TypedExpression,
        body: Vec<TypedStatement>,
    },

    Return(Option<TypedExpression>),

    VariableDeclaration {
        name: String,
        declared_type: Type,
        kind: DeclarationKind,
        initializer: TypedExpression,
    },

    Expression(TypedExpression),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedConditionalArm {
    pub condition: TypedExpression,
    pub body: Vec<TypedStatement>,
    pub span: SourceSpan,
}
