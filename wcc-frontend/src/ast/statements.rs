//! Statement AST nodes

use super::expressions::Expression;
use crate::ast::NodeId;
use serde::{Deserialize, Serialize};
use wcc_common::{SourceSpan, Type};

/// AST Statement nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub node_id: NodeId,
    pub kind: StatementKind,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StatementKind {
    /// `if` arm followed by any `elif` arms, then an optional `else` body
    Conditional {
        arms: Vec<ConditionalArm>,
        else_body: Option<Vec<Statement>>,
    },

    Loop {
        condition: Expression,
        body: Vec<Statement>,
    },

    Return(Option<Expression>),

    VariableDeclaration {
        name: String,
        declared_type: Type,
        kind: DeclarationKind,
        initializer: Expression,
    },

    Expression(Expression),
}

/// One `if`/`elif` condition and the body it guards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalArm {
    pub condition: Expression,
    pub body: Vec<Statement>,
    pub span: SourceSpan,
}

/// Whether a declared name may be assigned to later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclarationKind {
    Variable,
    Constant,
}
