//! Abstract Syntax Tree definitions
//!
//! This module defines the AST nodes produced by the parser. The validator
//! turns this tree into the typed AST in `crate::typed_ast`.

pub mod ops;
pub mod expressions;
pub mod statements;
pub mod declarations;

// Re-export commonly used types at module level
pub use ops::{BinaryOp, UnaryOp};
pub use expressions::{Expression, ExpressionKind};
pub use statements::{ConditionalArm, DeclarationKind, Statement, StatementKind};
pub use declarations::{
    Func, FunctionDefinition, FunctionImport, ImportLocation, Memory, MemoryKind, Module,
    Parameter, Signature,
};

/// Unique identifier for AST nodes; side tables are keyed by it
pub type NodeId = u32;

/// Node ID generator for AST nodes
#[derive(Debug, Clone, Default)]
pub struct NodeIdGenerator {
    next_id: NodeId,
}

impl NodeIdGenerator {
    pub fn new() -> Self {
        Self { next_id: 0 }
    }

    pub fn next(&mut self) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_generator() {
        let mut gen = NodeIdGenerator::new();
        assert_eq!(gen.next(), 0);
        assert_eq!(gen.next(), 1);
        assert_eq!(gen.next(), 2);
    }
}
