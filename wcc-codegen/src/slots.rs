//! Local slot allocation
//!
//! Parameters take slots `0..n` in signature order. Every variable or
//! constant declaration then gets the next free slot, in depth-first order
//! through the body including nested bodies. A redeclared name gets a fresh
//! slot like any other declaration.

use crate::errors::CodegenError;
use crate::wat::ValueType;
use log::trace;
use std::collections::HashMap;
use wcc_frontend::typed_ast::{TypedFunctionDefinition, TypedStatement, TypedStatementKind};
use wcc_frontend::NodeId;

#[derive(Debug, Default)]
pub struct SlotTable {
    slots: HashMap<NodeId, u32>,
    locals: Vec<ValueType>,
    next: u32,
}

impl SlotTable {
    /// Allocate slots for every declaration in a function body
    pub fn allocate(def: &TypedFunctionDefinition) -> Result<Self, CodegenError> {
        let mut table = SlotTable {
            next: def.signature.parameters.len() as u32,
            ..Default::default()
        };
        table.visit_block(&def.body)?;
        Ok(table)
    }

    /// Slot minted for the declaration with this node id
    pub fn slot_for(&self, node_id: NodeId) -> Result<u32, CodegenError> {
        self.slots
            .get(&node_id)
            .copied()
            .ok_or(CodegenError::MissingSlot { node_id })
    }

    /// Value types of the non-parameter locals, in slot order
    pub fn locals(&self) -> &[ValueType] {
        &self.locals
    }

    fn visit_block(&mut self, statements: &[TypedStatement]) -> Result<(), CodegenError> {
        for statement in statements {
            match &statement.kind {
                TypedStatementKind::VariableDeclaration { name, declared_type, .. } => {
                    let slot = self.next;
                    self.next += 1;
                    self.slots.insert(statement.node_id, slot);
                    self.locals.push(ValueType::from_type(declared_type)?);
                    trace!("slot {slot} -> {name}: {declared_type}");
                }
                TypedStatementKind::Conditional { arms, else_body } => {
                    for arm in arms {
                        self.visit_block(&arm.body)?;
                    }
                    if let Some(body) = else_body {
                        self.visit_block(body)?;
                    }
                }
                TypedStatementKind::Loop { body, .. } => self.visit_block(body)?,
                TypedStatementKind::Return(_) | TypedStatementKind::Expression(_) => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wcc_frontend::typed_ast::TypedFunc;
    use wcc_frontend::Frontend;

    fn allocate(source: &str) -> (SlotTable, TypedFunctionDefinition) {
        let module = Frontend::validate_source(source).unwrap();
        let def = match module.funcs.into_iter().next() {
            Some(TypedFunc::Plain(def)) | Some(TypedFunc::Export(def)) => def,
            other => panic!("Expected function with body, got {other:?}"),
        };
        (SlotTable::allocate(&def).unwrap(), def)
    }

    #[test]
    fn test_locals_follow_parameters() {
        let (table, def) = allocate("func f(a: i32, b: f64): void { var x: i64 = 1l; var y: f32 = 2.0; }");
        assert_eq!(table.locals(), &[ValueType::I64, ValueType::F32]);
        assert_eq!(table.slot_for(def.body[0].node_id).unwrap(), 2);
        assert_eq!(table.slot_for(def.body[1].node_id).unwrap(), 3);
    }

    #[test]
    fn test_nested_and_redeclared_names() {
        let source = "func f(c: i32): void { var x: i32 = 1; if (c) { var x: *u32 = 0 as *u32; } var x: u64 = 2ul; }";
        let (table, def) = allocate(source);

        assert_eq!(table.locals(), &[ValueType::I32, ValueType::I32, ValueType::I64]);
        assert_eq!(table.slot_for(def.body[0].node_id).unwrap(), 1);
        match &def.body[1].kind {
            TypedStatementKind::Conditional { arms, .. } => {
                assert_eq!(table.slot_for(arms[0].body[0].node_id).unwrap(), 2);
            }
            other => panic!("Expected conditional, got {other:?}"),
        }
        assert_eq!(table.slot_for(def.body[2].node_id).unwrap(), 3);
    }

    #[test]
    fn test_missing_slot() {
        let (table, def) = allocate("func f(): void { return; }");
        assert!(table.locals().is_empty());
        assert_eq!(
            table.slot_for(def.body[0].node_id),
            Err(CodegenError::MissingSlot { node_id: def.body[0].node_id })
        );
    }
}
