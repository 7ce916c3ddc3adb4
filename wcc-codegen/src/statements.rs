//! Statement emission
//!
//! Control flow lowers onto `block`/`loop` with conditional exits:
//!
//! ```text
//! if (c) { .. }            while (c) { .. }
//!
//! (block                   (loop
//!   c i32.eqz br_if 0        (block
//!   ..                         c i32.eqz br_if 0
//! )                            ..
//!                              br 1
//!                            )
//!                          )
//! ```
//!
//! With `elif` or `else`, each arm gets its own block inside an outer block
//! and ends with `br 1` to skip the remaining arms; the `else` body follows
//! the arm blocks.

use crate::errors::CodegenError;
use crate::function::FunctionGenerator;
use crate::sexpr::SExpr;
use crate::wat::{Instruction, ValueType};
use log::trace;
use wcc_frontend::typed_ast::{TypedConditionalArm, TypedExpression, TypedStatement, TypedStatementKind};

impl<'a> FunctionGenerator<'a> {
    pub(crate) fn emit_block(&mut self, statements: &[TypedStatement], out: &mut Vec<SExpr>) -> Result<(), CodegenError> {
        for statement in statements {
            self.emit_statement(statement, out)?;
        }
        Ok(())
    }

    /// Emit a body in its own scope, returning its instructions
    fn emit_nested(&mut self, statements: &[TypedStatement]) -> Result<Vec<SExpr>, CodegenError> {
        let mut body = Vec::new();
        self.env.push_scope();
        let result = self.emit_block(statements, &mut body);
        self.env.pop_scope();
        result.map(|()| body)
    }

    fn emit_statement(&mut self, statement: &TypedStatement, out: &mut Vec<SExpr>) -> Result<(), CodegenError> {
        match &statement.kind {
            TypedStatementKind::VariableDeclaration { name, initializer, .. } => {
                self.emit_expression(initializer, out)?;
                let slot = self.slots.slot_for(statement.node_id)?;
                out.push(Instruction::LocalSet(slot).into());
                trace!("{name} now in slot {slot}");
                self.env.insert(name.clone(), slot);
            }

            TypedStatementKind::Return(value) => {
                if let Some(value) = value {
                    self.emit_expression(value, out)?;
                }
                out.push(Instruction::Return.into());
            }

            TypedStatementKind::Expression(expr) => {
                self.emit_expression(expr, out)?;
                if expr.produces_value() {
                    out.push(Instruction::Drop.into());
                }
            }

            TypedStatementKind::Conditional { arms, else_body } => {
                self.emit_conditional(arms, else_body.as_deref(), out)?;
            }

            TypedStatementKind::Loop { condition, body } => {
                let mut inner = Vec::new();
                self.emit_exit_unless(condition, &mut inner)?;
                inner.extend(self.emit_nested(body)?);
                inner.push(Instruction::Br(1).into());

                let block = SExpr::block(vec![SExpr::atom("block")], inner);
                out.push(SExpr::block(vec![SExpr::atom("loop")], vec![block]));
            }
        }
        Ok(())
    }

    fn emit_conditional(
        &mut self,
        arms: &[TypedConditionalArm],
        else_body: Option<&[TypedStatement]>,
        out: &mut Vec<SExpr>,
    ) -> Result<(), CodegenError> {
        if let ([arm], None) = (arms, else_body) {
            let mut inner = Vec::new();
            self.emit_exit_unless(&arm.condition, &mut inner)?;
            inner.extend(self.emit_nested(&arm.body)?);
            out.push(SExpr::block(vec![SExpr::atom("block")], inner));
            return Ok(());
        }

        let mut outer = Vec::new();
        for arm in arms {
            let mut inner = Vec::new();
            self.emit_exit_unless(&arm.condition, &mut inner)?;
            inner.extend(self.emit_nested(&arm.body)?);
            inner.push(Instruction::Br(1).into());
            outer.push(SExpr::block(vec![SExpr::atom("block")], inner));
        }
        if let Some(body) = else_body {
            outer.extend(self.emit_nested(body)?);
        }
        out.push(SExpr::block(vec![SExpr::atom("block")], outer));
        Ok(())
    }

    /// Leave the enclosing block when `condition` is zero
    fn emit_exit_unless(&mut self, condition: &TypedExpression, out: &mut Vec<SExpr>) -> Result<(), CodegenError> {
        self.emit_expression(condition, out)?;
        out.push(Instruction::Eqz(ValueType::I32).into());
        out.push(Instruction::BrIf(0).into());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::compile;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_first_local_slot_follows_parameters() {
        let wat = compile("func f(a: i32, b: i32, c: i32): void { var x: i64 = 5l; }").unwrap();
        let expected = indoc! {"
            (module
              (func $f (param i32 i32 i32)
                (local i64)
                i64.const 5
                local.set 3
              )
            )
        "};
        assert_eq!(wat, expected);
    }

    #[test]
    fn test_drop_only_for_values() {
        let source = indoc! {"
            func v(): void { }
            func n(): i32 { return 1; }
            func f(): void {
                v();
                n();
            }
        "};
        let wat = compile(source).unwrap();
        assert!(wat.contains("    call $v\n    call $n\n    drop\n"), "{wat}");
    }

    #[test]
    fn test_single_arm_conditional() {
        let wat = compile("func f(a: i32): i32 { if (a) { return 1; } return 0; }").unwrap();
        let expected = indoc! {"
            (module
              (func $f (param i32) (result i32)
                (block
                  local.get 0
                  i32.eqz
                  br_if 0
                  i32.const 1
                  return
                )
                i32.const 0
                return
              )
            )
        "};
        assert_eq!(wat, expected);
    }

    #[test]
    fn test_elif_else_chain() {
        let source = indoc! {"
            func f(a: i32): i32 {
                var r: i32 = 0;
                if (a == 1) {
                    r = 10;
                } elif (a == 2) {
                    r = 20;
                } else {
                    r = 30;
                }
                return r;
            }
        "};
        let expected = indoc! {"
            (module
              (func $f (param i32) (result i32)
                (local i32)
                i32.const 0
                local.set 1
                (block
                  (block
                    local.get 0
                    i32.const 1
                    i32.eq
                    i32.eqz
                    br_if 0
                    i32.const 10
                    local.set 1
                    br 1
                  )
                  (block
                    local.get 0
                    i32.const 2
                    i32.eq
                    i32.eqz
                    br_if 0
                    i32.const 20
                    local.set 1
                    br 1
                  )
                  i32.const 30
                  local.set 1
                )
                local.get 1
                return
              )
            )
        "};
        assert_eq!(compile(source).unwrap(), expected);
    }

    #[test]
    fn test_shadowed_name_restored_after_block() {
        let source = indoc! {"
            func f(c: i32): i32 {
                var x: i32 = 1;
                var y: i32 = c;
                while (y) {
                    var x: i32 = 0;
                    y = x;
                }
                return x;
            }
        "};
        let wat = compile(source).unwrap();
        // inner x lives in slot 3, the outer x in slot 1
        assert!(wat.contains("local.get 3\n        local.set 2\n"), "{wat}");
        assert!(wat.contains("    local.get 1\n    return\n"), "{wat}");
    }
}
