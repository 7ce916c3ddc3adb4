//! Expression emission
//!
//! Expressions compile to postfix stack code: operands first, then the
//! operator's instruction.

use crate::errors::CodegenError;
use crate::function::FunctionGenerator;
use crate::sexpr::SExpr;
use crate::wat::{binary_instruction, conversion_instruction, Instruction, ValueType};
use wcc_frontend::typed_ast::{TypedExpression, TypedExpressionKind};
use wcc_frontend::{BinaryOp, UnaryOp};

impl<'a> FunctionGenerator<'a> {
    pub(crate) fn emit_expression(&mut self, expr: &TypedExpression, out: &mut Vec<SExpr>) -> Result<(), CodegenError> {
        match &expr.kind {
            TypedExpressionKind::Identifier(name) => {
                let slot = self.slot_of(name)?;
                out.push(Instruction::LocalGet(slot).into());
            }

            TypedExpressionKind::Numeric { value, ty } => {
                let value_type = ValueType::from_basic(*ty).ok_or_else(|| CodegenError::VoidValue {
                    context: format!("literal {value}"),
                })?;
                out.push(Instruction::Const(value_type, value.clone()).into());
            }

            TypedExpressionKind::FunctionCall { name, arguments } => {
                for argument in arguments {
                    self.emit_expression(argument, out)?;
                }
                out.push(Instruction::Call(name.clone()).into());
            }

            TypedExpressionKind::Unary { op, operand } => match op {
                UnaryOp::Minus => {
                    // 0 - operand
                    let value_type = ValueType::from_type(&expr.result_type)?;
                    out.push(Instruction::Const(value_type, "0".to_string()).into());
                    self.emit_expression(operand, out)?;
                    out.push(binary_instruction(BinaryOp::Sub, &expr.result_type)?.into());
                }
                UnaryOp::Dereference => {
                    self.emit_expression(operand, out)?;
                    out.push(Instruction::Load(ValueType::from_type(&expr.result_type)?).into());
                }
                UnaryOp::LogicalNot => {
                    self.emit_expression(operand, out)?;
                    out.push(Instruction::Eqz(ValueType::I32).into());
                }
            },

            TypedExpressionKind::Binary {
                op: BinaryOp::Assign,
                left,
                right,
            } => self.emit_assignment(left, right, out)?,

            TypedExpressionKind::Binary { op, left, right } => {
                self.emit_expression(left, out)?;
                self.emit_expression(right, out)?;
                out.push(binary_instruction(*op, &left.result_type)?.into());
            }

            TypedExpressionKind::Composite(inner) => self.emit_expression(inner, out)?,

            TypedExpressionKind::TypeConversion { operand, target } => {
                self.emit_expression(operand, out)?;
                if let Some(instruction) = conversion_instruction(&operand.result_type, target)? {
                    out.push(instruction.into());
                }
            }
        }
        Ok(())
    }

    /// `x = v` sets a local; `@p = v` stores through the pointer
    fn emit_assignment(
        &mut self,
        target: &TypedExpression,
        value: &TypedExpression,
        out: &mut Vec<SExpr>,
    ) -> Result<(), CodegenError> {
        match &target.kind {
            TypedExpressionKind::Identifier(name) => {
                let slot = self.slot_of(name)?;
                self.emit_expression(value, out)?;
                out.push(Instruction::LocalSet(slot).into());
            }
            TypedExpressionKind::Unary {
                op: UnaryOp::Dereference,
                operand: address,
            } => {
                self.emit_expression(address, out)?;
                self.emit_expression(value, out)?;
                out.push(Instruction::Store(ValueType::from_type(&target.result_type)?).into());
            }
            _ => return Err(CodegenError::InvalidAssignmentTarget),
        }
        Ok(())
    }
}
