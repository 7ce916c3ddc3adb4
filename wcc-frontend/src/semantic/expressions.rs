//! Expression validation
//!
//! Types must match exactly; there are no implicit conversions anywhere.

use crate::ast::*;
use crate::semantic::errors::ValidationError;
use crate::semantic::symbols::SymbolInfo;
use crate::semantic::FunctionContext;
use crate::typed_ast::{TypedExpression, TypedExpressionKind};
use wcc_common::{SourceLocation, Type};

type Checked = (TypedExpressionKind, Type);

/// Fail unless `expr` has exactly the `expected` type
pub(crate) fn expect_type(
    expected: &Type,
    expr: &TypedExpression,
    context: impl Into<String>,
) -> Result<(), ValidationError> {
    if &expr.result_type == expected {
        return Ok(());
    }
    Err(ValidationError::TypeMismatch {
        context: context.into(),
        expected: expected.clone(),
        found: expr.result_type.clone(),
        location: expr.span.start,
    })
}

impl<'a> FunctionContext<'a> {
    pub(crate) fn validate_expression(&mut self, expr: &Expression) -> Result<TypedExpression, ValidationError> {
        let location = expr.span.start;
        let (kind, result_type) = match &expr.kind {
            ExpressionKind::Identifier(name) => {
                let ty = self.lookup(name, location)?.ty.clone();
                (TypedExpressionKind::Identifier(name.clone()), ty)
            }

            ExpressionKind::Numeric { value, ty } => (
                TypedExpressionKind::Numeric {
                    value: value.clone(),
                    ty: *ty,
                },
                Type::Basic(*ty),
            ),

            ExpressionKind::FunctionCall { name, arguments } => self.validate_call(name, arguments, location)?,

            ExpressionKind::Unary { op, operand } => self.validate_unary(*op, operand, location)?,

            ExpressionKind::Binary {
                op: BinaryOp::Assign,
                left,
                right,
            } => self.validate_assignment(left, right)?,

            ExpressionKind::Binary { op, left, right } => self.validate_binary(*op, left, right, location)?,

            ExpressionKind::Composite(inner) => {
                let inner = self.validate_expression(inner)?;
                let ty = inner.result_type.clone();
                (TypedExpressionKind::Composite(Box::new(inner)), ty)
            }

            ExpressionKind::TypeConversion { operand, target } => {
                let operand = self.validate_expression(operand)?;
                if operand.result_type.is_void() {
                    return Err(ValidationError::InvalidOperand {
                        operator: "as".to_string(),
                        operand_type: operand.result_type,
                        location,
                    });
                }
                (
                    TypedExpressionKind::TypeConversion {
                        operand: Box::new(operand),
                        target: target.clone(),
                    },
                    target.clone(),
                )
            }
        };

        Ok(TypedExpression {
            node_id: expr.node_id,
            kind,
            result_type,
            span: expr.span,
        })
    }

    fn lookup(&self, name: &str, location: SourceLocation) -> Result<&SymbolInfo, ValidationError> {
        self.env
            .lookup(name)
            .ok_or_else(|| ValidationError::UndefinedVariable {
                name: name.to_string(),
                location,
            })
    }

    fn validate_call(
        &mut self,
        name: &str,
        arguments: &[Expression],
        location: SourceLocation,
    ) -> Result<Checked, ValidationError> {
        let functions = self.functions;
        let signature = functions
            .get(name)
            .ok_or_else(|| ValidationError::UndefinedFunction {
                name: name.to_string(),
                location,
            })?;

        if arguments.len() != signature.parameters.len() {
            return Err(ValidationError::ArgumentCountMismatch {
                name: name.to_string(),
                expected: signature.parameters.len(),
                found: arguments.len(),
                location,
            });
        }

        let mut typed_arguments = Vec::with_capacity(arguments.len());
        for (index, (argument, param)) in arguments.iter().zip(&signature.parameters).enumerate() {
            let typed = self.validate_expression(argument)?;
            expect_type(
                &param.param_type,
                &typed,
                format!("argument {} of call to '{name}'", index + 1),
            )?;
            typed_arguments.push(typed);
        }

        Ok((
            TypedExpressionKind::FunctionCall {
                name: name.to_string(),
                arguments: typed_arguments,
            },
            signature.return_type.clone(),
        ))
    }

    fn validate_unary(
        &mut self,
        op: UnaryOp,
        operand: &Expression,
        location: SourceLocation,
    ) -> Result<Checked, ValidationError> {
        let operand = self.validate_expression(operand)?;
        let invalid = |operand: &TypedExpression| ValidationError::InvalidOperand {
            operator: op.to_string(),
            operand_type: operand.result_type.clone(),
            location,
        };

        let result_type = match op {
            UnaryOp::Minus => {
                if operand.result_type.is_void() {
                    return Err(invalid(&operand));
                }
                operand.result_type.clone()
            }
            UnaryOp::Dereference => match operand.result_type.pointee() {
                Some(pointee) => pointee.clone(),
                None => return Err(invalid(&operand)),
            },
            UnaryOp::LogicalNot => {
                expect_type(&Type::i32(), &operand, format!("operand of '{op}'"))?;
                Type::i32()
            }
        };

        Ok((
            TypedExpressionKind::Unary {
                op,
                operand: Box::new(operand),
            },
            result_type,
        ))
    }

    /// Assignment targets a mutable variable or a dereferenced pointer and
    /// yields no value
    fn validate_assignment(&mut self, target: &Expression, value: &Expression) -> Result<Checked, ValidationError> {
        let location = target.span.start;
        let target = match &target.kind {
            ExpressionKind::Identifier(name) => {
                let info = self.lookup(name, location)?;
                if !info.kind.is_mutable() {
                    return Err(ValidationError::AssignToImmutable {
                        name: name.clone(),
                        kind: info.kind,
                        location,
                    });
                }
                TypedExpression {
                    node_id: target.node_id,
                    kind: TypedExpressionKind::Identifier(name.clone()),
                    result_type: info.ty.clone(),
                    span: target.span,
                }
            }
            ExpressionKind::Unary {
                op: UnaryOp::Dereference,
                ..
            } => self.validate_expression(target)?,
            _ => return Err(ValidationError::InvalidAssignmentTarget { location }),
        };

        let value = self.validate_expression(value)?;
        expect_type(&target.result_type, &value, "assignment")?;

        Ok((
            TypedExpressionKind::Binary {
                op: BinaryOp::Assign,
                left: Box::new(target),
                right: Box::new(value),
            },
            Type::void(),
        ))
    }

    fn validate_binary(
        &mut self,
        op: BinaryOp,
        left: &Expression,
        right: &Expression,
        location: SourceLocation,
    ) -> Result<Checked, ValidationError> {
        let left = self.validate_expression(left)?;
        let right = self.validate_expression(right)?;
        let operand_type = left.result_type.clone();

        if operand_type.is_void() || (op.requires_integer() && !operand_type.is_integer()) {
            return Err(ValidationError::InvalidOperand {
                operator: op.to_string(),
                operand_type,
                location,
            });
        }
        if right.result_type != operand_type {
            return Err(ValidationError::OperandMismatch {
                operator: op.to_string(),
                left: operand_type,
                right: right.result_type,
                location,
            });
        }

        let result_type = if op.is_comparison() { Type::i32() } else { operand_type };
        Ok((
            TypedExpressionKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            result_type,
        ))
    }
}
