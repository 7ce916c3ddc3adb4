//! Statement validation

use crate::ast::*;
use crate::semantic::errors::ValidationError;
use crate::semantic::expressions::expect_type;
use crate::semantic::symbols::SymbolInfo;
use crate::semantic::FunctionContext;
use crate::typed_ast::{TypedConditionalArm, TypedExpression, TypedStatement, TypedStatementKind};
use log::trace;
use wcc_common::{SourceLocation, Type};

impl<'a> FunctionContext<'a> {
    /// Validate a statement list in the current scope. Nothing may follow a
    /// `return` in the same list.
    pub(crate) fn validate_block(&mut self, statements: &[Statement]) -> Result<Vec<TypedStatement>, ValidationError> {
        let mut typed = Vec::with_capacity(statements.len());
        let mut returned = false;

        for statement in statements {
            if returned {
                return Err(ValidationError::UnreachableStatement {
                    location: statement.span.start,
                });
            }
            returned = matches!(statement.kind, StatementKind::Return(_));
            typed.push(self.validate_statement(statement)?);
        }

        Ok(typed)
    }

    /// Validate a body in a fresh child scope
    fn validate_nested_block(&mut self, statements: &[Statement]) -> Result<Vec<TypedStatement>, ValidationError> {
        self.env.push_scope();
        let result = self.validate_block(statements);
        self.env.pop_scope();
        result
    }

    fn validate_statement(&mut self, statement: &Statement) -> Result<TypedStatement, ValidationError> {
        let kind = match &statement.kind {
            StatementKind::Conditional { arms, else_body } => {
                let mut typed_arms = Vec::with_capacity(arms.len());
                for (index, arm) in arms.iter().enumerate() {
                    let context = if index == 0 { "'if' condition" } else { "'elif' condition" };
                    let condition = self.validate_condition(&arm.condition, context)?;
                    let body = self.validate_nested_block(&arm.body)?;
                    typed_arms.push(TypedConditionalArm {
                        condition,
                        body,
                        span: arm.span,
                    });
                }

                let else_body = match else_body {
                    Some(body) => Some(self.validate_nested_block(body)?),
                    None => None,
                };

                TypedStatementKind::Conditional {
                    arms: typed_arms,
                    else_body,
                }
            }

            StatementKind::Loop { condition, body } => {
                let condition = self.validate_condition(condition, "'while' condition")?;
                let body = self.validate_nested_block(body)?;
                TypedStatementKind::Loop { condition, body }
            }

            StatementKind::Return(value) => {
                TypedStatementKind::Return(self.validate_return(value.as_ref(), statement.span.start)?)
            }

            StatementKind::VariableDeclaration { name, declared_type, kind, initializer } => {
                // the name is not in scope inside its own initializer
                let initializer = self.validate_expression(initializer)?;
                expect_type(declared_type, &initializer, format!("initializer of '{name}'"))?;

                trace!("binding {name}: {declared_type} at scope depth {}", self.env.depth());
                self.env
                    .insert(name.clone(), SymbolInfo::new(declared_type.clone(), (*kind).into()));

                TypedStatementKind::VariableDeclaration {
                    name: name.clone(),
                    declared_type: declared_type.clone(),
                    kind: *kind,
                    initializer,
                }
            }

            StatementKind::Expression(expr) => TypedStatementKind::Expression(self.validate_expression(expr)?),
        };

        Ok(TypedStatement {
            node_id: statement.node_id,
            kind,
            span: statement.span,
        })
    }

    fn validate_condition(&mut self, condition: &Expression, context: &str) -> Result<TypedExpression, ValidationError> {
        let typed = self.validate_expression(condition)?;
        expect_type(&Type::i32(), &typed, context)?;
        Ok(typed)
    }

    fn validate_return(
        &mut self,
        value: Option<&Expression>,
        location: SourceLocation,
    ) -> Result<Option<TypedExpression>, ValidationError> {
        match value {
            None if self.return_type.is_void() => Ok(None),
            None => Err(ValidationError::MissingReturnValue {
                expected: self.return_type.clone(),
                location,
            }),
            Some(_) if self.return_type.is_void() => Err(ValidationError::UnexpectedReturnValue { location }),
            Some(value) => {
                let typed = self.validate_expression(value)?;
                expect_type(&self.return_type, &typed, "return value")?;
                Ok(Some(typed))
            }
        }
    }
}
