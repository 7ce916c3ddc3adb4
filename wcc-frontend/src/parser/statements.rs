//! Statement parsing

use crate::ast::*;
use crate::lexer::{Keyword, Operator, Special, TokenType};
use crate::parser::cursor::TokenCursor;
use crate::parser::errors::{ParseError, ParseResult};
use crate::parser::Parser;

impl<'t> Parser<'t> {
    /// Parse a `{ ... }` block into its statement list
    pub fn parse_block(&mut self, cursor: TokenCursor<'t>) -> ParseResult<'t, Vec<Statement>> {
        let (_, mut cursor) = cursor.expect_special(Special::LeftBrace, "block")?;
        let mut statements = Vec::new();

        while !cursor.peek().is_special(Special::RightBrace) {
            if cursor.is_at_end() {
                return Err(ParseError::UnexpectedToken {
                    expected: "'}' to close block".to_string(),
                    found: cursor.peek().clone(),
                });
            }
            let (statement, rest) = self.parse_statement(cursor)?;
            statements.push(statement);
            cursor = rest;
        }
        cursor.advance(); // '}'

        Ok((statements, cursor))
    }

    /// Parse a single statement
    pub fn parse_statement(&mut self, cursor: TokenCursor<'t>) -> ParseResult<'t, Statement> {
        match &cursor.peek().token_type {
            TokenType::Keyword(Keyword::If) => self.parse_conditional(cursor),
            TokenType::Keyword(Keyword::While) => self.parse_loop(cursor),
            TokenType::Keyword(Keyword::Return) => self.parse_return(cursor),
            TokenType::Keyword(Keyword::Var) => self.parse_declaration(cursor, DeclarationKind::Variable),
            TokenType::Keyword(Keyword::Const) => self.parse_declaration(cursor, DeclarationKind::Constant),
            _ => self.parse_expression_statement(cursor),
        }
    }

    /// `(` expression `)` as used by `if`, `elif` and `while`
    fn parse_condition(&mut self, cursor: TokenCursor<'t>, context: &str) -> ParseResult<'t, Expression> {
        let (_, cursor) = cursor.expect_special(Special::LeftParen, context)?;
        let (condition, cursor) = self.parse_expression(cursor)?;
        let (_, cursor) = cursor.expect_special(Special::RightParen, context)?;
        Ok((condition, cursor))
    }

    fn parse_conditional(&mut self, cursor: TokenCursor<'t>) -> ParseResult<'t, Statement> {
        let start = cursor.peek();
        let mut arms = Vec::new();
        let mut else_body = None;

        let (arm, mut cursor) = self.parse_conditional_arm(cursor, Keyword::If)?;
        arms.push(arm);

        while cursor.peek().is_keyword(Keyword::Elif) {
            let (arm, rest) = self.parse_conditional_arm(cursor, Keyword::Elif)?;
            arms.push(arm);
            cursor = rest;
        }

        if cursor.peek().is_keyword(Keyword::Else) {
            cursor.advance();
            let (body, rest) = self.parse_block(cursor)?;
            else_body = Some(body);
            cursor = rest;
        }

        let statement = Statement {
            node_id: self.node_ids.next(),
            kind: StatementKind::Conditional { arms, else_body },
            span: cursor.span_from(start),
        };
        Ok((statement, cursor))
    }

    fn parse_conditional_arm(&mut self, cursor: TokenCursor<'t>, keyword: Keyword) -> ParseResult<'t, ConditionalArm> {
        let start = cursor.peek();
        let context = format!("'{keyword}' condition");
        let (_, cursor) = cursor.expect_keyword(keyword, "conditional")?;
        let (condition, cursor) = self.parse_condition(cursor, &context)?;
        let (body, cursor) = self.parse_block(cursor)?;

        let arm = ConditionalArm {
            condition,
            body,
            span: cursor.span_from(start),
        };
        Ok((arm, cursor))
    }

    fn parse_loop(&mut self, cursor: TokenCursor<'t>) -> ParseResult<'t, Statement> {
        let start = cursor.peek();
        let (_, cursor) = cursor.expect_keyword(Keyword::While, "loop")?;
        let (condition, cursor) = self.parse_condition(cursor, "'while' condition")?;
        let (body, cursor) = self.parse_block(cursor)?;

        let statement = Statement {
            node_id: self.node_ids.next(),
            kind: StatementKind::Loop { condition, body },
            span: cursor.span_from(start),
        };
        Ok((statement, cursor))
    }

    fn parse_return(&mut self, cursor: TokenCursor<'t>) -> ParseResult<'t, Statement> {
        let start = cursor.peek();
        let (_, cursor) = cursor.expect_keyword(Keyword::Return, "return statement")?;

        let (value, cursor) = if cursor.peek().is_special(Special::Semicolon) {
            (None, cursor)
        } else {
            let (value, rest) = self.parse_expression(cursor)?;
            (Some(value), rest)
        };
        let (_, cursor) = cursor.expect_special(Special::Semicolon, "return statement")?;

        let statement = Statement {
            node_id: self.node_ids.next(),
            kind: StatementKind::Return(value),
            span: cursor.span_from(start),
        };
        Ok((statement, cursor))
    }

    /// `var name: type = expr;` or `const name: type = expr;`
    fn parse_declaration(&mut self, cursor: TokenCursor<'t>, kind: DeclarationKind) -> ParseResult<'t, Statement> {
        let start = cursor.peek();
        let keyword = match kind {
            DeclarationKind::Variable => Keyword::Var,
            DeclarationKind::Constant => Keyword::Const,
        };
        let (_, cursor) = cursor.expect_keyword(keyword, "declaration")?;
        let (name, cursor) = cursor.expect_identifier("declaration")?;
        let (_, cursor) = cursor.expect_special(Special::Colon, "declaration")?;
        let (declared_type, mut cursor) = self.parse_value_type(cursor)?;

        let assign = cursor.peek();
        if !assign.is_operator(Operator::Equal) {
            return Err(ParseError::UnexpectedToken {
                expected: "'=' and initializer in declaration".to_string(),
                found: assign.clone(),
            });
        }
        cursor.advance();

        let (initializer, cursor) = self.parse_expression(cursor)?;
        let (_, cursor) = cursor.expect_special(Special::Semicolon, "declaration")?;

        let statement = Statement {
            node_id: self.node_ids.next(),
            kind: StatementKind::VariableDeclaration {
                name,
                declared_type,
                kind,
                initializer,
            },
            span: cursor.span_from(start),
        };
        Ok((statement, cursor))
    }

    fn parse_expression_statement(&mut self, cursor: TokenCursor<'t>) -> ParseResult<'t, Statement> {
        let start = cursor.peek();
        let (expr, cursor) = self.parse_expression(cursor)?;
        let (_, cursor) = cursor.expect_special(Special::Semicolon, "expression statement")?;

        let statement = Statement {
            node_id: self.node_ids.next(),
            kind: StatementKind::Expression(expr),
            span: cursor.span_from(start),
        };
        Ok((statement, cursor))
    }
}
