//! Expression parsing
//!
//! Binary operators are handled by precedence climbing over
//! `PRECEDENCE_LEVELS`: each level parses its operands by recursing into
//! the next tighter level and folds them left to right. Below the last level
//! sits the operand parser, which tries each kind of operand in turn on its
//! own copy of the cursor.

use crate::ast::*;
use crate::lexer::{Keyword, Operator, Special, TokenType};
use crate::parser::cursor::TokenCursor;
use crate::parser::errors::{ParseError, ParseResult};
use crate::parser::Parser;
use wcc_common::SourceSpan;

/// Binary operator levels, loosest binding first
const PRECEDENCE_LEVELS: &[&[(Operator, BinaryOp)]] = &[
    &[(Operator::Equal, BinaryOp::Assign)],
    &[
        (Operator::Less, BinaryOp::Less),
        (Operator::LessEqual, BinaryOp::LessEqual),
        (Operator::Greater, BinaryOp::Greater),
        (Operator::GreaterEqual, BinaryOp::GreaterEqual),
    ],
    &[
        (Operator::EqualEqual, BinaryOp::Equal),
        (Operator::BangEqual, BinaryOp::NotEqual),
    ],
    &[
        (Operator::Ampersand, BinaryOp::BitAnd),
        (Operator::Pipe, BinaryOp::BitOr),
        (Operator::Caret, BinaryOp::BitXor),
    ],
    &[
        (Operator::LeftShift, BinaryOp::LeftShift),
        (Operator::RightShift, BinaryOp::RightShift),
    ],
    &[
        (Operator::Plus, BinaryOp::Add),
        (Operator::Minus, BinaryOp::Sub),
    ],
    &[
        (Operator::Star, BinaryOp::Mul),
        (Operator::Slash, BinaryOp::Div),
        (Operator::Percent, BinaryOp::Rem),
    ],
];

type OperandAttempt<'t> = fn(&mut Parser<'t>, TokenCursor<'t>) -> ParseResult<'t, Expression>;

impl<'t> Parser<'t> {
    /// Parse expression (top level)
    pub fn parse_expression(&mut self, cursor: TokenCursor<'t>) -> ParseResult<'t, Expression> {
        self.parse_binary_level(cursor, 0)
    }

    fn parse_binary_level(&mut self, cursor: TokenCursor<'t>, level: usize) -> ParseResult<'t, Expression> {
        let Some(operators) = PRECEDENCE_LEVELS.get(level) else {
            return self.parse_operand(cursor);
        };

        let (mut left, mut cursor) = self.parse_binary_level(cursor, level + 1)?;

        loop {
            let op = match &cursor.peek().token_type {
                TokenType::Operator(found) => operators
                    .iter()
                    .find(|(operator, _)| operator == found)
                    .map(|(_, op)| *op),
                _ => None,
            };
            let Some(op) = op else { break };

            let mut after_operator = cursor;
            after_operator.advance();
            let (right, rest) = self.parse_binary_level(after_operator, level + 1)?;

            let span = left.span.to(&right.span);
            left = Expression {
                node_id: self.node_ids.next(),
                kind: ExpressionKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            };
            cursor = rest;
        }

        Ok((left, cursor))
    }

    /// Parse an operand followed by any number of `as <type>` conversions
    fn parse_operand(&mut self, cursor: TokenCursor<'t>) -> ParseResult<'t, Expression> {
        let (mut expr, mut cursor) = self.parse_prefixed_operand(cursor)?;

        while cursor.peek().is_keyword(Keyword::As) {
            let mut after_as = cursor;
            after_as.advance();
            let (target, rest) = self.parse_value_type(after_as)?;

            let span = SourceSpan::new(
                expr.span.start,
                rest.previous().map_or(expr.span.end, |token| token.span.end),
            );
            expr = Expression {
                node_id: self.node_ids.next(),
                kind: ExpressionKind::TypeConversion {
                    operand: Box::new(expr),
                    target,
                },
                span,
            };
            cursor = rest;
        }

        Ok((expr, cursor))
    }

    /// Try each operand form against a private copy of the cursor.
    ///
    /// An attempt that fails on the very first token just means "not this
    /// form" and the next one is tried. A failure further in is the real
    /// error and is returned unchanged.
    fn parse_prefixed_operand(&mut self, cursor: TokenCursor<'t>) -> ParseResult<'t, Expression> {
        let start = cursor.peek();
        let attempts: [OperandAttempt<'t>; 4] = [
            Self::parse_numeric,
            Self::parse_identifier_or_call,
            Self::parse_composite,
            Self::parse_unary,
        ];

        for attempt in attempts {
            match attempt(self, cursor) {
                Ok(parsed) => return Ok(parsed),
                Err(err) if err.token().span == start.span => continue,
                Err(err) => return Err(err),
            }
        }

        Err(ParseError::UnexpectedToken {
            expected: "expression".to_string(),
            found: start.clone(),
        })
    }

    fn parse_numeric(&mut self, mut cursor: TokenCursor<'t>) -> ParseResult<'t, Expression> {
        let token = cursor.peek();
        let TokenType::Number { value, ty } = &token.token_type else {
            return Err(ParseError::UnexpectedToken {
                expected: "numeric literal".to_string(),
                found: token.clone(),
            });
        };
        cursor.advance();

        let expr = Expression {
            node_id: self.node_ids.next(),
            kind: ExpressionKind::Numeric {
                value: value.clone(),
                ty: *ty,
            },
            span: token.span,
        };
        Ok((expr, cursor))
    }

    fn parse_identifier_or_call(&mut self, cursor: TokenCursor<'t>) -> ParseResult<'t, Expression> {
        let start = cursor.peek();
        let (name, mut cursor) = cursor.expect_identifier("expression")?;

        if !cursor.peek().is_special(Special::LeftParen) {
            let expr = Expression {
                node_id: self.node_ids.next(),
                kind: ExpressionKind::Identifier(name),
                span: start.span,
            };
            return Ok((expr, cursor));
        }

        cursor.advance(); // '('
        let mut arguments = Vec::new();
        while !cursor.peek().is_special(Special::RightParen) {
            let (argument, rest) = self.parse_expression(cursor)?;
            arguments.push(argument);
            cursor = rest;

            let next = cursor.peek();
            if next.is_special(Special::Comma) {
                cursor.advance();
            } else if !next.is_special(Special::RightParen) {
                return Err(ParseError::UnexpectedToken {
                    expected: "',' or ')' in argument list".to_string(),
                    found: next.clone(),
                });
            }
        }
        cursor.advance(); // ')'

        let expr = Expression {
            node_id: self.node_ids.next(),
            kind: ExpressionKind::FunctionCall { name, arguments },
            span: cursor.span_from(start),
        };
        Ok((expr, cursor))
    }

    fn parse_composite(&mut self, cursor: TokenCursor<'t>) -> ParseResult<'t, Expression> {
        let start = cursor.peek();
        let (_, cursor) = cursor.expect_special(Special::LeftParen, "parenthesized expression")?;
        let (inner, cursor) = self.parse_expression(cursor)?;
        let (_, cursor) = cursor.expect_special(Special::RightParen, "parenthesized expression")?;

        let expr = Expression {
            node_id: self.node_ids.next(),
            kind: ExpressionKind::Composite(Box::new(inner)),
            span: cursor.span_from(start),
        };
        Ok((expr, cursor))
    }

    fn parse_unary(&mut self, mut cursor: TokenCursor<'t>) -> ParseResult<'t, Expression> {
        let start = cursor.peek();
        let op = match &start.token_type {
            TokenType::Operator(op) => UnaryOp::from_operator(*op),
            _ => None,
        };
        let Some(op) = op else {
            return Err(ParseError::UnexpectedToken {
                expected: "unary operator".to_string(),
                found: start.clone(),
            });
        };
        cursor.advance();

        let (operand, cursor) = self.parse_prefixed_operand(cursor)?;
        let span = start.span.to(&operand.span);
        let expr = Expression {
            node_id: self.node_ids.next(),
            kind: ExpressionKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        };
        Ok((expr, cursor))
    }
}
