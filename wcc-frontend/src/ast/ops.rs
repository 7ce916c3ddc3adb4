//! Operator definitions
//!
//! This module defines binary and unary operators used in expressions.

use crate::lexer::Operator;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    // Arithmetic
    Add, Sub, Mul, Div, Rem,

    // Bitwise
    BitAnd, BitOr, BitXor, LeftShift, RightShift,

    // Comparison
    Equal, NotEqual, Less, Greater, LessEqual, GreaterEqual,

    Assign,
}

impl BinaryOp {
    /// Map a lexer operator to its binary meaning
    pub fn from_operator(op: Operator) -> Option<Self> {
        let binary = match op {
            Operator::Equal => BinaryOp::Assign,
            Operator::EqualEqual => BinaryOp::Equal,
            Operator::BangEqual => BinaryOp::NotEqual,
            Operator::Less => BinaryOp::Less,
            Operator::LessEqual => BinaryOp::LessEqual,
            Operator::Greater => BinaryOp::Greater,
            Operator::GreaterEqual => BinaryOp::GreaterEqual,
            Operator::Plus => BinaryOp::Add,
            Operator::Minus => BinaryOp::Sub,
            Operator::Star => BinaryOp::Mul,
            Operator::Slash => BinaryOp::Div,
            Operator::Percent => BinaryOp::Rem,
            Operator::Ampersand => BinaryOp::BitAnd,
            Operator::Pipe => BinaryOp::BitOr,
            Operator::Caret => BinaryOp::BitXor,
            Operator::LeftShift => BinaryOp::LeftShift,
            Operator::RightShift => BinaryOp::RightShift,
            Operator::Bang | Operator::At => return None,
        };
        Some(binary)
    }

    /// Comparisons always produce `i32`
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOp::Equal
                | BinaryOp::NotEqual
                | BinaryOp::Less
                | BinaryOp::Greater
                | BinaryOp::LessEqual
                | BinaryOp::GreaterEqual
        )
    }

    /// Operators that only accept integer operands
    pub fn requires_integer(&self) -> bool {
        matches!(
            self,
            BinaryOp::Rem
                | BinaryOp::BitAnd
                | BinaryOp::BitOr
                | BinaryOp::BitXor
                | BinaryOp::LeftShift
                | BinaryOp::RightShift
        )
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op_str = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::LeftShift => "<<",
            BinaryOp::RightShift => ">>",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Less => "<",
            BinaryOp::Greater => ">",
            BinaryOp::LessEqual => "<=",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::Assign => "=",
        };
        write!(f, "{}", op_str)
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    Minus,
    /// `@p`: load through a pointer
    Dereference,
    LogicalNot,
}

impl UnaryOp {
    pub fn from_operator(op: Operator) -> Option<Self> {
        match op {
            Operator::Minus => Some(UnaryOp::Minus),
            Operator::At => Some(UnaryOp::Dereference),
            Operator::Bang => Some(UnaryOp::LogicalNot),
            _ => None,
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op_str = match self {
            UnaryOp::Minus => "-",
            UnaryOp::Dereference => "@",
            UnaryOp::LogicalNot => "!",
        };
        write!(f, "{}", op_str)
    }
}
