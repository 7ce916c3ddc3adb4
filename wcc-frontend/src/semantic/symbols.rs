//! Symbol information tracked in the validator's scope chain

use crate::ast::DeclarationKind;
use std::fmt;
use wcc_common::Type;

/// How a name was introduced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Parameter,
    Variable,
    Constant,
}

impl SymbolKind {
    /// Only `var` declarations may be assigned to
    pub fn is_mutable(&self) -> bool {
        matches!(self, SymbolKind::Variable)
    }
}

impl From<DeclarationKind> for SymbolKind {
    fn from(kind: DeclarationKind) -> Self {
        match kind {
            DeclarationKind::Variable => SymbolKind::Variable,
            DeclarationKind::Constant => SymbolKind::Constant,
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SymbolKind::Parameter => "parameter",
            SymbolKind::Variable => "variable",
            SymbolKind::Constant => "constant",
        };
        write!(f, "{text}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SymbolInfo {
    pub ty: Type,
    pub kind: SymbolKind,
}

impl SymbolInfo {
    pub fn new(ty: Type, kind: SymbolKind) -> Self {
        Self { ty, kind }
    }
}
