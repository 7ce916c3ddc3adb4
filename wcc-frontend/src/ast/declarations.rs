//! Top-level declarations: functions, memories and the module

use super::statements::Statement;
use crate::ast::NodeId;
use serde::{Deserialize, Serialize};
use wcc_common::{SourceSpan, Type};

/// A whole source file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub funcs: Vec<Func>,
    pub memories: Vec<Memory>,
}

/// Function declarations come in three flavours
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Func {
    Plain(FunctionDefinition),
    Export(FunctionDefinition),
    Import(FunctionImport),
}

impl Func {
    pub fn signature(&self) -> &Signature {
        match self {
            Func::Plain(def) | Func::Export(def) => &def.signature,
            Func::Import(import) => &import.signature,
        }
    }

    pub fn span(&self) -> SourceSpan {
        match self {
            Func::Plain(def) | Func::Export(def) => def.span,
            Func::Import(import) => import.span,
        }
    }

    pub fn is_export(&self) -> bool {
        matches!(self, Func::Export(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    pub name: String,
    pub return_type: Type,
    pub parameters: Vec<Parameter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub param_type: Type,
    pub span: SourceSpan,
}

/// Function with a body (plain or exported)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub node_id: NodeId,
    pub signature: Signature,
    pub body: Vec<Statement>,
    pub span: SourceSpan,
}

/// Function provided by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionImport {
    pub node_id: NodeId,
    pub signature: Signature,
    pub location: ImportLocation,
    pub span: SourceSpan,
}

/// `import(namespace::specifier)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportLocation {
    pub namespace: String,
    pub specifier: String,
}

/// Linear memory declaration; `size` is in bytes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    pub node_id: NodeId,
    pub name: String,
    pub size: u32,
    pub kind: MemoryKind,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MemoryKind {
    Plain,
    Export,
    Import(ImportLocation),
}
