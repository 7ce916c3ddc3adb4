//! Typed module and function definitions

use super::statements::TypedStatement;
use crate::ast::{FunctionImport, Memory, NodeId, Signature};
use serde::{Deserialize, Serialize};
use wcc_common::SourceSpan;

/// A validated module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedModule {
    pub funcs: Vec<TypedFunc>,
    pub memories: Vec<Memory>,
}

/// Imports have no body, so they carry over from the parsed AST unchanged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypedFunc {
    Plain(TypedFunctionDefinition),
    Export(TypedFunctionDefinition),
    Import(FunctionImport),
}

impl TypedFunc {
    pub fn signature(&self) -> &Signature {
        match self {
            TypedFunc::Plain(def) | TypedFunc::Export(def) => &def.signature,
            TypedFunc::Import(import) => &import.signature,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedFunctionDefinition {
    pub node_id: NodeId,
    pub signature: Signature,
    pub body: Vec<TypedStatement>,
    pub span: SourceSpan,
}
