//! WCC - Frontend
//!
//! This crate provides the frontend components of the compiler:
//! - Lexer: tokenizes source text
//! - Parser: builds the AST from tokens with a backtracking parser
//! - AST: untyped syntax tree definitions
//! - Validation: scoping and type rules, producing the typed AST

pub mod lexer;
pub mod parser;
pub mod ast;
pub mod semantic;
pub mod typed_ast;

pub use lexer::{Lexer, Token, TokenType};
pub use parser::{ParseError, Parser};
pub use ast::{
    BinaryOp, Expression, ExpressionKind, Func, Module, NodeId, NodeIdGenerator, Statement,
    StatementKind, UnaryOp,
};
pub use semantic::{ValidationError, Validator};
pub use typed_ast::{
    TypedExpression, TypedExpressionKind, TypedFunc, TypedModule, TypedStatement,
    TypedStatementKind,
};

use wcc_common::CompilerError;

/// High-level frontend interface
pub struct Frontend;

impl Frontend {
    /// Tokenize source code
    pub fn tokenize_source(source: &str) -> Result<Vec<Token>, CompilerError> {
        Lexer::new(source).tokenize()
    }

    /// Parse source code into an untyped module
    pub fn parse_source(source: &str) -> Result<Module, CompilerError> {
        let tokens = Self::tokenize_source(source)?;
        let mut parser = Parser::new(&tokens);
        parser.parse_module()
    }

    /// Parse and validate source code into a typed module
    pub fn validate_source(source: &str) -> Result<TypedModule, CompilerError> {
        let module = Self::parse_source(source)?;
        let mut validator = Validator::new();
        validator.validate_module(&module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wcc_common::Type;

    #[test]
    fn test_frontend_tokenize() {
        // var, x, :, i32, =, 42, ;, EOF
        let tokens = Frontend::tokenize_source("var x: i32 = 42;").unwrap();
        assert_eq!(tokens.len(), 8);
        assert!(matches!(tokens[1].token_type, TokenType::Identifier(_)));
        assert_eq!(tokens[7].token_type, TokenType::EndOfFile);
    }

    #[test]
    fn test_frontend_parse_simple_function() {
        let module = Frontend::parse_source("func main(): i32 { return 42; }").unwrap();
        assert_eq!(module.funcs.len(), 1);

        match &module.funcs[0] {
            Func::Plain(def) => {
                assert_eq!(def.signature.name, "main");
                assert_eq!(def.signature.return_type, Type::i32());
            }
            other => panic!("Expected plain function, got {other:?}"),
        }
    }

    #[test]
    fn test_frontend_validate() {
        let module = Frontend::validate_source("func export main(): i32 { return 42; }").unwrap();
        assert!(matches!(module.funcs[0], TypedFunc::Export(_)));
    }

    #[test]
    fn test_errors_from_each_stage() {
        assert!(matches!(
            Frontend::validate_source("func f(): i32 { return 3.2.7; }"),
            Err(CompilerError::LexError { .. })
        ));
        assert!(matches!(
            Frontend::validate_source("func f(): i32 { return 1 }"),
            Err(CompilerError::ParseError { .. })
        ));
        assert!(matches!(
            Frontend::validate_source("func f(): i32 { return 1u; }"),
            Err(CompilerError::ValidationError { .. })
        ));
    }
}
