//! WCC - WebAssembly Text Generation
//!
//! This crate handles the final phase of compilation: turning a validated,
//! typed module into WebAssembly text. It includes:
//!
//! - The WAT instruction model and operator/conversion tables
//! - Local slot allocation
//! - Stack-machine emission for expressions and structured control flow
//! - An s-expression pretty printer for the final module text

pub mod errors;
pub mod sexpr;
pub mod wat;
mod expressions;
mod function;
mod module;
mod slots;
mod statements;

pub use errors::CodegenError;
pub use module::WatGenerator;
pub use sexpr::SExpr;

use log::debug;
use wcc_common::CompilerError;
use wcc_frontend::{Frontend, TypedModule};

/// Generate WAT text for a validated module
pub fn generate(module: &TypedModule) -> Result<String, CompilerError> {
    let wat = WatGenerator::new().generate(module)?;
    debug!("generated {} bytes of WAT", wat.len());
    Ok(wat)
}

/// Compile source text all the way to WAT
pub fn compile(source: &str) -> Result<String, CompilerError> {
    let module = Frontend::validate_source(source)?;
    generate(&module)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_reports_first_stage_error() {
        let err = compile("func f(): i32 { return 1; }\nfunc f(): i32 { return 2; }").unwrap_err();
        assert_eq!(err.location().map(|loc| loc.line), Some(2));
    }

    #[test]
    fn test_basic_code_generation() {
        let wat = compile("func export answer(): i32 { return 42; }").unwrap();
        assert!(wat.contains("(func $answer (export \"answer\") (result i32)"));
        assert!(wat.contains("i32.const 42"));
    }
}
