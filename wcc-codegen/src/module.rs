//! Module assembly
//!
//! Imports must precede definitions in a WAT module, so items are laid out
//! as: imported functions, an imported memory, defined functions in source
//! order, then a defined memory.

use crate::errors::CodegenError;
use crate::function::{generate_function, signature_items};
use crate::sexpr::SExpr;
use crate::wat::pages_for;
use log::debug;
use wcc_frontend::ast::{FunctionImport, ImportLocation, Memory, MemoryKind};
use wcc_frontend::typed_ast::{TypedFunc, TypedModule};

/// Generates a WAT module from a validated module
#[derive(Debug, Default)]
pub struct WatGenerator;

impl WatGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate the module's WAT text
    pub fn generate(&self, module: &TypedModule) -> Result<String, CodegenError> {
        Ok(self.build(module)?.render())
    }

    /// Build the module's s-expression tree
    pub fn build(&self, module: &TypedModule) -> Result<SExpr, CodegenError> {
        let mut items = Vec::new();

        for func in &module.funcs {
            if let TypedFunc::Import(import) = func {
                items.push(import_function(import)?);
            }
        }
        for memory in &module.memories {
            if let MemoryKind::Import(location) = &memory.kind {
                items.push(import_item(location, memory_item(memory, false)));
            }
        }

        for func in &module.funcs {
            let generated = match func {
                TypedFunc::Plain(def) => generate_function(def, false)?,
                TypedFunc::Export(def) => generate_function(def, true)?,
                TypedFunc::Import(_) => continue,
            };
            debug!("generated function {}", func.signature().name);
            items.push(generated);
        }

        for memory in &module.memories {
            match memory.kind {
                MemoryKind::Plain => items.push(memory_item(memory, false)),
                MemoryKind::Export => items.push(memory_item(memory, true)),
                MemoryKind::Import(_) => {}
            }
        }

        Ok(SExpr::block(vec![SExpr::atom("module")], items))
    }
}

/// `(import "ns" "spec" (func $name (param ...) (result ...)))`
fn import_function(import: &FunctionImport) -> Result<SExpr, CodegenError> {
    let signature = &import.signature;
    let mut func = vec![SExpr::atom("func"), SExpr::atom(format!("${}", signature.name))];
    func.extend(signature_items(signature)?);
    Ok(import_item(&import.location, SExpr::list(func)))
}

fn import_item(location: &ImportLocation, item: SExpr) -> SExpr {
    SExpr::list(vec![
        SExpr::atom("import"),
        SExpr::string(&location.namespace),
        SExpr::string(&location.specifier),
        item,
    ])
}

/// `(memory $name [(export "name")] pages)`
fn memory_item(memory: &Memory, export: bool) -> SExpr {
    let mut items = vec![SExpr::atom("memory"), SExpr::atom(format!("${}", memory.name))];
    if export {
        items.push(SExpr::list(vec![SExpr::atom("export"), SExpr::string(&memory.name)]));
    }
    items.push(SExpr::atom(pages_for(memory.size).to_string()));
    SExpr::list(items)
}
