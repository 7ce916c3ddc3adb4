//! Per-function generation
//!
//! Slots are allocated up front; emission then walks the body with a scope
//! chain mapping names to slots, so a name always resolves to the
//! declaration visible at that point.

use crate::errors::CodegenError;
use crate::sexpr::SExpr;
use crate::slots::SlotTable;
use crate::wat::ValueType;
use log::trace;
use wcc_common::Environment;
use wcc_frontend::ast::{Parameter, Signature};
use wcc_frontend::typed_ast::TypedFunctionDefinition;

pub(crate) struct FunctionGenerator<'a> {
    pub(crate) slots: &'a SlotTable,
    pub(crate) env: Environment<u32>,
}

impl<'a> FunctionGenerator<'a> {
    pub(crate) fn new(slots: &'a SlotTable, parameters: &[Parameter]) -> Self {
        let mut env = Environment::new();
        for (slot, param) in parameters.iter().enumerate() {
            env.insert(param.name.clone(), slot as u32);
        }
        Self { slots, env }
    }

    /// Slot currently bound to `name`
    pub(crate) fn slot_of(&self, name: &str) -> Result<u32, CodegenError> {
        self.env
            .lookup(name)
            .copied()
            .ok_or_else(|| CodegenError::UnboundName {
                name: name.to_string(),
            })
    }
}

/// Build `(func $name [(export "name")] (param ...) (result ...) ...)`
pub(crate) fn generate_function(def: &TypedFunctionDefinition, export: bool) -> Result<SExpr, CodegenError> {
    let signature = &def.signature;
    let slots = SlotTable::allocate(def)?;
    trace!("{}: {} locals", signature.name, slots.locals().len());

    let mut body = Vec::new();
    if !slots.locals().is_empty() {
        let mut locals = vec![SExpr::atom("local")];
        locals.extend(slots.locals().iter().map(|ty| SExpr::atom(ty.to_string())));
        body.push(SExpr::list(locals));
    }

    let mut generator = FunctionGenerator::new(&slots, &signature.parameters);
    generator.emit_block(&def.body, &mut body)?;

    let mut head = vec![SExpr::atom("func"), SExpr::atom(format!("${}", signature.name))];
    if export {
        head.push(SExpr::list(vec![SExpr::atom("export"), SExpr::string(&signature.name)]));
    }
    head.extend(signature_items(signature)?);

    Ok(SExpr::block(head, body))
}

/// `(param ...)` and `(result ...)`, each omitted when empty
pub(crate) fn signature_items(signature: &Signature) -> Result<Vec<SExpr>, CodegenError> {
    let mut items = Vec::new();

    if !signature.parameters.is_empty() {
        let mut params = vec![SExpr::atom("param")];
        for param in &signature.parameters {
            params.push(SExpr::atom(ValueType::from_type(&param.param_type)?.to_string()));
        }
        items.push(SExpr::list(params));
    }

    if !signature.return_type.is_void() {
        let result = ValueType::from_type(&signature.return_type)?;
        items.push(SExpr::list(vec![SExpr::atom("result"), SExpr::atom(result.to_string())]));
    }

    Ok(items)
}
