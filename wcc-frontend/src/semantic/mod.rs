//! Validation
//!
//! Checks the parsed module against the language's typing and scoping rules
//! and builds the typed AST. Function signatures are collected up front, so
//! calls may refer to functions declared later in the file. Each function
//! body is then checked with a fresh scope chain whose root frame holds the
//! parameters. The first violation aborts validation.

pub mod errors;
pub mod symbols;
mod expressions;
mod statements;

pub use errors::ValidationError;
pub use symbols::{SymbolInfo, SymbolKind};

use crate::ast::*;
use crate::typed_ast::{TypedFunc, TypedFunctionDefinition, TypedModule};
use log::{debug, trace};
use std::collections::{HashMap, HashSet};
use wcc_common::{CompilerError, Environment, Type};

/// Module-level validator
#[derive(Debug, Default)]
pub struct Validator {
    functions: HashMap<String, Signature>,
}

/// Per-function state shared by statement and expression checks
pub(crate) struct FunctionContext<'a> {
    functions: &'a HashMap<String, Signature>,
    return_type: Type,
    env: Environment<SymbolInfo>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a module and produce its typed counterpart
    pub fn validate_module(&mut self, module: &Module) -> Result<TypedModule, CompilerError> {
        self.functions.clear();
        self.declare_functions(module)?;
        check_memories(module)?;

        let mut funcs = Vec::with_capacity(module.funcs.len());
        for func in &module.funcs {
            let typed = match func {
                Func::Plain(def) => TypedFunc::Plain(self.validate_definition(def)?),
                Func::Export(def) => TypedFunc::Export(self.validate_definition(def)?),
                Func::Import(import) => TypedFunc::Import(import.clone()),
            };
            funcs.push(typed);
        }

        debug!("validated {} functions", funcs.len());
        Ok(TypedModule {
            funcs,
            memories: module.memories.clone(),
        })
    }

    /// Record every signature so bodies can call any function in the module
    fn declare_functions(&mut self, module: &Module) -> Result<(), ValidationError> {
        for func in &module.funcs {
            let signature = func.signature();
            check_parameters(signature)?;

            if self.functions.contains_key(&signature.name) {
                return Err(ValidationError::DuplicateFunction {
                    name: signature.name.clone(),
                    location: func.span().start,
                });
            }
            trace!("declared function {}", signature.name);
            self.functions.insert(signature.name.clone(), signature.clone());
        }
        Ok(())
    }

    fn validate_definition(&self, def: &FunctionDefinition) -> Result<TypedFunctionDefinition, ValidationError> {
        let signature = &def.signature;
        let mut context = FunctionContext::new(&self.functions, signature.return_type.clone());
        for param in &signature.parameters {
            context.env.insert(
                param.name.clone(),
                SymbolInfo::new(param.param_type.clone(), SymbolKind::Parameter),
            );
        }

        let body = context.validate_block(&def.body)?;

        let ends_with_return = matches!(
            def.body.last(),
            Some(Statement { kind: StatementKind::Return(_), .. })
        );
        if !signature.return_type.is_void() && !ends_with_return {
            let location = def.body.last().map_or(def.span.start, |last| last.span.start);
            return Err(ValidationError::MissingReturn {
                name: signature.name.clone(),
                location,
            });
        }

        Ok(TypedFunctionDefinition {
            node_id: def.node_id,
            signature: signature.clone(),
            body,
            span: def.span,
        })
    }
}

impl<'a> FunctionContext<'a> {
    fn new(functions: &'a HashMap<String, Signature>, return_type: Type) -> Self {
        Self {
            functions,
            return_type,
            env: Environment::new(),
        }
    }
}

/// Parameters must be non-void and uniquely named
fn check_parameters(signature: &Signature) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for param in &signature.parameters {
        if param.param_type.is_void() {
            return Err(ValidationError::VoidParameter {
                name: param.name.clone(),
                location: param.span.start,
            });
        }
        if !seen.insert(param.name.as_str()) {
            return Err(ValidationError::DuplicateParameter {
                name: param.name.clone(),
                location: param.span.start,
            });
        }
    }
    Ok(())
}

/// At most one memory, and an exported memory must not share its export
/// name with an exported function
fn check_memories(module: &Module) -> Result<(), ValidationError> {
    if let Some(extra) = module.memories.get(1) {
        return Err(ValidationError::MultipleMemories {
            location: extra.span.start,
        });
    }

    for memory in &module.memories {
        if memory.kind != MemoryKind::Export {
            continue;
        }
        let collides = module
            .funcs
            .iter()
            .any(|func| func.is_export() && func.signature().name == memory.name);
        if collides {
            return Err(ValidationError::ExportNameCollision {
                name: memory.name.clone(),
                location: memory.span.start,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;
    use crate::typed_ast::{TypedExpressionKind, TypedStatementKind};
    use indoc::indoc;
    use wcc_common::{BasicType, SourceLocation, SourceSpan};

    fn validate_str(source: &str) -> Result<TypedModule, CompilerError> {
        let tokens = Lexer::new(source).tokenize()?;
        let module = Parser::new(&tokens).parse_module()?;
        Validator::new().validate_module(&module)
    }

    fn validation_message(source: &str) -> String {
        match validate_str(source) {
            Err(CompilerError::ValidationError { message, .. }) => message,
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    fn validation_location(source: &str) -> (u32, u32) {
        match validate_str(source) {
            Err(CompilerError::ValidationError { location, .. }) => (location.line, location.column),
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    fn body_of(module: &TypedModule, index: usize) -> &TypedFunctionDefinition {
        match &module.funcs[index] {
            TypedFunc::Plain(def) | TypedFunc::Export(def) => def,
            TypedFunc::Import(_) => panic!("Expected function with body"),
        }
    }

    #[test]
    fn test_simple_function() {
        let module = validate_str("func add(a: i32, b: i32): i32 { return a + b; }").unwrap();
        let def = body_of(&module, 0);
        match &def.body[0].kind {
            TypedStatementKind::Return(Some(value)) => {
                assert_eq!(value.result_type, Type::i32());
            }
            other => panic!("Expected return, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_trailing_return() {
        let message = validation_message("func f(): i32 { var x: i32 = 1; }");
        assert_eq!(message, "Function 'f' must end with a return statement");

        // a return nested in a conditional does not count
        let message = validation_message("func g(a: i32): i32 { if (a) { return 1; } }");
        assert_eq!(message, "Function 'g' must end with a return statement");

        validation_message("func h(): f64 { }");
    }

    #[test]
    fn test_void_function_needs_no_return() {
        assert!(validate_str("func f(): void { }").is_ok());
    }

    #[test]
    fn test_duplicate_parameter() {
        let message = validation_message("func f(a: i32, a: i64): void { }");
        assert_eq!(message, "Duplicate parameter 'a'");
        assert_eq!(validation_location("func f(a: i32, a: i64): void { }"), (1, 16));
    }

    #[test]
    fn test_void_parameter_in_hand_built_ast() {
        let span = SourceSpan::from_location(SourceLocation::new(3, 5));
        let module = Module {
            funcs: vec![Func::Plain(FunctionDefinition {
                node_id: 0,
                signature: Signature {
                    name: "f".to_string(),
                    return_type: Type::void(),
                    parameters: vec![Parameter {
                        name: "x".to_string(),
                        param_type: Type::void(),
                        span,
                    }],
                },
                body: Vec::new(),
                span,
            })],
            memories: Vec::new(),
        };

        let err = Validator::new().validate_module(&module).unwrap_err();
        assert_eq!(
            err,
            CompilerError::validation_error(
                "Parameter 'x' cannot have type void".to_string(),
                SourceLocation::new(3, 5)
            )
        );
    }

    #[test]
    fn test_mismatched_assignment() {
        let message = validation_message("func f(): void { var x: i32 = 0; x = 1l; }");
        assert_eq!(message, "Type mismatch in assignment: expected i32, found i64");
    }

    #[test]
    fn test_mismatched_initializer() {
        let message = validation_message("func f(): void { var x: u32 = 1; }");
        assert_eq!(message, "Type mismatch in initializer of 'x': expected u32, found i32");
    }

    #[test]
    fn test_redeclaration_with_new_type() {
        let source = indoc! {"
            func f(): i64 {
                var x: i32 = 1;
                var x: i64 = 2l;
                return x;
            }
        "};
        let module = validate_str(source).unwrap();
        let def = body_of(&module, 0);
        match &def.body[2].kind {
            TypedStatementKind::Return(Some(value)) => {
                assert_eq!(value.result_type, Type::Basic(BasicType::I64));
            }
            other => panic!("Expected return, got {other:?}"),
        }
    }

    #[test]
    fn test_unreachable_statement() {
        let source = indoc! {"
            func f(): i32 {
                return 1;
                return 2;
            }
        "};
        assert_eq!(validation_message(source), "Unreachable statement after return");
        assert_eq!(validation_location(source), (3, 5));
    }

    #[test]
    fn test_unreachable_statement_in_nested_block() {
        let source = indoc! {"
            func f(a: i32): void {
                while (a) {
                    return;
                    a = 0;
                }
            }
        "};
        assert_eq!(validation_location(source), (4, 9));
    }

    #[test]
    fn test_assignment_to_constant_and_parameter() {
        let message = validation_message("func f(): void { const c: i32 = 1; c = 2; }");
        assert_eq!(message, "Cannot assign to constant 'c'");

        let message = validation_message("func f(p: i32): void { p = 2; }");
        assert_eq!(message, "Cannot assign to parameter 'p'");
    }

    #[test]
    fn test_invalid_assignment_target() {
        let message = validation_message("func f(): void { var x: i32 = 0; (x) = 1; }");
        assert_eq!(
            message,
            "Left side of assignment must be a variable or a dereferenced pointer"
        );
    }

    #[test]
    fn test_store_through_pointer() {
        let source = "func f(p: *i32): i32 { @p = @p + 1; return @p; }";
        let module = validate_str(source).unwrap();
        let def = body_of(&module, 0);
        match &def.body[0].kind {
            TypedStatementKind::Expression(expr) => {
                assert_eq!(expr.result_type, Type::void());
                assert!(matches!(
                    &expr.kind,
                    TypedExpressionKind::Binary { op: BinaryOp::Assign, .. }
                ));
            }
            other => panic!("Expected expression statement, got {other:?}"),
        }
    }

    #[test]
    fn test_calls() {
        let source = indoc! {"
            func main(): i32 {
                return twice(21);
            }

            func twice(n: i32): i32 {
                return n * 2;
            }
        "};
        assert!(validate_str(source).is_ok());

        assert_eq!(
            validation_message("func f(): void { missing(); }"),
            "Undefined function: missing"
        );
        assert_eq!(
            validation_message("func g(a: i32): void { } func f(): void { g(1, 2); }"),
            "Function 'g' expects 1 arguments, found 2"
        );
        assert_eq!(
            validation_message("func g(a: i32): void { } func f(): void { g(1u); }"),
            "Type mismatch in argument 1 of call to 'g': expected i32, found u32"
        );
    }

    #[test]
    fn test_condition_must_be_i32() {
        let message = validation_message("func f(): void { while (1l) { } }");
        assert_eq!(message, "Type mismatch in 'while' condition: expected i32, found i64");

        let message = validation_message("func f(): void { if (1) { } elif (2.0) { } }");
        assert_eq!(message, "Type mismatch in 'elif' condition: expected i32, found f32");
    }

    #[test]
    fn test_scopes() {
        let message = validation_message("func f(a: i32): i32 { if (a) { var y: i32 = 1; } return y; }");
        assert_eq!(message, "Undefined variable: y");

        let source = indoc! {"
            func f(a: i32): i32 {
                var x: i32 = 1;
                if (a) {
                    var x: f32 = 2.0;
                } else {
                    x = 3;
                }
                return x;
            }
        "};
        assert!(validate_str(source).is_ok());
    }

    #[test]
    fn test_initializer_cannot_see_its_own_name() {
        let message = validation_message("func f(): void { var x: i32 = x; }");
        assert_eq!(message, "Undefined variable: x");
    }

    #[test]
    fn test_operator_rules() {
        assert_eq!(
            validation_message("func f(): f32 { return 1.0 % 2.0; }"),
            "Operator '%' cannot be applied to type f32"
        );
        assert_eq!(
            validation_message("func f(): i32 { return 1 + 1u; }"),
            "Operands of '+' have different types: i32 and u32"
        );
        assert_eq!(
            validation_message("func f(x: i32): i32 { return @x; }"),
            "Operator '@' cannot be applied to type i32"
        );
        assert_eq!(
            validation_message("func f(x: i64): i32 { return !x; }"),
            "Type mismatch in operand of '!': expected i32, found i64"
        );
    }

    #[test]
    fn test_comparison_yields_i32() {
        let module = validate_str("func f(a: f64, b: f64): i32 { return a < b; }").unwrap();
        let def = body_of(&module, 0);
        match &def.body[0].kind {
            TypedStatementKind::Return(Some(value)) => assert_eq!(value.result_type, Type::i32()),
            other => panic!("Expected return, got {other:?}"),
        }
    }

    #[test]
    fn test_conversions() {
        assert!(validate_str("func f(p: *u32): i64 { return p as i64; }").is_ok());
        assert_eq!(
            validation_message("func g(): void { } func f(): i32 { return g() as i32; }"),
            "Operator 'as' cannot be applied to type void"
        );
    }

    #[test]
    fn test_return_rules() {
        assert_eq!(
            validation_message("func f(): void { return 1; }"),
            "Function returning void cannot return a value"
        );
        assert_eq!(
            validation_message("func f(): i32 { return; }"),
            "Missing return value in function returning i32"
        );
        assert_eq!(
            validation_message("func f(): i32 { return 1u; }"),
            "Type mismatch in return value: expected i32, found u32"
        );
    }

    #[test]
    fn test_void_call_as_statement() {
        let source = "func g(): void { } func f(): void { g(); }";
        assert!(validate_str(source).is_ok());
    }

    #[test]
    fn test_duplicate_function() {
        let source = "func import(env::f) f(): void; func f(): void { }";
        assert_eq!(validation_message(source), "Function 'f' is already defined");
    }

    #[test]
    fn test_exported_memory_name_collision() {
        let source = "memory export main(1); func export main(): void { }";
        assert_eq!(
            validation_message(source),
            "Exported memory 'main' collides with an exported function of the same name"
        );

        // a plain function may share the name
        assert!(validate_str("memory export main(1); func main(): void { }").is_ok());
    }

    #[test]
    fn test_second_memory_in_hand_built_ast() {
        let memory = |name: &str, line| Memory {
            node_id: 0,
            name: name.to_string(),
            size: 1,
            kind: MemoryKind::Plain,
            span: SourceSpan::from_location(SourceLocation::new(line, 1)),
        };
        let module = Module {
            funcs: Vec::new(),
            memories: vec![memory("a", 1), memory("b", 2)],
        };

        let err = Validator::new().validate_module(&module).unwrap_err();
        assert_eq!(err.location(), Some(SourceLocation::new(2, 1)));
    }
}
