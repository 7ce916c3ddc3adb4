//! Whole-pipeline tests: source text in, WAT text out

use indoc::indoc;
use pretty_assertions::assert_eq;
use wcc_codegen::compile;
use wcc_common::CompilerError;

/// Compile `source` and check that the WAT assembles into a valid module
fn compile_valid(source: &str) -> String {
    let wat = compile(source).expect("Should compile");
    let binary = wat::parse_str(&wat).unwrap_or_else(|err| panic!("WAT should assemble: {err}\n{wat}"));
    wasmparser::Validator::new()
        .validate_all(&binary)
        .unwrap_or_else(|err| panic!("module should validate: {err}\n{wat}"));
    wat
}

#[test]
fn test_add_function() {
    let wat = compile_valid("func add(a: i32, b: i32): i32 { return a + b; }");

    let expected = indoc! {"
        (module
          (func $add (param i32 i32) (result i32)
            local.get 0
            local.get 1
            i32.add
            return
          )
        )
    "};
    assert_eq!(wat, expected);
}

#[test]
fn test_while_loop_with_one_local() {
    let source = "func f(): void { var x: i32 = 1; while (x) { x = 0; } }";
    let wat = compile_valid(source);

    let expected = indoc! {"
        (module
          (func $f
            (local i32)
            i32.const 1
            local.set 0
            (loop
              (block
                local.get 0
                i32.eqz
                br_if 0
                i32.const 0
                local.set 0
                br 1
              )
            )
          )
        )
    "};
    assert_eq!(wat, expected);
}

#[test]
fn test_output_is_deterministic() {
    let source = indoc! {"
        func import(env::print) print(v: f64): void;
        memory export mem(1024);

        func export average(p: *f64, n: i32): f64 {
            var sum: f64 = 0.0l;
            var i: i32 = 0;
            while (i < n) {
                sum = sum + @((p as i32 + i * 8) as *f64);
                i = i + 1;
            }
            print(sum);
            return sum / n as f64;
        }
    "};

    let first = compile_valid(source);
    for _ in 0..5 {
        assert_eq!(compile(source).expect("Should compile"), first);
    }
}

#[test]
fn test_pointer_arithmetic_program() {
    let source = indoc! {"
        memory export mem(65536);

        func export fill(base: *i32, count: i32, value: i32): void {
            var i: i32 = 0;
            while (i < count) {
                @((base as i32 + i * 4) as *i32) = value;
                i = i + 1;
            }
        }
    "};
    let wat = compile_valid(source);

    let expected = indoc! {r#"
        (module
          (func $fill (export "fill") (param i32 i32 i32)
            (local i32)
            i32.const 0
            local.set 3
            (loop
              (block
                local.get 3
                local.get 1
                i32.lt_s
                i32.eqz
                br_if 0
                local.get 0
                local.get 3
                i32.const 4
                i32.mul
                i32.add
                local.get 2
                i32.store
                local.get 3
                i32.const 1
                i32.add
                local.set 3
                br 1
              )
            )
          )
          (memory $mem (export "mem") 1)
        )
    "#};
    assert_eq!(wat, expected);
}

#[test]
fn test_mixed_width_conversions() {
    let source = indoc! {"
        func widen(x: i32, y: u32): i64 {
            return x as i64 + (y as u64) as i64;
        }
    "};
    let wat = compile_valid(source);
    assert!(wat.contains("local.get 0\n    i64.extend_i32_s\n"), "{wat}");
    assert!(wat.contains("local.get 1\n    i64.extend_i32_u\n    i64.add\n"), "{wat}");
}

#[test]
fn test_errors_carry_positions() {
    let cases = [
        ("func f(): i32 { return 12a; }", "Lexical error", (1, 24)),
        ("func f(): i32 {\n    return 99999999999;\n}", "Lexical error", (2, 12)),
        ("func f(): u64 { return 18446744073709551616ul; }", "Lexical error", (1, 24)),
        ("func f(): i32 { return (1; }", "Parse error", (1, 26)),
        ("func f(): i32 {\n    return 1l;\n}", "Validation error", (2, 12)),
    ];

    for (source, prefix, (line, column)) in cases {
        let err = compile(source).unwrap_err();
        assert!(err.to_string().starts_with(prefix), "{err}");
        let location = err.location().expect("user errors have a location");
        assert_eq!((location.line, location.column), (line, column), "{source}");
    }
}

#[test]
fn test_internal_error_for_unmapped_cast() {
    let err = compile("func f(x: f64): *i32 { return x as *i32; }").unwrap_err();
    assert!(matches!(err, CompilerError::InternalError { .. }));
    assert_eq!(err.location(), None);
}

#[test]
fn test_control_flow_and_memory_assemble() {
    let source = indoc! {"
        func import(env::log) log(v: i64): void;
        memory import(js::heap) heap(65536);

        func export classify(x: i32, p: *u32): i32 {
            var r: i32 = 0;
            if (x < 0) {
                r = 1;
            } elif (x == 0) {
                r = 2;
            } else {
                r = 3;
            }
            var n: i32 = x;
            while (n > 0) {
                const step: u32 = 1u;
                @p = @p + step;
                n = n - 1;
            }
            log(r as i64 << 2l);
            return !r + (4294967295 as u64 > 18446744073709551615ul);
        }
    "};
    compile_valid(source);
}
