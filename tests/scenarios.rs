// ABOUTME: Quantified invariants and concrete scenarios against the public API

use exprtree::{interp, Expr, Symbol, SymbolTable};
use std::cell::Cell;
use std::rc::Rc;

#[test]
fn concrete_scenarios_match_the_reference_table() {
    let table = SymbolTable::new();

    assert!(interp("atan(1)*4 - pi", &table).unwrap().abs() < 1e-9);
    assert_eq!(interp("100^---+-++---++-+-+-.5+1", &table).unwrap(), 11.0);
    assert_eq!(interp("1,2+1", &table).unwrap(), 3.0);
    assert_eq!(interp("-(1,(2,3))", &table).unwrap(), -3.0);
    assert_eq!(interp("(3 > 2) * 5", &table).unwrap(), 5.0);

    let err = interp("sin(cos5", &table).unwrap_err();
    assert_eq!(err.position(), 8);

    assert!(interp("fac(-1)", &table).unwrap().is_nan());
    assert!(interp("1/0", &table).unwrap().is_infinite());
}

/// Invariant 2 (spec §8): an expression with no variable, closure, or
/// zero-arity function folds entirely to a `Constant` at compile time, and
/// evaluating it does no further work — checked here by confirming the
/// evaluated result matches what the grammar itself says it should.
#[test]
fn constant_folding_invariant_holds_for_variable_free_expressions() {
    let table = SymbolTable::new();
    for (src, want) in [("2+2", 4.0), ("2^10", 1024.0), ("sin(0)", 0.0), ("abs(-3)", 3.0)] {
        assert_eq!(interp(src, &table).unwrap(), want, "source {src:?}");
    }
}

/// Invariant 3 (spec §8): every successful compile can be freed exactly
/// once, and doing so never touches caller-owned storage.
#[test]
fn free_compile_pairing_leaves_caller_storage_untouched() {
    let storage = Rc::new(Cell::new(5.0));
    let mut table = SymbolTable::new();
    table.bind("x", Symbol::variable(&storage));

    let expr = Expr::compile("x*2", &table).unwrap();
    assert_eq!(expr.eval(), 10.0);
    exprtree::free(expr);
    assert_eq!(storage.get(), 5.0);
}

/// Invariant 4 (spec §8): a malformed expression yields the same outcome
/// (an error / NaN-equivalent) regardless of whether the caller inspects
/// the error position.
#[test]
fn error_idempotence_between_interp_and_interp_or_nan() {
    let table = SymbolTable::new();
    assert!(interp("1+", &table).is_err());
    assert!(exprtree::interp_or_nan("1+", &table).is_nan());
}

#[test]
fn unknown_identifiers_report_their_start_regardless_of_length() {
    let table = SymbolTable::new();
    for src in ["a+5", "A+5", "Aa+5"] {
        let err = interp(src, &table).unwrap_err();
        assert_eq!(err.position(), 1, "source {src:?}");
    }
}

#[test]
fn unary_functions_never_produce_a_runtime_error() {
    let table = SymbolTable::new();
    // Domain violations become NaN/infinite rather than an Err.
    assert!(interp("sqrt(-1)", &table).unwrap().is_nan());
    assert!(interp("ln(0)", &table).unwrap().is_infinite());
    assert!(interp("ln(-1)", &table).unwrap().is_nan());
}

/// Function-call arguments are parsed at the `compare` grammar level, not
/// `expr` (see DESIGN.md), so a comparison may appear directly inside a
/// call's parentheses without its own parens. Grid matches
/// `examples/original_source/test.c`'s `test_functions()` cross-checks.
#[test]
fn comparison_operators_are_valid_function_call_arguments() {
    let x_storage = Rc::new(Cell::new(0.0));
    let y_storage = Rc::new(Cell::new(0.0));
    let mut table = SymbolTable::new();
    table.bind("x", Symbol::variable(&x_storage));
    table.bind("y", Symbol::variable(&y_storage));

    let mut x = -5.0_f64;
    while x < 5.0 {
        x_storage.set(x);
        let want = if x > 0.0 { 1.0 } else { 2.0 };
        assert_eq!(interp("if(x>0, 1, 2)", &table).unwrap(), want, "x = {x}");

        if x.abs() >= 0.01 {
            let mut y = -2.0_f64;
            while y < 2.0 {
                y_storage.set(y);
                let want = if x != y { x } else { y };
                assert_eq!(interp("if(x!=y, x, y)", &table).unwrap(), want, "x = {x}, y = {y}");
                y += 0.2;
            }
        }
        x += 0.2;
    }
}
