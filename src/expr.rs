// ABOUTME: The compiled-tree handle and the library's top-level entry points

use crate::error::CompileError;
use crate::eval;
use crate::node::Node;
use crate::parser;
use crate::symbol::SymbolTable;

/// A compiled expression tree (spec §3 "the compiled artifact"), ready to be
/// evaluated any number of times against the storage its `Variable`/closure
/// leaves reference.
///
/// `Expr` owns its interior nodes and `Constant` leaves exclusively;
/// `Variable`/`Function`/`Closure` leaves only hold `Rc` clones into
/// caller-owned storage, so dropping an `Expr` never touches that storage
/// (spec §3 "Ownership", §4.5 "Destructor").
pub struct Expr {
    root: Node,
}

impl Expr {
    /// Compiles `source` against `table` (spec §6 `compile`).
    #[tracing::instrument(level = "debug", skip(table))]
    pub fn compile(source: &str, table: &SymbolTable) -> Result<Expr, CompileError> {
        let root = parser::parse(source, table)?;
        Ok(Expr { root })
    }

    /// Evaluates the tree (spec §6 `eval`). Never errors: domain violations
    /// in built-ins surface as `NAN`/`INFINITY` on the returned `f64`.
    pub fn eval(&self) -> f64 {
        eval::eval(&self.root)
    }
}

/// Iterative destructor (spec §4.5): walks the tree depth-first using an
/// explicit stack instead of recursive `Drop`, so a pathologically deep
/// tree cannot overflow the stack on the way down. `Variable`/`Function`/
/// `Closure` leaves hold only `Rc` clones, so dropping them here can never
/// reach into caller-owned storage.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut stack = vec![std::mem::replace(&mut self.root, Node::Constant(0.0))];
        while let Some(node) = stack.pop() {
            if let Node::Function { children, .. } = node {
                stack.extend(children);
            }
        }
    }
}

/// Explicit free, kept for API parity with spec §6's operation table
/// (`free(tree)`); identical to letting `expr` drop at end of scope.
pub fn free(expr: Expr) {
    drop(expr);
}

/// One-shot compile, evaluate, and free (spec §2 "a one-shot `interp(source)
/// -> value`"). On a compile failure this returns the error rather than
/// `NaN` directly — callers that want spec §6's "NaN on error" convenience
/// can map `Err(_)` to `f64::NAN` themselves; see
/// [`interp_or_nan`] for that exact convenience wrapper.
#[tracing::instrument(level = "debug", skip(table))]
pub fn interp(source: &str, table: &SymbolTable) -> Result<f64, CompileError> {
    let expr = Expr::compile(source, table)?;
    Ok(expr.eval())
}

/// Spec §6's literal `interp(source, &err)` shape: a malformed expression
/// yields `NaN` rather than an `Err`, with the position recoverable by
/// calling [`interp`] directly when that's wanted instead.
pub fn interp_or_nan(source: &str, table: &SymbolTable) -> f64 {
    interp(source, table).unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::Symbol;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn interp_evaluates_a_folded_constant() {
        assert_eq!(interp("5+5", &SymbolTable::new()).unwrap(), 10.0);
    }

    #[test]
    fn interp_reports_compile_error_position() {
        let err = interp("1+", &SymbolTable::new()).unwrap_err();
        assert_eq!(err.position(), 2);
    }

    #[test]
    fn interp_or_nan_matches_interp_on_success() {
        let table = SymbolTable::new();
        assert_eq!(interp_or_nan("2*3", &table), interp("2*3", &table).unwrap());
    }

    #[test]
    fn interp_or_nan_is_nan_on_malformed_input() {
        assert!(interp_or_nan("1+", &SymbolTable::new()).is_nan());
    }

    #[test]
    fn compile_eval_free_round_trip_with_a_bound_variable() {
        let storage = Rc::new(Cell::new(3.0));
        let mut table = SymbolTable::new();
        table.bind("x", Symbol::variable(&storage));
        let expr = Expr::compile("x*x", &table).unwrap();
        assert_eq!(expr.eval(), 9.0);
        storage.set(4.0);
        assert_eq!(expr.eval(), 16.0);
        free(expr);
        assert_eq!(storage.get(), 4.0);
    }

    #[test]
    fn deeply_nested_tree_drops_without_overflowing_the_stack() {
        // A leading variable keeps every `+` node un-foldable (one child is
        // never a `Constant`), so the tree stays 20,000 nodes deep instead
        // of collapsing to a single `Constant` at parse time.
        let storage = Rc::new(Cell::new(0.0));
        let mut table = SymbolTable::new();
        table.bind("x", Symbol::variable(&storage));
        let mut src = String::from("x");
        for _ in 0..20_000 {
            src.push_str("+1");
        }
        let expr = Expr::compile(&src, &table).unwrap();
        assert_eq!(expr.eval(), 20_000.0);
    }
}
