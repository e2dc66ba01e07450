//! # Built-in constants and functions
//!
//! The always-available symbol table (spec §4.2), organized into sub-modules
//! by category the way the teacher organizes `builtins/*.rs`:
//!
//! - **[constants]** (2): `pi`, `e`
//! - **[unary]** (17): `abs`, `acos`, `asin`, `atan`, `ceil`, `cos`, `cosh`,
//!   `exp`, `fac`, `floor`, `ln`, `log`, `log10`, `sin`, `sinh`, `sqrt`,
//!   `tan`, `tanh`
//! - **[binary]** (4): `atan2`, `pow`, `ncr`, `npr`
//! - **[ternary]** (1): `if`
//!
//! User symbols bound into a [`crate::symbol::SymbolTable`] override a
//! built-in of the same name (spec §4.2).

mod binary;
mod constants;
mod ternary;
mod unary;

use crate::symbol::Symbol;
use std::collections::HashMap;
use std::sync::LazyLock;

/// A built-in entry, stored without any `Rc` so the static table below can
/// be `Sync`. Converted to a [`Symbol`] on lookup.
#[derive(Clone, Copy)]
enum Entry {
    Constant(f64),
    Function { func: crate::symbol::PureFn, arity: usize },
}

impl From<Entry> for Symbol {
    fn from(e: Entry) -> Self {
        match e {
            Entry::Constant(v) => Symbol::constant(v),
            Entry::Function { func, arity } => Symbol::function(func, arity),
        }
    }
}

static TABLE: LazyLock<HashMap<&'static str, Entry>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    constants::register(&mut m);
    unary::register(&mut m);
    binary::register(&mut m);
    ternary::register(&mut m);
    m
});

/// Resolve a built-in by name, or `None` if `name` is not a built-in.
pub fn lookup(name: &str) -> Option<Symbol> {
    TABLE.get(name).copied().map(Symbol::from)
}

/// Names of every built-in, for documentation/CLI help purposes.
pub fn names() -> Vec<&'static str> {
    let mut names: Vec<_> = TABLE.keys().copied().collect();
    names.sort_unstable();
    names
}
