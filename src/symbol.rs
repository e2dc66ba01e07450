// ABOUTME: Symbol table module merging user-supplied bindings with built-ins

use crate::builtins;
use std::any::Any;
use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

/// A native pure function: arity is the length of the child-node slice it is
/// invoked with (spec §3: "arity exactly matches the number of children").
pub type PureFn = fn(&[f64]) -> f64;

/// A closure function: receives the caller-owned opaque context first, then
/// the evaluated arguments.
pub type ClosureFn = fn(&dyn Any, &[f64]) -> f64;

/// One entry of the symbol table (spec §3 "Symbol entry").
#[derive(Clone)]
pub enum Symbol {
    Variable(Rc<Cell<f64>>),
    Constant(f64),
    Function { func: PureFn, arity: usize },
    Closure {
        func: ClosureFn,
        arity: usize,
        context: Rc<dyn Any>,
    },
}

impl Symbol {
    pub fn variable(storage: &Rc<Cell<f64>>) -> Self {
        Symbol::Variable(Rc::clone(storage))
    }

    pub fn constant(value: f64) -> Self {
        Symbol::Constant(value)
    }

    pub fn function(func: PureFn, arity: usize) -> Self {
        assert!(arity <= crate::config::MAX_ARITY, "declared arity exceeds MAX_ARITY");
        Symbol::Function { func, arity }
    }

    pub fn closure<T: 'static>(func: ClosureFn, arity: usize, context: Rc<T>) -> Self {
        assert!(arity <= crate::config::MAX_ARITY, "declared arity exceeds MAX_ARITY");
        Symbol::Closure {
            func,
            arity,
            context,
        }
    }
}

/// The merged, read-only view of caller-supplied entries layered over
/// built-ins (spec §3/§4.2). User symbols override built-ins of the same
/// name; first-match-per-table wins on internal duplicates (spec §9 Open
/// Question — implementers pick first-entry-wins and document it, which is
/// what inserting into a `HashMap` from a `Vec` of `(name, Symbol)` pairs in
/// order, skipping names already present, gives us).
#[derive(Clone, Default)]
pub struct SymbolTable {
    user: HashMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            user: HashMap::new(),
        }
    }

    /// Bind `name` to `symbol`. If `name` was already bound in this table,
    /// the first binding wins and this call is a no-op — the same
    /// first-match-wins policy the merged lookup uses against built-ins.
    pub fn bind(&mut self, name: impl Into<String>, symbol: Symbol) -> &mut Self {
        self.user.entry(name.into()).or_insert(symbol);
        self
    }

    /// Resolve `name`, preferring a user binding over a built-in of the same
    /// name (spec §4.2: "User symbols override built-ins with the same
    /// name."). Built-ins are handed back as freshly constructed `Symbol`s
    /// (cheap: a function pointer or an `f64`), so this returns an owned
    /// value rather than a reference into either table.
    pub fn resolve(&self, name: &str) -> Option<Symbol> {
        self.user
            .get(name)
            .cloned()
            .or_else(|| builtins::lookup(name))
    }
}
