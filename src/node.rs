// ABOUTME: The expression-tree node type compiled from a parsed source string

use crate::symbol::{ClosureFn, PureFn};
use std::any::Any;
use std::cell::Cell;
use std::rc::Rc;

/// How a `Function` node's handle should be invoked (spec §3: "Pure
/// function" vs "Closure").
#[derive(Clone)]
pub enum FnHandle {
    Pure(PureFn),
    Closure { func: ClosureFn, context: Rc<dyn Any> },
}

/// A tagged expression-tree node (spec §3 "Expression node").
///
/// Arity is never stored separately: it is always `children.len()` for a
/// `Function` node, which makes the "node's arity exactly matches the
/// number of children it owns" invariant hold by construction rather than
/// by convention.
#[derive(Clone)]
pub enum Node {
    Constant(f64),
    Variable(Rc<Cell<f64>>),
    Function { handle: FnHandle, children: Vec<Node> },
}

impl Node {
    pub fn arity(&self) -> usize {
        match self {
            Node::Constant(_) | Node::Variable(_) => 0,
            Node::Function { children, .. } => children.len(),
        }
    }

    /// True for a `Function` node built from a `Pure` handle whose children
    /// are all `Constant` nodes — the shape the parser collapses during
    /// constant folding (spec §4.3). Arity-0 pure functions are
    /// deliberately excluded: the data model (spec §3) calls out that "a
    /// zero-arity function may still exist as a node ... unlike a
    /// constant", so a niladic built-in (user-supplied; none of ours are
    /// arity 0) keeps its call-at-evaluation-time semantics instead of
    /// being folded away at parse time.
    pub fn is_foldable(&self) -> bool {
        match self {
            Node::Function {
                handle: FnHandle::Pure(_),
                children,
            } => !children.is_empty() && children.iter().all(|c| matches!(c, Node::Constant(_))),
            _ => false,
        }
    }
}
