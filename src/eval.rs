// ABOUTME: Evaluator module for executing a compiled expression tree

use crate::node::{FnHandle, Node};

/// Pure post-order walk of the tree (spec §4.4). Never returns an error —
/// a builtin's domain violation surfaces as `NAN`/`INFINITY` on the `f64`
/// itself, the same as IEEE-754 arithmetic errors elsewhere in the tree.
pub fn eval(node: &Node) -> f64 {
    match node {
        Node::Constant(v) => *v,
        Node::Variable(storage) => storage.get(),
        Node::Function { handle, children } => {
            // Up to 7 arguments (spec §6), evaluated left to right before
            // the handle is invoked — this is what gives `if`'s branches
            // their "both evaluated, no short-circuit" semantics (spec
            // §4.2) for free.
            let mut args = [0.0_f64; 7];
            for (slot, child) in args.iter_mut().zip(children.iter()) {
                *slot = eval(child);
            }
            let args = &args[..children.len()];
            match handle {
                FnHandle::Pure(func) => func(args),
                FnHandle::Closure { func, context } => func(context.as_ref(), args),
            }
        }
    }
}
