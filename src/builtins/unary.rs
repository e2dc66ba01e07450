//! Unary built-in functions: one numeric argument, one numeric result.
//!
//! Domain violations (log of a non-positive number, `sqrt` of a negative
//! number, `fac` of a negative integer, ...) produce `NAN` rather than an
//! error — the evaluator never signals a runtime error (spec §4.4/§8).

use super::Entry;
use std::collections::HashMap;

fn abs(a: &[f64]) -> f64 {
    a[0].abs()
}
fn acos(a: &[f64]) -> f64 {
    a[0].acos()
}
fn asin(a: &[f64]) -> f64 {
    a[0].asin()
}
fn atan(a: &[f64]) -> f64 {
    a[0].atan()
}
fn ceil(a: &[f64]) -> f64 {
    a[0].ceil()
}
fn cos(a: &[f64]) -> f64 {
    a[0].cos()
}
fn cosh(a: &[f64]) -> f64 {
    a[0].cosh()
}
fn exp(a: &[f64]) -> f64 {
    a[0].exp()
}
fn floor(a: &[f64]) -> f64 {
    a[0].floor()
}
fn ln(a: &[f64]) -> f64 {
    a[0].ln()
}
fn log10(a: &[f64]) -> f64 {
    a[0].log10()
}
fn sin(a: &[f64]) -> f64 {
    a[0].sin()
}
fn sinh(a: &[f64]) -> f64 {
    a[0].sinh()
}
fn sqrt(a: &[f64]) -> f64 {
    a[0].sqrt()
}
fn tan(a: &[f64]) -> f64 {
    a[0].tan()
}
fn tanh(a: &[f64]) -> f64 {
    a[0].tanh()
}

/// `log` is `log10` by default and natural log under the `natural-log`
/// build-time variant (spec §4.2).
#[cfg(not(feature = "natural-log"))]
fn log(a: &[f64]) -> f64 {
    a[0].log10()
}
#[cfg(feature = "natural-log")]
fn log(a: &[f64]) -> f64 {
    a[0].ln()
}

/// `tgamma(n + 1)` semantics (spec §4.2): accepts non-integers; a negative
/// integer argument is explicitly NaN regardless of what the underlying
/// gamma implementation returns at its poles.
pub(crate) fn fac(a: &[f64]) -> f64 {
    let n = a[0];
    if n < 0.0 && n.fract() == 0.0 {
        return f64::NAN;
    }
    libm::tgamma(n + 1.0)
}

pub(super) fn register(m: &mut HashMap<&'static str, Entry>) {
    let one = |func| Entry::Function { func, arity: 1 };
    m.insert("abs", one(abs));
    m.insert("acos", one(acos));
    m.insert("asin", one(asin));
    m.insert("atan", one(atan));
    m.insert("ceil", one(ceil));
    m.insert("cos", one(cos));
    m.insert("cosh", one(cosh));
    m.insert("exp", one(exp));
    m.insert("fac", one(fac));
    m.insert("floor", one(floor));
    m.insert("ln", one(ln));
    m.insert("log", one(log));
    m.insert("log10", one(log10));
    m.insert("sin", one(sin));
    m.insert("sinh", one(sinh));
    m.insert("sqrt", one(sqrt));
    m.insert("tan", one(tan));
    m.insert("tanh", one(tanh));
}
