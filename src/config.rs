// ABOUTME: Build-time constants for the expression evaluator

/// Version string reported by the CLI (spec has no runtime config surface —
/// the crate's two points of build-time variation are Cargo features, not
/// values configured here).
pub const VERSION: &str = "0.1.0";

/// Upper bound on a function or closure's declared arity (spec §6: "Arity
/// ∈ {0..K} where K is a compile-time constant whose maximum must be ≥ 3
/// and may be up to 7"). [`crate::symbol::Symbol::function`] and
/// [`crate::symbol::Symbol::closure`] assert against this.
pub const MAX_ARITY: usize = 7;

/// Fixed number of argument slots the evaluator's local buffer carries per
/// function/closure invocation (spec §4.4); always equal to [`MAX_ARITY`].
pub const EVAL_ARG_SLOTS: usize = MAX_ARITY;

pub const WELCOME_MESSAGE: &str = "exprtree — a small expression evaluator";

/// Two build-time variants selected via Cargo features (spec §4.2, §4.3):
///
/// - `natural-log`: `log` means natural log instead of the default log10.
/// - `pow-right-assoc`: `^` is right-associative and binds tighter than
///   unary minus, instead of the default left-associative/looser.
pub const BUILD_VARIANTS_HELP: &str = r#"
Build-time variants (select at compile time via Cargo features):
  natural-log       `log(x)` means ln(x) instead of log10(x)
  pow-right-assoc   `^` is right-associative and binds tighter than unary minus
"#;
