// ABOUTME: Error types for compile failures in the expression evaluator

use thiserror::Error;

/// A compile-time failure, reported as the 1-based byte offset of the first
/// offending token (spec §6/§7: "a single positive integer").
///
/// The evaluator never produces this type — domain errors at evaluation time
/// become `f64::NAN` or `f64::INFINITY`/`f64::NEG_INFINITY`, never `Err`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    /// The source is empty.
    #[error("empty expression at position {0}")]
    EmptyExpression(usize),

    /// An identifier that does not resolve against the merged symbol table.
    #[error("unknown identifier at position {0}")]
    UnknownIdentifier(usize),

    /// A character, or character sequence, the lexer cannot tokenize.
    #[error("unexpected character at position {0}")]
    UnexpectedCharacter(usize),

    /// A token was not valid at this point in the grammar (e.g. `1**1`,
    /// `1)`, `(1`, `sin(cos5`).
    #[error("unexpected token at position {0}")]
    UnexpectedToken(usize),

    /// Input ended where another token was expected (e.g. `1+`).
    #[error("unexpected end of input at position {0}")]
    UnexpectedEnd(usize),

    /// A parenthesized function call was given the wrong number of
    /// arguments for the function's declared arity.
    #[error("arity mismatch at position {0}")]
    ArityMismatch(usize),

    /// Trailing input remained after a complete expression was parsed.
    #[error("unexpected trailing input at position {0}")]
    TrailingInput(usize),
}

impl CompileError {
    /// The 1-based byte offset of the first offending token. 0 is never
    /// returned here; success is represented by `Ok` at the API boundary,
    /// matching spec §6 where 0 means "no error".
    pub fn position(&self) -> usize {
        match *self {
            CompileError::EmptyExpression(p)
            | CompileError::UnknownIdentifier(p)
            | CompileError::UnexpectedCharacter(p)
            | CompileError::UnexpectedToken(p)
            | CompileError::UnexpectedEnd(p)
            | CompileError::ArityMismatch(p)
            | CompileError::TrailingInput(p) => p,
        }
    }
}
