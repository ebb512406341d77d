//! Expression language errors
//!
//! [`ExprError`] describes what went wrong inside a single macro span. The
//! evaluator never reports it on its own: callers wrap it with [`failed`] so the
//! final message names the span and where it came from.

use thiserror::Error;

use super::ThemeError;

/// Failure while tokenizing, parsing or evaluating one expression
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExprError {
    #[error("unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    #[error("invalid number literal '{literal}'")]
    InvalidNumber { literal: String },

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },

    #[error("unknown function '{name}'")]
    UnknownFunction { name: String },

    #[error("unknown name '{name}'")]
    UnknownName { name: String },

    #[error("{function}() takes {expected} argument(s), got {found}")]
    ArgumentCount {
        function: &'static str,
        expected: String,
        found: usize,
    },

    #[error("{function}() got an unexpected keyword argument '{name}'")]
    UnexpectedKeyword { function: &'static str, name: String },

    #[error("{function}() got multiple values for argument '{name}'")]
    DuplicateArgument { function: &'static str, name: String },

    #[error("{function}() expects {expected}, got {found}")]
    InvalidArgument {
        function: &'static str,
        expected: &'static str,
        found: String,
    },

    #[error("{function}() argument {value} is outside {range}")]
    OutOfRange {
        function: &'static str,
        value: String,
        range: &'static str,
    },

    #[error("unsupported operand types for '{op}': {lhs} and {rhs}")]
    InvalidOperands {
        op: char,
        lhs: &'static str,
        rhs: &'static str,
    },

    #[error("unsupported operand type for unary '{op}': {operand}")]
    InvalidOperand { op: char, operand: &'static str },

    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow")]
    Overflow,

    #[error("unknown constant '{name}'")]
    UnknownConstant { name: String },

    #[error("circular constant reference: {chain}")]
    CircularConstant { chain: String },

    #[error("in constant '{name}': {source}")]
    InConstant {
        name: String,
        #[source]
        source: Box<ExprError>,
    },

    #[error("unknown preset '{name}'")]
    UnknownPreset { name: String },

    #[error("invalid {kind} name '{name}', expected 'section.key'")]
    InvalidLookupName { kind: &'static str, name: String },

    #[error("unknown blend mode '{mode}'")]
    UnknownBlendMode { mode: String },

    #[error("expression nests deeper than {limit} levels")]
    TooDeep { limit: usize },

    #[error("unterminated macro: '{{{{' without a closing '}}}}'")]
    UnterminatedMacro,

    #[error("empty macro '{{{{}}}}'")]
    EmptyMacro,
}

/// Wraps an expression failure with the offending span and its location
pub fn failed(location: impl Into<String>, span: impl Into<String>, source: ExprError) -> ThemeError {
    ThemeError::ExpressionFailed {
        location: location.into(),
        span: span.into(),
        source,
    }
}
