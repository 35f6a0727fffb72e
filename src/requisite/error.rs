//! Error types for the requisite expression engine
//!
//! Each pipeline stage has its own error enum. An empty requisite string is
//! deliberately not an error: [`crate::requisite::parse_requisite`] returns
//! `Ok(None)` for it, which the graph treats as "nothing required".

use thiserror::Error;

/// Errors that can occur during normalization.
///
/// Normalization is a fixed set of shrinking repair passes, so failure should
/// not occur in practice; the pass-count guard exists as defense-in-depth.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// The repair loop did not reach a fixed point within the pass budget.
    #[error("separator repair did not converge after {0} passes")]
    Ambiguity(usize),
}

/// Errors that can occur while parsing a normalized requisite string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A character outside the normalized alphabet survived normalization.
    #[error("unexpected character {0:?} in requisite string")]
    UnexpectedCharacter(char),
    /// A comma or slash with a missing operand.
    #[error("separator with a missing operand at byte {0}")]
    DanglingSeparator(usize),
    /// Bracket counts do not match; cannot occur on normalizer output.
    #[error("unbalanced bracket group")]
    UnbalancedGroup,
    /// A bracket pair with nothing inside it.
    #[error("empty bracket group")]
    EmptyGroup,
    /// An alphanumeric token that is not a well-formed course code.
    #[error("{0:?} is not a valid course code")]
    InvalidCode(String),
}
