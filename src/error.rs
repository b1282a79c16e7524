//! Error kinds raised by the rational and p-adic engine.

use thiserror::Error;

/// Errors that can occur while building or converting ratios and p-adic
/// expansions.
///
/// Every error is raised at the point of violation and carries no partial
/// result.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PadicError {
    #[error("can't divide by 0")]
    DivisionByZero,

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("value out of range: {0}")]
    ValueOutOfRange(String),

    #[error("zero operand: {0}")]
    ZeroOperand(String),

    #[error("rational reconstruction failed: {0}")]
    ReconstructionFailed(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, PadicError>;
