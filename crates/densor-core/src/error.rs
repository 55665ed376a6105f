//! Error taxonomy for `densor-core`.
//!
//! Every failure is local and synchronous: it is raised at the call that
//! violated a contract, and nothing is clamped or wrapped to recover.

use thiserror::Error;

/// All errors returned by `densor-core`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A scalar index (or storage offset) is beyond the extent it targets.
    #[error("index {index} out of bounds for length {len}")]
    OutOfBounds { index: isize, len: usize },

    /// A contiguous or stepped range selects outside the axis, or its bounds
    /// are ordered incompatibly with the step direction.
    #[error("invalid range {start}..{end} for axis of length {len}")]
    InvalidRange {
        start: isize,
        end: isize,
        len: usize,
    },

    /// A stepped range was given a step of zero.
    #[error("invalid step {step} in range {start}..{end}")]
    InvalidStep {
        start: isize,
        end: isize,
        step: isize,
    },

    /// A boolean mask does not have the same length as the axis it selects.
    #[error("mask of length {mask_len} cannot select along an axis of length {axis_len}")]
    MaskLengthMismatch { mask_len: usize, axis_len: usize },

    /// Operand logical shapes differ in an element-wise operation.
    #[error("shape mismatch: {lhs:?} vs {rhs:?}")]
    ShapeMismatch { lhs: Vec<usize>, rhs: Vec<usize> },

    /// Inner dimensions do not conform in a product operation.
    #[error("dimension mismatch: {lhs:?} is not conformable with {rhs:?}")]
    DimensionMismatch { lhs: Vec<usize>, rhs: Vec<usize> },

    /// A construction argument is outside the operation's contract.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: &'static str },
}

/// Convenience alias used throughout `densor-core`.
pub type Result<T> = std::result::Result<T, Error>;
