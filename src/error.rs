use derive_more::{Display, Error};

/// Error taxonomy for the symbolic analysis phase.
///
/// Mirrors the four classes from the design: input-structural problems are
/// caught before any large allocation happens, resource failures come from
/// fallible reservations on the big analysis buffers, delegated failures are
/// reported verbatim by whichever ordering backend was invoked, and internal
/// errors mean an invariant the frontal analyzer relies on was violated by
/// code in this crate, not by the caller's input.
#[derive(Debug, Display, Error, PartialEq, Clone)]
pub enum SymbolicError {
    #[display("required argument is missing")]
    ArgumentMissing,

    #[display("matrix dimension must be positive")]
    NonPositiveDimension,

    #[display("invalid matrix pattern: {reason}")]
    InvalidMatrix { reason: String },

    #[display("permutation is not a bijection of 0..n")]
    InvalidPermutation,

    #[display("failed to reserve memory for analysis buffers")]
    MemoryReservation,

    #[display("ordering backend failed: {message}")]
    OrderingFailed { message: String },

    #[display("internal invariant violated: {message}")]
    Internal { message: String },
}

/// Crate-wide result alias, matching the `problemo`-based error plumbing
/// already used throughout the teacher's `linalg` module.
pub type Result<T> = std::result::Result<T, problemo::Problem>;
