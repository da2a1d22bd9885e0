use thiserror::Error;

use crate::SolveMode;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// `A` and `B` disagree on the number of rows.
    #[error("solve(): number of rows in A and B must be the same (A has {a_rows}, B has {b_rows})")]
    DimensionMismatch { a_rows: usize, b_rows: usize },

    /// `A` and `B` share storage where the solve needs them independent.
    #[error("solve(): A is an alias of B")]
    Aliasing,

    /// A structural requirement on `A` is violated: triangular solves need a square matrix.
    #[error("solve(): A is not a square matrix ({nrows}x{ncols})")]
    NotSquare { nrows: usize, ncols: usize },

    /// The kernel could not solve a well-formed system (singular, rank deficient, ...).
    #[error("solve(): solution not found")]
    SolveFailure {
        mode: SolveMode,
        #[source]
        source: linear::Error,
    },
}

impl Error {
    /// `true` for errors caused by malformed input, `false` for numerical failure.
    pub fn is_usage_error(&self) -> bool {
        !matches!(self, Error::SolveFailure { .. })
    }
}
