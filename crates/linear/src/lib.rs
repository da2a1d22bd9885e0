mod config;
mod dense;
mod mode;
mod qr;
mod traits;
mod triangular;

pub use config::KernelConfig;
pub use dense::DenseKernel;
pub use mode::{Diagonal, Speed, SystemShape, Transpose, Triangle, TriangularMode};
pub use traits::Kernel;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("A singular matrix was encountered during a LU factorization (col {col})")]
    LUFactFail { col: usize },

    /// Row equilibration found a row with no non-zero entries.
    #[error("Row {row} of the coefficient matrix is entirely zero")]
    ZeroRow { row: usize },

    #[error("The coefficient matrix is rank deficient (numerical rank {rank}, need {required})")]
    RankDeficient { rank: usize, required: usize },

    #[error("A zero was encountered on the diagonal of a triangular matrix (index {index})")]
    ZeroDiagonal { index: usize },

    #[error("The coefficient matrix has {a_rows} rows but the right-hand side has {b_rows}")]
    DimensionMismatch { a_rows: usize, b_rows: usize },

    /// The shape token passed to a general solve does not describe the coefficient matrix.
    #[error("A {nrows}x{ncols} coefficient matrix is not {shape:?}")]
    ShapeMismatch {
        shape: SystemShape,
        nrows: usize,
        ncols: usize,
    },

    #[error("A triangular solve needs a square matrix, got {nrows}x{ncols}")]
    NotSquare { nrows: usize, ncols: usize },
}
