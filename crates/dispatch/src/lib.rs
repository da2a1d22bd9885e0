//! Dispatch layer between a generic "solve `A X = B`" request and the dense solve kernels.
//!
//! A request is validated, classified by the shape of `A` and handed to a [`Kernel`]. The caller's
//! output matrix is written exactly once, at the end: it receives the solution on success, or is
//! reset to an empty matrix when the kernel fails. Validation failures leave it untouched.
//!
//! ```
//! use nalgebra::{dmatrix, DMatrix};
//!
//! let a = dmatrix![2.0, 1.0; 1.0, 3.0];
//! let b = dmatrix![3.0; 5.0];
//! let mut x = DMatrix::zeros(0, 0);
//! dispatch::solve(&mut x, &a, &b, dispatch::Speed::Fast).unwrap();
//! assert!((&a * &x - &b).norm() < 1e-12);
//! ```

use nalgebra::{ComplexField, DMatrix, Dim, Matrix, Storage};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

pub mod classify;
mod error;
mod solver;
pub mod validate;
#[cfg(test)]
mod tests;

pub use classify::classify;
pub use error::Error;
pub use linear::{
    DenseKernel, Diagonal, Kernel, KernelConfig, Speed, SystemShape, Transpose, Triangle,
    TriangularMode,
};
pub use solver::Solver;

/// The solving strategy selected for one call. Derived once, before the kernel runs.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SolveMode {
    /// Unstructured `A`, routed by its shape.
    General(SystemShape),
    /// Square triangular `A`, solved by substitution.
    Triangular(TriangularMode),
}

/// Solves `A X = B` with the default [`DenseKernel`]. See [`Solver::solve`].
pub fn solve<T, R1, C1, S1, R2, C2, S2>(
    out: &mut DMatrix<T>,
    mat_a: &Matrix<T, R1, C1, S1>,
    b: &Matrix<T, R2, C2, S2>,
    speed: Speed,
) -> Result<(), Error>
where
    T: ComplexField + Copy,
    R1: Dim,
    C1: Dim,
    R2: Dim,
    C2: Dim,
    S1: Storage<T, R1, C1>,
    S2: Storage<T, R2, C2>,
{
    Solver::new().solve(out, mat_a, b, speed)
}

/// Solves `A X = B` in place of `B` with the default [`DenseKernel`]. See
/// [`Solver::solve_in_place`].
pub fn solve_in_place<T, R1, C1, S1>(
    mat_a: &Matrix<T, R1, C1, S1>,
    b: &mut DMatrix<T>,
    speed: Speed,
) -> Result<(), Error>
where
    T: ComplexField + Copy,
    R1: Dim,
    C1: Dim,
    S1: Storage<T, R1, C1>,
{
    Solver::new().solve_in_place(mat_a, b, speed)
}

/// Solves `op(A) X = B` for triangular `A` with the default [`DenseKernel`]. See
/// [`Solver::solve_triangular`].
pub fn solve_triangular<T, R1, C1, S1, R2, C2, S2>(
    out: &mut DMatrix<T>,
    mat_a: &Matrix<T, R1, C1, S1>,
    b: &Matrix<T, R2, C2, S2>,
    mode: TriangularMode,
) -> Result<(), Error>
where
    T: ComplexField + Copy,
    R1: Dim,
    C1: Dim,
    R2: Dim,
    C2: Dim,
    S1: Storage<T, R1, C1>,
    S2: Storage<T, R2, C2>,
{
    Solver::new().solve_triangular(out, mat_a, b, mode)
}
