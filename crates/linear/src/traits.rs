use nalgebra::{ComplexField, DMatrix};

use crate::{Error, Speed, SystemShape, TriangularMode};

pub trait Kernel<T: ComplexField> {
    /// Solves the general system `A X = B`.
    ///
    /// ## Arguments
    /// * `mat_a` the coefficient matrix. The kernel owns it and may overwrite it with its factors.
    /// * `b` the right-hand side, with the same number of rows as `mat_a`.
    /// * `shape` the shape classification of `mat_a`, selecting LU, least-squares or minimum-norm.
    /// * `speed` performance hint, only meaningful for [`SystemShape::Square`].
    ///
    /// ## Returns
    /// The `ncols(A) x ncols(B)` solution, or an error if the system could not be solved or the
    /// inputs are inconsistent with each other or with `shape`. No partial solution is ever
    /// returned.
    fn solve_general(
        &self,
        mat_a: DMatrix<T>,
        b: &DMatrix<T>,
        shape: SystemShape,
        speed: Speed,
    ) -> Result<DMatrix<T>, Error>;

    /// Solves `op(A) X = B` where `A` is square and triangular as described by `mode`. Only the
    /// triangle named by `mode` is read. A non-square `A` or a row mismatch is an error.
    fn solve_triangular(
        &self,
        mat_a: &DMatrix<T>,
        b: &DMatrix<T>,
        mode: TriangularMode,
    ) -> Result<DMatrix<T>, Error>;
}
