use linear::{DenseKernel, Kernel, Speed, SystemShape, TriangularMode};
use nalgebra::{ComplexField, DMatrix, Dim, Matrix, Scalar, Storage};

use crate::{classify, validate, Error, SolveMode};

/// Validates solve requests, selects a [`SolveMode`] and runs it on a [`Kernel`].
///
/// Every entry point follows the same pipeline: validate, classify (general solves only), run the
/// kernel, then commit or reset the output. Validation errors are returned before any copy or
/// kernel work and leave the output untouched. A kernel failure resets the output to an empty
/// `0 x 0` matrix and returns [`Error::SolveFailure`]; there are no retries.
#[derive(Clone, Debug, Default)]
pub struct Solver<K = DenseKernel> {
    kernel: K,
}

impl Solver<DenseKernel> {
    /// Creates a solver backed by the default [`DenseKernel`].
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K> Solver<K> {
    pub fn with_kernel(kernel: K) -> Self {
        Solver { kernel }
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Solves `A X = B` for arbitrary `A`.
    ///
    /// Square systems are solved exactly, over-determined ones in the least-squares sense and
    /// under-determined ones for the minimum-norm solution.
    ///
    /// ## Arguments
    /// * `out` receives the `ncols(A) x ncols(B)` solution, or is emptied if no solution is found.
    /// * `mat_a` the coefficient matrix. It is copied, the kernel works on the copy.
    /// * `b` the right-hand side.
    /// * `speed` performance hint passed through to the kernel.
    ///
    /// ## Errors
    /// * [`Error::DimensionMismatch`] if `A` and `B` have different row counts.
    /// * [`Error::SolveFailure`] if the kernel could not solve the system.
    pub fn solve<T, R1, C1, S1, R2, C2, S2>(
        &self,
        out: &mut DMatrix<T>,
        mat_a: &Matrix<T, R1, C1, S1>,
        b: &Matrix<T, R2, C2, S2>,
        speed: Speed,
    ) -> Result<(), Error>
    where
        K: Kernel<T>,
        T: ComplexField,
        R1: Dim,
        C1: Dim,
        R2: Dim,
        C2: Dim,
        S1: Storage<T, R1, C1>,
        S2: Storage<T, R2, C2>,
    {
        log::trace!(
            "solve(A: {:?}, B: {:?}, {:?})",
            mat_a.shape(),
            b.shape(),
            speed
        );

        validate::validate_general(mat_a.shape(), b.shape())?;
        let shape = classify(mat_a.nrows(), mat_a.ncols());

        self.run(
            out,
            SolveMode::General(shape),
            to_dense(mat_a),
            &to_dense(b),
            speed,
        )
    }

    /// Solves `A X = B` where `b` holds `B` on entry and `X` on return.
    ///
    /// The right-hand side is copied before the kernel runs, so it is never read after being
    /// partially overwritten. On failure `b` is emptied, as `out` would be for [`Solver::solve`].
    pub fn solve_in_place<T, R1, C1, S1>(
        &self,
        mat_a: &Matrix<T, R1, C1, S1>,
        b: &mut DMatrix<T>,
        speed: Speed,
    ) -> Result<(), Error>
    where
        K: Kernel<T>,
        T: ComplexField,
        R1: Dim,
        C1: Dim,
        S1: Storage<T, R1, C1>,
    {
        log::trace!(
            "solve_in_place(A: {:?}, B: {:?}, {:?})",
            mat_a.shape(),
            b.shape(),
            speed
        );

        validate::validate_general(mat_a.shape(), b.shape())?;
        let shape = classify(mat_a.nrows(), mat_a.ncols());

        let rhs = b.clone();
        self.run(b, SolveMode::General(shape), to_dense(mat_a), &rhs, speed)
    }

    /// Solves `op(A) X = B` where `A` is square and triangular as described by `mode`.
    ///
    /// ## Errors
    /// * [`Error::Aliasing`] if `A` and `B` share storage.
    /// * [`Error::DimensionMismatch`] if `A` and `B` have different row counts.
    /// * [`Error::NotSquare`] if `A` is not square.
    /// * [`Error::SolveFailure`] if the kernel could not solve the system.
    pub fn solve_triangular<T, R1, C1, S1, R2, C2, S2>(
        &self,
        out: &mut DMatrix<T>,
        mat_a: &Matrix<T, R1, C1, S1>,
        b: &Matrix<T, R2, C2, S2>,
        mode: TriangularMode,
    ) -> Result<(), Error>
    where
        K: Kernel<T>,
        T: ComplexField,
        R1: Dim,
        C1: Dim,
        R2: Dim,
        C2: Dim,
        S1: Storage<T, R1, C1>,
        S2: Storage<T, R2, C2>,
    {
        log::trace!(
            "solve_triangular(A: {:?}, B: {:?}, {:?})",
            mat_a.shape(),
            b.shape(),
            mode
        );

        validate::validate_triangular(mat_a, b)?;

        self.run(
            out,
            SolveMode::Triangular(mode),
            to_dense(mat_a),
            &to_dense(b),
            Speed::default(),
        )
    }

    /// Runs the kernel for `mode`, then commits the solution to `out` or resets it.
    fn run<T>(
        &self,
        out: &mut DMatrix<T>,
        mode: SolveMode,
        mat_a: DMatrix<T>,
        b: &DMatrix<T>,
        speed: Speed,
    ) -> Result<(), Error>
    where
        K: Kernel<T>,
        T: ComplexField,
    {
        let solution_shape = (mat_a.ncols(), b.ncols());

        let result = match mode {
            SolveMode::General(shape) => {
                match shape {
                    SystemShape::Square => {}
                    SystemShape::OverDetermined => {
                        log::debug!("solve(): detected over-determined system")
                    }
                    SystemShape::UnderDetermined => {
                        log::debug!("solve(): detected under-determined system")
                    }
                }
                self.kernel.solve_general(mat_a, b, shape, speed)
            }
            SolveMode::Triangular(tri) => self.kernel.solve_triangular(&mat_a, b, tri),
        };

        match result {
            Ok(x) => {
                debug_assert_eq!(x.shape(), solution_shape);
                *out = x;
                Ok(())
            }
            Err(source) => {
                log::debug!("solve(): solution not found ({:?}): {}", mode, source);
                *out = DMatrix::zeros(0, 0);
                Err(Error::SolveFailure { mode, source })
            }
        }
    }
}

fn to_dense<T, R, C, S>(m: &Matrix<T, R, C, S>) -> DMatrix<T>
where
    T: Scalar,
    R: Dim,
    C: Dim,
    S: Storage<T, R, C>,
{
    DMatrix::from_iterator(m.nrows(), m.ncols(), m.iter().cloned())
}
