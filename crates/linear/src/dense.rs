//! Dense solve kernel. Square systems use an LU factorization ported from the SUNDIALS suite;
//! rectangular systems are routed to the QR kernels.
//!
use nalgebra::{ComplexField, DMatrix, Dim, Matrix, RealField, Storage, StorageMut};
use num_traits::{One, Zero};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

use crate::{qr, triangular, Error, Kernel, KernelConfig, Speed, SystemShape, TriangularMode};

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default)]
pub struct DenseKernel {
    config: KernelConfig,
}

impl DenseKernel {
    /// Creates a new dense kernel with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: KernelConfig) -> Self {
        DenseKernel { config }
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }
}

impl<T> Kernel<T> for DenseKernel
where
    T: ComplexField + Copy,
{
    fn solve_general(
        &self,
        mat_a: DMatrix<T>,
        b: &DMatrix<T>,
        shape: SystemShape,
        speed: Speed,
    ) -> Result<DMatrix<T>, Error> {
        log::trace!(
            "DenseKernel::solve_general({}x{}, {:?}, {:?})",
            mat_a.nrows(),
            mat_a.ncols(),
            shape,
            speed
        );

        let (nrows, ncols) = mat_a.shape();
        if nrows != b.nrows() {
            return Err(Error::DimensionMismatch {
                a_rows: nrows,
                b_rows: b.nrows(),
            });
        }
        if !shape.admits(nrows, ncols) {
            return Err(Error::ShapeMismatch {
                shape,
                nrows,
                ncols,
            });
        }

        // Nothing to factor: the (minimum-norm) solution is zero.
        if mat_a.is_empty() {
            return Ok(DMatrix::zeros(mat_a.ncols(), b.ncols()));
        }

        match (shape, speed) {
            (SystemShape::Square, Speed::Fast) => solve_square(mat_a, b, &self.config),
            (SystemShape::Square, Speed::Robust) => solve_square_robust(mat_a, b, &self.config),
            (SystemShape::OverDetermined, _) => qr::least_squares(mat_a, b, &self.config),
            (SystemShape::UnderDetermined, _) => qr::minimum_norm(mat_a, b, &self.config),
        }
    }

    fn solve_triangular(
        &self,
        mat_a: &DMatrix<T>,
        b: &DMatrix<T>,
        mode: TriangularMode,
    ) -> Result<DMatrix<T>, Error> {
        triangular::substitute(mat_a, b, mode)
    }
}

/// Rejects an LU factorization whose `U` has a diagonal entry at or below the rank threshold of
/// `config`. `dense_get_rf` only stops on an exact zero pivot, which round-off rarely produces.
fn check_pivots<T>(lu: &DMatrix<T>, config: &KernelConfig) -> Result<(), Error>
where
    T: ComplexField + Copy,
{
    let diag = lu.diagonal();
    let max_diag = diag
        .iter()
        .fold(T::RealField::zero(), |acc, v| acc.max(v.modulus()));
    let tol = config.rank_threshold(max_diag, lu.shape());

    match diag.iter().position(|v| v.modulus() <= tol) {
        Some(k) => Err(Error::LUFactFail { col: k + 1 }),
        None => Ok(()),
    }
}

fn solve_square<T>(
    mut mat_a: DMatrix<T>,
    b: &DMatrix<T>,
    config: &KernelConfig,
) -> Result<DMatrix<T>, Error>
where
    T: ComplexField + Copy,
{
    let mut pivot = vec![0; mat_a.ncols()];
    dense_get_rf(&mut mat_a, &mut pivot).map_err(|col| Error::LUFactFail { col })?;
    check_pivots(&mat_a, config)?;

    let mut x = b.clone();
    dense_get_rs(&mat_a, &pivot, &mut x);
    Ok(x)
}

/// Equilibrates the rows of `A` and `B` so that the largest entry of every row of `A` has unit
/// modulus, factors, then performs `config.refinement_steps` sweeps of iterative refinement against
/// the equilibrated system. Row scaling does not change the solution.
fn solve_square_robust<T>(
    mat_a: DMatrix<T>,
    b: &DMatrix<T>,
    config: &KernelConfig,
) -> Result<DMatrix<T>, Error>
where
    T: ComplexField + Copy,
{
    let n = mat_a.nrows();
    let mut scaled_a = mat_a;
    let mut scaled_b = b.clone();

    for i in 0..n {
        let row_max = scaled_a
            .row(i)
            .iter()
            .fold(T::RealField::zero(), |acc, v| acc.max(v.modulus()));
        if row_max == T::RealField::zero() {
            return Err(Error::ZeroRow { row: i });
        }

        let s = T::from_real(T::RealField::one() / row_max);
        for j in 0..scaled_a.ncols() {
            scaled_a[(i, j)] *= s;
        }
        for j in 0..scaled_b.ncols() {
            scaled_b[(i, j)] *= s;
        }
    }

    let mut lu = scaled_a.clone();
    let mut pivot = vec![0; n];
    dense_get_rf(&mut lu, &mut pivot).map_err(|col| Error::LUFactFail { col })?;
    check_pivots(&lu, config)?;

    let mut x = scaled_b.clone();
    dense_get_rs(&lu, &pivot, &mut x);

    for _ in 0..config.refinement_steps {
        let mut correction = &scaled_b - &scaled_a * &x;
        dense_get_rs(&lu, &pivot, &mut correction);
        x += correction;
    }

    Ok(x)
}

/// Performs the LU factorization of the M by N dense matrix A.
///
/// This is done using standard Gaussian elimination with partial (row) pivoting. Note that this
/// applies only to matrices with M >= N and full column rank.
///
/// A successful LU factorization leaves the matrix A and the pivot array p with the following
/// information:
///
/// 1. p[k] contains the row number of the pivot element chosen at the beginning of elimination
///     step k, k=0, 1, ..., N-1.
///
/// 2. If the unique LU factorization of A is given by PA = LU, where P is a permutation matrix,
///     L is a lower trapezoidal matrix with all 1's on the diagonal, and U is an upper triangular
///     matrix, then the upper triangular part of A (including its diagonal) contains U and the
///     strictly lower trapezoidal part of A contains the multipliers, I-L.
///
/// For square matrices (M = N), L is unit lower triangular.
///
/// returns `Ok` if successful. Otherwise it encountered a zero diagonal element during the factorization. In this case
/// it returns the column index (numbered from one) at which it encountered the zero.
pub(crate) fn dense_get_rf<T, R, C, S>(
    mat_a: &mut Matrix<T, R, C, S>,
    pivot: &mut [usize],
) -> Result<(), usize>
where
    T: ComplexField + Copy,
    R: Dim,
    C: Dim,
    S: StorageMut<T, R, C>,
{
    debug_assert!(
        mat_a.nrows() >= mat_a.ncols(),
        "Number of rows must be >= number of columns"
    );

    let m = mat_a.nrows();
    let n = mat_a.ncols();

    // k-th elimination step number
    for k in 0..n {
        let col_k = mat_a.column(k);

        // find l = pivot row number
        let mut l = k;
        for i in (k + 1)..m {
            if col_k[i].abs() > col_k[l].abs() {
                l = i;
            }
        }
        pivot[k] = l;

        // check for zero pivot element
        if col_k[l] == T::zero() {
            return Err(k + 1);
        }

        // swap a(k,1:n) and a(l,1:n) if necessary
        if l != k {
            for i in 0..n {
                mat_a.swap((k, i), (l, i));
            }
        }

        // Scale the elements below the diagonal in column k by 1.0 / a[k,k]. After the above swap a[k,k] holds the pivot
        // element. This scaling stores the pivot row multipliers a(i,k)/a(k,k) in a(i,k), i=k+1, ..., m-1.
        let mult = T::one() / mat_a[(k, k)];
        for i in (k + 1)..m {
            mat_a[(i, k)] *= mult;
        }

        // row_i = row_i - [a(i,k)/a(k,k)] row_k, i=k+1, ..., m-1
        // row k is the pivot row after swapping with row l.
        // The computation is done one column at a time, column j=k+1, ..., n-1.
        for j in (k + 1)..n {
            let a_kj = mat_a[(k, j)];

            if a_kj != T::zero() {
                for i in (k + 1)..m {
                    let a_ik = mat_a[(i, k)];
                    mat_a[(i, j)] -= a_kj * a_ik;
                }
            }
        }
    }

    Ok(())
}

/// `dense_get_rs` solves the N-dimensional system A X = B using the LU factorization in A and the
/// pivot information in p computed in `dense_get_rf`. Every column of B is overwritten with the
/// corresponding column of X. This routine cannot fail if the corresponding call to
/// `dense_get_rf` did not fail.
///
/// Does NOT check for a square matrix!
pub(crate) fn dense_get_rs<T, R, C, R2, C2, SA, SB>(
    mat_a: &Matrix<T, R, C, SA>,
    pivot: &[usize],
    b: &mut Matrix<T, R2, C2, SB>,
) where
    T: ComplexField + Copy,
    R: Dim,
    C: Dim,
    R2: Dim,
    C2: Dim,
    SA: Storage<T, R, C>,
    SB: StorageMut<T, R2, C2>,
{
    let n = mat_a.ncols();
    if n == 0 {
        return;
    }

    for mut x in b.column_iter_mut() {
        // Permute b, based on pivot information in p
        for (k, &pk) in pivot.iter().enumerate().take(n) {
            if pk != k {
                x.swap((k, 0), (pk, 0));
            }
        }

        // Solve Ly = b, store solution y in b
        for k in 0..(n - 1) {
            let col_k = mat_a.column(k);
            let xk = x[k];
            for i in (k + 1)..n {
                x[i] -= col_k[i] * xk;
            }
        }

        // Solve Ux = y, store solution x in b
        for k in (1..n).rev() {
            let col_k = mat_a.column(k);
            x[k] /= col_k[k];
            let xk = x[k];
            for i in 0..k {
                x[i] -= col_k[i] * xk;
            }
        }
        x[0] /= mat_a[(0, 0)];
    }
}
