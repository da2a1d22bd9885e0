//! Householder QR kernels for rectangular systems.

use nalgebra::{ComplexField, DMatrix, RealField};
use num_traits::Zero;

use crate::{Error, KernelConfig};

/// Number of diagonal entries of `r` whose modulus exceeds the rank tolerance of `config`, for an
/// `m x n` coefficient matrix of the given `shape`.
fn numerical_rank<T>(r: &DMatrix<T>, shape: (usize, usize), config: &KernelConfig) -> usize
where
    T: ComplexField + Copy,
{
    let diag = r.diagonal();
    let max_diag = diag
        .iter()
        .fold(T::RealField::zero(), |acc, v| acc.max(v.modulus()));
    let tol = config.rank_threshold(max_diag, shape);

    diag.iter().filter(|v| v.modulus() > tol).count()
}

/// Least-squares solution of an over-determined system: minimises `‖A x − B‖₂` column by column.
///
/// `A = Q R` with `Q` having orthonormal columns, so `x = R⁻¹ Qᴴ B`.
pub(crate) fn least_squares<T>(
    mat_a: DMatrix<T>,
    b: &DMatrix<T>,
    config: &KernelConfig,
) -> Result<DMatrix<T>, Error>
where
    T: ComplexField + Copy,
{
    let shape = mat_a.shape();
    let required = shape.1;

    let qr = mat_a.qr();
    let r = qr.r();

    let rank = numerical_rank(&r, shape, config);
    if rank < required {
        return Err(Error::RankDeficient { rank, required });
    }

    let qhb = qr.q().adjoint() * b;
    r.solve_upper_triangular(&qhb)
        .ok_or(Error::RankDeficient { rank, required })
}

/// Minimum-norm solution of an under-determined system.
///
/// With `Aᴴ = Q R`, `A = Rᴴ Qᴴ`. Solving `Rᴴ y = B` and taking `x = Q y` satisfies `A x = B`, and
/// `x` lies in the row space of `A`, which makes it the solution of least norm.
pub(crate) fn minimum_norm<T>(
    mat_a: DMatrix<T>,
    b: &DMatrix<T>,
    config: &KernelConfig,
) -> Result<DMatrix<T>, Error>
where
    T: ComplexField + Copy,
{
    let shape = mat_a.shape();
    let required = shape.0;

    let qr = mat_a.adjoint().qr();
    let r = qr.r();

    let rank = numerical_rank(&r, shape, config);
    if rank < required {
        return Err(Error::RankDeficient { rank, required });
    }

    let y = r
        .adjoint()
        .solve_lower_triangular(b)
        .ok_or(Error::RankDeficient { rank, required })?;
    Ok(qr.q() * y)
}
