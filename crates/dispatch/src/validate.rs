//! Precondition checks run before any numerical work.
//!
//! Each check is a guard clause producing a distinct [`Error`] variant; the first failing check
//! is reported.

use nalgebra::{Dim, Matrix, Scalar, Storage};

use crate::Error;

/// Checks for the general solve: `A` and `B` must have the same number of rows. Any shape of `A`
/// is acceptable, since non-square systems are classified rather than rejected.
pub fn validate_general(a_shape: (usize, usize), b_shape: (usize, usize)) -> Result<(), Error> {
    check_rows(a_shape, b_shape)
}

/// Checks for the triangular solve, in order:
///
/// 1. `A` and `B` must not alias,
/// 2. `A` and `B` must have the same number of rows,
/// 3. `A` must be square.
pub fn validate_triangular<T, R1, C1, S1, R2, C2, S2>(
    mat_a: &Matrix<T, R1, C1, S1>,
    b: &Matrix<T, R2, C2, S2>,
) -> Result<(), Error>
where
    T: Scalar,
    R1: Dim,
    C1: Dim,
    R2: Dim,
    C2: Dim,
    S1: Storage<T, R1, C1>,
    S2: Storage<T, R2, C2>,
{
    if is_alias(mat_a, b) {
        return Err(Error::Aliasing);
    }

    check_rows(mat_a.shape(), b.shape())?;

    if !mat_a.is_square() {
        let (nrows, ncols) = mat_a.shape();
        return Err(Error::NotSquare { nrows, ncols });
    }

    Ok(())
}

/// Two non-empty matrices alias when their first elements live at the same address. This covers
/// passing the same matrix twice as well as two views starting at the same element.
pub fn is_alias<T, R1, C1, S1, R2, C2, S2>(
    mat_a: &Matrix<T, R1, C1, S1>,
    b: &Matrix<T, R2, C2, S2>,
) -> bool
where
    T: Scalar,
    R1: Dim,
    C1: Dim,
    R2: Dim,
    C2: Dim,
    S1: Storage<T, R1, C1>,
    S2: Storage<T, R2, C2>,
{
    // empty matrices may share a dangling pointer without sharing any storage
    !mat_a.is_empty() && !b.is_empty() && std::ptr::eq(mat_a.as_ptr(), b.as_ptr())
}

fn check_rows(a_shape: (usize, usize), b_shape: (usize, usize)) -> Result<(), Error> {
    if a_shape.0 != b_shape.0 {
        return Err(Error::DimensionMismatch {
            a_rows: a_shape.0,
            b_rows: b_shape.0,
        });
    }
    Ok(())
}
