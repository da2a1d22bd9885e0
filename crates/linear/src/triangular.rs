use nalgebra::{ComplexField, DMatrix};

use crate::{Diagonal, Error, Transpose, TriangularMode};

/// Solves `op(A) X = B` by forward or back substitution, where `op` is the identity, the
/// transpose or the conjugate transpose, as selected by `mode`.
///
/// Only the triangle of `A` named by `mode` is read; with [`Diagonal::Unit`] the diagonal is not
/// read either. A shape error or a zero on the diagonal is reported before `B` is copied.
pub(crate) fn substitute<T>(
    mat_a: &DMatrix<T>,
    b: &DMatrix<T>,
    mode: TriangularMode,
) -> Result<DMatrix<T>, Error>
where
    T: ComplexField + Copy,
{
    let (n, ncols) = mat_a.shape();
    if n != b.nrows() {
        return Err(Error::DimensionMismatch {
            a_rows: n,
            b_rows: b.nrows(),
        });
    }
    if n != ncols {
        return Err(Error::NotSquare { nrows: n, ncols });
    }

    if mode.diagonal == Diagonal::NonUnit {
        if let Some(index) = (0..n).find(|&i| mat_a[(i, i)] == T::zero()) {
            return Err(Error::ZeroDiagonal { index });
        }
    }

    // element (i, j) of op(A)
    let op_a = |i: usize, j: usize| -> T {
        match mode.transpose {
            Transpose::No => mat_a[(i, j)],
            Transpose::Transpose => mat_a[(j, i)],
            Transpose::ConjugateTranspose => mat_a[(j, i)].conjugate(),
        }
    };
    let pivot = |i: usize, acc: T| -> T {
        match mode.diagonal {
            Diagonal::Unit => acc,
            Diagonal::NonUnit => acc / op_a(i, i),
        }
    };

    let mut x = b.clone();
    for mut col in x.column_iter_mut() {
        if mode.is_forward() {
            for i in 0..n {
                let mut acc = col[i];
                for j in 0..i {
                    acc -= op_a(i, j) * col[j];
                }
                col[i] = pivot(i, acc);
            }
        } else {
            for i in (0..n).rev() {
                let mut acc = col[i];
                for j in (i + 1)..n {
                    acc -= op_a(i, j) * col[j];
                }
                col[i] = pivot(i, acc);
            }
        }
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::{dmatrix, Complex};

    use super::*;

    fn upper() -> DMatrix<f64> {
        dmatrix![
            2.0, 1.0, -1.0;
            0.0, 3.0, 2.0;
            0.0, 0.0, 4.0;
        ]
    }

    #[test]
    fn back_substitution() {
        let mat_a = upper();
        let b = dmatrix![1.0, 0.0; 8.0, 1.0; 8.0, 2.0];
        let x = substitute(&mat_a, &b, TriangularMode::upper()).unwrap();
        assert_relative_eq!(&mat_a * &x, b, epsilon = 1e-12);
    }

    #[test]
    fn forward_substitution() {
        let mat_a = upper().transpose();
        let b = dmatrix![2.0; 7.0; 3.0];
        let x = substitute(&mat_a, &b, TriangularMode::lower()).unwrap();
        assert_relative_eq!(&mat_a * &x, b, epsilon = 1e-12);
    }

    #[test]
    fn transposed_upper() {
        let mat_a = upper();
        let b = dmatrix![2.0; 7.0; 3.0];
        let x = substitute(&mat_a, &b, TriangularMode::upper().transposed()).unwrap();
        assert_relative_eq!(mat_a.transpose() * &x, b, epsilon = 1e-12);
    }

    #[test]
    fn only_referenced_triangle_is_read() {
        // Garbage below the diagonal must be ignored for an upper solve
        let mut mat_a = upper();
        mat_a[(1, 0)] = 100.0;
        mat_a[(2, 0)] = -7.0;
        mat_a[(2, 1)] = f64::NAN;

        let b = dmatrix![1.0; 8.0; 8.0];
        let x = substitute(&mat_a, &b, TriangularMode::upper()).unwrap();
        let expected = substitute(&upper(), &b, TriangularMode::upper()).unwrap();
        assert_eq!(x, expected);
    }

    #[test]
    fn unit_diagonal() {
        let mat_a = dmatrix![
            0.0, 0.0;
            3.0, 0.0;
        ];
        let b = dmatrix![1.0; 5.0];
        let x = substitute(&mat_a, &b, TriangularMode::lower().unit_diagonal()).unwrap();
        assert_relative_eq!(x, dmatrix![1.0; 2.0], epsilon = 1e-12);
    }

    #[test]
    fn zero_diagonal() {
        let mut mat_a = upper();
        mat_a[(1, 1)] = 0.0;
        let b = dmatrix![1.0; 1.0; 1.0];
        assert_eq!(
            substitute(&mat_a, &b, TriangularMode::upper()).unwrap_err(),
            Error::ZeroDiagonal { index: 1 }
        );
    }

    #[test]
    fn conjugate_transpose() {
        let c = |re, im| Complex::new(re, im);
        let mat_a = dmatrix![
            c(1.0, 1.0), c(2.0, -1.0);
            c(0.0, 0.0), c(0.0, 3.0);
        ];
        let b = dmatrix![c(1.0, 0.0); c(2.0, 2.0)];
        let x = substitute(&mat_a, &b, TriangularMode::upper().conjugate_transposed()).unwrap();
        assert!((mat_a.adjoint() * x - b).norm() < 1e-12);
    }

    #[test]
    fn mismatched_rows() {
        let b = dmatrix![1.0; 2.0];
        assert_eq!(
            substitute(&upper(), &b, TriangularMode::upper()).unwrap_err(),
            Error::DimensionMismatch {
                a_rows: 3,
                b_rows: 2
            }
        );
    }

    #[test]
    fn non_square() {
        let mat_a = dmatrix![
            1.0, 2.0, 3.0;
            0.0, 4.0, 5.0;
        ];
        let b = dmatrix![1.0; 2.0];
        assert_eq!(
            substitute(&mat_a, &b, TriangularMode::lower()).unwrap_err(),
            Error::NotSquare { nrows: 2, ncols: 3 }
        );
    }
}
