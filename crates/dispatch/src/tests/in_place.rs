use approx::assert_relative_eq;
use nalgebra::{dmatrix, DMatrix};

use super::*;
use crate::{Error, Solver};

#[test_log::test]
fn overwrites_rhs_with_solution() {
    let a = dmatrix![
        3.0, 1.0;
        1.0, 2.0;
    ];
    let b = dmatrix![9.0, 4.0; 8.0, 3.0];
    let mut x = b.clone();

    crate::solve_in_place(&a, &mut x, Speed::Fast).unwrap();
    assert_relative_eq!(&a * &x, b, epsilon = 1e-12);
}

#[test]
fn changes_shape_for_rectangular_systems() {
    let a = dmatrix![
        1.0, 1.0, 1.0;
    ];
    let mut x = dmatrix![3.0];

    crate::solve_in_place(&a, &mut x, Speed::Fast).unwrap();
    assert_eq!(x.shape(), (3, 1));
    assert_relative_eq!(x, dmatrix![1.0; 1.0; 1.0], epsilon = 1e-12);
}

#[test]
fn mismatch_leaves_rhs_untouched() {
    let a = DMatrix::<f64>::identity(3, 3);
    let mut x = sentinel();

    assert_eq!(
        crate::solve_in_place(&a, &mut x, Speed::Fast),
        Err(Error::DimensionMismatch {
            a_rows: 3,
            b_rows: 2
        })
    );
    assert_eq!(x, sentinel());
}

#[test]
fn failure_empties_rhs() {
    let solver = Solver::with_kernel(Recording::failing());
    let a = DMatrix::<f64>::identity(2, 2);
    let mut x = sentinel();

    assert!(solver.solve_in_place(&a, &mut x, Speed::Fast).is_err());
    assert!(x.is_empty());
}
