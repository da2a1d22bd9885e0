use std::cell::RefCell;

use nalgebra::{ComplexField, DMatrix};

use crate::{Kernel, Speed, SolveMode, SystemShape, TriangularMode};

mod in_place;

/// Kernel that records every mode it is asked to run and either fails or returns zeros.
#[derive(Debug, Default)]
pub struct Recording {
    pub calls: RefCell<Vec<SolveMode>>,
    pub fail: bool,
}

impl Recording {
    pub fn failing() -> Self {
        Recording {
            fail: true,
            ..Default::default()
        }
    }

    fn respond<T: ComplexField>(
        &self,
        mode: SolveMode,
        shape: (usize, usize),
    ) -> Result<DMatrix<T>, linear::Error> {
        self.calls.borrow_mut().push(mode);
        if self.fail {
            Err(linear::Error::LUFactFail { col: 1 })
        } else {
            Ok(DMatrix::zeros(shape.0, shape.1))
        }
    }
}

impl<T: ComplexField> Kernel<T> for Recording {
    fn solve_general(
        &self,
        mat_a: DMatrix<T>,
        b: &DMatrix<T>,
        shape: SystemShape,
        _speed: Speed,
    ) -> Result<DMatrix<T>, linear::Error> {
        self.respond(SolveMode::General(shape), (mat_a.ncols(), b.ncols()))
    }

    fn solve_triangular(
        &self,
        mat_a: &DMatrix<T>,
        b: &DMatrix<T>,
        mode: TriangularMode,
    ) -> Result<DMatrix<T>, linear::Error> {
        self.respond(SolveMode::Triangular(mode), (mat_a.ncols(), b.ncols()))
    }
}

/// A pre-existing output value, used to check that `out` is left untouched.
pub fn sentinel() -> DMatrix<f64> {
    DMatrix::from_element(2, 2, -42.0)
}
