//! Mode tokens understood by the solve kernels.

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Shape of a general (unstructured) linear system `A x = B`.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SystemShape {
    /// As many equations as unknowns.
    Square,
    /// More equations than unknowns, solved in the least-squares sense.
    OverDetermined,
    /// Fewer equations than unknowns, solved for the minimum-norm solution.
    UnderDetermined,
}

impl SystemShape {
    /// Whether an `nrows x ncols` coefficient matrix has this shape.
    pub fn admits(&self, nrows: usize, ncols: usize) -> bool {
        match self {
            SystemShape::Square => nrows == ncols,
            SystemShape::OverDetermined => nrows > ncols,
            SystemShape::UnderDetermined => nrows < ncols,
        }
    }
}

/// Performance hint for square systems.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Speed {
    #[default]
    Fast,
    /// Slower, but equilibrates the system and iteratively refines the solution.
    Robust,
}

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Triangle {
    Upper,
    Lower,
}

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Transpose {
    /// Solve `A x = B`
    #[default]
    No,
    /// Solve `Aᵀ x = B`
    Transpose,
    /// Solve `Aᴴ x = B`
    ConjugateTranspose,
}

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Diagonal {
    #[default]
    NonUnit,
    /// The diagonal is assumed to be all ones and is never read.
    Unit,
}

/// The single mode token passed to a triangular solve.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TriangularMode {
    pub triangle: Triangle,
    pub transpose: Transpose,
    pub diagonal: Diagonal,
}

impl TriangularMode {
    /// Build a mode from the `upper` and `transpose` flags.
    pub fn new(upper: bool, transpose: bool) -> Self {
        TriangularMode {
            triangle: if upper { Triangle::Upper } else { Triangle::Lower },
            transpose: if transpose {
                Transpose::Transpose
            } else {
                Transpose::No
            },
            diagonal: Diagonal::NonUnit,
        }
    }

    pub fn upper() -> Self {
        Self::new(true, false)
    }

    pub fn lower() -> Self {
        Self::new(false, false)
    }

    pub fn transposed(self) -> Self {
        TriangularMode {
            transpose: Transpose::Transpose,
            ..self
        }
    }

    pub fn conjugate_transposed(self) -> Self {
        TriangularMode {
            transpose: Transpose::ConjugateTranspose,
            ..self
        }
    }

    pub fn unit_diagonal(self) -> Self {
        TriangularMode {
            diagonal: Diagonal::Unit,
            ..self
        }
    }

    /// Whether `op(A)` is lower triangular, i.e. the system is solved by forward substitution.
    pub fn is_forward(&self) -> bool {
        match self.transpose {
            Transpose::No => self.triangle == Triangle::Lower,
            Transpose::Transpose | Transpose::ConjugateTranspose => {
                self.triangle == Triangle::Upper
            }
        }
    }
}
