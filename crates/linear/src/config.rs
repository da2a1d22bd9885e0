use approx::AbsDiffEq;
use nalgebra::RealField;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Tuning knobs for [`DenseKernel`](crate::DenseKernel).
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct KernelConfig {
    /// Absolute threshold at or below which a diagonal entry of a triangular factor (the `U` of
    /// an LU factorization or the `R` of a QR factorization) counts as zero.
    ///
    /// When `None` (default), the threshold is `eps * max(m, n) * max|r_ii|`.
    pub rank_tolerance: Option<f64>,

    /// Number of iterative refinement sweeps performed by [`Speed::Robust`](crate::Speed::Robust)
    /// square solves (default: 2).
    pub refinement_steps: usize,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            rank_tolerance: None,
            refinement_steps: 2,
        }
    }
}

impl KernelConfig {
    /// Create config with a fixed rank tolerance.
    pub fn with_rank_tolerance(tol: f64) -> Self {
        Self {
            rank_tolerance: Some(tol),
            ..Default::default()
        }
    }

    /// Create config with the given number of refinement sweeps.
    pub fn with_refinement_steps(steps: usize) -> Self {
        Self {
            refinement_steps: steps,
            ..Default::default()
        }
    }

    /// Threshold for the diagonal of a triangular factor of an `m x n` matrix whose largest
    /// diagonal modulus is `max_diag`.
    pub(crate) fn rank_threshold<R: RealField>(&self, max_diag: R, shape: (usize, usize)) -> R {
        match self.rank_tolerance {
            Some(tol) => nalgebra::convert(tol),
            None => {
                let max_dim: R = nalgebra::convert(shape.0.max(shape.1) as f64);
                <R as AbsDiffEq>::default_epsilon() * max_dim * max_diag
            }
        }
    }
}
