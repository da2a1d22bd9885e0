//! Shape classification of the coefficient matrix.

use crate::SystemShape;

/// Selects the solving strategy for an `nrows x ncols` coefficient matrix.
///
/// Total over all shapes, including empty ones: `0 x 0` is square, `m x 0` over-determined and
/// `0 x n` under-determined.
pub fn classify(nrows: usize, ncols: usize) -> SystemShape {
    use std::cmp::Ordering;

    match nrows.cmp(&ncols) {
        Ordering::Equal => SystemShape::Square,
        Ordering::Greater => SystemShape::OverDetermined,
        Ordering::Less => SystemShape::UnderDetermined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes() {
        assert_eq!(classify(3, 3), SystemShape::Square);
        assert_eq!(classify(5, 2), SystemShape::OverDetermined);
        assert_eq!(classify(2, 5), SystemShape::UnderDetermined);
    }

    #[test]
    fn empty_shapes() {
        assert_eq!(classify(0, 0), SystemShape::Square);
        assert_eq!(classify(4, 0), SystemShape::OverDetermined);
        assert_eq!(classify(0, 4), SystemShape::UnderDetermined);
    }
}
