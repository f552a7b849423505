//! Recombination operators
//!
//! Arithmetic crossover on dna vectors and a matrix adapter around any
//! vector recombination.

use nalgebra::DMatrix;
use rand::Rng;

use crate::error::OperatorError;
use crate::operators::traits::RecombinationOperator;

/// Arithmetic crossover with a random crossover point
///
/// A crossover point `c` is drawn uniformly from `[0, min(len1, len2))`. The
/// head `[0, c)` of each parent is copied to its own child; every paired
/// tail element becomes `alpha * other + (1 - alpha) * own`.
///
/// With `allow_uneven`, parents of different lengths are accepted and the
/// unpaired suffix of the longer parent is appended unblended to its own
/// child, so each child keeps its parent's length.
#[derive(Clone, Debug)]
pub struct SimpleArithmetic {
    alpha: f64,
    allow_uneven: bool,
}

impl SimpleArithmetic {
    /// Create an arithmetic crossover with blend weight `alpha`
    ///
    /// Weights outside `[0, 1]` extrapolate past the parents; only
    /// non-finite weights are rejected.
    pub fn new(alpha: f64) -> Result<Self, OperatorError> {
        if !alpha.is_finite() {
            return Err(OperatorError::InvalidConfiguration(format!(
                "alpha must be finite, got {}",
                alpha
            )));
        }
        Ok(Self {
            alpha,
            allow_uneven: false,
        })
    }

    /// Accept parents of different lengths
    pub fn allow_uneven(mut self, allow: bool) -> Self {
        self.allow_uneven = allow;
        self
    }

    /// Blend weight
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Recombine at a fixed crossover point
    pub fn recombine_at(
        &self,
        dna1: &[f64],
        dna2: &[f64],
        crossover_point: usize,
    ) -> Result<(Vec<f64>, Vec<f64>), OperatorError> {
        self.check_lengths(dna1, dna2)?;
        let paired = dna1.len().min(dna2.len());
        if crossover_point >= paired {
            return Err(OperatorError::RecombinationFailed(format!(
                "crossover point {} out of range for {} paired genes",
                crossover_point, paired
            )));
        }

        let child1 = self.child(dna1, dna2, crossover_point, paired);
        let child2 = self.child(dna2, dna1, crossover_point, paired);
        Ok((child1, child2))
    }

    fn check_lengths(&self, dna1: &[f64], dna2: &[f64]) -> Result<(), OperatorError> {
        if !self.allow_uneven && dna1.len() != dna2.len() {
            return Err(OperatorError::RecombinationFailed(format!(
                "parent lengths differ ({} vs {}) and uneven recombination is disabled",
                dna1.len(),
                dna2.len()
            )));
        }
        if dna1.is_empty() || dna2.is_empty() {
            return Err(OperatorError::RecombinationFailed(
                "cannot recombine an empty parent".to_string(),
            ));
        }
        Ok(())
    }

    fn child(&self, own: &[f64], other: &[f64], crossover_point: usize, paired: usize) -> Vec<f64> {
        let mut child = Vec::with_capacity(own.len());
        child.extend_from_slice(&own[..crossover_point]);
        child.extend(
            (crossover_point..paired).map(|i| self.alpha * other[i] + (1.0 - self.alpha) * own[i]),
        );
        child.extend_from_slice(&own[paired..]);
        child
    }
}

impl RecombinationOperator for SimpleArithmetic {
    fn recombine<R: Rng>(
        &self,
        dna1: &[f64],
        dna2: &[f64],
        rng: &mut R,
    ) -> Result<(Vec<f64>, Vec<f64>), OperatorError> {
        self.check_lengths(dna1, dna2)?;
        let crossover_point = rng.gen_range(0..dna1.len().min(dna2.len()));
        self.recombine_at(dna1, dna2, crossover_point)
    }
}

/// Lifts a vector recombination to matrices of a fixed shape
///
/// Parents are flattened row-major, recombined by the inner operator and
/// reshaped back to `shape`.
#[derive(Clone, Debug)]
pub struct MatrixRecombination<C> {
    shape: (usize, usize),
    inner: C,
}

impl<C: RecombinationOperator> MatrixRecombination<C> {
    /// Create a matrix recombination for `(rows, cols)` matrices
    pub fn new(shape: (usize, usize), inner: C) -> Result<Self, OperatorError> {
        if shape.0 == 0 || shape.1 == 0 {
            return Err(OperatorError::InvalidConfiguration(format!(
                "matrix shape must be non-empty, got {:?}",
                shape
            )));
        }
        Ok(Self { shape, inner })
    }

    /// Expected `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    /// Recombine two matrices of the configured shape
    pub fn recombine_matrices<R: Rng>(
        &self,
        parent1: &DMatrix<f64>,
        parent2: &DMatrix<f64>,
        rng: &mut R,
    ) -> Result<(DMatrix<f64>, DMatrix<f64>), OperatorError> {
        for parent in [parent1, parent2] {
            if parent.shape() != self.shape {
                return Err(OperatorError::RecombinationFailed(format!(
                    "expected a {:?} matrix, got {:?}",
                    self.shape,
                    parent.shape()
                )));
            }
        }

        let (child1, child2) =
            self.inner
                .recombine(&flatten(parent1), &flatten(parent2), rng)?;
        Ok((self.reshape(&child1)?, self.reshape(&child2)?))
    }

    fn reshape(&self, values: &[f64]) -> Result<DMatrix<f64>, OperatorError> {
        let (rows, cols) = self.shape;
        if values.len() != rows * cols {
            return Err(OperatorError::RecombinationFailed(format!(
                "cannot reshape {} values into {:?}",
                values.len(),
                self.shape
            )));
        }
        Ok(DMatrix::from_row_slice(rows, cols, values))
    }
}

fn flatten(matrix: &DMatrix<f64>) -> Vec<f64> {
    matrix.transpose().iter().copied().collect()
}

/// Treats each dna vector as a row-major matrix of the configured shape
impl<C: RecombinationOperator> RecombinationOperator for MatrixRecombination<C> {
    fn recombine<R: Rng>(
        &self,
        dna1: &[f64],
        dna2: &[f64],
        rng: &mut R,
    ) -> Result<(Vec<f64>, Vec<f64>), OperatorError> {
        let parent1 = self.reshape(dna1)?;
        let parent2 = self.reshape(dna2)?;
        let (child1, child2) = self.recombine_matrices(&parent1, &parent2, rng)?;
        Ok((flatten(&child1), flatten(&child2)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_simple_arithmetic_at_point() {
        let recombination = SimpleArithmetic::new(0.5).unwrap();
        let (child1, child2) = recombination
            .recombine_at(&[1.0, 2.0, 3.0, 4.0], &[5.0, 6.0, 7.0, 8.0], 2)
            .unwrap();
        assert_eq!(child1, vec![1.0, 2.0, 5.0, 6.0]);
        assert_eq!(child2, vec![5.0, 6.0, 5.0, 6.0]);
    }

    #[test]
    fn test_simple_arithmetic_alpha_zero_is_identity() {
        let mut rng = rand::thread_rng();
        let recombination = SimpleArithmetic::new(0.0).unwrap();
        let a = [0.1, -2.0, 3.3, 4.0];
        let b = [5.0, 0.7, -1.2, 9.9];

        for _ in 0..20 {
            let (child1, child2) = recombination.recombine(&a, &b, &mut rng).unwrap();
            assert_eq!(child1, a.to_vec());
            assert_eq!(child2, b.to_vec());
        }
    }

    #[test]
    fn test_simple_arithmetic_alpha_one_swaps_tails() {
        let recombination = SimpleArithmetic::new(1.0).unwrap();
        let a = [1.0, 2.0, 3.0];
        let b = [4.0, 5.0, 6.0];

        let (child1, child2) = recombination.recombine_at(&a, &b, 1).unwrap();
        assert_eq!(child1, vec![1.0, 5.0, 6.0]);
        assert_eq!(child2, vec![4.0, 2.0, 3.0]);
    }

    #[test]
    fn test_simple_arithmetic_conserves_mass() {
        let mut rng = rand::thread_rng();
        let recombination = SimpleArithmetic::new(0.3).unwrap();
        let a = [0.5, 1.5, -2.0, 8.0];
        let b = [3.0, -1.0, 4.0, 0.25];

        let (child1, child2) = recombination.recombine(&a, &b, &mut rng).unwrap();
        for i in 0..a.len() {
            assert_relative_eq!(child1[i] + child2[i], a[i] + b[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_simple_arithmetic_rejects_uneven_parents() {
        let mut rng = rand::thread_rng();
        let recombination = SimpleArithmetic::new(0.5).unwrap();
        assert!(recombination
            .recombine(&[1.0, 2.0], &[1.0, 2.0, 3.0], &mut rng)
            .is_err());
    }

    #[test]
    fn test_simple_arithmetic_uneven_first_longer() {
        let recombination = SimpleArithmetic::new(0.5).unwrap().allow_uneven(true);
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [5.0, 6.0];

        let (child1, child2) = recombination.recombine_at(&a, &b, 0).unwrap();
        assert_eq!(child1, vec![3.0, 4.0, 3.0, 4.0, 5.0]);
        assert_eq!(child2, vec![3.0, 4.0]);
        assert_relative_eq!(
            child1.iter().sum::<f64>() + child2.iter().sum::<f64>(),
            a.iter().sum::<f64>() + b.iter().sum::<f64>()
        );
    }

    #[test]
    fn test_simple_arithmetic_uneven_second_longer() {
        let mut rng = rand::thread_rng();
        let recombination = SimpleArithmetic::new(0.5).unwrap().allow_uneven(true);
        let a = [1.0, 2.0];
        let b = [5.0, 6.0, 7.0, 8.0];

        for _ in 0..20 {
            let (child1, child2) = recombination.recombine(&a, &b, &mut rng).unwrap();
            assert_eq!(child1.len(), 2);
            assert_eq!(child2.len(), 4);
            assert_eq!(&child2[2..], &[7.0, 8.0]);
            assert_relative_eq!(
                child1.iter().sum::<f64>() + child2.iter().sum::<f64>(),
                a.iter().sum::<f64>() + b.iter().sum::<f64>(),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_simple_arithmetic_rejects_non_finite_alpha() {
        assert!(SimpleArithmetic::new(f64::NAN).is_err());
        assert!(SimpleArithmetic::new(f64::INFINITY).is_err());
        assert!(SimpleArithmetic::new(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_simple_arithmetic_extrapolating_alpha() {
        let a = [1.0, 2.0, 3.0];
        let b = [5.0, 6.0, 7.0];

        let (child1, child2) = SimpleArithmetic::new(1.5)
            .unwrap()
            .recombine_at(&a, &b, 1)
            .unwrap();
        assert_eq!(child1, vec![1.0, 8.0, 9.0]);
        assert_eq!(child2, vec![5.0, 0.0, 1.0]);

        let mut rng = rand::thread_rng();
        for alpha in [-0.5, 1.5, 3.0] {
            let recombination = SimpleArithmetic::new(alpha).unwrap();
            let (child1, child2) = recombination.recombine(&a, &b, &mut rng).unwrap();
            for i in 0..a.len() {
                assert_relative_eq!(child1[i] + child2[i], a[i] + b[i], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_matrix_recombination_preserves_shape() {
        let mut rng = rand::thread_rng();
        let recombination =
            MatrixRecombination::new((2, 3), SimpleArithmetic::new(0.5).unwrap()).unwrap();
        let m1 = DMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let m2 = DMatrix::from_row_slice(2, 3, &[6.0, 5.0, 4.0, 3.0, 2.0, 1.0]);

        let (c1, c2) = recombination.recombine_matrices(&m1, &m2, &mut rng).unwrap();
        assert_eq!(c1.shape(), (2, 3));
        assert_eq!(c2.shape(), (2, 3));
        assert_relative_eq!((&c1 + &c2).sum(), (&m1 + &m2).sum(), epsilon = 1e-12);
    }

    #[test]
    fn test_matrix_recombination_flattens_row_major() {
        let mut rng = rand::thread_rng();
        let recombination =
            MatrixRecombination::new((2, 2), SimpleArithmetic::new(0.0).unwrap()).unwrap();
        let m1 = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let m2 = DMatrix::from_row_slice(2, 2, &[5.0, 6.0, 7.0, 8.0]);

        let (c1, c2) = recombination.recombine_matrices(&m1, &m2, &mut rng).unwrap();
        assert_eq!(c1, m1);
        assert_eq!(c2, m2);

        let (v1, _) = recombination
            .recombine(&[1.0, 2.0, 3.0, 4.0], &[5.0, 6.0, 7.0, 8.0], &mut rng)
            .unwrap();
        assert_eq!(v1, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_matrix_recombination_rejects_wrong_shape() {
        let mut rng = rand::thread_rng();
        let recombination =
            MatrixRecombination::new((2, 2), SimpleArithmetic::new(0.5).unwrap()).unwrap();
        let m1 = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let m2 = DMatrix::from_row_slice(1, 4, &[1.0, 2.0, 3.0, 4.0]);

        assert!(recombination
            .recombine_matrices(&m1, &m2, &mut rng)
            .is_err());
        assert!(recombination
            .recombine(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0], &mut rng)
            .is_err());
    }
}
