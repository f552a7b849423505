//! Selection operators
//!
//! This module provides stochastic universal sampling over a precomputed
//! selection distribution.

use rand::Rng;

use crate::error::OperatorError;
use crate::operators::traits::SelectionOperator;

const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Number of parents whose ordered distinct pairs yield about `offspring_size`
/// children
///
/// Positive root of `k^2 - k - offspring_size / 2 = 0`, rounded to nearest.
pub fn parents_to_select(offspring_size: usize) -> usize {
    ((1.0 + (1.0 + 2.0 * offspring_size as f64).sqrt()) / 2.0).round() as usize
}

/// Cumulative probability up to and including `index`
pub fn cumulative_probability_distribution(index: usize, probabilities: &[f64]) -> f64 {
    probabilities.iter().take(index + 1).sum()
}

fn validate(ids_len: usize, probabilities: &[f64]) -> Result<(), OperatorError> {
    if ids_len != probabilities.len() {
        return Err(OperatorError::SelectionFailed(format!(
            "{} ids but {} probabilities",
            ids_len,
            probabilities.len()
        )));
    }
    if probabilities.is_empty() {
        return Err(OperatorError::SelectionFailed(
            "cannot select from an empty distribution".to_string(),
        ));
    }
    if let Some(p) = probabilities.iter().find(|p| !p.is_finite() || **p < 0.0) {
        return Err(OperatorError::SelectionFailed(format!(
            "invalid probability {}",
            p
        )));
    }
    let total: f64 = probabilities.iter().sum();
    if (total - 1.0).abs() > PROBABILITY_TOLERANCE {
        return Err(OperatorError::SelectionFailed(format!(
            "probabilities sum to {}, expected 1",
            total
        )));
    }
    Ok(())
}

/// Stochastic universal sampling
///
/// Places `parents_to_select` equally spaced pointers, starting at a single
/// random offset in `[0, 1 / parents_to_select)`, over the cumulative
/// distribution. Each pointer selects the id whose interval it falls into.
#[derive(Clone, Debug)]
pub struct StochasticUniversalSampling {
    offspring_size: usize,
    parents_to_select: usize,
}

impl StochasticUniversalSampling {
    /// Create a sampler targeting `offspring_size` children per generation
    pub fn new(offspring_size: usize) -> Result<Self, OperatorError> {
        if offspring_size == 0 {
            return Err(OperatorError::InvalidConfiguration(
                "offspring size must be positive".to_string(),
            ));
        }
        Ok(Self {
            offspring_size,
            parents_to_select: parents_to_select(offspring_size),
        })
    }
}

impl SelectionOperator for StochasticUniversalSampling {
    fn offspring_size(&self) -> usize {
        self.offspring_size
    }

    fn parents_to_select(&self) -> usize {
        self.parents_to_select
    }

    fn select<T: Clone, R: Rng>(
        &self,
        ids: &[T],
        probabilities: &[f64],
        rng: &mut R,
    ) -> Result<Vec<T>, OperatorError> {
        validate(ids.len(), probabilities)?;

        let step = 1.0 / self.parents_to_select as f64;
        let last = ids.len() - 1;
        let mut pointer = rng.gen_range(0.0..step);
        let mut index = 0;
        let mut cumulative = probabilities[0];
        let mut pool = Vec::with_capacity(self.parents_to_select);

        while pool.len() < self.parents_to_select {
            // pointers past the rounded total land on the last id
            if pointer <= cumulative || index == last {
                pool.push(ids[index].clone());
                pointer += step;
            } else {
                index += 1;
                cumulative += probabilities[index];
            }
        }
        Ok(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const PROBABILITIES: [f64; 5] = [0.15, 0.15, 0.25, 0.1, 0.35];
    const IDS: [&str; 5] = ["a", "b", "c", "d", "e"];

    #[test]
    fn test_parents_to_select() {
        assert_eq!(parents_to_select(4096), 46);
        assert_eq!(parents_to_select(2), 2);
        assert_eq!(parents_to_select(12), 3);
    }

    #[test]
    fn test_cumulative_probability_distribution() {
        let expected = [0.15, 0.3, 0.55, 0.65, 1.0];
        for (index, value) in expected.iter().enumerate() {
            assert_eq!(
                cumulative_probability_distribution(index, &PROBABILITIES),
                *value
            );
        }
    }

    #[test]
    fn test_sus_frequencies() {
        let mut rng = rand::thread_rng();
        let sus = StochasticUniversalSampling::new(4096).unwrap();
        assert_eq!(sus.parents_to_select(), 46);

        let pool = sus.select(&IDS, &PROBABILITIES, &mut rng).unwrap();
        assert_eq!(pool.len(), 46);

        for (id, p) in IDS.iter().zip(PROBABILITIES) {
            let count = pool.iter().filter(|x| *x == id).count();
            let frequency = count as f64 / pool.len() as f64;
            assert!(
                (frequency - p).abs() < 0.025,
                "id {} selected with frequency {}, expected {}",
                id,
                frequency,
                p
            );
        }
    }

    #[test]
    fn test_sus_is_reproducible() {
        let sus = StochasticUniversalSampling::new(100).unwrap();
        let a = sus
            .select(&IDS, &PROBABILITIES, &mut StdRng::seed_from_u64(1))
            .unwrap();
        let b = sus
            .select(&IDS, &PROBABILITIES, &mut StdRng::seed_from_u64(1))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sus_certain_outcome() {
        let mut rng = rand::thread_rng();
        let sus = StochasticUniversalSampling::new(2).unwrap();
        let pool = sus.select(&["x", "y"], &[0.0, 1.0], &mut rng).unwrap();
        assert_eq!(pool, vec!["y", "y"]);
    }

    #[test]
    fn test_sus_validation() {
        let mut rng = rand::thread_rng();
        let sus = StochasticUniversalSampling::new(2).unwrap();

        assert!(sus.select(&["a"], &[0.5, 0.5], &mut rng).is_err());
        assert!(sus.select::<&str, _>(&[], &[], &mut rng).is_err());
        assert!(sus.select(&["a", "b"], &[0.5, 0.2], &mut rng).is_err());
        assert!(sus.select(&["a", "b"], &[f64::NAN, 1.0], &mut rng).is_err());
        assert!(sus.select(&["a", "b"], &[-0.5, 1.5], &mut rng).is_err());
    }

    #[test]
    fn test_zero_offspring_size_is_rejected() {
        assert!(StochasticUniversalSampling::new(0).is_err());
    }

    #[test]
    fn test_pairing_children_approximate_offspring_size() {
        for offspring_size in [10usize, 100, 4096] {
            let k = parents_to_select(offspring_size) as f64;
            let children = 2.0 * k * (k - 1.0);
            assert_relative_eq!(children, offspring_size as f64, max_relative = 0.2);
        }
    }
}
