//! Kernel-based fitness functions

use crate::error::FitnessError;
use crate::fitness::traits::Fitness;
use crate::population::individual::Individual;

/// Minimization of an arbitrary kernel
///
/// Fitness is `-kernel(dna)`, so the fittest individual sits at the kernel's
/// global minimum. `value` evaluates the kernel directly.
pub struct GlobalMinimum<K>
where
    K: Fn(&[f64]) -> f64,
{
    kernel: K,
}

impl<K> GlobalMinimum<K>
where
    K: Fn(&[f64]) -> f64,
{
    /// Create a fitness minimizing `kernel`
    pub fn new(kernel: K) -> Self {
        Self { kernel }
    }
}

impl<K> Fitness for GlobalMinimum<K>
where
    K: Fn(&[f64]) -> f64,
{
    fn fitness(&self, individual: &Individual) -> f64 {
        -(self.kernel)(individual.genotype().dna())
    }

    fn value(&self, _individual: &Individual, x: &[f64]) -> Result<f64, FitnessError> {
        Ok((self.kernel)(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::individual::build_individual;

    #[test]
    fn test_global_minimum_value_mirrors_fitness() {
        let fitness = GlobalMinimum::new(|x: &[f64]| (x[0] - 10.0).powi(2));
        let individual = build_individual(vec![10.0], vec![], None).unwrap();

        assert_eq!(fitness.fitness(&individual), 0.0);
        assert_eq!(fitness.value(&individual, &[10.0]).unwrap(), 0.0);

        let away = build_individual(vec![7.0], vec![], None).unwrap();
        assert_eq!(fitness.fitness(&away), -9.0);
        assert_eq!(fitness.value(&away, &[7.0]).unwrap(), 9.0);
    }

    #[test]
    fn test_global_minimum_ranks_closer_points_higher() {
        let sphere = GlobalMinimum::new(|x: &[f64]| x.iter().map(|v| v * v).sum());
        let near = build_individual(vec![0.1, -0.1], vec![], None).unwrap();
        let far = build_individual(vec![2.0, 3.0], vec![], None).unwrap();
        assert!(sphere.fitness(&near) > sphere.fitness(&far));
    }
}
