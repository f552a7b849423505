//! Replacement operators

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::OperatorError;
use crate::fitness::traits::Fitness;
use crate::operators::traits::ReplacementOperator;
use crate::population::individual::Individual;
use crate::population::population::Population;

/// Replaces the worst individuals with randomly sampled offspring
///
/// The `quantity` worst incumbents are killed, where `quantity` is the whole
/// population when `offspring_size >= population.len()` and
/// `min(offspring_size, offspring.len())` otherwise. Up to `quantity` offspring
/// are then sampled without replacement, scored and admitted.
#[derive(Clone, Debug)]
pub struct ReplaceWorst {
    offspring_size: usize,
}

impl ReplaceWorst {
    /// Create a replacement admitting `offspring_size` children per generation
    pub fn new(offspring_size: usize) -> Self {
        Self { offspring_size }
    }

    fn quantity(&self, population_size: usize, available: usize) -> usize {
        if self.offspring_size >= population_size {
            population_size
        } else {
            self.offspring_size.min(available)
        }
    }
}

impl ReplacementOperator for ReplaceWorst {
    fn offspring_size(&self) -> usize {
        self.offspring_size
    }

    fn replace<F, R>(
        &self,
        offspring: &[Individual],
        population: &mut Population,
        fitness: &F,
        rng: &mut R,
    ) -> Result<(), OperatorError>
    where
        F: Fitness + ?Sized,
        R: Rng,
    {
        let quantity = self.quantity(population.len(), offspring.len());

        for (id, _) in population.rank_by_fitness(Some(quantity), false) {
            population.kill(&id);
        }

        let admitted = quantity.min(offspring.len());
        for child in offspring.choose_multiple(rng, admitted) {
            let score = fitness.fitness(child);
            population.add(child.clone(), score);
        }
        Ok(())
    }
}
