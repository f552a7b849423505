//! Operator traits
//!
//! This module defines the five operator families the evolutionary loop is
//! parameterized by.

use rand::Rng;
use uuid::Uuid;

use crate::error::OperatorError;
use crate::fitness::traits::Fitness;
use crate::genome::genotype::Genotype;
use crate::population::individual::Individual;
use crate::population::population::Population;

/// Mutation operator trait
///
/// Produces a new genotype from an existing one. The dimension is preserved
/// unless the operator's genome extension fires.
pub trait MutationOperator: Send + Sync {
    /// Mutate a genotype, returning the mutated copy
    fn mutate<R: Rng>(&self, genotype: &Genotype, rng: &mut R) -> Result<Genotype, OperatorError>;
}

/// Recombination operator trait
///
/// Combines two parent dna vectors into two children.
pub trait RecombinationOperator: Send + Sync {
    /// Recombine two parents
    fn recombine<R: Rng>(
        &self,
        dna1: &[f64],
        dna2: &[f64],
        rng: &mut R,
    ) -> Result<(Vec<f64>, Vec<f64>), OperatorError>;
}

/// Parent-selection distribution trait
///
/// Maps every individual of a population to a selection probability. The
/// probabilities sum to 1.
pub trait DistributionOperator: Send + Sync {
    /// Compute `(id, probability)` pairs in population iteration order
    fn get(&self, population: &Population) -> Result<Vec<(Uuid, f64)>, OperatorError>;
}

/// Selection operator trait
///
/// Samples a mating pool from parallel id/probability lists.
pub trait SelectionOperator: Send + Sync {
    /// Desired number of children per generation
    fn offspring_size(&self) -> usize;

    /// Size of the mating pool returned by [`select`](Self::select)
    fn parents_to_select(&self) -> usize;

    /// Select `parents_to_select` ids (with repetition)
    fn select<T: Clone, R: Rng>(
        &self,
        ids: &[T],
        probabilities: &[f64],
        rng: &mut R,
    ) -> Result<Vec<T>, OperatorError>;
}

/// Replacement operator trait
///
/// Admits offspring into the population, evicting incumbents.
pub trait ReplacementOperator: Send + Sync {
    /// Number of offspring admitted per generation
    fn offspring_size(&self) -> usize;

    /// Replace incumbents with offspring, scoring each admitted child
    fn replace<F, R>(
        &self,
        offspring: &[Individual],
        population: &mut Population,
        fitness: &F,
        rng: &mut R,
    ) -> Result<(), OperatorError>
    where
        F: Fitness + ?Sized,
        R: Rng;
}
