//! Individual wrapper type
//!
//! This module provides the Individual type that gives a genotype an identity
//! and an age.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::time::{Duration, Instant};

use rand::Rng;
use uuid::Uuid;

use crate::error::{GenomeError, OperatorError};
use crate::genome::genotype::Genotype;
use crate::operators::traits::MutationOperator;

/// Mint a v4 uuid from the given generator
///
/// Ids created during evolution come from the caller's generator so a seeded
/// run produces the same ids every time.
pub fn random_id<R: Rng>(rng: &mut R) -> Uuid {
    uuid::Builder::from_random_bytes(rng.gen()).into_uuid()
}

/// An individual in the population
///
/// Equality and hashing only look at the id, never at the genotype.
#[derive(Clone, Debug)]
pub struct Individual {
    id: Uuid,
    born_at: Instant,
    genotype: Genotype,
}

impl Individual {
    /// Create an individual with a fresh random id
    pub fn new(genotype: Genotype) -> Self {
        Self::with_id(genotype, Uuid::new_v4())
    }

    /// Create an individual with a supplied id
    pub fn with_id(genotype: Genotype, id: Uuid) -> Self {
        Self {
            id,
            born_at: Instant::now(),
            genotype,
        }
    }

    /// Create an individual whose id is drawn from `rng`
    pub fn generate<R: Rng>(genotype: Genotype, rng: &mut R) -> Self {
        Self::with_id(genotype, random_id(rng))
    }

    /// Unique id
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Wall-clock time since creation
    pub fn age(&self) -> Duration {
        self.born_at.elapsed()
    }

    /// Number of genes
    pub fn dimension(&self) -> usize {
        self.genotype.dimension()
    }

    /// The genotype of this individual
    pub fn genotype(&self) -> &Genotype {
        &self.genotype
    }

    /// Take the genotype out of this individual
    pub fn into_genotype(self) -> Genotype {
        self.genotype
    }

    /// Produce a new individual (with a new id) wrapping the mutated genotype
    pub fn mutate<M, R>(&self, mutation: &M, rng: &mut R) -> Result<Individual, OperatorError>
    where
        M: MutationOperator,
        R: Rng,
    {
        let genotype = mutation.mutate(&self.genotype, rng)?;
        Ok(Individual::generate(genotype, rng))
    }
}

impl PartialEq for Individual {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Individual {}

impl Hash for Individual {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}],({})", self.id, self.genotype)
    }
}

/// Build an individual from raw dna and mask
///
/// An empty mask is accepted and stands for an all-zero mask.
pub fn build_individual(
    dna: Vec<f64>,
    mask: Vec<f64>,
    id: Option<Uuid>,
) -> Result<Individual, GenomeError> {
    let genotype = if mask.is_empty() {
        Genotype::from_dna(dna)
    } else {
        Genotype::new(dna, mask)?
    };
    Ok(match id {
        Some(id) => Individual::with_id(genotype, id),
        None => Individual::new(genotype),
    })
}
