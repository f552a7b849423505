//! Mutation operators
//!
//! This module provides the real-valued mutation operators. Each one can
//! optionally grow the genotype by one gene after mutating it.

use rand::Rng;
use rand_distr::{Distribution, Normal, StandardNormal, Uniform as UniformDistribution};

use crate::error::OperatorError;
use crate::genome::genotype::Genotype;
use crate::operators::traits::MutationOperator;

/// Optional genome growth shared by every mutation operator
///
/// With probability `extend_probability` one gene (drawn from the operator's
/// own distribution) and one `Normal(0, 1)` mask entry are appended after the
/// main mutation. The draw is independent of the mutation itself.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GenomeExtension {
    extend_probability: f64,
}

impl GenomeExtension {
    /// Create an extension policy firing with the given probability
    pub fn new(extend_probability: f64) -> Result<Self, OperatorError> {
        if !(0.0..=1.0).contains(&extend_probability) {
            return Err(OperatorError::InvalidConfiguration(format!(
                "extend probability must be in [0, 1], got {}",
                extend_probability
            )));
        }
        Ok(Self { extend_probability })
    }

    /// Probability of appending a gene
    pub fn probability(&self) -> f64 {
        self.extend_probability
    }

    /// Possibly append one gene to an already mutated genotype
    pub fn apply<R, S>(&self, genotype: Genotype, rng: &mut R, sample_gene: S) -> Genotype
    where
        R: Rng,
        S: FnOnce(&mut R) -> f64,
    {
        if self.extend_probability <= 0.0 || !rng.gen_bool(self.extend_probability) {
            return genotype;
        }
        let gene = sample_gene(rng);
        let mask_entry: f64 = rng.sample(StandardNormal);
        genotype.extended(gene, mask_entry)
    }
}

fn rebuild(dna: Vec<f64>, mask: Vec<f64>) -> Result<Genotype, OperatorError> {
    Genotype::new(dna, mask).map_err(|e| OperatorError::MutationFailed(e.to_string()))
}

/// Uniform single-gene mutation
///
/// Replaces one randomly chosen gene with a value drawn uniformly from
/// `[low, high]`. The mask is left untouched.
#[derive(Clone, Debug)]
pub struct Uniform {
    low: f64,
    high: f64,
    distribution: UniformDistribution<f64>,
    extension: GenomeExtension,
}

impl Uniform {
    /// Create a uniform mutation over `[low, high]`
    pub fn new(low: f64, high: f64) -> Result<Self, OperatorError> {
        if !(low.is_finite() && high.is_finite() && low <= high) {
            return Err(OperatorError::InvalidConfiguration(format!(
                "invalid uniform bounds [{}, {}]",
                low, high
            )));
        }
        Ok(Self {
            low,
            high,
            distribution: UniformDistribution::new_inclusive(low, high),
            extension: GenomeExtension::default(),
        })
    }

    /// Set the genome extension probability
    pub fn with_extend_probability(mut self, probability: f64) -> Result<Self, OperatorError> {
        self.extension = GenomeExtension::new(probability)?;
        Ok(self)
    }

    /// Bounds of the replacement value
    pub fn bounds(&self) -> (f64, f64) {
        (self.low, self.high)
    }
}

impl MutationOperator for Uniform {
    fn mutate<R: Rng>(&self, genotype: &Genotype, rng: &mut R) -> Result<Genotype, OperatorError> {
        if genotype.dimension() == 0 {
            return Err(OperatorError::MutationFailed(
                "cannot mutate an empty genotype".to_string(),
            ));
        }

        let mut dna = genotype.to_dna();
        let index = rng.gen_range(0..dna.len());
        dna[index] = self.distribution.sample(rng);

        let mutated = rebuild(dna, genotype.to_mask())?;
        Ok(self
            .extension
            .apply(mutated, rng, |rng| self.distribution.sample(rng)))
    }
}

/// Fixed-variance Gaussian mutation
///
/// Adds independent `Normal(0, sigma)` noise to every gene.
#[derive(Clone, Debug)]
pub struct FixedVariance {
    sigma: f64,
    normal: Normal<f64>,
    extension: GenomeExtension,
}

impl FixedVariance {
    /// Create a Gaussian mutation with standard deviation `sigma`
    pub fn new(sigma: f64) -> Result<Self, OperatorError> {
        if !(sigma.is_finite() && sigma >= 0.0) {
            return Err(OperatorError::InvalidConfiguration(format!(
                "sigma must be finite and non-negative, got {}",
                sigma
            )));
        }
        let normal = Normal::new(0.0, sigma)
            .map_err(|e| OperatorError::InvalidConfiguration(e.to_string()))?;
        Ok(Self {
            sigma,
            normal,
            extension: GenomeExtension::default(),
        })
    }

    /// Set the genome extension probability
    pub fn with_extend_probability(mut self, probability: f64) -> Result<Self, OperatorError> {
        self.extension = GenomeExtension::new(probability)?;
        Ok(self)
    }

    /// Standard deviation of the noise
    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl MutationOperator for FixedVariance {
    fn mutate<R: Rng>(&self, genotype: &Genotype, rng: &mut R) -> Result<Genotype, OperatorError> {
        let dna = genotype
            .dna()
            .iter()
            .map(|gene| gene + self.normal.sample(rng))
            .collect();

        let mutated = rebuild(dna, genotype.to_mask())?;
        Ok(self
            .extension
            .apply(mutated, rng, |rng| self.normal.sample(rng)))
    }
}

/// Self-adaptive mutation with a single global step
///
/// The mask carries the per-gene step sizes. Each call scales the whole mask
/// by one shared factor `exp(Normal(0, tau))`, then perturbs gene `i` by
/// `mask[i] * Normal(0, 1)`.
#[derive(Clone, Debug)]
pub struct SelfAdaptiveSingleStep {
    tau: f64,
    learning_rate: Normal<f64>,
    extension: GenomeExtension,
}

impl SelfAdaptiveSingleStep {
    /// Create a self-adaptive mutation with learning rate `tau`
    pub fn new(tau: f64) -> Result<Self, OperatorError> {
        if !(tau.is_finite() && tau >= 0.0) {
            return Err(OperatorError::InvalidConfiguration(format!(
                "tau must be finite and non-negative, got {}",
                tau
            )));
        }
        let learning_rate = Normal::new(0.0, tau)
            .map_err(|e| OperatorError::InvalidConfiguration(e.to_string()))?;
        Ok(Self {
            tau,
            learning_rate,
            extension: GenomeExtension::default(),
        })
    }

    /// Set the genome extension probability
    pub fn with_extend_probability(mut self, probability: f64) -> Result<Self, OperatorError> {
        self.extension = GenomeExtension::new(probability)?;
        Ok(self)
    }

    /// Learning rate of the step-size update
    pub fn tau(&self) -> f64 {
        self.tau
    }
}

impl MutationOperator for SelfAdaptiveSingleStep {
    fn mutate<R: Rng>(&self, genotype: &Genotype, rng: &mut R) -> Result<Genotype, OperatorError> {
        let step = self.learning_rate.sample(rng).exp();
        let mask: Vec<f64> = genotype.mask().iter().map(|m| m * step).collect();

        let dna = genotype
            .dna()
            .iter()
            .zip(&mask)
            .map(|(gene, sigma)| {
                let noise: f64 = rng.sample(StandardNormal);
                gene + sigma * noise
            })
            .collect();

        let mutated = rebuild(dna, mask)?;
        Ok(self
            .extension
            .apply(mutated, rng, |rng| rng.sample(StandardNormal)))
    }
}
