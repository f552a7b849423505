//! Population type
//!
//! This module provides the Population container: an id-keyed store of
//! (individual, fitness) records plus a generation counter.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EvoResult, EvolutionError, GenomeError, PopulationError};
use crate::fitness::traits::Fitness;
use crate::genome::dna_builder::{DnaBuilder, UniformRandomDnaBuilder};
use crate::genome::genotype::Genotype;
use crate::population::individual::Individual;

/// Read-only pairing of an individual with its fitness
#[derive(Clone, Debug)]
pub struct Item {
    /// The individual
    pub individual: Individual,
    /// Fitness as of the last evaluation
    pub fitness: f64,
}

impl Item {
    /// Create a new item
    pub fn new(individual: Individual, fitness: f64) -> Self {
        Self {
            individual,
            fitness,
        }
    }

    /// Id of the wrapped individual
    pub fn id(&self) -> Uuid {
        self.individual.id()
    }
}

/// Aggregate statistics over a population
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PopulationStats {
    /// Generations completed
    pub generation_count: usize,
    /// Number of individuals
    pub size: usize,
    /// Mean age in seconds
    pub mean_age: f64,
    /// Population standard deviation of age in seconds
    pub std_age: f64,
    /// Age of the oldest individual in seconds
    pub max_age: f64,
    /// Age of the youngest individual in seconds
    pub min_age: f64,
    /// Mean fitness
    pub mean_fitness: f64,
    /// Lowest fitness
    pub min_fitness: f64,
    /// Highest fitness
    pub max_fitness: f64,
    /// Population standard deviation of fitness
    pub std_fitness: f64,
}

/// A population of individuals
///
/// Records are kept in id order, so iteration is deterministic for a given
/// set of ids. Lookups hand out owned copies.
#[derive(Clone, Debug, Default)]
pub struct Population {
    pool: BTreeMap<Uuid, Item>,
    generation_count: usize,
}

impl Population {
    /// Create an empty population
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a population from (individual, fitness) pairs
    pub fn from_items<I>(items: I) -> Self
    where
        I: IntoIterator<Item = (Individual, f64)>,
    {
        let mut population = Self::new();
        for (individual, fitness) in items {
            population.add(individual, fitness);
        }
        population
    }

    /// Get the current generation
    pub fn generation(&self) -> usize {
        self.generation_count
    }

    /// Get the population size
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    /// Check if the population is empty
    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Whether an individual with this id is alive
    pub fn contains(&self, id: &Uuid) -> bool {
        self.pool.contains_key(id)
    }

    /// Add an individual with its fitness
    ///
    /// An individual with an id already present replaces the old record.
    pub fn add(&mut self, individual: Individual, fitness: f64) {
        self.pool
            .insert(individual.id(), Item::new(individual, fitness));
    }

    /// Get a copy of the record for `id`
    pub fn get(&self, id: &Uuid) -> Result<Item, PopulationError> {
        self.pool
            .get(id)
            .cloned()
            .ok_or(PopulationError::NotFound(*id))
    }

    /// Remove an individual; absent ids are ignored
    pub fn kill(&mut self, id: &Uuid) {
        self.pool.remove(id);
    }

    /// Re-evaluate every individual and advance the generation counter
    pub fn update<F>(&mut self, fitness: &F)
    where
        F: Fitness + ?Sized,
    {
        for item in self.pool.values_mut() {
            item.fitness = fitness.fitness(&item.individual);
        }
        self.generation_count += 1;
    }

    /// Iterate over the records in id order
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.pool.values()
    }

    /// Ids in iteration order
    pub fn ids(&self) -> Vec<Uuid> {
        self.pool.keys().copied().collect()
    }

    /// Fitness values in iteration order
    pub fn fitness_values(&self) -> Vec<f64> {
        self.pool.values().map(|item| item.fitness).collect()
    }

    /// Sum of all fitness values
    pub fn total_fitness(&self) -> f64 {
        self.pool.values().map(|item| item.fitness).sum()
    }

    /// Ids and fitness sorted by fitness, truncated to `k` entries
    ///
    /// `descending = true` puts the best individual first. Ties keep id order
    /// and NaN fitness ranks below every number.
    pub fn rank_by_fitness(&self, k: Option<usize>, descending: bool) -> Vec<(Uuid, f64)> {
        let mut ranked: Vec<(Uuid, f64)> = self
            .pool
            .values()
            .map(|item| (item.id(), item.fitness))
            .collect();

        ranked.sort_by(|a, b| {
            let ord = fitness_order(a.1, b.1);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        });

        if let Some(k) = k {
            ranked.truncate(k);
        }
        ranked
    }

    /// Record of the individual at rank `depth` (0 = best)
    pub fn nth_best(&self, depth: usize) -> Result<Item, PopulationError> {
        let ranked = self.rank_by_fitness(Some(depth + 1), true);
        match ranked.get(depth) {
            Some((id, _)) => self.get(id),
            None => Err(PopulationError::RankOutOfRange {
                depth,
                size: self.len(),
            }),
        }
    }

    /// Compute mean fitness
    pub fn mean_fitness(&self) -> Option<f64> {
        mean(&self.fitness_values())
    }

    /// Compute the population standard deviation of fitness
    pub fn std_fitness(&self) -> Option<f64> {
        std_dev(&self.fitness_values())
    }

    /// Lowest fitness
    pub fn min_fitness(&self) -> Option<f64> {
        self.pool.values().map(|item| item.fitness).reduce(f64::min)
    }

    /// Highest fitness
    pub fn max_fitness(&self) -> Option<f64> {
        self.pool.values().map(|item| item.fitness).reduce(f64::max)
    }

    fn ages(&self) -> Vec<f64> {
        self.pool
            .values()
            .map(|item| item.individual.age().as_secs_f64())
            .collect()
    }

    /// Mean age in seconds
    pub fn mean_age(&self) -> Option<f64> {
        mean(&self.ages())
    }

    /// Standard deviation of age in seconds
    pub fn std_age(&self) -> Option<f64> {
        std_dev(&self.ages())
    }

    /// Oldest age in seconds
    pub fn max_age(&self) -> Option<f64> {
        self.ages().into_iter().reduce(f64::max)
    }

    /// Youngest age in seconds
    pub fn min_age(&self) -> Option<f64> {
        self.ages().into_iter().reduce(f64::min)
    }

    /// Snapshot of every aggregate statistic
    pub fn stats(&self) -> EvoResult<PopulationStats> {
        if self.is_empty() {
            return Err(EvolutionError::EmptyPopulation);
        }

        let fitness = self.fitness_values();
        let ages = self.ages();

        Ok(PopulationStats {
            generation_count: self.generation_count,
            size: self.len(),
            mean_age: mean(&ages).unwrap_or(0.0),
            std_age: std_dev(&ages).unwrap_or(0.0),
            max_age: ages.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            min_age: ages.iter().copied().fold(f64::INFINITY, f64::min),
            mean_fitness: mean(&fitness).unwrap_or(0.0),
            min_fitness: fitness.iter().copied().fold(f64::INFINITY, f64::min),
            max_fitness: fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            std_fitness: std_dev(&fitness).unwrap_or(0.0),
        })
    }

    /// Dna of every individual in iteration order
    pub fn genomes(&self) -> Vec<Vec<f64>> {
        self.pool
            .values()
            .map(|item| item.individual.genotype().to_dna())
            .collect()
    }
}

fn fitness_order(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.total_cmp(&b),
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn std_dev(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// How the dimension of seeded individuals is chosen
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum DimensionPolicy {
    /// Every individual has this many genes
    Fixed(usize),
    /// Each individual draws its dimension uniformly from `[min, max)`
    Variable { min: usize, max: usize },
}

impl Default for DimensionPolicy {
    fn default() -> Self {
        Self::Variable { min: 1, max: 10 }
    }
}

/// Configuration for seeding a population
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Number of individuals
    pub size: usize,
    /// Dimension policy
    pub dimension: DimensionPolicy,
    /// Interval the dna values are drawn from
    pub interval: (f64, f64),
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            size: 100,
            dimension: DimensionPolicy::default(),
            interval: (-1.0, 1.0),
        }
    }
}

/// Builder seeding a population with random individuals
pub struct PopulationBuilder {
    config: PopulationConfig,
    dna_builder: Option<Box<dyn DnaBuilder>>,
}

impl PopulationBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: PopulationConfig::default(),
            dna_builder: None,
        }
    }

    /// Create a builder from an existing configuration
    pub fn from_config(config: PopulationConfig) -> Self {
        Self {
            config,
            dna_builder: None,
        }
    }

    /// Set the number of individuals
    pub fn size(mut self, size: usize) -> Self {
        self.config.size = size;
        self
    }

    /// Give every individual `dimension` genes
    pub fn fixed_dimension(mut self, dimension: usize) -> Self {
        self.config.dimension = DimensionPolicy::Fixed(dimension);
        self
    }

    /// Draw each individual's dimension from `[min, max)`
    pub fn variable_dimension(mut self, min: usize, max: usize) -> Self {
        self.config.dimension = DimensionPolicy::Variable { min, max };
        self
    }

    /// Set the interval dna values are drawn from
    pub fn interval(mut self, low: f64, high: f64) -> Self {
        self.config.interval = (low, high);
        self
    }

    /// Use a custom dna builder instead of the uniform interval
    pub fn dna_builder<B>(mut self, builder: B) -> Self
    where
        B: DnaBuilder + 'static,
    {
        self.dna_builder = Some(Box::new(builder));
        self
    }

    fn draw_dimension<R: Rng>(&self, rng: &mut R) -> Result<usize, GenomeError> {
        match self.config.dimension {
            DimensionPolicy::Fixed(0) => Err(GenomeError::InvalidDimension(0)),
            DimensionPolicy::Fixed(d) => Ok(d),
            DimensionPolicy::Variable { min, max } => {
                if min == 0 || min >= max {
                    return Err(GenomeError::InvalidStructure(format!(
                        "invalid dimension range [{}, {})",
                        min, max
                    )));
                }
                Ok(rng.gen_range(min..max))
            }
        }
    }

    /// Seed the population and evaluate every individual
    ///
    /// Each individual's mask is a single `Normal(0, 1)` draw repeated across
    /// all of its genes.
    pub fn build<F, R>(self, fitness: &F, rng: &mut R) -> EvoResult<Population>
    where
        F: Fitness + ?Sized,
        R: Rng,
    {
        let fallback;
        let dna_builder: &dyn DnaBuilder = match &self.dna_builder {
            Some(builder) => builder.as_ref(),
            None => {
                let (low, high) = self.config.interval;
                fallback = UniformRandomDnaBuilder::new(low, high)?;
                &fallback
            }
        };

        let mut population = Population::new();
        for _ in 0..self.config.size {
            let dimension = self.draw_dimension(rng)?;
            let step: f64 = rng.sample(StandardNormal);
            let dna = dna_builder.get(dimension, rng)?;
            let genotype = Genotype::new(dna, vec![step; dimension])?;
            let individual = Individual::generate(genotype, rng);
            let score = fitness.fitness(&individual);
            population.add(individual, score);
        }

        tracing::debug!(
            size = population.len(),
            distribution = dna_builder.distribution(),
            "seeded population"
        );
        Ok(population)
    }
}

impl Default for PopulationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Seed `size` individuals of a shared dimension with dna drawn from `interval`
pub fn build_fixed_dimension_population<F, R>(
    size: usize,
    dimension: usize,
    fitness: &F,
    interval: (f64, f64),
    rng: &mut R,
) -> EvoResult<Population>
where
    F: Fitness + ?Sized,
    R: Rng,
{
    PopulationBuilder::new()
        .size(size)
        .fixed_dimension(dimension)
        .interval(interval.0, interval.1)
        .build(fitness, rng)
}

/// Seed `size` individuals, each with a random dimension in `[1, 10)`
pub fn build_variable_dimension_population<F, R>(
    size: usize,
    fitness: &F,
    interval: (f64, f64),
    rng: &mut R,
) -> EvoResult<Population>
where
    F: Fitness + ?Sized,
    R: Rng,
{
    PopulationBuilder::new()
        .size(size)
        .variable_dimension(1, 10)
        .interval(interval.0, interval.1)
        .build(fitness, rng)
}
