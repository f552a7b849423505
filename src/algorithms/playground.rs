//! Generational evolutionary loop
//!
//! The playground owns a population and the five operators that drive it.
//! Each generation it computes a selection distribution, samples a mating
//! pool, mates every ordered pair of distinct pool entries, admits offspring
//! through the replacement operator and re-scores the survivors.

use std::time::Instant;

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::diagnostics::{GenerationRecord, TrainingStats};
use crate::error::{EvoResult, EvolutionError};
use crate::fitness::traits::Fitness;
use crate::genome::genotype::Genotype;
use crate::operators::traits::{
    DistributionOperator, MutationOperator, RecombinationOperator, ReplacementOperator,
    SelectionOperator,
};
use crate::population::individual::Individual;
use crate::population::population::{Item, Population};
use crate::termination::{
    first_satisfied, EvolutionState, MaxGenerations, PopulationExhausted, TerminationCriterion,
};

/// Configuration for the Playground
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlaygroundConfig {
    /// Store every individual's dna in each generation record
    pub record_genomes: bool,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            record_genomes: true,
        }
    }
}

/// Builder for Playground
pub struct PlaygroundBuilder<M, D, S, C, Rp, F> {
    config: PlaygroundConfig,
    population: Option<Population>,
    mutation: Option<M>,
    distribution: Option<D>,
    selection: Option<S>,
    recombination: Option<C>,
    replacement: Option<Rp>,
    fitness: Option<F>,
}

impl PlaygroundBuilder<(), (), (), (), (), ()> {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: PlaygroundConfig::default(),
            population: None,
            mutation: None,
            distribution: None,
            selection: None,
            recombination: None,
            replacement: None,
            fitness: None,
        }
    }
}

impl Default for PlaygroundBuilder<(), (), (), (), (), ()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M, D, S, C, Rp, F> PlaygroundBuilder<M, D, S, C, Rp, F> {
    /// Replace the whole configuration
    pub fn config(mut self, config: PlaygroundConfig) -> Self {
        self.config = config;
        self
    }

    /// Enable or disable genome snapshots in the training stats
    pub fn record_genomes(mut self, enabled: bool) -> Self {
        self.config.record_genomes = enabled;
        self
    }

    /// Set the initial population
    pub fn population(mut self, population: Population) -> Self {
        self.population = Some(population);
        self
    }

    /// Set the mutation operator
    pub fn mutation<NewM>(self, mutation: NewM) -> PlaygroundBuilder<NewM, D, S, C, Rp, F>
    where
        NewM: MutationOperator,
    {
        PlaygroundBuilder {
            config: self.config,
            population: self.population,
            mutation: Some(mutation),
            distribution: self.distribution,
            selection: self.selection,
            recombination: self.recombination,
            replacement: self.replacement,
            fitness: self.fitness,
        }
    }

    /// Set the parent-selection distribution
    pub fn distribution<NewD>(self, distribution: NewD) -> PlaygroundBuilder<M, NewD, S, C, Rp, F>
    where
        NewD: DistributionOperator,
    {
        PlaygroundBuilder {
            config: self.config,
            population: self.population,
            mutation: self.mutation,
            distribution: Some(distribution),
            selection: self.selection,
            recombination: self.recombination,
            replacement: self.replacement,
            fitness: self.fitness,
        }
    }

    /// Set the selection operator
    pub fn selection<NewS>(self, selection: NewS) -> PlaygroundBuilder<M, D, NewS, C, Rp, F>
    where
        NewS: SelectionOperator,
    {
        PlaygroundBuilder {
            config: self.config,
            population: self.population,
            mutation: self.mutation,
            distribution: self.distribution,
            selection: Some(selection),
            recombination: self.recombination,
            replacement: self.replacement,
            fitness: self.fitness,
        }
    }

    /// Set the recombination operator
    pub fn recombination<NewC>(self, recombination: NewC) -> PlaygroundBuilder<M, D, S, NewC, Rp, F>
    where
        NewC: RecombinationOperator,
    {
        PlaygroundBuilder {
            config: self.config,
            population: self.population,
            mutation: self.mutation,
            distribution: self.distribution,
            selection: self.selection,
            recombination: Some(recombination),
            replacement: self.replacement,
            fitness: self.fitness,
        }
    }

    /// Set the replacement operator
    pub fn replacement<NewRp>(self, replacement: NewRp) -> PlaygroundBuilder<M, D, S, C, NewRp, F>
    where
        NewRp: ReplacementOperator,
    {
        PlaygroundBuilder {
            config: self.config,
            population: self.population,
            mutation: self.mutation,
            distribution: self.distribution,
            selection: self.selection,
            recombination: self.recombination,
            replacement: Some(replacement),
            fitness: self.fitness,
        }
    }

    /// Set the fitness function
    pub fn fitness<NewF>(self, fitness: NewF) -> PlaygroundBuilder<M, D, S, C, Rp, NewF>
    where
        NewF: Fitness,
    {
        PlaygroundBuilder {
            config: self.config,
            population: self.population,
            mutation: self.mutation,
            distribution: self.distribution,
            selection: self.selection,
            recombination: self.recombination,
            replacement: self.replacement,
            fitness: Some(fitness),
        }
    }
}

impl<M, D, S, C, Rp, F> PlaygroundBuilder<M, D, S, C, Rp, F>
where
    M: MutationOperator,
    D: DistributionOperator,
    S: SelectionOperator,
    C: RecombinationOperator,
    Rp: ReplacementOperator,
    F: Fitness,
{
    /// Build the Playground instance
    #[allow(clippy::type_complexity)]
    pub fn build(self) -> Result<Playground<M, D, S, C, Rp, F>, EvolutionError> {
        let population = self.population.ok_or_else(|| {
            EvolutionError::Configuration("Population must be specified".to_string())
        })?;

        let mutation = self.mutation.ok_or_else(|| {
            EvolutionError::Configuration("Mutation operator must be specified".to_string())
        })?;

        let distribution = self.distribution.ok_or_else(|| {
            EvolutionError::Configuration("Distribution operator must be specified".to_string())
        })?;

        let selection = self.selection.ok_or_else(|| {
            EvolutionError::Configuration("Selection operator must be specified".to_string())
        })?;

        let recombination = self.recombination.ok_or_else(|| {
            EvolutionError::Configuration("Recombination operator must be specified".to_string())
        })?;

        let replacement = self.replacement.ok_or_else(|| {
            EvolutionError::Configuration("Replacement operator must be specified".to_string())
        })?;

        let fitness = self.fitness.ok_or_else(|| {
            EvolutionError::Configuration("Fitness function must be specified".to_string())
        })?;

        Ok(Playground {
            config: self.config,
            population,
            mutation,
            distribution,
            selection,
            recombination,
            replacement,
            fitness,
        })
    }
}

/// Evolutionary playground
///
/// Runs generations until the generation budget is spent or the population
/// is no larger than the selection's offspring size.
pub struct Playground<M, D, S, C, Rp, F> {
    config: PlaygroundConfig,
    population: Population,
    mutation: M,
    distribution: D,
    selection: S,
    recombination: C,
    replacement: Rp,
    fitness: F,
}

impl Playground<(), (), (), (), (), ()> {
    /// Create a builder for Playground
    pub fn builder() -> PlaygroundBuilder<(), (), (), (), (), ()> {
        PlaygroundBuilder::new()
    }
}

impl<M, D, S, C, Rp, F> Playground<M, D, S, C, Rp, F>
where
    M: MutationOperator,
    D: DistributionOperator,
    S: SelectionOperator,
    C: RecombinationOperator,
    Rp: ReplacementOperator,
    F: Fitness,
{
    /// The evolving population
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// The fitness function
    pub fn fitness(&self) -> &F {
        &self.fitness
    }

    /// Run until the population has completed `max_generations` generations
    pub fn train<R: Rng>(&mut self, max_generations: usize, rng: &mut R) -> EvoResult<TrainingStats> {
        let start_time = Instant::now();
        let mut stats = TrainingStats::new();

        let budget = MaxGenerations::new(max_generations);
        let exhausted = PopulationExhausted::new(self.selection.offspring_size());
        let criteria: [&dyn TerminationCriterion; 2] = [&budget, &exhausted];

        tracing::info!(
            max_generations,
            population_size = self.population.len(),
            offspring_size = self.selection.offspring_size(),
            parents_to_select = self.selection.parents_to_select(),
            "training started"
        );

        let reason = loop {
            let state = EvolutionState::of(&self.population);
            if let Some(reason) = first_satisfied(&criteria, &state) {
                if reason == exhausted.reason() {
                    tracing::warn!(
                        generation = state.generation,
                        population_size = self.population.len(),
                        offspring_size = self.selection.offspring_size(),
                        "population too small to mate, stopping"
                    );
                }
                break reason;
            }

            let (ids, probabilities): (Vec<Uuid>, Vec<f64>) =
                self.distribution.get(&self.population)?.into_iter().unzip();
            let mating_pool = self.selection.select(&ids, &probabilities, rng)?;

            let offspring = self.mate(&mating_pool, rng)?;
            self.replacement
                .replace(&offspring, &mut self.population, &self.fitness, rng)?;
            self.population.update(&self.fitness);

            let record =
                GenerationRecord::from_population(&self.population, self.config.record_genomes);
            tracing::debug!(
                generation = record.generation,
                population_size = self.population.len(),
                mating_pool = mating_pool.len(),
                offspring = offspring.len(),
                mean_fitness = record.mean_fitness,
                best_fitness = record.best_fitness,
                "generation complete"
            );
            stats.record(record);
        };

        stats.finish(reason, start_time.elapsed());
        tracing::info!(
            generations = stats.num_generations(),
            peak_fitness = stats.peak_fitness().unwrap_or(f64::NEG_INFINITY),
            runtime_ms = stats.runtime_ms,
            reason,
            "training finished"
        );
        Ok(stats)
    }

    /// Produce offspring from every ordered pair of distinct pool positions
    ///
    /// Both parents are mutated independently, their mutated dna recombined,
    /// and each child keeps the mask of the mutated parent in its position.
    pub fn mate<R: Rng>(&self, mating_pool: &[Uuid], rng: &mut R) -> EvoResult<Vec<Individual>> {
        let parents: Vec<Item> = mating_pool
            .iter()
            .map(|id| self.population.get(id))
            .collect::<Result<_, _>>()?;

        let pairs = parents.len() * parents.len().saturating_sub(1);
        let mut offspring = Vec::with_capacity(2 * pairs);

        for (i, first) in parents.iter().enumerate() {
            for (j, second) in parents.iter().enumerate() {
                if i == j {
                    continue;
                }

                let mutated1 = self.mutation.mutate(first.individual.genotype(), rng)?;
                let mutated2 = self.mutation.mutate(second.individual.genotype(), rng)?;
                let (dna1, dna2) =
                    self.recombination
                        .recombine(mutated1.dna(), mutated2.dna(), rng)?;

                let child1 = Genotype::new(dna1, mutated1.into_parts().1)?;
                let child2 = Genotype::new(dna2, mutated2.into_parts().1)?;
                offspring.push(Individual::generate(child1, rng));
                offspring.push(Individual::generate(child2, rng));
            }
        }
        Ok(offspring)
    }

    /// Evaluate the model of the individual ranked `depth` (0 = best) at `x`
    pub fn predict(&self, x: &[f64], depth: usize) -> EvoResult<f64> {
        let item = self.population.nth_best(depth)?;
        Ok(self.fitness.value(&item.individual, x)?)
    }
}
