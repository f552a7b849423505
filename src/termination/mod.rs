//! Termination criteria
//!
//! Training runs for a fixed generation budget and also stops early when the
//! population can no longer supply a mating pool.

use crate::population::population::Population;

/// Evolution state for termination checking
#[derive(Clone, Copy, Debug)]
pub struct EvolutionState<'a> {
    /// Generations completed by the population
    pub generation: usize,
    /// Reference to the current population
    pub population: &'a Population,
}

impl<'a> EvolutionState<'a> {
    /// Snapshot the state of a population
    pub fn of(population: &'a Population) -> Self {
        Self {
            generation: population.generation(),
            population,
        }
    }
}

/// Termination criterion trait
pub trait TerminationCriterion: Send + Sync {
    /// Check if evolution should terminate
    fn should_terminate(&self, state: &EvolutionState<'_>) -> bool;

    /// Get a description of why termination occurred
    fn reason(&self) -> &'static str;
}

/// Terminate after a maximum number of generations
#[derive(Clone, Debug)]
pub struct MaxGenerations(pub usize);

impl MaxGenerations {
    /// Create a new max generations criterion
    pub fn new(max: usize) -> Self {
        Self(max)
    }
}

impl TerminationCriterion for MaxGenerations {
    fn should_terminate(&self, state: &EvolutionState<'_>) -> bool {
        state.generation >= self.0
    }

    fn reason(&self) -> &'static str {
        "Maximum generations reached"
    }
}

/// Terminate once the population is no larger than the offspring size
#[derive(Clone, Debug)]
pub struct PopulationExhausted(pub usize);

impl PopulationExhausted {
    /// Create a criterion for the given offspring size
    pub fn new(offspring_size: usize) -> Self {
        Self(offspring_size)
    }
}

impl TerminationCriterion for PopulationExhausted {
    fn should_terminate(&self, state: &EvolutionState<'_>) -> bool {
        state.population.len() <= self.0
    }

    fn reason(&self) -> &'static str {
        "Population too small to mate"
    }
}

/// Reason of the first criterion that fires, in order
pub fn first_satisfied(
    criteria: &[&dyn TerminationCriterion],
    state: &EvolutionState<'_>,
) -> Option<&'static str> {
    criteria
        .iter()
        .find(|c| c.should_terminate(state))
        .map(|c| c.reason())
}

pub mod prelude {
    pub use super::{
        first_satisfied, EvolutionState, MaxGenerations, PopulationExhausted,
        TerminationCriterion,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::traits::FnFitness;
    use crate::population::individual::{build_individual, Individual};

    fn create_test_population(size: usize) -> Population {
        Population::from_items(
            (0..size).map(|i| (build_individual(vec![i as f64], vec![], None).unwrap(), 1.0)),
        )
    }

    #[test]
    fn test_max_generations() {
        let mut pop = create_test_population(3);
        let criterion = MaxGenerations::new(2);
        assert!(!criterion.should_terminate(&EvolutionState::of(&pop)));

        let fitness = FnFitness::new(|_: &Individual| 1.0);
        pop.update(&fitness);
        assert!(!criterion.should_terminate(&EvolutionState::of(&pop)));
        pop.update(&fitness);
        assert!(criterion.should_terminate(&EvolutionState::of(&pop)));
    }

    #[test]
    fn test_population_exhausted() {
        let criterion = PopulationExhausted::new(2);
        let pop = create_test_population(3);
        assert!(!criterion.should_terminate(&EvolutionState::of(&pop)));

        let pop = create_test_population(2);
        assert!(criterion.should_terminate(&EvolutionState::of(&pop)));
    }

    #[test]
    fn test_first_satisfied() {
        let pop = create_test_population(1);
        let state = EvolutionState::of(&pop);
        let max = MaxGenerations::new(10);
        let exhausted = PopulationExhausted::new(2);

        let both: [&dyn TerminationCriterion; 2] = [&max, &exhausted];
        let only_max: [&dyn TerminationCriterion; 1] = [&max];

        assert_eq!(
            first_satisfied(&both, &state),
            Some("Population too small to mate")
        );
        assert_eq!(first_satisfied(&only_max, &state), None);

        let state = EvolutionState {
            generation: 10,
            population: &pop,
        };
        assert_eq!(
            first_satisfied(&both, &state),
            Some("Maximum generations reached")
        );
    }
}
