//! Diagnostics and statistics
//!
//! Per-generation records collected while training.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::population::population::Population;

/// Snapshot of one generation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// Generations completed when the snapshot was taken
    pub generation: usize,
    pub mean_fitness: f64,
    pub best_fitness: f64,
    /// Dna of every individual, empty unless genome recording is enabled
    pub genomes: Vec<Vec<f64>>,
}

impl GenerationRecord {
    /// Record the current state of a population
    pub fn from_population(population: &Population, record_genomes: bool) -> Self {
        let genomes = if record_genomes {
            population.genomes()
        } else {
            Vec::new()
        };
        Self {
            generation: population.generation(),
            mean_fitness: population.mean_fitness().unwrap_or(f64::NAN),
            best_fitness: population.max_fitness().unwrap_or(f64::NEG_INFINITY),
            genomes,
        }
    }
}

/// Outcome of a training run
///
/// Holds one [`GenerationRecord`] per completed generation, in order, plus
/// the wall-clock runtime and the reason training stopped.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TrainingStats {
    pub generations: Vec<GenerationRecord>,
    pub runtime_ms: f64,
    pub termination_reason: Option<String>,
}

impl TrainingStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the record of a completed generation
    pub fn record(&mut self, record: GenerationRecord) {
        self.generations.push(record);
    }

    /// Close the run with its stop reason and elapsed time
    pub fn finish(&mut self, reason: &str, elapsed: Duration) {
        self.termination_reason = Some(reason.to_owned());
        self.runtime_ms = elapsed.as_secs_f64() * 1e3;
    }

    pub fn num_generations(&self) -> usize {
        self.generations.len()
    }

    /// Record of the last completed generation
    pub fn last(&self) -> Option<&GenerationRecord> {
        self.generations.last()
    }

    /// Highest fitness seen in any generation
    pub fn peak_fitness(&self) -> Option<f64> {
        self.generations
            .iter()
            .map(|record| record.best_fitness)
            .reduce(f64::max)
    }

    pub fn best_fitness_history(&self) -> Vec<f64> {
        self.generations.iter().map(|r| r.best_fitness).collect()
    }

    pub fn mean_fitness_history(&self) -> Vec<f64> {
        self.generations.iter().map(|r| r.mean_fitness).collect()
    }

    /// Change in mean fitness from the first to the last recorded generation
    pub fn mean_fitness_gain(&self) -> Option<f64> {
        let first = self.generations.first()?;
        let last = self.generations.last()?;
        Some(last.mean_fitness - first.mean_fitness)
    }

    /// Genome matrix of the last generation, if genomes were recorded
    pub fn final_genomes(&self) -> Option<&[Vec<f64>]> {
        self.last()
            .map(|record| record.genomes.as_slice())
            .filter(|genomes| !genomes.is_empty())
    }

    /// Human readable report of the run
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TrainingStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Training finished after {} generation(s)", self.num_generations())?;
        if let Some(last) = self.last() {
            writeln!(f, "  best fitness:  {:.6}", last.best_fitness)?;
            writeln!(f, "  mean fitness:  {:.6}", last.mean_fitness)?;
        }
        if let Some(peak) = self.peak_fitness() {
            writeln!(f, "  peak fitness:  {:.6}", peak)?;
        }
        writeln!(f, "  runtime:       {:.2}ms", self.runtime_ms)?;
        write!(
            f,
            "  stopped:       {}",
            self.termination_reason.as_deref().unwrap_or("not finished")
        )
    }
}

pub mod prelude {
    pub use super::{GenerationRecord, TrainingStats};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::individual::build_individual;

    fn two_individuals() -> Population {
        Population::from_items(vec![
            (build_individual(vec![1.0, 2.0], vec![], None).unwrap(), 1.0),
            (build_individual(vec![3.0, 4.0], vec![], None).unwrap(), 3.0),
        ])
    }

    fn record(generation: usize, mean: f64, best: f64) -> GenerationRecord {
        GenerationRecord {
            generation,
            mean_fitness: mean,
            best_fitness: best,
            genomes: Vec::new(),
        }
    }

    #[test]
    fn test_generation_record_from_population() {
        let pop = two_individuals();
        let snapshot = GenerationRecord::from_population(&pop, true);

        assert_eq!(snapshot.generation, 0);
        assert_eq!(snapshot.mean_fitness, 2.0);
        assert_eq!(snapshot.best_fitness, 3.0);
        assert_eq!(snapshot.genomes.len(), 2);
        assert!(snapshot.genomes.contains(&vec![3.0, 4.0]));

        let snapshot = GenerationRecord::from_population(&pop, false);
        assert!(snapshot.genomes.is_empty());
    }

    #[test]
    fn test_generation_record_empty_population() {
        let snapshot = GenerationRecord::from_population(&Population::new(), true);
        assert!(snapshot.mean_fitness.is_nan());
        assert_eq!(snapshot.best_fitness, f64::NEG_INFINITY);
    }

    #[test]
    fn test_histories_and_peak() {
        let mut stats = TrainingStats::new();
        stats.record(record(1, 0.5, 1.0));
        stats.record(record(2, 0.7, 3.0));
        stats.record(record(3, 0.9, 2.0));

        assert_eq!(stats.num_generations(), 3);
        assert_eq!(stats.mean_fitness_history(), vec![0.5, 0.7, 0.9]);
        assert_eq!(stats.best_fitness_history(), vec![1.0, 3.0, 2.0]);
        assert_eq!(stats.peak_fitness(), Some(3.0));
        assert_eq!(stats.last().map(|r| r.best_fitness), Some(2.0));
        approx::assert_relative_eq!(stats.mean_fitness_gain().unwrap(), 0.4, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_stats() {
        let stats = TrainingStats::new();
        assert_eq!(stats.peak_fitness(), None);
        assert_eq!(stats.mean_fitness_gain(), None);
        assert!(stats.final_genomes().is_none());
        assert!(stats.summary().contains("not finished"));
    }

    #[test]
    fn test_final_genomes() {
        let mut stats = TrainingStats::new();
        stats.record(record(1, 0.5, 1.0));
        assert!(stats.final_genomes().is_none());

        let mut snapshot = record(2, 0.6, 1.2);
        snapshot.genomes = vec![vec![0.1, 0.2], vec![0.3]];
        stats.record(snapshot);
        assert_eq!(stats.final_genomes().map(|g| g.len()), Some(2));
    }

    #[test]
    fn test_summary_reports_stop_reason() {
        let mut stats = TrainingStats::new();
        stats.record(record(1, 0.5, 1.0));
        stats.finish("Maximum generations reached", Duration::from_millis(1500));

        let summary = stats.summary();
        assert!(summary.contains("after 1 generation(s)"));
        assert!(summary.contains("stopped:       Maximum generations reached"));
        assert!(summary.contains("1500.00ms"));
    }

    #[test]
    fn test_stats_serde_round_trip() {
        let mut stats = TrainingStats::new();
        stats.record(GenerationRecord {
            generation: 1,
            mean_fitness: 0.5,
            best_fitness: 1.0,
            genomes: vec![vec![0.25, 0.75]],
        });
        stats.finish("Maximum generations reached", Duration::ZERO);

        let json = serde_json::to_string(&stats).unwrap();
        let restored: TrainingStats = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.generations, stats.generations);
        assert_eq!(restored.termination_reason, stats.termination_reason);
    }
}
