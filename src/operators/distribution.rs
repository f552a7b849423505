//! Parent-selection distributions
//!
//! Each operator turns population fitness into selection probabilities.
//! Degenerate inputs (zero total fitness, all-equal fitness under windowing
//! or sigma scaling) yield non-finite probabilities, which selection rejects.

use uuid::Uuid;

use crate::error::OperatorError;
use crate::operators::traits::DistributionOperator;
use crate::population::population::Population;

fn scores(population: &Population) -> Result<(Vec<Uuid>, Vec<f64>), OperatorError> {
    if population.is_empty() {
        return Err(OperatorError::DistributionFailed(
            "cannot build a distribution over an empty population".to_string(),
        ));
    }
    Ok(population
        .iter()
        .map(|item| (item.id(), item.fitness))
        .unzip())
}

fn normalize(ids: Vec<Uuid>, weights: Vec<f64>) -> Vec<(Uuid, f64)> {
    let total: f64 = weights.iter().sum();
    ids.into_iter()
        .zip(weights)
        .map(|(id, w)| (id, w / total))
        .collect()
}

/// Fitness-proportionate selection
///
/// `p(i) = fitness(i) / total_fitness`. Fitness must be non-negative with a
/// positive total.
#[derive(Clone, Copy, Debug, Default)]
pub struct Fps;

impl DistributionOperator for Fps {
    fn get(&self, population: &Population) -> Result<Vec<(Uuid, f64)>, OperatorError> {
        let (ids, fitness) = scores(population)?;
        Ok(normalize(ids, fitness))
    }
}

/// Fitness-proportionate selection with windowing
///
/// The population minimum is subtracted first, so the worst individual gets
/// probability 0 and negative fitness is handled.
#[derive(Clone, Copy, Debug, Default)]
pub struct FpsWithWindowing;

impl DistributionOperator for FpsWithWindowing {
    fn get(&self, population: &Population) -> Result<Vec<(Uuid, f64)>, OperatorError> {
        let (ids, fitness) = scores(population)?;
        let min = fitness.iter().copied().fold(f64::INFINITY, f64::min);
        let windowed = fitness.into_iter().map(|f| f - min).collect();
        Ok(normalize(ids, windowed))
    }
}

/// Sigma scaling
///
/// `scaled(i) = max(fitness(i) - (mean - 2 * std), 0)`, normalized. The
/// standard deviation is the population one.
#[derive(Clone, Copy, Debug, Default)]
pub struct SigmaScaling;

impl DistributionOperator for SigmaScaling {
    fn get(&self, population: &Population) -> Result<Vec<(Uuid, f64)>, OperatorError> {
        let (ids, fitness) = scores(population)?;
        let n = fitness.len() as f64;
        let mean = fitness.iter().sum::<f64>() / n;
        let std = (fitness.iter().map(|f| (f - mean).powi(2)).sum::<f64>() / n).sqrt();

        let threshold = mean - 2.0 * std;
        let scaled = fitness
            .into_iter()
            .map(|f| (f - threshold).max(0.0))
            .collect();
        Ok(normalize(ids, scaled))
    }
}
