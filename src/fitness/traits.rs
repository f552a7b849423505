//! Fitness traits
//!
//! This module defines the fitness evaluation contract used by the
//! evolutionary loop.

use crate::error::FitnessError;
use crate::genome::genotype::Genotype;
use crate::population::individual::Individual;

/// Fitness evaluation trait
///
/// `fitness` scores an individual (higher = better). Infeasible individuals
/// may score `f64::NEG_INFINITY`. `value` evaluates the model an individual
/// encodes at a query point.
pub trait Fitness {
    /// Score an individual
    fn fitness(&self, individual: &Individual) -> f64;

    /// Evaluate the individual's model at `x`
    fn value(&self, individual: &Individual, x: &[f64]) -> Result<f64, FitnessError>;

    /// Fitness over a `size x size` grid of two-gene individuals
    ///
    /// Rows are `[a, b, fitness([a, b])]` with `a` spanning `x_range` (inner
    /// loop) and `b` spanning `y_range` (outer loop), both endpoints included.
    fn landscape(&self, x_range: (f64, f64), y_range: (f64, f64), size: usize) -> Vec<[f64; 3]> {
        let xs = linspace(x_range, size);
        let ys = linspace(y_range, size);

        let mut grid = Vec::with_capacity(size * size);
        for &b in &ys {
            for &a in &xs {
                let individual = Individual::new(Genotype::from_dna(vec![a, b]));
                grid.push([a, b, self.fitness(&individual)]);
            }
        }
        grid
    }
}

fn linspace((start, end): (f64, f64), size: usize) -> Vec<f64> {
    match size {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (size - 1) as f64;
            (0..size).map(|i| start + step * i as f64).collect()
        }
    }
}

impl<F: Fitness + ?Sized> Fitness for Box<F> {
    fn fitness(&self, individual: &Individual) -> f64 {
        (**self).fitness(individual)
    }

    fn value(&self, individual: &Individual, x: &[f64]) -> Result<f64, FitnessError> {
        (**self).value(individual, x)
    }
}

/// A wrapper to negate a fitness function
pub struct MinimizeFitness<F> {
    inner: F,
}

impl<F> MinimizeFitness<F> {
    /// Create a minimization wrapper around a fitness function
    pub fn new(fitness: F) -> Self {
        Self { inner: fitness }
    }
}

impl<F: Fitness> Fitness for MinimizeFitness<F> {
    fn fitness(&self, individual: &Individual) -> f64 {
        -self.inner.fitness(individual)
    }

    fn value(&self, individual: &Individual, x: &[f64]) -> Result<f64, FitnessError> {
        self.inner.value(individual, x)
    }
}

/// A closure-backed fitness without an underlying model
pub struct FnFitness<F>
where
    F: Fn(&Individual) -> f64,
{
    f: F,
}

impl<F> FnFitness<F>
where
    F: Fn(&Individual) -> f64,
{
    /// Create a new function-based fitness evaluator
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Fitness for FnFitness<F>
where
    F: Fn(&Individual) -> f64,
{
    fn fitness(&self, individual: &Individual) -> f64 {
        (self.f)(individual)
    }

    fn value(&self, _individual: &Individual, _x: &[f64]) -> Result<f64, FitnessError> {
        Err(FitnessError::Unsupported(
            "closure fitness has no model to evaluate".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum_of_first_two() -> FnFitness<impl Fn(&Individual) -> f64> {
        FnFitness::new(|i: &Individual| i.genotype()[0] + i.genotype()[1])
    }

    #[test]
    fn test_fn_fitness() {
        let fitness = sum_of_first_two();
        let individual = Individual::new(Genotype::from_dna(vec![1.5, 2.0]));
        assert_eq!(fitness.fitness(&individual), 3.5);
        assert!(matches!(
            fitness.value(&individual, &[1.0]),
            Err(FitnessError::Unsupported(_))
        ));
    }

    #[test]
    fn test_minimize_fitness() {
        let fitness = MinimizeFitness::new(sum_of_first_two());
        let individual = Individual::new(Genotype::from_dna(vec![1.0, 2.0]));
        assert_eq!(fitness.fitness(&individual), -3.0);
    }

    #[test]
    fn test_landscape() {
        let landscape = sum_of_first_two().landscape((-1.0, 1.0), (0.0, 1.0), 3);
        let expected = vec![
            [-1.0, 0.0, -1.0],
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 1.0],
            [-1.0, 0.5, -0.5],
            [0.0, 0.5, 0.5],
            [1.0, 0.5, 1.5],
            [-1.0, 1.0, 0.0],
            [0.0, 1.0, 1.0],
            [1.0, 1.0, 2.0],
        ];
        assert_eq!(landscape, expected);
    }

    #[test]
    fn test_landscape_degenerate_sizes() {
        let fitness = sum_of_first_two();
        assert!(fitness.landscape((0.0, 1.0), (0.0, 1.0), 0).is_empty());
        assert_eq!(
            fitness.landscape((2.0, 5.0), (3.0, 5.0), 1),
            vec![[2.0, 3.0, 5.0]]
        );
    }

    #[test]
    fn test_boxed_fitness() {
        let boxed: Box<dyn Fitness> = Box::new(sum_of_first_two());
        let individual = Individual::new(Genotype::from_dna(vec![0.25, 0.25]));
        assert_eq!(boxed.fitness(&individual), 0.5);
    }
}
