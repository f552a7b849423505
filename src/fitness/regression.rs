//! Observation-based fitness functions
//!
//! Each function holds a matrix of observations `xs` (one row per
//! observation) and a vector of targets `y`. An individual's dna is read as
//! the coefficients of a model; dna that does not fit the model's shape
//! scores `f64::NEG_INFINITY`.

use nalgebra::{DMatrix, DVector};

use crate::error::{FitnessError, GenomeError};
use crate::fitness::traits::Fitness;
use crate::fitness::utils::{least_squares, linear_fit, logit, polynomial_fit};
use crate::population::individual::Individual;

fn check_observations(xs: &DMatrix<f64>, y: &DVector<f64>) -> Result<(), FitnessError> {
    if xs.nrows() != y.len() {
        return Err(FitnessError::InvalidObservations(format!(
            "{} observation rows but {} targets",
            xs.nrows(),
            y.len()
        )));
    }
    Ok(())
}

/// Multiple linear regression
///
/// dna = `[b_1, .., b_n, intercept]`; fitness is the negated sum of squared
/// residuals.
#[derive(Clone, Debug)]
pub struct MultipleLinearRegression {
    xs: DMatrix<f64>,
    y: DVector<f64>,
}

impl MultipleLinearRegression {
    /// Create a regression over the given observations
    pub fn new(xs: DMatrix<f64>, y: DVector<f64>) -> Result<Self, FitnessError> {
        check_observations(&xs, &y)?;
        Ok(Self { xs, y })
    }

    /// Number of explanatory variables
    pub fn num_variables(&self) -> usize {
        self.xs.ncols()
    }
}

impl Fitness for MultipleLinearRegression {
    fn fitness(&self, individual: &Individual) -> f64 {
        least_squares(&self.xs, &self.y, individual.genotype().dna(), linear_fit)
            .map_or(f64::NEG_INFINITY, |lsm| -lsm)
    }

    fn value(&self, individual: &Individual, x: &[f64]) -> Result<f64, FitnessError> {
        Ok(linear_fit(individual.genotype().dna(), x)?)
    }
}

/// Single-variable polynomial regression
///
/// dna = polynomial coefficients, highest degree first.
#[derive(Clone, Debug)]
pub struct SimplePolynomialRegression {
    xs: DMatrix<f64>,
    y: DVector<f64>,
}

impl SimplePolynomialRegression {
    /// Create a regression over single-column observations
    pub fn new(xs: DMatrix<f64>, y: DVector<f64>) -> Result<Self, FitnessError> {
        check_observations(&xs, &y)?;
        if xs.ncols() != 1 {
            return Err(FitnessError::InvalidObservations(format!(
                "polynomial regression takes one variable, got {}",
                xs.ncols()
            )));
        }
        Ok(Self { xs, y })
    }
}

impl Fitness for SimplePolynomialRegression {
    fn fitness(&self, individual: &Individual) -> f64 {
        least_squares(&self.xs, &self.y, individual.genotype().dna(), polynomial_fit)
            .map_or(f64::NEG_INFINITY, |lsm| -lsm)
    }

    fn value(&self, individual: &Individual, x: &[f64]) -> Result<f64, FitnessError> {
        Ok(polynomial_fit(individual.genotype().dna(), x)?)
    }
}

/// Logistic regression scored by summed class likelihood
///
/// dna = `[alpha, b_1, .., b_n]`. Targets must contain exactly the classes
/// 0 and 1. Fitness adds `logit(x)` for every positive observation and
/// `1 - logit(x)` for every negative one.
#[derive(Clone, Debug)]
pub struct MaximumLikelihood {
    positives: Vec<Vec<f64>>,
    negatives: Vec<Vec<f64>>,
}

impl MaximumLikelihood {
    /// Create a likelihood fitness over binary-labelled observations
    pub fn new(xs: DMatrix<f64>, y: DVector<f64>) -> Result<Self, FitnessError> {
        check_observations(&xs, &y)?;

        let mut positives = Vec::new();
        let mut negatives = Vec::new();
        for (row, label) in xs.row_iter().zip(y.iter()) {
            let x: Vec<f64> = row.iter().copied().collect();
            if *label == 1.0 {
                positives.push(x);
            } else if *label == 0.0 {
                negatives.push(x);
            } else {
                return Err(FitnessError::InvalidObservations(format!(
                    "labels must be 0 or 1, got {}",
                    label
                )));
            }
        }
        if positives.is_empty() || negatives.is_empty() {
            return Err(FitnessError::InvalidObservations(
                "labels must contain both classes 0 and 1".to_string(),
            ));
        }

        Ok(Self {
            positives,
            negatives,
        })
    }

    fn likelihood(&self, dna: &[f64]) -> Option<f64> {
        let (alpha, coeff) = dna.split_first()?;
        let mut total = 0.0;
        for x in &self.positives {
            total += logit(*alpha, coeff, x).ok()?;
        }
        for x in &self.negatives {
            total += 1.0 - logit(*alpha, coeff, x).ok()?;
        }
        Some(total)
    }
}

impl Fitness for MaximumLikelihood {
    fn fitness(&self, individual: &Individual) -> f64 {
        self.likelihood(individual.genotype().dna())
            .unwrap_or(f64::NEG_INFINITY)
    }

    fn value(&self, individual: &Individual, x: &[f64]) -> Result<f64, FitnessError> {
        match individual.genotype().dna().split_first() {
            Some((alpha, coeff)) => Ok(logit(*alpha, coeff, x)?),
            None => Err(GenomeError::InvalidDimension(0).into()),
        }
    }
}
