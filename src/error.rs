//! Error types for evolvo
//!
//! One enum per layer (genome, operators, population, fitness), all of which
//! convert into [`EvolutionError`] at the training-loop boundary.

use thiserror::Error;
use uuid::Uuid;

/// Error type for genotype and dna operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GenomeError {
    /// Dimension mismatch
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Dimension must be strictly positive
    #[error("Invalid dimension {0}: dna dimension must be strictly positive")]
    InvalidDimension(usize),

    /// Invalid genome structure
    #[error("Invalid genome structure: {0}")]
    InvalidStructure(String),
}

/// Error type for operator failures
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OperatorError {
    /// Mutation operation failed
    #[error("Mutation failed: {0}")]
    MutationFailed(String),

    /// Recombination operation failed
    #[error("Recombination failed: {0}")]
    RecombinationFailed(String),

    /// Parent distribution could not be computed
    #[error("Distribution failed: {0}")]
    DistributionFailed(String),

    /// Selection operation failed
    #[error("Selection failed: {0}")]
    SelectionFailed(String),

    /// Replacement operation failed
    #[error("Replacement failed: {0}")]
    ReplacementFailed(String),

    /// Invalid operator configuration
    #[error("Invalid operator configuration: {0}")]
    InvalidConfiguration(String),
}

/// Error type for population lookups
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PopulationError {
    /// No individual with this id lives in the population
    #[error("Individual not found: {0}")]
    NotFound(Uuid),

    /// Rank requested beyond the population size
    #[error("Rank {depth} out of range for a population of {size}")]
    RankOutOfRange { depth: usize, size: usize },
}

/// Error type for fitness functions
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FitnessError {
    /// Observations handed to a fitness function are malformed
    #[error("Invalid observations: {0}")]
    InvalidObservations(String),

    /// Model coefficients or query point have the wrong shape
    #[error("Shape error: {0}")]
    Shape(#[from] GenomeError),

    /// The fitness function has no model to evaluate
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

/// Error returned by population building and training
#[derive(Debug, Error)]
pub enum EvolutionError {
    #[error("Genome error: {0}")]
    Genome(#[from] GenomeError),

    #[error("Operator error: {0}")]
    Operator(#[from] OperatorError),

    #[error("Population error: {0}")]
    Population(#[from] PopulationError),

    #[error("Fitness evaluation failed: {0}")]
    Fitness(#[from] FitnessError),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Empty population")]
    EmptyPopulation,
}

/// Result alias used across the crate
pub type EvoResult<T> = Result<T, EvolutionError>;
