//! Genetic operators
//!
//! This module provides the mutation, recombination, distribution, selection
//! and replacement operators driving the evolutionary loop.

pub mod distribution;
pub mod mutation;
pub mod recombination;
pub mod replacement;
pub mod selection;
pub mod traits;

pub mod prelude {
    pub use super::distribution::*;
    pub use super::mutation::*;
    pub use super::recombination::*;
    pub use super::replacement::*;
    pub use super::selection::*;
    pub use super::traits::*;
}
