//! Genotype representation and random dna builders
//!
//! This module provides the `Genotype` value object and the `DnaBuilder`
//! family used to seed populations.

pub mod dna_builder;
pub mod genotype;

pub mod prelude {
    pub use super::dna_builder::*;
    pub use super::genotype::*;
}
