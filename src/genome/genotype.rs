//! Genotype value object
//!
//! A genotype is the evolvable state of an individual: a real-valued dna vector
//! plus a parallel mask vector carrying per-gene mutation strength.

use std::fmt;
use std::ops::Index;

use serde::Serialize;

use crate::error::GenomeError;

/// Real-valued dna with a parallel mutation-strength mask
///
/// Both vectors always have the same length. A genotype is never modified in
/// place: mutation and recombination build new ones.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Genotype {
    dna: Vec<f64>,
    mask: Vec<f64>,
}

impl Genotype {
    /// Create a genotype from dna and mask vectors of equal length
    pub fn new(dna: Vec<f64>, mask: Vec<f64>) -> Result<Self, GenomeError> {
        if dna.len() != mask.len() {
            return Err(GenomeError::DimensionMismatch {
                expected: dna.len(),
                actual: mask.len(),
            });
        }
        Ok(Self { dna, mask })
    }

    /// Create a genotype from copies of the given slices
    pub fn from_slices(dna: &[f64], mask: &[f64]) -> Result<Self, GenomeError> {
        Self::new(dna.to_vec(), mask.to_vec())
    }

    /// Create a genotype whose mask is all zeros
    pub fn from_dna(dna: Vec<f64>) -> Self {
        let mask = vec![0.0; dna.len()];
        Self { dna, mask }
    }

    /// Number of genes
    pub fn dimension(&self) -> usize {
        self.dna.len()
    }

    /// Read-only view of the dna
    pub fn dna(&self) -> &[f64] {
        &self.dna
    }

    /// Read-only view of the mask
    pub fn mask(&self) -> &[f64] {
        &self.mask
    }

    /// Owned copy of the dna
    pub fn to_dna(&self) -> Vec<f64> {
        self.dna.clone()
    }

    /// Owned copy of the mask
    pub fn to_mask(&self) -> Vec<f64> {
        self.mask.clone()
    }

    /// Consume the genotype and return `(dna, mask)`
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.dna, self.mask)
    }

    /// Append one gene and its mask entry, returning a genotype one gene longer
    pub fn extended(&self, gene: f64, mask_entry: f64) -> Self {
        let mut dna = Vec::with_capacity(self.dna.len() + 1);
        dna.extend_from_slice(&self.dna);
        dna.push(gene);

        let mut mask = Vec::with_capacity(self.mask.len() + 1);
        mask.extend_from_slice(&self.mask);
        mask.push(mask_entry);

        Self { dna, mask }
    }
}

impl Index<usize> for Genotype {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.dna[index]
    }
}

impl fmt::Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}),({:?})", self.dna, self.mask)
    }
}
