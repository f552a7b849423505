//! Random dna generators
//!
//! Builders used when seeding a population. Every builder produces a vector of
//! exactly the requested dimension, which must be strictly positive.

use rand::{Rng, RngCore};
use rand_distr::{Distribution, StandardNormal, Uniform};

use crate::error::GenomeError;

/// Generates random dna vectors
///
/// Takes a trait-object generator so heterogeneous builders can be composed
/// (see [`CompositeDnaBuilder`]).
pub trait DnaBuilder {
    /// Produce a dna vector of the given dimension
    fn get(&self, dimension: usize, rng: &mut dyn RngCore) -> Result<Vec<f64>, GenomeError>;

    /// Name of the underlying distribution
    fn distribution(&self) -> &'static str;
}

fn check_dimension(dimension: usize) -> Result<(), GenomeError> {
    if dimension == 0 {
        return Err(GenomeError::InvalidDimension(dimension));
    }
    Ok(())
}

/// Draws every gene uniformly from a half-open interval `[low, high)`
#[derive(Clone, Debug)]
pub struct UniformRandomDnaBuilder {
    interval: (f64, f64),
    uniform: Uniform<f64>,
}

impl UniformRandomDnaBuilder {
    /// Create a builder sampling from `[low, high)`
    pub fn new(low: f64, high: f64) -> Result<Self, GenomeError> {
        if !(low.is_finite() && high.is_finite() && low < high) {
            return Err(GenomeError::InvalidStructure(format!(
                "invalid dna interval [{}, {})",
                low, high
            )));
        }
        Ok(Self {
            interval: (low, high),
            uniform: Uniform::new(low, high),
        })
    }

    /// The sampling interval
    pub fn interval(&self) -> (f64, f64) {
        self.interval
    }
}

impl Default for UniformRandomDnaBuilder {
    fn default() -> Self {
        Self {
            interval: (-1.0, 1.0),
            uniform: Uniform::new(-1.0, 1.0),
        }
    }
}

impl DnaBuilder for UniformRandomDnaBuilder {
    fn get(&self, dimension: usize, rng: &mut dyn RngCore) -> Result<Vec<f64>, GenomeError> {
        check_dimension(dimension)?;
        Ok((0..dimension).map(|_| self.uniform.sample(rng)).collect())
    }

    fn distribution(&self) -> &'static str {
        "uniform"
    }
}

/// Draws every gene from `Normal(mean, std)`
#[derive(Clone, Debug)]
pub struct NormalRandomDnaBuilder {
    mean: f64,
    std: f64,
}

impl NormalRandomDnaBuilder {
    /// Create a builder with the given mean and standard deviation
    pub fn new(mean: f64, std: f64) -> Result<Self, GenomeError> {
        if !(mean.is_finite() && std.is_finite() && std >= 0.0) {
            return Err(GenomeError::InvalidStructure(format!(
                "invalid normal parameters: mean {}, std {}",
                mean, std
            )));
        }
        Ok(Self { mean, std })
    }

    /// Mean of the distribution
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Standard deviation of the distribution
    pub fn std(&self) -> f64 {
        self.std
    }
}

impl Default for NormalRandomDnaBuilder {
    fn default() -> Self {
        Self {
            mean: 0.0,
            std: 1.0,
        }
    }
}

impl DnaBuilder for NormalRandomDnaBuilder {
    fn get(&self, dimension: usize, rng: &mut dyn RngCore) -> Result<Vec<f64>, GenomeError> {
        check_dimension(dimension)?;
        Ok((0..dimension)
            .map(|_| self.mean + self.std * rng.sample::<f64, _>(StandardNormal))
            .collect())
    }

    fn distribution(&self) -> &'static str {
        "normal"
    }
}

/// Concatenates segments produced by different builders
///
/// Each segment owns a share of the requested dimension. Segment boundaries
/// are the cumulative shares scaled to the dimension and rounded, so the
/// lengths always add up to the requested dimension. Segments that round to
/// zero genes are skipped.
pub struct CompositeDnaBuilder {
    segments: Vec<(f64, Box<dyn DnaBuilder>)>,
}

impl CompositeDnaBuilder {
    /// Create an empty composite builder
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Add a segment with the given relative share
    pub fn segment<B>(mut self, share: f64, builder: B) -> Result<Self, GenomeError>
    where
        B: DnaBuilder + 'static,
    {
        if !(share.is_finite() && share > 0.0) {
            return Err(GenomeError::InvalidStructure(format!(
                "segment share must be positive, got {}",
                share
            )));
        }
        self.segments.push((share, Box::new(builder)));
        Ok(self)
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether no segment has been added
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Lengths of every segment for a given dimension
    pub fn segment_lengths(&self, dimension: usize) -> Vec<usize> {
        let total: f64 = self.segments.iter().map(|(share, _)| share).sum();
        let mut cumulative = 0.0;
        let mut previous = 0usize;
        let last = self.segments.len().saturating_sub(1);

        self.segments
            .iter()
            .enumerate()
            .map(|(i, (share, _))| {
                cumulative += share;
                let boundary = if i == last {
                    dimension
                } else {
                    ((cumulative / total) * dimension as f64).round() as usize
                };
                let boundary = boundary.clamp(previous, dimension);
                let length = boundary - previous;
                previous = boundary;
                length
            })
            .collect()
    }
}

impl Default for CompositeDnaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DnaBuilder for CompositeDnaBuilder {
    fn get(&self, dimension: usize, rng: &mut dyn RngCore) -> Result<Vec<f64>, GenomeError> {
        check_dimension(dimension)?;
        if self.segments.is_empty() {
            return Err(GenomeError::InvalidStructure(
                "composite builder has no segments".to_string(),
            ));
        }

        let mut dna = Vec::with_capacity(dimension);
        let lengths = self.segment_lengths(dimension);
        for (length, (_, builder)) in lengths.into_iter().zip(&self.segments) {
            if length > 0 {
                dna.extend(builder.get(length, rng)?);
            }
        }
        Ok(dna)
    }

    fn distribution(&self) -> &'static str {
        "composite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_uniform_builder_instantiation() {
        let mut rng = rand::thread_rng();
        let builder = UniformRandomDnaBuilder::new(-5.0, 0.0).unwrap();
        assert_eq!(builder.distribution(), "uniform");
        assert_eq!(builder.get(10, &mut rng).unwrap().len(), 10);
    }

    #[test]
    fn test_uniform_builder_values_within_interval() {
        let mut rng = rand::thread_rng();
        let builder = UniformRandomDnaBuilder::default();
        for _ in 0..100 {
            let dna = builder.get(2, &mut rng).unwrap();
            assert!(dna.iter().all(|g| (-1.0..1.0).contains(g)));
        }
    }

    #[test]
    fn test_uniform_builder_rejects_empty_interval() {
        assert!(UniformRandomDnaBuilder::new(1.0, 1.0).is_err());
        assert!(UniformRandomDnaBuilder::new(2.0, 1.0).is_err());
        assert!(UniformRandomDnaBuilder::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_zero_dimension_is_rejected() {
        let mut rng = rand::thread_rng();
        assert_eq!(
            UniformRandomDnaBuilder::default().get(0, &mut rng),
            Err(GenomeError::InvalidDimension(0))
        );
        assert_eq!(
            NormalRandomDnaBuilder::default().get(0, &mut rng),
            Err(GenomeError::InvalidDimension(0))
        );
    }

    #[test]
    fn test_normal_builder_instantiation() {
        let mut rng = rand::thread_rng();
        let builder = NormalRandomDnaBuilder::default();
        assert_eq!(builder.distribution(), "normal");
        assert_eq!(builder.mean(), 0.0);
        assert_eq!(builder.std(), 1.0);
        assert_eq!(builder.get(2, &mut rng).unwrap().len(), 2);
    }

    #[test]
    fn test_normal_builder_zero_std_is_constant() {
        let mut rng = rand::thread_rng();
        let builder = NormalRandomDnaBuilder::new(3.0, 0.0).unwrap();
        assert_eq!(builder.get(4, &mut rng).unwrap(), vec![3.0; 4]);
    }

    #[test]
    fn test_normal_builder_rejects_negative_std() {
        assert!(NormalRandomDnaBuilder::new(0.0, -1.0).is_err());
    }

    #[test]
    fn test_composite_segment_lengths() {
        let builder = CompositeDnaBuilder::new()
            .segment(1.0, UniformRandomDnaBuilder::default())
            .unwrap()
            .segment(1.0, NormalRandomDnaBuilder::default())
            .unwrap()
            .segment(2.0, UniformRandomDnaBuilder::default())
            .unwrap();

        assert_eq!(builder.segment_lengths(8), vec![2, 2, 4]);
        assert_eq!(builder.segment_lengths(1).iter().sum::<usize>(), 1);
        assert_eq!(builder.segment_lengths(7).iter().sum::<usize>(), 7);
    }

    #[test]
    fn test_composite_builder_segments_follow_their_builders() {
        let mut rng = StdRng::seed_from_u64(7);
        let builder = CompositeDnaBuilder::new()
            .segment(1.0, UniformRandomDnaBuilder::new(10.0, 11.0).unwrap())
            .unwrap()
            .segment(1.0, NormalRandomDnaBuilder::new(-50.0, 0.0).unwrap())
            .unwrap();

        let dna = builder.get(6, &mut rng).unwrap();
        assert_eq!(dna.len(), 6);
        assert!(dna[..3].iter().all(|g| (10.0..11.0).contains(g)));
        assert!(dna[3..].iter().all(|g| *g == -50.0));
        assert_eq!(builder.distribution(), "composite");
    }

    #[test]
    fn test_composite_builder_without_segments_fails() {
        let mut rng = rand::thread_rng();
        assert!(CompositeDnaBuilder::new().get(3, &mut rng).is_err());
    }

    #[test]
    fn test_composite_rejects_non_positive_share() {
        assert!(CompositeDnaBuilder::new()
            .segment(0.0, UniformRandomDnaBuilder::default())
            .is_err());
    }
}
