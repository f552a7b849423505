//! Linear Regression
//!
//! This example fits `y = 3x1 - 2x2 + 0.5` to noisy observations by evolving
//! coefficient vectors under the least-squares fitness.
//!
//! Run with `RUST_LOG=evolvo=debug` to follow the training loop.

use evolvo::prelude::*;
use nalgebra::{DMatrix, DVector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Linear Regression ===\n");

    let mut rng = StdRng::seed_from_u64(42);

    // Synthetic observations with a little gaussian noise
    const SAMPLES: usize = 50;
    let mut rows = Vec::with_capacity(SAMPLES * 2);
    let mut targets = Vec::with_capacity(SAMPLES);
    for _ in 0..SAMPLES {
        let x1: f64 = rng.gen_range(-5.0..5.0);
        let x2: f64 = rng.gen_range(-5.0..5.0);
        let noise: f64 = rng.sample::<f64, _>(StandardNormal) * 0.1;
        rows.extend_from_slice(&[x1, x2]);
        targets.push(3.0 * x1 - 2.0 * x2 + 0.5 + noise);
    }
    let xs = DMatrix::from_row_slice(SAMPLES, 2, &rows);
    let y = DVector::from_vec(targets);

    // Genotypes hold [x1, x2, intercept]
    let fitness = MultipleLinearRegression::new(xs, y)?;
    let population = build_fixed_dimension_population(200, 3, &fitness, (-1.0, 1.0), &mut rng)?;

    let mut playground = Playground::builder()
        .population(population)
        .record_genomes(false)
        .mutation(SelfAdaptiveSingleStep::new(0.3)?)
        .distribution(SigmaScaling)
        .selection(StochasticUniversalSampling::new(20)?)
        .recombination(SimpleArithmetic::new(0.5)?)
        .replacement(ReplaceWorst::new(20))
        .fitness(fitness)
        .build()?;

    let stats = playground.train(300, &mut rng)?;

    println!("{}", stats.summary());

    let best = playground.population().nth_best(0)?;
    println!("\nBest coefficients:");
    for (i, coeff) in best.individual.genotype().dna().iter().enumerate() {
        println!("  c[{}] = {:.4}", i, coeff);
    }

    let x = [1.0, 1.0];
    println!(
        "\nPrediction at {:?}: {:.4} (expected {:.4})",
        x,
        playground.predict(&x, 0)?,
        3.0 * x[0] - 2.0 * x[1] + 0.5
    );

    Ok(())
}
