//! Global Minimum Search
//!
//! This example searches for the minimum of the Rastrigin function in two
//! dimensions, then prints a coarse sample of the fitness landscape.
//!
//! The Rastrigin function is highly multimodal with its global minimum of 0
//! at the origin.

use std::f64::consts::PI;

use evolvo::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

fn rastrigin(x: &[f64]) -> f64 {
    10.0 * x.len() as f64
        + x.iter()
            .map(|xi| xi * xi - 10.0 * (2.0 * PI * xi).cos())
            .sum::<f64>()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Global Minimum (Rastrigin) ===\n");

    let mut rng = StdRng::seed_from_u64(7);

    let fitness = GlobalMinimum::new(rastrigin);
    let population = build_fixed_dimension_population(150, 2, &fitness, (-5.12, 5.12), &mut rng)?;

    let mut playground = Playground::builder()
        .population(population)
        .record_genomes(false)
        .mutation(FixedVariance::new(0.2)?)
        .distribution(FpsWithWindowing)
        .selection(StochasticUniversalSampling::new(30)?)
        .recombination(SimpleArithmetic::new(0.3)?)
        .replacement(ReplaceWorst::new(30))
        .fitness(fitness)
        .build()?;

    let stats = playground.train(500, &mut rng)?;

    println!("{}", stats.summary());

    let best = playground.population().nth_best(0)?;
    let dna = best.individual.genotype().dna();
    println!("\nBest point: {:?}", dna);
    println!("Kernel value: {:.6}", playground.predict(dna, 0)?);

    // Coarse landscape around the origin
    println!("\nLandscape sample (x, y, fitness):");
    let landscape = playground.fitness().landscape((-1.0, 1.0), (-1.0, 1.0), 5);
    for [x, y, z] in landscape.iter().step_by(6) {
        println!("  ({:>5.2}, {:>5.2}) -> {:.4}", x, y, z);
    }

    Ok(())
}
