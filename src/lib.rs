//! # evolvo
//!
//! A generational evolutionary-algorithm engine for real-valued genotypes.
//!
//! A population of individuals, each carrying a dna vector and a parallel
//! mutation-strength mask, evolves under five pluggable operator families:
//!
//! - **Mutation**: uniform, fixed-variance and self-adaptive step-size mutation,
//!   with optional genome growth
//! - **Distribution**: fitness-proportionate, windowed and sigma-scaled
//!   selection probabilities
//! - **Selection**: stochastic universal sampling of a mating pool
//! - **Recombination**: arithmetic crossover, also lifted to matrices
//! - **Replacement**: replace-worst admission of offspring
//!
//! Every random draw comes from a generator passed in by the caller, so a
//! seeded run is fully reproducible.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use evolvo::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let fitness = MultipleLinearRegression::new(xs, y)?;
//! let population = build_fixed_dimension_population(100, 2, &fitness, (-1.0, 1.0), &mut rng)?;
//!
//! let mut playground = Playground::builder()
//!     .population(population)
//!     .mutation(SelfAdaptiveSingleStep::new(0.5)?)
//!     .distribution(SigmaScaling)
//!     .selection(StochasticUniversalSampling::new(2)?)
//!     .recombination(SimpleArithmetic::new(0.5)?)
//!     .replacement(ReplaceWorst::new(2))
//!     .fitness(fitness)
//!     .build()?;
//!
//! let stats = playground.train(100, &mut rng)?;
//! let y_hat = playground.predict(&[12.0], 0)?;
//! ```

pub mod algorithms;
pub mod diagnostics;
pub mod error;
pub mod fitness;
pub mod genome;
pub mod operators;
pub mod population;
pub mod termination;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithms::prelude::*;
    pub use crate::diagnostics::prelude::*;
    pub use crate::error::*;
    pub use crate::fitness::prelude::*;
    pub use crate::genome::prelude::*;
    pub use crate::operators::prelude::*;
    pub use crate::population::prelude::*;
    pub use crate::termination::prelude::*;
}
