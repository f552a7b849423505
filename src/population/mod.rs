//! Population management
//!
//! Individuals, the id-keyed population store, and the builders that seed it.

pub mod individual;
#[allow(clippy::module_inception)]
pub mod population;

pub mod prelude {
    pub use super::individual::{build_individual, random_id, Individual};
    pub use super::population::{
        build_fixed_dimension_population, build_variable_dimension_population, DimensionPolicy,
        Item, Population, PopulationBuilder, PopulationConfig, PopulationStats,
    };
}
