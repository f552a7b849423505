//! Fitness evaluation
//!
//! The fitness contract plus regression, likelihood and kernel-based
//! implementations.

pub mod kernel;
pub mod regression;
pub mod traits;
pub mod utils;

pub mod prelude {
    pub use super::kernel::*;
    pub use super::regression::*;
    pub use super::traits::*;
    pub use super::utils::*;
}
