//! Evolutionary algorithms
//!
//! This module provides the generational playground loop.

pub mod playground;

pub mod prelude {
    pub use super::playground::*;
}
