#![deny(unsafe_code)]
//! Core of the spiral galaxy generator.
//!
//! Provides [`ParameterSet`] (validated configuration), [`Srgb`] colors,
//! the [`generate`] placement algorithm behind a seedable [`RandomSource`],
//! immutable [`GalaxyBuffers`] output, [`LiveGalaxy`] for publishing
//! regenerations to concurrent readers, and [`Recipe`] for reproducible
//! galaxies.

pub mod buffers;
pub mod color;
pub mod error;
pub mod generator;
pub mod live;
pub mod params;
pub mod prng;
pub mod recipe;

pub use buffers::GalaxyBuffers;
pub use color::Srgb;
pub use error::GalaxyError;
pub use generator::{branch_angle, generate, GalaxyGenerator};
pub use live::{LiveGalaxy, Snapshot};
pub use params::ParameterSet;
pub use prng::{RandomSource, Xorshift64};
pub use recipe::Recipe;
