//! Monte Carlo generator of cosmic dust entering Earth's atmosphere.
//!
//! The pipeline for every particle is:
//!
//! 1. [`sampling`]: source family, radius, material, mass, approach speed and
//!    approach direction drawn from a [`PopulationModel`]
//! 2. [`focusing`]: gravitational focusing and energy conservation give the
//!    impact parameter, entry speed and entry angle at the top of atmosphere
//! 3. [`impact`]: the focused trajectory is mapped to the latitude/longitude
//!    where it crosses the top of atmosphere
//!
//! [`generation`] runs the pipeline over a whole population and
//! [`diagnostics`] summarizes the result.
//!
//! # Reproducibility
//!
//! Each particle draws from its own ChaCha stream, keyed by the run seed and
//! selected by the particle index. The same seed therefore reproduces a run
//! bit for bit, whether particles are generated sequentially or in parallel.

pub mod config;
pub mod constants;
pub mod diagnostics;
pub mod error;
pub mod focusing;
pub mod generation;
pub mod impact;
pub mod params;
pub mod particle;
pub mod sampling;

#[cfg(test)]
mod impact_test;
#[cfg(test)]
mod proptest_invariants;

pub use config::GeneratorConfig;
pub use diagnostics::{DiagnosticsSnapshot, Summary, aggregate};
pub use error::{ConfigError, ValidationError};
pub use generation::{DustGenerator, GeneratedPopulation};
pub use params::SimulationParams;
pub use particle::Particle;
pub use sampling::{ParticleSampler, PowerLawRadius, SampledParticle};

// Re-export population types for convenience
pub use dust_population::{
    AngularSpread, Material, PopulationModel, SourceFamily, SourceFamilyProfile, VelocityShape,
};
