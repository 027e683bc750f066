//! Per-run simulation parameters.

use serde::{Deserialize, Serialize};
use units::Length;

use crate::config::GeneratorConfig;
use crate::error::ValidationError;

/// Inputs of one simulate invocation.
///
/// `q` is the size-distribution index of dN/dr ∝ r^(−q). Leaving `seed` empty
/// draws a fresh seed per run; the seed actually used is reported with the
/// generated population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationParams {
    pub particle_count: usize,
    pub r_min: Length,
    pub r_max: Length,
    pub q: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SimulationParams {
    /// 100 000 grains between 0.1 μm and 1 mm with q = 3
    fn default() -> Self {
        Self {
            particle_count: 100_000,
            r_min: Length::from_microns(0.1),
            r_max: Length::from_m(1e-3),
            q: 3.0,
            seed: None,
        }
    }
}

impl SimulationParams {
    pub fn new(particle_count: usize, r_min: Length, r_max: Length, q: f64) -> Self {
        Self {
            particle_count,
            r_min,
            r_max,
            q,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the parameters against the configured limits.
    ///
    /// Nothing is clamped: every out-of-range input is an error.
    pub fn validate(&self, config: &GeneratorConfig) -> Result<(), ValidationError> {
        if self.particle_count < 1 {
            return Err(ValidationError::TooFewParticles(0));
        }
        if self.particle_count > config.max_particles {
            return Err(ValidationError::TooManyParticles {
                requested: self.particle_count,
                limit: config.max_particles,
            });
        }

        let r_min = self.r_min.to_m();
        let r_max = self.r_max.to_m();
        for (name, value) in [("r_min", r_min), ("r_max", r_max), ("q", self.q)] {
            if !value.is_finite() {
                return Err(ValidationError::NonFinite { name, value });
            }
        }
        if r_min <= 0.0 {
            return Err(ValidationError::NonPositiveRadius(r_min));
        }
        if r_min >= r_max {
            return Err(ValidationError::RadiusBoundsOrder { r_min, r_max });
        }

        if self.particle_count < config.recommended_min_particles {
            log::warn!(
                "{} particles requested; at least {} are recommended for meaningful statistics",
                self.particle_count,
                config.recommended_min_particles
            );
        }

        Ok(())
    }
}
