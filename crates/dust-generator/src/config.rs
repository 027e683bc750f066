//! Generator configuration.

use serde::{Deserialize, Serialize};

use dust_population::PopulationModel;

use crate::error::ConfigError;

/// Runtime configuration of a [`crate::DustGenerator`].
///
/// Every field has a default, so a configuration file only needs to list what
/// it changes. The population tables are validated while deserializing.
///
/// # Example
/// ```
/// use dust_generator::{GeneratorConfig, VelocityShape};
///
/// let config = GeneratorConfig::from_json_str(
///     r#"{ "maxParticles": 5000, "parallel": false }"#,
/// ).unwrap();
/// assert_eq!(config.max_particles, 5000);
/// assert_eq!(config.population.velocity_shape(), VelocityShape::Uniform);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    pub population: PopulationModel,
    /// Largest particle count a single run may request
    pub max_particles: usize,
    /// Runs smaller than this are accepted but logged as statistically thin
    pub recommended_min_particles: usize,
    /// Generate particles on the rayon pool (needs the `parallel` feature)
    pub parallel: bool,
    /// Sequential runs log progress every this many particles
    pub progress_interval: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            population: PopulationModel::default(),
            max_particles: 10_000_000,
            recommended_min_particles: 1_000,
            parallel: true,
            progress_interval: 10_000,
        }
    }
}

impl GeneratorConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_particles == 0 {
            return Err(ConfigError::ZeroParticleLimit);
        }
        Ok(())
    }

    pub fn with_population(mut self, population: PopulationModel) -> Self {
        self.population = population;
        self
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}
