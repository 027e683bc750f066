use dust_population::PopulationError;

/// Simulation inputs rejected before any sampling takes place.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("particle count must be at least 1 (got {0})")]
    TooFewParticles(i64),

    #[error("particle count {requested} exceeds the limit of {limit}")]
    TooManyParticles { requested: usize, limit: usize },

    #[error("{name} must be a finite number (got {value})")]
    NonFinite { name: &'static str, value: f64 },

    #[error("r_min must be positive (got {0} m)")]
    NonPositiveRadius(f64),

    #[error("r_min ({r_min} m) must be strictly less than r_max ({r_max} m)")]
    RadiusBoundsOrder { r_min: f64, r_max: f64 },

    #[error("invalid population model: {0}")]
    Population(#[from] PopulationError),
}

/// Generator configuration that could not be loaded.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("max_particles must be at least 1")]
    ZeroParticleLimit,
}
