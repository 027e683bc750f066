use crate::{Material, SourceFamily};

/// Reasons a population table is rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PopulationError {
    #[error("source family {0} is missing from the population table")]
    MissingFamily(SourceFamily),

    #[error("source family {0} appears more than once in the population table")]
    DuplicateFamily(SourceFamily),

    #[error("population weight of {family} must be finite and non-negative (got {weight})")]
    InvalidWeight { family: SourceFamily, weight: f64 },

    #[error("population weights must sum to 1 (got {0})")]
    WeightsNotNormalized(f64),

    #[error("velocity range of {family} is invalid: [{min}, {max}] m/s")]
    InvalidVelocityRange {
        family: SourceFamily,
        min: f64,
        max: f64,
    },

    #[error("material table of {0} is empty")]
    EmptyMaterialTable(SourceFamily),

    #[error("probability of {material} in {family} must be finite and non-negative (got {probability})")]
    InvalidMaterialProbability {
        family: SourceFamily,
        material: Material,
        probability: f64,
    },

    #[error("material probabilities of {family} must sum to 1 (got {sum})")]
    MaterialsNotNormalized { family: SourceFamily, sum: f64 },

    #[error("angular spread width of {family} must lie in (0°, 90°) (got {sigma_deg}°)")]
    InvalidAngularWidth { family: SourceFamily, sigma_deg: f64 },

    #[error("no density given for material {0}")]
    MissingDensity(Material),

    #[error("density of {material} must be finite and positive (got {density} kg/m³)")]
    InvalidDensity { material: Material, density: f64 },
}
