//! Per-family source profiles.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use units::Velocity;

use crate::{Material, PopulationError, SourceFamily};

/// Tolerance for probability tables that must sum to one
pub const NORMALIZATION_TOLERANCE: f64 = 1e-9;

/// Heliocentric approach speed range of a family, in m/s.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocityRange {
    pub min: Velocity,
    pub max: Velocity,
}

impl VelocityRange {
    pub fn from_km_per_sec(min: f64, max: f64) -> Self {
        Self {
            min: Velocity::from_km_per_sec(min),
            max: Velocity::from_km_per_sec(max),
        }
    }

    /// Centre of the range
    pub fn midpoint(&self) -> Velocity {
        (self.min + self.max) / 2.0
    }

    /// Width of the range
    pub fn width(&self) -> Velocity {
        self.max - self.min
    }

    pub fn contains(&self, v: Velocity) -> bool {
        v >= self.min && v <= self.max
    }
}

/// Shape of the speed distribution inside a family's [`VelocityRange`].
///
/// Published source tables give only the range, so uniform is the default.
/// `TruncatedGaussian` centres a normal on the range midpoint with σ equal to
/// a quarter of the width, redrawing any value that falls outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VelocityShape {
    #[default]
    Uniform,
    TruncatedGaussian,
}

/// How incoming directions of a family spread about the ecliptic.
///
/// Concentrated and moderate families draw their ecliptic latitude from a
/// zero-mean normal kernel of width `sigma_deg` (redrawn outside ±90°), with
/// ecliptic longitude uniform. Isotropic families draw uniformly on the sphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum AngularSpread {
    #[serde(rename_all = "camelCase")]
    EclipticConcentrated { sigma_deg: f64 },
    #[serde(rename_all = "camelCase")]
    Moderate { sigma_deg: f64 },
    Isotropic,
}

impl AngularSpread {
    /// Default kernel width for ecliptic-concentrated families (degrees)
    pub const CONCENTRATED_SIGMA_DEG: f64 = 10.0;
    /// Default kernel width for moderately inclined families (degrees)
    pub const MODERATE_SIGMA_DEG: f64 = 30.0;

    pub fn ecliptic_concentrated() -> Self {
        Self::EclipticConcentrated {
            sigma_deg: Self::CONCENTRATED_SIGMA_DEG,
        }
    }

    pub fn moderate() -> Self {
        Self::Moderate {
            sigma_deg: Self::MODERATE_SIGMA_DEG,
        }
    }

    /// Kernel width in degrees, `None` for isotropic spreads
    pub fn sigma_deg(&self) -> Option<f64> {
        match self {
            Self::EclipticConcentrated { sigma_deg } | Self::Moderate { sigma_deg } => {
                Some(*sigma_deg)
            }
            Self::Isotropic => None,
        }
    }
}

/// Everything the sampler needs to know about one source family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFamilyProfile {
    pub family: SourceFamily,
    /// Probability that a sampled grain belongs to this family
    pub weight: f64,
    pub velocity_range: VelocityRange,
    /// Material → probability, sums to one
    pub materials: BTreeMap<Material, f64>,
    pub angular_spread: AngularSpread,
}

impl SourceFamilyProfile {
    /// Main-belt debris: 11–25 km/s, 60 % silicate / 40 % iron-nickel,
    /// concentrated on the ecliptic.
    pub fn asteroidal() -> Self {
        Self {
            family: SourceFamily::Asteroidal,
            weight: 0.5,
            velocity_range: VelocityRange::from_km_per_sec(11.0, 25.0),
            materials: BTreeMap::from([(Material::Silicate, 0.6), (Material::IronNickel, 0.4)]),
            angular_spread: AngularSpread::ecliptic_concentrated(),
        }
    }

    /// Cometary dust: 20–70 km/s, 80 % carbonaceous / 20 % silicate,
    /// moderate inclinations.
    pub fn cometary() -> Self {
        Self {
            family: SourceFamily::Cometary,
            weight: 0.3,
            velocity_range: VelocityRange::from_km_per_sec(20.0, 70.0),
            materials: BTreeMap::from([(Material::Carbonaceous, 0.8), (Material::Silicate, 0.2)]),
            angular_spread: AngularSpread::moderate(),
        }
    }

    /// Interstellar grains: 30–100 km/s, half silicate / half carbonaceous,
    /// isotropic.
    pub fn interstellar() -> Self {
        Self {
            family: SourceFamily::Interstellar,
            weight: 0.2,
            velocity_range: VelocityRange::from_km_per_sec(30.0, 100.0),
            materials: BTreeMap::from([(Material::Silicate, 0.5), (Material::Carbonaceous, 0.5)]),
            angular_spread: AngularSpread::Isotropic,
        }
    }

    /// Reference profile of a family
    pub fn reference(family: SourceFamily) -> Self {
        match family {
            SourceFamily::Asteroidal => Self::asteroidal(),
            SourceFamily::Cometary => Self::cometary(),
            SourceFamily::Interstellar => Self::interstellar(),
        }
    }

    /// Check the profile's own tables. The cross-family weight sum is checked
    /// by [`crate::PopulationModel`].
    pub fn validate(&self) -> Result<(), PopulationError> {
        let family = self.family;

        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(PopulationError::InvalidWeight {
                family,
                weight: self.weight,
            });
        }

        let (min, max) = (
            self.velocity_range.min.to_m_per_sec(),
            self.velocity_range.max.to_m_per_sec(),
        );
        // A zero lower bound would make the focusing cross-section infinite
        if !min.is_finite() || !max.is_finite() || min <= 0.0 || min > max {
            return Err(PopulationError::InvalidVelocityRange { family, min, max });
        }

        if self.materials.is_empty() {
            return Err(PopulationError::EmptyMaterialTable(family));
        }
        for (&material, &probability) in &self.materials {
            if !probability.is_finite() || probability < 0.0 {
                return Err(PopulationError::InvalidMaterialProbability {
                    family,
                    material,
                    probability,
                });
            }
        }
        let sum: f64 = self.materials.values().sum();
        if (sum - 1.0).abs() > NORMALIZATION_TOLERANCE {
            return Err(PopulationError::MaterialsNotNormalized { family, sum });
        }

        if let Some(sigma_deg) = self.angular_spread.sigma_deg() {
            if !sigma_deg.is_finite() || sigma_deg <= 0.0 || sigma_deg >= 90.0 {
                return Err(PopulationError::InvalidAngularWidth { family, sigma_deg });
            }
        }

        Ok(())
    }
}
