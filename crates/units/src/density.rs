use serde::{Deserialize, Serialize};

use crate::length::Length;
use crate::mass::Mass;

/// Bulk material density in kg/m³
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Density(f64);

impl Density {
    pub fn from_kg_per_m3(value: f64) -> Self {
        Self(value)
    }

    pub fn from_grams_per_cm3(value: f64) -> Self {
        Self(value * 1000.0)
    }

    pub fn to_kg_per_m3(&self) -> f64 {
        self.0
    }

    pub fn to_grams_per_cm3(&self) -> f64 {
        self.0 / 1000.0
    }

    /// Mass of a homogeneous sphere of this density: m = (4/3)·π·r³·ρ
    pub fn sphere_mass(&self, radius: Length) -> Mass {
        Mass::from_kg(4.0 / 3.0 * std::f64::consts::PI * radius.cubed() * self.0)
    }
}
