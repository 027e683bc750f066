//! Validated population model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use units::Density;

use crate::profile::NORMALIZATION_TOLERANCE;
use crate::{Material, PopulationError, SourceFamily, SourceFamilyProfile, VelocityShape};

/// Unvalidated population tables, as written in configuration files.
///
/// Convert with [`PopulationModel::new`] (or `TryFrom`) before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulationTables {
    pub families: Vec<SourceFamilyProfile>,
    pub densities: BTreeMap<Material, Density>,
    #[serde(default)]
    pub velocity_shape: VelocityShape,
}

impl Default for PopulationTables {
    fn default() -> Self {
        Self {
            families: SourceFamily::ALL
                .iter()
                .map(|&family| SourceFamilyProfile::reference(family))
                .collect(),
            densities: Material::ALL
                .iter()
                .map(|&material| (material, material.reference_density()))
                .collect(),
            velocity_shape: VelocityShape::Uniform,
        }
    }
}

/// The dust source population: one profile per family and one density per
/// material.
///
/// Construction validates every table, so lookups never fail. Deserializing a
/// `PopulationModel` goes through the same validation.
///
/// # Example
/// ```
/// use dust_population::{Material, PopulationModel, SourceFamily};
///
/// let model = PopulationModel::default();
/// assert_eq!(model.profile(SourceFamily::Cometary).weight, 0.3);
/// assert_eq!(model.density(Material::IronNickel).to_kg_per_m3(), 7800.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PopulationTables", into = "PopulationTables")]
pub struct PopulationModel {
    /// Indexed by [`SourceFamily::index`]
    profiles: [SourceFamilyProfile; 3],
    /// Indexed by [`Material::index`]
    densities: [Density; 3],
    velocity_shape: VelocityShape,
}

impl PopulationModel {
    /// Validate `tables` and build the model.
    pub fn new(tables: PopulationTables) -> Result<Self, PopulationError> {
        let mut slots: [Option<SourceFamilyProfile>; 3] = [None, None, None];
        for profile in tables.families {
            profile.validate()?;
            let slot = &mut slots[profile.family.index()];
            if slot.is_some() {
                return Err(PopulationError::DuplicateFamily(profile.family));
            }
            *slot = Some(profile);
        }

        let [a, c, i] = slots;
        let profiles = [
            a.ok_or(PopulationError::MissingFamily(SourceFamily::Asteroidal))?,
            c.ok_or(PopulationError::MissingFamily(SourceFamily::Cometary))?,
            i.ok_or(PopulationError::MissingFamily(SourceFamily::Interstellar))?,
        ];

        let weight_sum: f64 = profiles.iter().map(|p| p.weight).sum();
        if (weight_sum - 1.0).abs() > NORMALIZATION_TOLERANCE {
            return Err(PopulationError::WeightsNotNormalized(weight_sum));
        }

        let mut densities = [Density::from_kg_per_m3(0.0); 3];
        for (slot, material) in densities.iter_mut().zip(Material::ALL) {
            let density = *tables
                .densities
                .get(&material)
                .ok_or(PopulationError::MissingDensity(material))?;
            let value = density.to_kg_per_m3();
            if !value.is_finite() || value <= 0.0 {
                return Err(PopulationError::InvalidDensity {
                    material,
                    density: value,
                });
            }
            *slot = density;
        }

        Ok(Self {
            profiles,
            densities,
            velocity_shape: tables.velocity_shape,
        })
    }

    /// Profile of a source family.
    pub fn profile(&self, family: SourceFamily) -> &SourceFamilyProfile {
        &self.profiles[family.index()]
    }

    /// All profiles in canonical family order.
    pub fn profiles(&self) -> &[SourceFamilyProfile] {
        &self.profiles
    }

    /// Bulk density of a material.
    pub fn density(&self, material: Material) -> Density {
        self.densities[material.index()]
    }

    /// (family, weight) pairs in canonical family order.
    pub fn family_weights(&self) -> impl Iterator<Item = (SourceFamily, f64)> + '_ {
        self.profiles.iter().map(|p| (p.family, p.weight))
    }

    pub fn velocity_shape(&self) -> VelocityShape {
        self.velocity_shape
    }

    /// Same model with a different speed distribution shape.
    pub fn with_velocity_shape(mut self, shape: VelocityShape) -> Self {
        self.velocity_shape = shape;
        self
    }
}

impl Default for PopulationModel {
    fn default() -> Self {
        Self {
            profiles: SourceFamily::ALL.map(SourceFamilyProfile::reference),
            densities: Material::ALL.map(|m| m.reference_density()),
            velocity_shape: VelocityShape::Uniform,
        }
    }
}

impl TryFrom<PopulationTables> for PopulationModel {
    type Error = PopulationError;

    fn try_from(tables: PopulationTables) -> Result<Self, Self::Error> {
        Self::new(tables)
    }
}

impl From<PopulationModel> for PopulationTables {
    fn from(model: PopulationModel) -> Self {
        Self {
            densities: Material::ALL.into_iter().zip(model.densities).collect(),
            families: model.profiles.into(),
            velocity_shape: model.velocity_shape,
        }
    }
}
