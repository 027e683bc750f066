use serde::{Deserialize, Serialize};
use units::Density;

#[cfg(feature = "tsify")]
use tsify_next::Tsify;

/// Bulk composition of a dust grain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tsify", derive(Tsify))]
#[cfg_attr(feature = "tsify", tsify(into_wasm_abi, from_wasm_abi))]
#[serde(rename_all = "snake_case")]
pub enum Material {
    Silicate,
    Carbonaceous,
    IronNickel,
}

impl Material {
    pub const ALL: [Material; 3] = [Material::Silicate, Material::Carbonaceous, Material::IronNickel];

    /// Position of the material in [`Material::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Self::Silicate => 0,
            Self::Carbonaceous => 1,
            Self::IronNickel => 2,
        }
    }

    /// Reference bulk density.
    ///
    /// - Silicate: 3000 kg/m³ (olivine/pyroxene aggregates)
    /// - Carbonaceous: 1500 kg/m³ (porous, organic-rich)
    /// - Iron-nickel: 7800 kg/m³ (metal grains)
    pub fn reference_density(&self) -> Density {
        match self {
            Self::Silicate => Density::from_kg_per_m3(3000.0),
            Self::Carbonaceous => Density::from_kg_per_m3(1500.0),
            Self::IronNickel => Density::from_kg_per_m3(7800.0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Silicate => "silicate",
            Self::Carbonaceous => "carbonaceous",
            Self::IronNickel => "iron_nickel",
        }
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
