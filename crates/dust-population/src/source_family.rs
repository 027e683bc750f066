use serde::{Deserialize, Serialize};

#[cfg(feature = "tsify")]
use tsify_next::Tsify;

/// Origin of a dust grain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tsify", derive(Tsify))]
#[cfg_attr(feature = "tsify", tsify(into_wasm_abi, from_wasm_abi))]
#[serde(rename_all = "snake_case")]
pub enum SourceFamily {
    /// Collisional debris from the main asteroid belt; slow, low inclination
    Asteroidal,
    /// Released by active and decaying comets; faster, moderately inclined
    Cometary,
    /// Galactic grains crossing the solar system; fastest, no preferred plane
    Interstellar,
}

impl SourceFamily {
    /// All families in their canonical order.
    pub const ALL: [SourceFamily; 3] = [
        SourceFamily::Asteroidal,
        SourceFamily::Cometary,
        SourceFamily::Interstellar,
    ];

    /// Position of the family in [`SourceFamily::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Self::Asteroidal => 0,
            Self::Cometary => 1,
            Self::Interstellar => 2,
        }
    }

    /// Lowercase identifier used in exports and configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asteroidal => "asteroidal",
            Self::Cometary => "cometary",
            Self::Interstellar => "interstellar",
        }
    }
}

impl std::fmt::Display for SourceFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
