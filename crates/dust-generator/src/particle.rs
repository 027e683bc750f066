//! Completed particle record.

use serde::{Deserialize, Serialize};
use units::{Density, Length, Mass, Velocity};

use dust_population::{Material, SourceFamily};

#[cfg(feature = "tsify")]
use tsify_next::Tsify;

/// One dust grain at the moment it crosses the top of atmosphere.
///
/// Fields are plain SI numbers so the record can be handed to JavaScript or
/// written to CSV without conversion; the accessor methods wrap them in unit
/// types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tsify", derive(Tsify))]
#[cfg_attr(feature = "tsify", tsify(into_wasm_abi, from_wasm_abi))]
pub struct Particle {
    pub source_family: SourceFamily,
    /// Radius (m)
    pub r: f64,
    /// Mass (kg), (4/3)·π·r³·ρ
    pub m: f64,
    pub material: Material,
    /// Bulk density (kg/m³)
    pub rho: f64,
    /// Speed far from Earth (m/s)
    pub v_inf: f64,
    /// Speed at the top of atmosphere (m/s)
    pub v_entry: f64,
    /// Direction of travel before gravitational deflection (unit vector)
    pub incoming_unit_vector: [f64; 3],
    /// Offset of the undeflected trajectory from Earth's centre (m)
    pub impact_parameter_b: f64,
    /// Angle from local vertical at the top of atmosphere (degrees)
    pub entry_angle: f64,
    pub lat: f64,
    pub lon: f64,
    pub em_flag: bool,
    pub high_energy_flag: bool,
    pub selected_for_atmosphere: bool,
}

impl Particle {
    pub fn radius(&self) -> Length {
        Length::from_m(self.r)
    }

    pub fn mass(&self) -> Mass {
        Mass::from_kg(self.m)
    }

    pub fn density(&self) -> Density {
        Density::from_kg_per_m3(self.rho)
    }

    pub fn speed_at_infinity(&self) -> Velocity {
        Velocity::from_m_per_sec(self.v_inf)
    }

    pub fn entry_speed(&self) -> Velocity {
        Velocity::from_m_per_sec(self.v_entry)
    }

    pub fn impact_parameter(&self) -> Length {
        Length::from_m(self.impact_parameter_b)
    }

    /// Euclidean norm of the incoming direction; 1 up to rounding
    pub fn incoming_norm(&self) -> f64 {
        let [x, y, z] = self.incoming_unit_vector;
        (x * x + y * y + z * z).sqrt()
    }
}
