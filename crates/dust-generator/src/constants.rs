//! Physical constants and classification thresholds.

use units::{EARTH_MASS_KG, Length, Mass, Velocity, escape_velocity};

pub use units::velocity::G_SI;

/// Mean Earth radius (6371 km)
pub const EARTH_RADIUS_M: f64 = units::length::EARTH_RADIUS_M;

/// Altitude at which entry parameters are evaluated (100 km)
pub const TOA_ALTITUDE_M: f64 = 100e3;

/// Gravitational parameter of the Earth, GM⊕ in m³/s²
pub const EARTH_GM: f64 = G_SI * EARTH_MASS_KG;

/// Grains smaller than this are flagged for electromagnetic effects (0.5 μm)
pub const EM_RADIUS_THRESHOLD_M: f64 = 0.5e-6;

/// Entry speeds above this are flagged as high energy (50 km/s)
pub const HIGH_ENERGY_THRESHOLD_M_S: f64 = 50e3;

pub fn earth_mass() -> Mass {
    Mass::from_kg(EARTH_MASS_KG)
}

/// Radius of the top-of-atmosphere sphere, R = R⊕ + 100 km
pub fn toa_radius() -> Length {
    Length::from_m(EARTH_RADIUS_M + TOA_ALTITUDE_M)
}

/// Escape velocity at the top of atmosphere (≈ 11.1 km/s)
pub fn toa_escape_velocity() -> Velocity {
    escape_velocity(earth_mass(), toa_radius())
}
