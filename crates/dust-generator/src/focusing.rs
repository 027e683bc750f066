//! Gravitational focusing and entry conditions at the top of atmosphere.
//!
//! A grain approaching with speed v∞ on a straight line offset by b from
//! Earth's centre is pulled onto a hyperbola. It reaches the sphere of radius
//! R = R⊕ + 100 km whenever
//!
//! b ≤ b_max = R·sqrt(1 + v_esc²/v∞²)
//!
//! which enlarges the geometric cross-section πR² by the focusing factor
//! 1 + v_esc²/v∞². Energy conservation gives the speed at R,
//!
//! v_entry = sqrt(v∞² + v_esc²)
//!
//! and angular momentum conservation, b·v∞ = R·v_entry·sin θ, the angle θ
//! between the trajectory and the local vertical at R.

use rand::Rng;
use rand_chacha::ChaChaRng;
use units::{Length, Mass, Velocity, escape_velocity};

use crate::constants::{
    EM_RADIUS_THRESHOLD_M, G_SI, HIGH_ENERGY_THRESHOLD_M_S, earth_mass, toa_radius,
};
use crate::sampling::SampledParticle;

/// Entry state of one grain at the top of atmosphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryState {
    /// Largest impact parameter that still reaches R
    pub capture_radius: Length,
    pub impact_parameter: Length,
    pub entry_velocity: Velocity,
    /// Angle from local vertical, in [0°, 90°]
    pub entry_angle_deg: f64,
}

/// Focusing calculator for a spherical body evaluated at radius R.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravitationalFocusing {
    radius: Length,
    mass: Mass,
    escape_velocity: Velocity,
}

impl GravitationalFocusing {
    pub fn new(mass: Mass, radius: Length) -> Self {
        Self {
            radius,
            mass,
            escape_velocity: escape_velocity(mass, radius),
        }
    }

    /// Earth evaluated at the 100 km top of atmosphere
    pub fn earth() -> Self {
        Self::new(earth_mass(), toa_radius())
    }

    pub fn radius(&self) -> Length {
        self.radius
    }

    /// Gravitational parameter GM in m³/s²
    pub fn gm(&self) -> f64 {
        G_SI * self.mass.to_kg()
    }

    pub fn escape_velocity(&self) -> Velocity {
        self.escape_velocity
    }

    /// b_max = R·sqrt(1 + v_esc²/v∞²); `v_inf` must be positive.
    pub fn capture_radius(&self, v_inf: Velocity) -> Length {
        self.radius * (1.0 + self.escape_velocity.squared() / v_inf.squared()).sqrt()
    }

    /// v_entry = sqrt(v∞² + v_esc²)
    pub fn entry_velocity(&self, v_inf: Velocity) -> Velocity {
        Velocity::from_m_per_sec((v_inf.squared() + self.escape_velocity.squared()).sqrt())
    }

    /// Angle between the deflected trajectory and the local vertical at R,
    /// in degrees.
    ///
    /// sin θ = b·v∞ / (R·v_entry), which reaches 1 exactly at b = b_max.
    pub fn entry_angle_deg(&self, impact_parameter: Length, v_inf: Velocity) -> f64 {
        let v_entry = self.entry_velocity(v_inf);
        let sin_theta = (impact_parameter / self.radius) * (v_inf / v_entry);
        sin_theta.clamp(0.0, 1.0).asin().to_degrees()
    }

    /// Impact parameter uniform in area over the capture disk, b = b_max·sqrt(u)
    pub fn sample_impact_parameter(&self, rng: &mut ChaChaRng, capture_radius: Length) -> Length {
        capture_radius * rng.random::<f64>().sqrt()
    }

    /// Focus a sampled grain, drawing its impact parameter from `rng`.
    pub fn apply(&self, rng: &mut ChaChaRng, particle: &SampledParticle) -> EntryState {
        let capture_radius = self.capture_radius(particle.v_inf);
        let impact_parameter = self.sample_impact_parameter(rng, capture_radius);
        EntryState {
            capture_radius,
            impact_parameter,
            entry_velocity: self.entry_velocity(particle.v_inf),
            entry_angle_deg: self.entry_angle_deg(impact_parameter, particle.v_inf),
        }
    }
}

/// Grains below 0.5 μm are strongly affected by electromagnetic forces
pub fn is_em_sensitive(radius: Length) -> bool {
    radius.to_m() < EM_RADIUS_THRESHOLD_M
}

/// Entries faster than 50 km/s
pub fn is_high_energy(entry_velocity: Velocity) -> bool {
    entry_velocity.to_m_per_sec() > HIGH_ENERGY_THRESHOLD_M_S
}
