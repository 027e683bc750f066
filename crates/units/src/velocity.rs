use crate::length::Length;
use crate::mass::Mass;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Newtonian gravitational constant in m³ kg⁻¹ s⁻²
pub const G_SI: f64 = 6.67430e-11;

const KM_PER_SEC_TO_M_PER_SEC: f64 = 1e3;

/// Escape velocity at distance `radius` from the centre of a body of `mass`.
///
/// v_esc = sqrt(2GM / r)
///
/// # Examples
/// ```
/// use units::{Length, Mass, escape_velocity};
///
/// // Earth surface escape velocity is ~11.19 km/s
/// let v = escape_velocity(Mass::from_earth_masses(1.0), Length::from_km(6371.0));
/// assert!((v.to_km_per_sec() - 11.19).abs() < 0.01);
/// ```
pub fn escape_velocity(mass: Mass, radius: Length) -> Velocity {
    Velocity::from_m_per_sec((2.0 * G_SI * mass.to_kg() / radius.to_m()).sqrt())
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Velocity(f64); // Base unit: m/s

impl Velocity {
    pub fn zero() -> Self {
        Self(0.0)
    }

    pub fn from_m_per_sec(value: f64) -> Self {
        Self(value)
    }

    pub fn from_km_per_sec(value: f64) -> Self {
        Self(value * KM_PER_SEC_TO_M_PER_SEC)
    }

    pub fn to_m_per_sec(&self) -> f64 {
        self.0
    }

    pub fn to_km_per_sec(&self) -> f64 {
        self.0 / KM_PER_SEC_TO_M_PER_SEC
    }

    /// Speed squared in m²/s², the quantity energy conservation works in
    pub fn squared(&self) -> f64 {
        self.0 * self.0
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }
}

impl Add for Velocity {
    type Output = Velocity;

    fn add(self, rhs: Velocity) -> Velocity {
        Velocity(self.0 + rhs.0)
    }
}

impl Sub for Velocity {
    type Output = Velocity;

    fn sub(self, rhs: Velocity) -> Velocity {
        Velocity(self.0 - rhs.0)
    }
}

impl Mul<f64> for Velocity {
    type Output = Velocity;

    fn mul(self, rhs: f64) -> Velocity {
        Velocity(self.0 * rhs)
    }
}

impl Div<f64> for Velocity {
    type Output = Velocity;

    fn div(self, rhs: f64) -> Velocity {
        Velocity(self.0 / rhs)
    }
}

/// Velocity ratio is dimensionless
impl Div for Velocity {
    type Output = f64;

    fn div(self, rhs: Self) -> f64 {
        self.0 / rhs.0
    }
}
