//! Where a focused trajectory crosses the top of atmosphere.
//!
//! The undeflected line of approach runs parallel to −û at offset b·b̂, with
//! b̂ ⟂ û drawn at a uniform azimuth. Gravity bends it onto a hyperbola in the
//! (û, b̂) plane with
//!
//! e = sqrt(1 + (b·v∞²/GM)²),  p = b²·v∞²/GM
//!
//! Measured from the incoming asymptote, the crossing point of radius R sits
//! at the angle
//!
//! ψ = arccos(−1/e) − arccos((p/R − 1)/e)
//!
//! towards b̂. Without gravity this reduces to sin ψ = b/R, the near-side
//! intersection of a straight line with the sphere.

use std::f64::consts::TAU;

use nalgebra::Vector3;
use rand::Rng;
use rand_chacha::ChaChaRng;
use units::{Length, Velocity};

use crate::focusing::GravitationalFocusing;

/// Geocentric crossing point of a trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactPoint {
    /// Unit vector from Earth's centre to the crossing point
    pub position: Vector3<f64>,
    /// Latitude in [−90°, 90°]
    pub lat_deg: f64,
    /// Longitude in [−180°, 180°)
    pub lon_deg: f64,
}

impl ImpactPoint {
    pub fn from_position(position: Vector3<f64>) -> Self {
        let (lat_deg, lon_deg) = lat_lon_deg(&position);
        Self {
            position,
            lat_deg,
            lon_deg,
        }
    }
}

/// Orthonormal pair (e₁, e₂) spanning the plane perpendicular to `axis`.
pub fn perpendicular_basis(axis: &Vector3<f64>) -> (Vector3<f64>, Vector3<f64>) {
    let helper = if axis.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let e1 = (helper - axis * helper.dot(axis)).normalize();
    let e2 = axis.cross(&e1);
    (e1, e2)
}

/// Unit impact-offset direction b̂ ⟂ `approach` at a uniform azimuth.
pub fn sample_offset_direction(rng: &mut ChaChaRng, approach: &Vector3<f64>) -> Vector3<f64> {
    let azimuth = rng.random::<f64>() * TAU;
    let (e1, e2) = perpendicular_basis(approach);
    (e1 * azimuth.cos() + e2 * azimuth.sin()).normalize()
}

/// Angle ψ between the approach direction and the crossing point, radians.
pub fn crossing_angle(
    focusing: &GravitationalFocusing,
    impact_parameter: Length,
    v_inf: Velocity,
) -> f64 {
    let b = impact_parameter.to_m();
    if b <= 0.0 {
        // Head-on: the grain falls radially along the approach direction
        return 0.0;
    }

    let gm = focusing.gm();
    let radius = focusing.radius().to_m();
    let v2 = v_inf.squared();

    let eccentricity = (1.0 + (b * v2 / gm).powi(2)).sqrt();
    let semi_latus_rectum = b * b * v2 / gm;

    let asymptote = (-1.0 / eccentricity).acos();
    let cos_crossing = ((semi_latus_rectum / radius - 1.0) / eccentricity).clamp(-1.0, 1.0);
    (asymptote - cos_crossing.acos()).max(0.0)
}

/// Crossing point of a focused trajectory.
///
/// `approach` points from Earth towards the grain's origin and `offset` is the
/// unit impact-offset direction perpendicular to it.
pub fn crossing_point(
    focusing: &GravitationalFocusing,
    approach: &Vector3<f64>,
    offset: &Vector3<f64>,
    impact_parameter: Length,
    v_inf: Velocity,
) -> ImpactPoint {
    let psi = crossing_angle(focusing, impact_parameter, v_inf);
    let position = (approach * psi.cos() + offset * psi.sin()).normalize();
    ImpactPoint::from_position(position)
}

/// Draw the offset azimuth from `rng` and locate the crossing point.
pub fn locate(
    rng: &mut ChaChaRng,
    focusing: &GravitationalFocusing,
    approach: &Vector3<f64>,
    impact_parameter: Length,
    v_inf: Velocity,
) -> ImpactPoint {
    let offset = sample_offset_direction(rng, approach);
    crossing_point(focusing, approach, &offset, impact_parameter, v_inf)
}

/// Latitude and longitude in degrees of a direction from Earth's centre.
///
/// Longitude is folded into [−180°, 180°).
pub fn lat_lon_deg(direction: &Vector3<f64>) -> (f64, f64) {
    let unit = direction.normalize();
    let lat = unit.z.clamp(-1.0, 1.0).asin().to_degrees();
    let mut lon = unit.y.atan2(unit.x).to_degrees();
    if lon >= 180.0 {
        lon -= 360.0;
    }
    (lat, lon)
}
