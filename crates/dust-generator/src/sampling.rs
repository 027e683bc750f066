//! Particle sampling: source family, size, material, speed and direction.
//!
//! All draws come from a [`ChaChaRng`] supplied by the caller. Within one
//! particle the draws happen in a fixed order:
//!
//! 1. source family
//! 2. radius
//! 3. material
//! 4. speed at infinity (more than one draw when a truncated Gaussian redraws)
//! 5. approach direction: azimuth, then polar coordinate (redrawn while a
//!    latitude kernel falls outside ±90°)
//!
//! The focusing and impact stages continue on the same stream afterwards.

use std::f64::consts::{PI, TAU};

use nalgebra::Vector3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;
use units::{Density, Length, Mass, Velocity};
use uuid::Uuid;

use dust_population::{
    AngularSpread, Material, PopulationError, PopulationModel, SourceFamily, VelocityRange,
    VelocityShape,
};

use crate::config::GeneratorConfig;
use crate::error::ValidationError;
use crate::params::SimulationParams;

// =============================================================================
// Random streams
// =============================================================================

/// Independent random stream of one particle.
///
/// Streams share the ChaCha key derived from `seed` and differ in the stream
/// id, so particle `index` always sees the same numbers regardless of how many
/// draws other particles made or in which order they were generated.
pub fn particle_stream(seed: u64, index: usize) -> ChaChaRng {
    let mut rng = ChaChaRng::seed_from_u64(seed);
    rng.set_stream(index as u64);
    rng
}

/// Largest seed that survives a round trip through a JavaScript number
pub const MAX_SAFE_SEED: u64 = (1 << 53) - 1;

/// Fresh run seed taken from a random UUID, kept within 53 bits
pub fn fresh_seed() -> u64 {
    Uuid::new_v4().as_u64_pair().0 >> 11
}

// =============================================================================
// Distribution primitives
// =============================================================================

/// Sample uniformly from [lo, hi)
pub fn sample_uniform(rng: &mut ChaChaRng, lo: f64, hi: f64) -> f64 {
    lo + rng.random::<f64>() * (hi - lo)
}

/// Sample from a Gaussian (normal) distribution using the Box-Muller transform
///
/// Uses 1 − u for the logarithm so the result is always finite.
pub fn sample_gaussian(rng: &mut ChaChaRng, mean: f64, std_dev: f64) -> f64 {
    let u1: f64 = rng.random();
    let u2: f64 = rng.random();
    let z = (-2.0 * (1.0 - u1).ln()).sqrt() * (TAU * u2).cos();
    mean + std_dev * z
}

/// Discrete distribution over a fixed set of outcomes.
///
/// Cumulative weights are computed once, so each draw costs one random number
/// and a binary search.
#[derive(Debug, Clone)]
pub struct Categorical<T> {
    outcomes: Vec<T>,
    cumulative: Vec<f64>,
}

impl<T: Copy> Categorical<T> {
    /// Build from (outcome, weight) pairs. Returns `None` when there are no
    /// outcomes or the weights do not add up to a positive total.
    pub fn new(choices: impl IntoIterator<Item = (T, f64)>) -> Option<Self> {
        let mut outcomes = Vec::new();
        let mut cumulative = Vec::new();
        let mut total = 0.0;
        for (outcome, weight) in choices {
            total += weight;
            outcomes.push(outcome);
            cumulative.push(total);
        }
        if outcomes.is_empty() || total.is_nan() || total <= 0.0 {
            return None;
        }
        Some(Self {
            outcomes,
            cumulative,
        })
    }

    pub fn sample(&self, rng: &mut ChaChaRng) -> T {
        let total = self.cumulative[self.cumulative.len() - 1];
        let roll = rng.random::<f64>() * total;
        let index = self
            .cumulative
            .partition_point(|&c| c <= roll)
            .min(self.outcomes.len() - 1);
        self.outcomes[index]
    }
}

/// Truncated power-law size distribution, dN/dr ∝ r^(−q) on [r_min, r_max].
///
/// Sampling inverts the CDF exactly. For q ≠ 1:
///
/// r = [r_min^(1−q) + u·(r_max^(1−q) − r_min^(1−q))]^(1/(1−q))
///
/// evaluated in a rescaled form (`exp_m1`/`ln_1p`) that neither overflows for
/// steep laws nor loses precision as q approaches 1. For q = 1 the law is
/// log-uniform, r = r_min·(r_max/r_min)^u.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerLawRadius {
    r_min: f64,
    r_max: f64,
    q: f64,
}

impl PowerLawRadius {
    /// Bounds must satisfy 0 < r_min < r_max; see [`SimulationParams::validate`].
    pub fn new(r_min: Length, r_max: Length, q: f64) -> Self {
        Self {
            r_min: r_min.to_m(),
            r_max: r_max.to_m(),
            q,
        }
    }

    pub fn min(&self) -> Length {
        Length::from_m(self.r_min)
    }

    pub fn max(&self) -> Length {
        Length::from_m(self.r_max)
    }

    pub fn index(&self) -> f64 {
        self.q
    }

    /// Radius for a given quantile u ∈ [0, 1)
    pub fn quantile(&self, u: f64) -> Length {
        let log_ratio = self.log_ratio();
        let e = 1.0 - self.q;

        let r = if e == 0.0 {
            self.r_min * (u * log_ratio).exp()
        } else {
            let k = e * log_ratio;
            if k <= 0.0 {
                // (r/r_min)^e = 1 + u·((r_max/r_min)^e − 1)
                self.r_min * ((u * k.exp_m1()).ln_1p() / e).exp()
            } else {
                // (r/r_max)^e = 1 + (1 − u)·((r_min/r_max)^e − 1)
                self.r_max * (((1.0 - u) * (-k).exp_m1()).ln_1p() / e).exp()
            }
        };

        // Rounding in exp/ln may step a few ulps past the bounds
        Length::from_m(r.clamp(self.r_min, self.r_max))
    }

    /// Fraction of the population with radius ≤ r
    pub fn cdf(&self, r: Length) -> f64 {
        let r = r.to_m().clamp(self.r_min, self.r_max);
        let e = 1.0 - self.q;
        if e == 0.0 {
            (r.ln() - self.r_min.ln()) / self.log_ratio()
        } else {
            let k = e * self.log_ratio();
            (e * (r.ln() - self.r_min.ln())).exp_m1() / k.exp_m1()
        }
    }

    /// ln(r_max / r_min) without forming the ratio, which overflows for wide bounds
    fn log_ratio(&self) -> f64 {
        self.r_max.ln() - self.r_min.ln()
    }

    pub fn sample(&self, rng: &mut ChaChaRng) -> Length {
        self.quantile(rng.random())
    }
}

/// Speed at infinity inside a family's range
pub fn sample_speed(rng: &mut ChaChaRng, range: &VelocityRange, shape: VelocityShape) -> Velocity {
    let lo = range.min.to_m_per_sec();
    let hi = range.max.to_m_per_sec();
    match shape {
        VelocityShape::Uniform => Velocity::from_m_per_sec(sample_uniform(rng, lo, hi)),
        VelocityShape::TruncatedGaussian => {
            if hi == lo {
                return range.min;
            }
            let mean = range.midpoint().to_m_per_sec();
            let std_dev = (hi - lo) / 4.0;
            loop {
                let v = sample_gaussian(rng, mean, std_dev);
                if (lo..=hi).contains(&v) {
                    return Velocity::from_m_per_sec(v);
                }
            }
        }
    }
}

/// Unit vector pointing from Earth towards where the grain comes from.
///
/// The frame is geocentric with z towards ecliptic north.
pub fn sample_direction(rng: &mut ChaChaRng, spread: &AngularSpread) -> Vector3<f64> {
    let azimuth = sample_uniform(rng, 0.0, TAU);
    let (sin_lat, cos_lat) = match spread {
        AngularSpread::Isotropic => {
            let z = sample_uniform(rng, -1.0, 1.0);
            (z, (1.0 - z * z).max(0.0).sqrt())
        }
        AngularSpread::EclipticConcentrated { sigma_deg } | AngularSpread::Moderate { sigma_deg } => {
            let latitude = sample_ecliptic_latitude(rng, *sigma_deg);
            latitude.sin_cos()
        }
    };
    Vector3::new(cos_lat * azimuth.cos(), cos_lat * azimuth.sin(), sin_lat).normalize()
}

/// Ecliptic latitude in radians from a zero-mean normal kernel of width
/// `sigma_deg`, redrawn until it lies within ±90°.
pub fn sample_ecliptic_latitude(rng: &mut ChaChaRng, sigma_deg: f64) -> f64 {
    loop {
        let latitude = sample_gaussian(rng, 0.0, sigma_deg.to_radians());
        if latitude.abs() <= PI / 2.0 {
            return latitude;
        }
    }
}

// =============================================================================
// Particle sampler
// =============================================================================

/// A grain as drawn from the source population, before any Earth physics.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledParticle {
    pub family: SourceFamily,
    pub radius: Length,
    pub material: Material,
    pub density: Density,
    pub mass: Mass,
    pub v_inf: Velocity,
    /// Unit vector from Earth towards the grain's origin
    pub approach_direction: Vector3<f64>,
}

/// Draws independent grains from a [`PopulationModel`].
///
/// # Example
/// ```
/// use dust_generator::{GeneratorConfig, ParticleSampler, SimulationParams};
/// use units::Length;
///
/// let config = GeneratorConfig::default();
/// let params = SimulationParams::new(10, Length::from_microns(1.0), Length::from_m(1e-3), 3.5)
///     .with_seed(7);
/// let sampler = ParticleSampler::new(&config, &params).unwrap();
///
/// let grains = sampler.sample();
/// assert_eq!(grains.len(), 10);
/// assert_eq!(grains, sampler.sample());
/// ```
#[derive(Debug, Clone)]
pub struct ParticleSampler<'a> {
    model: &'a PopulationModel,
    radius: PowerLawRadius,
    families: Categorical<SourceFamily>,
    /// Indexed by [`SourceFamily::index`]
    materials: Vec<Categorical<Material>>,
    count: usize,
    seed: u64,
}

impl<'a> ParticleSampler<'a> {
    /// Validate `params` and prepare the sampling tables.
    ///
    /// Without a seed in `params` a fresh one is drawn; [`Self::seed`]
    /// reports it.
    pub fn new(
        config: &'a GeneratorConfig,
        params: &SimulationParams,
    ) -> Result<Self, ValidationError> {
        params.validate(config)?;
        let model = &config.population;

        let families = Categorical::new(model.family_weights())
            .ok_or(PopulationError::WeightsNotNormalized(0.0))?;

        let materials = model
            .profiles()
            .iter()
            .map(|profile| {
                Categorical::new(profile.materials.iter().map(|(&m, &p)| (m, p)))
                    .ok_or(PopulationError::EmptyMaterialTable(profile.family))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            model,
            radius: PowerLawRadius::new(params.r_min, params.r_max, params.q),
            families,
            materials,
            count: params.particle_count,
            seed: params.seed.unwrap_or_else(fresh_seed),
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn model(&self) -> &PopulationModel {
        self.model
    }

    pub fn radius_law(&self) -> &PowerLawRadius {
        &self.radius
    }

    /// Random stream of particle `index` in this run
    pub fn stream(&self, index: usize) -> ChaChaRng {
        particle_stream(self.seed, index)
    }

    /// Draw one grain, consuming the first draws of `rng`.
    pub fn sample_one(&self, rng: &mut ChaChaRng) -> SampledParticle {
        let family = self.families.sample(rng);
        let radius = self.radius.sample(rng);
        let material = self.materials[family.index()].sample(rng);
        let density = self.model.density(material);

        let profile = self.model.profile(family);
        let v_inf = sample_speed(rng, &profile.velocity_range, self.model.velocity_shape());
        let approach_direction = sample_direction(rng, &profile.angular_spread);

        SampledParticle {
            family,
            radius,
            material,
            density,
            mass: density.sphere_mass(radius),
            v_inf,
            approach_direction,
        }
    }

    /// Draw the whole run, particle `i` from stream `i`.
    pub fn sample(&self) -> Vec<SampledParticle> {
        (0..self.count)
            .map(|index| self.sample_one(&mut self.stream(index)))
            .collect()
    }
}
