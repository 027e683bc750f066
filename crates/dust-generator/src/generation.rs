//! Population generation pipeline.
//!
//! Runs sampling → focusing → impact geometry for every particle of a run.

use std::time::Instant;

use log::{debug, info};
use rand_chacha::ChaChaRng;

use dust_population::{PopulationModel, PopulationTables};

use crate::config::GeneratorConfig;
use crate::error::ValidationError;
use crate::focusing::{GravitationalFocusing, is_em_sensitive, is_high_energy};
use crate::impact;
use crate::params::SimulationParams;
use crate::particle::Particle;
use crate::sampling::{ParticleSampler, SampledParticle};

/// Particles of one run together with the seed that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPopulation {
    pub particles: Vec<Particle>,
    /// Seed actually used; equals the requested seed when one was given
    pub seed: u64,
}

/// Generates complete particle populations.
///
/// # Example
/// ```
/// use dust_generator::{DustGenerator, GeneratorConfig, SimulationParams};
/// use units::Length;
///
/// let generator = DustGenerator::new(GeneratorConfig::default());
/// let params = SimulationParams::new(1000, Length::from_m(1e-7), Length::from_m(1e-3), 3.0)
///     .with_seed(42);
///
/// let first = generator.generate(&params).unwrap();
/// let second = generator.generate(&params).unwrap();
/// assert_eq!(first, second);
/// ```
#[derive(Debug, Clone)]
pub struct DustGenerator {
    config: GeneratorConfig,
    focusing: GravitationalFocusing,
}

impl Default for DustGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl DustGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            focusing: GravitationalFocusing::earth(),
        }
    }

    /// Build a generator around unvalidated population tables.
    pub fn with_population_tables(
        config: GeneratorConfig,
        tables: PopulationTables,
    ) -> Result<Self, ValidationError> {
        let population = PopulationModel::new(tables)?;
        Ok(Self::new(config.with_population(population)))
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn focusing(&self) -> &GravitationalFocusing {
        &self.focusing
    }

    /// Generate a full population.
    ///
    /// Parameters are validated before any sampling; on error nothing is
    /// generated.
    pub fn generate(&self, params: &SimulationParams) -> Result<GeneratedPopulation, ValidationError> {
        let sampler = ParticleSampler::new(&self.config, params)?;
        info!(
            "Generating {} particles: r ∈ [{:e}, {:e}] m, q = {}, seed = {}",
            sampler.count(),
            params.r_min.to_m(),
            params.r_max.to_m(),
            params.q,
            sampler.seed()
        );

        let started = Instant::now();
        let particles = if self.config.parallel {
            self.generate_parallel(&sampler)
        } else {
            self.generate_sequential(&sampler)
        };
        debug!(
            "Generated {} particles in {:.3} s",
            particles.len(),
            started.elapsed().as_secs_f64()
        );

        Ok(GeneratedPopulation {
            particles,
            seed: sampler.seed(),
        })
    }

    /// Run the full pipeline for particle `index` of a run.
    pub fn simulate_particle(&self, sampler: &ParticleSampler<'_>, index: usize) -> Particle {
        let mut rng = sampler.stream(index);
        let sampled = sampler.sample_one(&mut rng);
        self.complete(&mut rng, &sampled)
    }

    /// Apply focusing and impact geometry to a sampled grain, continuing on
    /// the grain's own stream.
    pub fn complete(&self, rng: &mut ChaChaRng, sampled: &SampledParticle) -> Particle {
        let entry = self.focusing.apply(rng, sampled);
        let impact = impact::locate(
            rng,
            &self.focusing,
            &sampled.approach_direction,
            entry.impact_parameter,
            sampled.v_inf,
        );

        let incoming = -sampled.approach_direction.normalize();

        Particle {
            source_family: sampled.family,
            r: sampled.radius.to_m(),
            m: sampled.mass.to_kg(),
            material: sampled.material,
            rho: sampled.density.to_kg_per_m3(),
            v_inf: sampled.v_inf.to_m_per_sec(),
            v_entry: entry.entry_velocity.to_m_per_sec(),
            incoming_unit_vector: [incoming.x, incoming.y, incoming.z],
            impact_parameter_b: entry.impact_parameter.to_m(),
            entry_angle: entry.entry_angle_deg,
            lat: impact.lat_deg,
            lon: impact.lon_deg,
            em_flag: is_em_sensitive(sampled.radius),
            high_energy_flag: is_high_energy(entry.entry_velocity),
            // Only grains inside the capture disk are ever emitted
            selected_for_atmosphere: true,
        }
    }

    fn generate_sequential(&self, sampler: &ParticleSampler<'_>) -> Vec<Particle> {
        let total = sampler.count();
        let interval = self.config.progress_interval.max(1);
        (0..total)
            .map(|index| {
                if (index + 1) % interval == 0 {
                    debug!("Simulated {}/{} particles", index + 1, total);
                }
                self.simulate_particle(sampler, index)
            })
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn generate_parallel(&self, sampler: &ParticleSampler<'_>) -> Vec<Particle> {
        use rayon::prelude::*;

        (0..sampler.count())
            .into_par_iter()
            .map(|index| self.simulate_particle(sampler, index))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn generate_parallel(&self, sampler: &ParticleSampler<'_>) -> Vec<Particle> {
        debug!("Built without the `parallel` feature; generating sequentially");
        self.generate_sequential(sampler)
    }
}
