//! A completed simulation run.

use std::time::Instant;

use log::debug;
use uuid::Uuid;

use dust_generator::{DiagnosticsSnapshot, GeneratedPopulation, Particle, SimulationParams, aggregate};

/// Parameters, particles and diagnostics of one simulate invocation.
///
/// Built in full before it is published, and never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRun {
    pub id: Uuid,
    /// Parameters as requested; `seed` stays `None` for unseeded runs
    pub params: SimulationParams,
    /// Seed actually used
    pub seed: u64,
    pub particles: Vec<Particle>,
    pub diagnostics: DiagnosticsSnapshot,
}

impl SimulationRun {
    pub fn new(params: SimulationParams, population: GeneratedPopulation) -> Self {
        Self::with_id(Uuid::new_v4(), params, population)
    }

    pub fn with_id(id: Uuid, params: SimulationParams, population: GeneratedPopulation) -> Self {
        let started = Instant::now();
        let diagnostics = aggregate(&population.particles);
        debug!(
            "Aggregated diagnostics of {} particles in {:.3} s",
            diagnostics.total_particles,
            started.elapsed().as_secs_f64()
        );

        Self {
            id,
            params,
            seed: population.seed,
            particles: population.particles,
            diagnostics,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
