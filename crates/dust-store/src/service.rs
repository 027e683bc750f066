//! Request boundary over the generator and the run store.

use std::io;
use std::sync::Arc;

use log::info;
use rand::SeedableRng;
use rand::seq::index;
use rand_chacha::ChaChaRng;
use serde::{Deserialize, Serialize};
use units::Length;
use uuid::Uuid;

#[cfg(feature = "tsify")]
use tsify_next::Tsify;

use dust_generator::{
    DiagnosticsSnapshot, DustGenerator, GeneratorConfig, Particle, SimulationParams,
    ValidationError,
};

use crate::error::{ErrorKind, ServiceError, StoreError};
use crate::export;
use crate::run::SimulationRun;
use crate::store::SimulationStore;

/// Seed of the display subsample when the run itself was unseeded
const DEFAULT_DISPLAY_SEED: u64 = 42;

/// Service configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceConfig {
    pub generator: GeneratorConfig,
    /// Largest number of particles returned by a simulate call
    pub display_limit: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            display_limit: 10_000,
        }
    }
}

impl ServiceConfig {
    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        let config: Self = serde_json::from_str(json)?;
        config.generator.validate()?;
        Ok(config)
    }
}

/// Simulate request as sent by a client.
///
/// Missing fields fall back to the documented defaults. The particle count is
/// signed so that negative requests are reported instead of failing to parse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tsify", derive(Tsify))]
#[cfg_attr(feature = "tsify", tsify(into_wasm_abi, from_wasm_abi))]
#[serde(default)]
pub struct SimulateRequest {
    #[serde(rename = "N", alias = "n")]
    pub n: i64,
    /// Minimum radius (m)
    pub r_min: f64,
    /// Maximum radius (m)
    pub r_max: f64,
    pub q: f64,
    pub seed: Option<u64>,
}

impl Default for SimulateRequest {
    fn default() -> Self {
        let params = SimulationParams::default();
        Self {
            n: params.particle_count as i64,
            r_min: params.r_min.to_m(),
            r_max: params.r_max.to_m(),
            q: params.q,
            seed: None,
        }
    }
}

impl SimulateRequest {
    pub fn to_params(&self) -> Result<SimulationParams, ValidationError> {
        if self.n < 1 {
            return Err(ValidationError::TooFewParticles(self.n));
        }
        let count = usize::try_from(self.n).unwrap_or(usize::MAX);
        let params = SimulationParams::new(
            count,
            Length::from_m(self.r_min),
            Length::from_m(self.r_max),
            self.q,
        );
        Ok(match self.seed {
            Some(seed) => params.with_seed(seed),
            None => params,
        })
    }
}

/// Successful simulate response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tsify", derive(Tsify))]
#[cfg_attr(feature = "tsify", tsify(into_wasm_abi, from_wasm_abi))]
pub struct SimulateResponse {
    pub success: bool,
    pub total_particles: usize,
    pub sampled_particles: usize,
    /// Display subsample of the run, in run order
    pub particles: Vec<Particle>,
    pub diagnostics: DiagnosticsSnapshot,
    pub seed: u64,
    pub run_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tsify", derive(Tsify))]
#[cfg_attr(feature = "tsify", tsify(into_wasm_abi, from_wasm_abi))]
pub struct DiagnosticsResponse {
    pub success: bool,
    pub diagnostics: DiagnosticsSnapshot,
}

/// Failed request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tsify", derive(Tsify))]
#[cfg_attr(feature = "tsify", tsify(into_wasm_abi, from_wasm_abi))]
pub struct ErrorResponse {
    pub success: bool,
    pub kind: ErrorKind,
    pub error: String,
}

impl From<ServiceError> for ErrorResponse {
    fn from(err: ServiceError) -> Self {
        Self {
            success: false,
            kind: err.kind(),
            error: err.public_message(),
        }
    }
}

/// Boundary service: simulate, export and diagnostics over a shared store.
///
/// The store is injected so that several services (or tests) can share it.
#[derive(Debug, Clone)]
pub struct DustService {
    generator: DustGenerator,
    store: Arc<SimulationStore>,
    display_limit: usize,
}

impl Default for DustService {
    fn default() -> Self {
        Self::new(ServiceConfig::default(), Arc::new(SimulationStore::new()))
    }
}

impl DustService {
    pub fn new(config: ServiceConfig, store: Arc<SimulationStore>) -> Self {
        Self {
            generator: DustGenerator::new(config.generator),
            store,
            display_limit: config.display_limit,
        }
    }

    pub fn store(&self) -> &Arc<SimulationStore> {
        &self.store
    }

    pub fn generator(&self) -> &DustGenerator {
        &self.generator
    }

    /// Generate a run and publish it to the store.
    ///
    /// Generation happens outside the store lock; on failure the previous run
    /// stays in place.
    pub fn run(&self, request: &SimulateRequest) -> Result<Arc<SimulationRun>, ServiceError> {
        let params = request.to_params()?;
        let population = self.generator.generate(&params)?;
        let run = Arc::new(SimulationRun::new(params, population));

        info!(
            "Published run {}: {} particles, {:.3e} kg, seed {}",
            run.id,
            run.diagnostics.total_particles,
            run.diagnostics.total_mass_kg,
            run.seed
        );
        self.store.replace(Arc::clone(&run));
        Ok(run)
    }

    /// Run a simulation and build the client response.
    pub fn simulate(&self, request: &SimulateRequest) -> Result<SimulateResponse, ErrorResponse> {
        let run = self.run(request)?;
        let particles = display_sample(&run.particles, self.display_limit, request.seed);

        Ok(SimulateResponse {
            success: true,
            total_particles: run.len(),
            sampled_particles: particles.len(),
            particles,
            diagnostics: run.diagnostics.clone(),
            seed: run.seed,
            run_id: run.id,
        })
    }

    /// Diagnostics of the latest run.
    pub fn diagnostics(&self) -> Result<DiagnosticsResponse, ErrorResponse> {
        let run = self.store.current().map_err(ServiceError::from)?;
        Ok(DiagnosticsResponse {
            success: true,
            diagnostics: run.diagnostics.clone(),
        })
    }

    /// Write the latest run as CSV.
    pub fn export_to<W: io::Write>(&self, writer: W) -> Result<(), ServiceError> {
        let run = self.store.current()?;
        export::export_csv(&run.particles, writer)?;
        Ok(())
    }

    /// The latest run as a CSV document.
    pub fn export_csv(&self) -> Result<String, ErrorResponse> {
        let run = self.store.current().map_err(ServiceError::from)?;
        export::export_csv_string(&run.particles)
            .map_err(|err| ErrorResponse::from(ServiceError::from(err)))
    }
}

/// At most `limit` particles, drawn without replacement and kept in run
/// order. The choice depends only on `seed` (or a fixed seed when absent).
pub fn display_sample(particles: &[Particle], limit: usize, seed: Option<u64>) -> Vec<Particle> {
    if particles.len() <= limit {
        return particles.to_vec();
    }

    let mut rng = ChaChaRng::seed_from_u64(seed.unwrap_or(DEFAULT_DISPLAY_SEED));
    let mut picked = index::sample(&mut rng, particles.len(), limit).into_vec();
    picked.sort_unstable();
    picked.into_iter().map(|i| particles[i].clone()).collect()
}
