//! Summary statistics over a generated population.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use dust_population::{Material, SourceFamily};

#[cfg(feature = "tsify")]
use tsify_next::Tsify;

use crate::particle::Particle;

/// Order statistics and mean of one particle attribute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tsify", derive(Tsify))]
#[cfg_attr(feature = "tsify", tsify(into_wasm_abi, from_wasm_abi))]
pub struct Summary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
}

impl Summary {
    /// Summarize `values`; `None` when there are none.
    pub fn from_values(mut values: Vec<f64>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        values.sort_unstable_by(f64::total_cmp);
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        Some(Self {
            min: values[0],
            max: values[values.len() - 1],
            mean,
            median: percentile(&values, 50.0)?,
        })
    }
}

/// Percentile `p` (0–100) of already sorted values, interpolating linearly
/// between neighbouring ranks.
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=100.0).contains(&p) {
        return None;
    }
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Diagnostics of one run.
///
/// An empty population yields `total_particles == 0`, no statistics blocks and
/// zero counts; see [`DiagnosticsSnapshot::is_empty`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tsify", derive(Tsify))]
#[cfg_attr(feature = "tsify", tsify(into_wasm_abi, from_wasm_abi))]
pub struct DiagnosticsSnapshot {
    pub total_particles: usize,
    /// Radius (m)
    pub size_stats: Option<Summary>,
    /// Speed at infinity (m/s)
    pub v_inf_stats: Option<Summary>,
    /// Entry speed (m/s)
    pub v_entry_stats: Option<Summary>,
    /// Entry angle from vertical (degrees)
    pub entry_angle_stats: Option<Summary>,
    pub source_distribution: BTreeMap<SourceFamily, usize>,
    pub material_distribution: BTreeMap<Material, usize>,
    pub em_particles: usize,
    pub high_energy_particles: usize,
    pub total_mass_kg: f64,
}

impl DiagnosticsSnapshot {
    /// Snapshot of a population without particles
    pub fn empty() -> Self {
        Self {
            total_particles: 0,
            size_stats: None,
            v_inf_stats: None,
            v_entry_stats: None,
            entry_angle_stats: None,
            source_distribution: SourceFamily::ALL.iter().map(|&f| (f, 0)).collect(),
            material_distribution: Material::ALL.iter().map(|&m| (m, 0)).collect(),
            em_particles: 0,
            high_energy_particles: 0,
            total_mass_kg: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_particles == 0
    }

    pub fn family_count(&self, family: SourceFamily) -> usize {
        self.source_distribution.get(&family).copied().unwrap_or(0)
    }

    pub fn material_count(&self, material: Material) -> usize {
        self.material_distribution.get(&material).copied().unwrap_or(0)
    }
}

/// Compute the diagnostics of a completed population.
pub fn aggregate(particles: &[Particle]) -> DiagnosticsSnapshot {
    let mut snapshot = DiagnosticsSnapshot::empty();
    if particles.is_empty() {
        return snapshot;
    }

    snapshot.total_particles = particles.len();
    for p in particles {
        *snapshot.source_distribution.entry(p.source_family).or_insert(0) += 1;
        *snapshot.material_distribution.entry(p.material).or_insert(0) += 1;
        snapshot.em_particles += usize::from(p.em_flag);
        snapshot.high_energy_particles += usize::from(p.high_energy_flag);
        snapshot.total_mass_kg += p.m;
    }

    // One buffer at a time keeps peak memory at a single column
    snapshot.size_stats = summarize(particles, |p| p.r);
    snapshot.v_inf_stats = summarize(particles, |p| p.v_inf);
    snapshot.v_entry_stats = summarize(particles, |p| p.v_entry);
    snapshot.entry_angle_stats = summarize(particles, |p| p.entry_angle);

    snapshot
}

fn summarize(particles: &[Particle], value: impl Fn(&Particle) -> f64) -> Option<Summary> {
    Summary::from_values(particles.iter().map(value).collect())
}
