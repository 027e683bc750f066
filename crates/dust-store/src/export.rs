//! CSV export of particle records.
//!
//! One header row, then one row per particle, columns in [`CSV_COLUMNS`]
//! order. Floats are written in their shortest round-tripping form, so
//! [`read_csv`] recovers the exported values exactly.

use std::io;

use serde::{Deserialize, Serialize};

use dust_generator::Particle;
use dust_population::{Material, SourceFamily};

use crate::error::StoreError;

/// Column names of an export, in order.
pub const CSV_COLUMNS: [&str; 17] = [
    "source_family",
    "r",
    "m",
    "material",
    "rho",
    "v_inf",
    "v_entry",
    "incoming_vector_x",
    "incoming_vector_y",
    "incoming_vector_z",
    "impact_parameter_b",
    "entry_angle",
    "lat",
    "lon",
    "em_flag",
    "high_energy_flag",
    "selected_for_atmosphere",
];

/// One exported row. Field order matches [`CSV_COLUMNS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvRow {
    pub source_family: SourceFamily,
    pub r: f64,
    pub m: f64,
    pub material: Material,
    pub rho: f64,
    pub v_inf: f64,
    pub v_entry: f64,
    pub incoming_vector_x: f64,
    pub incoming_vector_y: f64,
    pub incoming_vector_z: f64,
    pub impact_parameter_b: f64,
    pub entry_angle: f64,
    pub lat: f64,
    pub lon: f64,
    pub em_flag: bool,
    pub high_energy_flag: bool,
    pub selected_for_atmosphere: bool,
}

impl From<&Particle> for CsvRow {
    fn from(p: &Particle) -> Self {
        let [x, y, z] = p.incoming_unit_vector;
        Self {
            source_family: p.source_family,
            r: p.r,
            m: p.m,
            material: p.material,
            rho: p.rho,
            v_inf: p.v_inf,
            v_entry: p.v_entry,
            incoming_vector_x: x,
            incoming_vector_y: y,
            incoming_vector_z: z,
            impact_parameter_b: p.impact_parameter_b,
            entry_angle: p.entry_angle,
            lat: p.lat,
            lon: p.lon,
            em_flag: p.em_flag,
            high_energy_flag: p.high_energy_flag,
            selected_for_atmosphere: p.selected_for_atmosphere,
        }
    }
}

impl From<CsvRow> for Particle {
    fn from(row: CsvRow) -> Self {
        Self {
            source_family: row.source_family,
            r: row.r,
            m: row.m,
            material: row.material,
            rho: row.rho,
            v_inf: row.v_inf,
            v_entry: row.v_entry,
            incoming_unit_vector: [
                row.incoming_vector_x,
                row.incoming_vector_y,
                row.incoming_vector_z,
            ],
            impact_parameter_b: row.impact_parameter_b,
            entry_angle: row.entry_angle,
            lat: row.lat,
            lon: row.lon,
            em_flag: row.em_flag,
            high_energy_flag: row.high_energy_flag,
            selected_for_atmosphere: row.selected_for_atmosphere,
        }
    }
}

/// Write `particles` as CSV to `writer`.
///
/// The header is written even when there are no particles.
pub fn export_csv<W: io::Write>(particles: &[Particle], writer: W) -> Result<(), StoreError> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv.write_record(CSV_COLUMNS)?;
    for particle in particles {
        csv.serialize(CsvRow::from(particle))?;
    }
    csv.flush()?;
    Ok(())
}

/// Export `particles` into a string.
pub fn export_csv_string(particles: &[Particle]) -> Result<String, StoreError> {
    let mut buffer = Vec::new();
    export_csv(particles, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Parse an export back into rows.
pub fn read_csv<R: io::Read>(reader: R) -> Result<Vec<CsvRow>, StoreError> {
    let mut csv = csv::Reader::from_reader(reader);
    let rows = csv.deserialize().collect::<Result<Vec<CsvRow>, _>>()?;
    Ok(rows)
}
