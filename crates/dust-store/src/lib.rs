//! Holds the most recent simulation run and serves it to callers.
//!
//! [`SimulationStore`] owns the single "last run" of a process.
//! [`DustService`] is the request boundary: it validates input, generates a
//! population, publishes it to the store and answers export and diagnostics
//! queries. [`export`] writes and reads the CSV format.

pub mod error;
pub mod export;
pub mod run;
pub mod service;
pub mod store;

#[cfg(test)]
mod service_test;

pub use error::{ErrorKind, ServiceError, StoreError};
pub use export::{CSV_COLUMNS, CsvRow, export_csv, export_csv_string, read_csv};
pub use run::SimulationRun;
pub use service::{
    DiagnosticsResponse, DustService, ErrorResponse, ServiceConfig, SimulateRequest,
    SimulateResponse,
};
pub use store::SimulationStore;
