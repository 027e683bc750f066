//! Single-slot store for the latest run.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::StoreError;
use crate::run::SimulationRun;

/// Holds at most one [`SimulationRun`].
///
/// Runs are shared as `Arc`s: the lock is held only to swap or clone the
/// pointer, so readers never wait on a generation in progress and never see a
/// partially built run.
#[derive(Debug, Default)]
pub struct SimulationStore {
    current: Mutex<Option<Arc<SimulationRun>>>,
}

impl SimulationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish `run`, returning the run it replaces.
    pub fn replace(&self, run: Arc<SimulationRun>) -> Option<Arc<SimulationRun>> {
        self.slot().replace(run)
    }

    /// The latest run, or [`StoreError::NoRunAvailable`].
    pub fn current(&self) -> Result<Arc<SimulationRun>, StoreError> {
        self.slot().clone().ok_or(StoreError::NoRunAvailable)
    }

    pub fn is_empty(&self) -> bool {
        self.slot().is_none()
    }

    /// Drop the stored run.
    pub fn clear(&self) -> Option<Arc<SimulationRun>> {
        self.slot().take()
    }

    // The slot only ever holds a fully built Arc, so a poisoned lock still
    // guards a consistent value.
    fn slot(&self) -> MutexGuard<'_, Option<Arc<SimulationRun>>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
