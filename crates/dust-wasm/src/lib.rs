//! WASM bindings for the cosmic dust generator.
//!
//! The service and its run store live in thread-local storage (WASM is
//! single-threaded), so the last simulation stays available to `export_csv`
//! and `diagnostics` until the next `simulate` call replaces it.
//!
//! ## Quick Start (JavaScript)
//!
//! ```javascript
//! import init, { simulate, diagnostics, export_csv } from 'dust-wasm';
//!
//! await init();
//!
//! const response = simulate({ N: 100000, r_min: 1e-7, r_max: 1e-3, q: 3.0, seed: 42 });
//! if (response.success) {
//!     console.log(`${response.total_particles} grains, ${response.sampled_particles} shown`);
//! }
//!
//! const csv = export_csv();
//! ```

use std::cell::RefCell;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use dust_generator::GeneratorConfig;
use dust_store::{DustService, ServiceConfig, SimulateRequest};

// Types referenced by the derived declarations but not declared by them
#[wasm_bindgen(typescript_custom_section)]
const TS_EXTRA_TYPES: &'static str = r#"
/** UUID string */
export type Uuid = string;
"#;

// =============================================================================
// Serialization helpers
// =============================================================================

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value
        .serialize(&serializer)
        .map_err(|e| JsError::new(&e.to_string()))
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, JsError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsError::new(&e.to_string()))
}

fn respond<T: Serialize, E: Serialize>(result: Result<T, E>) -> Result<JsValue, JsError> {
    match result {
        Ok(body) => to_js(&body),
        Err(body) => to_js(&body),
    }
}

// =============================================================================
// Thread-local service
// =============================================================================

thread_local! {
    static SERVICE: RefCell<DustService> = RefCell::new(wasm_service());
}

/// rayon has no thread pool in the browser, so generation runs sequentially
fn wasm_service() -> DustService {
    let config = ServiceConfig {
        generator: GeneratorConfig::default().sequential(),
        ..ServiceConfig::default()
    };
    DustService::new(config, Default::default())
}

/// Replace the service configuration, e.g. the display limit or population
/// tables. Drops the stored run.
///
/// # Arguments
/// * `config` - A `ServiceConfig` object (camelCase keys)
#[wasm_bindgen]
pub fn configure(config: JsValue) -> Result<(), JsError> {
    let mut config: ServiceConfig = from_js(config)?;
    config.generator.parallel = false;
    config
        .generator
        .validate()
        .map_err(|e| JsError::new(&e.to_string()))?;
    SERVICE.with(|service| {
        *service.borrow_mut() = DustService::new(config, Default::default());
    });
    Ok(())
}

// =============================================================================
// Simulation
// =============================================================================

/// Run a simulation and keep it for export.
///
/// Missing request fields fall back to N = 100 000, r_min = 0.1 μm,
/// r_max = 1 mm, q = 3.
///
/// # Returns
/// `{ success: true, total_particles, sampled_particles, particles, diagnostics, seed, run_id }`
/// or `{ success: false, kind, error }` with `kind` one of `"validation"`,
/// `"no_run"` or `"internal"`.
#[wasm_bindgen]
pub fn simulate(request: JsValue) -> Result<JsValue, JsError> {
    let request: SimulateRequest = if request.is_undefined() || request.is_null() {
        SimulateRequest::default()
    } else {
        from_js(request)?
    };
    SERVICE.with(|service| respond(service.borrow().simulate(&request)))
}

/// Diagnostics of the last simulation.
#[wasm_bindgen]
pub fn diagnostics() -> Result<JsValue, JsError> {
    SERVICE.with(|service| respond(service.borrow().diagnostics()))
}

/// The last simulation as a CSV document.
#[wasm_bindgen]
pub fn export_csv() -> Result<String, JsError> {
    SERVICE.with(|service| {
        service
            .borrow()
            .export_csv()
            .map_err(|e| JsError::new(&e.error))
    })
}
