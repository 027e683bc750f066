use std::sync::Arc;

use approx::assert_relative_eq;
use dust_generator::{DustGenerator, GeneratorConfig, SimulationParams};
use units::Length;

use crate::error::{ErrorKind, ServiceError, StoreError};
use crate::service::{
    DustService, ErrorResponse, ServiceConfig, SimulateRequest, display_sample,
};
use crate::store::SimulationStore;

fn request(n: i64, seed: Option<u64>) -> SimulateRequest {
    SimulateRequest {
        n,
        r_min: 1e-7,
        r_max: 1e-3,
        q: 3.0,
        seed,
    }
}

fn service_with_limit(display_limit: usize) -> DustService {
    let config = ServiceConfig {
        display_limit,
        ..ServiceConfig::default()
    };
    DustService::new(config, Arc::new(SimulationStore::new()))
}

#[test]
fn simulate_returns_run_summary() {
    let service = DustService::default();
    let response = service.simulate(&request(1000, Some(42))).unwrap();

    assert!(response.success);
    assert_eq!(response.total_particles, 1000);
    assert_eq!(response.sampled_particles, 1000);
    assert_eq!(response.particles.len(), 1000);
    assert_eq!(response.diagnostics.total_particles, 1000);
    assert_eq!(response.seed, 42);
    assert_eq!(service.store().current().unwrap().id, response.run_id);
}

#[test]
fn large_runs_are_subsampled_for_display() {
    let service = service_with_limit(100);
    let response = service.simulate(&request(1000, Some(3))).unwrap();

    assert_eq!(response.total_particles, 1000);
    assert_eq!(response.sampled_particles, 100);
    assert_eq!(response.particles.len(), 100);

    // Same request, same display sample
    let again = service.simulate(&request(1000, Some(3))).unwrap();
    assert_eq!(again.particles, response.particles);

    // The full run stays in the store
    assert_eq!(service.store().current().unwrap().len(), 1000);
}

#[test]
fn display_sample_keeps_run_order() {
    let params = SimulationParams::new(500, Length::from_m(1e-7), Length::from_m(1e-3), 3.0)
        .with_seed(5);
    let particles = DustGenerator::default().generate(&params).unwrap().particles;

    let sample = display_sample(&particles, 50, None);
    assert_eq!(sample.len(), 50);
    assert_eq!(sample, display_sample(&particles, 50, Some(42)));

    let positions: Vec<usize> = sample
        .iter()
        .map(|s| particles.iter().position(|p| p == s).unwrap())
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));

    assert_eq!(display_sample(&particles, 1000, None), particles);
}

#[test]
fn invalid_requests_report_the_reason() {
    let service = DustService::default();

    let error = service.simulate(&request(-5, None)).unwrap_err();
    assert!(!error.success);
    assert_eq!(error.kind, ErrorKind::Validation);
    assert!(error.error.contains("at least 1"), "{}", error.error);
    assert!(error.error.contains("-5"), "{}", error.error);

    let equal_bounds = SimulateRequest {
        r_max: 1e-7,
        ..request(10, None)
    };
    let error = service.simulate(&equal_bounds).unwrap_err();
    assert_eq!(error.kind, ErrorKind::Validation);
    assert!(error.error.contains("strictly less"), "{}", error.error);

    // Nothing was published
    assert!(service.store().is_empty());
}

#[test]
fn failed_request_keeps_previous_run() {
    let service = DustService::default();
    let first = service.simulate(&request(100, Some(1))).unwrap();

    assert!(service.simulate(&request(0, None)).is_err());
    assert_eq!(service.store().current().unwrap().id, first.run_id);
}

#[test]
fn queries_without_a_run_are_state_errors() {
    let service = DustService::default();

    let diagnostics = service.diagnostics().unwrap_err();
    assert!(!diagnostics.success);
    assert_eq!(diagnostics.kind, ErrorKind::NoRun);
    assert!(diagnostics.error.contains("no simulation run"));

    let export = service.export_csv().unwrap_err();
    assert_eq!(export.kind, ErrorKind::NoRun);
    assert!(export.error.contains("no simulation run"));

    assert!(matches!(
        service.export_to(Vec::new()),
        Err(ServiceError::Store(StoreError::NoRunAvailable))
    ));
}

#[test]
fn diagnostics_and_export_follow_latest_run() {
    let service = DustService::default();
    service.simulate(&request(100, Some(1))).unwrap();
    service.simulate(&request(250, Some(2))).unwrap();

    let diagnostics = service.diagnostics().unwrap();
    assert!(diagnostics.success);
    assert_eq!(diagnostics.diagnostics.total_particles, 250);

    let csv = service.export_csv().unwrap();
    assert_eq!(csv.lines().count(), 251);
}

#[test]
fn services_share_an_injected_store() {
    let store = Arc::new(SimulationStore::new());
    let producer = DustService::new(ServiceConfig::default(), Arc::clone(&store));
    let consumer = DustService::new(ServiceConfig::default(), Arc::clone(&store));

    let response = producer.simulate(&request(50, Some(9))).unwrap();
    assert_eq!(consumer.diagnostics().unwrap().diagnostics, response.diagnostics);
}

#[test]
fn request_defaults_and_field_names() {
    let request: SimulateRequest = serde_json::from_str(r#"{ "N": 2000, "seed": 7 }"#).unwrap();
    assert_eq!(request.n, 2000);
    assert_relative_eq!(request.r_min, 0.1e-6);
    assert_relative_eq!(request.r_max, 1e-3);
    assert_relative_eq!(request.q, 3.0);
    assert_eq!(request.seed, Some(7));

    let defaults: SimulateRequest = serde_json::from_str("{}").unwrap();
    assert_eq!(defaults.n, 100_000);
    assert_eq!(defaults.seed, None);
}

#[test]
fn internal_errors_are_reported_generically() {
    let io = std::io::Error::other("disk on fire");
    let error = ServiceError::from(StoreError::from(io));

    assert!(!error.is_client_error());
    assert_eq!(error.kind(), ErrorKind::Internal);
    assert_eq!(error.public_message(), "internal error");

    let response = ErrorResponse::from(error);
    assert_eq!(response.kind, ErrorKind::Internal);
    assert_eq!(response.error, "internal error");
}

#[test]
fn unseeded_responses_carry_javascript_safe_seeds() {
    let service = DustService::default();

    for _ in 0..20 {
        let response = service.simulate(&request(10, None)).unwrap();
        assert!(response.seed <= (1 << 53) - 1, "seed {} too large", response.seed);
    }
}

#[test]
fn service_config_parses_limits() {
    let config = ServiceConfig::from_json_str(
        r#"{ "displayLimit": 500, "generator": { "maxParticles": 1000 } }"#,
    )
    .unwrap();
    assert_eq!(config.display_limit, 500);
    assert_eq!(config.generator.max_particles, 1000);
    assert_eq!(config.generator, GeneratorConfig { max_particles: 1000, ..GeneratorConfig::default() });

    assert!(matches!(
        ServiceConfig::from_json_str(r#"{ "generator": { "maxParticles": 0 } }"#),
        Err(StoreError::Config(_))
    ));
}
