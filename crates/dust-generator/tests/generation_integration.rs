//! Integration tests for the full generation pipeline.
//!
//! These tests drive the public API the way a caller would: configuration,
//! parameters, generation and diagnostics.

use approx::assert_relative_eq;
use units::Length;

use dust_generator::{
    DustGenerator, GeneratorConfig, Material, SimulationParams, SourceFamily, VelocityShape,
    aggregate,
};

#[test]
fn full_pipeline_produces_consistent_diagnostics() {
    let generator = DustGenerator::default();
    let params = SimulationParams::new(10_000, Length::from_m(1e-7), Length::from_m(1e-3), 3.0)
        .with_seed(42);

    let run = generator.generate(&params).unwrap();
    let diagnostics = aggregate(&run.particles);

    println!("\n=== Diagnostics ===");
    println!("Particles: {}", diagnostics.total_particles);
    println!("Sources: {:?}", diagnostics.source_distribution);
    println!("Materials: {:?}", diagnostics.material_distribution);
    println!("EM-sensitive: {}", diagnostics.em_particles);
    println!("High-energy: {}", diagnostics.high_energy_particles);

    assert_eq!(diagnostics.total_particles, 10_000);
    assert_eq!(
        diagnostics.source_distribution.values().sum::<usize>(),
        10_000
    );
    assert_eq!(
        diagnostics.material_distribution.values().sum::<usize>(),
        10_000
    );

    let sources = |family| diagnostics.family_count(family) as f64 / 10_000.0;
    assert!((sources(SourceFamily::Asteroidal) - 0.5).abs() < 0.03);
    assert!((sources(SourceFamily::Cometary) - 0.3).abs() < 0.03);
    assert!((sources(SourceFamily::Interstellar) - 0.2).abs() < 0.03);

    // Expected material mix: 0.5·0.6 + 0.3·0.2 + 0.2·0.5 silicate, etc.
    let materials = |material| diagnostics.material_count(material) as f64 / 10_000.0;
    assert!((materials(Material::Silicate) - 0.46).abs() < 0.03);
    assert!((materials(Material::Carbonaceous) - 0.34).abs() < 0.03);
    assert!((materials(Material::IronNickel) - 0.20).abs() < 0.03);

    let v_entry = diagnostics.v_entry_stats.unwrap();
    let v_inf = diagnostics.v_inf_stats.unwrap();
    assert!(v_entry.min >= v_inf.min);
    assert!(v_entry.min > 11_000.0);
    assert!(v_inf.max <= 100_000.0);

    let angle = diagnostics.entry_angle_stats.unwrap();
    assert!(angle.min >= 0.0 && angle.max <= 90.0);
    // sin²θ = b²/b_max² is uniform, so the mean angle is π/4
    assert_relative_eq!(angle.mean, 45.0, epsilon = 1.5);

    let total_mass: f64 = run.particles.iter().map(|p| p.m).sum();
    assert_relative_eq!(diagnostics.total_mass_kg, total_mass, max_relative = 1e-12);
}

#[test]
fn configuration_file_drives_generation() {
    let config = GeneratorConfig::from_json_str(
        r#"{
            "maxParticles": 2000,
            "parallel": false,
            "population": {
                "families": [
                    {
                        "family": "asteroidal",
                        "weight": 0.0,
                        "velocityRange": { "min": 11000.0, "max": 25000.0 },
                        "materials": { "silicate": 1.0 },
                        "angularSpread": { "policy": "ecliptic_concentrated", "sigmaDeg": 10.0 }
                    },
                    {
                        "family": "cometary",
                        "weight": 1.0,
                        "velocityRange": { "min": 20000.0, "max": 70000.0 },
                        "materials": { "carbonaceous": 0.8, "silicate": 0.2 },
                        "angularSpread": { "policy": "moderate", "sigmaDeg": 30.0 }
                    },
                    {
                        "family": "interstellar",
                        "weight": 0.0,
                        "velocityRange": { "min": 30000.0, "max": 100000.0 },
                        "materials": { "silicate": 0.5, "carbonaceous": 0.5 },
                        "angularSpread": { "policy": "isotropic" }
                    }
                ],
                "densities": { "silicate": 3000.0, "carbonaceous": 1500.0, "iron_nickel": 7800.0 },
                "velocityShape": "truncated_gaussian"
            }
        }"#,
    )
    .unwrap();
    assert_eq!(config.population.velocity_shape(), VelocityShape::TruncatedGaussian);

    let generator = DustGenerator::new(config);
    let params = SimulationParams::new(2000, Length::from_m(1e-6), Length::from_m(1e-4), 3.5)
        .with_seed(7);
    let run = generator.generate(&params).unwrap();

    assert!(run.particles.iter().all(|p| p.source_family == SourceFamily::Cometary));
    assert!(run.particles.iter().all(|p| p.material != Material::IronNickel));
    assert!(run.particles.iter().all(|p| (20e3..=70e3).contains(&p.v_inf)));

    let over_limit = SimulationParams {
        particle_count: 2001,
        ..params
    };
    assert!(generator.generate(&over_limit).is_err());
}
