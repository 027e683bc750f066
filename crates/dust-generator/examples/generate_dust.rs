//! Generate a dust population and print its diagnostics
//!
//! Usage: RUST_LOG=debug cargo run -p dust-generator --example generate_dust [count] [seed]

use dust_generator::{DustGenerator, SimulationParams, aggregate};

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let count = args
        .next()
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(100_000);
    let seed = args.next().and_then(|arg| arg.parse().ok()).unwrap_or(42);

    let params = SimulationParams {
        particle_count: count,
        ..SimulationParams::default()
    }
    .with_seed(seed);

    let generator = DustGenerator::default();
    let run = match generator.generate(&params) {
        Ok(run) => run,
        Err(err) => {
            eprintln!("❌ {}", err);
            std::process::exit(1);
        }
    };
    let diagnostics = aggregate(&run.particles);

    println!("Seed: {}", run.seed);
    println!("Particles: {}", diagnostics.total_particles);
    println!("Total mass: {:.3e} kg\n", diagnostics.total_mass_kg);

    println!("Source families:");
    for (family, n) in &diagnostics.source_distribution {
        println!("  {:<13} {:>8}", family.as_str(), n);
    }
    println!("Materials:");
    for (material, n) in &diagnostics.material_distribution {
        println!("  {:<13} {:>8}", material.as_str(), n);
    }

    if let Some(size) = diagnostics.size_stats {
        println!(
            "\nRadius: min {:.3} μm, median {:.3} μm, max {:.1} μm",
            size.min * 1e6,
            size.median * 1e6,
            size.max * 1e6
        );
    }
    if let Some(v) = diagnostics.v_entry_stats {
        println!(
            "Entry speed: min {:.2} km/s, mean {:.2} km/s, max {:.2} km/s",
            v.min / 1e3,
            v.mean / 1e3,
            v.max / 1e3
        );
    }
    if let Some(angle) = diagnostics.entry_angle_stats {
        println!("Entry angle: mean {:.1}°, median {:.1}°", angle.mean, angle.median);
    }
    println!(
        "\nEM-sensitive: {}, high-energy: {}",
        diagnostics.em_particles, diagnostics.high_energy_particles
    );
}
