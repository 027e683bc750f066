use std::f64::consts::PI;

use approx::assert_relative_eq;
use nalgebra::Vector3;
use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use units::{Length, Mass, Velocity};

use dust_population::{PopulationModel, PopulationTables, SourceFamily};

use crate::config::GeneratorConfig;
use crate::focusing::GravitationalFocusing;
use crate::generation::DustGenerator;
use crate::impact::{
    crossing_angle, crossing_point, lat_lon_deg, perpendicular_basis, sample_offset_direction,
};
use crate::params::SimulationParams;

/// Population in which every grain comes from `family`
fn single_family_generator(family: SourceFamily) -> DustGenerator {
    let mut tables = PopulationTables::default();
    for profile in &mut tables.families {
        profile.weight = if profile.family == family { 1.0 } else { 0.0 };
    }
    let population = PopulationModel::new(tables).unwrap();
    DustGenerator::new(GeneratorConfig::default().with_population(population))
}

#[test]
fn head_on_grains_land_at_the_sub_radiant_point() {
    let focusing = GravitationalFocusing::earth();
    let v_inf = Velocity::from_km_per_sec(30.0);
    assert_eq!(crossing_angle(&focusing, Length::zero(), v_inf), 0.0);

    let approach = Vector3::new(0.0, 0.0, 1.0);
    let offset = Vector3::new(1.0, 0.0, 0.0);
    let point = crossing_point(&focusing, &approach, &offset, Length::zero(), v_inf);
    assert_relative_eq!(point.lat_deg, 90.0);
}

#[test]
fn weak_gravity_reduces_to_straight_line() {
    let focusing = GravitationalFocusing::new(Mass::from_kg(1.0), Length::from_km(6471.0));
    let v_inf = Velocity::from_km_per_sec(20.0);

    for fraction in [0.1, 0.5, 0.9] {
        let b = focusing.radius() * fraction;
        let psi = crossing_angle(&focusing, b, v_inf);
        assert_relative_eq!(psi, f64::asin(fraction), epsilon = 1e-9);
    }
}

#[test]
fn grazing_trajectories_wrap_past_the_limb() {
    let focusing = GravitationalFocusing::earth();
    let v_inf = Velocity::from_km_per_sec(20.0);
    let b_max = focusing.capture_radius(v_inf);

    let psi = crossing_angle(&focusing, b_max, v_inf).to_degrees();

    // Periapsis at R: ψ = arccos(−1/e) with e = 1 + R·v∞²/GM
    let e = 1.0 + focusing.radius().to_m() * v_inf.squared() / focusing.gm();
    assert_relative_eq!(psi, (-1.0 / e).acos().to_degrees(), epsilon = 1e-3);
    assert!(psi > 90.0 && psi < 100.0, "Grazing crossing angle {}", psi);
}

#[test]
fn crossing_angle_grows_with_impact_parameter() {
    let focusing = GravitationalFocusing::earth();
    let v_inf = Velocity::from_km_per_sec(40.0);
    let b_max = focusing.capture_radius(v_inf);

    let angles: Vec<f64> = (0..=20)
        .map(|step| crossing_angle(&focusing, b_max * (step as f64 / 20.0), v_inf))
        .collect();

    assert!(angles.windows(2).all(|pair| pair[1] >= pair[0]));
    assert!(angles.iter().all(|&psi| (0.0..PI).contains(&psi)));
}

#[test]
fn perpendicular_basis_is_orthonormal() {
    for axis in [
        Vector3::x(),
        Vector3::y(),
        Vector3::z(),
        Vector3::new(1.0, 2.0, -3.0).normalize(),
    ] {
        let (e1, e2) = perpendicular_basis(&axis);
        assert_relative_eq!(e1.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(e2.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(e1.dot(&axis), 0.0, epsilon = 1e-12);
        assert_relative_eq!(e2.dot(&axis), 0.0, epsilon = 1e-12);
        assert_relative_eq!(e1.dot(&e2), 0.0, epsilon = 1e-12);
    }
}

#[test]
fn crossing_point_lies_in_the_trajectory_plane() {
    let focusing = GravitationalFocusing::earth();
    let mut rng = ChaChaRng::seed_from_u64(42);
    let approach = Vector3::new(0.3, -0.4, 0.5).normalize();
    let offset = sample_offset_direction(&mut rng, &approach);
    let v_inf = Velocity::from_km_per_sec(30.0);
    let b = focusing.capture_radius(v_inf) * 0.6;

    assert_relative_eq!(offset.dot(&approach), 0.0, epsilon = 1e-12);

    let point = crossing_point(&focusing, &approach, &offset, b, v_inf);
    let psi = crossing_angle(&focusing, b, v_inf);
    assert_relative_eq!(point.position.norm(), 1.0, epsilon = 1e-12);
    assert_relative_eq!(point.position.dot(&approach), psi.cos(), epsilon = 1e-12);
    assert_relative_eq!(point.position.dot(&offset), psi.sin(), epsilon = 1e-12);
}

#[test]
fn lat_lon_of_axes() {
    assert_eq!(lat_lon_deg(&Vector3::x()), (0.0, 0.0));
    assert_eq!(lat_lon_deg(&Vector3::y()), (0.0, 90.0));
    assert_eq!(lat_lon_deg(&Vector3::new(-1.0, 0.0, 0.0)), (0.0, -180.0));

    let (lat, _) = lat_lon_deg(&Vector3::new(0.0, 0.0, -2.0));
    assert_relative_eq!(lat, -90.0);
    let (lat, lon) = lat_lon_deg(&Vector3::new(1.0, -1.0, 2f64.sqrt()));
    assert_relative_eq!(lat, 45.0, epsilon = 1e-12);
    assert_relative_eq!(lon, -45.0, epsilon = 1e-12);
}

#[test]
fn isotropic_grains_cover_the_globe_uniformly() {
    let generator = single_family_generator(SourceFamily::Interstellar);
    let params = SimulationParams::new(20_000, Length::from_m(1e-7), Length::from_m(1e-3), 3.0)
        .with_seed(42);
    let particles = generator.generate(&params).unwrap().particles;

    let n = particles.len() as f64;
    let sin_lat: Vec<f64> = particles.iter().map(|p| p.lat.to_radians().sin()).collect();
    let mean = sin_lat.iter().sum::<f64>() / n;
    let tropics = sin_lat.iter().filter(|s| s.abs() < 0.5).count() as f64 / n;
    let eastern = particles.iter().filter(|p| p.lon >= 0.0).count() as f64 / n;

    // sin(lat) is uniform on [−1, 1] for an isotropic flux
    assert!(mean.abs() < 0.02, "Mean sin(lat) {}", mean);
    assert!((tropics - 0.5).abs() < 0.02, "Fraction with |sin lat| < 0.5: {}", tropics);
    assert!((eastern - 0.5).abs() < 0.02, "Eastern fraction {}", eastern);
    assert!(particles.iter().all(|p| p.source_family == SourceFamily::Interstellar));
}

#[test]
fn ecliptic_families_arrive_near_the_ecliptic() {
    let generator = single_family_generator(SourceFamily::Asteroidal);
    let params = SimulationParams::new(5_000, Length::from_m(1e-7), Length::from_m(1e-3), 3.0)
        .with_seed(7);
    let particles = generator.generate(&params).unwrap().particles;

    let low = particles
        .iter()
        .filter(|p| p.incoming_unit_vector[2].abs() < 30f64.to_radians().sin())
        .count() as f64
        / particles.len() as f64;

    // 30° is three kernel widths
    assert!(low > 0.98, "Fraction within 30° of the ecliptic: {}", low);
}
