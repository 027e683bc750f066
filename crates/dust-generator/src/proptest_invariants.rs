//! Property-based tests for sampling and focusing invariants.

use proptest::prelude::*;
use units::{Length, Velocity};

use crate::focusing::GravitationalFocusing;
use crate::generation::DustGenerator;
use crate::impact::crossing_angle;
use crate::params::SimulationParams;
use crate::sampling::PowerLawRadius;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every sampled radius lies in [r_min, r_max], whatever the index.
    #[test]
    fn prop_radius_quantile_in_bounds(
        log_r_min in -9.0f64..-3.0,
        decades in 0.01f64..6.0,
        q in -2.0f64..6.0,
        u in 0.0f64..1.0,
    ) {
        let r_min = 10f64.powf(log_r_min);
        let r_max = r_min * 10f64.powf(decades);
        let law = PowerLawRadius::new(Length::from_m(r_min), Length::from_m(r_max), q);

        let r = law.quantile(u).to_m();
        prop_assert!(r.is_finite());
        prop_assert!(r >= r_min && r <= r_max, "r = {} outside [{}, {}]", r, r_min, r_max);
    }

    /// The inverse CDF never decreases.
    #[test]
    fn prop_radius_quantile_monotonic(
        q in -2.0f64..6.0,
        u in 0.0f64..0.99,
        du in 0.0f64..0.01,
    ) {
        let law = PowerLawRadius::new(Length::from_m(1e-7), Length::from_m(1e-3), q);
        prop_assert!(law.quantile(u + du) >= law.quantile(u));
    }

    /// Entry speed exceeds approach speed and the entry angle stays within
    /// [0°, 90°] anywhere on the capture disk.
    #[test]
    fn prop_focusing_bounds(
        v_inf_km_s in 1.0f64..120.0,
        fraction in 0.0f64..=1.0,
    ) {
        let focusing = GravitationalFocusing::earth();
        let v_inf = Velocity::from_km_per_sec(v_inf_km_s);
        let b_max = focusing.capture_radius(v_inf);
        let b = b_max * fraction;

        prop_assert!(b_max >= focusing.radius());
        prop_assert!(focusing.entry_velocity(v_inf) > v_inf);

        let angle = focusing.entry_angle_deg(b, v_inf);
        prop_assert!((0.0..=90.0).contains(&angle));

        let psi = crossing_angle(&focusing, b, v_inf);
        prop_assert!(psi.is_finite() && psi >= 0.0 && psi < std::f64::consts::PI);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Whole runs are reproducible and every record is well formed.
    #[test]
    fn prop_generated_particles_well_formed(
        seed in any::<u64>(),
        count in 1usize..200,
        q in 0.0f64..5.0,
    ) {
        let generator = DustGenerator::default();
        let params = SimulationParams::new(count, Length::from_m(1e-7), Length::from_m(1e-3), q)
            .with_seed(seed);

        let run = generator.generate(&params).unwrap();
        prop_assert_eq!(run.particles.len(), count);
        prop_assert_eq!(&run, &generator.generate(&params).unwrap());

        for p in &run.particles {
            prop_assert!(p.r >= 1e-7 && p.r <= 1e-3);
            prop_assert!(p.m > 0.0 && p.m.is_finite());
            prop_assert!(p.v_entry >= p.v_inf);
            prop_assert!(p.lat >= -90.0 && p.lat <= 90.0);
            prop_assert!(p.lon >= -180.0 && p.lon < 180.0);
            prop_assert!((p.incoming_norm() - 1.0).abs() < 1e-12);
        }
    }
}
