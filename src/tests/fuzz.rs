use log::debug;
use rstest::*;
use std::f64::consts::TAU;

use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::{
    prelude::{solve_eccentric_anomaly, Body, Duration, KeplerOrbit, OrbitalElements},
    tests::{init_logger, reference_epoch},
};

#[fixture]
fn rng() -> SmallRng {
    SmallRng::seed_from_u64(0x4D4F4F4E)
}

#[rstest]
fn kepler_solver(mut rng: SmallRng) {
    init_logger();

    for _ in 0..10_000 {
        let m = rng.random_range(0.0..TAU);
        let e = rng.random_range(1.0E-9..=1.0);

        let ecc_anomaly = solve_eccentric_anomaly(m, e).unwrap();
        assert!((0.0..TAU).contains(&ecc_anomaly));

        let mut residual = ecc_anomaly - e * ecc_anomaly.sin() - m;
        residual -= TAU * (residual / TAU).round();

        assert!(residual.abs() < 1.0E-12, "M={} e={} residual={}", m, e, residual);
    }
}

#[rstest]
fn state_vectors_round_trip(mut rng: SmallRng) {
    init_logger();

    let body = Body::moon();

    for _ in 0..200 {
        let elements = OrbitalElements {
            epoch: reference_epoch(),
            semi_major_axis_m: body.radius_m + rng.random_range(1.0E5..5.0E6),
            eccentricity: rng.random_range(1.0E-3..0.5),
            periapsis_arg_rad: rng.random_range(0.0..TAU),
            ascending_node_rad: rng.random_range(0.0..TAU),
            inclination_rad: rng.random_range(0.1..3.0),
            m0_rad: rng.random_range(0.0..TAU),
        };

        let orbit = KeplerOrbit::new(elements, body).unwrap();

        let t = reference_epoch() + Duration::from_seconds(rng.random_range(0.0..86400.0));
        let (r, v) = (orbit.position(t).unwrap(), orbit.velocity(t).unwrap());

        let derived = KeplerOrbit::from_state_vectors(t, &r, &v, body).unwrap();

        debug!("{:?} -> {:?}", elements, derived.elements());

        for dt_s in [0.0, 600.0, 5400.0] {
            let t = t + Duration::from_seconds(dt_s);
            let error_m = (derived.position(t).unwrap() - orbit.position(t).unwrap()).norm();
            assert!(error_m < 1.0E-3, "position error {}m at {}", error_m, t);

            let error_m_s = (derived.velocity(t).unwrap() - orbit.velocity(t).unwrap()).norm();
            assert!(error_m_s < 1.0E-6, "velocity error {}m/s at {}", error_m_s, t);
        }
    }
}
