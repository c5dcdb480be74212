use log::error;
use std::f64::consts::TAU;

use crate::{
    constants::{KEPLER_MAX_ITERATIONS, KEPLER_RESIDUAL_ULPS, KEPLER_TOLERANCE_RAD},
    error::Error,
};

/// Wraps an angle into [0, 2π[
pub fn normalize_angle(phi_rad: f64) -> f64 {
    let phi = phi_rad.rem_euclid(TAU);
    // rem_euclid may round tiny negative values up to 2π
    if phi >= TAU {
        0.0
    } else {
        phi
    }
}

/// Solves Kepler's equation E - e sin(E) = M for the eccentric anomaly E,
/// by Newton-Raphson iteration starting at E = M.
/// The root always lies within [M - e, M + e]: that bracket is narrowed
/// on every iteration and a step leaving it is replaced by bisection.
/// Returns E in [0, 2π[.
pub fn solve_eccentric_anomaly(mean_anomaly_rad: f64, eccentricity: f64) -> Result<f64, Error> {
    let (m, e) = (mean_anomaly_rad, eccentricity);
    let (mut lower, mut upper) = (m - e, m + e);
    let mut e_k = m;

    for iteration in 0..KEPLER_MAX_ITERATIONS {
        let residual = e_k - e * e_k.sin() - m;

        // within a few ulp: the next step would only bounce between neighbouring doubles
        let scale = m.abs().max(e_k.abs()).max(1.0);
        if residual.abs() <= KEPLER_RESIDUAL_ULPS * f64::EPSILON * scale {
            return Ok(normalize_angle(e_k));
        }

        if residual < 0.0 {
            lower = e_k;
        } else {
            upper = e_k;
        }

        let mut e_next = e_k - residual / (1.0 - e * e_k.cos());

        // vanishing derivative (e = 1, E -> 0) or overshoot
        if !(e_next > lower && e_next < upper) {
            e_next = 0.5 * (lower + upper);
        }

        if !e_next.is_finite() {
            error!(
                "kepler solver diverged (M={:.6E}, e={:.6E}, iter={})",
                m, e, iteration
            );
            return Err(Error::KeplerNonConvergence {
                iterations: iteration + 1,
            });
        }

        if (e_next - e_k).abs() < KEPLER_TOLERANCE_RAD * e_next.abs().max(1.0) {
            return Ok(normalize_angle(e_next));
        }

        e_k = e_next;
    }

    error!("kepler solver in failure (M={:.6E}, e={:.6E})", m, e);

    Err(Error::KeplerNonConvergence {
        iterations: KEPLER_MAX_ITERATIONS,
    })
}

/// True anomaly from eccentric anomaly (half angle form)
pub fn true_anomaly(eccentric_anomaly_rad: f64, eccentricity: f64) -> f64 {
    let e = eccentricity;
    let (sin, cos) = (eccentric_anomaly_rad / 2.0).sin_cos();
    2.0 * ((1.0 + e).sqrt() * sin).atan2((1.0 - e).sqrt() * cos)
}

/// Eccentric anomaly from true anomaly (half angle form), in [0, 2π[
pub fn eccentric_anomaly(true_anomaly_rad: f64, eccentricity: f64) -> f64 {
    let e = eccentricity;
    let (sin, cos) = (true_anomaly_rad / 2.0).sin_cos();
    normalize_angle(2.0 * ((1.0 - e).sqrt() * sin).atan2((1.0 + e).sqrt() * cos))
}
