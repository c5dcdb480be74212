use thiserror::Error;

use anise::errors::AlmanacError;

use crate::prelude::Epoch;

#[derive(Debug, PartialEq, Error)]
pub enum Error {
    /// Orbits that would dig into the body cannot be simulated.
    #[error("orbit shape error: semi-major axis {0} m does not exceed the body radius")]
    InvalidSemiMajorAxis(f64),

    /// Only circular / elliptic orbits are supported.
    #[error("orbit shape error: eccentricity {0} is not in ]0, 1]")]
    InvalidEccentricity(f64),

    /// Angular orbital elements must lie in [0, 2π[.
    #[error("orbit shape error: {element} = {value} rad is not in [0, 2π[")]
    AngleOutOfRange { element: &'static str, value: f64 },

    #[error("epoch is prior MJD 0")]
    NegativeEpoch,

    /// (position, velocity) pair from which no orbit can be derived
    /// (null position, null angular momentum or null eccentricity).
    #[error("degenerate state vectors: cannot derive orbital elements")]
    DegenerateStateVectors,

    /// Newton-Raphson iteration on Kepler's equation did not converge.
    #[error("kepler solver did not converge after {iterations} iterations")]
    KeplerNonConvergence { iterations: usize },

    #[error("field of view must lie in ]0, 180[ degrees (got {0})")]
    InvalidFieldOfView(f64),

    #[error("image dimensions must be strictly positive")]
    InvalidImageSize,

    #[error("illumination grid spacing must be strictly positive")]
    InvalidGridSpacing,

    #[error("body radius must be strictly positive")]
    InvalidBodyRadius,

    #[error("gravitational parameter must be strictly positive")]
    InvalidGravitationalParameter,

    #[error("illumination offset must be strictly positive")]
    InvalidIlluminationOffset,

    /// The illumination source (ephemeris) could not provide a position.
    #[error("unknown illumination source position at {0}")]
    UnknownSourcePosition(Epoch),

    /// [AlmanacSource](crate::prelude::AlmanacSource) setup issue
    #[error("almanac setup issue: {0}")]
    Almanac(AlmanacError),
}
