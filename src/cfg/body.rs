#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::{MOON_GRAVITATION_MU_M3_S2, MOON_MEAN_RADIUS_M},
    error::Error,
};

fn default_radius() -> f64 {
    MOON_MEAN_RADIUS_M
}

fn default_mu() -> f64 {
    MOON_GRAVITATION_MU_M3_S2
}

/// Spherical [Body] being observed and orbited.
/// The reference frame is centered on its center of mass.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Body {
    /// Mean radius (meters)
    #[cfg_attr(feature = "serde", serde(default = "default_radius"))]
    pub radius_m: f64,
    /// Gravitational parameter μ = GM (m^3 s-2)
    #[cfg_attr(feature = "serde", serde(default = "default_mu"))]
    pub gravitational_parameter_m3_s2: f64,
}

impl Default for Body {
    /// Earth's moon
    fn default() -> Self {
        Self::moon()
    }
}

impl Body {
    /// Earth's moon, described by its mean radius
    pub fn moon() -> Self {
        Self {
            radius_m: default_radius(),
            gravitational_parameter_m3_s2: default_mu(),
        }
    }

    /// Altitude above mean radius of given body centered position (meters)
    pub fn altitude_m(&self, position_m: &nalgebra::Vector3<f64>) -> f64 {
        position_m.norm() - self.radius_m
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        if !(self.radius_m > 0.0) {
            return Err(Error::InvalidBodyRadius);
        }
        if !(self.gravitational_parameter_m3_s2 > 0.0) {
            return Err(Error::InvalidGravitationalParameter);
        }
        Ok(())
    }
}
