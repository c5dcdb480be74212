//! Spacecraft template: trajectory and attitude law.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use nalgebra::Vector3;

use crate::{
    cfg::Body,
    error::Error,
    orbit::KeplerOrbit,
    prelude::Epoch,
    quaternion::{axis_rotation, Quaternion},
};

/// How the spacecraft moves
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Trajectory {
    /// Keplerian motion around the observed body
    Orbit(KeplerOrbit),
    /// Spacecraft standing still at this body centered position (meters)
    Fixed(Vector3<f64>),
}

/// [Spacecraft] template, from which a
/// [SpacecraftState](crate::prelude::SpacecraftState) is resolved at any time.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Spacecraft {
    trajectory: Trajectory,
    /// Origin of the orientation transition
    reference_epoch: Epoch,
    /// Initial orientation. Nadir pointing when omitted.
    orientation: Option<Quaternion>,
    /// Orientation transition rate around x, y and z (rad.s⁻¹)
    orientation_rate_rad_s: Vector3<f64>,
    /// Simulation time override
    fixed_time: Option<Epoch>,
}

impl Spacecraft {
    /// Nadir pointing [Spacecraft] following this [KeplerOrbit]
    pub fn new(orbit: KeplerOrbit) -> Self {
        Self {
            trajectory: Trajectory::Orbit(orbit),
            reference_epoch: orbit.epoch(),
            orientation: None,
            orientation_rate_rad_s: Vector3::zeros(),
            fixed_time: None,
        }
    }

    /// Nadir pointing [Spacecraft] whose orbit is derived from
    /// a (position, velocity) pair expressed at `epoch`.
    pub fn from_state_vectors(
        epoch: Epoch,
        position_m: &Vector3<f64>,
        velocity_m_s: &Vector3<f64>,
        body: Body,
    ) -> Result<Self, Error> {
        let orbit = KeplerOrbit::from_state_vectors(epoch, position_m, velocity_m_s, body)?;
        Ok(Self::new(orbit))
    }

    /// Nadir pointing [Spacecraft] standing still at `position_m`.
    /// `epoch` is the origin of the orientation transition.
    pub fn fixed(epoch: Epoch, position_m: Vector3<f64>) -> Self {
        Self {
            trajectory: Trajectory::Fixed(position_m),
            reference_epoch: epoch,
            orientation: None,
            orientation_rate_rad_s: Vector3::zeros(),
            fixed_time: None,
        }
    }

    /// Copies and returns [Spacecraft] with initial orientation
    pub fn with_orientation(&self, orientation: Quaternion) -> Self {
        let mut s = *self;
        s.orientation = Some(orientation);
        s
    }

    /// Copies and returns nadir pointing [Spacecraft]
    pub fn with_nadir_pointing(&self) -> Self {
        let mut s = *self;
        s.orientation = None;
        s
    }

    /// Copies and returns [Spacecraft] with orientation transition rate
    /// around x, y and z (rad.s⁻¹). Only applies to oriented spacecrafts.
    pub fn with_orientation_rate(&self, rate_rad_s: Vector3<f64>) -> Self {
        let mut s = *self;
        s.orientation_rate_rad_s = rate_rad_s;
        s
    }

    /// Copies and returns [Spacecraft] always resolved at `t`
    pub fn with_fixed_time(&self, t: Epoch) -> Self {
        let mut s = *self;
        s.fixed_time = Some(t);
        s
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn reference_epoch(&self) -> Epoch {
        self.reference_epoch
    }

    pub fn orientation(&self) -> Option<Quaternion> {
        self.orientation
    }

    pub fn orientation_rate_rad_s(&self) -> Vector3<f64> {
        self.orientation_rate_rad_s
    }

    pub fn fixed_time(&self) -> Option<Epoch> {
        self.fixed_time
    }

    /// True when the camera always looks at the body center
    pub fn is_nadir_pointing(&self) -> bool {
        self.orientation.is_none()
    }

    /// Body centered position at `t` (meters)
    pub fn position(&self, t: Epoch) -> Result<Vector3<f64>, Error> {
        match self.trajectory {
            Trajectory::Orbit(orbit) => orbit.position(t),
            Trajectory::Fixed(position_m) => Ok(position_m),
        }
    }

    /// Orientation at `t`, None when nadir pointing.
    /// The initial orientation is rotated around x, then y, then z,
    /// by the transition rate times the elapsed seconds.
    pub fn orientation_at(&self, t: Epoch) -> Option<Quaternion> {
        let q0 = self.orientation?;
        let dt_s = (t - self.reference_epoch).to_seconds();
        let angles = self.orientation_rate_rad_s * dt_s;

        Some(
            axis_rotation(Vector3::z_axis(), angles[2])
                * axis_rotation(Vector3::y_axis(), angles[1])
                * axis_rotation(Vector3::x_axis(), angles[0])
                * q0,
        )
    }
}
