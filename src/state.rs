#[cfg(feature = "serde")]
use serde::Serialize;

use log::debug;
use nalgebra::Vector3;

use crate::{
    camera::CameraFrame,
    cfg::Config,
    ephemeris::IlluminationSource,
    error::Error,
    prelude::Epoch,
    quaternion::Quaternion,
    spacecraft::Spacecraft,
};

/// Immutable snapshot of a [Spacecraft] at a given [Epoch].
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SpacecraftState {
    /// [Epoch] of this snapshot
    pub t: Epoch,
    /// [Spacecraft] template this state was resolved from
    pub spacecraft: Spacecraft,
    /// Body centered position (meters)
    pub position_m: Vector3<f64>,
    /// Illumination source position (meters), same frame
    pub source_position_m: Vector3<f64>,
    /// Camera orientation
    pub orientation: Quaternion,
    /// Camera basis
    pub camera: CameraFrame,
    /// Flight altitude above the body mean radius (meters)
    pub altitude_m: f64,
}

impl SpacecraftState {
    /// Resolves the [Spacecraft] at `t`, or at its fixed time when defined.
    pub fn new<S: IlluminationSource>(
        spacecraft: &Spacecraft,
        t: Epoch,
        cfg: &Config,
        source: &S,
    ) -> Result<Self, Error> {
        let t = spacecraft.fixed_time().unwrap_or(t);

        let position_m = spacecraft.position(t)?;

        let source_position_m = source
            .position_at(t)
            .ok_or(Error::UnknownSourcePosition(t))?;

        let (orientation, camera) = match spacecraft.orientation_at(t) {
            Some(q) => (q, CameraFrame::from_orientation(&q, &cfg.camera)),
            None => CameraFrame::nadir(&position_m, &cfg.camera),
        };

        let altitude_m = cfg.body.altitude_m(&position_m);

        debug!(
            "{} - position={:?}m altitude={:.3}m orientation={}",
            t,
            position_m.as_slice(),
            altitude_m,
            orientation
        );

        Ok(Self {
            t,
            spacecraft: *spacecraft,
            position_m,
            source_position_m,
            orientation,
            camera,
            altitude_m,
        })
    }

    /// Position the scene is lit from: the illumination source,
    /// or the camera itself when the Sun is ignored.
    pub fn light_position_m(&self, cfg: &Config) -> Vector3<f64> {
        if cfg.ignore_sun {
            self.position_m
        } else {
            self.source_position_m
        }
    }
}
