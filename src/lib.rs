#![doc = include_str!("../README.md")]
#![cfg_attr(docrs, feature(doc_cfg))]

// private modules
mod camera;
mod cfg;
mod ephemeris;
mod error;
mod illumination;
mod orbit;
mod quaternion;
mod simulation;
mod spacecraft;
mod state;
mod surface;
mod vector;

pub mod constants;

#[cfg(test)]
mod tests;

// prelude
pub mod prelude {
    pub use crate::camera::{nadir_orientation, CameraFrame};
    pub use crate::cfg::{Body, Camera, Config, Grid};
    pub use crate::ephemeris::{AlmanacSource, FixedSource, IlluminationSource};
    pub use crate::error::Error;
    pub use crate::illumination::{
        illumination_grid, image_angle, local_illumination_point, pixel_information,
        PixelInformation,
    };
    pub use crate::orbit::{
        eccentric_anomaly, normalize_angle, solve_eccentric_anomaly, true_anomaly, KeplerOrbit,
        OrbitalElements,
    };
    pub use crate::quaternion::Quaternion;
    pub use crate::simulation::{BatchSet, FrameGeometry, Simulation};
    pub use crate::spacecraft::{Spacecraft, Trajectory};
    pub use crate::state::SpacecraftState;
    pub use crate::surface::{
        intersect, locate, select_patches, Intersection, PatchSet, SelenographicCoordinates,
        SurfacePatch,
    };
    pub use crate::vector::{rotate2d, rotate_axis_angle, unit, Vector3D};
    // re-export
    pub use anise::prelude::{Almanac, Frame};
    pub use hifitime::{Duration, Epoch, TimeScale, TimeSeries};
    pub use nalgebra::{Vector2, Vector3};
}

// pub export
pub use error::Error;
