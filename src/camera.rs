//! Perspective camera frame: orientation, per pixel rays and image plane projection.
#[cfg(feature = "serde")]
use serde::Serialize;

use nalgebra::{Vector2, Vector3};
use std::f64::consts::FRAC_PI_2;

use crate::{
    cfg::Camera,
    quaternion::{axis_rotation, Quaternion},
    vector::unit,
};

/// Default (non rotated) viewing direction: looking down the -x axis
pub(crate) fn default_direction() -> Vector3<f64> {
    Vector3::new(-1.0, 0.0, 0.0)
}

/// Default (non rotated) right vector, scaled to the image aspect ratio
pub(crate) fn default_right(camera: &Camera) -> Vector3<f64> {
    Vector3::new(0.0, camera.aspect_ratio(), 0.0)
}

/// Orientation that rotates the default camera so it looks
/// at the body center from `position_m` (nadir pointing).
pub fn nadir_orientation(position_m: &Vector3<f64>) -> Quaternion {
    let phi = position_m[1].atan2(position_m[0]);
    let theta = (position_m[2] / position_m.norm()).clamp(-1.0, 1.0).acos();

    axis_rotation(Vector3::z_axis(), phi) * axis_rotation(Vector3::y_axis(), theta - FRAC_PI_2)
}

/// Orthonormal camera basis. `direction` is scaled so the image plane
/// (at its tip) spans `right` horizontally for the desired field of view,
/// `up` is a unit vector.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CameraFrame {
    /// Viewing direction, pointing at the image plane center
    pub direction: Vector3<f64>,
    /// Image plane horizontal extent
    pub right: Vector3<f64>,
    /// Image plane vertical direction
    pub up: Vector3<f64>,
}

impl CameraFrame {
    /// Builds the [CameraFrame] by rotating the default camera with `orientation`.
    pub fn from_orientation(orientation: &Quaternion, camera: &Camera) -> Self {
        let right = orientation.rotate(&default_right(camera));
        let direction = unit(&orientation.rotate(&default_direction()));
        Self::from_unit_direction(right, direction, camera.fov_deg)
    }

    /// Builds the nadir pointing [CameraFrame] at `position_m`,
    /// returning the orientation it corresponds to.
    pub fn nadir(position_m: &Vector3<f64>, camera: &Camera) -> (Quaternion, Self) {
        let orientation = nadir_orientation(position_m);
        let right = orientation.rotate(&default_right(camera));
        let direction = -unit(position_m);
        (
            orientation,
            Self::from_unit_direction(right, direction, camera.fov_deg),
        )
    }

    fn from_unit_direction(right: Vector3<f64>, direction: Vector3<f64>, fov_deg: f64) -> Self {
        let half_fov = fov_deg.to_radians() / 2.0;
        let direction = direction * (0.5 * right.norm() / half_fov.tan());
        let up = unit(&right.cross(&direction));
        Self {
            direction,
            right,
            up,
        }
    }

    /// Image plane coordinates (u, r) of pixel (x, y), 1-based,
    /// (1, 1) being the top left corner.
    fn image_plane_coordinates(x: f64, y: f64, camera: &Camera) -> (f64, f64) {
        let (w, h) = (camera.width as f64, camera.height as f64);
        let u = (1.0 + h - 2.0 * y) / (2.0 * h);
        let r = (1.0 + w - 2.0 * x) / (2.0 * w);
        (u, r)
    }

    /// Ray (not normalized) from the camera through the center of pixel (x, y).
    pub fn ray(&self, x: u32, y: u32, camera: &Camera) -> Vector3<f64> {
        let (u, r) = Self::image_plane_coordinates(x as f64, y as f64, camera);
        self.direction + self.up * u - self.right * r
    }

    /// Point of the image plane where pixel (x, y) lies, for a camera located at `position_m`.
    pub fn image_plane_point(
        &self,
        position_m: &Vector3<f64>,
        x: u32,
        y: u32,
        camera: &Camera,
    ) -> Vector3<f64> {
        position_m + self.ray(x, y, camera)
    }

    /// Projects a viewing direction onto the image plane and returns the
    /// (fractional) pixel coordinates it crosses the image plane at.
    /// Solves s·d = direction + u·up - r·right with Cramer's rule.
    /// Returns None when `d` is parallel to the image plane or points backwards.
    pub fn project_direction(&self, d: &Vector3<f64>, camera: &Camera) -> Option<Vector2<f64>> {
        let triple = |a: &Vector3<f64>, b: &Vector3<f64>, c: &Vector3<f64>| a.dot(&b.cross(c));

        let det = triple(d, &self.up, &self.right);
        if det == 0.0 {
            return None;
        }

        let s = triple(&self.direction, &self.up, &self.right) / det;
        if !(s > 0.0) {
            return None;
        }

        let u = -triple(d, &self.direction, &self.right) / det;
        let r = triple(d, &self.up, &self.direction) / det;

        let (w, h) = (camera.width as f64, camera.height as f64);
        Some(Vector2::new(
            (1.0 + w - 2.0 * w * r) / 2.0,
            (1.0 + h - 2.0 * h * u) / 2.0,
        ))
    }
}
