#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use nalgebra::{Vector2, Vector3};

use crate::quaternion::Quaternion;

/// Plain (x, y, z) triplet, used wherever a vector is part of
/// a user facing / serializable structure.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vector3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<(f64, f64, f64)> for Vector3D {
    fn from(v: (f64, f64, f64)) -> Self {
        Self {
            x: v.0,
            y: v.1,
            z: v.2,
        }
    }
}

impl From<Vector3<f64>> for Vector3D {
    fn from(vec: Vector3<f64>) -> Self {
        Self {
            x: vec[0],
            y: vec[1],
            z: vec[2],
        }
    }
}

impl From<Vector3D> for Vector3<f64> {
    fn from(vec: Vector3D) -> Self {
        vec.to_vec3()
    }
}

impl Vector3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
    pub fn to_vec3(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

/// Unit vector. A null vector returns NaN components,
/// it is up to the caller not to form degenerate vectors.
pub fn unit(v: &Vector3<f64>) -> Vector3<f64> {
    v / v.norm()
}

/// Rotates `v` by `angle_rad` around `axis` (unit vector),
/// using the rotation quaternion (cos θ/2, sin θ/2 axis).
pub fn rotate_axis_angle(v: &Vector3<f64>, axis: &Vector3<f64>, angle_rad: f64) -> Vector3<f64> {
    Quaternion::from_axis_angle(axis, angle_rad).rotate(v)
}

/// Rotates a 2D image vector by `phi_rad`. Image coordinates have their
/// y axis pointing downwards, so a positive angle turns clockwise on screen.
pub fn rotate2d(v: &Vector2<f64>, phi_rad: f64) -> Vector2<f64> {
    let (sin, cos) = (-phi_rad).sin_cos();
    Vector2::new(v[0] * cos - v[1] * sin, v[0] * sin + v[1] * cos)
}
