//! Quaternion algebra, used to orientate the spacecraft camera.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::ops::{Add, Mul};

use nalgebra::{Unit, UnitQuaternion, Vector3};

/// Hypercomplex number `[r, v]` made of a real part `r` and a
/// vector part `v`. When built with [Quaternion::from_axis_angle]
/// it describes a rotation and is unit-norm.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Quaternion {
    /// Real (scalar) part
    pub r: f64,
    /// Vector part
    pub v: Vector3<f64>,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::fmt::Display for Quaternion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{:.6E}, ({:.6E}, {:.6E}, {:.6E})]",
            self.r, self.v[0], self.v[1], self.v[2]
        )
    }
}

impl Quaternion {
    pub fn new(r: f64, x: f64, y: f64, z: f64) -> Self {
        Self {
            r,
            v: Vector3::new(x, y, z),
        }
    }

    /// Builds a [Quaternion] from its real and vector parts
    pub fn from_parts(r: f64, v: Vector3<f64>) -> Self {
        Self { r, v }
    }

    /// Pure quaternion [0, v]
    pub fn pure(v: &Vector3<f64>) -> Self {
        Self { r: 0.0, v: *v }
    }

    /// Identity rotation [1, (0, 0, 0)]
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    /// Rotation quaternion [cos(θ/2), sin(θ/2) axis], where `axis` is a unit vector.
    pub fn from_axis_angle(axis: &Vector3<f64>, angle_rad: f64) -> Self {
        let (sin, cos) = (angle_rad / 2.0).sin_cos();
        Self { r: cos, v: axis * sin }
    }

    pub fn conjugate(&self) -> Self {
        Self {
            r: self.r,
            v: -self.v,
        }
    }

    pub fn norm(&self) -> f64 {
        (self.r * self.r + self.v.norm_squared()).sqrt()
    }

    /// Rotates `v` by this (unit) rotation quaternion: q [0, v] q*.
    /// The conjugate stands for the inverse, which only holds for unit quaternions.
    pub fn rotate(&self, v: &Vector3<f64>) -> Vector3<f64> {
        (*self * Self::pure(v) * self.conjugate()).v
    }

    /// Converts to a [UnitQuaternion] (renormalized).
    pub fn to_unit_quaternion(&self) -> UnitQuaternion<f64> {
        UnitQuaternion::from_quaternion(nalgebra::Quaternion::new(
            self.r, self.v[0], self.v[1], self.v[2],
        ))
    }
}

impl From<UnitQuaternion<f64>> for Quaternion {
    fn from(q: UnitQuaternion<f64>) -> Self {
        Self::new(q.w, q.i, q.j, q.k)
    }
}

impl Add for Quaternion {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            r: self.r + rhs.r,
            v: self.v + rhs.v,
        }
    }
}

/// Hamilton product (not commutative).
impl Mul for Quaternion {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self {
            r: self.r * rhs.r - self.v.dot(&rhs.v),
            v: rhs.v * self.r + self.v * rhs.r + self.v.cross(&rhs.v),
        }
    }
}

/// Rotation quaternion about one of the frame axes
pub(crate) fn axis_rotation(axis: Unit<Vector3<f64>>, angle_rad: f64) -> Quaternion {
    Quaternion::from_axis_angle(&axis, angle_rad)
}
