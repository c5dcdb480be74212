//! Local solar illumination direction, as seen in the image.
#[cfg(feature = "serde")]
use serde::Serialize;

use itertools::iproduct;
use log::warn;
use nalgebra::{Vector2, Vector3};
use std::f64::consts::TAU;

use crate::{
    cfg::Config,
    error::Error,
    state::SpacecraftState,
    surface::{intersect, SelenographicCoordinates},
    vector::{rotate2d, unit},
};

/// Illumination information of one image pixel
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PixelInformation {
    /// Pixel column (1-based)
    pub x: u32,
    /// Pixel row (1-based)
    pub y: u32,
    /// True when the pixel sees the body surface and the
    /// illumination angle could be determined
    pub exists: bool,
    /// Latitude of the observed surface point (degrees)
    pub lat_deg: f64,
    /// Longitude of the observed surface point (degrees)
    pub lon_deg: f64,
    /// Local illumination direction in the image, measured from the
    /// downward image axis, increasing towards the right (degrees).
    pub illumination_angle_deg: f64,
}

impl PixelInformation {
    fn missing(x: u32, y: u32) -> Self {
        Self {
            x,
            y,
            ..Default::default()
        }
    }

    /// Image vector of length `length_px` pointing towards the illumination
    /// direction, starting at this pixel. Handy to annotate images.
    pub fn illumination_vector(&self, length_px: f64) -> Vector2<f64> {
        rotate2d(
            &Vector2::new(0.0, length_px),
            self.illumination_angle_deg.to_radians(),
        )
    }
}

/// Moves `offset_m` along the direction of the source, away from
/// `point_m`, then back onto the local tangent plane.
pub fn local_illumination_point(
    point_m: &Vector3<f64>,
    source_m: &Vector3<f64>,
    offset_m: f64,
) -> Vector3<f64> {
    let n = unit(point_m);
    let s = unit(&(source_m - point_m));
    let lambda = -offset_m * s.dot(&n) / n.dot(&n);
    point_m + s * offset_m + n * lambda
}

/// Angle (radians) between the downward image axis and `v`,
/// in [0, 2π[, increasing towards the right.
/// Returns None for a null vector.
pub fn image_angle(v: &Vector2<f64>) -> Option<f64> {
    let reference = Vector2::new(0.0, 1000.0);
    let norm = v.norm();
    if norm == 0.0 {
        return None;
    }
    let alpha = (reference.dot(v) / (1000.0 * norm)).clamp(-1.0, 1.0).acos();
    if v[0] < 0.0 {
        Some(TAU - alpha)
    } else {
        Some(alpha)
    }
}

/// Determines the [PixelInformation] of pixel (x, y)
pub fn pixel_information(state: &SpacecraftState, cfg: &Config, x: u32, y: u32) -> PixelInformation {
    let camera = &cfg.camera;
    let radius_m = cfg.body.radius_m;
    let position_m = &state.position_m;

    let ray = unit(&state.camera.ray(x, y, camera));

    let point_m = match intersect(position_m, &ray, radius_m).point() {
        Some(point_m) => point_m,
        None => return PixelInformation::missing(x, y),
    };

    let coords = SelenographicCoordinates::from_surface_point(&point_m, radius_m);

    let local_m = local_illumination_point(
        &point_m,
        &state.source_position_m,
        cfg.illumination_offset_m,
    );

    let direction = unit(&(local_m - position_m));

    let projected = match state.camera.project_direction(&direction, camera) {
        Some(projected) => projected,
        None => {
            warn!(
                "{} - pixel ({}, {}): degenerate image plane projection",
                state.t, x, y
            );
            return PixelInformation::missing(x, y);
        },
    };

    let v = projected - Vector2::new(x as f64, y as f64);

    match image_angle(&v) {
        Some(angle) => PixelInformation {
            x,
            y,
            exists: true,
            lat_deg: coords.lat_deg,
            lon_deg: coords.lon_deg,
            illumination_angle_deg: angle.to_degrees(),
        },
        None => {
            warn!(
                "{} - pixel ({}, {}): illumination along the line of sight",
                state.t, x, y
            );
            PixelInformation::missing(x, y)
        },
    }
}

/// Samples the illumination direction every grid step,
/// returning the pixels that see the body surface.
/// The [Config] is validated first.
pub fn illumination_grid(
    state: &SpacecraftState,
    cfg: &Config,
) -> Result<Vec<PixelInformation>, Error> {
    cfg.validate()?;

    let camera = &cfg.camera;
    let rows = (cfg.grid.vertical..=camera.height).step_by(cfg.grid.vertical as usize);
    let columns = (cfg.grid.horizontal..=camera.width).step_by(cfg.grid.horizontal as usize);

    Ok(iproduct!(rows, columns)
        .map(|(y, x)| pixel_information(state, cfg, x, y))
        .filter(|pixel| pixel.exists)
        .collect())
}
