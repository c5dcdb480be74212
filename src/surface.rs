//! Ray / body intersection and Dynamic Surface Pattern Selection (DSPSA).
#[cfg(feature = "serde")]
use serde::Serialize;

use itertools::iproduct;
use log::trace;
use nalgebra::Vector3;
use std::collections::HashSet;

use crate::{cfg::Config, constants::PATCH_SIZE_DEG, error::Error, state::SpacecraftState};

/// Outcome of a ray / sphere intersection
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Intersection {
    /// The ray does not reach the body
    Miss,
    /// The ray grazes the body at this single point
    Tangent(Vector3<f64>),
    /// The ray enters the body at this point
    Hit(Vector3<f64>),
}

impl Intersection {
    /// Surface point, if any
    pub fn point(&self) -> Option<Vector3<f64>> {
        match self {
            Self::Miss => None,
            Self::Tangent(p) | Self::Hit(p) => Some(*p),
        }
    }
}

/// Intersects the ray leaving `origin_m` along `ray` with the
/// body centered sphere of radius `radius_m`. Only points in front
/// of the origin are considered, the nearest one is returned.
pub fn intersect(origin_m: &Vector3<f64>, ray: &Vector3<f64>, radius_m: f64) -> Intersection {
    let c_d = origin_m.dot(ray);
    let d2 = ray.norm_squared();
    let c2 = origin_m.norm_squared();

    let delta = 4.0 * c_d * c_d - 4.0 * d2 * c2 + 4.0 * d2 * radius_m * radius_m;

    if delta < 0.0 {
        return Intersection::Miss;
    }

    if delta == 0.0 {
        let t = -c_d / d2;
        return if t >= 0.0 {
            Intersection::Tangent(origin_m + ray * t)
        } else {
            Intersection::Miss
        };
    }

    let sqrt_delta = delta.sqrt() / 2.0;
    let (t1, t2) = ((-c_d - sqrt_delta) / d2, (-c_d + sqrt_delta) / d2);

    let t = if t1 >= 0.0 {
        t1
    } else if t2 >= 0.0 {
        t2
    } else {
        return Intersection::Miss;
    };

    Intersection::Hit(origin_m + ray * t)
}

/// Normalizes a longitude into [0, 360[ degrees
pub(crate) fn normalize_longitude(lon_deg: f64) -> f64 {
    let lon = lon_deg.rem_euclid(360.0);
    if lon >= 360.0 {
        0.0
    } else {
        lon
    }
}

/// Selenographic coordinates of a surface point
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SelenographicCoordinates {
    /// Latitude in [-90, 90] degrees
    pub lat_deg: f64,
    /// Longitude in [0, 360[ degrees
    pub lon_deg: f64,
}

impl SelenographicCoordinates {
    /// Coordinates of `point_m`, lying on the sphere of radius `radius_m`
    pub fn from_surface_point(point_m: &Vector3<f64>, radius_m: f64) -> Self {
        let colatitude = (point_m[2] / radius_m).clamp(-1.0, 1.0).acos();
        Self {
            lat_deg: 90.0 - colatitude.to_degrees(),
            lon_deg: normalize_longitude(point_m[1].atan2(point_m[0]).to_degrees()),
        }
    }
}

/// 5°x5° surface tile, in integer degrees
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SurfacePatch {
    pub lat_start: i32,
    pub lat_end: i32,
    pub lon_start: i32,
    pub lon_end: i32,
}

impl std::fmt::Display for SurfacePatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "_lat_{}_{}_lon_{}_{}",
            self.lat_start, self.lat_end, self.lon_start, self.lon_end
        )
    }
}

impl SurfacePatch {
    /// [SurfacePatch] containing these coordinates.
    /// Northern latitudes are floored, southern latitudes are truncated
    /// towards the equator then extended southwards.
    pub fn containing(coords: &SelenographicCoordinates) -> Self {
        let size = PATCH_SIZE_DEG as f64;

        let (lat_start, lat_end) = if coords.lat_deg >= 0.0 {
            let start = (coords.lat_deg / size).floor() as i32 * PATCH_SIZE_DEG;
            let start = start.min(90 - PATCH_SIZE_DEG);
            (start, start + PATCH_SIZE_DEG)
        } else {
            let end = (coords.lat_deg / size).ceil() as i32 * PATCH_SIZE_DEG;
            let end = end.max(-90 + PATCH_SIZE_DEG);
            (end - PATCH_SIZE_DEG, end)
        };

        let lon_start = (normalize_longitude(coords.lon_deg) / size).floor() as i32 * PATCH_SIZE_DEG;

        Self {
            lat_start,
            lat_end,
            lon_start,
            lon_end: lon_start + PATCH_SIZE_DEG,
        }
    }

    /// Name of the pre-triangulated surface pattern file describing
    /// this patch, at `resolution_px_deg` pixels per degree.
    pub fn pattern_file_name(&self, resolution_px_deg: u32) -> String {
        format!("pattern_LDEM_{}{}.inc", resolution_px_deg, self)
    }
}

/// Locates the [SurfacePatch] seen along `ray`, if any
pub fn locate(origin_m: &Vector3<f64>, ray: &Vector3<f64>, radius_m: f64) -> Option<SurfacePatch> {
    let point = intersect(origin_m, ray, radius_m).point()?;
    let coords = SelenographicCoordinates::from_surface_point(&point, radius_m);
    Some(SurfacePatch::containing(&coords))
}

/// Deduplicated set of [SurfacePatch]es, in discovery order.
/// Two [PatchSet]s are equal when they hold the same patches,
/// whatever the order.
#[derive(Debug, Default, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PatchSet {
    patches: Vec<SurfacePatch>,
    #[cfg_attr(feature = "serde", serde(skip))]
    index: HashSet<SurfacePatch>,
}

impl PartialEq for PatchSet {
    fn eq(&self, rhs: &Self) -> bool {
        self.index == rhs.index
    }
}

impl PatchSet {
    /// Inserts a new [SurfacePatch], returns false if it was already known
    pub fn insert(&mut self, patch: SurfacePatch) -> bool {
        if self.index.insert(patch) {
            self.patches.push(patch);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, patch: &SurfacePatch) -> bool {
        self.index.contains(patch)
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    /// Iterates patches in discovery order
    pub fn iter(&self) -> std::slice::Iter<'_, SurfacePatch> {
        self.patches.iter()
    }

    /// Pattern file names, in discovery order
    pub fn pattern_file_names(&self, resolution_px_deg: u32) -> Vec<String> {
        self.patches
            .iter()
            .map(|patch| patch.pattern_file_name(resolution_px_deg))
            .collect()
    }
}

impl FromIterator<SurfacePatch> for PatchSet {
    fn from_iter<I: IntoIterator<Item = SurfacePatch>>(iter: I) -> Self {
        let mut set = Self::default();
        for patch in iter {
            set.insert(patch);
        }
        set
    }
}

/// Dynamic Surface Pattern Selection: casts one ray per pixel
/// and gathers every [SurfacePatch] visible in the image.
/// The [Config] is validated first.
pub fn select_patches(state: &SpacecraftState, cfg: &Config) -> Result<PatchSet, Error> {
    cfg.validate()?;

    let camera = &cfg.camera;
    let radius_m = cfg.body.radius_m;

    let mut patches = PatchSet::default();

    for (y, x) in iproduct!(1..=camera.height, 1..=camera.width) {
        let ray = state.camera.ray(x, y, camera);
        if let Some(patch) = locate(&state.position_m, &ray, radius_m) {
            if patches.insert(patch) {
                trace!("{} - new patch {}", state.t, patch);
            }
        }
    }

    Ok(patches)
}
