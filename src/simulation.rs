#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use log::{debug, warn};
use nalgebra::Vector3;

use crate::{
    cfg::{Camera, Config},
    constants::M_TO_AU,
    ephemeris::IlluminationSource,
    error::Error,
    illumination::{illumination_grid, PixelInformation},
    prelude::{Epoch, TimeScale},
    quaternion::Quaternion,
    spacecraft::Spacecraft,
    state::SpacecraftState,
    surface::{select_patches, PatchSet},
    vector::Vector3D,
};

/// Independent (time, position, orientation) set, processed in batch mode.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BatchSet {
    /// Simulation time
    pub t: Epoch,
    /// Body centered spacecraft position (meters)
    pub position_m: Vector3D,
    /// Camera orientation. Nadir pointing when omitted.
    #[cfg_attr(feature = "serde", serde(default))]
    pub orientation: Option<Quaternion>,
}

impl BatchSet {
    /// Motionless [Spacecraft] pinned to this set
    pub fn to_spacecraft(&self) -> Spacecraft {
        let spacecraft = Spacecraft::fixed(self.t, self.position_m.to_vec3()).with_fixed_time(self.t);
        match self.orientation {
            Some(q) => spacecraft.with_orientation(q),
            None => spacecraft,
        }
    }
}

/// Everything needed to describe the scene of one simulation step
/// and to annotate the resulting image.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FrameGeometry {
    /// Resolved [SpacecraftState]
    pub state: SpacecraftState,
    /// Position the scene is lit from (meters)
    pub light_position_m: Vector3<f64>,
    /// Visible [SurfacePatch](crate::prelude::SurfacePatch)es
    pub patches: PatchSet,
    /// Illumination information on the sampling grid (visible pixels only)
    pub pixels: Vec<PixelInformation>,
    /// [Camera] this frame was resolved with
    pub camera: Camera,
    /// Surface pattern resolution (pixels per degree)
    pub resolution_px_deg: u32,
}

impl FrameGeometry {
    pub fn epoch(&self) -> Epoch {
        self.state.t
    }

    /// Modified Julian Day (UTC)
    pub fn mjd_utc(&self) -> f64 {
        self.state.t.to_mjd_utc_days()
    }

    /// Human readable UTC date
    pub fn utc(&self) -> String {
        self.state.t.to_time_scale(TimeScale::UTC).to_string()
    }

    pub fn position_m(&self) -> Vector3<f64> {
        self.state.position_m
    }

    pub fn altitude_m(&self) -> f64 {
        self.state.altitude_m
    }

    pub fn orientation(&self) -> Quaternion {
        self.state.orientation
    }

    /// Illumination source distance to the body center (astronomical units)
    pub fn source_distance_au(&self) -> f64 {
        self.state.source_position_m.norm() * M_TO_AU
    }

    /// Surface pattern files to include in the scene description
    pub fn pattern_file_names(&self) -> Vec<String> {
        self.patches.pattern_file_names(self.resolution_px_deg)
    }
}

/// [Simulation] resolves [FrameGeometry]s with a validated [Config]
/// and an [IlluminationSource].
pub struct Simulation<S: IlluminationSource> {
    cfg: Config,
    source: S,
}

impl<S: IlluminationSource> Simulation<S> {
    /// Creates a new [Simulation], rejecting invalid [Config]urations.
    pub fn new(cfg: Config, source: S) -> Result<Self, Error> {
        cfg.validate()?;
        Ok(Self { cfg, source })
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Resolves the [FrameGeometry] of this [Spacecraft] at `t`.
    pub fn resolve(&self, spacecraft: &Spacecraft, t: Epoch) -> Result<FrameGeometry, Error> {
        let state = SpacecraftState::new(spacecraft, t, &self.cfg, &self.source)?;

        let patches = select_patches(&state, &self.cfg)?;
        if patches.is_empty() {
            warn!("{} - body is not in the field of view", state.t);
        }

        let pixels = illumination_grid(&state, &self.cfg)?;

        debug!(
            "{} - resolved {} patches, {} illuminated pixels",
            state.t,
            patches.len(),
            pixels.len()
        );

        Ok(FrameGeometry {
            light_position_m: state.light_position_m(&self.cfg),
            state,
            patches,
            pixels,
            camera: self.cfg.camera,
            resolution_px_deg: self.cfg.resolution_px_deg,
        })
    }

    /// Resolves one [FrameGeometry] per [Epoch], for the same [Spacecraft].
    /// Stops on the first error.
    pub fn resolve_series<I: IntoIterator<Item = Epoch>>(
        &self,
        spacecraft: &Spacecraft,
        epochs: I,
    ) -> Result<Vec<FrameGeometry>, Error> {
        epochs
            .into_iter()
            .map(|t| self.resolve(spacecraft, t))
            .collect()
    }

    /// Resolves independent [BatchSet]s. Stops on the first error.
    pub fn resolve_batch(&self, sets: &[BatchSet]) -> Result<Vec<FrameGeometry>, Error> {
        sets.iter()
            .map(|set| self.resolve(&set.to_spacecraft(), set.t))
            .collect()
    }
}
