#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::{DEFAULT_GRID_SPACING, ILLUMINATION_OFFSET_M},
    error::Error,
};

mod body;
pub use body::Body;

fn default_fov() -> f64 {
    40.0
}

fn default_width() -> u32 {
    1024
}

fn default_height() -> u32 {
    1024
}

fn default_resolution() -> u32 {
    4
}

fn default_grid_spacing() -> u32 {
    DEFAULT_GRID_SPACING
}

fn default_illumination_offset() -> f64 {
    ILLUMINATION_OFFSET_M
}

fn default_ignore_sun() -> bool {
    false
}

/// Perspective camera settings
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Camera {
    /// Horizontal field of view (degrees)
    #[cfg_attr(feature = "serde", serde(default = "default_fov"))]
    pub fov_deg: f64,
    /// Image width (pixels)
    #[cfg_attr(feature = "serde", serde(default = "default_width"))]
    pub width: u32,
    /// Image height (pixels)
    #[cfg_attr(feature = "serde", serde(default = "default_height"))]
    pub height: u32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov_deg: default_fov(),
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Camera {
    /// Image aspect ratio (width / height)
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

/// Pixel spacing of the illumination direction sampling grid
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Grid {
    /// Horizontal spacing (pixels)
    #[cfg_attr(feature = "serde", serde(default = "default_grid_spacing"))]
    pub horizontal: u32,
    /// Vertical spacing (pixels)
    #[cfg_attr(feature = "serde", serde(default = "default_grid_spacing"))]
    pub vertical: u32,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            horizontal: default_grid_spacing(),
            vertical: default_grid_spacing(),
        }
    }
}

/// Simulation [Config]uration, passed to every processing step.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Observed [Body]
    #[cfg_attr(feature = "serde", serde(default))]
    pub body: Body,
    /// [Camera] settings
    #[cfg_attr(feature = "serde", serde(default))]
    pub camera: Camera,
    /// Illumination sampling [Grid]
    #[cfg_attr(feature = "serde", serde(default))]
    pub grid: Grid,
    /// Surface mesh resolution (pixels per degree) of the pattern repository.
    /// Only used to name the surface patterns.
    #[cfg_attr(feature = "serde", serde(default = "default_resolution"))]
    pub resolution_px_deg: u32,
    /// Distance (meters) along the solar direction used to construct the
    /// local illumination direction. Any strictly positive value is valid.
    #[cfg_attr(feature = "serde", serde(default = "default_illumination_offset"))]
    pub illumination_offset_m: f64,
    /// When set, the scene is lit from the spacecraft position.
    /// Illumination angles remain computed with respect to the Sun.
    #[cfg_attr(feature = "serde", serde(default = "default_ignore_sun"))]
    pub ignore_sun: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            body: Body::default(),
            camera: Camera::default(),
            grid: Grid::default(),
            resolution_px_deg: default_resolution(),
            illumination_offset_m: default_illumination_offset(),
            ignore_sun: default_ignore_sun(),
        }
    }
}

impl Config {
    /// Verifies this [Config] is physically meaningful.
    pub fn validate(&self) -> Result<(), Error> {
        self.body.validate()?;

        let fov = self.camera.fov_deg;
        if !(fov > 0.0 && fov < 180.0) {
            return Err(Error::InvalidFieldOfView(fov));
        }
        if self.camera.width == 0 || self.camera.height == 0 {
            return Err(Error::InvalidImageSize);
        }
        if self.grid.horizontal == 0 || self.grid.vertical == 0 {
            return Err(Error::InvalidGridSpacing);
        }
        if !(self.illumination_offset_m > 0.0) {
            return Err(Error::InvalidIlluminationOffset);
        }
        Ok(())
    }

    /// Copies and returns [Config] with updated [Body]
    pub fn with_body(&self, body: Body) -> Self {
        let mut s = self.clone();
        s.body = body;
        s
    }

    /// Copies and returns [Config] with updated horizontal field of view (degrees)
    pub fn with_fov(&self, fov_deg: f64) -> Self {
        let mut s = self.clone();
        s.camera.fov_deg = fov_deg;
        s
    }

    /// Copies and returns [Config] with updated image dimensions (pixels)
    pub fn with_image_size(&self, width: u32, height: u32) -> Self {
        let mut s = self.clone();
        s.camera.width = width;
        s.camera.height = height;
        s
    }

    /// Copies and returns [Config] with same horizontal and vertical grid spacing
    pub fn with_grid(&self, spacing: u32) -> Self {
        self.with_grid_spacing(spacing, spacing)
    }

    /// Copies and returns [Config] with updated grid spacing (pixels)
    pub fn with_grid_spacing(&self, horizontal: u32, vertical: u32) -> Self {
        let mut s = self.clone();
        s.grid = Grid {
            horizontal,
            vertical,
        };
        s
    }

    /// Copies and returns [Config] with updated surface resolution (px/deg)
    pub fn with_resolution(&self, resolution_px_deg: u32) -> Self {
        let mut s = self.clone();
        s.resolution_px_deg = resolution_px_deg;
        s
    }

    /// Copies and returns [Config] with updated illumination offset (meters)
    pub fn with_illumination_offset(&self, offset_m: f64) -> Self {
        let mut s = self.clone();
        s.illumination_offset_m = offset_m;
        s
    }

    /// Copies and returns [Config] lit from the spacecraft position
    pub fn with_ignore_sun(&self, ignore_sun: bool) -> Self {
        let mut s = self.clone();
        s.ignore_sun = ignore_sun;
        s
    }
}
