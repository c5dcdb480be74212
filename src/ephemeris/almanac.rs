use log::error;
use nalgebra::Vector3;

use anise::{
    constants::frames::{MOON_J2000, SUN_J2000},
    prelude::{Almanac, Frame},
};

use crate::{ephemeris::IlluminationSource, error::Error, prelude::Epoch};

/// [IlluminationSource] backed by an ANISE [Almanac]
/// (SPICE kernels). By default it locates the Sun with respect to the Moon.
pub struct AlmanacSource {
    almanac: Almanac,
    /// Illuminating body frame
    source: Frame,
    /// Observed body frame
    observer: Frame,
}

impl AlmanacSource {
    /// Builds a new [AlmanacSource] locating the Sun
    /// in the Moon centered J2000 frame.
    pub fn new(almanac: Almanac) -> Self {
        Self {
            almanac,
            source: SUN_J2000,
            observer: MOON_J2000,
        }
    }

    /// Loads the kernel files (DE4xx BSP, PCA..) into a new [AlmanacSource].
    pub fn from_kernels(paths: &[&str]) -> Result<Self, Error> {
        let mut almanac = Almanac::default();
        for path in paths {
            almanac = almanac.load(path).map_err(Error::Almanac)?;
        }
        Ok(Self::new(almanac))
    }

    /// Copies and returns [AlmanacSource] with custom source and observer frames
    pub fn with_frames(self, source: Frame, observer: Frame) -> Self {
        Self {
            almanac: self.almanac,
            source,
            observer,
        }
    }
}

impl IlluminationSource for AlmanacSource {
    fn position_at(&self, t: Epoch) -> Option<Vector3<f64>> {
        match self
            .almanac
            .transform(self.source, self.observer, t, None)
        {
            Ok(state) => Some(state.radius_km * 1.0E3),
            Err(e) => {
                error!("{} - failed to locate illumination source: {}", t, e);
                None
            },
        }
    }
}
