use nalgebra::Vector3;

use crate::prelude::Epoch;

mod almanac;
pub use almanac::AlmanacSource;

/// Any ephemeris provider should implement [IlluminationSource] to
/// locate the illuminating star (typically the Sun).
pub trait IlluminationSource {
    /// Provide the illumination source position at requested [Epoch],
    /// in meters, expressed in the body centered frame.
    /// Returning None aborts the processing of this [Epoch].
    fn position_at(&self, t: Epoch) -> Option<Vector3<f64>>;
}

impl<T: IlluminationSource + ?Sized> IlluminationSource for &T {
    fn position_at(&self, t: Epoch) -> Option<Vector3<f64>> {
        (**self).position_at(t)
    }
}

impl<T: IlluminationSource + ?Sized> IlluminationSource for Box<T> {
    fn position_at(&self, t: Epoch) -> Option<Vector3<f64>> {
        (**self).position_at(t)
    }
}

/// Illumination source standing still in the body centered frame.
/// Handy for tests and for batch processing with known geometry.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FixedSource(pub Vector3<f64>);

impl IlluminationSource for FixedSource {
    fn position_at(&self, _: Epoch) -> Option<Vector3<f64>> {
        Some(self.0)
    }
}
