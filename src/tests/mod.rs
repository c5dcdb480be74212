mod fuzz;
mod scenario;


use log::LevelFilter;
use std::sync::Once;

use crate::prelude::{Config, Epoch, FixedSource, Spacecraft, Vector3};

static INIT: Once = Once::new();

pub fn init_logger() {
    INIT.call_once(|| {
        env_logger::builder()
            .is_test(true)
            .filter_level(LevelFilter::Debug)
            .init();
    });
}

/// Reference epoch of the test scenarios
pub fn reference_epoch() -> Epoch {
    Epoch::from_mjd_utc(56000.0)
}

/// Sun, roughly 1 AU away, slightly off the x axis
pub fn reference_sun() -> FixedSource {
    FixedSource(Vector3::new(1.49E11, 1.2E10, -4.0E9))
}

/// Nadir pointing spacecraft, 3000 km from the Moon center, on the x axis
pub fn reference_spacecraft() -> Spacecraft {
    Spacecraft::fixed(reference_epoch(), Vector3::new(3.0E6, 0.0, 0.0))
}

/// Small 100x100 image, 40° field of view
pub fn reference_config() -> Config {
    Config::default().with_image_size(100, 100).with_fov(40.0)
}
