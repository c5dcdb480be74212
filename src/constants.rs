/// Moon mean radius (meters)
pub const MOON_MEAN_RADIUS_M: f64 = 1737150.0;

/// Moon gravitational constant (m^3 s-2)
pub const MOON_GRAVITATION_MU_M3_S2: f64 = 4.90277790E12;

/// Meters to astronomical units
pub const M_TO_AU: f64 = 6.68458712267060E-12;

/// Kepler solver: Newton-Raphson step tolerance (radians)
pub const KEPLER_TOLERANCE_RAD: f64 = 1.0E-15;

/// Kepler solver: residual (in units of the double precision epsilon,
/// scaled by max(|M|, |E|, 1)) below which an iterate is accepted
pub const KEPLER_RESIDUAL_ULPS: f64 = 4.0;

/// Kepler solver: maximal number of Newton-Raphson iterations
pub const KEPLER_MAX_ITERATIONS: usize = 100;

/// Surface patch edge length (degrees)
pub const PATCH_SIZE_DEG: i32 = 5;

/// Distance along the solar direction used to construct
/// the subsurface illumination point (meters)
pub const ILLUMINATION_OFFSET_M: f64 = 1000.0;

/// Default illumination grid spacing (pixels)
pub const DEFAULT_GRID_SPACING: u32 = 50;
