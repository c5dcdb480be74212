//! Unperturbed two-body (Kepler) orbit propagation
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use log::{debug, warn};
use nalgebra::{Matrix3, Vector3};
use std::f64::consts::TAU;

use crate::{cfg::Body, error::Error, prelude::Epoch};

mod kepler;
pub use kepler::{eccentric_anomaly, normalize_angle, solve_eccentric_anomaly, true_anomaly};

fn default_epoch() -> Epoch {
    // J2000 (MJD 51544.5)
    Epoch::from_mjd_utc(51544.5)
}

/// Classical Kepler elements, referenced to the body center.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrbitalElements {
    /// Reference [Epoch] of these elements
    #[cfg_attr(feature = "serde", serde(default = "default_epoch"))]
    pub epoch: Epoch,
    /// Semi-major axis a (meters)
    pub semi_major_axis_m: f64,
    /// Eccentricity e, in ]0, 1]
    pub eccentricity: f64,
    /// Argument of periapsis ω (radians)
    pub periapsis_arg_rad: f64,
    /// Longitude of ascending node Ω (radians)
    pub ascending_node_rad: f64,
    /// Inclination i (radians)
    pub inclination_rad: f64,
    /// Mean anomaly at epoch M0 (radians)
    pub m0_rad: f64,
}

impl Default for OrbitalElements {
    /// Near circular, equatorial orbit 2000 km above the lunar surface.
    fn default() -> Self {
        Self {
            epoch: default_epoch(),
            semi_major_axis_m: 2.0E6 + crate::constants::MOON_MEAN_RADIUS_M,
            eccentricity: 1.0E-6,
            periapsis_arg_rad: 0.0,
            ascending_node_rad: 0.0,
            inclination_rad: 0.0,
            m0_rad: 0.0,
        }
    }
}

fn check_angle(element: &'static str, value: f64) -> Result<(), Error> {
    if (0.0..TAU).contains(&value) {
        Ok(())
    } else {
        Err(Error::AngleOutOfRange { element, value })
    }
}

impl OrbitalElements {
    /// Verifies these elements describe a circular or elliptic orbit
    /// that does not intersect the [Body].
    pub fn validate(&self, body: &Body) -> Result<(), Error> {
        if self.epoch.to_mjd_utc_days() < 0.0 {
            return Err(Error::NegativeEpoch);
        }
        // written so that NaN is rejected too
        if !(self.semi_major_axis_m > body.radius_m) {
            return Err(Error::InvalidSemiMajorAxis(self.semi_major_axis_m));
        }
        if !(self.eccentricity > 0.0 && self.eccentricity <= 1.0) {
            return Err(Error::InvalidEccentricity(self.eccentricity));
        }
        check_angle("argument of periapsis", self.periapsis_arg_rad)?;
        check_angle("longitude of ascending node", self.ascending_node_rad)?;
        check_angle("inclination", self.inclination_rad)?;
        check_angle("mean anomaly at epoch", self.m0_rad)?;
        Ok(())
    }

    /// Mean motion n = sqrt(μ / a³) (rad.s⁻¹)
    pub fn mean_motion_rad_s(&self, body: &Body) -> f64 {
        (body.gravitational_parameter_m3_s2 / self.semi_major_axis_m.powi(3)).sqrt()
    }

    /// Orbital period (s)
    pub fn period_s(&self, body: &Body) -> f64 {
        TAU / self.mean_motion_rad_s(body)
    }

    /// 3-1-3 (Ω, i, ω) rotation from the orbital plane to the reference frame,
    /// in closed form.
    pub fn perifocal_to_reference(&self) -> Matrix3<f64> {
        let (sin_w, cos_w) = self.periapsis_arg_rad.sin_cos();
        let (sin_o, cos_o) = self.ascending_node_rad.sin_cos();
        let (sin_i, cos_i) = self.inclination_rad.sin_cos();

        Matrix3::new(
            cos_w * cos_o - sin_w * cos_i * sin_o,
            -(sin_w * cos_o + cos_w * cos_i * sin_o),
            sin_i * sin_o,
            cos_w * sin_o + sin_w * cos_i * cos_o,
            cos_w * cos_i * cos_o - sin_w * sin_o,
            -sin_i * cos_o,
            sin_w * sin_i,
            cos_w * sin_i,
            cos_i,
        )
    }
}

/// [KeplerOrbit] propagates validated [OrbitalElements] around a [Body].
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KeplerOrbit {
    elements: OrbitalElements,
    body: Body,
}

impl KeplerOrbit {
    /// Builds a new [KeplerOrbit], rejecting invalid [OrbitalElements].
    pub fn new(elements: OrbitalElements, body: Body) -> Result<Self, Error> {
        elements.validate(&body)?;
        Ok(Self { elements, body })
    }

    /// Derives the [OrbitalElements] from a (position, velocity) pair
    /// expressed at `epoch`, in meters and m.s⁻¹.
    pub fn from_state_vectors(
        epoch: Epoch,
        position_m: &Vector3<f64>,
        velocity_m_s: &Vector3<f64>,
        body: Body,
    ) -> Result<Self, Error> {
        let (r, v) = (position_m, velocity_m_s);
        let mu = body.gravitational_parameter_m3_s2;

        let r_norm = r.norm();
        let h = r.cross(v);

        if r_norm == 0.0 || h.norm() == 0.0 {
            return Err(Error::DegenerateStateVectors);
        }

        let ev = v.cross(&h) / mu - r / r_norm;
        let e = ev.norm();

        if !(e > 0.0 && e <= 1.0) {
            return Err(Error::InvalidEccentricity(e));
        }

        let n = Vector3::z().cross(&h);
        let n_norm = n.norm();

        let cos_nu = (ev.dot(r) / (e * r_norm)).clamp(-1.0, 1.0);
        let nu = if r.dot(v) >= 0.0 {
            cos_nu.acos()
        } else {
            TAU - cos_nu.acos()
        };

        let inclination = (h[2] / h.norm()).clamp(-1.0, 1.0).acos();

        let (ascending_node, periapsis_arg) = if n_norm > 0.0 {
            let cos_o = (n[0] / n_norm).clamp(-1.0, 1.0);
            let ascending_node = if n[1] >= 0.0 {
                cos_o.acos()
            } else {
                TAU - cos_o.acos()
            };

            let cos_w = (n.dot(&ev) / (n_norm * e)).clamp(-1.0, 1.0);
            let periapsis_arg = if ev[2] >= 0.0 {
                cos_w.acos()
            } else {
                TAU - cos_w.acos()
            };
            (ascending_node, periapsis_arg)
        } else {
            // equatorial: line of nodes is undefined, periapsis measured from x axis
            warn!("equatorial orbit: longitude of ascending node set to zero");
            let periapsis_arg = if h[2] >= 0.0 {
                ev[1].atan2(ev[0])
            } else {
                -ev[1].atan2(ev[0])
            };
            (0.0, periapsis_arg)
        };

        let ecc_anomaly = eccentric_anomaly(nu, e);
        let m0 = ecc_anomaly - e * ecc_anomaly.sin();

        let semi_major_axis = 1.0 / (2.0 / r_norm - v.norm_squared() / mu);

        let elements = OrbitalElements {
            epoch,
            semi_major_axis_m: semi_major_axis,
            eccentricity: e,
            periapsis_arg_rad: normalize_angle(periapsis_arg),
            ascending_node_rad: normalize_angle(ascending_node),
            inclination_rad: normalize_angle(inclination),
            m0_rad: normalize_angle(m0),
        };

        debug!(
            "{} - derived orbit a={:.6E}m e={:.6E} i={:.6E} Ω={:.6E} ω={:.6E} M0={:.6E}",
            epoch,
            elements.semi_major_axis_m,
            elements.eccentricity,
            elements.inclination_rad,
            elements.ascending_node_rad,
            elements.periapsis_arg_rad,
            elements.m0_rad
        );

        Self::new(elements, body)
    }

    /// Returns a copy of this [KeplerOrbit] with updated reference [Epoch].
    pub fn with_epoch(&self, epoch: Epoch) -> Result<Self, Error> {
        let mut elements = self.elements;
        elements.epoch = epoch;
        Self::new(elements, self.body)
    }

    pub fn elements(&self) -> &OrbitalElements {
        &self.elements
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn epoch(&self) -> Epoch {
        self.elements.epoch
    }

    /// Mean anomaly at `t` (radians), in [0, 2π[
    pub fn mean_anomaly(&self, t: Epoch) -> f64 {
        if t == self.elements.epoch {
            self.elements.m0_rad
        } else {
            let dt_s = (t - self.elements.epoch).to_seconds();
            normalize_angle(self.elements.m0_rad + dt_s * self.elements.mean_motion_rad_s(&self.body))
        }
    }

    /// Eccentric anomaly at `t` (radians), in [0, 2π[
    pub fn eccentric_anomaly(&self, t: Epoch) -> Result<f64, Error> {
        solve_eccentric_anomaly(self.mean_anomaly(t), self.elements.eccentricity)
    }

    /// Body centered position at `t`, in meters.
    pub fn position(&self, t: Epoch) -> Result<Vector3<f64>, Error> {
        let (a, e) = (self.elements.semi_major_axis_m, self.elements.eccentricity);

        let ecc_anomaly = self.eccentric_anomaly(t)?;
        let nu = true_anomaly(ecc_anomaly, e);
        let r_c = a * (1.0 - e * ecc_anomaly.cos());

        let (sin_nu, cos_nu) = nu.sin_cos();
        let perifocal = Vector3::new(r_c * cos_nu, r_c * sin_nu, 0.0);

        Ok(self.elements.perifocal_to_reference() * perifocal)
    }

    /// Body centered velocity at `t`, in m.s⁻¹.
    pub fn velocity(&self, t: Epoch) -> Result<Vector3<f64>, Error> {
        let (a, e) = (self.elements.semi_major_axis_m, self.elements.eccentricity);
        let mu = self.body.gravitational_parameter_m3_s2;

        let ecc_anomaly = self.eccentric_anomaly(t)?;
        let r_c = a * (1.0 - e * ecc_anomaly.cos());

        let (sin_e, cos_e) = ecc_anomaly.sin_cos();
        let perifocal =
            Vector3::new(-sin_e, (1.0 - e * e).sqrt() * cos_e, 0.0) * ((mu * a).sqrt() / r_c);

        Ok(self.elements.perifocal_to_reference() * perifocal)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::prelude::Duration;
    use nalgebra::Rotation3;
    use rstest::*;
    use std::f64::consts::PI;

    fn elements(e: f64, w: f64, o: f64, i: f64, m0: f64) -> OrbitalElements {
        OrbitalElements {
            semi_major_axis_m: 3.0E6,
            eccentricity: e,
            periapsis_arg_rad: w,
            ascending_node_rad: o,
            inclination_rad: i,
            m0_rad: m0,
            ..Default::default()
        }
    }

    #[rstest]
    #[case(elements(0.0, 0.0, 0.0, 0.0, 0.0), Error::InvalidEccentricity(0.0))]
    #[case(elements(1.2, 0.0, 0.0, 0.0, 0.0), Error::InvalidEccentricity(1.2))]
    #[case(elements(0.1, TAU, 0.0, 0.0, 0.0), Error::AngleOutOfRange { element: "argument of periapsis", value: TAU })]
    #[case(elements(0.1, 0.0, -0.1, 0.0, 0.0), Error::AngleOutOfRange { element: "longitude of ascending node", value: -0.1 })]
    #[case(elements(0.1, 0.0, 0.0, 7.0, 0.0), Error::AngleOutOfRange { element: "inclination", value: 7.0 })]
    #[case(elements(0.1, 0.0, 0.0, 0.0, 6.3), Error::AngleOutOfRange { element: "mean anomaly at epoch", value: 6.3 })]
    fn invalid_elements(#[case] elements: OrbitalElements, #[case] error: Error) {
        assert_eq!(KeplerOrbit::new(elements, Body::default()), Err(error));
    }

    #[test]
    fn invalid_semi_major_axis() {
        let mut elements = elements(0.1, 0.0, 0.0, 0.0, 0.0);
        elements.semi_major_axis_m = 1.0E6;
        assert_eq!(
            KeplerOrbit::new(elements, Body::default()),
            Err(Error::InvalidSemiMajorAxis(1.0E6))
        );
    }

    #[test]
    fn negative_epoch() {
        let mut elements = elements(0.1, 0.0, 0.0, 0.0, 0.0);
        elements.epoch = Epoch::from_mjd_utc(-1.0);
        assert_eq!(
            KeplerOrbit::new(elements, Body::default()),
            Err(Error::NegativeEpoch)
        );
    }

    #[test]
    fn closed_form_rotation() {
        let elements = elements(0.1, 0.7, 2.1, 0.4, 0.0);
        let rot = Rotation3::from_axis_angle(&Vector3::z_axis(), elements.ascending_node_rad)
            * Rotation3::from_axis_angle(&Vector3::x_axis(), elements.inclination_rad)
            * Rotation3::from_axis_angle(&Vector3::z_axis(), elements.periapsis_arg_rad);

        let closed_form = elements.perifocal_to_reference();
        assert!((closed_form - rot.matrix()).amax() < 1.0E-15);
    }

    #[rstest]
    #[case(0.1, 0.0, 0.0, 0.0, 0.0, Vector3::new(2.7E6, 0.0, 0.0))]
    #[case(0.1, PI / 2.0, 0.0, 0.0, 0.0, Vector3::new(0.0, 2.7E6, 0.0))]
    #[case(0.1, 0.0, 0.0, 0.0, PI, Vector3::new(-3.3E6, 0.0, 0.0))]
    #[case(0.1, 0.0, PI / 2.0, PI / 2.0, 0.0, Vector3::new(0.0, 2.7E6, 0.0))]
    #[case(0.1, PI / 2.0, 0.0, PI / 2.0, 0.0, Vector3::new(0.0, 0.0, 2.7E6))]
    fn position_at_epoch(
        #[case] e: f64,
        #[case] w: f64,
        #[case] o: f64,
        #[case] i: f64,
        #[case] m0: f64,
        #[case] expected: Vector3<f64>,
    ) {
        let elements = elements(e, w, o, i, m0);
        let orbit = KeplerOrbit::new(elements, Body::default()).unwrap();
        let position = orbit.position(elements.epoch).unwrap();
        assert!(
            (position - expected).norm() < 1.0E-6,
            "{} != {}",
            position,
            expected
        );
    }

    #[test]
    fn periodicity() {
        let elements = elements(0.3, 1.0, 2.0, 0.5, 0.25);
        let orbit = KeplerOrbit::new(elements, Body::default()).unwrap();

        let period = Duration::from_seconds(elements.period_s(&Body::default()));
        let p0 = orbit.position(elements.epoch).unwrap();
        let p1 = orbit.position(elements.epoch + period).unwrap();
        assert!((p0 - p1).norm() < 1.0E-2, "{} != {}", p0, p1);

        // half a period later, from periapsis: apoapsis
        let elements = elements_at_periapsis();
        let orbit = KeplerOrbit::new(elements, Body::default()).unwrap();
        let half = Duration::from_seconds(elements.period_s(&Body::default()) / 2.0);
        let apo = orbit.position(elements.epoch + half).unwrap();
        let expected = elements.semi_major_axis_m * (1.0 + elements.eccentricity);
        assert!((apo.norm() - expected).abs() < 1.0E-2);
    }

    fn elements_at_periapsis() -> OrbitalElements {
        elements(0.2, 0.0, 0.0, 0.0, 0.0)
    }

    #[test]
    fn energy_conservation() {
        let elements = elements(0.4, 0.3, 1.2, 1.0, 2.0);
        let body = Body::default();
        let orbit = KeplerOrbit::new(elements, body).unwrap();
        let mu = body.gravitational_parameter_m3_s2;

        for minutes in [0.0, 13.0, 47.0, 120.0, 333.0] {
            let t = elements.epoch + Duration::from_seconds(minutes * 60.0);
            let (r, v) = (orbit.position(t).unwrap(), orbit.velocity(t).unwrap());
            let energy = v.norm_squared() / 2.0 - mu / r.norm();
            let expected = -mu / 2.0 / elements.semi_major_axis_m;
            assert!((energy - expected).abs() / expected.abs() < 1.0E-10);
        }
    }

    #[test]
    fn state_vectors_round_trip() {
        let epoch = Epoch::from_mjd_utc(55000.0);
        let body = Body::default();

        let r = Vector3::new(2.0E6, 0.5E6, 0.3E6);
        let v = Vector3::new(-100.0, 1400.0, 500.0);

        let orbit = KeplerOrbit::from_state_vectors(epoch, &r, &v, body).unwrap();
        assert_eq!(orbit.epoch(), epoch);

        let position = orbit.position(epoch).unwrap();
        assert!((position - r).norm() < 1.0E-3, "{} != {}", position, r);

        let velocity = orbit.velocity(epoch).unwrap();
        assert!((velocity - v).norm() < 1.0E-6, "{} != {}", velocity, v);

        // same orbit, viewed on the way down (r.v < 0)
        let r = Vector3::new(2.1E6, -0.4E6, 0.2E6);
        let v = Vector3::new(-300.0, 1300.0, -200.0);
        let orbit = KeplerOrbit::from_state_vectors(epoch, &r, &v, body).unwrap();
        let position = orbit.position(epoch).unwrap();
        assert!((position - r).norm() < 1.0E-3, "{} != {}", position, r);
    }

    #[test]
    fn degenerate_state_vectors() {
        let epoch = Epoch::from_mjd_utc(55000.0);
        let r = Vector3::new(3.0E6, 0.0, 0.0);
        assert_eq!(
            KeplerOrbit::from_state_vectors(epoch, &r, &Vector3::zeros(), Body::default()),
            Err(Error::DegenerateStateVectors)
        );
    }
}
