//! # Earth-centered inertial state vectors
//!
//! [`Eci`] couples a Cartesian position/velocity pair (TEME frame, kilometers and
//! kilometers/second) with the UTC instant it is valid at. Carrying the epoch inside
//! the state is what makes the frame conversions in this module self-contained: the
//! Greenwich sidereal angle needed to rotate between inertial and Earth-fixed axes
//! is always derived from the state's own timestamp, never passed in separately.
//!
//! Conversions to and from [`Geodetic`] use the oblate-earth model of the WGS-72
//! ellipsoid. The geodetic → inertial direction is closed-form; the inverse
//! recovers latitude by fixed-point iteration on the ellipsoid normal.

use std::f64::consts::PI;
use std::fmt;

use hifitime::Epoch;
use nalgebra::Vector3;

use crate::constants::{
    Radian, DPI, EARTH_FLATTENING, EARTH_RADIUS_KM, EARTH_ROTATION_RAD_S,
};
use crate::coordinates::Geodetic;
use crate::time::{gmst_at, wrap_two_pi};

/// Latitude fixed-point convergence threshold, radians.
const LATITUDE_TOLERANCE: f64 = 1e-10;

/// Latitude fixed-point iteration cap; states above the ellipsoid converge well
/// within this.
const MAX_LATITUDE_ITERATIONS: usize = 10;

/// An inertial (TEME) state vector at a given instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Eci {
    /// Instant the state is valid at, UTC.
    pub epoch: Epoch,
    /// Position in kilometers.
    pub position: Vector3<f64>,
    /// Velocity in kilometers per second.
    pub velocity: Vector3<f64>,
}

impl Eci {
    pub fn new(epoch: Epoch, position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        Eci {
            epoch,
            position,
            velocity,
        }
    }

    /// Inertial state of a ground point at `epoch`.
    ///
    /// Position comes from the oblate-earth radii of curvature; velocity is the
    /// Earth-rotation term `ω⊕ × r`, which lies in the equatorial plane.
    pub fn from_geodetic(epoch: Epoch, geo: &Geodetic) -> Self {
        let theta = wrap_two_pi(gmst_at(&epoch) + geo.longitude);

        let (sin_lat, cos_lat) = geo.latitude.sin_cos();
        let c = 1.0 / (1.0 + EARTH_FLATTENING * (EARTH_FLATTENING - 2.0) * sin_lat * sin_lat)
            .sqrt();
        let s = (1.0 - EARTH_FLATTENING) * (1.0 - EARTH_FLATTENING) * c;

        let achcp = (EARTH_RADIUS_KM * c + geo.altitude) * cos_lat;
        let position = Vector3::new(
            achcp * theta.cos(),
            achcp * theta.sin(),
            (EARTH_RADIUS_KM * s + geo.altitude) * sin_lat,
        );
        let velocity = Vector3::new(
            -EARTH_ROTATION_RAD_S * position.y,
            EARTH_ROTATION_RAD_S * position.x,
            0.0,
        );

        Eci {
            epoch,
            position,
            velocity,
        }
    }

    /// Sub-satellite point: geodetic latitude, longitude and altitude under this state.
    ///
    /// Latitude is recovered iteratively; the loop converges in a handful of steps
    /// for any point above the ellipsoid and is capped at
    /// [`MAX_LATITUDE_ITERATIONS`] for any other state.
    pub fn to_geodetic(&self) -> Geodetic {
        let theta = self.position.y.atan2(self.position.x);
        let longitude = wrap_neg_pos_pi(theta - gmst_at(&self.epoch));

        let r = (self.position.x * self.position.x + self.position.y * self.position.y).sqrt();
        let e2 = EARTH_FLATTENING * (2.0 - EARTH_FLATTENING);

        let mut latitude: Radian = self.position.z.atan2(r);
        let mut c = 1.0;
        for _ in 0..MAX_LATITUDE_ITERATIONS {
            let phi = latitude;
            let sin_phi = phi.sin();
            c = 1.0 / (1.0 - e2 * sin_phi * sin_phi).sqrt();
            latitude = (self.position.z + EARTH_RADIUS_KM * c * e2 * sin_phi).atan2(r);
            if (latitude - phi).abs() < LATITUDE_TOLERANCE {
                break;
            }
        }
        let altitude = r / latitude.cos() - EARTH_RADIUS_KM * c;

        Geodetic {
            latitude,
            longitude,
            altitude,
        }
    }
}

impl fmt::Display for Eci {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pos: {:11.3}, {:11.3}, {:11.3}, Vel: {:8.3}, {:8.3}, {:8.3}",
            self.position.x,
            self.position.y,
            self.position.z,
            self.velocity.x,
            self.velocity.y,
            self.velocity.z
        )
    }
}

/// Reduce an angle to the interval (−π, π].
fn wrap_neg_pos_pi(angle: Radian) -> Radian {
    let wrapped = wrap_two_pi(angle);
    if wrapped > PI {
        wrapped - DPI
    } else {
        wrapped
    }
}

#[cfg(test)]
mod eci_test {
    use super::*;
    use crate::time::tle_epoch;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_equator_prime_meridian() {
        let epoch = Epoch::from_mjd_utc(57028.478514610404);
        let geo = Geodetic::from_degrees(0.0, 0.0, 0.0);
        let eci = Eci::from_geodetic(epoch, &geo);

        // On the equator the position magnitude is the equatorial radius and the
        // rotation velocity is omega * r, in the equatorial plane
        assert_abs_diff_eq!(eci.position.norm(), EARTH_RADIUS_KM, epsilon = 1e-9);
        assert_abs_diff_eq!(
            eci.velocity.norm(),
            EARTH_ROTATION_RAD_S * EARTH_RADIUS_KM,
            epsilon = 1e-9
        );
        assert_eq!(eci.velocity.z, 0.0);

        // The x/y direction is the sidereal angle
        let gmst = gmst_at(&epoch);
        assert_abs_diff_eq!(eci.position.x, EARTH_RADIUS_KM * gmst.cos(), epsilon = 1e-9);
        assert_abs_diff_eq!(eci.position.y, EARTH_RADIUS_KM * gmst.sin(), epsilon = 1e-9);
    }

    #[test]
    fn test_geodetic_roundtrip() {
        let epoch = tle_epoch(22, 314.50373836);
        for &(lat, lon, alt) in &[
            (51.0, -3.0, 0.010),
            (-33.8688, 151.2093, 0.058),
            (78.2232, 15.6267, 0.0),
            (0.0, 179.9, 0.4),
        ] {
            let geo = Geodetic::from_degrees(lat, lon, alt);
            let back = Eci::from_geodetic(epoch, &geo).to_geodetic();
            assert_abs_diff_eq!(back.latitude_degrees(), lat, epsilon = 1e-8);
            assert_abs_diff_eq!(back.longitude_degrees(), lon, epsilon = 1e-8);
            assert_abs_diff_eq!(back.altitude, alt, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_to_geodetic_terminates_below_surface() {
        // A state deep inside the ellipsoid has no meaningful sub-satellite
        // point, but the latitude recovery must still return in bounded time
        let epoch = tle_epoch(22, 1.0);
        let eci = Eci::new(epoch, Vector3::new(1.0, 1.0, 1.0), Vector3::zeros());
        let geo = eci.to_geodetic();
        assert!(geo.latitude.is_finite());
        assert!(geo.longitude.is_finite());
        assert!(geo.altitude.is_finite());
    }

    #[test]
    fn test_poles() {
        let epoch = tle_epoch(22, 1.0);
        let geo = Geodetic::from_degrees(90.0, 0.0, 0.0);
        let eci = Eci::from_geodetic(epoch, &geo);

        // Polar radius = equatorial radius * (1 - f); no rotation velocity at the pole
        assert_abs_diff_eq!(
            eci.position.z,
            EARTH_RADIUS_KM * (1.0 - EARTH_FLATTENING),
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(eci.velocity.norm(), 0.0, epsilon = 1e-9);

        let back = eci.to_geodetic();
        assert_abs_diff_eq!(back.latitude_degrees(), 90.0, epsilon = 1e-6);
    }
}
