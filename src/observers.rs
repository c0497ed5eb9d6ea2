//! # Ground observers and look angles
//!
//! An [`Observer`] is a fixed ground station. It can materialize its own inertial
//! state at any instant ([`Observer::position_at`]) and reduce a satellite state to
//! a local look angle ([`Observer::look_angle`]).
//!
//! The reduction projects the relative position onto the observer's local
//! south/east/zenith axes, obtained from the geodetic latitude and the local
//! sidereal angle (GMST + east longitude). Azimuth is measured clockwise from true
//! north; range rate is the radial component of the relative velocity, positive
//! when the satellite recedes.
//!
//! Both states entering the projection must refer to the same instant: the
//! sidereal rotation moves the observer by about half a kilometer per second, so
//! mixing timestamps yields geometry for a station that is not there.
//! [`Observer::look_angle`] guarantees this by construction;
//! [`Observer::topocentric`] takes both states explicitly and enforces it.

use hifitime::Epoch;

use crate::constants::Radian;
use crate::coordinates::{Geodetic, Topocentric};
use crate::eci::Eci;
use crate::sattrack_errors::SatTrackError;
use crate::time::{gmst_at, wrap_two_pi};

/// Largest accepted timestamp difference between the two states of a look-angle
/// computation, in seconds.
const TIME_MISMATCH_TOLERANCE: f64 = 1e-3;

/// A fixed ground station on the WGS-72 ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    /// Station location.
    pub location: Geodetic,
}

impl Observer {
    pub fn new(location: Geodetic) -> Self {
        Observer { location }
    }

    /// Station from latitude/longitude in **degrees** and altitude in kilometers.
    pub fn from_degrees(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Observer {
            location: Geodetic::from_degrees(latitude, longitude, altitude),
        }
    }

    /// Inertial state of the station at `epoch`, rotation velocity included.
    pub fn position_at(&self, epoch: Epoch) -> Eci {
        Eci::from_geodetic(epoch, &self.location)
    }

    /// Look angle from this station to a satellite state.
    ///
    /// The station state is evaluated at the satellite state's own epoch, so the
    /// two timestamps agree by construction.
    pub fn look_angle(&self, satellite: &Eci) -> Topocentric {
        let station = self.position_at(satellite.epoch);
        // Same epoch on both sides, the mismatch check cannot fire
        project(&self.location, &station, satellite)
    }

    /// Look angle from an explicit pair of states.
    ///
    /// Return
    /// ------
    /// * The look angle, or [`SatTrackError::TimeMismatch`] when the two states are
    ///   more than a millisecond apart.
    pub fn topocentric(
        &self,
        station: &Eci,
        satellite: &Eci,
    ) -> Result<Topocentric, SatTrackError> {
        let delta_seconds = (satellite.epoch - station.epoch).to_seconds().abs();
        if delta_seconds > TIME_MISMATCH_TOLERANCE {
            return Err(SatTrackError::TimeMismatch {
                delta_seconds,
                tolerance_seconds: TIME_MISMATCH_TOLERANCE,
            });
        }
        Ok(project(&self.location, station, satellite))
    }
}

/// Project the relative state onto the station's south/east/zenith axes.
fn project(location: &Geodetic, station: &Eci, satellite: &Eci) -> Topocentric {
    let range_vec = satellite.position - station.position;
    let rate_vec = satellite.velocity - station.velocity;
    let range = range_vec.norm();

    let theta: Radian = wrap_two_pi(gmst_at(&station.epoch) + location.longitude);
    let (sin_lat, cos_lat) = location.latitude.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();

    let top_s =
        sin_lat * cos_theta * range_vec.x + sin_lat * sin_theta * range_vec.y
            - cos_lat * range_vec.z;
    let top_e = -sin_theta * range_vec.x + cos_theta * range_vec.y;
    let top_z =
        cos_lat * cos_theta * range_vec.x + cos_lat * sin_theta * range_vec.y
            + sin_lat * range_vec.z;

    Topocentric {
        azimuth: wrap_two_pi(top_e.atan2(-top_s)),
        elevation: (top_z / range).asin(),
        range,
        range_rate: range_vec.dot(&rate_vec) / range,
    }
}

#[cfg(test)]
mod observers_test {
    use super::*;
    use crate::time::tle_epoch;
    use approx::assert_abs_diff_eq;
    use hifitime::Unit;

    #[test]
    fn test_zenith_pass() {
        // A satellite on the station's own ellipsoid normal sits at the zenith:
        // elevation 90 deg, range equal to the altitude difference, zero range rate
        let epoch = tle_epoch(22, 320.0);
        let observer = Observer::from_degrees(51.0, -3.0, 0.010);
        let overhead = Eci::from_geodetic(epoch, &Geodetic::from_degrees(51.0, -3.0, 400.010));

        let look = observer.look_angle(&overhead);
        assert_abs_diff_eq!(look.elevation_degrees(), 90.0, epsilon = 1e-6);
        assert_abs_diff_eq!(look.range, 400.0, epsilon = 1e-9);
        assert_abs_diff_eq!(look.range_rate, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_due_east_target() {
        // Equatorial station, target on the equator further east: azimuth exactly 90 deg,
        // below the horizon
        let epoch = tle_epoch(22, 100.25);
        let observer = Observer::from_degrees(0.0, 0.0, 0.0);
        let target = Eci::from_geodetic(epoch, &Geodetic::from_degrees(0.0, 20.0, 0.0));

        let look = observer.look_angle(&target);
        assert_abs_diff_eq!(look.azimuth_degrees(), 90.0, epsilon = 1e-9);
        assert!(look.elevation < 0.0);
    }

    #[test]
    fn test_time_mismatch_rejected() {
        let epoch = tle_epoch(22, 50.0);
        let observer = Observer::from_degrees(10.0, 10.0, 0.0);
        let station = observer.position_at(epoch);
        let satellite =
            Eci::from_geodetic(epoch + Unit::Second * 1.0, &Geodetic::from_degrees(12.0, 10.0, 400.0));

        let err = observer.topocentric(&station, &satellite).unwrap_err();
        match err {
            SatTrackError::TimeMismatch {
                delta_seconds,
                tolerance_seconds,
            } => {
                assert_abs_diff_eq!(delta_seconds, 1.0, epsilon = 1e-9);
                assert_eq!(tolerance_seconds, 1e-3);
            }
            other => panic!("unexpected error {other:?}"),
        }

        // Matching timestamps pass through
        let satellite = Eci::from_geodetic(epoch, &Geodetic::from_degrees(12.0, 10.0, 400.0));
        assert!(observer.topocentric(&station, &satellite).is_ok());
    }
}
