//! Geodetic and topocentric coordinate value types.
//!
//! [`Geodetic`] describes a time-independent ground point on the WGS-72 ellipsoid;
//! [`Topocentric`] is an observer-relative look angle, valid only for the
//! (observer, satellite state, time) triple that produced it. Both are plain value
//! types returned by copy, with angles stored in **radians**; conversion to degrees
//! happens in the constructors, accessors and `Display` implementations only.

use std::fmt;

use crate::constants::{Degree, Kilometer, KilometerPerSecond, Radian, RADEG};

/// Latitude, longitude and altitude of a ground point.
///
/// Latitude is geodetic (relative to the WGS-72 ellipsoid normal), positive north;
/// longitude is positive east of Greenwich; altitude is in kilometers above the
/// ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geodetic {
    /// Geodetic latitude in radians, positive north.
    pub latitude: Radian,
    /// Longitude in radians, positive east.
    pub longitude: Radian,
    /// Altitude above the reference ellipsoid, in kilometers.
    pub altitude: Kilometer,
}

impl Geodetic {
    /// Build a ground point from angles in **degrees** and altitude in kilometers.
    pub fn from_degrees(latitude: Degree, longitude: Degree, altitude: Kilometer) -> Self {
        Geodetic {
            latitude: latitude * RADEG,
            longitude: longitude * RADEG,
            altitude,
        }
    }

    /// Geodetic latitude in degrees.
    pub fn latitude_degrees(&self) -> Degree {
        self.latitude / RADEG
    }

    /// Longitude in degrees, in (−180°, 180°].
    pub fn longitude_degrees(&self) -> Degree {
        self.longitude / RADEG
    }
}

impl fmt::Display for Geodetic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lat: {:8.3}, Lon: {:8.3}, Alt: {:10.3}",
            self.latitude_degrees(),
            self.longitude_degrees(),
            self.altitude
        )
    }
}

/// Observer-relative look angle: azimuth, elevation, range and range rate.
///
/// Azimuth is measured clockwise from true north in [0, 2π); elevation is positive
/// above the local horizon in [−π/2, π/2]. Range rate is the radial component of the
/// relative velocity: positive when the satellite is receding from the observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Topocentric {
    /// Azimuth in radians, clockwise from north, in [0, 2π).
    pub azimuth: Radian,
    /// Elevation above the horizon in radians, in [−π/2, π/2].
    pub elevation: Radian,
    /// Slant range to the satellite, in kilometers.
    pub range: Kilometer,
    /// Range rate in kilometers per second (positive = receding).
    pub range_rate: KilometerPerSecond,
}

impl Topocentric {
    /// Azimuth in degrees, in [0°, 360°).
    pub fn azimuth_degrees(&self) -> Degree {
        self.azimuth / RADEG
    }

    /// Elevation in degrees, in [−90°, 90°].
    pub fn elevation_degrees(&self) -> Degree {
        self.elevation / RADEG
    }
}

impl fmt::Display for Topocentric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Az: {:8.3}, El: {:8.3}, Rng: {:10.3}, Rng Rt: {:7.3}",
            self.azimuth_degrees(),
            self.elevation_degrees(),
            self.range,
            self.range_rate
        )
    }
}

#[cfg(test)]
mod coordinates_test {
    use super::*;

    #[test]
    fn test_geodetic_from_degrees() {
        let geo = Geodetic::from_degrees(51.0, -3.0, 0.010);
        assert!((geo.latitude - 0.8901179185171081).abs() < 1e-12);
        assert!((geo.longitude + 0.05235987755982988).abs() < 1e-12);
        assert!((geo.latitude_degrees() - 51.0).abs() < 1e-12);
        assert!((geo.longitude_degrees() + 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_topocentric_display() {
        let look = Topocentric {
            azimuth: 204.313 * RADEG,
            elevation: 9.568 * RADEG,
            range: 1482.658,
            range_rate: -5.797,
        };
        assert_eq!(
            look.to_string(),
            "Az:  204.313, El:    9.568, Rng:   1482.658, Rng Rt:  -5.797"
        );
    }
}
