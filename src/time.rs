//! Time utilities: TLE epoch decoding, Julian-date helpers and Greenwich sidereal time.
//!
//! All calendar arithmetic is delegated to [`hifitime`]; this module only adds the
//! TLE-specific epoch convention (2-digit year + fractional day-of-year) and the
//! IAU-1982 sidereal-time polynomial needed to rotate inertial frames into
//! Earth-fixed ones.

use hifitime::{Epoch, Unit};

use crate::constants::{JulianDate, Radian, DPI, JDTOMJD, Minutes, T2000};

/// Decode a TLE epoch (2-digit year, fractional day-of-year) into a UTC [`Epoch`].
///
/// The TLE year convention is valid from 1957 through 2056: two-digit years below 57
/// belong to the 21st century, the rest to the 20th.
///
/// Arguments
/// ---------
/// * `year`: two-digit epoch year as broadcast (0–99).
/// * `day_of_year`: fractional day of year, 1-based (1.0 is Jan 1, 00:00 UTC).
///
/// Return
/// ------
/// * The epoch as a [`hifitime::Epoch`] in the UTC time scale.
pub fn tle_epoch(year: u8, day_of_year: f64) -> Epoch {
    let full_year = if year < 57 {
        2000 + year as i32
    } else {
        1900 + year as i32
    };
    Epoch::from_gregorian_utc_at_midnight(full_year, 1, 1) + Unit::Day * (day_of_year - 1.0)
}

/// Split a UTC [`Epoch`] back into the TLE convention (2-digit year, fractional day-of-year).
///
/// Inverse of [`tle_epoch`], used when re-formatting an element set to its
/// fixed-column text form.
pub fn tle_epoch_fields(epoch: &Epoch) -> (u8, f64) {
    let (year, ..) = epoch.to_gregorian_utc();
    let start_of_year = Epoch::from_gregorian_utc_at_midnight(year, 1, 1);
    let day_of_year = (*epoch - start_of_year).to_seconds() / 86_400.0 + 1.0;
    ((year % 100) as u8, day_of_year)
}

/// Julian Date (UTC) of an epoch.
pub fn julian_date(epoch: &Epoch) -> JulianDate {
    epoch.to_jde_utc_days()
}

/// Signed elapsed time from `epoch` to `target`, in minutes.
pub fn minutes_between(epoch: &Epoch, target: &Epoch) -> Minutes {
    (*target - *epoch).to_seconds() / 60.0
}

/// Compute the Greenwich Mean Sidereal Time (GMST) in radians
/// for a given Modified Julian Date (UT1 time scale).
///
/// This function implements the IAU 1982 polynomial formula for the mean sidereal
/// time at 0h UT1, plus the fractional-day correction term due to Earth's rotation
/// rate.
///
/// # Arguments
/// * `tjm` - Modified Julian Date (MJD, UT1 time scale)
///
/// # Returns
/// * GMST angle in radians, normalized to the interval [0, 2π).
///
/// # References
/// * IAU 1982, IERS Conventions 1996/2000.
/// * Explanatory Supplement to the Astronomical Almanac (1992).
pub fn gmst(tjm: f64) -> Radian {
    // Polynomial coefficients for GMST at 0h UT1 (in seconds)
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    // Ratio of sidereal day to solar day
    const RAP: f64 = 1.00273790934;

    // Integer MJD (0h UT1) and centuries since J2000.0
    let itjm = tjm.floor();
    let t = (itjm - T2000) / 36525.0;

    // GMST at 0h UT1 from the polynomial, converted from seconds to radians
    let mut gmst0 = ((C3 * t + C2) * t + C1) * t + C0;
    gmst0 *= DPI / 86400.0;

    // Contribution of the fraction of the day, scaled by the sidereal rate
    let h = tjm.fract() * DPI;
    let mut gmst = gmst0 + h * RAP;

    // Normalize to [0, 2π)
    let mut i: i64 = (gmst / DPI).floor() as i64;
    if gmst < 0.0 {
        i -= 1;
    }
    gmst -= i as f64 * DPI;

    gmst
}

/// Greenwich Mean Sidereal Time of an [`Epoch`], in radians.
///
/// UTC is used as a stand-in for UT1; the difference (below 0.9 s) is an order of
/// magnitude smaller than the intrinsic accuracy of the SGP4 theory.
pub fn gmst_at(epoch: &Epoch) -> Radian {
    gmst(julian_date(epoch) - JDTOMJD)
}

/// Reduce an angle to the interval [0, 2π).
pub fn wrap_two_pi(angle: Radian) -> Radian {
    angle.rem_euclid(DPI)
}

#[cfg(test)]
mod time_test {
    use super::*;

    #[test]
    fn test_tle_epoch() {
        // ISS epoch 22314.50373836 -> 2022-11-10 12:05:22.994304 UTC
        let epoch = tle_epoch(22, 314.50373836);
        let (y, m, d, h, mi, s, ns) = epoch.to_gregorian_utc();
        assert_eq!((y, m, d, h, mi, s), (2022, 11, 10, 12, 5, 22));
        assert!((ns as f64 - 994_304_000.0).abs() < 2_000.0);

        // Pre-2000 epoch from the Spacetrack Report #3 test set
        let epoch = tle_epoch(80, 275.98708465);
        let (y, m, d, ..) = epoch.to_gregorian_utc();
        assert_eq!((y, m, d), (1980, 10, 1));
    }

    #[test]
    fn test_tle_epoch_roundtrip() {
        let (year, doy) = tle_epoch_fields(&tle_epoch(22, 314.50373836));
        assert_eq!(year, 22);
        assert!((doy - 314.50373836).abs() < 1e-8);
    }

    #[test]
    fn test_minutes_between() {
        let epoch = tle_epoch(22, 100.0);
        let later = epoch + Unit::Minute * 42.5;
        assert!((minutes_between(&epoch, &later) - 42.5).abs() < 1e-9);
        assert!((minutes_between(&later, &epoch) + 42.5).abs() < 1e-9);
    }

    #[test]
    fn test_gmst() {
        let tut = 57028.478514610404;
        let res_gmst = gmst(tut);
        assert!((res_gmst - 4.851925725092499).abs() < 1e-12);

        let res_gmst = gmst(T2000);
        assert!((res_gmst - 4.894961212789145).abs() < 1e-12);
    }

    #[test]
    fn test_wrap_two_pi() {
        assert!((wrap_two_pi(3.0 * std::f64::consts::PI) - std::f64::consts::PI).abs() < 1e-12);
        assert!(wrap_two_pi(-0.5) >= 0.0);
    }
}
