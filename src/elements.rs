//! # Propagation-ready orbital elements
//!
//! [`OrbitalElements`] converts the broadcast units of a [`Tle`] (degrees,
//! revolutions/day) into the internal system of the SGP4/SDP4 theory (radians,
//! radians/minute, Earth radii) and recovers the original mean motion and
//! semi-major axis by removing the J2 contribution that the element fit folded in.
//!
//! The recovery is the standard two-stage evaluation: a Kepler first guess for the
//! semi-major axis, one polynomial refinement of the J2 correction `δ₁`, then the
//! final correction `δ₀` applied to both mean motion and semi-major axis. Element
//! sets are fitted with this exact procedure in mind, so it must not be replaced by
//! a higher-order iteration.
//!
//! Construction also decides, once and for all, which propagation branch applies:
//! orbits with a period of 225 minutes or more take the deep-space (SDP4) path.

use std::fmt;

use hifitime::Epoch;

use crate::constants::{
    Kilometer, Minutes, Radian, CK2, DPI, EARTH_RADIUS_KM, MINUTES_PER_DAY, RADEG, TOTHRD, XKE,
};
use crate::sattrack_errors::SatTrackError;
use crate::tle::Tle;

/// Orbital period threshold (minutes) above which the deep-space theory applies.
const DEEP_SPACE_PERIOD: Minutes = 225.0;

/// Mean orbital elements in the units of the propagation theory.
///
/// Angles are in radians, mean motions in radians/minute, the recovered semi-major
/// axis in Earth radii. All fields are plain values captured at construction; the
/// struct is immutable and cheap to copy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    /// Element-set epoch, UTC.
    pub epoch: Epoch,
    /// Mean anomaly at epoch, radians.
    pub mean_anomaly: Radian,
    /// Right ascension of the ascending node, radians.
    pub ascending_node: Radian,
    /// Argument of perigee, radians.
    pub argument_perigee: Radian,
    /// Eccentricity, dimensionless.
    pub eccentricity: f64,
    /// Inclination, radians.
    pub inclination: Radian,
    /// Mean motion as broadcast, radians per minute (Kozai convention).
    pub mean_motion: f64,
    /// B* drag term, (Earth radii)⁻¹.
    pub bstar: f64,
    /// Semi-major axis with the J2 contribution removed, Earth radii.
    pub recovered_semi_major_axis: f64,
    /// Mean motion with the J2 contribution removed (Brouwer convention), radians per minute.
    pub recovered_mean_motion: f64,
    /// Perigee altitude above the equatorial radius, kilometers.
    pub perigee: Kilometer,
    /// Apogee altitude above the equatorial radius, kilometers.
    pub apogee: Kilometer,
    /// Orbital period, minutes.
    pub period: Minutes,
}

impl OrbitalElements {
    /// Convert a parsed element set into propagation-ready elements.
    ///
    /// Arguments
    /// ---------
    /// * `tle`: the parsed two-line element set.
    ///
    /// Return
    /// ------
    /// * The converted elements, or [`SatTrackError::DegenerateOrbit`] if the set
    ///   cannot describe a propagatable orbit (non-positive mean motion,
    ///   eccentricity outside [0, 1), non-positive recovered semi-major axis,
    ///   perigee below the surface).
    pub fn from_tle(tle: &Tle) -> Result<OrbitalElements, SatTrackError> {
        if !(0.0..1.0).contains(&tle.eccentricity) {
            return Err(SatTrackError::DegenerateOrbit(format!(
                "eccentricity {} outside [0, 1)",
                tle.eccentricity
            )));
        }
        if tle.mean_motion <= 0.0 {
            return Err(SatTrackError::DegenerateOrbit(format!(
                "mean motion {} rev/day is not positive",
                tle.mean_motion
            )));
        }

        let eccentricity = tle.eccentricity;
        let inclination = tle.inclination * RADEG;
        let mean_anomaly = tle.mean_anomaly * RADEG;
        let ascending_node = tle.right_ascension * RADEG;
        let argument_perigee = tle.argument_perigee * RADEG;

        // rev/day -> rad/min
        let xno = tle.mean_motion * DPI / MINUTES_PER_DAY;

        // Remove the J2 contribution from the fitted mean motion
        let cosio = inclination.cos();
        let x3thm1 = 3.0 * cosio * cosio - 1.0;
        let betao2 = 1.0 - eccentricity * eccentricity;
        let betao = betao2.sqrt();

        let a1 = (XKE / xno).powf(TOTHRD);
        let del1 = 1.5 * CK2 * x3thm1 / (a1 * a1 * betao * betao2);
        let ao = a1 * (1.0 - del1 * (1.0 / 3.0 + del1 * (1.0 + 134.0 / 81.0 * del1)));
        let delo = 1.5 * CK2 * x3thm1 / (ao * ao * betao * betao2);

        let recovered_mean_motion = xno / (1.0 + delo);
        let recovered_semi_major_axis = ao / (1.0 - delo);

        if recovered_semi_major_axis <= 0.0 {
            return Err(SatTrackError::DegenerateOrbit(format!(
                "recovered semi-major axis {recovered_semi_major_axis} Earth radii is not positive"
            )));
        }

        let perigee = (recovered_semi_major_axis * (1.0 - eccentricity) - 1.0) * EARTH_RADIUS_KM;
        let apogee = (recovered_semi_major_axis * (1.0 + eccentricity) - 1.0) * EARTH_RADIUS_KM;
        let period = DPI / recovered_mean_motion;

        if perigee < 0.0 {
            return Err(SatTrackError::DegenerateOrbit(format!(
                "perigee altitude {perigee:.3} km is below the surface"
            )));
        }

        Ok(OrbitalElements {
            epoch: tle.epoch,
            mean_anomaly,
            ascending_node,
            argument_perigee,
            eccentricity,
            inclination,
            mean_motion: xno,
            bstar: tle.bstar,
            recovered_semi_major_axis,
            recovered_mean_motion,
            perigee,
            apogee,
            period,
        })
    }

    /// Whether the deep-space (SDP4) theory applies to this orbit.
    ///
    /// Decided once from the recovered period; the near-earth and deep-space
    /// branches are never mixed over the lifetime of a propagator.
    pub fn is_deep_space(&self) -> bool {
        self.period >= DEEP_SPACE_PERIOD
    }
}

impl fmt::Display for OrbitalElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MEAN ANA: {:9.3}", self.mean_anomaly)?;
        writeln!(f, "ASC NODE: {:9.3}", self.ascending_node)?;
        writeln!(f, "ARG PERI: {:9.3}", self.argument_perigee)?;
        writeln!(f, "ECCENTRI: {:9.3}", self.eccentricity)?;
        writeln!(f, "INCLINAT: {:9.3}", self.inclination)?;
        writeln!(f, "MEAN MOT: {:9.3}", self.mean_motion)?;
        writeln!(f, "BSTAR   : {:9.3}", self.bstar)?;
        writeln!(f, "RSEMIMAJ: {:9.3}", self.recovered_semi_major_axis)?;
        writeln!(f, "RMEAN MO: {:9.3}", self.recovered_mean_motion)?;
        writeln!(f, "PERIGEE : {:9.3}", self.perigee)?;
        write!(f, "PERIOD  : {:9.3}", self.period)
    }
}

#[cfg(test)]
mod elements_test {
    use super::*;
    use crate::tle::Tle;

    const ISS_LINE1: &str =
        "1 25544U 98067A   22314.50373836  .00014546  00000-0  26300-3 0  9991";
    const ISS_LINE2: &str =
        "2 25544  51.6436 331.7596 0006814  57.2751  98.3376 15.49917581367874";

    fn iss_elements() -> OrbitalElements {
        let tle = Tle::from_lines(Some("ISS"), ISS_LINE1, ISS_LINE2).unwrap();
        OrbitalElements::from_tle(&tle).unwrap()
    }

    #[test]
    fn test_unit_conversion() {
        let elements = iss_elements();
        assert!((elements.mean_anomaly - 1.7163148985091756).abs() < 1e-12);
        assert!((elements.ascending_node - 5.790297345099379).abs() < 1e-12);
        assert!((elements.argument_perigee - 0.9996390744090042).abs() < 1e-12);
        assert!((elements.inclination - 0.9013508575829435).abs() < 1e-12);
        assert!((elements.mean_motion - 0.06762791230748977).abs() < 1e-15);
    }

    #[test]
    fn test_j2_recovery() {
        let elements = iss_elements();
        assert!((elements.recovered_mean_motion - 0.06762040167138193).abs() < 1e-15);
        assert!((elements.recovered_semi_major_axis - 1.0654539508581802).abs() < 1e-12);
        assert!((elements.perigee - 412.8436067923475).abs() < 1e-9);
        assert!((elements.period - 92.91848542566014).abs() < 1e-9);
    }

    #[test]
    fn test_branch_selection() {
        // ISS: ~92.9 min period, near-earth
        assert!(!iss_elements().is_deep_space());

        // Molniya-type orbit from the Spacetrack Report #3 test set: ~10.5 h period
        let tle = Tle::from_lines(
            None,
            "1 11801U          80230.29629788  .01431103  00000-0  14311-1      13",
            "2 11801  46.7916 230.4354 7318036  47.4722  10.4117  2.28537848    13",
        )
        .unwrap();
        let elements = OrbitalElements::from_tle(&tle).unwrap();
        assert!(elements.is_deep_space());
        assert!((elements.period - 630.14).abs() < 0.01);
    }

    #[test]
    fn test_sub_surface_perigee_rejected() {
        // Mean motion high enough that the orbit radius sits below one Earth
        // radius; the set is rejected at extraction, before any propagation
        let mut tle = Tle::from_lines(Some("ISS"), ISS_LINE1, ISS_LINE2).unwrap();
        tle.mean_motion = 17.5;
        tle.eccentricity = 0.0;
        assert!(matches!(
            OrbitalElements::from_tle(&tle),
            Err(SatTrackError::DegenerateOrbit(_))
        ));
    }

    #[test]
    fn test_display_layout() {
        let expected = "MEAN ANA:     1.716\n\
                        ASC NODE:     5.790\n\
                        ARG PERI:     1.000\n\
                        ECCENTRI:     0.001\n\
                        INCLINAT:     0.901\n\
                        MEAN MOT:     0.068\n\
                        BSTAR   :     0.000\n\
                        RSEMIMAJ:     1.065\n\
                        RMEAN MO:     0.068\n\
                        PERIGEE :   412.844\n\
                        PERIOD  :    92.918";
        assert_eq!(iss_elements().to_string(), expected);
    }
}
