//! # Constants and type definitions for sattrack
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! definitions** used throughout the `sattrack` library.
//!
//! ## Overview
//!
//! - WGS-72 gravity model constants used by the SGP4/SDP4 perturbation theory
//! - Unit conversions (degrees ↔ radians, revolutions/day ↔ radians/minute)
//! - Core type aliases used across the crate
//! - Lunar/solar and geopotential-resonance coefficients for the deep-space model
//!
//! The gravity model is WGS-72 with the original Spacetrack Report #3 values: broadcast element
//! sets are fitted against this model, so propagating them with a newer ellipsoid would
//! *decrease* accuracy.

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric normalization
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Earth equatorial radius in kilometers (WGS-72)
pub const EARTH_RADIUS_KM: f64 = 6378.135;

/// Earth flattening factor (WGS-72)
pub const EARTH_FLATTENING: f64 = 1.0 / 298.26;

/// Earth rotation rate in radians per second (IAU 1982)
pub const EARTH_ROTATION_RAD_S: f64 = 7.292115e-5;

/// Ratio of a solar day to a sidereal day
pub const SOLAR_TO_SIDEREAL: f64 = 1.00273790934;

/// Distance unit of the propagation core: one Earth equatorial radius
pub const AE: f64 = 1.0;

/// Minutes in a day
pub const MINUTES_PER_DAY: f64 = 1440.0;

/// Seconds in a day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// MJD epoch of J2000.0 (2000-01-01 12:00:00 TT)
pub const T2000: f64 = 51544.5;

/// Conversion factor between Julian Date and Modified Julian Date
pub const JDTOMJD: f64 = 2400000.5;

/// 2/3, the Kepler third-law exponent
pub const TOTHRD: f64 = 2.0 / 3.0;

// -------------------------------------------------------------------------------------------------
// WGS-72 gravity model (Spacetrack Report #3)
// -------------------------------------------------------------------------------------------------

/// √(GM) expressed in (Earth radii)^1.5 per minute: 60/√(R³/μ) with μ = 398600.8 km³/s²
pub const XKE: f64 = 0.07436691613317342;

/// Second gravitational zonal harmonic J2
pub const XJ2: f64 = 1.082616e-3;

/// Third gravitational zonal harmonic J3
pub const XJ3: f64 = -2.53881e-6;

/// Fourth gravitational zonal harmonic J4
pub const XJ4: f64 = -1.65597e-6;

/// ½·J2, the secular J2 coefficient of the theory
pub const CK2: f64 = 0.5 * XJ2 * AE * AE;

/// −⅜·J4
pub const CK4: f64 = -0.375 * XJ4 * AE * AE * AE * AE;

/// Atmospheric density reference ((q₀ − s₀)/R)⁴ with q₀ = 120 km, s₀ = 78 km
pub const QOMS2T: f64 = 1.880279159015271e-9;

/// Density reference altitude parameter s = 1 + 78 km/R, in Earth radii
pub const S: f64 = 1.0122292801892716;

/// Earth rotation rate in radians per minute, used by the resonance terms
pub const THDT: f64 = 4.3752691e-3;

// -------------------------------------------------------------------------------------------------
// Deep-space (SDP4) lunar/solar and resonance coefficients
// -------------------------------------------------------------------------------------------------

/// Solar mean motion, radians per minute
pub const ZNS: f64 = 1.19459e-5;
/// Solar perturbation coefficient
pub const C1SS: f64 = 2.9864797e-6;
/// Solar eccentricity factor
pub const ZES: f64 = 1.675e-2;
/// Lunar mean motion, radians per minute
pub const ZNL: f64 = 1.5835218e-4;
/// Lunar perturbation coefficient
pub const C1L: f64 = 4.7968065e-7;
/// Lunar eccentricity factor
pub const ZEL: f64 = 5.490e-2;
/// Cosine of the solar reference inclination
pub const ZCOSIS: f64 = 9.1744867e-1;
/// Sine of the solar reference inclination
pub const ZSINIS: f64 = 3.9785416e-1;
/// Sine of the solar reference argument of perigee
pub const ZSINGS: f64 = -9.8088458e-1;
/// Cosine of the solar reference argument of perigee
pub const ZCOSGS: f64 = 1.945905e-1;

/// Synchronous (24 h) resonance geopotential coefficients
pub const Q22: f64 = 1.7891679e-6;
pub const Q31: f64 = 2.1460748e-6;
pub const Q33: f64 = 2.2123015e-7;

/// Half-day (12 h) resonance geopotential coefficients
pub const ROOT22: f64 = 1.7891679e-6;
pub const ROOT32: f64 = 3.7393792e-7;
pub const ROOT44: f64 = 7.3636953e-9;
pub const ROOT52: f64 = 1.1428639e-7;
pub const ROOT54: f64 = 2.1765803e-9;

/// Phase angles of the half-day resonance terms
pub const G22: f64 = 5.7686396;
pub const G32: f64 = 9.5240898e-1;
pub const G44: f64 = 1.8014998;
pub const G52: f64 = 1.0508330;
pub const G54: f64 = 4.4108898;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Speed in kilometers per second
pub type KilometerPerSecond = f64;
/// Elapsed time since the element-set epoch, in minutes (signed)
pub type Minutes = f64;
/// Julian Date (days)
pub type JulianDate = f64;
