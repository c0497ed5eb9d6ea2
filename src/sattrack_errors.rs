use thiserror::Error;

use crate::constants::Minutes;

/// Crate-wide error type.
///
/// Every failure mode of the extraction → propagation → look-angle pipeline maps to one
/// variant. All errors are local to a single call: a `DecayedOrbit` at one Δt does not
/// poison the propagator for earlier or later times, and no retry is attempted internally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SatTrackError {
    #[error("TLE line {line} has invalid length {length}, expected 69 characters")]
    TleLineLength { line: u8, length: usize },

    #[error("TLE line {line} does not start with the line number '{expected}'")]
    TleLineNumber { line: u8, expected: char },

    #[error("TLE catalog numbers differ between line 1 and line 2")]
    TleCatalogMismatch,

    #[error("invalid TLE field `{field}`: {reason}")]
    TleParse { field: &'static str, reason: String },

    #[error("TLE line {line} checksum mismatch: computed {computed}, found {found}")]
    ChecksumMismatch { line: u8, computed: u8, found: u8 },

    #[error("element set describes a degenerate orbit: {0}")]
    DegenerateOrbit(String),

    #[error("Kepler solver failed to converge within {iterations} iterations (residual {residual:e})")]
    KeplerNotConverged { iterations: usize, residual: f64 },

    #[error("satellite has decayed: radius below Earth surface at tsince = {tsince} min")]
    DecayedOrbit { tsince: Minutes },

    #[error("observer and satellite states are {delta_seconds} s apart, beyond the {tolerance_seconds} s tolerance")]
    TimeMismatch {
        delta_seconds: f64,
        tolerance_seconds: f64,
    },
}
