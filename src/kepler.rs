//! # Kepler equation solver
//!
//! Newton–Raphson solver for the generalized Kepler equation used by the SGP4
//! long-period stage,
//!
//! ```text
//! U = Ψ + a_yN·cos(Ψ) − a_xN·sin(Ψ)
//! ```
//!
//! where `Ψ = E + ω` is the sum of eccentric anomaly and argument of perigee and
//! `a_xN = e·cos(ω)`, `a_yN = e·sin(ω)` are the long-period eccentricity components.
//! Working in `Ψ` rather than `E` keeps the equation regular as `e → 0` and `ω`
//! becomes undefined: for a circular orbit both components vanish and `Ψ = U`
//! exactly, with no singular division anywhere.
//!
//! Each Newton step is clamped to ±0.95 rad so a near-parabolic orbit cannot throw
//! the iterate out of the convergence basin. Failure to converge is a reportable
//! error, never a silent acceptance of the last iterate.

use crate::constants::Radian;
use crate::sattrack_errors::SatTrackError;

/// Convergence tolerance on the Newton correction, radians.
const TOLERANCE: f64 = 1e-12;

/// Iteration cap. Newton converges quadratically from the `U` starting point for
/// every elliptical orbit, so hitting the cap means the inputs are pathological.
const MAX_ITERATIONS: usize = 10;

/// Largest accepted Newton step, radians.
const MAX_STEP: f64 = 0.95;

/// Solution of the generalized Kepler equation.
#[derive(Debug, Clone, Copy)]
pub struct KeplerSolution {
    /// `Ψ = E + ω`, radians.
    pub epw: Radian,
    /// sin Ψ, cached from the last iteration.
    pub sin_epw: f64,
    /// cos Ψ, cached from the last iteration.
    pub cos_epw: f64,
}

/// Solve `U = Ψ + a_yN·cos Ψ − a_xN·sin Ψ` for `Ψ`.
///
/// Arguments
/// ---------
/// * `capu`: right-hand side `U`, radians (any value, not necessarily wrapped).
/// * `axn`: long-period eccentricity component `e·cos(ω)`.
/// * `ayn`: long-period eccentricity component `e·sin(ω)`.
///
/// Return
/// ------
/// * The converged [`KeplerSolution`], or [`SatTrackError::KeplerNotConverged`]
///   with the residual of the last iterate.
pub fn solve(capu: Radian, axn: f64, ayn: f64) -> Result<KeplerSolution, SatTrackError> {
    // Relative floor keeps the stop criterion meaningful when the caller passes an
    // unwrapped multi-revolution angle whose ulp exceeds the absolute tolerance
    let tolerance = TOLERANCE * capu.abs().max(1.0);
    let mut epw = capu;
    let mut sin_epw = epw.sin();
    let mut cos_epw = epw.cos();

    for _ in 0..MAX_ITERATIONS {
        let residual = capu - (epw + ayn * cos_epw - axn * sin_epw);
        let derivative = 1.0 - ayn * sin_epw - axn * cos_epw;
        let step = (residual / derivative).clamp(-MAX_STEP, MAX_STEP);

        epw += step;
        sin_epw = epw.sin();
        cos_epw = epw.cos();

        if step.abs() <= tolerance {
            return Ok(KeplerSolution {
                epw,
                sin_epw,
                cos_epw,
            });
        }
    }

    Err(SatTrackError::KeplerNotConverged {
        iterations: MAX_ITERATIONS,
        residual: (capu - (epw + ayn * cos_epw - axn * sin_epw)).abs(),
    })
}
