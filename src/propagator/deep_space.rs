//! # SDP4 deep-space extension
//!
//! Orbits with periods of 225 minutes and up pick up perturbations the near-earth
//! theory ignores: secular and long-period lunar/solar attraction, and for orbits
//! commensurate with the Earth's rotation, resonance with the tesseral harmonics of
//! the geopotential. This module adds those stages around the shared closing stage
//! of [`super`].
//!
//! Two resonance regimes exist, decided once at initialization:
//!
//! - **Synchronous** (24 h orbits): three-term libration about the geostationary
//!   longitudes.
//! - **Half-day** (12 h orbits with e ≥ 0.5): the ten dominant tesseral terms.
//!
//! Resonant mean motion has no closed form; it is integrated with the classic
//! 720-minute Euler-Maclaurin stepper. The integrator state `(atime, xli, xni)` is
//! a pure evaluation cache: it only ever holds the result of integrating forward
//! from the epoch in whole steps, and it is discarded and rebuilt from the epoch
//! whenever the requested time does not extend the cached direction. A given
//! `tsince` therefore always produces bit-identical output, whatever was asked
//! before.

use std::f64::consts::PI;

use nalgebra::Vector3;

use crate::constants::{
    Minutes, Radian, C1L, C1SS, DPI, G22, G32, G44, G52, G54, Q22, Q31, Q33, ROOT22, ROOT32,
    ROOT44, ROOT52, ROOT54, THDT, TOTHRD, XKE, ZCOSGS, ZCOSIS, ZEL, ZES, ZNL, ZNS, ZSINGS,
    ZSINIS,
};
use crate::elements::OrbitalElements;
use crate::sattrack_errors::SatTrackError;
use crate::time::wrap_two_pi;

use super::{checked_eccentricity, close_out, Common};

/// Integrator step, minutes.
const STEP: f64 = 720.0;
/// STEP² / 2, the second-order term weight.
const STEP2: f64 = 259_200.0;

/// Libration phase angles of the synchronous resonance terms.
const FASX2: f64 = 0.13130908;
const FASX4: f64 = 2.8843198;
const FASX6: f64 = 0.37448087;

/// Epoch inclination below which the node/perigee periodics switch to the Lyddane
/// formulation.
const LYDDANE_INCLINATION: Radian = 0.2;

/// Inclination below which the lunar/solar node perturbation is dropped.
const MIN_PERTURBED_INCLINATION: Radian = 5.2359877e-2;

#[derive(Debug, Clone)]
pub(crate) struct DeepSpace {
    common: Common,
    /// Greenwich sidereal angle at epoch, radians.
    thgr: f64,
    /// Epoch argument of perigee, radians.
    omegaq: f64,
    /// Epoch inclination, radians (selects the Lyddane branch).
    xqncl: f64,

    // Combined lunar/solar secular rates
    sse: f64,
    ssi: f64,
    ssl: f64,
    ssg: f64,
    ssh: f64,

    // Long-period periodic coefficients and epoch mean anomalies, per body
    solar: BodyTerms,
    lunar: BodyTerms,
    zmos: f64,
    zmol: f64,

    resonance: Option<Resonance>,
    /// Resonance variable at epoch.
    xlamo: f64,
    xfact: f64,

    // Integrator cache, always a whole-step forward integration from the epoch
    atime: f64,
    xli: f64,
    xni: f64,
}

/// Resonance regime with its geopotential amplitudes.
#[derive(Debug, Clone)]
enum Resonance {
    Synchronous {
        del1: f64,
        del2: f64,
        del3: f64,
    },
    HalfDay {
        d2201: f64,
        d2211: f64,
        d3210: f64,
        d3222: f64,
        d4410: f64,
        d4422: f64,
        d5220: f64,
        d5232: f64,
        d5421: f64,
        d5433: f64,
    },
}

/// Secular contributions and long-period coefficients of one perturbing body.
#[derive(Debug, Clone, Default)]
struct BodyTerms {
    se: f64,
    si: f64,
    sl: f64,
    sgh: f64,
    sh: f64,
    e2: f64,
    e3: f64,
    xi2: f64,
    xi3: f64,
    xl2: f64,
    xl3: f64,
    xl4: f64,
    xgh2: f64,
    xgh3: f64,
    xgh4: f64,
    xh2: f64,
    xh3: f64,
}

impl DeepSpace {
    pub(crate) fn new(el: &OrbitalElements, common: Common) -> DeepSpace {
        let c = &common;
        let eq = el.eccentricity;
        let xnq = c.xnodp;
        let aqnv = 1.0 / c.aodp;
        let xmao = el.mean_anomaly;
        let (sinq, cosq) = el.ascending_node.sin_cos();
        let (sing, cosg) = el.argument_perigee.sin_cos();

        let thgr = crate::time::gmst_at(&el.epoch);
        // Days since 1949 Dec 31.0 UT, then since 1900 Jan 0.5 for the lunar theory
        let ds50 = el.epoch.to_mjd_utc_days() - 33281.0;
        let day = ds50 + 18261.5;

        // Lunar orbit orientation at epoch
        let xnodce = 4.5236020 - 9.2422029e-4 * day;
        let (stem, ctem) = xnodce.sin_cos();
        let zcosil = 0.91375164 - 0.03568096 * ctem;
        let zsinil = (1.0 - zcosil * zcosil).sqrt();
        let zsinhl = 0.089683511 * stem / zsinil;
        let zcoshl = (1.0 - zsinhl * zsinhl).sqrt();
        let gam = 5.8351514 + 0.0019443680 * day;
        let zmol = wrap_two_pi(4.7199672 + 0.22997150 * day - gam);
        let mut zx = 0.39785416 * stem / zsinil;
        let zy = zcoshl * ctem + 0.91744867 * zsinhl * stem;
        zx = wrap_two_pi(zx.atan2(zy)) + gam - xnodce;
        let (zsingl, zcosgl) = zx.sin_cos();
        let zmos = wrap_two_pi(6.2565837 + 0.017201977 * day);

        let solar = body_terms(
            c, eq, sing, cosg, el.inclination, ZCOSGS, ZSINGS, ZCOSIS, ZSINIS, cosq, sinq, C1SS,
            ZNS, ZES,
        );
        let lunar = body_terms(
            c,
            eq,
            sing,
            cosg,
            el.inclination,
            zcosgl,
            zsingl,
            zcosil,
            zsinil,
            zcoshl * cosq + zsinhl * sinq,
            sinq * zcoshl - cosq * zsinhl,
            C1L,
            ZNL,
            ZEL,
        );

        // Node rates carry a 1/sin(i) factor; for near-equatorial orbits the sh
        // contributions were already zeroed above
        let over_sinio = |sh: f64| {
            if c.sinio.abs() > 1e-12 {
                sh / c.sinio
            } else {
                0.0
            }
        };
        let sse = solar.se + lunar.se;
        let ssi = solar.si + lunar.si;
        let ssl = solar.sl + lunar.sl;
        let ssh = over_sinio(solar.sh) + over_sinio(lunar.sh);
        let ssg =
            solar.sgh - c.cosio * over_sinio(solar.sh) + lunar.sgh - c.cosio * over_sinio(lunar.sh);

        // Geopotential resonance selection
        let synchronous_band = xnq > 0.0034906585 && xnq < 0.0052359877;
        let half_day_band = (0.00826..=0.00924).contains(&xnq) && eq >= 0.5;

        let mut xlamo = 0.0;
        let mut xfact = 0.0;
        let resonance = if synchronous_band {
            let g200 = 1.0 + c.eosq * (-2.5 + 0.8125 * c.eosq);
            let g310 = 1.0 + 2.0 * c.eosq;
            let g300 = 1.0 + c.eosq * (-6.0 + 6.60937 * c.eosq);
            let f220 = 0.75 * (1.0 + c.cosio) * (1.0 + c.cosio);
            let f311 =
                0.9375 * c.sinio * c.sinio * (1.0 + 3.0 * c.cosio) - 0.75 * (1.0 + c.cosio);
            let mut f330 = 1.0 + c.cosio;
            f330 = 1.875 * f330 * f330 * f330;
            let del1 = 3.0 * xnq * xnq * aqnv * aqnv;
            let del2 = 2.0 * del1 * f220 * g200 * Q22;
            let del3 = 3.0 * del1 * f330 * g300 * Q33 * aqnv;
            let del1 = del1 * f311 * g310 * Q31 * aqnv;
            xlamo = xmao + el.ascending_node + el.argument_perigee - thgr;
            let xpidot = c.omgdot + c.xnodot;
            xfact = c.xmdot + xpidot - THDT + ssl + ssg + ssh - xnq;
            Some(Resonance::Synchronous { del1, del2, del3 })
        } else if half_day_band {
            let eoc = eq * c.eosq;
            let g201 = -0.306 - (eq - 0.64) * 0.440;
            let (g211, g310, g322, g410, g422, g520) = if eq <= 0.65 {
                (
                    3.616 - 13.247 * eq + 16.290 * c.eosq,
                    -19.302 + 117.390 * eq - 228.419 * c.eosq + 156.591 * eoc,
                    -18.9068 + 109.7927 * eq - 214.6334 * c.eosq + 146.5816 * eoc,
                    -41.122 + 242.694 * eq - 471.094 * c.eosq + 313.953 * eoc,
                    -146.407 + 841.880 * eq - 1629.014 * c.eosq + 1083.435 * eoc,
                    -532.114 + 3017.977 * eq - 5740.0 * c.eosq + 3708.276 * eoc,
                )
            } else {
                (
                    -72.099 + 331.819 * eq - 508.738 * c.eosq + 266.724 * eoc,
                    -346.844 + 1582.851 * eq - 2415.925 * c.eosq + 1246.113 * eoc,
                    -342.585 + 1554.908 * eq - 2366.899 * c.eosq + 1215.972 * eoc,
                    -1052.797 + 4758.686 * eq - 7193.992 * c.eosq + 3651.957 * eoc,
                    -3581.69 + 16178.11 * eq - 24462.77 * c.eosq + 12422.52 * eoc,
                    if eq <= 0.715 {
                        1464.74 - 4664.75 * eq + 3763.64 * c.eosq
                    } else {
                        -5149.66 + 29936.92 * eq - 54087.36 * c.eosq + 31324.56 * eoc
                    },
                )
            };
            let (g533, g521, g532) = if eq < 0.7 {
                (
                    -919.2277 + 4988.61 * eq - 9064.77 * c.eosq + 5542.21 * eoc,
                    -822.71072 + 4568.6173 * eq - 8491.4146 * c.eosq + 5337.524 * eoc,
                    -853.666 + 4690.25 * eq - 8624.77 * c.eosq + 5341.4 * eoc,
                )
            } else {
                (
                    -37995.78 + 161616.52 * eq - 229838.2 * c.eosq + 109377.94 * eoc,
                    -51752.104 + 218913.95 * eq - 309468.16 * c.eosq + 146349.42 * eoc,
                    -40023.88 + 170470.89 * eq - 242699.48 * c.eosq + 115605.82 * eoc,
                )
            };

            let sini2 = c.sinio * c.sinio;
            let f220 = 0.75 * (1.0 + 2.0 * c.cosio + c.theta2);
            let f221 = 1.5 * sini2;
            let f321 = 1.875 * c.sinio * (1.0 - 2.0 * c.cosio - 3.0 * c.theta2);
            let f322 = -1.875 * c.sinio * (1.0 + 2.0 * c.cosio - 3.0 * c.theta2);
            let f441 = 35.0 * sini2 * f220;
            let f442 = 39.3750 * sini2 * sini2;
            let f522 = 9.84375
                * c.sinio
                * (sini2 * (1.0 - 2.0 * c.cosio - 5.0 * c.theta2)
                    + 0.33333333 * (-2.0 + 4.0 * c.cosio + 6.0 * c.theta2));
            let f523 = c.sinio
                * (4.92187512 * sini2 * (-2.0 - 4.0 * c.cosio + 10.0 * c.theta2)
                    + 6.56250012 * (1.0 + 2.0 * c.cosio - 3.0 * c.theta2));
            let f542 = 29.53125
                * c.sinio
                * (2.0 - 8.0 * c.cosio + c.theta2 * (-12.0 + 8.0 * c.cosio + 10.0 * c.theta2));
            let f543 = 29.53125
                * c.sinio
                * (-2.0 - 8.0 * c.cosio + c.theta2 * (12.0 + 8.0 * c.cosio - 10.0 * c.theta2));

            let xno2 = xnq * xnq;
            let ainv2 = aqnv * aqnv;
            let mut temp1 = 3.0 * xno2 * ainv2;
            let temp = temp1 * ROOT22;
            let d2201 = temp * f220 * g201;
            let d2211 = temp * f221 * g211;
            temp1 *= aqnv;
            let temp = temp1 * ROOT32;
            let d3210 = temp * f321 * g310;
            let d3222 = temp * f322 * g322;
            temp1 *= aqnv;
            let temp = 2.0 * temp1 * ROOT44;
            let d4410 = temp * f441 * g410;
            let d4422 = temp * f442 * g422;
            temp1 *= aqnv;
            let temp = temp1 * ROOT52;
            let d5220 = temp * f522 * g520;
            let d5232 = temp * f523 * g532;
            let temp = 2.0 * temp1 * ROOT54;
            let d5421 = temp * f542 * g521;
            let d5433 = temp * f543 * g533;

            xlamo = xmao + 2.0 * el.ascending_node - 2.0 * thgr;
            xfact = c.xmdot + 2.0 * c.xnodot - 2.0 * THDT + ssl + 2.0 * ssh - xnq;
            Some(Resonance::HalfDay {
                d2201,
                d2211,
                d3210,
                d3222,
                d4410,
                d4422,
                d5220,
                d5232,
                d5421,
                d5433,
            })
        } else {
            None
        };

        DeepSpace {
            thgr,
            omegaq: el.argument_perigee,
            xqncl: el.inclination,
            sse,
            ssi,
            ssl,
            ssg,
            ssh,
            solar,
            lunar,
            zmos,
            zmol,
            resonance,
            xlamo,
            xfact,
            atime: 0.0,
            xli: xlamo,
            xni: xnq,
            common,
        }
    }

    /// Full SDP4 evaluation at `tsince` minutes from epoch.
    pub(crate) fn propagate(
        &mut self,
        el: &OrbitalElements,
        tsince: Minutes,
    ) -> Result<(Vector3<f64>, Vector3<f64>), SatTrackError> {
        let c = self.common.clone();

        // Secular gravity and drag, as in the near-earth branch
        let xmdf = el.mean_anomaly + c.xmdot * tsince;
        let tsq = tsince * tsince;
        let tempa = 1.0 - c.c1 * tsince;
        let tempe = el.bstar * c.c4 * tsince;
        let templ = c.t2cof * tsq;

        // Deep-space secular effects
        let mut xll = xmdf + self.ssl * tsince;
        let mut omgadf = el.argument_perigee + c.omgdot * tsince + self.ssg * tsince;
        let mut xnode =
            el.ascending_node + c.xnodot * tsince + c.xnodcf * tsq + self.ssh * tsince;
        let mut em = el.eccentricity + self.sse * tsince;
        let mut xinc = el.inclination + self.ssi * tsince;
        if xinc < 0.0 {
            xinc = -xinc;
            xnode += PI;
            omgadf -= PI;
        }

        // Resonant mean motion replaces the Brouwer value where a resonance is active
        let mut xn = c.xnodp;
        if let Some((xn_res, xl_res)) = self.resonant_mean_motion(tsince) {
            xn = xn_res;
            let temp = -xnode + self.thgr + tsince * THDT;
            xll = if matches!(self.resonance, Some(Resonance::Synchronous { .. })) {
                xl_res + temp + temp
            } else {
                xl_res - omgadf + temp
            };
        }

        let a = (XKE / xn).powf(TOTHRD) * tempa * tempa;
        em -= tempe;
        let mut xmam = xll + c.xnodp * templ;

        // Lunar/solar periodics
        self.periodics(tsince, &mut em, &mut xinc, &mut xmam, &mut omgadf, &mut xnode);
        let em = checked_eccentricity(em, tsince)?;

        let xl = xmam + omgadf + xnode;
        close_out(&c, tsince, a, em, xl, omgadf, xnode, xinc)
    }

    /// Numerically integrated resonance variables `(n, λ)` at `tsince`.
    ///
    /// Restart rule: the cache is reused only when `tsince` lies beyond the cached
    /// point in the same direction from the epoch; otherwise integration restarts
    /// at the epoch. Cached values are therefore always whole-step integrations
    /// from `t = 0`, making the result a function of `tsince` alone.
    fn resonant_mean_motion(&mut self, tsince: Minutes) -> Option<(f64, f64)> {
        self.resonance.as_ref()?;

        if self.atime == 0.0 || tsince * self.atime <= 0.0 || tsince.abs() < self.atime.abs() {
            self.atime = 0.0;
            self.xni = self.common.xnodp;
            self.xli = self.xlamo;
        }
        let delt = if tsince >= 0.0 { STEP } else { -STEP };

        loop {
            let (xndot, xnddt) = self.dots();
            let xldot = self.xni + self.xfact;
            let xnddt = xnddt * xldot;

            if (tsince - self.atime).abs() < STEP {
                let ft = tsince - self.atime;
                let xn = self.xni + xndot * ft + xnddt * ft * ft * 0.5;
                let xl = self.xli + xldot * ft + xndot * ft * ft * 0.5;
                return Some((xn, xl));
            }

            self.xli += xldot * delt + xndot * STEP2;
            self.xni += xndot * delt + xnddt * STEP2;
            self.atime += delt;
        }
    }

    /// Resonance derivatives `(dn/dt, d²n/dt² before the dλ/dt factor)` at the
    /// cached integrator point.
    fn dots(&self) -> (f64, f64) {
        match self.resonance.as_ref() {
            Some(Resonance::Synchronous { del1, del2, del3 }) => {
                let xli = self.xli;
                let xndot = del1 * (xli - FASX2).sin()
                    + del2 * (2.0 * (xli - FASX4)).sin()
                    + del3 * (3.0 * (xli - FASX6)).sin();
                let xnddt = del1 * (xli - FASX2).cos()
                    + 2.0 * del2 * (2.0 * (xli - FASX4)).cos()
                    + 3.0 * del3 * (3.0 * (xli - FASX6)).cos();
                (xndot, xnddt)
            }
            Some(Resonance::HalfDay {
                d2201,
                d2211,
                d3210,
                d3222,
                d4410,
                d4422,
                d5220,
                d5232,
                d5421,
                d5433,
            }) => {
                let xomi = self.omegaq + self.common.omgdot * self.atime;
                let x2omi = xomi + xomi;
                let xli = self.xli;
                let x2li = xli + xli;
                let xndot = d2201 * (x2omi + xli - G22).sin()
                    + d2211 * (xli - G22).sin()
                    + d3210 * (xomi + xli - G32).sin()
                    + d3222 * (-xomi + xli - G32).sin()
                    + d4410 * (x2omi + x2li - G44).sin()
                    + d4422 * (x2li - G44).sin()
                    + d5220 * (xomi + xli - G52).sin()
                    + d5232 * (-xomi + xli - G52).sin()
                    + d5421 * (xomi + x2li - G54).sin()
                    + d5433 * (-xomi + x2li - G54).sin();
                let xnddt = d2201 * (x2omi + xli - G22).cos()
                    + d2211 * (xli - G22).cos()
                    + d3210 * (xomi + xli - G32).cos()
                    + d3222 * (-xomi + xli - G32).cos()
                    + d5220 * (xomi + xli - G52).cos()
                    + d5232 * (-xomi + xli - G52).cos()
                    + 2.0
                        * (d4410 * (x2omi + x2li - G44).cos()
                            + d4422 * (x2li - G44).cos()
                            + d5421 * (xomi + x2li - G54).cos()
                            + d5433 * (-xomi + x2li - G54).cos());
                (xndot, xnddt)
            }
            None => (0.0, 0.0),
        }
    }

    /// Long-period lunar and solar periodics, applied to the secular outputs.
    fn periodics(
        &self,
        tsince: Minutes,
        em: &mut f64,
        xinc: &mut f64,
        xll: &mut f64,
        omgadf: &mut f64,
        xnode: &mut f64,
    ) {
        let c = &self.common;
        let (sinis, cosis) = xinc.sin_cos();

        let solar_zm = self.zmos + ZNS * tsince;
        let (ses, sis, sls, sghs, shs) = body_periodics(&self.solar, solar_zm, ZES);
        let lunar_zm = self.zmol + ZNL * tsince;
        let (sel, sil, sll, sghl, shl) = body_periodics(&self.lunar, lunar_zm, ZEL);

        let pe = ses + sel;
        let pinc = sis + sil;
        let pl = sls + sll;
        let pgh = sghs + sghl;
        let ph = shs + shl;

        *xinc += pinc;
        *em += pe;

        if self.xqncl >= LYDDANE_INCLINATION {
            // Apply node and perigee periodics directly
            let ph = ph / c.sinio;
            let pgh = pgh - c.cosio * ph;
            *omgadf += pgh;
            *xnode += ph;
            *xll += pl;
        } else {
            // Lyddane modification for low inclinations: perturb the node through
            // the (sin i sin Ω, sin i cos Ω) pair to stay regular as i -> 0
            let (sinok, cosok) = xnode.sin_cos();
            let alfdp = sinis * sinok + ph * cosok + pinc * cosis * sinok;
            let betdp = sinis * cosok - ph * sinok + pinc * cosis * cosok;
            *xnode = wrap_two_pi(*xnode);
            let xls = *xll + *omgadf + cosis * *xnode + (pl + pgh - pinc * *xnode * sinis);
            let xnoh = *xnode;
            *xnode = wrap_two_pi(alfdp.atan2(betdp));

            // Keep the node on the same 2π branch as before the periodics
            if (xnoh - *xnode).abs() > PI {
                if *xnode < xnoh {
                    *xnode += DPI;
                } else {
                    *xnode -= DPI;
                }
            }

            *xll += pl;
            *omgadf = xls - *xll - xinc.cos() * *xnode;
        }
    }
}

/// Secular and long-period coefficients of one perturbing body (sun or moon),
/// evaluated from its orientation relative to the orbit plane at epoch.
#[allow(clippy::too_many_arguments)]
fn body_terms(
    c: &Common,
    eq: f64,
    sing: f64,
    cosg: f64,
    inclination: Radian,
    zcosg: f64,
    zsing: f64,
    zcosi: f64,
    zsini: f64,
    zcosh: f64,
    zsinh: f64,
    cc: f64,
    zn: f64,
    ze: f64,
) -> BodyTerms {
    let a1 = zcosg * zcosh + zsing * zcosi * zsinh;
    let a3 = -zsing * zcosh + zcosg * zcosi * zsinh;
    let a7 = -zcosg * zsinh + zsing * zcosi * zcosh;
    let a8 = zsing * zsini;
    let a9 = zsing * zsinh + zcosg * zcosi * zcosh;
    let a10 = zcosg * zsini;
    let a2 = c.cosio * a7 + c.sinio * a8;
    let a4 = c.cosio * a9 + c.sinio * a10;
    let a5 = -c.sinio * a7 + c.cosio * a8;
    let a6 = -c.sinio * a9 + c.cosio * a10;

    let x1 = a1 * cosg + a2 * sing;
    let x2 = a3 * cosg + a4 * sing;
    let x3 = -a1 * sing + a2 * cosg;
    let x4 = -a3 * sing + a4 * cosg;
    let x5 = a5 * sing;
    let x6 = a6 * sing;
    let x7 = a5 * cosg;
    let x8 = a6 * cosg;

    let z31 = 12.0 * x1 * x1 - 3.0 * x3 * x3;
    let z32 = 24.0 * x1 * x2 - 6.0 * x3 * x4;
    let z33 = 12.0 * x2 * x2 - 3.0 * x4 * x4;
    let mut z1 = 3.0 * (a1 * a1 + a2 * a2) + z31 * c.eosq;
    let mut z2 = 6.0 * (a1 * a3 + a2 * a4) + z32 * c.eosq;
    let mut z3 = 3.0 * (a3 * a3 + a4 * a4) + z33 * c.eosq;
    let z11 = -6.0 * a1 * a5 + c.eosq * (-24.0 * x1 * x7 - 6.0 * x3 * x5);
    let z12 = -6.0 * (a1 * a6 + a3 * a5)
        + c.eosq * (-24.0 * (x2 * x7 + x1 * x8) - 6.0 * (x3 * x6 + x4 * x5));
    let z13 = -6.0 * a3 * a6 + c.eosq * (-24.0 * x2 * x8 - 6.0 * x4 * x6);
    let z21 = 6.0 * a2 * a5 + c.eosq * (24.0 * x1 * x5 - 6.0 * x3 * x7);
    let z22 = 6.0 * (a4 * a5 + a2 * a6)
        + c.eosq * (24.0 * (x2 * x5 + x1 * x6) - 6.0 * (x4 * x7 + x3 * x8));
    let z23 = 6.0 * a4 * a6 + c.eosq * (24.0 * x2 * x6 - 6.0 * x4 * x8);
    z1 = z1 + z1 + c.betao2 * z31;
    z2 = z2 + z2 + c.betao2 * z32;
    z3 = z3 + z3 + c.betao2 * z33;

    let s3 = cc / c.xnodp;
    let s2 = -0.5 * s3 / c.betao;
    let s4 = s3 * c.betao;
    let s1 = -15.0 * eq * s4;
    let s5 = x1 * x3 + x2 * x4;
    let s6 = x2 * x3 + x1 * x4;
    let s7 = x2 * x4 - x1 * x3;

    let se = s1 * zn * s5;
    let si = s2 * zn * (z11 + z13);
    let sl = -zn * s3 * (z1 + z3 - 14.0 - 6.0 * c.eosq);
    let sgh = s4 * zn * (z31 + z33 - 6.0);
    let sh = if inclination < MIN_PERTURBED_INCLINATION {
        0.0
    } else {
        -zn * s2 * (z21 + z23)
    };

    BodyTerms {
        se,
        si,
        sl,
        sgh,
        sh,
        e2: 2.0 * s1 * s6,
        e3: 2.0 * s1 * s7,
        xi2: 2.0 * s2 * z12,
        xi3: 2.0 * s2 * (z13 - z11),
        xl2: -2.0 * s3 * z2,
        xl3: -2.0 * s3 * (z3 - z1),
        xl4: -2.0 * s3 * (-21.0 - 9.0 * c.eosq) * ze,
        xgh2: 2.0 * s4 * z32,
        xgh3: 2.0 * s4 * (z33 - z31),
        xgh4: -18.0 * s4 * ze,
        xh2: -2.0 * s2 * z22,
        xh3: -2.0 * s2 * (z23 - z21),
    }
}

/// Evaluate one body's long-period periodics at mean anomaly `zm`.
fn body_periodics(terms: &BodyTerms, zm: f64, ze: f64) -> (f64, f64, f64, f64, f64) {
    let zf = zm + 2.0 * ze * zm.sin();
    let sinzf = zf.sin();
    let f2 = 0.5 * sinzf * sinzf - 0.25;
    let f3 = -0.5 * sinzf * zf.cos();
    (
        terms.e2 * f2 + terms.e3 * f3,
        terms.xi2 * f2 + terms.xi3 * f3,
        terms.xl2 * f2 + terms.xl3 * f3 + terms.xl4 * sinzf,
        terms.xgh2 * f2 + terms.xgh3 * f3 + terms.xgh4 * sinzf,
        terms.xh2 * f2 + terms.xh3 * f3,
    )
}
