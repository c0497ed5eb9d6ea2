//! # Two-line element set parsing and formatting
//!
//! This module decodes the standard NORAD/Celestrak two-line element (TLE) text format
//! into a [`Tle`] value, and re-formats a [`Tle`] back into its fixed-column text form.
//!
//! ## Overview
//!
//! - Fixed-column parsing of the 69-character line layout, with per-field validation.
//!   Malformed input fails with [`SatTrackError::TleParse`] naming the offending field.
//! - Configurable checksum handling ([`ChecksumPolicy`]): real-world feeds occasionally
//!   carry stale checksums, so the default is advisory.
//! - Structured construction from already-decoded numeric fields ([`TleFields`]), with
//!   `serde` field names matching the Celestrak GP JSON feed.
//! - Byte-faithful re-formatting for canonical input ([`Tle::format_lines`]).
//!
//! ## Units
//!
//! A [`Tle`] stores angles in **degrees** and mean motion in **revolutions/day**, exactly
//! as broadcast. Conversion to the radians/minute system used by the propagator happens in
//! [`OrbitalElements::from_tle`](crate::elements::OrbitalElements::from_tle).

use std::fmt;
use std::str::FromStr;

use hifitime::Epoch;
use serde::Deserialize;

use crate::constants::Degree;
use crate::sattrack_errors::SatTrackError;
use crate::time::{tle_epoch, tle_epoch_fields};

/// Length of each element-set line, checksum included.
const LINE_LEN: usize = 69;

/// How to treat the modulo-10 checksum carried in column 69 of each line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChecksumPolicy {
    /// Reject lines whose checksum does not match ([`SatTrackError::ChecksumMismatch`]).
    Strict,
    /// Parse regardless of the checksum digit.
    #[default]
    Advisory,
}

/// A parsed two-line element set.
///
/// Immutable, human-entered description of a satellite orbit at a given epoch. Fields keep
/// the broadcast units (degrees, revolutions/day); the epoch is additionally decoded into a
/// [`hifitime::Epoch`] in UTC.
#[derive(Debug, Clone, PartialEq)]
pub struct Tle {
    /// Satellite name from the optional name line, if any.
    pub name: Option<String>,
    /// NORAD catalog number.
    pub norad_number: u32,
    /// Security classification (`U` unclassified, `C` classified, `S` secret).
    pub classification: char,
    /// International designator, kept verbatim (8 columns, e.g. `98067A  `).
    pub international_designator: String,
    /// Element-set epoch, UTC.
    pub epoch: Epoch,
    /// First time derivative of mean motion ÷ 2, rev/day².
    pub mean_motion_dot: f64,
    /// Second time derivative of mean motion ÷ 6, rev/day³.
    pub mean_motion_ddot: f64,
    /// B* drag term, (Earth radii)⁻¹.
    pub bstar: f64,
    /// Orbital inclination, degrees.
    pub inclination: Degree,
    /// Right ascension of the ascending node, degrees.
    pub right_ascension: Degree,
    /// Eccentricity, dimensionless, in [0, 1).
    pub eccentricity: f64,
    /// Argument of perigee, degrees.
    pub argument_perigee: Degree,
    /// Mean anomaly, degrees.
    pub mean_anomaly: Degree,
    /// Mean motion, revolutions per day.
    pub mean_motion: f64,
    /// Ephemeris type (0 for distributed element sets).
    pub ephemeris_type: u8,
    /// Element set number.
    pub element_set_number: u16,
    /// Revolution number at epoch.
    pub revolution_number: u32,
}

/// Structured element-set input, as found in JSON feeds.
///
/// Field names follow the Celestrak GP JSON layout, so a feed record deserializes
/// directly:
///
/// ```json
/// { "OBJECT_NAME": "STARLINK-1007", "EPOCH": "2022-11-08T06:14:56.037120",
///   "MEAN_MOTION": 15.06405436, "ECCENTRICITY": 0.0001911, ... }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct TleFields {
    #[serde(rename = "OBJECT_NAME", default)]
    pub name: Option<String>,
    #[serde(rename = "OBJECT_ID", default)]
    pub international_designator: Option<String>,
    /// Epoch as an ISO-8601 string, assumed UTC.
    #[serde(rename = "EPOCH")]
    pub epoch: String,
    #[serde(rename = "MEAN_MOTION")]
    pub mean_motion: f64,
    #[serde(rename = "ECCENTRICITY")]
    pub eccentricity: f64,
    #[serde(rename = "INCLINATION")]
    pub inclination: Degree,
    #[serde(rename = "RA_OF_ASC_NODE")]
    pub right_ascension: Degree,
    #[serde(rename = "ARG_OF_PERICENTER")]
    pub argument_perigee: Degree,
    #[serde(rename = "MEAN_ANOMALY")]
    pub mean_anomaly: Degree,
    #[serde(rename = "EPHEMERIS_TYPE", default)]
    pub ephemeris_type: u8,
    #[serde(rename = "CLASSIFICATION_TYPE", default = "default_classification")]
    pub classification: char,
    #[serde(rename = "NORAD_CAT_ID")]
    pub norad_number: u32,
    #[serde(rename = "ELEMENT_SET_NO", default)]
    pub element_set_number: u16,
    #[serde(rename = "REV_AT_EPOCH", default)]
    pub revolution_number: u32,
    #[serde(rename = "BSTAR", default)]
    pub bstar: f64,
    #[serde(rename = "MEAN_MOTION_DOT", default)]
    pub mean_motion_dot: f64,
    #[serde(rename = "MEAN_MOTION_DDOT", default)]
    pub mean_motion_ddot: f64,
}

fn default_classification() -> char {
    'U'
}

impl Tle {
    /// Parse a two-line element set, with an optional preceding name line.
    ///
    /// Checksums are treated as advisory; use [`Tle::from_lines_with`] to enforce them.
    pub fn from_lines(
        name: Option<&str>,
        line1: &str,
        line2: &str,
    ) -> Result<Tle, SatTrackError> {
        Tle::from_lines_with(name, line1, line2, ChecksumPolicy::default())
    }

    /// Parse a two-line element set with an explicit [`ChecksumPolicy`].
    pub fn from_lines_with(
        name: Option<&str>,
        line1: &str,
        line2: &str,
        policy: ChecksumPolicy,
    ) -> Result<Tle, SatTrackError> {
        validate_line(1, line1, '1', policy)?;
        validate_line(2, line2, '2', policy)?;

        let norad_number: u32 = parse_field(line1, 2..7, "catalog number")?;
        let norad_number2: u32 = parse_field(line2, 2..7, "catalog number")?;
        if norad_number != norad_number2 {
            return Err(SatTrackError::TleCatalogMismatch);
        }

        let classification = line1.as_bytes()[7] as char;
        let international_designator = line1[9..17].to_string();

        let epoch_year: u8 = parse_field(line1, 18..20, "epoch year")?;
        let epoch_day: f64 = parse_field(line1, 20..32, "epoch day")?;
        if !(1.0..367.0).contains(&epoch_day) {
            return Err(SatTrackError::TleParse {
                field: "epoch day",
                reason: format!("day of year {epoch_day} out of range"),
            });
        }

        let mean_motion_dot: f64 = parse_field(line1, 33..43, "mean motion dot")?;
        let mean_motion_ddot = parse_exp_field(line1, 44..52, "mean motion ddot")?;
        let bstar = parse_exp_field(line1, 53..61, "bstar")?;
        let ephemeris_type: u8 = parse_field_or_zero(line1, 62..63, "ephemeris type")?;
        let element_set_number: u16 = parse_field(line1, 64..68, "element set number")?;

        let inclination: f64 = parse_field(line2, 8..16, "inclination")?;
        if !(0.0..=180.0).contains(&inclination) {
            return Err(SatTrackError::TleParse {
                field: "inclination",
                reason: format!("{inclination}° outside [0°, 180°]"),
            });
        }
        let right_ascension: f64 = parse_field(line2, 17..25, "right ascension")?;
        let ecc_digits: u32 = parse_field(line2, 26..33, "eccentricity")?;
        let eccentricity = f64::from(ecc_digits) * 1e-7;
        if !(0.0..1.0).contains(&eccentricity) {
            return Err(SatTrackError::TleParse {
                field: "eccentricity",
                reason: format!("{eccentricity} outside [0, 1)"),
            });
        }
        let argument_perigee: f64 = parse_field(line2, 34..42, "argument of perigee")?;
        let mean_anomaly: f64 = parse_field(line2, 43..51, "mean anomaly")?;
        let mean_motion: f64 = parse_field(line2, 52..63, "mean motion")?;
        if mean_motion <= 0.0 {
            return Err(SatTrackError::TleParse {
                field: "mean motion",
                reason: format!("{mean_motion} rev/day is not positive"),
            });
        }
        let revolution_number: u32 = parse_field(line2, 63..68, "revolution number")?;

        Ok(Tle {
            name: name.map(|n| n.trim_end().to_string()),
            norad_number,
            classification,
            international_designator,
            epoch: tle_epoch(epoch_year, epoch_day),
            mean_motion_dot,
            mean_motion_ddot,
            bstar,
            inclination,
            right_ascension,
            eccentricity,
            argument_perigee,
            mean_anomaly,
            mean_motion,
            ephemeris_type,
            element_set_number,
            revolution_number,
        })
    }

    /// Parse a whole element-set block: two lines, optionally preceded by a name line.
    pub fn parse(text: &str) -> Result<Tle, SatTrackError> {
        let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        match lines.as_slice() {
            [l1, l2] => Tle::from_lines(None, l1, l2),
            [l0, l1, l2] => Tle::from_lines(Some(l0), l1, l2),
            _ => Err(SatTrackError::TleParse {
                field: "element set",
                reason: format!("expected 2 or 3 lines, found {}", lines.len()),
            }),
        }
    }

    /// Build a [`Tle`] from already-decoded numeric fields (e.g. a JSON feed record).
    ///
    /// Functionally equivalent to parsing the corresponding text lines.
    pub fn from_fields(fields: TleFields) -> Result<Tle, SatTrackError> {
        if !(0.0..1.0).contains(&fields.eccentricity) {
            return Err(SatTrackError::TleParse {
                field: "eccentricity",
                reason: format!("{} outside [0, 1)", fields.eccentricity),
            });
        }
        if !(0.0..=180.0).contains(&fields.inclination) {
            return Err(SatTrackError::TleParse {
                field: "inclination",
                reason: format!("{}° outside [0°, 180°]", fields.inclination),
            });
        }
        if fields.mean_motion <= 0.0 {
            return Err(SatTrackError::TleParse {
                field: "mean motion",
                reason: format!("{} rev/day is not positive", fields.mean_motion),
            });
        }
        let epoch = Epoch::from_str(&fields.epoch).map_err(|e| SatTrackError::TleParse {
            field: "epoch",
            reason: e.to_string(),
        })?;

        Ok(Tle {
            name: fields.name,
            norad_number: fields.norad_number,
            classification: fields.classification,
            international_designator: fields
                .international_designator
                .map(|d| format!("{d:<8}"))
                .unwrap_or_else(|| " ".repeat(8)),
            epoch,
            mean_motion_dot: fields.mean_motion_dot,
            mean_motion_ddot: fields.mean_motion_ddot,
            bstar: fields.bstar,
            inclination: fields.inclination,
            right_ascension: fields.right_ascension,
            eccentricity: fields.eccentricity,
            argument_perigee: fields.argument_perigee,
            mean_anomaly: fields.mean_anomaly,
            mean_motion: fields.mean_motion,
            ephemeris_type: fields.ephemeris_type,
            element_set_number: fields.element_set_number,
            revolution_number: fields.revolution_number,
        })
    }

    /// Re-format this element set into its two fixed-column lines, checksums included.
    ///
    /// For canonical catalog input this reproduces the parsed text byte-for-byte.
    pub fn format_lines(&self) -> (String, String) {
        let (epoch_year, epoch_day) = tle_epoch_fields(&self.epoch);

        let mut line1 = format!(
            "1 {:05}{} {:<8.8} {:02}{:012.8} {} {} {} {} {:4}",
            self.norad_number,
            self.classification,
            self.international_designator,
            epoch_year,
            epoch_day,
            format_dot_field(self.mean_motion_dot),
            format_exp_field(self.mean_motion_ddot),
            format_exp_field(self.bstar),
            self.ephemeris_type,
            self.element_set_number,
        );
        line1.push(char::from(b'0' + checksum(&line1)));

        let mut line2 = format!(
            "2 {:05} {:8.4} {:8.4} {:07} {:8.4} {:8.4} {:11.8}{:5}",
            self.norad_number,
            self.inclination,
            self.right_ascension,
            (self.eccentricity * 1e7).round() as u32,
            self.argument_perigee,
            self.mean_anomaly,
            self.mean_motion,
            self.revolution_number,
        );
        line2.push(char::from(b'0' + checksum(&line2)));

        (line1, line2)
    }
}

impl fmt::Display for Tle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (line1, line2) = self.format_lines();
        if let Some(name) = &self.name {
            writeln!(f, "{name}")?;
        }
        writeln!(f, "{line1}")?;
        write!(f, "{line2}")
    }
}

/// Modulo-10 checksum of the first 68 columns: digits count their value, `-` counts one.
fn checksum(line: &str) -> u8 {
    let sum: u32 = line
        .chars()
        .take(LINE_LEN - 1)
        .map(|c| match c {
            '-' => 1,
            d => d.to_digit(10).unwrap_or(0),
        })
        .sum();
    (sum % 10) as u8
}

fn validate_line(
    index: u8,
    line: &str,
    expected_number: char,
    policy: ChecksumPolicy,
) -> Result<(), SatTrackError> {
    if line.len() != LINE_LEN {
        return Err(SatTrackError::TleLineLength {
            line: index,
            length: line.len(),
        });
    }
    // Field extraction slices by byte column; only ASCII keeps that well-defined
    if !line.is_ascii() {
        return Err(SatTrackError::TleParse {
            field: "line",
            reason: format!("line {index} contains non-ASCII characters"),
        });
    }
    if !line.starts_with(expected_number) || line.as_bytes()[1] != b' ' {
        return Err(SatTrackError::TleLineNumber {
            line: index,
            expected: expected_number,
        });
    }
    if policy == ChecksumPolicy::Strict {
        let computed = checksum(line);
        let found = (line.as_bytes()[LINE_LEN - 1] as char)
            .to_digit(10)
            .map(|d| d as u8);
        if found != Some(computed) {
            return Err(SatTrackError::ChecksumMismatch {
                line: index,
                computed,
                found: found.unwrap_or(0),
            });
        }
    }
    Ok(())
}

/// Parse a fixed-column field after trimming, reporting the field name on failure.
fn parse_field<T: FromStr>(
    line: &str,
    range: std::ops::Range<usize>,
    field: &'static str,
) -> Result<T, SatTrackError>
where
    T::Err: fmt::Display,
{
    line[range].trim().parse().map_err(|e: T::Err| {
        SatTrackError::TleParse {
            field,
            reason: e.to_string(),
        }
    })
}

/// Like [`parse_field`] but a blank field decodes to zero (ephemeris type is often blank).
fn parse_field_or_zero<T: FromStr + Default>(
    line: &str,
    range: std::ops::Range<usize>,
    field: &'static str,
) -> Result<T, SatTrackError>
where
    T::Err: fmt::Display,
{
    let trimmed = line[range].trim();
    if trimmed.is_empty() {
        return Ok(T::default());
    }
    trimmed.parse().map_err(|e: T::Err| SatTrackError::TleParse {
        field,
        reason: e.to_string(),
    })
}

/// Decode an 8-column implied-decimal exponent field (` 26300-3` ⇒ 0.26300×10⁻³).
fn parse_exp_field(
    line: &str,
    range: std::ops::Range<usize>,
    field: &'static str,
) -> Result<f64, SatTrackError> {
    let raw = &line[range];
    let err = |reason: String| SatTrackError::TleParse { field, reason };

    let sign = match raw.as_bytes()[0] {
        b'-' => -1.0,
        b' ' | b'+' | b'0' => 1.0,
        other => return Err(err(format!("invalid sign character `{}`", other as char))),
    };
    let mantissa: f64 = raw[1..6]
        .trim()
        .parse::<u32>()
        .map(f64::from)
        .map_err(|e| err(e.to_string()))?;
    let exponent: i32 = raw[6..8]
        .trim_start_matches('+')
        .parse()
        .map_err(|e: std::num::ParseIntError| err(e.to_string()))?;

    Ok(sign * mantissa * 1e-5 * 10f64.powi(exponent))
}

/// Format a first-derivative field: sign column plus `.dddddddd` (10 columns).
fn format_dot_field(value: f64) -> String {
    let sign = if value < 0.0 { '-' } else { ' ' };
    let digits = format!("{:.8}", value.abs());
    // "0.00014546" -> ".00014546"
    format!("{sign}{}", &digits[1..])
}

/// Format an implied-decimal exponent field (8 columns), e.g. 2.63e-4 ⇒ ` 26300-3`.
///
/// Zero is rendered ` 00000-0`, matching catalog practice.
fn format_exp_field(value: f64) -> String {
    if value == 0.0 {
        return " 00000-0".to_string();
    }
    let sign = if value < 0.0 { '-' } else { ' ' };
    let mut exponent = value.abs().log10().floor() as i32 + 1;
    let mut mantissa = (value.abs() / 10f64.powi(exponent) * 1e5).round() as u32;
    if mantissa == 100_000 {
        mantissa = 10_000;
        exponent += 1;
    }
    let exp_sign = if exponent < 0 { '-' } else { '+' };
    format!("{sign}{mantissa:05}{exp_sign}{}", exponent.abs())
}
