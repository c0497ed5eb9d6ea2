//! Propagation accuracy against the published Spacetrack Report #3 test cases:
//! one near-earth (SGP4) and one deep-space (SDP4) satellite, sampled over a day.

use sattrack::elements::OrbitalElements;
use sattrack::propagator::Sgp4;
use sattrack::time::tle_epoch;
use sattrack::tle::Tle;

const POSITION_TOLERANCE_KM: f64 = 0.5;
const VELOCITY_TOLERANCE_KM_S: f64 = 0.005;

struct Point {
    t: f64,
    x: f64,
    y: f64,
    z: f64,
    vx: f64,
    vy: f64,
    vz: f64,
}

/// Test satellite 88888 (near-earth, 89.6 min period).
fn near_earth_tle() -> Tle {
    Tle {
        name: Some("TEST SAT SGP 001".to_string()),
        norad_number: 88888,
        classification: 'U',
        international_designator: "88888A  ".to_string(),
        epoch: tle_epoch(80, 275.98708465),
        mean_motion_dot: 0.00073094,
        mean_motion_ddot: 0.13844e-3,
        bstar: 0.66816e-4,
        inclination: 72.8435,
        right_ascension: 115.9689,
        eccentricity: 0.0086731,
        argument_perigee: 52.6988,
        mean_anomaly: 110.5714,
        mean_motion: 16.05824518,
        ephemeris_type: 0,
        element_set_number: 555,
        revolution_number: 10,
    }
}

/// Test satellite 11801 (deep-space, 10.5 h period, e = 0.73).
fn deep_space_tle() -> Tle {
    Tle {
        name: Some("TEST SAT SDP 001".to_string()),
        norad_number: 11801,
        classification: 'U',
        international_designator: "88888A  ".to_string(),
        epoch: tle_epoch(80, 230.29629788),
        mean_motion_dot: 0.01431103,
        mean_motion_ddot: 0.0,
        bstar: 0.014311,
        inclination: 46.7916,
        right_ascension: 230.4354,
        eccentricity: 0.7318036,
        argument_perigee: 47.4722,
        mean_anomaly: 10.4117,
        mean_motion: 2.28537848,
        ephemeris_type: 0,
        element_set_number: 555,
        revolution_number: 10,
    }
}

const NEAR_EARTH_STATES: [Point; 5] = [
    Point {
        t: 0.0,
        x: 2328.97048951,
        y: -5995.22076416,
        z: 1719.97067261,
        vx: 2.91207230,
        vy: -0.98341546,
        vz: -7.09081703,
    },
    Point {
        t: 360.0,
        x: 2456.10705566,
        y: -6071.93853760,
        z: 1222.89727783,
        vx: 2.67938992,
        vy: -0.44829041,
        vz: -7.22879231,
    },
    Point {
        t: 720.0,
        x: 2567.56195068,
        y: -6112.50384522,
        z: 713.96397400,
        vx: 2.44024599,
        vy: 0.09810869,
        vz: -7.31995916,
    },
    Point {
        t: 1080.0,
        x: 2663.09078980,
        y: -6115.48229980,
        z: 196.39640427,
        vx: 2.19611958,
        vy: 0.65241995,
        vz: -7.36282432,
    },
    Point {
        t: 1440.0,
        x: 2742.55133057,
        y: -6079.67144775,
        z: -326.38095856,
        vx: 1.94850229,
        vy: 1.21106251,
        vz: -7.35619372,
    },
];

const DEEP_SPACE_STATES: [Point; 5] = [
    Point {
        t: 0.0,
        x: 7473.37066650,
        y: 428.95261765,
        z: 5828.74786377,
        vx: 5.1071513,
        vy: 6.44468284,
        vz: -0.18613096,
    },
    Point {
        t: 360.0,
        x: -3305.22537232,
        y: 32410.86328125,
        z: -24697.17675781,
        vx: -1.30113538,
        vy: -1.15131518,
        vz: -0.28333528,
    },
    Point {
        t: 720.0,
        x: 14271.28759766,
        y: 24110.46411133,
        z: -4725.76837158,
        vx: -0.32050445,
        vy: 2.67984074,
        vz: -2.08405289,
    },
    Point {
        t: 1080.0,
        x: -9990.05883789,
        y: 22717.35522461,
        z: -23616.89062501,
        vx: -1.01667246,
        vy: -2.29026759,
        vz: 0.72892364,
    },
    Point {
        t: 1440.0,
        x: 9787.86975097,
        y: 33753.34667969,
        z: -15030.81176758,
        vx: -1.09425966,
        vy: 0.92358845,
        vz: -1.52230928,
    },
];

fn assert_states(sgp4: &mut Sgp4, expected: &[Point]) {
    for point in expected {
        let state = sgp4.propagate(point.t).unwrap();
        let position = [
            ("x", state.position.x, point.x),
            ("y", state.position.y, point.y),
            ("z", state.position.z, point.z),
        ];
        for (axis, computed, reference) in position {
            assert!(
                (computed - reference).abs() < POSITION_TOLERANCE_KM,
                "t = {} min, position {axis}: {computed} vs {reference}",
                point.t
            );
        }
        let velocity = [
            ("vx", state.velocity.x, point.vx),
            ("vy", state.velocity.y, point.vy),
            ("vz", state.velocity.z, point.vz),
        ];
        for (axis, computed, reference) in velocity {
            assert!(
                (computed - reference).abs() < VELOCITY_TOLERANCE_KM_S,
                "t = {} min, velocity {axis}: {computed} vs {reference}",
                point.t
            );
        }
    }
}

#[test]
fn near_earth_reference_states() {
    let elements = OrbitalElements::from_tle(&near_earth_tle()).unwrap();
    assert!(!elements.is_deep_space());
    let mut sgp4 = Sgp4::new(elements).unwrap();
    assert_states(&mut sgp4, &NEAR_EARTH_STATES);
}

#[test]
fn deep_space_reference_states() {
    let elements = OrbitalElements::from_tle(&deep_space_tle()).unwrap();
    assert!(elements.is_deep_space());
    let mut sgp4 = Sgp4::new(elements).unwrap();
    assert_states(&mut sgp4, &DEEP_SPACE_STATES);
}

#[test]
fn reference_states_in_any_order() {
    // Both branches must give bit-identical results whatever the request order
    for tle in [near_earth_tle(), deep_space_tle()] {
        let mut forward = Sgp4::from_tle(&tle).unwrap();
        let mut backward = Sgp4::from_tle(&tle).unwrap();

        let times = [0.0, 360.0, 720.0, 1080.0, 1440.0];
        let reference: Vec<_> = times.iter().map(|&t| forward.propagate(t).unwrap()).collect();

        for (i, &t) in times.iter().enumerate().rev() {
            let state = backward.propagate(t).unwrap();
            assert_eq!(state.position, reference[i].position, "t = {t}");
            assert_eq!(state.velocity, reference[i].velocity, "t = {t}");
        }
    }
}
