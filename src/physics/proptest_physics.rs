//! Property-based tests for physics simulation using proptest.
//!
//! These tests verify physical invariants across a wide range of orbital parameters.

use bevy::math::DVec2;
use proptest::prelude::*;

use crate::orbit::OrbitSetup;
use crate::physics::{IntegratorConfig, advance_towards};
use crate::test_utils::{GM_STAR, assertions, fixtures, integrate_around_star};
use crate::trail::TrailBuffer;
use crate::types::{Body, SCALE, SUN_MASS};

const AU: f64 = 1.495978707e11;

fn coordinate() -> impl Strategy<Value = f64> {
    -1.0e13f64..1.0e13
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The display position is always the physical position over SCALE.
    #[test]
    fn prop_display_is_projection(
        x in coordinate(),
        y in coordinate(),
        vx in -1.0e5f64..1.0e5,
        vy in -1.0e5f64..1.0e5,
        mass in 1.0f64..1.0e31,
    ) {
        let body = Body::new(DVec2::new(x, y), DVec2::new(vx, vy), mass).unwrap();
        let display = body.display_position();
        prop_assert!((display.x - x / SCALE).abs() <= 1e-12 * (1.0 + (x / SCALE).abs()));
        prop_assert!((display.y - y / SCALE).abs() <= 1e-12 * (1.0 + (y / SCALE).abs()));
    }

    /// Stepping the same state twice gives bit-identical results.
    #[test]
    fn prop_step_is_deterministic(
        distance_au in 0.3f64..30.0,
        angle in 0.0f64..std::f64::consts::TAU,
        dt in 0.0f64..86400.0,
    ) {
        let r = distance_au * AU;
        let start = Body::new(
            DVec2::from_angle(angle) * r,
            DVec2::from_angle(angle).perp() * (GM_STAR / r).sqrt(),
            1.0,
        ).unwrap();
        let star = fixtures::star();
        let config = IntegratorConfig::default();

        let mut a = start.clone();
        let mut b = start.clone();
        advance_towards(&mut a, &star, dt, &config).unwrap();
        advance_towards(&mut b, &star, dt, &config).unwrap();

        prop_assert_eq!(a.position().to_array(), b.position().to_array());
        prop_assert_eq!(a.velocity().to_array(), b.velocity().to_array());
    }

    /// The trail holds the most recent `capacity` samples, oldest first.
    #[test]
    fn prop_trail_is_fifo(capacity in 1usize..150, count in 0usize..400) {
        let mut trail = TrailBuffer::new(capacity);
        for i in 0..count {
            trail.push(DVec2::new(i as f64, 0.0));
        }

        prop_assert_eq!(trail.len(), count.min(capacity));
        let expected: Vec<f64> = (count.saturating_sub(capacity)..count).map(|i| i as f64).collect();
        let actual: Vec<f64> = trail.iter().map(|p| p.x).collect();
        prop_assert_eq!(actual, expected);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Energy stays within 1% over one orbit at 10,000 steps per period.
    #[test]
    fn prop_energy_conservation_one_orbit(
        periapsis_au in 0.5f64..10.0,
        eccentricity in 0.0f64..0.5,
    ) {
        let mut body = fixtures::elliptical_orbit(periapsis_au * AU, eccentricity);
        let initial = assertions::orbital_energy(body.position(), body.velocity());

        let a = periapsis_au * AU / (1.0 - eccentricity);
        let steps = 10_000;
        integrate_around_star(&mut body, assertions::orbital_period(a) / steps as f64, steps);

        let last = assertions::orbital_energy(body.position(), body.velocity());
        let drift = assertions::relative_drift(initial, last);
        prop_assert!(
            drift < 0.01,
            "Energy drift {:.4}% exceeds 1% tolerance (e={})",
            drift * 100.0, eccentricity
        );
    }

    /// Symplectic Euler conserves angular momentum under a central force.
    ///
    /// The position update adds a multiple of the new velocity, and the
    /// velocity update adds a vector parallel to the position, so r × v is
    /// unchanged up to rounding.
    #[test]
    fn prop_angular_momentum_conservation(
        periapsis_au in 0.5f64..10.0,
        eccentricity in 0.0f64..0.8,
    ) {
        let mut body = fixtures::elliptical_orbit(periapsis_au * AU, eccentricity);
        let initial = assertions::angular_momentum(body.position(), body.velocity());

        let a = periapsis_au * AU / (1.0 - eccentricity);
        integrate_around_star(&mut body, assertions::orbital_period(a) / 5_000.0, 5_000);

        let last = assertions::angular_momentum(body.position(), body.velocity());
        let drift = assertions::relative_drift(initial, last);
        prop_assert!(drift < 1e-9, "Angular momentum drift {:.3e}", drift);
    }

    /// A circular orbit seeded by the orbit setup closes after one period.
    #[test]
    fn prop_circular_orbit_closes(semi_major_axis_au in 0.3f64..50.0) {
        let orbit = OrbitSetup::new(SUN_MASS, semi_major_axis_au * AU, 0.0).unwrap();
        let mut body = orbit.seed_orbiter(DVec2::ZERO, 1.0).unwrap();
        let start = body.position();

        let steps = 20_000;
        integrate_around_star(&mut body, orbit.period() / steps as f64, steps);

        let error = (body.position() - start).length() / orbit.initial_radius();
        prop_assert!(error < 0.01, "Orbit missed its start by {:.4}%", error * 100.0);
    }

    /// Kepler's third law: T² / a³ = 4π² / GM for every semi-major axis.
    #[test]
    fn prop_keplers_third_law(semi_major_axis_au in 0.3f64..50.0) {
        let a = semi_major_axis_au * AU;
        let orbit = OrbitSetup::new(SUN_MASS, a, 0.0).unwrap();
        let period = orbit.period();

        let ratio = period * period / a.powi(3);
        let expected = 4.0 * std::f64::consts::PI.powi(2) / GM_STAR;
        prop_assert!(((ratio - expected) / expected).abs() < 1e-12);
    }
}
