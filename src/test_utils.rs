//! Test utilities for orbit simulation tests.
//!
//! Provides fixtures for seeding test orbits and assertions for checking
//! physical invariants like energy and angular momentum conservation.

use bevy::math::DVec2;

use crate::physics::{IntegratorConfig, advance_towards};
use crate::types::{Body, G, SUN_MASS};

/// Standard gravitational parameter of the test star.
pub const GM_STAR: f64 = G * SUN_MASS;

/// Fixtures for creating test orbital states.
pub mod fixtures {
    use super::*;

    /// A fixed star of one solar mass at the origin.
    pub fn star() -> Body {
        Body::new(DVec2::ZERO, DVec2::ZERO, SUN_MASS).expect("valid star")
    }

    /// A test mass on a circular orbit of radius `r` metres around [`star`].
    ///
    /// Placed on the positive x-axis with velocity in the +y direction.
    pub fn circular_orbit(r: f64) -> Body {
        let v = (GM_STAR / r).sqrt();
        Body::new(DVec2::new(r, 0.0), DVec2::new(0.0, v), 1.0).expect("valid orbiter")
    }

    /// A test mass at periapsis of an elliptical orbit around [`star`].
    pub fn elliptical_orbit(periapsis: f64, eccentricity: f64) -> Body {
        assert!(
            (0.0..1.0).contains(&eccentricity),
            "Eccentricity must be in [0, 1) for elliptical orbit"
        );

        let a = periapsis / (1.0 - eccentricity);
        // Vis-viva at periapsis: v = sqrt(GM * (2/r - 1/a))
        let v = (GM_STAR * (2.0 / periapsis - 1.0 / a)).sqrt();
        Body::new(DVec2::new(periapsis, 0.0), DVec2::new(0.0, v), 1.0).expect("valid orbiter")
    }
}

/// Assertions for verifying physical invariants.
pub mod assertions {
    use super::*;

    /// Specific orbital energy around [`GM_STAR`]: E = v²/2 - GM/r.
    pub fn orbital_energy(pos: DVec2, vel: DVec2) -> f64 {
        0.5 * vel.length_squared() - GM_STAR / pos.length()
    }

    /// Specific angular momentum (z-component of r × v).
    pub fn angular_momentum(pos: DVec2, vel: DVec2) -> f64 {
        pos.x * vel.y - pos.y * vel.x
    }

    /// Period from Kepler's third law: T = 2π sqrt(a³/GM).
    pub fn orbital_period(semi_major_axis: f64) -> f64 {
        std::f64::consts::TAU * (semi_major_axis.powi(3) / GM_STAR).sqrt()
    }

    /// Relative drift between two values of a conserved quantity.
    pub fn relative_drift(initial: f64, last: f64) -> f64 {
        if initial.abs() > 1e-10 {
            ((last - initial) / initial).abs()
        } else {
            (last - initial).abs()
        }
    }
}

/// Integrate `body` around the fixed [`fixtures::star`] for `steps` steps of `dt`.
pub fn integrate_around_star(body: &mut Body, dt: f64, steps: usize) {
    let star = fixtures::star();
    let config = IntegratorConfig::default();
    for _ in 0..steps {
        advance_towards(body, &star, dt, &config).expect("finite orbit");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const AU: f64 = 1.495978707e11;

    #[test]
    fn test_circular_orbit_has_correct_velocity() {
        let body = fixtures::circular_orbit(AU);
        assert_relative_eq!(body.velocity().length(), (GM_STAR / AU).sqrt());
    }

    #[test]
    fn test_circular_orbit_is_bound() {
        let body = fixtures::circular_orbit(AU);
        assert!(assertions::orbital_energy(body.position(), body.velocity()) < 0.0);
    }

    #[test]
    fn test_orbital_period_earth() {
        let period = assertions::orbital_period(AU);
        let year_seconds = 365.25 * 24.0 * 3600.0;
        assert_relative_eq!(period, year_seconds, epsilon = year_seconds * 0.01);
    }

    #[test]
    fn test_elliptical_orbit_is_faster_than_circular() {
        let circular = fixtures::circular_orbit(AU);
        let elliptical = fixtures::elliptical_orbit(AU, 0.5);
        assert!(elliptical.velocity().length() > circular.velocity().length());
    }
}
