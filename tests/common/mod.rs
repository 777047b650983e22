//! Common test utilities for integration tests.

use std::time::Duration;

use bevy::math::DVec2;
use orbitsim::physics::{IntegratorConfig, advance_towards};
use orbitsim::simulation::{InputSignal, Simulation};
use orbitsim::types::{Body, G, SUN_MASS};

/// Standard gravitational parameter of a solar-mass star.
pub const GM_SUN: f64 = G * SUN_MASS;

/// A solar-mass star fixed at the origin.
pub fn star() -> Body {
    Body::new(DVec2::ZERO, DVec2::ZERO, SUN_MASS).unwrap()
}

/// A test mass on a circular orbit of radius `r` around [`star`].
pub fn circular_orbit(r: f64) -> Body {
    let v = (GM_SUN / r).sqrt();
    Body::new(DVec2::new(r, 0.0), DVec2::new(0.0, v), 1.0).unwrap()
}

/// Compute specific orbital energy.
pub fn orbital_energy(body: &Body) -> f64 {
    0.5 * body.velocity().length_squared() - GM_SUN / body.position().length()
}

/// Step `body` around [`star`] with a fixed `dt`.
pub fn simulate(body: &mut Body, dt: f64, steps: usize) {
    let star = star();
    let config = IntegratorConfig::default();
    for _ in 0..steps {
        advance_towards(body, &star, dt, &config).unwrap();
    }
}

/// Drive `sim` through `frames` signal-free frames of `frame_ms` wall-clock
/// milliseconds each.
pub fn run_frames(sim: &mut Simulation, frames: u32, frame_ms: u64) {
    for _ in 0..frames {
        sim.frame_elapsed(std::iter::empty::<InputSignal>(), Duration::from_millis(frame_ms))
            .unwrap();
    }
}
