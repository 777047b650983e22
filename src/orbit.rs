//! One-time derivation of initial orbital conditions.
//!
//! Classical two-body formulas: periapsis radius from the semi-major axis and
//! eccentricity, circular speed at that radius, and Kepler's third law for the
//! period. The period then fixes how fast simulation time runs.

use std::f64::consts::TAU;

use bevy::math::DVec2;

use crate::types::{Body, BodyError, G};

/// Reasons orbital initial conditions cannot be derived.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum OrbitError {
    #[error("invalid central mass {0} kg (must be finite and positive)")]
    InvalidCentralMass(f64),

    #[error("invalid semi-major axis {0} m (must be finite and positive)")]
    InvalidSemiMajorAxis(f64),

    #[error("eccentricity {0} outside [0, 1)")]
    InvalidEccentricity(f64),

    #[error("invalid gravitational constant {0} (must be finite and positive)")]
    InvalidGravity(f64),

    #[error("invalid time scale: {name} = {value} (must be finite and positive)")]
    InvalidTimeScale { name: &'static str, value: f64 },

    #[error("orbit of period {period} s gives unusable rate {dt_per_second} sim-s per s")]
    InvalidRate { period: f64, dt_per_second: f64 },

    #[error(transparent)]
    Body(#[from] BodyError),
}

/// Orbit of a light body around a central mass.
///
/// All distances in metres, masses in kilograms.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitSetup {
    /// Mass of the central body
    pub central_mass: f64,
    /// Semi-major axis
    pub semi_major_axis: f64,
    /// Eccentricity (0 = circle)
    pub eccentricity: f64,
    /// Gravitational constant
    pub g: f64,
}

impl OrbitSetup {
    /// Validate and build an orbit using the SI gravitational constant.
    pub fn new(central_mass: f64, semi_major_axis: f64, eccentricity: f64) -> Result<Self, OrbitError> {
        Self::with_gravity(central_mass, semi_major_axis, eccentricity, G)
    }

    /// Validate and build an orbit with an explicit gravitational constant.
    pub fn with_gravity(
        central_mass: f64,
        semi_major_axis: f64,
        eccentricity: f64,
        g: f64,
    ) -> Result<Self, OrbitError> {
        if !central_mass.is_finite() || central_mass <= 0.0 {
            return Err(OrbitError::InvalidCentralMass(central_mass));
        }
        if !semi_major_axis.is_finite() || semi_major_axis <= 0.0 {
            return Err(OrbitError::InvalidSemiMajorAxis(semi_major_axis));
        }
        if !(0.0..1.0).contains(&eccentricity) {
            return Err(OrbitError::InvalidEccentricity(eccentricity));
        }
        if !g.is_finite() || g <= 0.0 {
            return Err(OrbitError::InvalidGravity(g));
        }
        Ok(Self {
            central_mass,
            semi_major_axis,
            eccentricity,
            g,
        })
    }

    /// Standard gravitational parameter GM (m³/s²).
    pub fn gm(&self) -> f64 {
        self.g * self.central_mass
    }

    /// Starting distance from the central body: `a (1 - e)`.
    pub fn initial_radius(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    /// Speed of a circular orbit at [`initial_radius`](Self::initial_radius).
    pub fn circular_velocity(&self) -> f64 {
        (self.gm() / self.initial_radius()).sqrt()
    }

    /// Orbital period from Kepler's third law: `2π sqrt(a³ / GM)`.
    pub fn period(&self) -> f64 {
        TAU * (self.semi_major_axis.powi(3) / self.gm()).sqrt()
    }

    /// Place an orbiter relative to a central body at `central_pos`.
    ///
    /// The orbiter starts offset along +x by the initial radius, moving along
    /// +y at the circular speed.
    pub fn seed_orbiter(&self, central_pos: DVec2, orbiter_mass: f64) -> Result<Body, OrbitError> {
        let pos = central_pos + DVec2::new(self.initial_radius(), 0.0);
        let vel = DVec2::new(0.0, self.circular_velocity());
        Ok(Body::new(pos, vel, orbiter_mass)?)
    }
}

/// How simulation time relates to wall-clock time.
///
/// `dt_per_second = period * simulated_orbits_per_cycle / target_wall_clock_seconds_per_orbit`.
/// The defaults give `period / 10`: one revolution every ten real seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    /// Wall-clock seconds one cycle should take.
    pub target_wall_clock_seconds_per_orbit: f64,
    /// Revolutions simulated in each cycle.
    pub simulated_orbits_per_cycle: f64,
}

impl Default for TimeScale {
    fn default() -> Self {
        Self {
            target_wall_clock_seconds_per_orbit: 10.0,
            simulated_orbits_per_cycle: 1.0,
        }
    }
}

impl TimeScale {
    /// Reject zero, negative, and non-finite settings.
    pub fn validate(&self) -> Result<(), OrbitError> {
        for (name, value) in [
            ("target_wall_clock_seconds_per_orbit", self.target_wall_clock_seconds_per_orbit),
            ("simulated_orbits_per_cycle", self.simulated_orbits_per_cycle),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(OrbitError::InvalidTimeScale { name, value });
            }
        }
        Ok(())
    }

    /// Simulation seconds per wall-clock second for an orbit of `period` seconds.
    ///
    /// The result must be finite and positive.
    pub fn dt_per_second(&self, period: f64) -> Result<f64, OrbitError> {
        self.validate()?;
        let dt_per_second =
            period * self.simulated_orbits_per_cycle / self.target_wall_clock_seconds_per_orbit;
        if !dt_per_second.is_finite() || dt_per_second <= 0.0 {
            return Err(OrbitError::InvalidRate {
                period,
                dt_per_second,
            });
        }
        Ok(dt_per_second)
    }
}
