//! Core physics types and constants for the orbit simulation.

use bevy::math::DVec2;
use bevy::prelude::SystemSet;

/// System sets ordering one frame: input, then physics, then drawing.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameSystemSet {
    /// Keyboard and window signals
    Input,
    /// Clock restart and integration
    Physics,
    /// Syncing render state from the simulation
    Render,
}

/// Physical constants (SI units)

/// Gravitational constant (m³·kg⁻¹·s⁻²)
pub const G: f64 = 6.67430e-11;

/// Seconds per day
pub const SECONDS_PER_DAY: f64 = 86400.0;

/// Metres per display unit.
///
/// Physical positions are divided by this to get screen-friendly magnitudes.
pub const SCALE: f64 = 10e9;

/// Maximum number of samples kept in a trail.
pub const MAX_PATH_SIZE: usize = 100;

/// Frame-rate cap for the presentation loop.
pub const MAX_FRAMERATE: u32 = 30;

/// Window size in display units (pixels).
pub const WINDOW_WIDTH: u32 = 1920;
pub const WINDOW_HEIGHT: u32 = 1080;

/// On-screen radius of every body, in display units.
pub const BODY_DISPLAY_RADIUS: f32 = 8.0;

/// Solar mass in kilograms
pub const SUN_MASS: f64 = 1.989e30;

/// Earth mass in kilograms
pub const EARTH_MASS: f64 = 5.972e24;

/// Reasons a [`Body`] cannot be constructed.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum BodyError {
    #[error("invalid mass {0} kg (must be finite and positive)")]
    InvalidMass(f64),

    #[error("non-finite initial state: position {position}, velocity {velocity}")]
    NonFiniteState { position: DVec2, velocity: DVec2 },
}

/// Physical state of a body in the simulation.
///
/// Uses f64 (DVec2) so that solar-system distances keep full precision.
/// Only the physical position is stored; the display position is a pure
/// projection computed on demand.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    /// Position in metres
    pos: DVec2,
    /// Velocity in metres per second
    vel: DVec2,
    /// Mass in kilograms, fixed for the lifetime of the body
    mass: f64,
}

impl Body {
    /// Create a new body from initial conditions in physical units.
    ///
    /// The mass must be finite and strictly positive, and the initial
    /// position and velocity must be finite.
    pub fn new(pos: DVec2, vel: DVec2, mass: f64) -> Result<Self, BodyError> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(BodyError::InvalidMass(mass));
        }
        if !pos.is_finite() || !vel.is_finite() {
            return Err(BodyError::NonFiniteState {
                position: pos,
                velocity: vel,
            });
        }
        Ok(Self { pos, vel, mass })
    }

    /// Position in metres
    pub fn position(&self) -> DVec2 {
        self.pos
    }

    /// Velocity in m/s
    pub fn velocity(&self) -> DVec2 {
        self.vel
    }

    /// Mass in kg
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Position in display units (`position / SCALE`).
    pub fn display_position(&self) -> DVec2 {
        to_display(self.pos)
    }

    /// Speed in km/s
    pub fn speed_km_per_s(&self) -> f64 {
        self.vel.length() * 0.001
    }

    /// Overwrite position and velocity. Only the integrator calls this.
    pub(crate) fn set_state(&mut self, pos: DVec2, vel: DVec2) {
        self.pos = pos;
        self.vel = vel;
    }
}

/// Project a physical position (metres) into display units.
#[inline]
pub fn to_display(pos: DVec2) -> DVec2 {
    pos / SCALE
}

/// Inverse of [`to_display`].
#[inline]
pub fn from_display(display: DVec2) -> DVec2 {
    display * SCALE
}
