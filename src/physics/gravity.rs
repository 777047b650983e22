//! Newtonian point-mass gravity.
//!
//! Bodies are addressed by index into a shared slice, so a body never holds
//! references to the bodies that attract it.

use bevy::math::DVec2;

use crate::physics::integrator::IntegrationError;
use crate::types::Body;

/// Acceleration at `pos` due to a point mass at `other_pos`.
///
/// # Arguments
/// * `pos` - Position being accelerated, in metres
/// * `other_pos` - Position of the attracting mass, in metres
/// * `other_mass` - Attracting mass in kilograms
/// * `g` - Gravitational constant
///
/// # Returns
/// Acceleration vector in m/s², pointing from `pos` toward `other_pos`.
///
/// Coincident positions divide by zero and yield non-finite components;
/// [`pull`] can guard against that before calling this.
#[inline]
pub fn acceleration_towards(pos: DVec2, other_pos: DVec2, other_mass: f64, g: f64) -> DVec2 {
    let separation = other_pos - pos;
    let radius = separation.length();
    // other_mass / r³ keeps the direction in `separation` itself
    let k = other_mass / (radius * radius * radius);
    separation * (g * k)
}

/// Sum the pairwise accelerations on `bodies[index]` from every other body.
///
/// With `guard` set, fails with [`IntegrationError::DegenerateSeparation`]
/// when any attractor lies within that many metres; a separation of exactly
/// zero always fails. With `guard` unset the arithmetic runs unchecked.
/// An `index` outside `bodies` is [`IntegrationError::UnknownBody`].
pub fn net_acceleration(
    index: usize,
    bodies: &[Body],
    g: f64,
    guard: Option<f64>,
) -> Result<DVec2, IntegrationError> {
    let pos = bodies
        .get(index)
        .ok_or(IntegrationError::UnknownBody {
            index,
            len: bodies.len(),
        })?
        .position();
    let mut acc = DVec2::ZERO;

    for (other_index, other) in bodies.iter().enumerate() {
        if other_index == index {
            continue;
        }
        acc += pull(pos, other, g, guard)?;
    }

    Ok(acc)
}

/// Acceleration at `pos` towards a single attractor.
pub fn pull(pos: DVec2, other: &Body, g: f64, guard: Option<f64>) -> Result<DVec2, IntegrationError> {
    if let Some(min_separation) = guard {
        let separation = (other.position() - pos).length();
        if separation <= min_separation || separation == 0.0 {
            return Err(IntegrationError::DegenerateSeparation {
                separation,
                min_separation,
            });
        }
    }
    Ok(acceleration_towards(pos, other.position(), other.mass(), g))
}
