//! Symplectic Euler integration for the orbiting bodies.
//!
//! Each step updates velocity from the current acceleration first, then moves
//! the position with the *updated* velocity. That ordering is what makes the
//! scheme symplectic; swapping it gives plain explicit Euler, whose orbits
//! spiral outward.
//!
//! Nothing here corrects for a coarse `dt`. Energy can grow without bound when
//! the step is large relative to the orbital period; [`IntegratorConfig`] can
//! clamp or warn, but neither is on by default.

use bevy::log::warn;
use bevy::math::DVec2;

use crate::physics::gravity::{net_acceleration, pull};
use crate::types::{Body, G};

// =============================================================================
// Errors
// =============================================================================

/// Ways a single integration step can fail.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum IntegrationError {
    /// Two bodies are too close for the inverse-cube term to be meaningful.
    #[error("degenerate separation {separation} m (minimum {min_separation} m)")]
    DegenerateSeparation { separation: f64, min_separation: f64 },

    /// The step produced NaN or infinite state.
    #[error("non-finite state after step: position {position}, velocity {velocity}")]
    NonFinite { position: DVec2, velocity: DVec2 },

    /// An index did not name a body in the slice.
    #[error("body index {index} out of range for {len} bodies")]
    UnknownBody { index: usize, len: usize },
}

// =============================================================================
// Configuration
// =============================================================================

/// What the simulation does when a step fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DegeneracyPolicy {
    /// Discard the step and pause the simulation.
    #[default]
    Pause,
    /// Discard the step and keep running.
    Skip,
    /// Discard the step and terminate the run.
    Halt,
    /// Commit whatever the arithmetic produced, NaN included.
    Propagate,
}

/// Configuration for the integrator.
#[derive(Clone, Debug)]
pub struct IntegratorConfig {
    /// Gravitational constant. Default: [`G`].
    pub g: f64,
    /// Separations at or below this many metres are rejected. Default: 0.
    pub min_separation: f64,
    /// Clamp |dt| to this many seconds when set. Default: none.
    pub max_dt: Option<f64>,
    /// Log a warning when |dt| exceeds this many seconds. Default: none.
    pub warn_dt: Option<f64>,
    /// Failure handling. Default: [`DegeneracyPolicy::Pause`].
    pub policy: DegeneracyPolicy,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            g: G,
            min_separation: 0.0,
            max_dt: None,
            warn_dt: None,
            policy: DegeneracyPolicy::default(),
        }
    }
}

impl IntegratorConfig {
    /// Minimum separation to check before the arithmetic, if any.
    ///
    /// [`DegeneracyPolicy::Propagate`] lets coincident bodies through.
    pub fn separation_guard(&self) -> Option<f64> {
        (self.policy != DegeneracyPolicy::Propagate).then_some(self.min_separation)
    }

    /// Apply `max_dt` to a requested step.
    ///
    /// Returns the step to take and whether it was clamped. Pure; see
    /// [`checked_dt`](Self::checked_dt) for the logging form.
    pub fn effective_dt(&self, dt: f64) -> (f64, bool) {
        match self.max_dt {
            Some(limit) if dt.abs() > limit => (limit.copysign(dt), true),
            _ => (dt, false),
        }
    }

    /// Whether `dt` is over the `warn_dt` threshold.
    pub fn exceeds_warn_dt(&self, dt: f64) -> bool {
        self.warn_dt.is_some_and(|limit| dt.abs() > limit)
    }

    /// [`effective_dt`](Self::effective_dt) plus a warning for each threshold
    /// crossed. Meant to run once per frame, not once per body.
    pub fn checked_dt(&self, dt: f64) -> f64 {
        if let Some(limit) = self.warn_dt
            && self.exceeds_warn_dt(dt)
        {
            warn!("Integration step {dt:.3e} s exceeds warning threshold {limit:.3e} s");
        }

        let (effective, clamped) = self.effective_dt(dt);
        if clamped {
            warn!("Clamping integration step {dt:.3e} s to {effective:.3e} s");
        }
        effective
    }
}

// =============================================================================
// Stepping
// =============================================================================

/// Summary of a committed step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepReport {
    /// Step actually taken, in seconds.
    pub dt: f64,
    /// Whether `dt` was clamped by `max_dt`.
    pub clamped: bool,
    /// Acceleration applied during the step (m/s²).
    pub acceleration: DVec2,
}

/// One symplectic Euler step from `(pos, vel)` under constant `acc`.
///
/// Pure: returns the new `(pos, vel)`.
#[inline]
pub fn symplectic_euler(pos: DVec2, vel: DVec2, acc: DVec2, dt: f64) -> (DVec2, DVec2) {
    let vel_new = vel + acc * dt;
    let pos_new = pos + vel_new * dt;
    (pos_new, vel_new)
}

/// Advance `body` by one step under the pull of every body in `others`.
///
/// `others` must not contain `body` itself. They are only read. The body is
/// left untouched when an error is returned, except under
/// [`DegeneracyPolicy::Propagate`], which commits the non-finite state and
/// still reports it.
pub fn advance(
    body: &mut Body,
    others: &[Body],
    dt: f64,
    config: &IntegratorConfig,
) -> Result<StepReport, IntegrationError> {
    let pos = body.position();
    let mut acc = DVec2::ZERO;

    for other in others {
        acc += pull(pos, other, config.g, config.separation_guard())?;
    }

    apply_acceleration(body, acc, dt, config)
}

/// Advance `bodies[index]` under the pull of every other body in `snapshot`.
///
/// `snapshot` is the pre-step state of the whole system, so the order in
/// which bodies are advanced within one frame does not matter. An `index`
/// outside either slice is [`IntegrationError::UnknownBody`].
pub fn advance_indexed(
    bodies: &mut [Body],
    snapshot: &[Body],
    index: usize,
    dt: f64,
    config: &IntegratorConfig,
) -> Result<StepReport, IntegrationError> {
    let acc = net_acceleration(index, snapshot, config.g, config.separation_guard())?;
    let len = bodies.len();
    let body = bodies
        .get_mut(index)
        .ok_or(IntegrationError::UnknownBody { index, len })?;
    apply_acceleration(body, acc, dt, config)
}

/// Two-body form of [`advance`]: `body` orbits a single `other`.
pub fn advance_towards(
    body: &mut Body,
    other: &Body,
    dt: f64,
    config: &IntegratorConfig,
) -> Result<StepReport, IntegrationError> {
    advance(body, std::slice::from_ref(other), dt, config)
}

/// Step `body` under a precomputed acceleration.
pub fn apply_acceleration(
    body: &mut Body,
    acc: DVec2,
    dt: f64,
    config: &IntegratorConfig,
) -> Result<StepReport, IntegrationError> {
    let (dt, clamped) = config.effective_dt(dt);
    let (pos_new, vel_new) = symplectic_euler(body.position(), body.velocity(), acc, dt);

    if !pos_new.is_finite() || !vel_new.is_finite() {
        if config.policy == DegeneracyPolicy::Propagate {
            body.set_state(pos_new, vel_new);
        }
        return Err(IntegrationError::NonFinite {
            position: pos_new,
            velocity: vel_new,
        });
    }

    body.set_state(pos_new, vel_new);
    Ok(StepReport {
        dt,
        clamped,
        acceleration: acc,
    })
}

// =============================================================================
// Tests
// =============================================================================
