//! Simulation state machine.
//!
//! Owns the bodies, the trail, the clock, and the run state. A frame applies
//! input signals, restarts the clock, and (only while running) advances every
//! orbiting body and records the tracked body's trail. Nothing here touches
//! the window, so whole runs can be replayed in tests.

use std::time::Duration;

use bevy::log::{info, warn};
use bevy::math::DVec2;
use bevy::prelude::Resource;

use crate::orbit::{OrbitError, OrbitSetup, TimeScale};
use crate::physics::{DegeneracyPolicy, IntegrationError, IntegratorConfig, advance_indexed};
use crate::time::{FrameTick, SimulationClock};
use crate::trail::TrailBuffer;
use crate::types::{
    BODY_DISPLAY_RADIUS, Body, BodyError, EARTH_MASS, MAX_PATH_SIZE, SCALE, SECONDS_PER_DAY, SUN_MASS,
    WINDOW_HEIGHT, WINDOW_WIDTH, from_display,
};

/// Lifecycle of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunState {
    Running,
    #[default]
    Paused,
    /// Absorbing: no signal leaves this state.
    Terminated,
}

/// Discrete input the core reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputSignal {
    TogglePause,
    Terminate,
}

impl RunState {
    /// Pure transition for one input signal.
    pub fn apply(self, signal: InputSignal) -> Self {
        match (self, signal) {
            (RunState::Terminated, _) => RunState::Terminated,
            (_, InputSignal::Terminate) => RunState::Terminated,
            (RunState::Running, InputSignal::TogglePause) => RunState::Paused,
            (RunState::Paused, InputSignal::TogglePause) => RunState::Running,
        }
    }

    pub fn is_running(self) -> bool {
        self == RunState::Running
    }
}

/// Whether a body moves under gravity or stays put.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyRole {
    /// Attracts others, never moves.
    Attractor,
    /// Advanced every running frame against all other bodies.
    Orbiter,
}

/// Errors surfaced by the simulation.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error(transparent)]
    Orbit(#[from] OrbitError),

    #[error(transparent)]
    Body(#[from] BodyError),

    #[error("integration failed for body {body}: {source}")]
    Integration {
        body: usize,
        #[source]
        source: IntegrationError,
    },

    #[error("body index {0} out of range")]
    UnknownBody(usize),
}

/// What a single frame did.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameOutcome {
    /// Not running; nothing changed.
    Idle,
    /// Every orbiter advanced by `dt` seconds.
    Stepped { dt: f64 },
    /// A body failed; the whole step was rolled back.
    Discarded { body: usize, error: IntegrationError },
    /// A body failed and its non-finite state was kept.
    Corrupted {
        dt: f64,
        body: usize,
        error: IntegrationError,
    },
}

/// Scenario and tuning for a run.
#[derive(Resource, Clone, Debug)]
pub struct SimulationConfig {
    /// Central (attracting) mass in kg.
    pub central_mass: f64,
    /// Orbiting mass in kg.
    pub orbiter_mass: f64,
    /// Semi-major axis of the orbit in metres.
    pub semi_major_axis: f64,
    /// Orbital eccentricity, `0 <= e < 1`.
    pub eccentricity: f64,
    /// Where the central body sits, in display units.
    pub central_display_position: DVec2,
    pub time_scale: TimeScale,
    pub integrator: IntegratorConfig,
    pub trail_capacity: usize,
    /// Whether the run starts paused.
    pub start_paused: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            central_mass: SUN_MASS,
            orbiter_mass: EARTH_MASS,
            semi_major_axis: 150.0 * SCALE,
            eccentricity: 0.0,
            central_display_position: DVec2::new(
                WINDOW_WIDTH as f64 / 2.0,
                WINDOW_HEIGHT as f64 / 2.0,
            ),
            time_scale: TimeScale::default(),
            integrator: IntegratorConfig::default(),
            trail_capacity: MAX_PATH_SIZE,
            start_paused: true,
        }
    }
}

/// Read-only view of one body for drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodySprite {
    pub display_position: DVec2,
    pub radius: f32,
}

/// A running system of bodies.
#[derive(Resource, Debug)]
pub struct Simulation {
    bodies: Vec<Body>,
    roles: Vec<BodyRole>,
    /// Pre-step copy of `bodies`, reused every frame.
    snapshot: Vec<Body>,
    tracked: Option<usize>,
    trail: TrailBuffer,
    state: RunState,
    clock: SimulationClock,
    integrator: IntegratorConfig,
    period: Option<f64>,
}

impl Simulation {
    /// Empty simulation with the given clock scale.
    pub fn new(dt_per_second: f64, integrator: IntegratorConfig, trail_capacity: usize) -> Self {
        Self {
            bodies: Vec::new(),
            roles: Vec::new(),
            snapshot: Vec::new(),
            tracked: None,
            trail: TrailBuffer::new(trail_capacity),
            state: RunState::default(),
            clock: SimulationClock::new(dt_per_second),
            integrator,
            period: None,
        }
    }

    /// Build the two-body scenario described by `config`.
    ///
    /// The central body is fixed; the orbiter starts at periapsis with the
    /// circular speed and is the body whose trail is recorded.
    pub fn from_config(config: &SimulationConfig) -> Result<Self, SimulationError> {
        let central = Body::new(
            from_display(config.central_display_position),
            DVec2::ZERO,
            config.central_mass,
        )?;
        let orbit = OrbitSetup::with_gravity(
            config.central_mass,
            config.semi_major_axis,
            config.eccentricity,
            config.integrator.g,
        )?;
        let orbiter = orbit.seed_orbiter(central.position(), config.orbiter_mass)?;

        let period = orbit.period();
        let dt_per_second = config.time_scale.dt_per_second(period)?;

        info!(
            "Orbital period: {:.4e} s ({:.1} days)",
            period,
            period / SECONDS_PER_DAY
        );
        info!("Simulation rate: {:.4e} sim-seconds per real second", dt_per_second);
        info!("Initial orbital speed: {:.3} km/s", orbiter.speed_km_per_s());

        let mut sim = Self::new(dt_per_second, config.integrator.clone(), config.trail_capacity);
        sim.add_body(central, BodyRole::Attractor);
        let orbiter = sim.add_body(orbiter, BodyRole::Orbiter);
        sim.track(orbiter)?;
        sim.period = Some(period);
        if !config.start_paused {
            sim.state = RunState::Running;
        }
        Ok(sim)
    }

    /// Add a body and return its index.
    pub fn add_body(&mut self, body: Body, role: BodyRole) -> usize {
        self.bodies.push(body);
        self.roles.push(role);
        self.bodies.len() - 1
    }

    /// Record `index`'s display position in the trail every running frame.
    pub fn track(&mut self, index: usize) -> Result<(), SimulationError> {
        if index >= self.bodies.len() {
            return Err(SimulationError::UnknownBody(index));
        }
        self.tracked = Some(index);
        Ok(())
    }

    /// Apply one input signal.
    pub fn signal(&mut self, signal: InputSignal) {
        let next = self.state.apply(signal);
        if next != self.state {
            match next {
                RunState::Running => info!("Simulation running"),
                RunState::Paused => info!("Simulation paused"),
                RunState::Terminated => info!("Simulation terminated"),
            }
        }
        self.state = next;
    }

    /// Advance the system by `dt` simulation seconds if running.
    ///
    /// `dt` passes through the integrator's `warn_dt`/`max_dt` checks once
    /// per call, not once per body.
    ///
    /// Orbiters are advanced against a snapshot of the pre-step state. On
    /// failure the configured [`DegeneracyPolicy`] decides what happens:
    /// `Pause` and `Skip` roll the step back, `Halt` rolls back and
    /// terminates, `Propagate` keeps the corrupted state.
    pub fn step(&mut self, dt: f64) -> Result<FrameOutcome, SimulationError> {
        if !self.state.is_running() {
            return Ok(FrameOutcome::Idle);
        }

        let dt = self.integrator.checked_dt(dt);
        self.snapshot.clone_from(&self.bodies);
        let mut corrupted = None;

        for index in 0..self.bodies.len() {
            if self.roles[index] != BodyRole::Orbiter {
                continue;
            }

            let Err(error) =
                advance_indexed(&mut self.bodies, &self.snapshot, index, dt, &self.integrator)
            else {
                continue;
            };

            warn!("Integration failed for body {index}: {error}");
            match self.integrator.policy {
                DegeneracyPolicy::Propagate => {
                    corrupted.get_or_insert((index, error));
                }
                DegeneracyPolicy::Pause => {
                    self.bodies.clone_from(&self.snapshot);
                    self.signal(InputSignal::TogglePause);
                    return Ok(FrameOutcome::Discarded { body: index, error });
                }
                DegeneracyPolicy::Skip => {
                    self.bodies.clone_from(&self.snapshot);
                    return Ok(FrameOutcome::Discarded { body: index, error });
                }
                DegeneracyPolicy::Halt => {
                    self.bodies.clone_from(&self.snapshot);
                    self.signal(InputSignal::Terminate);
                    return Err(SimulationError::Integration {
                        body: index,
                        source: error,
                    });
                }
            }
        }

        if let Some(tracked) = self.tracked {
            self.trail.push(self.bodies[tracked].display_position());
        }

        Ok(match corrupted {
            Some((body, error)) => FrameOutcome::Corrupted { dt, body, error },
            None => FrameOutcome::Stepped { dt },
        })
    }

    /// Run one frame that took `elapsed` of wall-clock time.
    ///
    /// Signals are applied first, then the elapsed time is converted at the
    /// clock's rate and the system is stepped. Time spent in paused frames is
    /// dropped, never banked into a later step.
    pub fn frame_elapsed(
        &mut self,
        signals: impl IntoIterator<Item = InputSignal>,
        elapsed: Duration,
    ) -> Result<FrameOutcome, SimulationError> {
        for signal in signals {
            self.signal(signal);
        }
        let FrameTick { dt, .. } = self.clock.tick(elapsed);
        self.step(dt)
    }

    /// Simulation step a wall-clock interval maps to.
    pub fn dt_for(&self, elapsed: Duration) -> f64 {
        self.clock.dt_for(elapsed)
    }

    /// Drawable bodies in index order.
    pub fn sprites(&self) -> impl ExactSizeIterator<Item = BodySprite> + '_ {
        self.bodies.iter().map(|body| BodySprite {
            display_position: body.display_position(),
            radius: BODY_DISPLAY_RADIUS,
        })
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn trail(&self) -> &TrailBuffer {
        &self.trail
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn tracked(&self) -> Option<usize> {
        self.tracked
    }

    /// Orbital period of the seeded orbit, when built from a config.
    pub fn period(&self) -> Option<f64> {
        self.period
    }

    pub fn dt_per_second(&self) -> f64 {
        self.clock.dt_per_second()
    }
}
