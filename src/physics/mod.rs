//! Physics simulation for the orbiting bodies.
//!
//! This module provides the gravity and integration layer, plus the system
//! that drives the [`Simulation`] once per rendered frame. The step length
//! comes from the simulation clock rather than a fixed schedule, so the orbit
//! keeps real-time pace however the frame rate varies.

mod gravity;
mod integrator;

#[cfg(test)]
mod proptest_physics;

use bevy::prelude::*;

pub use gravity::{acceleration_towards, net_acceleration, pull};
pub use integrator::{
    DegeneracyPolicy, IntegrationError, IntegratorConfig, StepReport, advance, advance_indexed,
    advance_towards, apply_acceleration, symplectic_euler,
};

use crate::input::PendingSignals;
use crate::simulation::{Simulation, SimulationConfig};
use crate::types::FrameSystemSet;

/// Plugin providing scenario setup and the per-frame physics step.
///
/// Uses the [`SimulationConfig`] resource if one was inserted, the default
/// scenario otherwise.
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationConfig>()
            .init_resource::<PendingSignals>()
            .add_systems(PreStartup, setup_simulation)
            .add_systems(
                Update,
                physics_step
                    .in_set(FrameSystemSet::Physics)
                    .run_if(resource_exists::<Simulation>),
            );
    }
}

/// Build the simulation from its config, or exit if the config is invalid.
fn setup_simulation(
    mut commands: Commands,
    config: Res<SimulationConfig>,
    mut exit: MessageWriter<AppExit>,
) {
    match Simulation::from_config(&config) {
        Ok(sim) => commands.insert_resource(sim),
        Err(err) => {
            error!("Invalid simulation setup: {err}");
            exit.write(AppExit::error());
        }
    }
}

/// Main physics system.
///
/// Applies the signals gathered this frame and steps the simulation by the
/// real frame delta. The step must stay proportional to wall time, so this
/// reads `Time<Real>`; `Time<Virtual>` caps long frames. Failures are
/// already handled by the configured policy inside the simulation; here they
/// are only reported.
fn physics_step(
    mut sim: ResMut<Simulation>,
    mut signals: ResMut<PendingSignals>,
    time: Res<Time<Real>>,
) {
    if let Err(err) = sim.frame_elapsed(signals.drain(), time.delta()) {
        error!("Simulation halted: {err}");
    }
}
