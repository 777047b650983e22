//! Input handling.
//!
//! Space toggles pause; a window close request terminates the run. Raw input
//! is turned into [`InputSignal`]s here and consumed by the physics step, so
//! the simulation itself never sees a key code.

use bevy::prelude::*;
use bevy::window::WindowCloseRequested;

use crate::simulation::{InputSignal, RunState, Simulation};
use crate::types::FrameSystemSet;

/// Signals gathered this frame, waiting for the physics step.
#[derive(Resource, Default, Debug)]
pub struct PendingSignals {
    signals: Vec<InputSignal>,
}

impl PendingSignals {
    pub fn push(&mut self, signal: InputSignal) {
        self.signals.push(signal);
    }

    /// Take every pending signal in arrival order.
    pub fn drain(&mut self) -> std::vec::Drain<'_, InputSignal> {
        self.signals.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}

/// Plugin providing keyboard and window input.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PendingSignals>()
            .configure_sets(
                Update,
                (
                    FrameSystemSet::Input,
                    FrameSystemSet::Physics,
                    FrameSystemSet::Render,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (keyboard_shortcuts, window_close_requests).in_set(FrameSystemSet::Input),
            )
            .add_systems(
                PostUpdate,
                exit_when_terminated.run_if(resource_exists::<Simulation>),
            );
    }
}

/// Space: toggle pause.
fn keyboard_shortcuts(keys: Res<ButtonInput<KeyCode>>, mut signals: ResMut<PendingSignals>) {
    if keys.just_pressed(KeyCode::Space) {
        signals.push(InputSignal::TogglePause);
    }
}

/// Closing the window terminates the run.
fn window_close_requests(
    mut close_requests: MessageReader<WindowCloseRequested>,
    mut signals: ResMut<PendingSignals>,
) {
    if close_requests.read().count() > 0 {
        signals.push(InputSignal::Terminate);
    }
}

/// Leave the app once the simulation has terminated. Nothing is flushed.
fn exit_when_terminated(sim: Res<Simulation>, mut exit: MessageWriter<AppExit>) {
    if sim.state() == RunState::Terminated {
        exit.write(AppExit::Success);
    }
}
