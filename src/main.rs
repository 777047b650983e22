//! Orbitsim - Two-Body Orbit Simulator
//!
//! Opens a window showing a planet on a circular orbit around a star, with a
//! fading trail. Space toggles pause; the run starts paused.

use bevy::prelude::*;

use orbitsim::camera::CameraPlugin;
use orbitsim::input::InputPlugin;
use orbitsim::physics::PhysicsPlugin;
use orbitsim::render::RenderPlugin;
use orbitsim::simulation::SimulationConfig;
use orbitsim::time::TimePlugin;
use orbitsim::types::{WINDOW_HEIGHT, WINDOW_WIDTH};

fn main() -> AppExit {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Orbit Simulator".into(),
                resolution: (WINDOW_WIDTH, WINDOW_HEIGHT).into(),
                resizable: false,
                ..default()
            }),
            // Close requests go through the simulation's Terminate signal
            close_when_requested: false,
            ..default()
        }))
        // Insert resources before plugins that depend on them
        .insert_resource(SimulationConfig::default())
        .add_plugins((CameraPlugin, InputPlugin, PhysicsPlugin, RenderPlugin, TimePlugin))
        .run()
}
