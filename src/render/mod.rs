//! Rendering systems for the orbit simulator.
//!
//! Everything here reads the [`Simulation`](crate::simulation::Simulation)
//! resource and never writes it: bodies are white discs, the tracked body's
//! trail is a green line fading with age.

pub mod bodies;
pub mod trail;

use bevy::prelude::*;

use self::bodies::{spawn_bodies, sync_body_positions};
use self::trail::{TrailSettings, draw_trail};
use crate::simulation::Simulation;
use crate::types::FrameSystemSet;

pub use self::bodies::SimBody;

/// Plugin aggregating all rendering functionality.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TrailSettings>()
            .add_systems(Startup, spawn_bodies.run_if(resource_exists::<Simulation>))
            .add_systems(
                Update,
                (sync_body_positions, draw_trail)
                    .in_set(FrameSystemSet::Render)
                    .run_if(resource_exists::<Simulation>),
            );
    }
}

/// Z-layer constants for rendering order.
///
/// Gizmo trails are drawn on top of meshes regardless of depth.
pub mod z_layers {
    /// Celestial bodies.
    pub const BODIES: f32 = 1.0;
}
