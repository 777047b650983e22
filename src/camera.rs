//! Camera and display-to-world mapping.
//!
//! Display units follow screen convention: origin at the top-left corner of a
//! `WINDOW_WIDTH` x `WINDOW_HEIGHT` canvas, y pointing down. Bevy's 2D world
//! has its origin at the window centre with y pointing up, one unit per
//! logical pixel.

use bevy::math::DVec2;
use bevy::prelude::*;

use crate::types::{WINDOW_HEIGHT, WINDOW_WIDTH};

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Plugin providing the 2D camera.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::BLACK))
            .add_systems(Startup, setup_camera);
    }
}

/// Spawn the main camera centred on the canvas.
fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2d, MainCamera));
}

/// Map a display-space point to Bevy world coordinates.
pub fn display_to_world(display: DVec2) -> Vec2 {
    Vec2::new(
        (display.x - WINDOW_WIDTH as f64 / 2.0) as f32,
        (WINDOW_HEIGHT as f64 / 2.0 - display.y) as f32,
    )
}
