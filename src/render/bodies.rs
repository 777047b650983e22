//! Body rendering and spawning.

use bevy::prelude::*;

use crate::camera::display_to_world;
use crate::render::z_layers;
use crate::simulation::Simulation;

/// Component linking a rendered disc to a simulation body.
#[derive(Component, Debug)]
pub struct SimBody {
    /// Index into the simulation's body list.
    pub index: usize,
}

/// Spawn one white disc per simulation body.
pub fn spawn_bodies(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    sim: Res<Simulation>,
) {
    let material = materials.add(Color::WHITE);

    for (index, sprite) in sim.sprites().enumerate() {
        let pos = display_to_world(sprite.display_position);
        commands.spawn((
            SimBody { index },
            Mesh2d(meshes.add(Circle::new(sprite.radius))),
            MeshMaterial2d(material.clone()),
            Transform::from_translation(pos.extend(z_layers::BODIES)),
        ));
    }
}

/// Move each disc to its body's current display position.
///
/// Non-finite positions (a corrupted run) leave the disc where it was.
pub fn sync_body_positions(sim: Res<Simulation>, mut query: Query<(&SimBody, &mut Transform)>) {
    for (body, mut transform) in query.iter_mut() {
        let Some(state) = sim.body(body.index) else {
            continue;
        };
        let pos = display_to_world(state.display_position());
        if !pos.is_finite() {
            continue;
        }
        transform.translation.x = pos.x;
        transform.translation.y = pos.y;
    }
}
