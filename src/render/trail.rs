//! Trail rendering using Bevy Gizmos.
//!
//! The oldest sample is fully opaque and each newer one loses 1/255 of its
//! alpha, so the fade runs along the strip.

use bevy::prelude::*;

use crate::camera::display_to_world;
use crate::simulation::Simulation;

/// Settings for trail rendering.
#[derive(Resource)]
pub struct TrailSettings {
    /// Whether to draw the trail.
    pub visible: bool,
    /// Base colour; alpha comes from each sample's age.
    pub color: Color,
}

impl Default for TrailSettings {
    fn default() -> Self {
        Self {
            visible: true,
            color: Color::srgb(0.0, 1.0, 0.0),
        }
    }
}

/// Draw the tracked body's trail as a gradient line strip.
pub fn draw_trail(mut gizmos: Gizmos, settings: Res<TrailSettings>, sim: Res<Simulation>) {
    if !settings.visible || sim.trail().len() < 2 {
        return;
    }

    gizmos.linestrip_gradient_2d(
        sim.trail()
            .iter_faded()
            .map(|(point, alpha)| (display_to_world(point), settings.color.with_alpha(alpha)))
            .filter(|(point, _)| point.is_finite()),
    );
}
