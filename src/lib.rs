//! Orbitsim - Two-Body Orbit Simulator
//!
//! A library crate providing the gravity integrator, simulation clock, trail
//! buffer, and orbit setup, plus the Bevy plugins that present them.

pub mod camera;
pub mod input;
pub mod orbit;
pub mod physics;
pub mod render;
pub mod simulation;
pub mod time;
pub mod trail;
pub mod types;

#[cfg(test)]
pub mod test_utils;
