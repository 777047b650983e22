//! Wall-clock to simulation-time conversion and frame pacing.
//!
//! The simulation clock turns the real time elapsed between two frames into a
//! simulation step, so an orbit takes the same wall-clock duration however
//! unevenly frames arrive.

use std::time::{Duration, Instant};

use bevy::prelude::*;

use crate::types::MAX_FRAMERATE;

/// Plugin providing frame pacing.
pub struct TimePlugin;

impl Plugin for TimePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FrameLimiter>()
            .add_systems(Last, limit_frame_rate);
    }
}

/// Result of restarting the clock at a frame boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTick {
    /// Wall-clock time since the previous restart.
    pub elapsed: Duration,
    /// Simulation seconds that wall-clock time maps to.
    pub dt: f64,
}

/// Converts wall-clock frame intervals into simulation seconds.
///
/// `dt_per_second` is fixed at construction and never recomputed. The clock
/// holds no timer of its own: the caller supplies each frame's elapsed time
/// (Bevy's `Time<Real>` delta in the app, plain durations in replays).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationClock {
    dt_per_second: f64,
}

impl SimulationClock {
    pub fn new(dt_per_second: f64) -> Self {
        Self { dt_per_second }
    }

    /// Simulation seconds advanced per wall-clock second.
    pub fn dt_per_second(&self) -> f64 {
        self.dt_per_second
    }

    /// Convert a wall-clock interval into a simulation step.
    #[inline]
    pub fn dt_for(&self, elapsed: Duration) -> f64 {
        elapsed.as_secs_f64() * self.dt_per_second
    }

    /// Account for one frame that took `elapsed` of wall-clock time.
    pub fn tick(&self, elapsed: Duration) -> FrameTick {
        FrameTick {
            elapsed,
            dt: self.dt_for(elapsed),
        }
    }
}

/// Caps the frame rate by sleeping until the next frame boundary.
#[derive(Resource, Clone, Debug)]
pub struct FrameLimiter {
    /// Target frames per second. Zero disables the cap.
    pub target_fps: u32,
    next_frame: Option<Instant>,
}

impl Default for FrameLimiter {
    fn default() -> Self {
        Self::new(MAX_FRAMERATE)
    }
}

impl FrameLimiter {
    pub fn new(target_fps: u32) -> Self {
        Self {
            target_fps,
            next_frame: None,
        }
    }

    /// Duration of one frame at the target rate, if capped.
    pub fn frame_duration(&self) -> Option<Duration> {
        (self.target_fps > 0).then(|| Duration::from_secs_f64(1.0 / self.target_fps as f64))
    }

    /// How long to wait at `now` before the next frame may start.
    ///
    /// Schedules the following boundary as a side effect. A frame that ran
    /// late does not try to catch up; the schedule restarts from `now`.
    pub fn wait_at(&mut self, now: Instant) -> Duration {
        let Some(frame) = self.frame_duration() else {
            return Duration::ZERO;
        };

        match self.next_frame {
            Some(next) if next > now => {
                self.next_frame = Some(next + frame);
                next - now
            }
            _ => {
                self.next_frame = Some(now + frame);
                Duration::ZERO
            }
        }
    }
}

/// Block until the next frame boundary.
fn limit_frame_rate(mut limiter: ResMut<FrameLimiter>) {
    let wait = limiter.wait_at(Instant::now());
    if !wait.is_zero() {
        std::thread::sleep(wait);
    }
}
