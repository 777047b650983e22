//! Bounded history of display positions for drawing an orbit trail.
//!
//! The trail is presentation-only state; it never feeds back into the physics.

use std::collections::VecDeque;

use bevy::math::DVec2;

use crate::types::MAX_PATH_SIZE;

/// FIFO buffer of display-space samples, oldest first.
#[derive(Clone, Debug, PartialEq)]
pub struct TrailBuffer {
    points: VecDeque<DVec2>,
    capacity: usize,
}

impl Default for TrailBuffer {
    fn default() -> Self {
        Self::new(MAX_PATH_SIZE)
    }
}

impl TrailBuffer {
    /// Create an empty trail holding at most `capacity` samples.
    pub fn new(capacity: usize) -> Self {
        Self {
            // Preallocation is capped; huge capacities grow on demand
            points: VecDeque::with_capacity(capacity.min(MAX_PATH_SIZE) + 1),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest one if the trail is full.
    pub fn push(&mut self, point: DVec2) {
        self.points.push_back(point);
        if self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    /// Samples in chronological order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = DVec2> + '_ {
        self.points.iter().copied()
    }

    /// Samples paired with an opacity in `[0, 1]`.
    ///
    /// Opacity is `(255 - index) / 255` where `index` counts from the oldest
    /// sample, floored at zero for trails longer than 255.
    pub fn iter_faded(&self) -> impl ExactSizeIterator<Item = (DVec2, f32)> + '_ {
        self.points
            .iter()
            .enumerate()
            .map(|(index, &point)| (point, fade_alpha(index)))
    }

    /// Most recent sample.
    pub fn latest(&self) -> Option<DVec2> {
        self.points.back().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Opacity for the sample at `index` (0 = oldest).
#[inline]
pub fn fade_alpha(index: usize) -> f32 {
    255usize.saturating_sub(index) as f32 / 255.0
}
