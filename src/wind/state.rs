//! Runtime wind state advanced once per frame.

use glam::{Vec2, Vec3};

use super::{WindField, WindParams};

/// Global wind time plus the session's tuning.
#[derive(Clone, Debug, Default)]
pub struct WindState {
    /// Elapsed animation time in seconds. Never decreases.
    pub time: f32,
    pub params: WindParams,
}

impl WindState {
    pub fn new(params: WindParams) -> Self {
        Self { time: 0.0, params }
    }

    /// Advance time by `dt` seconds; negative steps are ignored.
    pub fn advance(&mut self, dt: f32) {
        if dt > 0.0 {
            self.time += dt;
        }
    }

    /// Offset at the current time.
    pub fn offset_at(&self, field: &WindField, world_xz: Vec2, height_fraction: f32) -> Vec3 {
        field.evaluate(&self.params, world_xz, height_fraction, self.time)
    }
}
