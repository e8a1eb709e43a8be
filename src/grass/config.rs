//! Grass field configuration.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Layout and blade shape of the infinite grass field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrassConfig {
    /// Nominal blade rows per side before axis scaling.
    pub grid_size: u32,
    /// Row multiplier along X.
    pub scale_x: f32,
    /// Row multiplier along Z.
    pub scale_z: f32,
    /// Distance between neighbouring blades.
    pub spacing: f32,
    /// Shift of the field centre along Z relative to the tracked entity.
    pub grid_offset_z: f32,
    pub blade_height: f32,
    /// Per-blade height jitter, +/-.
    pub max_height_variation: f32,
    /// Half the width of a blade's base.
    pub blade_half_width: f32,
    /// Lift of the blade base above the ground.
    pub base_y: f32,
    /// Seed for placement jitter.
    pub seed: u32,
}

impl Default for GrassConfig {
    fn default() -> Self {
        Self {
            grid_size: 510,
            scale_x: 1.6,
            scale_z: 0.9,
            spacing: 0.11,
            grid_offset_z: -15.0,
            blade_height: 0.42,
            max_height_variation: 0.11,
            blade_half_width: 0.05,
            base_y: 0.0,
            seed: 12345,
        }
    }
}

impl GrassConfig {
    /// Blade counts along X and Z (at least one each).
    pub fn counts(&self) -> (usize, usize) {
        let count = |scale: f32| ((self.grid_size as f32 * scale).round() as usize).max(1);
        (count(self.scale_x), count(self.scale_z))
    }

    pub fn blade_count(&self) -> usize {
        let (cx, cz) = self.counts();
        cx * cz
    }

    /// Replace values the field cannot be laid out with by their defaults.
    ///
    /// A spacing that is zero, negative or not finite would give a field
    /// with no extent to wrap in.
    pub fn validated(mut self) -> Self {
        if !(self.spacing > 0.0 && self.spacing.is_finite()) {
            let fallback = Self::default().spacing;
            log::warn!("Grass spacing {} is unusable, using {}", self.spacing, fallback);
            self.spacing = fallback;
        }
        self
    }

    /// World extent covered by the field before it repeats.
    pub fn field_size(&self) -> Vec2 {
        let (cx, cz) = self.counts();
        Vec2::new(cx as f32 * self.spacing, cz as f32 * self.spacing)
    }
}
