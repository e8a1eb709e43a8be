//! Procedural wind displacement for grass blades and foliage.
//!
//! Two noise layers scroll along the wind direction at different scales
//! and speeds; their product drives a horizontal offset that grows from
//! zero at a blade's base to full strength at its tip. Evaluation is a pure
//! function of position, height fraction, time and [`WindParams`].

pub mod noise;
pub mod field;
pub mod state;

pub use self::noise::{NoiseTable, hash_noise};
pub use field::WindField;
pub use state::WindState;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Wind tuning parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindParams {
    /// Wind direction on the XZ plane. Normalized before use.
    pub direction: Vec2,
    /// Scroll speed of the noise layers.
    pub speed: f32,
    /// Spatial frequency of the signed layer.
    pub scale1: f32,
    /// Spatial frequency of the gust layer.
    pub scale2: f32,
    /// Local height at which a blade reaches full sway.
    pub height_divisor: f32,
    /// Overall amplitude.
    pub strength: f32,
}

impl Default for WindParams {
    fn default() -> Self {
        Self {
            direction: Vec2::new(-1.0, 1.0),
            speed: 0.2,
            scale1: 0.06,
            scale2: 0.055,
            height_divisor: 0.25,
            strength: 1.0,
        }
    }
}

impl WindParams {
    /// Tree leaves and spruce crowns: same field, gentler sway.
    pub fn foliage() -> Self {
        Self {
            strength: 0.3,
            ..Self::default()
        }
    }

    /// Unit wind direction; zero when no direction is set.
    pub fn unit_direction(&self) -> Vec2 {
        self.direction.normalize_or_zero()
    }

    /// Sway weight for a vertex `local_y` above its base, in [0, 1].
    pub fn height_fraction(&self, local_y: f32) -> f32 {
        if self.height_divisor <= 0.0 {
            return 1.0;
        }
        (local_y / self.height_divisor).clamp(0.0, 1.0)
    }
}
