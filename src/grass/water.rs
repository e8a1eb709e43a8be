//! Hiding and shrinking blades over water.

use serde::{Deserialize, Serialize};

use crate::math::smoothstep;

/// Water mask response for grass blades.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterCulling {
    /// Blue value at or above which a blade counts as over water.
    pub threshold: f32,
    /// Base height that moves submerged blades out of view.
    pub hide_height: f32,
    /// Half-width of the shrink band around `threshold`.
    pub shrink_range: f32,
    /// Size factor on the water side of the band.
    pub min_scale: f32,
}

impl Default for WaterCulling {
    fn default() -> Self {
        Self {
            threshold: 0.22,
            hide_height: 200.0,
            shrink_range: 0.16,
            min_scale: 0.0,
        }
    }
}

impl WaterCulling {
    /// Whether a blade over water value `water` is moved out of view.
    #[inline]
    pub fn hides(&self, water: f32) -> bool {
        water >= self.threshold
    }

    /// Adjust a blade base height and return `(base_y, size_factor)` for a
    /// blade whose water mask reads `water`.
    pub fn apply(&self, base_y: f32, water: f32) -> (f32, f32) {
        let y = if self.hides(water) { self.hide_height } else { base_y };
        let edge = smoothstep(
            self.threshold - self.shrink_range,
            self.threshold + self.shrink_range,
            water,
        );
        let size = 1.0 + (self.min_scale - 1.0) * edge;
        (y, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dry_land_untouched() {
        let w = WaterCulling::default();
        assert_eq!(w.apply(3.5, 0.0), (3.5, 1.0));
    }

    #[test]
    fn test_water_hides_blade() {
        let w = WaterCulling::default();
        let (y, size) = w.apply(3.5, 0.9);
        assert_eq!(y, 200.0);
        assert_eq!(size, 0.0);
    }

    #[test]
    fn test_shore_shrinks_gradually() {
        let w = WaterCulling::default();
        let (y, size) = w.apply(1.0, 0.15);
        assert_eq!(y, 1.0);
        assert!(size > 0.0 && size < 1.0);
        let (_, nearer) = w.apply(1.0, 0.2);
        assert!(nearer < size);
    }
}
