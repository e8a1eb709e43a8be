//! Collider baking configuration.

use serde::{Deserialize, Serialize};

/// Clearance used when the configured margin would not lift the wall
/// above the terrain.
pub const MIN_WALL_CLEARANCE: f32 = 1.0;

/// Height used for blocked cells.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallHeight {
    /// `max(mesh_max_y + wall_margin, minimum_wall_height)`
    Auto,
    /// Explicit height. Must exceed the mesh maximum.
    Fixed(f32),
}

/// Thresholds and options for [`super::build_collider`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColliderConfig {
    /// Blue-channel range classified as water (inclusive).
    pub water_threshold_min: f32,
    pub water_threshold_max: f32,
    /// Red-channel value at or below which a cell is fog-blocked.
    pub fog_black_threshold: f32,
    pub wall_height: WallHeight,
    /// Clearance above the highest terrain point for `WallHeight::Auto`.
    pub wall_margin: f32,
    /// Lower bound for `WallHeight::Auto`.
    pub minimum_wall_height: f32,
    /// Grow the blocked mask by one cell (3x3) to close single-cell gaps.
    pub dilate: bool,
    /// Inflation applied to every bridge rectangle before testing.
    pub bridge_margin: f32,
    /// World Y of the collider origin.
    pub position_y: f32,
}

impl Default for ColliderConfig {
    fn default() -> Self {
        Self {
            water_threshold_min: 0.17,
            water_threshold_max: 0.95,
            fog_black_threshold: 0.02,
            wall_height: WallHeight::Auto,
            wall_margin: 10.0,
            minimum_wall_height: 40.0,
            dilate: true,
            bridge_margin: 0.5,
            position_y: 0.0,
        }
    }
}

impl ColliderConfig {
    #[inline]
    pub fn is_water(&self, blue: f32) -> bool {
        blue >= self.water_threshold_min && blue <= self.water_threshold_max
    }

    #[inline]
    pub fn is_fog_blocked(&self, red: f32) -> bool {
        red <= self.fog_black_threshold
    }

    /// Resolve the wall height for a terrain whose highest point is `max_y`.
    ///
    /// A fixed height that would not clear the terrain is replaced by the
    /// automatic value.
    pub fn resolve_wall_height(&self, max_y: f32) -> f32 {
        let auto = (max_y + self.wall_margin).max(self.minimum_wall_height);
        // Must stay strictly above the terrain whatever the margin
        let auto = if auto > max_y { auto } else { max_y + MIN_WALL_CLEARANCE };
        match self.wall_height {
            WallHeight::Auto => auto,
            WallHeight::Fixed(h) if h > max_y => h,
            WallHeight::Fixed(h) => {
                log::warn!(
                    "Wall height {} does not clear terrain max {}, using {}",
                    h, max_y, auto
                );
                auto
            }
        }
    }
}
