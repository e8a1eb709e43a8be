//! Axis-aligned rectangle in the world XZ plane

use serde::{Deserialize, Serialize};

use super::Aabb;

/// Rectangle on the ground plane, inclusive on all edges.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl Rect {
    pub fn new(min_x: f32, max_x: f32, min_z: f32, max_z: f32) -> Self {
        Self { min_x, max_x, min_z, max_z }
    }

    /// Footprint of a 3D box projected onto XZ.
    pub fn from_aabb_xz(aabb: &Aabb) -> Self {
        Self::new(aabb.min.x, aabb.max.x, aabb.min.z, aabb.max.z)
    }

    /// Grow the rectangle by `margin` on every side.
    pub fn inflated(&self, margin: f32) -> Self {
        Self {
            min_x: self.min_x - margin,
            max_x: self.max_x + margin,
            min_z: self.min_z - margin,
            max_z: self.max_z + margin,
        }
    }

    pub fn contains(&self, x: f32, z: f32) -> bool {
        x >= self.min_x && x <= self.max_x && z >= self.min_z && z <= self.max_z
    }
}
