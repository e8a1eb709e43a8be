//! Camera-facing frames for blade quads.
//!
//! Blades rotate about world up only. Seen from above they stay upright
//! instead of tipping toward the camera.

use glam::Vec3;

/// Offset used when the camera sits exactly on the blade.
const DEGENERATE_OFFSET: f32 = 1.0e-4;

/// Local frame of a billboarded blade.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BillboardFrame {
    /// Horizontal axis perpendicular to the view direction.
    pub right: Vec3,
    /// Always world up.
    pub up: Vec3,
}

impl BillboardFrame {
    pub fn compute(blade: Vec3, camera: Vec3) -> Self {
        let mut to_camera = camera - blade;
        if to_camera.length_squared() < DEGENERATE_OFFSET * DEGENERATE_OFFSET {
            to_camera = Vec3::splat(DEGENERATE_OFFSET);
        }
        let to_camera = to_camera.normalize();
        // Camera straight overhead leaves no horizontal component
        let right = Vec3::new(to_camera.z, 0.0, -to_camera.x).normalize_or(Vec3::X);
        Self { right, up: Vec3::Y }
    }

    /// World-space offset of a vertex with local `(x, y)` in the blade plane.
    #[inline]
    pub fn apply(&self, local_x: f32, local_y: f32) -> Vec3 {
        self.right * local_x + self.up * local_y
    }
}
