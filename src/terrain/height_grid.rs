//! Regular height grid built from a terrain mesh vertex buffer.
//!
//! The grid is stored column-major: `heights[i * rows + j]` holds the height
//! at world `(min_x + i * delta_x, min_z + j * delta_z)`. The same layout is
//! handed to the physics heightfield, so `i` runs along X and `j` along Z.

use glam::Vec3;
use log::{debug, warn};

use super::HeightSource;
use crate::core::{Error, Result};
use crate::math::{Aabb, Rect};

/// Static terrain heights sampled on a `rows x rows` lattice.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightGrid {
    rows: usize,
    bounds: Aabb,
    heights: Vec<f32>,
}

impl HeightGrid {
    /// Build a grid from a vertex buffer describing a regular grid mesh.
    ///
    /// The vertex count must be a perfect square of at least 4. Cells not hit
    /// by any vertex keep the mesh's minimum Y. When two vertices round to the
    /// same cell the later one wins.
    pub fn build(vertices: &[Vec3]) -> Result<Self> {
        if vertices.len() < 4 {
            return Err(Error::InvalidMesh(format!(
                "need at least 4 vertices, got {}",
                vertices.len()
            )));
        }

        let rows = vertices.len().isqrt();
        if rows * rows != vertices.len() {
            return Err(Error::InvalidMesh(format!(
                "vertex count {} is not a perfect square",
                vertices.len()
            )));
        }

        // Non-empty, checked above
        let bounds = Aabb::from_points(vertices)
            .ok_or_else(|| Error::InvalidMesh("empty vertex buffer".into()))?;
        let size = bounds.size();
        if !(size.x > 0.0 && size.z > 0.0) || !size.is_finite() {
            return Err(Error::InvalidMesh(format!(
                "degenerate XZ extents {:?}",
                size
            )));
        }

        let segments = (rows - 1) as f32;
        let delta_x = size.x / segments;
        let delta_z = size.z / segments;
        let last = rows - 1;

        let mut heights = vec![bounds.min.y; rows * rows];
        for v in vertices {
            let i = (((v.x - bounds.min.x) / delta_x).round().max(0.0) as usize).min(last);
            let j = (((v.z - bounds.min.z) / delta_z).round().max(0.0) as usize).min(last);
            heights[i * rows + j] = v.y;
        }

        debug!(
            "Height grid: {}x{} cells, x [{:.2}, {:.2}], z [{:.2}, {:.2}], y [{:.2}, {:.2}]",
            rows, rows, bounds.min.x, bounds.max.x, bounds.min.z, bounds.max.z,
            bounds.min.y, bounds.max.y,
        );

        Ok(Self { rows, bounds, heights })
    }

    /// Flat grid at height `y` covering `extents`.
    ///
    /// Used as the degraded default when the terrain mesh is unusable, so the
    /// collider and vegetation still have something to stand on.
    pub fn flat(rows: usize, extents: Rect, y: f32) -> Self {
        let rows = rows.max(2);
        Self {
            rows,
            bounds: Aabb::new(
                Vec3::new(extents.min_x, y, extents.min_z),
                Vec3::new(extents.max_x, y, extents.max_z),
            ),
            heights: vec![y; rows * rows],
        }
    }

    /// Build from `vertices`, falling back to [`HeightGrid::flat`] on an
    /// invalid mesh.
    pub fn build_or_flat(vertices: &[Vec3], rows: usize, extents: Rect, y: f32) -> Self {
        match Self::build(vertices) {
            Ok(grid) => grid,
            Err(e) => {
                warn!("Terrain mesh rejected ({}), using flat {}x{} grid at y={}", e, rows, rows, y);
                Self::flat(rows, extents, y)
            }
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Full 3D bounds of the source mesh.
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    pub fn min_x(&self) -> f32 {
        self.bounds.min.x
    }

    pub fn max_x(&self) -> f32 {
        self.bounds.max.x
    }

    pub fn min_z(&self) -> f32 {
        self.bounds.min.z
    }

    pub fn max_z(&self) -> f32 {
        self.bounds.max.z
    }

    pub fn min_height(&self) -> f32 {
        self.bounds.min.y
    }

    pub fn max_height(&self) -> f32 {
        self.bounds.max.y
    }

    pub fn delta_x(&self) -> f32 {
        (self.bounds.max.x - self.bounds.min.x) / (self.rows - 1) as f32
    }

    pub fn delta_z(&self) -> f32 {
        (self.bounds.max.z - self.bounds.min.z) / (self.rows - 1) as f32
    }

    /// Raw column-major heights.
    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Stored height of cell `(i, j)`; `i` along X, `j` along Z.
    #[inline]
    pub fn height(&self, i: usize, j: usize) -> f32 {
        self.heights[i * self.rows + j]
    }

    /// World XZ of cell `(i, j)`.
    pub fn cell_position(&self, i: usize, j: usize) -> (f32, f32) {
        (
            self.bounds.min.x + i as f32 * self.delta_x(),
            self.bounds.min.z + j as f32 * self.delta_z(),
        )
    }

    /// Bilinear height at world `(x, z)`.
    ///
    /// Positions outside the grid clamp to the nearest border cell; this
    /// never extrapolates and never fails.
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        let last = (self.rows - 1) as f32;
        let fx = ((x - self.bounds.min.x) / self.delta_x()).clamp(0.0, last);
        let fz = ((z - self.bounds.min.z) / self.delta_z()).clamp(0.0, last);
        // NaN input clamps to NaN; pin it to the origin cell instead
        let fx = if fx.is_nan() { 0.0 } else { fx };
        let fz = if fz.is_nan() { 0.0 } else { fz };

        let i0 = (fx.floor() as usize).min(self.rows - 2);
        let j0 = (fz.floor() as usize).min(self.rows - 2);
        let tx = fx - i0 as f32;
        let tz = fz - j0 as f32;

        let h00 = self.height(i0, j0);
        let h10 = self.height(i0 + 1, j0);
        let h01 = self.height(i0, j0 + 1);
        let h11 = self.height(i0 + 1, j0 + 1);

        let a = lerp(h00, h10, tx);
        let b = lerp(h01, h11, tx);
        lerp(a, b, tz)
    }

    /// Surface normal from central differences, one cell wide.
    pub fn normal_at(&self, x: f32, z: f32) -> Vec3 {
        let step = self.delta_x();
        let hl = self.height_at(x - step, z);
        let hr = self.height_at(x + step, z);
        let hd = self.height_at(x, z - step);
        let hu = self.height_at(x, z + step);
        Vec3::new(hl - hr, 2.0 * step, hd - hu).normalize_or(Vec3::Y)
    }
}

impl HeightSource for HeightGrid {
    fn height_at(&self, x: f32, z: f32) -> f32 {
        HeightGrid::height_at(self, x, z)
    }
}

/// Linear blend that returns `a` exactly when both ends agree, so flat
/// regions stay bit-exact.
#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    if a == b {
        a
    } else {
        a * (1.0 - t) + b * t
    }
}
