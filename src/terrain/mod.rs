//! Terrain height sampling
//!
//! [`HeightGrid`] is built once from the terrain mesh. [`TerrainSurface`]
//! wraps an optional grid so height and normal queries are answerable
//! before the terrain has finished loading.

pub mod height_grid;
pub use height_grid::HeightGrid;

pub mod mesh;
pub use mesh::{GridMeshParams, generate_grid_mesh};

use glam::Vec3;

/// Anything that can answer "how high is the ground at (x, z)".
pub trait HeightSource: Send + Sync {
    fn height_at(&self, x: f32, z: f32) -> f32;
}

/// Terrain heights that may not be loaded yet.
#[derive(Clone, Debug, Default)]
pub struct TerrainSurface {
    grid: Option<HeightGrid>,
    /// Height reported while no grid is installed.
    pub fallback_height: f32,
}

impl TerrainSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grid(grid: HeightGrid) -> Self {
        Self { grid: Some(grid), fallback_height: 0.0 }
    }

    /// Install the grid once the terrain load completes.
    pub fn set_grid(&mut self, grid: HeightGrid) {
        self.grid = Some(grid);
    }

    pub fn grid(&self) -> Option<&HeightGrid> {
        self.grid.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.grid.is_some()
    }

    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        match &self.grid {
            Some(grid) => grid.height_at(x, z),
            None => self.fallback_height,
        }
    }

    /// Surface normal, or straight up while the grid is missing.
    pub fn normal_at(&self, x: f32, z: f32) -> Vec3 {
        match &self.grid {
            Some(grid) => grid.normal_at(x, z),
            None => Vec3::Y,
        }
    }
}

impl HeightSource for TerrainSurface {
    fn height_at(&self, x: f32, z: f32) -> f32 {
        TerrainSurface::height_at(self, x, z)
    }
}
