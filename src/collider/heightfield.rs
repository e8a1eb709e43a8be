//! Finalized collider heights ready for a physics heightfield shape.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// Immutable physics heightfield.
///
/// Heights share the terrain grid's column-major layout: index `i * rows + j`
/// with `i` along X and `j` along Z. The shape spans `scale.x` by `scale.z`
/// world units centred on `center`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColliderHeightfield {
    pub(crate) rows: usize,
    pub(crate) heights: Vec<f32>,
    pub(crate) blocked: Vec<bool>,
    pub(crate) wall_height: f32,
    pub(crate) scale: Vec3,
    pub(crate) center: Vec3,
}

impl ColliderHeightfield {
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Subdivision counts `(nrows, ncols)` as heightfield constructors take them.
    pub fn dims(&self) -> (usize, usize) {
        (self.rows - 1, self.rows - 1)
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    pub fn height(&self, i: usize, j: usize) -> f32 {
        self.heights[i * self.rows + j]
    }

    pub fn blocked(&self) -> &[bool] {
        &self.blocked
    }

    pub fn is_blocked(&self, i: usize, j: usize) -> bool {
        self.blocked[i * self.rows + j]
    }

    pub fn blocked_count(&self) -> usize {
        self.blocked.iter().filter(|&&b| b).count()
    }

    pub fn wall_height(&self) -> f32 {
        self.wall_height
    }

    /// `(width, 1, depth)`: heights are already in world units.
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// World position of the heightfield's centre.
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Nested `heights[i][j]` layout (rows along X, columns along Z).
    pub fn rows_major(&self) -> Vec<Vec<f32>> {
        self.heights
            .chunks_exact(self.rows)
            .map(|column| column.to_vec())
            .collect()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a heightfield written by [`ColliderHeightfield::to_json`].
    ///
    /// The arrays must describe a square grid of at least 2 x 2 cells.
    pub fn from_json(json: &str) -> Result<Self> {
        let field: Self = serde_json::from_str(json)?;
        field.validate()?;
        Ok(field)
    }

    fn validate(&self) -> Result<()> {
        if self.rows < 2 {
            return Err(Error::Config(format!(
                "heightfield needs at least 2 rows, got {}",
                self.rows
            )));
        }
        let cells = self.rows.checked_mul(self.rows).ok_or_else(|| {
            Error::Config(format!("heightfield rows {} overflow", self.rows))
        })?;
        if self.heights.len() != cells || self.blocked.len() != cells {
            return Err(Error::Config(format!(
                "heightfield {}x{} expects {} cells, got {} heights and {} blocked flags",
                self.rows,
                self.rows,
                cells,
                self.heights.len(),
                self.blocked.len()
            )));
        }
        Ok(())
    }
}
