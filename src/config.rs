//! Scene configuration file.
//!
//! Every tuning group has its own `Default`; a JSON file only needs to name
//! the values it changes. The one [`UvMapping`] here is what the collider,
//! the grass water lookup and heightmap images all sample masks through.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::collider::ColliderConfig;
use crate::core::Result;
use crate::grass::{GrassConfig, WaterCulling};
use crate::mask::{HeightmapImage, MaskTable, UvMapping};
use crate::math::Rect;
use crate::terrain::GridMeshParams;
use crate::wind::WindParams;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GladeConfig {
    /// World to mask-texture mapping for every mask lookup in the scene.
    pub uv: UvMapping,
    pub collider: ColliderConfig,
    pub grass: GrassConfig,
    pub water: WaterCulling,
    pub wind: WindParams,
    /// Terrain generated when no mesh file is supplied.
    pub mesh: GridMeshParams,
    /// Walkable crossings over water (world XZ).
    pub bridges: Vec<Rect>,
}

impl Default for GladeConfig {
    fn default() -> Self {
        Self {
            uv: UvMapping::default(),
            collider: ColliderConfig::default(),
            grass: GrassConfig::default(),
            water: WaterCulling::default(),
            wind: WindParams::default(),
            mesh: GridMeshParams::default(),
            bridges: Vec::new(),
        }
    }
}

impl GladeConfig {
    /// Heightmap image sampled through the scene mapping.
    pub fn heightmap(&self, table: MaskTable) -> HeightmapImage {
        HeightmapImage::new(table, self.uv)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&json)?;
        log::debug!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = self.to_json_string()?;
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }
}
