//! Terrain mesh sources: FBM-generated grid meshes and raw vertex buffers.

use std::path::Path;

use glam::Vec3;
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// Parameters for a generated `rows x rows` grid mesh
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GridMeshParams {
    pub rows: usize,
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
    pub seed: u32,
    pub scale: f32,        // Horizontal scale (larger = smoother)
    pub height_scale: f32, // Vertical scale (max height above base)
    pub base_y: f32,
    pub octaves: u32,      // FBM octaves (detail levels)
    pub persistence: f32,  // FBM persistence (0.5 typical)
    pub lacunarity: f32,   // FBM lacunarity (2.0 typical)
}

impl Default for GridMeshParams {
    fn default() -> Self {
        Self {
            rows: 129,
            min_x: -128.0,
            max_x: 128.0,
            min_z: -128.0,
            max_z: 128.0,
            seed: 12345,
            scale: 60.0,
            height_scale: 22.4,
            base_y: -3.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

/// Generate a regular grid mesh vertex buffer.
///
/// Vertices are emitted row by row along Z, each row running along X, which
/// is how exported plane meshes are laid out.
pub fn generate_grid_mesh(params: &GridMeshParams) -> Vec<Vec3> {
    let rows = params.rows.max(2);
    let noise = Fbm::<Perlin>::new(params.seed)
        .set_octaves(params.octaves as usize)
        .set_persistence(params.persistence as f64)
        .set_lacunarity(params.lacunarity as f64);

    let step_x = (params.max_x - params.min_x) / (rows - 1) as f32;
    let step_z = (params.max_z - params.min_z) / (rows - 1) as f32;

    let mut vertices = Vec::with_capacity(rows * rows);
    for r in 0..rows {
        let z = params.min_z + r as f32 * step_z;
        for c in 0..rows {
            let x = params.min_x + c as f32 * step_x;
            let n = noise.get([(x / params.scale) as f64, (z / params.scale) as f64]);
            // [-1, 1] -> [0, height_scale]
            let h = ((n.clamp(-1.0, 1.0) + 1.0) * 0.5) as f32 * params.height_scale;
            vertices.push(Vec3::new(x, params.base_y + h, z));
        }
    }
    vertices
}

/// Decode a little-endian `f32` xyz vertex buffer.
pub fn parse_vertex_buffer(bytes: &[u8]) -> Result<Vec<Vec3>> {
    if bytes.len() % 12 != 0 {
        return Err(Error::InvalidMesh(format!(
            "vertex buffer length {} is not a multiple of 12",
            bytes.len()
        )));
    }
    Ok(bytes
        .chunks_exact(12)
        .map(|c| {
            let f = |o: usize| f32::from_le_bytes([c[o], c[o + 1], c[o + 2], c[o + 3]]);
            Vec3::new(f(0), f(4), f(8))
        })
        .collect())
}

/// Read a raw vertex buffer file (see [`parse_vertex_buffer`]).
pub fn read_vertex_buffer(path: impl AsRef<Path>) -> Result<Vec<Vec3>> {
    let bytes = std::fs::read(path)?;
    parse_vertex_buffer(&bytes)
}

/// Write a raw little-endian xyz vertex buffer.
pub fn write_vertex_buffer(path: impl AsRef<Path>, vertices: &[Vec3]) -> Result<()> {
    let mut bytes = Vec::with_capacity(vertices.len() * 12);
    for v in vertices {
        for c in v.to_array() {
            bytes.extend_from_slice(&c.to_le_bytes());
        }
    }
    std::fs::write(path, bytes)?;
    Ok(())
}
