//! Procedural blade placement.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use super::GrassConfig;

/// One blade vertex as uploaded to the GPU (24 bytes).
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct BladeVertex {
    /// Local blade root, before wrapping.
    pub center: [f32; 3],
    /// Offset in the billboard plane: x along `right`, y along up.
    pub offset: [f32; 3],
}

impl BladeVertex {
    pub fn center(&self) -> Vec3 {
        Vec3::from_array(self.center)
    }

    pub fn offset(&self) -> Vec3 {
        Vec3::from_array(self.offset)
    }
}

/// Vertices per blade: left foot, right foot, tip.
pub const VERTS_PER_BLADE: usize = 3;

/// Immutable blade geometry: a jittered grid centred on the origin.
#[derive(Clone, Debug)]
pub struct BladeField {
    count_x: usize,
    count_z: usize,
    vertices: Vec<BladeVertex>,
}

impl BladeField {
    /// Lay out `counts().0 x counts().1` blades.
    ///
    /// Placement depends only on the config (including `seed`).
    pub fn generate(config: &GrassConfig) -> Self {
        let (count_x, count_z) = config.counts();
        let spacing = config.spacing;
        let half_x = (count_x - 1) as f32 * spacing * 0.5;
        let half_z = (count_z - 1) as f32 * spacing * 0.5;

        let mut vertices = Vec::with_capacity(count_x * count_z * VERTS_PER_BLADE);
        for ix in 0..count_x {
            for iz in 0..count_z {
                let (gx, gz) = (ix as i32, iz as i32);
                let jitter_x = hash_2d(gx, gz, config.seed) - 0.5;
                let jitter_z = hash_2d(gx, gz, config.seed.wrapping_add(1)) - 0.5;
                let variation = (hash_2d(gx, gz, config.seed.wrapping_add(2)) * 2.0 - 1.0)
                    * config.max_height_variation;

                let center = [
                    ix as f32 * spacing - half_x + jitter_x * spacing,
                    config.base_y,
                    iz as f32 * spacing - half_z + jitter_z * spacing,
                ];
                let w = config.blade_half_width;
                vertices.push(BladeVertex { center, offset: [-w, 0.0, 0.0] });
                vertices.push(BladeVertex { center, offset: [w, 0.0, 0.0] });
                vertices.push(BladeVertex {
                    center,
                    offset: [0.0, config.blade_height + variation, 0.0],
                });
            }
        }

        log::debug!(
            "Blade field: {}x{} blades, {} vertices",
            count_x, count_z, vertices.len()
        );
        Self { count_x, count_z, vertices }
    }

    pub fn counts(&self) -> (usize, usize) {
        (self.count_x, self.count_z)
    }

    pub fn blade_count(&self) -> usize {
        self.count_x * self.count_z
    }

    pub fn vertices(&self) -> &[BladeVertex] {
        &self.vertices
    }

    /// Raw bytes for a vertex buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Integer hash producing a value in [0, 1).
fn hash_2d(ix: i32, iz: i32, seed: u32) -> f32 {
    let mut h = (ix as u32).wrapping_mul(374761393)
        .wrapping_add((iz as u32).wrapping_mul(668265263))
        .wrapping_add(seed.wrapping_mul(1274126177));
    h = (h ^ (h >> 13)).wrapping_mul(1103515245);
    h = h ^ (h >> 16);
    // 24 bits keep the quotient exactly representable and below 1
    (h >> 8) as f32 / (1u32 << 24) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> GrassConfig {
        GrassConfig {
            grid_size: 10,
            scale_x: 1.0,
            scale_z: 0.5,
            spacing: 0.2,
            ..Default::default()
        }
    }

    #[test]
    fn test_vertex_layout() {
        assert_eq!(std::mem::size_of::<BladeVertex>(), 24);
        let field = BladeField::generate(&small());
        assert_eq!(field.counts(), (10, 5));
        assert_eq!(field.vertices().len(), 50 * VERTS_PER_BLADE);
        assert_eq!(field.as_bytes().len(), 50 * VERTS_PER_BLADE * 24);
    }

    #[test]
    fn test_blade_shape() {
        let cfg = small();
        let field = BladeField::generate(&cfg);
        for blade in field.vertices().chunks_exact(3) {
            assert_eq!(blade[0].center, blade[1].center);
            assert_eq!(blade[1].center, blade[2].center);
            assert_eq!(blade[0].offset, [-cfg.blade_half_width, 0.0, 0.0]);
            assert_eq!(blade[1].offset, [cfg.blade_half_width, 0.0, 0.0]);
            let tip = blade[2].offset[1];
            assert!(tip >= cfg.blade_height - cfg.max_height_variation - 1e-6);
            assert!(tip <= cfg.blade_height + cfg.max_height_variation + 1e-6);
        }
    }

    #[test]
    fn test_blades_stay_near_their_cell() {
        let cfg = small();
        let field = BladeField::generate(&cfg);
        let half_x = 9.0 * cfg.spacing * 0.5;
        for (b, blade) in field.vertices().chunks_exact(3).enumerate() {
            let ix = b / 5;
            let nominal = ix as f32 * cfg.spacing - half_x;
            assert!((blade[0].center[0] - nominal).abs() <= cfg.spacing * 0.5 + 1e-6);
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = BladeField::generate(&small());
        let b = BladeField::generate(&small());
        assert_eq!(a.vertices(), b.vertices());
        let c = BladeField::generate(&GrassConfig { seed: 99, ..small() });
        assert_ne!(a.vertices(), c.vertices());
    }

    #[test]
    fn test_hash_range() {
        for i in -50..50 {
            let h = hash_2d(i, i * 7, 3);
            assert!((0.0..1.0).contains(&h));
        }
    }
}
