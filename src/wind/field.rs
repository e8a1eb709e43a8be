//! Layered wind displacement.

use glam::{Vec2, Vec3};

use super::{NoiseTable, WindParams, hash_noise};

/// Slower drift of the gust layer relative to the signed layer.
const GUST_SPEED_RATIO: f32 = 0.3;

/// Noise source for wind evaluation. Holds no per-frame state.
#[derive(Clone, Debug, Default)]
pub struct WindField {
    noise: Option<NoiseTable>,
}

impl WindField {
    /// Field backed by a noise table, or by [`hash_noise`] when `None`.
    pub fn new(noise: Option<NoiseTable>) -> Self {
        Self { noise }
    }

    /// Field that always uses the hash fallback.
    pub fn procedural() -> Self {
        Self { noise: None }
    }

    pub fn has_table(&self) -> bool {
        self.noise.is_some()
    }

    #[inline]
    fn sample(&self, uv: Vec2) -> f32 {
        match &self.noise {
            Some(table) => table.sample(uv),
            None => hash_noise(uv),
        }
    }

    /// Wind offset for a vertex at `world_xz`, `height_fraction` of the way
    /// from its base (0) to its tip (1), at animation time `time`.
    ///
    /// The offset is horizontal, along the normalized wind direction.
    pub fn evaluate(&self, params: &WindParams, world_xz: Vec2, height_fraction: f32, time: f32) -> Vec3 {
        let dir = params.unit_direction();
        let scroll = dir * (time * params.speed);

        let uv1 = world_xz * params.scale1 + scroll;
        let uv2 = world_xz * params.scale2 + scroll * GUST_SPEED_RATIO;

        // [-0.5, 0.5] * [0, 1]
        let intensity = (self.sample(uv1) - 0.5) * self.sample(uv2);
        let amplitude = intensity * height_fraction.clamp(0.0, 1.0) * params.strength;

        Vec3::new(dir.x * amplitude, 0.0, dir.y * amplitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> [WindField; 2] {
        [
            WindField::procedural(),
            WindField::new(Some(NoiseTable::generate(16, 3, 1.0))),
        ]
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let params = WindParams::default();
        for field in fields() {
            let p = Vec2::new(12.5, -40.25);
            let a = field.evaluate(&params, p, 0.8, 3.75);
            let b = field.evaluate(&params, p, 0.8, 3.75);
            assert_eq!(a.to_array().map(f32::to_bits), b.to_array().map(f32::to_bits));
        }
    }

    #[test]
    fn test_base_does_not_move() {
        let params = WindParams::default();
        for field in fields() {
            for i in 0..20 {
                let p = Vec2::new(i as f32 * 1.7, i as f32 * -0.9);
                assert_eq!(field.evaluate(&params, p, 0.0, i as f32), Vec3::ZERO);
            }
        }
    }

    #[test]
    fn test_offset_is_along_direction_and_horizontal() {
        let params = WindParams { direction: Vec2::new(3.0, 4.0), ..Default::default() };
        let dir = params.unit_direction();
        for field in fields() {
            for i in 0..20 {
                let off = field.evaluate(&params, Vec2::new(i as f32, 2.0 * i as f32), 1.0, 0.5 * i as f32);
                assert_eq!(off.y, 0.0);
                // Cross product of offset and direction is zero
                assert!((off.x * dir.y - off.z * dir.x).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_unnormalized_direction_does_not_scale_amplitude() {
        let unit = WindParams { direction: Vec2::new(1.0, 0.0), ..Default::default() };
        let long = WindParams { direction: Vec2::new(25.0, 0.0), ..Default::default() };
        let field = WindField::procedural();
        let p = Vec2::new(4.0, 9.0);
        assert_eq!(field.evaluate(&unit, p, 1.0, 2.0), field.evaluate(&long, p, 1.0, 2.0));
    }

    #[test]
    fn test_amplitude_bounds() {
        let params = WindParams { strength: 2.0, ..Default::default() };
        for field in fields() {
            for i in 0..50 {
                let off = field.evaluate(&params, Vec2::new(i as f32 * 3.1, i as f32), 1.0, i as f32 * 0.1);
                // |[-0.5, 0.5] * [0, 1]| * strength
                assert!(off.length() <= 0.5 * 2.0 + 1e-5);
            }
        }
    }

    #[test]
    fn test_zero_direction_is_still() {
        let params = WindParams { direction: Vec2::ZERO, ..Default::default() };
        let off = WindField::procedural().evaluate(&params, Vec2::new(1.0, 1.0), 1.0, 10.0);
        assert_eq!(off, Vec3::ZERO);
    }

    #[test]
    fn test_wind_changes_over_time() {
        let params = WindParams::default();
        let field = WindField::new(Some(NoiseTable::generate(32, 11, 2.0)));
        let p = Vec2::new(5.0, 5.0);
        let samples: Vec<Vec3> = (0..10).map(|t| field.evaluate(&params, p, 1.0, t as f32 * 10.0)).collect();
        assert!(samples.windows(2).any(|w| w[0] != w[1]));
    }
}
