//! Axis-aligned bounding box

use crate::core::types::Vec3;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Empty box that any point expands (min = +inf, max = -inf)
    pub fn inverted() -> Self {
        Self {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        }
    }

    /// Smallest box containing every point. `None` for an empty slice.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        Some(points.iter().fold(Self::inverted(), |mut aabb, &p| {
            aabb.expand(p);
            aabb
        }))
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn expand(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let aabb = Aabb::from_points(&[
            Vec3::new(1.0, -2.0, 3.0),
            Vec3::new(-1.0, 4.0, 0.0),
        ]).unwrap();
        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 4.0, 3.0));
        assert_eq!(aabb.center(), Vec3::new(0.0, 1.0, 1.5));
        assert_eq!(aabb.size(), Vec3::new(2.0, 6.0, 3.0));
    }

    #[test]
    fn test_from_no_points() {
        assert!(Aabb::from_points(&[]).is_none());
    }

    #[test]
    fn test_inverted_expands_to_first_point() {
        let mut aabb = Aabb::inverted();
        aabb.expand(Vec3::splat(2.0));
        assert_eq!(aabb, Aabb::new(Vec3::splat(2.0), Vec3::splat(2.0)));
    }
}
