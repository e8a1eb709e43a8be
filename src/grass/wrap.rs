//! Toroidal wrapping of a finite blade set around a moving anchor.
//!
//! Every blade keeps a fixed local position. Each frame its position is
//! wrapped into the window `[-size/2, size/2)` around the anchor, so the
//! same blades keep reappearing ahead of the player.

use glam::{Vec2, Vec3};

/// Wrap one coordinate into `[anchor - size/2, anchor + size/2)`.
///
/// Uses Euclidean remainder so negative offsets wrap the same way as
/// positive ones. A `size` that is not positive and finite has no window
/// to wrap into; `local` is returned unchanged.
#[inline]
pub fn wrap_axis(local: f32, anchor: f32, size: f32) -> f32 {
    if !(size > 0.0 && size.is_finite()) {
        return local;
    }
    let half = size * 0.5;
    let wrapped = (local - anchor + half).rem_euclid(size) - half;
    // rem_euclid may round up to exactly `size` for tiny negative inputs
    let wrapped = if wrapped >= half { wrapped - size } else { wrapped };
    wrapped + anchor
}

/// Wrap a local point's XZ around `anchor`; Y passes through.
#[inline]
pub fn wrap_position(local: Vec3, anchor: Vec2, field_size: Vec2) -> Vec3 {
    Vec3::new(
        wrap_axis(local.x, anchor.x, field_size.x),
        local.y,
        wrap_axis(local.z, anchor.y, field_size.y),
    )
}

/// Wrap window parameters plus the anchor updated each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WrapField {
    pub spacing: Vec2,
    pub count_x: usize,
    pub count_z: usize,
    /// Fixed shift applied to the tracked position.
    pub anchor_offset: Vec2,
    anchor: Vec2,
}

impl WrapField {
    pub fn new(spacing: Vec2, count_x: usize, count_z: usize, anchor_offset: Vec2) -> Self {
        Self {
            spacing,
            count_x,
            count_z,
            anchor_offset,
            anchor: anchor_offset,
        }
    }

    /// `count * spacing` per axis.
    pub fn field_size(&self) -> Vec2 {
        Vec2::new(
            self.count_x as f32 * self.spacing.x,
            self.count_z as f32 * self.spacing.y,
        )
    }

    /// Move the wrap centre to follow the tracked entity at `tracked_xz`.
    pub fn set_anchor(&mut self, tracked_xz: Vec2) {
        self.anchor = tracked_xz + self.anchor_offset;
    }

    /// Current wrap centre (tracked position plus offset).
    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    pub fn wrap(&self, local: Vec3) -> Vec3 {
        wrap_position(local, self.anchor, self.field_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_examples() {
        assert_eq!(wrap_axis(7.0, 0.0, 10.0), -3.0);
        assert_eq!(wrap_axis(-7.0, 0.0, 10.0), 3.0);
        assert_eq!(wrap_axis(2.0, 0.0, 10.0), 2.0);
        assert_eq!(wrap_axis(5.0, 0.0, 10.0), -5.0);
        assert_eq!(wrap_axis(-5.0, 0.0, 10.0), -5.0);
    }

    #[test]
    fn test_wrap_stays_in_window() {
        let size = 10.0;
        for a in -50..50 {
            let anchor = a as f32 * 3.3;
            for l in -40..40 {
                let local = l as f32 * 0.77;
                let w = wrap_axis(local, anchor, size);
                assert!(w - anchor >= -size * 0.5 - 1e-4 && w - anchor < size * 0.5 + 1e-4,
                    "local {} anchor {} -> {}", local, anchor, w);
                // Wrapping only ever shifts by whole field sizes
                let k = (w - local) / size;
                assert!((k - k.round()).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_continuous_anchor_sweep() {
        let size = 10.0;
        let local = 1.25;
        let mut prev = wrap_axis(local, 0.0, size);
        let steps = 10_000;
        let mut jumps = 0;
        for s in 1..=steps {
            let anchor = 100.0 * s as f32 / steps as f32;
            let w = wrap_axis(local, anchor, size);
            let d = w - prev;
            if d.abs() > 1e-3 {
                // A wrap moves the point forward by exactly one field size
                assert!((d - size).abs() < 1e-3, "jump of {} at anchor {}", d, anchor);
                jumps += 1;
            }
            prev = w;
        }
        assert_eq!(jumps, 10);
    }

    #[test]
    fn test_wrap_without_extent_is_finite() {
        let field = WrapField::new(Vec2::ZERO, 10, 10, Vec2::ZERO);
        assert_eq!(field.wrap(Vec3::new(1.0, 0.0, 1.0)), Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(wrap_axis(4.0, 2.0, f32::NAN), 4.0);
        assert_eq!(wrap_axis(4.0, 2.0, -10.0), 4.0);
    }

    #[test]
    fn test_wrap_position_passes_y() {
        let p = wrap_position(Vec3::new(7.0, 1.5, -7.0), Vec2::ZERO, Vec2::splat(10.0));
        assert_eq!(p, Vec3::new(-3.0, 1.5, 3.0));
    }

    #[test]
    fn test_wrap_field_anchor_offset() {
        let mut field = WrapField::new(Vec2::splat(0.5), 20, 10, Vec2::new(0.0, -15.0));
        assert_eq!(field.field_size(), Vec2::new(10.0, 5.0));
        field.set_anchor(Vec2::new(3.0, 4.0));
        assert_eq!(field.anchor(), Vec2::new(3.0, -11.0));
        let w = field.wrap(Vec3::new(0.0, 0.0, 0.0));
        assert!((w.x - 3.0).abs() < 5.0 + 1e-4);
        assert!((w.z + 11.0).abs() <= 2.5 + 1e-4);
    }
}
