//! Mathematical utilities and data structures

pub mod aabb;
pub mod rect;

pub use aabb::Aabb;
pub use rect::Rect;

/// Hermite smoothstep, matching the shader-side definition.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge0 == edge1 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Fractional part with a non-negative result (`x - floor(x)`).
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}
