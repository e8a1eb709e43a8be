//! GPU-ready grass uniform (64 bytes, 16-byte aligned).
//!
//! Carries the per-frame anchor and time plus the tuning values a vertex
//! shader needs to reproduce [`super::GrassSystem::evaluate`].

use bytemuck::{Pod, Zeroable};

/// GPU uniform for the grass pass.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct GrassUniform {
    pub anchor: [f32; 2],
    pub field_size: [f32; 2],
    // -- 16 bytes --
    pub wind_direction: [f32; 2],
    pub wind_speed: f32,
    pub time: f32,
    // -- 16 bytes --
    pub wind_scale1: f32,
    pub wind_scale2: f32,
    pub wind_strength: f32,
    pub height_divisor: f32,
    // -- 16 bytes --
    pub water_threshold: f32,
    pub hide_height: f32,
    pub shrink_range: f32,
    pub min_scale: f32,
    // -- 16 bytes --
    // Total: 64 bytes
}
