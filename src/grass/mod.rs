//! Infinite wind-blown grass field.
//!
//! A fixed set of blades is laid out once ([`BladeField`]). Every frame the
//! blades are wrapped around the tracked entity ([`WrapField`]), dropped
//! onto the ground, culled over water, turned toward the camera
//! ([`BillboardFrame`]) and displaced by wind ([`crate::wind::WindField`]).

pub mod config;
pub mod params;
pub mod wrap;
pub mod billboard;
pub mod blades;
pub mod water;

pub use config::GrassConfig;
pub use params::GrassUniform;
pub use wrap::{WrapField, wrap_axis, wrap_position};
pub use billboard::BillboardFrame;
pub use blades::{BladeField, BladeVertex, VERTS_PER_BLADE};
pub use water::WaterCulling;

use glam::{Vec2, Vec3};
use rayon::prelude::*;

use crate::GladeConfig;
use crate::mask::{Channel, MaskTable, UvMapping};
use crate::terrain::HeightSource;
use crate::wind::{WindField, WindParams, WindState};

/// Owns the blade set and the per-frame state that drives it.
///
/// [`GrassSystem::update`] is the only writer of the anchor and time; it
/// must finish before [`GrassSystem::evaluate`] reads them for the frame.
pub struct GrassSystem<H: HeightSource> {
    config: GrassConfig,
    blades: BladeField,
    wrap: WrapField,
    wind: WindState,
    wind_field: WindField,
    ground: H,
    water: Option<MaskTable>,
    water_culling: WaterCulling,
    mapping: UvMapping,
}

impl<H: HeightSource> GrassSystem<H> {
    pub fn new(config: GrassConfig, ground: H) -> Self {
        let config = config.validated();
        let blades = BladeField::generate(&config);
        let (count_x, count_z) = blades.counts();
        let wrap = WrapField::new(
            Vec2::splat(config.spacing),
            count_x,
            count_z,
            Vec2::new(0.0, config.grid_offset_z),
        );
        log::info!(
            "Grass field: {} blades covering {:.1} x {:.1}",
            blades.blade_count(),
            wrap.field_size().x,
            wrap.field_size().y,
        );
        Self {
            config,
            blades,
            wrap,
            wind: WindState::default(),
            wind_field: WindField::procedural(),
            ground,
            water: None,
            water_culling: WaterCulling::default(),
            mapping: UvMapping::default(),
        }
    }

    /// Field set up from the scene configuration: layout, wind tuning,
    /// water culling and the shared world-to-UV mapping.
    pub fn from_config(config: &GladeConfig, ground: H) -> Self {
        let mut system = Self::new(config.grass.clone(), ground);
        system.wind.params = config.wind;
        system.water_culling = config.water;
        system.mapping = config.uv;
        system
    }

    pub fn with_wind(mut self, params: WindParams, field: WindField) -> Self {
        self.wind.params = params;
        self.wind_field = field;
        self
    }

    /// Swap the noise source, keeping the wind tuning.
    pub fn with_wind_field(mut self, field: WindField) -> Self {
        self.wind_field = field;
        self
    }

    /// Enable water culling using the blue channel of `mask`, looked up
    /// through the system's UV mapping.
    pub fn with_water(mut self, mask: MaskTable) -> Self {
        self.water = Some(mask);
        self
    }

    pub fn config(&self) -> &GrassConfig {
        &self.config
    }

    pub fn blades(&self) -> &BladeField {
        &self.blades
    }

    pub fn wrap_field(&self) -> &WrapField {
        &self.wrap
    }

    pub fn wind(&self) -> &WindState {
        &self.wind
    }

    pub fn wind_params_mut(&mut self) -> &mut WindParams {
        &mut self.wind.params
    }

    pub fn ground(&self) -> &H {
        &self.ground
    }

    pub fn vertex_count(&self) -> usize {
        self.blades.vertices().len()
    }

    /// Per-frame write: follow the tracked entity and advance wind time.
    pub fn update(&mut self, tracked_xz: Vec2, dt: f32) {
        self.wrap.set_anchor(tracked_xz);
        self.wind.advance(dt);
    }

    pub fn mapping(&self) -> &UvMapping {
        &self.mapping
    }

    pub fn water_culling(&self) -> &WaterCulling {
        &self.water_culling
    }

    /// Water mask value at world `(x, z)`, if a mask is installed.
    pub fn water_at(&self, x: f32, z: f32) -> Option<f32> {
        let water = self.water.as_ref()?;
        Some(water.sample_uv(self.mapping.world_to_uv(x, z), Channel::Blue))
    }

    /// Whether a blade rooted at `(x, z)` is hidden as submerged.
    pub fn is_submerged(&self, x: f32, z: f32) -> bool {
        self.water_at(x, z)
            .is_some_and(|w| self.water_culling.hides(w))
    }

    /// Final world position of one blade vertex.
    pub fn vertex_position(&self, vertex: &BladeVertex, camera: Vec3) -> Vec3 {
        let wrapped = self.wrap.wrap(vertex.center());
        let mut base = Vec3::new(
            wrapped.x,
            self.ground.height_at(wrapped.x, wrapped.z) + wrapped.y,
            wrapped.z,
        );

        let mut size = 1.0;
        if let Some(water) = self.water_at(wrapped.x, wrapped.z) {
            let (y, s) = self.water_culling.apply(base.y, water);
            base.y = y;
            size = s;
        }

        let offset = vertex.offset();
        let frame = BillboardFrame::compute(base, camera);
        let rotated = frame.apply(offset.x * size, offset.y * size);

        let wind = self.wind.offset_at(
            &self.wind_field,
            Vec2::new(wrapped.x, wrapped.z),
            self.wind.params.height_fraction(offset.y),
        );

        base + rotated + wind
    }

    /// Fill `out` with the world position of every blade vertex.
    ///
    /// `out` is resized to [`GrassSystem::vertex_count`] once and reused on
    /// later frames.
    pub fn evaluate(&self, camera: Vec3, out: &mut Vec<Vec3>) {
        out.resize(self.vertex_count(), Vec3::ZERO);
        out.par_iter_mut()
            .zip(self.blades.vertices().par_iter())
            .for_each(|(dst, vertex)| *dst = self.vertex_position(vertex, camera));
    }

    /// Uniform block for a GPU implementation of the same pass.
    pub fn build_uniform(&self) -> GrassUniform {
        let params = &self.wind.params;
        GrassUniform {
            anchor: self.wrap.anchor().to_array(),
            field_size: self.wrap.field_size().to_array(),
            wind_direction: params.unit_direction().to_array(),
            wind_speed: params.speed,
            time: self.wind.time,
            wind_scale1: params.scale1,
            wind_scale2: params.scale2,
            wind_strength: params.strength,
            height_divisor: params.height_divisor,
            water_threshold: self.water_culling.threshold,
            hide_height: self.water_culling.hide_height,
            shrink_range: self.water_culling.shrink_range,
            min_scale: self.water_culling.min_scale,
        }
    }
}
