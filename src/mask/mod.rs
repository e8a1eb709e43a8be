//! Raster masks: water, path and fog classification images.
//!
//! Masks are decoded once into [`MaskTable`]s and sampled by UV. Mapping a
//! world position to UV is the job of [`UvMapping`]; every consumer (the
//! collider builder, grass height lookup, grass water culling) goes through
//! the same mapping so visual and physical classification agree.

pub mod table;
pub mod uv;
pub mod heightmap;

pub use table::{Channel, MaskTable};
pub use uv::UvMapping;
pub use heightmap::HeightmapImage;
