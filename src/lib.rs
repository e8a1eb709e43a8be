//! Glade - terrain collision and vegetation for a small open scene
//!
//! Height sampling over a regular terrain mesh, painted mask lookup, a
//! physics heightfield with water and fog walls, and an infinite
//! wind-blown grass field that follows the player.

pub mod core;
pub mod math;
pub mod terrain;
pub mod mask;
pub mod collider;
pub mod wind;
pub mod grass;
pub mod config;

pub use config::GladeConfig;
pub use crate::core::{Error, Result};
