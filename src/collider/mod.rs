//! Physics heightfield baking.
//!
//! Combines the terrain [`HeightGrid`](crate::terrain::HeightGrid) with the
//! water and fog masks. Cells classified as water (outside bridge footprints)
//! or fog are raised to a wall height, fencing them off in the physics world
//! while the visible terrain mesh stays untouched.

pub mod config;
pub mod heightfield;
pub mod builder;

pub use config::{ColliderConfig, WallHeight};
pub use heightfield::ColliderHeightfield;
pub use builder::{build_collider, dilate_mask};
