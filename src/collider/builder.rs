//! Heightfield collider builder.

use log::info;
use rayon::prelude::*;

use super::{ColliderConfig, ColliderHeightfield};
use crate::mask::{Channel, MaskTable, UvMapping};
use crate::math::Rect;
use crate::terrain::HeightGrid;

/// Bake a physics heightfield from the terrain grid and region masks.
///
/// A cell is blocked when its blue water value falls inside the configured
/// range and it lies outside every (inflated) bridge rectangle, or when its
/// red fog value is at or below the fog threshold. Blocked cells take the
/// wall height; all others keep the terrain height. The result depends only
/// on the inputs.
///
/// `mapping` turns cell positions into mask UVs and must be the same one the
/// renderer and grass use, or walls will not line up with painted water.
pub fn build_collider(
    grid: &HeightGrid,
    water: &MaskTable,
    fog: &MaskTable,
    bridges: &[Rect],
    mapping: &UvMapping,
    config: &ColliderConfig,
) -> ColliderHeightfield {
    let rows = grid.rows();
    let bridges: Vec<Rect> = bridges
        .iter()
        .map(|r| r.inflated(config.bridge_margin))
        .collect();

    // (blocked, inside a bridge footprint) per cell
    let classified: Vec<(bool, bool)> = (0..rows * rows)
        .into_par_iter()
        .map(|idx| {
            let (x, z) = grid.cell_position(idx / rows, idx % rows);
            let uv = mapping.world_to_uv(x, z);
            let on_bridge = bridges.iter().any(|r| r.contains(x, z));

            let water_blocked = !on_bridge && config.is_water(water.sample_uv(uv, Channel::Blue));
            let fog_blocked = config.is_fog_blocked(fog.sample_uv(uv, Channel::Red));
            (water_blocked || fog_blocked, on_bridge)
        })
        .collect();

    let mut blocked: Vec<bool> = classified.iter().map(|&(b, _)| b).collect();
    if config.dilate {
        let exempt: Vec<bool> = classified.iter().map(|&(_, e)| e).collect();
        blocked = dilate_mask(&blocked, &exempt, rows);
    }

    let wall_height = config.resolve_wall_height(grid.max_height());
    let heights: Vec<f32> = grid
        .heights()
        .iter()
        .zip(&blocked)
        .map(|(&h, &b)| if b { wall_height } else { h })
        .collect();

    let bounds = grid.bounds();
    let collider = ColliderHeightfield {
        rows,
        heights,
        blocked,
        wall_height,
        scale: bounds.size().with_y(1.0),
        center: bounds.center().with_y(config.position_y),
    };

    info!(
        "Collider baked: {}x{} cells, {} blocked, wall at {:.2}",
        rows,
        rows,
        collider.blocked_count(),
        wall_height
    );
    collider
}

/// One pass of 3x3 dilation over a square `rows x rows` mask.
///
/// A cell becomes blocked if it or any in-bounds neighbour is blocked.
/// Cells flagged in `exempt` keep their own value so bridge footprints are
/// not closed up by surrounding water.
pub fn dilate_mask(mask: &[bool], exempt: &[bool], rows: usize) -> Vec<bool> {
    (0..rows * rows)
        .into_par_iter()
        .map(|idx| {
            if mask[idx] || exempt[idx] {
                return mask[idx];
            }
            let i = idx / rows;
            let j = idx % rows;
            let i_range = i.saturating_sub(1)..=(i + 1).min(rows - 1);
            i_range.into_iter().any(|ni| {
                let j_range = j.saturating_sub(1)..=(j + 1).min(rows - 1);
                j_range.into_iter().any(|nj| mask[ni * rows + nj])
            })
        })
        .collect()
}
