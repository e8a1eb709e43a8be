//! Collider baker - builds the terrain physics heightfield offline.
//!
//! Usage: cargo run --release --bin bake_collider -- [OPTIONS]
//!
//! Options:
//!   --mesh <FILE>     Terrain vertices as little-endian f32 xyz triplets
//!   --rows <N>        Rows of the generated terrain when no mesh is given
//!   --water <PNG>     Water mask (blue channel)
//!   --fog <PNG>       Fog mask (red channel, black = blocked)
//!   --config <JSON>   Scene configuration (default: built-in values)
//!   --out <JSON>      Output file (default: "collider.json")
//!
//! Missing or unreadable masks are replaced by neutral ones (no water, no
//! fog) and an unusable mesh by a flat grid, each with a warning.

use std::path::PathBuf;
use std::time::Instant;

use glade::collider::build_collider;
use glade::mask::MaskTable;
use glade::math::{Aabb, Rect};
use glade::terrain::{HeightGrid, generate_grid_mesh};
use glade::terrain::mesh::read_vertex_buffer;
use glade::GladeConfig;

fn main() -> glade::Result<()> {
    glade::core::logging::init();

    let args: Vec<String> = std::env::args().collect();
    let mesh_path = parse_str_arg(&args, "--mesh").map(PathBuf::from);
    let rows = parse_usize_arg(&args, "--rows");
    let water_path = parse_str_arg(&args, "--water").map(PathBuf::from);
    let fog_path = parse_str_arg(&args, "--fog").map(PathBuf::from);
    let config_path = parse_str_arg(&args, "--config").map(PathBuf::from);
    let out_path = parse_str_arg(&args, "--out")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("collider.json"));

    let mut config = match &config_path {
        Some(path) => GladeConfig::load(path)?,
        None => GladeConfig::default(),
    };
    if let Some(rows) = rows {
        config.mesh.rows = rows;
    }

    println!("=== Glade Collider Baker ===");
    match &mesh_path {
        Some(path) => println!("Mesh:   {}", path.display()),
        None => println!("Mesh:   generated {}x{} (seed {})", config.mesh.rows, config.mesh.rows, config.mesh.seed),
    }
    println!("Water:  {}", water_path.as_ref().map_or("none".into(), |p| p.display().to_string()));
    println!("Fog:    {}", fog_path.as_ref().map_or("none".into(), |p| p.display().to_string()));
    println!("Output: {}", out_path.display());
    println!();

    let start = Instant::now();

    let vertices = match &mesh_path {
        Some(path) => read_vertex_buffer(path)?,
        None => generate_grid_mesh(&config.mesh),
    };
    // Flat fallback covers the mesh footprint when there is one
    let extents = Aabb::from_points(&vertices)
        .map(|b| Rect::from_aabb_xz(&b))
        .filter(|r| r.max_x > r.min_x && r.max_z > r.min_z)
        .unwrap_or_else(|| Rect::new(
            config.mesh.min_x,
            config.mesh.max_x,
            config.mesh.min_z,
            config.mesh.max_z,
        ));
    let grid = HeightGrid::build_or_flat(&vertices, config.mesh.rows, extents, config.mesh.base_y);

    let water = match &water_path {
        Some(path) => MaskTable::open_or_neutral(path, MaskTable::NEUTRAL_WATER),
        None => MaskTable::uniform(MaskTable::NEUTRAL_WATER),
    };
    let fog = match &fog_path {
        Some(path) => MaskTable::open_or_neutral(path, MaskTable::NEUTRAL_FOG),
        None => MaskTable::uniform(MaskTable::NEUTRAL_FOG),
    };

    let collider = build_collider(&grid, &water, &fog, &config.bridges, &config.uv, &config.collider);

    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&out_path, collider.to_json()?)?;

    let rows = collider.rows();
    let blocked = collider.blocked_count();
    println!("Grid:    {} x {} ({:.1} x {:.1} world units)", rows, rows, collider.scale().x, collider.scale().z);
    println!("Heights: {:.2} .. {:.2}", grid.min_height(), grid.max_height());
    println!("Blocked: {} of {} cells ({:.1}%)", blocked, rows * rows, 100.0 * blocked as f64 / (rows * rows) as f64);
    println!("Wall:    {:.2}", collider.wall_height());
    println!("Done in {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn parse_usize_arg(args: &[String], flag: &str) -> Option<usize> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}
